//! $402 Economics Module
//!
//! Implements the pricing side of pay-per-access content:
//! - Bonding-curve pricing by supply position
//! - Issuer / serving-network revenue split
//! - Forward simulation of serving income (ROI, breakeven)
//! - Revenue aggregation and price schedules
//!
//! Everything here is pure: no state, no I/O, safe to call from any thread.

pub mod estimator;
pub mod pricing;
pub mod revenue;

pub use estimator::{
    Breakeven, BreakevenProbability, EconomicsAnalysis, EconomicsEstimator, PricePoint,
    RevenueSummary, RoiProjection,
};
pub use pricing::{PriceCalculator, PricingModel, PricingRules};
pub use revenue::{RevenueCalculator, RevenueModel, RevenueRules, RevenueSplit};

/// Economic constants
pub mod constants {
    /// Lowest supply position the curves are evaluated at
    pub const MIN_SUPPLY: u64 = 1;

    /// Lowest price any decaying curve may quote
    pub const MIN_PRICE: u64 = 1;

    /// Default floor for `linear_floor` pricing
    pub const DEFAULT_LINEAR_FLOOR: u64 = 50;

    /// Default per-unit decay for `linear_floor` pricing
    pub const DEFAULT_LINEAR_DECAY_RATE: f64 = 10.0;

    /// Default issuer floor for `decaying_issuer` revenue
    pub const DEFAULT_ISSUER_FLOOR: f64 = 0.1;

    /// Default per-unit decay for `decaying_issuer` revenue
    pub const DEFAULT_ISSUER_DECAY_RATE: f64 = 0.005;

    /// Hard cap on simulated buyers when searching for breakeven
    pub const MAX_BREAKEVEN_BUYERS: u64 = 100_000;

    /// Default expected total supply for ROI projections
    pub const DEFAULT_PROJECTED_SUPPLY: u64 = 1_000;

    /// Default fraction of holders actively serving
    pub const DEFAULT_SERVING_PARTICIPATION: f64 = 0.5;

    /// Default sample points for price schedules
    pub const DEFAULT_SCHEDULE_POINTS: [u64; 7] = [1, 5, 10, 50, 100, 500, 1000];
}
