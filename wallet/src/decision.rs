//! Acquisition candidates and budget decisions

use path402_economics::{EconomicsEstimator, PriceCalculator, PricingRules, RevenueRules};
use serde::{Deserialize, Serialize};

/// Default ceiling on what an agent pays for a single token
pub const DEFAULT_MAX_PRICE_PER_ITEM: u64 = 10_000;

/// Discovered terms for one content address.
///
/// Supplied by the caller on every evaluation; supply is never cached here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentOffer {
    pub address: String,
    pub pricing: PricingRules,
    pub revenue: RevenueRules,
    #[serde(default)]
    pub current_supply: u64,
    /// Payee recorded on the acquired token
    #[serde(default)]
    pub issuer: String,
}

impl ContentOffer {
    pub fn new(
        address: impl Into<String>,
        pricing: PricingRules,
        revenue: RevenueRules,
        current_supply: u64,
        issuer: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            pricing,
            revenue,
            current_supply,
            issuer: issuer.into(),
        }
    }

    /// Price the next buyer pays
    pub fn current_price(&self) -> u64 {
        PriceCalculator::price(&self.pricing, self.current_supply)
    }

    /// Model tags this build does not know (priced as fixed, split as fixed share)
    pub fn unrecognized_models(&self) -> Vec<&str> {
        let mut tags = Vec::new();
        if !self.pricing.model.is_recognized() {
            tags.push(self.pricing.model.as_str());
        }
        if !self.revenue.model.is_recognized() {
            tags.push(self.revenue.model.as_str());
        }
        tags
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Acquire,
    Skip,
    InsufficientFunds,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Acquire => "acquire",
            Recommendation::Skip => "skip",
            Recommendation::InsufficientFunds => "insufficient_funds",
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of evaluating one candidate acquisition. Not persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetDecision {
    pub address: String,
    pub current_price: u64,
    pub within_budget: bool,
    /// Balance left after following the recommendation
    pub budget_remaining: i64,
    /// Fractional ROI (`0.25` = +25%); only computed on the acquire branch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_roi: Option<f64>,
    pub recommendation: Recommendation,
    pub reasoning: String,
}

impl BudgetDecision {
    pub fn should_acquire(&self) -> bool {
        self.recommendation == Recommendation::Acquire
    }

    /// Expected ROI rounded to whole percent
    pub fn expected_roi_percent(&self) -> Option<i64> {
        self.expected_roi.map(EconomicsEstimator::roi_percent)
    }
}
