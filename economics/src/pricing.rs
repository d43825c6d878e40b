//! Bonding-curve pricing by supply position

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{DEFAULT_LINEAR_DECAY_RATE, DEFAULT_LINEAR_FLOOR, MIN_PRICE, MIN_SUPPLY};

/// Pricing curve selected by the content issuer.
///
/// Serialized as its snake_case tag. A tag this build does not know is kept
/// verbatim in `Unrecognized` so it survives re-serialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PricingModel {
    /// Flat `base_price` at every position
    Fixed,
    /// `base_price / sqrt(n)`, floor-clamped
    SqrtDecay,
    /// `base_price / ln(n + 1)`, floor-clamped
    LogDecay,
    /// `base_price - decay_rate * n` until the floor, then flat
    LinearFloor,
    /// Tag this build does not know; priced as `Fixed`
    Unrecognized(String),
}

impl PricingModel {
    pub fn as_str(&self) -> &str {
        match self {
            PricingModel::Fixed => "fixed",
            PricingModel::SqrtDecay => "sqrt_decay",
            PricingModel::LogDecay => "log_decay",
            PricingModel::LinearFloor => "linear_floor",
            PricingModel::Unrecognized(tag) => tag,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, PricingModel::Unrecognized(_))
    }
}

impl fmt::Display for PricingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for PricingModel {
    fn from(tag: &str) -> Self {
        match tag {
            "fixed" => PricingModel::Fixed,
            "sqrt_decay" => PricingModel::SqrtDecay,
            "log_decay" => PricingModel::LogDecay,
            "linear_floor" => PricingModel::LinearFloor,
            other => PricingModel::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for PricingModel {
    fn from(tag: String) -> Self {
        PricingModel::from(tag.as_str())
    }
}

impl From<PricingModel> for String {
    fn from(model: PricingModel) -> Self {
        match model {
            PricingModel::Unrecognized(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for PricingModel {
    type Err = std::convert::Infallible;

    /// Unknown tags map to `Unrecognized` rather than failing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(PricingModel::from(s))
    }
}

/// Issuer-defined pricing terms for one content address.
///
/// Immutable once published. Values are trusted as given: negative or
/// nonsensical parameters are the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRules {
    pub model: PricingModel,
    pub base_price: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decay_rate: Option<f64>,
}

impl PricingRules {
    pub fn fixed(base_price: u64) -> Self {
        Self {
            model: PricingModel::Fixed,
            base_price,
            floor: None,
            decay_rate: None,
        }
    }

    pub fn sqrt_decay(base_price: u64, floor: Option<u64>) -> Self {
        Self {
            model: PricingModel::SqrtDecay,
            base_price,
            floor,
            decay_rate: None,
        }
    }

    pub fn log_decay(base_price: u64, floor: Option<u64>) -> Self {
        Self {
            model: PricingModel::LogDecay,
            base_price,
            floor,
            decay_rate: None,
        }
    }

    pub fn linear_floor(base_price: u64, floor: Option<u64>, decay_rate: Option<f64>) -> Self {
        Self {
            model: PricingModel::LinearFloor,
            base_price,
            floor,
            decay_rate,
        }
    }

    /// Price for the buyer arriving after `supply` units have sold
    pub fn price_at(&self, supply: u64) -> u64 {
        PriceCalculator::price(self, supply)
    }
}

pub struct PriceCalculator;

impl PriceCalculator {
    /// Price the next buyer pays when `supply` units have already sold.
    ///
    /// Positions below `MIN_SUPPLY` are evaluated at `MIN_SUPPLY`. Every
    /// decaying curve is clamped to at least `MIN_PRICE`. Silent: this runs
    /// once per simulated buyer, so unknown models are reported where rules
    /// are loaded.
    pub fn price(rules: &PricingRules, supply: u64) -> u64 {
        let n = supply.max(MIN_SUPPLY) as f64;
        let base = rules.base_price as f64;

        match rules.model {
            PricingModel::Fixed => rules.base_price,
            PricingModel::SqrtDecay => {
                let floor = Self::curve_floor(rules.floor, MIN_PRICE);
                Self::clamp(base / n.sqrt(), floor)
            }
            PricingModel::LogDecay => {
                let floor = Self::curve_floor(rules.floor, MIN_PRICE);
                Self::clamp(base / (n + 1.0).ln(), floor)
            }
            PricingModel::LinearFloor => {
                let floor = Self::curve_floor(rules.floor, DEFAULT_LINEAR_FLOOR);
                let rate = rules.decay_rate.unwrap_or(DEFAULT_LINEAR_DECAY_RATE);
                Self::clamp(base - rate * n, floor)
            }
            PricingModel::Unrecognized(_) => rules.base_price,
        }
    }

    /// Prices for a contiguous range of positions (inclusive)
    pub fn prices(rules: &PricingRules, from: u64, to: u64) -> Vec<u64> {
        (from..=to).map(|n| Self::price(rules, n)).collect()
    }

    fn curve_floor(configured: Option<u64>, default: u64) -> u64 {
        configured.unwrap_or(default).max(MIN_PRICE)
    }

    fn clamp(raw: f64, floor: u64) -> u64 {
        let rounded = raw.round();
        if rounded.is_nan() || rounded <= 0.0 {
            return floor;
        }
        (rounded as u64).max(floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_price_ignores_supply() {
        let rules = PricingRules::fixed(500);
        for n in [0, 1, 2, 10, 1_000, 1_000_000] {
            assert_eq!(PriceCalculator::price(&rules, n), 500);
        }
    }

    #[test]
    fn test_sqrt_decay_scenarios() {
        let rules = PricingRules::sqrt_decay(1000, Some(1));

        assert_eq!(PriceCalculator::price(&rules, 100), 100);
        assert_eq!(PriceCalculator::price(&rules, 10_000), 10);
        // Supply 0 is evaluated at MIN_SUPPLY
        assert_eq!(PriceCalculator::price(&rules, 0), 1000);
        assert_eq!(PriceCalculator::price(&rules, 1), 1000);
    }

    #[test]
    fn test_sqrt_decay_hits_floor() {
        let rules = PricingRules::sqrt_decay(1000, Some(25));

        // 1000 / sqrt(10_000) = 10, floor 25 wins
        assert_eq!(PriceCalculator::price(&rules, 10_000), 25);
    }

    #[test]
    fn test_log_decay() {
        let rules = PricingRules::log_decay(1000, None);

        // 1000 / ln(2) = 1442.69...
        assert_eq!(PriceCalculator::price(&rules, 1), 1443);
        // 1000 / ln(11) = 417.03...
        assert_eq!(PriceCalculator::price(&rules, 10), 417);
    }

    #[test]
    fn test_linear_floor_defaults() {
        let rules = PricingRules::linear_floor(1000, None, None);

        assert_eq!(PriceCalculator::price(&rules, 1), 990);
        assert_eq!(PriceCalculator::price(&rules, 50), 500);
        // Default floor of 50 reached at n = 95
        assert_eq!(PriceCalculator::price(&rules, 95), 50);
        assert_eq!(PriceCalculator::price(&rules, 500), 50);
    }

    #[test]
    fn test_linear_floor_custom_rate() {
        let rules = PricingRules::linear_floor(1000, Some(100), Some(2.5));

        assert_eq!(PriceCalculator::price(&rules, 100), 750);
        assert_eq!(PriceCalculator::price(&rules, 10_000), 100);
    }

    #[test]
    fn test_zero_floor_still_charges() {
        let rules = PricingRules::sqrt_decay(10, Some(0));
        assert_eq!(PriceCalculator::price(&rules, 1_000_000), MIN_PRICE);

        let rules = PricingRules::linear_floor(10, Some(0), Some(10.0));
        assert_eq!(PriceCalculator::price(&rules, 5), MIN_PRICE);
    }

    #[test]
    fn test_unrecognized_model_charges_base_price() {
        let rules = PricingRules {
            model: PricingModel::Unrecognized("dutch_auction".to_string()),
            base_price: 321,
            floor: Some(1),
            decay_rate: Some(3.0),
        };
        assert_eq!(PriceCalculator::price(&rules, 77), 321);
    }

    #[test]
    fn test_model_tag_parsing() {
        assert_eq!("sqrt_decay".parse::<PricingModel>(), Ok(PricingModel::SqrtDecay));
        assert_eq!("linear_floor".parse::<PricingModel>(), Ok(PricingModel::LinearFloor));
        assert_eq!(
            "quadratic".parse::<PricingModel>(),
            Ok(PricingModel::Unrecognized("quadratic".to_string()))
        );
        assert_eq!(PricingModel::LogDecay.to_string(), "log_decay");
    }

    #[test]
    fn test_unrecognized_tag_is_preserved() {
        let model = PricingModel::from("dutch_auction");
        assert!(!model.is_recognized());
        assert_eq!(model.as_str(), "dutch_auction");
        assert_eq!(String::from(model), "dutch_auction");
        assert!(PricingModel::SqrtDecay.is_recognized());
    }

    #[test]
    fn test_prices_range() {
        let rules = PricingRules::sqrt_decay(1000, None);
        let prices = PriceCalculator::prices(&rules, 1, 4);
        assert_eq!(prices, vec![1000, 707, 577, 500]);
    }
}
