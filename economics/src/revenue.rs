//! Issuer / serving-network revenue split

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{DEFAULT_ISSUER_DECAY_RATE, DEFAULT_ISSUER_FLOOR};

/// How a sale's proceeds are divided between issuer and node pool
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RevenueModel {
    /// Constant `issuer_share`
    FixedIssuer,
    /// Issuer counts as one more holder: `1 / (n + 1)`
    EqualSplit,
    /// `issuer_share - decay_rate * n`, floored at `issuer_floor`
    DecayingIssuer,
    /// Tag this build does not know, kept verbatim; treated as `FixedIssuer`
    Unrecognized(String),
}

impl RevenueModel {
    pub fn as_str(&self) -> &str {
        match self {
            RevenueModel::FixedIssuer => "fixed_issuer",
            RevenueModel::EqualSplit => "equal_split",
            RevenueModel::DecayingIssuer => "decaying_issuer",
            RevenueModel::Unrecognized(tag) => tag,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, RevenueModel::Unrecognized(_))
    }
}

impl fmt::Display for RevenueModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for RevenueModel {
    fn from(tag: &str) -> Self {
        match tag {
            "fixed_issuer" => RevenueModel::FixedIssuer,
            "equal_split" => RevenueModel::EqualSplit,
            "decaying_issuer" => RevenueModel::DecayingIssuer,
            other => RevenueModel::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for RevenueModel {
    fn from(tag: String) -> Self {
        RevenueModel::from(tag.as_str())
    }
}

impl From<RevenueModel> for String {
    fn from(model: RevenueModel) -> Self {
        match model {
            RevenueModel::Unrecognized(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for RevenueModel {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(RevenueModel::from(s))
    }
}

/// Issuer-defined revenue terms for one content address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueRules {
    pub model: RevenueModel,
    /// Fraction in `[0, 1]` kept by the issuer
    pub issuer_share: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decay_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer_floor: Option<f64>,
}

impl RevenueRules {
    pub fn fixed_issuer(issuer_share: f64) -> Self {
        Self {
            model: RevenueModel::FixedIssuer,
            issuer_share,
            decay_rate: None,
            issuer_floor: None,
        }
    }

    pub fn equal_split() -> Self {
        Self {
            model: RevenueModel::EqualSplit,
            issuer_share: 1.0,
            decay_rate: None,
            issuer_floor: None,
        }
    }

    pub fn decaying_issuer(
        issuer_share: f64,
        decay_rate: Option<f64>,
        issuer_floor: Option<f64>,
    ) -> Self {
        Self {
            model: RevenueModel::DecayingIssuer,
            issuer_share,
            decay_rate,
            issuer_floor,
        }
    }
}

/// Integer split of a single sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueSplit {
    pub issuer: u64,
    pub node_pool: u64,
}

pub struct RevenueCalculator;

impl RevenueCalculator {
    /// Issuer's fraction of the sale made when `supply` units have sold.
    ///
    /// Unrounded; only round after multiplying against a price.
    pub fn issuer_share(rules: &RevenueRules, supply: u64) -> f64 {
        let n = supply as f64;

        match rules.model {
            RevenueModel::FixedIssuer => rules.issuer_share,
            RevenueModel::EqualSplit => 1.0 / (n + 1.0),
            RevenueModel::DecayingIssuer => {
                let floor = rules.issuer_floor.unwrap_or(DEFAULT_ISSUER_FLOOR);
                let rate = rules.decay_rate.unwrap_or(DEFAULT_ISSUER_DECAY_RATE);
                (rules.issuer_share - rate * n).max(floor)
            }
            RevenueModel::Unrecognized(_) => rules.issuer_share,
        }
    }

    /// Node-pool fraction (`1 - issuer_share`)
    pub fn network_share(rules: &RevenueRules, supply: u64) -> f64 {
        1.0 - Self::issuer_share(rules, supply)
    }

    /// Split `price` into issuer and node-pool amounts.
    ///
    /// The two parts always sum to `price`.
    pub fn split(rules: &RevenueRules, price: u64, supply: u64) -> RevenueSplit {
        let share = Self::issuer_share(rules, supply).clamp(0.0, 1.0);
        let issuer = ((price as f64) * share).round() as u64;
        let issuer = issuer.min(price);

        RevenueSplit {
            issuer,
            node_pool: price - issuer,
        }
    }
}
