//! Agent configuration and content catalog (TOML)

use path402_economics::constants::{DEFAULT_PROJECTED_SUPPLY, DEFAULT_SERVING_PARTICIPATION};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::decision::{ContentOffer, DEFAULT_MAX_PRICE_PER_ITEM};
use crate::error::ConfigError;

/// Spending policy and estimation assumptions for one agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default = "default_initial_balance")]
    pub initial_balance: i64,

    #[serde(default = "default_max_price_per_item")]
    pub max_price_per_item: u64,

    #[serde(default = "default_serving_participation")]
    pub serving_participation: f64,

    #[serde(default = "default_projected_supply")]
    pub projected_supply: u64,
}

fn default_initial_balance() -> i64 {
    100_000
}

fn default_max_price_per_item() -> u64 {
    DEFAULT_MAX_PRICE_PER_ITEM
}

fn default_serving_participation() -> f64 {
    DEFAULT_SERVING_PARTICIPATION
}

fn default_projected_supply() -> u64 {
    DEFAULT_PROJECTED_SUPPLY
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            initial_balance: default_initial_balance(),
            max_price_per_item: default_max_price_per_item(),
            serving_participation: default_serving_participation(),
            projected_supply: default_projected_supply(),
        }
    }
}

impl AgentConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.serving_participation > 0.0 && self.serving_participation <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "serving_participation must be in (0, 1], got {}",
                self.serving_participation
            )));
        }

        if self.initial_balance < 0 {
            return Err(ConfigError::Invalid(format!(
                "initial_balance must not be negative, got {}",
                self.initial_balance
            )));
        }

        Ok(())
    }
}

/// Agent settings plus the content offers it may buy into
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub agent: AgentConfig,

    #[serde(default)]
    pub content: Vec<ContentOffer>,
}

impl Catalog {
    /// Load and validate a catalog file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref())?;
        let catalog = Self::parse(&contents)?;

        log::debug!(
            "Loaded catalog from {} with {} offers",
            path.as_ref().display(),
            catalog.content.len()
        );

        Ok(catalog)
    }

    /// Parse and validate catalog contents
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let catalog: Catalog = toml::from_str(contents)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.agent.validate()?;

        let mut seen = std::collections::HashSet::new();
        for offer in &self.content {
            if offer.address.is_empty() {
                return Err(ConfigError::Invalid("content address is empty".to_string()));
            }
            if !seen.insert(offer.address.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate content address {}",
                    offer.address
                )));
            }

            let unknown = offer.unrecognized_models();
            if !unknown.is_empty() {
                log::warn!(
                    "{} uses unrecognized model(s) {}; falling back to base price and fixed issuer share",
                    offer.address,
                    unknown.join(", ")
                );
            }
        }

        Ok(())
    }

    pub fn find(&self, address: &str) -> Option<&ContentOffer> {
        self.content.iter().find(|o| o.address == address)
    }
}
