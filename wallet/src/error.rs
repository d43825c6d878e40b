//! Ledger and configuration error types

use thiserror::Error;

use crate::decision::BudgetDecision;

/// Agent configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Serving ledger errors.
///
/// The bookkeeping operations themselves never fail; these cover the
/// lookups and hand-offs layered on top of them.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("No token held for {0}")]
    NoTokenHeld(String),

    #[error("Token for {0} does not carry serving rights")]
    NoServingRights(String),

    /// Carries the decision made under the ledger lock
    #[error("Acquisition of {} not approved: {}", .0.address, .0.reasoning)]
    NotApproved(Box<BudgetDecision>),

    #[error("Payment failed: {0}")]
    PaymentFailed(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
