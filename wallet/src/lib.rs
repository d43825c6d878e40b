//! $402 Wallet Module
//!
//! Bookkeeping for an agent that buys serving rights and earns from serving:
//! - Ordered budget decisions (held / affordable / price ceiling / ROI)
//! - Acquisition and serving-income records with a conservation invariant
//! - Serve log, per-address stats and portfolio summaries
//! - Mutex-guarded shared ledger for concurrent callers
//! - TOML agent configuration and content catalog

pub mod config;
pub mod decision;
pub mod error;
pub mod ledger;
pub mod shared;
pub mod token;

pub use config::{AgentConfig, Catalog};
pub use decision::{BudgetDecision, ContentOffer, Recommendation, DEFAULT_MAX_PRICE_PER_ITEM};
pub use error::{ConfigError, LedgerError, Result};
pub use ledger::{PortfolioSummary, ServableEntry, ServeStats, ServingLedger, WalletState};
pub use shared::SharedLedger;
pub use token::{ServeEvent, Token};
