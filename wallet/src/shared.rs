//! Ledger shared between concurrent callers
//!
//! Every operation takes the same lock, so record operations are serialized
//! against each other and against budget evaluation. `acquire_with` runs the
//! whole evaluate → pay → record sequence under that lock.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::decision::{BudgetDecision, ContentOffer};
use crate::error::{LedgerError, Result};
use crate::ledger::{PortfolioSummary, ServingLedger, WalletState};
use crate::token::{ServeEvent, Token};

#[derive(Debug, Clone)]
pub struct SharedLedger {
    inner: Arc<Mutex<ServingLedger>>,
}

impl SharedLedger {
    pub fn new(ledger: ServingLedger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    /// Run `f` with exclusive access to the ledger
    pub fn with<R>(&self, f: impl FnOnce(&mut ServingLedger) -> R) -> R {
        let mut ledger = self.inner.lock();
        f(&mut ledger)
    }

    pub fn evaluate_budget(
        &self,
        offer: &ContentOffer,
        max_price_per_item: Option<u64>,
    ) -> BudgetDecision {
        self.inner.lock().evaluate_budget(offer, max_price_per_item)
    }

    /// Evaluate `offer`, and if the recommendation is `acquire`, call `pay`
    /// and record the acquisition, all without releasing the lock.
    ///
    /// `pay` performs the real transfer; the token is recorded only if it
    /// returns `Ok`.
    pub fn acquire_with<F>(
        &self,
        offer: &ContentOffer,
        max_price_per_item: Option<u64>,
        pay: F,
    ) -> Result<Token>
    where
        F: FnOnce(&BudgetDecision) -> std::result::Result<(), String>,
    {
        let mut ledger = self.inner.lock();
        let decision = ledger.evaluate_budget(offer, max_price_per_item);

        if !decision.should_acquire() {
            return Err(LedgerError::NotApproved(Box::new(decision)));
        }

        pay(&decision).map_err(LedgerError::PaymentFailed)?;

        Ok(ledger.record_acquisition(
            &offer.address,
            decision.current_price,
            offer.current_supply,
            &offer.issuer,
        ))
    }

    pub fn record_acquisition(
        &self,
        address: &str,
        price: u64,
        supply: u64,
        issuer: &str,
    ) -> Token {
        self.inner
            .lock()
            .record_acquisition(address, price, supply, issuer)
    }

    pub fn record_serving_revenue(&self, amount: u64) {
        self.inner.lock().record_serving_revenue(amount)
    }

    pub fn record_serve(
        &self,
        address: &str,
        token_id: &str,
        revenue: u64,
        requester: Option<String>,
    ) -> ServeEvent {
        self.inner
            .lock()
            .record_serve(address, token_id, revenue, requester)
    }

    pub fn serve(
        &self,
        address: &str,
        revenue: u64,
        requester: Option<String>,
    ) -> Result<ServeEvent> {
        self.inner.lock().serve(address, revenue, requester)
    }

    pub fn credit(&self, amount: u64) {
        self.inner.lock().credit(amount)
    }

    pub fn reset_wallet(&self, initial_balance: i64) {
        self.inner.lock().reset_wallet(initial_balance)
    }

    pub fn has_token(&self, address: &str) -> bool {
        self.inner.lock().has_token(address)
    }

    pub fn portfolio_summary(&self) -> PortfolioSummary {
        self.inner.lock().portfolio_summary()
    }

    /// Copy of the current wallet state
    pub fn snapshot(&self) -> WalletState {
        self.inner.lock().state().clone()
    }
}

impl From<ServingLedger> for SharedLedger {
    fn from(ledger: ServingLedger) -> Self {
        Self::new(ledger)
    }
}
