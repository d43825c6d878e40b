//! Wallet & serving ledger for one agent session
//!
//! Holds the agent's balance, the tokens it bought and the log of content it
//! served. Bookkeeping keeps one invariant at all times:
//!
//! ```text
//! balance == initial_balance - total_spent + total_earned + total_credited
//! ```
//!
//! Acquisitions must only be recorded after the real payment is confirmed
//! elsewhere; nothing in here verifies payment.

use path402_economics::constants::DEFAULT_SERVING_PARTICIPATION;
use path402_economics::EconomicsEstimator;
use serde::{Deserialize, Serialize};

use crate::config::AgentConfig;
use crate::decision::{BudgetDecision, ContentOffer, Recommendation, DEFAULT_MAX_PRICE_PER_ITEM};
use crate::error::{LedgerError, Result};
use crate::token::{ServeEvent, Token};

/// Projected supply multiple used when evaluating a purchase
const ROI_SUPPLY_MULTIPLIER: u64 = 10;

/// Minimum projected supply used when evaluating a purchase
const ROI_MIN_PROJECTED_SUPPLY: u64 = 100;

fn signed(amount: u64) -> i64 {
    i64::try_from(amount).unwrap_or(i64::MAX)
}

/// Balance and holdings of one agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletState {
    pub tokens: Vec<Token>,
    pub balance: i64,
    pub initial_balance: i64,
    pub total_spent: u64,
    pub total_earned: u64,
    /// External top-ups outside acquisitions and serving income
    #[serde(default)]
    pub total_credited: u64,
}

impl WalletState {
    pub fn new(initial_balance: i64) -> Self {
        Self {
            tokens: Vec::new(),
            balance: initial_balance,
            initial_balance,
            total_spent: 0,
            total_earned: 0,
            total_credited: 0,
        }
    }

    /// Balance implied by the running totals
    pub fn expected_balance(&self) -> i64 {
        self.initial_balance - signed(self.total_spent)
            + signed(self.total_earned)
            + signed(self.total_credited)
    }
}

/// Per-address serving totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServeStats {
    pub address: String,
    pub serve_count: usize,
    pub total_revenue: u64,
}

/// Servable token with its realized performance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServableEntry {
    pub address: String,
    pub token_id: String,
    pub position: u64,
    pub price_paid: u64,
    pub acquired_at: chrono::DateTime<chrono::Utc>,
    pub serves: usize,
    pub revenue_earned: u64,
    /// Realized ROI in whole percent, `-100` before the first serve
    pub roi_percent: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub balance: i64,
    pub total_tokens: usize,
    pub total_spent: u64,
    pub total_earned: u64,
    pub net_position: i64,
    pub tokens: Vec<Token>,
}

/// Ledger owned by whichever component represents one agent's session.
///
/// Single-writer. Wrap it in [`crate::SharedLedger`] to share it between
/// concurrent callers.
#[derive(Debug, Clone)]
pub struct ServingLedger {
    state: WalletState,
    serve_log: Vec<ServeEvent>,
    serving_participation: f64,
}

impl ServingLedger {
    pub fn new(initial_balance: i64) -> Self {
        Self {
            state: WalletState::new(initial_balance),
            serve_log: Vec::new(),
            serving_participation: DEFAULT_SERVING_PARTICIPATION,
        }
    }

    pub fn from_config(config: &AgentConfig) -> Self {
        Self::new(config.initial_balance).with_serving_participation(config.serving_participation)
    }

    /// Fraction of holders assumed to be serving when estimating ROI
    pub fn with_serving_participation(mut self, serving_participation: f64) -> Self {
        self.serving_participation = serving_participation;
        self
    }

    pub fn state(&self) -> &WalletState {
        &self.state
    }

    pub fn balance(&self) -> i64 {
        self.state.balance
    }

    pub fn serving_participation(&self) -> f64 {
        self.serving_participation
    }

    /// Conservation check over every recorded event
    pub fn is_balanced(&self) -> bool {
        self.state.balance == self.state.expected_balance()
    }

    /// Decide whether to buy serving rights for `offer`.
    ///
    /// The checks run in a fixed order: already held, then affordability,
    /// then the per-item price ceiling. Only a candidate passing all three
    /// gets an ROI estimate, and it is recommended regardless of the ROI's
    /// sign.
    pub fn evaluate_budget(
        &self,
        offer: &ContentOffer,
        max_price_per_item: Option<u64>,
    ) -> BudgetDecision {
        let max_price = max_price_per_item.unwrap_or(DEFAULT_MAX_PRICE_PER_ITEM);
        let price = offer.current_price();
        let balance = self.state.balance;
        let within_budget = signed(price) <= balance;

        let decision = |recommendation: Recommendation,
                        budget_remaining: i64,
                        expected_roi: Option<f64>,
                        reasoning: String| BudgetDecision {
            address: offer.address.clone(),
            current_price: price,
            within_budget,
            budget_remaining,
            expected_roi,
            recommendation,
            reasoning,
        };

        if self.has_token(&offer.address) {
            return decision(
                Recommendation::Skip,
                balance,
                None,
                format!("Already hold a token for {}", offer.address),
            );
        }

        if !within_budget {
            return decision(
                Recommendation::InsufficientFunds,
                balance,
                None,
                format!("Price {} exceeds balance {}", price, balance),
            );
        }

        if price > max_price {
            return decision(
                Recommendation::Skip,
                balance,
                None,
                format!("Price {} exceeds max price per item {}", price, max_price),
            );
        }

        let projected_supply = offer
            .current_supply
            .saturating_mul(ROI_SUPPLY_MULTIPLIER)
            .max(ROI_MIN_PROJECTED_SUPPLY);
        let roi = EconomicsEstimator::estimate_roi(
            &offer.pricing,
            &offer.revenue,
            offer.current_supply.saturating_add(1),
            projected_supply,
            self.serving_participation,
        );

        log::debug!(
            "Evaluated {} at price {}: roi {:.4} to supply {}",
            offer.address,
            price,
            roi,
            projected_supply
        );

        decision(
            Recommendation::Acquire,
            balance - signed(price),
            Some(roi),
            format!(
                "Price {} is within budget; expected ROI {}% if supply reaches {}",
                price,
                EconomicsEstimator::roi_percent(roi),
                projected_supply
            ),
        )
    }

    /// Record a confirmed purchase and debit its price
    pub fn record_acquisition(
        &mut self,
        address: &str,
        price: u64,
        supply: u64,
        issuer: &str,
    ) -> Token {
        let token = Token::new(address.to_string(), price, supply, issuer.to_string());

        self.state.tokens.push(token.clone());
        self.state.balance -= signed(price);
        self.state.total_spent += price;

        log::info!(
            "Acquired {} at position {} for {} (balance {})",
            address,
            token.position(),
            price,
            self.state.balance
        );
        if self.state.balance < 0 {
            log::warn!("Balance overdrawn to {}", self.state.balance);
        }

        token
    }

    /// Credit serving income without a serve record
    pub fn record_serving_revenue(&mut self, amount: u64) {
        self.state.balance += signed(amount);
        self.state.total_earned += amount;
    }

    /// Credit serving income and append it to the serve log
    pub fn record_serve(
        &mut self,
        address: &str,
        token_id: &str,
        revenue: u64,
        requester: Option<String>,
    ) -> ServeEvent {
        let event = ServeEvent::new(address.to_string(), token_id.to_string(), revenue, requester);

        self.record_serving_revenue(revenue);
        self.serve_log.push(event.clone());

        log::info!(
            "Served {} ({}) for {} (balance {})",
            address,
            event.requester.as_deref().unwrap_or("anonymous"),
            revenue,
            self.state.balance
        );

        event
    }

    /// Serve content under a held token.
    ///
    /// Fails when no token is held for `address` or the token has lost its
    /// serving rights.
    pub fn serve(
        &mut self,
        address: &str,
        revenue: u64,
        requester: Option<String>,
    ) -> Result<ServeEvent> {
        let token = self
            .get_token(address)
            .ok_or_else(|| LedgerError::NoTokenHeld(address.to_string()))?;

        if !token.serving_rights {
            return Err(LedgerError::NoServingRights(address.to_string()));
        }

        let token_id = token.id.clone();
        Ok(self.record_serve(address, &token_id, revenue, requester))
    }

    /// External top-up, e.g. a deposit into the agent's wallet
    pub fn credit(&mut self, amount: u64) {
        self.state.balance += signed(amount);
        self.state.total_credited += amount;
        log::info!("Credited {} (balance {})", amount, self.state.balance);
    }

    pub fn has_token(&self, address: &str) -> bool {
        self.state.tokens.iter().any(|t| t.address == address)
    }

    pub fn get_token(&self, address: &str) -> Option<&Token> {
        self.state.tokens.iter().find(|t| t.address == address)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.state.tokens
    }

    pub fn servable_tokens(&self) -> Vec<&Token> {
        self.state.tokens.iter().filter(|t| t.serving_rights).collect()
    }

    /// Serve log, optionally restricted to one address
    pub fn serve_history(&self, address: Option<&str>) -> Vec<&ServeEvent> {
        self.serve_log
            .iter()
            .filter(|e| address.map_or(true, |a| e.address == a))
            .collect()
    }

    /// Totals per address, in order of first serve
    pub fn serve_stats(&self) -> Vec<ServeStats> {
        let mut stats: Vec<ServeStats> = Vec::new();

        for event in &self.serve_log {
            match stats.iter_mut().find(|s| s.address == event.address) {
                Some(entry) => {
                    entry.serve_count += 1;
                    entry.total_revenue += event.revenue_earned;
                }
                None => stats.push(ServeStats {
                    address: event.address.clone(),
                    serve_count: 1,
                    total_revenue: event.revenue_earned,
                }),
            }
        }

        stats
    }

    pub fn servable_summary(&self) -> Vec<ServableEntry> {
        let stats = self.serve_stats();

        self.servable_tokens()
            .into_iter()
            .map(|token| {
                let token_stats = stats.iter().find(|s| s.address == token.address);
                let (serves, revenue_earned) = token_stats
                    .map(|s| (s.serve_count, s.total_revenue))
                    .unwrap_or((0, 0));

                let roi_percent = match token_stats {
                    None => -100,
                    Some(_) if token.price_paid == 0 => 0,
                    Some(_) => {
                        let paid = token.price_paid as f64;
                        EconomicsEstimator::roi_percent((revenue_earned as f64 - paid) / paid)
                    }
                };

                ServableEntry {
                    address: token.address.clone(),
                    token_id: token.id.clone(),
                    position: token.position(),
                    price_paid: token.price_paid,
                    acquired_at: token.acquired_at,
                    serves,
                    revenue_earned,
                    roi_percent,
                }
            })
            .collect()
    }

    pub fn portfolio_summary(&self) -> PortfolioSummary {
        PortfolioSummary {
            balance: self.state.balance,
            total_tokens: self.state.tokens.len(),
            total_spent: self.state.total_spent,
            total_earned: self.state.total_earned,
            net_position: signed(self.state.total_earned) - signed(self.state.total_spent),
            tokens: self.state.tokens.clone(),
        }
    }

    /// Start over with `initial_balance`, dropping all tokens and history
    pub fn reset_wallet(&mut self, initial_balance: i64) {
        self.state = WalletState::new(initial_balance);
        self.serve_log.clear();
        log::info!("Wallet reset with balance {}", initial_balance);
    }
}

impl Default for ServingLedger {
    fn default() -> Self {
        Self::new(0)
    }
}
