//! Acquired serving rights and the serve log

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One unit of serving rights bought for a content address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub id: String,
    pub address: String,
    pub acquired_at: DateTime<Utc>,
    pub price_paid: u64,
    /// Units already sold when this one was bought
    pub supply: u64,
    pub serving_rights: bool,
    pub issuer: String,
}

impl Token {
    pub fn new(address: String, price_paid: u64, supply: u64, issuer: String) -> Self {
        Self {
            id: format!("tok_{}", Uuid::new_v4().simple()),
            address,
            acquired_at: Utc::now(),
            price_paid,
            supply,
            serving_rights: true,
            issuer,
        }
    }

    /// 1-based buyer position of this token
    pub fn position(&self) -> u64 {
        self.supply.saturating_add(1)
    }
}

/// Record of serving content to one requester
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServeEvent {
    pub id: String,
    pub address: String,
    pub token_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester: Option<String>,
    pub revenue_earned: u64,
    pub served_at: DateTime<Utc>,
}

impl ServeEvent {
    pub fn new(
        address: String,
        token_id: String,
        revenue_earned: u64,
        requester: Option<String>,
    ) -> Self {
        Self {
            id: format!("srv_{}", Uuid::new_v4().simple()),
            address,
            token_id,
            requester,
            revenue_earned,
            served_at: Utc::now(),
        }
    }
}
