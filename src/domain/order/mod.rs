//! Order domain — orders placed by the trading bot.

#[cfg(feature = "http")]
pub mod client;
pub mod state;

use crate::cache::Resource;
use crate::shared::{MarketId, OrderSide, OutcomeSide, TokenId};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use state::OrdersState;

// ─── OrderStatus ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    /// Resting on the book. This is what "active" means.
    Pending,
    Filled,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Filled => "FILLED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── Order ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub market_id: MarketId,
    /// Exchange-side order id, absent until the order is acknowledged.
    pub order_id: Option<String>,
    pub token_id: TokenId,
    pub side_type: OrderSide,
    pub side: Option<OutcomeSide>,
    pub price: Decimal,
    pub size: Decimal,
    pub filled_size: Decimal,
    pub status: OrderStatus,
    pub created_at: NaiveDateTime,
    pub filled_at: Option<NaiveDateTime>,
}

impl Order {
    pub fn is_active(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    pub fn remaining_size(&self) -> Decimal {
        (self.size - self.filled_size).max(Decimal::ZERO)
    }
}

impl Resource for Order {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

// ─── OrderQuery / OrderSource ────────────────────────────────────────────────

/// Filters for `GET /orders`. The backend caps results at 100 when `limit`
/// is unset and returns newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderQuery {
    pub market_id: Option<MarketId>,
    pub status: Option<OrderStatus>,
    pub limit: Option<u32>,
}

impl OrderQuery {
    pub(crate) fn to_params(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("market_id", self.market_id.map(|id| id.to_string())),
            ("status", self.status.map(|s| s.as_str().to_string())),
            ("limit", self.limit.map(|l| l.to_string())),
        ]
    }
}

/// Which order listing an [`OrdersState`] request reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderSource {
    /// `GET /orders` with filters.
    All(OrderQuery),
    /// `GET /orders/active`, every pending order without a limit.
    Active,
}

impl Default for OrderSource {
    fn default() -> Self {
        OrderSource::All(OrderQuery::default())
    }
}

impl From<OrderQuery> for OrderSource {
    fn from(query: OrderQuery) -> Self {
        OrderSource::All(query)
    }
}
