//! Position domain — held outcome tokens and their PnL.

#[cfg(feature = "http")]
pub mod client;
pub mod state;

use crate::cache::Resource;
use crate::shared::{MarketId, OutcomeSide, TokenId};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use state::PositionsState;

// ─── Position ────────────────────────────────────────────────────────────────

/// An open position in one outcome token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: i64,
    pub market_id: MarketId,
    pub token_id: TokenId,
    pub size: Decimal,
    pub avg_price: Decimal,
    pub side: Option<OutcomeSide>,
    pub unrealized_pnl: Decimal,
    pub realized_pnl: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Position {
    /// Realized plus unrealized PnL.
    pub fn total_pnl(&self) -> Decimal {
        self.realized_pnl + self.unrealized_pnl
    }
}

impl Resource for Position {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

// ─── PositionQuery ───────────────────────────────────────────────────────────

/// Filters for `GET /positions`. The backend only returns positions with size > 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionQuery {
    pub market_id: Option<MarketId>,
    pub side: Option<OutcomeSide>,
}

impl PositionQuery {
    pub fn market(market_id: MarketId) -> Self {
        Self {
            market_id: Some(market_id),
            ..Self::default()
        }
    }

    pub(crate) fn to_params(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("market_id", self.market_id.map(|id| id.to_string())),
            ("side", self.side.map(|s| s.as_str().to_string())),
        ]
    }
}
