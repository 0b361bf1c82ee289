//! Market domain — tracked markets and their per-market trading parameters.

#[cfg(feature = "http")]
pub mod client;
pub mod state;
pub mod wire;

use crate::cache::Resource;
use crate::shared::{MarketId, TokenId};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use state::{MarketsBackend, MarketsState};
pub use wire::{
    CryptoFetchStarted, CryptoFetchStatus, FetchStage, MarketCreate, MarketUpdate,
    TradingParamsUpdate,
};

// ─── Enums ───────────────────────────────────────────────────────────────────

/// Which outcome(s) the bot may trade in a market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SideToTrade {
    Yes,
    No,
    #[default]
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradingMode {
    #[default]
    MarketMaking,
    PositionBuilding,
    Hybrid,
    SellOnly,
}

impl fmt::Display for TradingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradingMode::MarketMaking => write!(f, "Market making"),
            TradingMode::PositionBuilding => write!(f, "Position building"),
            TradingMode::Hybrid => write!(f, "Hybrid"),
            TradingMode::SellOnly => write!(f, "Sell only"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketCategory {
    Crypto,
    #[default]
    Other,
}

impl MarketCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketCategory::Crypto => "crypto",
            MarketCategory::Other => "other",
        }
    }
}

// ─── Market ──────────────────────────────────────────────────────────────────

/// A binary market the bot tracks, with its latest top of book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    pub id: MarketId,
    pub condition_id: String,
    pub question: String,
    pub answer1: String,
    pub answer2: String,
    pub token1: TokenId,
    pub token2: TokenId,
    pub market_slug: Option<String>,
    pub side_to_trade: SideToTrade,
    pub trading_mode: TradingMode,
    pub target_position: Decimal,
    pub is_active: bool,
    pub category: MarketCategory,
    pub best_bid: Decimal,
    pub best_ask: Decimal,
    pub spread: Decimal,
    /// `"TRUE"` / `"FALSE"` as stored by the backend.
    pub neg_risk: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Market {
    pub fn is_crypto(&self) -> bool {
        self.category == MarketCategory::Crypto
    }

    pub fn is_neg_risk(&self) -> bool {
        self.neg_risk.eq_ignore_ascii_case("true")
    }

    /// Token id for answer 1 (`Yes`) or answer 2 (`No`).
    pub fn token(&self, side: crate::shared::OutcomeSide) -> &TokenId {
        match side {
            crate::shared::OutcomeSide::Yes => &self.token1,
            crate::shared::OutcomeSide::No => &self.token2,
        }
    }
}

impl Resource for Market {
    type Id = MarketId;

    fn id(&self) -> MarketId {
        self.id
    }
}

/// A market together with its trading parameters (`GET /markets/{id}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketWithConfig {
    #[serde(flatten)]
    pub market: Market,
    #[serde(default)]
    pub trading_params: Option<TradingParams>,
}

// ─── TradingParams ───────────────────────────────────────────────────────────

/// Per-market strategy configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingParams {
    pub id: i64,
    pub market_id: MarketId,
    pub trade_size: Decimal,
    pub max_size: Decimal,
    pub min_size: Decimal,
    pub max_spread: Decimal,
    pub tick_size: Decimal,
    pub multiplier: Decimal,
    pub stop_loss_threshold: Decimal,
    pub take_profit_threshold: Decimal,
    pub volatility_threshold: Decimal,
    pub spread_threshold: Decimal,
    /// Seconds between strategy iterations.
    pub sleep_period: Decimal,
    pub order_front_running: bool,
    pub tick_improvement: i64,
    pub quick_cancel_threshold: Decimal,
    /// Hours to hold a position before exiting.
    pub position_patience: Decimal,
    pub param_type: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// ─── MarketQuery ─────────────────────────────────────────────────────────────

/// Limit used to read every market in one page.
pub const ALL_MARKETS_LIMIT: u32 = 10_000;

/// Filters for `GET /markets`. Defaults to the first [`ALL_MARKETS_LIMIT`] markets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    pub category: Option<MarketCategory>,
    pub is_active: Option<bool>,
}

impl Default for MarketQuery {
    fn default() -> Self {
        Self {
            skip: None,
            limit: Some(ALL_MARKETS_LIMIT),
            category: None,
            is_active: None,
        }
    }
}

impl MarketQuery {
    pub fn category(mut self, category: MarketCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub(crate) fn to_params(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("skip", self.skip.map(|s| s.to_string())),
            ("limit", self.limit.map(|l| l.to_string())),
            ("category", self.category.map(|c| c.as_str().to_string())),
            ("is_active", self.is_active.map(|a| a.to_string())),
        ]
    }
}
