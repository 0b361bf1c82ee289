//! Stats domain — dashboard totals, PnL by market, daily performance.

#[cfg(feature = "http")]
pub mod client;
pub mod state;

use crate::shared::MarketId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use state::{StatsBackend, StatsSnapshot, StatsState};

/// Days of history requested when no window is given.
pub const DEFAULT_PERFORMANCE_DAYS: u32 = 7;

/// Headline numbers for the dashboard (`GET /stats`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total_markets: u64,
    pub active_markets: u64,
    /// Positions with size > 0.
    pub total_positions: u64,
    pub total_pnl: Decimal,
    pub today_pnl: Decimal,
    pub total_orders: u64,
    pub active_orders: u64,
    #[serde(default)]
    pub usdc_balance: Option<Decimal>,
    #[serde(default)]
    pub total_balance: Option<Decimal>,
    /// Absent when wallet credentials are not configured on the backend.
    #[serde(default)]
    pub positions_value: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PnlBreakdownEntry {
    pub market_id: MarketId,
    pub question: String,
    pub realized_pnl: Decimal,
    pub unrealized_pnl: Decimal,
    pub total_pnl: Decimal,
}

/// One day of the performance chart. Oldest day first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPerformance {
    pub date: NaiveDate,
    /// Orders filled that day.
    pub orders: u64,
    pub pnl: Decimal,
}

// ─── Envelopes ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct PnlBreakdownResponse {
    pub breakdown: Vec<PnlBreakdownEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DailyPerformanceResponse {
    pub performance: Vec<DailyPerformance>,
}
