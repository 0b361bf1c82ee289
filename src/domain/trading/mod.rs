//! Trading domain — bot run status and start/stop control.

#[cfg(feature = "http")]
pub mod client;
pub mod state;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use state::{TradingBackend, TradingState};

/// Bot run status (`GET /trading/status`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingStatus {
    pub is_running: bool,
    pub started_at: Option<NaiveDateTime>,
    pub stopped_at: Option<NaiveDateTime>,
    pub total_pnl: Decimal,
    pub total_trades: u64,
    pub active_markets: u64,
    pub updated_at: NaiveDateTime,
}

/// A bot control endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Start,
    Stop,
    Restart,
}

impl Control {
    pub fn as_str(&self) -> &'static str {
        match self {
            Control::Start => "start",
            Control::Stop => "stop",
            Control::Restart => "restart",
        }
    }
}

impl std::fmt::Display for Control {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
