//! # Trading Dashboard SDK
//!
//! A Rust client for the trading bot dashboard API: a typed REST wrapper plus
//! app-owned state containers that mirror server resources for display.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Shared newtypes, domain models, errors (always available)
//! 2. **Cache** — Staleness-gated resource cache with in-flight de-duplication
//! 3. **HTTP API** — `DashboardHttp` with status-code mapping
//! 4. **High-Level Client** — `DashboardClient` with nested sub-clients
//! 5. **State** — `DashboardState`, one container per resource
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use trading_dashboard_sdk::prelude::*;
//!
//! let client = DashboardClient::builder()
//!     .base_url("http://localhost:8000/api")
//!     .build()?;
//!
//! let state = DashboardState::new(&client);
//! state.positions.request(RequestOptions::default()).await;
//! println!("total PnL: {}", state.positions.total_pnl());
//!
//! state.trading.start().await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, sub-clients, state containers.
pub mod domain;

/// Unified SDK error types and message normalization.
pub mod error;

/// Network defaults.
pub mod network;

// ── Layer 2: Cache ───────────────────────────────────────────────────────────

/// Staleness-gated resource cache.
pub mod cache;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// Low-level HTTP client.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `DashboardClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Layer 5: State ───────────────────────────────────────────────────────────

/// `DashboardState` — every container, built from one client.
#[cfg(feature = "http")]
pub mod state;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{MarketId, MessageResponse, OrderSide, OutcomeSide, TokenId};

    // Domain types
    pub use crate::domain::market::{
        CryptoFetchStarted, CryptoFetchStatus, FetchStage, Market, MarketCategory, MarketCreate,
        MarketQuery, MarketUpdate, MarketWithConfig, SideToTrade, TradingMode, TradingParams,
        TradingParamsUpdate,
    };
    pub use crate::domain::order::{Order, OrderQuery, OrderSource, OrderStatus};
    pub use crate::domain::position::{Position, PositionQuery};
    pub use crate::domain::setting::{Setting, SettingCreate, SettingUpdate};
    pub use crate::domain::stats::{DailyPerformance, PnlBreakdownEntry, Stats};
    pub use crate::domain::trading::{Control, TradingStatus};
    pub use crate::domain::wallet::{TokenBalance, TokenBalances, WalletBalance, WalletInfo};

    // State containers
    pub use crate::domain::market::MarketsState;
    pub use crate::domain::order::OrdersState;
    pub use crate::domain::position::PositionsState;
    pub use crate::domain::setting::SettingsState;
    pub use crate::domain::stats::StatsState;
    pub use crate::domain::trading::TradingState;

    // Cache
    pub use crate::cache::{Refresh, RequestOptions, ResourceCache};

    // Errors
    pub use crate::error::{ActionError, SdkError};

    // Network
    pub use crate::network::DEFAULT_API_URL;

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{
        DashboardClient, DashboardClientBuilder, MarketsClient, OrdersClient, PositionsClient,
        SettingsClient, StatsSubClient, TradingClient, WalletClient,
    };
    #[cfg(feature = "http")]
    pub use crate::state::DashboardState;
}
