//! High-level client — `DashboardClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder and the accessor methods.

use crate::domain::market::client::Markets;
use crate::domain::order::client::Orders;
use crate::domain::order::state::ORDERS_TTL;
use crate::domain::position::client::Positions;
use crate::domain::position::state::POSITIONS_TTL;
use crate::domain::setting::client::Settings;
use crate::domain::stats::client::StatsClient;
use crate::domain::trading::client::Trading;
use crate::domain::wallet::client::Wallet;
use crate::error::SdkError;
use crate::http::DashboardHttp;
use crate::network::{API_URL_ENV, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};

use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::market::client::Markets as MarketsClient;
pub use crate::domain::order::client::Orders as OrdersClient;
pub use crate::domain::position::client::Positions as PositionsClient;
pub use crate::domain::setting::client::Settings as SettingsClient;
pub use crate::domain::stats::client::StatsClient as StatsSubClient;
pub use crate::domain::trading::client::Trading as TradingClient;
pub use crate::domain::wallet::client::Wallet as WalletClient;

/// The primary entry point for the dashboard API.
///
/// Provides nested sub-client accessors for each domain:
/// `client.markets()`, `client.orders()`, etc. Cloning is cheap; clones
/// share the connection pool.
#[derive(Clone)]
pub struct DashboardClient {
    pub(crate) http: DashboardHttp,
    /// Freshness window for `PositionsState` built from this client.
    pub(crate) positions_ttl: Duration,
    /// Freshness window for `OrdersState` built from this client.
    pub(crate) orders_ttl: Duration,
}

impl DashboardClient {
    pub fn builder() -> DashboardClientBuilder {
        DashboardClientBuilder::default()
    }

    /// Client for [`DEFAULT_API_URL`] (or `DASHBOARD_API_URL` when set).
    pub fn from_env() -> Result<Self, SdkError> {
        DashboardClientBuilder::from_env().build()
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    pub fn positions_ttl(&self) -> Duration {
        self.positions_ttl
    }

    pub fn orders_ttl(&self) -> Duration {
        self.orders_ttl
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn markets(&self) -> Markets<'_> {
        Markets { client: self }
    }

    pub fn orders(&self) -> Orders<'_> {
        Orders { client: self }
    }

    pub fn positions(&self) -> Positions<'_> {
        Positions { client: self }
    }

    pub fn settings(&self) -> Settings<'_> {
        Settings { client: self }
    }

    pub fn stats(&self) -> StatsClient<'_> {
        StatsClient { client: self }
    }

    pub fn trading(&self) -> Trading<'_> {
        Trading { client: self }
    }

    pub fn wallet(&self) -> Wallet<'_> {
        Wallet { client: self }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct DashboardClientBuilder {
    base_url: String,
    timeout: Duration,
    positions_ttl: Duration,
    orders_ttl: Duration,
}

impl Default for DashboardClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            positions_ttl: POSITIONS_TTL,
            orders_ttl: ORDERS_TTL,
        }
    }
}

impl DashboardClientBuilder {
    /// Defaults, with the base URL taken from `DASHBOARD_API_URL` if set.
    pub fn from_env() -> Self {
        let builder = Self::default();
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => builder.base_url(url.trim()),
            _ => builder,
        }
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn positions_ttl(mut self, ttl: Duration) -> Self {
        self.positions_ttl = ttl;
        self
    }

    pub fn orders_ttl(mut self, ttl: Duration) -> Self {
        self.orders_ttl = ttl;
        self
    }

    pub fn build(self) -> Result<DashboardClient, SdkError> {
        if self.base_url.trim().is_empty() {
            return Err(SdkError::Validation("base URL must not be empty".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(SdkError::Validation("timeout must be non-zero".to_string()));
        }

        tracing::debug!(base_url = %self.base_url, timeout = ?self.timeout, "Building dashboard client");
        Ok(DashboardClient {
            http: DashboardHttp::new(&self.base_url, self.timeout)?,
            positions_ttl: self.positions_ttl,
            orders_ttl: self.orders_ttl,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let client = DashboardClient::builder().build().unwrap();
        assert_eq!(client.base_url(), DEFAULT_API_URL);
        assert_eq!(client.positions_ttl(), Duration::from_millis(5000));
        assert_eq!(client.orders_ttl(), Duration::from_millis(5000));
    }

    #[test]
    fn test_builder_overrides() {
        let client = DashboardClient::builder()
            .base_url("http://10.0.0.5:8000/api/")
            .positions_ttl(Duration::from_secs(1))
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://10.0.0.5:8000/api");
        assert_eq!(client.positions_ttl(), Duration::from_secs(1));
        assert_eq!(client.orders_ttl(), ORDERS_TTL);
    }

    #[test]
    fn test_builder_rejects_empty_url_and_zero_timeout() {
        let err = DashboardClient::builder().base_url("  ").build();
        assert!(matches!(err, Err(SdkError::Validation(_))));

        let err = DashboardClient::builder().timeout(Duration::ZERO).build();
        assert!(matches!(err, Err(SdkError::Validation(_))));
    }
}
