//! Markets state container — app-owned, always refetched.

use super::wire::{
    CryptoFetchStarted, CryptoFetchStatus, MarketCreate, MarketUpdate, TradingParamsUpdate,
};
use super::{Market, MarketQuery, MarketWithConfig, TradingParams};
use crate::cache::{CacheEvent, Refresh, RequestOptions, ResourceCache};
use crate::error::{ActionError, SdkError};
use crate::shared::{MarketId, MessageResponse};

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;

/// Backend operations the markets container needs.
///
/// Implemented by [`DashboardClient`](crate::client::DashboardClient).
#[async_trait]
pub trait MarketsBackend: Send + Sync + 'static {
    async fn list_markets(&self, query: &MarketQuery) -> Result<Vec<Market>, SdkError>;
    async fn get_market(&self, id: MarketId) -> Result<MarketWithConfig, SdkError>;
    async fn create_market(&self, body: &MarketCreate) -> Result<Market, SdkError>;
    async fn update_market(&self, id: MarketId, body: &MarketUpdate) -> Result<Market, SdkError>;
    async fn delete_market(&self, id: MarketId) -> Result<MessageResponse, SdkError>;
    async fn market_config(&self, id: MarketId) -> Result<TradingParams, SdkError>;
    async fn update_market_config(
        &self,
        id: MarketId,
        body: &TradingParamsUpdate,
    ) -> Result<TradingParams, SdkError>;
    async fn start_crypto_fetch(&self) -> Result<CryptoFetchStarted, SdkError>;
    async fn crypto_fetch_status(&self) -> Result<CryptoFetchStatus, SdkError>;
}

/// Market list, the selected market, and market mutations.
///
/// The list has no freshness window: every [`fetch`](Self::fetch) goes to
/// the backend. Creates, updates and deletes patch the held list in place.
#[derive(Clone)]
pub struct MarketsState {
    backend: Arc<dyn MarketsBackend>,
    cache: ResourceCache<Market, MarketQuery>,
    selected: Arc<RwLock<Option<MarketWithConfig>>>,
}

impl MarketsState {
    pub fn new(backend: Arc<dyn MarketsBackend>) -> Self {
        let fetcher = {
            let backend = backend.clone();
            move |query: MarketQuery| {
                let backend = backend.clone();
                async move { backend.list_markets(&query).await }
            }
        };
        Self {
            backend,
            cache: ResourceCache::new("markets", Duration::ZERO, fetcher),
            selected: Arc::new(RwLock::new(None)),
        }
    }

    // ── Reads ────────────────────────────────────────────────────────────

    /// Replace the held list with `GET /markets`. Failures are recorded.
    pub async fn fetch(&self, query: MarketQuery) -> Refresh {
        self.cache.request(RequestOptions::new(query)).await
    }

    /// Load one market with its config into [`selected`](Self::selected).
    ///
    /// Shares `loading` and `error` with the list. Returns `None` and records
    /// the error on failure; the previous selection is kept.
    pub async fn fetch_one(&self, id: MarketId) -> Option<MarketWithConfig> {
        let market = self.cache.lookup(self.backend.get_market(id)).await?;
        tracing::debug!(market_id = %id, "Selected market");
        *self.selected.write() = Some(market.clone());
        Some(market)
    }

    // ── Mutations ────────────────────────────────────────────────────────

    pub async fn create(&self, body: MarketCreate) -> Result<Market, ActionError> {
        self.cache
            .mutate(self.backend.create_market(&body), |market| {
                Some(CacheEvent::Upserted(market.clone()))
            })
            .await
    }

    pub async fn update(&self, id: MarketId, body: MarketUpdate) -> Result<Market, ActionError> {
        let market = self
            .cache
            .mutate(self.backend.update_market(id, &body), |market| {
                Some(CacheEvent::Replaced(market.clone()))
            })
            .await?;

        if let Some(selected) = self.selected.write().as_mut() {
            if selected.market.id == id {
                selected.market = market.clone();
            }
        }
        Ok(market)
    }

    pub async fn delete(&self, id: MarketId) -> Result<MessageResponse, ActionError> {
        let response = self
            .cache
            .mutate(self.backend.delete_market(id), |_| {
                Some(CacheEvent::Removed(id))
            })
            .await?;

        let mut selected = self.selected.write();
        if selected.as_ref().is_some_and(|m| m.market.id == id) {
            *selected = None;
        }
        Ok(response)
    }

    pub async fn config(&self, id: MarketId) -> Result<TradingParams, ActionError> {
        self.cache
            .mutate(self.backend.market_config(id), |_| None)
            .await
    }

    /// Update a market's trading parameters; the selected market picks up
    /// the new values when it is the one changed.
    pub async fn update_config(
        &self,
        id: MarketId,
        body: TradingParamsUpdate,
    ) -> Result<TradingParams, ActionError> {
        let params = self
            .cache
            .mutate(self.backend.update_market_config(id, &body), |_| None)
            .await?;

        if let Some(selected) = self.selected.write().as_mut() {
            if selected.market.id == id {
                selected.trading_params = Some(params.clone());
            }
        }
        Ok(params)
    }

    /// Kick off the backend's crypto-market import. The held list is not
    /// touched; poll [`fetch_status`](Self::fetch_status) and then
    /// [`fetch`](Self::fetch) once the import completes.
    pub async fn fetch_crypto_markets(&self) -> Result<CryptoFetchStarted, ActionError> {
        self.cache
            .mutate(self.backend.start_crypto_fetch(), |_| None)
            .await
    }

    pub async fn fetch_status(&self) -> Result<CryptoFetchStatus, ActionError> {
        self.cache
            .mutate(self.backend.crypto_fetch_status(), |_| None)
            .await
    }

    // ── Views ────────────────────────────────────────────────────────────

    pub fn cache(&self) -> &ResourceCache<Market, MarketQuery> {
        &self.cache
    }

    pub fn markets(&self) -> Vec<Market> {
        self.cache.items()
    }

    pub fn active(&self) -> Vec<Market> {
        self.cache.filter(|m| m.is_active)
    }

    pub fn crypto(&self) -> Vec<Market> {
        self.cache.filter(Market::is_crypto)
    }

    pub fn by_id(&self, id: MarketId) -> Option<Market> {
        self.cache.find(|m| m.id == id)
    }

    pub fn selected(&self) -> Option<MarketWithConfig> {
        self.selected.read().clone()
    }

    pub fn loading(&self) -> bool {
        self.cache.loading()
    }

    pub fn error(&self) -> Option<String> {
        self.cache.error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::{FetchStage, MarketCategory, SideToTrade, TradingMode};
    use crate::error::HttpError;
    use crate::shared::TokenId;
    use chrono::NaiveDateTime;
    use futures_util::poll;
    use parking_lot::Mutex;
    use rust_decimal::Decimal;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Semaphore;

    fn ts() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2024-05-01 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn market(id: i64, category: MarketCategory, is_active: bool) -> Market {
        Market {
            id: MarketId::new(id),
            condition_id: format!("0x{:02x}", id),
            question: format!("Market {}?", id),
            answer1: "Yes".to_string(),
            answer2: "No".to_string(),
            token1: TokenId::from("1"),
            token2: TokenId::from("2"),
            market_slug: None,
            side_to_trade: SideToTrade::Both,
            trading_mode: TradingMode::MarketMaking,
            target_position: Decimal::ZERO,
            is_active,
            category,
            best_bid: Decimal::ZERO,
            best_ask: Decimal::ZERO,
            spread: Decimal::ZERO,
            neg_risk: "FALSE".to_string(),
            created_at: ts(),
            updated_at: ts(),
        }
    }

    fn params(market_id: i64, trade_size: Decimal) -> TradingParams {
        TradingParams {
            id: 1,
            market_id: MarketId::new(market_id),
            trade_size,
            max_size: Decimal::new(100, 0),
            min_size: Decimal::new(5, 0),
            max_spread: Decimal::new(5, 0),
            tick_size: Decimal::new(1, 2),
            multiplier: Decimal::ONE,
            stop_loss_threshold: Decimal::new(-5, 0),
            take_profit_threshold: Decimal::new(2, 0),
            volatility_threshold: Decimal::new(50, 0),
            spread_threshold: Decimal::new(5, 2),
            sleep_period: Decimal::ONE,
            order_front_running: true,
            tick_improvement: 1,
            quick_cancel_threshold: Decimal::new(1, 2),
            position_patience: Decimal::new(24, 0),
            param_type: "default".to_string(),
            created_at: ts(),
            updated_at: ts(),
        }
    }

    fn rejected(detail: &str) -> SdkError {
        SdkError::Http(HttpError::BadRequest(format!(r#"{{"detail": "{}"}}"#, detail)))
    }

    #[derive(Default)]
    struct FakeMarkets {
        markets: Mutex<Vec<Market>>,
        list_calls: AtomicUsize,
        fail_with: Mutex<Option<&'static str>>,
        /// When set, `get_market` waits for a permit.
        gate: Option<Arc<Semaphore>>,
    }

    impl FakeMarkets {
        fn with(markets: Vec<Market>) -> Arc<Self> {
            Arc::new(Self {
                markets: Mutex::new(markets),
                ..Self::default()
            })
        }

        fn fail(&self) -> Result<(), SdkError> {
            match *self.fail_with.lock() {
                Some(detail) => Err(rejected(detail)),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl MarketsBackend for FakeMarkets {
        async fn list_markets(&self, _query: &MarketQuery) -> Result<Vec<Market>, SdkError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            self.fail()?;
            Ok(self.markets.lock().clone())
        }

        async fn get_market(&self, id: MarketId) -> Result<MarketWithConfig, SdkError> {
            if let Some(gate) = &self.gate {
                gate.acquire().await.unwrap().forget();
            }
            self.fail()?;
            let market = self
                .markets
                .lock()
                .iter()
                .find(|m| m.id == id)
                .cloned()
                .ok_or_else(|| {
                    SdkError::Http(HttpError::NotFound(
                        r#"{"detail": "Market not found"}"#.to_string(),
                    ))
                })?;
            Ok(MarketWithConfig {
                trading_params: Some(params(id.get(), Decimal::new(10, 0))),
                market,
            })
        }

        async fn create_market(&self, body: &MarketCreate) -> Result<Market, SdkError> {
            self.fail()?;
            let mut created = market(99, body.category.unwrap_or_default(), true);
            created.question = body.question.clone();
            Ok(created)
        }

        async fn update_market(
            &self,
            id: MarketId,
            body: &MarketUpdate,
        ) -> Result<Market, SdkError> {
            self.fail()?;
            let mut updated = market(id.get(), MarketCategory::Other, true);
            if let Some(is_active) = body.is_active {
                updated.is_active = is_active;
            }
            Ok(updated)
        }

        async fn delete_market(&self, _id: MarketId) -> Result<MessageResponse, SdkError> {
            self.fail()?;
            Ok(MessageResponse {
                message: "Market deleted successfully".to_string(),
            })
        }

        async fn market_config(&self, id: MarketId) -> Result<TradingParams, SdkError> {
            self.fail()?;
            Ok(params(id.get(), Decimal::new(10, 0)))
        }

        async fn update_market_config(
            &self,
            id: MarketId,
            body: &TradingParamsUpdate,
        ) -> Result<TradingParams, SdkError> {
            self.fail()?;
            Ok(params(id.get(), body.trade_size.unwrap_or(Decimal::new(10, 0))))
        }

        async fn start_crypto_fetch(&self) -> Result<CryptoFetchStarted, SdkError> {
            self.fail()?;
            Ok(CryptoFetchStarted {
                message: "Crypto markets fetch started in background".to_string(),
                status: FetchStage::Fetching,
                check_status_endpoint: "/api/markets/crypto/fetch/status".to_string(),
            })
        }

        async fn crypto_fetch_status(&self) -> Result<CryptoFetchStatus, SdkError> {
            self.fail()?;
            Ok(CryptoFetchStatus {
                status: FetchStage::Completed,
                total_fetched: 10,
                total_processed: 10,
                total_saved: 4,
                error: None,
                started_at: Some(ts()),
                completed_at: Some(ts()),
            })
        }
    }

    fn three_markets() -> Vec<Market> {
        vec![
            market(1, MarketCategory::Crypto, true),
            market(2, MarketCategory::Other, false),
            market(3, MarketCategory::Crypto, false),
        ]
    }

    #[tokio::test]
    async fn test_fetch_always_hits_backend() {
        let backend = FakeMarkets::with(three_markets());
        let state = MarketsState::new(backend.clone());

        state.fetch(MarketQuery::default()).await;
        state.fetch(MarketQuery::default()).await;
        assert_eq!(backend.list_calls.load(Ordering::SeqCst), 2);
        assert_eq!(state.markets().len(), 3);
    }

    #[tokio::test]
    async fn test_views() {
        let state = MarketsState::new(FakeMarkets::with(three_markets()));
        state.fetch(MarketQuery::default()).await;

        let ids = |ms: Vec<Market>| ms.iter().map(|m| m.id.get()).collect::<Vec<_>>();
        assert_eq!(ids(state.active()), vec![1]);
        assert_eq!(ids(state.crypto()), vec![1, 3]);
        assert_eq!(state.by_id(MarketId::new(2)).map(|m| m.id.get()), Some(2));
        assert!(state.by_id(MarketId::new(42)).is_none());
    }

    #[tokio::test]
    async fn test_fetch_one_selects_and_records_not_found() {
        let state = MarketsState::new(FakeMarkets::with(three_markets()));

        let selected = state.fetch_one(MarketId::new(3)).await;
        assert_eq!(selected.map(|m| m.market.id.get()), Some(3));
        assert_eq!(state.selected().map(|m| m.market.id.get()), Some(3));

        assert!(state.fetch_one(MarketId::new(42)).await.is_none());
        assert_eq!(state.error().as_deref(), Some("Market not found"));
        assert_eq!(state.selected().map(|m| m.market.id.get()), Some(3));
    }

    #[tokio::test]
    async fn test_fetch_one_clears_previous_error() {
        let state = MarketsState::new(FakeMarkets::with(three_markets()));

        assert!(state.fetch_one(MarketId::new(42)).await.is_none());
        assert_eq!(state.error().as_deref(), Some("Market not found"));

        assert!(state.fetch_one(MarketId::new(1)).await.is_some());
        assert!(state.error().is_none());
        assert_eq!(state.selected().map(|m| m.market.id.get()), Some(1));
    }

    #[tokio::test]
    async fn test_loading_spans_fetch_one() {
        let gate = Arc::new(Semaphore::new(0));
        let backend = Arc::new(FakeMarkets {
            markets: Mutex::new(three_markets()),
            gate: Some(gate.clone()),
            ..FakeMarkets::default()
        });
        let state = MarketsState::new(backend);

        let mut lookup = Box::pin(state.fetch_one(MarketId::new(2)));
        assert!(poll!(&mut lookup).is_pending());
        assert!(state.loading());

        gate.add_permits(1);
        assert!(lookup.await.is_some());
        assert!(!state.loading());
    }

    #[tokio::test]
    async fn test_update_outside_filtered_list_is_not_added() {
        let backend = FakeMarkets::with(vec![market(1, MarketCategory::Crypto, true)]);
        let state = MarketsState::new(backend);
        state.fetch(MarketQuery::default().category(MarketCategory::Crypto)).await;

        let updated = state
            .update(
                MarketId::new(2),
                MarketUpdate {
                    is_active: Some(false),
                    ..MarketUpdate::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.id, MarketId::new(2));
        assert_eq!(state.markets().len(), 1);
        assert!(state.by_id(MarketId::new(2)).is_none());
    }

    #[tokio::test]
    async fn test_create_appends_and_update_replaces() {
        let state = MarketsState::new(FakeMarkets::with(three_markets()));
        state.fetch(MarketQuery::default()).await;

        let created = state
            .create(MarketCreate {
                question: "New?".to_string(),
                ..MarketCreate::default()
            })
            .await
            .unwrap();
        assert_eq!(created.id, MarketId::new(99));
        assert_eq!(state.markets().len(), 4);

        state
            .update(
                MarketId::new(2),
                MarketUpdate {
                    is_active: Some(true),
                    ..MarketUpdate::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(state.markets().len(), 4);
        assert!(state.by_id(MarketId::new(2)).unwrap().is_active);
    }

    #[tokio::test]
    async fn test_delete_removes_and_clears_selection() {
        let state = MarketsState::new(FakeMarkets::with(three_markets()));
        state.fetch(MarketQuery::default()).await;
        state.fetch_one(MarketId::new(1)).await;

        let response = state.delete(MarketId::new(1)).await.unwrap();
        assert_eq!(response.message, "Market deleted successfully");
        assert!(state.by_id(MarketId::new(1)).is_none());
        assert!(state.selected().is_none());
    }

    #[tokio::test]
    async fn test_failed_mutation_records_and_returns_message() {
        let backend = FakeMarkets::with(three_markets());
        let state = MarketsState::new(backend.clone());
        state.fetch(MarketQuery::default()).await;

        *backend.fail_with.lock() = Some("Market with this condition_id already exists");
        let err = state.create(MarketCreate::default()).await.unwrap_err();

        assert_eq!(err.message, "Market with this condition_id already exists");
        assert_eq!(state.error().as_deref(), Some(err.message.as_str()));
        assert_eq!(state.markets().len(), 3);
    }

    #[tokio::test]
    async fn test_update_config_refreshes_selected_params() {
        let state = MarketsState::new(FakeMarkets::with(three_markets()));
        state.fetch_one(MarketId::new(1)).await;

        let updated = state
            .update_config(
                MarketId::new(1),
                TradingParamsUpdate {
                    trade_size: Some(Decimal::new(25, 0)),
                    ..TradingParamsUpdate::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.trade_size, Decimal::new(25, 0));

        let selected = state.selected().unwrap();
        assert_eq!(
            selected.trading_params.map(|p| p.trade_size),
            Some(Decimal::new(25, 0))
        );
    }

    #[tokio::test]
    async fn test_crypto_import_leaves_list_untouched() {
        let state = MarketsState::new(FakeMarkets::with(three_markets()));
        state.fetch(MarketQuery::default()).await;

        let started = state.fetch_crypto_markets().await.unwrap();
        assert!(started.status.is_in_progress());
        assert_eq!(state.markets().len(), 3);

        let status = state.fetch_status().await.unwrap();
        assert_eq!(status.status, FetchStage::Completed);
        assert_eq!(status.total_saved, 4);
    }

    #[tokio::test]
    async fn test_crypto_import_conflict_is_rethrown() {
        let backend = FakeMarkets::with(vec![]);
        let state = MarketsState::new(backend.clone());
        *backend.fail_with.lock() = Some("Market fetch already in progress");

        let err = state.fetch_crypto_markets().await.unwrap_err();
        assert_eq!(err.message, "Market fetch already in progress");
        assert_eq!(state.error().as_deref(), Some("Market fetch already in progress"));
    }
}
