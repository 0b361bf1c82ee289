//! Orders state container — app-owned, cache-gated.

use super::{Order, OrderSource};
use crate::cache::{Clock, Fetch, Refresh, RequestOptions, ResourceCache};
use crate::shared::MarketId;
use std::sync::Arc;
use std::time::Duration;

/// Orders are refetched at most every 5 s unless forced.
pub const ORDERS_TTL: Duration = Duration::from_millis(5000);

/// Mirrors the backend's order list for display.
///
/// One entry serves both `GET /orders` and `GET /orders/active`; whichever
/// completed last is what the views read.
#[derive(Clone)]
pub struct OrdersState {
    cache: ResourceCache<Order, OrderSource>,
}

impl OrdersState {
    pub fn new(fetcher: impl Fetch<Order, OrderSource>) -> Self {
        Self::from_cache(ResourceCache::new("orders", ORDERS_TTL, fetcher))
    }

    pub fn with_clock(
        ttl: Duration,
        fetcher: impl Fetch<Order, OrderSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::from_cache(ResourceCache::with_clock("orders", ttl, fetcher, clock))
    }

    pub fn from_cache(cache: ResourceCache<Order, OrderSource>) -> Self {
        Self { cache }
    }

    #[cfg(feature = "http")]
    pub fn from_client(client: &crate::client::DashboardClient) -> Self {
        let ttl = client.orders_ttl;
        let client = client.clone();
        let fetcher = move |source: OrderSource| {
            let client = client.clone();
            async move { client.orders().fetch(&source).await }
        };
        Self::from_cache(ResourceCache::new("orders", ttl, fetcher))
    }

    pub async fn request(&self, options: RequestOptions<OrderSource>) -> Refresh {
        self.cache.request(options).await
    }

    /// Request the pending-orders listing.
    pub async fn request_active(&self, force: bool) -> Refresh {
        self.cache
            .request(RequestOptions::new(OrderSource::Active).force(force))
            .await
    }

    pub fn invalidate(&self) {
        self.cache.invalidate();
    }

    pub fn cache(&self) -> &ResourceCache<Order, OrderSource> {
        &self.cache
    }

    pub fn orders(&self) -> Vec<Order> {
        self.cache.items()
    }

    pub fn loading(&self) -> bool {
        self.cache.loading()
    }

    pub fn error(&self) -> Option<String> {
        self.cache.error()
    }

    pub fn is_cache_valid(&self) -> bool {
        self.cache.is_valid()
    }

    /// Held orders with status PENDING.
    pub fn active(&self) -> Vec<Order> {
        self.cache.filter(Order::is_active)
    }

    pub fn by_market(&self, market_id: MarketId) -> Vec<Order> {
        self.cache.filter(|o| o.market_id == market_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::domain::order::{OrderQuery, OrderStatus};
    use crate::error::{HttpError, SdkError};
    use crate::shared::{OrderSide, TokenId};
    use chrono::NaiveDateTime;
    use parking_lot::Mutex;
    use rust_decimal::Decimal;

    fn order(id: i64, market: i64, status: OrderStatus) -> Order {
        Order {
            id,
            market_id: MarketId::new(market),
            order_id: None,
            token_id: TokenId::from("987"),
            side_type: OrderSide::Buy,
            side: None,
            price: Decimal::new(52, 2),
            size: Decimal::new(10, 0),
            filled_size: Decimal::ZERO,
            status,
            created_at: NaiveDateTime::parse_from_str("2024-05-01 09:30:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
            filled_at: None,
        }
    }

    /// Records every source the fetcher was called with.
    fn recording(
        result: Result<Vec<Order>, u16>,
    ) -> (OrdersState, Arc<Mutex<Vec<OrderSource>>>, Arc<ManualClock>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let clock = Arc::new(ManualClock::new());
        let log = seen.clone();
        let state = OrdersState::with_clock(
            ORDERS_TTL,
            move |source: OrderSource| {
                log.lock().push(source);
                let result = result.clone();
                async move {
                    result.map_err(|status| {
                        SdkError::Http(HttpError::ServerError {
                            status,
                            body: r#"{"detail": "database unavailable"}"#.to_string(),
                        })
                    })
                }
            },
            clock.clone(),
        );
        (state, seen, clock)
    }

    #[tokio::test]
    async fn test_active_and_by_market_views() {
        let (state, _, _) = recording(Ok(vec![
            order(1, 1, OrderStatus::Pending),
            order(2, 1, OrderStatus::Filled),
            order(3, 2, OrderStatus::Pending),
            order(4, 2, OrderStatus::Cancelled),
        ]));
        state.request(RequestOptions::default()).await;

        let active: Vec<i64> = state.active().iter().map(|o| o.id).collect();
        assert_eq!(active, vec![1, 3]);
        let market_two: Vec<i64> = state
            .by_market(MarketId::new(2))
            .iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(market_two, vec![3, 4]);
    }

    #[tokio::test]
    async fn test_request_active_uses_active_source() {
        let (state, seen, _) = recording(Ok(vec![order(1, 1, OrderStatus::Pending)]));
        state.request_active(false).await;
        assert_eq!(*seen.lock(), vec![OrderSource::Active]);
    }

    #[tokio::test]
    async fn test_request_active_honors_freshness_and_force() {
        let (state, seen, clock) = recording(Ok(vec![order(1, 1, OrderStatus::Pending)]));
        state
            .request(RequestOptions::new(OrderSource::All(OrderQuery {
                limit: Some(50),
                ..OrderQuery::default()
            })))
            .await;

        clock.advance(Duration::from_millis(1000));
        state.request_active(false).await;
        assert_eq!(seen.lock().len(), 1);

        state.request_active(true).await;
        assert_eq!(seen.lock().len(), 2);
        assert_eq!(seen.lock()[1], OrderSource::Active);
    }

    #[tokio::test]
    async fn test_failure_records_detail_and_keeps_views_empty() {
        let (state, _, _) = recording(Err(503));
        let refresh = state.request(RequestOptions::default()).await;

        assert_eq!(refresh, Refresh::Failed);
        assert_eq!(state.error().as_deref(), Some("database unavailable"));
        assert!(state.active().is_empty());
        assert!(!state.is_cache_valid());
        assert!(!state.loading());
    }

    #[test]
    fn test_query_params_skip_unset_fields() {
        let query = OrderQuery {
            market_id: Some(MarketId::new(7)),
            status: Some(OrderStatus::Filled),
            limit: None,
        };
        let params = query.to_params();
        assert_eq!(params[0], ("market_id", Some("7".to_string())));
        assert_eq!(params[1], ("status", Some("FILLED".to_string())));
        assert_eq!(params[2], ("limit", None));
    }

    #[test]
    fn test_remaining_size_never_negative() {
        let mut o = order(1, 1, OrderStatus::Filled);
        o.filled_size = Decimal::new(12, 0);
        assert_eq!(o.remaining_size(), Decimal::ZERO);
    }
}
