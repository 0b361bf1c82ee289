//! Positions state container — app-owned, cache-gated.

use super::{Position, PositionQuery};
use crate::cache::{Clock, Fetch, Refresh, RequestOptions, ResourceCache};
use crate::shared::MarketId;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;

/// Positions are refetched at most every 5 s unless forced.
pub const POSITIONS_TTL: Duration = Duration::from_millis(5000);

/// Mirrors the backend's position list for display.
///
/// The app owns instances of this type; clones share the same cache entry.
#[derive(Clone)]
pub struct PositionsState {
    cache: ResourceCache<Position, PositionQuery>,
}

impl PositionsState {
    pub fn new(fetcher: impl Fetch<Position, PositionQuery>) -> Self {
        Self::from_cache(ResourceCache::new("positions", POSITIONS_TTL, fetcher))
    }

    pub fn with_clock(
        ttl: Duration,
        fetcher: impl Fetch<Position, PositionQuery>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::from_cache(ResourceCache::with_clock("positions", ttl, fetcher, clock))
    }

    pub fn from_cache(cache: ResourceCache<Position, PositionQuery>) -> Self {
        Self { cache }
    }

    /// Backed by `GET /positions` on `client`.
    #[cfg(feature = "http")]
    pub fn from_client(client: &crate::client::DashboardClient) -> Self {
        let ttl = client.positions_ttl;
        let client = client.clone();
        let fetcher = move |query: PositionQuery| {
            let client = client.clone();
            async move { client.positions().list(&query).await }
        };
        Self::from_cache(ResourceCache::new("positions", ttl, fetcher))
    }

    pub async fn request(&self, options: RequestOptions<PositionQuery>) -> Refresh {
        self.cache.request(options).await
    }

    pub fn invalidate(&self) {
        self.cache.invalidate();
    }

    pub fn cache(&self) -> &ResourceCache<Position, PositionQuery> {
        &self.cache
    }

    pub fn positions(&self) -> Vec<Position> {
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

    /// Sum of realized and unrealized PnL across all held positions.
    pub fn total_pnl(&self) -> Decimal {
        self.cache
            .items()
            .iter()
            .map(Position::total_pnl)
            .sum()
    }

    pub fn by_market(&self, market_id: MarketId) -> Vec<Position> {
        self.cache.filter(|p| p.market_id == market_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::error::SdkError;
    use crate::shared::TokenId;
    use chrono::NaiveDateTime;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn position(id: i64, market: i64, realized: Decimal, unrealized: Decimal) -> Position {
        let at = NaiveDateTime::parse_from_str("2024-05-01 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        Position {
            id,
            market_id: MarketId::new(market),
            token_id: TokenId::from("1234"),
            size: Decimal::new(100, 0),
            avg_price: Decimal::new(45, 2),
            side: None,
            unrealized_pnl: unrealized,
            realized_pnl: realized,
            created_at: at,
            updated_at: at,
        }
    }

    fn state_with(
        positions: Vec<Position>,
    ) -> (PositionsState, Arc<AtomicUsize>, Arc<ManualClock>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let clock = Arc::new(ManualClock::new());
        let counter = calls.clone();
        let state = PositionsState::with_clock(
            POSITIONS_TTL,
            move |_query: PositionQuery| {
                counter.fetch_add(1, Ordering::SeqCst);
                let positions = positions.clone();
                async move { Ok::<_, SdkError>(positions) }
            },
            clock.clone(),
        );
        (state, calls, clock)
    }

    #[test]
    fn test_views_on_empty_state() {
        let (state, calls, _) = state_with(vec![]);
        assert!(state.positions().is_empty());
        assert!(state.by_market(MarketId::new(1)).is_empty());
        assert_eq!(state.total_pnl(), Decimal::ZERO);
        assert!(!state.is_cache_valid());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_total_pnl_sums_realized_and_unrealized() {
        let (state, _, _) = state_with(vec![
            position(1, 1, Decimal::new(150, 2), Decimal::new(-50, 2)),
            position(2, 2, Decimal::new(200, 2), Decimal::new(25, 2)),
        ]);
        state.request(RequestOptions::default()).await;
        assert_eq!(state.total_pnl(), Decimal::new(325, 2));
    }

    #[tokio::test]
    async fn test_by_market_filters() {
        let (state, _, _) = state_with(vec![
            position(1, 1, Decimal::ZERO, Decimal::ZERO),
            position(2, 2, Decimal::ZERO, Decimal::ZERO),
            position(3, 1, Decimal::ZERO, Decimal::ZERO),
        ]);
        state.request(RequestOptions::default()).await;
        let ids: Vec<i64> = state
            .by_market(MarketId::new(1))
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_requests_within_ttl_hit_cache() {
        let (state, calls, clock) =
            state_with(vec![position(1, 1, Decimal::ZERO, Decimal::ZERO)]);

        state.request(RequestOptions::default()).await;
        state.request(RequestOptions::default()).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        clock.advance(Duration::from_millis(5001));
        state.request(RequestOptions::default()).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        state
            .request(RequestOptions::forced(PositionQuery::market(MarketId::new(1))))
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
