//! Stats state container.

use super::{DailyPerformance, PnlBreakdownEntry, Stats, DEFAULT_PERFORMANCE_DAYS};
use crate::cache::Busy;
use crate::error::SdkError;

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;

#[async_trait]
pub trait StatsBackend: Send + Sync + 'static {
    async fn fetch_stats(&self) -> Result<Stats, SdkError>;
    async fn fetch_pnl_breakdown(&self) -> Result<Vec<PnlBreakdownEntry>, SdkError>;
    async fn fetch_daily_performance(&self, days: u32)
        -> Result<Vec<DailyPerformance>, SdkError>;
}

/// Everything the stats panel shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsSnapshot {
    pub stats: Option<Stats>,
    pub pnl_breakdown: Vec<PnlBreakdownEntry>,
    pub daily_performance: Vec<DailyPerformance>,
    pub error: Option<String>,
}

/// Dashboard statistics. Reads always go to the backend; failures are
/// recorded and the previous values stay visible.
#[derive(Clone)]
pub struct StatsState {
    backend: Arc<dyn StatsBackend>,
    snapshot: Arc<RwLock<StatsSnapshot>>,
    busy: Arc<Busy>,
}

impl StatsState {
    pub fn new(backend: Arc<dyn StatsBackend>) -> Self {
        Self {
            backend,
            snapshot: Arc::new(RwLock::new(StatsSnapshot::default())),
            busy: Busy::new(),
        }
    }

    /// Refresh the headline numbers. `loading` is set for the duration.
    pub async fn fetch_stats(&self) -> Option<Stats> {
        let _busy = self.busy.enter();
        self.snapshot.write().error = None;

        let result = self.backend.fetch_stats().await;
        self.record("stats", result, |snapshot, stats| {
            snapshot.stats = Some(stats)
        })
    }

    pub async fn fetch_pnl_breakdown(&self) -> Option<Vec<PnlBreakdownEntry>> {
        let result = self.backend.fetch_pnl_breakdown().await;
        self.record("pnl_breakdown", result, |snapshot, breakdown| {
            snapshot.pnl_breakdown = breakdown
        })
    }

    /// Last `days` days of performance; `None` means the default week.
    pub async fn fetch_daily_performance(
        &self,
        days: Option<u32>,
    ) -> Option<Vec<DailyPerformance>> {
        let days = days.unwrap_or(DEFAULT_PERFORMANCE_DAYS);
        let result = self.backend.fetch_daily_performance(days).await;
        self.record("daily_performance", result, |snapshot, performance| {
            snapshot.daily_performance = performance
        })
    }

    fn record<T: Clone>(
        &self,
        what: &'static str,
        result: Result<T, SdkError>,
        store: impl FnOnce(&mut StatsSnapshot, T),
    ) -> Option<T> {
        match result {
            Ok(value) => {
                store(&mut *self.snapshot.write(), value.clone());
                Some(value)
            }
            Err(err) => {
                let message = err.display_message();
                tracing::warn!(what, error = %message, "Failed to fetch stats");
                self.snapshot.write().error = Some(message);
                None
            }
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        self.snapshot.read().clone()
    }

    pub fn stats(&self) -> Option<Stats> {
        self.snapshot.read().stats.clone()
    }

    pub fn pnl_breakdown(&self) -> Vec<PnlBreakdownEntry> {
        self.snapshot.read().pnl_breakdown.clone()
    }

    pub fn daily_performance(&self) -> Vec<DailyPerformance> {
        self.snapshot.read().daily_performance.clone()
    }

    pub fn loading(&self) -> bool {
        self.busy.is_busy()
    }

    pub fn error(&self) -> Option<String> {
        self.snapshot.read().error.clone()
    }
}
