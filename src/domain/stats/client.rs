//! Stats sub-client — aggregate reads.

use crate::client::DashboardClient;
use crate::domain::stats::state::StatsBackend;
use crate::domain::stats::{
    DailyPerformance, DailyPerformanceResponse, PnlBreakdownEntry, PnlBreakdownResponse, Stats,
};
use crate::error::SdkError;
use crate::http::client::with_query;

use async_trait::async_trait;

pub struct StatsClient<'a> {
    pub(crate) client: &'a DashboardClient,
}

impl<'a> StatsClient<'a> {
    pub async fn get(&self) -> Result<Stats, SdkError> {
        let url = self.client.http.url("/stats");
        Ok(self.client.http.get(&url).await?)
    }

    pub async fn pnl_breakdown(&self) -> Result<Vec<PnlBreakdownEntry>, SdkError> {
        let url = self.client.http.url("/stats/pnl/breakdown");
        let resp: PnlBreakdownResponse = self.client.http.get(&url).await?;
        Ok(resp.breakdown)
    }

    /// The last `days` days, oldest first.
    pub async fn daily_performance(&self, days: u32) -> Result<Vec<DailyPerformance>, SdkError> {
        let url = with_query(
            self.client.http.url("/stats/performance/daily"),
            &[("days", Some(days.to_string()))],
        );
        let resp: DailyPerformanceResponse = self.client.http.get(&url).await?;
        Ok(resp.performance)
    }
}

#[async_trait]
impl StatsBackend for DashboardClient {
    async fn fetch_stats(&self) -> Result<Stats, SdkError> {
        self.stats().get().await
    }

    async fn fetch_pnl_breakdown(&self) -> Result<Vec<PnlBreakdownEntry>, SdkError> {
        self.stats().pnl_breakdown().await
    }

    async fn fetch_daily_performance(&self, days: u32) -> Result<Vec<DailyPerformance>, SdkError> {
        self.stats().daily_performance(days).await
    }
}
