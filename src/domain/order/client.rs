//! Orders sub-client — order queries.

use crate::client::DashboardClient;
use crate::domain::order::{Order, OrderQuery, OrderSource};
use crate::error::SdkError;
use crate::http::client::with_query;
use crate::shared::MarketId;

pub struct Orders<'a> {
    pub(crate) client: &'a DashboardClient,
}

impl<'a> Orders<'a> {
    pub async fn list(&self, query: &OrderQuery) -> Result<Vec<Order>, SdkError> {
        let url = with_query(self.client.http.url("/orders"), &query.to_params());
        Ok(self.client.http.get(&url).await?)
    }

    /// All pending orders.
    pub async fn active(&self) -> Result<Vec<Order>, SdkError> {
        let url = self.client.http.url("/orders/active");
        Ok(self.client.http.get(&url).await?)
    }

    pub async fn get(&self, id: i64) -> Result<Order, SdkError> {
        let url = self.client.http.url(&format!("/orders/{}", id));
        Ok(self.client.http.get(&url).await?)
    }

    pub async fn for_market(&self, market_id: MarketId) -> Result<Vec<Order>, SdkError> {
        let url = self.client.http.url(&format!("/orders/market/{}", market_id));
        Ok(self.client.http.get(&url).await?)
    }

    /// Dispatch on [`OrderSource`].
    pub async fn fetch(&self, source: &OrderSource) -> Result<Vec<Order>, SdkError> {
        match source {
            OrderSource::All(query) => self.list(query).await,
            OrderSource::Active => self.active().await,
        }
    }
}
