//! Positions sub-client — position queries.

use crate::client::DashboardClient;
use crate::domain::position::{Position, PositionQuery};
use crate::error::SdkError;
use crate::http::client::with_query;
use crate::shared::{MarketId, TokenId};

pub struct Positions<'a> {
    pub(crate) client: &'a DashboardClient,
}

impl<'a> Positions<'a> {
    /// All non-empty positions matching `query`.
    pub async fn list(&self, query: &PositionQuery) -> Result<Vec<Position>, SdkError> {
        let url = with_query(self.client.http.url("/positions"), &query.to_params());
        Ok(self.client.http.get(&url).await?)
    }

    pub async fn get(&self, id: i64) -> Result<Position, SdkError> {
        let url = self.client.http.url(&format!("/positions/{}", id));
        Ok(self.client.http.get(&url).await?)
    }

    /// Positions in one market. 404s if the market does not exist.
    pub async fn for_market(&self, market_id: MarketId) -> Result<Vec<Position>, SdkError> {
        let url = self
            .client
            .http
            .url(&format!("/positions/market/{}", market_id));
        Ok(self.client.http.get(&url).await?)
    }

    pub async fn for_token(&self, token_id: &TokenId) -> Result<Position, SdkError> {
        let url = self.client.http.url(&format!(
            "/positions/token/{}",
            urlencoding::encode(token_id.as_str())
        ));
        Ok(self.client.http.get(&url).await?)
    }
}
