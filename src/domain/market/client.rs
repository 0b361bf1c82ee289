//! Markets sub-client — market CRUD, per-market config, crypto import.

use crate::client::DashboardClient;
use crate::domain::market::state::MarketsBackend;
use crate::domain::market::wire::{
    CryptoFetchStarted, CryptoFetchStatus, MarketCreate, MarketUpdate, TradingParamsUpdate,
};
use crate::domain::market::{Market, MarketQuery, MarketWithConfig, TradingParams};
use crate::error::SdkError;
use crate::http::client::with_query;
use crate::shared::{MarketId, MessageResponse};

use async_trait::async_trait;

pub struct Markets<'a> {
    pub(crate) client: &'a DashboardClient,
}

impl<'a> Markets<'a> {
    pub async fn list(&self, query: &MarketQuery) -> Result<Vec<Market>, SdkError> {
        let url = with_query(self.client.http.url("/markets"), &query.to_params());
        Ok(self.client.http.get(&url).await?)
    }

    /// One market with its trading parameters.
    pub async fn get(&self, id: MarketId) -> Result<MarketWithConfig, SdkError> {
        let url = self.client.http.url(&format!("/markets/{}", id));
        Ok(self.client.http.get(&url).await?)
    }

    /// Create a market. The backend rejects duplicate `condition_id`s with 400
    /// and attaches default trading parameters.
    pub async fn create(&self, body: &MarketCreate) -> Result<Market, SdkError> {
        let url = self.client.http.url("/markets");
        Ok(self.client.http.post(&url, Some(body)).await?)
    }

    pub async fn update(&self, id: MarketId, body: &MarketUpdate) -> Result<Market, SdkError> {
        let url = self.client.http.url(&format!("/markets/{}", id));
        Ok(self.client.http.put(&url, body).await?)
    }

    pub async fn delete(&self, id: MarketId) -> Result<MessageResponse, SdkError> {
        let url = self.client.http.url(&format!("/markets/{}", id));
        Ok(self.client.http.delete(&url).await?)
    }

    /// Trading parameters for a market. The backend creates defaults on first read.
    pub async fn config(&self, id: MarketId) -> Result<TradingParams, SdkError> {
        let url = self.client.http.url(&format!("/markets/{}/config", id));
        Ok(self.client.http.get(&url).await?)
    }

    pub async fn update_config(
        &self,
        id: MarketId,
        body: &TradingParamsUpdate,
    ) -> Result<TradingParams, SdkError> {
        let url = self.client.http.url(&format!("/markets/{}/config", id));
        Ok(self.client.http.put(&url, body).await?)
    }

    /// Start the background crypto-market import. 409 if one is running.
    pub async fn start_crypto_fetch(&self) -> Result<CryptoFetchStarted, SdkError> {
        let url = self.client.http.url("/markets/crypto/fetch");
        Ok(self.client.http.get(&url).await?)
    }

    pub async fn crypto_fetch_status(&self) -> Result<CryptoFetchStatus, SdkError> {
        let url = self.client.http.url("/markets/crypto/fetch/status");
        Ok(self.client.http.get(&url).await?)
    }
}

#[async_trait]
impl MarketsBackend for DashboardClient {
    async fn list_markets(&self, query: &MarketQuery) -> Result<Vec<Market>, SdkError> {
        self.markets().list(query).await
    }

    async fn get_market(&self, id: MarketId) -> Result<MarketWithConfig, SdkError> {
        self.markets().get(id).await
    }

    async fn create_market(&self, body: &MarketCreate) -> Result<Market, SdkError> {
        self.markets().create(body).await
    }

    async fn update_market(&self, id: MarketId, body: &MarketUpdate) -> Result<Market, SdkError> {
        self.markets().update(id, body).await
    }

    async fn delete_market(&self, id: MarketId) -> Result<MessageResponse, SdkError> {
        self.markets().delete(id).await
    }

    async fn market_config(&self, id: MarketId) -> Result<TradingParams, SdkError> {
        self.markets().config(id).await
    }

    async fn update_market_config(
        &self,
        id: MarketId,
        body: &TradingParamsUpdate,
    ) -> Result<TradingParams, SdkError> {
        self.markets().update_config(id, body).await
    }

    async fn start_crypto_fetch(&self) -> Result<CryptoFetchStarted, SdkError> {
        self.markets().start_crypto_fetch().await
    }

    async fn crypto_fetch_status(&self) -> Result<CryptoFetchStatus, SdkError> {
        self.markets().crypto_fetch_status().await
    }
}
