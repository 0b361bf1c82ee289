//! Trading sub-client — status and bot control.

use crate::client::DashboardClient;
use crate::domain::trading::state::TradingBackend;
use crate::domain::trading::{Control, TradingStatus};
use crate::error::SdkError;
use crate::shared::MessageResponse;

use async_trait::async_trait;

pub struct Trading<'a> {
    pub(crate) client: &'a DashboardClient,
}

impl<'a> Trading<'a> {
    pub async fn status(&self) -> Result<TradingStatus, SdkError> {
        let url = self.client.http.url("/trading/status");
        Ok(self.client.http.get(&url).await?)
    }

    /// `POST /trading/{start,stop,restart}`. Starting a running bot or
    /// stopping a stopped one is rejected with 400.
    pub async fn control(&self, action: Control) -> Result<MessageResponse, SdkError> {
        let url = self.client.http.url(&format!("/trading/{}", action));
        Ok(self.client.http.post(&url, None::<&()>).await?)
    }

    pub async fn start(&self) -> Result<MessageResponse, SdkError> {
        self.control(Control::Start).await
    }

    pub async fn stop(&self) -> Result<MessageResponse, SdkError> {
        self.control(Control::Stop).await
    }

    pub async fn restart(&self) -> Result<MessageResponse, SdkError> {
        self.control(Control::Restart).await
    }
}

#[async_trait]
impl TradingBackend for DashboardClient {
    async fn trading_status(&self) -> Result<TradingStatus, SdkError> {
        self.trading().status().await
    }

    async fn control_trading(&self, action: Control) -> Result<MessageResponse, SdkError> {
        self.trading().control(action).await
    }
}
