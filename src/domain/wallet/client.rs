//! Wallet sub-client.

use crate::client::DashboardClient;
use crate::domain::wallet::{TokenBalances, WalletBalance, WalletInfo};
use crate::error::SdkError;

pub struct Wallet<'a> {
    pub(crate) client: &'a DashboardClient,
}

impl<'a> Wallet<'a> {
    /// USDC balance only.
    pub async fn balance(&self) -> Result<WalletBalance, SdkError> {
        let url = self.client.http.url("/wallet/balance");
        Ok(self.client.http.get(&url).await?)
    }

    /// USDC, positions value, and their sum.
    pub async fn total(&self) -> Result<WalletBalance, SdkError> {
        let url = self.client.http.url("/wallet/total");
        Ok(self.client.http.get(&url).await?)
    }

    pub async fn positions_value(&self) -> Result<WalletBalance, SdkError> {
        let url = self.client.http.url("/wallet/positions-value");
        Ok(self.client.http.get(&url).await?)
    }

    /// Never fails on an unconfigured wallet; check [`WalletInfo::connected`].
    pub async fn info(&self) -> Result<WalletInfo, SdkError> {
        let url = self.client.http.url("/wallet/info");
        Ok(self.client.http.get(&url).await?)
    }

    /// Outcome tokens with a non-zero balance. USDC is excluded.
    pub async fn token_balances(&self) -> Result<TokenBalances, SdkError> {
        let url = self.client.http.url("/wallet/token-balances");
        Ok(self.client.http.get(&url).await?)
    }
}
