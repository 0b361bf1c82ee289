//! Wallet domain — balances and token holdings of the bot's wallet.
//!
//! Read-only pass-through; there is no state container for the wallet.

#[cfg(feature = "http")]
pub mod client;

use crate::shared::TokenId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Balance response shared by `/wallet/{balance,total,positions-value}`.
///
/// Each endpoint fills a different subset of the optional fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletBalance {
    pub usdc_balance: Decimal,
    #[serde(default)]
    pub total_balance: Option<Decimal>,
    #[serde(default)]
    pub positions_value: Option<Decimal>,
    pub wallet_address: String,
}

/// Which credentials the backend has configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletInfo {
    pub wallet_address: String,
    pub wallet_configured: bool,
    pub private_key_configured: bool,
    /// Both address and key are configured.
    pub connected: bool,
}

/// One outcome token held by the wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenBalance {
    pub token_id: TokenId,
    pub size: Decimal,
    pub avg_price: Decimal,
    pub current_price: Decimal,
    /// `size * current_price`.
    pub value: Decimal,
    pub pnl_percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenBalances {
    pub tokens: Vec<TokenBalance>,
    pub total_value: Decimal,
    /// Omitted by the backend when the wallet holds nothing.
    #[serde(default)]
    pub count: Option<u64>,
}

impl TokenBalances {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
