//! Request bodies and background-import payloads for the markets endpoints.

use super::{MarketCategory, SideToTrade, TradingMode};
use crate::shared::TokenId;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ─── Request bodies ──────────────────────────────────────────────────────────

/// Body for `POST /markets`. Unset optional fields take the backend defaults.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MarketCreate {
    pub condition_id: String,
    pub question: String,
    pub answer1: String,
    pub answer2: String,
    pub token1: TokenId,
    pub token2: TokenId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side_to_trade: Option<SideToTrade>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trading_mode: Option<TradingMode>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub target_position: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<MarketCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neg_risk: Option<String>,
}

/// Body for `PUT /markets/{id}`. Only set fields are changed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MarketUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side_to_trade: Option<SideToTrade>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trading_mode: Option<TradingMode>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub target_position: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<MarketCategory>,
}

/// Body for `PUT /markets/{id}/config`. Only set fields are changed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TradingParamsUpdate {
    #[serde(with = "rust_decimal::serde::float_option", skip_serializing_if = "Option::is_none")]
    pub trade_size: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option", skip_serializing_if = "Option::is_none")]
    pub max_size: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option", skip_serializing_if = "Option::is_none")]
    pub min_size: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option", skip_serializing_if = "Option::is_none")]
    pub max_spread: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option", skip_serializing_if = "Option::is_none")]
    pub tick_size: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option", skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option", skip_serializing_if = "Option::is_none")]
    pub stop_loss_threshold: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option", skip_serializing_if = "Option::is_none")]
    pub take_profit_threshold: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option", skip_serializing_if = "Option::is_none")]
    pub volatility_threshold: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option", skip_serializing_if = "Option::is_none")]
    pub spread_threshold: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option", skip_serializing_if = "Option::is_none")]
    pub sleep_period: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_front_running: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_improvement: Option<i64>,
    #[serde(with = "rust_decimal::serde::float_option", skip_serializing_if = "Option::is_none")]
    pub quick_cancel_threshold: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option", skip_serializing_if = "Option::is_none")]
    pub position_patience: Option<Decimal>,
}

// ─── Crypto market import ────────────────────────────────────────────────────

/// Progress stage of the backend's crypto-market import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStage {
    Idle,
    Fetching,
    Processing,
    Completed,
    Error,
}

impl FetchStage {
    /// True while the backend is still importing. A new import is refused
    /// with 409 in these stages.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, FetchStage::Fetching | FetchStage::Processing)
    }
}

/// Acknowledgement from `GET /markets/crypto/fetch`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CryptoFetchStarted {
    pub message: String,
    pub status: FetchStage,
    pub check_status_endpoint: String,
}

/// Import progress from `GET /markets/crypto/fetch/status`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CryptoFetchStatus {
    pub status: FetchStage,
    #[serde(default)]
    pub total_fetched: u64,
    #[serde(default)]
    pub total_processed: u64,
    #[serde(default)]
    pub total_saved: u64,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub started_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub completed_at: Option<NaiveDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_body_omits_unset_fields() {
        let body = MarketUpdate {
            is_active: Some(false),
            target_position: Some(Decimal::new(250, 1)),
            ..MarketUpdate::default()
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value, json!({"is_active": false, "target_position": 25.0}));
    }

    #[test]
    fn test_params_update_serializes_numbers() {
        let body = TradingParamsUpdate {
            trade_size: Some(Decimal::new(125, 1)),
            tick_improvement: Some(2),
            order_front_running: Some(false),
            ..TradingParamsUpdate::default()
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            json!({"trade_size": 12.5, "tick_improvement": 2, "order_front_running": false})
        );
    }

    #[test]
    fn test_create_body_uses_wire_enum_names() {
        let body = MarketCreate {
            condition_id: "0xabc".to_string(),
            question: "Q?".to_string(),
            answer1: "Yes".to_string(),
            answer2: "No".to_string(),
            token1: TokenId::from("1"),
            token2: TokenId::from("2"),
            trading_mode: Some(TradingMode::PositionBuilding),
            category: Some(MarketCategory::Crypto),
            ..MarketCreate::default()
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["trading_mode"], "POSITION_BUILDING");
        assert_eq!(value["category"], "crypto");
        assert_eq!(value["token1"], "1");
        assert!(value.get("market_slug").is_none());
    }

    #[test]
    fn test_fetch_status_parses_iso_timestamps() {
        let status: CryptoFetchStatus = serde_json::from_value(json!({
            "status": "processing",
            "total_fetched": 1200,
            "total_processed": 300,
            "total_saved": 0,
            "error": null,
            "started_at": "2024-05-01T12:00:00.123456",
            "completed_at": null
        }))
        .unwrap();
        assert!(status.status.is_in_progress());
        assert_eq!(status.total_fetched, 1200);
        assert!(status.started_at.is_some());
    }
}
