use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Ticker for a single symbol, from `/v1/pubticker/{symbol}`
///
/// `volume` keys are dynamic (one per asset in the pair, plus a timestamp),
/// so it stays a loose map.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiTicker {
    #[serde(with = "rust_decimal::serde::str")]
    pub bid: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub ask: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub last: Decimal,
    #[serde(default)]
    pub volume: HashMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiBookEntry {
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub timestamp: Option<String>,
}

/// Order book snapshot from `/v1/book/{symbol}`
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiOrderBook {
    pub bids: Vec<GeminiBookEntry>,
    pub asks: Vec<GeminiBookEntry>,
}

/// Order status shape, shared by order placement, cancellation and status
/// queries
///
/// Unrecognized fields are preserved in `extra` rather than dropped, since the
/// exchange adds fields without notice.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiOrder {
    pub order_id: String,
    pub symbol: String,
    pub exchange: String,
    pub side: String,
    #[serde(rename = "type")]
    pub order_type: String,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub price: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub avg_execution_price: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str")]
    pub original_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub executed_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub remaining_amount: Decimal,
    pub timestamp: String,
    pub timestampms: i64,
    pub is_live: bool,
    pub is_cancelled: bool,
    pub is_hidden: Option<bool>,
    pub was_forced: Option<bool>,
    pub client_order_id: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Past trade entry from `/v1/mytrades`
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiTrade {
    pub tid: i64,
    pub order_id: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub side: String,
    pub aggressor: bool,
    pub fee_currency: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub fee_amount: Decimal,
    pub timestamp: i64,
    pub timestampms: i64,
    pub exchange: Option<String>,
    pub is_auction_fill: Option<bool>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Balance entry from `/v1/balances`
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiBalance {
    pub currency: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub available: Decimal,
    #[serde(rename = "availableForWithdrawal", with = "rust_decimal::serde::str")]
    pub available_for_withdrawal: Decimal,
    #[serde(rename = "type")]
    pub account_type: Option<String>,
}

/// Per-symbol 30-day volume entry from `/v1/tradevolume`
///
/// The exchange returns one list per account, each holding one entry per
/// traded symbol. Only the commonly consumed fields are typed.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiTradeVolumeEntry {
    pub symbol: Option<String>,
    pub base_currency: Option<String>,
    pub notional_currency: Option<String>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub total_volume_base: Option<Decimal>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

pub type GeminiTradeVolume = Vec<Vec<GeminiTradeVolumeEntry>>;

/// Result of `/v1/order/cancel/session` and `/v1/order/cancel/all`
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiCancelAllResult {
    pub result: Option<String>,
    pub details: GeminiCancelDetails,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiCancelDetails {
    #[serde(rename = "cancelledOrders", default)]
    pub cancelled_orders: Vec<i64>,
    #[serde(rename = "cancelRejects", default)]
    pub cancel_rejects: Vec<i64>,
}

/// Response from `/v1/heartbeat`
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiHeartbeat {
    pub result: String,
}

/// Error body shape returned with non-2xx statuses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiErrorResponse {
    pub result: String,
    pub reason: String,
    pub message: String,
}
