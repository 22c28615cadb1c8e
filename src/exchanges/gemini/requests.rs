use serde::Serialize;

/// Private API endpoint paths, used both as the URL path and as the signed
/// `request` field inside each payload
pub mod endpoints {
    pub const SYMBOLS: &str = "/v1/symbols";
    pub const PUBTICKER: &str = "/v1/pubticker";
    pub const BOOK: &str = "/v1/book";

    pub const NEW_ORDER: &str = "/v1/order/new";
    pub const CANCEL_ORDER: &str = "/v1/order/cancel";
    pub const CANCEL_SESSION: &str = "/v1/order/cancel/session";
    pub const CANCEL_ALL: &str = "/v1/order/cancel/all";
    pub const ORDER_STATUS: &str = "/v1/order/status";
    pub const ACTIVE_ORDERS: &str = "/v1/orders";
    pub const PAST_TRADES: &str = "/v1/mytrades";
    pub const TRADE_VOLUME: &str = "/v1/tradevolume";
    pub const BALANCES: &str = "/v1/balances";
    pub const HEARTBEAT: &str = "/v1/heartbeat";
}

/// Payload for `/v1/order/new`
///
/// `amount` and `price` stay decimal strings end to end; `order_type`, when
/// present, must be a single-element list (exchange API quirk).
#[derive(Debug, Clone, Serialize)]
pub struct NewOrderPayload {
    pub request: &'static str,
    pub nonce: u64,
    pub symbol: String,
    pub amount: String,
    pub price: String,
    pub side: String,
    #[serde(rename = "type")]
    pub order_kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_type: Option<Vec<String>>,
}

/// Only order type the exchange supports for REST placement
pub const ORDER_KIND_EXCHANGE_LIMIT: &str = "exchange limit";

impl NewOrderPayload {
    pub fn new(
        nonce: u64,
        symbol: String,
        amount: String,
        price: String,
        side: String,
        client_order_id: Option<String>,
        order_option: Option<String>,
    ) -> Self {
        Self {
            request: endpoints::NEW_ORDER,
            nonce,
            symbol,
            amount,
            price,
            side,
            order_kind: ORDER_KIND_EXCHANGE_LIMIT,
            client_order_id,
            order_type: order_option.map(|option| vec![option]),
        }
    }
}

/// Payload for `/v1/order/cancel` and `/v1/order/status`
#[derive(Debug, Clone, Serialize)]
pub struct OrderIdPayload {
    pub request: &'static str,
    pub nonce: u64,
    pub order_id: String,
}

/// Payload for endpoints that carry no parameters beyond the signed basics
/// (cancel-all, active orders, balances, trade volume, heartbeat)
#[derive(Debug, Clone, Serialize)]
pub struct BarePayload {
    pub request: &'static str,
    pub nonce: u64,
}

/// Payload for `/v1/mytrades`
#[derive(Debug, Clone, Serialize)]
pub struct PastTradesPayload {
    pub request: &'static str,
    pub nonce: u64,
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_trades: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_new_order_payload_wire_shape() {
        let payload = NewOrderPayload::new(
            123_456_789,
            "btcusd".to_string(),
            "1.0".to_string(),
            "500.00".to_string(),
            "buy".to_string(),
            None,
            None,
        );
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            value,
            json!({
                "request": "/v1/order/new",
                "nonce": 123_456_789_u64,
                "symbol": "btcusd",
                "amount": "1.0",
                "price": "500.00",
                "side": "buy",
                "type": "exchange limit",
            })
        );
    }

    #[test]
    fn test_order_option_wrapped_in_single_element_list() {
        let payload = NewOrderPayload::new(
            1,
            "btcusd".to_string(),
            "1.0".to_string(),
            "500.00".to_string(),
            "buy".to_string(),
            None,
            Some("maker-or-cancel".to_string()),
        );
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["order_type"], json!(["maker-or-cancel"]));
    }

    #[test]
    fn test_optional_fields_omitted_not_null() {
        let payload = NewOrderPayload::new(
            1,
            "btcusd".to_string(),
            "1.0".to_string(),
            "500.00".to_string(),
            "sell".to_string(),
            None,
            None,
        );
        let value = serde_json::to_value(&payload).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("client_order_id"));
        assert!(!object.contains_key("order_type"));
    }

    #[test]
    fn test_client_order_id_passes_through() {
        let payload = NewOrderPayload::new(
            1,
            "ethusd".to_string(),
            "2.5".to_string(),
            "1800.00".to_string(),
            "buy".to_string(),
            Some("my-order-1".to_string()),
            None,
        );
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["client_order_id"], json!("my-order-1"));
    }

    #[test]
    fn test_past_trades_optional_fields() {
        let bare = PastTradesPayload {
            request: endpoints::PAST_TRADES,
            nonce: 7,
            symbol: "btcusd".to_string(),
            limit_trades: None,
            timestamp: None,
        };
        let value = serde_json::to_value(&bare).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("limit_trades"));
        assert!(!object.contains_key("timestamp"));

        let limited = PastTradesPayload {
            limit_trades: Some(50),
            ..bare
        };
        let value: Value = serde_json::to_value(&limited).unwrap();
        assert_eq!(value["limit_trades"], json!(50));
    }

    #[test]
    fn test_bare_payload_contains_request_and_nonce_only() {
        let payload = BarePayload {
            request: endpoints::HEARTBEAT,
            nonce: 42,
        };
        let value = serde_json::to_value(&payload).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(value["request"], json!("/v1/heartbeat"));
        assert_eq!(value["nonce"], json!(42));
    }
}
