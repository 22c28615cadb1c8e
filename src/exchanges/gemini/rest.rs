use crate::core::errors::ExchangeError;
use crate::core::kernel::{NonceProvider, RestClient};
use crate::exchanges::gemini::requests::{
    endpoints, BarePayload, NewOrderPayload, OrderIdPayload, PastTradesPayload,
};
use crate::exchanges::gemini::types::{
    GeminiBalance, GeminiCancelAllResult, GeminiErrorResponse, GeminiHeartbeat, GeminiOrder,
    GeminiOrderBook, GeminiTicker, GeminiTrade, GeminiTradeVolume,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Thin typed wrapper around `RestClient` for the Gemini API
///
/// Every private call draws one nonce from the shared provider, so all calls
/// through one wrapper (and its clones) stay monotonic for the API key.
pub struct GeminiRest<R: RestClient> {
    rest_client: R,
    nonces: Arc<NonceProvider>,
}

impl<R: RestClient> GeminiRest<R> {
    pub fn new(rest_client: R, nonces: Arc<NonceProvider>) -> Self {
        Self {
            rest_client,
            nonces,
        }
    }

    /// Maps Gemini error bodies to more specific `ExchangeError` variants
    ///
    /// Non-2xx responses surface from the kernel with the raw body text; when
    /// that text is the exchange's documented `{result, reason, message}`
    /// shape, the reason picks the variant.
    fn refine_api_error(error: ExchangeError) -> ExchangeError {
        match error {
            ExchangeError::ApiError { code, message } => {
                match serde_json::from_str::<GeminiErrorResponse>(&message) {
                    Ok(body) => match body.reason.as_str() {
                        "InvalidSignature" | "InvalidNonce" | "MissingApikeyHeader"
                        | "MissingRole" | "InvalidTimestampInPayload" => {
                            ExchangeError::AuthError(format!("{}: {}", body.reason, body.message))
                        }
                        "RateLimit" => ExchangeError::RateLimitExceeded(body.message),
                        "InvalidPrice" | "InvalidQuantity" | "InvalidSide" | "InvalidSymbol"
                        | "InvalidOrderType" | "MissingOrderField" | "ConflictingOptions"
                        | "UnsupportedOption" | "ClientOrderIdTooLong"
                        | "ClientOrderIdMustBeString" => ExchangeError::InvalidParameters(
                            format!("{}: {}", body.reason, body.message),
                        ),
                        _ => ExchangeError::ApiError {
                            code,
                            message: format!("{}: {}", body.reason, body.message),
                        },
                    },
                    Err(_) => ExchangeError::ApiError { code, message },
                }
            }
            other => other,
        }
    }

    async fn get_public<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> Result<T, ExchangeError> {
        self.rest_client
            .get_json(endpoint, query_params, false)
            .await
            .map_err(Self::refine_api_error)
    }

    async fn post_signed<P: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        payload: &P,
    ) -> Result<T, ExchangeError> {
        let body = serde_json::to_value(payload).map_err(|e| {
            ExchangeError::SerializationError(format!("Failed to serialize payload: {}", e))
        })?;

        self.rest_client
            .post_json(endpoint, &body, true)
            .await
            .map_err(Self::refine_api_error)
    }

    /// Get all tradable symbol strings
    pub async fn get_symbols(&self) -> Result<Vec<String>, ExchangeError> {
        self.get_public(endpoints::SYMBOLS, &[]).await
    }

    /// Get the ticker for a symbol
    pub async fn get_ticker(&self, symbol: &str) -> Result<GeminiTicker, ExchangeError> {
        let endpoint = format!("{}/{}", endpoints::PUBTICKER, symbol);
        self.get_public(&endpoint, &[]).await
    }

    /// Get the current order book for a symbol
    ///
    /// Limits are omitted from the query string entirely when `None`.
    pub async fn get_order_book(
        &self,
        symbol: &str,
        limit_bids: Option<u32>,
        limit_asks: Option<u32>,
    ) -> Result<GeminiOrderBook, ExchangeError> {
        let endpoint = format!("{}/{}", endpoints::BOOK, symbol);

        let limit_bids_str = limit_bids.map(|l| l.to_string());
        let limit_asks_str = limit_asks.map(|l| l.to_string());
        let mut params = Vec::new();

        if let Some(ref bids) = limit_bids_str {
            params.push(("limit_bids", bids.as_str()));
        }
        if let Some(ref asks) = limit_asks_str {
            params.push(("limit_asks", asks.as_str()));
        }

        self.get_public(&endpoint, &params).await
    }

    /// Place a new exchange-limit order
    pub async fn new_order(
        &self,
        symbol: String,
        amount: String,
        price: String,
        side: String,
        client_order_id: Option<String>,
        order_option: Option<String>,
    ) -> Result<GeminiOrder, ExchangeError> {
        let payload = NewOrderPayload::new(
            self.nonces.next(),
            symbol,
            amount,
            price,
            side,
            client_order_id,
            order_option,
        );
        self.post_signed(endpoints::NEW_ORDER, &payload).await
    }

    /// Cancel a single order
    pub async fn cancel_order(&self, order_id: String) -> Result<GeminiOrder, ExchangeError> {
        let payload = OrderIdPayload {
            request: endpoints::CANCEL_ORDER,
            nonce: self.nonces.next(),
            order_id,
        };
        self.post_signed(endpoints::CANCEL_ORDER, &payload).await
    }

    /// Cancel all orders opened by this session
    pub async fn cancel_session_orders(&self) -> Result<GeminiCancelAllResult, ExchangeError> {
        let payload = BarePayload {
            request: endpoints::CANCEL_SESSION,
            nonce: self.nonces.next(),
        };
        self.post_signed(endpoints::CANCEL_SESSION, &payload).await
    }

    /// Cancel all active orders for the account
    pub async fn cancel_all_orders(&self) -> Result<GeminiCancelAllResult, ExchangeError> {
        let payload = BarePayload {
            request: endpoints::CANCEL_ALL,
            nonce: self.nonces.next(),
        };
        self.post_signed(endpoints::CANCEL_ALL, &payload).await
    }

    /// Get the status of a single order
    pub async fn order_status(&self, order_id: String) -> Result<GeminiOrder, ExchangeError> {
        let payload = OrderIdPayload {
            request: endpoints::ORDER_STATUS,
            nonce: self.nonces.next(),
            order_id,
        };
        self.post_signed(endpoints::ORDER_STATUS, &payload).await
    }

    /// Get all live orders for the account
    pub async fn active_orders(&self) -> Result<Vec<GeminiOrder>, ExchangeError> {
        let payload = BarePayload {
            request: endpoints::ACTIVE_ORDERS,
            nonce: self.nonces.next(),
        };
        self.post_signed(endpoints::ACTIVE_ORDERS, &payload).await
    }

    /// Get past trades for a symbol
    pub async fn past_trades(
        &self,
        symbol: String,
        limit_trades: Option<u32>,
        timestamp: Option<i64>,
    ) -> Result<Vec<GeminiTrade>, ExchangeError> {
        let payload = PastTradesPayload {
            request: endpoints::PAST_TRADES,
            nonce: self.nonces.next(),
            symbol,
            limit_trades,
            timestamp,
        };
        self.post_signed(endpoints::PAST_TRADES, &payload).await
    }

    /// Get 30-day trading volume
    pub async fn trade_volume(&self) -> Result<GeminiTradeVolume, ExchangeError> {
        let payload = BarePayload {
            request: endpoints::TRADE_VOLUME,
            nonce: self.nonces.next(),
        };
        self.post_signed(endpoints::TRADE_VOLUME, &payload).await
    }

    /// Get available balances for all currencies
    pub async fn balances(&self) -> Result<Vec<GeminiBalance>, ExchangeError> {
        let payload = BarePayload {
            request: endpoints::BALANCES,
            nonce: self.nonces.next(),
        };
        self.post_signed(endpoints::BALANCES, &payload).await
    }

    /// Keep the session alive when the account requires heartbeats
    pub async fn heartbeat(&self) -> Result<GeminiHeartbeat, ExchangeError> {
        let payload = BarePayload {
            request: endpoints::HEARTBEAT,
            nonce: self.nonces.next(),
        };
        self.post_signed(endpoints::HEARTBEAT, &payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    #[derive(Debug, Clone)]
    struct RecordedCall {
        method: &'static str,
        endpoint: String,
        params: Vec<(String, String)>,
        body: Option<Value>,
        authenticated: bool,
    }

    /// RestClient stand-in that records every call and replays a canned body
    struct MockRest {
        calls: Arc<Mutex<Vec<RecordedCall>>>,
        response: Value,
    }

    impl MockRest {
        fn new(response: Value) -> (Self, Arc<Mutex<Vec<RecordedCall>>>) {
            let calls = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    calls: Arc::clone(&calls),
                    response,
                },
                calls,
            )
        }
    }

    #[async_trait]
    impl RestClient for MockRest {
        async fn get(
            &self,
            endpoint: &str,
            query_params: &[(&str, &str)],
            authenticated: bool,
        ) -> Result<Value, ExchangeError> {
            self.calls.lock().unwrap().push(RecordedCall {
                method: "GET",
                endpoint: endpoint.to_string(),
                params: query_params
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                body: None,
                authenticated,
            });
            Ok(self.response.clone())
        }

        async fn get_json<T: DeserializeOwned>(
            &self,
            endpoint: &str,
            query_params: &[(&str, &str)],
            authenticated: bool,
        ) -> Result<T, ExchangeError> {
            let value = self.get(endpoint, query_params, authenticated).await?;
            serde_json::from_value(value)
                .map_err(|e| ExchangeError::DeserializationError(e.to_string()))
        }

        async fn post(
            &self,
            endpoint: &str,
            body: &Value,
            authenticated: bool,
        ) -> Result<Value, ExchangeError> {
            self.calls.lock().unwrap().push(RecordedCall {
                method: "POST",
                endpoint: endpoint.to_string(),
                params: Vec::new(),
                body: Some(body.clone()),
                authenticated,
            });
            Ok(self.response.clone())
        }

        async fn post_json<T: DeserializeOwned>(
            &self,
            endpoint: &str,
            body: &Value,
            authenticated: bool,
        ) -> Result<T, ExchangeError> {
            let value = self.post(endpoint, body, authenticated).await?;
            serde_json::from_value(value)
                .map_err(|e| ExchangeError::DeserializationError(e.to_string()))
        }
    }

    fn canned_order() -> Value {
        json!({
            "order_id": "44375901",
            "symbol": "btcusd",
            "exchange": "gemini",
            "side": "buy",
            "type": "exchange limit",
            "timestamp": "1494870642",
            "timestampms": 1_494_870_642_156_i64,
            "is_live": true,
            "is_cancelled": false,
            "executed_amount": "0",
            "remaining_amount": "1.0",
            "original_amount": "1.0",
            "price": "500.00"
        })
    }

    fn rest_with(response: Value) -> (GeminiRest<MockRest>, Arc<Mutex<Vec<RecordedCall>>>) {
        let (mock, calls) = MockRest::new(response);
        (
            GeminiRest::new(mock, Arc::new(NonceProvider::system())),
            calls,
        )
    }

    #[tokio::test]
    async fn test_order_book_without_limits_sends_no_query_params() {
        let (rest, calls) = rest_with(json!({"bids": [], "asks": []}));
        rest.get_order_book("btcusd", None, None).await.unwrap();

        let call = calls.lock().unwrap()[0].clone();
        assert_eq!(call.method, "GET");
        assert_eq!(call.endpoint, "/v1/book/btcusd");
        assert!(call.params.is_empty());
        assert!(!call.authenticated);
    }

    #[tokio::test]
    async fn test_order_book_with_bid_limit_omits_ask_limit() {
        let (rest, calls) = rest_with(json!({"bids": [], "asks": []}));
        rest.get_order_book("btcusd", Some(5), None).await.unwrap();

        let call = calls.lock().unwrap()[0].clone();
        assert_eq!(
            call.params,
            vec![("limit_bids".to_string(), "5".to_string())]
        );
    }

    #[tokio::test]
    async fn test_new_order_posts_signed_payload() {
        let (rest, calls) = rest_with(canned_order());
        rest.new_order(
            "btcusd".to_string(),
            "1.0".to_string(),
            "500.00".to_string(),
            "buy".to_string(),
            None,
            Some("maker-or-cancel".to_string()),
        )
        .await
        .unwrap();

        let call = calls.lock().unwrap()[0].clone();
        assert_eq!(call.method, "POST");
        assert_eq!(call.endpoint, "/v1/order/new");
        assert!(call.authenticated);

        let body = call.body.unwrap();
        assert_eq!(body["request"], json!("/v1/order/new"));
        assert_eq!(body["type"], json!("exchange limit"));
        assert_eq!(body["order_type"], json!(["maker-or-cancel"]));
        assert!(body["nonce"].is_u64());
        assert!(!body.as_object().unwrap().contains_key("client_order_id"));
    }

    #[tokio::test]
    async fn test_heartbeat_payload_is_bare() {
        let (rest, calls) = rest_with(json!({"result": "ok"}));
        rest.heartbeat().await.unwrap();

        let call = calls.lock().unwrap()[0].clone();
        assert_eq!(call.endpoint, "/v1/heartbeat");
        let body = call.body.unwrap();
        assert_eq!(body.as_object().unwrap().len(), 2);
        assert_eq!(body["request"], json!("/v1/heartbeat"));
    }

    #[tokio::test]
    async fn test_private_calls_draw_non_decreasing_nonces() {
        let (rest, calls) = rest_with(json!([]));
        rest.active_orders().await.unwrap();
        rest.balances().await.unwrap();

        let recorded = calls.lock().unwrap();
        let first = recorded[0].body.as_ref().unwrap()["nonce"].as_u64().unwrap();
        let second = recorded[1].body.as_ref().unwrap()["nonce"].as_u64().unwrap();
        assert!(second >= first);
        assert_eq!(recorded[1].body.as_ref().unwrap()["request"], json!("/v1/balances"));
    }

    #[test]
    fn test_refine_api_error_maps_auth_reasons() {
        let raw = ExchangeError::ApiError {
            code: 400,
            message: r#"{"result":"error","reason":"InvalidSignature","message":"bad sig"}"#
                .to_string(),
        };
        let refined = GeminiRest::<MockRest>::refine_api_error(raw);
        assert!(matches!(refined, ExchangeError::AuthError(_)));
    }

    #[test]
    fn test_refine_api_error_maps_rate_limit() {
        let raw = ExchangeError::ApiError {
            code: 429,
            message: r#"{"result":"error","reason":"RateLimit","message":"slow down"}"#.to_string(),
        };
        let refined = GeminiRest::<MockRest>::refine_api_error(raw);
        assert!(matches!(refined, ExchangeError::RateLimitExceeded(_)));
    }

    #[test]
    fn test_refine_api_error_keeps_unknown_bodies() {
        let raw = ExchangeError::ApiError {
            code: 502,
            message: "<html>bad gateway</html>".to_string(),
        };
        let refined = GeminiRest::<MockRest>::refine_api_error(raw);
        assert!(matches!(refined, ExchangeError::ApiError { code: 502, .. }));
    }
}
