use crate::core::errors::ExchangeError;
use crate::core::kernel::signer::{NoopSigner, Signer};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{instrument, trace};

/// Unified HTTP interface for talking to the exchange.
///
/// The v1 REST surface only ever needs two verbs: unsigned GETs for market
/// data and signed POSTs for private calls. `authenticated` routes a call
/// through the configured `Signer`, which decides both the auth headers and
/// the exact body bytes that go on the wire.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Issue a GET request, returning the decoded JSON body
    async fn get(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
        authenticated: bool,
    ) -> Result<Value, ExchangeError>;

    /// Issue a GET request, deserializing the response into `T`
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
        authenticated: bool,
    ) -> Result<T, ExchangeError>;

    /// Issue a POST request carrying `body`, returning the decoded JSON body
    async fn post(
        &self,
        endpoint: &str,
        body: &Value,
        authenticated: bool,
    ) -> Result<Value, ExchangeError>;

    /// Issue a POST request carrying `body`, deserializing the response into `T`
    async fn post_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &Value,
        authenticated: bool,
    ) -> Result<T, ExchangeError>;
}

/// Settings for the HTTP layer
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    pub base_url: String,
    /// Name stamped onto tracing spans
    pub exchange_name: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl RestClientConfig {
    pub fn new(base_url: impl Into<String>, exchange_name: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            exchange_name: exchange_name.into(),
            timeout_seconds: 30,
            user_agent: concat!("geminix/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Override the user agent string
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// Builder wiring a `RestClientConfig` and an optional signer into a client
pub struct RestClientBuilder {
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
}

impl RestClientBuilder {
    pub fn new(config: RestClientConfig) -> Self {
        Self {
            config,
            signer: None,
        }
    }

    /// Attach a signer for authenticated endpoints
    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn build(self) -> Result<ReqwestRest, ExchangeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .user_agent(&self.config.user_agent)
            .build()
            .map_err(|e| ExchangeError::Other(format!("could not build HTTP client: {}", e)))?;

        Ok(ReqwestRest {
            client,
            config: self.config,
            signer: self.signer,
        })
    }
}

/// reqwest-backed implementation of `RestClient`
#[derive(Clone)]
pub struct ReqwestRest {
    client: Client,
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
}

impl std::fmt::Debug for ReqwestRest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestRest")
            .field("config", &self.config)
            .field("has_signer", &self.signer.is_some())
            .finish_non_exhaustive()
    }
}

impl ReqwestRest {
    /// Shorthand for a client with default settings and an optional signer
    pub fn new(
        base_url: String,
        exchange_name: String,
        signer: Option<Arc<dyn Signer>>,
    ) -> Result<Self, ExchangeError> {
        RestClientBuilder::new(RestClientConfig::new(base_url, exchange_name))
            .with_signer(signer.unwrap_or_else(|| Arc::new(NoopSigner)))
            .build()
    }

    fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url, endpoint)
    }

    /// Attach the signer's headers, and its body when the scheme sends one
    fn sign(
        &self,
        mut request: RequestBuilder,
        method: &Method,
        endpoint: &str,
        payload: &[u8],
    ) -> Result<RequestBuilder, ExchangeError> {
        let signer = self.signer.as_ref().ok_or_else(|| {
            ExchangeError::AuthError("endpoint requires signing but no signer is configured".into())
        })?;

        let signed = signer.sign_request(method.as_str(), endpoint, payload)?;
        for (name, value) in signed.headers {
            request = request.header(&name, &value);
        }

        // Whatever bytes the signer signed are the bytes that go out, or none
        Ok(match signed.body {
            Some(bytes) => request.body(bytes),
            None => request,
        })
    }

    /// Send the request and decode its JSON body, surfacing non-2xx statuses
    /// as `ApiError` rather than decoding the error body as success
    #[instrument(skip(self, request), fields(exchange = %self.config.exchange_name))]
    async fn dispatch(&self, request: RequestBuilder) -> Result<Value, ExchangeError> {
        let response = request
            .send()
            .await
            .map_err(|e| ExchangeError::NetworkError(format!("request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ExchangeError::NetworkError(format!("could not read response: {}", e)))?;

        trace!(%status, body = %text, "received response");

        if status.is_success() {
            serde_json::from_str(&text).map_err(|e| {
                ExchangeError::DeserializationError(format!("response is not valid JSON: {}", e))
            })
        } else {
            Err(ExchangeError::ApiError {
                code: i32::from(status.as_u16()),
                message: text,
            })
        }
    }

    fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ExchangeError> {
        serde_json::from_value(value).map_err(|e| {
            ExchangeError::DeserializationError(format!("unexpected response shape: {}", e))
        })
    }
}

#[async_trait]
impl RestClient for ReqwestRest {
    #[instrument(skip(self, query_params), fields(exchange = %self.config.exchange_name, endpoint = %endpoint, param_count = query_params.len()))]
    async fn get(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
        authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        let mut request = self.client.get(self.url_for(endpoint));
        for (name, value) in query_params {
            request = request.query(&[(name, value)]);
        }
        if authenticated {
            request = self.sign(request, &Method::GET, endpoint, &[])?;
        }
        self.dispatch(request).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
        authenticated: bool,
    ) -> Result<T, ExchangeError> {
        self.get(endpoint, query_params, authenticated)
            .await
            .and_then(Self::decode)
    }

    #[instrument(skip(self, body), fields(exchange = %self.config.exchange_name, endpoint = %endpoint))]
    async fn post(
        &self,
        endpoint: &str,
        body: &Value,
        authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        let payload = serde_json::to_vec(body).map_err(|e| {
            ExchangeError::SerializationError(format!("could not serialize request body: {}", e))
        })?;

        let mut request = self.client.post(self.url_for(endpoint));
        if authenticated {
            request = self.sign(request, &Method::POST, endpoint, &payload)?;
        } else {
            request = request
                .header("Content-Type", "application/json")
                .body(payload);
        }
        self.dispatch(request).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &Value,
        authenticated: bool,
    ) -> Result<T, ExchangeError> {
        self.post(endpoint, body, authenticated)
            .await
            .and_then(Self::decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_client() -> ReqwestRest {
        RestClientBuilder::new(RestClientConfig::new("https://example.test", "gemini"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_config_defaults() {
        let config = RestClientConfig::new("https://example.test", "gemini");
        assert_eq!(config.timeout_seconds, 30);
        assert!(config.user_agent.starts_with("geminix/"));
    }

    #[test]
    fn test_url_joins_base_and_endpoint() {
        let rest = test_client();
        assert_eq!(
            rest.url_for("/v1/symbols"),
            "https://example.test/v1/symbols"
        );
    }

    #[tokio::test]
    async fn test_authenticated_call_without_signer_fails_before_io() {
        let rest = test_client();
        let result = rest.post("/v1/balances", &json!({}), true).await;
        assert!(matches!(result, Err(ExchangeError::AuthError(_))));
    }
}
