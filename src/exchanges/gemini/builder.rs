use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{Clock, NonceProvider, ReqwestRest, RestClientBuilder, RestClientConfig};
use crate::exchanges::gemini::{
    connector::GeminiConnector,
    signer::{GeminiSigner, PayloadTransport},
};
use std::sync::Arc;

pub const PRODUCTION_URL: &str = "https://api.gemini.com";
pub const SANDBOX_URL: &str = "https://api.sandbox.gemini.com";

/// Resolve the base URL from the configuration
///
/// The sandbox flag always wins; an explicit `base_url` only overrides the
/// production endpoint.
pub fn resolve_base_url(config: &ExchangeConfig) -> String {
    if config.sandbox {
        SANDBOX_URL.to_string()
    } else {
        config
            .base_url
            .clone()
            .unwrap_or_else(|| PRODUCTION_URL.to_string())
    }
}

/// Create a Gemini connector with default settings
pub fn build_connector(
    config: ExchangeConfig,
) -> Result<GeminiConnector<ReqwestRest>, ExchangeError> {
    GeminiBuilder::new(config).build()
}

/// Create a Gemini connector with an explicit payload transport
pub fn build_connector_with_transport(
    config: ExchangeConfig,
    transport: PayloadTransport,
) -> Result<GeminiConnector<ReqwestRest>, ExchangeError> {
    GeminiBuilder::new(config).with_transport(transport).build()
}

/// Builder for Gemini connectors
pub struct GeminiBuilder {
    config: ExchangeConfig,
    transport: PayloadTransport,
    timeout_seconds: u64,
    clock: Option<Arc<dyn Clock>>,
}

impl GeminiBuilder {
    pub fn new(config: ExchangeConfig) -> Self {
        Self {
            config,
            transport: PayloadTransport::default(),
            timeout_seconds: 30,
            clock: None,
        }
    }

    /// Override how the signed payload is transmitted
    #[must_use]
    pub fn with_transport(mut self, transport: PayloadTransport) -> Self {
        self.transport = transport;
        self
    }

    /// Set the request timeout in seconds
    #[must_use]
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Inject a custom clock for nonce generation
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn build(self) -> Result<GeminiConnector<ReqwestRest>, ExchangeError> {
        let base_url = resolve_base_url(&self.config);

        let rest_config = RestClientConfig::new(base_url, "gemini".to_string())
            .with_timeout(self.timeout_seconds);

        let mut rest_builder = RestClientBuilder::new(rest_config);

        // Add authentication if credentials are provided
        if self.config.has_credentials() {
            let signer = Arc::new(
                GeminiSigner::new(
                    self.config.api_key().to_string(),
                    self.config.api_secret().to_string(),
                )
                .with_transport(self.transport),
            );
            rest_builder = rest_builder.with_signer(signer);
        }

        let rest = rest_builder.build()?;

        let nonces = match self.clock {
            Some(clock) => Arc::new(NonceProvider::new(clock)),
            None => Arc::new(NonceProvider::system()),
        };

        Ok(GeminiConnector::with_nonce_provider(
            rest,
            &self.config,
            nonces,
        ))
    }
}
