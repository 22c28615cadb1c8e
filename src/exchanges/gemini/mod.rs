pub mod builder;
pub mod connector;
pub mod converters;
pub mod requests;
pub mod rest;
pub mod signer;
pub mod types;

use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::ReqwestRest;

// Re-export main types for easier importing
pub use builder::{GeminiBuilder, PRODUCTION_URL, SANDBOX_URL};
pub use connector::GeminiConnector;
pub use signer::{GeminiSigner, PayloadTransport};
pub use types::{
    GeminiBalance, GeminiCancelAllResult, GeminiErrorResponse, GeminiHeartbeat, GeminiOrder,
    GeminiOrderBook, GeminiTicker, GeminiTrade, GeminiTradeVolume,
};

/// Create a Gemini connector with default settings
pub fn create_gemini_connector(
    config: ExchangeConfig,
) -> Result<GeminiConnector<ReqwestRest>, ExchangeError> {
    builder::build_connector(config)
}

/// Create a Gemini connector against the sandbox environment
pub fn create_gemini_sandbox_connector(
    config: ExchangeConfig,
) -> Result<GeminiConnector<ReqwestRest>, ExchangeError> {
    builder::build_connector(config.sandbox(true))
}
