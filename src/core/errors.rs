use thiserror::Error;

/// Everything a connector call can fail with
///
/// Nothing is retried or swallowed internally; every variant surfaces
/// directly to the caller.
#[derive(Error, Debug)]
pub enum ExchangeError {
    /// Connection failure, timeout, or DNS failure
    #[error("network error: {0}")]
    NetworkError(String),

    /// Non-2xx HTTP status; `message` holds the raw response body
    #[error("API error {code}: {message}")]
    ApiError { code: i32, message: String },

    #[error("authentication error: {0}")]
    AuthError(String),

    #[error("rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Request fields could not be serialized
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// Response body was not valid JSON, or not the expected shape
    #[error("deserialization error: {0}")]
    DeserializationError(String),

    #[error("configuration error: {0}")]
    ConfigError(#[from] crate::core::config::ConfigError),

    #[error("{0}")]
    Other(String),
}
