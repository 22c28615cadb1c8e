use crate::core::errors::ExchangeError;
use crate::core::kernel::{SignedRequest, Signer};
use base64::{engine::general_purpose, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha384;
use std::collections::HashMap;

type HmacSha384 = Hmac<Sha384>;

/// How the signed payload travels to the exchange
///
/// The authentication headers carry the full payload either way. Gemini's
/// documented protocol additionally expects the same base64 text as the POST
/// body; `HeadersOnly` reproduces clients that rely on the headers alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadTransport {
    /// Payload and signature are sent only as headers; the POST has no body
    HeadersOnly,
    /// The base64 payload is also transmitted as the request body
    #[default]
    HeadersAndBody,
}

/// Signer implementing Gemini's private-API authentication scheme
///
/// The serialized request fields are base64-encoded, and that base64 text is
/// HMAC-SHA384 signed with the API secret. Three headers result:
/// `X-GEMINI-APIKEY`, `X-GEMINI-PAYLOAD` and `X-GEMINI-SIGNATURE`.
pub struct GeminiSigner {
    api_key: String,
    api_secret: String,
    transport: PayloadTransport,
}

impl GeminiSigner {
    pub fn new(api_key: String, api_secret: String) -> Self {
        Self {
            api_key,
            api_secret,
            transport: PayloadTransport::default(),
        }
    }

    /// Override how the payload is transmitted
    #[must_use]
    pub fn with_transport(mut self, transport: PayloadTransport) -> Self {
        self.transport = transport;
        self
    }

    /// HMAC-SHA384 over the base64 payload text, hex-encoded lowercase
    fn generate_signature(&self, payload: &str) -> Result<String, ExchangeError> {
        let mut mac = HmacSha384::new_from_slice(self.api_secret.as_bytes())
            .map_err(|e| ExchangeError::AuthError(format!("Failed to create HMAC: {}", e)))?;
        mac.update(payload.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

impl Signer for GeminiSigner {
    fn sign_request(
        &self,
        _method: &str,
        _endpoint: &str,
        body: &[u8],
    ) -> Result<SignedRequest, ExchangeError> {
        // The signature covers the base64 text, not the raw JSON. The body
        // bytes arrive already serialized; they are never re-encoded here.
        let payload = general_purpose::STANDARD.encode(body);
        let signature = self.generate_signature(&payload)?;

        let mut headers = HashMap::new();
        headers.insert("X-GEMINI-APIKEY".to_string(), self.api_key.clone());
        headers.insert("X-GEMINI-PAYLOAD".to_string(), payload.clone());
        headers.insert("X-GEMINI-SIGNATURE".to_string(), signature);

        let transmitted = match self.transport {
            PayloadTransport::HeadersOnly => None,
            PayloadTransport::HeadersAndBody => {
                headers.insert("Content-Type".to_string(), "text/plain".to_string());
                Some(payload.into_bytes())
            }
        };

        Ok(SignedRequest {
            headers,
            body: transmitted,
        })
    }
}
