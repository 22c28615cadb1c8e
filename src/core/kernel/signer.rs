use crate::core::errors::ExchangeError;
use std::collections::HashMap;

/// Output of a signing operation
///
/// `headers` are attached to the outgoing request verbatim. `body` is the
/// exact byte sequence to transmit as the request body; `None` means the
/// request is sent with no body at all. Whatever bytes the signer signed are
/// the bytes that go on the wire, so the signature can never drift from the
/// transmitted payload.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub headers: HashMap<String, String>,
    pub body: Option<Vec<u8>>,
}

/// Authentication seam between the transport and an exchange scheme
///
/// `body` is the serialized request fields exactly as the caller produced
/// them; the implementation must never re-serialize. `method` and `endpoint`
/// are available for schemes that fold them into the signature.
pub trait Signer: Send + Sync {
    fn sign_request(
        &self,
        method: &str,
        endpoint: &str,
        body: &[u8],
    ) -> Result<SignedRequest, ExchangeError>;
}

/// Pass-through signer: no headers, body transmitted as-is
pub struct NoopSigner;

impl Signer for NoopSigner {
    fn sign_request(
        &self,
        _method: &str,
        _endpoint: &str,
        body: &[u8],
    ) -> Result<SignedRequest, ExchangeError> {
        let transmitted = if body.is_empty() {
            None
        } else {
            Some(body.to_vec())
        };

        Ok(SignedRequest {
            headers: HashMap::new(),
            body: transmitted,
        })
    }
}
