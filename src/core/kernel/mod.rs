/// Transport kernel: everything needed to reach the exchange without
/// knowing anything about its endpoints.
///
/// Three seams, each trait-based so tests can inject their own:
///
/// - `RestClient` / `ReqwestRest`: HTTP with a configurable timeout
/// - `Signer`: authentication, producing headers and the exact body bytes
///   to transmit
/// - `Clock` / `NonceProvider`: time source and monotonic nonce draws for
///   signed requests
///
/// Exchange-specific logic (paths, payload shapes, the signing scheme
/// itself) lives under `exchanges::gemini` and plugs in through these
/// traits.
pub mod clock;
pub mod rest;
pub mod signer;

pub use clock::{Clock, NonceProvider, SystemClock};
pub use rest::{ReqwestRest, RestClient, RestClientBuilder, RestClientConfig};
pub use signer::{NoopSigner, SignedRequest, Signer};
