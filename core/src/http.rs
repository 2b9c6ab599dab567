//! Plain-data HTTP types and the transport boundary.
//!
//! # Design
//! The wrapper never performs I/O itself. `ApiClient::build_request` produces
//! an `HttpRequest` as plain data and an injected [`Transport`] executes the
//! round-trip. This keeps request assembly and envelope decoding fully
//! deterministic and lets tests drive the client with canned responses.
//!
//! All fields use owned types (`String`, `Vec`) so values can cross FFI
//! boundaries without lifetime concerns.

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// A fully assembled HTTP request described as plain data.
///
/// Built by `ApiClient::build_request`. The transport is responsible for
/// executing this request and returning the corresponding `HttpResponse`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    /// Per-request timeout the transport is expected to honor.
    pub timeout_secs: u64,
}

/// An HTTP response described as plain data.
///
/// Constructed by the transport after executing an `HttpRequest`, then fed
/// to the envelope decoder through the `ApiClient::parse_*` methods.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// A transport-level failure: the round-trip did not complete normally.
///
/// `status` and `body` carry the partial response when the server answered
/// before the failure; both are `None` for pure connection-level errors.
#[derive(Debug, Clone)]
pub struct TransportError {
    pub code: i64,
    pub message: String,
    pub status: Option<u16>,
    pub body: Option<String>,
}

/// The injected HTTP transport collaborator.
///
/// Implementations must resolve exactly once per call: either a response
/// (any status code, including non-2xx) or a `TransportError`. The wrapper
/// treats the transport as stateless; instances may be shared across calls.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}
