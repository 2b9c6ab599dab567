//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! tagged enums with explicit discriminants. The result shape the host asks
//! for is an explicit [`FfiResultShape`] tag — generics do not cross the C
//! boundary, so the three shapes become a variant-dispatch table here.
//! Conversion functions live in this module to keep `lib.rs` focused on the
//! `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use envelope_core::error::HttpError;
use envelope_core::http::HttpMethod;

/// Opaque handle to an `ApiClient`. C callers receive a pointer to this and
/// pass it back into every FFI function.
pub struct FfiApiClient {
    pub(crate) inner: envelope_core::ApiClient,
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
#[derive(Clone, Copy)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Delete = 3,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Delete => FfiHttpMethod::Delete,
        }
    }
}

impl From<FfiHttpMethod> for HttpMethod {
    fn from(m: FfiHttpMethod) -> Self {
        match m {
            FfiHttpMethod::Get => HttpMethod::Get,
            FfiHttpMethod::Post => HttpMethod::Post,
            FfiHttpMethod::Put => HttpMethod::Put,
            FfiHttpMethod::Delete => HttpMethod::Delete,
        }
    }
}

/// Auth mode as a C enum.
#[repr(C)]
#[derive(Clone, Copy)]
pub enum FfiAuthMode {
    Basic = 0,
    User = 1,
}

impl From<FfiAuthMode> for envelope_core::AuthMode {
    fn from(m: FfiAuthMode) -> Self {
        match m {
            FfiAuthMode::Basic => envelope_core::AuthMode::Basic,
            FfiAuthMode::User => envelope_core::AuthMode::User,
        }
    }
}

/// Which shape the host wants the decoded payload routed into. The host
/// maps models itself; `Model` and `ModelList` only constrain the payload's
/// JSON shape.
#[repr(C)]
#[derive(Clone, Copy)]
pub enum FfiResultShape {
    RawJson = 0,
    Model = 1,
    ModelList = 2,
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `envelope_build_request`. The C caller executes the request and
/// passes the response back through `envelope_parse_response`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
    pub timeout_secs: u64,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: envelope_core::HttpRequest) -> *mut Self {
        let url = CString::new(req.url).unwrap().into_raw();
        let body = match req.body {
            Some(b) => CString::new(b).unwrap().into_raw(),
            None => std::ptr::null_mut(),
        };

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let mut ffi_headers: Vec<FfiHeader> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: CString::new(k).unwrap().into_raw(),
                    value: CString::new(v).unwrap().into_raw(),
                })
                .collect();
            let ptr = ffi_headers.as_mut_ptr();
            std::mem::forget(ffi_headers);
            ptr
        };

        let ffi_req = Box::new(FfiHttpRequest {
            method: req.method.into(),
            url,
            headers,
            headers_len,
            body,
            timeout_secs: req.timeout_secs,
        });
        Box::into_raw(ffi_req)
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing an HTTP
/// request, then passes a pointer to `envelope_parse_response`. The FFI
/// layer reads but does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiEnvelopeResult`.
#[repr(C)]
#[derive(Clone, Copy)]
pub enum FfiErrorCode {
    Ok = 0,
    MalformedJson = 1,
    PayloadExtraction = 2,
    SessionExpired = 3,
    ServerError = 4,
    Transport = 5,
    Panic = 6,
    NullArg = 7,
}

/// Result envelope for `envelope_parse_response`.
///
/// On success `error_code` is `Ok`, `error_message` is null, and
/// `payload_json` holds the decoded `data` value serialized as JSON for the
/// host's own model mapping. On failure `error_code` names the
/// classification, `server_code` carries the numeric code (-1 when the kind
/// has none), and `error_message` is a human-readable C string.
#[repr(C)]
pub struct FfiEnvelopeResult {
    pub error_code: FfiErrorCode,
    pub server_code: i64,
    pub error_message: *mut c_char,
    pub payload_json: *mut c_char,
}

impl FfiEnvelopeResult {
    /// Build a success result carrying the payload as a JSON string.
    pub(crate) fn ok(payload_json: String) -> *mut Self {
        let result = Box::new(FfiEnvelopeResult {
            error_code: FfiErrorCode::Ok,
            server_code: 0,
            error_message: std::ptr::null_mut(),
            payload_json: CString::new(payload_json).unwrap().into_raw(),
        });
        Box::into_raw(result)
    }

    /// Build an error result from an `HttpError` classification.
    pub(crate) fn from_error(err: &HttpError) -> *mut Self {
        let error_code = match err {
            HttpError::MalformedJson { .. } => FfiErrorCode::MalformedJson,
            HttpError::PayloadExtraction { .. } => FfiErrorCode::PayloadExtraction,
            HttpError::SessionExpired { .. } => FfiErrorCode::SessionExpired,
            HttpError::ServerError { .. } => FfiErrorCode::ServerError,
            HttpError::Transport { .. } => FfiErrorCode::Transport,
        };

        let result = Box::new(FfiEnvelopeResult {
            error_code,
            server_code: err.code(),
            error_message: CString::new(err.message().to_string())
                .unwrap_or_default()
                .into_raw(),
            payload_json: std::ptr::null_mut(),
        });
        Box::into_raw(result)
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        let msg = format!("null argument: {name}");
        let result = Box::new(FfiEnvelopeResult {
            error_code: FfiErrorCode::NullArg,
            server_code: -1,
            error_message: CString::new(msg).unwrap().into_raw(),
            payload_json: std::ptr::null_mut(),
        });
        Box::into_raw(result)
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        let result = Box::new(FfiEnvelopeResult {
            error_code: FfiErrorCode::Panic,
            server_code: -1,
            error_message: CString::new(msg).unwrap_or_default().into_raw(),
            payload_json: std::ptr::null_mut(),
        });
        Box::into_raw(result)
    }
}
