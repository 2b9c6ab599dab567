//! C-ABI wrapper around `envelope-core`.
//!
//! # Overview
//! Exposes request building and envelope decoding through `extern "C"`
//! functions so any language with a C FFI can drive an envelope-wrapped API
//! without linking to serde directly. The host executes the HTTP request
//! itself and hands the response back for classification.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - `envelope_build_request` / `envelope_parse_response` mirror the core's
//!   build/parse split 1:1.
//! - The three result shapes are selected by an [`FfiResultShape`] tag; the
//!   decoded payload always comes back as a JSON C string and the host maps
//!   its own models from it.
//! - The C caller owns all returned pointers and must call the matching
//!   `envelope_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use envelope_core::{ApiClient, Endpoint, HttpResponse};
use serde_json::Value;

use types::*;

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `ApiClient` bound to `base_url`.
///
/// `access_token` and `basic_token` may be null; whichever credentials are
/// present determine which auth modes can attach a header.
/// Returns null if `base_url` is null or if an internal panic occurs.
/// The caller must free the returned pointer with `envelope_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn envelope_client_new(
    base_url: *const c_char,
    access_token: *const c_char,
    basic_token: *const c_char,
) -> *mut FfiApiClient {
    catch_unwind(|| {
        if base_url.is_null() {
            return std::ptr::null_mut();
        }
        let url = unsafe { CStr::from_ptr(base_url) }.to_str().unwrap_or("");
        let mut client = ApiClient::new(url);
        if !access_token.is_null() {
            let token = unsafe { CStr::from_ptr(access_token) }.to_str().unwrap_or("");
            client = client.with_access_token(token);
        }
        if !basic_token.is_null() {
            let token = unsafe { CStr::from_ptr(basic_token) }.to_str().unwrap_or("");
            client = client.with_basic_token(token);
        }
        Box::into_raw(Box::new(FfiApiClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free an `ApiClient` created by `envelope_client_new`. Safe to call with
/// null.
#[unsafe(no_mangle)]
pub extern "C" fn envelope_client_free(client: *mut FfiApiClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build request
// ---------------------------------------------------------------------------

/// Build an HTTP request for `path` with the given method and auth mode.
///
/// `params_json` may be null (no parameters) or a JSON object; string values
/// are taken verbatim, other scalars are rendered as JSON text, and null
/// values are skipped. Parameters are applied in the object's key order.
/// GET and DELETE put parameters in the query string, POST and PUT
/// form-encode them into the body.
///
/// Returns null if `client` or `path` is null, if `params_json` is not a
/// JSON object, or if the resulting URL is invalid.
/// The caller must free the returned pointer with `envelope_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn envelope_build_request(
    client: *const FfiApiClient,
    path: *const c_char,
    method: FfiHttpMethod,
    auth: FfiAuthMode,
    params_json: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || path.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let path_str = unsafe { CStr::from_ptr(path) }.to_str().unwrap_or("");

        let mut endpoint = Endpoint::new(path_str, method.into());
        if !params_json.is_null() {
            let raw = unsafe { CStr::from_ptr(params_json) }.to_str().unwrap_or("");
            let parsed: Value = match serde_json::from_str(raw) {
                Ok(v) => v,
                Err(_) => return std::ptr::null_mut(),
            };
            let object = match parsed.as_object() {
                Some(o) => o,
                None => return std::ptr::null_mut(),
            };
            for (key, value) in object {
                match value {
                    Value::Null => {}
                    Value::String(s) => endpoint = endpoint.param(key, s),
                    other => endpoint = endpoint.param(key, other),
                }
            }
        }

        match client.inner.build_request(&endpoint, auth.into()) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Parse response
// ---------------------------------------------------------------------------

/// Convert an `FfiHttpResponse` to a core `HttpResponse`. A null body is
/// treated as an empty string.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = if resp.body.is_null() {
        String::new()
    } else {
        unsafe { CStr::from_ptr(resp.body) }
            .to_str()
            .unwrap_or("")
            .to_string()
    };
    HttpResponse {
        status: resp.status,
        headers: Vec::new(),
        body,
    }
}

/// Decode an envelope response into the requested result shape.
///
/// - `RawJson` returns the `data` value as-is.
/// - `Model` additionally requires `data` to be a JSON object.
/// - `ModelList` requires `data` to be a JSON array and preserves its order.
///
/// On success `payload_json` holds the payload serialized as JSON; on
/// failure `error_code` carries the classification and `server_code` the
/// numeric code. The caller must free the returned pointer with
/// `envelope_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn envelope_parse_response(
    client: *const FfiApiClient,
    response: *const FfiHttpResponse,
    shape: FfiResultShape,
) -> *mut FfiEnvelopeResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiEnvelopeResult::null_arg("client");
        }
        if response.is_null() {
            return FfiEnvelopeResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = ffi_response_to_core(unsafe { &*response });

        let payload = match shape {
            FfiResultShape::RawJson => client.inner.parse_json(&resp).map(|v| v.to_string()),
            FfiResultShape::Model => client
                .inner
                .parse_model::<serde_json::Map<String, Value>>(&resp)
                .map(|m| Value::Object(m).to_string()),
            FfiResultShape::ModelList => client
                .inner
                .parse_model_list::<Value>(&resp)
                .map(|items| Value::Array(items).to_string()),
        };

        match payload {
            Ok(json) => FfiEnvelopeResult::ok(json),
            Err(e) => FfiEnvelopeResult::from_error(&e),
        }
    })
    .unwrap_or_else(|_| FfiEnvelopeResult::panic("panic in envelope_parse_response"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by `envelope_build_request`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn envelope_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        if !req.url.is_null() {
            drop(unsafe { CString::from_raw(req.url) });
        }
        if !req.body.is_null() {
            drop(unsafe { CString::from_raw(req.body) });
        }
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Vec::from_raw_parts(req.headers, req.headers_len as usize, req.headers_len as usize)
            };
            for h in headers {
                if !h.key.is_null() {
                    drop(unsafe { CString::from_raw(h.key) });
                }
                if !h.value.is_null() {
                    drop(unsafe { CString::from_raw(h.value) });
                }
            }
        }
    });
}

/// Free an `FfiEnvelopeResult` returned by `envelope_parse_response`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn envelope_free_result(result: *mut FfiEnvelopeResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        if !result.payload_json.is_null() {
            drop(unsafe { CString::from_raw(result.payload_json) });
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn envelope_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
