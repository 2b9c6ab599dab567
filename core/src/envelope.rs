//! Decoder for the conventional `{data, code, msg}` response envelope.
//!
//! # Design
//! Every endpoint of the server wraps its payload in the same top-level
//! object: `data` carries the meaningful value, `code` is 0 on success, and
//! `msg` holds human-readable detail. [`Envelope::decode`] is a pure function
//! of the response bytes and HTTP status — it either yields the `data` value
//! or exactly one [`HttpError`] classification, never both.
//!
//! The HTTP status is checked before the body is parsed: a non-2xx response
//! is classified from the transport's point of view and the envelope fields
//! are never consulted, even when the error body happens to parse.

use serde_json::Value;

use crate::error::HttpError;

/// Application-level success.
pub const CODE_OK: i64 = 0;

/// Reserved sentinel: the login session is no longer valid and the caller
/// must re-authenticate, irrespective of `msg`.
pub const CODE_SESSION_EXPIRED: i64 = 1000;

/// A single response awaiting classification. Constructed per response,
/// never mutated.
#[derive(Debug, Clone)]
pub struct Envelope {
    status: u16,
    body: String,
}

impl Envelope {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn from_response(response: &crate::http::HttpResponse) -> Self {
        Self::new(response.status, response.body.clone())
    }

    /// The envelope's `code` field; 0 when absent or unreadable.
    pub fn code(&self) -> i64 {
        self.root()
            .as_ref()
            .and_then(|v| v.get("code"))
            .and_then(Value::as_i64)
            .unwrap_or(CODE_OK)
    }

    /// The envelope's `msg` field; empty when absent or unreadable.
    pub fn message(&self) -> String {
        self.root()
            .as_ref()
            .and_then(|v| v.get("msg"))
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string()
    }

    /// Classify the response and extract the `data` payload.
    pub fn decode(&self) -> Result<Value, HttpError> {
        if !(200..300).contains(&self.status) {
            return Err(HttpError::Transport {
                message: format!("request failed with HTTP status {}", self.status),
                code: i64::from(self.status),
            });
        }

        let root: Value = serde_json::from_str(&self.body).map_err(|e| {
            log::debug!("envelope body is not valid JSON: {e}");
            HttpError::MalformedJson { message: e.to_string() }
        })?;

        let data = match root.get("data") {
            Some(data) => data,
            None => {
                return Err(HttpError::MalformedJson {
                    message: "response envelope has no `data` field".to_string(),
                })
            }
        };

        let code = root.get("code").and_then(Value::as_i64).unwrap_or(CODE_OK);
        let message = root
            .get("msg")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();

        match code {
            CODE_SESSION_EXPIRED => Err(HttpError::SessionExpired { message, code }),
            CODE_OK => Ok(data.clone()),
            _ => Err(HttpError::ServerError { message, code }),
        }
    }

    fn root(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn zero_code_with_data_yields_payload() {
        let envelope = Envelope::new(200, r#"{"data":{"name":"Alice","age":7},"code":0,"msg":""}"#);
        let payload = envelope.decode().unwrap();
        assert_eq!(payload, json!({"name": "Alice", "age": 7}));
    }

    #[test]
    fn missing_code_and_msg_default_to_success() {
        let envelope = Envelope::new(200, r#"{"data":[1,2,3]}"#);
        assert_eq!(envelope.code(), CODE_OK);
        assert_eq!(envelope.message(), "");
        assert_eq!(envelope.decode().unwrap(), json!([1, 2, 3]));
    }

    #[test]
    fn null_data_field_is_still_a_payload() {
        let envelope = Envelope::new(200, r#"{"data":null,"code":0,"msg":""}"#);
        assert_eq!(envelope.decode().unwrap(), Value::Null);
    }

    #[test]
    fn sentinel_code_classifies_as_session_expired() {
        let envelope = Envelope::new(200, r#"{"data":null,"code":1000,"msg":"please log in again"}"#);
        let err = envelope.decode().unwrap_err();
        assert_eq!(
            err,
            HttpError::SessionExpired { message: "please log in again".into(), code: 1000 }
        );
    }

    #[test]
    fn sentinel_wins_regardless_of_data_content() {
        let envelope = Envelope::new(200, r#"{"data":{"name":"A"},"code":1000,"msg":"expired"}"#);
        assert!(envelope.decode().unwrap_err().is_session_expired());
    }

    #[test]
    fn nonzero_code_preserves_msg_and_code_verbatim() {
        let envelope = Envelope::new(200, r#"{"data":null,"code":4001,"msg":"operation not allowed"}"#);
        let err = envelope.decode().unwrap_err();
        assert_eq!(
            err,
            HttpError::ServerError { message: "operation not allowed".into(), code: 4001 }
        );
    }

    #[test]
    fn unparseable_body_is_malformed_json() {
        let envelope = Envelope::new(200, "definitely not json");
        assert!(matches!(
            envelope.decode().unwrap_err(),
            HttpError::MalformedJson { .. }
        ));
    }

    #[test]
    fn missing_data_field_is_malformed_json() {
        let envelope = Envelope::new(200, r#"{"code":0,"msg":""}"#);
        assert!(matches!(
            envelope.decode().unwrap_err(),
            HttpError::MalformedJson { .. }
        ));
    }

    #[test]
    fn non_success_status_bypasses_envelope_fields() {
        // The body parses cleanly, but a 500 is classified from the
        // transport's point of view.
        let envelope = Envelope::new(500, r#"{"data":{"x":1},"code":0,"msg":""}"#);
        let err = envelope.decode().unwrap_err();
        assert_eq!(err.code(), 500);
        assert!(matches!(err, HttpError::Transport { .. }));
    }

    #[test]
    fn non_success_status_with_empty_body_is_transport_error() {
        let envelope = Envelope::new(500, "");
        assert!(matches!(
            envelope.decode().unwrap_err(),
            HttpError::Transport { code: 500, .. }
        ));
    }
}
