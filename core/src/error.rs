//! Error classification for envelope-decoded requests.
//!
//! # Design
//! `SessionExpired` gets a dedicated variant because callers use it to kick
//! off a re-authentication flow; every other kind is informational. All five
//! kinds are terminal and non-retryable — nothing here is recovered
//! internally, and no error is ever allowed to panic past the caller.

use thiserror::Error;

/// Classification of a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    /// The response body was not valid JSON, or carried no `data` field.
    #[error("malformed JSON response: {message}")]
    MalformedJson { message: String },

    /// The payload could not be mapped into the requested model shape.
    /// Distinct from server-side classifications: the server answered
    /// successfully but the `data` value did not fit the target type.
    #[error("payload mapping failed: {message}")]
    PayloadExtraction { message: String },

    /// The server returned the reserved session-expired code. Callers
    /// should trigger re-authentication.
    #[error("session expired: {message} (code {code})")]
    SessionExpired { message: String, code: i64 },

    /// The server reported an application-level error (`code` non-zero).
    #[error("server reported error: {message} (code {code})")]
    ServerError { message: String, code: i64 },

    /// The round-trip itself failed: connection error, timeout, or an HTTP
    /// status outside the success range. Carries the transport's native
    /// code and message, never parsed envelope fields.
    #[error("transport error: {message} (code {code})")]
    Transport { message: String, code: i64 },
}

impl HttpError {
    /// The human-readable detail carried by every classification.
    pub fn message(&self) -> &str {
        match self {
            HttpError::MalformedJson { message }
            | HttpError::PayloadExtraction { message }
            | HttpError::SessionExpired { message, .. }
            | HttpError::ServerError { message, .. }
            | HttpError::Transport { message, .. } => message,
        }
    }

    /// The numeric code, or -1 for kinds that carry none.
    pub fn code(&self) -> i64 {
        match self {
            HttpError::SessionExpired { code, .. }
            | HttpError::ServerError { code, .. }
            | HttpError::Transport { code, .. } => *code,
            HttpError::MalformedJson { .. } | HttpError::PayloadExtraction { .. } => -1,
        }
    }

    /// True for the classification that should send the caller back to the
    /// login flow.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, HttpError::SessionExpired { .. })
    }
}
