//! Per-call request configuration.
//!
//! # Design
//! Configuration is recomputed fresh for every call from the selected
//! [`AuthMode`] and the client's [`Credentials`] — there is no shared mutable
//! session state. Absent credentials simply omit the corresponding header
//! instead of failing the request; the server's envelope (code 1000) is the
//! authority on whether a session is valid.

/// Request timeout stamped onto every built request, in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Which header set to attach to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// Application-level credentials (`Authorization: Basic …`).
    Basic,
    /// Logged-in user token (`Access-Token` header).
    #[default]
    User,
}

/// Tokens held by the client, consulted per call by the configuration
/// provider.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub access_token: Option<String>,
    pub basic_token: Option<String>,
}

/// Whether the dispatcher performs real I/O or answers from the endpoint's
/// sample body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StubBehavior {
    /// Always go through the transport.
    #[default]
    Never,
    /// Skip the transport and synthesize a 200 response from
    /// `Endpoint::sample`.
    Immediate,
}

/// Transport-level settings assembled for one call.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub headers: Vec<(String, String)>,
    pub timeout_secs: u64,
}

impl RequestConfig {
    /// Assemble the base header set plus the auth-mode-specific entries.
    pub fn build(auth: AuthMode, credentials: &Credentials) -> Self {
        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        match auth {
            AuthMode::User => {
                if let Some(token) = &credentials.access_token {
                    headers.push(("Access-Token".to_string(), token.clone()));
                }
            }
            AuthMode::Basic => {
                if let Some(token) = &credentials.basic_token {
                    headers.push(("Authorization".to_string(), format!("Basic {token}")));
                }
            }
        }
        Self { headers, timeout_secs: REQUEST_TIMEOUT_SECS }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials {
            access_token: Some("user-token".to_string()),
            basic_token: Some("YWxhZGRpbg==".to_string()),
        }
    }

    #[test]
    fn user_mode_attaches_access_token() {
        let config = RequestConfig::build(AuthMode::User, &credentials());
        assert!(config
            .headers
            .contains(&("Access-Token".to_string(), "user-token".to_string())));
        assert!(!config.headers.iter().any(|(k, _)| k == "Authorization"));
    }

    #[test]
    fn basic_mode_attaches_authorization() {
        let config = RequestConfig::build(AuthMode::Basic, &credentials());
        assert!(config
            .headers
            .contains(&("Authorization".to_string(), "Basic YWxhZGRpbg==".to_string())));
        assert!(!config.headers.iter().any(|(k, _)| k == "Access-Token"));
    }

    #[test]
    fn missing_credentials_omit_the_header() {
        let config = RequestConfig::build(AuthMode::User, &Credentials::default());
        assert_eq!(
            config.headers,
            vec![("Accept".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn timeout_is_sixty_seconds() {
        let config = RequestConfig::build(AuthMode::default(), &Credentials::default());
        assert_eq!(config.timeout_secs, 60);
    }
}
