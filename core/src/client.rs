//! Stateless request builder and envelope-aware response parser.
//!
//! # Design
//! `ApiClient` holds only a `base_url` and the credentials consulted by the
//! configuration provider; it carries no mutable state between calls. Each
//! call is split into `build_request`, which produces an `HttpRequest`, and
//! one of the `parse_*` methods, which consume an `HttpResponse`. The caller
//! (or the [`Dispatcher`](crate::dispatcher::Dispatcher)) executes the actual
//! round-trip in between, keeping the core deterministic and free of I/O.
//!
//! Three result shapes are supported: raw JSON (`parse_json`), one decoded
//! model (`parse_model`), and an ordered model collection
//! (`parse_model_list`). Model mapping failures are always reported as
//! `PayloadExtraction` — in debug and release builds alike.

use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::config::{AuthMode, Credentials, RequestConfig};
use crate::endpoint::Endpoint;
use crate::envelope::Envelope;
use crate::error::HttpError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Stateless client for envelope-wrapped APIs.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    credentials: Credentials,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials: Credentials::default(),
        }
    }

    /// Token attached under `Access-Token` for `AuthMode::User` calls.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.credentials.access_token = Some(token.into());
        self
    }

    /// Pre-encoded credentials attached under `Authorization: Basic …` for
    /// `AuthMode::Basic` calls.
    pub fn with_basic_token(mut self, token: impl Into<String>) -> Self {
        self.credentials.basic_token = Some(token.into());
        self
    }

    /// Assemble the transport-level request for one endpoint call.
    ///
    /// GET and DELETE parameters become the query string; POST and PUT
    /// parameters are form-urlencoded into the body.
    pub fn build_request(
        &self,
        endpoint: &Endpoint,
        auth: AuthMode,
    ) -> Result<HttpRequest, HttpError> {
        let config = RequestConfig::build(auth, &self.credentials);
        let raw = format!("{}{}", self.base_url, endpoint.path());
        let mut url = Url::parse(&raw).map_err(|e| HttpError::Transport {
            message: format!("invalid request URL `{raw}`: {e}"),
            code: -1,
        })?;

        let mut headers = config.headers;
        let body = match endpoint.method() {
            HttpMethod::Get | HttpMethod::Delete => {
                for (key, value) in endpoint.params() {
                    url.query_pairs_mut().append_pair(key, value);
                }
                None
            }
            HttpMethod::Post | HttpMethod::Put => {
                if endpoint.params().is_empty() {
                    None
                } else {
                    let encoded = url::form_urlencoded::Serializer::new(String::new())
                        .extend_pairs(endpoint.params().iter().map(|(k, v)| (k, v)))
                        .finish();
                    headers.push((
                        "Content-Type".to_string(),
                        "application/x-www-form-urlencoded".to_string(),
                    ));
                    Some(encoded)
                }
            }
        };

        Ok(HttpRequest {
            method: endpoint.method(),
            url: url.to_string(),
            headers,
            body,
            timeout_secs: config.timeout_secs,
        })
    }

    /// Decode the envelope and return the raw `data` payload.
    pub fn parse_json(&self, response: &HttpResponse) -> Result<Value, HttpError> {
        Envelope::from_response(response).decode()
    }

    /// Decode the envelope and map the payload into one model.
    pub fn parse_model<M: DeserializeOwned>(
        &self,
        response: &HttpResponse,
    ) -> Result<M, HttpError> {
        let payload = self.parse_json(response)?;
        serde_json::from_value(payload)
            .map_err(|e| HttpError::PayloadExtraction { message: e.to_string() })
    }

    /// Decode the envelope and map an array-shaped payload into an ordered
    /// model collection.
    pub fn parse_model_list<M: DeserializeOwned>(
        &self,
        response: &HttpResponse,
    ) -> Result<Vec<M>, HttpError> {
        let payload = self.parse_json(response)?;
        serde_json::from_value(payload)
            .map_err(|e| HttpError::PayloadExtraction { message: e.to_string() })
    }
}
