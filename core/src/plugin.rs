//! Request-lifecycle plugins.
//!
//! # Design
//! Plugins observe the request lifecycle at two points — just before the
//! transport executes and just after it resolves — and never alter the
//! result delivered to the caller. They are injected per dispatcher instance
//! rather than reached through global state, and the dispatcher isolates
//! every invocation so a misbehaving plugin cannot fail a request.

use std::sync::Arc;

use crate::http::{HttpRequest, HttpResponse, TransportError};
use crate::indicator::ActivityIndicator;

/// Observer capability set for one request's lifecycle.
pub trait LifecyclePlugin {
    fn before_send(&self, request: &HttpRequest);
    fn after_receive(&self, result: &Result<HttpResponse, TransportError>);
}

/// Toggles an injected activity indicator around each request.
pub struct IndicatorPlugin {
    indicator: Arc<dyn ActivityIndicator>,
}

impl IndicatorPlugin {
    pub fn new(indicator: Arc<dyn ActivityIndicator>) -> Self {
        Self { indicator }
    }
}

impl LifecyclePlugin for IndicatorPlugin {
    fn before_send(&self, _request: &HttpRequest) {
        self.indicator.show();
    }

    fn after_receive(&self, _result: &Result<HttpResponse, TransportError>) {
        self.indicator.hide();
    }
}

/// Logs request and response summaries through the `log` facade. Only its
/// own output is affected by log-level filtering; payloads are never
/// transformed.
pub struct RequestLogger;

impl LifecyclePlugin for RequestLogger {
    fn before_send(&self, request: &HttpRequest) {
        log::debug!(
            "--> {:?} {} headers={:?} body_len={}",
            request.method,
            request.url,
            request.headers,
            request.body.as_deref().map_or(0, str::len),
        );
    }

    fn after_receive(&self, result: &Result<HttpResponse, TransportError>) {
        match result {
            Ok(response) => log::debug!(
                "<-- HTTP {} body_len={}",
                response.status,
                response.body.len()
            ),
            Err(err) => log::debug!("<-- transport failure code={} {}", err.code, err.message),
        }
    }
}

/// The stock plugin set: indicator toggling always, request/response logging
/// in debug builds only.
pub fn default_plugins(indicator: Arc<dyn ActivityIndicator>) -> Vec<Box<dyn LifecyclePlugin>> {
    let mut plugins: Vec<Box<dyn LifecyclePlugin>> = vec![Box::new(IndicatorPlugin::new(indicator))];
    if cfg!(debug_assertions) {
        plugins.push(Box::new(RequestLogger));
    }
    plugins
}
