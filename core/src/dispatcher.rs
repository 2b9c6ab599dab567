//! Request dispatch: configuration, plugins, transport, and decoding.
//!
//! # Design
//! `Dispatcher` owns an [`ApiClient`], an injected [`Transport`], and an
//! ordered plugin list. One `send_*` call performs exactly one round-trip
//! (or a stubbed response) and resolves to exactly one `Result` — the
//! success/failure pair of the callback-style original collapses into Rust's
//! `Result`, delivered synchronously to the caller once the transport
//! resolves. No retries, no caching, no request coalescing.
//!
//! Plugin invocations are wrapped in `catch_unwind`: observers may log or
//! toggle UI state, but they can never change or fail a request.

use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::ApiClient;
use crate::config::{AuthMode, StubBehavior};
use crate::endpoint::Endpoint;
use crate::error::HttpError;
use crate::http::{HttpRequest, HttpResponse, Transport, TransportError};
use crate::plugin::LifecyclePlugin;

/// Sends endpoint requests through an injected transport and decodes the
/// response envelope into the caller's chosen shape.
pub struct Dispatcher<T> {
    client: ApiClient,
    transport: T,
    plugins: Vec<Box<dyn LifecyclePlugin>>,
    stub: StubBehavior,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(client: ApiClient, transport: T) -> Self {
        Self {
            client,
            transport,
            plugins: Vec::new(),
            stub: StubBehavior::Never,
        }
    }

    /// Replace the plugin list. Plugins run in order on both lifecycle
    /// events.
    pub fn with_plugins(mut self, plugins: Vec<Box<dyn LifecyclePlugin>>) -> Self {
        self.plugins = plugins;
        self
    }

    pub fn with_stub(mut self, stub: StubBehavior) -> Self {
        self.stub = stub;
        self
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Send a request and hand back the raw `data` payload.
    pub fn send_json(&self, endpoint: &Endpoint, auth: AuthMode) -> Result<Value, HttpError> {
        self.dispatch(endpoint, auth, |resp| self.client.parse_json(resp))
    }

    /// Send a request and map the payload into one model.
    pub fn send_model<M: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        auth: AuthMode,
    ) -> Result<M, HttpError> {
        self.dispatch(endpoint, auth, |resp| self.client.parse_model(resp))
    }

    /// Send a request and map an array-shaped payload into an ordered model
    /// collection.
    pub fn send_model_list<M: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        auth: AuthMode,
    ) -> Result<Vec<M>, HttpError> {
        self.dispatch(endpoint, auth, |resp| self.client.parse_model_list(resp))
    }

    fn dispatch<R>(
        &self,
        endpoint: &Endpoint,
        auth: AuthMode,
        parse: impl FnOnce(&HttpResponse) -> Result<R, HttpError>,
    ) -> Result<R, HttpError> {
        let request = self.client.build_request(endpoint, auth)?;

        self.notify_before(&request);
        let result = match self.stub {
            StubBehavior::Immediate => Ok(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: endpoint.sample().unwrap_or_default().to_string(),
            }),
            StubBehavior::Never => self.transport.execute(&request),
        };
        self.notify_after(&result);

        match result {
            Ok(response) => parse(&response),
            Err(err) => match &err.body {
                // A failure that still carried a body is classified through
                // the envelope decoder; if that classification is itself
                // transport-level, the transport's native code/message win.
                Some(body) => {
                    let response = HttpResponse {
                        status: err.status.unwrap_or(0),
                        headers: Vec::new(),
                        body: body.clone(),
                    };
                    match parse(&response) {
                        Err(HttpError::Transport { .. }) => Err(HttpError::Transport {
                            message: err.message.clone(),
                            code: err.code,
                        }),
                        other => other,
                    }
                }
                None => Err(HttpError::Transport { message: err.message, code: err.code }),
            },
        }
    }

    fn notify_before(&self, request: &HttpRequest) {
        for plugin in &self.plugins {
            let _ = catch_unwind(AssertUnwindSafe(|| plugin.before_send(request)));
        }
    }

    fn notify_after(&self, result: &Result<HttpResponse, TransportError>) {
        for plugin in &self.plugins {
            let _ = catch_unwind(AssertUnwindSafe(|| plugin.after_receive(result)));
        }
    }
}
