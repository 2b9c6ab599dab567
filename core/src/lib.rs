//! Typed client core for APIs that wrap every response in the conventional
//! `{data, code, msg}` envelope.
//!
//! # Overview
//! Callers describe a request with an [`Endpoint`], pick an [`AuthMode`],
//! and choose one of three result shapes — raw JSON, a single decoded
//! model, or an ordered model collection. The crate assembles the transport
//! request, unwraps the envelope, and classifies failures into a small,
//! fixed taxonomy ([`HttpError`]); the reserved code 1000 is surfaced as
//! [`HttpError::SessionExpired`] so applications can route to re-login.
//!
//! # Design
//! - `ApiClient` is stateless and splits every call into `build_request`
//!   and `parse_*`, so the I/O boundary is explicit and testable without a
//!   network (host-does-IO pattern).
//! - `Dispatcher` adds the round-trip: an injected [`Transport`] plus an
//!   ordered list of lifecycle plugins (activity indicator, debug logging)
//!   that observe but never alter the result.
//! - No caching, retries, or request coalescing — one call, one round-trip,
//!   one `Result`.

pub mod client;
pub mod config;
pub mod dispatcher;
pub mod endpoint;
pub mod envelope;
pub mod error;
pub mod http;
pub mod indicator;
pub mod plugin;

pub use client::ApiClient;
pub use config::{AuthMode, Credentials, RequestConfig, StubBehavior, REQUEST_TIMEOUT_SECS};
pub use dispatcher::Dispatcher;
pub use endpoint::Endpoint;
pub use envelope::{Envelope, CODE_OK, CODE_SESSION_EXPIRED};
pub use error::HttpError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use indicator::{ActivityCounter, ActivityIndicator};
pub use plugin::{default_plugins, IndicatorPlugin, LifecyclePlugin, RequestLogger};
