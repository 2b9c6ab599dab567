//! Endpoint descriptors.
//!
//! An [`Endpoint`] identifies one logical request: path, method, and
//! parameter set. Descriptors are constructed per call and never mutated
//! after building; application code typically wraps them in small
//! constructor functions per API.

use crate::http::HttpMethod;

/// Immutable description of a logical request.
#[derive(Debug, Clone)]
pub struct Endpoint {
    path: String,
    method: HttpMethod,
    params: Vec<(String, String)>,
    sample_body: Option<String>,
}

impl Endpoint {
    pub fn new(path: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            path: path.into(),
            method,
            params: Vec::new(),
            sample_body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(path, HttpMethod::Get)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(path, HttpMethod::Post)
    }

    /// Append one request parameter. Order is preserved into the query
    /// string or form body.
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Append a parameter only when the value is present. `None` values are
    /// dropped entirely rather than encoded as empty strings.
    pub fn optional_param(self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Canned response body used when the dispatcher runs with
    /// `StubBehavior::Immediate`.
    pub fn sample_body(mut self, body: impl Into<String>) -> Self {
        self.sample_body = Some(body.into());
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn sample(&self) -> Option<&str> {
        self.sample_body.as_deref()
    }
}
