//! The HTTP seam.
//!
//! `Transport` abstracts the one network call an action makes, so the
//! dispatcher can run against the real blocking client or a scripted fake.
//! One request, one response, no retries; a navigation away from the page is
//! the only way an in-flight request is abandoned.

pub mod http;

use crate::error::PagewireError;

pub use http::HttpTransport;

/// HTTP method for an action. Almost everything posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// What the action expects back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Json,
    Html,
}

/// One fully specified request: method, endpoint path, form payload, and the
/// declared response kind. The dispatcher resolves the path against the page
/// origin and appends the CSRF token before sending.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub method: Method,
    pub url: String,
    pub form: Vec<(String, String)>,
    pub response_kind: ResponseKind,
}

impl RequestSpec {
    pub fn post(url: impl Into<String>) -> Self {
        RequestSpec {
            method: Method::Post,
            url: url.into(),
            form: Vec::new(),
            response_kind: ResponseKind::Json,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        RequestSpec {
            method: Method::Get,
            url: url.into(),
            form: Vec::new(),
            response_kind: ResponseKind::Json,
        }
    }

    /// Add a form field (builder style).
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.push((name.into(), value.into()));
        self
    }

    /// Add a form field only when the value is present.
    pub fn field_opt(self, name: impl Into<String>, value: Option<String>) -> Self {
        match value {
            Some(v) => self.field(name, v),
            None => self,
        }
    }

    /// Declare the body an HTML fragment instead of JSON.
    pub fn html_response(mut self) -> Self {
        self.response_kind = ResponseKind::Html;
        self
    }
}

/// Raw result of a transport call, before body parsing.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One-shot request execution.
pub trait Transport: Send + Sync {
    fn send(&self, spec: &RequestSpec) -> Result<TransportResponse, PagewireError>;
}

/// Shared transports are transports, so callers can keep a handle to one
/// they hand to a dispatcher.
impl<T: Transport> Transport for std::sync::Arc<T> {
    fn send(&self, spec: &RequestSpec) -> Result<TransportResponse, PagewireError> {
        (**self).send(spec)
    }
}
