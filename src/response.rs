//! Server response bodies and the tolerant accessors over them.
//!
//! Every field access is optional-safe: a missing field means "no patch for
//! that region", never an error. Only a body that fails to parse as JSON
//! when JSON was declared counts as malformed.

use serde_json::Value;

use crate::error::PagewireError;
use crate::transport::ResponseKind;

/// A parsed response body, per the action's declared kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Html(String),
}

impl ResponseBody {
    pub fn parse(kind: ResponseKind, raw: &str) -> Result<Self, PagewireError> {
        match kind {
            ResponseKind::Json => {
                let value: Value =
                    serde_json::from_str(raw).map_err(|e| PagewireError::MalformedResponse {
                        reason: e.to_string(),
                        body: raw.to_string(),
                    })?;
                Ok(ResponseBody::Json(value))
            }
            ResponseKind::Html => Ok(ResponseBody::Html(raw.to_string())),
        }
    }

    /// Redirect instruction: `redirect: true` plus a `url` string.
    pub fn redirect(&self) -> Option<&str> {
        match self {
            ResponseBody::Json(v) if v.get("redirect").and_then(Value::as_bool) == Some(true) => {
                v.get("url").and_then(Value::as_str)
            }
            _ => None,
        }
    }

    /// Success alert carried alongside patches. The server uses both
    /// `alert_message` and `alert_msg` depending on the endpoint.
    pub fn alert(&self) -> Option<&str> {
        self.str_field("alert_message")
            .or_else(|| self.str_field("alert_msg"))
    }

    /// A string field of a JSON body.
    pub fn str_field(&self, name: &str) -> Option<&str> {
        match self {
            ResponseBody::Json(v) => v.get(name).and_then(Value::as_str),
            ResponseBody::Html(_) => None,
        }
    }

    /// A boolean field of a JSON body.
    pub fn bool_field(&self, name: &str) -> Option<bool> {
        match self {
            ResponseBody::Json(v) => v.get(name).and_then(Value::as_bool),
            ResponseBody::Html(_) => None,
        }
    }

    /// An integer field of a JSON body. Numeric strings coerce, matching the
    /// loosely typed counters the server sends.
    pub fn i64_field(&self, name: &str) -> Option<i64> {
        match self {
            ResponseBody::Json(v) => match v.get(name) {
                Some(Value::Number(n)) => n.as_i64(),
                Some(Value::String(s)) => s.trim().parse().ok(),
                _ => None,
            },
            ResponseBody::Html(_) => None,
        }
    }

    /// The whole body of an HTML-kind response.
    pub fn html(&self) -> Option<&str> {
        match self {
            ResponseBody::Html(s) => Some(s.as_str()),
            ResponseBody::Json(_) => None,
        }
    }
}

/// Error text of a failed response: the `responseText` field when the body
/// is JSON, otherwise the raw body when non-empty.
pub fn error_text(raw: &str) -> Option<String> {
    if let Ok(value) = serde_json::from_str::<Value>(raw) {
        if let Some(text) = value.get("responseText").and_then(Value::as_str) {
            return Some(text.to_string());
        }
    }
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
