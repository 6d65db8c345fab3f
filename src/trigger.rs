//! Trigger snapshots: the data carried by a click.
//!
//! The original handlers read `data-*` attributes off the clicked element via
//! an implicit `this` binding. Here the embedder captures those attributes
//! into a `Trigger` and passes it explicitly, so handlers never depend on a
//! receiver that outlives the click.

use std::collections::HashMap;

use crate::error::PagewireError;

/// A single data-attribute value: id, flag, or free text.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Int(i64),
    Flag(bool),
    Text(String),
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Flag(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Text(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Text(v)
    }
}

/// Snapshot of one user interaction: the source element's identity and its
/// data attributes, read at trigger time and consumed synchronously.
#[derive(Debug, Clone, Default)]
pub struct Trigger {
    source: String,
    attrs: HashMap<String, AttrValue>,
}

impl Trigger {
    pub fn new(source: impl Into<String>) -> Self {
        Trigger {
            source: source.into(),
            attrs: HashMap::new(),
        }
    }

    /// Add a data attribute (builder style).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Identity of the element that fired this trigger.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// An integer id attribute. Numeric text coerces, matching how `data-*`
    /// values arrive as strings in markup.
    pub fn id(&self, name: &str) -> Option<i64> {
        match self.attrs.get(name) {
            Some(AttrValue::Int(v)) => Some(*v),
            Some(AttrValue::Text(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// An id attribute the request cannot be built without.
    pub fn require_id(&self, name: &str) -> Result<i64, PagewireError> {
        self.id(name).ok_or_else(|| PagewireError::MissingAttribute {
            name: name.to_string(),
        })
    }

    /// A boolean flag attribute. Absent means false.
    pub fn flag(&self, name: &str) -> bool {
        match self.attrs.get(name) {
            Some(AttrValue::Flag(v)) => *v,
            Some(AttrValue::Int(v)) => *v != 0,
            Some(AttrValue::Text(s)) => s.eq_ignore_ascii_case("true"),
            None => false,
        }
    }

    /// A text attribute the request cannot be built without.
    pub fn require_text(&self, name: &str) -> Result<&str, PagewireError> {
        self.text(name).ok_or_else(|| PagewireError::MissingAttribute {
            name: name.to_string(),
        })
    }

    /// A free-text attribute.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.attrs.get(name) {
            Some(AttrValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// String form of any attribute, for request payloads.
    pub fn value_string(&self, name: &str) -> Option<String> {
        match self.attrs.get(name) {
            Some(AttrValue::Int(v)) => Some(v.to_string()),
            Some(AttrValue::Flag(v)) => Some(v.to_string()),
            Some(AttrValue::Text(s)) => Some(s.clone()),
            None => None,
        }
    }
}
