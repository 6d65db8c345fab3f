//! Page-level state and dispatcher configuration.

use std::time::Duration;

use url::Url;

use crate::error::PagewireError;
use crate::gate::GatePolicy;

/// Process-wide page state: the server origin and the CSRF token.
///
/// Mirrors `window.CSRF_TOKEN` in the original pages: set once at page load,
/// read-only thereafter. The dispatcher reads the token at request time and
/// appends it to every payload.
#[derive(Debug, Clone)]
pub struct PageState {
    base: Url,
    csrf_token: String,
}

impl PageState {
    pub fn new(base: &str, csrf_token: impl Into<String>) -> Result<Self, PagewireError> {
        let base = Url::parse(base).map_err(|e| PagewireError::InvalidUrl {
            url: base.to_string(),
            reason: e.to_string(),
        })?;
        Ok(PageState {
            base,
            csrf_token: csrf_token.into(),
        })
    }

    pub fn csrf_token(&self) -> &str {
        &self.csrf_token
    }

    /// Resolve an action's path against the page origin.
    pub fn resolve(&self, path: &str) -> Result<String, PagewireError> {
        let url = self.base.join(path).map_err(|e| PagewireError::InvalidUrl {
            url: path.to_string(),
            reason: e.to_string(),
        })?;
        Ok(url.into())
    }
}

/// Dispatcher-wide knobs. `Default` matches the original pages: 500 ms
/// debounce windows and a 30 s transport timeout.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// What happens when a trigger wants the confirmation dialog while
    /// another gate is already open.
    pub gate_policy: GatePolicy,
    /// Debounce window used by descriptors that do not set their own.
    pub default_window: Duration,
    /// Transport-level request timeout.
    pub request_timeout: Duration,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        DispatcherConfig {
            gate_policy: GatePolicy::Reject,
            default_window: Duration::from_millis(500),
            request_timeout: Duration::from_secs(30),
        }
    }
}
