use thiserror::Error;

use crate::response;

#[derive(Error, Debug)]
pub enum PagewireError {
    #[error("Unknown action class: {0}")]
    UnknownAction(String),

    #[error("Action class already registered: {0}")]
    DuplicateAction(String),

    #[error("Descriptor error: {0}")]
    Descriptor(String),

    #[error("Missing data attribute '{name}' on trigger element")]
    MissingAttribute { name: String },

    #[error("Invalid action URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("A confirmation dialog is already open")]
    GateBusy,

    #[error("No confirmation dialog is open")]
    GateIdle,

    #[error("Request error: {0}")]
    Request(String),

    #[error("Server returned HTTP {status}")]
    HttpStatus { status: u16, body: String },

    #[error("Malformed JSON response: {reason}")]
    MalformedResponse { reason: String, body: String },
}

impl PagewireError {
    /// The user-facing notification text for this error, if any.
    ///
    /// Follows the original failure handlers: server-provided error text is
    /// shown, everything else is absorbed silently. Programming errors
    /// (unknown action, bad descriptor) never reach a notification; they are
    /// returned to the embedder instead.
    pub fn notification_text(&self) -> Option<String> {
        match self {
            PagewireError::HttpStatus { body, .. } => response::error_text(body),
            PagewireError::MalformedResponse { body, .. } => response::error_text(body),
            _ => None,
        }
    }
}
