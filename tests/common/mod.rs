//! Shared test doubles: a scripted transport and an event-logging surface.

// Each integration test binary compiles its own copy; not every binary uses
// every helper.
#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};

use pagewire::error::PagewireError;
use pagewire::patch::Patch;
use pagewire::surface::{Notification, Surface};
use pagewire::transport::{RequestSpec, Transport, TransportResponse};

static TRACING: Once = Once::new();

/// Route dispatcher logs to stderr, filtered by `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// One scripted reply.
pub enum Reply {
    Status(u16, &'static str),
    NetworkError(&'static str),
}

impl Reply {
    fn materialize(&self) -> Result<TransportResponse, PagewireError> {
        match self {
            Reply::Status(status, body) => Ok(TransportResponse {
                status: *status,
                body: body.to_string(),
            }),
            Reply::NetworkError(reason) => Err(PagewireError::Request(reason.to_string())),
        }
    }
}

/// Transport that replays a script of replies (the last one repeats) and
/// records every request it was asked to send.
pub struct ScriptedTransport {
    script: Vec<Reply>,
    cursor: Mutex<usize>,
    pub sent: Mutex<Vec<RequestSpec>>,
}

impl ScriptedTransport {
    pub fn sequence(script: Vec<Reply>) -> Arc<Self> {
        assert!(!script.is_empty(), "script must have at least one reply");
        Arc::new(ScriptedTransport {
            script,
            cursor: Mutex::new(0),
            sent: Mutex::new(Vec::new()),
        })
    }

    /// Always answer 200 with this body.
    pub fn ok(body: &'static str) -> Arc<Self> {
        Self::sequence(vec![Reply::Status(200, body)])
    }

    pub fn status(status: u16, body: &'static str) -> Arc<Self> {
        Self::sequence(vec![Reply::Status(status, body)])
    }

    pub fn network_error(reason: &'static str) -> Arc<Self> {
        Self::sequence(vec![Reply::NetworkError(reason)])
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, spec: &RequestSpec) -> Result<TransportResponse, PagewireError> {
        self.sent.lock().unwrap().push(spec.clone());
        let mut cursor = self.cursor.lock().unwrap();
        let reply = &self.script[(*cursor).min(self.script.len() - 1)];
        *cursor += 1;
        reply.materialize()
    }
}

/// Everything a dispatch did to the surface, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Busy(String, bool),
    Patched(Patch),
    Notified(Notification),
    Navigated(String),
}

/// Surface that records the exact side-effect sequence.
#[derive(Debug, Default)]
pub struct EventLog {
    pub events: Vec<SurfaceEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        EventLog::default()
    }

    pub fn position(&self, pred: impl Fn(&SurfaceEvent) -> bool) -> Option<usize> {
        self.events.iter().position(pred)
    }
}

impl Surface for EventLog {
    fn apply(&mut self, patch: &Patch) {
        self.events.push(SurfaceEvent::Patched(patch.clone()));
    }

    fn set_busy(&mut self, region: &str, busy: bool) {
        self.events.push(SurfaceEvent::Busy(region.to_string(), busy));
    }

    fn notify(&mut self, note: &Notification) {
        self.events.push(SurfaceEvent::Notified(note.clone()));
    }

    fn navigate(&mut self, url: &str) {
        self.events.push(SurfaceEvent::Navigated(url.to_string()));
    }
}
