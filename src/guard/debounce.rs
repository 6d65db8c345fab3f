//! Leading-edge debounce for repeated triggers.
//!
//! The first call in a burst executes; every further call inside the window
//! is dropped; once the window has elapsed the next call starts a new burst.
//! This is a rate limit against one user mashing a button, nothing more: it
//! does not protect against other tabs or devices, and the server must still
//! enforce idempotency for anything it guards.

use std::time::{Duration, Instant};

/// Per-action debounce state. Pure timing logic, no I/O.
#[derive(Debug, Clone)]
pub struct DebounceGuard {
    window: Duration,
    last_accepted: Option<Instant>,
}

impl DebounceGuard {
    pub fn new(window: Duration) -> Self {
        DebounceGuard {
            window,
            last_accepted: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record a firing attempt now. Returns true when the attempt should
    /// execute, false when it falls inside the suppression window.
    pub fn fire(&mut self) -> bool {
        self.fire_at(Instant::now())
    }

    /// Clock-injected core of `fire`, used directly by tests.
    pub fn fire_at(&mut self, now: Instant) -> bool {
        match self.last_accepted {
            Some(last) if now.duration_since(last) < self.window => false,
            _ => {
                self.last_accepted = Some(now);
                true
            }
        }
    }
}
