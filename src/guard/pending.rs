//! At-most-one-in-flight bookkeeping, keyed by the acted-upon entity.
//!
//! The debounce guard only limits rate; with a slow server a second click
//! after the window could still race a request that is still outstanding.
//! Actions that act on a single entity opt in by supplying a pending key,
//! and the dispatcher refuses a new dispatch for a key that is still
//! in flight. Client-side courtesy only: the server remains responsible for
//! idempotency.

use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct PendingSet {
    in_flight: HashSet<String>,
}

impl PendingSet {
    pub fn new() -> Self {
        PendingSet::default()
    }

    /// Claim a key. Returns false when a dispatch for it is outstanding.
    pub fn begin(&mut self, key: &str) -> bool {
        self.in_flight.insert(key.to_string())
    }

    /// Release a key once its request has completed (any outcome).
    pub fn finish(&mut self, key: &str) {
        self.in_flight.remove(key);
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.in_flight.contains(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_begin_for_same_key_is_refused() {
        let mut pending = PendingSet::new();
        assert!(pending.begin("event_12"));
        assert!(!pending.begin("event_12"));
        assert!(pending.is_pending("event_12"));
    }

    #[test]
    fn distinct_keys_do_not_contend() {
        let mut pending = PendingSet::new();
        assert!(pending.begin("event_12"));
        assert!(pending.begin("event_13"));
    }

    #[test]
    fn finish_releases_the_key() {
        let mut pending = PendingSet::new();
        assert!(pending.begin("event_12"));
        pending.finish("event_12");
        assert!(!pending.is_pending("event_12"));
        assert!(pending.begin("event_12"));
    }
}
