//! Guards that decide whether a trigger is allowed to start a request:
//! a leading-edge debounce against accidental double-clicks, and a pending
//! set enforcing at most one in-flight request per entity.

pub mod debounce;
pub mod pending;

pub use debounce::DebounceGuard;
pub use pending::PendingSet;
