//! pagewire: a guarded action dispatcher for server-rendered pages.
//!
//! Every interactive element on a booking page runs the same pipeline: a
//! click-shaped trigger is debounced, optionally passed through a modal
//! confirmation gate, turned into exactly one HTTP request, and the server's
//! response is applied to named page regions as targeted patches, a
//! notification, or a navigation.
//!
//! The crate is headless: the page is any [`surface::Surface`]
//! implementation (the in-memory [`surface::MemoryPage`] ships with the
//! crate) and the network is any [`transport::Transport`] (real HTTP via
//! [`transport::HttpTransport`]). [`site`] carries the descriptor catalog
//! for the booking, shopping-cart, and studio-admin pages.

pub mod action;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod gate;
pub mod guard;
pub mod patch;
pub mod response;
pub mod site;
pub mod surface;
pub mod transport;
pub mod trigger;

pub use action::{ActionDescriptor, Outcome};
pub use config::{DispatcherConfig, PageState};
pub use dispatch::{Dispatcher, Handled};
pub use error::PagewireError;
pub use gate::{ConfirmRule, GatePolicy};
pub use patch::Patch;
pub use surface::{MemoryPage, Notification, NotifyKind, Surface};
pub use transport::{HttpTransport, RequestSpec, ResponseKind, Transport};
pub use trigger::Trigger;
