//! Action descriptors: the static configuration bound to one class of
//! triggers.
//!
//! A descriptor packages everything that varies between call sites, from the
//! confirmation rule and request builder to the response mapping, so the
//! dispatcher can treat every action identically. Descriptors are immutable
//! after registration, and each one owns its error handler rather than
//! sharing a page-global function.

use std::time::Duration;

use crate::error::PagewireError;
use crate::gate::ConfirmRule;
use crate::patch::Patch;
use crate::response::ResponseBody;
use crate::surface::Notification;
use crate::transport::RequestSpec;
use crate::trigger::Trigger;

type RequestFn = Box<dyn Fn(&Trigger) -> Result<RequestSpec, PagewireError> + Send + Sync>;
type RegionFn = Box<dyn Fn(&Trigger) -> Option<String> + Send + Sync>;
type ResponseFn = Box<dyn Fn(&Trigger, &ResponseBody) -> Outcome + Send + Sync>;
type ErrorFn = Box<dyn Fn(&Trigger, &PagewireError) -> Option<Notification> + Send + Sync>;

/// What a response handler wants done: region patches plus an optional
/// handler-specific notification. Alert fields in the body are notified by
/// the lifecycle itself, independently of this.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    pub patches: Vec<Patch>,
    pub notification: Option<Notification>,
}

impl Outcome {
    pub fn patches(patches: Vec<Patch>) -> Self {
        Outcome {
            patches,
            notification: None,
        }
    }

    pub fn with_notification(mut self, note: Notification) -> Self {
        self.notification = Some(note);
        self
    }
}

/// Static configuration for one class of triggers.
pub struct ActionDescriptor {
    name: String,
    window: Option<Duration>,
    confirm: Option<ConfirmRule>,
    request: RequestFn,
    busy_region: Option<RegionFn>,
    pending_key: Option<RegionFn>,
    on_response: ResponseFn,
    on_error: Option<ErrorFn>,
}

impl ActionDescriptor {
    pub fn builder(name: impl Into<String>) -> ActionBuilder {
        ActionBuilder {
            name: name.into(),
            window: None,
            confirm: None,
            request: None,
            busy_region: None,
            pending_key: None,
            on_response: None,
            on_error: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Descriptor-specific debounce window; the dispatcher default applies
    /// when unset.
    pub fn window(&self) -> Option<Duration> {
        self.window
    }

    pub fn confirm(&self) -> Option<&ConfirmRule> {
        self.confirm.as_ref()
    }

    pub fn build_request(&self, trigger: &Trigger) -> Result<RequestSpec, PagewireError> {
        (self.request)(trigger)
    }

    pub fn busy_region(&self, trigger: &Trigger) -> Option<String> {
        self.busy_region.as_ref().and_then(|f| f(trigger))
    }

    pub fn pending_key(&self, trigger: &Trigger) -> Option<String> {
        self.pending_key.as_ref().and_then(|f| f(trigger))
    }

    pub fn respond(&self, trigger: &Trigger, body: &ResponseBody) -> Outcome {
        (self.on_response)(trigger, body)
    }

    /// The notification to show for a failed dispatch. Defaults to the
    /// error's own user-facing text as an error toast.
    pub fn error_notification(
        &self,
        trigger: &Trigger,
        err: &PagewireError,
    ) -> Option<Notification> {
        match &self.on_error {
            Some(f) => f(trigger, err),
            None => err.notification_text().map(Notification::error),
        }
    }
}

impl std::fmt::Debug for ActionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionDescriptor")
            .field("name", &self.name)
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}

/// Builder for `ActionDescriptor`. `request` is the only mandatory piece.
pub struct ActionBuilder {
    name: String,
    window: Option<Duration>,
    confirm: Option<ConfirmRule>,
    request: Option<RequestFn>,
    busy_region: Option<RegionFn>,
    pending_key: Option<RegionFn>,
    on_response: Option<ResponseFn>,
    on_error: Option<ErrorFn>,
}

impl ActionBuilder {
    /// Debounce window for this action's triggers.
    pub fn window_ms(mut self, millis: u64) -> Self {
        self.window = Some(Duration::from_millis(millis));
        self
    }

    pub fn confirm(mut self, rule: ConfirmRule) -> Self {
        self.confirm = Some(rule);
        self
    }

    pub fn request(
        mut self,
        f: impl Fn(&Trigger) -> Result<RequestSpec, PagewireError> + Send + Sync + 'static,
    ) -> Self {
        self.request = Some(Box::new(f));
        self
    }

    /// Busy indicator region, derived from the trigger (e.g. `loader_{id}`).
    pub fn busy(mut self, f: impl Fn(&Trigger) -> Option<String> + Send + Sync + 'static) -> Self {
        self.busy_region = Some(Box::new(f));
        self
    }

    /// Opt in to at-most-one-in-flight per entity with a pending key.
    pub fn pending_key(
        mut self,
        f: impl Fn(&Trigger) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.pending_key = Some(Box::new(f));
        self
    }

    pub fn respond(
        mut self,
        f: impl Fn(&Trigger, &ResponseBody) -> Outcome + Send + Sync + 'static,
    ) -> Self {
        self.on_response = Some(Box::new(f));
        self
    }

    pub fn on_error(
        mut self,
        f: impl Fn(&Trigger, &PagewireError) -> Option<Notification> + Send + Sync + 'static,
    ) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    pub fn build(self) -> Result<ActionDescriptor, PagewireError> {
        if self.name.is_empty() {
            return Err(PagewireError::Descriptor(
                "action name must not be empty".to_string(),
            ));
        }
        let request = self.request.ok_or_else(|| {
            PagewireError::Descriptor(format!("action '{}' has no request builder", self.name))
        })?;
        Ok(ActionDescriptor {
            name: self.name,
            window: self.window,
            confirm: self.confirm,
            request,
            busy_region: self.busy_region,
            pending_key: self.pending_key,
            on_response: self
                .on_response
                .unwrap_or_else(|| Box::new(|_, _| Outcome::default())),
            on_error: self.on_error,
        })
    }
}
