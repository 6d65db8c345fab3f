//! The guarded action dispatcher.
//!
//! One pipeline for every registered action: debounce the trigger, pass it
//! through the confirmation gate when the action's rule asks for one, issue
//! exactly one request, and translate the response into region patches,
//! notifications, or a navigation. The busy indicator brackets the request
//! on every path, success or failure, so the page never looks stuck.

use std::collections::HashMap;

use crate::action::ActionDescriptor;
use crate::config::{DispatcherConfig, PageState};
use crate::error::PagewireError;
use crate::gate::{GateSlot, PendingGate};
use crate::guard::{DebounceGuard, PendingSet};
use crate::response::ResponseBody;
use crate::surface::{Notification, Surface};
use crate::transport::{HttpTransport, RequestSpec, Transport};
use crate::trigger::Trigger;

/// How a trigger was resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum Handled {
    /// Request ran and the response was applied to the surface.
    Completed,
    /// Server asked for a navigation; no patches were applied.
    Redirected(String),
    /// Dropped inside the debounce window.
    Debounced,
    /// A request for the same entity is still in flight.
    AlreadyPending,
    /// A confirmation dialog is open with this prompt; the dispatch resumes
    /// via `accept` or is dropped via `reject`.
    AwaitingConfirmation(String),
    /// Request failed; the error was surfaced as a notification (or
    /// absorbed silently when the server offered no text).
    Failed,
}

struct Registered {
    descriptor: ActionDescriptor,
    debounce: DebounceGuard,
}

/// Registry plus the page-global resources actions contend for: the single
/// confirmation gate, the pending set, and the CSRF-bearing page state.
pub struct Dispatcher {
    actions: HashMap<String, Registered>,
    gate: GateSlot,
    pending: PendingSet,
    page: PageState,
    transport: Box<dyn Transport>,
    config: DispatcherConfig,
}

impl Dispatcher {
    pub fn new(page: PageState, transport: Box<dyn Transport>) -> Self {
        Self::with_config(page, transport, DispatcherConfig::default())
    }

    /// Dispatcher over the real HTTP transport, with the configured
    /// request timeout.
    pub fn over_http(page: PageState, config: DispatcherConfig) -> Result<Self, PagewireError> {
        let transport = HttpTransport::new(config.request_timeout)?;
        Ok(Self::with_config(page, Box::new(transport), config))
    }

    pub fn with_config(
        page: PageState,
        transport: Box<dyn Transport>,
        config: DispatcherConfig,
    ) -> Self {
        Dispatcher {
            actions: HashMap::new(),
            gate: GateSlot::new(config.gate_policy),
            pending: PendingSet::new(),
            page,
            transport,
            config,
        }
    }

    /// Bind a descriptor to a trigger class. Registering the same class
    /// twice would process every click twice, so it is refused.
    pub fn register(
        &mut self,
        class: impl Into<String>,
        descriptor: ActionDescriptor,
    ) -> Result<(), PagewireError> {
        let class = class.into();
        if self.actions.contains_key(&class) {
            return Err(PagewireError::DuplicateAction(class));
        }
        let window = descriptor.window().unwrap_or(self.config.default_window);
        tracing::debug!(class = %class, action = descriptor.name(), ?window, "action registered");
        self.actions.insert(
            class,
            Registered {
                descriptor,
                debounce: DebounceGuard::new(window),
            },
        );
        Ok(())
    }

    /// Entry point for one trigger on a registered class.
    pub fn handle(
        &mut self,
        class: &str,
        trigger: Trigger,
        surface: &mut dyn Surface,
    ) -> Result<Handled, PagewireError> {
        let fired = {
            let reg = self
                .actions
                .get_mut(class)
                .ok_or_else(|| PagewireError::UnknownAction(class.to_string()))?;
            reg.debounce.fire()
        };
        if !fired {
            tracing::debug!(class, "trigger debounced");
            return Ok(Handled::Debounced);
        }

        let (prompt, key) = {
            let reg = self.actions.get(class).expect("checked above");
            let prompt = reg
                .descriptor
                .confirm()
                .filter(|rule| rule.applies(&trigger))
                .map(|rule| rule.prompt(&trigger));
            (prompt, reg.descriptor.pending_key(&trigger))
        };

        if let Some(prompt) = prompt {
            // Claim the entity for the whole confirm cycle: another button
            // acting on the same entity is refused while the dialog thinks.
            let displaced = self.gate.open(PendingGate {
                action: class.to_string(),
                trigger,
                prompt: prompt.clone(),
            })?;
            if let Some(old) = displaced {
                self.release_gate_claim(&old);
            }
            if let Some(key) = &key {
                if !self.pending.begin(key) {
                    // Same entity already claimed elsewhere; drop this gate.
                    self.gate.take();
                    tracing::debug!(class, key = %key, "gate refused, entity already pending");
                    return Ok(Handled::AlreadyPending);
                }
            }
            tracing::debug!(class, "confirmation gate opened");
            return Ok(Handled::AwaitingConfirmation(prompt));
        }

        self.execute(class, &trigger, surface, false)
    }

    /// Resolve the open gate in the affirmative and run the held dispatch.
    pub fn accept(&mut self, surface: &mut dyn Surface) -> Result<Handled, PagewireError> {
        let gate = self.gate.take().ok_or(PagewireError::GateIdle)?;
        tracing::debug!(class = %gate.action, "confirmation accepted");
        self.execute(&gate.action, &gate.trigger, surface, true)
    }

    /// Resolve the open gate in the negative. No request, no error surfaced.
    pub fn reject(&mut self) -> Result<(), PagewireError> {
        let gate = self.gate.take().ok_or(PagewireError::GateIdle)?;
        tracing::debug!(class = %gate.action, "confirmation rejected");
        self.release_gate_claim(&gate);
        Ok(())
    }

    /// Release the pending key held on behalf of a gate that will never run.
    fn release_gate_claim(&mut self, gate: &PendingGate) {
        let key = self
            .actions
            .get(&gate.action)
            .and_then(|reg| reg.descriptor.pending_key(&gate.trigger));
        if let Some(key) = key {
            self.pending.finish(&key);
        }
    }

    /// Prompt of the currently open gate, if any.
    pub fn gate_prompt(&self) -> Option<&str> {
        self.gate.prompt()
    }

    /// The before → send → apply → complete sequence. The busy indicator is
    /// active exactly between before-send and complete, and the pending key
    /// is released on every path.
    fn execute(
        &mut self,
        class: &str,
        trigger: &Trigger,
        surface: &mut dyn Surface,
        claimed_at_gate: bool,
    ) -> Result<Handled, PagewireError> {
        let (spec, busy, key) = {
            let reg = self
                .actions
                .get(class)
                .ok_or_else(|| PagewireError::UnknownAction(class.to_string()))?;
            (
                reg.descriptor.build_request(trigger),
                reg.descriptor.busy_region(trigger),
                reg.descriptor.pending_key(trigger),
            )
        };

        let claimed = match &key {
            Some(key) if claimed_at_gate => {
                debug_assert!(self.pending.is_pending(key));
                true
            }
            Some(key) => {
                if !self.pending.begin(key) {
                    tracing::debug!(class, key = %key, "dispatch refused, request already in flight");
                    return Ok(Handled::AlreadyPending);
                }
                true
            }
            None => false,
        };

        let spec = match spec.and_then(|spec| self.finalize(spec)) {
            Ok(spec) => spec,
            Err(err) => {
                if claimed {
                    self.pending.finish(key.as_deref().expect("claimed implies key"));
                }
                return Err(err);
            }
        };

        if let Some(region) = &busy {
            surface.set_busy(region, true);
        }

        let handled = self.send_and_apply(class, trigger, &spec, surface);

        if let Some(region) = &busy {
            surface.set_busy(region, false);
        }
        if claimed {
            self.pending.finish(key.as_deref().expect("claimed implies key"));
        }

        Ok(handled)
    }

    /// Resolve the endpoint against the page origin and append the CSRF
    /// token, read from page state at request time.
    fn finalize(&self, mut spec: RequestSpec) -> Result<RequestSpec, PagewireError> {
        spec.url = self.page.resolve(&spec.url)?;
        spec.form.push((
            "csrfmiddlewaretoken".to_string(),
            self.page.csrf_token().to_string(),
        ));
        Ok(spec)
    }

    fn send_and_apply(
        &self,
        class: &str,
        trigger: &Trigger,
        spec: &RequestSpec,
        surface: &mut dyn Surface,
    ) -> Handled {
        tracing::debug!(class, url = %spec.url, "sending request");

        let response = match self.transport.send(spec) {
            Ok(response) => response,
            Err(err) => {
                self.report_failure(class, trigger, &err, surface);
                return Handled::Failed;
            }
        };

        if !response.is_success() {
            let err = PagewireError::HttpStatus {
                status: response.status,
                body: response.body,
            };
            self.report_failure(class, trigger, &err, surface);
            return Handled::Failed;
        }

        let body = match ResponseBody::parse(spec.response_kind, &response.body) {
            Ok(body) => body,
            Err(err) => {
                self.report_failure(class, trigger, &err, surface);
                return Handled::Failed;
            }
        };

        // Alert fields notify independently of patching, redirect included.
        if let Some(alert) = body.alert() {
            surface.notify(&Notification::success(alert));
        }

        // A redirect instruction suppresses all patching.
        if let Some(url) = body.redirect() {
            tracing::debug!(class, url, "server requested navigation");
            surface.navigate(url);
            return Handled::Redirected(url.to_string());
        }

        let reg = self.actions.get(class).expect("registered");
        let outcome = reg.descriptor.respond(trigger, &body);
        for patch in &outcome.patches {
            surface.apply(patch);
        }
        if let Some(note) = &outcome.notification {
            surface.notify(note);
        }

        tracing::debug!(class, patches = outcome.patches.len(), "response applied");
        Handled::Completed
    }

    fn report_failure(
        &self,
        class: &str,
        trigger: &Trigger,
        err: &PagewireError,
        surface: &mut dyn Surface,
    ) {
        tracing::warn!(class, error = %err, "request failed");
        let reg = self.actions.get(class).expect("registered");
        if let Some(note) = reg.descriptor.error_notification(trigger, err) {
            surface.notify(&note);
        }
    }
}
