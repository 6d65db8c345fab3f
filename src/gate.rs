//! The confirmation gate: an optional modal step between trigger and request.
//!
//! A `ConfirmRule` decides (pure predicate over the trigger's attributes)
//! whether a dialog is needed and what it says. The page has exactly one
//! dialog surface, modeled by `GateSlot`: a single-slot resource acquired for
//! the duration of one confirm/reject cycle. The original pages silently
//! replaced an open dialog when a second trigger wanted one; `GatePolicy`
//! makes that a choice, with the stricter `Reject` as the default.

use crate::error::PagewireError;
use crate::trigger::Trigger;

type PredicateFn = Box<dyn Fn(&Trigger) -> bool + Send + Sync>;
type PromptFn = Box<dyn Fn(&Trigger) -> String + Send + Sync>;

/// Predicate plus prompt builder for one action's confirmation step.
pub struct ConfirmRule {
    predicate: PredicateFn,
    prompt: PromptFn,
}

impl ConfirmRule {
    pub fn new(
        predicate: impl Fn(&Trigger) -> bool + Send + Sync + 'static,
        prompt: impl Fn(&Trigger) -> String + Send + Sync + 'static,
    ) -> Self {
        ConfirmRule {
            predicate: Box::new(predicate),
            prompt: Box::new(prompt),
        }
    }

    /// Does this trigger need confirmation?
    pub fn applies(&self, trigger: &Trigger) -> bool {
        (self.predicate)(trigger)
    }

    pub fn prompt(&self, trigger: &Trigger) -> String {
        (self.prompt)(trigger)
    }
}

impl std::fmt::Debug for ConfirmRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfirmRule").finish_non_exhaustive()
    }
}

/// Contention policy when a gate is requested while another is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GatePolicy {
    /// Refuse the second gate; the first keeps its pending accept.
    #[default]
    Reject,
    /// Last-opened wins, dropping the earlier gate (original page behavior).
    Replace,
}

/// A confirmation awaiting the user's decision: which action to resume and
/// the trigger snapshot it was invoked with. Destroyed on accept or reject.
#[derive(Debug, Clone)]
pub struct PendingGate {
    pub action: String,
    pub trigger: Trigger,
    pub prompt: String,
}

/// The page-global dialog slot.
#[derive(Debug, Default)]
pub struct GateSlot {
    policy: GatePolicy,
    open: Option<PendingGate>,
}

impl GateSlot {
    pub fn new(policy: GatePolicy) -> Self {
        GateSlot { policy, open: None }
    }

    /// Acquire the slot for a new confirmation. Under `Replace`, the
    /// displaced gate is returned so its resources can be released.
    pub fn open(&mut self, gate: PendingGate) -> Result<Option<PendingGate>, PagewireError> {
        if self.open.is_some() && self.policy == GatePolicy::Reject {
            return Err(PagewireError::GateBusy);
        }
        let displaced = self.open.replace(gate);
        if let Some(old) = &displaced {
            tracing::debug!(action = %old.action, "confirmation gate replaced");
        }
        Ok(displaced)
    }

    /// Consume the open gate, releasing the slot.
    pub fn take(&mut self) -> Option<PendingGate> {
        self.open.take()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Prompt text of the open gate, for the embedder to render.
    pub fn prompt(&self) -> Option<&str> {
        self.open.as_ref().map(|g| g.prompt.as_str())
    }
}
