//! The page surface: where patches, busy indicators, notifications, and
//! navigation land.
//!
//! `Surface` is the seam between the dispatcher and whatever renders the
//! page. `MemoryPage` is the concrete in-memory implementation: the full
//! materialized end-state of every region, used by embedders that diff it
//! into a real view and by every test in this crate.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::patch::Patch;

/// Notification severity, mirroring the success/error toast split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyKind {
    Success,
    Error,
}

/// A transient, non-blocking notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotifyKind,
    pub title: Option<String>,
    pub text: String,
}

impl Notification {
    pub fn success(text: impl Into<String>) -> Self {
        Notification {
            kind: NotifyKind::Success,
            title: Some("Success".to_string()),
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Notification {
            kind: NotifyKind::Error,
            title: Some("Error".to_string()),
            text: text.into(),
        }
    }
}

/// Rendering seam for the dispatcher's side effects.
pub trait Surface {
    /// Apply one region patch.
    fn apply(&mut self, patch: &Patch);

    /// Set or clear a busy indicator for a region.
    fn set_busy(&mut self, region: &str, busy: bool);

    /// Show a transient notification.
    fn notify(&mut self, note: &Notification);

    /// Navigate away from the page. Anything still in flight is abandoned.
    fn navigate(&mut self, url: &str);
}

/// Materialized state of one named region.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub html: String,
    pub text: String,
    pub classes: BTreeSet<String>,
    pub visible: bool,
    pub badge: Option<i64>,
}

impl Default for Region {
    fn default() -> Self {
        Region {
            html: String::new(),
            text: String::new(),
            classes: BTreeSet::new(),
            visible: true,
            badge: None,
        }
    }
}

/// In-memory page: regions by name, active busy indicators, the notification
/// log, and the navigation target if any.
#[derive(Debug, Default)]
pub struct MemoryPage {
    regions: HashMap<String, Region>,
    busy: BTreeSet<String>,
    pub notifications: Vec<Notification>,
    pub location: Option<String>,
}

impl MemoryPage {
    pub fn new() -> Self {
        MemoryPage::default()
    }

    pub fn region(&self, name: &str) -> Option<&Region> {
        self.regions.get(name)
    }

    /// Region markup, empty string for untouched regions.
    pub fn html(&self, name: &str) -> &str {
        self.regions.get(name).map(|r| r.html.as_str()).unwrap_or("")
    }

    pub fn text(&self, name: &str) -> &str {
        self.regions.get(name).map(|r| r.text.as_str()).unwrap_or("")
    }

    pub fn is_visible(&self, name: &str) -> bool {
        self.regions.get(name).map(|r| r.visible).unwrap_or(true)
    }

    pub fn has_class(&self, name: &str, class: &str) -> bool {
        self.regions
            .get(name)
            .map(|r| r.classes.contains(class))
            .unwrap_or(false)
    }

    pub fn badge(&self, name: &str) -> Option<i64> {
        self.regions.get(name).and_then(|r| r.badge)
    }

    pub fn is_busy(&self, region: &str) -> bool {
        self.busy.contains(region)
    }

    pub fn any_busy(&self) -> bool {
        !self.busy.is_empty()
    }

    pub fn last_notification(&self) -> Option<&Notification> {
        self.notifications.last()
    }

    fn region_mut(&mut self, name: &str) -> &mut Region {
        self.regions.entry(name.to_string()).or_default()
    }
}

impl Surface for MemoryPage {
    fn apply(&mut self, patch: &Patch) {
        match patch {
            Patch::ReplaceHtml { region, html } => {
                self.region_mut(region).html = html.clone();
            }
            Patch::SetText { region, text } => {
                self.region_mut(region).text = text.clone();
            }
            Patch::Show { region } => {
                self.region_mut(region).visible = true;
            }
            Patch::Hide { region } => {
                self.region_mut(region).visible = false;
            }
            Patch::AddClass { region, class } => {
                self.region_mut(region).classes.insert(class.clone());
            }
            Patch::RemoveClass { region, class } => {
                self.region_mut(region).classes.remove(class);
            }
            Patch::SetBadge { region, count } => {
                self.region_mut(region).badge = Some(*count);
            }
        }
    }

    fn set_busy(&mut self, region: &str, busy: bool) {
        if busy {
            self.busy.insert(region.to_string());
        } else {
            self.busy.remove(region);
        }
    }

    fn notify(&mut self, note: &Notification) {
        self.notifications.push(note.clone());
    }

    fn navigate(&mut self, url: &str) {
        self.location = Some(url.to_string());
    }
}
