//! Targeted updates to named page regions.
//!
//! A server response maps onto a small fixed set of patch verbs: replace a
//! region's markup, set its text, toggle visibility, toggle a CSS class, or
//! update a badge count. Patches within one response target disjoint regions
//! and carry no ordering between them.

/// One targeted mutation of a named region.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch {
    ReplaceHtml { region: String, html: String },
    SetText { region: String, text: String },
    Show { region: String },
    Hide { region: String },
    AddClass { region: String, class: String },
    RemoveClass { region: String, class: String },
    SetBadge { region: String, count: i64 },
}

impl Patch {
    pub fn replace(region: impl Into<String>, html: impl Into<String>) -> Self {
        Patch::ReplaceHtml {
            region: region.into(),
            html: html.into(),
        }
    }

    pub fn set_text(region: impl Into<String>, text: impl Into<String>) -> Self {
        Patch::SetText {
            region: region.into(),
            text: text.into(),
        }
    }

    pub fn show(region: impl Into<String>) -> Self {
        Patch::Show {
            region: region.into(),
        }
    }

    pub fn hide(region: impl Into<String>) -> Self {
        Patch::Hide {
            region: region.into(),
        }
    }

    pub fn add_class(region: impl Into<String>, class: impl Into<String>) -> Self {
        Patch::AddClass {
            region: region.into(),
            class: class.into(),
        }
    }

    pub fn remove_class(region: impl Into<String>, class: impl Into<String>) -> Self {
        Patch::RemoveClass {
            region: region.into(),
            class: class.into(),
        }
    }

    pub fn set_badge(region: impl Into<String>, count: i64) -> Self {
        Patch::SetBadge {
            region: region.into(),
            count,
        }
    }

    /// The region this patch targets.
    pub fn region(&self) -> &str {
        match self {
            Patch::ReplaceHtml { region, .. }
            | Patch::SetText { region, .. }
            | Patch::Show { region }
            | Patch::Hide { region }
            | Patch::AddClass { region, .. }
            | Patch::RemoveClass { region, .. }
            | Patch::SetBadge { region, .. } => region,
        }
    }
}
