#![forbid(unsafe_code)]

//! Accessibility descriptions attached to widget views.

/// ARIA role of a rendered node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Slider,
    Button,
    Dialog,
}

/// Range semantics for `slider`-like roles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeValue {
    pub min: f32,
    pub max: f32,
    pub now: f32,
}

/// What assistive technology should announce for a node.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessibleNode {
    pub role: Role,
    pub label: String,
    pub value: Option<RangeValue>,
    /// Tab index exposed to the host; `None` means not in the tab order.
    pub tab_index: Option<i32>,
    /// `aria-modal` for dialogs.
    pub modal: bool,
}

impl AccessibleNode {
    /// A node with a role and label and nothing else.
    #[must_use]
    pub fn new(role: Role, label: impl Into<String>) -> Self {
        Self {
            role,
            label: label.into(),
            value: None,
            tab_index: None,
            modal: false,
        }
    }

    /// A focusable slider.
    #[must_use]
    pub fn slider(label: impl Into<String>, min: f32, max: f32, now: f32) -> Self {
        Self {
            value: Some(RangeValue { min, max, now }),
            tab_index: Some(0),
            ..Self::new(Role::Slider, label)
        }
    }

    /// A native button.
    #[must_use]
    pub fn button(label: impl Into<String>) -> Self {
        Self::new(Role::Button, label)
    }

    /// A modal dialog.
    #[must_use]
    pub fn dialog(label: impl Into<String>) -> Self {
        Self {
            modal: true,
            ..Self::new(Role::Dialog, label)
        }
    }
}
