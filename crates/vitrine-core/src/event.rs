#![forbid(unsafe_code)]

//! Input events delivered by the host.
//!
//! Coordinates are client coordinates in CSS pixels. Pointer and touch
//! events carry the node they were dispatched on (`target`) so components
//! can tell a press on their own handle apart from a press elsewhere.
//! Document-level moves and releases usually have no meaningful target.

use bitflags::bitflags;

use crate::dom::NodeId;

/// A host input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Key(KeyEvent),
    Pointer(PointerEvent),
    Touch(TouchEvent),
}

/// Keyboard key identifiers that Vitrine components react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Tab,
    /// Shift+Tab as reported by hosts that fold the modifier into the key.
    BackTab,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Escape,
    Enter,
    Char(char),
}

bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
        const SUPER = 0b1000;
    }
}

/// Phase of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    #[default]
    Press,
    Repeat,
    Release,
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// A key press with no modifiers.
    #[must_use]
    pub const fn press(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
            kind: KeyEventKind::Press,
        }
    }

    /// Add modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether this is a press or auto-repeat (keydown semantics).
    #[inline]
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self.kind, KeyEventKind::Press | KeyEventKind::Repeat)
    }

    /// Whether Shift is held.
    #[inline]
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

/// Pointer (mouse or pen) phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
}

/// A pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub x: f32,
    pub y: f32,
    pub target: Option<NodeId>,
}

impl PointerEvent {
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            x,
            y,
            target: None,
        }
    }

    /// Set the dispatch target.
    #[must_use]
    pub const fn on(mut self, target: NodeId) -> Self {
        self.target = Some(target);
        self
    }
}

/// Touch phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchEventKind {
    Start,
    Move,
    End,
    Cancel,
}

/// A single active touch contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: u32,
    pub x: f32,
    pub y: f32,
}

/// A touch event. `touches` lists the contacts still on the surface,
/// in the order the platform reports them.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    pub kind: TouchEventKind,
    pub touches: Vec<TouchPoint>,
    pub target: Option<NodeId>,
}

impl TouchEvent {
    #[must_use]
    pub fn new(kind: TouchEventKind, touches: Vec<TouchPoint>) -> Self {
        Self {
            kind,
            touches,
            target: None,
        }
    }

    /// Convenience for a single-contact event.
    #[must_use]
    pub fn single(kind: TouchEventKind, x: f32, y: f32) -> Self {
        Self::new(kind, vec![TouchPoint { id: 0, x, y }])
    }

    /// Set the dispatch target.
    #[must_use]
    pub fn on(mut self, target: NodeId) -> Self {
        self.target = Some(target);
        self
    }

    /// The first active contact, if any.
    #[must_use]
    pub fn primary(&self) -> Option<&TouchPoint> {
        self.touches.first()
    }
}

/// What a component did with an event.
///
/// `prevent_default` asks the host to suppress the browser default
/// (scrolling on arrow keys, native Tab traversal, touch scrolling).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EventResponse {
    pub consumed: bool,
    pub prevent_default: bool,
}

impl EventResponse {
    /// The event was not relevant to the component.
    pub const IGNORED: Self = Self {
        consumed: false,
        prevent_default: false,
    };

    /// The event was handled; the default action may proceed.
    pub const HANDLED: Self = Self {
        consumed: true,
        prevent_default: false,
    };

    /// The event was handled and the default action must be suppressed.
    pub const PREVENT_DEFAULT: Self = Self {
        consumed: true,
        prevent_default: true,
    };

    #[inline]
    #[must_use]
    pub const fn is_ignored(self) -> bool {
        !self.consumed
    }
}
