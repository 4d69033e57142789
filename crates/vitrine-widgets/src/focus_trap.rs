#![forbid(unsafe_code)]

//! Keyboard focus containment for modal surfaces.
//!
//! While active, Tab and Shift+Tab cycle through the tabbable descendants of
//! the attached container instead of leaving it.
//!
//! # Lifecycle
//!
//! 1. **Activate**: capture the element that held focus, register a
//!    document key-down listener, schedule initial focus.
//! 2. **Tick**: the host calls [`FocusTrap::on_tick`] once the container is
//!    rendered; the [initial focus](FocusTrap::initial_focus) target receives
//!    focus, or the first tabbable descendant when none is set.
//! 3. **Tab**: the tabbable set is recomputed on every press, so elements
//!    added or disabled while open are honored.
//! 4. **Deactivate**: release the listener and, if enabled, return focus to
//!    the captured element when it is still attached.
//!
//! # Invariants
//!
//! 1. While active with a non-empty tabbable set, Tab at the last element and
//!    Shift+Tab at the first wrap inside the container.
//! 2. Presses between the edges are left to native traversal.
//!    Focus sitting entirely outside the container is the exception: Tab
//!    pulls it in at the first element, Shift+Tab at the last.
//! 3. The captured element is cleared at deactivation whether or not it was
//!    restored.
//!
//! # Failure Modes
//!
//! | Failure | Behavior |
//! |---------|----------|
//! | No tabbable descendants | No initial focus, Tab ignored |
//! | Captured element removed | Restoration skipped |
//! | No container attached | Trap registers but never moves focus |
//!
//! Only one trap should be active at a time; nested traps are not
//! coordinated.

use vitrine_core::{
    EventResponse, EventType, FocusHost, KeyCode, KeyEvent, ListenerGuard, ListenerOptions, NodeId,
};

const OWNER: &str = "FocusTrap";

/// Confines Tab navigation to a container while active.
#[derive(Debug)]
pub struct FocusTrap {
    container: Option<NodeId>,
    active: bool,
    restore_focus: bool,
    previously_focused: Option<NodeId>,
    initial_focus: Option<NodeId>,
    pending_autofocus: bool,
    key_listener: Option<ListenerGuard>,
}

impl Default for FocusTrap {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusTrap {
    /// An inactive trap with no container that restores focus on release.
    #[must_use]
    pub fn new() -> Self {
        Self {
            container: None,
            active: false,
            restore_focus: true,
            previously_focused: None,
            initial_focus: None,
            pending_autofocus: false,
            key_listener: None,
        }
    }

    /// Whether focus returns to the previously focused element on
    /// deactivation.
    #[must_use]
    pub fn restore_focus(mut self, restore: bool) -> Self {
        self.restore_focus = restore;
        self
    }

    /// Element to focus on the first tick after activation instead of the
    /// first tabbable descendant. Ignored unless it is tabbable inside the
    /// container at that moment.
    #[must_use]
    pub fn initial_focus(mut self, node: Option<NodeId>) -> Self {
        self.initial_focus = node;
        self
    }

    /// Bind the trap to its container element.
    pub fn attach(&mut self, container: NodeId) {
        self.container = Some(container);
    }

    #[inline]
    #[must_use]
    pub fn container(&self) -> Option<NodeId> {
        self.container
    }

    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The element captured at activation, while active.
    #[inline]
    #[must_use]
    pub fn previously_focused(&self) -> Option<NodeId> {
        self.previously_focused
    }

    /// Activate or deactivate. Repeating the current state does nothing.
    pub fn set_active<H: FocusHost + ?Sized>(&mut self, host: &mut H, active: bool) {
        if self.active == active {
            return;
        }
        if active {
            self.activate(host);
        } else {
            self.deactivate(host);
        }
    }

    fn activate<H: FocusHost + ?Sized>(&mut self, host: &mut H) {
        self.previously_focused = host.active_element();
        self.key_listener = Some(host.listeners().register(
            EventType::KeyDown,
            ListenerOptions::ACTIVE,
            OWNER,
        ));
        self.pending_autofocus = true;
        self.active = true;
        tracing::debug!(
            container = ?self.container,
            previously_focused = ?self.previously_focused,
            "focus trap activated"
        );
    }

    fn deactivate<H: FocusHost + ?Sized>(&mut self, host: &mut H) {
        self.active = false;
        self.pending_autofocus = false;
        self.key_listener = None;
        let captured = self.previously_focused.take();
        match captured {
            Some(prev) if self.restore_focus && host.is_attached(prev) => {
                host.focus(prev);
                tracing::debug!(restored = ?prev, "focus trap released");
            }
            Some(prev) if self.restore_focus => {
                tracing::debug!(?prev, "previously focused element detached; not restoring");
            }
            _ => tracing::debug!("focus trap released"),
        }
    }

    /// Apply the deferred initial focus. Call once per host tick; only the
    /// first tick after activation has an effect.
    pub fn on_tick<H: FocusHost + ?Sized>(&mut self, host: &mut H) {
        if !std::mem::take(&mut self.pending_autofocus) || !self.active {
            return;
        }
        let Some(container) = self.container else {
            return;
        };
        let order = host.focusable_descendants(container);
        let preferred = self.initial_focus.filter(|node| order.contains(node));
        match preferred.or_else(|| order.first().copied()) {
            Some(target) => {
                host.focus(target);
            }
            None => tracing::debug!(?container, "focus trap has no tabbable elements"),
        }
    }

    /// Handle a key-down while active.
    ///
    /// Returns [`EventResponse::PREVENT_DEFAULT`] when the trap moved focus,
    /// [`EventResponse::IGNORED`] when native traversal should proceed.
    pub fn handle_key<H: FocusHost + ?Sized>(&mut self, host: &mut H, key: &KeyEvent) -> EventResponse {
        if !self.active || !key.is_down() {
            return EventResponse::IGNORED;
        }
        let reverse = match key.code {
            KeyCode::Tab => key.shift(),
            KeyCode::BackTab => true,
            _ => return EventResponse::IGNORED,
        };
        let Some(container) = self.container else {
            return EventResponse::IGNORED;
        };

        let order = host.focusable_descendants(container);
        let (Some(&first), Some(&last)) = (order.first(), order.last()) else {
            tracing::debug!(?container, "focus trap has no tabbable elements");
            return EventResponse::IGNORED;
        };
        let current = host
            .active_element()
            .and_then(|a| order.iter().position(|&n| n == a));

        let target = match (current, reverse) {
            // Focus escaped the container; native traversal would not bring it back.
            (None, false) => first,
            (None, true) => last,
            (Some(0), true) => last,
            (Some(i), false) if i + 1 == order.len() => first,
            _ => return EventResponse::IGNORED,
        };
        host.focus(target);
        EventResponse::PREVENT_DEFAULT
    }
}
