#![forbid(unsafe_code)]

//! Document-level listener registry.
//!
//! Components that need document-wide input while an interaction is in
//! progress (a drag, an open modal) register listeners here. Registration
//! returns a [`ListenerGuard`]; dropping the guard unregisters the listener,
//! so every exit path (release, unmount, mode switch) detaches it.
//!
//! The host consults the registry to decide which document-level events to
//! forward, and with which options (a non-passive touch-move listener is
//! allowed to cancel scrolling).
//!
//! # Invariants
//!
//! 1. Each guard owns exactly one registration.
//! 2. Dropping a guard removes its registration before any later query.
//! 3. Registrations are reported in registration order.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Document-level event types that components listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    KeyDown,
    PointerMove,
    PointerUp,
    TouchMove,
    TouchEnd,
    TouchCancel,
}

/// Options supplied at registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerOptions {
    /// A passive listener promises never to prevent the default action.
    pub passive: bool,
}

impl ListenerOptions {
    pub const PASSIVE: Self = Self { passive: true };
    pub const ACTIVE: Self = Self { passive: false };
}

impl Default for ListenerOptions {
    fn default() -> Self {
        Self::PASSIVE
    }
}

/// A registration as seen by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub id: u64,
    pub event_type: EventType,
    pub options: ListenerOptions,
    /// Name of the component that registered the listener.
    pub owner: &'static str,
}

#[derive(Debug, Default)]
struct RegistryInner {
    next_id: u64,
    entries: Vec<Registration>,
}

/// Shared registry of document-level listeners.
///
/// Cloning yields another handle to the same registry.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("entries", &self.inner.borrow().entries)
            .finish()
    }
}

impl ListenerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. The registration lives as long as the guard.
    #[must_use = "dropping the guard unregisters the listener immediately"]
    pub fn register(
        &self,
        event_type: EventType,
        options: ListenerOptions,
        owner: &'static str,
    ) -> ListenerGuard {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.entries.push(Registration {
            id,
            event_type,
            options,
            owner,
        });
        #[cfg(feature = "tracing")]
        tracing::trace!(id, ?event_type, owner, passive = options.passive, "listener registered");
        ListenerGuard {
            registry: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Whether any listener for `event_type` is registered.
    #[must_use]
    pub fn is_listening(&self, event_type: EventType) -> bool {
        self.inner
            .borrow()
            .entries
            .iter()
            .any(|e| e.event_type == event_type)
    }

    /// Whether the host may honor `prevent_default` for `event_type`.
    ///
    /// True when at least one registered listener is non-passive.
    #[must_use]
    pub fn can_prevent_default(&self, event_type: EventType) -> bool {
        self.inner
            .borrow()
            .entries
            .iter()
            .any(|e| e.event_type == event_type && !e.options.passive)
    }

    /// Number of registrations for `event_type`.
    #[must_use]
    pub fn count(&self, event_type: EventType) -> usize {
        self.inner
            .borrow()
            .entries
            .iter()
            .filter(|e| e.event_type == event_type)
            .count()
    }

    /// Total number of registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }

    /// Snapshot of all registrations, in registration order.
    #[must_use]
    pub fn registrations(&self) -> Vec<Registration> {
        self.inner.borrow().entries.clone()
    }
}

/// RAII guard for a listener registration.
#[must_use = "dropping the guard unregisters the listener immediately"]
pub struct ListenerGuard {
    registry: std::rc::Weak<RefCell<RegistryInner>>,
    id: u64,
}

impl ListenerGuard {
    /// Registration id.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard").field("id", &self.id).finish()
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        // Registry already gone: nothing left to clean.
        let Some(inner) = self.registry.upgrade() else {
            return;
        };
        let mut inner = inner.borrow_mut();
        inner.entries.retain(|e| e.id != self.id);
        #[cfg(feature = "tracing")]
        tracing::trace!(id = self.id, "listener unregistered");
    }
}
