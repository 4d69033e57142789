#![forbid(unsafe_code)]

//! Core types for Vitrine: input events, geometry, and the host document.
//!
//! Vitrine components are headless. The host owns event delivery and the
//! document; components receive [`event::Event`]s, mutate focus and listener
//! state through [`dom::FocusHost`], and return an [`event::EventResponse`]
//! telling the host whether to suppress the default action.

pub mod dom;
pub mod event;
pub mod geometry;
pub mod listener;

pub use dom::{Document, Element, ElementKind, FocusHost, NodeId};
pub use event::{
    Event, EventResponse, KeyCode, KeyEvent, KeyEventKind, Modifiers, PointerEvent,
    PointerEventKind, TouchEvent, TouchEventKind, TouchPoint,
};
pub use geometry::Bounds;
pub use listener::{EventType, ListenerGuard, ListenerOptions, ListenerRegistry};
