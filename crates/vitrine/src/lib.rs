#![forbid(unsafe_code)]

//! Vitrine public facade.
//!
//! Re-exports the workspace crates and provides a [`prelude`] with the types
//! a storefront host needs, plus [`config::VitrineConfig`].

pub mod config;

pub use vitrine_catalog as catalog;
pub use vitrine_core::{
    Bounds, Document, Element, ElementKind, Event, EventResponse, FocusHost, KeyCode, KeyEvent,
    Modifiers, NodeId, PointerEvent, PointerEventKind, TouchEvent, TouchEventKind, TouchPoint,
};
pub use vitrine_runtime as runtime;
pub use vitrine_widgets as widgets;

pub use config::{ConfigError, VitrineConfig};

#[cfg(feature = "logging")]
pub use vitrine_runtime::logging::{LogFormat, init_logging};

/// Commonly used types.
pub mod prelude {
    pub use crate::config::{ConfigError, VitrineConfig};
    pub use vitrine_catalog::{
        CollectionFilter, FileStore, FilterState, KeyValueStore, LeadDraft, LeadField, LeadForm,
        MemoryStore, Product, RecentlyViewed, corporate_hampers, format_inr, search,
    };
    pub use vitrine_core::{
        Bounds, Document, Element, ElementKind, Event, EventResponse, KeyCode, KeyEvent,
        Modifiers, NodeId, PointerEvent, PointerEventKind, TouchEvent, TouchEventKind,
    };
    pub use vitrine_runtime::{MediaQuery, MotionPreference};
    pub use vitrine_widgets::{
        ComparisonSlider, ComparisonSliderProps, Component, FocusTrap, Overlay, OverlayConfig,
        OverlayKind, SliderConfig, SliderView,
    };
}
