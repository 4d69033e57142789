#![forbid(unsafe_code)]

//! Headless storefront widgets for Vitrine.

pub mod a11y;
pub mod comparison_slider;
pub mod focus_trap;
pub mod overlay;

pub use a11y::{AccessibleNode, RangeValue, Role};
pub use comparison_slider::{
    ComparisonSlider, ComparisonSliderProps, DragPhase, ImageLayer, ImageStatus, SliderConfig,
    SliderState, SliderView, SnapBands,
};
pub use focus_trap::FocusTrap;
pub use overlay::{Overlay, OverlayAction, OverlayConfig, OverlayKind, OverlayOutcome, OverlayView};

/// A `Component` describes what it should look like right now.
///
/// Views are plain data; the host diffs and renders them. Producing a view
/// never mutates the component.
pub trait Component {
    type View;

    /// Current render description.
    fn view(&self) -> Self::View;
}
