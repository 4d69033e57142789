#![forbid(unsafe_code)]

//! Render descriptions produced by [`ComparisonSlider::view`].
//!
//! The host maps these onto its own elements. Nothing here holds state.
//!
//! [`ComparisonSlider::view`]: super::ComparisonSlider

use std::fmt;

use vitrine_core::NodeId;

use crate::a11y::AccessibleNode;

/// Text shown in place of an image that failed to load.
pub const PLACEHOLDER_TEXT: &str = "Image unavailable";

/// Which of the two images a layer shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageLayer {
    Before,
    After,
}

impl ImageLayer {
    /// The opposite layer.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Before => Self::After,
            Self::After => Self::Before,
        }
    }
}

/// What fills an image layer.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerContent {
    Image {
        src: String,
        alt: String,
        /// Load eagerly; the slider sits above the fold.
        priority: bool,
    },
    /// Neutral block with a short unavailable notice.
    Placeholder { text: &'static str },
}

impl LayerContent {
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }
}

/// One rendered image layer with its corner badge.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerView {
    pub layer: ImageLayer,
    pub content: LayerContent,
    pub label: String,
}

/// Clip applied to the after layer: everything right of the divider is cut.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipInset {
    pub right_percent: f32,
}

impl fmt::Display for ClipInset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "inset(0 {}% 0 0)", self.right_percent)
    }
}

/// The draggable divider.
#[derive(Debug, Clone, PartialEq)]
pub struct DividerView {
    pub node: NodeId,
    /// Horizontal offset from the container's left edge, in percent.
    pub left_percent: f32,
    pub dragging: bool,
    pub a11y: AccessibleNode,
}

/// Continuous comparison mode.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractiveView {
    pub before: LayerView,
    pub after: LayerView,
    pub after_clip: ClipInset,
    pub divider: DividerView,
}

/// The toggle button shown in reduced-motion mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleView {
    pub node: NodeId,
    pub text: String,
    pub a11y: AccessibleNode,
}

/// Discrete mode: one image, a badge naming it, one toggle.
#[derive(Debug, Clone, PartialEq)]
pub struct ReducedMotionView {
    pub image: LayerView,
    pub badge: String,
    pub toggle: ToggleView,
}

/// Complete render description of a comparison slider.
#[derive(Debug, Clone, PartialEq)]
pub enum SliderView {
    Interactive(InteractiveView),
    ReducedMotion(ReducedMotionView),
}

impl SliderView {
    /// The divider, if this view has one.
    #[must_use]
    pub fn divider(&self) -> Option<&DividerView> {
        match self {
            Self::Interactive(v) => Some(&v.divider),
            Self::ReducedMotion(_) => None,
        }
    }

    /// The reduced-motion toggle, if this view has one.
    #[must_use]
    pub fn toggle(&self) -> Option<&ToggleView> {
        match self {
            Self::Interactive(_) => None,
            Self::ReducedMotion(v) => Some(&v.toggle),
        }
    }

    /// Image layers in paint order.
    #[must_use]
    pub fn layers(&self) -> Vec<&LayerView> {
        match self {
            Self::Interactive(v) => vec![&v.before, &v.after],
            Self::ReducedMotion(v) => vec![&v.image],
        }
    }
}
