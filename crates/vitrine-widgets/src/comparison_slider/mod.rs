#![forbid(unsafe_code)]

//! Before/after image comparison slider.
//!
//! Two images share one container. The after image is clipped at the
//! divider, so the area left of the divider shows the before image and the
//! area right of it shows the after image. The divider moves by pointer
//! drag, touch drag, or the keyboard.
//!
//! # State Machine
//!
//! ```text
//!            pointer-down / touch-start on divider
//!     Idle ─────────────────────────────────────────▶ Dragging
//!      ▲                                                 │
//!      └─────────────────────────────────────────────────┘
//!        pointer-up / touch-end / touch-cancel /
//!        reduced motion enabled / unmount
//! ```
//!
//! Position changes from pointer and touch only happen while `Dragging`,
//! and are snapped (see [`SnapBands`]). Keyboard changes apply in either
//! state and are not snapped.
//!
//! # Reduced Motion
//!
//! When the [`MediaQuery`] reports reduced motion, the divider is removed
//! and the slider shows one image at a time with a "Show <other>" toggle.
//! Preference changes are queued by the subscription and applied on the
//! next [`ComparisonSlider::on_tick`] or event.
//!
//! # Failure Modes
//!
//! | Failure | Behavior |
//! |---------|----------|
//! | Image fails to load | That layer renders a placeholder; interaction continues |
//! | Container has zero width | Pointer/touch updates are skipped |
//! | Touch start with no contacts | Ignored |
//! | Invalid [`SliderConfig`] | Logged, defaults used |
//!
//! # Example
//!
//! ```
//! use vitrine_core::{Bounds, Document, Event, KeyCode, KeyEvent};
//! use vitrine_runtime::MotionPreference;
//! use vitrine_widgets::comparison_slider::{ComparisonSlider, ComparisonSliderProps, SliderConfig};
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! let props = ComparisonSliderProps::new("/box-closed.jpg", "/box-open.jpg", "Truffle box");
//! let mut slider = ComparisonSlider::mount(
//!     &mut doc,
//!     root,
//!     props,
//!     SliderConfig::default(),
//!     &MotionPreference::new(false),
//! );
//!
//! doc.focus(slider.nodes().divider);
//! let bounds = Bounds::new(0.0, 0.0, 400.0, 300.0);
//! slider.handle_event(&mut doc, bounds, &Event::Key(KeyEvent::press(KeyCode::Right)));
//! assert_eq!(slider.position(), 60.0);
//! ```

pub mod snap;
pub mod view;

use std::cell::Cell;
use std::rc::Rc;

use vitrine_core::dom::Element;
use vitrine_core::{
    Bounds, Document, ElementKind, Event, EventResponse, EventType, KeyCode, KeyEvent,
    ListenerGuard, ListenerOptions, NodeId, PointerEvent, PointerEventKind, TouchEvent,
    TouchEventKind,
};
use vitrine_runtime::{MediaQuery, Subscription};

use crate::Component;
use crate::a11y::AccessibleNode;

pub use snap::{
    DEFAULT_KEYBOARD_STEP, INITIAL_POSITION, POSITION_MAX, POSITION_MIN, SnapBands,
    clamp_position, position_from_fraction,
};
pub use view::{
    ClipInset, DividerView, ImageLayer, InteractiveView, LayerContent, LayerView,
    PLACEHOLDER_TEXT, ReducedMotionView, SliderView, ToggleView,
};

/// Label used when no before label is supplied.
pub const DEFAULT_BEFORE_LABEL: &str = "Before";
/// Label used when no after label is supplied.
pub const DEFAULT_AFTER_LABEL: &str = "After";

const OWNER: &str = "ComparisonSlider";

/// Tunable slider behavior.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SliderConfig {
    /// Arrow-key increment, in percent.
    pub keyboard_step: f32,
    pub snap: SnapBands,
    pub before_label: String,
    pub after_label: String,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            keyboard_step: DEFAULT_KEYBOARD_STEP,
            snap: SnapBands::DEFAULT,
            before_label: DEFAULT_BEFORE_LABEL.to_owned(),
            after_label: DEFAULT_AFTER_LABEL.to_owned(),
        }
    }
}

impl SliderConfig {
    /// Whether the step is a positive finite number and the snap bands are
    /// well-formed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.keyboard_step.is_finite() && self.keyboard_step > 0.0 && self.snap.is_valid()
    }
}

/// Caller-supplied inputs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComparisonSliderProps {
    pub before_url: String,
    pub after_url: String,
    /// Empty or missing labels fall back to the configured defaults.
    pub before_label: Option<String>,
    pub after_label: Option<String>,
    /// Accessible description of the pictured product.
    pub alt: String,
    /// Above-the-fold rendering hint.
    pub priority: bool,
}

impl ComparisonSliderProps {
    #[must_use]
    pub fn new(
        before_url: impl Into<String>,
        after_url: impl Into<String>,
        alt: impl Into<String>,
    ) -> Self {
        Self {
            before_url: before_url.into(),
            after_url: after_url.into(),
            alt: alt.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn labels(mut self, before: impl Into<String>, after: impl Into<String>) -> Self {
        self.before_label = Some(before.into());
        self.after_label = Some(after.into());
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: bool) -> Self {
        self.priority = priority;
        self
    }
}

/// Drag state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
}

/// Observable slider state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderState {
    /// Percent of the after image revealed, always in `[0, 100]`.
    pub position: f32,
    pub phase: DragPhase,
    pub reduced_motion: bool,
    /// Reduced-motion mode only: whether the after image is shown.
    pub showing_after: bool,
}

impl Default for SliderState {
    fn default() -> Self {
        Self {
            position: INITIAL_POSITION,
            phase: DragPhase::Idle,
            reduced_motion: false,
            showing_after: false,
        }
    }
}

/// Load state of one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageStatus {
    #[default]
    Ready,
    Failed,
}

/// Document nodes owned by the slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderNodes {
    pub container: NodeId,
    pub before: NodeId,
    pub after: NodeId,
    /// Attached only outside reduced-motion mode.
    pub divider: NodeId,
    /// Attached only in reduced-motion mode.
    pub toggle: NodeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragInput {
    Pointer,
    Touch,
}

/// Listeners held for the duration of one drag.
struct DragSession {
    input: DragInput,
    _listeners: Vec<ListenerGuard>,
}

/// A mounted comparison slider.
pub struct ComparisonSlider {
    props: ComparisonSliderProps,
    config: SliderConfig,
    state: SliderState,
    before_status: ImageStatus,
    after_status: ImageStatus,
    nodes: SliderNodes,
    drag: Option<DragSession>,
    pending_motion: Rc<Cell<Option<bool>>>,
    _motion_subscription: Subscription,
}

impl std::fmt::Debug for ComparisonSlider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComparisonSlider")
            .field("props", &self.props)
            .field("state", &self.state)
            .field("before_status", &self.before_status)
            .field("after_status", &self.after_status)
            .field("nodes", &self.nodes)
            .finish()
    }
}

impl ComparisonSlider {
    /// Create the slider's nodes under `parent` and subscribe to the
    /// reduced-motion query.
    pub fn mount(
        doc: &mut Document,
        parent: NodeId,
        props: ComparisonSliderProps,
        config: SliderConfig,
        motion: &dyn MediaQuery,
    ) -> Self {
        let config = if config.is_valid() {
            config
        } else {
            tracing::warn!(?config, "invalid slider config; using defaults");
            SliderConfig::default()
        };

        let container = doc.create_element(Element::new(ElementKind::Generic));
        if !doc.append_child(parent, container) {
            tracing::debug!(?parent, "slider parent not found; container left detached");
        }
        let mut handle = Element::new(ElementKind::Generic);
        handle.tab_index = Some(0);
        let nodes = SliderNodes {
            container,
            before: doc.create_element(Element::new(ElementKind::Image)),
            after: doc.create_element(Element::new(ElementKind::Image)),
            divider: doc.create_element(handle),
            toggle: doc.create_element(Element::new(ElementKind::Button)),
        };

        let pending_motion = Rc::new(Cell::new(None));
        let sink = Rc::clone(&pending_motion);
        let subscription = motion.subscribe(Box::new(move |reduced| sink.set(Some(reduced))));

        let mut slider = Self {
            props,
            config,
            state: SliderState {
                reduced_motion: motion.matches(),
                ..SliderState::default()
            },
            before_status: ImageStatus::Ready,
            after_status: ImageStatus::Ready,
            nodes,
            drag: None,
            pending_motion,
            _motion_subscription: subscription,
        };
        slider.apply_mode(doc);
        tracing::debug!(
            alt = %slider.props.alt,
            reduced_motion = slider.state.reduced_motion,
            "comparison slider mounted"
        );
        slider
    }

    /// Remove the slider's nodes and release any drag listeners.
    pub fn unmount(mut self, doc: &mut Document) {
        self.end_drag("unmount");
        let n = self.nodes;
        for node in [n.divider, n.toggle, n.before, n.after, n.container] {
            doc.remove(node);
        }
    }

    // --- Accessors ---

    #[inline]
    #[must_use]
    pub fn position(&self) -> f32 {
        self.state.position
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> SliderState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.state.phase == DragPhase::Dragging
    }

    #[inline]
    #[must_use]
    pub fn is_reduced_motion(&self) -> bool {
        self.state.reduced_motion
    }

    #[inline]
    #[must_use]
    pub fn nodes(&self) -> SliderNodes {
        self.nodes
    }

    #[must_use]
    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    #[must_use]
    pub fn image_status(&self, layer: ImageLayer) -> ImageStatus {
        match layer {
            ImageLayer::Before => self.before_status,
            ImageLayer::After => self.after_status,
        }
    }

    /// Resolved display label for a layer.
    #[must_use]
    pub fn label(&self, layer: ImageLayer) -> &str {
        let (prop, configured, fallback) = match layer {
            ImageLayer::Before => (
                self.props.before_label.as_deref(),
                self.config.before_label.as_str(),
                DEFAULT_BEFORE_LABEL,
            ),
            ImageLayer::After => (
                self.props.after_label.as_deref(),
                self.config.after_label.as_str(),
                DEFAULT_AFTER_LABEL,
            ),
        };
        match prop {
            Some(label) if !label.trim().is_empty() => label,
            _ if !configured.trim().is_empty() => configured,
            _ => fallback,
        }
    }

    // --- Host callbacks ---

    /// Apply a queued reduced-motion change, if any.
    pub fn on_tick(&mut self, doc: &mut Document) {
        if let Some(reduced) = self.pending_motion.take() {
            self.set_reduced_motion(doc, reduced);
        }
    }

    /// Switch between continuous and reduced-motion modes.
    pub fn set_reduced_motion(&mut self, doc: &mut Document, reduced: bool) {
        if self.state.reduced_motion == reduced {
            return;
        }
        self.state.reduced_motion = reduced;
        if reduced {
            self.end_drag("reduced motion enabled");
        }
        self.apply_mode(doc);
        tracing::debug!(reduced, "comparison slider mode switched");
    }

    /// Record that an image failed to load. The layer renders a placeholder
    /// from now on; nothing else changes.
    pub fn report_image_error(&mut self, layer: ImageLayer) {
        let src = match layer {
            ImageLayer::Before => {
                self.before_status = ImageStatus::Failed;
                &self.props.before_url
            }
            ImageLayer::After => {
                self.after_status = ImageStatus::Failed;
                &self.props.after_url
            }
        };
        tracing::warn!(?layer, %src, "image failed to load; showing placeholder");
    }

    /// Swap the displayed image in reduced-motion mode.
    ///
    /// Returns `false` (and does nothing) outside reduced-motion mode.
    pub fn toggle_view(&mut self, doc: &mut Document) -> bool {
        if !self.state.reduced_motion {
            return false;
        }
        self.state.showing_after = !self.state.showing_after;
        self.apply_mode(doc);
        true
    }

    /// Route a host event to the slider.
    pub fn handle_event(&mut self, doc: &mut Document, bounds: Bounds, event: &Event) -> EventResponse {
        self.on_tick(doc);
        match event {
            Event::Key(key) => self.handle_key(doc, key),
            Event::Pointer(pointer) => self.handle_pointer(doc, bounds, pointer),
            Event::Touch(touch) => self.handle_touch(doc, bounds, touch),
        }
    }

    fn handle_key(&mut self, doc: &mut Document, key: &KeyEvent) -> EventResponse {
        if !key.is_down() {
            return EventResponse::IGNORED;
        }
        if self.state.reduced_motion {
            let activates = matches!(key.code, KeyCode::Enter | KeyCode::Char(' '));
            if activates && doc.active_element() == Some(self.nodes.toggle) {
                self.toggle_view(doc);
                return EventResponse::PREVENT_DEFAULT;
            }
            return EventResponse::IGNORED;
        }
        if doc.active_element() != Some(self.nodes.divider) {
            return EventResponse::IGNORED;
        }
        let step = self.config.keyboard_step;
        match key.code {
            KeyCode::Left => self.commit_position(self.state.position - step),
            KeyCode::Right => self.commit_position(self.state.position + step),
            KeyCode::Home => self.commit_position(POSITION_MIN),
            KeyCode::End => self.commit_position(POSITION_MAX),
            KeyCode::Escape => doc.blur(self.nodes.divider),
            _ => return EventResponse::IGNORED,
        }
        EventResponse::PREVENT_DEFAULT
    }

    fn handle_pointer(
        &mut self,
        doc: &mut Document,
        bounds: Bounds,
        pointer: &PointerEvent,
    ) -> EventResponse {
        if self.state.reduced_motion {
            // Click on the toggle fires on release.
            if pointer.kind == PointerEventKind::Up && pointer.target == Some(self.nodes.toggle) {
                self.toggle_view(doc);
                return EventResponse::HANDLED;
            }
            return EventResponse::IGNORED;
        }
        match pointer.kind {
            PointerEventKind::Down => {
                if pointer.target != Some(self.nodes.divider) {
                    return EventResponse::IGNORED;
                }
                self.begin_drag(doc, DragInput::Pointer);
                self.update_from_client_x(bounds, pointer.x);
                EventResponse::PREVENT_DEFAULT
            }
            PointerEventKind::Move => {
                if !self.is_dragging_with(DragInput::Pointer) {
                    return EventResponse::IGNORED;
                }
                self.update_from_client_x(bounds, pointer.x);
                EventResponse::HANDLED
            }
            PointerEventKind::Up => {
                if !self.is_dragging_with(DragInput::Pointer) {
                    return EventResponse::IGNORED;
                }
                self.end_drag("pointer up");
                EventResponse::HANDLED
            }
        }
    }

    fn handle_touch(&mut self, doc: &mut Document, bounds: Bounds, touch: &TouchEvent) -> EventResponse {
        if self.state.reduced_motion {
            return EventResponse::IGNORED;
        }
        match touch.kind {
            TouchEventKind::Start => {
                if touch.target != Some(self.nodes.divider) {
                    return EventResponse::IGNORED;
                }
                let Some(primary) = touch.primary() else {
                    return EventResponse::IGNORED;
                };
                let x = primary.x;
                self.begin_drag(doc, DragInput::Touch);
                self.update_from_client_x(bounds, x);
                EventResponse::PREVENT_DEFAULT
            }
            TouchEventKind::Move => {
                if !self.is_dragging_with(DragInput::Touch) {
                    return EventResponse::IGNORED;
                }
                if let Some(primary) = touch.primary() {
                    self.update_from_client_x(bounds, primary.x);
                }
                // Keep the page from scrolling under an active drag.
                EventResponse::PREVENT_DEFAULT
            }
            TouchEventKind::End | TouchEventKind::Cancel => {
                if !self.is_dragging_with(DragInput::Touch) {
                    return EventResponse::IGNORED;
                }
                self.end_drag(if touch.kind == TouchEventKind::End {
                    "touch end"
                } else {
                    "touch cancel"
                });
                EventResponse::HANDLED
            }
        }
    }

    // --- Internals ---

    fn is_dragging_with(&self, input: DragInput) -> bool {
        self.drag.as_ref().is_some_and(|d| d.input == input)
    }

    fn begin_drag(&mut self, doc: &Document, input: DragInput) {
        let listeners = doc.listeners();
        let guards = match input {
            DragInput::Pointer => vec![
                listeners.register(EventType::PointerMove, ListenerOptions::PASSIVE, OWNER),
                listeners.register(EventType::PointerUp, ListenerOptions::PASSIVE, OWNER),
            ],
            DragInput::Touch => vec![
                listeners.register(EventType::TouchMove, ListenerOptions::ACTIVE, OWNER),
                listeners.register(EventType::TouchEnd, ListenerOptions::PASSIVE, OWNER),
                listeners.register(EventType::TouchCancel, ListenerOptions::PASSIVE, OWNER),
            ],
        };
        // Replacing a session drops its guards first.
        self.drag = Some(DragSession {
            input,
            _listeners: guards,
        });
        self.state.phase = DragPhase::Dragging;
        tracing::debug!(?input, position = self.state.position, "drag started");
    }

    fn end_drag(&mut self, reason: &'static str) {
        if self.drag.take().is_some() {
            self.state.phase = DragPhase::Idle;
            tracing::debug!(reason, position = self.state.position, "drag ended");
        }
    }

    fn update_from_client_x(&mut self, bounds: Bounds, client_x: f32) {
        match bounds.fraction_x(client_x) {
            Some(fraction) => {
                self.state.position = self.config.snap.snap(position_from_fraction(fraction));
            }
            None => {
                tracing::trace!(?bounds, client_x, "container not measurable; update skipped");
            }
        }
    }

    fn commit_position(&mut self, position: f32) {
        self.state.position = clamp_position(position);
    }

    /// Attach the nodes the current mode renders and detach the rest.
    fn apply_mode(&mut self, doc: &mut Document) {
        let n = self.nodes;
        if self.state.reduced_motion {
            let (shown, hidden) = if self.state.showing_after {
                (n.after, n.before)
            } else {
                (n.before, n.after)
            };
            doc.detach(n.divider);
            doc.detach(hidden);
            doc.append_child(n.container, shown);
            doc.append_child(n.container, n.toggle);
        } else {
            doc.detach(n.toggle);
            doc.append_child(n.container, n.before);
            doc.append_child(n.container, n.after);
            doc.append_child(n.container, n.divider);
        }
        self.sync_labels(doc);
    }

    fn sync_labels(&self, doc: &mut Document) {
        let n = self.nodes;
        let before_alt = self.alt_text(ImageLayer::Before);
        let after_alt = self.alt_text(ImageLayer::After);
        let divider_label = self.divider_label();
        let toggle_label = self.toggle_aria_label();
        doc.update(n.before, |el| el.label = Some(before_alt));
        doc.update(n.after, |el| el.label = Some(after_alt));
        doc.update(n.divider, |el| el.label = Some(divider_label));
        doc.update(n.toggle, |el| el.label = Some(toggle_label));
    }

    /// Interactive layers name their side; the single reduced-motion image
    /// uses the plain description, since the badge already names the view.
    fn alt_text(&self, layer: ImageLayer) -> String {
        if self.state.reduced_motion {
            self.props.alt.clone()
        } else {
            format!("{} - {}", self.props.alt, self.label(layer))
        }
    }

    fn divider_label(&self) -> String {
        format!("Compare views of {}", self.props.alt)
    }

    fn shown_layer(&self) -> ImageLayer {
        if self.state.showing_after {
            ImageLayer::After
        } else {
            ImageLayer::Before
        }
    }

    fn toggle_text(&self) -> String {
        format!("Show {}", self.label(self.shown_layer().other()))
    }

    fn toggle_aria_label(&self) -> String {
        format!("{} view", self.toggle_text())
    }

    fn layer_view(&self, layer: ImageLayer) -> LayerView {
        let src = match layer {
            ImageLayer::Before => &self.props.before_url,
            ImageLayer::After => &self.props.after_url,
        };
        let content = match self.image_status(layer) {
            ImageStatus::Failed => LayerContent::Placeholder {
                text: PLACEHOLDER_TEXT,
            },
            ImageStatus::Ready => LayerContent::Image {
                src: src.clone(),
                alt: self.alt_text(layer),
                priority: self.props.priority,
            },
        };
        LayerView {
            layer,
            content,
            label: self.label(layer).to_owned(),
        }
    }
}

impl Component for ComparisonSlider {
    type View = SliderView;

    fn view(&self) -> SliderView {
        if self.state.reduced_motion {
            let shown = self.shown_layer();
            return SliderView::ReducedMotion(ReducedMotionView {
                image: self.layer_view(shown),
                badge: self.label(shown).to_owned(),
                toggle: ToggleView {
                    node: self.nodes.toggle,
                    text: self.toggle_text(),
                    a11y: AccessibleNode::button(self.toggle_aria_label()),
                },
            });
        }
        let position = self.state.position;
        SliderView::Interactive(InteractiveView {
            before: self.layer_view(ImageLayer::Before),
            after: self.layer_view(ImageLayer::After),
            after_clip: ClipInset {
                right_percent: POSITION_MAX - position,
            },
            divider: DividerView {
                node: self.nodes.divider,
                left_percent: position,
                dragging: self.is_dragging(),
                a11y: AccessibleNode::slider(
                    self.divider_label(),
                    POSITION_MIN,
                    POSITION_MAX,
                    position,
                ),
            },
        })
    }
}
