#![forbid(unsafe_code)]

//! Modal overlays: navigation drawer, search modal, cart panel, dialog.
//!
//! An [`Overlay`] owns a backdrop and a panel node. Both stay detached while
//! closed. Opening attaches them, locks document scroll, hides the main
//! content from assistive technology, and activates a [`FocusTrap`] on the
//! panel.
//!
//! A [`OverlayKind::SearchModal`] also creates its search input inside the
//! panel; that input, not the first tabbable element, receives focus when
//! the modal opens.
//!
//! # Invariants
//!
//! 1. `open`/`close` are idempotent.
//! 2. Focus is restored before the overlay nodes are detached.
//! 3. The Escape listener exists only while open.
//!
//! # Example
//!
//! ```
//! use vitrine_core::{Document, Element, ElementKind, Event, KeyCode, KeyEvent};
//! use vitrine_widgets::overlay::{Overlay, OverlayAction, OverlayConfig, OverlayKind};
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! let mut cart = Overlay::mount(&mut doc, root, OverlayKind::CartPanel, None, OverlayConfig::default());
//! doc.append_new(cart.panel(), Element::new(ElementKind::Button));
//!
//! cart.open(&mut doc);
//! cart.on_tick(&mut doc);
//! let outcome = cart.handle_event(&mut doc, &Event::Key(KeyEvent::press(KeyCode::Escape)));
//! assert_eq!(outcome.action, Some(OverlayAction::EscapePressed));
//! assert!(!cart.is_open());
//! ```

use vitrine_core::{
    Document, Element, ElementKind, Event, EventResponse, EventType, KeyCode, ListenerGuard,
    ListenerOptions, NodeId, PointerEventKind,
};

use crate::Component;
use crate::a11y::AccessibleNode;
use crate::focus_trap::FocusTrap;

const OWNER: &str = "Overlay";

/// Which storefront surface an overlay is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OverlayKind {
    Drawer,
    SearchModal,
    CartPanel,
    Dialog,
}

impl OverlayKind {
    /// Accessible name of the dialog.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Drawer => "Navigation menu",
            Self::SearchModal => "Search products",
            Self::CartPanel => "Shopping cart",
            Self::Dialog => "Dialog",
        }
    }
}

/// Why an overlay closed itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayAction {
    EscapePressed,
    BackdropClicked,
}

/// Result of routing an event to an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverlayOutcome {
    pub response: EventResponse,
    pub action: Option<OverlayAction>,
}

impl OverlayOutcome {
    const IGNORED: Self = Self {
        response: EventResponse::IGNORED,
        action: None,
    };

    const fn respond(response: EventResponse) -> Self {
        Self {
            response,
            action: None,
        }
    }
}

/// Overlay behavior switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OverlayConfig {
    pub close_on_escape: bool,
    pub close_on_backdrop: bool,
    pub lock_scroll: bool,
    pub restore_focus: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            close_on_escape: true,
            close_on_backdrop: true,
            lock_scroll: true,
            restore_focus: true,
        }
    }
}

impl OverlayConfig {
    #[must_use]
    pub fn close_on_escape(mut self, close: bool) -> Self {
        self.close_on_escape = close;
        self
    }

    #[must_use]
    pub fn close_on_backdrop(mut self, close: bool) -> Self {
        self.close_on_backdrop = close;
        self
    }

    #[must_use]
    pub fn lock_scroll(mut self, lock: bool) -> Self {
        self.lock_scroll = lock;
        self
    }

    #[must_use]
    pub fn restore_focus(mut self, restore: bool) -> Self {
        self.restore_focus = restore;
        self
    }
}

/// Render description of an overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayView {
    pub kind: OverlayKind,
    pub open: bool,
    pub backdrop: NodeId,
    pub panel: NodeId,
    pub a11y: AccessibleNode,
}

/// A mounted modal overlay.
#[derive(Debug)]
pub struct Overlay {
    kind: OverlayKind,
    config: OverlayConfig,
    parent: NodeId,
    backdrop: NodeId,
    panel: NodeId,
    main_content: Option<NodeId>,
    search_input: Option<NodeId>,
    trap: FocusTrap,
    open: bool,
    escape_listener: Option<ListenerGuard>,
}

impl Overlay {
    /// Create the overlay's nodes. They attach under `parent` on open.
    ///
    /// `main_content` is hidden from assistive technology while open.
    pub fn mount(
        doc: &mut Document,
        parent: NodeId,
        kind: OverlayKind,
        main_content: Option<NodeId>,
        config: OverlayConfig,
    ) -> Self {
        let backdrop = doc.create_element(Element::new(ElementKind::Generic));
        let mut panel_el = Element::new(ElementKind::Generic);
        panel_el.label = Some(kind.label().to_owned());
        let panel = doc.create_element(panel_el);
        let search_input = match kind {
            OverlayKind::SearchModal => {
                let mut input = Element::new(ElementKind::Input);
                input.label = Some(kind.label().to_owned());
                doc.append_new(panel, input)
            }
            _ => None,
        };
        let mut trap = FocusTrap::new()
            .restore_focus(config.restore_focus)
            .initial_focus(search_input);
        trap.attach(panel);
        Self {
            kind,
            config,
            parent,
            backdrop,
            panel,
            main_content,
            search_input,
            trap,
            open: false,
            escape_listener: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> OverlayKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Container for the overlay's content.
    #[inline]
    #[must_use]
    pub fn panel(&self) -> NodeId {
        self.panel
    }

    #[inline]
    #[must_use]
    pub fn backdrop(&self) -> NodeId {
        self.backdrop
    }

    /// The query input of a search modal; `None` for other kinds.
    #[inline]
    #[must_use]
    pub fn search_input(&self) -> Option<NodeId> {
        self.search_input
    }

    #[must_use]
    pub fn focus_trap(&self) -> &FocusTrap {
        &self.trap
    }

    /// Open the overlay. Returns `false` if it was already open.
    pub fn open(&mut self, doc: &mut Document) -> bool {
        if self.open {
            return false;
        }
        doc.append_child(self.parent, self.backdrop);
        doc.append_child(self.parent, self.panel);
        if self.config.lock_scroll {
            doc.set_scroll_locked(true);
        }
        if let Some(main) = self.main_content {
            doc.update(main, |el| el.aria_hidden = true);
        }
        self.trap.set_active(doc, true);
        if self.config.close_on_escape {
            self.escape_listener = Some(doc.listeners().register(
                EventType::KeyDown,
                ListenerOptions::ACTIVE,
                OWNER,
            ));
        }
        self.open = true;
        tracing::debug!(kind = ?self.kind, "overlay opened");
        true
    }

    /// Close the overlay. Returns `false` if it was already closed.
    pub fn close(&mut self, doc: &mut Document) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        self.escape_listener = None;
        self.trap.set_active(doc, false);
        if let Some(main) = self.main_content {
            doc.update(main, |el| el.aria_hidden = false);
        }
        if self.config.lock_scroll {
            doc.set_scroll_locked(false);
        }
        doc.detach(self.panel);
        doc.detach(self.backdrop);
        tracing::debug!(kind = ?self.kind, "overlay closed");
        true
    }

    /// Apply deferred initial focus.
    pub fn on_tick(&mut self, doc: &mut Document) {
        self.trap.on_tick(doc);
    }

    /// Route a host event while open.
    pub fn handle_event(&mut self, doc: &mut Document, event: &Event) -> OverlayOutcome {
        if !self.open {
            return OverlayOutcome::IGNORED;
        }
        match event {
            Event::Key(key) if key.is_down() && key.code == KeyCode::Escape => {
                if !self.config.close_on_escape {
                    return OverlayOutcome::IGNORED;
                }
                self.close(doc);
                OverlayOutcome {
                    response: EventResponse::PREVENT_DEFAULT,
                    action: Some(OverlayAction::EscapePressed),
                }
            }
            Event::Key(key) => OverlayOutcome::respond(self.trap.handle_key(doc, key)),
            Event::Pointer(pointer)
                if pointer.kind == PointerEventKind::Down
                    && pointer.target == Some(self.backdrop)
                    && self.config.close_on_backdrop =>
            {
                self.close(doc);
                OverlayOutcome {
                    response: EventResponse::HANDLED,
                    action: Some(OverlayAction::BackdropClicked),
                }
            }
            _ => OverlayOutcome::IGNORED,
        }
    }

    /// Close if open, then delete the overlay's nodes.
    pub fn unmount(mut self, doc: &mut Document) {
        self.close(doc);
        doc.remove(self.panel);
        doc.remove(self.backdrop);
    }
}

impl Component for Overlay {
    type View = OverlayView;

    fn view(&self) -> OverlayView {
        OverlayView {
            kind: self.kind,
            open: self.open,
            backdrop: self.backdrop,
            panel: self.panel,
            a11y: AccessibleNode::dialog(self.kind.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::{KeyEvent, PointerEvent};

    struct Page {
        doc: Document,
        main: NodeId,
        trigger: NodeId,
    }

    fn page() -> Page {
        let mut doc = Document::new();
        let root = doc.root();
        let main = doc.append_new(root, Element::new(ElementKind::Generic)).unwrap();
        let trigger = doc.append_new(main, Element::new(ElementKind::Button)).unwrap();
        Page { doc, main, trigger }
    }

    fn drawer(p: &mut Page) -> (Overlay, NodeId) {
        let root = p.doc.root();
        let overlay = Overlay::mount(
            &mut p.doc,
            root,
            OverlayKind::Drawer,
            Some(p.main),
            OverlayConfig::default(),
        );
        let link = p
            .doc
            .append_new(overlay.panel(), Element::new(ElementKind::Button))
            .unwrap();
        (overlay, link)
    }

    #[test]
    fn closed_overlay_is_detached() {
        let mut p = page();
        let (overlay, link) = drawer(&mut p);
        assert!(!p.doc.is_attached(overlay.panel()));
        assert!(!p.doc.is_attached(link));
        assert!(!overlay.view().open);
    }

    #[test]
    fn open_locks_page_and_traps_focus() {
        let mut p = page();
        let (mut overlay, link) = drawer(&mut p);
        p.doc.focus(p.trigger);
        assert!(overlay.open(&mut p.doc));
        assert!(!overlay.open(&mut p.doc));
        overlay.on_tick(&mut p.doc);

        assert!(p.doc.is_scroll_locked());
        assert!(p.doc.element(p.main).unwrap().aria_hidden);
        assert_eq!(p.doc.active_element(), Some(link));
        assert_eq!(overlay.view().a11y.label, "Navigation menu");
        assert!(overlay.view().a11y.modal);

        let outcome = overlay.handle_event(&mut p.doc, &Event::Key(KeyEvent::press(KeyCode::Tab)));
        assert!(outcome.response.prevent_default);
        assert_eq!(p.doc.active_element(), Some(link));
    }

    #[test]
    fn escape_closes_and_restores() {
        let mut p = page();
        let (mut overlay, _link) = drawer(&mut p);
        p.doc.focus(p.trigger);
        overlay.open(&mut p.doc);
        overlay.on_tick(&mut p.doc);
        assert_eq!(p.doc.listeners().count(EventType::KeyDown), 2);

        let outcome = overlay.handle_event(&mut p.doc, &Event::Key(KeyEvent::press(KeyCode::Escape)));
        assert_eq!(outcome.action, Some(OverlayAction::EscapePressed));
        assert!(!overlay.is_open());
        assert_eq!(p.doc.active_element(), Some(p.trigger));
        assert!(!p.doc.is_scroll_locked());
        assert!(!p.doc.element(p.main).unwrap().aria_hidden);
        assert!(p.doc.listeners().is_empty());
        assert!(!overlay.close(&mut p.doc));
    }

    #[test]
    fn backdrop_press_closes_panel_press_does_not() {
        let mut p = page();
        let (mut overlay, link) = drawer(&mut p);
        overlay.open(&mut p.doc);

        let on_panel = PointerEvent::new(PointerEventKind::Down, 5.0, 5.0).on(link);
        assert_eq!(overlay.handle_event(&mut p.doc, &Event::Pointer(on_panel)).action, None);
        assert!(overlay.is_open());

        let on_backdrop = PointerEvent::new(PointerEventKind::Down, 900.0, 5.0).on(overlay.backdrop());
        let outcome = overlay.handle_event(&mut p.doc, &Event::Pointer(on_backdrop));
        assert_eq!(outcome.action, Some(OverlayAction::BackdropClicked));
        assert!(!overlay.is_open());
    }

    #[test]
    fn escape_can_be_disabled() {
        let mut p = page();
        let root = p.doc.root();
        let config = OverlayConfig::default().close_on_escape(false);
        let mut overlay = Overlay::mount(&mut p.doc, root, OverlayKind::Dialog, None, config);
        overlay.open(&mut p.doc);
        let outcome = overlay.handle_event(&mut p.doc, &Event::Key(KeyEvent::press(KeyCode::Escape)));
        assert_eq!(outcome, OverlayOutcome::default());
        assert!(overlay.is_open());
        assert_eq!(p.doc.listeners().count(EventType::KeyDown), 1);
    }

    #[test]
    fn search_modal_focuses_its_input_on_open() {
        let mut p = page();
        let root = p.doc.root();
        let mut search = Overlay::mount(
            &mut p.doc,
            root,
            OverlayKind::SearchModal,
            Some(p.main),
            OverlayConfig::default(),
        );
        let input = search.search_input().unwrap();
        let panel = search.panel();
        // Move the input after the close button; it still gets focus.
        let close = p.doc.append_new(panel, Element::new(ElementKind::Button)).unwrap();
        p.doc.detach(input);
        p.doc.append_child(panel, input);

        p.doc.focus(p.trigger);
        search.open(&mut p.doc);
        search.on_tick(&mut p.doc);
        assert_eq!(p.doc.active_element(), Some(input));
        assert_eq!(
            p.doc.element(input).unwrap().label.as_deref(),
            Some("Search products")
        );
        assert_ne!(p.doc.active_element(), Some(close));
    }

    #[test]
    fn other_kinds_have_no_search_input() {
        let mut p = page();
        let (overlay, _link) = drawer(&mut p);
        assert_eq!(overlay.search_input(), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_reads_partial_json() {
        let config: OverlayConfig = serde_json::from_str(r#"{ "lock_scroll": false }"#).unwrap();
        assert_eq!(config, OverlayConfig::default().lock_scroll(false));
        let kind: OverlayKind = serde_json::from_str(r#""CartPanel""#).unwrap();
        assert_eq!(kind, OverlayKind::CartPanel);
    }

    #[test]
    fn unmount_cleans_up_open_overlay() {
        let mut p = page();
        let (mut overlay, link) = drawer(&mut p);
        let panel = overlay.panel();
        overlay.open(&mut p.doc);
        overlay.unmount(&mut p.doc);
        assert!(!p.doc.exists(panel));
        assert!(!p.doc.exists(link));
        assert!(!p.doc.is_scroll_locked());
        assert!(p.doc.listeners().is_empty());
    }
}
