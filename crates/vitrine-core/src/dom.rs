#![forbid(unsafe_code)]

//! Host document model.
//!
//! [`Document`] is a small retained element tree holding exactly the state
//! Vitrine components interact with: parent/child structure, the attributes
//! that make an element focusable, the active (focused) element, the
//! document-level [`ListenerRegistry`], and the body scroll lock.
//!
//! Components depend on the [`FocusHost`] trait rather than on `Document`
//! directly, so a browser bridge can implement focus against a real DOM.
//!
//! # Invariants
//!
//! 1. The root node is always attached and can never be detached or removed.
//! 2. `active_element()` is either `None` or an attached node.
//! 3. Detaching or removing a subtree that contains the active element
//!    clears focus (the browser moves focus to the body).
//! 4. Focusable queries return nodes in document (pre-order) order.
//!
//! # Failure Modes
//!
//! - Operations on unknown or removed ids are no-ops returning `false`/`None`.
//! - `append_child` refuses to create cycles.

use ahash::AHashMap;

use crate::listener::ListenerRegistry;

/// Identifier for an element in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Raw id value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Element tag categories that matter for focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ElementKind {
    #[default]
    Generic,
    Button,
    Input,
    Select,
    Textarea,
    Anchor,
    Image,
}

/// A document element.
#[derive(Debug, Clone, Default)]
pub struct Element {
    pub kind: ElementKind,
    pub disabled: bool,
    pub href: Option<String>,
    pub tab_index: Option<i32>,
    pub content_editable: bool,
    pub aria_hidden: bool,
    /// Accessible name (`aria-label` or text content).
    pub label: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    /// Create an element of the given kind with default attributes.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether the element matches the sequential-focus query: enabled form
    /// controls, anchors with an `href`, elements with a non-negative tab
    /// index, and content-editable regions. Disabled elements never match.
    #[must_use]
    pub fn is_tabbable(&self) -> bool {
        if self.disabled {
            return false;
        }
        let by_kind = match self.kind {
            ElementKind::Button
            | ElementKind::Input
            | ElementKind::Select
            | ElementKind::Textarea => true,
            ElementKind::Anchor => self.href.is_some(),
            ElementKind::Generic | ElementKind::Image => false,
        };
        by_kind || self.tab_index.is_some_and(|t| t >= 0) || self.content_editable
    }

    /// Whether programmatic `focus()` succeeds on this element.
    ///
    /// Any explicit tab index (including negative) makes an element focusable
    /// programmatically even though it is skipped by Tab traversal.
    #[must_use]
    pub fn can_focus(&self) -> bool {
        if self.disabled {
            return false;
        }
        self.is_tabbable() || self.tab_index.is_some()
    }
}

/// Focus and listener operations a component needs from its host.
pub trait FocusHost {
    /// The element that currently holds focus.
    fn active_element(&self) -> Option<NodeId>;

    /// Move focus to `node`. Returns `false` if the node cannot take focus.
    fn focus(&mut self, node: NodeId) -> bool;

    /// Remove focus from `node` if it holds it.
    fn blur(&mut self, node: NodeId);

    /// Whether `node` is still part of the document.
    fn is_attached(&self, node: NodeId) -> bool;

    /// Tabbable descendants of `container` in document order, excluding
    /// the container itself. Computed fresh on every call.
    fn focusable_descendants(&self, container: NodeId) -> Vec<NodeId>;

    /// Document-level listener registry.
    fn listeners(&self) -> &ListenerRegistry;
}

/// In-memory host document.
#[derive(Debug)]
pub struct Document {
    nodes: AHashMap<NodeId, Element>,
    root: NodeId,
    next_id: u32,
    active: Option<NodeId>,
    listeners: ListenerRegistry,
    scroll_locked: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document containing only the root (body) element.
    #[must_use]
    pub fn new() -> Self {
        let root = NodeId(0);
        let mut nodes = AHashMap::new();
        nodes.insert(root, Element::new(ElementKind::Generic));
        Self {
            nodes,
            root,
            next_id: 1,
            active: None,
            listeners: ListenerRegistry::new(),
            scroll_locked: false,
        }
    }

    /// The root (body) element.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    // --- Tree construction ---

    /// Create a detached element.
    pub fn create_element(&mut self, element: Element) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        let mut element = element;
        element.parent = None;
        element.children.clear();
        self.nodes.insert(id, element);
        id
    }

    /// Create an element and append it to `parent`.
    ///
    /// Returns `None` if `parent` does not exist.
    pub fn append_new(&mut self, parent: NodeId, element: Element) -> Option<NodeId> {
        if !self.nodes.contains_key(&parent) {
            return None;
        }
        let id = self.create_element(element);
        self.append_child(parent, id);
        Some(id)
    }

    /// Append `child` to `parent`, moving it from its current parent.
    ///
    /// Returns `false` for unknown ids, for the root as child, and when the
    /// move would create a cycle.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if child == self.root
            || !self.nodes.contains_key(&parent)
            || !self.nodes.contains_key(&child)
            || self.is_inclusive_ancestor(child, parent)
        {
            return false;
        }
        self.unlink(child);
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(&child) {
            c.parent = Some(parent);
        }
        true
    }

    /// Detach `node` (and its subtree) from the tree, keeping it for reuse.
    pub fn detach(&mut self, node: NodeId) -> bool {
        if node == self.root || !self.nodes.contains_key(&node) {
            return false;
        }
        self.clear_focus_within(node);
        self.unlink(node);
        true
    }

    /// Remove `node` and its subtree from the document permanently.
    pub fn remove(&mut self, node: NodeId) -> bool {
        if !self.detach(node) {
            return false;
        }
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if let Some(el) = self.nodes.remove(&id) {
                stack.extend(el.children);
            }
        }
        true
    }

    fn unlink(&mut self, node: NodeId) {
        let Some(parent) = self.nodes.get(&node).and_then(|n| n.parent) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.retain(|&c| c != node);
        }
        if let Some(n) = self.nodes.get_mut(&node) {
            n.parent = None;
        }
    }

    fn clear_focus_within(&mut self, node: NodeId) {
        if let Some(active) = self.active
            && self.is_inclusive_ancestor(node, active)
        {
            self.active = None;
        }
    }

    // --- Queries ---

    /// Whether the element id is known (attached or detached).
    #[must_use]
    pub fn exists(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    #[must_use]
    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(&node)
    }

    /// Mutable access to an element's attributes.
    ///
    /// Disabling the focused element clears focus.
    pub fn update(&mut self, node: NodeId, f: impl FnOnce(&mut Element)) -> bool {
        let Some(el) = self.nodes.get_mut(&node) else {
            return false;
        };
        f(el);
        if self.active == Some(node) && !el.can_focus() {
            self.active = None;
        }
        true
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    #[must_use]
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = self.nodes.get(&id).and_then(|n| n.parent);
        }
        false
    }

    /// Whether `node` is connected to the root.
    #[must_use]
    pub fn is_attached(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node) && self.is_inclusive_ancestor(self.root, node)
    }

    /// Pre-order descendants of `node`, excluding `node`.
    #[must_use]
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = match self.nodes.get(&node) {
            Some(el) => el.children.iter().rev().copied().collect(),
            None => return out,
        };
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(el) = self.nodes.get(&id) {
                stack.extend(el.children.iter().rev().copied());
            }
        }
        out
    }

    /// Tabbable descendants of `container` in document order.
    #[must_use]
    pub fn focusable_descendants(&self, container: NodeId) -> Vec<NodeId> {
        self.descendants(container)
            .into_iter()
            .filter(|id| self.nodes.get(id).is_some_and(Element::is_tabbable))
            .collect()
    }

    // --- Focus ---

    #[inline]
    #[must_use]
    pub fn active_element(&self) -> Option<NodeId> {
        self.active
    }

    /// Focus `node` if it is attached and focusable.
    pub fn focus(&mut self, node: NodeId) -> bool {
        let focusable = self.nodes.get(&node).is_some_and(Element::can_focus);
        if !focusable || !self.is_attached(node) {
            return false;
        }
        self.active = Some(node);
        true
    }

    /// Blur `node` if it holds focus.
    pub fn blur(&mut self, node: NodeId) {
        if self.active == Some(node) {
            self.active = None;
        }
    }

    /// Native sequential focus navigation (what the browser does for an
    /// unhandled Tab press). Wraps around at the ends of the document.
    ///
    /// Returns the newly focused element, or `None` if nothing is tabbable.
    pub fn advance_focus(&mut self, reverse: bool) -> Option<NodeId> {
        let order = self.focusable_descendants(self.root);
        if order.is_empty() {
            return None;
        }
        let current = self.active.and_then(|a| order.iter().position(|&n| n == a));
        let next = match (current, reverse) {
            (None, false) => 0,
            (None, true) => order.len() - 1,
            (Some(i), false) => (i + 1) % order.len(),
            (Some(i), true) => (i + order.len() - 1) % order.len(),
        };
        let target = order[next];
        self.active = Some(target);
        Some(target)
    }

    // --- Document state ---

    #[inline]
    #[must_use]
    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// Lock or unlock body scrolling.
    pub fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }

    #[inline]
    #[must_use]
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }
}

impl FocusHost for Document {
    fn active_element(&self) -> Option<NodeId> {
        Document::active_element(self)
    }

    fn focus(&mut self, node: NodeId) -> bool {
        Document::focus(self, node)
    }

    fn blur(&mut self, node: NodeId) {
        Document::blur(self, node);
    }

    fn is_attached(&self, node: NodeId) -> bool {
        Document::is_attached(self, node)
    }

    fn focusable_descendants(&self, container: NodeId) -> Vec<NodeId> {
        Document::focusable_descendants(self, container)
    }

    fn listeners(&self) -> &ListenerRegistry {
        Document::listeners(self)
    }
}
