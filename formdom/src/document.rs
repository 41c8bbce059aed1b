use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;

use crate::element::Element;
use crate::event::ListenerEntry;
use crate::layout::{LayoutFn, Rect};
use crate::timer::TimerEntry;

/// Handle to a node owned by a [`Document`].
///
/// Handles stay valid for the lifetime of the document; removing a node only
/// detaches it from the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

#[derive(Debug, Default)]
pub(crate) struct NodeData {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub classes: Vec<String>,
    pub text: String,
    pub disabled: bool,
    pub selected: bool,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// Default viewport size for new documents.
pub const DEFAULT_VIEWPORT: Rect = Rect::from_size(1024, 768);

/// A single-threaded arena document.
///
/// The document owns every node, the event listeners bound to them, the
/// pending zero-delay timers, and the geometry the host reports for them.
///
/// Node handles from another document are a programming error: accessors
/// index straight into the arena and panic on out-of-range handles.
pub struct Document {
    pub(crate) nodes: Vec<NodeData>,
    root: NodeId,
    body: NodeId,

    // Geometry
    pub(crate) rects: HashMap<NodeId, Rect>,
    pub(crate) layout: Option<LayoutFn>,
    pub(crate) viewport: Rect,

    // Events
    pub(crate) listeners: Vec<ListenerEntry>,
    pub(crate) next_listener: u64,

    // Timers
    pub(crate) timers: VecDeque<TimerEntry>,
    pub(crate) next_timer: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.nodes.len())
            .field("listeners", &self.listeners.len())
            .field("timers", &self.timers.len())
            .field("viewport", &self.viewport)
            .finish()
    }
}

impl Document {
    /// Create an empty document containing `<html><body></body></html>`.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            body: NodeId(0),
            rects: HashMap::new(),
            layout: None,
            viewport: DEFAULT_VIEWPORT,
            listeners: Vec::new(),
            next_listener: 0,
            timers: VecDeque::new(),
            next_timer: 0,
        };
        let root = doc.create_element("html");
        let body = doc.create_element("body");
        doc.append(root, body);
        doc.root = root;
        doc.body = body;
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub(crate) fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.0]
    }

    // -------------------------------------------------------------------------
    // Creation
    // -------------------------------------------------------------------------

    /// Create a detached element with the given tag.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        });
        id
    }

    /// Materialize an element description as a detached subtree.
    pub fn build(&mut self, element: Element) -> NodeId {
        let id = self.create_element(&element.tag);
        {
            let node = self.node_mut(id);
            node.attributes = element.attributes;
            node.classes = element.classes;
            node.text = element.text;
            node.disabled = element.disabled;
            node.selected = element.selected;
        }
        for child in element.children {
            let child_id = self.build(child);
            self.append(id, child_id);
        }
        id
    }

    /// Materialize an element description and append it to `parent`.
    pub fn insert(&mut self, parent: NodeId, element: Element) -> NodeId {
        let id = self.build(element);
        self.append(parent, id);
        id
    }

    // -------------------------------------------------------------------------
    // Element data
    // -------------------------------------------------------------------------

    pub fn tag(&self, node: NodeId) -> &str {
        &self.node(node).tag
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node).attributes.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, node: NodeId, name: &str) -> bool {
        self.node(node).attributes.contains_key(name)
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: impl Into<String>) {
        self.node_mut(node)
            .attributes
            .insert(name.to_string(), value.into());
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) -> Option<String> {
        self.node_mut(node).attributes.remove(name)
    }

    /// Read a `data-*` attribute. `key` is given without the `data-` prefix.
    pub fn data(&self, node: NodeId, key: &str) -> Option<&str> {
        self.attr(node, &format!("data-{key}"))
    }

    pub fn set_data(&mut self, node: NodeId, key: &str, value: impl Into<String>) {
        self.set_attr(node, &format!("data-{key}"), value);
    }

    pub fn element_id(&self, node: NodeId) -> Option<&str> {
        self.attr(node, "id")
    }

    pub fn set_element_id(&mut self, node: NodeId, id: impl Into<String>) {
        self.set_attr(node, "id", id);
    }

    /// Find the first element in the document with the given `id` attribute.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&node| self.element_id(node) == Some(id))
    }

    // Classes

    pub fn classes(&self, node: NodeId) -> &[String] {
        &self.node(node).classes
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node).classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if !self.has_class(node, class) {
            self.node_mut(node).classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        self.node_mut(node).classes.retain(|c| c != class);
    }

    /// Add or remove `class` depending on `on`.
    pub fn set_class(&mut self, node: NodeId, class: &str, on: bool) {
        if on {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }

    // Text

    /// The node's own text, excluding descendants.
    pub fn text(&self, node: NodeId) -> &str {
        &self.node(node).text
    }

    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        self.node_mut(node).text = text.into();
    }

    /// Own text followed by the text content of every child, in order.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        let data = self.node(node);
        out.push_str(&data.text);
        for &child in &data.children {
            self.collect_text(child, out);
        }
    }

    // -------------------------------------------------------------------------
    // Form state
    // -------------------------------------------------------------------------

    pub fn is_disabled(&self, node: NodeId) -> bool {
        self.node(node).disabled
    }

    pub fn set_disabled(&mut self, node: NodeId, disabled: bool) {
        self.node_mut(node).disabled = disabled;
    }

    pub fn is_selected(&self, node: NodeId) -> bool {
        self.node(node).selected
    }

    pub fn set_selected(&mut self, node: NodeId, selected: bool) {
        self.node_mut(node).selected = selected;
    }

    /// The form value of a node.
    ///
    /// For an `<option>` this is its `value` attribute, falling back to its
    /// text content. For a `<select>` it is the value of the selected option,
    /// or an empty string when nothing is selected.
    pub fn value(&self, node: NodeId) -> String {
        if self.tag(node) == "select" {
            return self
                .selected_index(node)
                .and_then(|index| self.options(node).get(index).copied())
                .map(|option| self.value(option))
                .unwrap_or_default();
        }
        self.attr(node, "value")
            .map(str::to_string)
            .unwrap_or_else(|| self.text_content(node))
    }

    /// Every `<option>` below `select`, flattened across groups in document
    /// order.
    pub fn options(&self, select: NodeId) -> Vec<NodeId> {
        self.descendants(select)
            .into_iter()
            .filter(|&node| self.tag(node) == "option")
            .collect()
    }

    /// Position of the selected option in the flattened option list.
    ///
    /// When several options carry the selected flag the last one wins, as it
    /// does for a native single-select.
    pub fn selected_index(&self, select: NodeId) -> Option<usize> {
        self.options(select)
            .iter()
            .rposition(|&option| self.is_selected(option))
    }

    /// Select exactly the option at `index`, clearing every other option.
    /// `None` clears the selection.
    pub fn set_selected_index(&mut self, select: NodeId, index: Option<usize>) {
        let options = self.options(select);
        for (i, option) in options.into_iter().enumerate() {
            self.set_selected(option, Some(i) == index);
        }
    }

    // -------------------------------------------------------------------------
    // Tree
    // -------------------------------------------------------------------------

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.node(node).children
    }

    /// Position of `node` among its parent's children.
    pub fn index_in_parent(&self, node: NodeId) -> Option<usize> {
        let parent = self.parent(node)?;
        self.children(parent).iter().position(|&c| c == node)
    }

    /// Ancestors of `node`, nearest first, excluding `node` itself.
    pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.parent(node);
        while let Some(id) = current {
            out.push(id);
            current = self.parent(id);
        }
        out
    }

    /// Descendants of `node` in document (pre-)order, excluding `node`.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// True if `ancestor` is `node` or one of its ancestors.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        node == ancestor || self.ancestors(node).contains(&ancestor)
    }

    /// True if `node` is attached to the document tree.
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.contains(self.root, node)
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.node_mut(node).parent.take() {
            self.node_mut(parent).children.retain(|&c| c != node);
        }
    }

    /// Append `child` as the last child of `parent`, moving it out of its
    /// current position. Returns false (and changes nothing) if the move
    /// would create a cycle.
    pub fn append(&mut self, parent: NodeId, child: NodeId) -> bool {
        if self.contains(child, parent) {
            log::warn!("[dom] refusing to append {child} into its own subtree {parent}");
            return false;
        }
        self.detach(child);
        self.node_mut(parent).children.push(child);
        self.node_mut(child).parent = Some(parent);
        true
    }

    /// Insert `node` immediately before `reference` in `reference`'s parent.
    ///
    /// Returns false if `reference` is detached or the move would create a
    /// cycle.
    pub fn insert_before(&mut self, reference: NodeId, node: NodeId) -> bool {
        if node == reference {
            return true;
        }
        let Some(parent) = self.parent(reference) else {
            log::debug!("[dom] insert_before on detached reference {reference}");
            return false;
        };
        if self.contains(node, parent) {
            log::warn!("[dom] refusing to insert {node} into its own subtree {parent}");
            return false;
        }
        self.detach(node);
        let position = self
            .children(parent)
            .iter()
            .position(|&c| c == reference)
            .unwrap_or(0);
        self.node_mut(parent).children.insert(position, node);
        self.node_mut(node).parent = Some(parent);
        true
    }

    /// Detach `node` from its parent. The node and its subtree stay alive.
    pub fn remove(&mut self, node: NodeId) {
        self.detach(node);
    }

    // -------------------------------------------------------------------------
    // Serialization
    // -------------------------------------------------------------------------

    /// Serialize `node` and its subtree as HTML-like markup.
    ///
    /// Attributes are emitted in a fixed order (`class`, then the rest
    /// sorted by name, then the `disabled`/`selected` flags), so two
    /// structurally equal subtrees serialize identically.
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let data = self.node(node);
        out.push('<');
        out.push_str(&data.tag);
        if !data.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", escape(&data.classes.join(" "))));
        }
        for (name, value) in &data.attributes {
            out.push_str(&format!(" {}=\"{}\"", name, escape(value)));
        }
        if data.disabled {
            out.push_str(" disabled");
        }
        if data.selected {
            out.push_str(" selected");
        }
        out.push('>');
        out.push_str(&escape(&data.text));
        for &child in &data.children {
            self.write_html(child, out);
        }
        out.push_str("</");
        out.push_str(&data.tag);
        out.push('>');
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
