//! Widget factory - renders the custom markup around a native control.

use std::cell::RefCell;
use std::rc::Weak;

use formdom::{Document, NodeId};

use crate::classes;
use crate::controller;
use crate::manager::Inner;
use crate::options::Options;
use crate::tree::{OptionNode, OptionTree};
use crate::widget::{Widget, WidgetState};

/// Build a widget around `source`.
///
/// The container is inserted where `source` stood and `source` is moved
/// inside it, after the list and label. Handlers are bound and the
/// viewport check runs once so the initial placement is right.
pub(crate) fn build(
    doc: &mut Document,
    source: NodeId,
    mut options: Options,
    me: &Weak<RefCell<Inner>>,
) -> Widget {
    let tree = OptionTree::from_select(doc, source);

    if options.placeholder.is_empty() {
        options.placeholder = tree.placeholder_label().unwrap_or_default().to_string();
    }

    let root = doc.create_element("div");
    if !options.custom_id.is_empty() {
        doc.set_element_id(root, options.custom_id.as_str());
    }
    doc.add_class(root, classes::SELECT);
    for class in options.custom_class.split_whitespace() {
        doc.add_class(root, class);
    }
    if doc.is_disabled(source) {
        doc.add_class(root, classes::DISABLED);
    }

    if !doc.insert_before(source, root) {
        log::debug!("[factory] {source} is detached, building {root} detached too");
    }

    let wrapper = doc.create_element("div");
    doc.add_class(wrapper, classes::WRAPPER);
    doc.append(root, wrapper);

    let list = doc.create_element("ul");
    doc.add_class(list, classes::LIST);
    doc.append(wrapper, list);

    let mut items = Vec::new();
    render_nodes(doc, list, &tree.nodes, &mut items);

    let label_block = doc.create_element("div");
    doc.add_class(label_block, classes::LABEL);
    let label = doc.create_element("span");
    let text = tree
        .selected()
        .map(|leaf| leaf.label.clone())
        .unwrap_or_else(|| options.placeholder.clone());
    doc.set_text(label, text);
    doc.append(label_block, label);
    doc.append(root, label_block);

    doc.append(root, source);

    log::debug!(
        "[factory] built {} for {} leaves={} groups={} placeholder={:?}",
        root,
        source,
        tree.leaf_count(),
        tree.group_count(),
        options.placeholder
    );

    let mut widget = Widget {
        source,
        root,
        list,
        label,
        tree,
        state: WidgetState::Closed,
        options,
        listeners: Vec::new(),
    };

    controller::bind(doc, me, &mut widget, &items);
    controller::check_viewport(doc, &widget);
    widget
}

/// Render `nodes` into `list` in tree order, collecting every item created.
fn render_nodes(doc: &mut Document, list: NodeId, nodes: &[OptionNode], items: &mut Vec<NodeId>) {
    for node in nodes {
        let item = doc.create_element("li");
        doc.add_class(item, classes::OPTION);

        match node {
            OptionNode::Leaf(leaf) => {
                doc.set_data(item, "value", leaf.value.as_str());
                doc.set_data(item, "index", leaf.source_index.to_string());
                doc.set_text(item, leaf.label.as_str());
                if leaf.disabled {
                    doc.add_class(item, classes::DISABLED);
                }
                if leaf.selected {
                    doc.add_class(item, classes::SELECTED);
                }
                doc.append(list, item);
            }
            OptionNode::Group(group) => {
                doc.add_class(item, classes::GROUP);
                doc.set_text(item, group.label.as_str());
                doc.append(list, item);

                let sublist = doc.create_element("ul");
                doc.add_class(sublist, classes::GROUP_LIST);
                doc.append(item, sublist);
                render_nodes(doc, sublist, &group.children, items);
            }
        }

        items.push(item);
    }
}

/// Put the native control back where the container stands and detach the
/// container, dropping any geometry recorded for the discarded markup.
pub(crate) fn unwrap(doc: &mut Document, widget: &Widget) {
    if !doc.insert_before(widget.root, widget.source) {
        log::debug!(
            "[factory] {} is detached, lifting {} out of it anyway",
            widget.root,
            widget.source
        );
        doc.remove(widget.source);
    }
    for node in std::iter::once(widget.root).chain(doc.descendants(widget.root)) {
        doc.clear_rect(node);
    }
    doc.remove(widget.root);
}

/// Remove every listener bound on the widget's markup.
pub(crate) fn unbind(doc: &mut Document, widget: &mut Widget) {
    for id in widget.listeners.drain(..) {
        doc.off(id);
    }
}
