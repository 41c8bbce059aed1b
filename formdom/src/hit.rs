use crate::document::{Document, NodeId};

/// Find the deepest element under `body` whose rect contains the point.
///
/// Nodes without geometry are never hit themselves but their children are
/// still searched, since a positioned child may sit outside its parent's box.
pub fn hit_test(doc: &Document, x: i32, y: i32) -> Option<NodeId> {
    hit_test_node(doc, doc.body(), x, y)
}

fn hit_test_node(doc: &Document, node: NodeId, x: i32, y: i32) -> Option<NodeId> {
    // Check children in reverse order (last rendered = on top)
    for &child in doc.children(node).iter().rev() {
        if let Some(id) = hit_test_node(doc, child, x, y) {
            return Some(id);
        }
    }

    match doc.rect(node) {
        Some(rect) if rect.contains(x, y) => Some(node),
        _ => None,
    }
}
