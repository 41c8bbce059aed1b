//! Option tree - a typed mirror of a native select's options and groups.

use formdom::{Document, NodeId};

/// A selectable option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    pub label: String,
    pub value: String,
    pub disabled: bool,
    pub selected: bool,
    /// Position among all leaves in document order, matching the native
    /// control's flattened option list.
    pub source_index: usize,
}

/// A non-selectable group of options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub label: String,
    pub children: Vec<OptionNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionNode {
    Leaf(Leaf),
    Group(Group),
}

impl OptionNode {
    pub fn label(&self) -> &str {
        match self {
            Self::Leaf(leaf) => &leaf.label,
            Self::Group(group) => &group.label,
        }
    }
}

/// The option tree of one native control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionTree {
    pub nodes: Vec<OptionNode>,
}

impl OptionTree {
    /// Read the direct children of `select` into a tree.
    ///
    /// Options become leaves, groups recurse; anything else is skipped.
    /// Leaves inside a disabled group are disabled. If several options are
    /// flagged selected only the last keeps the flag.
    pub fn from_select(doc: &Document, select: NodeId) -> Self {
        let mut next_index = 0;
        let mut tree = Self {
            nodes: read_children(doc, select, false, &mut next_index),
        };
        let last_selected = tree
            .leaves()
            .into_iter()
            .rev()
            .find(|l| l.selected)
            .map(|l| l.source_index);
        if let Some(index) = last_selected {
            tree.select(index);
        }
        tree
    }

    /// Leaves in document order.
    pub fn leaves(&self) -> Vec<&Leaf> {
        let mut out = Vec::new();
        collect_leaves(&self.nodes, &mut out);
        out
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().len()
    }

    pub fn group_count(&self) -> usize {
        count_groups(&self.nodes)
    }

    pub fn leaf(&self, source_index: usize) -> Option<&Leaf> {
        self.leaves().into_iter().find(|l| l.source_index == source_index)
    }

    pub fn selected(&self) -> Option<&Leaf> {
        self.leaves().into_iter().find(|l| l.selected)
    }

    /// Mark exactly the leaf at `source_index` selected. Returns false (and
    /// leaves the tree untouched) if no such leaf exists.
    pub fn select(&mut self, source_index: usize) -> bool {
        if self.leaf(source_index).is_none() {
            return false;
        }
        for_each_leaf_mut(&mut self.nodes, &mut |leaf| {
            leaf.selected = leaf.source_index == source_index;
        });
        true
    }

    /// Label used when the configuration gives no placeholder: the first
    /// node's label, or the first child's label when the tree opens with a
    /// group. Only one level is descended. A disabled leading option is
    /// still used.
    pub fn placeholder_label(&self) -> Option<&str> {
        match self.nodes.first()? {
            OptionNode::Leaf(leaf) => Some(&leaf.label),
            OptionNode::Group(group) => group.children.first().map(OptionNode::label),
        }
    }
}

fn read_children(
    doc: &Document,
    parent: NodeId,
    disabled: bool,
    next_index: &mut usize,
) -> Vec<OptionNode> {
    let mut nodes = Vec::new();
    for &child in doc.children(parent) {
        match doc.tag(child) {
            "option" => {
                nodes.push(OptionNode::Leaf(Leaf {
                    label: doc.text_content(child),
                    value: doc.value(child),
                    disabled: disabled || doc.is_disabled(child),
                    selected: doc.is_selected(child),
                    source_index: *next_index,
                }));
                *next_index += 1;
            }
            "optgroup" => {
                let group_disabled = disabled || doc.is_disabled(child);
                nodes.push(OptionNode::Group(Group {
                    label: doc.attr(child, "label").unwrap_or_default().to_string(),
                    children: read_children(doc, child, group_disabled, next_index),
                }));
            }
            other => log::trace!("[tree] skipping <{other}> inside {parent}"),
        }
    }
    nodes
}

fn collect_leaves<'a>(nodes: &'a [OptionNode], out: &mut Vec<&'a Leaf>) {
    for node in nodes {
        match node {
            OptionNode::Leaf(leaf) => out.push(leaf),
            OptionNode::Group(group) => collect_leaves(&group.children, out),
        }
    }
}

fn count_groups(nodes: &[OptionNode]) -> usize {
    nodes
        .iter()
        .map(|node| match node {
            OptionNode::Leaf(_) => 0,
            OptionNode::Group(group) => 1 + count_groups(&group.children),
        })
        .sum()
}

fn for_each_leaf_mut(nodes: &mut [OptionNode], f: &mut impl FnMut(&mut Leaf)) {
    for node in nodes {
        match node {
            OptionNode::Leaf(leaf) => f(leaf),
            OptionNode::Group(group) => for_each_leaf_mut(&mut group.children, f),
        }
    }
}
