//! Widget state.

use formdom::{ListenerId, NodeId};

use crate::options::Options;
use crate::tree::OptionTree;

/// Open/closed state of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetState {
    #[default]
    Closed,
    Open,
}

/// A committed selection, passed to the `on_change` callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// The native control.
    pub source: NodeId,
    /// Position of the chosen option in the native control's flattened
    /// option list.
    pub index: usize,
    pub value: String,
    pub label: String,
}

/// One custom select built around a native control.
///
/// The generated `root` has custody of the `source` element: the native
/// control lives inside it for as long as the widget exists.
#[derive(Debug, Clone)]
pub struct Widget {
    pub(crate) source: NodeId,
    pub(crate) root: NodeId,
    pub(crate) list: NodeId,
    pub(crate) label: NodeId,
    pub(crate) tree: OptionTree,
    pub(crate) state: WidgetState,
    pub(crate) options: Options,
    pub(crate) listeners: Vec<ListenerId>,
}

impl Widget {
    /// The native control this widget mirrors.
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// The generated container (`div.cs-select`).
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The top-level option list (`ul.cs-list`).
    pub fn list(&self) -> NodeId {
        self.list
    }

    /// The element holding the visible label text.
    pub fn label(&self) -> NodeId {
        self.label
    }

    pub fn tree(&self) -> &OptionTree {
        &self.tree
    }

    pub fn state(&self) -> WidgetState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == WidgetState::Open
    }

    /// The configuration this widget was built with, placeholder resolved.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Listeners bound on the generated markup.
    pub fn listeners(&self) -> &[ListenerId] {
        &self.listeners
    }
}
