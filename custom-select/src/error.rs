//! Error types

use formdom::{NodeId, SelectorError};
use thiserror::Error;

/// Errors raised while setting up a [`CustomSelect`](crate::CustomSelect).
///
/// Interaction never fails: once widgets are built, clicks and hovers that
/// hit unexpected structure are logged and ignored.
#[derive(Debug, Error)]
pub enum Error {
    /// The target selector could not be parsed.
    #[error("invalid target selector: {0}")]
    Selector(#[from] SelectorError),

    /// A target is not a `<select>` element.
    #[error("{node} is a <{tag}>, not a <select>")]
    NotASelect { node: NodeId, tag: String },

    /// A target allows multiple selection.
    #[error("{0} is a multiple-selection control")]
    Multiple(NodeId),

    /// A target has no options to mirror.
    #[error("{0} has no options")]
    NoOptions(NodeId),

    /// A target is listed twice or already wrapped by a custom select.
    #[error("{0} is already managed by a custom select")]
    AlreadyManaged(NodeId),

    /// A JSON configuration object failed to parse.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
