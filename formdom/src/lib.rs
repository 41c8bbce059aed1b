//! A single-threaded arena DOM for form widgets.
//!
//! `formdom` provides the small capability surface a widget layer needs from
//! a document: element creation and attributes, class toggling, tree
//! mutation and traversal, selector queries, host-reported geometry, hit
//! testing, bubbling event dispatch and zero-delay timers.

pub mod document;
pub mod element;
pub mod error;
pub mod event;
pub mod hit;
pub mod layout;
pub mod selector;
pub mod timer;

pub use document::{Document, NodeId};
pub use element::Element;
pub use error::SelectorError;
pub use event::{Event, EventKind, Listener, ListenerId};
pub use hit::hit_test;
pub use layout::{LayoutFn, Rect};
pub use selector::Selector;
pub use timer::{Task, TimerId};
