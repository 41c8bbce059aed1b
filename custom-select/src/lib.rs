//! Custom-styled dropdowns that stand in for native single-select controls.
//!
//! [`CustomSelect`] wraps each target `<select>` in generated markup (a
//! container, an option list mirroring the control's options and groups, and
//! a label) and moves the native control inside it. The native control keeps
//! its role as the source of truth: committing an option writes its
//! selection and dispatches a `change` event on it.
//!
//! Widgets toggle on container clicks, close on clicks outside their box
//! (one shared body listener, registered on the turn after the first widget
//! opens) and flip their list above the container when it would overflow the
//! viewport bottom.
//!
//! ```
//! use custom_select::{CustomSelect, Options};
//! use formdom::{Document, Element};
//!
//! let mut doc = Document::new();
//! let body = doc.body();
//! let select = doc.insert(
//!     body,
//!     Element::select()
//!         .child(Element::option("A"))
//!         .child(Element::option("B").selected(true))
//!         .child(Element::option("C")),
//! );
//!
//! let selects = CustomSelect::new(&mut doc, select, Options::new()).unwrap();
//! let widget = selects.widget(select).unwrap();
//!
//! doc.click(widget.root());
//! let items = doc.children(widget.list()).to_vec();
//! doc.click(items[2]);
//!
//! assert_eq!(doc.selected_index(select), Some(2));
//! assert_eq!(doc.text(widget.label()), "C");
//! assert!(!selects.is_open(select));
//! ```

pub mod classes;
mod controller;
pub mod error;
mod factory;
mod manager;
pub mod options;
pub mod tree;
pub mod widget;

pub use controller::{VIEWPORT_MARGIN, flip_above};
pub use error::{Error, Result};
pub use manager::{CustomSelect, Targets};
pub use options::{KEYS, OnChange, Options, PartialOptions, kebab_case};
pub use tree::{Group, Leaf, OptionNode, OptionTree};
pub use widget::{ChangeEvent, Widget, WidgetState};
