//! Manager - the public entry point holding every managed widget.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::{Rc, Weak};

use formdom::{Document, NodeId, Selector};

use crate::classes;
use crate::controller::OutsideClick;
use crate::error::{Error, Result};
use crate::factory;
use crate::options::Options;
use crate::widget::Widget;

/// Which native controls a [`CustomSelect`] takes over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Targets {
    /// Every element in the document matching a selector.
    Selector(String),
    /// Explicit nodes, in order.
    Nodes(Vec<NodeId>),
}

impl From<&str> for Targets {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.to_string())
    }
}

impl From<String> for Targets {
    fn from(selector: String) -> Self {
        Self::Selector(selector)
    }
}

impl From<NodeId> for Targets {
    fn from(node: NodeId) -> Self {
        Self::Nodes(vec![node])
    }
}

impl From<Vec<NodeId>> for Targets {
    fn from(nodes: Vec<NodeId>) -> Self {
        Self::Nodes(nodes)
    }
}

impl From<&[NodeId]> for Targets {
    fn from(nodes: &[NodeId]) -> Self {
        Self::Nodes(nodes.to_vec())
    }
}

impl Targets {
    fn resolve(&self, doc: &Document) -> Result<Vec<NodeId>> {
        match self {
            Self::Selector(selector) => {
                let selector = Selector::parse(selector)?;
                Ok(doc.query_selector_all(&selector))
            }
            Self::Nodes(nodes) => Ok(nodes.clone()),
        }
    }
}

/// State shared between the manager handle and the listeners it binds.
#[derive(Debug)]
pub(crate) struct Inner {
    pub(crate) me: Weak<RefCell<Inner>>,
    pub(crate) defaults: Options,
    pub(crate) widgets: Vec<Widget>,
    pub(crate) outside: OutsideClick,
}

/// Replaces native single-select controls with custom dropdowns and keeps
/// them in sync.
///
/// The native control stays authoritative: it is moved inside the generated
/// container, every commit writes its selection and dispatches a `change`
/// event on it. Cloning the handle shares the same widgets.
///
/// # Example
///
/// ```
/// use custom_select::{CustomSelect, Options};
/// use formdom::{Document, Element};
///
/// let mut doc = Document::new();
/// let body = doc.body();
/// doc.insert(
///     body,
///     Element::select()
///         .class("fancy")
///         .child(Element::option("Red"))
///         .child(Element::option("Blue").selected(true)),
/// );
///
/// let selects = CustomSelect::new(&mut doc, "select.fancy", Options::new()).unwrap();
/// let widget = selects.widgets().remove(0);
/// assert_eq!(doc.text(widget.label()), "Blue");
/// ```
#[derive(Debug, Clone)]
pub struct CustomSelect {
    inner: Rc<RefCell<Inner>>,
}

impl CustomSelect {
    /// Build a widget for every target.
    ///
    /// All targets are validated before anything is built, so an error
    /// leaves the document untouched. A selector matching nothing yields an
    /// empty manager.
    pub fn new(doc: &mut Document, targets: impl Into<Targets>, options: Options) -> Result<Self> {
        let sources = targets.into().resolve(doc)?;
        validate(doc, &sources)?;

        let inner = Rc::new_cyclic(|me| {
            RefCell::new(Inner {
                me: me.clone(),
                defaults: options,
                widgets: Vec::with_capacity(sources.len()),
                outside: OutsideClick::default(),
            })
        });

        {
            let mut state = inner.borrow_mut();
            let Inner {
                me,
                defaults,
                widgets,
                ..
            } = &mut *state;
            for source in sources {
                let resolved = defaults.resolve_for(doc, source);
                widgets.push(factory::build(doc, source, resolved, me));
            }
            log::debug!("[manager] managing {} control(s)", widgets.len());
        }

        Ok(Self { inner })
    }

    /// Rebuild every widget from the current state of its native control,
    /// re-reading data-attribute overrides. Open widgets come back closed.
    ///
    /// The replaced markup is detached and its explicit rects are cleared,
    /// but its nodes stay in the document arena: each call grows the
    /// document by one generated subtree per widget.
    pub fn update(&self, doc: &mut Document) {
        let mut state = self.inner.borrow_mut();
        let Inner {
            me,
            defaults,
            widgets,
            outside,
        } = &mut *state;

        for widget in widgets.iter_mut() {
            factory::unbind(doc, widget);
            if widget.is_open() {
                outside.release(doc);
            }
            factory::unwrap(doc, widget);

            let resolved = defaults.resolve_for(doc, widget.source);
            *widget = factory::build(doc, widget.source, resolved, me);
        }
        log::debug!("[manager] rebuilt {} widget(s)", widgets.len());
    }

    /// Tear down one widget (by its native control) or, with `None`, every
    /// widget plus the shared outside-click listener.
    ///
    /// Teardown unbinds listeners and forgets the widget. The generated
    /// markup stays in place. Returns false if `target` is not managed.
    pub fn destroy(&self, doc: &mut Document, target: Option<NodeId>) -> bool {
        let mut state = self.inner.borrow_mut();

        let Some(source) = target else {
            for widget in state.widgets.iter_mut() {
                factory::unbind(doc, widget);
            }
            state.outside.reset(doc);
            let count = state.widgets.len();
            state.widgets.clear();
            log::debug!("[manager] destroyed all {count} widget(s)");
            return true;
        };

        let Some(index) = state.position_of_source(source) else {
            log::debug!("[manager] destroy: {source} is not managed");
            return false;
        };
        state.blur_at(doc, index);
        let mut widget = state.widgets.remove(index);
        factory::unbind(doc, &mut widget);
        log::debug!("[manager] destroyed widget for {source}");
        true
    }

    /// Open the widget for `source`, as a click on its container would.
    pub fn open(&self, doc: &mut Document, source: NodeId) {
        self.inner.borrow_mut().open_source(doc, source);
    }

    pub fn close(&self, doc: &mut Document, source: NodeId) {
        self.inner.borrow_mut().blur_source(doc, source);
    }

    pub fn is_open(&self, source: NodeId) -> bool {
        self.inner
            .borrow()
            .widgets
            .iter()
            .any(|w| w.source == source && w.is_open())
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().widgets.is_empty()
    }

    /// Managed native controls, in build order.
    pub fn sources(&self) -> Vec<NodeId> {
        self.inner.borrow().widgets.iter().map(|w| w.source).collect()
    }

    /// A snapshot of the widget built for `source`.
    pub fn widget(&self, source: NodeId) -> Option<Widget> {
        self.inner
            .borrow()
            .widgets
            .iter()
            .find(|w| w.source == source)
            .cloned()
    }

    /// Snapshots of every widget, in build order.
    pub fn widgets(&self) -> Vec<Widget> {
        self.inner.borrow().widgets.clone()
    }
}

fn validate(doc: &Document, sources: &[NodeId]) -> Result<()> {
    let mut seen = HashSet::new();
    for &node in sources {
        let tag = doc.tag(node);
        if tag != "select" {
            return Err(Error::NotASelect {
                node,
                tag: tag.to_string(),
            });
        }
        if doc.has_attr(node, "multiple") {
            return Err(Error::Multiple(node));
        }
        if doc.options(node).is_empty() {
            return Err(Error::NoOptions(node));
        }

        let wrapped = doc
            .parent(node)
            .is_some_and(|parent| doc.has_class(parent, classes::SELECT));
        if wrapped || !seen.insert(node) {
            return Err(Error::AlreadyManaged(node));
        }
    }
    Ok(())
}
