//! Interaction controller - open/close state, outside clicks, hover and
//! selection commit.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use formdom::{Document, Event, EventKind, ListenerId, NodeId, Rect, Selector, TimerId};

use crate::classes;
use crate::manager::Inner;
use crate::options::OnChange;
use crate::widget::{ChangeEvent, Widget, WidgetState};

/// Minimum gap, in pixels, kept between the list and the viewport edges.
pub const VIEWPORT_MARGIN: i32 = 10;

/// Whether a list of `list_height` should open above a widget at `rect`:
/// it would overflow the viewport bottom when placed below, and fits above.
pub fn flip_above(rect: Rect, list_height: i32, viewport_height: i32) -> bool {
    rect.bottom() + list_height + VIEWPORT_MARGIN > viewport_height
        && rect.top() - list_height > VIEWPORT_MARGIN
}

/// Set or clear the `above` placement flag on a widget.
pub(crate) fn check_viewport(doc: &mut Document, widget: &Widget) {
    let rect = doc.rect(widget.root).unwrap_or_default();
    let list_height = doc.height(widget.list);
    let above = flip_above(rect, list_height, doc.inner_height());
    doc.set_class(widget.root, classes::ABOVE, above);
}

/// Bind the container toggle and the per-item click/hover handlers.
pub(crate) fn bind(doc: &mut Document, me: &Weak<RefCell<Inner>>, widget: &mut Widget, items: &[NodeId]) {
    let weak = me.clone();
    widget.listeners.push(doc.on(widget.root, EventKind::Click, move |doc, event| {
        if let Some(inner) = weak.upgrade() {
            inner.borrow_mut().toggle(doc, event);
        }
    }));

    for &item in items {
        let weak = me.clone();
        widget.listeners.push(doc.on(item, EventKind::Click, move |doc, event| {
            if let Some(inner) = weak.upgrade() {
                option_click(&inner, doc, event);
            }
        }));

        widget.listeners.push(doc.on(item, EventKind::MouseMove, |doc, event| {
            option_hover(doc, event);
        }));
    }
}

/// Shared registration of the body click listener that closes widgets on
/// outside clicks.
///
/// The listener exists while at least one widget is open. Registration is
/// deferred one turn so the click that opened a widget can't close it, and
/// is cancelled if every widget closes before the turn ends.
#[derive(Debug, Default)]
pub(crate) struct OutsideClick {
    open_count: usize,
    listener: Option<ListenerId>,
    pending: Option<TimerId>,
}

impl OutsideClick {
    fn acquire(&mut self, doc: &mut Document, me: &Weak<RefCell<Inner>>) {
        self.open_count += 1;
        if self.open_count > 1 || self.listener.is_some() || self.pending.is_some() {
            return;
        }

        let weak = me.clone();
        self.pending = Some(doc.set_timeout(move |doc| {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().bind_outside_click(doc);
            }
        }));
    }

    pub(crate) fn release(&mut self, doc: &mut Document) {
        self.open_count = self.open_count.saturating_sub(1);
        if self.open_count == 0 {
            self.unbind(doc);
        }
    }

    /// Drop the listener and any pending registration. Safe to call when
    /// nothing is bound.
    pub(crate) fn reset(&mut self, doc: &mut Document) {
        self.open_count = 0;
        self.unbind(doc);
    }

    fn unbind(&mut self, doc: &mut Document) {
        if let Some(timer) = self.pending.take() {
            doc.clear_timeout(timer);
        }
        if let Some(listener) = self.listener.take() {
            doc.off(listener);
            log::debug!("[controller] outside-click listener unbound");
        }
    }
}

impl Inner {
    fn position_of_root(&self, root: NodeId) -> Option<usize> {
        self.widgets.iter().position(|w| w.root == root)
    }

    pub(crate) fn position_of_source(&self, source: NodeId) -> Option<usize> {
        self.widgets.iter().position(|w| w.source == source)
    }

    /// Container click: open a closed widget, close an open one.
    fn toggle(&mut self, doc: &mut Document, event: &mut Event) {
        event.prevent_default();
        let Some(index) = self.position_of_root(event.current_target) else {
            log::debug!("[controller] click on unmanaged container {}", event.current_target);
            return;
        };
        match self.widgets[index].state {
            WidgetState::Closed => self.open_at(doc, index),
            WidgetState::Open => self.blur_at(doc, index),
        }
    }

    pub(crate) fn open_source(&mut self, doc: &mut Document, source: NodeId) {
        if let Some(index) = self.position_of_source(source) {
            self.open_at(doc, index);
        }
    }

    pub(crate) fn blur_source(&mut self, doc: &mut Document, source: NodeId) {
        if let Some(index) = self.position_of_source(source) {
            self.blur_at(doc, index);
        }
    }

    /// Close the widget owning `item`.
    fn blur_owner(&mut self, doc: &mut Document, item: NodeId) {
        let Some(root) = doc.closest(item, &Selector::class(classes::SELECT)) else {
            return;
        };
        if let Some(index) = self.position_of_root(root) {
            self.blur_at(doc, index);
        }
    }

    fn open_at(&mut self, doc: &mut Document, index: usize) {
        let widget = &mut self.widgets[index];
        if widget.state == WidgetState::Open || doc.has_class(widget.root, classes::DISABLED) {
            return;
        }

        check_viewport(doc, widget);
        doc.add_class(widget.root, classes::OPEN);
        widget.state = WidgetState::Open;
        log::debug!("[controller] opened {}", widget.root);

        self.outside.acquire(doc, &self.me);
    }

    pub(crate) fn blur_at(&mut self, doc: &mut Document, index: usize) {
        let widget = &mut self.widgets[index];
        if widget.state == WidgetState::Closed {
            return;
        }

        doc.remove_class(widget.root, classes::OPEN);
        widget.state = WidgetState::Closed;
        log::debug!("[controller] closed {}", widget.root);

        self.outside.release(doc);
    }

    /// Deferred half of opening: bind the body listener if a widget is
    /// still open.
    fn bind_outside_click(&mut self, doc: &mut Document) {
        self.outside.pending = None;
        if self.outside.open_count == 0 || self.outside.listener.is_some() {
            return;
        }

        let weak = self.me.clone();
        let body = doc.body();
        self.outside.listener = Some(doc.on(body, EventKind::Click, move |doc, event| {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().try_to_blur(doc, event);
            }
        }));
        log::debug!("[controller] outside-click listener bound");
    }

    /// Body click: close every open widget whose box doesn't contain the
    /// click. Each widget is tested on its own.
    fn try_to_blur(&mut self, doc: &mut Document, event: &mut Event) {
        let (x, y) = (event.client_x, event.client_y);
        for index in 0..self.widgets.len() {
            let widget = &self.widgets[index];
            if widget.state != WidgetState::Open {
                continue;
            }
            let inside = doc
                .rect(widget.root)
                .is_some_and(|rect| rect.contains_inclusive(x, y));
            if !inside {
                log::trace!("[controller] click at ({x}, {y}) is outside {}", widget.root);
                self.blur_at(doc, index);
            }
        }
    }

    /// Write the clicked option back to the native control and update the
    /// visible state. Returns what the caller needs to notify observers, or
    /// `None` when the click commits nothing.
    fn commit(&mut self, doc: &mut Document, option: NodeId) -> Option<Commit> {
        if doc.has_class(option, classes::DISABLED) {
            log::trace!("[controller] click on disabled option {option} ignored");
            return None;
        }

        let root = doc.closest(option, &Selector::class(classes::SELECT))?;
        let Some(position) = self.position_of_root(root) else {
            log::debug!("[controller] option {option} belongs to unmanaged {root}");
            return None;
        };
        let Some(index) = doc.data(option, "index").and_then(|raw| raw.parse::<usize>().ok()) else {
            log::warn!("[controller] option {option} has no source index");
            return None;
        };

        let widget = &mut self.widgets[position];
        if !widget.tree.select(index) {
            log::warn!("[controller] source index {index} not in the tree of {}", widget.source);
            return None;
        }

        let previous = doc.find(root, &Selector::class(classes::OPTION).and_class(classes::SELECTED));
        for item in previous {
            doc.remove_class(item, classes::SELECTED);
        }
        doc.add_class(option, classes::SELECTED);

        doc.set_selected_index(widget.source, Some(index));

        let (label, value) = widget
            .tree
            .leaf(index)
            .map(|leaf| (leaf.label.clone(), leaf.value.clone()))
            .unwrap_or_default();
        doc.set_text(widget.label, label.as_str());

        log::debug!(
            "[controller] committed index {} ({:?}) on {}",
            index,
            value,
            widget.source
        );

        Some(Commit {
            change: ChangeEvent {
                source: widget.source,
                index,
                value,
                label,
            },
            on_change: widget.options.on_change.clone(),
        })
    }
}

struct Commit {
    change: ChangeEvent,
    on_change: Option<OnChange>,
}

/// Option click. The shared state is only borrowed while mutating, so
/// change listeners and the callback may call back into the manager.
fn option_click(inner: &Rc<RefCell<Inner>>, doc: &mut Document, event: &mut Event) {
    event.stop_propagation();

    // Group headers have no source index: nothing to commit, but the
    // widget still closes.
    let option = event.current_target;
    if doc.has_class(option, classes::GROUP) {
        inner.borrow_mut().blur_owner(doc, option);
        return;
    }

    let commit = inner.borrow_mut().commit(doc, option);
    let Some(commit) = commit else {
        return;
    };

    let source = commit.change.source;
    doc.dispatch(Event::change(source));
    if let Some(callback) = &commit.on_change {
        callback(&commit.change);
    }

    inner.borrow_mut().blur_source(doc, source);
}

/// Option hover: mark the item active among its siblings. Disabled leaves
/// are skipped; group headers stay hoverable.
fn option_hover(doc: &mut Document, event: &mut Event) {
    let option = event.current_target;
    if doc.has_class(option, classes::DISABLED) && !doc.has_class(option, classes::GROUP) {
        return;
    }
    let Some(list) = doc.parent(option) else {
        return;
    };

    let siblings: Vec<NodeId> = doc
        .children(list)
        .iter()
        .copied()
        .filter(|&item| doc.has_class(item, classes::OPTION))
        .collect();
    for item in siblings {
        doc.remove_class(item, classes::ACTIVE);
    }
    doc.add_class(option, classes::ACTIVE);
}
