use std::rc::Rc;

use crate::document::{Document, NodeId};
use crate::hit::hit_test;

/// The event types the document dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    MouseMove,
    Change,
}

impl EventKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::MouseMove => "mousemove",
            Self::Change => "change",
        }
    }
}

/// A dispatched event. Listeners receive it mutably so they can stop
/// propagation or prevent the default action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    /// Node the event was dispatched on.
    pub target: NodeId,
    /// Node whose listener is currently running.
    pub current_target: NodeId,
    pub client_x: i32,
    pub client_y: i32,
    pub bubbles: bool,
    pub cancelable: bool,
    propagation_stopped: bool,
    default_prevented: bool,
}

impl Event {
    /// A bubbling event. Pointer events are cancelable, `change` is not.
    pub fn new(kind: EventKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            current_target: target,
            client_x: 0,
            client_y: 0,
            bubbles: true,
            cancelable: kind != EventKind::Change,
            propagation_stopped: false,
            default_prevented: false,
        }
    }

    pub fn click(target: NodeId, x: i32, y: i32) -> Self {
        Self::new(EventKind::Click, target).at(x, y)
    }

    pub fn mouse_move(target: NodeId, x: i32, y: i32) -> Self {
        Self::new(EventKind::MouseMove, target).at(x, y)
    }

    pub fn change(target: NodeId) -> Self {
        Self::new(EventKind::Change, target)
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.client_x = x;
        self.client_y = y;
        self
    }

    pub fn bubbles(mut self, bubbles: bool) -> Self {
        self.bubbles = bubbles;
        self
    }

    /// Stop the event from reaching ancestors. Remaining listeners on the
    /// current node still run.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// No-op for non-cancelable events.
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Listener callback. It receives the document so it can mutate the tree,
/// dispatch further events or schedule timers.
pub type Listener = Rc<dyn Fn(&mut Document, &mut Event)>;

/// Handle returned by [`Document::on`], used to unbind the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

pub(crate) struct ListenerEntry {
    id: ListenerId,
    node: NodeId,
    kind: EventKind,
    callback: Listener,
}

impl Document {
    /// Bind `callback` to `kind` events reaching `node`.
    pub fn on(
        &mut self,
        node: NodeId,
        kind: EventKind,
        callback: impl Fn(&mut Document, &mut Event) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(ListenerEntry {
            id,
            node,
            kind,
            callback: Rc::new(callback),
        });
        log::trace!("[events] bound {} listener {:?} on {}", kind.name(), id, node);
        id
    }

    /// Unbind a listener. Unbinding an unknown or already removed listener
    /// is a no-op and returns false.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|entry| entry.id != id);
        let removed = self.listeners.len() != before;
        if removed {
            log::trace!("[events] unbound listener {:?}", id);
        }
        removed
    }

    pub fn has_listener(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|entry| entry.id == id)
    }

    /// Number of `kind` listeners bound directly on `node`.
    pub fn listener_count(&self, node: NodeId, kind: EventKind) -> usize {
        self.listeners
            .iter()
            .filter(|entry| entry.node == node && entry.kind == kind)
            .count()
    }

    /// Total number of bound listeners in the document.
    pub fn total_listeners(&self) -> usize {
        self.listeners.len()
    }

    /// Dispatch `event` on its target and, if it bubbles, on every ancestor.
    ///
    /// Listeners run in registration order. A listener unbound while the
    /// event is in flight does not run. Listeners are collected per node when
    /// the event reaches it, so one bound on an ancestor mid-dispatch will
    /// still see this event. Returns the event after dispatch.
    pub fn dispatch(&mut self, mut event: Event) -> Event {
        let mut path = vec![event.target];
        if event.bubbles {
            path.extend(self.ancestors(event.target));
        }

        for node in path {
            let snapshot: Vec<(ListenerId, Listener)> = self
                .listeners
                .iter()
                .filter(|entry| entry.node == node && entry.kind == event.kind)
                .map(|entry| (entry.id, Rc::clone(&entry.callback)))
                .collect();

            for (id, callback) in snapshot {
                if !self.has_listener(id) {
                    continue;
                }
                event.current_target = node;
                callback(self, &mut event);
            }

            if event.propagation_stopped {
                break;
            }
        }

        event.current_target = event.target;
        event
    }

    /// Click at the center of `node`'s rect (or the origin if it has none).
    pub fn click(&mut self, node: NodeId) -> Event {
        let (x, y) = self.rect(node).map(|r| r.center()).unwrap_or((0, 0));
        self.dispatch(Event::click(node, x, y))
    }

    /// Click at a viewport point, targeting whatever is hit there (or
    /// `body` when nothing is).
    pub fn click_at(&mut self, x: i32, y: i32) -> Event {
        let target = hit_test(self, x, y).unwrap_or(self.body());
        self.dispatch(Event::click(target, x, y))
    }

    /// Move the pointer over the center of `node`.
    pub fn hover(&mut self, node: NodeId) -> Event {
        let (x, y) = self.rect(node).map(|r| r.center()).unwrap_or((0, 0));
        self.dispatch(Event::mouse_move(node, x, y))
    }
}
