mod rect;

pub use rect::Rect;

use crate::document::{Document, NodeId};

/// Host layout callback: reports the on-screen rect of a node, if it has one.
pub type LayoutFn = Box<dyn Fn(&Document, NodeId) -> Option<Rect>>;

impl Document {
    /// On-screen rectangle of `node`.
    ///
    /// Explicit rects set with [`set_rect`](Self::set_rect) take precedence
    /// over the host layout callback.
    pub fn rect(&self, node: NodeId) -> Option<Rect> {
        if let Some(rect) = self.rects.get(&node) {
            return Some(*rect);
        }
        self.layout.as_ref().and_then(|layout| layout(self, node))
    }

    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        self.rects.insert(node, rect);
    }

    pub fn clear_rect(&mut self, node: NodeId) {
        self.rects.remove(&node);
    }

    /// Install a layout callback consulted for nodes without an explicit rect.
    pub fn set_layout(&mut self, layout: impl Fn(&Document, NodeId) -> Option<Rect> + 'static) {
        self.layout = Some(Box::new(layout));
    }

    /// Rendered height of `node`, zero when it has no geometry.
    pub fn height(&self, node: NodeId) -> i32 {
        self.rect(node).map(|r| r.height).unwrap_or(0)
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn set_viewport(&mut self, width: i32, height: i32) {
        self.viewport = Rect::from_size(width, height);
    }

    pub fn inner_height(&self) -> i32 {
        self.viewport.height
    }
}
