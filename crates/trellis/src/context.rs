use crate::{
    NodeId,
    error::Result,
    geom::Rect,
    input::focus::FocusManager,
    tree::Core,
};

/// Mutable context handed to widget callbacks.
pub trait Context {
    /// The node the callback runs for.
    fn node_id(&self) -> NodeId;

    /// The node's bounds, relative to its parent.
    fn bounds(&self) -> Rect;

    /// Does this node hold keyboard focus?
    fn is_focused(&self) -> bool;

    /// Mark this node's layout dirty.
    fn invalidate(&mut self) {
        let id = self.node_id();
        self.invalidate_node(id);
    }

    /// Mark another node's layout dirty.
    fn invalidate_node(&mut self, node: NodeId);

    /// Request a repaint without a layout change.
    fn redraw(&mut self);

    /// Ask for keyboard focus. The request is applied once the current
    /// dispatch returns.
    fn request_focus(&mut self);

    /// Schedule a node for deletion. The node is detached immediately and
    /// purged at the start of the next tick.
    fn delete(&mut self, node: NodeId) -> Result<()>;

    /// Close a popup. Closing an already-closed or deleted popup is a no-op.
    fn close(&mut self, node: NodeId) -> Result<()>;
}

/// The `Context` implementation backed by the tree.
pub(crate) struct CoreContext<'a> {
    /// Tree access.
    pub(crate) core: &'a mut Core,
    /// The node the callback runs for.
    pub(crate) node: NodeId,
}

impl<'a> CoreContext<'a> {
    /// Construct a context for a node.
    pub(crate) fn new(core: &'a mut Core, node: NodeId) -> Self {
        Self { core, node }
    }
}

impl Context for CoreContext<'_> {
    fn node_id(&self) -> NodeId {
        self.node
    }

    fn bounds(&self) -> Rect {
        self.core
            .nodes
            .get(self.node)
            .map(|n| n.bounds)
            .unwrap_or_default()
    }

    fn is_focused(&self) -> bool {
        self.core.is_focused(self.node)
    }

    fn invalidate_node(&mut self, node: NodeId) {
        self.core.invalidate(node);
    }

    fn redraw(&mut self) {
        if let Some(n) = self.core.nodes.get_mut(self.node) {
            n.needs_redraw = true;
        }
        self.core.redraw = true;
    }

    fn request_focus(&mut self) {
        self.core.pending_focus = Some(self.node);
    }

    fn delete(&mut self, node: NodeId) -> Result<()> {
        self.core.delete(node)
    }

    fn close(&mut self, node: NodeId) -> Result<()> {
        self.core.close_popup(node)
    }
}
