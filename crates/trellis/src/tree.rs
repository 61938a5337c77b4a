use std::mem;

use slotmap::SlotMap;

use crate::{
    NodeId,
    config::Config,
    context::CoreContext,
    error::{Error, Result},
    event::Event,
    geom::{Point, Rect},
    input::{
        InputState,
        focus::{FocusManager, TabCycle},
    },
    layout::Layout,
    node::{Flags, Kind, Node},
    widget::{EventOutcome, Widget},
};

/// Core state: the node arena, layout bookkeeping and input state.
pub struct Core {
    /// Node storage arena.
    pub(crate) nodes: SlotMap<NodeId, Node>,
    /// Root node ID.
    pub(crate) root: NodeId,
    /// Engine tunables.
    pub(crate) config: Config,
    /// Focus, hover, capture and drag state.
    pub(crate) input: InputState,
    /// Tab cycle, rebuilt every tick.
    pub(crate) tab: TabCycle,
    /// Detached nodes awaiting purge.
    pub(crate) deletions: Vec<NodeId>,
    /// Virtual controls awaiting isolated re-layout.
    pub(crate) measure_queue: Vec<NodeId>,
    /// Invalidations raised while a layout pass was running.
    pub(crate) deferred: Vec<NodeId>,
    /// Nesting depth of measure/arrange calls.
    pub(crate) layout_depth: u32,
    /// Focus requested from inside a widget callback.
    pub(crate) pending_focus: Option<NodeId>,
    /// Something changed since the last render.
    pub(crate) redraw: bool,
}

impl Default for Core {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Core {
    /// Construct a tree holding only a root container.
    pub fn new(config: Config) -> Self {
        let mut nodes = SlotMap::with_key();
        let mut root = Node::new(Kind::Container, Layout::default());
        root.name = "root".into();
        let root = nodes.insert(root);
        Self {
            nodes,
            root,
            config,
            input: InputState::default(),
            tab: TabCycle::default(),
            deletions: Vec::new(),
            measure_queue: Vec::new(),
            deferred: Vec::new(),
            layout_depth: 0,
            pending_focus: None,
            redraw: true,
        }
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Engine tunables.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Does the id resolve to a live node?
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Look up a node, failing on stale ids.
    pub(crate) fn get(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id).ok_or(Error::NodeNotFound(id))
    }

    /// Look up a node mutably, failing on stale ids.
    pub(crate) fn get_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))
    }

    /// A node's parent.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// A node's children, in insertion order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(id)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// A node's bounds relative to its parent.
    pub fn bounds(&self, id: NodeId) -> Result<Rect> {
        Ok(self.get(id)?.bounds)
    }

    /// Is the node's layout dirty?
    pub fn needs_layout(&self, id: NodeId) -> Result<bool> {
        Ok(self.get(id)?.needs_layout)
    }

    /// Find the first node with the given name, in pre-order from the root.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.walk(self.root)
            .into_iter()
            .find(|id| self.nodes[*id].name == name)
    }

    /// Pre-order walk of the subtree at `start`.
    pub fn walk(&self, start: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            out.push(id);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// Is `ancestor` on the parent chain of `id` (or `id` itself)?
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            if c == ancestor {
                return true;
            }
            current = self.parent(c);
        }
        false
    }

    /// Is the node connected to the root?
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.contains(id) && self.is_ancestor(self.root, id)
    }

    /// Is the node attached with no hidden or collapsed node on its chain?
    pub fn is_visible(&self, id: NodeId) -> bool {
        self.chain_all(id, |n| !n.flags.hidden && !n.flags.collapsed)
    }

    /// Is the node attached with no disabled node on its chain?
    pub fn is_enabled(&self, id: NodeId) -> bool {
        self.chain_all(id, |n| !n.flags.disabled)
    }

    /// Check a predicate on every node from `id` up to the root. False if the
    /// chain does not reach the root.
    fn chain_all(&self, id: NodeId, f: impl Fn(&Node) -> bool) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            let Some(node) = self.nodes.get(c) else {
                return false;
            };
            if !f(node) {
                return false;
            }
            if c == self.root {
                return true;
            }
            current = node.parent;
        }
        false
    }

    /// Bounds in canvas coordinates.
    pub fn absolute_bounds(&self, id: NodeId) -> Result<Rect> {
        let node = self.get(id)?;
        let mut r = node.bounds;
        let mut current = node.parent;
        while let Some(pid) = current {
            let parent = self.get(pid)?;
            r = r.shift(parent.bounds.tl.x, parent.bounds.tl.y);
            current = parent.parent;
        }
        Ok(r)
    }

    /// Convert a canvas point into a node's local coordinates.
    pub fn to_local(&self, id: NodeId, p: Point) -> Result<Point> {
        Ok(self.absolute_bounds(id)?.to_local(p))
    }

    /// The area children are placed in: local bounds minus padding.
    pub fn content_rect(&self, id: NodeId) -> Result<Rect> {
        let node = self.get(id)?;
        Ok(node.render_bounds().shrink(node.layout.padding))
    }

    /// Create a node that is not yet part of the tree.
    pub fn create_detached(&mut self, kind: Kind, layout: Layout) -> NodeId {
        self.nodes.insert(Node::new(kind, layout))
    }

    /// Create a node and append it to `parent`.
    pub fn add(&mut self, parent: NodeId, kind: Kind, layout: Layout) -> Result<NodeId> {
        self.get(parent)?;
        let id = self.create_detached(kind, layout);
        self.attach(parent, id)?;
        Ok(id)
    }

    /// Append a plain container to `parent`.
    pub fn add_container(&mut self, parent: NodeId, layout: Layout) -> Result<NodeId> {
        self.add(parent, Kind::Container, layout)
    }

    /// Append a widget node to `parent`.
    pub fn add_widget(
        &mut self,
        parent: NodeId,
        layout: Layout,
        widget: impl Into<Box<dyn Widget>>,
    ) -> Result<NodeId> {
        self.add(parent, Kind::Widget(Some(widget.into())), layout)
    }

    /// Check that `child` could be attached under `parent` without changing
    /// anything.
    pub(crate) fn check_attach(&self, parent: NodeId, child: NodeId) -> Result<()> {
        self.get(parent)?;
        let c = self.get(child)?;
        if c.parent.is_some() {
            return Err(Error::AlreadyAttached(child));
        }
        if c.pending_delete {
            return Err(Error::Invalid(format!("{child:?} is pending deletion")));
        }
        if child == self.root || self.is_ancestor(child, parent) {
            return Err(Error::WouldCreateCycle { parent, child });
        }
        Ok(())
    }

    /// Attach a detached node as the last child of `parent`.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check_attach(parent, child)?;
        self.get_mut(child)?.parent = Some(parent);
        self.get_mut(parent)?.children.push(child);
        self.invalidate(parent);
        Ok(())
    }

    /// Detach a node from its parent. The subtree stays alive, and any
    /// section or branch slot of the parent that held it is emptied. Parts a
    /// composite built for itself, like a scroll region's content, cannot be
    /// detached.
    pub fn detach(&mut self, child: NodeId) -> Result<()> {
        let Some(parent) = self.get(child)?.parent else {
            return Ok(());
        };
        if self.get(parent)?.kind.owns(child) {
            return Err(Error::Invalid(format!(
                "{child:?} is an internal part of {parent:?}"
            )));
        }
        self.get_mut(child)?.parent = None;
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.retain(|c| *c != child);
            p.kind.release(child);
        }
        self.invalidate(parent);
        Ok(())
    }

    /// Move a node under a new parent.
    pub fn reparent(&mut self, child: NodeId, parent: NodeId) -> Result<()> {
        if self.is_ancestor(child, parent) {
            return Err(Error::WouldCreateCycle { parent, child });
        }
        self.detach(child)?;
        self.attach(parent, child)
    }

    /// Schedule a node and its subtree for deletion. The node is detached at
    /// once; the subtree is purged at the start of the next tick. Focus inside
    /// the subtree is cleared, and a dock area that held the node as a panel
    /// is tidied.
    pub fn delete(&mut self, id: NodeId) -> Result<()> {
        if id == self.root {
            return Err(Error::Invalid("cannot delete the root".into()));
        }
        if self.get(id)?.pending_delete {
            return Err(Error::DoubleDelete(id));
        }
        let area = self.panel_area(id);
        self.detach(id)?;
        self.get_mut(id)?.pending_delete = true;
        self.deletions.push(id);
        if self.input.focus.is_some_and(|f| self.is_ancestor(id, f)) {
            self.blur()?;
        }
        if let Some(area) = area
            && self.is_attached(area)
        {
            self.tidy_dock(area)?;
        }
        Ok(())
    }

    /// Remove every scheduled subtree from the arena. Returns the ids removed.
    pub(crate) fn purge_deletions(&mut self) -> Vec<NodeId> {
        let pending = mem::take(&mut self.deletions);
        let mut removed = Vec::new();
        for top in pending {
            let mut subtree = self.walk(top);
            subtree.reverse();
            for id in subtree {
                if let Some(mut node) = self.nodes.remove(id) {
                    if let Kind::Widget(Some(w)) = &mut node.kind {
                        w.on_unmount();
                    }
                    removed.push(id);
                }
            }
        }
        if !removed.is_empty() {
            self.input.forget(&removed);
            self.measure_queue.retain(|id| self.nodes.contains_key(*id));
            self.deferred.retain(|id| self.nodes.contains_key(*id));
            if self
                .pending_focus
                .is_some_and(|id| !self.nodes.contains_key(id))
            {
                self.pending_focus = None;
            }
            self.redraw = true;
            tracing::debug!(count = removed.len(), "purged nodes");
        }
        removed
    }

    /// Set a node's name.
    pub fn set_name(&mut self, id: NodeId, name: impl Into<String>) -> Result<()> {
        self.get_mut(id)?.name = name.into();
        Ok(())
    }

    /// Replace a node's layout properties.
    pub fn set_layout(&mut self, id: NodeId, layout: Layout) -> Result<()> {
        self.update_layout(id, |l| *l = layout)
    }

    /// Modify a node's layout properties in place.
    pub fn update_layout(&mut self, id: NodeId, f: impl FnOnce(&mut Layout)) -> Result<()> {
        let node = self.get_mut(id)?;
        let before = node.layout;
        f(&mut node.layout);
        if node.layout != before {
            let parent = node.parent;
            self.invalidate(id);
            if let Some(p) = parent {
                self.invalidate(p);
            }
        }
        Ok(())
    }

    /// Modify a node's flags. Returns the flags as they were.
    fn update_flags(&mut self, id: NodeId, f: impl FnOnce(&mut Flags)) -> Result<Flags> {
        let node = self.get_mut(id)?;
        let before = node.flags;
        f(&mut node.flags);
        if node.flags != before {
            node.needs_redraw = true;
            self.redraw = true;
        }
        Ok(before)
    }

    /// Hide or show a node. Hidden nodes keep their layout space.
    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) -> Result<()> {
        self.update_flags(id, |f| f.hidden = hidden)?;
        Ok(())
    }

    /// Collapse or expand a node. Collapsed nodes take no layout space.
    pub fn set_collapsed(&mut self, id: NodeId, collapsed: bool) -> Result<()> {
        let before = self.update_flags(id, |f| f.collapsed = collapsed)?;
        if before.collapsed != collapsed {
            self.invalidate(id);
            if let Some(p) = self.parent(id) {
                self.invalidate(p);
            }
        }
        Ok(())
    }

    /// Enable or disable input on a node and its subtree.
    pub fn set_disabled(&mut self, id: NodeId, disabled: bool) -> Result<()> {
        self.update_flags(id, |f| f.disabled = disabled)?;
        Ok(())
    }

    /// Include a node in the tab cycle. Tabable nodes also accept keyboard
    /// focus.
    pub fn set_tabable(&mut self, id: NodeId, tabable: bool) -> Result<()> {
        self.update_flags(id, |f| {
            f.tabable = tabable;
            if tabable {
                f.keyboard_input = true;
            }
        })?;
        Ok(())
    }

    /// Make a node eligible as a hit-test result.
    pub fn set_pointer_input(&mut self, id: NodeId, enabled: bool) -> Result<()> {
        self.update_flags(id, |f| f.pointer_input = enabled)?;
        Ok(())
    }

    /// Make a node eligible for keyboard focus.
    pub fn set_keyboard_input(&mut self, id: NodeId, enabled: bool) -> Result<()> {
        self.update_flags(id, |f| f.keyboard_input = enabled)?;
        Ok(())
    }

    /// Mark a node as a virtual control: once laid out, invalidations inside
    /// it re-lay it out in isolation instead of climbing to the root.
    pub fn set_virtual_control(&mut self, id: NodeId, virtual_control: bool) -> Result<()> {
        self.update_flags(id, |f| f.virtual_control = virtual_control)?;
        Ok(())
    }

    /// Show a node as a popup. Popups close on a press outside their bounds.
    pub fn open_popup(&mut self, id: NodeId) -> Result<()> {
        self.update_flags(id, |f| {
            f.popup = true;
            f.hidden = false;
        })?;
        Ok(())
    }

    /// Close a popup. Closing one that is already closed, or that no longer
    /// exists, does nothing.
    pub fn close_popup(&mut self, id: NodeId) -> Result<()> {
        let Some(node) = self.nodes.get(id) else {
            return Ok(());
        };
        if node.flags.hidden || node.pending_delete {
            return Ok(());
        }
        self.update_flags(id, |f| f.hidden = true)?;
        self.deliver(id, &Event::Closed)?;
        Ok(())
    }

    /// Attached popups that are currently shown.
    pub fn open_popups(&self) -> Vec<NodeId> {
        self.walk(self.root)
            .into_iter()
            .filter(|id| {
                let f = self.nodes[*id].flags;
                f.popup && self.is_visible(*id)
            })
            .collect()
    }

    /// Take a widget out of its slot for the duration of a call.
    pub(crate) fn with_widget_mut<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut dyn Widget, &mut Self) -> R,
    ) -> Result<R> {
        let node = self.get_mut(id)?;
        let mut widget = match &mut node.kind {
            Kind::Widget(slot) => slot.take().ok_or(Error::ReentrantWidgetBorrow(id))?,
            _ => {
                return Err(Error::WrongKind {
                    node: id,
                    expected: "widget",
                });
            }
        };
        let r = f(widget.as_mut(), self);
        if let Some(node) = self.nodes.get_mut(id)
            && let Kind::Widget(slot) = &mut node.kind
            && slot.is_none()
        {
            *slot = Some(widget);
        }
        Ok(r)
    }

    /// Deliver an event to a single node without bubbling.
    pub fn deliver(&mut self, id: NodeId, event: &Event) -> Result<EventOutcome> {
        let Some(node) = self.nodes.get(id) else {
            return Ok(EventOutcome::Ignore);
        };
        if let Kind::Widget(None) = node.kind {
            // The widget is mid-callback further up the stack.
            tracing::trace!(?id, "skipping delivery to borrowed widget");
            Ok(EventOutcome::Ignore)
        } else if matches!(node.kind, Kind::Widget(_)) {
            self.with_widget_mut(id, |w, core| {
                let mut ctx = CoreContext::new(core, id);
                w.on_event(event, &mut ctx)
            })?
        } else {
            self.engine_event(id, event)
        }
    }

    /// Dispatch an event to a node, bubbling to parents until handled.
    /// Disabled nodes are skipped.
    pub fn dispatch_event(&mut self, start: NodeId, event: &Event) -> Result<EventOutcome> {
        self.bubble(start, |core, id| core.deliver(id, event))
    }

    /// Dispatch a positional event, rebuilt for each node with `pos`
    /// converted to that node's local coordinates.
    pub(crate) fn dispatch_at(
        &mut self,
        start: NodeId,
        pos: Point,
        make: impl Fn(Point) -> Event,
    ) -> Result<EventOutcome> {
        self.bubble(start, |core, id| {
            let local = core.to_local(id, pos)?;
            core.deliver(id, &make(local))
        })
    }

    /// Walk from `start` to the root, calling `f` on each enabled node until
    /// one does not ignore the event.
    fn bubble(
        &mut self,
        start: NodeId,
        mut f: impl FnMut(&mut Self, NodeId) -> Result<EventOutcome>,
    ) -> Result<EventOutcome> {
        let mut target = Some(start);
        while let Some(id) = target {
            let Some(node) = self.nodes.get(id) else {
                break;
            };
            target = node.parent;
            if node.flags.disabled {
                continue;
            }
            let outcome = f(self, id)?;
            if outcome != EventOutcome::Ignore {
                return Ok(outcome);
            }
        }
        Ok(EventOutcome::Ignore)
    }
}
