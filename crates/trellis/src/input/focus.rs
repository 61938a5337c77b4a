use slotmap::SecondaryMap;

use crate::{NodeId, error::Result, event::Event, tree::Core};

/// The tab cycle: a circular list over tabable, visible, enabled nodes in
/// pre-order, rebuilt once per tick.
#[derive(Debug, Default)]
pub struct TabCycle {
    /// First node of the cycle.
    first: Option<NodeId>,
    /// Forward links.
    next: SecondaryMap<NodeId, NodeId>,
    /// Backward links.
    prev: SecondaryMap<NodeId, NodeId>,
    /// Cycle members in order.
    order: Vec<NodeId>,
}

impl TabCycle {
    /// Drop every link.
    pub(crate) fn reset(&mut self) {
        self.first = None;
        self.next.clear();
        self.prev.clear();
        self.order.clear();
    }

    /// Link `order` into a cycle.
    fn link(&mut self, order: Vec<NodeId>) {
        self.reset();
        self.first = order.first().copied();
        for (i, id) in order.iter().enumerate() {
            let next = order[(i + 1) % order.len()];
            self.next.insert(*id, next);
            self.prev.insert(next, *id);
        }
        self.order = order;
    }

    /// The first node in the cycle.
    pub fn first(&self) -> Option<NodeId> {
        self.first
    }

    /// The node after `id`, wrapping at the end.
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.next.get(id).copied()
    }

    /// The node before `id`, wrapping at the start.
    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        self.prev.get(id).copied()
    }

    /// Cycle members in order.
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }
}

/// Keyboard focus management.
pub trait FocusManager {
    /// The node holding keyboard focus.
    fn focus(&self) -> Option<NodeId>;

    /// Does `id` hold keyboard focus?
    fn is_focused(&self, id: NodeId) -> bool {
        self.focus() == Some(id)
    }

    /// Move focus to `id`. The old holder is told it lost focus before the
    /// new one is told it gained it. Returns false if `id` cannot take focus
    /// or already has it.
    fn set_focus(&mut self, id: NodeId) -> Result<bool>;

    /// Clear keyboard focus.
    fn blur(&mut self) -> Result<()>;

    /// Advance focus along the tab cycle. Returns false if the cycle is
    /// empty.
    fn focus_next(&mut self) -> Result<bool>;

    /// Retreat focus along the tab cycle. Returns false if the cycle is
    /// empty.
    fn focus_prev(&mut self) -> Result<bool>;
}

impl FocusManager for Core {
    fn focus(&self) -> Option<NodeId> {
        self.input.focus
    }

    fn set_focus(&mut self, id: NodeId) -> Result<bool> {
        if self.input.focus == Some(id) {
            return Ok(false);
        }
        let node = self.get(id)?;
        if !node.flags.keyboard_input || !self.is_visible(id) || !self.is_enabled(id) {
            return Ok(false);
        }
        let old = self.input.focus.replace(id);
        tracing::debug!(?old, new = ?id, "focus changed");
        if let Some(old) = old {
            self.deliver(old, &Event::FocusLost)?;
        }
        self.deliver(id, &Event::FocusGained)?;
        self.redraw = true;
        Ok(true)
    }

    fn blur(&mut self) -> Result<()> {
        if let Some(old) = self.input.focus.take() {
            tracing::debug!(?old, "focus cleared");
            self.deliver(old, &Event::FocusLost)?;
            self.redraw = true;
        }
        Ok(())
    }

    fn focus_next(&mut self) -> Result<bool> {
        let target = self
            .input
            .focus
            .and_then(|f| self.tab.next(f))
            .or(self.tab.first());
        self.focus_cycle_target(target)
    }

    fn focus_prev(&mut self) -> Result<bool> {
        let target = self
            .input
            .focus
            .and_then(|f| self.tab.prev(f))
            .or_else(|| self.tab.order().last().copied());
        self.focus_cycle_target(target)
    }
}

impl Core {
    /// The current tab cycle.
    pub fn tab_cycle(&self) -> &TabCycle {
        &self.tab
    }

    /// Focus a node chosen from the tab cycle.
    fn focus_cycle_target(&mut self, target: Option<NodeId>) -> Result<bool> {
        let Some(target) = target else {
            return Ok(false);
        };
        self.set_focus(target)?;
        Ok(true)
    }

    /// Rebuild the tab cycle from the live tree. Hidden, collapsed and
    /// disabled subtrees are skipped. If the focused node is no longer
    /// reachable, focus is cleared.
    pub(crate) fn rebuild_tab_cycle(&mut self) -> Result<()> {
        let mut order = Vec::new();
        let mut focus_seen = false;
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            let f = node.flags;
            if f.hidden || f.collapsed || f.disabled {
                continue;
            }
            if self.input.focus == Some(id) {
                focus_seen = true;
            }
            if f.tabable && f.keyboard_input {
                order.push(id);
            }
            stack.extend(node.children.iter().rev());
        }
        self.tab.link(order);
        if self.input.focus.is_some() && !focus_seen {
            self.blur()?;
        }
        Ok(())
    }

    /// Apply a focus request made from inside a widget callback.
    pub(crate) fn apply_pending_focus(&mut self) -> Result<()> {
        if let Some(id) = self.pending_focus.take()
            && self.contains(id)
        {
            self.set_focus(id)?;
        }
        Ok(())
    }

    /// The nearest node at or above `id` that takes keyboard focus.
    pub(crate) fn focus_target(&self, id: NodeId) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(c) = current {
            let node = self.nodes.get(c)?;
            if node.flags.keyboard_input {
                return Some(c);
            }
            current = node.parent;
        }
        None
    }
}
