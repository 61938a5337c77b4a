//! Dirty tracking. Invalidation climbs towards the root until it meets a node
//! that is already dirty, or a virtual control that has been laid out before.
//! Virtual controls are queued and re-laid out in isolation with the slot
//! they last received, so edits inside them never cost a full pass.

use std::mem;

use crate::{NodeId, error::Result, tree::Core};

impl Core {
    /// Mark a node's layout dirty. Calls made while a layout pass is running
    /// are deferred to the end of the tick.
    pub fn invalidate(&mut self, id: NodeId) {
        if self.layout_depth > 0 {
            if !self.deferred.contains(&id) {
                self.deferred.push(id);
            }
            return;
        }
        let mut current = Some(id);
        while let Some(cur) = current {
            let Some(node) = self.nodes.get_mut(cur) else {
                break;
            };
            if node.needs_layout {
                break;
            }
            node.needs_layout = true;
            self.redraw = true;
            if node.flags.virtual_control && node.layout_done {
                if !self.measure_queue.contains(&cur) {
                    self.measure_queue.push(cur);
                }
                break;
            }
            current = node.parent;
        }
    }

    /// Virtual controls waiting for isolated re-layout.
    pub fn measure_queue(&self) -> &[NodeId] {
        &self.measure_queue
    }

    /// Re-measure and re-arrange each queued virtual control against the size
    /// and slot it last received. Returns how many were processed.
    pub(crate) fn drain_measure_queue(&mut self) -> Result<usize> {
        let queue = mem::take(&mut self.measure_queue);
        let mut count = 0;
        for id in queue {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            let (Some(available), Some(slot)) = (node.measured_with, node.slot) else {
                continue;
            };
            if !node.needs_layout || !self.is_attached(id) || !self.is_layout_visible(id) {
                continue;
            }
            self.measure(id, available)?;
            self.arrange(id, slot)?;
            count += 1;
        }
        if count > 0 {
            tracing::trace!(count, "virtual controls re-laid out");
        }
        Ok(count)
    }

    /// Replay invalidations raised while layout was running.
    pub(crate) fn apply_deferred_invalidations(&mut self) {
        for id in mem::take(&mut self.deferred) {
            self.invalidate(id);
        }
    }

    /// No collapsed node on the chain to the root.
    fn is_layout_visible(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            match self.nodes.get(c) {
                Some(n) if !n.flags.collapsed => current = n.parent,
                _ => return false,
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{geom::Expanse, layout::Layout};

    #[test]
    fn climbs_until_dirty() -> Result<()> {
        let mut core = Core::default();
        let root = core.root();
        let a = core.add_container(root, Layout::default())?;
        let b = core.add_container(a, Layout::default())?;
        core.layout(Expanse::new(10, 10))?;
        assert!(!core.needs_layout(root)?);
        core.invalidate(b);
        assert!(core.needs_layout(a)? && core.needs_layout(root)?);
        Ok(())
    }

    #[test]
    fn virtual_controls_stop_the_climb() -> Result<()> {
        let mut core = Core::default();
        let root = core.root();
        let v = core.add_container(root, Layout::default())?;
        core.set_virtual_control(v, true)?;
        let leaf = core.add_container(v, Layout::default())?;

        // Before the first layout the virtual control propagates normally.
        assert!(core.needs_layout(root)?);
        core.layout(Expanse::new(10, 10))?;

        core.invalidate(leaf);
        assert!(core.needs_layout(v)?);
        assert!(!core.needs_layout(root)?);
        assert_eq!(core.measure_queue(), &[v]);

        assert_eq!(core.drain_measure_queue()?, 1);
        assert!(!core.needs_layout(v)? && !core.needs_layout(leaf)?);
        Ok(())
    }

    #[test]
    fn deferred_while_in_layout() -> Result<()> {
        let mut core = Core::default();
        let root = core.root();
        let a = core.add_container(root, Layout::default())?;
        core.layout(Expanse::new(10, 10))?;
        core.layout_depth = 1;
        core.invalidate(a);
        core.layout_depth = 0;
        assert!(!core.needs_layout(a)?);
        core.apply_deferred_invalidations();
        assert!(core.needs_layout(a)?);
        Ok(())
    }
}
