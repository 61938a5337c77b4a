use crate::{
    NodeId,
    geom::{Point, Rect},
    tree::Core,
};

impl Core {
    /// The deepest node under canvas point `p` that accepts pointer input.
    /// Children are searched back to front, so later siblings win. Hidden,
    /// collapsed, disabled and never-arranged subtrees are skipped, and each
    /// node clips its descendants.
    pub fn hit_test(&self, p: Point) -> Option<NodeId> {
        self.pick(p, true)
    }

    /// Hit-test, optionally ignoring the pointer-input flag.
    pub(crate) fn pick(&self, p: Point, pointer_only: bool) -> Option<NodeId> {
        let root = self.nodes.get(self.root)?;
        self.pick_in(self.root, p, Point::zero(), root.bounds, pointer_only)
    }

    /// Search the subtree at `id`, whose parent sits at `origin` in canvas
    /// coordinates, within `clip`.
    fn pick_in(
        &self,
        id: NodeId,
        p: Point,
        origin: Point,
        clip: Rect,
        pointer_only: bool,
    ) -> Option<NodeId> {
        let node = self.nodes.get(id)?;
        let f = node.flags;
        if f.hidden || f.collapsed || f.disabled || !node.layout_done || node.pending_delete {
            return None;
        }
        let abs = node.bounds.shift(origin.x, origin.y);
        let clip = abs.intersect(&clip)?;
        if !clip.contains_point(p) {
            return None;
        }
        for child in node.children.iter().rev() {
            if let Some(hit) = self.pick_in(*child, p, abs.tl, clip, pointer_only) {
                return Some(hit);
            }
        }
        (!pointer_only || f.pointer_input).then_some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Result, geom::Expanse, layout::Layout};

    #[test]
    fn deepest_topmost_wins() -> Result<()> {
        let mut core = Core::default();
        let root = core.root();
        let a = core.add_container(root, Layout::new().size(50, 50))?;
        let b = core.add_container(a, Layout::new().size(20, 20))?;
        let over = core.add_container(root, Layout::new().size(10, 10))?;
        for id in [a, b, over] {
            core.set_pointer_input(id, true)?;
        }
        core.layout(Expanse::new(100, 100))?;

        assert_eq!(core.hit_test(Point::new(5, 5)), Some(over));
        assert_eq!(core.hit_test(Point::new(15, 15)), Some(b));
        assert_eq!(core.hit_test(Point::new(40, 40)), Some(a));
        assert_eq!(core.hit_test(Point::new(90, 90)), None);
        assert_eq!(core.pick(Point::new(90, 90), false), Some(root));

        core.set_hidden(over, true)?;
        assert_eq!(core.hit_test(Point::new(5, 5)), Some(b));
        core.set_disabled(a, true)?;
        assert_eq!(core.hit_test(Point::new(5, 5)), None);
        Ok(())
    }
}
