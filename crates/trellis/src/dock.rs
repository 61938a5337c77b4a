//! Dock areas. Each area has a center that holds panels and up to four edge
//! branches, which are themselves dock areas. Branches are created on demand
//! and removed again once they hold nothing.

use serde::{Deserialize, Serialize};

use crate::{
    NodeId,
    error::{Error, Result},
    geom::Point,
    input::drag::Package,
    layout::{Dock, Layout},
    node::Kind,
    resize::ResizeEdge,
    tree::Core,
};

/// Name of packages that carry a panel id for docking.
pub const DOCK_PANEL: &str = "dock-panel";

/// Where in a dock area a panel goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DockSide {
    /// The area's own center.
    Center,
    /// The left branch.
    Left,
    /// The top branch.
    Top,
    /// The right branch.
    Right,
    /// The bottom branch.
    Bottom,
}

impl DockSide {
    /// Branch slot index for edge sides.
    fn branch(self) -> Option<usize> {
        match self {
            Self::Center => None,
            Self::Left => Some(0),
            Self::Top => Some(1),
            Self::Right => Some(2),
            Self::Bottom => Some(3),
        }
    }

    /// The dock mode a branch on this side uses.
    fn dock(self) -> Dock {
        match self {
            Self::Center => Dock::Fill,
            Self::Left => Dock::Left,
            Self::Top => Dock::Top,
            Self::Right => Dock::Right,
            Self::Bottom => Dock::Bottom,
        }
    }

    /// The branch edge that faces the center, where its resizer sits.
    fn inner_edge(self) -> Option<(Dock, ResizeEdge)> {
        match self {
            Self::Center => None,
            Self::Left => Some((Dock::Right, ResizeEdge::Right)),
            Self::Top => Some((Dock::Bottom, ResizeEdge::Bottom)),
            Self::Right => Some((Dock::Left, ResizeEdge::Left)),
            Self::Bottom => Some((Dock::Top, ResizeEdge::Top)),
        }
    }
}

/// Order in which branches donate panels to an empty center.
const CONSOLIDATE_ORDER: [DockSide; 4] =
    [DockSide::Bottom, DockSide::Top, DockSide::Left, DockSide::Right];

/// Dock area state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockArea {
    /// The container holding this area's panels.
    pub(crate) center: NodeId,
    /// Edge branches by slot: left, top, right, bottom.
    pub(crate) branches: [Option<NodeId>; 4],
}

impl Core {
    /// Append a dock area to `parent`.
    pub fn add_dock_area(&mut self, parent: NodeId, layout: Layout) -> Result<NodeId> {
        self.get(parent)?;
        let area = self.create_dock_area(layout)?;
        self.attach(parent, area)?;
        Ok(area)
    }

    /// Create a detached dock area with its center.
    fn create_dock_area(&mut self, layout: Layout) -> Result<NodeId> {
        let center = self.create_detached(Kind::Container, Layout::fill().min(0, 0));
        let area = self.create_detached(
            Kind::DockArea(DockArea {
                center,
                branches: [None; 4],
            }),
            layout,
        );
        self.attach(area, center)?;
        Ok(area)
    }

    /// Dock area state.
    pub fn dock_area(&self, area: NodeId) -> Result<&DockArea> {
        match &self.get(area)?.kind {
            Kind::DockArea(d) => Ok(d),
            _ => Err(Error::WrongKind {
                node: area,
                expected: "dock area",
            }),
        }
    }

    /// Mutable dock area state.
    fn dock_area_mut(&mut self, area: NodeId) -> Result<&mut DockArea> {
        match &mut self.get_mut(area)?.kind {
            Kind::DockArea(d) => Ok(d),
            _ => Err(Error::WrongKind {
                node: area,
                expected: "dock area",
            }),
        }
    }

    /// The container that holds an area's panels.
    pub fn dock_center(&self, area: NodeId) -> Result<NodeId> {
        Ok(self.dock_area(area)?.center)
    }

    /// The branch on a side, if it exists.
    pub fn dock_branch(&self, area: NodeId, side: DockSide) -> Result<Option<NodeId>> {
        let d = self.dock_area(area)?;
        Ok(match side.branch() {
            Some(i) => d.branches[i],
            None => Some(area),
        })
    }

    /// The branch on a side, creating it if needed. `Center` is the area
    /// itself.
    pub fn ensure_dock_branch(&mut self, area: NodeId, side: DockSide) -> Result<NodeId> {
        let Some(slot) = side.branch() else {
            self.dock_area(area)?;
            return Ok(area);
        };
        if let Some(b) = self.dock_area(area)?.branches[slot] {
            return Ok(b);
        }
        let size = self.config.dock_default_size;
        let mut layout = Layout::docked(side.dock());
        match side {
            DockSide::Left | DockSide::Right => layout.desired.w = Some(size),
            DockSide::Top | DockSide::Bottom | DockSide::Center => layout.desired.h = Some(size),
        }
        let branch = self.create_dock_area(layout)?;
        if let Some((dock, edge)) = side.inner_edge() {
            let border = self.config.resizer_border;
            let mut rl = Layout::docked(dock).min(0, 0);
            match dock {
                Dock::Left | Dock::Right => rl.desired.w = Some(border),
                _ => rl.desired.h = Some(border),
            }
            self.add_resizer(branch, rl, edge, branch)?;
        }
        self.attach(area, branch)?;
        self.dock_area_mut(area)?.branches[slot] = Some(branch);
        tracing::debug!(?area, ?side, ?branch, "dock branch created");
        Ok(branch)
    }

    /// Dock a detached panel. Returns the area that now holds it.
    pub fn dock_panel(&mut self, area: NodeId, side: DockSide, panel: NodeId) -> Result<NodeId> {
        let target = self.ensure_dock_branch(area, side)?;
        let center = self.dock_center(target)?;
        self.attach(center, panel)?;
        Ok(target)
    }

    /// The dock area whose center holds `panel`.
    pub fn panel_area(&self, panel: NodeId) -> Option<NodeId> {
        let center = self.parent(panel)?;
        let area = self.parent(center)?;
        match &self.nodes.get(area)?.kind {
            Kind::DockArea(d) if d.center == center => Some(area),
            _ => None,
        }
    }

    /// Detach a panel from its dock area, then tidy the area: an empty
    /// branch is removed, and an empty center is refilled from a branch.
    pub fn undock_panel(&mut self, panel: NodeId) -> Result<()> {
        let area = self
            .panel_area(panel)
            .ok_or_else(|| Error::Invalid(format!("{panel:?} is not docked")))?;
        self.detach(panel)?;
        self.tidy_dock(area)
    }

    /// Redundancy then consolidation checks.
    pub(crate) fn tidy_dock(&mut self, area: NodeId) -> Result<()> {
        self.dock_redundancy_check(area)?;
        if self.contains(area) && !self.get(area)?.pending_delete {
            self.dock_consolidate(area)?;
        }
        Ok(())
    }

    /// Does an area hold no panels and no branches?
    pub fn dock_is_empty(&self, area: NodeId) -> Result<bool> {
        let d = self.dock_area(area)?;
        Ok(self.get(d.center)?.children.is_empty() && d.branches.iter().all(Option::is_none))
    }

    /// Remove an empty branch from its parent area, climbing while parents
    /// become empty in turn.
    fn dock_redundancy_check(&mut self, area: NodeId) -> Result<()> {
        let mut current = area;
        loop {
            if !self.dock_is_empty(current)? {
                return Ok(());
            }
            let Some(parent) = self.parent(current) else {
                return Ok(());
            };
            let Kind::DockArea(pd) = &mut self.get_mut(parent)?.kind else {
                return Ok(());
            };
            for b in pd.branches.iter_mut() {
                if *b == Some(current) {
                    *b = None;
                }
            }
            self.delete(current)?;
            tracing::debug!(branch = ?current, "empty dock branch removed");
            current = parent;
        }
    }

    /// Refill an empty center from the first non-empty branch.
    fn dock_consolidate(&mut self, area: NodeId) -> Result<()> {
        let d = self.dock_area(area)?.clone();
        if !self.get(d.center)?.children.is_empty() {
            return Ok(());
        }
        for side in CONSOLIDATE_ORDER {
            let Some(branch) = side.branch().and_then(|i| d.branches[i]) else {
                continue;
            };
            let from = self.dock_center(branch)?;
            let panels = self.children(from);
            if panels.is_empty() {
                continue;
            }
            for p in panels {
                self.reparent(p, d.center)?;
            }
            self.dock_redundancy_check(branch)?;
            tracing::debug!(?area, ?side, "dock center consolidated");
            return Ok(());
        }
        Ok(())
    }

    /// The side a drop at local `pos` targets.
    pub fn dock_side_at(&self, area: NodeId, pos: Point) -> Result<DockSide> {
        let b = self.get(area)?.bounds;
        let edge = self.config.dock_edge_fraction.clamp(0.0, 0.5);
        let fx = if b.w == 0 { 0.5 } else { pos.x as f32 / b.w as f32 };
        let fy = if b.h == 0 { 0.5 } else { pos.y as f32 / b.h as f32 };
        Ok(if fx < edge {
            DockSide::Left
        } else if fx > 1.0 - edge {
            DockSide::Right
        } else if fy < edge {
            DockSide::Top
        } else if fy > 1.0 - edge {
            DockSide::Bottom
        } else {
            DockSide::Center
        })
    }

    /// Does a dock area take this package?
    pub(crate) fn dock_can_accept(&self, package: &Package) -> bool {
        package.name == DOCK_PANEL
            && package
                .payload::<NodeId>()
                .is_some_and(|p| self.contains(*p))
    }

    /// Drop a panel package onto a dock area at local `pos`.
    pub(crate) fn dock_drop(&mut self, area: NodeId, package: &Package, pos: Point) -> Result<bool> {
        let Some(panel) = package.payload::<NodeId>().copied() else {
            return Ok(false);
        };
        if !self.contains(panel) || self.is_ancestor(panel, area) {
            return Ok(false);
        }
        let side = self.dock_side_at(area, pos)?;
        let previous = self.panel_area(panel);
        self.detach(panel)?;
        self.dock_panel(area, side, panel)?;
        if let Some(prev) = previous
            && self.contains(prev)
            && !self.is_ancestor(prev, panel)
        {
            self.tidy_dock(prev)?;
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{Expanse, Rect};

    fn panel(core: &mut Core) -> NodeId {
        core.create_detached(Kind::Container, Layout::fill())
    }

    #[test]
    fn branches_are_lazy() -> Result<()> {
        let mut core = Core::default();
        let root = core.root();
        let area = core.add_dock_area(root, Layout::fill())?;
        assert_eq!(core.dock_branch(area, DockSide::Left)?, None);
        let p = panel(&mut core);
        let left = core.dock_panel(area, DockSide::Left, p)?;
        assert_eq!(core.dock_branch(area, DockSide::Left)?, Some(left));
        assert_eq!(core.panel_area(p), Some(left));

        core.layout(Expanse::new(800, 600))?;
        assert_eq!(core.bounds(left)?, Rect::new(0, 0, 200, 600));
        let center = core.dock_center(area)?;
        assert_eq!(core.bounds(center)?, Rect::new(200, 0, 600, 600));
        // The branch resizer sits on the edge facing the center.
        let resizer = core.children(left)[1];
        assert_eq!(core.bounds(resizer)?, Rect::new(194, 0, 6, 600));
        Ok(())
    }

    #[test]
    fn empty_branch_is_removed() -> Result<()> {
        let mut core = Core::default();
        let root = core.root();
        let area = core.add_dock_area(root, Layout::fill())?;
        let a = panel(&mut core);
        let b = panel(&mut core);
        core.dock_panel(area, DockSide::Center, a)?;
        let right = core.dock_panel(area, DockSide::Right, b)?;
        core.undock_panel(b)?;
        assert_eq!(core.dock_branch(area, DockSide::Right)?, None);
        assert!(core.node(right).is_some_and(|n| n.pending_delete()));
        Ok(())
    }

    #[test]
    fn consolidation_prefers_bottom() -> Result<()> {
        let mut core = Core::default();
        let root = core.root();
        let area = core.add_dock_area(root, Layout::fill())?;
        let c = panel(&mut core);
        let l = panel(&mut core);
        let bottom = panel(&mut core);
        core.dock_panel(area, DockSide::Center, c)?;
        core.dock_panel(area, DockSide::Left, l)?;
        core.dock_panel(area, DockSide::Bottom, bottom)?;
        core.undock_panel(c)?;
        assert_eq!(core.panel_area(bottom), Some(area));
        assert_eq!(core.dock_branch(area, DockSide::Bottom)?, None);
        assert!(core.dock_branch(area, DockSide::Left)?.is_some());
        Ok(())
    }

    #[test]
    fn drop_side_from_position() -> Result<()> {
        let mut core = Core::default();
        let root = core.root();
        let area = core.add_dock_area(root, Layout::fill())?;
        core.layout(Expanse::new(400, 400))?;
        assert_eq!(core.dock_side_at(area, Point::new(10, 200))?, DockSide::Left);
        assert_eq!(core.dock_side_at(area, Point::new(390, 200))?, DockSide::Right);
        assert_eq!(core.dock_side_at(area, Point::new(200, 10))?, DockSide::Top);
        assert_eq!(core.dock_side_at(area, Point::new(200, 390))?, DockSide::Bottom);
        assert_eq!(core.dock_side_at(area, Point::new(200, 200))?, DockSide::Center);
        Ok(())
    }
}
