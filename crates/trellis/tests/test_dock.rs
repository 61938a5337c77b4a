//! Docking driven through the input router: panel drags between areas and
//! branch resizing.

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use trellis::{
        DropOutcome, NodeId, Package, Point, Rect, Result, Widget,
        dock::{DOCK_PANEL, DockSide},
        layout::Layout,
        testing::{
            harness::Harness,
            probe::{Probe, drain, log},
        },
    };

    /// A panel that drags itself.
    struct Grip(NodeId);

    impl Widget for Grip {
        fn drag_package(&mut self, _pos: Point) -> Option<Package> {
            Some(Package::new(DOCK_PANEL).with_payload(self.0))
        }
    }

    #[test]
    fn panel_moves_to_dropped_edge() -> Result<()> {
        let mut h = Harness::new(400, 400);
        let root = h.root();
        let area = h.canvas.core.add_dock_area(root, Layout::fill())?;
        let center = h.canvas.core.create_detached(trellis::Kind::Container, Layout::fill());
        h.canvas.core.dock_panel(area, DockSide::Center, center)?;

        let grip = h.canvas.core.create_detached(trellis::Kind::Container, Layout::fill());
        let left = h.canvas.core.dock_panel(area, DockSide::Left, grip)?;
        let handle = h.canvas.core.add_widget(grip, Layout::fill(), Grip(grip))?;
        h.canvas.core.set_pointer_input(handle, true)?;
        h.tick()?;
        assert_eq!(h.canvas.core.bounds(left)?, Rect::new(0, 0, 200, 400));

        h.drag((50, 200), (390, 200))?;
        assert_eq!(h.canvas.core.last_drop(), Some(DropOutcome::Completed(area)));
        let right = h.canvas.core.dock_branch(area, DockSide::Right)?;
        assert!(right.is_some());
        assert_eq!(h.canvas.core.panel_area(grip), right);
        assert_eq!(h.canvas.core.dock_branch(area, DockSide::Left)?, None);
        assert!(!h.canvas.core.contains(left));
        assert_eq!(h.canvas.core.panel_area(center), Some(area));

        let right = right.ok_or(trellis::Error::Internal("no right branch".into()))?;
        assert_eq!(h.canvas.core.bounds(right)?, Rect::new(200, 0, 200, 400));
        Ok(())
    }

    #[test]
    fn payload_is_required() -> Result<()> {
        let mut h = Harness::new(400, 400);
        let l = log();
        let root = h.root();
        let area = h.canvas.core.add_dock_area(root, Layout::fill())?;
        let panel = h.canvas.core.create_detached(trellis::Kind::Container, Layout::fill());
        h.canvas.core.dock_panel(area, DockSide::Center, panel)?;
        let src = h
            .canvas
            .core
            .add_widget(panel, Layout::fill(), Probe::new("src", &l).drag_source(DOCK_PANEL))?;
        h.canvas.core.set_pointer_input(src, true)?;
        h.tick()?;
        drain(&l);

        h.drag((200, 200), (10, 200))?;
        assert_eq!(h.canvas.core.last_drop(), Some(DropOutcome::Cancelled));
        assert_eq!(h.canvas.core.dock_branch(area, DockSide::Left)?, None);
        assert_eq!(h.canvas.core.panel_area(panel), Some(area));
        let events = drain(&l);
        assert!(events.contains(&"src: drag-start".to_string()));
        assert!(events.contains(&format!("src: drag-cancel {DOCK_PANEL}")));
        Ok(())
    }

    #[test]
    fn deleted_panel_gives_its_space_back() -> Result<()> {
        let mut h = Harness::new(800, 600);
        let root = h.root();
        let area = h.canvas.core.add_dock_area(root, Layout::fill())?;
        let main = h.canvas.core.create_detached(trellis::Kind::Container, Layout::fill());
        h.canvas.core.dock_panel(area, DockSide::Center, main)?;
        let p = h.canvas.core.create_detached(trellis::Kind::Container, Layout::fill());
        let left = h.canvas.core.dock_panel(area, DockSide::Left, p)?;
        h.tick()?;
        let center = h.canvas.core.dock_center(area)?;
        assert_eq!(h.canvas.core.bounds(center)?, Rect::new(200, 0, 600, 600));

        h.canvas.core.delete(p)?;
        assert_eq!(h.canvas.core.dock_branch(area, DockSide::Left)?, None);
        h.tick()?;
        assert!(!h.canvas.core.contains(left));
        assert_eq!(h.canvas.core.bounds(center)?, Rect::new(0, 0, 800, 600));

        // The center belongs to its area.
        assert!(h.canvas.core.delete(center).is_err());
        Ok(())
    }

    #[test]
    fn deleted_center_panel_is_refilled() -> Result<()> {
        let mut h = Harness::new(800, 600);
        let root = h.root();
        let area = h.canvas.core.add_dock_area(root, Layout::fill())?;
        let main = h.canvas.core.create_detached(trellis::Kind::Container, Layout::fill());
        h.canvas.core.dock_panel(area, DockSide::Center, main)?;
        let side = h.canvas.core.create_detached(trellis::Kind::Container, Layout::fill());
        h.canvas.core.dock_panel(area, DockSide::Bottom, side)?;
        h.tick()?;

        h.canvas.core.delete(main)?;
        h.tick()?;
        assert_eq!(h.canvas.core.panel_area(side), Some(area));
        assert_eq!(h.canvas.core.dock_branch(area, DockSide::Bottom)?, None);
        let center = h.canvas.core.dock_center(area)?;
        assert_eq!(h.canvas.core.bounds(center)?, Rect::new(0, 0, 800, 600));
        Ok(())
    }

    #[test]
    fn branch_resizer_drags() -> Result<()> {
        let mut h = Harness::new(400, 400);
        let root = h.root();
        let area = h.canvas.core.add_dock_area(root, Layout::fill())?;
        let p = h.canvas.core.create_detached(trellis::Kind::Container, Layout::fill());
        let left = h.canvas.core.dock_panel(area, DockSide::Left, p)?;
        h.tick()?;

        h.drag((197, 100), (247, 100))?;
        assert_eq!(h.canvas.core.bounds(left)?, Rect::new(0, 0, 250, 400));
        let center = h.canvas.core.dock_center(area)?;
        assert_eq!(h.canvas.core.bounds(center)?, Rect::new(250, 0, 150, 400));
        Ok(())
    }
}
