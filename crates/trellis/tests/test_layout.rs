//! Layout properties: dock placement, collapse, containment and idempotence.

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use trellis::{
        Core, Dock, Edges, Expanse, NodeId, Rect, Result,
        layout::{Align, Layout},
        testing::probe::Fixed,
    };

    fn docked(dock: Dock, w: u32, h: u32) -> Layout {
        let mut l = Layout::docked(dock);
        if w > 0 {
            l.desired.w = Some(w);
        }
        if h > 0 {
            l.desired.h = Some(h);
        }
        l
    }

    #[test]
    fn dock_scenario() -> Result<()> {
        let mut core = Core::default();
        let root = core.root();
        let c = core.add_container(root, Layout::new().size(200, 100))?;
        let left = core.add_container(c, docked(Dock::Left, 50, 0))?;
        let right = core.add_container(c, docked(Dock::Right, 30, 0))?;
        let fill = core.add_container(c, Layout::fill())?;
        core.layout(Expanse::new(400, 400))?;

        assert_eq!(core.bounds(left)?, Rect::new(0, 0, 50, 100));
        assert_eq!(core.bounds(right)?, Rect::new(170, 0, 30, 100));
        assert_eq!(core.bounds(fill)?, Rect::new(50, 0, 120, 100));
        Ok(())
    }

    #[test]
    fn edges_peel_in_order() -> Result<()> {
        let mut core = Core::default();
        let root = core.root();
        let top = core.add_container(root, docked(Dock::Top, 0, 10))?;
        let left = core.add_container(root, docked(Dock::Left, 20, 0))?;
        let bottom = core.add_container(root, docked(Dock::Bottom, 0, 5))?;
        let fill = core.add_container(root, Layout::fill())?;
        core.layout(Expanse::new(100, 50))?;

        assert_eq!(core.bounds(top)?, Rect::new(0, 0, 100, 10));
        assert_eq!(core.bounds(left)?, Rect::new(0, 10, 20, 40));
        assert_eq!(core.bounds(bottom)?, Rect::new(20, 45, 80, 5));
        assert_eq!(core.bounds(fill)?, Rect::new(20, 10, 80, 35));
        Ok(())
    }

    #[test]
    fn fill_is_clamped_at_zero() -> Result<()> {
        let mut core = Core::default();
        let root = core.root();
        let c = core.add_container(root, Layout::new().size(40, 10))?;
        core.add_container(c, docked(Dock::Left, 60, 0))?;
        let fill = core.add_container(c, Layout::fill())?;
        core.layout(Expanse::new(100, 100))?;
        assert_eq!(core.bounds(fill)?.w, 0);
        Ok(())
    }

    #[test]
    fn collapsed_takes_no_space() -> Result<()> {
        let mut core = Core::default();
        let root = core.root();
        let c = core.add_container(root, Layout::new().align(Align::Start, Align::Start))?;
        let gone = core.add_container(c, docked(Dock::Left, 50, 80).position(30, 30))?;
        let left = core.add_container(c, docked(Dock::Left, 10, 10))?;
        core.layout(Expanse::new(200, 200))?;
        assert_eq!(core.node(c).map(|n| n.measured()), Some(Expanse::new(60, 80)));

        core.set_collapsed(gone, true)?;
        core.layout(Expanse::new(200, 200))?;
        assert_eq!(core.node(c).map(|n| n.measured()), Some(Expanse::new(10, 10)));
        assert_eq!(core.bounds(left)?, Rect::new(0, 0, 10, 10));
        Ok(())
    }

    #[test]
    fn widgets_report_content_size() -> Result<()> {
        let mut core = Core::default();
        let root = core.root();
        let w = core.add_widget(
            root,
            Layout::new()
                .align(Align::Center, Align::End)
                .padding(Edges::uniform(1)),
            Fixed::new(8, 4),
        )?;
        core.layout(Expanse::new(20, 20))?;
        assert_eq!(core.bounds(w)?, Rect::new(5, 14, 10, 6));
        Ok(())
    }

    /// One generated node: parent selector, dock, size request, padding,
    /// margin and free position.
    type Gen = (usize, u8, u32, u32, u32, u32, i32, i32);

    fn build(items: &[Gen]) -> Result<(Core, Vec<NodeId>)> {
        let mut core = Core::default();
        let mut nodes = vec![core.root()];
        for (sel, dock, w, h, pad, margin, x, y) in items {
            let parent = nodes[sel % nodes.len()];
            let dock = match dock % 6 {
                0 => Dock::None,
                1 => Dock::Left,
                2 => Dock::Top,
                3 => Dock::Right,
                4 => Dock::Bottom,
                _ => Dock::Fill,
            };
            let mut l = docked(dock, *w, *h)
                .padding(Edges::uniform(*pad))
                .margin(Edges::uniform(*margin));
            if dock == Dock::None {
                l = l.position(*x, *y);
            }
            nodes.push(core.add_container(parent, l)?);
        }
        Ok((core, nodes))
    }

    fn gen_tree() -> impl Strategy<Value = Vec<Gen>> {
        prop::collection::vec(
            (any::<usize>(), any::<u8>(), 0u32..150, 0u32..150, 0u32..6, 0u32..6, -10i32..80, -10i32..80),
            1..40,
        )
    }

    proptest! {
        #[test]
        fn children_stay_inside_parent_content(items in gen_tree(), w in 0u32..300, h in 0u32..300) {
            let (mut core, nodes) = build(&items).unwrap();
            core.layout(Expanse::new(w, h)).unwrap();
            for id in nodes.iter().skip(1) {
                let parent = core.parent(*id).unwrap();
                let content = core.content_rect(parent).unwrap();
                let b = core.bounds(*id).unwrap();
                prop_assert!(content.contains_rect(&b), "{:?} outside {:?}", b, content);
            }
        }

        #[test]
        fn measure_is_idempotent(items in gen_tree(), w in 0u32..300, h in 0u32..300) {
            let (mut core, nodes) = build(&items).unwrap();
            let avail = Expanse::new(w, h);
            let root = core.root();
            let first = core.measure(root, avail).unwrap();
            let sizes: Vec<_> = nodes.iter().map(|n| core.node(*n).unwrap().measured()).collect();
            for id in nodes.iter().rev() {
                core.invalidate(*id);
            }
            let second = core.measure(root, avail).unwrap();
            prop_assert_eq!(first, second);
            let again: Vec<_> = nodes.iter().map(|n| core.node(*n).unwrap().measured()).collect();
            prop_assert_eq!(sizes, again);
        }

        #[test]
        fn fill_gets_the_remainder(total in 1u32..500, left in 1u32..500) {
            let mut core = Core::default();
            let root = core.root();
            let c = core.add_container(root, Layout::new().size(total, 10)).unwrap();
            core.add_container(c, docked(Dock::Left, left, 0)).unwrap();
            let fill = core.add_container(c, Layout::fill()).unwrap();
            core.layout(Expanse::new(1000, 100)).unwrap();
            prop_assert_eq!(core.bounds(fill).unwrap().w, total.saturating_sub(left));
        }
    }
}
