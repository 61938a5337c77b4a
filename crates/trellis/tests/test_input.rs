//! The input router driven through the test harness: hover, capture, focus,
//! tab cycling, accelerators, drag-and-drop, popups and engine handles.

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use trellis::{
        Axis, Config, DropOutcome, FocusManager, NodeId, Rect, Result,
        event::{
            key::{Ctrl, KeyCode, Shift},
            pointer::Button,
        },
        layout::{Dock, Layout},
        resize::ResizeEdge,
        split::SplitMode,
        testing::{
            harness::Harness,
            probe::{Log, Probe, drain, log},
        },
    };

    /// Add a probe that takes pointer input.
    fn add(h: &mut Harness, parent: NodeId, layout: Layout, probe: Probe) -> Result<NodeId> {
        let id = h.canvas.core.add_widget(parent, layout, probe)?;
        h.canvas.core.set_pointer_input(id, true)?;
        Ok(id)
    }

    /// Two probes side by side: `a` docked left 50 wide, `b` filling the
    /// rest.
    fn pair(h: &mut Harness, l: &Log, a: Probe, b: Probe) -> Result<(NodeId, NodeId)> {
        let root = h.root();
        let a = add(h, root, Layout::docked(Dock::Left).width(50), a)?;
        let b = add(h, root, Layout::fill(), b)?;
        h.tick()?;
        drain(l);
        Ok((a, b))
    }

    #[test]
    fn hover_follows_pointer() -> Result<()> {
        let mut h = Harness::new(100, 40);
        let l = log();
        let (a, b) = pair(&mut h, &l, Probe::new("a", &l), Probe::new("b", &l))?;

        h.move_to(10, 10)?;
        assert_eq!(drain(&l), vec!["a: enter", "a: move 10,10"]);
        assert_eq!(h.canvas.core.hovered(), Some(a));

        h.move_to(60, 10)?;
        assert_eq!(drain(&l), vec!["a: leave", "b: enter", "b: move 10,10"]);
        assert_eq!(h.canvas.core.hovered(), Some(b));
        Ok(())
    }

    #[test]
    fn press_captures_the_pointer() -> Result<()> {
        let mut h = Harness::new(100, 40);
        let l = log();
        let (a, _) = pair(&mut h, &l, Probe::new("a", &l), Probe::new("b", &l))?;

        h.move_to(10, 10)?;
        h.press(Button::Left)?;
        assert_eq!(h.canvas.core.captured(), Some(a));
        drain(&l);

        h.move_to(60, 10)?;
        assert_eq!(drain(&l), vec!["a: move 60,10 held"]);
        assert_eq!(h.canvas.core.hovered(), Some(a));

        h.release(Button::Left)?;
        assert_eq!(drain(&l), vec!["a: up 60,10"]);
        assert_eq!(h.canvas.core.captured(), None);

        h.move_to(61, 10)?;
        assert_eq!(drain(&l), vec!["a: leave", "b: enter", "b: move 11,10"]);
        Ok(())
    }

    #[test]
    fn disabled_subtrees_get_no_input() -> Result<()> {
        let mut h = Harness::new(100, 40);
        let l = log();
        let root = h.root();
        let group = h.canvas.core.add_container(root, Layout::fill())?;
        add(&mut h, group, Layout::fill(), Probe::new("p", &l).consume())?;
        h.canvas.core.set_disabled(group, true)?;
        h.tick()?;
        h.click(5, 5)?;
        assert!(drain(&l).is_empty());

        h.canvas.core.set_disabled(group, false)?;
        h.tick()?;
        h.click(6, 5)?;
        assert_eq!(drain(&l), vec!["p: enter", "p: move 6,5", "p: down 6,5", "p: up 6,5"]);
        Ok(())
    }

    #[test]
    fn click_focuses_and_text_follows() -> Result<()> {
        let mut h = Harness::new(100, 40);
        let l = log();
        let (a, b) = pair(&mut h, &l, Probe::new("a", &l), Probe::new("b", &l))?;
        h.canvas.core.set_keyboard_input(a, true)?;
        h.canvas.core.set_keyboard_input(b, true)?;
        h.tick()?;

        h.click(5, 5)?;
        assert_eq!(h.canvas.core.focus(), Some(a));
        h.click(70, 5)?;
        assert_eq!(h.canvas.core.focus(), Some(b));
        drain(&l);
        h.chars("hi")?;
        assert_eq!(drain(&l), vec!["b: char h", "b: char i"]);
        Ok(())
    }

    #[test]
    fn deleting_the_focus_blurs_it() -> Result<()> {
        let mut h = Harness::new(100, 40);
        let l = log();
        let root = h.root();
        let group = h.canvas.core.add_container(root, Layout::fill())?;
        let a = add(&mut h, group, Layout::fill(), Probe::new("a", &l).consume())?;
        h.canvas.core.set_keyboard_input(a, true)?;
        h.tick()?;
        h.canvas.core.set_focus(a)?;
        drain(&l);

        h.canvas.core.delete(group)?;
        assert_eq!(h.canvas.core.focus(), None);
        h.chars("x")?;
        assert_eq!(drain(&l), vec!["a: blur"]);
        Ok(())
    }

    #[test]
    fn tab_walks_the_cycle() -> Result<()> {
        let mut h = Harness::new(300, 40);
        let l = log();
        let root = h.root();
        let mut ids = Vec::new();
        for name in ["a", "b", "c"] {
            let id = add(&mut h, root, Layout::docked(Dock::Left).width(50), Probe::new(name, &l))?;
            h.canvas.core.set_tabable(id, true)?;
            ids.push(id);
        }
        h.tick()?;
        assert_eq!(h.canvas.core.tab_cycle().order(), ids.as_slice());

        assert!(h.key(KeyCode::Tab)?);
        assert_eq!(h.canvas.core.focus(), Some(ids[0]));
        h.key(KeyCode::Tab)?;
        assert_eq!(h.canvas.core.focus(), Some(ids[1]));
        h.key(Shift + KeyCode::Tab)?;
        h.key(Shift + KeyCode::Tab)?;
        assert_eq!(h.canvas.core.focus(), Some(ids[2]));
        h.key(KeyCode::Tab)?;
        assert_eq!(h.canvas.core.focus(), Some(ids[0]));

        let changes: Vec<String> = drain(&l)
            .into_iter()
            .filter(|e| e.ends_with("focus") || e.ends_with("blur"))
            .collect();
        assert_eq!(
            changes,
            vec![
                "a: focus", "a: blur", "b: focus", "b: blur", "a: focus", "a: blur", "c: focus",
                "c: blur", "a: focus",
            ]
        );

        // A hidden member drops out of the cycle on the next tick.
        h.canvas.core.set_hidden(ids[1], true)?;
        h.tick()?;
        h.key(KeyCode::Tab)?;
        assert_eq!(h.canvas.core.focus(), Some(ids[2]));
        Ok(())
    }

    #[test]
    fn tab_goes_to_the_widget_without_navigation() -> Result<()> {
        let config = Config {
            tab_key_navigation: false,
            ..Config::default()
        };
        let mut h = Harness::with_config(config, 100, 40);
        let l = log();
        let root = h.root();
        let a = add(&mut h, root, Layout::fill(), Probe::new("a", &l).consume())?;
        h.canvas.core.set_tabable(a, true)?;
        h.tick()?;
        h.canvas.core.set_focus(a)?;
        drain(&l);
        assert!(h.key(KeyCode::Tab)?);
        assert_eq!(drain(&l), vec!["a: key Tab down", "a: key Tab up"]);
        Ok(())
    }

    #[test]
    fn accelerators_prefer_the_focus_path() -> Result<()> {
        let mut h = Harness::new(100, 40);
        let l = log();
        let (a, g) = pair(&mut h, &l, Probe::new("a", &l), Probe::new("g", &l))?;
        let core = &mut h.canvas.core;
        core.set_tabable(a, true)?;
        core.add_accelerator(a, "Ctrl+S", "save")?;
        core.add_global_accelerator(g, "ctrl+s", "global-save")?;
        core.add_global_accelerator(g, "F5", "refresh")?;
        core.add_accelerator(g, "Ctrl+Q", "quit")?;
        h.tick()?;
        h.canvas.core.set_focus(a)?;
        drain(&l);

        assert!(h.key(Ctrl + 's')?);
        assert!(h.key(KeyCode::F(5))?);
        // Not global, and not on the focus path.
        assert!(!h.key(Ctrl + 'q')?);
        let fired: Vec<String> = drain(&l).into_iter().filter(|e| e.contains("accel")).collect();
        assert_eq!(fired, vec!["a: accel save", "g: accel refresh"]);

        h.canvas.core.blur()?;
        assert!(h.key(Ctrl + 's')?);
        assert_eq!(drain(&l), vec!["a: blur", "g: accel global-save"]);

        h.canvas.core.set_disabled(g, true)?;
        h.tick()?;
        assert!(!h.key(KeyCode::F(5))?);

        assert!(h.canvas.core.add_accelerator(a, "Hyper+X", "nope").is_err());
        Ok(())
    }

    #[test]
    fn drag_and_drop_completes() -> Result<()> {
        let mut h = Harness::new(100, 40);
        let l = log();
        let (_, dst) = pair(
            &mut h,
            &l,
            Probe::new("src", &l).drag_source("card"),
            Probe::new("dst", &l).drop_target("card"),
        )?;
        h.move_to(10, 10)?;
        h.press(Button::Left)?;
        drain(&l);

        // Inside the threshold the press is still an ordinary capture.
        h.move_to(13, 10)?;
        assert_eq!(drain(&l), vec!["src: move 13,10 held"]);
        assert!(!h.canvas.core.is_dragging());

        h.move_to(60, 10)?;
        assert_eq!(drain(&l), vec!["src: drag-start", "dst: drag-enter card", "dst: drag-over"]);
        assert_eq!(h.canvas.core.drag_target(), Some(dst));

        h.release(Button::Left)?;
        assert_eq!(drain(&l), vec!["dst: drop card 10,10", "dst: drag-leave", "src: drag-done"]);
        assert_eq!(h.canvas.core.last_drop(), Some(DropOutcome::Completed(dst)));
        assert!(!h.canvas.core.is_dragging());
        assert_eq!(h.canvas.core.captured(), None);
        Ok(())
    }

    #[test]
    fn rejected_drop_returns_the_package() -> Result<()> {
        let mut h = Harness::new(100, 40);
        let l = log();
        pair(
            &mut h,
            &l,
            Probe::new("src", &l).drag_source("card"),
            Probe::new("dst", &l).drop_target("other"),
        )?;
        h.move_to(10, 10)?;
        h.press(Button::Left)?;
        h.move_to(60, 10)?;
        drain(&l);
        h.release(Button::Left)?;
        assert_eq!(drain(&l), vec!["dst: drag-leave", "src: drag-cancel card"]);
        assert_eq!(h.canvas.core.last_drop(), Some(DropOutcome::Cancelled));
        Ok(())
    }

    #[test]
    fn escape_cancels_a_drag() -> Result<()> {
        let mut h = Harness::new(100, 40);
        let l = log();
        pair(
            &mut h,
            &l,
            Probe::new("src", &l).drag_source("card"),
            Probe::new("dst", &l).drop_target("card"),
        )?;
        h.move_to(10, 10)?;
        h.press(Button::Left)?;
        h.move_to(60, 10)?;
        drain(&l);

        assert!(h.key(KeyCode::Esc)?);
        assert_eq!(drain(&l), vec!["dst: drag-leave", "src: drag-cancel card"]);
        assert!(!h.canvas.core.is_dragging());
        // Cancelling twice does nothing.
        assert!(!h.canvas.core.cancel_drag()?);

        h.release(Button::Left)?;
        assert_eq!(drain(&l), vec!["dst: up 10,10"]);
        assert_eq!(h.canvas.core.last_drop(), Some(DropOutcome::Cancelled));
        Ok(())
    }

    #[test]
    fn popups_close_on_outside_press() -> Result<()> {
        let mut h = Harness::new(200, 200);
        let l = log();
        let root = h.root();
        let p = add(
            &mut h,
            root,
            Layout::new().position(100, 100).size(50, 50),
            Probe::new("p", &l).consume(),
        )?;
        h.canvas.core.open_popup(p)?;
        h.tick()?;
        assert_eq!(h.canvas.core.open_popups(), vec![p]);

        h.click(120, 120)?;
        assert_eq!(h.canvas.core.open_popups(), vec![p]);
        drain(&l);

        h.click(10, 10)?;
        assert_eq!(drain(&l), vec!["p: leave", "p: closed"]);
        assert!(h.canvas.core.open_popups().is_empty());
        assert!(h.canvas.core.node(p).is_some_and(|n| n.flags().hidden));

        // Closing again is a no-op.
        h.canvas.core.close_popup(p)?;
        assert!(drain(&l).is_empty());
        Ok(())
    }

    #[test]
    fn splitter_bar_drags() -> Result<()> {
        let mut h = Harness::new(105, 50);
        let root = h.root();
        let core = &mut h.canvas.core;
        let split = core.add_split(root, Layout::fill(), SplitMode::Horizontal)?;
        let a = core.create_detached(trellis::Kind::Container, Layout::default());
        let b = core.create_detached(trellis::Kind::Container, Layout::default());
        core.add_section(split, a)?;
        core.add_section(split, b)?;
        h.tick()?;

        h.drag((52, 10), (72, 10))?;
        let fraction = h.canvas.core.split(split)?.fraction(Axis::Horizontal);
        assert!((fraction - 0.7).abs() < 1e-4);
        assert_eq!(h.canvas.core.bounds(a)?, Rect::new(0, 0, 70, 50));
        assert_eq!(h.canvas.core.bounds(b)?, Rect::new(75, 0, 30, 50));
        Ok(())
    }

    #[test]
    fn window_resizes_from_its_corner() -> Result<()> {
        let mut h = Harness::new(300, 300);
        let root = h.root();
        let w = h.canvas.core.add_resizable(root, Rect::new(10, 10, 100, 50), false)?;
        h.tick()?;
        let br = h.canvas.core.resizer(w, ResizeEdge::BottomRight)?;
        assert_eq!(h.canvas.core.absolute_bounds(br)?, Rect::new(104, 54, 6, 6));

        h.drag((106, 56), (126, 66))?;
        assert_eq!(h.canvas.core.bounds(w)?, Rect::new(10, 10, 120, 60));
        h.tick()?;
        assert_eq!(h.canvas.core.bounds(w)?, Rect::new(10, 10, 120, 60));
        let content = h.canvas.core.resizable_content(w)?;
        assert_eq!(h.canvas.core.bounds(content)?, Rect::new(0, 0, 120, 60));
        Ok(())
    }
}
