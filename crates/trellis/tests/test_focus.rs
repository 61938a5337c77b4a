//! Tab cycle shape over generated trees.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;
    use trellis::{Core, FocusManager, NodeId, Result, layout::Layout, testing::harness::Harness};

    /// Parent pick and flag bits: tabable, hidden, collapsed, disabled.
    type Gen = (usize, u8);

    fn build(h: &mut Harness, items: &[Gen]) -> Result<()> {
        let core = &mut h.canvas.core;
        let mut nodes = vec![core.root()];
        for (pick, bits) in items {
            let parent = nodes[pick % nodes.len()];
            let id = core.add_container(parent, Layout::default())?;
            core.set_tabable(id, bits & 1 != 0)?;
            core.set_hidden(id, bits & 2 != 0)?;
            core.set_collapsed(id, bits & 4 != 0)?;
            core.set_disabled(id, bits & 8 != 0)?;
            nodes.push(id);
        }
        h.tick()
    }

    /// Tabable nodes in pre-order, skipping hidden, collapsed and disabled
    /// subtrees.
    fn expected(core: &Core, id: NodeId, out: &mut Vec<NodeId>) {
        let Some(node) = core.node(id) else {
            return;
        };
        let f = node.flags();
        if f.hidden || f.collapsed || f.disabled {
            return;
        }
        if f.tabable {
            out.push(id);
        }
        for c in core.children(id) {
            expected(core, c, out);
        }
    }

    fn gen_tree() -> impl Strategy<Value = Vec<Gen>> {
        prop::collection::vec((any::<usize>(), 0u8..16), 1..30)
    }

    proptest! {
        #[test]
        fn cycle_holds_every_reachable_tabable(items in gen_tree()) {
            let mut h = Harness::new(100, 100);
            build(&mut h, &items).unwrap();
            let core = &h.canvas.core;
            let mut want = Vec::new();
            expected(core, core.root(), &mut want);
            prop_assert_eq!(core.tab_cycle().order(), want.as_slice());
        }

        #[test]
        fn advancing_visits_each_member_once(items in gen_tree()) {
            let mut h = Harness::new(100, 100);
            build(&mut h, &items).unwrap();
            let core = &mut h.canvas.core;
            let members = core.tab_cycle().order().to_vec();
            if members.is_empty() {
                prop_assert!(!core.focus_next().unwrap());
                prop_assert!(!core.focus_prev().unwrap());
                return Ok(());
            }

            prop_assert!(core.focus_next().unwrap());
            let start = core.focus();
            prop_assert_eq!(start, Some(members[0]));
            let mut seen = HashSet::new();
            for _ in 0..members.len() {
                core.focus_next().unwrap();
                prop_assert!(seen.insert(core.focus()));
            }
            prop_assert_eq!(core.focus(), start);
            prop_assert_eq!(seen.len(), members.len());

            let mut seen = HashSet::new();
            for _ in 0..members.len() {
                core.focus_prev().unwrap();
                prop_assert!(seen.insert(core.focus()));
            }
            prop_assert_eq!(core.focus(), start);
            prop_assert_eq!(seen.len(), members.len());
        }
    }
}
