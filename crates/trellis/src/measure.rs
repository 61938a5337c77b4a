//! Two-phase layout. Measure runs bottom-up and records the size each node
//! wants for a given available size; arrange runs top-down and assigns final
//! bounds inside the slot a parent hands out.

use std::mem;

use crate::{
    NodeId,
    error::{Error, Result},
    event::Event,
    geom::{Expanse, Rect, UNBOUNDED},
    layout::{Align, Dock},
    node::Kind,
    tree::Core,
};

/// How a node's content is measured and arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Strategy {
    /// Children docked to edges, filling, or positioned freely.
    Dock,
    /// No content; sized entirely by the parent.
    Leaf,
    /// Scrollbar negotiation.
    Scroll,
    /// Fixed sections around splitter bars.
    Split,
    /// Content plus a resizer frame.
    Resizable,
}

impl Strategy {
    /// The strategy for a node kind.
    pub(crate) fn of(kind: &Kind) -> Self {
        match kind {
            Kind::Container | Kind::Widget(_) | Kind::DockArea(_) => Self::Dock,
            Kind::Scrollbar(_) | Kind::SplitterBar(_) | Kind::Resizer(_) | Kind::Dragger(_) => {
                Self::Leaf
            }
            Kind::ScrollRegion(_) => Self::Scroll,
            Kind::Split(_) => Self::Split,
            Kind::Resizable(_) => Self::Resizable,
        }
    }
}

/// Convert an extent into a coordinate offset.
pub(crate) fn offset(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

/// Place a node along one axis of its slot. Returns the start coordinate and
/// the extent.
#[allow(clippy::too_many_arguments)]
fn place(
    docked: bool,
    align: Align,
    desired: Option<u32>,
    measured: u32,
    min: u32,
    max: u32,
    start: i32,
    avail: u32,
) -> (i32, u32) {
    let size = if docked {
        avail
    } else {
        match align {
            Align::Stretch => desired.unwrap_or(avail),
            Align::Start | Align::Center | Align::End => measured,
        }
    };
    let size = size.max(min.min(max)).min(max).min(avail);
    let gap = avail - size;
    let shift = match (docked, align) {
        (true, _) | (false, Align::Stretch | Align::Start) => 0,
        (false, Align::Center) => gap / 2,
        (false, Align::End) => gap,
    };
    (start.saturating_add(offset(shift)), size)
}

impl Core {
    /// Measure a node against an available size. Returns the size the node
    /// wants, margins included. Axes of `available` may be [`UNBOUNDED`]; the
    /// result never is.
    pub fn measure(&mut self, id: NodeId, available: Expanse) -> Result<Expanse> {
        self.layout_depth += 1;
        let mut core = scopeguard::guard(self, |core| core.layout_depth -= 1);
        core.measure_node(id, available)
    }

    /// Arrange a node into a slot given in its parent's coordinates. The node
    /// must have been measured at least once.
    pub fn arrange(&mut self, id: NodeId, slot: Rect) -> Result<()> {
        self.layout_depth += 1;
        let mut core = scopeguard::guard(self, |core| core.layout_depth -= 1);
        core.arrange_node(id, slot)
    }

    /// Full pass from the root over a canvas of the given size.
    pub fn layout(&mut self, size: Expanse) -> Result<()> {
        self.layout_depth += 1;
        let mut core = scopeguard::guard(self, |core| core.layout_depth -= 1);
        let root = core.root;
        core.measure_node(root, size)?;
        core.arrange_node(root, size.rect())?;
        tracing::trace!(?size, "layout pass complete");
        Ok(())
    }

    /// Children that take part in layout.
    pub(crate) fn layout_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .into_iter()
            .filter(|c| {
                self.nodes
                    .get(*c)
                    .is_some_and(|n| !n.flags.collapsed && !n.pending_delete)
            })
            .collect()
    }

    /// Measure without touching the layout depth.
    pub(crate) fn measure_node(&mut self, id: NodeId, available: Expanse) -> Result<Expanse> {
        let node = self.get_mut(id)?;
        if node.flags.collapsed {
            node.measured = Expanse::default();
            node.measured_with = Some(available);
            return Ok(node.measured);
        }
        if !node.needs_layout && node.measured_with == Some(available) {
            return Ok(node.measured);
        }
        let layout = node.layout;
        let strategy = Strategy::of(&node.kind);

        let mut avail = available.shrink(layout.margin);
        if let Some(w) = layout.desired.w {
            avail.w = w;
        }
        if let Some(h) = layout.desired.h {
            avail.h = h;
        }
        let avail = avail.clamp(layout.min, layout.max);

        let content = self.measure_content(id, strategy, avail.shrink(layout.padding))?;

        let mut size = content.grow(layout.padding);
        if let Some(w) = layout.desired.w {
            size.w = w;
        }
        if let Some(h) = layout.desired.h {
            size.h = h;
        }
        let mut size = size.clamp(layout.min, layout.max);
        if size.w == UNBOUNDED {
            size.w = layout.min.w;
        }
        if size.h == UNBOUNDED {
            size.h = layout.min.h;
        }
        let size = size.grow(layout.margin);

        let node = self.get_mut(id)?;
        node.measured = size;
        node.measured_with = Some(available);
        Ok(size)
    }

    /// Measure a node's content area.
    fn measure_content(&mut self, id: NodeId, strategy: Strategy, avail: Expanse) -> Result<Expanse> {
        match strategy {
            Strategy::Dock => {
                let intrinsic = match &self.get(id)?.kind {
                    Kind::Widget(Some(w)) => w.measure(avail),
                    _ => Expanse::default(),
                };
                Ok(intrinsic.max(self.measure_docked(id, avail)?))
            }
            Strategy::Leaf => Ok(Expanse::default()),
            Strategy::Scroll => self.measure_scroll(id, avail),
            Strategy::Split => self.measure_split(id, avail),
            Strategy::Resizable => self.measure_resizable(id, avail),
        }
    }

    /// The default dock measure. Edge docks consume space in insertion order,
    /// fill children share what is left, and free children extend the
    /// requirement by their offset.
    fn measure_docked(&mut self, id: NodeId, avail: Expanse) -> Result<Expanse> {
        let (mut used_w, mut used_h) = (0u32, 0u32);
        let (mut req_w, mut req_h) = (0u32, 0u32);
        let mut free = Expanse::default();
        let mut fills = Vec::new();
        for child in self.layout_children(id) {
            let layout = self.get(child)?.layout;
            let rem = avail.saturating_sub(Expanse::new(used_w, used_h));
            match layout.dock {
                Dock::Left | Dock::Right => {
                    let m = self.measure_node(child, rem)?;
                    req_h = req_h.max(used_h.saturating_add(m.h));
                    used_w = used_w.saturating_add(m.w);
                }
                Dock::Top | Dock::Bottom => {
                    let m = self.measure_node(child, rem)?;
                    req_w = req_w.max(used_w.saturating_add(m.w));
                    used_h = used_h.saturating_add(m.h);
                }
                Dock::Fill => fills.push(child),
                Dock::None => {
                    let x = layout.desired.x.unwrap_or(0).max(0) as u32;
                    let y = layout.desired.y.unwrap_or(0).max(0) as u32;
                    let m = self.measure_node(child, avail.saturating_sub(Expanse::new(x, y)))?;
                    free = free.max(Expanse::new(x.saturating_add(m.w), y.saturating_add(m.h)));
                }
            }
        }
        let rem = avail.saturating_sub(Expanse::new(used_w, used_h));
        let mut fill = Expanse::default();
        for child in fills {
            fill = fill.max(self.measure_node(child, rem)?);
        }
        Ok(Expanse::new(
            req_w.max(used_w.saturating_add(fill.w)).max(free.w),
            req_h.max(used_h.saturating_add(fill.h)).max(free.h),
        ))
    }

    /// Arrange without touching the layout depth.
    pub(crate) fn arrange_node(&mut self, id: NodeId, slot: Rect) -> Result<()> {
        let node = self.get_mut(id)?;
        if node.pending_delete {
            return Ok(());
        }
        if node.flags.collapsed {
            node.slot = Some(slot);
            node.needs_layout = false;
            return Ok(());
        }
        let Some(available) = node.measured_with else {
            return Err(Error::ArrangeBeforeMeasure(id));
        };
        if !available.contains(&slot.expanse()) {
            tracing::trace!(?id, ?slot, ?available, "slot exceeds measured availability");
        }
        let layout = node.layout;
        let strategy = Strategy::of(&node.kind);
        let measured = node.measured.shrink(layout.margin);
        let docked = layout.dock != Dock::None;

        let inner = slot.shrink(layout.margin);
        let (x, w) = place(
            docked,
            layout.h_align,
            layout.desired.w,
            measured.w,
            layout.min.w,
            layout.max.w,
            inner.left(),
            inner.w,
        );
        let (y, h) = place(
            docked,
            layout.v_align,
            layout.desired.h,
            measured.h,
            layout.min.h,
            layout.max.h,
            inner.top(),
            inner.h,
        );
        self.set_bounds(id, Rect::new(x, y, w, h))?;

        let content = Rect::new(0, 0, w, h).shrink(layout.padding);
        self.arrange_content(id, strategy, content)?;

        let node = self.get_mut(id)?;
        node.slot = Some(slot);
        node.needs_layout = false;
        node.layout_done = true;
        Ok(())
    }

    /// Place a node's children inside its local content rect.
    fn arrange_content(&mut self, id: NodeId, strategy: Strategy, content: Rect) -> Result<()> {
        match strategy {
            Strategy::Dock => self.arrange_docked(id, content),
            Strategy::Leaf => Ok(()),
            Strategy::Scroll => self.arrange_scroll(id, content),
            Strategy::Split => self.arrange_split(id, content),
            Strategy::Resizable => self.arrange_resizable(id, content),
        }
    }

    /// The default dock arrange. Edge docks peel strips off the remaining
    /// rect in insertion order; fill children share the remainder.
    fn arrange_docked(&mut self, id: NodeId, content: Rect) -> Result<()> {
        let mut rem = content;
        let mut fills = Vec::new();
        for child in self.layout_children(id) {
            let node = self.get(child)?;
            let (layout, m) = (node.layout, node.measured);
            match layout.dock {
                Dock::Left => {
                    let w = m.w.min(rem.w);
                    self.arrange_node(child, Rect::new(rem.left(), rem.top(), w, rem.h))?;
                    rem = Rect::new(rem.left().saturating_add(offset(w)), rem.top(), rem.w - w, rem.h);
                }
                Dock::Right => {
                    let w = m.w.min(rem.w);
                    let x = rem.right().saturating_sub(offset(w));
                    self.arrange_node(child, Rect::new(x, rem.top(), w, rem.h))?;
                    rem.w -= w;
                }
                Dock::Top => {
                    let h = m.h.min(rem.h);
                    self.arrange_node(child, Rect::new(rem.left(), rem.top(), rem.w, h))?;
                    rem = Rect::new(rem.left(), rem.top().saturating_add(offset(h)), rem.w, rem.h - h);
                }
                Dock::Bottom => {
                    let h = m.h.min(rem.h);
                    let y = rem.bottom().saturating_sub(offset(h));
                    self.arrange_node(child, Rect::new(rem.left(), y, rem.w, h))?;
                    rem.h -= h;
                }
                Dock::Fill => fills.push(child),
                Dock::None => {
                    let x = (layout.desired.x.unwrap_or(0).max(0) as u32).min(content.w);
                    let y = (layout.desired.y.unwrap_or(0).max(0) as u32).min(content.h);
                    let slot = Rect::new(
                        content.left().saturating_add(offset(x)),
                        content.top().saturating_add(offset(y)),
                        content.w - x,
                        content.h - y,
                    );
                    self.arrange_node(child, slot)?;
                }
            }
        }
        for child in fills {
            self.arrange_node(child, rem)?;
        }
        Ok(())
    }

    /// Assign bounds to a node. A change marks the node for redraw and tells
    /// widgets about it.
    pub(crate) fn set_bounds(&mut self, id: NodeId, bounds: Rect) -> Result<()> {
        let node = self.get_mut(id)?;
        if node.bounds == bounds {
            return Ok(());
        }
        let old = mem::replace(&mut node.bounds, bounds);
        node.needs_redraw = true;
        let is_widget = matches!(node.kind, Kind::Widget(_));
        self.redraw = true;
        if is_widget {
            self.deliver(id, &Event::BoundsChanged { old, new: bounds })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{geom::Edges, layout::Layout};

    #[test]
    fn arrange_requires_measure() -> Result<()> {
        let mut core = Core::default();
        let root = core.root();
        let a = core.add_container(root, Layout::default())?;
        assert_eq!(
            core.arrange(a, Rect::new(0, 0, 10, 10)),
            Err(Error::ArrangeBeforeMeasure(a))
        );
        core.measure(a, Expanse::new(10, 10))?;
        core.arrange(a, Rect::new(0, 0, 20, 20))?;
        assert_eq!(core.bounds(a)?, Rect::new(0, 0, 20, 20));
        Ok(())
    }

    #[test]
    fn alignment_and_spacing() -> Result<()> {
        let mut core = Core::default();
        let root = core.root();
        core.update_layout(root, |l| l.padding = Edges::uniform(2))?;
        let centered = core.add_container(
            root,
            Layout::new()
                .size(10, 4)
                .align(Align::Center, Align::End)
                .margin(Edges::uniform(1)),
        )?;
        core.layout(Expanse::new(40, 20))?;
        // Content is 36x16 at (2,2); the margin leaves 34x14 at (3,3).
        assert_eq!(core.bounds(centered)?, Rect::new(3 + 12, 3 + 10, 10, 4));
        assert_eq!(core.node(centered).map(|n| n.measured()), Some(Expanse::new(12, 6)));
        Ok(())
    }

    #[test]
    fn unbounded_measure_is_finite() -> Result<()> {
        let mut core = Core::default();
        let root = core.root();
        let a = core.add_container(root, Layout::new().min(3, 4))?;
        let m = core.measure(a, Expanse::UNBOUNDED)?;
        assert_eq!(m, Expanse::new(3, 4));
        Ok(())
    }

    #[test]
    fn free_children_use_desired_position() -> Result<()> {
        let mut core = Core::default();
        let root = core.root();
        let c = core.add_container(root, Layout::new().position(10, 5).size(20, 10))?;
        let m = core.measure(root, Expanse::UNBOUNDED)?;
        assert_eq!(m, Expanse::new(30, 15));
        core.layout(Expanse::new(100, 100))?;
        assert_eq!(core.bounds(c)?, Rect::new(10, 5, 20, 10));
        Ok(())
    }
}
