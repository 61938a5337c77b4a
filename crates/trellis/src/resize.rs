//! Resize and move handles, and resizable windows framed by them.

use crate::{
    NodeId,
    error::{Error, Result},
    geom::{Expanse, Frame, Point, Rect},
    layout::{DesiredBounds, Dock, Layout},
    measure::offset,
    node::Kind,
    tree::Core,
};

/// The edge or corner a resizer drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeEdge {
    /// Left edge.
    Left,
    /// Top edge.
    Top,
    /// Right edge.
    Right,
    /// Bottom edge.
    Bottom,
    /// Top-left corner.
    TopLeft,
    /// Top-right corner.
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom-right corner.
    BottomRight,
}

impl ResizeEdge {
    /// Every edge, in frame order.
    pub const ALL: [Self; 8] = [
        Self::Left,
        Self::Top,
        Self::Right,
        Self::Bottom,
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Moves the left side.
    fn left(self) -> bool {
        matches!(self, Self::Left | Self::TopLeft | Self::BottomLeft)
    }

    /// Moves the right side.
    fn right(self) -> bool {
        matches!(self, Self::Right | Self::TopRight | Self::BottomRight)
    }

    /// Moves the top side.
    fn top(self) -> bool {
        matches!(self, Self::Top | Self::TopLeft | Self::TopRight)
    }

    /// Moves the bottom side.
    fn bottom(self) -> bool {
        matches!(self, Self::Bottom | Self::BottomLeft | Self::BottomRight)
    }

    /// The piece of a frame this edge occupies.
    fn piece(self, frame: &Frame) -> Rect {
        match self {
            Self::Left => frame.left,
            Self::Top => frame.top,
            Self::Right => frame.right,
            Self::Bottom => frame.bottom,
            Self::TopLeft => frame.topleft,
            Self::TopRight => frame.topright,
            Self::BottomLeft => frame.bottomleft,
            Self::BottomRight => frame.bottomright,
        }
    }
}

/// A handle that resizes its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resizer {
    /// Which side of the target moves.
    pub(crate) edge: ResizeEdge,
    /// The node being resized.
    pub(crate) target: NodeId,
    /// Keep the target inside its parent's content rect.
    pub(crate) clamp_to_parent: bool,
}

/// A handle that moves its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dragger {
    /// The node being moved.
    pub(crate) target: NodeId,
    /// Keep the target inside its parent's content rect.
    pub(crate) clamp_to_parent: bool,
}

/// A window with a content child and eight resizers on its border.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resizable {
    /// The content child.
    pub(crate) content: NodeId,
    /// Resizers in [`ResizeEdge::ALL`] order.
    pub(crate) resizers: [NodeId; 8],
}

/// Clamp an extent to a layout's min and max. Max wins when they cross.
fn clamp_extent(v: i64, min: u32, max: u32) -> i64 {
    v.max(min.min(max) as i64).min(max as i64)
}

impl Core {
    /// Append a resizer for `target` to `parent`.
    pub fn add_resizer(
        &mut self,
        parent: NodeId,
        layout: Layout,
        edge: ResizeEdge,
        target: NodeId,
    ) -> Result<NodeId> {
        self.get(target)?;
        let id = self.add(
            parent,
            Kind::Resizer(Resizer {
                edge,
                target,
                clamp_to_parent: false,
            }),
            layout,
        )?;
        self.set_pointer_input(id, true)?;
        Ok(id)
    }

    /// Append a dragger for `target` to `parent`.
    pub fn add_dragger(
        &mut self,
        parent: NodeId,
        layout: Layout,
        target: NodeId,
        clamp_to_parent: bool,
    ) -> Result<NodeId> {
        self.get(target)?;
        let id = self.add(
            parent,
            Kind::Dragger(Dragger {
                target,
                clamp_to_parent,
            }),
            layout,
        )?;
        self.set_pointer_input(id, true)?;
        Ok(id)
    }

    /// Append a resizable window at `rect`, in `parent`'s content
    /// coordinates. Returns the window; its content is reachable with
    /// [`Core::resizable_content`].
    pub fn add_resizable(&mut self, parent: NodeId, rect: Rect, clamp_to_parent: bool) -> Result<NodeId> {
        self.get(parent)?;
        let content = self.create_detached(Kind::Container, Layout::fill().min(0, 0));
        let window = self.create_detached(
            Kind::Container,
            Layout::new()
                .position(rect.left(), rect.top())
                .size(rect.w, rect.h)
                .min(self.config.resizer_border * 3, self.config.resizer_border * 3),
        );
        self.attach(window, content)?;
        let mut resizers = Vec::with_capacity(8);
        for edge in ResizeEdge::ALL {
            let r = self.add_resizer(window, Layout::new().min(0, 0), edge, window)?;
            if let Kind::Resizer(state) = &mut self.get_mut(r)?.kind {
                state.clamp_to_parent = clamp_to_parent;
            }
            resizers.push(r);
        }
        let resizers: [NodeId; 8] = resizers
            .try_into()
            .map_err(|_| Error::Internal("resizer count".into()))?;
        self.get_mut(window)?.kind = Kind::Resizable(Resizable { content, resizers });
        self.attach(parent, window)?;
        Ok(window)
    }

    /// The content child of a resizable window.
    pub fn resizable_content(&self, window: NodeId) -> Result<NodeId> {
        match &self.get(window)?.kind {
            Kind::Resizable(r) => Ok(r.content),
            _ => Err(Error::WrongKind {
                node: window,
                expected: "resizable",
            }),
        }
    }

    /// The resizer on one edge of a resizable window.
    pub fn resizer(&self, window: NodeId, edge: ResizeEdge) -> Result<NodeId> {
        match &self.get(window)?.kind {
            Kind::Resizable(r) => Ok(r.resizers[ResizeEdge::ALL
                .iter()
                .position(|e| *e == edge)
                .unwrap_or_default()]),
            _ => Err(Error::WrongKind {
                node: window,
                expected: "resizable",
            }),
        }
    }

    /// Apply a drag of `delta` to a resizer. The opposite side of the target
    /// stays fixed. The new bounds take effect at once and are kept by later
    /// layout passes. Returns the target's new bounds.
    pub fn resize_by(&mut self, resizer: NodeId, delta: Point) -> Result<Rect> {
        let Kind::Resizer(r) = self.get(resizer)?.kind else {
            return Err(Error::WrongKind {
                node: resizer,
                expected: "resizer",
            });
        };
        let node = self.get(r.target)?;
        let (b, layout) = (node.bounds, node.layout);
        let (mut left, mut top) = (b.left() as i64, b.top() as i64);
        let (mut right, mut bottom) = (b.right() as i64, b.bottom() as i64);
        let (dx, dy) = (delta.x as i64, delta.y as i64);

        if r.edge.left() {
            left = right - clamp_extent(right - (left + dx), layout.min.w, layout.max.w);
        }
        if r.edge.right() {
            right = left + clamp_extent(right + dx - left, layout.min.w, layout.max.w);
        }
        if r.edge.top() {
            top = bottom - clamp_extent(bottom - (top + dy), layout.min.h, layout.max.h);
        }
        if r.edge.bottom() {
            bottom = top + clamp_extent(bottom + dy - top, layout.min.h, layout.max.h);
        }
        if r.clamp_to_parent
            && let Some(parent) = self.parent(r.target)
        {
            let c = self.content_rect(parent)?;
            if r.edge.left() {
                left = left.max(c.left() as i64);
            }
            if r.edge.right() {
                right = right.min(c.right() as i64);
            }
            if r.edge.top() {
                top = top.max(c.top() as i64);
            }
            if r.edge.bottom() {
                bottom = bottom.min(c.bottom() as i64);
            }
        }
        let rect = Rect::new(
            left as i32,
            top as i32,
            (right - left).max(0) as u32,
            (bottom - top).max(0) as u32,
        );
        self.place_target(r.target, rect)?;
        Ok(rect)
    }

    /// Apply a drag of `delta` to a dragger. Returns the target's new bounds.
    pub fn drag_by(&mut self, dragger: NodeId, delta: Point) -> Result<Rect> {
        let Kind::Dragger(d) = self.get(dragger)?.kind else {
            return Err(Error::WrongKind {
                node: dragger,
                expected: "dragger",
            });
        };
        let mut rect = self.get(d.target)?.bounds.shift(delta.x, delta.y);
        if d.clamp_to_parent
            && let Some(parent) = self.parent(d.target)
        {
            rect = rect.clamp_within(&self.content_rect(parent)?);
        }
        self.place_target(d.target, rect)?;
        Ok(rect)
    }

    /// Give a node new bounds now and record them as its desired bounds so
    /// the next layout pass keeps them.
    fn place_target(&mut self, target: NodeId, rect: Rect) -> Result<()> {
        let node = self.get(target)?;
        let layout = node.layout;
        let pad = match node.parent {
            Some(p) => self.get(p)?.layout.padding,
            None => Default::default(),
        };
        let mut desired = DesiredBounds {
            w: Some(rect.w),
            h: Some(rect.h),
            ..layout.desired
        };
        if layout.dock == Dock::None {
            desired.x = Some(
                rect.left()
                    .saturating_sub(offset(pad.left))
                    .saturating_sub(offset(layout.margin.left)),
            );
            desired.y = Some(
                rect.top()
                    .saturating_sub(offset(pad.top))
                    .saturating_sub(offset(layout.margin.top)),
            );
        }
        self.update_layout(target, |l| l.desired = desired)?;
        self.set_bounds(target, rect)?;
        Ok(())
    }

    /// Measure a resizable window's content and frame.
    pub(crate) fn measure_resizable(&mut self, id: NodeId, avail: Expanse) -> Result<Expanse> {
        let Kind::Resizable(r) = &self.get(id)?.kind else {
            return Ok(Expanse::default());
        };
        let r = r.clone();
        let content = self.measure_node(r.content, avail)?;
        let frame = Frame::new(avail.rect(), self.config.resizer_border);
        for (edge, resizer) in ResizeEdge::ALL.iter().zip(r.resizers) {
            self.measure_node(resizer, edge.piece(&frame).expanse())?;
        }
        Ok(content)
    }

    /// Content fills the window; resizers sit on top of its border.
    pub(crate) fn arrange_resizable(&mut self, id: NodeId, area: Rect) -> Result<()> {
        let Kind::Resizable(r) = &self.get(id)?.kind else {
            return Ok(());
        };
        let r = r.clone();
        self.arrange_node(r.content, area)?;
        let frame = Frame::new(area, self.config.resizer_border);
        for (edge, resizer) in ResizeEdge::ALL.iter().zip(r.resizers) {
            self.arrange_node(resizer, edge.piece(&frame))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_placement() -> Result<()> {
        let mut core = Core::default();
        let root = core.root();
        let w = core.add_resizable(root, Rect::new(10, 10, 100, 50), false)?;
        core.layout(Expanse::new(300, 300))?;
        assert_eq!(core.bounds(w)?, Rect::new(10, 10, 100, 50));
        let content = core.resizable_content(w)?;
        assert_eq!(core.bounds(content)?, Rect::new(0, 0, 100, 50));
        let br = core.resizer(w, ResizeEdge::BottomRight)?;
        assert_eq!(core.bounds(br)?, Rect::new(94, 44, 6, 6));
        Ok(())
    }

    #[test]
    fn left_edge_keeps_right_fixed() -> Result<()> {
        let mut core = Core::default();
        let root = core.root();
        let w = core.add_resizable(root, Rect::new(50, 50, 100, 50), false)?;
        core.update_layout(w, |l| l.min = Expanse::new(40, 20))?;
        core.layout(Expanse::new(300, 300))?;
        let left = core.resizer(w, ResizeEdge::Left)?;
        assert_eq!(core.resize_by(left, Point::new(-20, 0))?, Rect::new(30, 50, 120, 50));
        // Shrinking past the minimum pins the width, not the right edge.
        assert_eq!(core.resize_by(left, Point::new(200, 0))?, Rect::new(110, 50, 40, 50));
        core.layout(Expanse::new(300, 300))?;
        assert_eq!(core.bounds(w)?, Rect::new(110, 50, 40, 50));
        Ok(())
    }

    #[test]
    fn clamp_to_parent() -> Result<()> {
        let mut core = Core::default();
        let root = core.root();
        let w = core.add_resizable(root, Rect::new(10, 10, 50, 50), true)?;
        core.layout(Expanse::new(100, 100))?;
        let br = core.resizer(w, ResizeEdge::BottomRight)?;
        assert_eq!(core.resize_by(br, Point::new(500, 5))?, Rect::new(10, 10, 90, 55));
        let tl = core.resizer(w, ResizeEdge::TopLeft)?;
        assert_eq!(core.resize_by(tl, Point::new(-50, -50))?, Rect::new(0, 0, 100, 65));
        Ok(())
    }

    #[test]
    fn dragger_moves() -> Result<()> {
        let mut core = Core::default();
        let root = core.root();
        let target = core.add_container(root, Layout::new().position(0, 0).size(20, 20))?;
        let handle = core.add_dragger(target, Layout::new().size(20, 4), target, true)?;
        core.layout(Expanse::new(100, 100))?;
        assert_eq!(core.drag_by(handle, Point::new(30, 10))?, Rect::new(30, 10, 20, 20));
        assert_eq!(core.drag_by(handle, Point::new(100, 100))?, Rect::new(80, 80, 20, 20));
        core.layout(Expanse::new(100, 100))?;
        assert_eq!(core.bounds(target)?, Rect::new(80, 80, 20, 20));
        Ok(())
    }
}
