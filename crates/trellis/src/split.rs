//! Split containers: two or four sections divided by draggable bars.

use serde::{Deserialize, Serialize};

use crate::{
    NodeId,
    error::{Error, Result},
    geom::{Axis, Expanse, Point, Rect, UNBOUNDED},
    layout::Layout,
    measure::offset,
    node::Kind,
    tree::Core,
};

/// How a split divides its area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    /// Two sections side by side.
    #[default]
    Horizontal,
    /// Two sections stacked.
    Vertical,
    /// Four sections in a grid: top-left, top-right, bottom-left,
    /// bottom-right.
    Cross,
}

impl SplitMode {
    /// How many sections the split holds.
    pub fn capacity(self) -> usize {
        match self {
            Self::Horizontal | Self::Vertical => 2,
            Self::Cross => 4,
        }
    }
}

/// Split state.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    /// Division mode.
    pub(crate) mode: SplitMode,
    /// Bar positions as fractions of the free extent, per axis.
    pub(crate) fraction: [f32; 2],
    /// Section nodes by index.
    pub(crate) sections: [Option<NodeId>; 4],
    /// Bar driving the horizontal fraction, then the vertical one.
    pub(crate) bars: [Option<NodeId>; 2],
    /// The section shown alone, if any.
    pub(crate) zoomed: Option<usize>,
}

impl Split {
    /// The bar position along an axis.
    pub fn fraction(&self, axis: Axis) -> f32 {
        self.fraction[axis_index(axis)]
    }
}

/// A bar between split sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitterBar {
    /// The owning split.
    pub(crate) split: NodeId,
    /// The axis this bar moves along.
    pub(crate) axis: Axis,
}

/// Index into per-axis arrays.
fn axis_index(axis: Axis) -> usize {
    match axis {
        Axis::Horizontal => 0,
        Axis::Vertical => 1,
    }
}

/// Section and bar rects for a split area.
#[derive(Debug, Default)]
struct Cells {
    /// Section rects by index.
    sections: [Rect; 4],
    /// Bar rects, horizontal fraction first.
    bars: [Rect; 2],
}

/// Position of a bar inside an extent.
fn bar_pos(extent: u32, bar: u32, fraction: f32) -> (u32, u32) {
    let bar = bar.min(extent);
    let free = extent - bar;
    let pos = ((fraction.clamp(0.0, 1.0) as f64 * free as f64).round() as u32).min(free);
    (pos, bar)
}

/// Divide an area according to the split's mode and fractions.
fn cells(split: &Split, area: Rect, bar: u32) -> Cells {
    let mut c = Cells::default();
    if let Some(z) = split.zoomed {
        c.sections[z] = area;
        return c;
    }
    let (x, y) = (area.left(), area.top());
    let (px, bx) = bar_pos(area.w, bar, split.fraction[0]);
    let (py, by) = bar_pos(area.h, bar, split.fraction[1]);
    let (x2, w2) = (x.saturating_add(offset(px + bx)), area.w - px - bx);
    let (y2, h2) = (y.saturating_add(offset(py + by)), area.h - py - by);
    match split.mode {
        SplitMode::Horizontal => {
            c.sections[0] = Rect::new(x, y, px, area.h);
            c.sections[1] = Rect::new(x2, y, w2, area.h);
            c.bars[0] = Rect::new(x.saturating_add(offset(px)), y, bx, area.h);
        }
        SplitMode::Vertical => {
            c.sections[0] = Rect::new(x, y, area.w, py);
            c.sections[1] = Rect::new(x, y2, area.w, h2);
            c.bars[1] = Rect::new(x, y.saturating_add(offset(py)), area.w, by);
        }
        SplitMode::Cross => {
            c.sections[0] = Rect::new(x, y, px, py);
            c.sections[1] = Rect::new(x2, y, w2, py);
            c.sections[2] = Rect::new(x, y2, px, h2);
            c.sections[3] = Rect::new(x2, y2, w2, h2);
            c.bars[0] = Rect::new(x.saturating_add(offset(px)), y, bx, area.h);
            c.bars[1] = Rect::new(x, y.saturating_add(offset(py)), area.w, by);
        }
    }
    c
}

impl Core {
    /// Append a split to `parent`. Splits are virtual controls: moving a bar
    /// re-lays out only the split.
    pub fn add_split(&mut self, parent: NodeId, layout: Layout, mode: SplitMode) -> Result<NodeId> {
        self.get(parent)?;
        let split = self.create_detached(
            Kind::Split(Split {
                mode,
                fraction: [0.5, 0.5],
                sections: [None; 4],
                bars: [None; 2],
                zoomed: None,
            }),
            layout,
        );
        let axes: &[Axis] = match mode {
            SplitMode::Horizontal => &[Axis::Horizontal],
            SplitMode::Vertical => &[Axis::Vertical],
            SplitMode::Cross => &[Axis::Horizontal, Axis::Vertical],
        };
        for axis in axes {
            let bar = self.add(
                split,
                Kind::SplitterBar(SplitterBar { split, axis: *axis }),
                Layout::new().min(0, 0),
            )?;
            self.set_pointer_input(bar, true)?;
            if let Kind::Split(s) = &mut self.get_mut(split)?.kind {
                s.bars[axis_index(*axis)] = Some(bar);
            }
        }
        self.get_mut(split)?.flags.virtual_control = true;
        self.attach(parent, split)?;
        Ok(split)
    }

    /// Split state.
    pub fn split(&self, split: NodeId) -> Result<&Split> {
        match &self.get(split)?.kind {
            Kind::Split(s) => Ok(s),
            _ => Err(Error::WrongKind {
                node: split,
                expected: "split",
            }),
        }
    }

    /// Mutable split state.
    fn split_mut(&mut self, split: NodeId) -> Result<&mut Split> {
        match &mut self.get_mut(split)?.kind {
            Kind::Split(s) => Ok(s),
            _ => Err(Error::WrongKind {
                node: split,
                expected: "split",
            }),
        }
    }

    /// Place a detached node in a section. Returns the node previously in
    /// that section, now detached. Nothing changes if `node` cannot be
    /// attached.
    pub fn set_section(&mut self, split: NodeId, index: usize, node: NodeId) -> Result<Option<NodeId>> {
        let s = self.split(split)?;
        let capacity = s.mode.capacity();
        if index >= capacity {
            return Err(Error::CapacityExceeded {
                node: split,
                kind: "split",
                capacity,
            });
        }
        let old = s.sections[index];
        self.check_attach(split, node)?;
        if let Some(old) = old {
            self.detach(old)?;
        }
        self.attach(split, node)?;
        self.split_mut(split)?.sections[index] = Some(node);
        self.sync_zoom(split)?;
        Ok(old)
    }

    /// Place a detached node in the first empty section. Returns its index.
    pub fn add_section(&mut self, split: NodeId, node: NodeId) -> Result<usize> {
        let s = self.split(split)?;
        let capacity = s.mode.capacity();
        let index = s.sections[..capacity]
            .iter()
            .position(Option::is_none)
            .ok_or(Error::CapacityExceeded {
                node: split,
                kind: "split",
                capacity,
            })?;
        self.set_section(split, index, node)?;
        Ok(index)
    }

    /// The node in a section.
    pub fn section(&self, split: NodeId, index: usize) -> Result<Option<NodeId>> {
        Ok(self.split(split)?.sections.get(index).copied().flatten())
    }

    /// Move a bar. The fraction is clamped to 0..=1.
    pub fn set_split_fraction(&mut self, split: NodeId, axis: Axis, fraction: f32) -> Result<()> {
        let fraction = if fraction.is_nan() {
            0.5
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let s = self.split_mut(split)?;
        if s.fraction[axis_index(axis)] != fraction {
            s.fraction[axis_index(axis)] = fraction;
            self.invalidate(split);
        }
        Ok(())
    }

    /// Show one section alone, hiding the others and the bars.
    pub fn zoom(&mut self, split: NodeId, index: usize) -> Result<()> {
        let capacity = self.split(split)?.mode.capacity();
        if index >= capacity {
            return Err(Error::CapacityExceeded {
                node: split,
                kind: "split",
                capacity,
            });
        }
        self.split_mut(split)?.zoomed = Some(index);
        self.sync_zoom(split)
    }

    /// Show every section again.
    pub fn unzoom(&mut self, split: NodeId) -> Result<()> {
        self.split_mut(split)?.zoomed = None;
        self.sync_zoom(split)
    }

    /// Collapse whatever the zoom state hides.
    fn sync_zoom(&mut self, split: NodeId) -> Result<()> {
        let s = self.split(split)?.clone();
        for (i, section) in s.sections.iter().enumerate() {
            if let Some(id) = section {
                let hide = s.zoomed.is_some_and(|z| z != i);
                self.set_collapsed(*id, hide)?;
            }
        }
        for bar in s.bars.iter().flatten() {
            self.set_collapsed(*bar, s.zoomed.is_some())?;
        }
        self.invalidate(split);
        Ok(())
    }

    /// Drag a splitter bar by a pointer delta.
    pub(crate) fn drag_splitter(&mut self, bar: NodeId, delta: Point) -> Result<bool> {
        let Kind::SplitterBar(sb) = self.get(bar)?.kind else {
            return Ok(false);
        };
        let extent = self.content_rect(sb.split)?.extent(sb.axis);
        let free = extent.saturating_sub(self.config.splitter_bar_size);
        let d = delta.along(sb.axis);
        if free == 0 || d == 0 {
            return Ok(false);
        }
        let current = self.split(sb.split)?.fraction(sb.axis);
        self.set_split_fraction(sb.split, sb.axis, current + d as f32 / free as f32)?;
        Ok(true)
    }

    /// A section id, if it still names a child of the split.
    fn live_section(&self, split: NodeId, section: Option<NodeId>) -> Option<NodeId> {
        section.filter(|s| self.parent(*s) == Some(split))
    }

    /// Measure a split. Bounded axes take all available space; unbounded axes
    /// take the natural size of the sections.
    pub(crate) fn measure_split(&mut self, id: NodeId, avail: Expanse) -> Result<Expanse> {
        let s = self.split(id)?.clone();
        let bar = self.config.splitter_bar_size;
        let mut area = avail;
        if avail.w == UNBOUNDED || avail.h == UNBOUNDED {
            let mut natural = [Expanse::default(); 4];
            for (i, section) in s.sections.iter().enumerate() {
                if let Some(sid) = self.live_section(id, *section) {
                    natural[i] = self.measure_node(sid, avail)?;
                }
            }
            let gap = if s.zoomed.is_some() { 0 } else { bar };
            let (w, h) = match (s.zoomed, s.mode) {
                (Some(z), _) => (natural[z].w, natural[z].h),
                (None, SplitMode::Horizontal) => (
                    natural[0].w + gap + natural[1].w,
                    natural[0].h.max(natural[1].h),
                ),
                (None, SplitMode::Vertical) => (
                    natural[0].w.max(natural[1].w),
                    natural[0].h + gap + natural[1].h,
                ),
                (None, SplitMode::Cross) => (
                    natural[0].w.max(natural[2].w) + gap + natural[1].w.max(natural[3].w),
                    natural[0].h.max(natural[1].h) + gap + natural[2].h.max(natural[3].h),
                ),
            };
            if avail.w == UNBOUNDED {
                area.w = w;
            }
            if avail.h == UNBOUNDED {
                area.h = h;
            }
        }
        let c = cells(&s, area.rect(), bar);
        for (i, section) in s.sections.iter().enumerate() {
            if let Some(sid) = self.live_section(id, *section) {
                self.measure_node(sid, c.sections[i].expanse())?;
            }
        }
        for (i, b) in s.bars.iter().enumerate() {
            if let Some(b) = b {
                self.measure_node(*b, c.bars[i].expanse())?;
            }
        }
        Ok(area)
    }

    /// Arrange sections and bars.
    pub(crate) fn arrange_split(&mut self, id: NodeId, area: Rect) -> Result<()> {
        let s = self.split(id)?.clone();
        let c = cells(&s, area, self.config.splitter_bar_size);
        for (i, section) in s.sections.iter().enumerate() {
            if let Some(sid) = self.live_section(id, *section) {
                self.arrange_node(sid, c.sections[i])?;
            }
        }
        for (i, b) in s.bars.iter().enumerate() {
            if let Some(b) = b {
                self.arrange_node(*b, c.bars[i])?;
            }
        }
        Ok(())
    }
}
