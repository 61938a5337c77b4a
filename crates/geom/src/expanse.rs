use super::{Axis, Edges, Point, Rect};

/// Sentinel for "no limit" on an axis. Available sizes may carry it; measured
/// sizes never do.
pub const UNBOUNDED: u32 = u32::MAX;

/// An `Expanse` is a rectangle that has a width and height but no location.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Expanse {
    /// Width.
    pub w: u32,
    /// Height.
    pub h: u32,
}

impl Expanse {
    /// An expanse that is unbounded on both axes.
    pub const UNBOUNDED: Self = Self {
        w: UNBOUNDED,
        h: UNBOUNDED,
    };

    /// Construct an expanse.
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// The area of this expanse.
    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    /// Is either dimension zero?
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Return a `Rect` with the same dimensions as the `Expanse`, located at (0, 0).
    pub fn rect(&self) -> Rect {
        Rect::new(0, 0, self.w, self.h)
    }

    /// Return a `Rect` with the same dimensions located at `tl`.
    pub fn at(&self, tl: Point) -> Rect {
        Rect {
            tl,
            w: self.w,
            h: self.h,
        }
    }

    /// True if this size can completely enclose the target size in both dimensions.
    pub fn contains(&self, other: &Self) -> bool {
        self.w >= other.w && self.h >= other.h
    }

    /// Extent along an axis.
    pub fn along(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.w,
            Axis::Vertical => self.h,
        }
    }

    /// Replace the extent along an axis.
    pub fn with(self, axis: Axis, v: u32) -> Self {
        match axis {
            Axis::Horizontal => Self { w: v, ..self },
            Axis::Vertical => Self { h: v, ..self },
        }
    }

    /// Per-axis maximum.
    pub fn max(self, other: Self) -> Self {
        Self::new(self.w.max(other.w), self.h.max(other.h))
    }

    /// Per-axis minimum.
    pub fn min(self, other: Self) -> Self {
        Self::new(self.w.min(other.w), self.h.min(other.h))
    }

    /// Clamp each axis between `lo` and `hi`. When the bounds cross, `hi` wins.
    pub fn clamp(self, lo: Self, hi: Self) -> Self {
        Self::new(
            self.w.max(lo.w.min(hi.w)).min(hi.w),
            self.h.max(lo.h.min(hi.h)).min(hi.h),
        )
    }

    /// Shrink by edges, never below zero. Unbounded axes stay unbounded.
    pub fn shrink(self, edges: Edges) -> Self {
        Self::new(
            sub_bounded(self.w, edges.horizontal()),
            sub_bounded(self.h, edges.vertical()),
        )
    }

    /// Grow by edges. Unbounded axes stay unbounded.
    pub fn grow(self, edges: Edges) -> Self {
        Self::new(
            self.w.saturating_add(edges.horizontal()),
            self.h.saturating_add(edges.vertical()),
        )
    }

    /// Subtract another expanse per axis, saturating at zero. Unbounded axes stay
    /// unbounded.
    pub fn saturating_sub(self, other: Self) -> Self {
        Self::new(sub_bounded(self.w, other.w), sub_bounded(self.h, other.h))
    }
}

/// Subtract from a possibly-unbounded extent.
fn sub_bounded(v: u32, d: u32) -> u32 {
    if v == UNBOUNDED { v } else { v.saturating_sub(d) }
}

impl From<Rect> for Expanse {
    fn from(r: Rect) -> Self {
        Self { w: r.w, h: r.h }
    }
}

impl From<(u32, u32)> for Expanse {
    fn from(v: (u32, u32)) -> Self {
        Self { w: v.0, h: v.1 }
    }
}
