//! Geometry primitives used across trellis.
//!
//! All arithmetic saturates. Layout code feeds degenerate values (zero or
//! negative space, unbounded availability) through these types and expects a
//! clamped result rather than a panic.

/// Margin and padding edges.
mod edges;
/// Width/height size type.
mod expanse;
/// Frame and border helpers.
mod frame;
/// Point helpers.
mod point;
/// Rectangle operations.
mod rect;

pub use edges::Edges;
pub use expanse::{Expanse, UNBOUNDED};
pub use frame::Frame;
pub use point::Point;
pub use rect::Rect;

/// A layout axis.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Axis {
    /// The x axis.
    Horizontal,
    /// The y axis.
    Vertical,
}

impl Axis {
    /// The other axis.
    pub fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// Clamp an `i64` into the `i32` range.
pub(crate) fn clamp_i32(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
