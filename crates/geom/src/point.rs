use std::ops::{Add, Sub};

use super::{Axis, clamp_i32};

/// A signed point. Node bounds are parent-relative, so children of a scrolled
/// region routinely sit at negative offsets.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// Construct a point.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The origin.
    pub fn zero() -> Self {
        (0, 0).into()
    }

    /// Is this the origin?
    pub fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// Shift the point by an offset, saturating at the `i32` range.
    pub fn shift(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Coordinate along an axis.
    pub fn along(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: clamp_i32(self.x as i64 + other.x as i64),
            y: clamp_i32(self.y as i64 + other.y as i64),
        }
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: clamp_i32(self.x as i64 - other.x as i64),
            y: clamp_i32(self.y as i64 - other.y as i64),
        }
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from(v: (i32, i32)) -> Self {
        Self { x: v.0, y: v.1 }
    }
}
