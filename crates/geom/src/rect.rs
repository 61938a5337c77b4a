use super::{Axis, Edges, Expanse, Point, clamp_i32};

/// A rectangle with a signed origin and unsigned size.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Rect {
    /// Top-left corner.
    pub tl: Point,
    /// Width.
    pub w: u32,
    /// Height.
    pub h: u32,
}

impl Rect {
    /// Construct a rectangle from coordinates and size.
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self {
            tl: Point { x, y },
            w,
            h,
        }
    }

    /// A zero rectangle at the origin.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Does this rect have a zero size?
    pub fn is_zero(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// The size of this rectangle.
    pub fn expanse(&self) -> Expanse {
        Expanse::new(self.w, self.h)
    }

    /// Left edge.
    pub fn left(&self) -> i32 {
        self.tl.x
    }

    /// Top edge.
    pub fn top(&self) -> i32 {
        self.tl.y
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i32 {
        clamp_i32(self.tl.x as i64 + self.w as i64)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        clamp_i32(self.tl.y as i64 + self.h as i64)
    }

    /// Start coordinate along an axis.
    pub fn start(&self, axis: Axis) -> i32 {
        self.tl.along(axis)
    }

    /// Extent along an axis.
    pub fn extent(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.w,
            Axis::Vertical => self.h,
        }
    }

    /// Center point, rounded towards the top-left.
    pub fn center(&self) -> Point {
        Point::new(
            clamp_i32(self.tl.x as i64 + self.w as i64 / 2),
            clamp_i32(self.tl.y as i64 + self.h as i64 / 2),
        )
    }

    /// Does this rectangle contain the point?
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }

    /// Does this rectangle completely enclose the other? A zero-sized rect is
    /// enclosed if its origin lies within or on the edge of this one.
    pub fn contains_rect(&self, other: &Self) -> bool {
        other.left() >= self.left()
            && other.top() >= self.top()
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Intersect two rectangles. Returns `None` if they do not overlap.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return None;
        }
        Some(Self::new(
            left,
            top,
            (right as i64 - left as i64) as u32,
            (bottom as i64 - top as i64) as u32,
        ))
    }

    /// Move the rectangle by an offset.
    pub fn shift(&self, dx: i32, dy: i32) -> Self {
        Self {
            tl: self.tl.shift(dx, dy),
            ..*self
        }
    }

    /// Translate so that the origin lands at `tl`.
    pub fn at(&self, tl: Point) -> Self {
        Self { tl, ..*self }
    }

    /// Shrink by edges. The result never has a negative size; when the edges
    /// exceed the rect, the result collapses to zero size at the clamped origin.
    pub fn shrink(&self, edges: Edges) -> Self {
        let w = self.w.saturating_sub(edges.horizontal());
        let h = self.h.saturating_sub(edges.vertical());
        let dx = edges.left.min(self.w);
        let dy = edges.top.min(self.h);
        Self::new(
            clamp_i32(self.tl.x as i64 + dx as i64),
            clamp_i32(self.tl.y as i64 + dy as i64),
            w,
            h,
        )
    }

    /// Grow by edges.
    pub fn grow(&self, edges: Edges) -> Self {
        Self::new(
            clamp_i32(self.tl.x as i64 - edges.left as i64),
            clamp_i32(self.tl.y as i64 - edges.top as i64),
            self.w.saturating_add(edges.horizontal()),
            self.h.saturating_add(edges.vertical()),
        )
    }

    /// Clamp this rect so that it lies inside `outer`, moving it first and then
    /// shrinking it if it is still too large.
    pub fn clamp_within(&self, outer: &Self) -> Self {
        let w = self.w.min(outer.w);
        let h = self.h.min(outer.h);
        let max_x = clamp_i32(outer.right() as i64 - w as i64);
        let max_y = clamp_i32(outer.bottom() as i64 - h as i64);
        Self::new(
            self.tl.x.clamp(outer.left(), max_x.max(outer.left())),
            self.tl.y.clamp(outer.top(), max_y.max(outer.top())),
            w,
            h,
        )
    }

    /// Convert a point in this rect's coordinate space into a point relative to
    /// its origin.
    pub fn to_local(&self, p: Point) -> Point {
        p - self.tl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains() {
        let r = Rect::new(10, 10, 10, 10);
        assert!(r.contains_point(Point::new(10, 10)));
        assert!(r.contains_point(Point::new(19, 19)));
        assert!(!r.contains_point(Point::new(20, 19)));
        assert!(r.contains_rect(&Rect::new(10, 10, 10, 10)));
        assert!(r.contains_rect(&Rect::new(20, 20, 0, 0)));
        assert!(!r.contains_rect(&Rect::new(9, 10, 2, 2)));
    }

    #[test]
    fn intersect() {
        let a = Rect::new(-5, -5, 10, 10);
        let b = Rect::new(0, 0, 10, 10);
        assert_eq!(a.intersect(&b), Some(Rect::new(0, 0, 5, 5)));
        assert_eq!(a.intersect(&Rect::new(5, 5, 2, 2)), None);
    }

    #[test]
    fn shrink_degenerate() {
        let r = Rect::new(0, 0, 4, 4);
        assert_eq!(r.shrink(Edges::uniform(1)), Rect::new(1, 1, 2, 2));
        assert_eq!(r.shrink(Edges::uniform(3)), Rect::new(3, 3, 0, 0));
        assert_eq!(r.shrink(Edges::uniform(1)).grow(Edges::uniform(1)), r);
    }

    #[test]
    fn clamp_within() {
        let outer = Rect::new(0, 0, 100, 100);
        assert_eq!(
            Rect::new(90, -10, 20, 20).clamp_within(&outer),
            Rect::new(80, 0, 20, 20)
        );
        assert_eq!(
            Rect::new(10, 10, 200, 20).clamp_within(&outer),
            Rect::new(0, 10, 100, 20)
        );
    }
}
