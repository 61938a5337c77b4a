use super::Rect;

/// The eight border pieces of a rectangle: four edges (not including corners)
/// and four corners.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Frame {
    /// The top of the frame, not including corners
    pub top: Rect,
    /// The bottom of the frame, not including corners
    pub bottom: Rect,
    /// The left of the frame, not including corners
    pub left: Rect,
    /// The right of the frame, not including corners
    pub right: Rect,
    /// The top left corner
    pub topleft: Rect,
    /// The top right corner
    pub topright: Rect,
    /// The bottom left corner
    pub bottomleft: Rect,
    /// The bottom right corner
    pub bottomright: Rect,
    /// The original outer rect
    outer_rect: Rect,
    /// The border width
    border: u32,
}

impl Frame {
    /// Construct a new frame. If the rect is too small to fit the specified
    /// frame, we return a zero Frame that still remembers the outer rect.
    pub fn new(rect: Rect, border: u32) -> Self {
        let twice = border.saturating_mul(2);
        if rect.w <= twice || rect.h <= twice {
            let mut f = Self::zero();
            f.outer_rect = rect;
            f.border = border;
            return f;
        }
        let b = border as i32;
        let (x, y) = (rect.tl.x, rect.tl.y);
        let (r, btm) = (rect.right(), rect.bottom());
        Self {
            top: Rect::new(x + b, y, rect.w - twice, border),
            bottom: Rect::new(x + b, btm - b, rect.w - twice, border),
            left: Rect::new(x, y + b, border, rect.h - twice),
            right: Rect::new(r - b, y + b, border, rect.h - twice),
            topleft: Rect::new(x, y, border, border),
            topright: Rect::new(r - b, y, border, border),
            bottomleft: Rect::new(x, btm - b, border, border),
            bottomright: Rect::new(r - b, btm - b, border, border),
            outer_rect: rect,
            border,
        }
    }

    /// Get the inner rect of the frame (the space inside the frame)
    pub fn inner(&self) -> Rect {
        let twice = self.border.saturating_mul(2);
        if self.outer_rect.w <= twice || self.outer_rect.h <= twice {
            Rect::zero()
        } else {
            let b = self.border as i32;
            Rect::new(
                self.outer_rect.tl.x + b,
                self.outer_rect.tl.y + b,
                self.outer_rect.w - twice,
                self.outer_rect.h - twice,
            )
        }
    }

    /// Get the outer rect of the frame (the original rect passed to Frame::new())
    pub fn outer(&self) -> Rect {
        self.outer_rect
    }

    /// A frame with every piece zero-sized.
    pub fn zero() -> Self {
        Self {
            top: Rect::zero(),
            bottom: Rect::zero(),
            left: Rect::zero(),
            right: Rect::zero(),
            topleft: Rect::zero(),
            topright: Rect::zero(),
            bottomleft: Rect::zero(),
            bottomright: Rect::zero(),
            outer_rect: Rect::zero(),
            border: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tframe() {
        let r = Rect::new(10, 10, 10, 10);
        assert_eq!(
            Frame::new(r, 1),
            Frame {
                top: Rect::new(11, 10, 8, 1),
                bottom: Rect::new(11, 19, 8, 1),
                left: Rect::new(10, 11, 1, 8),
                right: Rect::new(19, 11, 1, 8),
                topleft: Rect::new(10, 10, 1, 1),
                topright: Rect::new(19, 10, 1, 1),
                bottomleft: Rect::new(10, 19, 1, 1),
                bottomright: Rect::new(19, 19, 1, 1),
                outer_rect: r,
                border: 1,
            }
        );
    }

    #[test]
    fn test_inner_outer() {
        let r = Rect::new(-10, 10, 10, 10);
        let frame = Frame::new(r, 2);
        assert_eq!(frame.outer(), r);
        assert_eq!(frame.inner(), Rect::new(-8, 12, 6, 6));

        // Border too large yields a zero frame that keeps the outer rect.
        let frame = Frame::new(r, 5);
        assert_eq!(frame.outer(), r);
        assert_eq!(frame.inner(), Rect::zero());
        assert_eq!(frame.topleft, Rect::zero());
    }
}
