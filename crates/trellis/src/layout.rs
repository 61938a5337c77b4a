//! Per-node layout properties: docking, alignment, spacing and size limits.

use serde::{Deserialize, Serialize};

use crate::geom::{Axis, Edges, Expanse};

/// How a node claims space from its parent's remaining content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dock {
    /// Not docked. The node is positioned from its desired x/y and aligned
    /// within the parent's content area.
    #[default]
    None,
    /// Peel a strip off the left of the remaining area.
    Left,
    /// Peel a strip off the top of the remaining area.
    Top,
    /// Peel a strip off the right of the remaining area.
    Right,
    /// Peel a strip off the bottom of the remaining area.
    Bottom,
    /// Take whatever remains after every edge-docked sibling.
    Fill,
}

impl Dock {
    /// The axis along which an edge dock consumes space, if this is an edge.
    pub fn axis(self) -> Option<Axis> {
        match self {
            Self::Left | Self::Right => Some(Axis::Horizontal),
            Self::Top | Self::Bottom => Some(Axis::Vertical),
            Self::None | Self::Fill => None,
        }
    }
}

/// Placement of a node inside its slot along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Fill the slot.
    #[default]
    Stretch,
    /// Measured size, flush with the start of the slot.
    Start,
    /// Measured size, centered.
    Center,
    /// Measured size, flush with the end of the slot.
    End,
}

/// Explicit position and size requests. Unset fields are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DesiredBounds {
    /// Horizontal offset within the parent's content area.
    pub x: Option<i32>,
    /// Vertical offset within the parent's content area.
    pub y: Option<i32>,
    /// Requested width.
    pub w: Option<u32>,
    /// Requested height.
    pub h: Option<u32>,
}

/// The layout properties of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Layout {
    /// Docking mode.
    pub dock: Dock,
    /// Horizontal alignment, used when not docked.
    pub h_align: Align,
    /// Vertical alignment, used when not docked.
    pub v_align: Align,
    /// Space outside the node, reserved from the parent.
    pub margin: Edges,
    /// Space inside the node, reserved from the children.
    pub padding: Edges,
    /// Explicit position and size requests.
    pub desired: DesiredBounds,
    /// Minimum size.
    pub min: Expanse,
    /// Maximum size.
    pub max: Expanse,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            dock: Dock::None,
            h_align: Align::Stretch,
            v_align: Align::Stretch,
            margin: Edges::zero(),
            padding: Edges::zero(),
            desired: DesiredBounds::default(),
            min: Expanse::new(1, 1),
            max: Expanse::UNBOUNDED,
        }
    }
}

impl Layout {
    /// Default layout: undocked, stretched, no spacing.
    pub fn new() -> Self {
        Self::default()
    }

    /// A layout docked to the given side.
    pub fn docked(dock: Dock) -> Self {
        Self::default().dock(dock)
    }

    /// A layout that fills its parent's remaining area.
    pub fn fill() -> Self {
        Self::docked(Dock::Fill)
    }

    /// Set the dock mode.
    pub fn dock(mut self, dock: Dock) -> Self {
        self.dock = dock;
        self
    }

    /// Set both alignments.
    pub fn align(mut self, h: Align, v: Align) -> Self {
        self.h_align = h;
        self.v_align = v;
        self
    }

    /// Set the margin.
    pub fn margin(mut self, margin: Edges) -> Self {
        self.margin = margin;
        self
    }

    /// Set the padding.
    pub fn padding(mut self, padding: Edges) -> Self {
        self.padding = padding;
        self
    }

    /// Request an explicit size.
    pub fn size(mut self, w: u32, h: u32) -> Self {
        self.desired.w = Some(w);
        self.desired.h = Some(h);
        self
    }

    /// Request an explicit width.
    pub fn width(mut self, w: u32) -> Self {
        self.desired.w = Some(w);
        self
    }

    /// Request an explicit height.
    pub fn height(mut self, h: u32) -> Self {
        self.desired.h = Some(h);
        self
    }

    /// Request an explicit position within the parent's content area.
    pub fn position(mut self, x: i32, y: i32) -> Self {
        self.desired.x = Some(x);
        self.desired.y = Some(y);
        self
    }

    /// Set the minimum size.
    pub fn min(mut self, w: u32, h: u32) -> Self {
        self.min = Expanse::new(w, h);
        self
    }

    /// Set the maximum size.
    pub fn max(mut self, w: u32, h: u32) -> Self {
        self.max = Expanse::new(w, h);
        self
    }

    /// Alignment along an axis.
    pub fn align_along(&self, axis: Axis) -> Align {
        match axis {
            Axis::Horizontal => self.h_align,
            Axis::Vertical => self.v_align,
        }
    }

    /// Desired extent along an axis.
    pub fn desired_along(&self, axis: Axis) -> Option<u32> {
        match axis {
            Axis::Horizontal => self.desired.w,
            Axis::Vertical => self.desired.h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder() {
        let l = Layout::docked(Dock::Left).width(50).min(10, 10);
        assert_eq!(l.dock, Dock::Left);
        assert_eq!(l.desired_along(Axis::Horizontal), Some(50));
        assert_eq!(l.desired_along(Axis::Vertical), None);
        assert_eq!(l.min, Expanse::new(10, 10));
        assert_eq!(Dock::Right.axis(), Some(Axis::Horizontal));
        assert_eq!(Dock::Fill.axis(), None);
    }
}
