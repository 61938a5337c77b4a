//! Events delivered to nodes.

/// Keyboard types.
pub mod key;
/// Pointer types.
pub mod pointer;

use crate::{
    NodeId,
    geom::{Point, Rect},
    input::drag::Package,
};

/// An event delivered to a single node. Pointer positions are local to the
/// receiving node's bounds.
#[derive(Debug)]
pub enum Event {
    /// The pointer moved. `held` is true while a button is down and this
    /// node holds the pointer capture.
    PointerMove {
        /// Local position.
        pos: Point,
        /// Movement since the previous event.
        delta: Point,
        /// A button is held.
        held: bool,
    },
    /// A pointer button was pressed.
    PointerDown {
        /// The button.
        button: pointer::Button,
        /// Local position.
        pos: Point,
    },
    /// A pointer button was released.
    PointerUp {
        /// The button.
        button: pointer::Button,
        /// Local position.
        pos: Point,
    },
    /// The wheel turned. Positive deltas scroll towards the start.
    Wheel {
        /// Wheel delta in notches.
        delta: i32,
        /// Local position.
        pos: Point,
    },
    /// The pointer entered this node.
    PointerEnter,
    /// The pointer left this node.
    PointerLeave,
    /// A key was pressed or released.
    Key {
        /// The keystroke.
        key: key::Key,
        /// Pressed rather than released.
        down: bool,
    },
    /// Text input.
    Char(char),
    /// This node gained keyboard focus.
    FocusGained,
    /// This node lost keyboard focus.
    FocusLost,
    /// Arrange assigned this node new bounds.
    BoundsChanged {
        /// Previous bounds.
        old: Rect,
        /// New bounds.
        new: Rect,
    },
    /// A registered accelerator fired.
    Accelerator(String),
    /// A popup was closed.
    Closed,
    /// This node's drag package left its press point; a drag is underway.
    DragStarted,
    /// A drag carrying the named package entered this drop target.
    DragEnter {
        /// Package name.
        package: String,
    },
    /// A drag moved over this drop target.
    DragOver {
        /// Local position.
        pos: Point,
    },
    /// A drag left this drop target without dropping.
    DragLeave,
    /// This node's package was accepted by `target`.
    DragCompleted {
        /// The node that accepted the drop.
        target: NodeId,
    },
    /// This node's drag ended without a successful drop. The package is
    /// handed back to its source.
    DragCancelled(Package),
}
