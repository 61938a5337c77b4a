use std::result::Result as StdResult;

use thiserror::Error;

use crate::NodeId;

/// Result type for trellis operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    #[error("node not found: {0:?}")]
    /// The node id is stale or was never issued by this tree.
    NodeNotFound(NodeId),

    #[error("node already attached: {0:?}")]
    /// Attempted to attach a node that already has a parent.
    AlreadyAttached(NodeId),

    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    /// Attaching would make a node its own ancestor.
    WouldCreateCycle {
        /// The proposed parent.
        parent: NodeId,
        /// The node being attached.
        child: NodeId,
    },

    #[error("arrange called on {0:?} before it was ever measured")]
    /// Arrange was requested for a node with no measurement.
    ArrangeBeforeMeasure(NodeId),

    #[error("{kind} {node:?} holds at most {capacity} sections")]
    /// A fixed-arity container was given too many sections.
    CapacityExceeded {
        /// The container.
        node: NodeId,
        /// Container kind name.
        kind: &'static str,
        /// Maximum number of sections.
        capacity: usize,
    },

    #[error("node deleted twice: {0:?}")]
    /// A node already scheduled for deletion was deleted again.
    DoubleDelete(NodeId),

    #[error("node {node:?} is not a {expected}")]
    /// An operation was applied to a node of the wrong kind.
    WrongKind {
        /// The node.
        node: NodeId,
        /// The kind the operation needs.
        expected: &'static str,
    },

    #[error("widget on {0:?} is already borrowed")]
    /// A widget callback re-entered its own node.
    ReentrantWidgetBorrow(NodeId),

    #[error("accelerator: {0}")]
    /// Malformed accelerator chord.
    Accelerator(String),

    #[error("parse error: {0}")]
    /// Configuration or authoring input could not be parsed.
    Parse(String),

    #[error("invalid: {0}")]
    /// The operation is not valid in the current state.
    Invalid(String),

    #[error("internal: {0}")]
    /// Internal error.
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Internal(e.to_string())
    }
}
