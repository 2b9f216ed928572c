use std::result::Result as StdResult;

use thiserror::Error;

use crate::id::NodeId;

/// Result type for tree operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    /// A child index fell outside the valid range for the operation.
    #[error("index {index} out of bounds for {len} children of {parent:?}")]
    IndexOutOfBounds {
        /// Parent whose children were addressed.
        parent: NodeId,
        /// Requested index.
        index: usize,
        /// Number of children at the time of the call.
        len: usize,
    },

    /// The node is not in the arena.
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// The node already has a parent.
    #[error("node already attached: {0:?}")]
    AlreadyAttached(NodeId),

    /// The node must be detached for this operation.
    #[error("node is still attached: {0:?}")]
    NotDetached(NodeId),

    /// Attaching would make a node its own ancestor.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    WouldCreateCycle {
        /// Requested parent.
        parent: NodeId,
        /// Requested child.
        child: NodeId,
    },
}
