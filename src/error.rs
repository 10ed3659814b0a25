//! Errors returned when a node handle is rejected.

use thiserror::Error;

use crate::node::NodeHandle;

/// Why a [`NodeHandle`] was rejected by a [`Tree`][crate::Tree].
///
/// Looking up or removing a value that isn't in the tree is not an error, those
/// operations return `None`/`false` instead.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The handle was produced by a different tree.
    #[error("node {0:?} belongs to another tree")]
    OwnershipMismatch(NodeHandle),

    /// The handle was produced by this tree but its node has since been removed.
    #[error("node {0:?} has been detached from its tree")]
    Detached(NodeHandle),
}

/// Result alias for operations taking a [`NodeHandle`].
pub type TreeResult<T> = Result<T, TreeError>;
