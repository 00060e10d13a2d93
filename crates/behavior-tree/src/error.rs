//! Configuration errors raised while building or evaluating a tree.

use crate::NodeId;

/// Errors surfaced by tree construction and evaluation.
///
/// All variants describe configuration mistakes. They are fatal for the
/// tree that raised them and are not retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("behavior tree has no root node")]
    MissingRoot,

    #[error("node {node} requires a child but none was attached")]
    MissingChild { node: NodeId },

    #[error("node {node} already has its child attached")]
    DuplicateChild { node: NodeId },

    #[error("node {node} does not accept children")]
    ChildNotAccepted { node: NodeId },
}
