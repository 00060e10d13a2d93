//! Error types for the agent crate.

use behavior_tree::TreeError;
use game_core::{PhysicsError, SnapshotError};

/// A leaf signature that cannot be turned into a node.
///
/// Raised while building a tree, never while evaluating one.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArgumentError {
    #[error("empty leaf signature")]
    EmptySignature,

    #[error("unknown leaf `{name}`")]
    UnknownLeaf { name: String },

    #[error("{leaf} takes {min}..={max} arguments, got {got}")]
    Arity {
        leaf: &'static str,
        min: usize,
        max: usize,
        got: usize,
    },

    #[error("`{value}` is not a number")]
    InvalidNumber { value: String },

    #[error("`{value}` is not a boolean (expected `true` or `false`)")]
    InvalidBool { value: String },

    #[error("`{value}` is not a point")]
    InvalidPoint { value: String },

    #[error("`{value}` is not a zone")]
    InvalidZone { value: String },

    #[error("{name} must be at least {minimum}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        minimum: f64,
    },
}

/// Umbrella error for building and running an agent.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AgentError {
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Physics(#[from] PhysicsError),
}
