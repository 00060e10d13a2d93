//! Tick-driven behavior tree for real-time agents.
//!
//! The tree is evaluated once per simulation tick. Unlike a turn-based tree,
//! leaves may report [`Status::Running`] together with an output value and
//! keep doing so across many ticks, so the scheduler has to remember which
//! leaf produced the previous output.
//!
//! - **Running state**: multi-tick actions hold their internal timers between ticks
//! - **Priority holds**: a result flagged high-priority re-invokes its leaf directly
//! - **Resets**: an abandoned leaf is reset before control moves elsewhere
//! - **Generic**: nodes are generic over a context `C` and an output `O`
//!
//! # Architecture
//!
//! - [`Behavior`]: Core trait for all nodes
//! - [`Status`] / [`NodeResult`]: Running, Success or Failure plus the produced output
//! - Composite nodes: [`Sequence`], [`Selector`]
//! - Decorator nodes: [`Inverter`], [`AlwaysSucceed`]
//! - [`BehaviorTree`]: the per-tick scheduler

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod decorator;
pub mod error;
pub mod status;
pub mod tree;

// Re-export core types for ergonomic API
pub use behavior::{Behavior, find_node, find_node_mut};
pub use composite::{Selector, Sequence};
pub use decorator::{AlwaysSucceed, Inverter};
pub use error::TreeError;
pub use status::{NodeId, NodeResult, Status};
pub use tree::{Activity, BehaviorTree};
