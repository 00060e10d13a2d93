//! Behavior-tree agent for the car-and-ball game.
//!
//! Leaves come from a textual signature such as `TaskGoTowardsBall 0.63`,
//! built by a [`LeafFactory`] that carries the agent's [`AgentConfig`]. The
//! leaves are assembled into a [`behavior_tree::BehaviorTree`] (see
//! [`presets`]) and driven once per tick by an [`Agent`].
//!
//! # Modules
//!
//! - [`nodes`]: guards, tasks and intentions
//! - [`args`]: translation of leaf arguments into snapshot values
//! - [`factory`]: leaf construction from signatures
//! - [`presets`]: ready-made trees
//! - [`clock`]: time sources for timed leaves

pub mod agent;
pub mod args;
pub mod clock;
pub mod config;
pub mod error;
pub mod factory;
pub mod nodes;
pub mod presets;

#[cfg(test)]
mod testing;

pub use agent::Agent;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::AgentConfig;
pub use error::{AgentError, ArgumentError};
pub use factory::LeafFactory;
pub use nodes::AgentNode;
pub use presets::AgentTree;
