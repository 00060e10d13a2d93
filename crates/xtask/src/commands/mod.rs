//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod packet;
mod predict;
mod replay;

pub use predict::Predict;
pub use replay::Replay;
