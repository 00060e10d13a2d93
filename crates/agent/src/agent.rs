//! One decision-making agent per controlled car.

use behavior_tree::Activity;
use game_core::{ControlIntent, Situation, WorldPacket};

use crate::error::AgentError;
use crate::presets::AgentTree;

/// Owns a car's behavior tree and the snapshot it last decided on.
///
/// The agent is constructed once per controlled car and lives as long as
/// the car is driven. Each tick the host hands it a snapshot (or a raw
/// packet) and receives the intent to apply.
pub struct Agent {
    index: usize,
    tree: AgentTree,
    last: Option<Situation>,
}

impl Agent {
    pub fn new(index: usize, tree: AgentTree) -> Self {
        Self {
            index,
            tree,
            last: None,
        }
    }

    /// Player index of the controlled car.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Decides the intent for one tick.
    ///
    /// # Errors
    ///
    /// [`AgentError::Tree`] if the tree is misconfigured.
    pub fn process(&mut self, situation: Situation) -> Result<ControlIntent, AgentError> {
        let intent = self.tree.evaluate(&situation)?;
        tracing::trace!(agent = self.index, activity = %self.tree.activity(), ?intent, "tick");
        self.last = Some(situation);
        Ok(intent)
    }

    /// Builds this agent's snapshot from `packet` and decides on it.
    ///
    /// # Errors
    ///
    /// [`AgentError::Snapshot`] if the packet lacks either car, otherwise as
    /// [`process`](Self::process).
    pub fn process_packet(&mut self, packet: &WorldPacket) -> Result<ControlIntent, AgentError> {
        let situation = Situation::from_packet(packet, self.index)?;
        self.process(situation)
    }

    /// The snapshot of the most recent tick.
    pub fn last_situation(&self) -> Option<&Situation> {
        self.last.as_ref()
    }

    /// What the agent is doing, e.g. `TaskGoTowardsBall 0.63`.
    pub fn activity(&self) -> Activity<'_> {
        self.tree.activity()
    }

    pub fn tree(&self) -> &AgentTree {
        &self.tree
    }
}
