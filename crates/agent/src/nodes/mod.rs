//! Leaves of the agent's behavior tree.
//!
//! - `guards`: predicates over the snapshot, Success or Failure, never Running
//! - `tasks`: immediate or short scripted control, without planning
//! - `intentions`: goal-directed leaves that plan with the sequence search
//!
//! Every leaf is built from its textual signature, a name followed by
//! whitespace-separated arguments, and reports that signature as its label.

pub mod guards;
pub mod intentions;
pub mod tasks;

use behavior_tree::{Behavior, NodeId};
use game_core::{ControlIntent, Situation};

pub use guards::{
    GuardHasBoost, GuardHasPossession, GuardIsBallNearWall, GuardIsDistanceLessThan,
    GuardIsInAimingCone, GuardWillBallHitGoal,
};
pub use intentions::{Goal, Intention, IntentionKind};
pub use tasks::{TaskDashForward, TaskGoForwards, TaskGoTowardsBall, TaskGoTowardsPoint};

/// A node of an agent tree.
pub type AgentNode = Box<dyn Behavior<Situation, ControlIntent>>;

/// Identity and source text of a leaf.
#[derive(Debug, Clone)]
pub(crate) struct Signature {
    id: NodeId,
    text: String,
}

impl Signature {
    pub(crate) fn new(name: &str, args: &[&str]) -> Self {
        let text = if args.is_empty() {
            name.to_owned()
        } else {
            format!("{name} {}", args.join(" "))
        };
        Self {
            id: NodeId::next(),
            text,
        }
    }

    pub(crate) fn id(&self) -> NodeId {
        self.id
    }

    pub(crate) fn text(&self) -> &str {
        &self.text
    }
}
