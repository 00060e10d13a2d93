//! Leaf construction from textual signatures.

use behavior_tree::Behavior;

use crate::config::AgentConfig;
use crate::error::ArgumentError;
use crate::nodes::{
    AgentNode, GuardHasBoost, GuardHasPossession, GuardIsBallNearWall, GuardIsDistanceLessThan,
    GuardIsInAimingCone, GuardWillBallHitGoal, Intention, IntentionKind, TaskDashForward,
    TaskGoForwards, TaskGoTowardsBall, TaskGoTowardsPoint,
};

/// Builds tree leaves from lines such as `TaskGoTowardsBall 0.63 true`.
///
/// A line is the leaf name followed by whitespace-separated arguments. Every
/// leaf built by one factory shares its [`AgentConfig`], so timed leaves and
/// intentions read the same clock.
#[derive(Clone, Debug, Default)]
pub struct LeafFactory {
    config: AgentConfig,
}

impl LeafFactory {
    pub fn new(config: AgentConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Builds the leaf named by the first token of `line`.
    ///
    /// # Errors
    ///
    /// [`ArgumentError::EmptySignature`] for a blank line,
    /// [`ArgumentError::UnknownLeaf`] for an unrecognised name, or the
    /// leaf's own argument error.
    pub fn build(&self, line: &str) -> Result<AgentNode, ArgumentError> {
        let mut tokens = line.split_whitespace();
        let name = tokens.next().ok_or(ArgumentError::EmptySignature)?;
        let args: Vec<&str> = tokens.collect();
        let args = args.as_slice();

        let node: AgentNode = match name {
            GuardIsBallNearWall::NAME => Box::new(GuardIsBallNearWall::new(args)?),
            GuardIsInAimingCone::NAME => Box::new(GuardIsInAimingCone::new(args)?),
            GuardWillBallHitGoal::NAME => Box::new(GuardWillBallHitGoal::new(args)?),
            GuardHasPossession::NAME => Box::new(GuardHasPossession::new(args)?),
            GuardIsDistanceLessThan::NAME => Box::new(GuardIsDistanceLessThan::new(args)?),
            GuardHasBoost::NAME => Box::new(GuardHasBoost::new(args)?),

            TaskGoForwards::NAME => Box::new(TaskGoForwards::new(args)?),
            TaskGoTowardsBall::NAME => Box::new(TaskGoTowardsBall::new(args)?),
            TaskGoTowardsPoint::NAME => Box::new(TaskGoTowardsPoint::new(args)?),
            TaskDashForward::NAME => {
                Box::new(TaskDashForward::new(args, self.config.clock.clone())?)
            }

            IntentionKind::REACH_BALL => Box::new(Intention::reach_ball(args, &self.config)?),
            IntentionKind::REACH_POINT => Box::new(Intention::reach_point(args, &self.config)?),
            IntentionKind::COLLECT_BOOST => {
                Box::new(Intention::collect_boost(args, &self.config)?)
            }

            _ => {
                return Err(ArgumentError::UnknownLeaf {
                    name: name.to_owned(),
                });
            }
        };

        tracing::trace!(node = %node.id(), signature = line.trim(), "built leaf");
        Ok(node)
    }
}
