//! Ready-to-use agent trees.
//!
//! ```text
//! striker()
//!   └─ Selector
//!       ├─ Sequence: save a shot on our goal
//!       │   ├─ GuardWillBallHitGoal my_goal_box
//!       │   └─ TaskGoTowardsBall 1
//!       ├─ Sequence: shoot when lined up
//!       │   ├─ GuardHasPossession
//!       │   ├─ GuardIsInAimingCone
//!       │   └─ TaskGoTowardsBall 1
//!       ├─ Sequence: refuel
//!       │   ├─ Inverter(GuardHasBoost 30)
//!       │   └─ IntentionCollectBoost
//!       └─ TaskGoTowardsBall 0.63
//! ```

use behavior_tree::BehaviorTree;
use behavior_tree::builder::{inverter, selector, sequence};
use game_core::{ControlIntent, Situation};

use crate::error::AgentError;
use crate::factory::LeafFactory;

/// Tree type produced by the presets.
pub type AgentTree = BehaviorTree<Situation, ControlIntent>;

/// Default single-car attacker.
///
/// # Behavior
///
/// 1. Chase the ball at full effort when it is heading into our goal box
/// 2. Chase at full effort when we own the ball and it lies between us and
///    the enemy goal
/// 3. Plan a route over the best boost pad when below 30 boost
/// 4. Otherwise chase the ball without boosting
pub fn striker(factory: &LeafFactory) -> Result<AgentTree, AgentError> {
    let leaf = |line: &str| factory.build(line);

    let root = selector(vec![
        sequence(vec![
            leaf("GuardWillBallHitGoal my_goal_box")?,
            leaf("TaskGoTowardsBall 1")?,
        ]),
        sequence(vec![
            leaf("GuardHasPossession")?,
            leaf("GuardIsInAimingCone")?,
            leaf("TaskGoTowardsBall 1")?,
        ]),
        sequence(vec![
            inverter(leaf("GuardHasBoost 30")?),
            leaf("IntentionCollectBoost")?,
        ]),
        leaf("TaskGoTowardsBall 0.63")?,
    ]);

    Ok(BehaviorTree::with_root(root))
}

/// Drives forwards and nothing else. Useful as a baseline opponent.
pub fn idle_driver(factory: &LeafFactory) -> Result<AgentTree, AgentError> {
    Ok(BehaviorTree::with_root(factory.build("TaskGoForwards")?))
}

#[cfg(test)]
mod tests {
    use game_core::{Ball, BoostPad, BoostPads, DVec3, RigidBody, Team};

    use super::*;
    use crate::testing::{car, situation, situation_with_pads};

    fn ball() -> RigidBody {
        RigidBody::new(DVec3::new(0.0, 1000.0, Ball::RADIUS), DVec3::ZERO)
    }

    #[test]
    fn striker_chases_at_normal_effort_by_default() {
        let mut me = car(0, Team::Blue, DVec3::new(-2000.0, -1000.0, 0.0), 0.0);
        me.set_boost(100.0);
        let mut tree = striker(&LeafFactory::default()).unwrap();

        let intent = tree.evaluate(&situation(me, ball())).unwrap();
        assert!(intent.throttle() > 0.0);
        assert_eq!(tree.activity().to_string(), "TaskGoTowardsBall 0.63");
    }

    #[test]
    fn striker_defends_own_goal() {
        let mut me = car(0, Team::Blue, DVec3::new(2000.0, 0.0, 0.0), 0.0);
        me.set_boost(100.0);
        let shot = RigidBody::new(
            DVec3::new(0.0, -2000.0, Ball::RADIUS),
            DVec3::new(0.0, -1500.0, 0.0),
        );
        let mut tree = striker(&LeafFactory::default()).unwrap();

        tree.evaluate(&situation(me, shot)).unwrap();
        assert_eq!(tree.activity().to_string(), "TaskGoTowardsBall 1");
    }

    #[test]
    fn striker_refuels_when_low() {
        let me = car(0, Team::Blue, DVec3::new(-2000.0, -1000.0, 0.0), 0.0);
        let mut pads = BoostPads::new();
        pads.push(BoostPad::new(DVec3::new(-1000.0, -1000.0, 0.0), true));
        let mut tree = striker(&LeafFactory::default()).unwrap();

        tree.evaluate(&situation_with_pads(me, ball(), pads)).unwrap();
        assert_eq!(tree.activity().to_string(), "IntentionCollectBoost");
    }

    #[test]
    fn idle_driver_goes_forwards() {
        let mut tree = idle_driver(&LeafFactory::default()).unwrap();
        let me = car(0, Team::Orange, DVec3::ZERO, 0.0);
        let intent = tree.evaluate(&situation(me, ball())).unwrap();
        assert_eq!(intent.throttle(), 1.0);
    }
}
