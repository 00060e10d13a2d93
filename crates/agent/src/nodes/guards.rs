//! Guard leaves.
//!
//! Guards check the snapshot and return Success or Failure. They hold no
//! state, never produce an intent and never report Running.

use behavior_tree::{Behavior, NodeId, NodeResult, TreeError};
use game_core::math::is_point_in_unbound_triangle;
use game_core::physics::{self, Wall};
use game_core::{Arena, Ball, Body, ControlIntent, Situation};

use super::Signature;
use crate::args::{PointArg, ZoneArg, check_arity, parse_number, parse_point, parse_zone};
use crate::error::ArgumentError;

/// Implements [`Behavior`] for a guard from its predicate.
macro_rules! guard_behavior {
    ($guard:ty) => {
        impl Behavior<Situation, ControlIntent> for $guard {
            fn id(&self) -> NodeId {
                self.signature.id()
            }

            fn tick(&mut self, situation: &Situation) -> Result<NodeResult<ControlIntent>, TreeError> {
                Ok(NodeResult::from_condition(self.id(), self.holds(situation)))
            }

            fn reset(&mut self) {}

            fn label(&self) -> Option<&str> {
                Some(self.signature.text())
            }
        }
    };
}

/// Succeeds while the ball is within three ball radii of a wall.
///
/// Signature: `GuardIsBallNearWall`
pub struct GuardIsBallNearWall {
    signature: Signature,
}

impl GuardIsBallNearWall {
    pub const NAME: &'static str = "GuardIsBallNearWall";

    pub fn new(args: &[&str]) -> Result<Self, ArgumentError> {
        check_arity(Self::NAME, args, 0, 0)?;
        Ok(Self {
            signature: Signature::new(Self::NAME, args),
        })
    }

    fn holds(&self, situation: &Situation) -> bool {
        situation.is_ball_near_wall()
    }
}

guard_behavior!(GuardIsBallNearWall);

/// Succeeds when the ball lies between our car and the enemy goal.
///
/// The cone has its apex at the ball and opens away from the enemy goal
/// posts, so a car inside it can push the ball towards the goal.
///
/// Signature: `GuardIsInAimingCone`
pub struct GuardIsInAimingCone {
    signature: Signature,
}

impl GuardIsInAimingCone {
    pub const NAME: &'static str = "GuardIsInAimingCone";

    pub fn new(args: &[&str]) -> Result<Self, ArgumentError> {
        check_arity(Self::NAME, args, 0, 0)?;
        Ok(Self {
            signature: Signature::new(Self::NAME, args),
        })
    }

    fn holds(&self, situation: &Situation) -> bool {
        let ball = situation.ball().position.truncate();
        let car = situation.my_car().position().truncate();
        let [left, right] = Arena::goal_posts(situation.my_car().team().opponent());
        is_point_in_unbound_triangle(car, ball, ball + (ball - left), ball + (ball - right))
    }
}

guard_behavior!(GuardIsInAimingCone);

/// Succeeds when the ball, on its current path, meets the end wall inside `zone`.
///
/// Only the end wall the ball is moving towards is considered. A ball with
/// no velocity along the length of the field never hits a goal.
///
/// Signature: `GuardWillBallHitGoal <zone>`
pub struct GuardWillBallHitGoal {
    signature: Signature,
    zone: ZoneArg,
}

impl GuardWillBallHitGoal {
    pub const NAME: &'static str = "GuardWillBallHitGoal";

    pub fn new(args: &[&str]) -> Result<Self, ArgumentError> {
        check_arity(Self::NAME, args, 1, 1)?;
        Ok(Self {
            zone: parse_zone(args[0])?,
            signature: Signature::new(Self::NAME, args),
        })
    }

    fn holds(&self, situation: &Situation) -> bool {
        let ball = situation.ball();
        let wall = if ball.velocity.y >= 0.0 {
            Wall::YPositive
        } else {
            Wall::YNegative
        };
        let Some(time) = physics::predict_arrival_at_wall(ball, wall, Ball::RADIUS) else {
            return false;
        };
        let zone = self.zone.resolve(situation);
        physics::ball_after(ball, time).is_ok_and(|arrival| zone.contains(arrival.position))
    }
}

guard_behavior!(GuardWillBallHitGoal);

/// Succeeds when our car has possession of the ball.
///
/// Signature: `GuardHasPossession`
pub struct GuardHasPossession {
    signature: Signature,
}

impl GuardHasPossession {
    pub const NAME: &'static str = "GuardHasPossession";

    pub fn new(args: &[&str]) -> Result<Self, ArgumentError> {
        check_arity(Self::NAME, args, 0, 0)?;
        Ok(Self {
            signature: Signature::new(Self::NAME, args),
        })
    }

    fn holds(&self, situation: &Situation) -> bool {
        situation.has_possession(situation.my_index())
    }
}

guard_behavior!(GuardHasPossession);

/// Succeeds when two points are closer than `distance`.
///
/// Fails when either point does not exist in the snapshot.
///
/// Signature: `GuardIsDistanceLessThan <point> <point> <distance>`
pub struct GuardIsDistanceLessThan {
    signature: Signature,
    a: PointArg,
    b: PointArg,
    distance: f64,
}

impl GuardIsDistanceLessThan {
    pub const NAME: &'static str = "GuardIsDistanceLessThan";

    pub fn new(args: &[&str]) -> Result<Self, ArgumentError> {
        check_arity(Self::NAME, args, 3, 3)?;
        Ok(Self {
            a: parse_point(args[0])?,
            b: parse_point(args[1])?,
            distance: parse_number(args[2])?,
            signature: Signature::new(Self::NAME, args),
        })
    }

    fn holds(&self, situation: &Situation) -> bool {
        match (self.a.resolve(situation), self.b.resolve(situation)) {
            (Some(a), Some(b)) => a.distance(b) < self.distance,
            _ => false,
        }
    }
}

guard_behavior!(GuardIsDistanceLessThan);

/// Succeeds when our car has at least `amount` boost.
///
/// Signature: `GuardHasBoost <amount>`
pub struct GuardHasBoost {
    signature: Signature,
    amount: f64,
}

impl GuardHasBoost {
    pub const NAME: &'static str = "GuardHasBoost";

    pub fn new(args: &[&str]) -> Result<Self, ArgumentError> {
        check_arity(Self::NAME, args, 1, 1)?;
        Ok(Self {
            amount: parse_number(args[0])?,
            signature: Signature::new(Self::NAME, args),
        })
    }

    fn holds(&self, situation: &Situation) -> bool {
        situation.my_car().boost() >= self.amount
    }
}

guard_behavior!(GuardHasBoost);
