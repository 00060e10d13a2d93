//! Intention leaves: goal-directed control through the sequence search.
//!
//! # Semantics
//!
//! On its first tick, and after every reset, an intention turns the
//! snapshot into a [`Goal`] and plans a control sequence for it with
//! [`find_sequence`]. Later ticks play the plan back by elapsed time:
//!
//! - the kind's interruption check fails the leaf and drops the plan
//! - a plan that has run out is replaced by a fresh one from the live
//!   snapshot, at most once per tick
//! - an empty plan means there is nothing left to do: Success if the goal
//!   already holds, Failure if the search found no first step
//! - otherwise the leaf reports Running with the planned intent
//!
//! All kinds share this driver; they differ only in how the goal is built
//! and when a plan is interrupted.

use std::sync::Arc;

use behavior_tree::{Behavior, NodeId, NodeResult, TreeError};
use game_core::physics;
use game_core::{
    Ball, Body, BoostPad, Car, ControlIntent, DVec3, IntentionFunction, Plan, RigidBody,
    SearchConfig, Situation, find_sequence,
};

use super::Signature;
use crate::args::{PointArg, check_arity, parse_point};
use crate::clock::Clock;
use crate::config::AgentConfig;
use crate::error::ArgumentError;

/// Average speed assumed when estimating the time left to a target.
const PLANNING_SPEED: f64 = Car::MAX_VELOCITY;
/// Car-to-ball distance at which the car touches the ball.
const TOUCH_DISTANCE: f64 = Ball::RADIUS + 90.0;
/// Horizontal distance at which a point counts as reached.
const ARRIVAL_DISTANCE: f64 = 150.0;

/// What an intention plans towards, fixed when planning starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Goal {
    /// Touch the ball wherever it goes.
    Ball,
    /// Drive to a point on the floor.
    Point(DVec3),
    /// Drive over the boost pad at this position.
    BoostPad(DVec3),
}

impl Goal {
    fn distance(&self, situation: &Situation) -> f64 {
        let car = situation.my_car();
        match self {
            Self::Ball => car.distance_to_ball(),
            Self::Point(point) => car.position().truncate().distance(point.truncate()),
            Self::BoostPad(pad) => car.position().distance(*pad),
        }
    }

    fn reach(&self) -> f64 {
        match self {
            Self::Ball => TOUCH_DISTANCE,
            Self::Point(_) => ARRIVAL_DISTANCE,
            Self::BoostPad(_) => BoostPad::PICKUP_RADIUS,
        }
    }
}

impl IntentionFunction for Goal {
    fn remaining_cost(&self, situation: &Situation) -> f64 {
        (self.distance(situation) - self.reach()).max(0.0) / PLANNING_SPEED
    }

    fn is_fulfilled(&self, situation: &Situation) -> bool {
        self.distance(situation) < self.reach()
    }
}

/// The kinds of intention and their signatures.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IntentionKind {
    /// `IntentionReachBall`
    ReachBall,
    /// `IntentionReachPoint <point>`
    ReachPoint(PointArg),
    /// `IntentionCollectBoost`
    CollectBoost,
}

impl IntentionKind {
    pub const REACH_BALL: &'static str = "IntentionReachBall";
    pub const REACH_POINT: &'static str = "IntentionReachPoint";
    pub const COLLECT_BOOST: &'static str = "IntentionCollectBoost";

    pub fn name(&self) -> &'static str {
        match self {
            Self::ReachBall => Self::REACH_BALL,
            Self::ReachPoint(_) => Self::REACH_POINT,
            Self::CollectBoost => Self::COLLECT_BOOST,
        }
    }

    /// The goal to plan for in `situation`, if there is one.
    pub fn goal(&self, situation: &Situation) -> Option<Goal> {
        match self {
            Self::ReachBall => Some(Goal::Ball),
            Self::ReachPoint(point) => point.resolve(situation).map(Goal::Point),
            Self::CollectBoost => situation
                .best_boost_pad()
                .map(|pad| Goal::BoostPad(pad.position())),
        }
    }
}

struct ActivePlan {
    goal: Goal,
    plan: Plan,
    started: f64,
    ball: RigidBody,
}

/// A leaf that reaches its goal by following planned control sequences.
pub struct Intention {
    signature: Signature,
    kind: IntentionKind,
    clock: Arc<dyn Clock>,
    search: SearchConfig,
    replan_distance: f64,
    active: Option<ActivePlan>,
}

impl Intention {
    /// `IntentionReachBall`
    pub fn reach_ball(args: &[&str], config: &AgentConfig) -> Result<Self, ArgumentError> {
        check_arity(IntentionKind::REACH_BALL, args, 0, 0)?;
        Ok(Self::new(IntentionKind::ReachBall, args, config))
    }

    /// `IntentionReachPoint <point>`
    pub fn reach_point(args: &[&str], config: &AgentConfig) -> Result<Self, ArgumentError> {
        check_arity(IntentionKind::REACH_POINT, args, 1, 1)?;
        let point = parse_point(args[0])?;
        Ok(Self::new(IntentionKind::ReachPoint(point), args, config))
    }

    /// `IntentionCollectBoost`
    pub fn collect_boost(args: &[&str], config: &AgentConfig) -> Result<Self, ArgumentError> {
        check_arity(IntentionKind::COLLECT_BOOST, args, 0, 0)?;
        Ok(Self::new(IntentionKind::CollectBoost, args, config))
    }

    fn new(kind: IntentionKind, args: &[&str], config: &AgentConfig) -> Self {
        Self {
            signature: Signature::new(kind.name(), args),
            kind,
            clock: Arc::clone(&config.clock),
            search: config.search.clone(),
            replan_distance: config.replan_distance,
            active: None,
        }
    }

    pub fn kind(&self) -> IntentionKind {
        self.kind
    }

    /// The plan being followed, if any.
    pub fn plan(&self) -> Option<&Plan> {
        self.active.as_ref().map(|active| &active.plan)
    }

    /// Seconds since the current plan was made.
    pub fn plan_age(&self) -> Option<f64> {
        self.active
            .as_ref()
            .map(|active| self.clock.now() - active.started)
    }

    fn start(&self, situation: &Situation, now: f64) -> Option<ActivePlan> {
        let goal = self.kind.goal(situation)?;
        let plan = match find_sequence(situation, &goal, &self.search) {
            Ok(plan) => plan,
            Err(error) => {
                tracing::warn!(node = %self.signature.id(), %error, "planning failed");
                return None;
            }
        };
        tracing::debug!(
            node = %self.signature.id(),
            ?goal,
            steps = plan.timeline.values().count(),
            fulfilled = plan.fulfilled,
            expansions = plan.expansions,
            "planned"
        );
        Some(ActivePlan {
            goal,
            plan,
            started: now,
            ball: *situation.ball(),
        })
    }

    fn should_interrupt(&self, active: &ActivePlan, situation: &Situation, elapsed: f64) -> bool {
        match active.goal {
            Goal::Ball => physics::ball_after(&active.ball, elapsed).map_or(true, |expected| {
                expected.position.distance(situation.ball().position) > self.replan_distance
            }),
            Goal::Point(target) => self.kind.goal(situation).is_none_or(|goal| match goal {
                Goal::Point(point) => point.distance(target) > self.replan_distance,
                _ => true,
            }),
            Goal::BoostPad(position) => !situation
                .boost_pads()
                .iter()
                .any(|pad| pad.position() == position && pad.is_active()),
        }
    }

    fn is_exhausted(&self, active: &ActivePlan, elapsed: f64) -> bool {
        active.plan.duration() < elapsed + self.search.step_size
    }
}

impl Behavior<Situation, ControlIntent> for Intention {
    fn id(&self) -> NodeId {
        self.signature.id()
    }

    fn tick(&mut self, situation: &Situation) -> Result<NodeResult<ControlIntent>, TreeError> {
        let now = self.clock.now();

        if let Some(active) = &self.active {
            let elapsed = now - active.started;
            if self.should_interrupt(active, situation, elapsed) {
                tracing::debug!(node = %self.id(), "interrupted");
                self.reset();
                return Ok(NodeResult::failure(self.id()));
            }
            if self.is_exhausted(active, elapsed) {
                tracing::trace!(node = %self.id(), elapsed, "plan ran out, replanning");
                self.active = None;
            }
        }

        if self.active.is_none() {
            let Some(active) = self.start(situation, now) else {
                return Ok(NodeResult::failure(self.id()));
            };
            if active.plan.is_empty() {
                return Ok(NodeResult::from_condition(self.id(), active.plan.fulfilled));
            }
            self.active = Some(active);
        }

        let sampled = self
            .active
            .as_ref()
            .and_then(|active| active.plan.timeline.evaluate(now - active.started).copied());
        Ok(match sampled {
            Some(intent) => {
                NodeResult::running(self.id(), intent).with_high_priority(intent.is_high_priority())
            }
            None => {
                self.reset();
                NodeResult::failure(self.id())
            }
        })
    }

    fn reset(&mut self) {
        self.active = None;
    }

    fn label(&self) -> Option<&str> {
        Some(self.signature.text())
    }
}

#[cfg(test)]
mod tests {
    use behavior_tree::Status;
    use game_core::{BoostPads, Team};

    use super::*;
    use crate::clock::ManualClock;
    use crate::testing::{car, situation, situation_with_pads};

    fn config(clock: &Arc<ManualClock>) -> AgentConfig {
        AgentConfig::default()
            .with_clock(clock.clone())
            .with_search(
                SearchConfig::new()
                    .with_max_expansions(40)
                    .with_heuristic_weight(5.0),
            )
    }

    fn rolling_car(x: f64) -> Car {
        let mut me = car(0, Team::Blue, DVec3::new(x, 0.0, 0.0), 0.0);
        me.set_velocity(DVec3::new(600.0, 0.0, 0.0));
        me
    }

    fn ball() -> RigidBody {
        RigidBody::new(DVec3::new(0.0, 2500.0, Ball::RADIUS), DVec3::ZERO)
    }

    #[test]
    fn goal_distances() {
        let s = situation(car(0, Team::Blue, DVec3::ZERO, 0.0), ball());
        assert!(Goal::Point(DVec3::new(100.0, 0.0, 500.0)).is_fulfilled(&s));
        assert!(!Goal::Point(DVec3::new(1000.0, 0.0, 0.0)).is_fulfilled(&s));
        assert_eq!(Goal::Point(DVec3::new(100.0, 0.0, 0.0)).remaining_cost(&s), 0.0);
        assert!(Goal::Ball.remaining_cost(&s) > 1.0);
        assert!(!Goal::Ball.is_fulfilled(&s));
    }

    #[test]
    fn follows_a_plan_towards_a_point() {
        let clock = Arc::new(ManualClock::new(0.0));
        let mut intention = Intention::reach_point(&["700,0,0"], &config(&clock)).unwrap();
        let s = situation(rolling_car(0.0), ball());

        let result = intention.tick(&s).unwrap();
        assert_eq!(result.status, Status::Running);
        assert_eq!(result.creator, intention.id());
        assert!(result.output.unwrap().throttle() > 0.0);
        assert!(intention.plan().is_some_and(|plan| plan.fulfilled));
        assert_eq!(intention.label(), Some("IntentionReachPoint 700,0,0"));

        clock.advance(0.1);
        assert_eq!(intention.tick(&s).unwrap().status, Status::Running);
        assert!(intention.plan_age().is_some_and(|age| (age - 0.1).abs() < 1e-9));
    }

    #[test]
    fn reached_goal_succeeds_without_a_plan() {
        let clock = Arc::new(ManualClock::new(0.0));
        let mut intention = Intention::reach_point(&["my_pos"], &config(&clock)).unwrap();
        let s = situation(car(0, Team::Blue, DVec3::ZERO, 0.0), ball());
        assert_eq!(intention.tick(&s).unwrap().status, Status::Success);
        assert!(intention.plan().is_none());
    }

    #[test]
    fn moved_target_interrupts() {
        let clock = Arc::new(ManualClock::new(0.0));
        let mut intention = Intention::reach_point(&["ball_pos"], &config(&clock)).unwrap();
        let me = rolling_car(0.0);
        assert_eq!(intention.tick(&situation(me, ball())).unwrap().status, Status::Running);

        clock.advance(0.05);
        let moved = RigidBody::new(DVec3::new(2000.0, 2500.0, Ball::RADIUS), DVec3::ZERO);
        assert_eq!(intention.tick(&situation(me, moved)).unwrap().status, Status::Failure);
        assert!(intention.plan().is_none());
    }

    #[test]
    fn touched_ball_interrupts_reach_ball() {
        let clock = Arc::new(ManualClock::new(0.0));
        let mut intention = Intention::reach_ball(&[], &config(&clock)).unwrap();
        let me = rolling_car(0.0);
        assert_eq!(intention.tick(&situation(me, ball())).unwrap().status, Status::Running);

        clock.advance(0.05);
        assert_eq!(intention.tick(&situation(me, ball())).unwrap().status, Status::Running);

        let hit = RigidBody::new(
            ball().position + DVec3::new(0.0, 400.0, 0.0),
            DVec3::new(0.0, 8000.0, 0.0),
        );
        clock.advance(0.05);
        assert_eq!(intention.tick(&situation(me, hit)).unwrap().status, Status::Failure);
    }

    #[test]
    fn exhausted_plan_is_replaced() {
        let clock = Arc::new(ManualClock::new(0.0));
        let mut intention = Intention::reach_point(&["3000,3000,0"], &config(&clock)).unwrap();
        let s = situation(rolling_car(0.0), ball());
        assert_eq!(intention.tick(&s).unwrap().status, Status::Running);
        let duration = intention.plan().map(Plan::duration).unwrap();

        clock.advance(duration + 1.0);
        assert_eq!(intention.tick(&s).unwrap().status, Status::Running);
        assert_eq!(intention.plan_age(), Some(0.0));
    }

    #[test]
    fn collect_boost_needs_a_pad() {
        let clock = Arc::new(ManualClock::new(0.0));
        let mut intention = Intention::collect_boost(&[], &config(&clock)).unwrap();
        let me = rolling_car(0.0);
        assert_eq!(intention.tick(&situation(me, ball())).unwrap().status, Status::Failure);

        let mut pads = BoostPads::new();
        pads.push(BoostPad::new(DVec3::new(800.0, 0.0, 0.0), false));
        let with_pad = situation_with_pads(me, ball(), pads.clone());
        assert_eq!(intention.tick(&with_pad).unwrap().status, Status::Running);

        pads[0].refresh_respawn_timer();
        clock.advance(0.05);
        let taken = situation_with_pads(me, ball(), pads);
        assert_eq!(intention.tick(&taken).unwrap().status, Status::Failure);
    }

    #[test]
    fn signatures_are_checked() {
        let config = AgentConfig::default();
        assert!(Intention::reach_ball(&["x"], &config).is_err());
        assert!(Intention::reach_point(&[], &config).is_err());
        assert!(Intention::reach_point(&["nowhere"], &config).is_err());
        assert!(Intention::collect_boost(&["1"], &config).is_err());

        let mut intention = Intention::reach_ball(&[], &config).unwrap();
        intention.reset();
        intention.reset();
        assert_eq!(intention.kind(), IntentionKind::ReachBall);
    }
}
