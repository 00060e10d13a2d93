//! Task leaves.
//!
//! Tasks map the snapshot straight to a control intent, or play back a short
//! scripted maneuver. They never plan.

use std::sync::Arc;

use behavior_tree::{Behavior, NodeId, NodeResult, TreeError};
use game_core::estimates::{self, time_till_car_can_hit_ball};
use game_core::math::{angle_to_point, does_face_point, steering_smooth};
use game_core::physics;
use game_core::{Body, Car, ControlIntent, DVec3, Situation, SteppedTimeline};

use super::Signature;
use crate::args::{PointArg, check_arity, parse_bool, parse_number, parse_point};
use crate::clock::Clock;
use crate::error::ArgumentError;

/// Drives straight ahead at full throttle.
///
/// Signature: `TaskGoForwards`
pub struct TaskGoForwards {
    signature: Signature,
}

impl TaskGoForwards {
    pub const NAME: &'static str = "TaskGoForwards";

    pub fn new(args: &[&str]) -> Result<Self, ArgumentError> {
        check_arity(Self::NAME, args, 0, 0)?;
        Ok(Self {
            signature: Signature::new(Self::NAME, args),
        })
    }
}

impl Behavior<Situation, ControlIntent> for TaskGoForwards {
    fn id(&self) -> NodeId {
        self.signature.id()
    }

    fn tick(&mut self, _situation: &Situation) -> Result<NodeResult<ControlIntent>, TreeError> {
        Ok(NodeResult::running(
            self.id(),
            ControlIntent::new().with_throttle(1.0),
        ))
    }

    fn reset(&mut self) {}

    fn label(&self) -> Option<&str> {
        Some(self.signature.text())
    }
}

/// Steers with smoothed steering towards `point`, sliding through turns
/// sharper than `slide_angle` when allowed.
fn steer_towards(car: &Car, point: DVec3, allow_slide: bool, slide_angle: f64) -> ControlIntent {
    let angle = angle_to_point(car.position().truncate(), car.rotation().yaw, point.truncate());
    ControlIntent::new()
        .with_steer(steering_smooth(angle))
        .with_slide(allow_slide && angle.abs() > slide_angle)
}

/// Drives at the point where the ball can be met at the given effort.
///
/// `speed` is the effort factor of [`time_till_car_can_hit_ball`]: 1 boosts
/// straight at the ball, 0.63 drives without boost. The car boosts while it
/// faces the intercept point and is slower than the effort asks for, and
/// coasts when it is faster.
///
/// Signature: `TaskGoTowardsBall <speed> [allowSlide]`
pub struct TaskGoTowardsBall {
    signature: Signature,
    speed: f64,
    allow_slide: bool,
}

impl TaskGoTowardsBall {
    pub const NAME: &'static str = "TaskGoTowardsBall";
    pub const SLIDE_ANGLE: f64 = 1.7;

    pub fn new(args: &[&str]) -> Result<Self, ArgumentError> {
        check_arity(Self::NAME, args, 1, 2)?;
        let speed = parse_number(args[0])?;
        if speed < estimates::MIN_SPEED {
            return Err(ArgumentError::OutOfRange {
                name: "speed",
                value: speed,
                minimum: estimates::MIN_SPEED,
            });
        }
        Ok(Self {
            speed,
            allow_slide: args.get(1).map(|arg| parse_bool(arg)).transpose()?.unwrap_or(true),
            signature: Signature::new(Self::NAME, args),
        })
    }

    fn intent(&self, situation: &Situation) -> Option<ControlIntent> {
        let car = situation.my_car();
        let ball = situation.ball();
        let time = time_till_car_can_hit_ball(car.position(), ball, self.speed).ok()?;
        let target = physics::ball_after(ball, time).ok()?.position;

        let intent = steer_towards(car, target, self.allow_slide, Self::SLIDE_ANGLE);
        let wanted = self.speed * Car::MAX_VELOCITY_BOOST;
        let current = car.velocity().length();
        let facing = does_face_point(car.position().truncate(), car.rotation().yaw, target.truncate());

        Some(if current < wanted && facing {
            intent.with_throttle(1.0).with_boost(true)
        } else if current > wanted {
            intent
        } else {
            intent.with_throttle(1.0)
        })
    }
}

impl Behavior<Situation, ControlIntent> for TaskGoTowardsBall {
    fn id(&self) -> NodeId {
        self.signature.id()
    }

    fn tick(&mut self, situation: &Situation) -> Result<NodeResult<ControlIntent>, TreeError> {
        Ok(match self.intent(situation) {
            Some(intent) => NodeResult::running(self.id(), intent),
            None => NodeResult::failure(self.id()),
        })
    }

    fn reset(&mut self) {}

    fn label(&self) -> Option<&str> {
        Some(self.signature.text())
    }
}

/// Drives at a point at full throttle, without braking for it.
///
/// The car overshoots the point; pair it with a guard that ends the task.
/// Fails while the point does not exist in the snapshot.
///
/// Signature: `TaskGoTowardsPoint <point> [allowSlide] [useBoost]`
pub struct TaskGoTowardsPoint {
    signature: Signature,
    point: PointArg,
    allow_slide: bool,
    use_boost: bool,
}

impl TaskGoTowardsPoint {
    pub const NAME: &'static str = "TaskGoTowardsPoint";
    pub const SLIDE_ANGLE: f64 = 1.5;

    pub fn new(args: &[&str]) -> Result<Self, ArgumentError> {
        check_arity(Self::NAME, args, 1, 3)?;
        let flag = |i: usize, default: bool| -> Result<bool, ArgumentError> {
            args.get(i).map(|arg| parse_bool(arg)).transpose().map(|v| v.unwrap_or(default))
        };
        Ok(Self {
            point: parse_point(args[0])?,
            allow_slide: flag(1, true)?,
            use_boost: flag(2, false)?,
            signature: Signature::new(Self::NAME, args),
        })
    }
}

impl Behavior<Situation, ControlIntent> for TaskGoTowardsPoint {
    fn id(&self) -> NodeId {
        self.signature.id()
    }

    fn tick(&mut self, situation: &Situation) -> Result<NodeResult<ControlIntent>, TreeError> {
        let Some(point) = self.point.resolve(situation) else {
            return Ok(NodeResult::failure(self.id()));
        };
        let car = situation.my_car();
        let intent = steer_towards(car, point, self.allow_slide, Self::SLIDE_ANGLE);
        let facing = does_face_point(car.position().truncate(), car.rotation().yaw, point.truncate());
        let intent = intent
            .with_throttle(1.0)
            .with_boost(self.use_boost && facing);
        Ok(NodeResult::running(self.id(), intent))
    }

    fn reset(&mut self) {}

    fn label(&self) -> Option<&str> {
        Some(self.signature.text())
    }
}

/// Front flip forward: two jumps with the nose pitched down, then a second
/// of throttle to land. Holds control for the whole flip.
///
/// The first tick only starts the clock. Once the script runs out the task
/// reports a neutral intent without priority and starts over when it is
/// ticked again.
///
/// Signature: `TaskDashForward`
pub struct TaskDashForward {
    signature: Signature,
    clock: Arc<dyn Clock>,
    script: SteppedTimeline<ControlIntent>,
    started: Option<f64>,
}

impl TaskDashForward {
    pub const NAME: &'static str = "TaskDashForward";
    pub const DURATION: f64 = 1.35;

    pub fn new(args: &[&str], clock: Arc<dyn Clock>) -> Result<Self, ArgumentError> {
        check_arity(Self::NAME, args, 0, 0)?;
        Ok(Self {
            signature: Signature::new(Self::NAME, args),
            clock,
            script: Self::script(),
            started: None,
        })
    }

    fn script() -> SteppedTimeline<ControlIntent> {
        let drive = ControlIntent::new().with_throttle(1.0);
        let flip = drive.with_jump(true).with_pitch(-1.0).with_high_priority(true);
        let release = drive.with_high_priority(true);
        SteppedTimeline::from_steps(
            [(0.0, flip), (0.15, release), (0.20, flip), (0.30, release), (1.0, drive)],
            Self::DURATION,
        )
    }

    /// Whether the maneuver is in progress.
    pub fn is_active(&self) -> bool {
        self.started.is_some()
    }
}

impl Behavior<Situation, ControlIntent> for TaskDashForward {
    fn id(&self) -> NodeId {
        self.signature.id()
    }

    fn tick(&mut self, _situation: &Situation) -> Result<NodeResult<ControlIntent>, TreeError> {
        let now = self.clock.now();
        let Some(started) = self.started else {
            self.started = Some(now);
            let intent = ControlIntent::new().with_throttle(1.0);
            return Ok(NodeResult::running(self.id(), intent).with_high_priority(true));
        };

        Ok(match self.script.evaluate(now - started) {
            Some(intent) => {
                NodeResult::running(self.id(), *intent).with_high_priority(intent.is_high_priority())
            }
            None => {
                tracing::trace!(node = %self.id(), "dash finished");
                self.started = None;
                NodeResult::running(self.id(), ControlIntent::NEUTRAL)
            }
        })
    }

    fn reset(&mut self) {
        self.started = None;
    }

    fn label(&self) -> Option<&str> {
        Some(self.signature.text())
    }
}

#[cfg(test)]
mod tests {
    use behavior_tree::Status;
    use game_core::{Ball, RigidBody, Team};

    use super::*;
    use crate::clock::ManualClock;
    use crate::testing::{car, situation};

    fn resting_ball(x: f64, y: f64) -> RigidBody {
        RigidBody::new(DVec3::new(x, y, Ball::RADIUS), DVec3::ZERO)
    }

    fn intent_of(result: NodeResult<ControlIntent>) -> ControlIntent {
        assert_eq!(result.status, Status::Running);
        result.output.unwrap()
    }

    #[test]
    fn go_forwards() {
        let s = situation(car(0, Team::Blue, DVec3::ZERO, 0.0), resting_ball(0.0, 1000.0));
        let mut task = TaskGoForwards::new(&[]).unwrap();
        let intent = intent_of(task.tick(&s).unwrap());
        assert_eq!(intent, ControlIntent::new().with_throttle(1.0));
        assert!(TaskGoForwards::new(&["1"]).is_err());
    }

    #[test]
    fn go_towards_ball_ahead_boosts() {
        let s = situation(car(0, Team::Blue, DVec3::ZERO, 0.0), resting_ball(2000.0, 0.0));
        let mut task = TaskGoTowardsBall::new(&["1"]).unwrap();
        let intent = intent_of(task.tick(&s).unwrap());
        assert!(intent.boost());
        assert_eq!(intent.throttle(), 1.0);
        assert!(intent.steer().abs() < 1e-9);
        assert!(!intent.slide());
    }

    #[test]
    fn go_towards_ball_behind_slides_unless_disabled() {
        let s = situation(car(0, Team::Blue, DVec3::ZERO, 0.0), resting_ball(-2000.0, 10.0));

        let intent = intent_of(TaskGoTowardsBall::new(&["0.63"]).unwrap().tick(&s).unwrap());
        assert!(intent.slide());
        assert!(!intent.boost());
        assert!(intent.steer() > 0.9);

        let intent = intent_of(TaskGoTowardsBall::new(&["0.63", "false"]).unwrap().tick(&s).unwrap());
        assert!(!intent.slide());
    }

    #[test]
    fn go_towards_ball_rejects_bad_arguments() {
        assert!(matches!(TaskGoTowardsBall::new(&[]), Err(ArgumentError::Arity { .. })));
        assert!(matches!(TaskGoTowardsBall::new(&["0.01"]), Err(ArgumentError::OutOfRange { .. })));
        assert!(matches!(TaskGoTowardsBall::new(&["1", "maybe"]), Err(ArgumentError::InvalidBool { .. })));
    }

    #[test]
    fn go_towards_point_steers_and_boosts_on_request() {
        let s = situation(car(0, Team::Blue, DVec3::ZERO, 0.0), resting_ball(0.0, 1000.0));

        let intent = intent_of(TaskGoTowardsPoint::new(&["300,1000,0"]).unwrap().tick(&s).unwrap());
        assert!(intent.steer() > 0.9);
        assert!(!intent.slide());
        assert!(!intent.boost());

        let intent = intent_of(TaskGoTowardsPoint::new(&["3000,0,0", "true", "true"]).unwrap().tick(&s).unwrap());
        assert!(intent.boost());

        let mut no_pad = TaskGoTowardsPoint::new(&["best_boost"]).unwrap();
        assert_eq!(no_pad.tick(&s).unwrap().status, Status::Failure);
        assert_eq!(no_pad.label(), Some("TaskGoTowardsPoint best_boost"));
    }

    #[test]
    fn dash_forward_plays_its_script_then_releases_control() {
        let clock = Arc::new(ManualClock::new(10.0));
        let s = situation(car(0, Team::Blue, DVec3::ZERO, 0.0), resting_ball(0.0, 1000.0));
        let mut dash = TaskDashForward::new(&[], clock.clone()).unwrap();

        let first = dash.tick(&s).unwrap();
        assert!(first.high_priority);
        assert!(!intent_of(first).jump());
        assert!(dash.is_active());

        let jump = dash.tick(&s).unwrap();
        assert!(jump.high_priority);
        let intent = intent_of(jump);
        assert!(intent.jump());
        assert_eq!(intent.pitch(), -1.0);

        clock.advance(0.17);
        assert!(!intent_of(dash.tick(&s).unwrap()).jump());
        clock.advance(0.05);
        assert!(intent_of(dash.tick(&s).unwrap()).jump());

        clock.advance(0.9);
        let landing = dash.tick(&s).unwrap();
        assert!(!landing.high_priority);
        assert_eq!(intent_of(landing).throttle(), 1.0);

        clock.advance(0.3);
        let done = dash.tick(&s).unwrap();
        assert!(!done.high_priority);
        assert_eq!(intent_of(done), ControlIntent::NEUTRAL);
        assert!(!dash.is_active());
    }

    #[test]
    fn dash_forward_reset_restarts_the_script() {
        let clock = Arc::new(ManualClock::new(0.0));
        let s = situation(car(0, Team::Blue, DVec3::ZERO, 0.0), resting_ball(0.0, 1000.0));
        let mut dash = TaskDashForward::new(&[], clock.clone()).unwrap();
        dash.tick(&s).unwrap();
        clock.advance(0.5);
        dash.reset();
        assert!(!dash.is_active());
        dash.reset();
        assert!(!intent_of(dash.tick(&s).unwrap()).jump());
        assert!(intent_of(dash.tick(&s).unwrap()).jump());
    }
}
