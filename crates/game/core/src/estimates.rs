//! Coarse time estimates built on the physics predictions.

use glam::DVec3;

use crate::error::PhysicsError;
use crate::physics;
use crate::state::{Car, RigidBody};

/// Smallest accepted effort factor.
pub const MIN_SPEED: f64 = 0.05;
/// Estimates never look further ahead than this many seconds.
pub const HORIZON: f64 = 12.0;

const INITIAL_STEP: f64 = 2.0;
const FINAL_STEP: f64 = 1.0 / 32.0;
/// Height differences count this much more than horizontal ones.
const HEIGHT_WEIGHT: f64 = 4.0;

/// How long until a car at `car_position` can reach the ball.
///
/// `speed` is the effort factor: 1 means boosting straight at the ball at
/// [`Car::MAX_VELOCITY_BOOST`], about 0.63 means driving without boost. The
/// ball is predicted with bounces, and its height is weighted so that high
/// balls take longer to reach. The result has a resolution of 1/32 s and is
/// capped at [`HORIZON`].
///
/// # Errors
///
/// [`PhysicsError::SpeedTooSmall`] if `speed` is below [`MIN_SPEED`].
pub fn time_till_car_can_hit_ball(
    car_position: DVec3,
    ball: &RigidBody,
    speed: f64,
) -> Result<f64, PhysicsError> {
    if speed.is_nan() || speed < MIN_SPEED {
        return Err(PhysicsError::SpeedTooSmall {
            speed,
            minimum: MIN_SPEED,
        });
    }
    Ok(reach_time(car_position, ball, speed))
}

/// [`time_till_car_can_hit_ball`] without argument validation.
///
/// Coarse-to-fine search: advance while the car still cannot make it, then
/// halve the step, down to [`FINAL_STEP`].
pub(crate) fn reach_time(car_position: DVec3, ball: &RigidBody, speed: f64) -> f64 {
    let reach_speed = speed * Car::MAX_VELOCITY_BOOST;
    let can_reach = |time: f64| {
        let mut predicted = *ball;
        physics::advance_ball(&mut predicted, time);
        let target = predicted.position * DVec3::new(1.0, 1.0, HEIGHT_WEIGHT);
        car_position.distance(target) <= time * reach_speed
    };

    if can_reach(0.0) {
        return 0.0;
    }

    let mut time = 0.0;
    let mut step = INITIAL_STEP;
    while step >= FINAL_STEP {
        while time + step <= HORIZON && !can_reach(time + step) {
            time += step;
        }
        step /= 2.0;
    }

    (time + FINAL_STEP).min(HORIZON)
}
