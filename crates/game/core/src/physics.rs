//! Deterministic body integration and arrival-time predictions.
//!
//! # Semantics
//!
//! - Bodies move under constant acceleration, optionally plus [`GRAVITY`].
//! - A prediction that never comes true is `None`, not an error.
//! - Negative durations and non-positive step sizes are rejected with
//!   [`PhysicsError`] at the public boundary.
//!
//! Wall predictions assume constant velocity along the relevant axis and
//! treat a body already past a wall as touching it now.

use glam::DVec3;
use strum::IntoEnumIterator;

use crate::arena::Arena;
use crate::error::PhysicsError;
use crate::state::{Ball, Body, RigidBody};
use crate::timeline::Timeline;

/// Constant gravity acting on airborne bodies.
pub const GRAVITY: DVec3 = DVec3::new(0.0, 0.0, -650.0);

/// Upper bound on contact events resolved by one ball step.
const MAX_BALL_EVENTS: usize = 256;

/// One of the four arena walls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::Display)]
pub enum Wall {
    XPositive,
    XNegative,
    YPositive,
    YNegative,
}

impl Wall {
    /// Side walls run along the length of the field; the other two hold the goals.
    pub const fn is_side_wall(self) -> bool {
        matches!(self, Self::XPositive | Self::XNegative)
    }
}

fn effective_acceleration<B: Body + ?Sized>(body: &B, affected_by_gravity: bool) -> DVec3 {
    if affected_by_gravity {
        body.acceleration() + GRAVITY
    } else {
        body.acceleration()
    }
}

/// Advances `body` by `time` seconds of constant acceleration.
///
/// `position += a·t²/2 + v·t` and `velocity += a·t`, where `a` is the body's
/// acceleration plus gravity if requested. No clamping is applied.
pub fn step_body<B: Body + ?Sized>(body: &mut B, time: f64, affected_by_gravity: bool) {
    let acceleration = effective_acceleration(body, affected_by_gravity);
    let position = body.position() + acceleration * (0.5 * time * time) + body.velocity() * time;
    let velocity = body.velocity() + acceleration * time;
    body.set_position(position);
    body.set_velocity(velocity);
}

/// Earliest non-negative time at which the body's z equals `height`.
///
/// Returns exactly `Some(0.0)` when the body is already at `height`, and
/// `None` when the height is never reached (moving away, or a parabola whose
/// apex falls short).
pub fn predict_arrival_at_height<B: Body + ?Sized>(
    body: &B,
    height: f64,
    affected_by_gravity: bool,
) -> Option<f64> {
    let z = body.position().z;
    if z == height {
        return Some(0.0);
    }

    let vz = body.velocity().z;
    let az = effective_acceleration(body, affected_by_gravity).z;

    if az == 0.0 {
        if vz == 0.0 {
            return None;
        }
        let time = (height - z) / vz;
        return (time >= 0.0).then_some(time);
    }

    // a/2·t² + v·t + (z - h) = 0
    let discriminant = vz * vz - 2.0 * az * (z - height);
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    let first = (-vz - root) / az;
    let second = (-vz + root) / az;
    let (early, late) = if first <= second {
        (first, second)
    } else {
        (second, first)
    };
    if early >= 0.0 {
        Some(early)
    } else if late >= 0.0 {
        Some(late)
    } else {
        None
    }
}

/// Time until the body, shrunk by `offset` towards the field, touches `wall`.
pub fn predict_arrival_at_wall<B: Body + ?Sized>(body: &B, wall: Wall, offset: f64) -> Option<f64> {
    let position = body.position();
    let velocity = body.velocity();
    let (coordinate, speed, limit) = match wall {
        Wall::XPositive => (position.x, velocity.x, Arena::WALL_X - offset),
        Wall::XNegative => (-position.x, -velocity.x, Arena::WALL_X - offset),
        Wall::YPositive => (position.y, velocity.y, Arena::WALL_Y - offset),
        Wall::YNegative => (-position.y, -velocity.y, Arena::WALL_Y - offset),
    };
    if speed <= 0.0 {
        return None;
    }
    if coordinate >= limit {
        return Some(0.0);
    }
    Some((limit - coordinate) / speed)
}

/// The first wall the body will touch and when. Ties go to the wall listed first in [`Wall`].
pub fn next_wall_hit<B: Body + ?Sized>(body: &B, offset: f64) -> Option<(Wall, f64)> {
    Wall::iter()
        .filter_map(|wall| predict_arrival_at_wall(body, wall, offset).map(|time| (wall, time)))
        .fold(None, |best, (wall, time)| match best {
            Some((_, best_time)) if best_time <= time => best,
            _ => Some((wall, time)),
        })
}

/// Time until the body touches any wall.
pub fn predict_arrival_at_any_wall<B: Body + ?Sized>(body: &B, offset: f64) -> Option<f64> {
    next_wall_hit(body, offset).map(|(_, time)| time)
}

/// Whether the next wall contact is a side wall. `false` if no wall is ahead.
pub fn will_hit_side_wall_next<B: Body + ?Sized>(body: &B, offset: f64) -> bool {
    next_wall_hit(body, offset).is_some_and(|(wall, _)| wall.is_side_wall())
}

fn bounce_off_wall(ball: &mut RigidBody) {
    if will_hit_side_wall_next(ball, Ball::RADIUS) {
        ball.velocity.x *= Ball::WALL_BOUNCINESS;
    } else {
        ball.velocity.y *= Ball::WALL_BOUNCINESS;
    }
}

/// Time until the ball next touches the ground. Requires `z >= Ball::RADIUS`.
///
/// A ball resting on the ground and not moving upwards touches it now.
fn next_ground_contact(ball: &RigidBody) -> Option<f64> {
    if ball.position.z > Ball::RADIUS {
        return predict_arrival_at_height(ball, Ball::RADIUS, true);
    }
    let vz = ball.velocity.z;
    if vz <= 0.0 {
        return Some(0.0);
    }
    let az = effective_acceleration(ball, true).z;
    (az < 0.0).then(|| -2.0 * vz / az)
}

/// Advances a bouncing ball by `time` seconds.
///
/// # Errors
///
/// [`PhysicsError::NegativeTime`] if `time` is negative,
/// [`PhysicsError::NonFiniteTime`] if it is infinite or NaN.
pub fn step_ball(ball: &mut RigidBody, time: f64) -> Result<(), PhysicsError> {
    PhysicsError::check_time(time)?;
    advance_ball(ball, time);
    Ok(())
}

/// Returns a copy of `ball` advanced by `time` seconds.
pub fn ball_after(ball: &RigidBody, time: f64) -> Result<RigidBody, PhysicsError> {
    let mut stepped = *ball;
    step_ball(&mut stepped, time)?;
    Ok(stepped)
}

/// [`step_ball`] without argument validation. `time` must be non-negative.
///
/// Each iteration resolves a contact happening now, then either runs to the
/// next contact or, if none is due within the remaining time, to the end.
/// Ground contact with a downward speed above [`Ball::ROLLING_THRESHOLD`] is
/// a bounce; anything slower puts the ball into rolling, which ignores
/// gravity and only stops at walls. A contact reached exactly at the end of
/// the requested time is still resolved.
pub(crate) fn advance_ball(ball: &mut RigidBody, time: f64) {
    let mut left = time;

    for _ in 0..MAX_BALL_EVENTS {
        if ball.position.z < Ball::RADIUS {
            ball.position.z = Ball::RADIUS;
        }

        let ground = next_ground_contact(ball);
        let rolling = ground == Some(0.0);
        if rolling {
            if ball.velocity.z < -Ball::ROLLING_THRESHOLD {
                ball.velocity.z *= Ball::GROUND_BOUNCINESS;
                continue;
            }
            ball.velocity.z = 0.0;
        }

        if left <= 0.0 {
            return;
        }

        let wall = predict_arrival_at_any_wall(ball, Ball::RADIUS);

        if rolling {
            match wall {
                Some(hit) if hit <= left => {
                    step_body(ball, hit, false);
                    left -= hit;
                    bounce_off_wall(ball);
                }
                _ => {
                    step_body(ball, left, false);
                    return;
                }
            }
            continue;
        }

        let wall_first = match (wall, ground) {
            (Some(wall), Some(ground)) => wall < ground,
            (Some(_), None) => true,
            (None, _) => false,
        };
        let next = if wall_first { wall } else { ground };

        match next {
            Some(hit) if hit <= left => {
                step_body(ball, hit, true);
                left -= hit;
                if wall_first {
                    bounce_off_wall(ball);
                } else {
                    ball.position.z = Ball::RADIUS;
                }
            }
            _ => {
                step_body(ball, left, true);
                return;
            }
        }
    }

    tracing::warn!(
        remaining = left,
        "ball step hit the contact event limit, finishing without gravity"
    );
    step_body(ball, left.max(0.0), false);
}

/// Upper bound on the number of samples a single path may hold.
pub const MAX_PATH_SAMPLES: usize = 1 << 20;

fn sample_count(duration: f64, step: f64) -> Result<usize, PhysicsError> {
    PhysicsError::check_time(duration)?;
    PhysicsError::check_step(step)?;
    // Tolerance keeps `duration` itself when it is a multiple of `step`.
    let intervals = (duration / step + 1e-9).floor();
    if !intervals.is_finite() || intervals >= MAX_PATH_SAMPLES as f64 {
        return Err(PhysicsError::TooManySamples {
            duration,
            step,
            max: MAX_PATH_SAMPLES,
        });
    }
    Ok(intervals as usize + 1)
}

/// Positions of the ball sampled every `step` seconds from 0 to `duration`.
///
/// Each sample is computed from the original state, so rounding error does
/// not accumulate along the path.
///
/// # Errors
///
/// [`PhysicsError`] if `duration` is negative or not finite, `step` is not
/// positive, or the path would exceed [`MAX_PATH_SAMPLES`].
pub fn ball_path(ball: &RigidBody, duration: f64, step: f64) -> Result<Timeline<DVec3>, PhysicsError> {
    let samples = sample_count(duration, step)?;
    let mut path = Timeline::with_capacity(samples);
    for i in 0..samples {
        let time = i as f64 * step;
        let mut scratch = *ball;
        advance_ball(&mut scratch, time);
        path.push_sorted(time, scratch.position);
    }
    Ok(path)
}

/// Positions of a body without bounces sampled every `step` seconds from 0 to `duration`.
///
/// # Errors
///
/// [`PhysicsError`] if `duration` is negative or not finite, `step` is not
/// positive, or the path would exceed [`MAX_PATH_SAMPLES`].
pub fn body_path<B: Body + Clone>(
    body: &B,
    duration: f64,
    step: f64,
    affected_by_gravity: bool,
) -> Result<Timeline<DVec3>, PhysicsError> {
    let samples = sample_count(duration, step)?;
    let mut path = Timeline::with_capacity(samples);
    for i in 0..samples {
        let time = i as f64 * step;
        let mut scratch = body.clone();
        step_body(&mut scratch, time, affected_by_gravity);
        path.push_sorted(time, scratch.position());
    }
    Ok(path)
}
