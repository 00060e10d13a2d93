//! One-tick forward simulation of a whole [`Situation`].
//!
//! # Semantics
//!
//! - The ball is advanced with bounces.
//! - Our car follows the given intent on the ground. In the air it keeps its
//!   acceleration.
//! - The opponent is extrapolated without input.
//! - Boost pads are picked up by our car first, then by the opponent, and
//!   then count down by one tick.
//! - Ball-dependent values are refreshed on both cars before the new
//!   snapshot is built.

use glam::DVec3;

use crate::error::PhysicsError;
use crate::physics::{self, step_body};
use crate::state::{Body, BoostPad, BoostPads, Car, ControlIntent, RigidBody, Situation};

/// Speed below which a coasting car is treated as standing still.
const STANDSTILL_SPEED: f64 = 1e-3;

/// Returns the snapshot `dt` seconds after `situation` with `intent` applied to our car.
///
/// # Errors
///
/// [`PhysicsError`] if `dt` is negative or not finite.
pub fn simulate(
    situation: &Situation,
    intent: &ControlIntent,
    dt: f64,
) -> Result<Situation, PhysicsError> {
    PhysicsError::check_time(dt)?;

    let mut ball = *situation.ball();
    physics::advance_ball(&mut ball, dt);

    let mut my_car = *situation.my_car();
    apply_intent(&mut my_car, intent, dt);
    step_car(&mut my_car, dt);

    let mut enemy_car = *situation.enemy_car();
    step_car(&mut enemy_car, dt);

    let boost_pads = simulate_boost_pads(situation.boost_pads(), &mut my_car, &mut enemy_car, dt);

    my_car.set_ball_dependent_variables(&ball);
    enemy_car.set_ball_dependent_variables(&ball);

    Ok(Situation::new(my_car, enemy_car, ball, boost_pads).with_game_info(*situation.game_info()))
}

/// Sets rotation, acceleration and boost of a grounded car from `intent`.
fn apply_intent(car: &mut Car, intent: &ControlIntent, dt: f64) {
    if car.is_airborne() {
        // TODO: aerial control model (pitch/yaw/roll torque from the intent);
        // until then an airborne car keeps its current acceleration.
        return;
    }

    let speed = car.velocity().length();
    let steer = intent.steer();
    let rotation = car.rotation();
    car.set_rotation(rotation.with_yaw(rotation.yaw + turn_rate(speed) * steer * dt));

    let boosting = intent.boost() && car.boost() > 0.0;
    let mut acceleration = if boosting {
        car.front() * Car::ACCELERATION_BOOST
    } else if intent.throttle() != 0.0 {
        car.front() * throttle_acceleration(car, intent.throttle())
    } else {
        coast_deceleration(car.velocity(), dt)
    };

    if steer != 0.0 {
        acceleration *= Car::TURN_ACCELERATION_DECREASE;
    }
    car.set_acceleration(acceleration);

    if boosting {
        car.add_boost(-Car::BOOST_CONSUMPTION * dt);
    }
}

/// Yaw rate in radians per second at the given speed.
pub fn turn_rate(speed: f64) -> f64 {
    1.325680896 + 0.0002869694124 * speed
}

/// Signed acceleration along the car's front for a throttle input.
///
/// Throttling against the current direction of travel brakes. Otherwise the
/// acceleration fades linearly to zero at [`Car::MAX_VELOCITY`].
pub fn throttle_acceleration(car: &Car, throttle: f64) -> f64 {
    let forward_speed = car.velocity().dot(car.front());
    if throttle * forward_speed < 0.0 {
        return Car::ACCELERATION_BRAKE * throttle.signum();
    }
    let headroom = (1.0 - forward_speed.abs() / Car::MAX_VELOCITY).max(0.0);
    Car::ACCELERATION_THROTTLE * throttle * headroom
}

/// Deceleration opposing `velocity`, limited so one tick cannot reverse it.
fn coast_deceleration(velocity: DVec3, dt: f64) -> DVec3 {
    let speed = velocity.length();
    if speed < STANDSTILL_SPEED {
        return DVec3::ZERO;
    }
    let magnitude = if dt > 0.0 {
        Car::DECELERATION_COAST.min(speed / dt)
    } else {
        Car::DECELERATION_COAST
    };
    -velocity / speed * magnitude
}

/// Integrates a car and keeps it above the floor.
fn step_car(car: &mut Car, dt: f64) {
    step_body(car, dt, car.is_airborne());

    let velocity = car.velocity();
    if velocity.length() > Car::MAX_VELOCITY_BOOST {
        car.set_velocity(velocity.normalize() * Car::MAX_VELOCITY_BOOST);
    }

    let position = car.position();
    if position.z < Car::GROUND_OFFSET {
        car.set_position(position.with_z(Car::GROUND_OFFSET));
        car.set_velocity(car.velocity().with_z(0.0));
        car.set_airborne(false);
    }
}

fn simulate_boost_pads(
    pads: &[BoostPad],
    my_car: &mut Car,
    enemy_car: &mut Car,
    dt: f64,
) -> BoostPads {
    pads.iter()
        .map(|pad| {
            let mut pad = *pad;
            pick_up(&mut pad, my_car);
            pick_up(&mut pad, enemy_car);
            pad.reduce_respawn_time_left(dt);
            pad
        })
        .collect()
}

fn pick_up(pad: &mut BoostPad, car: &mut Car) {
    if pad.is_active() && pad.position().distance(car.position()) < BoostPad::PICKUP_RADIUS {
        car.add_boost(pad.boost_amount());
        pad.refresh_respawn_timer();
        tracing::trace!(car = car.index(), pad = %pad.position(), "boost pad picked up");
    }
}

/// The ball `dt` seconds ahead.
pub fn simulate_ball(ball: &RigidBody, dt: f64) -> Result<RigidBody, PhysicsError> {
    physics::ball_after(ball, dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Team;
    use crate::math::Rotator;
    use crate::state::Ball;

    const DT: f64 = 1.0 / 60.0;

    fn grounded(index: usize, position: DVec3, velocity: DVec3) -> Car {
        Car::new(
            index,
            Team::from_id(index as u8),
            RigidBody::new(position.with_z(Car::GROUND_OFFSET), velocity),
        )
    }

    fn situation(me: Car, pads: BoostPads) -> Situation {
        let enemy = grounded(1, DVec3::new(0.0, 4000.0, 0.0), DVec3::ZERO);
        let ball = RigidBody::new(DVec3::new(0.0, 2000.0, Ball::RADIUS), DVec3::ZERO);
        Situation::new(me, enemy, ball, pads)
    }

    #[test]
    fn throttle_accelerates_along_front() {
        let start = situation(grounded(0, DVec3::ZERO, DVec3::ZERO), BoostPads::new());
        let intent = ControlIntent::new().with_throttle(1.0);

        let mut current = start;
        for _ in 0..30 {
            current = simulate(&current, &intent, DT).unwrap();
        }
        let car = current.my_car();
        assert!(car.velocity().x > 0.0);
        assert!(car.velocity().y.abs() < 1e-9);
        assert!(car.position().x > 0.0);
        assert_eq!(car.position().z, Car::GROUND_OFFSET);
        assert!(car.velocity().x < Car::MAX_VELOCITY);
    }

    #[test]
    fn boosting_consumes_boost_and_caps_speed() {
        let mut me = grounded(0, DVec3::ZERO, DVec3::new(2290.0, 0.0, 0.0));
        me.set_boost(50.0);
        let intent = ControlIntent::new().with_boost(true);

        let mut current = situation(me, BoostPads::new());
        for _ in 0..60 {
            current = simulate(&current, &intent, DT).unwrap();
        }
        let car = current.my_car();
        assert!((car.boost() - (50.0 - Car::BOOST_CONSUMPTION)).abs() < 1e-6);
        assert!(car.velocity().length() <= Car::MAX_VELOCITY_BOOST + 1e-9);
        assert!(car.is_supersonic());
    }

    #[test]
    fn coasting_never_reverses() {
        let me = grounded(0, DVec3::ZERO, DVec3::new(100.0, 0.0, 0.0));
        let mut current = situation(me, BoostPads::new());
        for _ in 0..120 {
            current = simulate(&current, &ControlIntent::NEUTRAL, DT).unwrap();
        }
        let velocity = current.my_car().velocity();
        assert!(velocity.x > -1e-9 && velocity.x < 1e-6, "{velocity}");
    }

    #[test]
    fn steering_turns_and_wraps_yaw() {
        let mut me = grounded(0, DVec3::ZERO, DVec3::new(-500.0, 0.0, 0.0));
        me.set_rotation(Rotator::new(0.0, 3.1, 0.0));
        let intent = ControlIntent::new().with_steer(1.0).with_throttle(1.0);
        let next = simulate(&situation(me, BoostPads::new()), &intent, 0.1).unwrap();
        let yaw = next.my_car().rotation().yaw;
        assert!(yaw < 0.0 && yaw > -core::f64::consts::PI, "{yaw}");
    }

    #[test]
    fn pads_are_picked_up_once_and_count_down() {
        let mut pads = BoostPads::new();
        pads.push(BoostPad::new(DVec3::new(50.0, 0.0, 0.0), false));
        pads.push(BoostPad::new(DVec3::new(0.0, 4050.0, 0.0), true).with_respawn_time_left(5.0));
        let mut me = grounded(0, DVec3::ZERO, DVec3::ZERO);
        me.set_boost(10.0);

        let next = simulate(&situation(me, pads), &ControlIntent::NEUTRAL, 0.5).unwrap();
        assert_eq!(next.my_car().boost(), 22.0);
        assert_eq!(next.boost_pads()[0].respawn_time_left(), BoostPad::RESPAWN_TIME_SMALL - 0.5);
        // Inactive pads give nothing even when touched.
        assert_eq!(next.enemy_car().boost(), 0.0);
        assert_eq!(next.boost_pads()[1].respawn_time_left(), 4.5);
    }

    #[test]
    fn snapshot_is_not_mutated() {
        let start = situation(grounded(0, DVec3::ZERO, DVec3::ZERO), BoostPads::new());
        let copy = start.clone();
        let _ = simulate(&start, &ControlIntent::new().with_throttle(1.0), 0.5).unwrap();
        assert_eq!(start, copy);
        assert!(simulate(&start, &ControlIntent::NEUTRAL, -0.1).is_err());
    }

    #[test]
    fn airborne_car_lands_on_the_floor() {
        let mut me = grounded(0, DVec3::ZERO, DVec3::ZERO);
        me.set_position(DVec3::new(0.0, 0.0, 40.0));
        me.set_airborne(true);
        let next = simulate(&situation(me, BoostPads::new()), &ControlIntent::NEUTRAL, 0.5).unwrap();
        let car = next.my_car();
        assert_eq!(car.position().z, Car::GROUND_OFFSET);
        assert_eq!(car.velocity().z, 0.0);
        assert!(!car.is_airborne());
    }
}
