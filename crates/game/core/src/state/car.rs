use glam::DVec3;

use crate::arena::{Arena, Team};
use crate::estimates;
use crate::math::{Rotator, angle_to_point};
use crate::physics;
use crate::state::{Body, RigidBody};

/// Values that depend on where the ball is.
///
/// They are only refreshed by [`Car::set_ball_dependent_variables`]; moving
/// the car or the ball leaves them stale until then.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BallRelation {
    pub distance: f64,
    /// Signed angle from the car's heading to the ball, in `(-π, π]`.
    pub angle: f64,
    /// Estimated time to reach the ball at full boosting speed.
    pub reach_time_full_speed: f64,
    pub reach_position_full_speed: DVec3,
    /// Estimated time to reach the ball driving without boost.
    pub reach_time_normal_speed: f64,
    pub reach_position_normal_speed: DVec3,
}

/// A controllable car.
///
/// Orientation vectors and the on-ground, supersonic, upside-down and
/// near-wall flags are derived and recomputed by the setters of the values
/// they depend on.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Car {
    index: usize,
    team: Team,
    body: RigidBody,
    boost: f64,
    has_jumped: bool,
    has_double_jumped: bool,
    is_demolished: bool,
    is_airborne: bool,

    up: DVec3,
    front: DVec3,
    side: DVec3,
    is_supersonic: bool,
    is_on_ground: bool,
    is_upside_down: bool,
    is_near_wall: bool,

    ball: BallRelation,
}

impl Car {
    pub const ACCELERATION_BOOST: f64 = 650.0;
    /// Throttle acceleration from standstill.
    pub const ACCELERATION_THROTTLE: f64 = 1600.0;
    pub const ACCELERATION_BRAKE: f64 = 3500.0;
    /// Deceleration while neither throttling nor boosting.
    pub const DECELERATION_COAST: f64 = 525.0;
    pub const MAX_VELOCITY: f64 = 1410.0;
    pub const MAX_VELOCITY_BOOST: f64 = 2300.0;
    pub const TURN_ACCELERATION_DECREASE: f64 = 0.94;
    pub const MAX_VELOCITY_WHILE_TURNING: f64 = Self::MAX_VELOCITY * Self::TURN_ACCELERATION_DECREASE;
    pub const MAX_VELOCITY_WHILE_TURNING_BOOST: f64 =
        Self::MAX_VELOCITY_BOOST * Self::TURN_ACCELERATION_DECREASE;
    pub const SUPERSONIC_SPEED_REQUIRED: f64 = Self::MAX_VELOCITY_BOOST * 0.95;
    /// Boost spent per second while boosting.
    pub const BOOST_CONSUMPTION: f64 = 33.3;
    pub const MAX_BOOST: f64 = 100.0;
    /// Height of the car's origin when resting on its wheels.
    pub const GROUND_OFFSET: f64 = 17.03;
    /// Below this height the car counts as being on the ground.
    pub const ON_GROUND_HEIGHT: f64 = 20.0;
    /// Wall margin inside which the car counts as near a wall.
    pub const NEAR_WALL_OFFSET: f64 = 28.0;
    /// Effort factors used for the two reach estimates.
    pub const FULL_SPEED: f64 = 1.0;
    pub const NORMAL_SPEED: f64 = 0.63;

    /// Creates a car from its kinematic state. Ball-relative values start zeroed.
    pub fn new(index: usize, team: Team, body: RigidBody) -> Self {
        let mut car = Self {
            index,
            team,
            body,
            boost: 0.0,
            has_jumped: false,
            has_double_jumped: false,
            is_demolished: false,
            is_airborne: false,
            up: DVec3::Z,
            front: DVec3::X,
            side: DVec3::Y,
            is_supersonic: false,
            is_on_ground: true,
            is_upside_down: false,
            is_near_wall: false,
            ball: BallRelation::default(),
        };
        car.set_position(body.position);
        car.set_velocity(body.velocity);
        car.set_rotation(body.rotation);
        car
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn team(&self) -> Team {
        self.team
    }

    /// The underlying kinematic state.
    pub fn body(&self) -> &RigidBody {
        &self.body
    }

    pub fn rotation(&self) -> Rotator {
        self.body.rotation
    }

    pub fn set_rotation(&mut self, rotation: Rotator) {
        self.body.rotation = rotation;
        self.up = rotation.up();
        self.front = rotation.front();
        self.side = rotation.side();
        self.is_upside_down = self.up.z < 0.0;
    }

    pub fn angular_velocity(&self) -> DVec3 {
        self.body.angular_velocity
    }

    pub fn set_angular_velocity(&mut self, angular_velocity: DVec3) {
        self.body.angular_velocity = angular_velocity;
    }

    pub fn set_acceleration(&mut self, acceleration: DVec3) {
        self.body.acceleration = acceleration;
    }

    pub fn boost(&self) -> f64 {
        self.boost
    }

    /// Sets the boost amount, clamped to `[0, 100]`.
    pub fn set_boost(&mut self, amount: f64) {
        self.boost = amount.clamp(0.0, Self::MAX_BOOST);
    }

    /// Adds (or with a negative amount removes) boost, clamped to `[0, 100]`.
    pub fn add_boost(&mut self, amount: f64) {
        self.set_boost(self.boost + amount);
    }

    pub fn has_jumped(&self) -> bool {
        self.has_jumped
    }

    pub fn set_has_jumped(&mut self, has_jumped: bool) {
        self.has_jumped = has_jumped;
    }

    pub fn has_double_jumped(&self) -> bool {
        self.has_double_jumped
    }

    /// A double jump implies a first jump.
    pub fn set_has_double_jumped(&mut self, has_double_jumped: bool) {
        if has_double_jumped {
            self.has_jumped = true;
        }
        self.has_double_jumped = has_double_jumped;
    }

    pub fn is_demolished(&self) -> bool {
        self.is_demolished
    }

    pub fn set_demolished(&mut self, demolished: bool) {
        self.is_demolished = demolished;
    }

    /// Whether the car has lost wheel contact and is subject to gravity.
    pub fn is_airborne(&self) -> bool {
        self.is_airborne
    }

    pub fn set_airborne(&mut self, airborne: bool) {
        self.is_airborne = airborne;
    }

    pub fn up(&self) -> DVec3 {
        self.up
    }

    pub fn front(&self) -> DVec3 {
        self.front
    }

    pub fn side(&self) -> DVec3 {
        self.side
    }

    pub fn is_supersonic(&self) -> bool {
        self.is_supersonic
    }

    pub fn is_on_ground(&self) -> bool {
        self.is_on_ground
    }

    pub fn is_upside_down(&self) -> bool {
        self.is_upside_down
    }

    pub fn is_near_wall(&self) -> bool {
        self.is_near_wall
    }

    /// Ball-relative values as of the last [`set_ball_dependent_variables`](Self::set_ball_dependent_variables).
    pub fn ball_relation(&self) -> &BallRelation {
        &self.ball
    }

    pub fn distance_to_ball(&self) -> f64 {
        self.ball.distance
    }

    pub fn angle_to_ball(&self) -> f64 {
        self.ball.angle
    }

    /// Recomputes distance, angle and reach estimates against `ball`.
    pub fn set_ball_dependent_variables(&mut self, ball: &RigidBody) {
        let position = self.body.position;
        let full = estimates::reach_time(position, ball, Self::FULL_SPEED);
        let normal = estimates::reach_time(position, ball, Self::NORMAL_SPEED);

        let mut predicted = *ball;
        physics::advance_ball(&mut predicted, full);
        let reach_position_full_speed = predicted.position;

        predicted = *ball;
        physics::advance_ball(&mut predicted, normal);
        let reach_position_normal_speed = predicted.position;

        self.ball = BallRelation {
            distance: position.distance(ball.position),
            angle: angle_to_point(
                position.truncate(),
                self.body.rotation.yaw,
                ball.position.truncate(),
            ),
            reach_time_full_speed: full,
            reach_position_full_speed,
            reach_time_normal_speed: normal,
            reach_position_normal_speed,
        };
    }
}

impl Body for Car {
    fn position(&self) -> DVec3 {
        self.body.position
    }

    fn velocity(&self) -> DVec3 {
        self.body.velocity
    }

    fn acceleration(&self) -> DVec3 {
        self.body.acceleration
    }

    fn set_position(&mut self, position: DVec3) {
        self.body.position = position;
        self.is_on_ground = position.z < Self::ON_GROUND_HEIGHT;
        self.is_near_wall = !Arena::field_with_wall_offset(Self::NEAR_WALL_OFFSET).contains(position);
    }

    fn set_velocity(&mut self, velocity: DVec3) {
        self.body.velocity = velocity;
        self.is_supersonic = velocity.length() >= Self::SUPERSONIC_SPEED_REQUIRED;
    }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::FRAC_PI_2;

    use super::*;
    use crate::state::Ball;

    fn car_at(position: DVec3) -> Car {
        Car::new(0, Team::Blue, RigidBody::new(position, DVec3::ZERO))
    }

    #[test]
    fn derived_flags_follow_setters() {
        let mut car = car_at(DVec3::new(0.0, 0.0, Car::GROUND_OFFSET));
        assert!(car.is_on_ground());
        assert!(!car.is_near_wall());
        assert!(!car.is_supersonic());

        car.set_position(DVec3::new(Arena::WALL_X - 10.0, 0.0, 300.0));
        assert!(!car.is_on_ground());
        assert!(car.is_near_wall());

        car.set_velocity(DVec3::new(2250.0, 0.0, 0.0));
        assert!(car.is_supersonic());

        car.set_rotation(Rotator::new(0.0, FRAC_PI_2, 0.0));
        assert!((car.front() - DVec3::Y).length() < 1e-9);
        assert!(!car.is_upside_down());

        car.set_rotation(Rotator::new(0.0, 0.0, core::f64::consts::PI));
        assert!(car.is_upside_down());
    }

    #[test]
    fn boost_is_clamped() {
        let mut car = car_at(DVec3::ZERO);
        car.add_boost(150.0);
        assert_eq!(car.boost(), 100.0);
        car.add_boost(-30.5);
        assert_eq!(car.boost(), 69.5);
        car.set_boost(-4.0);
        assert_eq!(car.boost(), 0.0);
    }

    #[test]
    fn double_jump_implies_jump() {
        let mut car = car_at(DVec3::ZERO);
        car.set_has_double_jumped(true);
        assert!(car.has_jumped());
    }

    #[test]
    fn ball_relation_is_explicitly_refreshed() {
        let mut car = car_at(DVec3::new(0.0, 0.0, Car::GROUND_OFFSET));
        let ball = RigidBody::new(DVec3::new(0.0, 1000.0, Ball::RADIUS), DVec3::ZERO);
        car.set_ball_dependent_variables(&ball);

        let relation = *car.ball_relation();
        assert!((relation.distance - 1000.0).abs() < 1.0);
        assert!((relation.angle - FRAC_PI_2).abs() < 1e-9);
        assert!(relation.reach_time_full_speed > 0.0);
        assert!(relation.reach_time_normal_speed > relation.reach_time_full_speed);

        // Moving the car does not touch the cached relation.
        car.set_position(DVec3::new(500.0, 0.0, Car::GROUND_OFFSET));
        assert_eq!(*car.ball_relation(), relation);
    }
}
