use glam::DVec3;

use crate::math::Rotator;

/// Minimal view of a body that the physics integrator can advance.
///
/// Implementors that cache values derived from position or velocity must
/// recompute them inside the setters.
pub trait Body {
    fn position(&self) -> DVec3;
    fn velocity(&self) -> DVec3;
    fn acceleration(&self) -> DVec3;
    fn set_position(&mut self, position: DVec3);
    fn set_velocity(&mut self, velocity: DVec3);
}

/// Plain kinematic state of a body.
///
/// A value type: copies are fully independent, so simulating a copy never
/// touches the original.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RigidBody {
    pub position: DVec3,
    pub velocity: DVec3,
    pub acceleration: DVec3,
    pub rotation: Rotator,
    pub angular_velocity: DVec3,
}

impl RigidBody {
    pub fn new(position: DVec3, velocity: DVec3) -> Self {
        Self {
            position,
            velocity,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_acceleration(mut self, acceleration: DVec3) -> Self {
        self.acceleration = acceleration;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: Rotator) -> Self {
        self.rotation = rotation;
        self
    }
}

impl Body for RigidBody {
    fn position(&self) -> DVec3 {
        self.position
    }

    fn velocity(&self) -> DVec3 {
        self.velocity
    }

    fn acceleration(&self) -> DVec3 {
        self.acceleration
    }

    fn set_position(&mut self, position: DVec3) {
        self.position = position;
    }

    fn set_velocity(&mut self, velocity: DVec3) {
        self.velocity = velocity;
    }
}

/// Ball constants.
pub struct Ball;

impl Ball {
    pub const RADIUS: f64 = 92.2;
    pub const DIAMETER: f64 = Self::RADIUS * 2.0;
    /// Factor applied to the vertical velocity on a ground bounce.
    pub const GROUND_BOUNCINESS: f64 = -0.6;
    /// Factor applied to the velocity component perpendicular to a struck wall.
    pub const WALL_BOUNCINESS: f64 = -0.6;
    /// Downward speed at ground contact below which the ball rolls instead of bouncing.
    pub const ROLLING_THRESHOLD: f64 = 20.0;
    /// Below this speed the ball is considered still.
    pub const STILL_SPEED: f64 = 10.0;
}
