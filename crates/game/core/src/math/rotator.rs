use glam::DVec3;

use super::wrap_angle;

/// Euler rotation in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rotator {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

impl Rotator {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(pitch: f64, yaw: f64, roll: f64) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Returns a copy with `yaw` replaced, wrapped into `(-π, π]`.
    #[must_use]
    pub fn with_yaw(self, yaw: f64) -> Self {
        Self {
            yaw: wrap_angle(yaw),
            ..self
        }
    }

    /// Unit vector pointing out of the nose.
    pub fn front(&self) -> DVec3 {
        let (sp, cp) = self.pitch.sin_cos();
        let (sy, cy) = self.yaw.sin_cos();
        DVec3::new(cp * cy, cp * sy, sp)
    }

    /// Unit vector pointing out of the roof.
    pub fn up(&self) -> DVec3 {
        let (sp, cp) = self.pitch.sin_cos();
        let (sy, cy) = self.yaw.sin_cos();
        let (sr, cr) = self.roll.sin_cos();
        DVec3::new(
            cr * sp * cy + sr * sy,
            cy * sr - cr * sp * sy,
            cr * cp,
        )
    }

    /// Unit vector pointing out of the side, `up × front`.
    pub fn side(&self) -> DVec3 {
        self.up().cross(self.front())
    }
}

impl From<[f64; 3]> for Rotator {
    /// `[pitch, yaw, roll]`
    fn from([pitch, yaw, roll]: [f64; 3]) -> Self {
        Self::new(pitch, yaw, roll)
    }
}
