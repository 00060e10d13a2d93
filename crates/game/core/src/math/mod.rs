//! Vector, angle and zone helpers.
//!
//! Vectors are [`glam`]'s `f64` types. Everything here is a pure function of
//! its arguments.

mod rotator;
mod zone;

use core::f64::consts::{PI, TAU};

pub use glam::{DVec2, DVec3};
pub use rotator::Rotator;
pub use zone::Zone;

use crate::arena::Arena;

/// Wraps an angle in radians into `(-π, π]`.
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { PI } else { wrapped }
}

/// Signed angle between a heading `yaw` at `position` and the direction to `point`.
///
/// Positive means the point is to the left (counter-clockwise). The result is
/// wrapped into `(-π, π]`.
pub fn angle_to_point(position: DVec2, yaw: f64, point: DVec2) -> f64 {
    let diff = point - position;
    wrap_angle(diff.y.atan2(diff.x) - yaw)
}

/// Maps an angular error to a steering input in `(-1, 1)` that eases off near zero.
///
/// `2 / (1 + e^(-5x)) - 1`
pub fn steering_smooth(angle: f64) -> f64 {
    2.0 / (1.0 + (-5.0 * angle).exp()) - 1.0
}

/// Whether a body at `position` heading `yaw` faces `point`.
///
/// The accepted angle grows with the distance to the point, so a far away
/// target can be approximately faced while a close one must be faced exactly.
pub fn does_face_point(position: DVec2, yaw: f64, point: DVec2) -> bool {
    let allowed = (PI / 2.3) * (position.distance(point) / Arena::DIAGONAL);
    angle_to_point(position, yaw, point).abs() <= allowed
}

/// Linear interpolation: `t = 0` gives `a`, `t = 1` gives `b`.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Inverse of [`lerp`]: the `t` for which `lerp(a, b, t) == v`.
///
/// Returns 0 when `a == b`.
#[inline]
pub fn inv_lerp(a: f64, b: f64, v: f64) -> f64 {
    if b == a { 0.0 } else { (v - a) / (b - a) }
}

/// Whether `point` lies inside the unbound triangle with apex `a` whose sides
/// run from `a` through `b` and from `a` through `c`.
///
/// Points on the sides count as inside. A degenerate triangle (`a`, `b`, `c`
/// collinear) contains nothing.
pub fn is_point_in_unbound_triangle(point: DVec2, a: DVec2, b: DVec2, c: DVec2) -> bool {
    let ab = b - a;
    let ac = c - a;
    let ap = point - a;

    // Solve ap = s * ab + t * ac.
    let det = ab.perp_dot(ac);
    if det == 0.0 {
        return false;
    }
    let s = ap.perp_dot(ac) / det;
    let t = ab.perp_dot(ap) / det;
    s >= 0.0 && t >= 0.0
}

/// Anything that can be linearly interpolated.
pub trait Lerp: Clone {
    fn lerp(&self, other: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        lerp(*self, *other, t)
    }
}

impl Lerp for DVec2 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        DVec2::lerp(*self, *other, t)
    }
}

impl Lerp for DVec3 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        DVec3::lerp(*self, *other, t)
    }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::FRAC_PI_2;

    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn wrap_angle_stays_in_half_open_range() {
        assert!((wrap_angle(3.0 * PI) - PI).abs() < EPS);
        assert!((wrap_angle(-PI) - PI).abs() < EPS);
        assert!((wrap_angle(-3.0 * FRAC_PI_2) - FRAC_PI_2).abs() < EPS);
        assert!((wrap_angle(0.25) - 0.25).abs() < EPS);
    }

    #[test]
    fn angle_to_point_is_signed() {
        let origin = DVec2::ZERO;
        assert!(angle_to_point(origin, 0.0, DVec2::new(100.0, 0.0)).abs() < EPS);
        assert!((angle_to_point(origin, 0.0, DVec2::new(0.0, 100.0)) - FRAC_PI_2).abs() < EPS);
        assert!((angle_to_point(origin, 0.0, DVec2::new(0.0, -100.0)) + FRAC_PI_2).abs() < EPS);
        // Facing backwards, a point straight behind wraps to the positive side.
        assert!((angle_to_point(origin, PI, DVec2::new(100.0, 0.0)) - PI).abs() < EPS);
    }

    #[test]
    fn steering_is_smooth_and_odd() {
        assert_eq!(steering_smooth(0.0), 0.0);
        assert!(steering_smooth(1.0) > 0.98);
        assert!((steering_smooth(0.3) + steering_smooth(-0.3)).abs() < EPS);
    }

    #[test]
    fn facing_tolerance_grows_with_distance() {
        let origin = DVec2::ZERO;
        assert!(does_face_point(origin, 0.0, DVec2::new(5000.0, 400.0)));
        assert!(!does_face_point(origin, 0.0, DVec2::new(50.0, 40.0)));
        assert!(!does_face_point(origin, 0.0, DVec2::new(-5000.0, 0.0)));
    }

    #[test]
    fn inv_lerp_undoes_lerp() {
        let t = inv_lerp(10.0, 30.0, lerp(10.0, 30.0, 0.25));
        assert!((t - 0.25).abs() < EPS);
        assert_eq!(inv_lerp(5.0, 5.0, 7.0), 0.0);
    }

    #[test]
    fn unbound_triangle_membership() {
        let a = DVec2::ZERO;
        let b = DVec2::new(-100.0, 100.0);
        let c = DVec2::new(100.0, 100.0);
        assert!(is_point_in_unbound_triangle(DVec2::new(0.0, 50.0), a, b, c));
        // Unbound: far beyond b and c is still inside.
        assert!(is_point_in_unbound_triangle(DVec2::new(0.0, 10_000.0), a, b, c));
        assert!(!is_point_in_unbound_triangle(DVec2::new(0.0, -50.0), a, b, c));
        assert!(!is_point_in_unbound_triangle(DVec2::new(200.0, 50.0), a, b, c));
        assert!(!is_point_in_unbound_triangle(DVec2::new(1.0, 1.0), a, a, c));
    }
}
