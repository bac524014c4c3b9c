//! Planar geometry, angle smoothing and swept collision helpers.
//!
//! Yaw convention: yaw `0` faces +Z, forward is `(sin yaw, 0, cos yaw)`.

use easy_ext::ext;
use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

/// Helpers for treating world positions as points on the XZ ground plane.
#[ext(PlanarExt)]
pub impl Vec3 {
    /// The (x, z) components as a 2D vector.
    fn planar(self) -> Vec2 {
        Vec2::new(self.x, self.z)
    }

    /// Distance on the XZ plane, ignoring height.
    fn planar_distance(self, other: Vec3) -> f32 {
        (other.planar() - self.planar()).length()
    }

    /// Yaw that faces from `self` toward `other`.
    fn yaw_to(self, other: Vec3) -> f32 {
        let d = other - self;
        d.x.atan2(d.z)
    }
}

/// Normalize an angle into `(-PI, PI]`.
pub fn wrap_angle(angle: f32) -> f32 {
    let mut a = angle.rem_euclid(TAU);
    if a > PI {
        a -= TAU;
    }
    a
}

/// Fraction of the remaining gap closed in `delta` seconds at `rate`.
#[inline]
pub fn decay_factor(rate: f32, delta: f32) -> f32 {
    1.0 - (-rate * delta).exp()
}

/// Exponential-decay interpolation of a scalar toward `target`.
pub fn smooth_towards(current: f32, target: f32, rate: f32, delta: f32) -> f32 {
    current + (target - current) * decay_factor(rate, delta)
}

/// Exponential-decay interpolation of an angle, taking the short way round.
pub fn smooth_angle(current: f32, target: f32, rate: f32, delta: f32) -> f32 {
    wrap_angle(current + wrap_angle(target - current) * decay_factor(rate, delta))
}

/// Unit vector pointing along `yaw` on the ground plane.
pub fn forward_from(yaw: f32) -> Vec3 {
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}

/// Unit vector from yaw and pitch (positive pitch looks up).
pub fn direction_from(yaw: f32, pitch: f32) -> Vec3 {
    let (sy, cy) = yaw.sin_cos();
    let (sp, cp) = pitch.sin_cos();
    Vec3::new(sy * cp, sp, cy * cp)
}

/// Parameter `t` in `[0, 1]` where segment `p0 -> p1` first comes within
/// `radius` of `center`, or `None` if it never does.
pub fn segment_sphere_hit(p0: Vec3, p1: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let d = p1 - p0;
    let m = p0 - center;
    let c = m.dot(m) - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }
    let a = d.dot(d);
    if a <= 1e-6 {
        return None;
    }
    let b = m.dot(d);
    let disc = b * b - a * c;
    if disc < 0.0 {
        return None;
    }
    let t = (-b - disc.sqrt()) / a;
    (0.0..=1.0).contains(&t).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn wrap_angle_lands_in_half_open_range() {
        assert!(approx(wrap_angle(PI), PI));
        assert!(approx(wrap_angle(-PI), PI));
        assert!(approx(wrap_angle(3.0 * PI / 2.0), -PI / 2.0));
        assert!(approx(wrap_angle(0.25), 0.25));
        assert!(approx(wrap_angle(TAU + 0.25), 0.25));
    }

    #[test]
    fn yaw_to_matches_forward_convention() {
        let origin = Vec3::ZERO;
        assert!(approx(origin.yaw_to(Vec3::Z), 0.0));
        assert!(approx(origin.yaw_to(Vec3::X), PI / 2.0));
        let f = forward_from(origin.yaw_to(Vec3::new(3.0, 5.0, -4.0)));
        assert!(approx(f.x, 0.6) && approx(f.z, -0.8));
    }

    #[test]
    fn planar_distance_ignores_height() {
        let a = Vec3::new(0.0, 10.0, 0.0);
        let b = Vec3::new(3.0, -2.0, 4.0);
        assert!(approx(a.planar_distance(b), 5.0));
    }

    #[test]
    fn smoothing_approaches_without_overshoot() {
        let mut v = 0.0;
        for _ in 0..10 {
            let next = smooth_towards(v, 1.0, 10.0, 0.016);
            assert!(next > v && next < 1.0);
            v = next;
        }
        // shortest arc across the seam
        let a = smooth_angle(3.0, -3.0, 100.0, 1.0);
        assert!(approx(a, -3.0));
    }

    #[test]
    fn swept_segment_catches_tunnelling() {
        let hit = segment_sphere_hit(
            Vec3::new(-5.0, 0.0, 0.0),
            Vec3::new(5.0, 0.0, 0.0),
            Vec3::ZERO,
            1.0,
        );
        assert!(approx(hit.unwrap(), 0.4));
        let miss = segment_sphere_hit(
            Vec3::new(-5.0, 2.0, 0.0),
            Vec3::new(5.0, 2.0, 0.0),
            Vec3::ZERO,
            1.0,
        );
        assert!(miss.is_none());
        let short = segment_sphere_hit(Vec3::new(-5.0, 0.0, 0.0), Vec3::new(-3.0, 0.0, 0.0), Vec3::ZERO, 1.0);
        assert!(short.is_none());
    }
}
