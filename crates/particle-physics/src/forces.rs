//! Force kernels for the pairwise simulation
//!
//! Everything here works on accelerations. Masses enter only at integration
//! time, where the accumulated acceleration is divided by the particle mass.

use glam::Vec3;

/// Inverse-square attraction felt by particle `i` at `pos_i` towards `pos_j`.
///
/// Magnitude is `grav_constant / r²`, directed along `pos_j - pos_i`. The
/// partner particle feels exactly the negation.
///
/// Returns `None` when the pair is degenerate: coincident positions, or any
/// result that is no longer finite. Overflow counts as degenerate too, so a
/// pair whose `grav_constant / r²` exceeds `f32::MAX` contributes nothing
/// rather than a clamped maximum.
pub fn pairwise_acceleration(pos_i: Vec3, pos_j: Vec3, grav_constant: f32) -> Option<Vec3> {
    let r_vec = pos_j - pos_i;
    let r_sq = r_vec.length_squared();

    if r_sq == 0.0 {
        return None;
    }

    // d̂ * G / r² == d * G / r³
    let accel = r_vec * (grav_constant / (r_sq * r_sq.sqrt()));

    if accel.is_finite() {
        Some(accel)
    } else {
        None
    }
}

/// Clamp each axis of `accel` independently to `[-limit, limit]`.
///
/// This is a per-component bound, not a magnitude bound, so it may change the
/// direction of the vector.
pub fn clamp_acceleration(accel: Vec3, limit: Vec3) -> Vec3 {
    accel.clamp(-limit, limit)
}

/// Linear drag opposing the current velocity
pub fn drag(velocity: Vec3, coefficient: f32) -> Vec3 {
    -velocity * coefficient
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attraction_points_towards_partner() {
        let a = pairwise_acceleration(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), 1.0).unwrap();
        assert!(a.x > 0.0);
        assert_eq!(a.y, 0.0);
        assert_eq!(a.z, 0.0);
    }

    #[test]
    fn attraction_follows_inverse_square() {
        let near = pairwise_acceleration(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 1.0).unwrap();
        let far = pairwise_acceleration(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), 1.0).unwrap();

        assert!((near.length() - 1.0).abs() < 1e-6);
        assert!((near.length() / far.length() - 4.0).abs() < 1e-4);
    }

    #[test]
    fn swapped_pair_is_exact_negation() {
        let p = Vec3::new(0.3, -1.7, 2.2);
        let q = Vec3::new(-4.1, 0.9, 0.05);

        let on_p = pairwise_acceleration(p, q, 0.7).unwrap();
        let on_q = pairwise_acceleration(q, p, 0.7).unwrap();

        assert_eq!(on_p, -on_q);
    }

    #[test]
    fn coincident_particles_are_degenerate() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(pairwise_acceleration(p, p, 1.0), None);
    }

    #[test]
    fn vanishing_separation_is_degenerate() {
        let p = Vec3::ZERO;
        let q = Vec3::new(1.0e-30, 0.0, 0.0);
        assert_eq!(pairwise_acceleration(p, q, 1.0), None);
    }

    #[test]
    fn overflowing_pull_is_degenerate() {
        let q = Vec3::new(1.0e-3, 0.0, 0.0);
        assert_eq!(pairwise_acceleration(Vec3::ZERO, q, 1.0e35), None);
    }

    #[test]
    fn zero_gravity_gives_zero_acceleration() {
        let a = pairwise_acceleration(Vec3::ZERO, Vec3::ONE, 0.0).unwrap();
        assert_eq!(a, Vec3::ZERO);
    }

    #[test]
    fn clamp_is_per_axis() {
        let limit = Vec3::splat(1.0);
        let clamped = clamp_acceleration(Vec3::new(3.0, 0.5, -2.0), limit);
        assert_eq!(clamped, Vec3::new(1.0, 0.5, -1.0));
    }

    #[test]
    fn clamp_in_range_is_noop() {
        let a = Vec3::new(0.25, -0.75, 1.0);
        assert_eq!(clamp_acceleration(a, Vec3::splat(1.0)), a);
    }

    #[test]
    fn clamp_honours_distinct_axis_limits() {
        let limit = Vec3::new(0.5, 0.5, 7.0);
        let clamped = clamp_acceleration(Vec3::new(-3.0, 3.0, 3.0), limit);
        assert_eq!(clamped, Vec3::new(-0.5, 0.5, 3.0));
    }

    #[test]
    fn drag_opposes_velocity() {
        let d = drag(Vec3::new(2.0, -4.0, 0.0), 0.1);
        assert!((d - Vec3::new(-0.2, 0.4, 0.0)).length() < 1e-7);
    }
}
