//! Rotation from an angle triple
//!
//! Angles are in degrees. Elementary rotations are right-handed and composed
//! as R = Rz · Ry · Rx, so X is applied first, then Y, then Z.

use glam::{DMat3, DVec3};

/// Rotation matrix for the angle triple `(x, y, z)` in degrees
pub fn rotation_matrix(angles: DVec3) -> DMat3 {
    let DVec3 { x, y, z } = angles;
    let rx = DMat3::from_rotation_x(x.to_radians());
    let ry = DMat3::from_rotation_y(y.to_radians());
    let rz = DMat3::from_rotation_z(z.to_radians());
    rz * ry * rx
}

/// Canonical axis (0, 0, 1) rotated by the angle triple
#[inline]
pub fn impact_normal(angles: DVec3) -> DVec3 {
    rotation_matrix(angles) * DVec3::Z
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_mat_close(a: DMat3, b: DMat3, tol: f64) {
        assert!(a.abs_diff_eq(b, tol), "{a:?} != {b:?}");
    }

    #[test]
    fn test_zero_angles_identity() {
        assert_eq!(rotation_matrix(DVec3::ZERO), DMat3::IDENTITY);
        assert_eq!(impact_normal(DVec3::ZERO), DVec3::Z);
    }

    #[test]
    fn test_elementary_rotations_right_handed() {
        // +90° about X takes +Z to -Y
        let n = impact_normal(DVec3::new(90.0, 0.0, 0.0));
        assert!(n.abs_diff_eq(DVec3::NEG_Y, 1e-12));

        // +90° about Y takes +Z to +X
        let n = impact_normal(DVec3::new(0.0, 90.0, 0.0));
        assert!(n.abs_diff_eq(DVec3::X, 1e-12));

        // Z rotation leaves the canonical axis alone
        let n = impact_normal(DVec3::new(0.0, 0.0, 45.0));
        assert!(n.abs_diff_eq(DVec3::Z, 1e-12));
    }

    #[test]
    fn test_composition_order() {
        // X first then Z: Rx(90) Z = -Y, then Rz(90) (-Y) = +X
        let n = impact_normal(DVec3::new(90.0, 0.0, 90.0));
        assert!(n.abs_diff_eq(DVec3::X, 1e-12));

        let expected = DMat3::from_rotation_z(90f64.to_radians())
            * DMat3::from_rotation_y(30f64.to_radians())
            * DMat3::from_rotation_x(60f64.to_radians());
        assert_mat_close(rotation_matrix(DVec3::new(60.0, 30.0, 90.0)), expected, 1e-12);
    }

    proptest! {
        #[test]
        fn prop_rotation_is_orthonormal(
            x in -360.0f64..360.0,
            y in -360.0f64..360.0,
            z in -360.0f64..360.0,
        ) {
            let r = rotation_matrix(DVec3::new(x, y, z));
            prop_assert!((r.transpose() * r).abs_diff_eq(DMat3::IDENTITY, 1e-9));
            prop_assert!((r.determinant() - 1.0).abs() < 1e-9);
        }

        #[test]
        fn prop_normal_is_unit(
            x in -1.0f64..=1.0,
            y in -1.0f64..=1.0,
            z in -1.0f64..=1.0,
        ) {
            let n = impact_normal(DVec3::new(x, y, z));
            prop_assert!((n.length() - 1.0).abs() < 1e-12);
        }
    }
}
