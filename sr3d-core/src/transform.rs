/// Affine transformation matrices
use nalgebra::{Matrix3, Matrix4, Point3, Vector3};

use crate::error::{RenderError, Result};

/// Below this length a rotation axis cannot be normalized.
const AXIS_EPSILON: f32 = 1e-12;

/// Compose two affine transforms: the result applies `b` first, then `a`.
pub fn compose(a: &Matrix4<f32>, b: &Matrix4<f32>) -> Matrix4<f32> {
    a * b
}

/// Create a translation matrix
pub fn translate(v: &Vector3<f32>) -> Matrix4<f32> {
    let mut xform = Matrix4::identity();
    xform.fixed_view_mut::<3, 1>(0, 3).copy_from(v);
    xform
}

/// Create a rotation of `angle` radians about `axis`, pivoting on `center`.
///
/// The 3×3 block is built with Rodrigues' formula from the normalized axis.
/// A non-zero `center` wraps the rotation as `translate(center) · R ·
/// translate(-center)`.
pub fn rotate(axis: &Vector3<f32>, angle: f32, center: &Point3<f32>) -> Result<Matrix4<f32>> {
    let norm = axis.norm();
    if norm < AXIS_EPSILON {
        return Err(RenderError::ZeroAxis);
    }
    let (x, y, z) = (axis.x / norm, axis.y / norm, axis.z / norm);
    let (s, c) = angle.sin_cos();
    let k = 1.0 - c;

    #[rustfmt::skip]
    let r = Matrix3::new(
        x * x * k + c,     x * y * k - z * s, x * z * k + y * s,
        y * x * k + z * s, y * y * k + c,     y * z * k - x * s,
        z * x * k - y * s, z * y * k + x * s, z * z * k + c,
    );

    let mut xform = Matrix4::identity();
    xform.fixed_view_mut::<3, 3>(0, 0).copy_from(&r);

    if center.coords != Vector3::zeros() {
        let to_origin = translate(&-center.coords);
        let back = translate(&center.coords);
        xform = compose(&back, &compose(&xform, &to_origin));
    }

    Ok(xform)
}

/// Apply an affine transform to every point.
pub fn apply(xform: &Matrix4<f32>, points: &[Point3<f32>]) -> Vec<Point3<f32>> {
    points.iter().map(|p| xform.transform_point(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn sample_matrix() -> Matrix4<f32> {
        #[rustfmt::skip]
        let m = Matrix4::new(
            0.0, -1.0, 0.0, 2.0,
            1.0,  0.0, 0.0, 3.0,
            0.0,  0.0, 1.0, 5.0,
            0.0,  0.0, 0.0, 1.0,
        );
        m
    }

    #[test]
    fn test_compose_with_identity() {
        let a = sample_matrix();
        let id = Matrix4::identity();
        assert_eq!(compose(&a, &id), a);
        assert_eq!(compose(&id, &a), a);
    }

    #[test]
    fn test_compose_applies_right_operand_first() {
        let shift = translate(&Vector3::new(1.0, 0.0, 0.0));
        let quarter = rotate(&Vector3::z(), FRAC_PI_2, &Point3::origin()).unwrap();

        // rotate (1,0,0) to (0,1,0), then shift to (1,1,0)
        let p = compose(&shift, &quarter).transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(1.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_translate() {
        let m = translate(&Vector3::new(1.0, 2.0, 3.0));
        let p = m.transform_point(&Point3::new(1.0, 1.0, 1.0));
        assert_eq!(p, Point3::new(2.0, 3.0, 4.0));
        assert_eq!(m[(3, 3)], 1.0);
    }

    #[test]
    fn test_zero_angle_is_identity() {
        let center = Point3::new(4.0, -2.0, 7.5);
        let m = rotate(&Vector3::new(0.3, -1.0, 2.0), 0.0, &center).unwrap();
        assert_relative_eq!(m, Matrix4::identity(), epsilon = 1e-6);
    }

    #[test]
    fn test_rotation_about_pivot() {
        let center = Point3::new(1.0, 0.0, 0.0);
        let m = rotate(&Vector3::new(0.0, 0.0, 5.0), FRAC_PI_2, &center).unwrap();

        // The pivot itself does not move
        assert_relative_eq!(m.transform_point(&center), center, epsilon = 1e-6);

        let p = m.transform_point(&Point3::new(2.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(1.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_rotation_block_is_orthonormal() {
        let m = rotate(&Vector3::new(1.0, 2.0, 3.0), 0.7, &Point3::origin()).unwrap();
        let r = m.fixed_view::<3, 3>(0, 0).into_owned();
        assert_relative_eq!(r.transpose() * r, Matrix3::identity(), epsilon = 1e-5);
        assert_relative_eq!(r.determinant(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_zero_axis_is_rejected() {
        let err = rotate(&Vector3::zeros(), 1.0, &Point3::origin()).unwrap_err();
        assert!(matches!(err, RenderError::ZeroAxis));
    }

    #[test]
    fn test_apply() {
        let m = translate(&Vector3::new(0.0, 0.0, -1.0));
        let moved = apply(&m, &[Point3::origin(), Point3::new(1.0, 1.0, 1.0)]);
        assert_eq!(moved, vec![Point3::new(0.0, 0.0, -1.0), Point3::new(1.0, 1.0, 0.0)]);
    }
}
