/// Linear interpolation along one screen axis
use std::ops::{Add, Mul};

use nalgebra::Vector2;

/// Below this separation two points are treated as coincident along an axis.
pub const COINCIDENT_EPSILON: f32 = 1e-10;

/// Screen axis an interpolation runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    fn of(self, p: &Vector2<f32>) -> f32 {
        match self {
            Axis::X => p.x,
            Axis::Y => p.y,
        }
    }
}

/// Interpolate between `v1` (at `p1`) and `v2` (at `p2`) at `coord` on `axis`.
///
/// With `t = (coord - p1[axis]) / (p2[axis] - p1[axis])` the result is
/// `(1 - t)·v1 + t·v2`. Coordinates outside the segment extrapolate. When the
/// two points coincide on `axis`, `v1` is returned unchanged.
pub fn interp<V>(p1: &Vector2<f32>, p2: &Vector2<f32>, v1: V, v2: V, coord: f32, axis: Axis) -> V
where
    V: Copy + Add<Output = V> + Mul<f32, Output = V>,
{
    let start = axis.of(p1);
    let span = axis.of(p2) - start;
    if span.abs() < COINCIDENT_EPSILON {
        return v1;
    }
    let t = (coord - start) / span;
    v1 * (1.0 - t) + v2 * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn test_endpoints_are_exact() {
        let p1 = Vector2::new(2.0, 10.0);
        let p2 = Vector2::new(7.0, 30.0);
        let v1 = Vector3::new(0.3, 0.6, 0.9);
        let v2 = Vector3::new(1.0, 0.25, 0.125);

        for axis in [Axis::X, Axis::Y] {
            assert_eq!(interp(&p1, &p2, v1, v2, axis.of(&p1), axis), v1);
            assert_eq!(interp(&p1, &p2, v1, v2, axis.of(&p2), axis), v2);
        }
    }

    #[test]
    fn test_midpoint() {
        let p1 = Vector2::new(0.0, 0.0);
        let p2 = Vector2::new(4.0, 8.0);
        let v = interp(&p1, &p2, Vector2::new(0.0, 1.0), Vector2::new(1.0, 0.0), 4.0, Axis::Y);
        assert_relative_eq!(v, Vector2::new(0.5, 0.5));
    }

    #[test]
    fn test_coincident_returns_first() {
        let p1 = Vector2::new(3.0, 5.0);
        let p2 = Vector2::new(9.0, 5.0);
        let v1 = Vector3::new(1.0, 2.0, 3.0);
        let v2 = Vector3::new(4.0, 5.0, 6.0);
        assert_eq!(interp(&p1, &p2, v1, v2, 5.0, Axis::Y), v1);
        assert_eq!(interp(&p1, &p2, v1, v2, 100.0, Axis::Y), v1);
    }

    #[test]
    fn test_extrapolates_past_endpoints() {
        let p1 = Vector2::new(0.0, 0.0);
        let p2 = Vector2::new(2.0, 0.0);
        let v = interp(&p1, &p2, Vector2::new(0.0, 0.0), Vector2::new(1.0, 1.0), 3.0, Axis::X);
        assert_relative_eq!(v, Vector2::new(1.5, 1.5));
    }
}
