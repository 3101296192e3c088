/// Per-vertex normals from mesh connectivity
use nalgebra::{Point3, Vector3};

use crate::geometry::Triangle;

/// Faces whose edge cross product is shorter than this have no usable normal.
const DEGENERATE_EPSILON: f32 = 1e-12;

/// Unit normal of the face `(v1 → v2) × (v1 → v3)`, or `None` for a zero-area face.
pub fn face_normal(v1: &Point3<f32>, v2: &Point3<f32>, v3: &Point3<f32>) -> Option<Vector3<f32>> {
    (v2 - v1).cross(&(v3 - v1)).try_normalize(DEGENERATE_EPSILON)
}

/// Estimate vertex normals by summing the unit normals of adjacent faces.
///
/// Every triangle adds its face normal to all three of its vertices, then each
/// sum is normalized. Only the sum matters, so triangle order does not change
/// the result. Vertices no face touches keep a zero vector, as do triangles with
/// out-of-range indices (skipped) and zero-area faces (no contribution).
pub fn vertex_normals(positions: &[Point3<f32>], triangles: &[Triangle]) -> Vec<Vector3<f32>> {
    let mut sums = vec![Vector3::zeros(); positions.len()];

    for triangle in triangles {
        if triangle.iter().any(|&i| i >= positions.len()) {
            continue;
        }
        let [a, b, c] = *triangle;
        if let Some(n) = face_normal(&positions[a], &positions[b], &positions[c]) {
            for &i in triangle {
                sums[i] += n;
            }
        }
    }

    for sum in &mut sums {
        *sum = sum.try_normalize(DEGENERATE_EPSILON).unwrap_or_else(Vector3::zeros);
    }
    sums
}
