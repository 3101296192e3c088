/// Perspective projection and image-plane to pixel mapping
use nalgebra::{Point2, Point3, Vector2};

use crate::camera::ViewTransform;
use crate::error::{RenderError, Result};

/// Points projected onto the image plane
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    /// Image-plane coordinates, Y up, origin on the optical axis
    pub points: Vec<Vector2<f32>>,
    /// Camera-space depth of each point, positive in front of the camera
    pub depths: Vec<f32>,
}

/// Project world points through a pinhole camera with focal length `focal`.
///
/// Each point becomes `focal · (X, Y) / depth` where `(X, Y)` are its view-space
/// coordinates. Zero depth cannot be divided by and fails the whole call. Points
/// behind the camera project numerically (mirrored through the eye).
pub fn perspective_project(
    points: &[Point3<f32>],
    focal: f32,
    view: &ViewTransform,
) -> Result<Projection> {
    let mut projected = Vec::with_capacity(points.len());
    let mut depths = Vec::with_capacity(points.len());

    for (index, p) in points.iter().enumerate() {
        let v = view.world_to_view(p);
        let depth = -v.z;
        if depth == 0.0 {
            return Err(RenderError::ZeroDepth { index });
        }
        projected.push(Vector2::new(v.x, v.y) * (focal / depth));
        depths.push(depth);
    }

    Ok(Projection {
        points: projected,
        depths,
    })
}

/// Map image-plane coordinates to integer pixel coordinates.
///
/// The plane is `plane_width × plane_height` scene units centred on the optical
/// axis with Y up; pixels count from the top-left corner with Y down. Results
/// are rounded half to even and clamped into the frame, so points outside the
/// frustum land on the border instead of being dropped.
pub fn rasterize(
    points: &[Vector2<f32>],
    plane_width: f32,
    plane_height: f32,
    width: usize,
    height: usize,
) -> Vec<Point2<i32>> {
    let scale_x = width as f32 / plane_width;
    let scale_y = height as f32 / plane_height;
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let max_x = width.saturating_sub(1) as f32;
    let max_y = height.saturating_sub(1) as f32;

    points
        .iter()
        .map(|p| {
            let x = (p.x * scale_x + center_x).round_ties_even().clamp(0.0, max_x);
            let y = (-p.y * scale_y + center_y).round_ties_even().clamp(0.0, max_y);
            Point2::new(x as i32, y as i32)
        })
        .collect()
}
