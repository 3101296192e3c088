/// Pinhole camera and the world-to-view transform
use nalgebra::{Matrix3, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::{RenderError, Result};

/// Below this length a basis vector is considered degenerate.
const BASIS_EPSILON: f32 = 1e-6;

/// Camera configuration for one render call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub eye: Point3<f32>,
    /// Approximate up direction; only needs to be non-parallel to the view direction
    pub up: Vector3<f32>,
    pub target: Point3<f32>,
    /// Distance from the eye to the image plane
    pub focal: f32,
    /// Physical width of the image plane, in scene units
    pub plane_width: f32,
    /// Physical height of the image plane, in scene units
    pub plane_height: f32,
    /// Output resolution in pixels
    pub width: usize,
    pub height: usize,
}

impl Camera {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            eye: Point3::new(0.0, 0.0, 5.0),
            up: Vector3::y(),
            target: Point3::origin(),
            focal: 1.0,
            plane_width: width as f32 / height.max(1) as f32,
            plane_height: 1.0,
            width,
            height,
        }
    }

    /// Reject configurations the projection cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidCamera("resolution must be non-zero"));
        }
        if !(self.plane_width > 0.0 && self.plane_height > 0.0) {
            return Err(RenderError::InvalidCamera("image plane size must be positive"));
        }
        if !(self.focal > 0.0) {
            return Err(RenderError::InvalidCamera("focal length must be positive"));
        }
        Ok(())
    }

    /// The world-to-view transform for this camera
    pub fn view(&self) -> Result<ViewTransform> {
        lookat(&self.eye, &self.up, &self.target)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(512, 512)
    }
}

/// Camera orientation and position derived from eye, up hint and target.
///
/// The rows of `rotation` are the camera's right, up and backward (`-forward`)
/// axes; `translation` is the eye position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub rotation: Matrix3<f32>,
    pub translation: Vector3<f32>,
}

impl ViewTransform {
    /// `R · (p - t)`
    pub fn world_to_view(&self, p: &Point3<f32>) -> Vector3<f32> {
        self.rotation * (p.coords - self.translation)
    }

    /// Distance of `p` in front of the camera along its viewing direction.
    ///
    /// The third row of `R` points backwards, so depth is the negated view-space Z.
    pub fn depth(&self, p: &Point3<f32>) -> f32 {
        -self.world_to_view(p).z
    }

    pub fn forward(&self) -> Vector3<f32> {
        -self.rotation.row(2).transpose()
    }
}

/// Build the world-to-view transform looking from `eye` towards `target`.
pub fn lookat(eye: &Point3<f32>, up: &Vector3<f32>, target: &Point3<f32>) -> Result<ViewTransform> {
    let forward = (target - eye)
        .try_normalize(BASIS_EPSILON)
        .ok_or(RenderError::DegenerateCamera("eye and target coincide"))?;
    let right = forward
        .cross(up)
        .try_normalize(BASIS_EPSILON)
        .ok_or(RenderError::DegenerateCamera("view direction is parallel to the up vector"))?;
    let true_up = right.cross(&forward).normalize();

    let rotation = Matrix3::from_rows(&[
        right.transpose(),
        true_up.transpose(),
        (-forward).transpose(),
    ]);

    Ok(ViewTransform {
        rotation,
        translation: eye.coords,
    })
}
