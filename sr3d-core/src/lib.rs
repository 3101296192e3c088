/// SR3D Core Library - Software rendering pipeline
///
/// This library turns an indexed triangle mesh, a pinhole camera, point lights
/// and a material into an RGB frame on the CPU: look-at transform, perspective
/// projection, rasterization, painter's-algorithm ordering and scanline shading.

pub mod camera;
pub mod canvas;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod interp;
pub mod lighting;
pub mod normals;
pub mod projection;
pub mod render;
pub mod shading;
pub mod texture;
pub mod transform;

// Re-export commonly used types
pub use camera::{lookat, Camera, ViewTransform};
pub use canvas::Canvas;
pub use color::Rgb;
pub use config::SceneConfig;
pub use error::{RenderError, Result};
pub use geometry::{Mesh, Triangle};
pub use lighting::{Light, Lighting, Material};
pub use render::{composite, draw_order, render, RenderOptions, Scene};
pub use shading::{ShadeContext, ShadeVertex, Shader};
pub use texture::Texture;
