/// Triangle fill algorithms.
///
/// Every shader writes straight into a caller-owned [`Canvas`]; nothing is
/// returned. Vertices are in pixel space, with X right and Y down.
use std::fmt;
use std::str::FromStr;

use nalgebra::{Point3, Vector2, Vector3};
use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::color::{Rgb, WHITE};
use crate::error::RenderError;
use crate::lighting::{Lighting, Material};
use crate::texture::Texture;

pub mod flat;
pub mod gouraud;
pub mod phong;
mod scanline;
pub mod texture;

/// Shader variant selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shader {
    /// Solid fill with the mean vertex colour
    Flat,
    /// Nearest-texel lookup, no lighting
    Texture,
    /// Lighting per vertex, interpolated, modulated by the texture
    Gouraud,
    /// Lighting per pixel from interpolated normals
    Phong,
}

impl Shader {
    pub const ALL: [Shader; 4] = [Shader::Flat, Shader::Texture, Shader::Gouraud, Shader::Phong];

    pub fn name(self) -> &'static str {
        match self {
            Shader::Flat => "flat",
            Shader::Texture => "texture",
            Shader::Gouraud => "gouraud",
            Shader::Phong => "phong",
        }
    }
}

impl fmt::Display for Shader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shader {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "f" | "flat" => Ok(Shader::Flat),
            "t" | "texture" => Ok(Shader::Texture),
            "gouraud" => Ok(Shader::Gouraud),
            "phong" => Ok(Shader::Phong),
            _ => Err(RenderError::UnknownShader(s.to_string())),
        }
    }
}

/// One triangle corner as the shaders see it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadeVertex {
    /// Pixel coordinates
    pub screen: Vector2<f32>,
    /// Camera-space depth, used for draw ordering
    pub depth: f32,
    /// World-space position, used for lighting
    pub world: Point3<f32>,
    pub normal: Vector3<f32>,
    pub uv: Vector2<f32>,
    pub color: Rgb,
}

impl ShadeVertex {
    /// A white, unlit vertex at pixel `(x, y)`
    pub fn at(x: f32, y: f32, depth: f32) -> Self {
        Self {
            screen: Vector2::new(x, y),
            depth,
            world: Point3::origin(),
            normal: Vector3::zeros(),
            uv: Vector2::zeros(),
            color: WHITE,
        }
    }

    pub fn with_uv(mut self, u: f32, v: f32) -> Self {
        self.uv = Vector2::new(u, v);
        self
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn with_surface(mut self, world: Point3<f32>, normal: Vector3<f32>) -> Self {
        self.world = world;
        self.normal = normal;
        self
    }
}

/// Everything besides the triangle itself that a shader may read
#[derive(Debug, Clone, Copy)]
pub struct ShadeContext<'a> {
    pub texture: Option<&'a Texture>,
    pub material: &'a Material,
    pub lighting: &'a Lighting,
    /// Camera position in world space
    pub camera: Point3<f32>,
}

/// Fill one triangle with the selected shader.
///
/// Without a texture the texture shader has nothing to sample and draws nothing;
/// the compositor rejects that combination before drawing.
pub fn draw(
    canvas: &mut Canvas,
    triangle: &[ShadeVertex; 3],
    ctx: &ShadeContext<'_>,
    shader: Shader,
) {
    match shader {
        Shader::Flat => flat::shade(
            canvas,
            &triangle.map(|v| v.screen),
            &triangle.map(|v| v.color),
        ),
        Shader::Texture => {
            if let Some(tex) = ctx.texture {
                texture::shade(canvas, &triangle.map(|v| v.screen), &triangle.map(|v| v.uv), tex)
            }
        }
        Shader::Gouraud => gouraud::shade(canvas, triangle, ctx),
        Shader::Phong => phong::shade(canvas, triangle, ctx),
    }
}

/// Texel under `uv`, or white when there is no texture.
///
/// `None` when `uv` is NaN or outside [0, 1]; such pixels are left untouched.
fn texel(texture: Option<&Texture>, uv: &Vector2<f32>) -> Option<Rgb> {
    match texture {
        Some(tex) => tex.sample(uv),
        None if uv.iter().all(|c| (0.0..=1.0).contains(c)) => Some(WHITE),
        None => None,
    }
}
