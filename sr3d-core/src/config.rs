/// Scene configuration loaded from JSON
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::canvas::Canvas;
use crate::error::Result;
use crate::geometry::Mesh;
use crate::lighting::{Lighting, Material};
use crate::render::{render, RenderOptions, Scene};
use crate::shading::Shader;
use crate::texture::Texture;

/// Camera, lights, material and shader choice for one render call.
///
/// Everything except the camera and the shader has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub camera: Camera,
    #[serde(default)]
    pub lighting: Lighting,
    #[serde(default)]
    pub material: Material,
    pub shader: Shader,
    #[serde(default)]
    pub options: RenderOptions,
}

impl SceneConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render `mesh` with this configuration.
    pub fn render(&self, mesh: &Mesh, texture: Option<&Texture>) -> Result<Canvas> {
        let scene = Scene {
            mesh,
            texture,
            camera: &self.camera,
            lighting: &self.lighting,
            material: &self.material,
        };
        render(&scene, self.shader, &self.options)
    }
}
