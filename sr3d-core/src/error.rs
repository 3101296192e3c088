/// Error types for the rendering pipeline
use thiserror::Error;

use crate::shading::Shader;

/// Everything that can abort a render call.
///
/// Conditions the pipeline recovers from locally (out-of-range UVs, triangles
/// with bad vertex indices) never show up here.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("rotation axis has zero length")]
    ZeroAxis,

    #[error("degenerate camera basis: {0}")]
    DegenerateCamera(&'static str),

    #[error("point {index} has zero camera-space depth")]
    ZeroDepth { index: usize },

    #[error("invalid camera: {0}")]
    InvalidCamera(&'static str),

    #[error("{attribute} array has {actual} entries, expected {expected}")]
    AttributeLength {
        attribute: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("the {shader} shader needs per-vertex {attribute}, but the mesh has none")]
    MissingAttribute {
        attribute: &'static str,
        shader: Shader,
    },

    #[error("the texture shader needs a texture")]
    MissingTexture,

    #[error("texture buffer holds {actual} texels, expected {expected}")]
    TextureSize { expected: usize, actual: usize },

    #[error("unknown shader `{0}` (expected flat, texture, gouraud or phong)")]
    UnknownShader(String),

    #[error("invalid scene configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
