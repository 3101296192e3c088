/// Texture images sampled by normalized UV
use nalgebra::Vector2;

use crate::color::{self, Rgb};
use crate::error::{RenderError, Result};

/// A row-major RGB image
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    width: usize,
    height: usize,
    texels: Vec<Rgb>,
}

impl Texture {
    pub fn new(width: usize, height: usize, texels: Vec<Rgb>) -> Result<Self> {
        let expected = width.checked_mul(height);
        if expected != Some(texels.len()) || texels.is_empty() {
            return Err(RenderError::TextureSize {
                expected: expected.unwrap_or(usize::MAX),
                actual: texels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// Build a texture from packed 8-bit RGB bytes.
    pub fn from_rgb8(width: usize, height: usize, bytes: &[u8]) -> Result<Self> {
        let expected = width.checked_mul(height);
        if expected.and_then(|n| n.checked_mul(3)) != Some(bytes.len()) {
            return Err(RenderError::TextureSize {
                expected: expected.unwrap_or(usize::MAX),
                actual: bytes.len() / 3,
            });
        }
        let texels = bytes
            .chunks_exact(3)
            .map(|px| color::from_rgb8([px[0], px[1], px[2]]))
            .collect();
        Self::new(width, height, texels)
    }

    /// Build a texture by evaluating `f(x, y)` for every texel.
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> Rgb,
    ) -> Result<Self> {
        let texels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self::new(width, height, texels)
    }

    /// A 1×1 texture of a single colour
    pub fn solid(color: Rgb) -> Self {
        Self {
            width: 1,
            height: 1,
            texels: vec![color],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Panics if `(x, y)` is outside the texture.
    pub fn texel(&self, x: usize, y: usize) -> Rgb {
        self.texels[y * self.width + x]
    }

    /// Nearest-texel lookup.
    ///
    /// Returns `None` when either coordinate is NaN or outside [0, 1].
    pub fn sample(&self, uv: &Vector2<f32>) -> Option<Rgb> {
        if !uv.iter().all(|c| (0.0..=1.0).contains(c)) {
            return None;
        }
        let index = |c: f32, len: usize| {
            let max = (len - 1) as f32;
            (c * max).clamp(0.0, max) as usize
        };
        Some(self.texel(index(uv.x, self.width), index(uv.y, self.height)))
    }
}
