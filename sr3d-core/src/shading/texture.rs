/// Texture mapping without lighting
use nalgebra::Vector2;

use crate::canvas::Canvas;
use crate::texture::Texture;

use super::scanline::scan;

/// Fill the triangle with nearest-texel samples at the interpolated UV.
///
/// Pixels whose UV comes out NaN or outside [0, 1] are skipped.
pub fn shade(
    canvas: &mut Canvas,
    vertices: &[Vector2<f32>; 3],
    uvs: &[Vector2<f32>; 3],
    texture: &Texture,
) {
    scan(canvas, vertices, uvs, |canvas, x, y, uv| {
        if let Some(color) = texture.sample(&uv) {
            canvas.set_pixel(x, y, color);
        }
    });
}
