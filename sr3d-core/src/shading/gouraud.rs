/// Per-vertex lighting, interpolated across the triangle
use nalgebra::{SVector, Vector2, Vector3};

use crate::canvas::Canvas;
use crate::color;
use crate::lighting::reflectance;

use super::scanline::scan;
use super::{texel, ShadeContext, ShadeVertex};

/// `[u, v, r, g, b]`
type Attributes = SVector<f32, 5>;

/// Light each vertex once, then interpolate UV and lit colour per pixel.
///
/// Each vertex colour comes from [`reflectance`] with the vertex colour as base.
/// The pixel is the interpolated lit colour times the texel at the interpolated
/// UV; without a texture the texel is white.
pub fn shade(canvas: &mut Canvas, triangle: &[ShadeVertex; 3], ctx: &ShadeContext<'_>) {
    let attributes = triangle.map(|v| {
        let lit = reflectance(
            &v.world,
            &v.normal,
            &v.color,
            &ctx.camera,
            ctx.material,
            ctx.lighting,
        );
        Attributes::new(v.uv.x, v.uv.y, lit.x, lit.y, lit.z)
    });

    scan(canvas, &triangle.map(|v| v.screen), &attributes, |canvas, x, y, a| {
        let Some(tex) = texel(ctx.texture, &Vector2::new(a[0], a[1])) else {
            return;
        };
        let lit = Vector3::new(a[2], a[3], a[4]);
        canvas.set_pixel(x, y, color::clamp(lit.component_mul(&tex)));
    });
}
