/// Per-pixel lighting from interpolated normals
use nalgebra::{Point3, SVector, Vector2, Vector3};

use crate::canvas::Canvas;
use crate::lighting::reflectance;

use super::scanline::scan;
use super::{texel, ShadeContext, ShadeVertex};

/// `[u, v, nx, ny, nz, px, py, pz, r, g, b]`
type Attributes = SVector<f32, 11>;

fn pack(v: &ShadeVertex) -> Attributes {
    Attributes::from_iterator(
        v.uv.iter()
            .chain(v.normal.iter())
            .chain(v.world.coords.iter())
            .chain(v.color.iter())
            .copied(),
    )
}

/// Interpolate UV, normal, world position and vertex colour, then light every pixel.
///
/// The surface base colour is the interpolated vertex colour times the texel at
/// the interpolated UV (white without a texture). The interpolated normal is
/// renormalized inside [`reflectance`].
pub fn shade(canvas: &mut Canvas, triangle: &[ShadeVertex; 3], ctx: &ShadeContext<'_>) {
    scan(canvas, &triangle.map(|v| v.screen), &triangle.map(|v| pack(&v)), |canvas, x, y, a| {
        let Some(tex) = texel(ctx.texture, &Vector2::new(a[0], a[1])) else {
            return;
        };
        let normal = Vector3::new(a[2], a[3], a[4]);
        let point = Point3::new(a[5], a[6], a[7]);
        let base = Vector3::new(a[8], a[9], a[10]).component_mul(&tex);
        let lit = reflectance(&point, &normal, &base, &ctx.camera, ctx.material, ctx.lighting);
        canvas.set_pixel(x, y, lit);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::WHITE;
    use crate::lighting::{Light, Lighting, Material};
    use crate::shading::gouraud;
    use approx::assert_relative_eq;

    fn vertex(x: f32, y: f32, normal: Vector3<f32>) -> ShadeVertex {
        ShadeVertex::at(x, y, 5.0)
            .with_uv(0.5, 0.5)
            .with_surface(Point3::new(x, 0.0, y), normal)
    }

    fn spotlight_scene() -> (Material, Lighting) {
        let material = Material::uniform(0.0, 0.0, 1.0, 200.0);
        let lighting = Lighting {
            lights: vec![Light::new(Point3::new(20.0, 50.0, 20.0), Vector3::repeat(1.0))],
            ambient: Vector3::zeros(),
        };
        (material, lighting)
    }

    #[test]
    fn test_pack_layout() {
        let v = vertex(3.0, 4.0, Vector3::new(0.1, 0.2, 0.3))
            .with_color(Vector3::new(0.7, 0.8, 0.9));
        let a = pack(&v);
        assert_eq!(a.as_slice(), &[0.5, 0.5, 0.1, 0.2, 0.3, 3.0, 0.0, 4.0, 0.7, 0.8, 0.9]);
    }

    #[test]
    fn test_highlight_inside_triangle() {
        // A tight highlight in the middle of a large triangle: per-pixel lighting
        // catches it, per-vertex lighting misses it entirely.
        let (material, lighting) = spotlight_scene();
        let ctx = ShadeContext {
            texture: None,
            material: &material,
            lighting: &lighting,
            camera: Point3::new(20.0, 50.0, 20.0),
        };
        let tri = [
            vertex(0.0, 0.0, Vector3::y()),
            vertex(60.0, 0.0, Vector3::y()),
            vertex(0.0, 60.0, Vector3::y()),
        ];

        let mut phong = Canvas::new(64, 64);
        shade(&mut phong, &tri, &ctx);
        let mut flat_lit = Canvas::new(64, 64);
        gouraud::shade(&mut flat_lit, &tri, &ctx);

        assert_relative_eq!(phong.pixel(20, 20), WHITE, epsilon = 1e-4);
        assert!(flat_lit.pixel(20, 20).x < 0.01);
    }

    #[test]
    fn test_uniform_surface_matches_gouraud() {
        let material = Material::uniform(0.3, 0.6, 0.0, 1.0);
        let lighting = Lighting {
            lights: vec![Light::new(Point3::new(0.0, 1.0e6, 0.0), Vector3::repeat(1.0))],
            ambient: Vector3::repeat(1.0),
        };
        let ctx = ShadeContext {
            texture: None,
            material: &material,
            lighting: &lighting,
            camera: Point3::new(0.0, 10.0, 0.0),
        };
        let tri = [
            vertex(2.0, 2.0, Vector3::y()),
            vertex(30.0, 2.0, Vector3::y()),
            vertex(2.0, 30.0, Vector3::y()),
        ];
        let mut a = Canvas::new(32, 32);
        let mut b = Canvas::new(32, 32);
        shade(&mut a, &tri, &ctx);
        gouraud::shade(&mut b, &tri, &ctx);
        assert_relative_eq!(a.pixel(8, 8), b.pixel(8, 8), epsilon = 1e-4);
        assert_relative_eq!(a.pixel(8, 8), Vector3::repeat(0.9), epsilon = 1e-4);
    }
}
