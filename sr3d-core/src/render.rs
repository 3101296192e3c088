/// Painter's-algorithm compositor and the full render pipeline
use std::borrow::Cow;

use log::{debug, warn};
use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::canvas::Canvas;
use crate::color::WHITE;
use crate::error::{RenderError, Result};
use crate::geometry::{Mesh, Triangle};
use crate::lighting::{Lighting, Material};
use crate::normals::vertex_normals;
use crate::projection::{perspective_project, rasterize};
use crate::shading::{self, ShadeContext, ShadeVertex, Shader};
use crate::texture::Texture;

/// Knobs that change what the pipeline draws
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Skip triangles with any vertex at or behind the camera plane.
    ///
    /// Off by default: such triangles are projected numerically and drawn
    /// wherever they land.
    pub cull_behind_camera: bool,
}

/// Everything one render call reads
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub mesh: &'a Mesh,
    pub texture: Option<&'a Texture>,
    pub camera: &'a Camera,
    pub lighting: &'a Lighting,
    pub material: &'a Material,
}

/// Indices of the valid triangles, farthest first.
///
/// A triangle's depth is the mean of its three vertex depths. Triangles naming
/// a vertex outside `depths` are left out. Equal depths keep their input order.
pub fn draw_order(triangles: &[Triangle], depths: &[f32]) -> Vec<usize> {
    let mut keyed: Vec<(usize, f32)> = triangles
        .iter()
        .enumerate()
        .filter_map(|(i, t)| {
            if t.iter().any(|&v| v >= depths.len()) {
                warn!("skipping triangle {i}: vertex index out of range in {t:?}");
                return None;
            }
            Some((i, t.iter().map(|&v| depths[v]).sum::<f32>() / 3.0))
        })
        .collect();

    keyed.sort_by(|a, b| b.1.total_cmp(&a.1));
    keyed.into_iter().map(|(i, _)| i).collect()
}

/// Draw triangles of pixel-space vertices onto `canvas`, farthest first.
///
/// Nearer triangles overwrite farther ones; there is no per-pixel depth test,
/// so interpenetrating triangles are resolved by their mean depth only.
/// Returns the number of triangles drawn.
pub fn composite(
    canvas: &mut Canvas,
    vertices: &[ShadeVertex],
    triangles: &[Triangle],
    ctx: &ShadeContext<'_>,
    shader: Shader,
) -> Result<usize> {
    if shader == Shader::Texture && ctx.texture.is_none() {
        return Err(RenderError::MissingTexture);
    }

    let depths: Vec<f32> = vertices.iter().map(|v| v.depth).collect();
    let order = draw_order(triangles, &depths);

    for &i in &order {
        let triangle = triangles[i].map(|v| vertices[v]);
        shading::draw(canvas, &triangle, ctx, shader);
    }

    Ok(order.len())
}

/// Check the mesh carries what `shader` reads before anything is computed.
fn check_attributes(scene: &Scene<'_>, shader: Shader) -> Result<()> {
    let mesh = scene.mesh;
    let needs_uvs = match shader {
        Shader::Flat => {
            if mesh.colors().is_none() {
                return Err(RenderError::MissingAttribute {
                    attribute: "colors",
                    shader,
                });
            }
            false
        }
        Shader::Texture => {
            if scene.texture.is_none() {
                return Err(RenderError::MissingTexture);
            }
            true
        }
        Shader::Gouraud | Shader::Phong => scene.texture.is_some(),
    };
    if needs_uvs && mesh.uvs().is_none() {
        return Err(RenderError::MissingAttribute {
            attribute: "UVs",
            shader,
        });
    }
    Ok(())
}

/// Render `scene` into a fresh canvas.
///
/// Normals (taken from the mesh or estimated), look-at transform, perspective
/// projection, rasterization, depth sort, then one shader call per triangle.
pub fn render(scene: &Scene<'_>, shader: Shader, options: &RenderOptions) -> Result<Canvas> {
    let camera = scene.camera;
    let mesh = scene.mesh;
    camera.validate()?;
    check_attributes(scene, shader)?;

    let normals: Cow<'_, [Vector3<f32>]> = match mesh.normals() {
        Some(normals) => Cow::Borrowed(normals),
        None => Cow::Owned(vertex_normals(mesh.positions(), mesh.triangles())),
    };

    let view = camera.view()?;
    let projection = perspective_project(mesh.positions(), camera.focal, &view)?;
    let pixels = rasterize(
        &projection.points,
        camera.plane_width,
        camera.plane_height,
        camera.width,
        camera.height,
    );

    let vertices: Vec<ShadeVertex> = (0..mesh.vertex_count())
        .map(|i| ShadeVertex {
            screen: pixels[i].coords.cast::<f32>(),
            depth: projection.depths[i],
            world: mesh.positions()[i],
            normal: normals[i],
            uv: mesh.uvs().map_or_else(Vector2::zeros, |uvs| uvs[i]),
            color: mesh.colors().map_or(WHITE, |colors| colors[i]),
        })
        .collect();

    let triangles: Cow<'_, [Triangle]> = if options.cull_behind_camera {
        let visible: Vec<Triangle> = mesh
            .triangles()
            .iter()
            .filter(|t| {
                let in_front = !mesh.is_valid(t) || t.iter().all(|&v| projection.depths[v] > 0.0);
                if !in_front {
                    debug!("culling triangle {t:?}: vertex behind the camera");
                }
                in_front
            })
            .copied()
            .collect();
        Cow::Owned(visible)
    } else {
        Cow::Borrowed(mesh.triangles())
    };

    let ctx = ShadeContext {
        texture: scene.texture,
        material: scene.material,
        lighting: scene.lighting,
        camera: camera.eye,
    };

    let mut canvas = Canvas::new(camera.width, camera.height);
    let drawn = composite(&mut canvas, &vertices, &triangles, &ctx, shader)?;
    debug!(
        "{shader} render: drew {drawn} of {} triangles at {}x{}",
        mesh.triangles().len(),
        camera.width,
        camera.height
    );

    Ok(canvas)
}
