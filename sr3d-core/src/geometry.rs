/// Indexed triangle meshes
use nalgebra::{Matrix4, Point3, Vector2, Vector3};

use crate::color::Rgb;
use crate::error::{RenderError, Result};
use crate::transform;

/// Three indices into the mesh-wide vertex arrays
pub type Triangle = [usize; 3];

/// An indexed triangle mesh.
///
/// Positions, normals, UVs and colours share one index space: vertex `i` is
/// `positions[i]` together with entry `i` of each optional array that is present.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    positions: Vec<Point3<f32>>,
    triangles: Vec<Triangle>,
    normals: Option<Vec<Vector3<f32>>>,
    uvs: Option<Vec<Vector2<f32>>>,
    colors: Option<Vec<Rgb>>,
}

impl Mesh {
    /// Build a mesh from positions and triangles.
    ///
    /// Triangle indices are not checked here; out-of-range triangles are
    /// skipped at render time.
    pub fn new(positions: Vec<Point3<f32>>, triangles: Vec<Triangle>) -> Self {
        Self {
            positions,
            triangles,
            normals: None,
            uvs: None,
            colors: None,
        }
    }

    pub fn with_normals(mut self, normals: Vec<Vector3<f32>>) -> Result<Self> {
        self.check_len("normal", normals.len())?;
        self.normals = Some(normals);
        Ok(self)
    }

    pub fn with_uvs(mut self, uvs: Vec<Vector2<f32>>) -> Result<Self> {
        self.check_len("uv", uvs.len())?;
        self.uvs = Some(uvs);
        Ok(self)
    }

    pub fn with_colors(mut self, colors: Vec<Rgb>) -> Result<Self> {
        self.check_len("color", colors.len())?;
        self.colors = Some(colors);
        Ok(self)
    }

    fn check_len(&self, attribute: &'static str, actual: usize) -> Result<()> {
        let expected = self.positions.len();
        if actual != expected {
            return Err(RenderError::AttributeLength {
                attribute,
                expected,
                actual,
            });
        }
        Ok(())
    }

    pub fn positions(&self) -> &[Point3<f32>] {
        &self.positions
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn normals(&self) -> Option<&[Vector3<f32>]> {
        self.normals.as_deref()
    }

    pub fn uvs(&self) -> Option<&[Vector2<f32>]> {
        self.uvs.as_deref()
    }

    pub fn colors(&self) -> Option<&[Rgb]> {
        self.colors.as_deref()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Whether every index of `triangle` names an existing vertex
    pub fn is_valid(&self, triangle: &Triangle) -> bool {
        triangle.iter().all(|&i| i < self.positions.len())
    }

    /// Apply an affine transform to the positions.
    ///
    /// Supplied normals are dropped, since a general affine transform does not
    /// carry them along; they are re-estimated at render time.
    pub fn transformed(&self, xform: &Matrix4<f32>) -> Self {
        Self {
            positions: transform::apply(xform, &self.positions),
            triangles: self.triangles.clone(),
            normals: None,
            uvs: self.uvs.clone(),
            colors: self.colors.clone(),
        }
    }

    /// Create a textured, vertex-coloured cube centred on the origin.
    ///
    /// Each face has its own four vertices so that UVs span the full texture
    /// on every side. Triangles wind counter-clockwise seen from outside.
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        // (outward normal, u direction, v direction)
        let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
            ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
            ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
            ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ];
        let corners = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];

        let mut positions = Vec::with_capacity(24);
        let mut uvs = Vec::with_capacity(24);
        let mut colors = Vec::with_capacity(24);
        let mut triangles = Vec::with_capacity(12);

        for (n, u, v) in faces {
            let (n, u, v) = (Vector3::from(n), Vector3::from(u), Vector3::from(v));
            let base = positions.len();
            for (cu, cv) in corners {
                let offset = n + u * (2.0 * cu - 1.0) + v * (2.0 * cv - 1.0);
                positions.push(Point3::from(offset * h));
                uvs.push(Vector2::new(cu, cv));
                // Colour each corner by its direction from the centre
                colors.push(offset.map(|c| (c + 1.0) / 2.0));
            }
            triangles.push([base, base + 1, base + 2]);
            triangles.push([base, base + 2, base + 3]);
        }

        Self {
            positions,
            triangles,
            normals: None,
            uvs: Some(uvs),
            colors: Some(colors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_length_mismatch() {
        let mesh = Mesh::new(vec![Point3::origin(); 3], vec![[0, 1, 2]]);
        let err = mesh.with_uvs(vec![Vector2::zeros(); 2]).unwrap_err();
        assert!(matches!(
            err,
            RenderError::AttributeLength {
                attribute: "uv",
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_triangle_validity() {
        let mesh = Mesh::new(vec![Point3::origin(); 3], vec![]);
        assert!(mesh.is_valid(&[0, 1, 2]));
        assert!(!mesh.is_valid(&[0, 1, 3]));
    }

    #[test]
    fn test_cube_layout() {
        let cube = Mesh::cube(2.0);
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.triangles().len(), 12);
        assert!(cube.triangles().iter().all(|t| cube.is_valid(t)));
        assert!(cube
            .positions()
            .iter()
            .all(|p| p.coords.iter().all(|c| c.abs() == 1.0)));
        let uvs = cube.uvs().unwrap();
        assert!(uvs.iter().all(|uv| (0.0..=1.0).contains(&uv.x) && (0.0..=1.0).contains(&uv.y)));
    }

    #[test]
    fn test_cube_faces_wind_outward() {
        let cube = Mesh::cube(1.0);
        for t in cube.triangles() {
            let [a, b, c] = t.map(|i| cube.positions()[i]);
            let normal = (b - a).cross(&(c - a));
            let centroid = (a.coords + b.coords + c.coords) / 3.0;
            assert!(normal.dot(&centroid) > 0.0);
        }
    }

    #[test]
    fn test_transformed_keeps_attributes() {
        let cube = Mesh::cube(1.0);
        let moved = cube.transformed(&transform::translate(&Vector3::new(0.0, 0.0, 3.0)));
        assert_eq!(moved.triangles(), cube.triangles());
        assert_eq!(moved.uvs(), cube.uvs());
        assert!((moved.positions()[0].z - cube.positions()[0].z - 3.0).abs() < 1e-6);
    }
}
