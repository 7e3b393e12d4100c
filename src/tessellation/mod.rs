mod extrude_ribbon;
mod extrude_wall;
mod fill_water_body;
mod tessellate_disc;

pub use extrude_ribbon::ExtrudeRibbon;
pub use extrude_wall::ExtrudeWall;
pub use fill_water_body::FillWaterBody;
pub use tessellate_disc::{TessellateDisc, DEFAULT_DISC_SEGMENTS};

use crate::math::{normalize_or_zero, Point2, Point3, Vector3};

/// Width and vertical extent of a swept profile.
///
/// `thickness` is the slab depth of roads and the height of walls;
/// `0` selects a flat ribbon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossSection {
    pub width: f64,
    pub thickness: f64,
}

impl CrossSection {
    #[must_use]
    pub fn new(width: f64, thickness: f64) -> Self {
        Self { width, thickness }
    }

    #[must_use]
    pub fn half_width(&self) -> f64 {
        self.width * 0.5
    }
}

/// A polyline approximation of a line marking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    /// The ordered vertices of the polyline.
    pub points: Vec<Point3>,
}

/// A triangle mesh handed to the renderer.
///
/// An empty mesh (no indices) means "nothing to render".
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Vertex normals.
    pub normals: Vec<Vector3>,
    /// UV coordinates.
    pub uvs: Vec<Point2>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Appends `other`, re-basing its indices.
    #[allow(clippy::cast_possible_truncation)]
    pub fn merge(&mut self, other: &TriangleMesh) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);
        self.indices.extend(
            other
                .indices
                .iter()
                .map(|t| [t[0] + base, t[1] + base, t[2] + base]),
        );
    }

    /// Recomputes vertex normals by accumulating area-weighted face normals.
    pub fn compute_normals(&mut self) {
        let mut acc = vec![Vector3::zeros(); self.vertices.len()];
        for tri in &self.indices {
            let [a, b, c] = tri.map(|i| i as usize);
            let origin = self.vertices[a];
            let n = (self.vertices[b] - origin).cross(&(self.vertices[c] - origin));
            acc[a] += n;
            acc[b] += n;
            acc[c] += n;
        }
        self.normals = acc.into_iter().map(normalize_or_zero).collect();
    }

    /// Unit normal of triangle `i` (zero for degenerate triangles).
    #[must_use]
    pub fn face_normal(&self, i: usize) -> Vector3 {
        let [a, b, c] = self.indices[i].map(|v| self.vertices[v as usize]);
        normalize_or_zero((b - a).cross(&(c - a)))
    }

    /// Area of triangle `i`.
    #[must_use]
    pub fn face_area(&self, i: usize) -> f64 {
        let [a, b, c] = self.indices[i].map(|v| self.vertices[v as usize]);
        (b - a).cross(&(c - a)).norm() * 0.5
    }

    /// Positions as flat `x, y, z` triples.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn flat_positions(&self) -> Vec<f32> {
        self.vertices
            .iter()
            .flat_map(|p| [p.x as f32, p.y as f32, p.z as f32])
            .collect()
    }

    /// Normals as flat `x, y, z` triples.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn flat_normals(&self) -> Vec<f32> {
        self.normals
            .iter()
            .flat_map(|n| [n.x as f32, n.y as f32, n.z as f32])
            .collect()
    }

    /// UVs as flat `u, v` pairs.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn flat_uvs(&self) -> Vec<f32> {
        self.uvs
            .iter()
            .flat_map(|uv| [uv.x as f32, uv.y as f32])
            .collect()
    }

    /// Triangle indices as a flat list.
    #[must_use]
    pub fn flat_indices(&self) -> Vec<u32> {
        self.indices.iter().flatten().copied().collect()
    }

    /// Connects consecutive rows of a swept cross-section.
    ///
    /// Rows are `row_len` vertices long and stored back to back starting at
    /// `base`. For every column pair `(c0, c1)` a quad is emitted whose normal
    /// is `direction × (c1 - c0)`.
    pub(crate) fn connect_rows(
        &mut self,
        base: u32,
        row_len: u32,
        rows: usize,
        faces: &[(u32, u32)],
    ) {
        let mut a = base;
        for _ in 1..rows {
            let b = a + row_len;
            for &(c0, c1) in faces {
                self.indices.push([a + c0, b + c0, a + c1]);
                self.indices.push([a + c1, b + c0, b + c1]);
            }
            a = b;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> TriangleMesh {
        TriangleMesh {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(0.0, 0.0, 1.0),
                Point3::new(1.0, 0.0, 1.0),
                Point3::new(1.0, 0.0, 0.0),
            ],
            normals: Vec::new(),
            uvs: Vec::new(),
            indices: vec![[0, 1, 2], [0, 2, 3]],
        }
    }

    #[test]
    fn normals_face_up_for_ccw_from_above() {
        let mut mesh = unit_quad();
        mesh.compute_normals();
        for n in &mesh.normals {
            assert!((n.y - 1.0).abs() < 1e-12, "{n:?}");
        }
        assert!((mesh.face_area(0) + mesh.face_area(1) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn merge_rebases_indices() {
        let mut a = unit_quad();
        let b = unit_quad();
        a.merge(&b);
        assert_eq!(a.vertices.len(), 8);
        assert_eq!(a.indices[2], [4, 5, 6]);
    }

    #[test]
    fn flat_buffers() {
        let mesh = unit_quad();
        assert_eq!(mesh.flat_positions().len(), 12);
        assert_eq!(mesh.flat_indices(), vec![0, 1, 2, 0, 2, 3]);
    }
}
