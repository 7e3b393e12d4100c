use crate::math::{Point2, UP};
use crate::path::{vertex_frames, Path};

use super::{CrossSection, TriangleMesh};

// Column layout of one solid cross-section row.
const TOP_LEFT: u32 = 0;
const TOP_RIGHT: u32 = 1;
const BOTTOM_LEFT: u32 = 2;
const BOTTOM_RIGHT: u32 = 3;

/// Outward-facing column pairs of a solid slab: top, bottom, left, right.
const SLAB_FACES: [(u32, u32); 4] = [
    (TOP_LEFT, TOP_RIGHT),
    (BOTTOM_RIGHT, BOTTOM_LEFT),
    (BOTTOM_LEFT, TOP_LEFT),
    (TOP_RIGHT, BOTTOM_RIGHT),
];

/// Sweeps a road or water cross-section along a path.
///
/// With `thickness > 0` the result is a closed slab between the path
/// elevation and `elevation + thickness`; otherwise a flat, upward-facing
/// ribbon at the path elevation. Paths with fewer than 2 points produce an
/// empty mesh.
#[derive(Debug)]
pub struct ExtrudeRibbon<'a> {
    path: &'a Path,
    section: CrossSection,
}

impl<'a> ExtrudeRibbon<'a> {
    #[must_use]
    pub fn new(path: &'a Path, section: CrossSection) -> Self {
        Self { path, section }
    }

    /// Executes the extrusion.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn execute(&self) -> TriangleMesh {
        let n = self.path.len();
        if n < 2 {
            return TriangleMesh::default();
        }

        let solid = self.section.thickness > 0.0;
        let row_len: u32 = if solid { 4 } else { 2 };
        let half_w = self.section.half_width();
        let lift = UP * self.section.thickness;

        let frames = vertex_frames(&self.path.points, self.path.closed);
        let arc_lengths = self.path.cumulative_lengths();
        let total_length = arc_lengths[n - 1];
        let inv_total = if total_length > f64::EPSILON {
            1.0 / total_length
        } else {
            0.0
        };

        let mut mesh = TriangleMesh::default();
        mesh.vertices.reserve(n * row_len as usize);
        mesh.uvs.reserve(n * row_len as usize);

        for ((p, frame), s) in self.path.points.iter().zip(&frames).zip(&arc_lengths) {
            let v = s * inv_total;
            let left = frame.offset(p, half_w);
            let right = frame.offset(p, -half_w);
            if solid {
                mesh.vertices
                    .extend_from_slice(&[left + lift, right + lift, left, right]);
                mesh.uvs.extend_from_slice(&[
                    Point2::new(0.0, v),
                    Point2::new(1.0, v),
                    Point2::new(0.0, v),
                    Point2::new(1.0, v),
                ]);
            } else {
                mesh.vertices.extend_from_slice(&[left, right]);
                mesh.uvs
                    .extend_from_slice(&[Point2::new(0.0, v), Point2::new(1.0, v)]);
            }
        }

        if solid {
            mesh.connect_rows(0, row_len, n, &SLAB_FACES);

            // Start cap faces backwards, end cap forwards.
            let e = (n as u32 - 1) * row_len;
            mesh.indices.extend([
                [BOTTOM_LEFT, TOP_LEFT, BOTTOM_RIGHT],
                [BOTTOM_RIGHT, TOP_LEFT, TOP_RIGHT],
                [e + BOTTOM_LEFT, e + BOTTOM_RIGHT, e + TOP_LEFT],
                [e + BOTTOM_RIGHT, e + TOP_RIGHT, e + TOP_LEFT],
            ]);
        } else {
            mesh.connect_rows(0, row_len, n, &[(0, 1)]);
        }

        mesh.compute_normals();
        mesh
    }
}
