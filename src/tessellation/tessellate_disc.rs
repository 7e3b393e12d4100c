use std::f64::consts::TAU;

use crate::math::{Point2, Point3, UP};

use super::TriangleMesh;

/// Default number of fan segments around a disc.
pub const DEFAULT_DISC_SEGMENTS: u32 = 32;

const MIN_DISC_SEGMENTS: u32 = 3;

/// Tessellates a horizontal, upward-facing disc.
///
/// Used for single-point water bodies and junction overlays.
#[derive(Debug)]
pub struct TessellateDisc {
    center: Point2,
    radius: f64,
    elevation: f64,
    segments: u32,
}

impl TessellateDisc {
    /// Creates a disc centred on the ground-plane point `center`.
    #[must_use]
    pub fn new(center: Point2, radius: f64, elevation: f64) -> Self {
        Self {
            center,
            radius,
            elevation,
            segments: DEFAULT_DISC_SEGMENTS,
        }
    }

    /// Sets the number of fan segments (at least 3).
    #[must_use]
    pub fn segments(mut self, segments: u32) -> Self {
        self.segments = segments.max(MIN_DISC_SEGMENTS);
        self
    }

    /// Executes the tessellation. A non-positive radius gives an empty mesh.
    #[must_use]
    pub fn execute(&self) -> TriangleMesh {
        let mut mesh = TriangleMesh::default();
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return mesh;
        }

        let n = self.segments;
        mesh.vertices
            .push(Point3::new(self.center.x, self.elevation, self.center.y));
        mesh.uvs.push(Point2::new(0.5, 0.5));
        for i in 0..n {
            let theta = TAU * f64::from(i) / f64::from(n);
            let (sin, cos) = theta.sin_cos();
            mesh.vertices.push(Point3::new(
                self.center.x + self.radius * cos,
                self.elevation,
                self.center.y + self.radius * sin,
            ));
            mesh.uvs.push(Point2::new(0.5 + 0.5 * cos, 0.5 + 0.5 * sin));
        }
        mesh.normals = vec![UP; mesh.vertices.len()];

        for i in 0..n {
            let current = 1 + i;
            let next = 1 + (i + 1) % n;
            mesh.indices.push([0, next, current]);
        }
        mesh
    }
}
