use nalgebra::Isometry3;

use crate::math::{Point2, Point3, Vector3};
use crate::path::Path;

use super::{CrossSection, TriangleMesh};

/// Builds one oriented box per straight path segment.
///
/// Each box is as long as its segment, `section.width` deep and
/// `section.thickness` tall, standing on the path elevation.
#[derive(Debug)]
pub struct ExtrudeWall<'a> {
    path: &'a Path,
    section: CrossSection,
}

impl<'a> ExtrudeWall<'a> {
    #[must_use]
    pub fn new(path: &'a Path, section: CrossSection) -> Self {
        Self { path, section }
    }

    /// Executes the extrusion. Fewer than 2 path points give an empty mesh.
    #[must_use]
    pub fn execute(&self) -> TriangleMesh {
        let mut mesh = TriangleMesh::default();
        if self.path.len() < 2 {
            return mesh;
        }
        for pair in self.path.points.windows(2) {
            push_segment_box(&mut mesh, &pair[0], &pair[1], self.section);
        }
        tracing::debug!(boxes = self.path.len() - 1, "extruded wall");
        mesh
    }
}

/// Face normal plus the two in-face half axes, with `u × v = normal`.
const BOX_FACES: [([f64; 3], [f64; 3], [f64; 3]); 6] = [
    ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
    ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
    ([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]),
    ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ([0.0, 0.0, -1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]),
];

#[allow(clippy::cast_possible_truncation)]
fn push_segment_box(mesh: &mut TriangleMesh, a: &Point3, b: &Point3, section: CrossSection) {
    let dx = b.x - a.x;
    let dz = b.z - a.z;
    let length = dx.hypot(dz);
    let height = section.thickness;
    let angle = dz.atan2(dx);

    // Local x runs along the segment, y up, z across.
    let placement = Isometry3::new(
        Vector3::new(
            (a.x + b.x) * 0.5,
            (a.y + b.y) * 0.5 + height * 0.5,
            (a.z + b.z) * 0.5,
        ),
        Vector3::y() * -angle,
    );
    let half = Vector3::new(length * 0.5, height * 0.5, section.half_width());

    for (normal, u_axis, v_axis) in BOX_FACES {
        let n = Vector3::from(normal);
        let u = Vector3::from(u_axis).component_mul(&half);
        let v = Vector3::from(v_axis).component_mul(&half);
        let c = Point3::from(n.component_mul(&half));

        let base = mesh.vertices.len() as u32;
        let world_normal = placement * n;
        for (corner, uv) in [
            (c - u - v, Point2::new(0.0, 0.0)),
            (c + u - v, Point2::new(1.0, 0.0)),
            (c + u + v, Point2::new(1.0, 1.0)),
            (c - u + v, Point2::new(0.0, 1.0)),
        ] {
            mesh.vertices.push(placement * corner);
            mesh.normals.push(world_normal);
            mesh.uvs.push(uv);
        }
        mesh.indices.push([base, base + 1, base + 2]);
        mesh.indices.push([base, base + 2, base + 3]);
    }
}
