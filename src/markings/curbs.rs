use crate::config::CurbStyle;
use crate::math::{Point2, UP};
use crate::path::{vertex_frames, Path};
use crate::tessellation::TriangleMesh;

// Cross-section columns, from the road edge outwards.
const INNER_BOTTOM: u32 = 0;
const INNER_TOP: u32 = 1;
const OUTER_TOP: u32 = 2;
const OUTER_BOTTOM: u32 = 3;

const ROW_LEN: u32 = 4;

/// Top, inner wall and outer wall of the left curb.
const LEFT_FACES: [(u32, u32); 3] = [
    (OUTER_TOP, INNER_TOP),
    (INNER_TOP, INNER_BOTTOM),
    (OUTER_BOTTOM, OUTER_TOP),
];

/// Mirror of [`LEFT_FACES`] for the right-hand side.
const RIGHT_FACES: [(u32, u32); 3] = [
    (INNER_TOP, OUTER_TOP),
    (INNER_BOTTOM, INNER_TOP),
    (OUTER_TOP, OUTER_BOTTOM),
];

/// Builds both curbs of a road as one mesh.
///
/// Each curb spans `half_width .. half_width + curb.width` sideways and
/// rises `curb.height` above `surface_offset` (the road top relative to the
/// path elevation).
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn curb_mesh(
    path: &Path,
    half_width: f64,
    surface_offset: f64,
    curb: &CurbStyle,
) -> TriangleMesh {
    let mut mesh = TriangleMesh::default();
    let n = path.len();
    if n < 2 {
        return mesh;
    }

    let frames = vertex_frames(&path.points, path.closed);
    let arc_lengths = path.cumulative_lengths();
    let total = arc_lengths[n - 1].max(f64::EPSILON);
    let base_lift = UP * surface_offset;
    let top_lift = UP * (surface_offset + curb.height);

    for (side, faces) in [(1.0, &LEFT_FACES), (-1.0, &RIGHT_FACES)] {
        let base = mesh.vertices.len() as u32;
        for ((p, frame), s) in path.points.iter().zip(&frames).zip(&arc_lengths) {
            let inner = frame.offset(p, side * half_width);
            let outer = frame.offset(p, side * (half_width + curb.width));
            mesh.vertices.extend_from_slice(&[
                inner + base_lift,
                inner + top_lift,
                outer + top_lift,
                outer + base_lift,
            ]);
            let v = s / total;
            mesh.uvs.extend_from_slice(&[
                Point2::new(0.0, v),
                Point2::new(1.0 / 3.0, v),
                Point2::new(2.0 / 3.0, v),
                Point2::new(1.0, v),
            ]);
        }
        mesh.connect_rows(base, ROW_LEN, n, faces);
    }

    mesh.compute_normals();
    mesh
}
