use std::collections::HashMap;

use spade::handles::FixedVertexHandle;
use spade::{ConstrainedDelaunayTriangulation, Point2 as SpadePoint2, Triangulation};

use crate::math::{Point2, Point3, TOLERANCE, UP};
use crate::path::Path;

use super::TriangleMesh;

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Fills the outline of a closed water body (lake, pond) at the path
/// elevation.
///
/// The outline is triangulated with a constrained Delaunay triangulation
/// and the water is the set of triangles an odd number of outline edges
/// away from open ground, so concave outlines stay concave. Where the
/// outline crosses itself the edges are split at the crossing and each
/// loop is filled on its own.
#[derive(Debug)]
pub struct FillWaterBody<'a> {
    path: &'a Path,
}

impl<'a> FillWaterBody<'a> {
    #[must_use]
    pub fn new(path: &'a Path) -> Self {
        Self { path }
    }

    /// Executes the fill. Outlines with fewer than 3 distinct points give an
    /// empty mesh.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn execute(&self) -> TriangleMesh {
        let outline = outline_points(&self.path.points);
        if outline.len() < 3 {
            return TriangleMesh::default();
        }
        let elevation = self.path.points[0].y;

        let mut cdt = Cdt::new();
        let mut corners = Vec::with_capacity(outline.len());
        for p in &outline {
            match cdt.insert(SpadePoint2::new(p.x, p.y)) {
                Ok(h) => corners.push(h),
                Err(e) => {
                    tracing::warn!(error = %e, "rejected water outline");
                    return TriangleMesh::default();
                }
            }
        }
        let crossings = constrain_shoreline(&mut cdt, &corners);
        if crossings > 0 {
            tracing::debug!(crossings, "split self-intersecting water outline");
        }

        let wet = wet_faces(&cdt);
        let (min, extent) = bounding_box(&outline);

        let mut mesh = TriangleMesh::default();
        let mut vertex_map: HashMap<usize, u32> = HashMap::new();
        for face in cdt.inner_faces() {
            if !wet[face.fix().index()] {
                continue;
            }
            let mut tri = [0u32; 3];
            for (slot, vh) in tri.iter_mut().zip(face.vertices()) {
                *slot = *vertex_map.entry(vh.fix().index()).or_insert_with(|| {
                    let pos = vh.position();
                    mesh.vertices.push(Point3::new(pos.x, elevation, pos.y));
                    mesh.uvs.push(Point2::new(
                        (pos.x - min.x) / extent.x,
                        (pos.y - min.y) / extent.y,
                    ));
                    (mesh.vertices.len() - 1) as u32
                });
            }
            // Counter-clockwise in (x, z) faces down; flip to face up.
            mesh.indices.push([tri[0], tri[2], tri[1]]);
        }
        mesh.normals = vec![UP; mesh.vertices.len()];

        tracing::debug!(triangles = mesh.triangle_count(), "filled water body");
        mesh
    }
}

/// Ground-plane outline without the closing duplicate or repeated points.
fn outline_points(points: &[Point3]) -> Vec<Point2> {
    let mut outline: Vec<Point2> = Vec::with_capacity(points.len());
    for p in points {
        let q = Point2::new(p.x, p.z);
        if outline.last().is_none_or(|l| (q - l).norm() > TOLERANCE) {
            outline.push(q);
        }
    }
    while outline.len() > 1
        && outline
            .first()
            .zip(outline.last())
            .is_some_and(|(a, b)| (b - a).norm() <= TOLERANCE)
    {
        outline.pop();
    }
    outline
}

/// Adds the outline edges as constraints. An edge crossing an earlier one
/// is split there, with a new vertex at the crossing point.
///
/// Returns the number of edges that had to be split or passed through an
/// existing vertex.
fn constrain_shoreline(cdt: &mut Cdt, corners: &[FixedVertexHandle]) -> usize {
    let next = corners.iter().cycle().skip(1);
    let mut crossings = 0;
    for (&from, &to) in corners.iter().zip(next) {
        if from == to {
            continue;
        }
        if cdt.add_constraint_and_split(from, to, |p| p).len() > 1 {
            crossings += 1;
        }
    }
    crossings
}

/// Marks which faces lie under water, indexed by face index.
///
/// Faces touching the convex hull start dry unless the hull edge itself is
/// shoreline; every shoreline edge crossed afterwards toggles wet and dry.
/// Once the outline is fully constrained the result does not depend on the
/// walk order.
fn wet_faces(cdt: &Cdt) -> Vec<bool> {
    let mut wet = vec![false; cdt.num_all_faces()];
    let mut seen = vec![false; cdt.num_all_faces()];
    let mut stack = Vec::new();

    for edge in cdt.convex_hull() {
        let face = match (edge.face().as_inner(), edge.rev().face().as_inner()) {
            (Some(face), _) | (None, Some(face)) => face,
            (None, None) => continue,
        };
        let idx = face.fix().index();
        if !seen[idx] {
            seen[idx] = true;
            wet[idx] = cdt.is_constraint_edge(edge.as_undirected().fix());
            stack.push(face.fix());
        }
    }

    while let Some(handle) = stack.pop() {
        let face = cdt.face(handle);
        let here = wet[handle.index()];
        for edge in face.adjacent_edges() {
            let Some(neighbor) = edge.rev().face().as_inner() else {
                continue;
            };
            let idx = neighbor.fix().index();
            if seen[idx] {
                continue;
            }
            seen[idx] = true;
            wet[idx] = here != cdt.is_constraint_edge(edge.as_undirected().fix());
            stack.push(neighbor.fix());
        }
    }
    wet
}

fn bounding_box(points: &[Point2]) -> (Point2, Point2) {
    let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        min = min.inf(p);
        max = max.sup(p);
    }
    let extent = Point2::new(
        (max.x - min.x).max(TOLERANCE),
        (max.y - min.y).max(TOLERANCE),
    );
    (min, extent)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn closed_path(points: &[(f64, f64)], elevation: f64) -> Path {
        let mut pts: Vec<Point3> = points
            .iter()
            .map(|&(x, z)| Point3::new(x, elevation, z))
            .collect();
        pts.push(pts[0]);
        Path {
            points: pts,
            closed: true,
        }
    }

    fn total_area(mesh: &TriangleMesh) -> f64 {
        (0..mesh.triangle_count()).map(|i| mesh.face_area(i)).sum()
    }

    #[test]
    fn square_pond() {
        let path = closed_path(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)], 0.3);
        let mesh = FillWaterBody::new(&path).execute();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_relative_eq!(total_area(&mesh), 16.0, epsilon = 1e-9);
        assert!(mesh.vertices.iter().all(|p| (p.y - 0.3).abs() < 1e-12));
    }

    #[test]
    fn triangles_face_up() {
        let path = closed_path(&[(0.0, 0.0), (5.0, 1.0), (6.0, 5.0), (1.0, 4.0)], 0.0);
        let mesh = FillWaterBody::new(&path).execute();
        for i in 0..mesh.triangle_count() {
            assert!(mesh.face_normal(i).y > 0.99, "triangle {i} faces down");
        }
    }

    #[test]
    fn concave_outline_keeps_notch_empty() {
        // L-shaped lake: 4x4 square minus its 2x2 upper-right quadrant.
        let path = closed_path(
            &[
                (0.0, 0.0),
                (4.0, 0.0),
                (4.0, 2.0),
                (2.0, 2.0),
                (2.0, 4.0),
                (0.0, 4.0),
            ],
            0.0,
        );
        let mesh = FillWaterBody::new(&path).execute();
        assert_relative_eq!(total_area(&mesh), 12.0, epsilon = 1e-9);
    }

    #[test]
    fn clockwise_outline_fills_the_same() {
        let path = closed_path(&[(0.0, 0.0), (0.0, 3.0), (3.0, 3.0), (3.0, 0.0)], 0.0);
        let mesh = FillWaterBody::new(&path).execute();
        assert_relative_eq!(total_area(&mesh), 9.0, epsilon = 1e-9);
    }

    #[test]
    fn self_intersecting_outline_fills_both_loops() {
        // Bow tie: the diagonals cross at (2, 2).
        let path = closed_path(&[(0.0, 0.0), (4.0, 4.0), (4.0, 0.0), (0.0, 4.0)], 0.0);
        let mesh = FillWaterBody::new(&path).execute();
        assert!(!mesh.is_empty());
        assert_relative_eq!(total_area(&mesh), 8.0, epsilon = 1e-9);
        assert!(mesh
            .vertices
            .iter()
            .any(|p| (p.x - 2.0).abs() < 1e-9 && (p.z - 2.0).abs() < 1e-9));
        for i in 0..mesh.triangle_count() {
            assert!(mesh.face_normal(i).y > 0.99, "triangle {i} faces down");
        }
    }

    #[test]
    fn too_few_points_gives_empty_mesh() {
        let path = closed_path(&[(0.0, 0.0), (1.0, 0.0)], 0.0);
        assert!(FillWaterBody::new(&path).execute().is_empty());
        assert!(FillWaterBody::new(&Path::default()).execute().is_empty());
    }
}
