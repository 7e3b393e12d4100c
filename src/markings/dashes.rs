use crate::math::{Point3, Vector3, UP};
use crate::tessellation::TriangleMesh;

/// Lengths below this are treated as exhausted.
const EPS: f64 = 1e-9;

/// One painted span of a dashed line.
///
/// A dash that runs across a path vertex is reported as one record per
/// straight span it covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashSegment {
    pub start: Point3,
    pub end: Point3,
    pub length: f64,
    pub center: Point3,
    /// Heading in the ground plane, `atan2(dz, dx)`.
    pub angle: f64,
}

impl DashSegment {
    fn new(start: Point3, end: Point3) -> Self {
        let dx = end.x - start.x;
        let dz = end.z - start.z;
        Self {
            start,
            end,
            length: dx.hypot(dz),
            center: nalgebra::center(&start, &end),
            angle: dz.atan2(dx),
        }
    }
}

/// Walks `points` and emits dash records with a phase that carries over
/// from one segment to the next.
///
/// The line starts with a dash. Non-positive lengths yield no dashes.
#[must_use]
pub fn dashed_segments(points: &[Point3], dash_length: f64, gap_length: f64) -> Vec<DashSegment> {
    let mut dashes = Vec::new();
    if !(dash_length > 0.0 && gap_length > 0.0) {
        return dashes;
    }

    let mut in_dash = true;
    let mut progress = 0.0;
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let segment = b - a;
        let segment_length = segment.x.hypot(segment.z);
        if segment_length <= EPS {
            continue;
        }
        let direction = segment / segment_length;

        let mut consumed = 0.0;
        while segment_length - consumed > EPS {
            let budget = if in_dash { dash_length } else { gap_length };
            let step = (budget - progress).min(segment_length - consumed);
            if in_dash {
                dashes.push(DashSegment::new(
                    a + direction * consumed,
                    a + direction * (consumed + step),
                ));
            }
            consumed += step;
            progress += step;
            if progress >= budget - EPS {
                in_dash = !in_dash;
                progress = 0.0;
            }
        }
    }
    dashes
}

/// Builds one flat, upward-facing quad per dash.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn tessellate_dashes(dashes: &[DashSegment], line_width: f64) -> TriangleMesh {
    let mut mesh = TriangleMesh::default();
    let half = line_width * 0.5;
    for dash in dashes {
        let (sin, cos) = dash.angle.sin_cos();
        let side = Vector3::new(-sin, 0.0, cos) * half;
        let base = mesh.vertices.len() as u32;
        mesh.vertices.extend_from_slice(&[
            dash.start + side,
            dash.start - side,
            dash.end + side,
            dash.end - side,
        ]);
        mesh.uvs.extend_from_slice(&[
            [0.0, 0.0].into(),
            [1.0, 0.0].into(),
            [0.0, 1.0].into(),
            [1.0, 1.0].into(),
        ]);
        mesh.connect_rows(base, 2, 2, &[(0, 1)]);
    }
    mesh.normals = vec![UP; mesh.vertices.len()];
    mesh
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn line(points: &[(f64, f64)]) -> Vec<Point3> {
        points
            .iter()
            .map(|&(x, z)| Point3::new(x, 0.0, z))
            .collect()
    }

    fn total(dashes: &[DashSegment]) -> f64 {
        dashes.iter().map(|d| d.length).sum()
    }

    #[test]
    fn straight_line_pattern() {
        let dashes = dashed_segments(&line(&[(0.0, 0.0), (10.0, 0.0)]), 1.5, 0.8);
        let starts: Vec<f64> = dashes.iter().map(|d| d.start.x).collect();
        let expected = [0.0, 2.3, 4.6, 6.9, 9.2];
        assert_eq!(starts.len(), expected.len());
        for (s, e) in starts.iter().zip(expected) {
            assert_relative_eq!(*s, e, epsilon = 1e-9);
        }
        assert_relative_eq!(dashes[4].length, 0.8, epsilon = 1e-9);
        assert_relative_eq!(total(&dashes), 6.8, epsilon = 1e-9);
    }

    #[test]
    fn coverage_tracks_duty_cycle() {
        for length in [3.0, 17.5, 42.0, 100.0] {
            let dashes = dashed_segments(&line(&[(0.0, 0.0), (length, 0.0)]), 1.5, 0.8);
            let expected = length * 1.5 / 2.3;
            assert!((total(&dashes) - expected).abs() <= 2.3, "length {length}");
        }
    }

    #[test]
    fn phase_continues_across_vertices() {
        // The first dash straddles the corner at x = 1.
        let dashes = dashed_segments(&line(&[(0.0, 0.0), (1.0, 0.0), (1.0, 5.0)]), 1.5, 0.8);
        assert_relative_eq!(dashes[0].length, 1.0, epsilon = 1e-9);
        assert_relative_eq!(dashes[1].length, 0.5, epsilon = 1e-9);
        assert_relative_eq!(dashes[1].start.z, 0.0, epsilon = 1e-9);
        // Next dash starts after the 0.8 gap.
        assert_relative_eq!(dashes[2].start.z, 1.3, epsilon = 1e-9);
        assert_relative_eq!(dashes[1].angle, std::f64::consts::FRAC_PI_2, epsilon = 1e-9);
    }

    #[test]
    fn degenerate_inputs() {
        assert!(dashed_segments(&[], 1.5, 0.8).is_empty());
        let collapsed = line(&[(0.0, 0.0), (0.0, 0.0)]);
        assert!(dashed_segments(&collapsed, 1.5, 0.8).is_empty());
        let straight = line(&[(0.0, 0.0), (5.0, 0.0)]);
        assert!(dashed_segments(&straight, 0.0, 0.8).is_empty());
    }

    #[test]
    fn dash_quads_face_up() {
        let dashes = dashed_segments(&line(&[(0.0, 0.0), (3.0, 4.0)]), 1.0, 1.0);
        let mesh = tessellate_dashes(&dashes, 0.2);
        assert_eq!(mesh.triangle_count(), dashes.len() * 2);
        for i in 0..mesh.triangle_count() {
            assert!(mesh.face_normal(i).y > 0.99);
        }
        let area: f64 = (0..mesh.triangle_count()).map(|i| mesh.face_area(i)).sum();
        assert_relative_eq!(area, total(&dashes) * 0.2, epsilon = 1e-9);
    }
}
