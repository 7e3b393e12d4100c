use crate::math::{normalize_or_zero, Point3, Vector3};

/// Below this length the averaged neighbour direction is considered
/// unreliable (near-antiparallel neighbours).
const SHARP_TURN_THRESHOLD: f64 = 0.1;

/// Ground-plane direction and perpendicular at a path vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexFrame {
    pub direction: Vector3,
    /// `(-direction.z, 0, direction.x)`; "left" of the direction of travel.
    pub perpendicular: Vector3,
}

impl VertexFrame {
    fn from_direction(direction: Vector3) -> Self {
        let perpendicular = normalize_or_zero(Vector3::new(-direction.z, 0.0, direction.x));
        Self {
            direction,
            perpendicular,
        }
    }

    /// Offsets `p` sideways by `distance` along the perpendicular.
    #[must_use]
    pub fn offset(&self, p: &Point3, distance: f64) -> Point3 {
        p + self.perpendicular * distance
    }
}

/// Computes one frame per path vertex.
///
/// Endpoints of an open path follow their single segment; interior vertices
/// average the normalized incoming and outgoing directions, falling back to
/// the chord `p[i-1] → p[i+1]` at sharp switchbacks. On a `closed` path
/// (last point repeating the first) the seam vertices bisect across the
/// seam, so both ends get the same frame. Zero-length segments yield zero
/// vectors rather than NaN.
#[must_use]
pub fn vertex_frames(points: &[Point3], closed: bool) -> Vec<VertexFrame> {
    let n = points.len();
    (0..n)
        .map(|i| vertex_direction(points, i, closed))
        .map(VertexFrame::from_direction)
        .collect()
}

fn vertex_direction(points: &[Point3], i: usize, closed: bool) -> Vector3 {
    let n = points.len();
    if n < 2 {
        return Vector3::zeros();
    }
    let seam = i == 0 || i == n - 1;
    if seam && closed && n >= 4 {
        return bisector(&points[n - 2], &points[i], &points[1]);
    }
    if i == 0 {
        return flat_direction(&points[0], &points[1]);
    }
    if i == n - 1 {
        return flat_direction(&points[n - 2], &points[n - 1]);
    }
    bisector(&points[i - 1], &points[i], &points[i + 1])
}

fn bisector(before: &Point3, at: &Point3, after: &Point3) -> Vector3 {
    let prev = flat_direction(before, at);
    let next = flat_direction(at, after);
    let sum = prev + next;
    if sum.norm() < SHARP_TURN_THRESHOLD {
        let chord = flat_direction(before, after);
        if chord == Vector3::zeros() {
            // Exact reversal onto the previous point.
            return prev;
        }
        return chord;
    }
    normalize_or_zero(sum)
}

/// Normalized `a → b` projected onto the ground plane.
fn flat_direction(a: &Point3, b: &Point3) -> Vector3 {
    normalize_or_zero(Vector3::new(b.x - a.x, 0.0, b.z - a.z))
}
