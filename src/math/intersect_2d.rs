use super::{Point2, Vector2, TOLERANCE};

/// Bounded segment-segment intersection in the ground plane.
///
/// Returns `(intersection_point, t, u)` where `t` and `u` are the parameters
/// along `a0 → a1` and `b0 → b1`, both in `[0, 1]`. Parallel segments
/// (`|det| < TOLERANCE`) never intersect, collinear overlaps included.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;

    let det = cross(&da, &db);
    if det.abs() < TOLERANCE {
        return None;
    }

    let d = b0 - a0;
    let t = cross(&d, &db) / det;
    let u = cross(&d, &da) / det;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some((a0 + da * t, t, u))
    } else {
        None
    }
}

/// Acute angle in radians (`[0, π/2]`) between the lines carrying two
/// direction vectors. Zero-length input yields `0`.
#[must_use]
pub fn acute_angle_between(a: &Vector2, b: &Vector2) -> f64 {
    let la = a.norm();
    let lb = b.norm();
    if la < TOLERANCE || lb < TOLERANCE {
        return 0.0;
    }
    let cos = (a.dot(b) / (la * lb)).abs().min(1.0);
    cos.acos()
}

/// 2D cross product (z component of the 3D cross product).
fn cross(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}
