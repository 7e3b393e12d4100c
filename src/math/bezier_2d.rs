use super::Point2;

/// Evaluates the quadratic Bezier `(1-t)²·p0 + 2(1-t)t·control + t²·p1`.
///
/// `t = 0` reproduces `p0` and `t = 1` reproduces `p1` exactly.
#[must_use]
pub fn quadratic_point(p0: &Point2, control: &Point2, p1: &Point2, t: f64) -> Point2 {
    let s = 1.0 - t;
    let a = s * s;
    let b = 2.0 * s * t;
    let c = t * t;
    Point2::new(
        a * p0.x + b * control.x + c * p1.x,
        a * p0.y + b * control.y + c * p1.y,
    )
}
