use serde::{Deserialize, Serialize};

use crate::math::Point2;

/// A bare position on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GroundPoint {
    pub x: f64,
    pub z: f64,
}

impl GroundPoint {
    #[must_use]
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    /// Euclidean distance to `other` on the ground plane.
    #[must_use]
    pub fn distance(&self, other: &GroundPoint) -> f64 {
        (self.x - other.x).hypot(self.z - other.z)
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.z.is_finite()
    }

    #[must_use]
    pub fn to_point2(self) -> Point2 {
        Point2::new(self.x, self.z)
    }
}

impl From<Point2> for GroundPoint {
    fn from(p: Point2) -> Self {
        Self { x: p.x, z: p.y }
    }
}

/// A user-placed control point of a linear object.
///
/// `control_point`, when present, is the quadratic Bezier control point
/// steering the segment from this point to the *next* one.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathPoint {
    pub x: f64,
    pub z: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_point: Option<GroundPoint>,
}

impl PathPoint {
    /// Creates a point with a straight segment to the next point.
    #[must_use]
    pub fn new(x: f64, z: f64) -> Self {
        Self {
            x,
            z,
            control_point: None,
        }
    }

    /// Creates a point whose outgoing segment curves through `control`.
    #[must_use]
    pub fn curved(x: f64, z: f64, control: GroundPoint) -> Self {
        Self {
            x,
            z,
            control_point: Some(control),
        }
    }

    #[must_use]
    pub fn position(&self) -> GroundPoint {
        GroundPoint::new(self.x, self.z)
    }

    /// Ground-plane distance to another point, ignoring control points.
    #[must_use]
    pub fn distance(&self, other: &PathPoint) -> f64 {
        self.position().distance(&other.position())
    }

    /// Returns `true` when the position and the control point (if any) are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position().is_finite() && self.control_point.is_none_or(|c| c.is_finite())
    }
}

impl From<GroundPoint> for PathPoint {
    fn from(p: GroundPoint) -> Self {
        Self::new(p.x, p.z)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_host_shape() {
        let json = r#"[{"x":1,"z":2},{"x":3,"z":4,"controlPoint":{"x":5,"z":6}}]"#;
        let points: Vec<PathPoint> = serde_json::from_str(json).unwrap();
        assert_eq!(points[0], PathPoint::new(1.0, 2.0));
        assert_eq!(
            points[1].control_point,
            Some(GroundPoint::new(5.0, 6.0))
        );
    }

    #[test]
    fn straight_point_serializes_without_control() {
        let json = serde_json::to_string(&PathPoint::new(1.0, 2.0)).unwrap();
        assert!(!json.contains("controlPoint"));
    }

    #[test]
    fn non_finite_control_point_is_detected() {
        let p = PathPoint::curved(0.0, 0.0, GroundPoint::new(f64::NAN, 1.0));
        assert!(!p.is_finite());
        assert!(PathPoint::new(1.0, 1.0).is_finite());
    }
}
