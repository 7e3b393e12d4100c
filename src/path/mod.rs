//! Point sequences to elevation-tagged 3D paths.

mod cleanup;
mod frame;

pub use cleanup::{cleanup_road_points, Cleanup};
pub use frame::{vertex_frames, VertexFrame};

use crate::math::bezier_2d::quadratic_point;
use crate::math::Point3;
use crate::model::{GroundPoint, PathPoint};

/// Default number of samples per curved segment.
pub const DEFAULT_CURVE_SEGMENTS: u32 = 10;

/// Start-to-end gap above which a closed path gets an explicit closing segment.
pub const CLOSING_TOLERANCE: f64 = 0.1;

/// An ordered 3D polyline at a fixed elevation (`y`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    pub points: Vec<Point3>,
    /// `true` for outlines of closed shapes; the last point then coincides
    /// with the first.
    pub closed: bool,
}

impl Path {
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Cumulative ground-plane arc length at each vertex.
    #[must_use]
    pub fn cumulative_lengths(&self) -> Vec<f64> {
        let mut lengths = Vec::with_capacity(self.points.len());
        let mut total = 0.0;
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                let prev = &self.points[i - 1];
                total += (p.x - prev.x).hypot(p.z - prev.z);
            }
            lengths.push(total);
        }
        lengths
    }

    /// Total ground-plane length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.cumulative_lengths().last().copied().unwrap_or(0.0)
    }
}

/// Builds a [`Path`] from user points, sampling quadratic curves.
///
/// Non-finite input produces an empty path; downstream stages treat an
/// empty or single-vertex path as "nothing to render".
#[derive(Debug)]
pub struct BuildPath<'a> {
    points: &'a [PathPoint],
    elevation: f64,
    curve_segments: u32,
    closed: bool,
}

impl<'a> BuildPath<'a> {
    #[must_use]
    pub fn new(points: &'a [PathPoint], elevation: f64) -> Self {
        Self {
            points,
            elevation,
            curve_segments: DEFAULT_CURVE_SEGMENTS,
            closed: false,
        }
    }

    /// Samples per curved segment; `0` is treated as `1`.
    #[must_use]
    pub fn curve_segments(mut self, segments: u32) -> Self {
        self.curve_segments = segments;
        self
    }

    /// Closes the outline back to the first point (needs at least 3 points).
    #[must_use]
    pub fn closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    /// Executes the subdivision.
    #[must_use]
    pub fn execute(&self) -> Path {
        if !self.elevation.is_finite() {
            tracing::warn!(
                elevation = self.elevation,
                "non-finite elevation, path dropped"
            );
            return Path::default();
        }
        if let Some(index) = self.points.iter().position(|p| !p.is_finite()) {
            tracing::warn!(index, "non-finite point, path dropped");
            return Path::default();
        }
        let Some(first) = self.points.first() else {
            return Path::default();
        };

        let mut out = Vec::with_capacity(self.points.len() * 2);
        out.push(self.lift(first.position()));
        for pair in self.points.windows(2) {
            self.append_segment(&mut out, &pair[0], pair[1].position());
        }

        let closed = self.closed && self.points.len() >= 3;
        if closed {
            let last = &self.points[self.points.len() - 1];
            if last.distance(first) > CLOSING_TOLERANCE {
                self.append_segment(&mut out, last, first.position());
            }
        }

        Path {
            points: out,
            closed,
        }
    }

    /// Appends the samples of `start → end`, excluding `start` itself.
    fn append_segment(&self, out: &mut Vec<Point3>, start: &PathPoint, end: GroundPoint) {
        let Some(control) = start.control_point else {
            out.push(self.lift(end));
            return;
        };

        let n = self.curve_segments.max(1);
        let p0 = start.position().to_point2();
        let c = control.to_point2();
        let p1 = end.to_point2();
        for j in 1..=n {
            let t = f64::from(j) / f64::from(n);
            out.push(self.lift(quadratic_point(&p0, &c, &p1, t).into()));
        }
    }

    fn lift(&self, p: GroundPoint) -> Point3 {
        Point3::new(p.x, self.elevation, p.z)
    }
}
