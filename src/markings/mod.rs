//! Decorative markings laid over roads, walls and water.

mod curbs;
mod dashes;

pub use dashes::{dashed_segments, tessellate_dashes, DashSegment};

use crate::config::{LinePattern, VisualStyle};
use crate::math::Point3;
use crate::model::{LinearObject, ObjectType};
use crate::path::{vertex_frames, Path};
use crate::tessellation::{Polyline, TriangleMesh};

/// Lift of road markings above the road surface.
pub const ROAD_MARKING_LIFT: f64 = 0.02;
/// Lift of wall markings above the wall top.
pub const WALL_MARKING_LIFT: f64 = 0.05;
/// Depth of water markings below the (transparent) water surface.
pub const WATER_MARKING_DEPTH: f64 = 0.01;

/// Dimensions of the object being marked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectDims {
    pub object_type: ObjectType,
    pub width: f64,
    pub elevation: f64,
    pub thickness: f64,
}

impl ObjectDims {
    #[must_use]
    pub fn of(object: &LinearObject) -> Self {
        Self {
            object_type: object.object_type(),
            width: object.width,
            elevation: object.elevation,
            thickness: object.thickness,
        }
    }

    /// Height at which markings are drawn to avoid z-fighting with the
    /// object surface.
    #[must_use]
    pub fn marking_elevation(&self) -> f64 {
        match self.object_type {
            ObjectType::Road => self.elevation + self.thickness + ROAD_MARKING_LIFT,
            ObjectType::Wall => self.elevation + self.thickness + WALL_MARKING_LIFT,
            ObjectType::Water => self.elevation - WATER_MARKING_DEPTH,
            ObjectType::Building | ObjectType::Tree => self.elevation + self.thickness,
        }
    }
}

/// A centre line, either continuous or broken into dashes.
#[derive(Debug, Clone, PartialEq)]
pub enum CenterLine {
    Solid(Polyline),
    Dashed(Vec<DashSegment>),
}

/// A pair of lines running on either side of the path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinePair {
    pub left: Polyline,
    pub right: Polyline,
}

/// Everything [`GenerateMarkings`] produces. Disabled features are `None`.
#[derive(Debug, Clone, Default)]
pub struct Markings {
    pub elevation: f64,
    pub center_line: Option<CenterLine>,
    pub side_lines: Option<LinePair>,
    pub curbs: Option<TriangleMesh>,
    pub edges: Option<LinePair>,
}

impl Markings {
    /// Returns `true` when no marking was generated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.center_line.is_none()
            && self.side_lines.is_none()
            && self.curbs.is_none()
            && self.edges.is_none()
    }
}

/// Generates the markings configured by a [`VisualStyle`] along a path.
#[derive(Debug)]
pub struct GenerateMarkings<'a> {
    path: &'a Path,
    style: &'a VisualStyle,
    dims: ObjectDims,
}

impl<'a> GenerateMarkings<'a> {
    #[must_use]
    pub fn new(path: &'a Path, style: &'a VisualStyle, dims: ObjectDims) -> Self {
        Self { path, style, dims }
    }

    /// Executes the generation. Paths with fewer than 2 points get no
    /// markings.
    #[must_use]
    pub fn execute(&self) -> Markings {
        let elevation = self.dims.marking_elevation();
        let mut markings = Markings {
            elevation,
            ..Markings::default()
        };
        if self.path.len() < 2 {
            return markings;
        }

        let half_width = self.dims.width * 0.5;
        let center = self.at_height(elevation);

        markings.center_line = self.style.center_line.map(|line| match line.pattern {
            LinePattern::Solid => CenterLine::Solid(Polyline {
                points: center.clone(),
            }),
            LinePattern::Dashed {
                dash_length,
                gap_length,
            } => CenterLine::Dashed(dashed_segments(&center, dash_length, gap_length)),
        });

        markings.side_lines = self.style.side_lines.map(|side| {
            offset_pair(&center, self.path.closed, side.offset_ratio * half_width)
        });

        markings.curbs = self.style.curbs.map(|curb| {
            curbs::curb_mesh(self.path, half_width, self.dims.thickness, &curb)
        });

        markings.edges = self.style.edges.map(|edges| {
            offset_pair(
                &self.at_height(elevation + edges.offset),
                self.path.closed,
                half_width,
            )
        });

        tracing::debug!(
            object_type = %self.dims.object_type,
            center_line = markings.center_line.is_some(),
            side_lines = markings.side_lines.is_some(),
            curbs = markings.curbs.is_some(),
            edges = markings.edges.is_some(),
            "generated markings"
        );
        markings
    }

    fn at_height(&self, y: f64) -> Vec<Point3> {
        self.path
            .points
            .iter()
            .map(|p| Point3::new(p.x, y, p.z))
            .collect()
    }
}

fn offset_pair(points: &[Point3], closed: bool, distance: f64) -> LinePair {
    let frames = vertex_frames(points, closed);
    let offset = |d: f64| Polyline {
        points: points
            .iter()
            .zip(&frames)
            .map(|(p, f)| f.offset(p, d))
            .collect(),
    };
    LinePair {
        left: offset(distance),
        right: offset(-distance),
    }
}
