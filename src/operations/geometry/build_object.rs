use crate::config::{Settings, VisualStyle};
use crate::markings::{GenerateMarkings, Markings, ObjectDims};
use crate::model::{LinearObject, PathPoint, Variant};
use crate::path::{cleanup_road_points, BuildPath, Path};
use crate::tessellation::{
    CrossSection, ExtrudeRibbon, ExtrudeWall, FillWaterBody, TessellateDisc, TriangleMesh,
};

/// Renderable output for one scene object.
#[derive(Debug, Clone, Default)]
pub struct ObjectGeometry {
    /// The flattened centre path the surface was built from.
    pub path: Path,
    pub surface: TriangleMesh,
    pub markings: Markings,
}

impl ObjectGeometry {
    /// Returns `true` when there is nothing to render.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.surface.is_empty() && self.markings.is_empty()
    }
}

/// Builds the surface mesh and markings of a linear object.
///
/// Roads become a slab (or a flat ribbon when `thickness` is zero), walls a
/// chain of boxes and water a flat ribbon, a filled outline (lakes, ponds)
/// or a disc when only one point was placed.
#[derive(Debug)]
pub struct BuildObjectGeometry<'a> {
    object: &'a LinearObject,
    style: &'a VisualStyle,
    settings: &'a Settings,
}

impl<'a> BuildObjectGeometry<'a> {
    #[must_use]
    pub fn new(object: &'a LinearObject, style: &'a VisualStyle, settings: &'a Settings) -> Self {
        Self {
            object,
            style,
            settings,
        }
    }

    /// Executes the build. Degenerate input yields empty geometry.
    #[must_use]
    pub fn execute(&self) -> ObjectGeometry {
        let object = self.object;
        let section = CrossSection::new(object.width, object.thickness);
        let points = object.points.as_slice();

        let (path, surface) = match object.variant {
            Variant::Road(_) => {
                let cleanup = cleanup_road_points(points, self.settings.cleanup_tolerance);
                if !cleanup.is_unchanged() {
                    tracing::debug!(
                        id = %object.id,
                        removed = cleanup.removed(),
                        "cleaned road points"
                    );
                }
                let path = self.path_of(cleanup.points(), false);
                let surface = ExtrudeRibbon::new(&path, section).execute();
                (path, surface)
            }
            Variant::Wall(_) => {
                let path = self.path_of(points, false);
                let surface = ExtrudeWall::new(&path, section).execute();
                (path, surface)
            }
            Variant::Water(_) if points.len() == 1 => {
                let path = self.path_of(points, false);
                let surface = TessellateDisc::new(
                    points[0].position().to_point2(),
                    object.half_width(),
                    object.elevation,
                )
                .segments(self.settings.disc_segments)
                .execute();
                (path, surface)
            }
            Variant::Water(_) if object.variant.is_closed_body() && points.len() >= 3 => {
                let path = self.path_of(points, true);
                let surface = FillWaterBody::new(&path).execute();
                (path, surface)
            }
            Variant::Water(_) => {
                let path = self.path_of(points, false);
                let flat = CrossSection::new(object.width, 0.0);
                let surface = ExtrudeRibbon::new(&path, flat).execute();
                (path, surface)
            }
        };

        let dims = ObjectDims::of(object);
        let markings = GenerateMarkings::new(&path, self.style, dims).execute();

        tracing::debug!(
            id = %object.id,
            variant = %object.variant,
            path_points = path.len(),
            triangles = surface.triangle_count(),
            "built object geometry"
        );
        ObjectGeometry {
            path,
            surface,
            markings,
        }
    }

    fn path_of(&self, points: &[PathPoint], closed: bool) -> Path {
        BuildPath::new(points, self.object.elevation)
            .curve_segments(self.settings.curve_segments)
            .closed(closed)
            .execute()
    }
}
