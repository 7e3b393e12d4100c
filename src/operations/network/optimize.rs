use crate::config::Settings;
use crate::model::{GroundPoint, Junction, LinearObject, ObjectId, PathPoint};

/// Default fraction of a junction radius within which endpoints snap.
pub const DEFAULT_SNAP_RATIO: f64 = 0.5;

/// Snaps object endpoints onto the junctions they belong to.
///
/// An endpoint (first or last point) moves to a junction listing its object
/// when closer than `radius * snap_ratio`. When several junctions qualify
/// the nearest wins, ties going to the earlier junction. A snapped endpoint
/// loses its control point. Interior points and the inputs are untouched.
#[derive(Debug)]
pub struct OptimizeConnections<'a> {
    objects: &'a [LinearObject],
    junctions: &'a [Junction],
    snap_ratio: f64,
}

impl<'a> OptimizeConnections<'a> {
    #[must_use]
    pub fn new(objects: &'a [LinearObject], junctions: &'a [Junction]) -> Self {
        Self {
            objects,
            junctions,
            snap_ratio: DEFAULT_SNAP_RATIO,
        }
    }

    #[must_use]
    pub fn snap_ratio(mut self, snap_ratio: f64) -> Self {
        self.snap_ratio = snap_ratio;
        self
    }

    /// Takes the snap ratio from `settings`.
    #[must_use]
    pub fn with_settings(self, settings: &Settings) -> Self {
        self.snap_ratio(settings.snap_ratio)
    }

    /// Executes the optimization, returning adjusted copies of the objects.
    #[must_use]
    pub fn execute(&self) -> Vec<LinearObject> {
        let mut snapped = 0usize;
        let objects = self
            .objects
            .iter()
            .map(|object| {
                let mut object = object.clone();
                let Some(last) = object.points.len().checked_sub(1) else {
                    return object;
                };
                for index in [0, last] {
                    if let Some(target) =
                        self.snap_target(&object.id, object.points[index].position())
                    {
                        object.points[index] = PathPoint::from(target);
                        snapped += 1;
                    }
                }
                object
            })
            .collect();
        tracing::debug!(snapped, "optimized connections");
        objects
    }

    fn snap_target(&self, id: &ObjectId, point: GroundPoint) -> Option<GroundPoint> {
        let mut best: Option<(f64, GroundPoint)> = None;
        for junction in self.junctions.iter().filter(|j| j.connects(id)) {
            let distance = junction.position.distance(&point);
            if distance < junction.radius * self.snap_ratio
                && best.is_none_or(|(nearest, _)| distance < nearest)
            {
                best = Some((distance, junction.position));
            }
        }
        best.map(|(_, position)| position)
    }
}
