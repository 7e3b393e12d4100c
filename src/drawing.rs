//! The in-progress drawing gesture as an immutable value.

use crate::config::Settings;
use crate::error::Result;
use crate::model::{LinearObject, ObjectId, PathPoint, Variant};

/// Default window within which a second click finishes the drawing.
pub const DEFAULT_DOUBLE_CLICK_MS: u64 = 300;

/// Input events of a drawing gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawingAction {
    /// Picks the variant to draw and starts over.
    SelectTool(Variant),
    /// A click on the (already snapped) ground position at time `at_ms`.
    AddPoint { point: PathPoint, at_ms: u64 },
    UndoPoint,
    Finish,
    /// Drops the points; the tool stays selected.
    Cancel,
}

/// A completed drawing, ready to become a scene object.
#[derive(Debug, Clone, PartialEq)]
pub struct FinishedDrawing {
    pub variant: Variant,
    pub points: Vec<PathPoint>,
}

impl FinishedDrawing {
    /// Creates the scene object.
    ///
    /// # Errors
    ///
    /// Returns a model error if the dimensions are invalid.
    pub fn into_object(
        self,
        id: ObjectId,
        width: f64,
        elevation: f64,
        thickness: f64,
    ) -> Result<LinearObject> {
        LinearObject::new(id, self.variant, self.points, width, elevation, thickness)
    }
}

/// Result of applying one action.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub session: DrawingSession,
    /// Set when the action completed a drawing with enough points.
    pub finished: Option<FinishedDrawing>,
}

impl Transition {
    fn to(session: DrawingSession) -> Self {
        Self {
            session,
            finished: None,
        }
    }
}

/// Current tool, accumulated points and last click time.
///
/// Sessions are never mutated; [`DrawingSession::apply`] returns the next
/// one.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingSession {
    tool: Option<Variant>,
    points: Vec<PathPoint>,
    last_click_ms: Option<u64>,
    double_click_ms: u64,
}

impl Default for DrawingSession {
    fn default() -> Self {
        Self::new(DEFAULT_DOUBLE_CLICK_MS)
    }
}

impl DrawingSession {
    #[must_use]
    pub fn new(double_click_ms: u64) -> Self {
        Self {
            tool: None,
            points: Vec::new(),
            last_click_ms: None,
            double_click_ms,
        }
    }

    /// Creates a session using the double-click window from `settings`.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.double_click_ms)
    }

    #[must_use]
    pub fn tool(&self) -> Option<Variant> {
        self.tool
    }

    #[must_use]
    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        !self.points.is_empty()
    }

    /// Applies `action`, returning the next session.
    ///
    /// A click arriving within the double-click window of the previous one
    /// finishes the drawing instead of adding a point. Finishing with fewer
    /// points than the variant needs discards the drawing.
    #[must_use]
    pub fn apply(&self, action: DrawingAction) -> Transition {
        match action {
            DrawingAction::SelectTool(variant) => Transition::to(Self {
                tool: Some(variant),
                ..self.cleared()
            }),
            DrawingAction::AddPoint { point, at_ms } => {
                if self.tool.is_none() {
                    return Transition::to(self.clone());
                }
                let double_click = self
                    .last_click_ms
                    .and_then(|last| at_ms.checked_sub(last))
                    .is_some_and(|dt| dt < self.double_click_ms);
                if double_click {
                    return self.finish();
                }
                let mut points = self.points.clone();
                points.push(point);
                Transition::to(Self {
                    points,
                    last_click_ms: Some(at_ms),
                    ..self.clone()
                })
            }
            DrawingAction::UndoPoint => {
                let mut points = self.points.clone();
                points.pop();
                Transition::to(Self {
                    points,
                    last_click_ms: None,
                    ..self.clone()
                })
            }
            DrawingAction::Finish => self.finish(),
            DrawingAction::Cancel => Transition::to(self.cleared()),
        }
    }

    /// The drawing so far as a preview object with [`ObjectId::drawing`].
    ///
    /// `None` without a tool or points, or when the dimensions are invalid.
    #[must_use]
    pub fn preview(&self, width: f64, elevation: f64, thickness: f64) -> Option<LinearObject> {
        let variant = self.tool?;
        if self.points.is_empty() {
            return None;
        }
        match LinearObject::new(
            ObjectId::drawing(),
            variant,
            self.points.clone(),
            width,
            elevation,
            thickness,
        ) {
            Ok(object) => Some(object),
            Err(e) => {
                tracing::warn!(error = %e, "drawing preview rejected");
                None
            }
        }
    }

    fn finish(&self) -> Transition {
        let session = self.cleared();
        let Some(variant) = self.tool else {
            return Transition::to(session);
        };
        if self.points.len() < variant.min_points() {
            tracing::debug!(
                variant = %variant,
                points = self.points.len(),
                "discarded short drawing"
            );
            return Transition::to(session);
        }
        Transition {
            session,
            finished: Some(FinishedDrawing {
                variant,
                points: self.points.clone(),
            }),
        }
    }

    fn cleared(&self) -> Self {
        Self {
            tool: self.tool,
            ..Self::new(self.double_click_ms)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{RoadVariant, WallVariant, WaterVariant};

    const ROAD: Variant = Variant::Road(RoadVariant::Asphalt);

    fn click(x: f64, z: f64, at_ms: u64) -> DrawingAction {
        DrawingAction::AddPoint {
            point: PathPoint::new(x, z),
            at_ms,
        }
    }

    fn run(actions: &[DrawingAction]) -> Vec<Transition> {
        let mut session = DrawingSession::default();
        let mut out = Vec::new();
        for &action in actions {
            let t = session.apply(action);
            session = t.session.clone();
            out.push(t);
        }
        out
    }

    #[test]
    fn clicks_accumulate_points() {
        let steps = run(&[
            DrawingAction::SelectTool(ROAD),
            click(0.0, 0.0, 0),
            click(5.0, 0.0, 1000),
        ]);
        let last = &steps[2].session;
        assert_eq!(last.points().len(), 2);
        assert!(steps.iter().all(|t| t.finished.is_none()));
    }

    #[test]
    fn apply_leaves_the_original_untouched() {
        let session = DrawingSession::default()
            .apply(DrawingAction::SelectTool(ROAD))
            .session;
        let next = session.apply(click(1.0, 1.0, 0)).session;
        assert!(session.points().is_empty());
        assert_eq!(next.points().len(), 1);
    }

    #[test]
    fn double_click_finishes() {
        let steps = run(&[
            DrawingAction::SelectTool(ROAD),
            click(0.0, 0.0, 0),
            click(5.0, 0.0, 1000),
            click(5.0, 0.0, 1200),
        ]);
        let done = steps[3].finished.as_ref().unwrap();
        assert_eq!(done.variant, ROAD);
        assert_eq!(done.points.len(), 2);
        assert!(!steps[3].session.is_drawing());
        assert_eq!(steps[3].session.tool(), Some(ROAD));
    }

    #[test]
    fn slow_second_click_adds_a_point() {
        let steps = run(&[
            DrawingAction::SelectTool(ROAD),
            click(0.0, 0.0, 0),
            click(5.0, 0.0, 300),
        ]);
        assert_eq!(steps[2].session.points().len(), 2);
    }

    #[test]
    fn short_road_is_discarded() {
        let steps = run(&[
            DrawingAction::SelectTool(ROAD),
            click(0.0, 0.0, 0),
            DrawingAction::Finish,
        ]);
        assert!(steps[2].finished.is_none());
        assert!(!steps[2].session.is_drawing());
    }

    #[test]
    fn single_point_water_finishes() {
        let pond = Variant::Water(WaterVariant::Pond);
        let steps = run(&[
            DrawingAction::SelectTool(pond),
            click(2.0, 2.0, 0),
            click(2.0, 2.0, 100),
        ]);
        let done = steps[2].finished.clone().unwrap();
        assert_eq!(done.points, vec![PathPoint::new(2.0, 2.0)]);
        let object = done
            .into_object(ObjectId::new("pond-1"), 4.0, 0.0, 0.0)
            .unwrap();
        assert_eq!(object.points.len(), 1);
    }

    #[test]
    fn undo_and_cancel() {
        let steps = run(&[
            DrawingAction::SelectTool(Variant::Wall(WallVariant::Fence)),
            click(0.0, 0.0, 0),
            click(1.0, 0.0, 1000),
            DrawingAction::UndoPoint,
            // Would be a double click without the undo in between.
            click(2.0, 0.0, 1100),
            DrawingAction::Cancel,
        ]);
        assert_eq!(steps[3].session.points().len(), 1);
        assert_eq!(steps[4].session.points().len(), 2);
        assert!(steps[4].finished.is_none());
        assert!(!steps[5].session.is_drawing());
    }

    #[test]
    fn double_click_window_comes_from_settings() {
        let settings = Settings {
            double_click_ms: 100,
            ..Settings::default()
        };
        let session = DrawingSession::from_settings(&settings)
            .apply(DrawingAction::SelectTool(ROAD))
            .session;
        let session = session.apply(click(0.0, 0.0, 0)).session;
        let t = session.apply(click(1.0, 0.0, 150));
        assert!(t.finished.is_none());
        assert_eq!(t.session.points().len(), 2);
        assert!(t.session.apply(click(1.0, 0.0, 200)).finished.is_some());
    }

    #[test]
    fn clicks_without_tool_are_ignored() {
        let steps = run(&[click(0.0, 0.0, 0)]);
        assert!(!steps[0].session.is_drawing());
    }

    #[test]
    fn preview_uses_sentinel_id() {
        let session = run(&[DrawingAction::SelectTool(ROAD), click(0.0, 0.0, 0)])
            .pop()
            .unwrap()
            .session;
        let preview = session.preview(6.0, 0.0, 0.2).unwrap();
        assert!(preview.id.is_drawing());
        assert!(session.preview(-1.0, 0.0, 0.2).is_none());
        assert!(DrawingSession::default().preview(6.0, 0.0, 0.2).is_none());
    }
}
