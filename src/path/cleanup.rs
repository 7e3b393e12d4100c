use std::borrow::Cow;

use crate::model::PathPoint;

/// Result of [`cleanup_road_points`].
///
/// Borrows the input untouched when nothing had to be removed.
#[derive(Debug, Clone)]
pub struct Cleanup<'a> {
    points: Cow<'a, [PathPoint]>,
    removed: usize,
}

impl<'a> Cleanup<'a> {
    #[must_use]
    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    /// Number of points dropped.
    #[must_use]
    pub fn removed(&self) -> usize {
        self.removed
    }

    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.removed == 0
    }

    #[must_use]
    pub fn into_points(self) -> Cow<'a, [PathPoint]> {
        self.points
    }
}

/// Drops points lying within `tolerance` of the previously kept point.
///
/// The first point is always kept. Running the cleanup twice with the same
/// tolerance removes nothing the second time.
#[must_use]
pub fn cleanup_road_points(points: &[PathPoint], tolerance: f64) -> Cleanup<'_> {
    let Some((first, rest)) = points.split_first() else {
        return Cleanup {
            points: Cow::Borrowed(points),
            removed: 0,
        };
    };

    let mut kept = Vec::with_capacity(points.len());
    kept.push(*first);
    let mut last = *first;
    for p in rest {
        if p.distance(&last) > tolerance {
            kept.push(*p);
            last = *p;
        }
    }

    let removed = points.len() - kept.len();
    if removed == 0 {
        return Cleanup {
            points: Cow::Borrowed(points),
            removed,
        };
    }
    tracing::debug!(removed, kept = kept.len(), "removed near-coincident points");
    Cleanup {
        points: Cow::Owned(kept),
        removed,
    }
}
