use serde::{Deserialize, Serialize};

use crate::drawing::DEFAULT_DOUBLE_CLICK_MS;
use crate::error::{ConfigError, Result};
use crate::operations::network::{DEFAULT_JUNCTION_TOLERANCE, DEFAULT_SNAP_RATIO};
use crate::path::DEFAULT_CURVE_SEGMENTS;
use crate::tessellation::DEFAULT_DISC_SEGMENTS;

/// Numeric knobs of the geometry pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Samples per quadratic curve segment.
    pub curve_segments: u32,
    /// Distance within which intersection points merge into one junction.
    pub junction_tolerance: f64,
    /// Distance below which consecutive road points are merged.
    pub cleanup_tolerance: f64,
    /// Fraction of a junction radius within which endpoints snap.
    pub snap_ratio: f64,
    /// Fan segments of water discs and junction overlays.
    pub disc_segments: u32,
    /// Two clicks closer than this finish a drawing.
    pub double_click_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            curve_segments: DEFAULT_CURVE_SEGMENTS,
            junction_tolerance: DEFAULT_JUNCTION_TOLERANCE,
            cleanup_tolerance: 0.1,
            snap_ratio: DEFAULT_SNAP_RATIO,
            disc_segments: DEFAULT_DISC_SEGMENTS,
            double_click_ms: DEFAULT_DOUBLE_CLICK_MS,
        }
    }
}

impl Settings {
    /// Loads settings from JSON; missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::InvalidValue`] for negative tolerances or ratios.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json).map_err(ConfigError::from)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks numeric ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let checks = [
            ("junctionTolerance", self.junction_tolerance),
            ("cleanupTolerance", self.cleanup_tolerance),
            ("snapRatio", self.snap_ratio),
        ];
        for (field, value) in checks {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidValue {
                    variant: "settings".to_owned(),
                    field,
                    reason: format!("{value} must be a non-negative number"),
                });
            }
        }
        Ok(())
    }
}
