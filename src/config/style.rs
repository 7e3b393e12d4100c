use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::Variant;

use super::color::Color;

/// Default lateral placement of side lines, as a fraction of the half-width.
pub const DEFAULT_SIDE_LINE_RATIO: f64 = 0.9;

/// Visual parameters of one object variant.
///
/// Every marking section is optional; a missing section disables the feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualStyle {
    pub surface: SurfaceStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center_line: Option<CenterLineStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side_lines: Option<SideLineStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges: Option<EdgeStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curbs: Option<CurbStyle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceStyle {
    pub color: Color,
    #[serde(default = "opaque")]
    pub opacity: f32,
    #[serde(default)]
    pub roughness: f32,
}

fn opaque() -> f32 {
    1.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LinePattern {
    Solid,
    #[serde(rename_all = "camelCase")]
    Dashed { dash_length: f64, gap_length: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CenterLineStyle {
    pub color: Color,
    pub width: f64,
    pub pattern: LinePattern,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SideLineStyle {
    pub color: Color,
    pub width: f64,
    #[serde(default = "default_side_line_ratio")]
    pub offset_ratio: f64,
}

fn default_side_line_ratio() -> f64 {
    DEFAULT_SIDE_LINE_RATIO
}

/// Outline of walls and water bodies, lifted `offset` above the marking plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStyle {
    pub color: Color,
    pub width: f64,
    #[serde(default)]
    pub offset: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurbStyle {
    pub color: Color,
    pub width: f64,
    pub height: f64,
}

impl VisualStyle {
    /// A style with only a surface colour.
    #[must_use]
    pub fn plain(color: Color) -> Self {
        Self {
            surface: SurfaceStyle {
                color,
                opacity: 1.0,
                roughness: 0.8,
            },
            center_line: None,
            side_lines: None,
            edges: None,
            curbs: None,
        }
    }

    /// Checks numeric ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self, variant: Variant) -> Result<(), ConfigError> {
        let invalid = |field: &'static str, reason: String| ConfigError::InvalidValue {
            variant: variant.to_string(),
            field,
            reason,
        };
        let positive = |field: &'static str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(invalid(field, format!("{value} must be positive")))
            }
        };

        if !(0.0..=1.0).contains(&self.surface.opacity) {
            return Err(invalid(
                "surface.opacity",
                format!("{} outside [0, 1]", self.surface.opacity),
            ));
        }
        if let Some(line) = &self.center_line {
            positive("centerLine.width", line.width)?;
            if let LinePattern::Dashed {
                dash_length,
                gap_length,
            } = line.pattern
            {
                positive("centerLine.pattern.dashLength", dash_length)?;
                positive("centerLine.pattern.gapLength", gap_length)?;
            }
        }
        if let Some(side) = &self.side_lines {
            positive("sideLines.width", side.width)?;
            if !(side.offset_ratio > 0.0 && side.offset_ratio <= 1.0) {
                return Err(invalid(
                    "sideLines.offsetRatio",
                    format!("{} outside (0, 1]", side.offset_ratio),
                ));
            }
        }
        if let Some(edges) = &self.edges {
            positive("edges.width", edges.width)?;
            if !edges.offset.is_finite() {
                return Err(invalid("edges.offset", "must be finite".to_owned()));
            }
        }
        if let Some(curbs) = &self.curbs {
            positive("curbs.width", curbs.width)?;
            positive("curbs.height", curbs.height)?;
        }
        Ok(())
    }
}
