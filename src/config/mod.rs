//! Visual configuration table and pipeline settings.

mod color;
mod settings;
mod style;

use std::collections::BTreeMap;

pub use color::Color;
pub use settings::Settings;
pub use style::{
    CenterLineStyle, CurbStyle, EdgeStyle, LinePattern, SideLineStyle, SurfaceStyle, VisualStyle,
    DEFAULT_SIDE_LINE_RATIO,
};

use crate::error::{ConfigError, Result};
use crate::model::{RoadVariant, Variant, WallVariant, WaterVariant};

/// Per-variant visual styles.
///
/// Holds exactly one validated style for every [`Variant`], so
/// [`VisualConfig::style`] cannot miss.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualConfig {
    /// Indexed by [`Variant::index`].
    styles: Vec<VisualStyle>,
}

impl VisualConfig {
    /// Loads a table shaped `{ "road": { "asphalt": {...}, ... }, ... }`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, a model error for
    /// unknown type or variant names, [`ConfigError::InvalidValue`] for
    /// out-of-range values and [`ConfigError::MissingVariant`] when a variant
    /// has no style.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, BTreeMap<String, VisualStyle>> =
            serde_json::from_str(json).map_err(ConfigError::from)?;

        let mut slots: Vec<Option<VisualStyle>> = vec![None; Variant::ALL.len()];
        for (object_type, variants) in raw {
            for (name, style) in variants {
                let variant = Variant::parse(&object_type, &name)?;
                style.validate(variant)?;
                slots[variant.index()] = Some(style);
            }
        }

        let styles = Variant::ALL
            .iter()
            .zip(slots)
            .map(|(variant, slot)| {
                slot.ok_or_else(|| ConfigError::MissingVariant(variant.to_string()))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        tracing::debug!(variants = styles.len(), "loaded visual configuration");
        Ok(Self { styles })
    }

    /// Serializes the table in the shape accepted by [`VisualConfig::from_json`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        let mut raw: BTreeMap<&str, BTreeMap<&str, &VisualStyle>> = BTreeMap::new();
        for variant in Variant::ALL {
            raw.entry(variant.object_type().as_str())
                .or_default()
                .insert(variant.name(), self.style(variant));
        }
        let json = serde_json::to_string_pretty(&raw);
        Ok(json.map_err(ConfigError::from)?)
    }

    /// The style of `variant`.
    #[must_use]
    pub fn style(&self, variant: Variant) -> &VisualStyle {
        &self.styles[variant.index()]
    }

    /// Replaces the style of one variant.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `style` fails validation.
    pub fn with_style(mut self, variant: Variant, style: VisualStyle) -> Result<Self> {
        style.validate(variant)?;
        self.styles[variant.index()] = style;
        Ok(self)
    }

    /// The built-in table shipped with the editor.
    #[must_use]
    pub fn builtin() -> Self {
        let styles = Variant::ALL.iter().map(|&v| builtin_style(v)).collect();
        Self { styles }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
const YELLOW: Color = Color::rgb(0xf5, 0xc5, 0x18);
const CURB_GREY: Color = Color::rgb(0x9a, 0x9a, 0x9a);

fn dashed(color: Color, width: f64, dash_length: f64, gap_length: f64) -> CenterLineStyle {
    CenterLineStyle {
        color,
        width,
        pattern: LinePattern::Dashed {
            dash_length,
            gap_length,
        },
    }
}

fn side_lines(width: f64) -> SideLineStyle {
    SideLineStyle {
        color: WHITE,
        width,
        offset_ratio: DEFAULT_SIDE_LINE_RATIO,
    }
}

fn edges(color: Color, offset: f64) -> EdgeStyle {
    EdgeStyle {
        color,
        width: 0.05,
        offset,
    }
}

fn builtin_style(variant: Variant) -> VisualStyle {
    match variant {
        Variant::Road(RoadVariant::Asphalt) => VisualStyle {
            center_line: Some(dashed(WHITE, 0.15, 1.5, 0.8)),
            side_lines: Some(side_lines(0.12)),
            curbs: Some(CurbStyle {
                color: CURB_GREY,
                width: 0.3,
                height: 0.15,
            }),
            ..VisualStyle::plain(Color::rgb(0x33, 0x33, 0x33))
        },
        Variant::Road(RoadVariant::Highway) => VisualStyle {
            center_line: Some(CenterLineStyle {
                color: YELLOW,
                width: 0.2,
                pattern: LinePattern::Solid,
            }),
            side_lines: Some(side_lines(0.15)),
            ..VisualStyle::plain(Color::rgb(0x2b, 0x2b, 0x2b))
        },
        Variant::Road(RoadVariant::Residential) => VisualStyle {
            center_line: Some(dashed(WHITE, 0.12, 1.0, 1.0)),
            curbs: Some(CurbStyle {
                color: CURB_GREY,
                width: 0.25,
                height: 0.12,
            }),
            ..VisualStyle::plain(Color::rgb(0x44, 0x44, 0x44))
        },
        Variant::Road(RoadVariant::Dirt) => VisualStyle::plain(Color::rgb(0x8b, 0x6b, 0x3d)),
        Variant::Wall(WallVariant::Brick) => VisualStyle {
            edges: Some(edges(Color::rgb(0x6e, 0x2c, 0x1f), 0.0)),
            ..VisualStyle::plain(Color::rgb(0xa0, 0x44, 0x2c))
        },
        Variant::Wall(WallVariant::Stone) => VisualStyle {
            edges: Some(edges(Color::rgb(0x5a, 0x5a, 0x5a), 0.0)),
            ..VisualStyle::plain(Color::rgb(0x8a, 0x8a, 0x85))
        },
        Variant::Wall(WallVariant::Fence) => VisualStyle::plain(Color::rgb(0x9c, 0x7a, 0x4f)),
        Variant::Wall(WallVariant::Hedge) => VisualStyle::plain(Color::rgb(0x2f, 0x6b, 0x2a)),
        Variant::Water(WaterVariant::River) => VisualStyle {
            surface: SurfaceStyle {
                color: Color::rgb(0x2a, 0x6f, 0xb5),
                opacity: 0.8,
                roughness: 0.1,
            },
            edges: Some(edges(Color::rgb(0xc2, 0xb2, 0x80), 0.005)),
            ..VisualStyle::plain(WHITE)
        },
        Variant::Water(WaterVariant::Canal) => VisualStyle {
            surface: SurfaceStyle {
                color: Color::rgb(0x2f, 0x5f, 0x8f),
                opacity: 0.85,
                roughness: 0.1,
            },
            edges: Some(edges(Color::rgb(0x8a, 0x8a, 0x85), 0.005)),
            ..VisualStyle::plain(WHITE)
        },
        Variant::Water(WaterVariant::Lake | WaterVariant::Pond) => VisualStyle {
            surface: SurfaceStyle {
                color: Color::rgb(0x1e, 0x5a, 0x9c),
                opacity: 0.75,
                roughness: 0.05,
            },
            edges: Some(edges(Color::rgb(0xc2, 0xb2, 0x80), 0.005)),
            ..VisualStyle::plain(WHITE)
        },
    }
}
