use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

use super::point::PathPoint;

/// Object categories placed in the city scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Road,
    Wall,
    Water,
    Building,
    Tree,
}

impl ObjectType {
    /// Returns `true` when segments of the two types can form a junction.
    ///
    /// Roads meet everything linear, walls meet roads and walls, water meets
    /// roads and water. Buildings and trees never participate.
    #[must_use]
    pub fn connects_with(self, other: ObjectType) -> bool {
        use ObjectType::{Road, Wall, Water};
        matches!(
            (self, other),
            (Road, Road | Wall | Water) | (Wall, Road | Wall) | (Water, Road | Water)
        )
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectType::Road => "road",
            ObjectType::Wall => "wall",
            ObjectType::Water => "water",
            ObjectType::Building => "building",
            ObjectType::Tree => "tree",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoadVariant {
    Asphalt,
    Highway,
    Residential,
    Dirt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallVariant {
    Brick,
    Stone,
    Fence,
    Hedge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaterVariant {
    River,
    Canal,
    Lake,
    Pond,
}

/// Subtype of a linear object. The object type is implied by the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Road(RoadVariant),
    Wall(WallVariant),
    Water(WaterVariant),
}

impl Variant {
    /// Every variant, in configuration-table order.
    pub const ALL: [Variant; 12] = [
        Variant::Road(RoadVariant::Asphalt),
        Variant::Road(RoadVariant::Highway),
        Variant::Road(RoadVariant::Residential),
        Variant::Road(RoadVariant::Dirt),
        Variant::Wall(WallVariant::Brick),
        Variant::Wall(WallVariant::Stone),
        Variant::Wall(WallVariant::Fence),
        Variant::Wall(WallVariant::Hedge),
        Variant::Water(WaterVariant::River),
        Variant::Water(WaterVariant::Canal),
        Variant::Water(WaterVariant::Lake),
        Variant::Water(WaterVariant::Pond),
    ];

    /// Parses host strings such as `("road", "highway")`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotLinear`] for non-linear object types and
    /// [`ModelError::UnknownVariant`] for unknown variant names.
    pub fn parse(object_type: &str, name: &str) -> Result<Self> {
        let unknown = |object_type: &'static str| ModelError::UnknownVariant {
            object_type,
            name: name.to_owned(),
        };
        let variant = match object_type {
            "road" => Variant::Road(match name {
                "asphalt" => RoadVariant::Asphalt,
                "highway" => RoadVariant::Highway,
                "residential" => RoadVariant::Residential,
                "dirt" => RoadVariant::Dirt,
                _ => return Err(unknown("road").into()),
            }),
            "wall" => Variant::Wall(match name {
                "brick" => WallVariant::Brick,
                "stone" => WallVariant::Stone,
                "fence" => WallVariant::Fence,
                "hedge" => WallVariant::Hedge,
                _ => return Err(unknown("wall").into()),
            }),
            "water" => Variant::Water(match name {
                "river" => WaterVariant::River,
                "canal" => WaterVariant::Canal,
                "lake" => WaterVariant::Lake,
                "pond" => WaterVariant::Pond,
                _ => return Err(unknown("water").into()),
            }),
            other => return Err(ModelError::NotLinear(other.to_owned()).into()),
        };
        Ok(variant)
    }

    #[must_use]
    pub fn object_type(self) -> ObjectType {
        match self {
            Variant::Road(_) => ObjectType::Road,
            Variant::Wall(_) => ObjectType::Wall,
            Variant::Water(_) => ObjectType::Water,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Variant::Road(RoadVariant::Asphalt) => "asphalt",
            Variant::Road(RoadVariant::Highway) => "highway",
            Variant::Road(RoadVariant::Residential) => "residential",
            Variant::Road(RoadVariant::Dirt) => "dirt",
            Variant::Wall(WallVariant::Brick) => "brick",
            Variant::Wall(WallVariant::Stone) => "stone",
            Variant::Wall(WallVariant::Fence) => "fence",
            Variant::Wall(WallVariant::Hedge) => "hedge",
            Variant::Water(WaterVariant::River) => "river",
            Variant::Water(WaterVariant::Canal) => "canal",
            Variant::Water(WaterVariant::Lake) => "lake",
            Variant::Water(WaterVariant::Pond) => "pond",
        }
    }

    /// Position of this variant in [`Variant::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Variant::Road(v) => v as usize,
            Variant::Wall(v) => 4 + v as usize,
            Variant::Water(v) => 8 + v as usize,
        }
    }

    /// Water bodies drawn as a closed outline rather than a ribbon.
    #[must_use]
    pub fn is_closed_body(self) -> bool {
        matches!(
            self,
            Variant::Water(WaterVariant::Lake | WaterVariant::Pond)
        )
    }

    /// Minimum number of points a finished drawing of this variant needs.
    #[must_use]
    pub fn min_points(self) -> usize {
        match self {
            Variant::Water(_) => 1,
            Variant::Road(_) | Variant::Wall(_) => 2,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.object_type(), self.name())
    }
}

/// Identifier of a scene object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    const DRAWING: &'static str = "__drawing__";

    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Sentinel id of the object currently being drawn.
    #[must_use]
    pub fn drawing() -> Self {
        Self(Self::DRAWING.to_owned())
    }

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.0 == Self::DRAWING
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of a road, wall or water object.
///
/// `thickness` is the slab depth for roads and the wall height for walls;
/// water surfaces are flat. Deserialization goes through [`LinearObject::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ObjectRecord", into = "ObjectRecord")]
pub struct LinearObject {
    pub id: ObjectId,
    pub variant: Variant,
    pub points: Vec<PathPoint>,
    pub width: f64,
    pub elevation: f64,
    pub thickness: f64,
}

/// Host-side JSON shape of a linear object, with string type and variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ObjectRecord {
    id: ObjectId,
    #[serde(rename = "type")]
    object_type: String,
    variant: String,
    points: Vec<PathPoint>,
    width: f64,
    #[serde(default)]
    elevation: f64,
    #[serde(default)]
    thickness: f64,
}

impl TryFrom<ObjectRecord> for LinearObject {
    type Error = crate::error::CitylineError;

    fn try_from(record: ObjectRecord) -> Result<Self> {
        let variant = Variant::parse(&record.object_type, &record.variant)?;
        Self::new(
            record.id,
            variant,
            record.points,
            record.width,
            record.elevation,
            record.thickness,
        )
    }
}

impl From<LinearObject> for ObjectRecord {
    fn from(object: LinearObject) -> Self {
        Self {
            id: object.id,
            object_type: object.variant.object_type().as_str().to_owned(),
            variant: object.variant.name().to_owned(),
            points: object.points,
            width: object.width,
            elevation: object.elevation,
            thickness: object.thickness,
        }
    }
}

impl LinearObject {
    /// Creates a validated linear object.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidField`] if `width` is not positive,
    /// `thickness` is negative or any scalar is non-finite, and
    /// [`ModelError::NonFinitePoint`] for non-finite coordinates.
    pub fn new(
        id: ObjectId,
        variant: Variant,
        points: Vec<PathPoint>,
        width: f64,
        elevation: f64,
        thickness: f64,
    ) -> Result<Self> {
        let object = Self {
            id,
            variant,
            points,
            width,
            elevation,
            thickness,
        };
        object.validate()?;
        Ok(object)
    }

    /// Checks the field invariants of a (possibly deserialized) object.
    ///
    /// # Errors
    ///
    /// See [`LinearObject::new`].
    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(ModelError::InvalidField {
                field: "width",
                value: self.width,
                reason: "must be positive",
            }
            .into());
        }
        if !(self.thickness.is_finite() && self.thickness >= 0.0) {
            return Err(ModelError::InvalidField {
                field: "thickness",
                value: self.thickness,
                reason: "must be non-negative",
            }
            .into());
        }
        if !self.elevation.is_finite() {
            return Err(ModelError::InvalidField {
                field: "elevation",
                value: self.elevation,
                reason: "must be finite",
            }
            .into());
        }
        if let Some(index) = self.points.iter().position(|p| !p.is_finite()) {
            return Err(ModelError::NonFinitePoint { index }.into());
        }
        Ok(())
    }

    #[must_use]
    pub fn object_type(&self) -> ObjectType {
        self.variant.object_type()
    }

    #[must_use]
    pub fn half_width(&self) -> f64 {
        self.width * 0.5
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn compatibility_matrix() {
        use ObjectType::{Building, Road, Tree, Wall, Water};
        assert!(Road.connects_with(Wall));
        assert!(Road.connects_with(Water));
        assert!(Wall.connects_with(Road));
        assert!(Wall.connects_with(Wall));
        assert!(!Wall.connects_with(Water));
        assert!(!Water.connects_with(Wall));
        assert!(Water.connects_with(Water));
        assert!(!Building.connects_with(Road));
        assert!(!Road.connects_with(Tree));
    }

    #[test]
    fn variant_index_matches_table_order() {
        for (i, v) in Variant::ALL.iter().enumerate() {
            assert_eq!(v.index(), i, "{v}");
        }
    }

    #[test]
    fn parse_round_trips_names() {
        for v in Variant::ALL {
            let parsed = Variant::parse(v.object_type().as_str(), v.name()).unwrap();
            assert_eq!(parsed, v);
        }
    }

    #[test]
    fn parse_rejects_unknown_names() {
        assert!(Variant::parse("road", "cobblestone").is_err());
        assert!(Variant::parse("building", "house").is_err());
    }

    #[test]
    fn new_rejects_invalid_dimensions() {
        let v = Variant::Road(RoadVariant::Asphalt);
        let pts = vec![PathPoint::new(0.0, 0.0), PathPoint::new(1.0, 0.0)];
        let make = |width, thickness| {
            LinearObject::new(ObjectId::new("a"), v, pts.clone(), width, 0.0, thickness)
        };
        assert!(make(0.0, 0.0).is_err());
        assert!(make(2.0, -1.0).is_err());
        assert!(make(2.0, 0.1).is_ok());
    }

    #[test]
    fn new_rejects_nan_points() {
        let v = Variant::Wall(WallVariant::Brick);
        let pts = vec![PathPoint::new(0.0, 0.0), PathPoint::new(f64::NAN, 0.0)];
        let err = LinearObject::new(ObjectId::new("w"), v, pts, 0.3, 0.0, 2.0)
            .unwrap_err();
        assert!(err.to_string().contains("point 1"));
    }

    #[test]
    fn deserializes_host_object() {
        let json = r#"{
            "id": "road-1",
            "type": "road",
            "variant": "highway",
            "points": [{"x": 0, "z": 0}, {"x": 10, "z": 0}],
            "width": 8,
            "thickness": 0.1
        }"#;
        let obj: LinearObject = serde_json::from_str(json).unwrap();
        assert_eq!(obj.variant, Variant::Road(RoadVariant::Highway));
        assert_eq!(obj.object_type(), ObjectType::Road);
        assert!(obj.elevation.abs() < f64::EPSILON);
        obj.validate().unwrap();
    }

    #[test]
    fn deserialize_rejects_invalid_width() {
        let json = r#"{"id":"w","type":"wall","variant":"brick","points":[],"width":-1}"#;
        assert!(serde_json::from_str::<LinearObject>(json).is_err());
    }

    #[test]
    fn serializes_type_and_variant_strings() {
        let obj = LinearObject::new(
            ObjectId::new("lake-1"),
            Variant::Water(WaterVariant::Lake),
            vec![PathPoint::new(0.0, 0.0)],
            4.0,
            0.0,
            0.0,
        )
        .unwrap();
        let value = serde_json::to_value(&obj).unwrap();
        assert_eq!(value["type"], "water");
        assert_eq!(value["variant"], "lake");
    }

    #[test]
    fn drawing_sentinel() {
        assert!(ObjectId::drawing().is_drawing());
        assert!(!ObjectId::new("road-1").is_drawing());
    }
}
