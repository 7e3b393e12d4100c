//! Plain data exchanged with the editor host.

pub mod junction;
pub mod object;
pub mod point;

pub use junction::{Junction, JunctionId, Topology};
pub use object::{
    LinearObject, ObjectId, ObjectType, RoadVariant, Variant, WallVariant, WaterVariant,
};
pub use point::{GroundPoint, PathPoint};
