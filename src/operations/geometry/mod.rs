mod build_object;

pub use build_object::{BuildObjectGeometry, ObjectGeometry};
