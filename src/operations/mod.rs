//! Scene-level operations: per-object geometry and the junction network.

pub mod geometry;
pub mod network;

pub use geometry::{BuildObjectGeometry, ObjectGeometry};
pub use network::{DetectJunctions, OptimizeConnections};
