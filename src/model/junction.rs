use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tessellation::{TessellateDisc, TriangleMesh};

use super::object::{ObjectId, ObjectType};
use super::point::GroundPoint;

/// Sequential identifier of a junction within one detection pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JunctionId(pub u32);

impl fmt::Display for JunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "junction-{}", self.0)
    }
}

/// Heuristic shape of a junction, used for overlay rendering only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topology {
    #[serde(rename = "cross")]
    Cross,
    #[serde(rename = "T-junction")]
    TJunction,
    #[serde(rename = "Y-junction")]
    YJunction,
    #[serde(rename = "L-corner")]
    LCorner,
    #[serde(rename = "multi-way")]
    MultiWay,
    #[serde(rename = "end")]
    End,
}

/// A point where two or more linear objects cross.
///
/// `connected_object_ids` and `object_types` are parallel: entry `i` of
/// `object_types` is the type of object `i`, and every object appears once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Junction {
    pub id: JunctionId,
    pub position: GroundPoint,
    pub connected_object_ids: Vec<ObjectId>,
    pub object_types: Vec<ObjectType>,
    pub topology: Topology,
    /// Acute angle in radians between the first two crossing segments.
    pub angle: f64,
    pub radius: f64,
    pub elevation: f64,
}

impl Junction {
    /// Records `id` as connected unless it already is. Returns `true` if added.
    pub fn connect(&mut self, id: &ObjectId, object_type: ObjectType) -> bool {
        if self.connects(id) {
            return false;
        }
        self.connected_object_ids.push(id.clone());
        self.object_types.push(object_type);
        true
    }

    #[must_use]
    pub fn connects(&self, id: &ObjectId) -> bool {
        self.connected_object_ids.contains(id)
    }

    /// Number of connected objects of the given type.
    #[must_use]
    pub fn count_of(&self, object_type: ObjectType) -> usize {
        self.object_types
            .iter()
            .filter(|&&t| t == object_type)
            .count()
    }

    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.connected_object_ids.len()
    }

    /// Disc covering the junction area, for overlay rendering.
    #[must_use]
    pub fn overlay_mesh(&self, segments: u32) -> TriangleMesh {
        TessellateDisc::new(self.position.to_point2(), self.radius, self.elevation)
            .segments(segments)
            .execute()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn empty() -> Junction {
        Junction {
            id: JunctionId(0),
            position: GroundPoint::new(1.0, 2.0),
            connected_object_ids: Vec::new(),
            object_types: Vec::new(),
            topology: Topology::Cross,
            angle: 0.0,
            radius: 1.0,
            elevation: 0.0,
        }
    }

    #[test]
    fn connect_deduplicates_by_id() {
        let mut j = empty();
        assert!(j.connect(&ObjectId::new("a"), ObjectType::Road));
        assert!(j.connect(&ObjectId::new("b"), ObjectType::Wall));
        assert!(!j.connect(&ObjectId::new("a"), ObjectType::Road));
        assert_eq!(j.connected_object_ids.len(), j.object_types.len());
        assert_eq!(j.connection_count(), 2);
        assert_eq!(j.count_of(ObjectType::Road), 1);
    }

    #[test]
    fn overlay_is_a_disc_at_the_junction() {
        let mut j = empty();
        j.elevation = 0.4;
        let mesh = j.overlay_mesh(16);
        assert_eq!(mesh.triangle_count(), 16);
        assert!(mesh.vertices.iter().all(|p| (p.y - 0.4).abs() < 1e-12));
        assert!((mesh.vertices[0].x - 1.0).abs() < 1e-12);
        assert!((mesh.vertices[0].z - 2.0).abs() < 1e-12);
    }

    #[test]
    fn topology_serializes_with_host_names() {
        let json = serde_json::to_string(&Topology::TJunction).unwrap();
        assert_eq!(json, "\"T-junction\"");
        let json = serde_json::to_string(&Topology::MultiWay).unwrap();
        assert_eq!(json, "\"multi-way\"");
    }
}
