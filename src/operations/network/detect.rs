use crate::config::Settings;
use crate::math::intersect_2d::{acute_angle_between, segment_segment_intersect_2d};
use crate::math::Point2;
use crate::model::{
    GroundPoint, Junction, JunctionId, LinearObject, ObjectType, PathPoint, Topology,
};

/// Default merge distance between intersection points.
pub const DEFAULT_JUNCTION_TOLERANCE: f64 = 0.5;

/// A straight segment of an object's centre line.
#[derive(Debug, Clone, Copy)]
struct Segment {
    start: Point2,
    end: Point2,
}

/// Finds junctions between the straight segments of linear objects.
///
/// Every pair of objects whose types can connect (see
/// [`ObjectType::connects_with`]) is tested segment against segment, in
/// object order then segment order. Intersections within `tolerance` of an
/// earlier junction join it; the earlier position is kept.
///
/// Segments that start at a curved point are not tested. Closed water
/// bodies also contribute the edge from their last point back to the first.
#[derive(Debug)]
pub struct DetectJunctions<'a> {
    objects: &'a [LinearObject],
    preview: Option<&'a LinearObject>,
    tolerance: f64,
}

impl<'a> DetectJunctions<'a> {
    #[must_use]
    pub fn new(objects: &'a [LinearObject]) -> Self {
        Self {
            objects,
            preview: None,
            tolerance: DEFAULT_JUNCTION_TOLERANCE,
        }
    }

    /// Sets the merge distance.
    #[must_use]
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Takes the merge distance from `settings`.
    #[must_use]
    pub fn with_settings(self, settings: &Settings) -> Self {
        self.tolerance(settings.junction_tolerance)
    }

    /// Includes the object currently being drawn, tested after `objects`.
    #[must_use]
    pub fn with_preview(mut self, preview: Option<&'a LinearObject>) -> Self {
        self.preview = preview;
        self
    }

    /// Executes the detection.
    #[must_use]
    pub fn execute(&self) -> Vec<Junction> {
        let objects: Vec<&LinearObject> = self.objects.iter().chain(self.preview).collect();
        let segments: Vec<Vec<Segment>> = objects.iter().map(|o| straight_segments(o)).collect();

        let mut junctions: Vec<Junction> = Vec::new();
        for (i, &a) in objects.iter().enumerate() {
            for (j, &b) in objects.iter().enumerate().skip(i + 1) {
                if !a.object_type().connects_with(b.object_type()) {
                    continue;
                }
                for sa in &segments[i] {
                    for sb in &segments[j] {
                        if let Some((point, _, _)) =
                            segment_segment_intersect_2d(&sa.start, &sa.end, &sb.start, &sb.end)
                        {
                            self.record(&mut junctions, point, (a, sa), (b, sb));
                        }
                    }
                }
            }
        }

        for junction in &mut junctions {
            junction.topology = classify(&junction.object_types);
        }
        tracing::debug!(
            objects = objects.len(),
            junctions = junctions.len(),
            "detected junctions"
        );
        junctions
    }

    #[allow(clippy::cast_possible_truncation)]
    fn record(
        &self,
        junctions: &mut Vec<Junction>,
        point: Point2,
        (a, sa): (&LinearObject, &Segment),
        (b, sb): (&LinearObject, &Segment),
    ) {
        let position = GroundPoint::from(point);
        let radius = a.half_width().max(b.half_width());
        let elevation = a.elevation.max(b.elevation);

        if let Some(existing) = junctions
            .iter_mut()
            .find(|j| j.position.distance(&position) <= self.tolerance)
        {
            existing.connect(&a.id, a.object_type());
            existing.connect(&b.id, b.object_type());
            existing.radius = existing.radius.max(radius);
            existing.elevation = existing.elevation.max(elevation);
            return;
        }

        let mut junction = Junction {
            id: JunctionId(junctions.len() as u32),
            position,
            connected_object_ids: Vec::with_capacity(2),
            object_types: Vec::with_capacity(2),
            topology: Topology::Cross,
            angle: acute_angle_between(&(sa.end - sa.start), &(sb.end - sb.start)),
            radius,
            elevation,
        };
        junction.connect(&a.id, a.object_type());
        junction.connect(&b.id, b.object_type());
        junctions.push(junction);
    }
}

fn straight_segments(object: &LinearObject) -> Vec<Segment> {
    let points = &object.points;
    let segment = |from: &PathPoint, to: &PathPoint| {
        from.control_point.is_none().then(|| Segment {
            start: from.position().to_point2(),
            end: to.position().to_point2(),
        })
    };
    let mut segments: Vec<Segment> = points
        .windows(2)
        .filter_map(|pair| segment(&pair[0], &pair[1]))
        .collect();
    // Lakes and ponds are drawn closed; their last point links back to the first.
    if object.variant.is_closed_body() && points.len() >= 3 {
        let seam = points.last().zip(points.first());
        segments.extend(seam.and_then(|(l, f)| segment(l, f)));
    }
    segments
}

/// Classifies a junction from the types of its connected objects.
#[must_use]
pub fn classify(object_types: &[ObjectType]) -> Topology {
    let count = |t: ObjectType| object_types.iter().filter(|&&x| x == t).count();
    let roads = count(ObjectType::Road);
    let walls = count(ObjectType::Wall);
    let water = count(ObjectType::Water);
    let total = object_types.len();

    if roads >= 2 {
        match total {
            0..=2 => Topology::Cross,
            3 => Topology::YJunction,
            _ => Topology::MultiWay,
        }
    } else if walls >= 2 {
        match total {
            0..=2 => Topology::LCorner,
            3 => Topology::TJunction,
            _ => Topology::MultiWay,
        }
    } else if roads == 1 && walls == 1 {
        Topology::TJunction
    } else if roads == 1 && water == 1 {
        Topology::End
    } else {
        Topology::Cross
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_relative_eq;

    use super::*;
    use crate::model::{ObjectId, RoadVariant, Variant, WallVariant, WaterVariant};

    const ROAD: Variant = Variant::Road(RoadVariant::Asphalt);
    const WALL: Variant = Variant::Wall(WallVariant::Stone);
    const WATER: Variant = Variant::Water(WaterVariant::River);

    fn object(id: &str, variant: Variant, coords: &[(f64, f64)], width: f64) -> LinearObject {
        let points = coords.iter().map(|&(x, z)| PathPoint::new(x, z)).collect();
        LinearObject::new(ObjectId::new(id), variant, points, width, 0.0, 0.2)
            .unwrap()
    }

    #[test]
    fn road_crossing_wall() {
        let objects = [
            object("road", ROAD, &[(0.0, 0.0), (10.0, 0.0)], 6.0),
            object("wall", WALL, &[(5.0, -5.0), (5.0, 5.0)], 0.3),
        ];
        let junctions = DetectJunctions::new(&objects).execute();
        assert_eq!(junctions.len(), 1);
        let j = &junctions[0];
        assert_relative_eq!(j.position.x, 5.0, epsilon = 1e-12);
        assert_relative_eq!(j.position.z, 0.0, epsilon = 1e-12);
        assert_eq!(j.object_types, vec![ObjectType::Road, ObjectType::Wall]);
        assert_eq!(j.topology, Topology::TJunction);
        assert_relative_eq!(j.angle, FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(j.radius, 3.0);
    }

    #[test]
    fn order_does_not_move_the_junction() {
        let a = object("a", ROAD, &[(0.0, 0.0), (7.0, 3.0)], 4.0);
        let b = object("b", ROAD, &[(1.0, 5.0), (6.0, -2.0)], 4.0);
        let forward = DetectJunctions::new(&[a.clone(), b.clone()]).execute();
        let backward = DetectJunctions::new(&[b, a]).execute();
        assert_eq!(forward.len(), 1);
        assert_eq!(backward.len(), 1);
        assert!(forward[0].position.distance(&backward[0].position) < 1e-9);
    }

    #[test]
    fn nearby_intersections_merge_within_tolerance() {
        // Two vertical roads cross the horizontal one 0.5 apart.
        let objects = [
            object("h", ROAD, &[(0.0, 0.0), (8.0, 0.0)], 4.0),
            object("v1", ROAD, &[(5.0, -5.0), (5.0, 5.0)], 4.0),
            object("v2", ROAD, &[(5.5, -5.0), (5.5, 5.0)], 4.0),
        ];
        let merged = DetectJunctions::new(&objects).tolerance(0.5).execute();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].connection_count(), 3);
        assert_relative_eq!(merged[0].position.x, 5.0, epsilon = 1e-12);
        assert_eq!(merged[0].topology, Topology::YJunction);

        let split = DetectJunctions::new(&objects)
            .tolerance(0.5 - 1e-6)
            .execute();
        assert_eq!(split.len(), 2);
        assert!(split.iter().all(|j| j.connection_count() == 2));
    }

    #[test]
    fn settings_set_the_merge_distance() {
        let objects = [
            object("h", ROAD, &[(0.0, 0.0), (8.0, 0.0)], 4.0),
            object("v1", ROAD, &[(5.0, -5.0), (5.0, 5.0)], 4.0),
            object("v2", ROAD, &[(5.5, -5.0), (5.5, 5.0)], 4.0),
        ];
        let tight = Settings {
            junction_tolerance: 0.1,
            ..Settings::default()
        };
        let junctions = DetectJunctions::new(&objects)
            .with_settings(&tight)
            .execute();
        assert_eq!(junctions.len(), 2);
        let loose = DetectJunctions::new(&objects)
            .with_settings(&Settings::default())
            .execute();
        assert_eq!(loose.len(), 1);
    }

    #[test]
    fn incompatible_types_are_ignored() {
        let objects = [
            object("wall", WALL, &[(0.0, 0.0), (10.0, 0.0)], 0.3),
            object("river", WATER, &[(5.0, -5.0), (5.0, 5.0)], 3.0),
        ];
        assert!(DetectJunctions::new(&objects).execute().is_empty());
    }

    #[test]
    fn road_crossing_a_lake_closing_edge() {
        let lake = Variant::Water(WaterVariant::Lake);
        let outline = [(0.0, 0.0), (6.0, 0.0), (6.0, 4.0), (0.0, 4.0)];
        let objects = [
            object("lake", lake, &outline, 1.0),
            object("road", ROAD, &[(-2.0, 2.0), (2.0, 2.0)], 4.0),
        ];
        let junctions = DetectJunctions::new(&objects).execute();
        assert_eq!(junctions.len(), 1);
        assert_relative_eq!(junctions[0].position.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(junctions[0].position.z, 2.0, epsilon = 1e-12);
        assert_eq!(junctions[0].topology, Topology::End);

        // A river with the same points stays open.
        let objects = [
            object("river", WATER, &outline, 1.0),
            object("road", ROAD, &[(-2.0, 2.0), (2.0, 2.0)], 4.0),
        ];
        assert!(DetectJunctions::new(&objects).execute().is_empty());
    }

    #[test]
    fn curved_closing_edge_is_skipped() {
        let mut points: Vec<PathPoint> = [(0.0, 0.0), (6.0, 0.0), (6.0, 4.0)]
            .iter()
            .map(|&(x, z)| PathPoint::new(x, z))
            .collect();
        let control = GroundPoint::new(-1.0, 2.0);
        points.push(PathPoint::curved(0.0, 4.0, control));
        let lake = LinearObject::new(
            ObjectId::new("lake"),
            Variant::Water(WaterVariant::Lake),
            points,
            1.0,
            0.0,
            0.0,
        )
        .unwrap();
        let objects = [lake, object("road", ROAD, &[(-2.0, 2.0), (2.0, 2.0)], 4.0)];
        assert!(DetectJunctions::new(&objects).execute().is_empty());
    }

    #[test]
    fn curved_segments_are_skipped() {
        let curved = LinearObject::new(
            ObjectId::new("curve"),
            ROAD,
            vec![
                PathPoint::curved(5.0, -5.0, GroundPoint::new(6.0, 0.0)),
                PathPoint::new(5.0, 5.0),
            ],
            4.0,
            0.0,
            0.2,
        )
        .unwrap();
        let objects = [object("h", ROAD, &[(0.0, 0.0), (10.0, 0.0)], 4.0), curved];
        assert!(DetectJunctions::new(&objects).execute().is_empty());
    }

    #[test]
    fn preview_object_participates() {
        let objects = [object("road", ROAD, &[(0.0, 0.0), (10.0, 0.0)], 6.0)];
        let mut drawing = object("x", ROAD, &[(3.0, -3.0), (3.0, 3.0)], 6.0);
        drawing.id = ObjectId::drawing();
        let junctions = DetectJunctions::new(&objects)
            .with_preview(Some(&drawing))
            .execute();
        assert_eq!(junctions.len(), 1);
        let ids = &junctions[0].connected_object_ids;
        assert!(ids.iter().any(ObjectId::is_drawing));
    }

    #[test]
    fn merge_keeps_largest_radius_and_elevation() {
        let mut high = object("high", ROAD, &[(5.2, -5.0), (5.2, 5.0)], 10.0);
        high.elevation = 2.0;
        let objects = [
            object("h", ROAD, &[(0.0, 0.0), (10.0, 0.0)], 4.0),
            object("v", ROAD, &[(5.0, -5.0), (5.0, 5.0)], 4.0),
            high,
        ];
        let junctions = DetectJunctions::new(&objects).execute();
        assert_eq!(junctions.len(), 1);
        assert_relative_eq!(junctions[0].radius, 5.0);
        assert_relative_eq!(junctions[0].elevation, 2.0);
    }

    #[test]
    fn classification_table() {
        use ObjectType::{Road, Wall, Water};
        assert_eq!(classify(&[Road, Road]), Topology::Cross);
        assert_eq!(classify(&[Road, Road, Wall]), Topology::YJunction);
        assert_eq!(classify(&[Road, Road, Road, Road]), Topology::MultiWay);
        assert_eq!(classify(&[Wall, Wall]), Topology::LCorner);
        assert_eq!(classify(&[Wall, Wall, Wall]), Topology::TJunction);
        assert_eq!(classify(&[Wall, Wall, Road, Wall]), Topology::MultiWay);
        assert_eq!(classify(&[Road, Wall]), Topology::TJunction);
        assert_eq!(classify(&[Road, Water]), Topology::End);
        assert_eq!(classify(&[Water, Water]), Topology::Cross);
    }
}
