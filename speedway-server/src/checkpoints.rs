use glam::DVec3;

use speedway_core::lap_info::CheckpointID;
use speedway_core::GLOBAL_CONFIG;

use crate::physics::bounding_box::BoundingBox;

/// A single pass-through gate on the track. Immutable after track generation
/// and shared read-only by every car.
#[derive(Clone, Copy)]
pub struct Checkpoint {
    pub id: CheckpointID,
    pub position: DVec3,
    // roughly the distance a car has to be within to be marked as passed;
    // should be at least half the track's width
    pub trigger_radius: f64,
}

impl Checkpoint {
    pub fn new(id: CheckpointID, position: DVec3) -> Checkpoint {
        Checkpoint {
            id,
            position,
            trigger_radius: GLOBAL_CONFIG.checkpoint_radius,
        }
    }
}

/// The lap boundary, sitting over the track's start point. Crossing it only
/// counts once every checkpoint has been passed.
#[derive(Clone, Copy)]
pub struct FinishLine {
    pub bounds: BoundingBox,
}

impl FinishLine {
    pub fn new(start_point: DVec3) -> FinishLine {
        const HALF_WIDTH: f64 = 5.0;

        // raised a little so a car's box clips it, wide enough to span the road
        let center = start_point + DVec3::new(0.0, 1.5, 0.0);
        let halflength = DVec3::new(HALF_WIDTH * 2.0, 1.0, HALF_WIDTH);
        FinishLine {
            bounds: BoundingBox::from_center_halflength(center, halflength),
        }
    }
}

/// Out-of-bounds trigger volume under the whole course; hitting it sends a
/// car back onto the track.
#[derive(Clone, Copy)]
pub struct KillPlane {
    pub bounds: BoundingBox,
}

impl KillPlane {
    pub fn below_track(extent: f64) -> KillPlane {
        KillPlane {
            bounds: BoundingBox::new(-extent, extent, -12.0, -8.0, -extent, extent),
        }
    }
}
