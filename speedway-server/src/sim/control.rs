use glam::DVec3;

use speedway_core::player_inputs::{EngineStatus, PlayerInputs, RotationStatus};

use crate::physics;
use crate::track::Track;

// how close a seeking car must get before it moves on to the next waypoint
const WAYPOINT_CAPTURE_RADIUS: f64 = 3.0;
const SEEKER_RADIUS: f64 = 1.5;

/// What a car wants to do this tick: throttle and steer, both in [-1, 1].
#[derive(Copy, Clone)]
pub struct ControlOutput {
    pub throttle: f64,
    pub steer: f64,
}

/// How a car decides its controls. One car record, two behaviors: Human maps
/// polled inputs straight through, Seek chases the next track waypoint.
pub enum ControlPolicy {
    Human(PlayerInputs),
    Seek(SeekState),
}

pub struct SeekState {
    pub target_index: usize,
}

impl ControlPolicy {
    pub fn decide(&mut self, position: DVec3, heading: DVec3, track: &Track) -> ControlOutput {
        match self {
            ControlPolicy::Human(inputs) => ControlOutput {
                throttle: match inputs.engine_status {
                    EngineStatus::Accelerating => 1.0,
                    EngineStatus::Neutral => 0.0,
                    EngineStatus::Braking => -1.0,
                },
                steer: match inputs.rotation_status {
                    RotationStatus::InSpinClockwise => 1.0,
                    RotationStatus::InSpinCounterclockwise => -1.0,
                    RotationStatus::NotInSpin => 0.0,
                },
            },
            ControlPolicy::Seek(seek) => {
                // once inside the capture circle, hand the chase to the next waypoint
                let target = track.waypoints[seek.target_index];
                if physics::circles_overlap_xz(
                    position,
                    SEEKER_RADIUS,
                    target,
                    WAYPOINT_CAPTURE_RADIUS,
                ) {
                    seek.target_index = (seek.target_index + 1) % track.waypoints.len();
                }

                let desired = track.waypoints[seek.target_index] - position;
                let steer = if desired.length_squared() > 0.0 {
                    let desired = desired.normalize();
                    // signed angle from heading to the desired direction on the track plane
                    let cross_y = heading.x * desired.z - heading.z * desired.x;
                    let angle = cross_y.atan2(heading.dot(desired));
                    angle.clamp(-1.0, 1.0)
                } else {
                    0.0
                };

                ControlOutput {
                    throttle: 1.0,
                    steer,
                }
            }
        }
    }
}
