use std::time::Duration;

use glam::DVec3;

use speedway_core::lap_info::{CheckpointID, LapNumber, Placement};
use speedway_core::{CarID, GLOBAL_CONFIG};

use crate::checkpoints::Checkpoint;
use crate::physics;
use crate::physics::bounding_box::BoundingBox;
use crate::sim::control::{ControlOutput, ControlPolicy};
use crate::sim::state_machine::Modifier;
use crate::track::Track;

/// One car in the arena. Owned exclusively by its slot; mutated only by the
/// state machine and the lap tracker acting on its id.
pub struct Car {
    pub id: CarID,
    pub policy: ControlPolicy,
    // a connected peer owns this car; its position comes off the wire and the
    // server skips integrating it
    pub remote: bool,

    pub position: DVec3,
    // unit steer direction on the track plane
    pub heading: DVec3,
    pub speed: f64,
    pub max_speed: f64,

    pub modifier: Modifier,
    pub stored_item: Modifier,
    pub modifier_elapsed: Duration,

    pub lap: LapNumber,
    pub finished: bool,
    pub finish_time: Option<Duration>,
    pub place: Placement,
    pub passed_checkpoints: Vec<CheckpointID>,

    // positions recorded while airborne, oldest first; consumed by fall recovery
    pub fall_path: Vec<DVec3>,

    // bounding circle for checkpoint checks
    pub radius: f64,
    // box halflengths for the finish line, item and kill plane checks
    pub halflength: DVec3,
}

impl Car {
    pub fn spawn(id: CarID, policy: ControlPolicy, position: DVec3, heading: DVec3) -> Car {
        Car {
            id,
            policy,
            remote: false,
            position,
            heading,
            speed: 0.0,
            max_speed: GLOBAL_CONFIG.max_car_speed,
            modifier: Modifier::Regular,
            stored_item: Modifier::Regular,
            modifier_elapsed: Duration::ZERO,
            lap: 1,
            finished: false,
            finish_time: None,
            place: 1,
            passed_checkpoints: Vec::new(),
            fall_path: Vec::new(),
            radius: 1.0,
            halflength: DVec3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_center_halflength(self.position, self.halflength)
    }

    /// Steering and throttle for this tick, before the movement step.
    pub fn apply_controls(&mut self, output: ControlOutput, dt: Duration) {
        let dt_s = dt.as_secs_f64();
        self.heading = physics::rotate_about_y(self.heading, output.steer * GLOBAL_CONFIG.car_spin * dt_s);
        self.speed = (self.speed + output.throttle * GLOBAL_CONFIG.car_accelerator * dt_s)
            .clamp(-self.max_speed, self.max_speed);
    }

    /// One fixed step of the prototype kinematics. Airborne cars record their
    /// fall path and drop straight down with no drive speed; grounded cars
    /// move along their heading at the state machine's effective speed.
    pub fn step(&mut self, dt: Duration, on_ground: bool) {
        let dt_s = dt.as_secs_f64();

        if !on_ground {
            // keep noting where we were until something below stops us
            self.fall_path.push(self.position);
            self.position.y -= GLOBAL_CONFIG.fall_acceleration * dt_s;
            self.speed = 0.0;
        } else {
            self.fall_path.clear();
            if self.position.y < 0.0 {
                self.position.y = 0.0;
            }
        }

        if self.modifier != Modifier::Regular {
            self.tick_modifier(dt);
        }

        let effective = self.effective_speed(self.speed);
        self.position += self.heading * effective * dt_s;
    }

    /// Reposition just above the most recent checkpoint passed this lap.
    /// Returns false when there is none to go back to.
    pub fn to_previous_checkpoint(&mut self, checkpoints: &[Checkpoint]) -> bool {
        let last = match self.passed_checkpoints.last() {
            Some(last) => *last,
            None => return false,
        };

        match checkpoints.iter().find(|checkpoint| checkpoint.id == last) {
            Some(checkpoint) => {
                self.position = checkpoint.position + DVec3::new(0.0, 1.0, 0.0);
                self.speed = 0.0;
                self.fall_path.clear();
                true
            }
            None => false,
        }
    }

    /// Projection-based fall recovery: offset the landing spot by where the
    /// fall was headed, snap to the nearest curve point, and face the track's
    /// flow direction.
    pub fn return_to_track(&mut self, track: &Track) {
        let samples = (self.fall_path.first().copied(), self.fall_path.last().copied());
        if let (Some(first), Some(last)) = samples {
            let u = last - first;
            let v = DVec3::new(first.x, last.y, first.z);
            let projection = physics::project_onto(u, v);

            let offset = if projection.length_squared() > 0.0 {
                // lean the landing back toward the course origin
                let d = (DVec3::ZERO - first).normalize();
                -(projection.normalize() - DVec3::new(d.x, 5.0, d.z))
            } else {
                // the fall never went anywhere; just pop back up over the track
                DVec3::new(0.0, 5.0, 0.0)
            };

            self.position = offset + track.closest_point(self.position);
            self.heading = track.flow_direction(self.position);
            self.speed = 0.0;
        }

        // empty the list for the next fall
        self.fall_path.clear();
    }
}
