use glam::DVec3;
use rand::Rng;

use speedway_core::lap_info::CheckpointID;
use speedway_core::GLOBAL_CONFIG;

use crate::checkpoints::{Checkpoint, FinishLine, KillPlane};

/// A closed loop of waypoints, built once per race. Checkpoints are derived
/// from every other waypoint; the first waypoint doubles as the start point
/// under the finish line.
pub struct Track {
    pub waypoints: Vec<DVec3>,
    pub checkpoints: Vec<Checkpoint>,
    pub finish_line: FinishLine,
    pub kill_plane: KillPlane,
}

impl Track {
    /// Random loop generation: one point per angle step around the origin at
    /// a random distance, scaled up to course size.
    pub fn generate() -> Track {
        let mut rng = rand::thread_rng();
        let count = GLOBAL_CONFIG.track_point_count;
        let delta_theta = std::f64::consts::TAU / count as f64;

        let mut waypoints = Vec::with_capacity(count);
        for i in 0..count {
            // how far from the origin this point lands
            let hypotenuse: f64 = rng.gen_range(1.0..15.0);
            let theta = delta_theta * i as f64 + 1.0;
            waypoints.push(
                DVec3::new(hypotenuse * theta.cos(), 0.0, hypotenuse * theta.sin())
                    * GLOBAL_CONFIG.track_scale,
            );
        }

        Track::from_waypoints(waypoints)
    }

    pub fn from_waypoints(waypoints: Vec<DVec3>) -> Track {
        let checkpoints = waypoints
            .iter()
            .step_by(2)
            .enumerate()
            .map(|(i, point)| Checkpoint::new(i as CheckpointID, *point))
            .collect();

        let start_point = waypoints[0];
        // comfortably covers the farthest any generated point can sit
        let extent = GLOBAL_CONFIG.track_scale * 15.0 * 2.0;

        Track {
            waypoints,
            checkpoints,
            finish_line: FinishLine::new(start_point),
            kill_plane: KillPlane::below_track(extent),
        }
    }

    pub fn start_point(&self) -> DVec3 {
        self.waypoints[0]
    }

    /// Nearest point on the closed waypoint loop, walking every segment.
    pub fn closest_point(&self, position: DVec3) -> DVec3 {
        let mut best = self.waypoints[0];
        let mut best_distance = f64::MAX;

        for i in 0..self.waypoints.len() {
            let a = self.waypoints[i];
            let b = self.waypoints[(i + 1) % self.waypoints.len()];
            let ab = b - a;
            let t = ((position - a).dot(ab) / ab.length_squared()).clamp(0.0, 1.0);
            let point = a + ab * t;

            let distance = point.distance_squared(position);
            if distance < best_distance {
                best_distance = distance;
                best = point;
            }
        }

        best
    }

    /// Direction of track flow near a position, sampled from two nearby
    /// closest-point queries the way the fall-recovery logic expects.
    pub fn flow_direction(&self, position: DVec3) -> DVec3 {
        let here = self.closest_point(position);
        let ahead = self.closest_point(position + DVec3::new(0.001, 0.0, 0.001));

        let direction = here - ahead;
        if direction.length_squared() > 0.0 {
            direction.normalize()
        } else {
            // both samples snapped to the same spot; fall back to the first segment
            (self.waypoints[1] - self.waypoints[0]).normalize()
        }
    }

    /// The surface oracle: a car is over drivable ground while it stays
    /// within the track band around the waypoint loop.
    pub fn is_over_track(&self, position: DVec3) -> bool {
        let nearest = self.closest_point(position);
        let dx = position.x - nearest.x;
        let dz = position.z - nearest.z;
        let half_width = GLOBAL_CONFIG.track_half_width;
        dx * dx + dz * dz <= half_width * half_width
    }
}
