use std::cmp::Ordering;
use std::time::Duration;

use speedway_core::lap_info::{CheckpointID, Placement};
use speedway_core::{CarID, GLOBAL_CONFIG};

use crate::checkpoints::Checkpoint;
use crate::sim::car::Car;
use crate::sim::CarArena;

impl Car {
    /// Note a checkpoint pass. Idempotent: membership is set-like, but the
    /// insertion order sticks around for the distance query below.
    pub fn register_checkpoint_pass(&mut self, checkpoint: CheckpointID) {
        if !self.passed_checkpoints.contains(&checkpoint) {
            self.passed_checkpoints.push(checkpoint);
            println!("car {} passed checkpoint {}", self.id, checkpoint);
        }
    }

    // >= as the original wrote it, in case the counts ever disagree
    pub fn has_passed_all_checkpoints(&self, total_checkpoints: usize) -> bool {
        self.passed_checkpoints.len() >= total_checkpoints
    }

    /// A finish-line crossing only counts with a full checkpoint set; anything
    /// less is silently ignored. A valid crossing bumps the lap (or ends the
    /// race at the cap) and always clears the set, so no checkpoint state can
    /// leak into a phantom next lap.
    pub fn on_finish_line_crossed(&mut self, total_checkpoints: usize, race_clock: Duration) {
        if self.finished || !self.has_passed_all_checkpoints(total_checkpoints) {
            return;
        }

        if self.lap + 1 > GLOBAL_CONFIG.lap_count {
            self.finished = true;
            self.finish_time = Some(race_clock);
            println!("car {} finished the race at {:?}", self.id, race_clock);
        } else {
            self.lap += 1;
            println!("car {} is now on lap {}", self.id, self.lap);
        }

        self.passed_checkpoints.clear();
    }

    /// Squared distance to the most recently passed checkpoint; the placement
    /// tiebreak. A car that hasn't hit a gate yet reads as infinitely far, so
    /// it sorts behind same-lap peers.
    pub fn distance_from_last_checkpoint(&self, checkpoints: &[Checkpoint]) -> f64 {
        let last = match self.passed_checkpoints.last() {
            Some(last) => *last,
            None => return f64::MAX,
        };

        checkpoints
            .iter()
            .find(|checkpoint| checkpoint.id == last)
            .map(|checkpoint| checkpoint.position.distance_squared(self.position))
            .unwrap_or(f64::MAX)
    }
}

/// Race-order comparator: more laps first, then more gates this lap, then
/// whoever is closest to the gate they just passed. Finished cars rank ahead
/// of everyone still racing, earliest finisher first.
pub fn race_order(a: &Car, b: &Car, checkpoints: &[Checkpoint]) -> Ordering {
    match (a.finished, b.finished) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (true, true) => a.finish_time.cmp(&b.finish_time),
        (false, false) => {
            if a.lap != b.lap {
                a.lap.cmp(&b.lap).reverse()
            } else if a.passed_checkpoints.len() != b.passed_checkpoints.len() {
                a.passed_checkpoints
                    .len()
                    .cmp(&b.passed_checkpoints.len())
                    .reverse()
            } else {
                a.distance_from_last_checkpoint(checkpoints)
                    .partial_cmp(&b.distance_from_last_checkpoint(checkpoints))
                    .unwrap_or(Ordering::Equal)
            }
        }
    }
}

/// Sort the field and write each car's place, once per tick.
pub fn update_placements(cars: &mut CarArena, checkpoints: &[Checkpoint]) {
    let mut order: Vec<CarID> = cars.keys().copied().collect();
    order.sort_by(|x, y| race_order(&cars[x], &cars[y], checkpoints));

    for (index, id) in order.iter().enumerate() {
        if let Some(car) = cars.get_mut(id) {
            car.place = (index + 1) as Placement;
        }
    }
}
