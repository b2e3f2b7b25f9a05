use std::collections::BTreeMap;
use std::time::Duration;

use rand::Rng;

use speedway_core::lap_info::CheckpointID;
use speedway_core::CarID;

use crate::track::Track;
use crate::{physics, progress};

pub mod car;
pub mod control;
pub mod items;
pub mod state_machine;


use car::Car;
use items::ItemBox;

/// All cars in the race, keyed by their wire id. Every component touches cars
/// through this arena by id, never by held reference.
pub type CarArena = BTreeMap<CarID, Car>;

/// Everything the overlap pass observed this tick, consumed in order once the
/// pass is over. The oracle decides the geometry; the handlers only decide
/// what happens once told "overlap".
pub enum RaceEvent {
    CheckpointPassed { car: CarID, checkpoint: CheckpointID },
    FinishLineCrossed { car: CarID },
    ItemPickedUp { car: CarID, item: usize },
    KillPlaneHit { car: CarID },
}

/// Run one fixed step for every server-simulated car.
pub fn step_cars(cars: &mut CarArena, track: &Track, dt: Duration) {
    for car in cars.values_mut() {
        if car.remote {
            // network-owned cars take their position off the wire, but their
            // item timers still run on the server's clock
            car.tick_modifier(dt);
            continue;
        }

        let position = car.position;
        let heading = car.heading;
        let output = car.policy.decide(position, heading, track);
        car.apply_controls(output, dt);

        let on_ground = car.position.y <= 0.05 && track.is_over_track(car.position);
        car.step(dt, on_ground);
    }
}

pub fn tick_items(item_boxes: &mut [ItemBox], dt: Duration) {
    for item in item_boxes.iter_mut() {
        item.tick(dt);
    }
}

/// The per-tick overlap pass: circle checks for checkpoints, box checks for
/// the finish line, items and the kill plane.
pub fn scan_overlaps(cars: &CarArena, track: &Track, item_boxes: &[ItemBox]) -> Vec<RaceEvent> {
    let mut events = Vec::new();

    for (id, car) in cars {
        for checkpoint in &track.checkpoints {
            if physics::circles_overlap_xz(
                car.position,
                car.radius,
                checkpoint.position,
                checkpoint.trigger_radius,
            ) {
                events.push(RaceEvent::CheckpointPassed {
                    car: *id,
                    checkpoint: checkpoint.id,
                });
            }
        }

        let bounds = car.bounding_box();
        if bounds.collides_with(&track.finish_line.bounds) {
            events.push(RaceEvent::FinishLineCrossed { car: *id });
        }

        for (index, item) in item_boxes.iter().enumerate() {
            if item.is_active() && bounds.collides_with(&item.bounding_box()) {
                events.push(RaceEvent::ItemPickedUp {
                    car: *id,
                    item: index,
                });
            }
        }

        if bounds.collides_with(&track.kill_plane.bounds) {
            events.push(RaceEvent::KillPlaneHit { car: *id });
        }
    }

    events
}

pub fn apply_events<R: Rng>(
    cars: &mut CarArena,
    track: &Track,
    item_boxes: &mut [ItemBox],
    events: Vec<RaceEvent>,
    race_clock: Duration,
    rng: &mut R,
) {
    let total_checkpoints = track.checkpoints.len();

    for event in events {
        match event {
            RaceEvent::CheckpointPassed { car, checkpoint } => {
                if let Some(car) = cars.get_mut(&car) {
                    car.register_checkpoint_pass(checkpoint);
                }
            }
            RaceEvent::FinishLineCrossed { car } => {
                if let Some(car) = cars.get_mut(&car) {
                    car.on_finish_line_crossed(total_checkpoints, race_clock);
                }
            }
            RaceEvent::ItemPickedUp { car, item } => {
                if let Some(car) = cars.get_mut(&car) {
                    car.store_item(items::roll_item(rng));
                    // prototype behavior: fire the item the moment it's picked up
                    car.use_stored_item();
                    item_boxes[item].picked_up();
                }
            }
            RaceEvent::KillPlaneHit { car } => {
                if let Some(car) = cars.get_mut(&car) {
                    if !car.to_previous_checkpoint(&track.checkpoints) {
                        car.return_to_track(track);
                    }
                }
            }
        }
    }
}

/// One full simulation pass, in tick order: movement, item cooldowns, the
/// overlap scan, its consequences, then placement.
pub fn simulate_tick<R: Rng>(
    cars: &mut CarArena,
    track: &Track,
    item_boxes: &mut Vec<ItemBox>,
    dt: Duration,
    race_clock: Duration,
    rng: &mut R,
) {
    step_cars(cars, track, dt);
    tick_items(item_boxes, dt);
    let events = scan_overlaps(cars, track, item_boxes);
    apply_events(cars, track, item_boxes, events, race_clock, rng);
    progress::update_placements(cars, &track.checkpoints);
}
