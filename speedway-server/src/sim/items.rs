use std::time::Duration;

use glam::DVec3;
use rand::Rng;

use crate::physics::bounding_box::BoundingBox;
use crate::track::Track;

use super::state_machine::Modifier;

// a picked-up box sits out this long before it can be grabbed again
const RESPAWN_DELAY: Duration = Duration::from_secs(5);

/// A pickup volume floating on the track. Cars drive straight through it; the
/// roll on contact decides which effect they get.
pub struct ItemBox {
    pub position: DVec3,
    pub halflength: DVec3,
    cooldown: Duration,
}

impl ItemBox {
    pub fn new(position: DVec3) -> ItemBox {
        ItemBox {
            position,
            halflength: DVec3::new(1.0, 1.0, 1.0),
            cooldown: Duration::ZERO,
        }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_center_halflength(self.position, self.halflength)
    }

    pub fn is_active(&self) -> bool {
        self.cooldown.is_zero()
    }

    pub fn picked_up(&mut self) {
        self.cooldown = RESPAWN_DELAY;
    }

    pub fn tick(&mut self, dt: Duration) {
        self.cooldown = self.cooldown.saturating_sub(dt);
    }
}

/// Uniform roll over the usable effects; Regular is never rolled, it means
/// "empty hands".
pub fn roll_item<R: Rng>(rng: &mut R) -> Modifier {
    match rng.gen_range(0..3) {
        0 => Modifier::Inverted,
        1 => Modifier::Slow,
        _ => Modifier::Fast,
    }
}

/// Item boxes take the odd waypoints; checkpoints already sit on the even ones.
pub fn place_items(track: &Track) -> Vec<ItemBox> {
    track
        .waypoints
        .iter()
        .skip(1)
        .step_by(2)
        .map(|point| ItemBox::new(*point))
        .collect()
}
