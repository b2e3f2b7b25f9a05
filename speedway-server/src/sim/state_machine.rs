use std::time::Duration;

use speedway_core::GLOBAL_CONFIG;

use super::car::Car;

/// A temporary gameplay effect on a car's movement. Regular is both the rest
/// state and the "no item held" value; it has no timer of its own and is only
/// left through an explicit item activation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Modifier {
    Regular,
    Fast,
    Slow,
    Inverted,
}

// How long each effect stays active before reverting on its own.
const FAST_DWELL: Duration = Duration::from_millis(5000);
const SLOW_DWELL: Duration = Duration::from_millis(10000);
const INVERTED_DWELL: Duration = Duration::from_millis(10000);

impl Modifier {
    pub fn dwell(&self) -> Duration {
        match self {
            Modifier::Fast => FAST_DWELL,
            Modifier::Slow => SLOW_DWELL,
            Modifier::Inverted => INVERTED_DWELL,
            Modifier::Regular => Duration::ZERO,
        }
    }
}

impl Car {
    /// Activate an item effect. A running effect is neither replaced nor
    /// extended, so this is a no-op until the current timer expires; Regular
    /// is not a valid item selection and is rejected outright.
    pub fn apply_item(&mut self, item: Modifier) {
        if item == Modifier::Regular {
            println!("invalid item state for car {}", self.id);
            return;
        }
        if self.modifier != Modifier::Regular {
            return;
        }

        match item {
            Modifier::Fast => {
                self.max_speed = GLOBAL_CONFIG.max_car_speed * GLOBAL_CONFIG.fast_multiplier;
            }
            Modifier::Slow => {
                self.max_speed = GLOBAL_CONFIG.max_car_speed * GLOBAL_CONFIG.slow_multiplier;
            }
            // inverted leaves the speed cap alone and flips the sign instead
            Modifier::Inverted | Modifier::Regular => {}
        }

        self.modifier = item;
        self.modifier_elapsed = Duration::ZERO;
        println!("car {} activated {:?} item", self.id, item);
    }

    /// Timer-driven reversion, run once per fixed step while an effect is
    /// active. Only the current modifier's dwell is consulted; expiry restores
    /// the pre-modifier speed cap and fully resets the timer, so re-applying
    /// the same item later re-arms the whole dwell.
    pub fn tick_modifier(&mut self, dt: Duration) {
        if self.modifier == Modifier::Regular {
            return;
        }

        self.modifier_elapsed += dt;
        if self.modifier_elapsed >= self.modifier.dwell() {
            self.modifier = Modifier::Regular;
            self.max_speed = GLOBAL_CONFIG.max_car_speed;
            self.modifier_elapsed = Duration::ZERO;
        }
    }

    /// The speed actually fed to movement this tick. The modifier transform
    /// runs first; the finished check comes after it and wins unconditionally,
    /// so a finished car reads 0 whatever its modifier or speed sign.
    pub fn effective_speed(&self, raw_speed: f64) -> f64 {
        let transformed = match self.modifier {
            Modifier::Fast => raw_speed * GLOBAL_CONFIG.fast_multiplier,
            Modifier::Slow => raw_speed * GLOBAL_CONFIG.slow_multiplier,
            Modifier::Inverted => -raw_speed,
            Modifier::Regular => raw_speed,
        };

        if self.finished {
            0.0
        } else {
            transformed
        }
    }

    /// Stores an item. Overrides any existing stored item.
    pub fn store_item(&mut self, item: Modifier) {
        self.stored_item = item;
    }

    /// Fire the held item, if any. The slot empties either way; a running
    /// effect swallows the activation rather than queueing it.
    pub fn use_stored_item(&mut self) {
        if self.stored_item == Modifier::Regular {
            return;
        }
        let item = self.stored_item;
        self.stored_item = Modifier::Regular;
        self.apply_item(item);
    }
}
