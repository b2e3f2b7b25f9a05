#[derive(Copy, Clone)]
pub enum EngineStatus {
    Accelerating,
    Neutral,
    Braking,
}

#[derive(Copy, Clone)]
pub enum RotationStatus {
    InSpinClockwise,
    InSpinCounterclockwise,
    NotInSpin,
}

// PlayerInputs tells the simulation what a driver is doing this tick
#[derive(Copy, Clone)]
pub struct PlayerInputs {
    pub engine_status: EngineStatus,
    pub rotation_status: RotationStatus,
}

impl Default for PlayerInputs {
    fn default() -> Self {
        PlayerInputs {
            engine_status: EngineStatus::Neutral,
            rotation_status: RotationStatus::NotInSpin,
        }
    }
}
