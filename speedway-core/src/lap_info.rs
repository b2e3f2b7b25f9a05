pub type LapNumber = u8;
pub type CheckpointID = u64;
pub type Placement = u8;
