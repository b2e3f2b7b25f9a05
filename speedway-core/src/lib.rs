pub mod lap_info;
pub mod networking;
pub mod player_inputs;
mod settings;

pub use settings::GLOBAL_CONFIG;

// Cars are addressed by their wire peer id; 255 is reserved as "unassigned"
pub type CarID = u8;
