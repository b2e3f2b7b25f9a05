use config::{Config, ConfigError, File};
use lazy_static::lazy_static;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct Settings {
    pub port: String,
    pub server_address: String,
    pub server_tick_ms: u64,

    pub max_car_speed: f64,
    pub car_accelerator: f64,
    pub car_spin: f64,
    pub fast_multiplier: f64,
    pub slow_multiplier: f64,
    pub fall_acceleration: f64,

    pub lap_count: u8,
    pub checkpoint_radius: f64,
    pub track_point_count: usize,
    pub track_scale: f64,
    pub track_half_width: f64,
    pub ai_car_amount: usize,
}

impl Settings {
    fn new() -> Result<Settings, ConfigError> {
        let config = Config::builder()
            .set_default("port", "55555")?
            .set_default("server_address", "127.0.0.1")?
            .set_default("server_tick_ms", 30)?
            .set_default("max_car_speed", 30.0)?
            .set_default("car_accelerator", 10.0)?
            .set_default("car_spin", 1.2)?
            .set_default("fast_multiplier", 2.0)?
            .set_default("slow_multiplier", 0.5)?
            .set_default("fall_acceleration", 10.0)?
            .set_default("lap_count", 3)?
            .set_default("checkpoint_radius", 20.0)?
            .set_default("track_point_count", 10)?
            .set_default("track_scale", 4.0)?
            .set_default("track_half_width", 8.0)?
            .set_default("ai_car_amount", 1)?
            .add_source(File::with_name("config.yaml").required(false))
            .build()?;

        config.try_deserialize()
    }
}

lazy_static! {
    pub static ref GLOBAL_CONFIG: Settings = Settings::new().expect("failed to read config file");
}
