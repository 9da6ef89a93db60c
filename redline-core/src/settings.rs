use config::{Config, ConfigError, File};
use lazy_static::lazy_static;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct Settings {
    pub tick_ms: u64,
    pub ai_driver_count: usize,
    pub countdown_seconds: u32,
    pub race_time_limit_secs: u64,
    pub career_username: String,
}

impl Settings {
    fn new() -> Result<Settings, ConfigError> {
        let config = Config::builder()
            .set_default("tick_ms", 16)?
            .set_default("ai_driver_count", 6)?
            .set_default("countdown_seconds", 3)?
            .set_default("race_time_limit_secs", 120)?
            .set_default("career_username", "player")?
            .add_source(File::with_name("config.yaml").required(false))
            .build()?;

        config.try_deserialize()
    }
}

lazy_static! {
    pub static ref GLOBAL_CONFIG: Settings = Settings::new().expect("failed to read config file");
}
