use std::time::Duration;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::CarId;

// One published entry per participating car, rebuilt whenever a race is
// (re)initialized. The simulation loop is the only writer of a car's record;
// HUD and leaderboard readers only read.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RaceCarRecord {
    pub id: CarId,
    pub name: String,
    pub position: DVec3,
    pub rotation: f64,
    // Set exactly once when the car crosses the finish line, then immutable
    // for the rest of the race. Milliseconds on the wire.
    #[serde(with = "serde_millis")]
    pub finish_time: Option<Duration>,
    pub lap_progress: f64,
}

impl RaceCarRecord {
    pub fn new(id: CarId, name: &str, position: DVec3, rotation: f64) -> Self {
        RaceCarRecord {
            id,
            name: name.to_string(),
            position,
            rotation,
            finish_time: None,
            lap_progress: 0.0,
        }
    }
}
