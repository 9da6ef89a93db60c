use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::CarId;

// Announcements a session emits for whatever is embedding it (HUD, logging,
// an on-chain submission channel). Emission is fire-and-forget; the
// simulation never waits on a consumer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum SessionEvent {
    CarFinished {
        id: CarId,
        name: String,
        #[serde(with = "serde_millis")]
        finish_time: Duration,
    },
    // The player crossed the line; time to show the leaderboard
    RaceComplete {
        #[serde(with = "serde_millis")]
        player_time: Duration,
    },
    LevelComplete {
        level: u32,
        coins_collected: u32,
    },
    // The player moved into an adjacent grid cell; deltas are already in the
    // external consumer's 0/1/2 encoding
    CellCrossed {
        delta_x: u8,
        delta_z: u8,
    },
}
