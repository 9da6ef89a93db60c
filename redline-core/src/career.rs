use std::time::{SystemTime, UNIX_EPOCH};

use glam::DVec3;
use serde::{Deserialize, Serialize};

// Levels run 0 (intro) through 5.
pub const MAX_LEVEL: u32 = 5;

// Field names stay camelCase so saves written by older builds still decode;
// totalCoins defaults because it postdates the first save format.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerProgress {
    pub username: String,
    pub current_level: u32,
    pub completed_levels: Vec<u32>,
    // Last-played, milliseconds since the unix epoch
    pub timestamp: u64,
    #[serde(default)]
    pub total_coins: u32,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CareerSave {
    pub players: Vec<CareerProgress>,
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

impl CareerSave {
    pub fn decode(data: &str) -> serde_json::Result<CareerSave> {
        serde_json::from_str(data)
    }

    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn find_player(&self, username: &str) -> Option<&CareerProgress> {
        self.players
            .iter()
            .find(|player| player.username.eq_ignore_ascii_case(username))
    }

    pub fn create_player(&mut self, username: &str) -> &CareerProgress {
        self.players.push(CareerProgress {
            username: username.to_string(),
            current_level: 0,
            completed_levels: Vec::new(),
            timestamp: now_millis(),
            total_coins: 0,
        });
        self.players.last().unwrap()
    }

    pub fn update_progress(&mut self, username: &str, current_level: u32, completed: &[u32]) {
        if let Some(player) = self.find_player_mut(username) {
            player.current_level = current_level;
            player.completed_levels = completed.to_vec();
            player.timestamp = now_millis();
        }
    }

    // Record a finished level: remember it, bank its coins, and advance the
    // current level while below the cap.
    pub fn complete_level(&mut self, username: &str, level: u32, coins_collected: u32) {
        if let Some(player) = self.find_player_mut(username) {
            if !player.completed_levels.contains(&level) {
                player.completed_levels.push(level);
                player.completed_levels.sort_unstable();
            }
            player.total_coins += coins_collected;
            if level < MAX_LEVEL {
                player.current_level = level + 1;
            }
            player.timestamp = now_millis();
        }
    }

    fn find_player_mut(&mut self, username: &str) -> Option<&mut CareerProgress> {
        self.players
            .iter_mut()
            .find(|player| player.username.eq_ignore_ascii_case(username))
    }
}

// Where each level drops the player into the overworld. Levels 0 and 1 share
// the intro spawn; 2 through 5 march along X in the far district.
pub fn level_spawn(level: u32) -> (DVec3, f64) {
    match level {
        0 | 1 => (DVec3::new(1081.0, 0.2, 525.0), std::f64::consts::PI),
        2..=5 => (
            DVec3::new(31337.9 + 100.0 * (level - 2) as f64, 20.0, -10333.3),
            std::f64::consts::PI,
        ),
        _ => panic!("no spawn for career level {}", level),
    }
}
