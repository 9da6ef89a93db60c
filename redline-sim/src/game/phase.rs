use std::time::{Duration, Instant};

pub enum GamePhase {
    // Cars are frozen on the grid while the countdown runs; the step after 0
    // starts the race, so "GO" stays visible for a full second
    CountingDown,
    // Everyone is driving and the judge is watching the line
    Racing,
    // The player has finished; the leaderboard is up but AI cars keep racing
    // so late finishers still get times instead of DNF
    Complete,
}

pub struct CountingDownState {
    pub countdown_value: u32,
    pub next_step: Instant,
}

pub struct RacingState {
    pub start_time: Instant,
}

pub struct CompleteState {
    pub player_time: Duration,
}
