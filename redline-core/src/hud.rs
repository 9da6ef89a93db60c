use crate::car_physics::CarPhysics;

// Pure display helpers for whatever HUD ends up drawing them. No state here;
// everything derives from the published records each frame.

pub fn speed_kmh(planar_speed: f64, physics: &CarPhysics) -> u32 {
    (planar_speed * physics.kmh_per_unit()).floor() as u32
}

// m:ss.cc race clock
pub fn format_race_clock(elapsed_ms: u64) -> String {
    let total_seconds = elapsed_ms / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    let centis = (elapsed_ms % 1000) / 10;
    format!("{}:{:02}.{:02}", minutes, seconds, centis)
}

// 8-way compass from yaw. Yaw 0 faces -Z (north); increasing yaw turns the
// car toward the west, so the rose runs counterclockwise.
pub fn compass_direction(rotation: f64) -> &'static str {
    const DIRECTIONS: [&str; 8] = ["N", "NW", "W", "SW", "S", "SE", "E", "NE"];
    let degrees = ((rotation.to_degrees() % 360.0) + 360.0) % 360.0;
    let index = ((degrees / 45.0).round() as usize) % 8;
    DIRECTIONS[index]
}

pub fn placement_suffix(placement: usize) -> &'static str {
    // Teens are always "th"
    if (11..=13).contains(&(placement % 100)) {
        return "th";
    }
    match placement % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}
