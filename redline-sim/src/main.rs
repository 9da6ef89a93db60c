mod ai;
mod career;
mod finish_line;
mod game;
mod grid;
mod map;
mod physics;
mod pickups;
mod progress;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // a full minigame race, then an intro-level career drive
    game::run_race_demo();
    career::run_career_demo();
}
