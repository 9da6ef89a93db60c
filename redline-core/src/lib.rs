pub mod car_physics;
pub mod career;
pub mod controls;
pub mod events;
pub mod hud;
pub mod race;
pub mod vehicle;
mod settings;

pub use settings::GLOBAL_CONFIG;

pub type CarId = usize;
