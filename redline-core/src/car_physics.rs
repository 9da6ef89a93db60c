use serde::{Deserialize, Serialize};

// All cars in a session share one profile; a profile is always passed in
// explicitly so the track-scale and overworld-scale worlds can coexist.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CarPhysics {
    // Movement
    pub max_speed: f64,
    pub acceleration: f64,
    pub deceleration: f64, // applied when coasting
    pub brake_force: f64,

    // Steering
    pub max_steer_angle: f64,
    pub steer_speed: f64,
    pub steer_friction: f64,

    // Grip and friction
    pub lateral_friction: f64, // tire grip, resists sideways slide
    pub forward_friction: f64, // rolling resistance

    // Speed-dependent steering: full authority at rest, reduced at max speed
    pub min_steer_factor: f64,
    pub max_steer_factor: f64,

    pub car_height_offset: f64,

    // Vertical suspension (only exercised by the spring-damper terrain mode)
    pub vertical_stiffness: f64,
    pub vertical_damping: f64,
    pub max_vertical_speed: f64,
}

// Speedometer reads 180 km/h when a car is at its speed cap.
const TOP_SPEED_KMH: f64 = 180.0;

impl CarPhysics {
    pub const TRACK: CarPhysics = CarPhysics {
        max_speed: 1.2,
        acceleration: 0.05,
        deceleration: 0.96,
        brake_force: 0.85,
        max_steer_angle: 0.03,
        steer_speed: 0.0015,
        steer_friction: 0.93,
        lateral_friction: 0.85,
        forward_friction: 0.97,
        min_steer_factor: 0.6,
        max_steer_factor: 1.0,
        car_height_offset: 2.26,
        vertical_stiffness: 0.20,
        vertical_damping: 0.60,
        max_vertical_speed: 1.0,
    };

    // Same handling, distances scaled ~100x down to match the overworld map.
    pub const OVERWORLD: CarPhysics = CarPhysics {
        max_speed: 0.5,
        acceleration: 0.0065,
        deceleration: 0.96,
        brake_force: 0.85,
        max_steer_angle: 0.03,
        steer_speed: 0.0015,
        steer_friction: 0.93,
        lateral_friction: 0.85,
        forward_friction: 0.97,
        min_steer_factor: 0.6,
        max_steer_factor: 1.0,
        car_height_offset: 0.0226,
        vertical_stiffness: 0.20,
        vertical_damping: 0.60,
        max_vertical_speed: 1.0,
    };

    pub fn kmh_per_unit(&self) -> f64 {
        TOP_SPEED_KMH / self.max_speed
    }
}
