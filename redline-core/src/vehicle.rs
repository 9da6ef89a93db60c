use glam::DVec3;
use serde::{Deserialize, Serialize};

// The full kinematic state of one car. Owned by exactly one simulation loop;
// each physics step consumes the current value and returns a fresh one.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct VehicleState {
    pub velocity: DVec3,
    pub angular_velocity: f64, // signed yaw rate, radians per tick

    pub position: DVec3,
    pub rotation: f64, // yaw in radians; 0 faces -Z

    // Spring-damper state for terrain following; untouched by the integrator
    pub vertical_velocity: f64,
}

impl VehicleState {
    pub fn at_rest(position: DVec3, rotation: f64) -> Self {
        VehicleState {
            velocity: DVec3::ZERO,
            angular_velocity: 0.0,
            position,
            rotation,
            vertical_velocity: 0.0,
        }
    }

    // Speed on the XZ plane; vertical motion doesn't count toward the cap
    pub fn planar_speed(&self) -> f64 {
        (self.velocity.x * self.velocity.x + self.velocity.z * self.velocity.z).sqrt()
    }
}
