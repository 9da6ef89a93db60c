use redline_core::car_physics::CarPhysics;

// Flat overworld roads sit at this height; cars lock to it to avoid bobbing
pub const BASE_ROAD_HEIGHT: f64 = 21.9;

// Height gap that counts as a ramp/bridge approach rather than road noise
const HEIGHT_THRESHOLD: f64 = 3.0;
// Ground this far above the base road is an elevated structure
const ELEVATED_MARGIN: f64 = 5.0;

// One surface directly below a car, as reported by the world-geometry oracle.
// Helper geometry (debug grids and the like) is marked non-drivable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceHit {
    pub height: f64,
    pub drivable: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerticalResolution {
    pub y: f64,
    pub vertical_velocity: f64,
}

// Racing-track mode: of everything under the car, stand on the LOWEST
// drivable surface. Barriers and obstacles sit above the road, and picking
// the lowest hit keeps cars from riding on top of them. No ground at all
// means assume ground level 0.
pub fn resolve_raycast_height(hits: &[SurfaceHit], physics: &CarPhysics) -> f64 {
    let mut road_height: Option<f64> = None;

    for hit in hits {
        if !hit.drivable {
            continue;
        }
        road_height = Some(match road_height {
            Some(lowest) if lowest <= hit.height => lowest,
            _ => hit.height,
        });
    }

    road_height.unwrap_or(0.0) + physics.car_height_offset
}

// Overworld mode: ramps and bridges get a damped spring toward the target
// height; ordinary flat road hard-snaps to the base height with the spring
// state zeroed.
pub fn resolve_spring_height(
    current_y: f64,
    ground_y: f64,
    vertical_velocity: f64,
    physics: &CarPhysics,
    dt_scale: f64,
) -> VerticalResolution {
    let target_y = ground_y + physics.car_height_offset;
    let height_difference = target_y - current_y;

    let is_elevated = ground_y > BASE_ROAD_HEIGHT + ELEVATED_MARGIN;
    let is_gradual_change = height_difference.abs() > HEIGHT_THRESHOLD;

    if is_elevated || is_gradual_change {
        let mut new_vertical_velocity =
            vertical_velocity + height_difference * physics.vertical_stiffness * dt_scale;
        new_vertical_velocity *= physics.vertical_damping;
        new_vertical_velocity = new_vertical_velocity
            .clamp(-physics.max_vertical_speed, physics.max_vertical_speed);

        VerticalResolution {
            y: current_y + new_vertical_velocity * dt_scale,
            vertical_velocity: new_vertical_velocity,
        }
    } else {
        VerticalResolution {
            y: BASE_ROAD_HEIGHT + physics.car_height_offset,
            vertical_velocity: 0.0,
        }
    }
}
