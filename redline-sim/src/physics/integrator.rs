use glam::DVec3;

use redline_core::car_physics::CarPhysics;
use redline_core::controls::ControlIntent;
use redline_core::vehicle::VehicleState;

// A car below this speed gets no brake scrubbing (it's effectively stopped)
const BRAKE_SPEED_EPSILON: f64 = 0.01;

/* Given a car's kinematic state and what its driver wants this tick, compute
 * and return next tick's state. Pure: no I/O, no randomness, nothing mutated.
 *
 * The stages run in a fixed order and each consumes the previous one's
 * output; reordering them changes handling, so don't. Two quirks are kept on
 * purpose for behavioral parity:
 *  - the rotation step adds raw angular velocity without scaling by dt_scale,
 *    so turn rate is only dt-corrected through the steering accumulation;
 *  - left beats right when both are held, and backward stacks with forward
 *    at half strength rather than cancelling.
 */
pub fn advance(
    state: &VehicleState,
    intent: ControlIntent,
    physics: &CarPhysics,
    dt_scale: f64,
) -> VehicleState {
    let mut velocity = state.velocity;
    let mut angular_velocity = state.angular_velocity;
    let mut rotation = state.rotation;

    let current_speed = state.planar_speed();

    // Less steering authority the faster we go
    let speed_factor = physics.max_steer_factor
        - (current_speed / physics.max_speed) * (physics.max_steer_factor - physics.min_steer_factor);
    let effective_max_steer = physics.max_steer_angle * speed_factor;

    if intent.left {
        angular_velocity += physics.steer_speed * dt_scale;
        if angular_velocity > effective_max_steer {
            angular_velocity = effective_max_steer;
        }
    } else if intent.right {
        angular_velocity -= physics.steer_speed * dt_scale;
        if angular_velocity < -effective_max_steer {
            angular_velocity = -effective_max_steer;
        }
    } else {
        angular_velocity *= physics.steer_friction;
    }

    rotation += angular_velocity;

    if intent.forward {
        velocity.x -= rotation.sin() * physics.acceleration * dt_scale;
        velocity.z -= rotation.cos() * physics.acceleration * dt_scale;
    }
    if intent.backward {
        // Reverse is half-strength
        velocity.x += rotation.sin() * physics.acceleration * 0.5 * dt_scale;
        velocity.z += rotation.cos() * physics.acceleration * 0.5 * dt_scale;
    }

    // Decompose into heading-aligned components and scrub the sideways one;
    // reconstruction zeroes any y contribution, vertical motion lives elsewhere
    let forward_dir = DVec3::new(-rotation.sin(), 0.0, -rotation.cos());
    let right_dir = DVec3::new(rotation.cos(), 0.0, -rotation.sin());

    let forward_velocity = velocity.dot(forward_dir);
    let lateral_velocity = velocity.dot(right_dir) * physics.lateral_friction;
    velocity = forward_dir * forward_velocity + right_dir * lateral_velocity;

    let adjusted_speed = (velocity.x * velocity.x + velocity.z * velocity.z).sqrt();
    if adjusted_speed > physics.max_speed {
        velocity *= physics.max_speed / adjusted_speed;
    }

    if intent.backward && current_speed > BRAKE_SPEED_EPSILON {
        velocity *= physics.brake_force;
    } else if !intent.forward && !intent.backward {
        velocity *= physics.deceleration;
    } else {
        velocity *= physics.forward_friction;
    }

    let mut position = state.position;
    position.x += velocity.x;
    position.z += velocity.z;

    VehicleState {
        velocity,
        angular_velocity,
        position,
        rotation,
        vertical_velocity: state.vertical_velocity,
    }
}
