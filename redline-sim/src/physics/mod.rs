mod integrator;
mod terrain;

pub use integrator::advance;
pub use terrain::{
    resolve_raycast_height, resolve_spring_height, SurfaceHit, VerticalResolution,
    BASE_ROAD_HEIGHT,
};
