use glam::DVec3;

use crate::finish_line::FinishLine;
use crate::physics::{SurfaceHit, BASE_ROAD_HEIGHT};

// The racing world as plain data. Surfaces are horizontal slabs; the terrain
// follower queries whatever lies under a car's (x, z).
#[derive(Clone, Copy, Debug)]
pub struct SurfacePatch {
    pub min_x: f64,
    pub max_x: f64,
    pub min_z: f64,
    pub max_z: f64,
    pub height: f64,
    pub drivable: bool,
}

impl SurfacePatch {
    fn covers(&self, x: f64, z: f64) -> bool {
        x >= self.min_x && x <= self.max_x && z >= self.min_z && z <= self.max_z
    }
}

#[derive(Clone, Copy, Debug)]
pub struct StartSlot {
    pub name: &'static str,
    pub position: DVec3,
    pub rotation: f64,
}

pub struct TrackMap {
    pub finish_line: FinishLine,
    pub lane_center_x: f64,
    pub start_z: f64,
    pub lap_length: f64,
    pub start_grid: Vec<StartSlot>,
    surfaces: Vec<SurfacePatch>,
}

const HALF_PI: f64 = std::f64::consts::FRAC_PI_2;
const PI: f64 = std::f64::consts::PI;

impl TrackMap {
    pub fn load() -> TrackMap {
        TrackMap {
            finish_line: FinishLine {
                center_x: 1194.1,
                half_width: 15.0,
                z: 1493.0,
                thickness: 3.0,
                departure_distance: 50.0,
            },
            lane_center_x: 1194.1,
            start_z: 1495.0,
            lap_length: 1000.0,
            start_grid: vec![
                StartSlot {
                    name: "You",
                    position: DVec3::new(1191.2, 1.3, 1494.8),
                    rotation: 0.0,
                },
                StartSlot {
                    name: "Max Thunder",
                    position: DVec3::new(1188.6, 1.3, 1498.4),
                    rotation: -HALF_PI,
                },
                StartSlot {
                    name: "Luna Speed",
                    position: DVec3::new(1178.9, 1.3, 1502.4),
                    rotation: -HALF_PI,
                },
                StartSlot {
                    name: "Turbo Smith",
                    position: DVec3::new(1168.7, 1.3, 1502.4),
                    rotation: -HALF_PI,
                },
                StartSlot {
                    name: "Blaze Cruz",
                    position: DVec3::new(1164.4, 1.3, 1495.3),
                    rotation: PI,
                },
                StartSlot {
                    name: "Nitro Nova",
                    position: DVec3::new(1172.2, 1.3, 1495.3),
                    rotation: -HALF_PI,
                },
                StartSlot {
                    name: "Storm Racer",
                    position: DVec3::new(1183.9, 1.3, 1495.3),
                    rotation: -HALF_PI,
                },
            ],
            surfaces: vec![
                // The road itself
                SurfacePatch {
                    min_x: 1100.0,
                    max_x: 1290.0,
                    min_z: 300.0,
                    max_z: 1560.0,
                    height: 0.0,
                    drivable: true,
                },
                // Debug floor grid, slightly above the road so it would win a
                // nearest-hit query; never counts as ground
                SurfacePatch {
                    min_x: 1000.0,
                    max_x: 1400.0,
                    min_z: 200.0,
                    max_z: 1600.0,
                    height: 0.01,
                    drivable: false,
                },
                // Barrier slabs along both track edges
                SurfacePatch {
                    min_x: 1146.0,
                    max_x: 1150.0,
                    min_z: 300.0,
                    max_z: 1560.0,
                    height: 3.2,
                    drivable: true,
                },
                SurfacePatch {
                    min_x: 1238.0,
                    max_x: 1242.0,
                    min_z: 300.0,
                    max_z: 1560.0,
                    height: 3.2,
                    drivable: true,
                },
            ],
        }
    }

    // Everything a downward ray from above (x, z) would strike
    pub fn surfaces_below(&self, x: f64, z: f64) -> Vec<SurfaceHit> {
        self.surfaces
            .iter()
            .filter(|patch| patch.covers(x, z))
            .map(|patch| SurfaceHit {
                height: patch.height,
                drivable: patch.drivable,
            })
            .collect()
    }

    // Rough forward-distance estimate; clamped below at 0 but deliberately
    // allowed past 1, it's a readout and not a finish condition
    pub fn lap_progress(&self, z: f64) -> f64 {
        ((self.start_z - z) / self.lap_length).max(0.0)
    }
}

// An elevated span in the overworld (bridge deck or ramp). Height runs
// linearly from min_height at min_z to max_height at max_z.
#[derive(Clone, Copy, Debug)]
pub struct ElevatedSpan {
    pub min_x: f64,
    pub max_x: f64,
    pub min_z: f64,
    pub max_z: f64,
    pub min_height: f64,
    pub max_height: f64,
}

impl ElevatedSpan {
    fn covers(&self, x: f64, z: f64) -> bool {
        x >= self.min_x && x <= self.max_x && z >= self.min_z && z <= self.max_z
    }

    fn height_at(&self, z: f64) -> f64 {
        let along = (z - self.min_z) / (self.max_z - self.min_z);
        self.min_height + along * (self.max_height - self.min_height)
    }
}

// Driving toward this box completes the level
#[derive(Clone, Copy, Debug)]
pub struct TargetZone {
    pub center_x: f64,
    pub center_z: f64,
    pub half_extent: f64,
}

impl TargetZone {
    pub fn contains(&self, x: f64, z: f64) -> bool {
        x >= self.center_x - self.half_extent
            && x <= self.center_x + self.half_extent
            && z >= self.center_z - self.half_extent
            && z <= self.center_z + self.half_extent
    }
}

pub struct OverworldMap {
    pub target_zone: TargetZone,
    ramps: Vec<ElevatedSpan>,
}

impl OverworldMap {
    pub fn load() -> OverworldMap {
        OverworldMap {
            target_zone: TargetZone {
                center_x: 1065.8,
                center_z: 752.0,
                half_extent: 10.0,
            },
            ramps: vec![
                // Bridge approach climbing north out of the intro district
                ElevatedSpan {
                    min_x: 1050.0,
                    max_x: 1100.0,
                    min_z: 800.0,
                    max_z: 860.0,
                    min_height: BASE_ROAD_HEIGHT,
                    max_height: BASE_ROAD_HEIGHT + 12.0,
                },
                // The bridge deck itself
                ElevatedSpan {
                    min_x: 1050.0,
                    max_x: 1100.0,
                    min_z: 860.0,
                    max_z: 980.0,
                    min_height: BASE_ROAD_HEIGHT + 12.0,
                    max_height: BASE_ROAD_HEIGHT + 12.0,
                },
            ],
        }
    }

    // Height oracle for the spring-damper follower. Overlapping ramps resolve
    // to the tallest surface, the one a car would actually stand on.
    pub fn ground_height(&self, x: f64, z: f64) -> f64 {
        self.ramps
            .iter()
            .filter(|ramp| ramp.covers(x, z))
            .map(|ramp| ramp.height_at(z))
            .fold(BASE_ROAD_HEIGHT, f64::max)
    }

    // The intro level's coin run: a line down the spawn road, a curve, then a
    // trail leading into the target zone.
    pub fn level_zero_coins(&self) -> Vec<DVec3> {
        vec![
            DVec3::new(1081.1, 0.5, 556.3),
            DVec3::new(1081.1, 0.5, 561.3),
            DVec3::new(1081.1, 0.5, 566.3),
            DVec3::new(1081.1, 0.5, 571.3),
            DVec3::new(1081.1, 0.5, 576.3),
            DVec3::new(1081.1, 0.5, 580.0),
            DVec3::new(1080.6, 0.2, 611.2),
            DVec3::new(1080.6, 0.2, 616.2),
            DVec3::new(1080.6, 0.2, 621.2),
            DVec3::new(1075.9, 0.2, 634.6),
            DVec3::new(1074.0, 0.2, 638.8),
            DVec3::new(1071.4, 0.2, 644.5),
            DVec3::new(1066.1, 0.2, 664.6),
            DVec3::new(1066.1, 0.2, 674.6),
            DVec3::new(1066.1, 0.2, 684.6),
            DVec3::new(1066.1, 0.2, 694.6),
            DVec3::new(1066.1, 0.2, 704.6),
            DVec3::new(1065.8, 0.2, 727.7),
            DVec3::new(1065.8, 0.2, 732.0),
            DVec3::new(1065.8, 0.2, 738.0),
            DVec3::new(1065.8, 0.2, 744.0),
        ]
    }
}
