use std::collections::VecDeque;
use std::thread;
use std::time::{Duration, Instant};

use glam::DVec3;
use rand::Rng;

use redline_core::career::level_spawn;
use redline_core::controls::ControlIntent;
use redline_core::events::SessionEvent;
use redline_core::vehicle::VehicleState;
use redline_core::{car_physics::CarPhysics, GLOBAL_CONFIG};

use crate::grid::GridTracker;
use crate::map::OverworldMap;
use crate::physics;
use crate::pickups::{self, CoinField, CAREER_PICKUP_RADIUS};

// Distance between the wheel pair laying skid marks
const TIRE_WIDTH: f64 = 1.0;
const TIRE_MARK_INTERVAL: Duration = Duration::from_millis(50);
const TIRE_MARK_FADE: Duration = Duration::from_millis(8000);
const MAX_TIRE_MARKS: usize = 200;
// Below this speed braking doesn't leave rubber
const BRAKE_MARK_MIN_SPEED: f64 = 0.05;

// The celebration lap between reaching the target and the level wrapping up
const LEVEL_COMPLETE_DELAY: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, Debug)]
pub struct TireMark {
    pub left: DVec3,
    pub right: DVec3,
    pub rotation: f64,
    pub laid_at: Instant,
}

impl TireMark {
    // Linear fade-out; 0 means fully gone
    pub fn opacity(&self, now: Instant) -> f64 {
        let age = now.saturating_duration_since(self.laid_at);
        (1.0 - age.as_secs_f64() / TIRE_MARK_FADE.as_secs_f64()).max(0.0)
    }
}

#[derive(Clone, Copy, PartialEq)]
enum WanderDirection {
    Left,
    Right,
    Straight,
}

// Aimless steering for the post-target auto-drive. The hold time is compared
// against a fresh 0.3 + rand*0.5 draw every tick, so holds average a little
// under half a second.
struct WanderSteer {
    held_for: f64,
    current: WanderDirection,
}

impl WanderSteer {
    fn new() -> Self {
        WanderSteer {
            held_for: 0.0,
            current: WanderDirection::Straight,
        }
    }

    fn next<R: Rng>(&mut self, dt_seconds: f64, rng: &mut R) -> WanderDirection {
        self.held_for += dt_seconds;
        if self.held_for > 0.3 + rng.gen::<f64>() * 0.5 {
            let draw = rng.gen::<f64>();
            self.current = if draw < 0.4 {
                WanderDirection::Left
            } else if draw < 0.8 {
                WanderDirection::Right
            } else {
                WanderDirection::Straight
            };
            self.held_for = 0.0;
        }
        self.current
    }
}

// One overworld drive through a career level: spring-damper terrain, coin
// pickups, the target zone, and the auto-drive celebration once it's reached.
pub struct CareerDrive {
    map: OverworldMap,
    physics: CarPhysics,
    level: u32,

    state: VehicleState,
    coins: CoinField,

    tire_marks: VecDeque<TireMark>,
    last_mark_time: Option<Instant>,

    wander: WanderSteer,
    reached_target_at: Option<Instant>,
    level_complete_emitted: bool,

    cell_tracker: GridTracker,
    events: Vec<SessionEvent>,
}

impl CareerDrive {
    pub fn new(level: u32) -> CareerDrive {
        let map = OverworldMap::load();
        let (spawn_position, spawn_rotation) = level_spawn(level);
        let coin_positions = if level == 0 {
            map.level_zero_coins()
        } else {
            Vec::new()
        };

        CareerDrive {
            map,
            physics: CarPhysics::OVERWORLD,
            level,
            state: VehicleState::at_rest(spawn_position, spawn_rotation),
            coins: CoinField::new(coin_positions, CAREER_PICKUP_RADIUS),
            tire_marks: VecDeque::new(),
            last_mark_time: None,
            wander: WanderSteer::new(),
            reached_target_at: None,
            level_complete_emitted: false,
            cell_tracker: GridTracker::overworld(),
            events: Vec::new(),
        }
    }

    pub fn tick(&mut self, intent: ControlIntent, dt_scale: f64, now: Instant) {
        let mut rng = rand::thread_rng();

        // Once the target is reached the player loses the wheel: forced
        // forward with wandering steer until the level wraps up
        let controls = if self.reached_target_at.is_some() {
            let wander = self.wander.next(dt_scale / 60.0, &mut rng);
            ControlIntent {
                forward: true,
                backward: false,
                left: wander == WanderDirection::Left,
                right: wander == WanderDirection::Right,
            }
        } else {
            intent
        };

        let mut state = physics::advance(&self.state, controls, &self.physics, dt_scale);

        let ground_y = self.map.ground_height(state.position.x, state.position.z);
        let resolved = physics::resolve_spring_height(
            state.position.y,
            ground_y,
            state.vertical_velocity,
            &self.physics,
            dt_scale,
        );
        state.position.y = resolved.y;
        state.vertical_velocity = resolved.vertical_velocity;
        self.state = state;

        if controls.backward && state.planar_speed() > BRAKE_MARK_MIN_SPEED {
            self.lay_tire_marks(now);
        }

        self.coins.collect_near(state.position);

        if self.reached_target_at.is_none()
            && self.map.target_zone.contains(state.position.x, state.position.z)
        {
            self.reached_target_at = Some(now);
            log::info!("target zone reached on level {}", self.level);
        }

        if let Some(reached_at) = self.reached_target_at {
            if !self.level_complete_emitted
                && now.saturating_duration_since(reached_at) >= LEVEL_COMPLETE_DELAY
            {
                self.level_complete_emitted = true;
                self.events.push(SessionEvent::LevelComplete {
                    level: self.level,
                    coins_collected: self.coins.collected_count(),
                });
            }
        }

        if let Some(crossing) = self.cell_tracker.observe(state.position.x, state.position.z) {
            let (delta_x, delta_z) = crossing.contract_deltas();
            self.events.push(SessionEvent::CellCrossed { delta_x, delta_z });
        }
    }

    fn lay_tire_marks(&mut self, now: Instant) {
        let due = match self.last_mark_time {
            Some(last) => now.saturating_duration_since(last) > TIRE_MARK_INTERVAL,
            None => true,
        };
        if !due {
            return;
        }

        let right_dir = DVec3::new(
            self.state.rotation.cos(),
            0.0,
            -self.state.rotation.sin(),
        );
        self.tire_marks.push_back(TireMark {
            left: self.state.position - right_dir * (TIRE_WIDTH / 2.0),
            right: self.state.position + right_dir * (TIRE_WIDTH / 2.0),
            rotation: self.state.rotation,
            laid_at: now,
        });
        if self.tire_marks.len() > MAX_TIRE_MARKS {
            self.tire_marks.pop_front();
        }
        self.last_mark_time = Some(now);
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn position(&self) -> DVec3 {
        self.state.position
    }

    pub fn planar_speed(&self) -> f64 {
        self.state.planar_speed()
    }

    pub fn coins_collected(&self) -> u32 {
        self.coins.collected_count()
    }

    pub fn reached_target(&self) -> bool {
        self.reached_target_at.is_some()
    }

    pub fn tire_marks(&self) -> impl Iterator<Item = &TireMark> {
        self.tire_marks.iter()
    }
}

// Headless intro-level drive: hold the throttle and track the target's X
// until the zone triggers, then let the auto-drive celebrate and wait for
// the level-complete event.
pub fn run_career_demo() {
    let tick_duration = Duration::from_millis(GLOBAL_CONFIG.tick_ms);
    let dt_scale = GLOBAL_CONFIG.tick_ms as f64 * 60.0 / 1000.0;

    let mut drive = CareerDrive::new(0);
    let target_x = drive.map.target_zone.center_x;
    log::info!(
        "career demo: level 0 as {}, driving to the target zone",
        GLOBAL_CONFIG.career_username
    );

    let demo_start = Instant::now();
    let time_limit = Duration::from_secs(GLOBAL_CONFIG.race_time_limit_secs);
    loop {
        let tick_start = Instant::now();

        // Facing +Z (spawn rotation is pi), so steering right reduces X
        let offset = drive.position().x - target_x;
        let intent = ControlIntent {
            forward: true,
            backward: false,
            left: offset < -1.0,
            right: offset > 1.0,
        };
        drive.tick(intent, dt_scale, Instant::now());

        let mut level_done = false;
        for event in drive.drain_events() {
            if let SessionEvent::LevelComplete { level, coins_collected } = event {
                log::info!(
                    "level {} complete: {} coins banked",
                    level,
                    coins_collected
                );
                level_done = true;
            }
        }

        if level_done || demo_start.elapsed() >= time_limit {
            break;
        }
        if let Some(remaining) = tick_duration.checked_sub(tick_start.elapsed()) {
            thread::sleep(remaining);
        }
    }

    log::info!(
        "career demo over: {} coins collected ({} xp), target reached: {}",
        drive.coins_collected(),
        pickups::xp_from_coins(drive.coins_collected()),
        drive.reached_target()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawns_at_the_level_spawn_point() {
        let drive = CareerDrive::new(0);
        assert_eq!(drive.position(), DVec3::new(1081.0, 0.2, 525.0));

        let far_district = CareerDrive::new(3);
        assert_eq!(far_district.position().x, 31437.9);
        // Only the intro level has coins laid out
        assert_eq!(far_district.coins.coins().len(), 0);
    }

    #[test]
    fn coins_collect_while_driving_past() {
        let mut drive = CareerDrive::new(0);
        drive.state.position = DVec3::new(1081.1, 0.5, 555.0);
        drive.state.velocity = DVec3::new(0.0, 0.0, -0.4); // rolling toward the coin line

        // Rolls to within the 2.0 career radius of the first coin
        drive.tick(ControlIntent::coast(), 1.0, Instant::now());
        assert!(drive.coins_collected() >= 1);
    }

    #[test]
    fn reaching_the_target_switches_to_auto_drive() {
        let mut drive = CareerDrive::new(0);
        drive.state.position = DVec3::new(1065.8, 21.9, 752.0);
        drive.tick(ControlIntent::coast(), 1.0, Instant::now());
        assert!(drive.reached_target());

        // The driver's coast intent is ignored now; the car throttles itself
        let speed_before = drive.planar_speed();
        for _ in 0..20 {
            drive.tick(ControlIntent::coast(), 1.0, Instant::now());
        }
        assert!(drive.planar_speed() > speed_before);
    }

    #[test]
    fn level_complete_fires_once_after_the_delay() {
        let mut drive = CareerDrive::new(0);
        let t0 = Instant::now();

        drive.state.position = DVec3::new(1065.8, 21.9, 752.0);
        drive.tick(ControlIntent::coast(), 1.0, t0);
        assert!(drive.reached_target());
        assert!(drive.drain_events().iter().all(|event| {
            !matches!(event, SessionEvent::LevelComplete { .. })
        }));

        // Not yet: the celebration lap is still running
        drive.tick(ControlIntent::coast(), 1.0, t0 + Duration::from_secs(2));
        assert!(drive.drain_events().iter().all(|event| {
            !matches!(event, SessionEvent::LevelComplete { .. })
        }));

        drive.tick(ControlIntent::coast(), 1.0, t0 + Duration::from_secs(3));
        let events = drive.drain_events();
        assert!(events.iter().any(|event| {
            matches!(event, SessionEvent::LevelComplete { level: 0, .. })
        }));

        // And never again
        for extra in 4..10 {
            drive.tick(ControlIntent::coast(), 1.0, t0 + Duration::from_secs(extra));
        }
        assert!(drive.drain_events().iter().all(|event| {
            !matches!(event, SessionEvent::LevelComplete { .. })
        }));
    }

    #[test]
    fn braking_at_speed_lays_fading_tire_marks() {
        let mut drive = CareerDrive::new(0);
        let t0 = Instant::now();
        let brake = ControlIntent {
            backward: true,
            ..ControlIntent::default()
        };

        drive.state.velocity = DVec3::new(0.0, 0.0, 0.4);
        drive.tick(brake, 1.0, t0);
        assert_eq!(drive.tire_marks().count(), 1);

        let mark = *drive.tire_marks().next().unwrap();
        // Wheel pair straddles the car along the right basis vector
        assert!((mark.left.distance(mark.right) - TIRE_WIDTH).abs() < 1e-9);
        assert!((mark.opacity(t0) - 1.0).abs() < 1e-9);
        assert!((mark.opacity(t0 + Duration::from_secs(4)) - 0.5).abs() < 1e-9);
        assert_eq!(mark.opacity(t0 + Duration::from_secs(9)), 0.0);

        // Marks respect the 50ms cadence
        drive.state.velocity = DVec3::new(0.0, 0.0, 0.4);
        drive.tick(brake, 1.0, t0 + Duration::from_millis(10));
        assert_eq!(drive.tire_marks().count(), 1);
        drive.state.velocity = DVec3::new(0.0, 0.0, 0.4);
        drive.tick(brake, 1.0, t0 + Duration::from_millis(60));
        assert_eq!(drive.tire_marks().count(), 2);
    }

    #[test]
    fn tire_mark_history_is_bounded() {
        let mut drive = CareerDrive::new(0);
        let t0 = Instant::now();
        let brake = ControlIntent {
            backward: true,
            ..ControlIntent::default()
        };

        for tick in 0..250 {
            // Keep the car fast enough to leave rubber every time
            drive.state.velocity = DVec3::new(0.0, 0.0, 0.4);
            drive.tick(brake, 1.0, t0 + Duration::from_millis(60 * tick));
        }
        assert_eq!(drive.tire_marks().count(), MAX_TIRE_MARKS);
    }

    #[test]
    fn slow_braking_leaves_no_marks() {
        let mut drive = CareerDrive::new(0);
        let brake = ControlIntent {
            backward: true,
            ..ControlIntent::default()
        };
        // Essentially stopped
        drive.tick(brake, 1.0, Instant::now());
        assert_eq!(drive.tire_marks().count(), 0);
    }
}
