use std::thread;
use std::time::{Duration, Instant};

use glam::DVec3;

use redline_core::controls::ControlIntent;
use redline_core::events::SessionEvent;
use redline_core::hud;
use redline_core::race::RaceCarRecord;
use redline_core::vehicle::VehicleState;
use redline_core::{car_physics::CarPhysics, CarId, GLOBAL_CONFIG};

use crate::ai::{self, AiPersonality};
use crate::finish_line::FinishJudge;
use crate::grid::GridTracker;
use crate::map::TrackMap;
use crate::physics;
use crate::pickups::{self, CoinField, RACING_PICKUP_RADIUS};
use crate::progress;

use self::phase::*;

mod phase;

pub const PLAYER_CAR: CarId = 0;

// A driver is either the embedding loop's input or an AI with a personality;
// an AI car without a personality is unrepresentable by construction
enum Driver {
    Player,
    Ai(AiPersonality),
}

struct RaceCar {
    driver: Driver,
    state: VehicleState,
}

// One racing minigame: countdown, seven-car field, finish judging, standings.
// Everything runs synchronously inside tick(); the embedding loop owns pacing
// and drains events after each call.
pub struct RaceSession {
    map: TrackMap,
    physics: CarPhysics,

    phase: GamePhase,
    cars: Vec<RaceCar>,
    records: Vec<RaceCarRecord>,

    judge: FinishJudge,
    coins: CoinField,
    cell_tracker: GridTracker,
    events: Vec<SessionEvent>,

    counting_down_state: CountingDownState,
    racing_state: RacingState,
    complete_state: CompleteState,
}

impl RaceSession {
    pub fn new(now: Instant) -> RaceSession {
        let map = TrackMap::load();
        let judge = FinishJudge::new(map.finish_line);
        let mut session = RaceSession {
            map,
            physics: CarPhysics::TRACK,
            phase: GamePhase::CountingDown,
            cars: Vec::new(),
            records: Vec::new(),
            judge,
            coins: CoinField::new(Vec::new(), RACING_PICKUP_RADIUS),
            cell_tracker: GridTracker::racing(),
            events: Vec::new(),
            counting_down_state: CountingDownState {
                countdown_value: GLOBAL_CONFIG.countdown_seconds,
                next_step: now,
            },
            racing_state: RacingState { start_time: now },
            complete_state: CompleteState {
                player_time: Duration::ZERO,
            },
        };
        session.reset(now);
        session
    }

    // Synchronous teardown: everyone back on the grid at rest, fresh AI
    // personalities, judge cleared, countdown rewound. Nothing to await.
    pub fn reset(&mut self, now: Instant) {
        let mut rng = rand::thread_rng();
        let seats = (1 + GLOBAL_CONFIG.ai_driver_count).min(self.map.start_grid.len());

        self.cars.clear();
        self.records.clear();
        for (id, slot) in self.map.start_grid.iter().take(seats).enumerate() {
            self.cars.push(RaceCar {
                driver: if id == PLAYER_CAR {
                    Driver::Player
                } else {
                    Driver::Ai(AiPersonality::issue(&mut rng))
                },
                state: VehicleState::at_rest(slot.position, slot.rotation),
            });
            self.records
                .push(RaceCarRecord::new(id, slot.name, slot.position, slot.rotation));
        }

        self.judge.reset();
        self.coins = CoinField::new(Vec::new(), RACING_PICKUP_RADIUS);
        self.cell_tracker = GridTracker::racing();
        self.events.clear();
        self.phase = GamePhase::CountingDown;
        self.counting_down_state = CountingDownState {
            countdown_value: GLOBAL_CONFIG.countdown_seconds,
            next_step: now + Duration::from_secs(1),
        };
    }

    pub fn tick(&mut self, player_intent: ControlIntent, dt_scale: f64, now: Instant) {
        match self.phase {
            GamePhase::CountingDown => {
                while now >= self.counting_down_state.next_step {
                    let step_time = self.counting_down_state.next_step;
                    self.counting_down_state.next_step += Duration::from_secs(1);

                    if self.counting_down_state.countdown_value > 0 {
                        self.counting_down_state.countdown_value -= 1;
                        log::debug!(
                            "countdown: {}",
                            self.counting_down_state.countdown_value
                        );
                    } else {
                        // The step after 0 fires the starting gun
                        self.racing_state = RacingState {
                            start_time: step_time,
                        };
                        self.judge.start(step_time);
                        self.phase = GamePhase::Racing;
                        log::info!("race started");
                        break;
                    }
                }
            }
            // The field keeps simulating after the player finishes so late AI
            // cars still record times
            GamePhase::Racing | GamePhase::Complete => {
                self.simulate(player_intent, dt_scale, now);
            }
        }
    }

    fn simulate(&mut self, player_intent: ControlIntent, dt_scale: f64, now: Instant) {
        let mut rng = rand::thread_rng();

        for (id, car) in self.cars.iter_mut().enumerate() {
            let intent = match &car.driver {
                Driver::Player => player_intent,
                Driver::Ai(personality) => ai::decide(
                    car.state.position.x,
                    self.map.lane_center_x,
                    personality,
                    &mut rng,
                ),
            };

            let mut state = physics::advance(&car.state, intent, &self.physics, dt_scale);
            let hits = self.map.surfaces_below(state.position.x, state.position.z);
            state.position.y = physics::resolve_raycast_height(&hits, &self.physics);
            car.state = state;

            // Publish: each loop writes only its own record
            let record = &mut self.records[id];
            record.position = state.position;
            record.rotation = state.rotation;
            record.lap_progress = self.map.lap_progress(state.position.z);
        }

        // The judge runs over the finished snapshot of all records
        for finisher in self.judge.on_tick(&mut self.records, now) {
            let record = &self.records[finisher];
            let finish_time = record.finish_time.unwrap();
            log::info!(
                "{} finished in {}",
                record.name,
                hud::format_race_clock(finish_time.as_millis() as u64)
            );
            self.events.push(SessionEvent::CarFinished {
                id: finisher,
                name: record.name.clone(),
                finish_time,
            });

            if finisher == PLAYER_CAR && matches!(self.phase, GamePhase::Racing) {
                self.complete_state = CompleteState {
                    player_time: finish_time,
                };
                self.phase = GamePhase::Complete;
                self.events.push(SessionEvent::RaceComplete {
                    player_time: finish_time,
                });
            }
        }

        // Only the player sweeps coins; AI cars drive through them
        let player_position = self.cars[PLAYER_CAR].state.position;
        self.coins.collect_near(player_position);

        if let Some(crossing) = self.cell_tracker.observe(player_position.x, player_position.z) {
            let (delta_x, delta_z) = crossing.contract_deltas();
            self.events.push(SessionEvent::CellCrossed { delta_x, delta_z });
        }
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    // Coins arrive from whoever embeds the session (the track layout, a
    // reward drop); merging keeps whatever is still uncollected
    pub fn spawn_coins(&mut self, positions: Vec<DVec3>) {
        self.coins.spawn(positions);
    }

    pub fn coins_collected(&self) -> u32 {
        self.coins.collected_count()
    }

    pub fn records(&self) -> &[RaceCarRecord] {
        &self.records
    }

    pub fn standings(&self) -> Vec<&RaceCarRecord> {
        progress::standings(&self.records)
    }

    pub fn player_record(&self) -> &RaceCarRecord {
        &self.records[PLAYER_CAR]
    }

    pub fn countdown_value(&self) -> Option<u32> {
        match self.phase {
            GamePhase::CountingDown => Some(self.counting_down_state.countdown_value),
            _ => None,
        }
    }

    pub fn is_racing(&self) -> bool {
        matches!(self.phase, GamePhase::Racing | GamePhase::Complete)
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.phase, GamePhase::Complete)
    }

    pub fn player_finish_time(&self) -> Option<Duration> {
        match self.phase {
            GamePhase::Complete => Some(self.complete_state.player_time),
            _ => None,
        }
    }

    pub fn lane_center_x(&self) -> f64 {
        self.map.lane_center_x
    }
}

// Headless demo race: the scripted player holds the throttle and tracks the
// lane center like a zero-offset AI would.
pub fn run_race_demo() {
    let tick_duration = Duration::from_millis(GLOBAL_CONFIG.tick_ms);
    let dt_scale = GLOBAL_CONFIG.tick_ms as f64 * 60.0 / 1000.0;
    let time_limit = Duration::from_secs(GLOBAL_CONFIG.race_time_limit_secs);

    let mut session = RaceSession::new(Instant::now());
    // A line of coins up the middle of the track for the player to sweep
    session.spawn_coins(
        (0..10)
            .map(|step| DVec3::new(1194.1, 2.0, 1450.0 - 45.0 * step as f64))
            .collect(),
    );
    let script = AiPersonality {
        target_lateral_offset: 0.0,
        aggressiveness: 1.0,
    };
    let mut rng = rand::thread_rng();

    log::info!(
        "race demo: {} cars, {}ms ticks",
        session.records().len(),
        GLOBAL_CONFIG.tick_ms
    );

    let demo_start = Instant::now();
    loop {
        let tick_start = Instant::now();

        let player_intent = if session.is_racing() {
            ai::decide(
                session.player_record().position.x,
                session.lane_center_x(),
                &script,
                &mut rng,
            )
        } else {
            ControlIntent::coast()
        };

        session.tick(player_intent, dt_scale, Instant::now());
        for event in session.drain_events() {
            log_event(&event);
        }

        let all_finished = session
            .records()
            .iter()
            .all(|record| record.finish_time.is_some());
        if all_finished || demo_start.elapsed() >= time_limit {
            break;
        }

        if let Some(remaining) = tick_duration.checked_sub(tick_start.elapsed()) {
            thread::sleep(remaining);
        }
    }

    let swept = session.coins_collected();
    log::info!(
        "coins: {} swept, reward progress {}%",
        swept,
        pickups::reward_progress(swept)
    );
    for (index, record) in session.standings().iter().enumerate() {
        let place = index + 1;
        let time = match record.finish_time {
            Some(finish_time) => hud::format_race_clock(finish_time.as_millis() as u64),
            None => String::from("DNF"),
        };
        log::info!(
            "{}{}: {} ({})",
            place,
            hud::placement_suffix(place),
            record.name,
            time
        );
    }
}

fn log_event(event: &SessionEvent) {
    match event {
        SessionEvent::CarFinished { name, finish_time, .. } => {
            log::debug!("finish event: {} at {:?}", name, finish_time)
        }
        SessionEvent::RaceComplete { player_time } => {
            log::info!("player done in {:?}, leaderboard up", player_time)
        }
        SessionEvent::LevelComplete { level, coins_collected } => {
            log::info!("level {} complete with {} coins", level, coins_collected)
        }
        SessionEvent::CellCrossed { delta_x, delta_z } => {
            log::debug!("cell crossing ({}, {})", delta_x, delta_z)
        }
    }
}
