use rand::Rng;

use redline_core::controls::ControlIntent;

// Don't chase the racing line when already within a unit of it; constant
// micro-corrections look jittery
const STEER_DEAD_BAND: f64 = 1.0;

// Per-car driving temperament, issued when a car is created and reissued on
// every race reset. Never shared between cars.
#[derive(Clone, Copy, Debug)]
pub struct AiPersonality {
    // Signed preferred distance from the track centerline, in [-6, 6]
    pub target_lateral_offset: f64,
    // Probability of throttling on any given tick, in [0.93, 1.0)
    pub aggressiveness: f64,
}

impl AiPersonality {
    pub fn issue<R: Rng>(rng: &mut R) -> Self {
        AiPersonality {
            target_lateral_offset: (rng.gen::<f64>() - 0.5) * 12.0,
            aggressiveness: 0.93 + rng.gen::<f64>() * 0.07,
        }
    }
}

// One steering/throttle decision per tick. Steering holds the personality's
// offset from the lane center; throttle is probabilistic so different
// aggressiveness values separate the field over a race. AI never brakes or
// reverses. The random source is injected so tests can seed it.
pub fn decide<R: Rng>(
    position_x: f64,
    lane_center_x: f64,
    personality: &AiPersonality,
    rng: &mut R,
) -> ControlIntent {
    let desired_x = lane_center_x + personality.target_lateral_offset;
    let offset = position_x - desired_x;

    let mut intent = ControlIntent::coast();
    if offset.abs() > STEER_DEAD_BAND {
        if offset > 0.0 {
            intent.left = true; // right of the line, steer back left
        } else {
            intent.right = true;
        }
    }
    intent.forward = rng.gen::<f64>() < personality.aggressiveness;

    intent
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn full_throttle_personality(offset: f64) -> AiPersonality {
        AiPersonality {
            target_lateral_offset: offset,
            aggressiveness: 1.0,
        }
    }

    #[test]
    fn personality_values_land_in_the_documented_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let personality = AiPersonality::issue(&mut rng);
            assert!(personality.target_lateral_offset.abs() <= 6.0);
            assert!(personality.aggressiveness >= 0.93);
            assert!(personality.aggressiveness < 1.0);
        }
    }

    #[test]
    fn steers_back_toward_the_racing_line() {
        let mut rng = StdRng::seed_from_u64(1);
        let personality = full_throttle_personality(4.0);
        let lane_center = 1194.1;

        // Right of the desired line by more than the dead band
        let right_of_line = decide(lane_center + 4.0 + 2.5, lane_center, &personality, &mut rng);
        assert!(right_of_line.left && !right_of_line.right);

        let left_of_line = decide(lane_center + 4.0 - 2.5, lane_center, &personality, &mut rng);
        assert!(left_of_line.right && !left_of_line.left);
    }

    #[test]
    fn dead_band_suppresses_jitter_near_the_line() {
        let mut rng = StdRng::seed_from_u64(2);
        let personality = full_throttle_personality(-3.0);
        let lane_center = 1194.1;

        let near_line = decide(lane_center - 3.0 + 0.8, lane_center, &personality, &mut rng);
        assert!(!near_line.left && !near_line.right);
    }

    #[test]
    fn never_brakes_or_reverses() {
        let mut rng = StdRng::seed_from_u64(3);
        let personality = AiPersonality::issue(&mut rng);
        for x in -20..20 {
            let intent = decide(1194.1 + x as f64, 1194.1, &personality, &mut rng);
            assert!(!intent.backward);
        }
    }

    #[test]
    fn full_aggressiveness_always_throttles() {
        let mut rng = StdRng::seed_from_u64(4);
        let personality = full_throttle_personality(0.0);
        for _ in 0..200 {
            assert!(decide(1194.1, 1194.1, &personality, &mut rng).forward);
        }
    }

    #[test]
    fn seeded_decisions_are_reproducible() {
        let personality = AiPersonality {
            target_lateral_offset: 2.0,
            aggressiveness: 0.95,
        };

        let mut first_rng = StdRng::seed_from_u64(99);
        let mut second_rng = StdRng::seed_from_u64(99);
        for tick in 0..100 {
            let x = 1194.1 + (tick as f64 * 0.37).sin() * 8.0;
            let first = decide(x, 1194.1, &personality, &mut first_rng);
            let second = decide(x, 1194.1, &personality, &mut second_rng);
            assert_eq!(first.forward, second.forward);
            assert_eq!(first.left, second.left);
            assert_eq!(first.right, second.right);
        }
    }
}
