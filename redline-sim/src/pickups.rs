use glam::DVec3;

// Coin collection radii differ per world scale
pub const RACING_PICKUP_RADIUS: f64 = 3.0;
pub const CAREER_PICKUP_RADIUS: f64 = 2.0;

#[derive(Clone, Copy, Debug)]
pub struct Coin {
    pub id: usize,
    pub position: DVec3,
    pub collected: bool,
}

pub struct CoinField {
    coins: Vec<Coin>,
    pickup_radius: f64,
}

impl CoinField {
    pub fn new(positions: Vec<DVec3>, pickup_radius: f64) -> Self {
        CoinField {
            coins: positions
                .into_iter()
                .enumerate()
                .map(|(id, position)| Coin {
                    id,
                    position,
                    collected: false,
                })
                .collect(),
            pickup_radius,
        }
    }

    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    // Merge a new batch into the field. Already-collected coins drop out and
    // ids are reissued over what remains.
    pub fn spawn(&mut self, positions: Vec<DVec3>) {
        self.coins.retain(|coin| !coin.collected);
        self.coins.extend(positions.into_iter().map(|position| Coin {
            id: 0,
            position,
            collected: false,
        }));
        for (id, coin) in self.coins.iter_mut().enumerate() {
            coin.id = id;
        }
    }

    // Collect everything within pickup range of the car; returns how many
    // coins were newly picked up this tick. Range is planar, the car's ride
    // height has no say in whether it sweeps a coin.
    pub fn collect_near(&mut self, car_position: DVec3) -> u32 {
        let mut picked_up = 0;
        for coin in &mut self.coins {
            if coin.collected {
                continue;
            }
            let dx = coin.position.x - car_position.x;
            let dz = coin.position.z - car_position.z;
            if (dx * dx + dz * dz).sqrt() < self.pickup_radius {
                coin.collected = true;
                picked_up += 1;
            }
        }
        picked_up
    }

    pub fn collected_count(&self) -> u32 {
        self.coins.iter().filter(|coin| coin.collected).count() as u32
    }

    pub fn reset(&mut self) {
        for coin in &mut self.coins {
            coin.collected = false;
        }
    }
}

// Ten coins buy one XP
pub fn xp_from_coins(coins: u32) -> u32 {
    coins / 10
}

// Percent progress toward the next reward
pub fn reward_progress(coins: u32) -> u32 {
    (coins * 10).min(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> CoinField {
        CoinField::new(
            vec![
                DVec3::new(0.0, 0.2, 0.0),
                DVec3::new(0.0, 0.2, 5.0),
                DVec3::new(0.0, 0.2, 100.0),
            ],
            CAREER_PICKUP_RADIUS,
        )
    }

    #[test]
    fn collects_only_within_radius() {
        let mut coins = field();
        assert_eq!(coins.collect_near(DVec3::new(0.5, 0.2, 0.5)), 1);
        assert_eq!(coins.collected_count(), 1);
        assert!(coins.coins()[0].collected);
        assert!(!coins.coins()[1].collected);
    }

    #[test]
    fn a_coin_is_collected_once() {
        let mut coins = field();
        assert_eq!(coins.collect_near(DVec3::new(0.0, 0.2, 0.0)), 1);
        assert_eq!(coins.collect_near(DVec3::new(0.0, 0.2, 0.0)), 0);
        assert_eq!(coins.collected_count(), 1);
    }

    #[test]
    fn driving_the_line_sweeps_them_all() {
        let mut coins = field();
        let mut total = 0;
        for step in 0..110 {
            total += coins.collect_near(DVec3::new(0.0, 0.2, step as f64));
        }
        assert_eq!(total, 3);
    }

    #[test]
    fn reset_restores_the_field() {
        let mut coins = field();
        coins.collect_near(DVec3::new(0.0, 0.2, 0.0));
        coins.reset();
        assert_eq!(coins.collected_count(), 0);
    }

    #[test]
    fn spawning_drops_collected_coins_and_reissues_ids() {
        let mut coins = field();
        coins.collect_near(DVec3::new(0.0, 0.2, 0.0));

        coins.spawn(vec![DVec3::new(0.0, 0.2, 10.0)]);
        assert_eq!(coins.coins().len(), 3); // two survivors plus the new one
        assert_eq!(coins.collected_count(), 0);
        let ids: Vec<usize> = coins.coins().iter().map(|coin| coin.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn xp_and_reward_derivations() {
        assert_eq!(xp_from_coins(0), 0);
        assert_eq!(xp_from_coins(9), 0);
        assert_eq!(xp_from_coins(21), 2);
        assert_eq!(reward_progress(3), 30);
        assert_eq!(reward_progress(10), 100);
        assert_eq!(reward_progress(25), 100);
    }
}
