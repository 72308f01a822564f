//! Spawn cadence for adversaries, the boss and pickups
//!
//! The director only decides *what* appears this frame; the session turns
//! the resulting [`SpawnPlan`] into entities.

use rand::Rng;

use super::adversary::{Adversary, Archetype};
use super::state::Session;
use crate::consts::*;
use crate::tuning::Tuning;

/// What should appear this frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpawnPlan {
    pub adversary: Option<Archetype>,
    pub boss: bool,
    /// Horizontal position of a new pickup
    pub pickup_x: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpawnDirector {
    /// Seconds since the last adversary spawn slot
    pub adversary_timer: f32,
    /// Seconds since the last pickup
    pub pickup_timer: f32,
    pub boss_alive: bool,
    /// Latched once the boss has appeared this session
    pub boss_spawned: bool,
}

impl SpawnDirector {
    /// Advance the accumulators by `dt` at play time `elapsed`
    pub fn step<R: Rng>(&mut self, dt: f32, elapsed: f32, tuning: &Tuning, rng: &mut R) -> SpawnPlan {
        let mut plan = SpawnPlan::default();

        self.adversary_timer += dt;
        if self.adversary_timer >= tuning.spawn_interval(elapsed) {
            self.adversary_timer = 0.0;
            if !self.boss_alive {
                plan.adversary = Some(pick_archetype(elapsed, tuning, rng));
            }
        }

        if elapsed > tuning.boss_time && !self.boss_spawned && !self.boss_alive {
            self.boss_spawned = true;
            self.boss_alive = true;
            plan.boss = true;
        }

        self.pickup_timer += dt;
        if self.pickup_timer >= tuning.pickup_interval {
            self.pickup_timer = 0.0;
            plan.pickup_x = Some(rng.random_range(SPAWN_INSET_X..SCREEN_W - SPAWN_INSET_X));
        }

        plan
    }

    /// Clear the boss latch after the boss dies
    pub fn boss_killed(&mut self) {
        self.boss_alive = false;
    }
}

/// Archetype mix widens as the session goes on
fn pick_archetype<R: Rng>(elapsed: f32, tuning: &Tuning, rng: &mut R) -> Archetype {
    let pool: &[Archetype] = if elapsed > tuning.heavy_unlock_time {
        &[Archetype::Basic, Archetype::Fast, Archetype::Heavy]
    } else if elapsed > tuning.fast_unlock_time {
        &[Archetype::Basic, Archetype::Fast]
    } else {
        &[Archetype::Basic]
    };
    pool[rng.random_range(0..pool.len())]
}

impl Session {
    /// Run the spawn director and materialize its plan
    pub(crate) fn run_spawner(&mut self, dt: f32) {
        let plan = self
            .spawner
            .step(dt, self.elapsed, &self.tuning, &mut self.rng);

        if let Some(archetype) = plan.adversary {
            let adversary = Adversary::spawn_at(archetype, &mut self.rng);
            log::debug!("Spawned {:?} at x={:.0}", archetype, adversary.pos.x);
            self.adversaries.push(adversary);
        }
        if plan.boss {
            log::info!("Boss incoming at {:.1}s", self.elapsed);
            self.adversaries
                .push(Adversary::spawn_at(Archetype::Boss, &mut self.rng));
        }
        if let Some(x) = plan.pickup_x {
            self.spawn_pickup(glam::Vec2::new(x, PICKUP_SPAWN_Y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_first_spawn_after_start_interval() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut director = SpawnDirector::default();
        let mut elapsed = 0.0;
        let mut first = None;
        for frame in 0..300 {
            elapsed += DT;
            if director.step(DT, elapsed, &tuning, &mut rng).adversary.is_some() {
                first = Some(frame);
                break;
            }
        }
        // interval is just under 2s at this point
        let frame = first.expect("no spawn");
        assert!((115..=120).contains(&frame), "frame {}", frame);
    }

    #[test]
    fn test_only_basic_early() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(4);
        for _ in 0..100 {
            assert_eq!(pick_archetype(10.0, &tuning, &mut rng), Archetype::Basic);
            assert_ne!(pick_archetype(45.0, &tuning, &mut rng), Archetype::Heavy);
        }
        let late: Vec<_> = (0..200).map(|_| pick_archetype(70.0, &tuning, &mut rng)).collect();
        assert!(late.contains(&Archetype::Heavy));
        assert!(late.contains(&Archetype::Fast));
        assert!(!late.contains(&Archetype::Boss));
    }

    #[test]
    fn test_boss_once_per_session() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut director = SpawnDirector::default();
        assert!(director.step(DT, 91.0, &tuning, &mut rng).boss);
        assert!(!director.step(DT, 92.0, &tuning, &mut rng).boss);
        director.boss_killed();
        assert!(!director.step(DT, 200.0, &tuning, &mut rng).boss);
    }

    #[test]
    fn test_boss_blocks_regular_spawns() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut director = SpawnDirector {
            boss_alive: true,
            boss_spawned: true,
            ..SpawnDirector::default()
        };
        for i in 0..600 {
            let plan = director.step(DT, 100.0 + i as f32 * DT, &tuning, &mut rng);
            assert!(plan.adversary.is_none());
        }
        assert!(director.adversary_timer < 1.0);
    }

    #[test]
    fn test_pickup_cadence() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(8);
        let mut director = SpawnDirector::default();
        let mut count = 0;
        for i in 0..(60 * 25) {
            if let Some(x) = director.step(DT, i as f32 * DT, &tuning, &mut rng).pickup_x {
                assert!((SPAWN_INSET_X..SCREEN_W - SPAWN_INSET_X).contains(&x));
                count += 1;
            }
        }
        assert_eq!(count, 2);
    }
}
