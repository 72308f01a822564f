//! Adversary archetypes, movement patterns and fire
//!
//! Archetypes form a small closed set, so behaviour dispatches on the enum
//! against a fixed parameter table.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{GuidedMunition, Projectile, Side, TINT_BOSS_SPREAD, TINT_ENEMY_BULLET};
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    Basic,
    Fast,
    Heavy,
    Boss,
}

/// Fixed per-archetype data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchetypeStats {
    pub hp: i32,
    /// Horizontal speed (sign picked at spawn, except Boss)
    pub speed_x: f32,
    pub speed_y: f32,
    pub shot_interval: f32,
    pub score: u64,
    /// Hit radius against gun projectiles
    pub hit_radius: f32,
    /// Hit radius against guided munitions
    pub munition_hit_radius: f32,
    /// Aimed-shot speed and damage
    pub shot_speed: f32,
    pub shot_damage: i32,
}

const BASIC: ArchetypeStats = ArchetypeStats {
    hp: 30,
    speed_x: 60.0,
    speed_y: 80.0,
    shot_interval: 1.5,
    score: 100,
    hit_radius: 30.0,
    munition_hit_radius: 35.0,
    shot_speed: 250.0,
    shot_damage: 10,
};

const FAST: ArchetypeStats = ArchetypeStats {
    hp: 20,
    speed_x: 120.0,
    speed_y: 160.0,
    shot_interval: 1.0,
    score: 200,
    ..BASIC
};

const HEAVY: ArchetypeStats = ArchetypeStats {
    hp: 80,
    speed_x: 40.0,
    speed_y: 60.0,
    shot_interval: 0.8,
    score: 500,
    ..BASIC
};

const BOSS: ArchetypeStats = ArchetypeStats {
    hp: 500,
    speed_x: 100.0,
    speed_y: 30.0,
    shot_interval: 0.4,
    score: 5000,
    hit_radius: 50.0,
    munition_hit_radius: 60.0,
    shot_speed: 350.0,
    shot_damage: 20,
};

/// Boss patrol box
pub const BOSS_PATROL_INSET_X: f32 = 80.0;
pub const BOSS_PATROL_MIN_Y: f32 = 50.0;
pub const BOSS_PATROL_MAX_Y: f32 = 200.0;
/// Vertical drift multiplier for the boss
const BOSS_DRIFT: f32 = 0.2;

/// Wall inset for free-falling archetypes
const WALL_INSET_X: f32 = 30.0;
/// Sinusoidal sway (amplitude in units/s, angular rate in rad/s)
const SWAY_AMPLITUDE: f32 = 30.0;
const SWAY_RATE: f32 = 2.0;

/// Boss five-way spread
const SPREAD_STEP: f32 = 0.3;
const SPREAD_SPEED: f32 = 300.0;
const SPREAD_DAMAGE: i32 = 15;

/// Heavy missile launch odds and damage
const HEAVY_MISSILE_CHANCE: f64 = 1.0 / 3.0;
const HEAVY_MISSILE_DAMAGE: i32 = 25;

impl Archetype {
    pub fn stats(&self) -> &'static ArchetypeStats {
        match self {
            Archetype::Basic => &BASIC,
            Archetype::Fast => &FAST,
            Archetype::Heavy => &HEAVY,
            Archetype::Boss => &BOSS,
        }
    }

    pub fn is_boss(&self) -> bool {
        matches!(self, Archetype::Boss)
    }
}

/// An enemy jet
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Adversary {
    pub pos: Vec2,
    pub vel: Vec2,
    pub active: bool,
    pub hp: i32,
    pub max_hp: i32,
    pub archetype: Archetype,
    pub shot_timer: f32,
    pub shot_interval: f32,
    /// Drives the sway pattern
    pub move_timer: f32,
    pub score: u64,
}

impl Adversary {
    /// Build an adversary at `pos`; `dir` picks the horizontal heading sign
    pub fn spawn(archetype: Archetype, pos: Vec2, dir: f32) -> Self {
        let stats = archetype.stats();
        let vx = if archetype.is_boss() {
            stats.speed_x
        } else {
            stats.speed_x * dir.signum()
        };
        Self {
            pos,
            vel: Vec2::new(vx, stats.speed_y),
            active: true,
            hp: stats.hp,
            max_hp: stats.hp,
            archetype,
            shot_timer: stats.shot_interval,
            shot_interval: stats.shot_interval,
            move_timer: 0.0,
            score: stats.score,
        }
    }

    /// Spawn position for `archetype`: random x inside the inset, above the screen
    pub fn spawn_at<R: Rng>(archetype: Archetype, rng: &mut R) -> Self {
        if archetype.is_boss() {
            return Self::spawn(archetype, Vec2::new(SCREEN_W / 2.0, ADVERSARY_SPAWN_Y), 1.0);
        }
        let x = rng.random_range(SPAWN_INSET_X..SCREEN_W - SPAWN_INSET_X);
        let dir = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        Self::spawn(archetype, Vec2::new(x, ADVERSARY_SPAWN_Y), dir)
    }

    pub fn hit_radius(&self) -> f32 {
        self.archetype.stats().hit_radius
    }

    pub fn munition_hit_radius(&self) -> f32 {
        self.archetype.stats().munition_hit_radius
    }

    /// Subtract damage; returns true when this hit destroyed it
    pub fn apply_damage(&mut self, damage: i32) -> bool {
        if !self.active {
            return false;
        }
        self.hp -= damage;
        if self.hp <= 0 {
            self.active = false;
            true
        } else {
            false
        }
    }

    /// Integrate movement for one frame
    pub fn advance(&mut self, dt: f32) {
        self.move_timer += dt;

        if self.archetype.is_boss() {
            self.pos.x += self.vel.x * dt;
            self.pos.y += self.vel.y * dt * BOSS_DRIFT;
            if self.pos.x < BOSS_PATROL_INSET_X {
                self.vel.x = self.vel.x.abs();
            } else if self.pos.x > SCREEN_W - BOSS_PATROL_INSET_X {
                self.vel.x = -self.vel.x.abs();
            }
            if self.pos.y > BOSS_PATROL_MAX_Y {
                self.vel.y = -self.vel.y.abs();
            } else if self.pos.y < BOSS_PATROL_MIN_Y {
                self.vel.y = self.vel.y.abs();
            }
        } else {
            self.pos += self.vel * dt;
            if self.pos.x < WALL_INSET_X {
                self.vel.x = self.vel.x.abs();
            } else if self.pos.x > SCREEN_W - WALL_INSET_X {
                self.vel.x = -self.vel.x.abs();
            }
            self.pos.x += (self.move_timer * SWAY_RATE).sin() * SWAY_AMPLITUDE * dt;

            if self.pos.y > PLAY_H + ADVERSARY_MARGIN {
                self.active = false;
            }
        }
    }

    /// Count down the shot timer and fire at `target` when it expires
    #[allow(clippy::too_many_arguments)]
    pub fn fire<R: Rng>(
        &mut self,
        dt: f32,
        target: Vec2,
        rng: &mut R,
        projectiles: &mut Vec<Projectile>,
        munitions: &mut Vec<GuidedMunition>,
        munition_speed: f32,
        munition_life: f32,
    ) {
        if !self.active {
            return;
        }
        self.shot_timer -= dt;
        if self.shot_timer > 0.0 {
            return;
        }
        self.shot_timer = self.shot_interval;

        let stats = self.archetype.stats();
        let dir = (target - self.pos).normalize_or_zero();
        projectiles.push(Projectile::new(
            self.pos,
            dir * stats.shot_speed,
            Side::Adversary,
            stats.shot_damage,
            TINT_ENEMY_BULLET,
        ));

        match self.archetype {
            Archetype::Boss => {
                let base = dir.y.atan2(dir.x);
                for i in -2..=2 {
                    let a = base + i as f32 * SPREAD_STEP;
                    projectiles.push(Projectile::new(
                        self.pos,
                        Vec2::from_angle(a) * SPREAD_SPEED,
                        Side::Adversary,
                        SPREAD_DAMAGE,
                        TINT_BOSS_SPREAD,
                    ));
                }
            }
            Archetype::Heavy if rng.random_bool(HEAVY_MISSILE_CHANCE) => {
                munitions.push(GuidedMunition::launch(
                    self.pos,
                    target,
                    Side::Adversary,
                    HEAVY_MISSILE_DAMAGE,
                    munition_speed,
                    munition_life,
                ));
            }
            _ => {}
        }
        log::trace!("{:?} fired at ({:.0}, {:.0})", self.archetype, target.x, target.y);
    }
}
