//! Hit detection and damage resolution
//!
//! Every entity is treated as a circle around its position. Shots are
//! consumed by the first thing they touch; there is no pass-through.

use glam::Vec2;
use rand::Rng;

use super::player::HitOutcome;
use super::state::{Session, SessionPhase, Side, TINT_FIRE, TINT_PICKUP, TINT_PLAYER_HIT};
use crate::consts::*;
use crate::out_of_bounds;

/// Impact effect sizes
const GUN_IMPACT_SIZE: f32 = 20.0;
const MUNITION_IMPACT_SIZE: f32 = 60.0;
const PLAYER_IMPACT_SIZE: f32 = 30.0;
const PICKUP_EFFECT_SIZE: f32 = 30.0;
/// Death effect sizes
const DEATH_SIZE: f32 = 50.0;
const BOSS_DEATH_SIZE: f32 = 120.0;

/// What destroyed an adversary; decides score and drop odds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillSource {
    Gun,
    Munition,
    Bomb,
}

impl KillSource {
    /// Score awarded for a kill worth `base` at the current combo count
    pub fn award(&self, base: u64, combo: u32) -> u64 {
        match self {
            KillSource::Gun => base * (1 + u64::from(combo) / 5),
            KillSource::Munition => base * 2,
            KillSource::Bomb => base,
        }
    }

    /// Probability of a pickup drop
    pub fn drop_chance(&self) -> f64 {
        match self {
            KillSource::Gun => 1.0 / 3.0,
            KillSource::Munition => 0.5,
            KillSource::Bomb => 0.0,
        }
    }
}

/// Circle overlap against a single combined radius
#[inline]
pub fn within(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance_squared(b) < radius * radius
}

impl Session {
    /// Resolve shots, munitions and pickups for this frame
    ///
    /// Stops as soon as the session leaves Playing so nothing scores after
    /// the result has been recorded.
    pub(crate) fn resolve_collisions(&mut self) {
        self.resolve_projectiles();
        self.resolve_munitions();
        self.collect_pickups();
    }

    fn resolve_projectiles(&mut self) {
        for i in 0..self.projectiles.len() {
            if self.phase != SessionPhase::Playing {
                return;
            }
            let shot = self.projectiles[i];
            if !shot.active {
                continue;
            }
            if out_of_bounds(shot.pos, PROJECTILE_MARGIN) {
                self.projectiles[i].active = false;
                continue;
            }

            match shot.side {
                Side::Player => {
                    let Some(j) = self
                        .adversaries
                        .iter()
                        .position(|a| a.active && within(a.pos, shot.pos, a.hit_radius()))
                    else {
                        continue;
                    };
                    self.projectiles[i].active = false;
                    self.spawn_explosion(shot.pos, GUN_IMPACT_SIZE, TINT_FIRE);
                    if self.adversaries[j].apply_damage(shot.damage) {
                        self.on_adversary_destroyed(j, KillSource::Gun);
                    }
                }
                Side::Adversary => {
                    if !self.player_exposed(shot.pos, PLAYER_HIT_RADIUS) {
                        continue;
                    }
                    self.projectiles[i].active = false;
                    self.damage_player(shot.damage, self.tuning.invuln_after_hit, shot.pos);
                }
            }
        }
    }

    fn resolve_munitions(&mut self) {
        for i in 0..self.munitions.len() {
            if self.phase != SessionPhase::Playing {
                return;
            }
            let m = self.munitions[i];
            if !m.active {
                continue;
            }
            if out_of_bounds(m.pos, MUNITION_MARGIN) {
                self.munitions[i].active = false;
                continue;
            }

            match m.side {
                Side::Player => {
                    let Some(j) = self
                        .adversaries
                        .iter()
                        .position(|a| a.active && within(a.pos, m.pos, a.munition_hit_radius()))
                    else {
                        continue;
                    };
                    self.munitions[i].active = false;
                    self.spawn_explosion(m.pos, MUNITION_IMPACT_SIZE, TINT_FIRE);
                    if self.adversaries[j].apply_damage(m.damage) {
                        self.on_adversary_destroyed(j, KillSource::Munition);
                    }
                }
                Side::Adversary => {
                    if !self.player_exposed(m.pos, PLAYER_MUNITION_HIT_RADIUS) {
                        continue;
                    }
                    self.munitions[i].active = false;
                    self.damage_player(m.damage, self.tuning.invuln_after_munition_hit, m.pos);
                }
            }
        }
    }

    fn collect_pickups(&mut self) {
        if self.phase != SessionPhase::Playing {
            return;
        }
        for i in 0..self.pickups.len() {
            let p = self.pickups[i];
            if !p.active {
                continue;
            }
            if p.pos.y > PLAY_H + PICKUP_MARGIN {
                self.pickups[i].active = false;
                continue;
            }
            if !within(p.pos, self.player.pos, PICKUP_COLLECT_RADIUS) {
                continue;
            }

            self.pickups[i].active = false;
            self.player.collect(p.kind, &self.tuning);
            self.player.score += self.tuning.pickup_score;
            self.spawn_explosion(p.pos, PICKUP_EFFECT_SIZE, TINT_PICKUP);
            log::debug!("Collected {}", p.kind.label());
        }
    }

    /// Whether a hostile shot at `pos` can land on the player
    fn player_exposed(&self, pos: Vec2, radius: f32) -> bool {
        self.phase == SessionPhase::Playing
            && !self.player.is_invulnerable()
            && within(pos, self.player.pos, radius)
    }

    fn damage_player(&mut self, damage: i32, invuln: f32, at: Vec2) {
        let outcome = self.player.take_hit(damage, invuln, &self.tuning);
        self.spawn_explosion(at, PLAYER_IMPACT_SIZE, TINT_PLAYER_HIT);
        self.pulse_shake(8.0, 0.2);

        match outcome {
            HitOutcome::LifeLost => {
                log::info!("Life lost, {} remaining", self.player.lives);
            }
            HitOutcome::Defeated => self.end_session(),
            HitOutcome::Shielded | HitOutcome::Damaged => {}
        }
    }

    /// Book-keeping for an adversary that just reached zero hp
    pub(crate) fn on_adversary_destroyed(&mut self, idx: usize, source: KillSource) {
        let a = self.adversaries[idx];

        self.player.score += source.award(a.score, self.combo);
        self.player.kills += 1;
        self.combo += 1;
        self.combo_timer = self.tuning.combo_window;

        let size = if a.archetype.is_boss() {
            BOSS_DEATH_SIZE
        } else {
            DEATH_SIZE
        };
        self.spawn_explosion(a.pos, size, TINT_FIRE);
        self.pulse_shake(size * 0.1, 0.2);

        if a.archetype.is_boss() {
            self.spawner.boss_killed();
            self.player.boss_levels += 1;
            log::info!("Boss destroyed by {:?}", source);
        }

        let chance = source.drop_chance();
        if chance > 0.0 && self.rng.random_bool(chance) {
            self.spawn_pickup(a.pos);
        }
    }

    /// Let the combo lapse once its window closes
    pub(crate) fn decay_combo(&mut self, dt: f32) {
        if self.combo_timer > 0.0 {
            self.combo_timer = (self.combo_timer - dt).max(0.0);
            if self.combo_timer <= 0.0 {
                self.combo = 0;
            }
        }
    }
}
