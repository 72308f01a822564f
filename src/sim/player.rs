//! The player craft: movement, resource counters and weapon actions

use glam::Vec2;
use serde::Serialize;

use super::collision::KillSource;
use super::guidance::nearest_adversary;
use super::state::{
    GuidedMunition, PickupKind, Projectile, Session, SessionPhase, Side, TINT_BOMB, TINT_BULLET,
    TINT_FIRE,
};
use crate::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Gun muzzle offsets relative to the craft center
const MUZZLE_OFFSET_X: f32 = 15.0;
const MUZZLE_OFFSET_Y: f32 = -40.0;
/// Munition aim point when nothing is alive
const DEFAULT_AIM_Y: f32 = -100.0;
/// Horizontal delta that maps to full tilt
const TILT_RANGE: f32 = 100.0;

/// Outcome of an adversary shot landing on the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Shield soaked the damage
    Shielded,
    /// Health lost, still alive
    Damaged,
    /// Health ran out, a life was spent and health restored
    LifeLost,
    /// Last life spent
    Defeated,
}

#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub pos: Vec2,
    /// Pointer target while dragging
    pub target: Vec2,
    pub dragging: bool,
    pub health: u32,
    pub max_health: u32,
    pub shield: u32,
    pub max_shield: u32,
    pub shield_active: bool,
    pub shield_timer: f32,
    pub lives: u8,
    pub score: u64,
    /// Derived each frame from elapsed time plus boss kills
    pub level: u32,
    /// Levels granted by boss kills
    pub boss_levels: u32,
    pub kills: u32,
    /// Guided munitions
    pub ammo: u32,
    pub max_ammo: u32,
    pub bombs: u32,
    pub max_bombs: u32,
    pub rapid_fire: bool,
    pub rapid_timer: f32,
    /// Base gun cooldown
    pub fire_cooldown: f32,
    /// Seconds until the gun may fire again
    pub fire_timer: f32,
    pub invuln_timer: f32,
    /// Lateral bank, -1 (left) to 1 (right)
    pub tilt: f32,
    /// Thruster flicker phase for the renderer
    pub thruster_anim: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        let start = Vec2::new(SCREEN_W / 2.0, PLAY_H - PLAYER_START_OFFSET_Y);
        Self {
            pos: start,
            target: start,
            dragging: false,
            health: tuning.max_health,
            max_health: tuning.max_health,
            shield: tuning.max_shield,
            max_shield: tuning.max_shield,
            shield_active: false,
            shield_timer: 0.0,
            lives: tuning.lives,
            score: 0,
            level: 1,
            boss_levels: 0,
            kills: 0,
            ammo: tuning.start_ammo,
            max_ammo: tuning.max_ammo,
            bombs: tuning.start_bombs,
            max_bombs: tuning.max_bombs,
            rapid_fire: false,
            rapid_timer: 0.0,
            fire_cooldown: tuning.gun_cooldown,
            fire_timer: 0.0,
            invuln_timer: 0.0,
            tilt: 0.0,
            thruster_anim: 0.0,
        }
    }

    /// Count down every timer, clamping at zero
    pub fn tick_timers(&mut self, dt: f32) {
        self.fire_timer = (self.fire_timer - dt).max(0.0);
        self.invuln_timer = (self.invuln_timer - dt).max(0.0);
        self.rapid_timer = (self.rapid_timer - dt).max(0.0);
        if self.rapid_timer <= 0.0 {
            self.rapid_fire = false;
        }
        self.shield_timer = (self.shield_timer - dt).max(0.0);
        if self.shield_timer <= 0.0 {
            self.shield_active = false;
        }
        self.thruster_anim += dt;
    }

    /// Ease toward the drag target, update tilt and clamp to the play area
    pub fn steer(&mut self, dt: f32, tuning: &Tuning) {
        if self.dragging {
            let delta = self.target - self.pos;
            self.tilt = (delta.x / TILT_RANGE).clamp(-1.0, 1.0);
            self.pos += delta * (dt * tuning.follow_rate).min(1.0);
        } else {
            self.tilt -= self.tilt * (dt * tuning.tilt_decay).min(1.0);
        }
        self.pos = Rect::player_bounds().clamp(self.pos);
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invuln_timer > 0.0
    }

    /// Apply an adversary hit; `invuln` is the grace window granted afterwards
    pub fn take_hit(&mut self, damage: i32, invuln: f32, tuning: &Tuning) -> HitOutcome {
        let damage = damage.max(0) as u32;
        self.invuln_timer = invuln;

        if self.shield_active && self.shield > 0 {
            self.shield = self.shield.saturating_sub(damage);
            return HitOutcome::Shielded;
        }

        self.health = self.health.saturating_sub(damage);
        if self.health > 0 {
            return HitOutcome::Damaged;
        }

        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            return HitOutcome::Defeated;
        }
        self.health = self.max_health;
        self.invuln_timer = tuning.invuln_after_life_lost;
        HitOutcome::LifeLost
    }

    /// Apply a collected pickup
    pub fn collect(&mut self, kind: PickupKind, tuning: &Tuning) {
        match kind {
            PickupKind::Heal => {
                self.health = (self.health + tuning.heal_amount).min(self.max_health);
            }
            PickupKind::Shield => {
                self.shield = (self.shield + tuning.shield_amount).min(self.max_shield);
                self.shield_active = true;
                self.shield_timer = tuning.shield_duration;
            }
            PickupKind::RapidFire => {
                self.rapid_fire = true;
                self.rapid_timer = tuning.rapid_duration;
            }
            PickupKind::Ammo => {
                self.ammo = (self.ammo + tuning.ammo_amount).min(self.max_ammo);
            }
            PickupKind::Bomb => {
                self.bombs = (self.bombs + 1).min(self.max_bombs);
            }
        }
    }

    /// Recompute level from elapsed play time
    pub fn update_level(&mut self, elapsed: f32, period: f32) {
        self.level = 1 + (elapsed / period) as u32 + self.boss_levels;
    }
}

impl Session {
    /// Twin forward shots, gated by the cooldown
    pub fn fire_gun(&mut self) {
        if self.phase != SessionPhase::Playing || self.player.fire_timer > 0.0 {
            return;
        }
        let tuning = &self.tuning;
        let p = &mut self.player;
        p.fire_timer = if p.rapid_fire {
            tuning.rapid_cooldown
        } else {
            p.fire_cooldown
        };

        let vel = Vec2::new(0.0, -tuning.gun_speed);
        for dx in [-MUZZLE_OFFSET_X, MUZZLE_OFFSET_X] {
            self.projectiles.push(Projectile::new(
                p.pos + Vec2::new(dx, MUZZLE_OFFSET_Y),
                vel,
                Side::Player,
                tuning.gun_damage,
                TINT_BULLET,
            ));
        }
        self.pulse_shake(2.0, 0.03);
    }

    /// Launch one homing munition at the nearest adversary
    pub fn fire_munition(&mut self) {
        if self.phase != SessionPhase::Playing || self.player.ammo == 0 {
            return;
        }
        self.player.ammo -= 1;

        let origin = self.player.pos;
        let aim = nearest_adversary(&self.adversaries, origin)
            .map(|i| self.adversaries[i].pos)
            .unwrap_or(Vec2::new(origin.x, DEFAULT_AIM_Y));
        self.munitions.push(GuidedMunition::launch(
            origin + Vec2::new(0.0, MUZZLE_OFFSET_Y),
            aim,
            Side::Player,
            self.tuning.munition_damage,
            self.tuning.munition_launch_speed,
            self.tuning.munition_lifetime,
        ));
        log::trace!("Munition launched, {} left", self.player.ammo);
    }

    /// Damage every live adversary at once
    pub fn fire_bomb(&mut self) {
        if self.phase != SessionPhase::Playing || self.player.bombs == 0 {
            return;
        }
        self.player.bombs -= 1;

        let damage = self.tuning.bomb_damage;
        let mut destroyed = 0;
        for i in 0..self.adversaries.len() {
            if !self.adversaries[i].active {
                continue;
            }
            let pos = self.adversaries[i].pos;
            self.spawn_explosion(pos, 60.0, TINT_FIRE);
            if self.adversaries[i].apply_damage(damage) {
                self.on_adversary_destroyed(i, KillSource::Bomb);
                destroyed += 1;
            }
        }

        let pos = self.player.pos;
        self.spawn_explosion(pos, 300.0, TINT_BOMB);
        self.pulse_shake(20.0, 0.5);
        log::debug!("Bomb detonated, {} destroyed, {} left", destroyed, self.player.bombs);
    }
}
