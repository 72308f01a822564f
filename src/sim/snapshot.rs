//! Read-only view of a session for renderers and debug dumps

use glam::Vec2;
use serde::Serialize;

use super::adversary::Adversary;
use super::backdrop::Backdrop;
use super::player::Player;
use super::state::{Explosion, GuidedMunition, Pickup, Projectile, Session, SessionPhase};

/// HUD counters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hud {
    pub health: u32,
    pub max_health: u32,
    pub shield: u32,
    pub max_shield: u32,
    pub shield_active: bool,
    pub score: u64,
    pub high_score: u64,
    pub level: u32,
    pub lives: u8,
    pub ammo: u32,
    pub bombs: u32,
    pub combo: u32,
    pub kills: u32,
    pub rapid_fire: bool,
}

/// Everything a renderer needs for one frame, borrowed from the session
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub phase: SessionPhase,
    pub hud: Hud,
    pub player: &'a Player,
    pub projectiles: Vec<&'a Projectile>,
    pub munitions: Vec<&'a GuidedMunition>,
    pub pickups: Vec<&'a Pickup>,
    pub adversaries: Vec<&'a Adversary>,
    pub explosions: &'a [Explosion],
    /// Camera jitter this frame
    pub shake_offset: Vec2,
    pub backdrop: &'a Backdrop,
    pub elapsed: f32,
    pub phase_timer: f32,
}

impl Session {
    pub fn hud(&self) -> Hud {
        let p = &self.player;
        Hud {
            health: p.health,
            max_health: p.max_health,
            shield: p.shield,
            max_shield: p.max_shield,
            shield_active: p.shield_active,
            score: p.score,
            high_score: self.high_score.max(p.score),
            level: p.level,
            lives: p.lives,
            ammo: p.ammo,
            bombs: p.bombs,
            combo: self.combo,
            kills: p.kills,
            rapid_fire: p.rapid_fire,
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            hud: self.hud(),
            player: &self.player,
            projectiles: self.projectiles.iter().filter(|p| p.active).collect(),
            munitions: self.munitions.iter().filter(|m| m.active).collect(),
            pickups: self.pickups.iter().filter(|p| p.active).collect(),
            adversaries: self.adversaries.iter().filter(|a| a.active).collect(),
            explosions: &self.explosions,
            shake_offset: self.shake.offset,
            backdrop: &self.backdrop,
            elapsed: self.elapsed,
            phase_timer: self.phase_timer,
        }
    }
}
