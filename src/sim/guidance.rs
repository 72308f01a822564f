//! Homing for player munitions

use glam::Vec2;

use super::adversary::Adversary;
use super::state::{Session, Side};

/// Index of the live adversary closest to `from`
pub fn nearest_adversary(adversaries: &[Adversary], from: Vec2) -> Option<usize> {
    adversaries
        .iter()
        .enumerate()
        .filter(|(_, a)| a.active)
        .min_by(|(_, a), (_, b)| {
            a.pos
                .distance_squared(from)
                .total_cmp(&b.pos.distance_squared(from))
        })
        .map(|(i, _)| i)
}

/// Blend `vel` toward `cruise` speed along the line to `target`
///
/// The blend factor is `dt * turn_rate`, clamped to [0, 1]. A zero-length
/// line of sight leaves the velocity untouched.
#[inline]
pub fn steer(vel: Vec2, pos: Vec2, target: Vec2, cruise: f32, turn_rate: f32, dt: f32) -> Vec2 {
    let dir = (target - pos).normalize_or_zero();
    if dir == Vec2::ZERO {
        return vel;
    }
    vel.lerp(dir * cruise, (dt * turn_rate).clamp(0.0, 1.0))
}

impl Session {
    /// Burn munition lifetimes and steer the player's toward the nearest adversary
    pub(crate) fn guide_munitions(&mut self, dt: f32) {
        let cruise = self.tuning.munition_cruise_speed;
        let turn_rate = self.tuning.munition_turn_rate;

        for m in self.munitions.iter_mut().filter(|m| m.active) {
            m.life -= dt;
            if m.life <= 0.0 {
                m.active = false;
                continue;
            }
            if m.side != Side::Player {
                continue;
            }
            if let Some(i) = nearest_adversary(&self.adversaries, m.pos) {
                m.target = self.adversaries[i].pos;
                m.vel = steer(m.vel, m.pos, m.target, cruise, turn_rate, dt);
            }
        }
    }
}
