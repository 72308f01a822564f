//! Jet Strike - A vertical-scrolling arcade jet shooter
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (entities, spawning, collisions, session state)
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation preferences
//! - `highscores`: In-memory leaderboard
//!
//! Rendering, audio and the platform event loop live outside this crate.
//! They drive [`sim::Session::update`] once per frame and draw from
//! [`sim::Session::snapshot`].

pub mod error;
pub mod highscores;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use highscores::HighScores;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Logical screen size (portrait)
    pub const SCREEN_W: f32 = 720.0;
    pub const SCREEN_H: f32 = 1600.0;
    /// Bottom HUD strip height
    pub const HUD_H: f32 = 320.0;
    /// Height of the playable area above the HUD
    pub const PLAY_H: f32 = SCREEN_H - HUD_H;

    /// Largest frame step accepted by `update` (20 fps floor)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Player clamp margins
    pub const PLAYER_MARGIN_X: f32 = 40.0;
    pub const PLAYER_MARGIN_TOP: f32 = 60.0;
    pub const PLAYER_MARGIN_BOTTOM: f32 = 80.0;
    /// Player start height above the bottom of the playable area
    pub const PLAYER_START_OFFSET_Y: f32 = 200.0;

    /// Out-of-bounds margins
    pub const PROJECTILE_MARGIN: f32 = 20.0;
    pub const MUNITION_MARGIN: f32 = 50.0;
    pub const PICKUP_MARGIN: f32 = 50.0;
    pub const ADVERSARY_MARGIN: f32 = 100.0;

    /// Horizontal inset used for spawn x positions
    pub const SPAWN_INSET_X: f32 = 60.0;
    /// Spawn heights above the visible area
    pub const ADVERSARY_SPAWN_Y: f32 = -80.0;
    pub const PICKUP_SPAWN_Y: f32 = -50.0;

    /// Collision radii against the player
    pub const PLAYER_HIT_RADIUS: f32 = 30.0;
    pub const PLAYER_MUNITION_HIT_RADIUS: f32 = 35.0;
    pub const PICKUP_COLLECT_RADIUS: f32 = 40.0;
}

/// Axis-aligned rectangle in logical units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// The full playable area
    pub fn playable() -> Self {
        Self::new(Vec2::ZERO, Vec2::new(consts::SCREEN_W, consts::PLAY_H))
    }

    /// Rectangle the player is confined to
    pub fn player_bounds() -> Self {
        use consts::*;
        Self::new(
            Vec2::new(PLAYER_MARGIN_X, PLAYER_MARGIN_TOP),
            Vec2::new(SCREEN_W - PLAYER_MARGIN_X, PLAY_H - PLAYER_MARGIN_BOTTOM),
        )
    }

    /// Grow the rectangle by `margin` on every side
    pub fn expanded(&self, margin: f32) -> Self {
        Self::new(self.min - Vec2::splat(margin), self.max + Vec2::splat(margin))
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    #[inline]
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }
}

/// True when `p` lies more than `margin` outside the playable area
#[inline]
pub fn out_of_bounds(p: Vec2, margin: f32) -> bool {
    !Rect::playable().expanded(margin).contains(p)
}

/// Signed angle (radians) needed to rotate `from` onto `to`
#[inline]
pub fn heading_error(from: Vec2, to: Vec2) -> f32 {
    from.perp_dot(to).atan2(from.dot(to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_bounds_inside_playable() {
        let play = Rect::playable();
        let bounds = Rect::player_bounds();
        assert!(play.contains(bounds.min));
        assert!(play.contains(bounds.max));
    }

    #[test]
    fn test_out_of_bounds_margin() {
        assert!(!out_of_bounds(Vec2::new(-10.0, 100.0), 20.0));
        assert!(out_of_bounds(Vec2::new(-30.0, 100.0), 20.0));
        assert!(out_of_bounds(Vec2::new(100.0, consts::PLAY_H + 60.0), 50.0));
    }

    #[test]
    fn test_heading_error() {
        let e = heading_error(Vec2::X, Vec2::Y);
        assert!((e - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
        assert!(heading_error(Vec2::X, Vec2::new(3.0, 0.0)).abs() < 1e-6);
    }
}
