//! Scrolling star field and cloud layer
//!
//! Purely cosmetic; never read by gameplay.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use crate::consts::*;
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Star {
    pub pos: Vec2,
    pub speed: f32,
    pub brightness: f32,
    pub size: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cloud {
    pub pos: Vec2,
    pub speed: f32,
    pub size: f32,
    pub alpha: f32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Backdrop {
    pub stars: Vec<Star>,
    pub clouds: Vec<Cloud>,
}

impl Backdrop {
    pub fn new<R: Rng>(settings: &Settings, rng: &mut R) -> Self {
        let stars = (0..settings.quality.star_count())
            .map(|_| Star {
                pos: Vec2::new(rng.random_range(0.0..SCREEN_W), rng.random_range(0.0..PLAY_H)),
                speed: rng.random_range(20.0..120.0),
                brightness: rng.random_range(0.3..1.0),
                size: rng.random_range(1.0..3.0),
            })
            .collect();
        let clouds = (0..settings.quality.cloud_count())
            .map(|_| Cloud {
                pos: Vec2::new(rng.random_range(0.0..SCREEN_W), rng.random_range(0.0..PLAY_H)),
                speed: rng.random_range(150.0..250.0),
                size: rng.random_range(80.0..200.0),
                alpha: rng.random_range(0.05..0.2),
            })
            .collect();
        Self { stars, clouds }
    }

    /// Scroll downward, wrapping to the top at a fresh x
    pub fn step<R: Rng>(&mut self, dt: f32, rng: &mut R) {
        for s in &mut self.stars {
            s.pos.y += s.speed * dt;
            if s.pos.y > PLAY_H {
                s.pos.y = 0.0;
                s.pos.x = rng.random_range(0.0..SCREEN_W);
            }
        }
        for c in &mut self.clouds {
            c.pos.y += c.speed * dt;
            if c.pos.y > PLAY_H + c.size {
                c.pos.y = -c.size;
                c.pos.x = rng.random_range(0.0..SCREEN_W);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QualityPreset;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_counts_follow_preset() {
        let mut rng = Pcg32::seed_from_u64(1);
        let low = Backdrop::new(&Settings::from_preset(QualityPreset::Low), &mut rng);
        assert_eq!(low.stars.len(), 50);
        assert!(low.clouds.is_empty());
        let high = Backdrop::new(&Settings::from_preset(QualityPreset::High), &mut rng);
        assert_eq!(high.stars.len(), 300);
        assert_eq!(high.clouds.len(), 12);
    }

    #[test]
    fn test_stars_wrap() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut backdrop = Backdrop::new(&Settings::default(), &mut rng);
        for _ in 0..600 {
            backdrop.step(0.05, &mut rng);
        }
        assert!(
            backdrop
                .stars
                .iter()
                .all(|s| (0.0..=PLAY_H).contains(&s.pos.y) && (0.0..SCREEN_W).contains(&s.pos.x))
        );
    }
}
