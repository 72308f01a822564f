//! Data-driven game balance
//!
//! Everything a designer may want to tweak without touching the simulation.
//! Defaults reproduce the shipped balance; partial JSON overrides individual
//! fields.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player loadout ===
    pub max_health: u32,
    pub max_shield: u32,
    pub lives: u8,
    pub start_ammo: u32,
    pub max_ammo: u32,
    pub start_bombs: u32,
    pub max_bombs: u32,
    /// Pointer-follow approach rate (1/s)
    pub follow_rate: f32,
    /// Tilt decay rate when not dragging (1/s)
    pub tilt_decay: f32,

    // === Gun ===
    pub gun_cooldown: f32,
    pub rapid_cooldown: f32,
    pub gun_damage: i32,
    pub gun_speed: f32,

    // === Guided munitions ===
    pub munition_damage: i32,
    pub munition_launch_speed: f32,
    pub munition_cruise_speed: f32,
    /// Velocity blend per second toward the target heading
    pub munition_turn_rate: f32,
    pub munition_lifetime: f32,

    // === Area bomb ===
    pub bomb_damage: i32,

    // === Damage windows ===
    pub invuln_after_hit: f32,
    pub invuln_after_munition_hit: f32,
    pub invuln_after_life_lost: f32,

    // === Spawn pacing ===
    pub spawn_interval_start: f32,
    /// Interval reduction per second of elapsed time
    pub spawn_interval_ramp: f32,
    pub spawn_interval_floor: f32,
    pub fast_unlock_time: f32,
    pub heavy_unlock_time: f32,
    pub boss_time: f32,
    pub pickup_interval: f32,

    // === Scoring ===
    pub combo_window: f32,
    pub pickup_score: u64,
    /// Seconds of play per automatic level step
    pub level_period: f32,

    // === Pickups ===
    pub heal_amount: u32,
    pub shield_amount: u32,
    pub shield_duration: f32,
    pub rapid_duration: f32,
    pub ammo_amount: u32,
    pub pickup_fall_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_health: 100,
            max_shield: 50,
            lives: 3,
            start_ammo: 10,
            max_ammo: 30,
            start_bombs: 3,
            max_bombs: 9,
            follow_rate: 8.0,
            tilt_decay: 6.0,

            gun_cooldown: 0.15,
            rapid_cooldown: 0.05,
            gun_damage: 10,
            gun_speed: 700.0,

            munition_damage: 50,
            munition_launch_speed: 400.0,
            munition_cruise_speed: 500.0,
            munition_turn_rate: 3.0,
            munition_lifetime: 3.0,

            bomb_damage: 150,

            invuln_after_hit: 0.5,
            invuln_after_munition_hit: 1.0,
            invuln_after_life_lost: 3.0,

            spawn_interval_start: 2.0,
            spawn_interval_ramp: 0.02,
            spawn_interval_floor: 0.5,
            fast_unlock_time: 30.0,
            heavy_unlock_time: 60.0,
            boss_time: 90.0,
            pickup_interval: 12.0,

            combo_window: 2.0,
            pickup_score: 50,
            level_period: 30.0,

            heal_amount: 30,
            shield_amount: 30,
            shield_duration: 5.0,
            rapid_duration: 8.0,
            ammo_amount: 5,
            pickup_fall_speed: 80.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning overrides");
        Ok(tuning)
    }

    /// Reject values that would break simulation invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_health == 0 {
            return Err(ConfigError::invalid("max_health", "must be positive"));
        }
        if self.lives == 0 {
            return Err(ConfigError::invalid("lives", "must be at least 1"));
        }
        if self.start_ammo > self.max_ammo {
            return Err(ConfigError::invalid("start_ammo", "exceeds max_ammo"));
        }
        if self.start_bombs > self.max_bombs {
            return Err(ConfigError::invalid("start_bombs", "exceeds max_bombs"));
        }
        if self.spawn_interval_floor <= 0.0 {
            return Err(ConfigError::invalid(
                "spawn_interval_floor",
                "must be greater than zero",
            ));
        }
        if self.spawn_interval_start < self.spawn_interval_floor {
            return Err(ConfigError::invalid(
                "spawn_interval_start",
                format!("below floor {}", self.spawn_interval_floor),
            ));
        }
        if self.pickup_interval <= 0.0 {
            return Err(ConfigError::invalid("pickup_interval", "must be greater than zero"));
        }
        if self.level_period <= 0.0 {
            return Err(ConfigError::invalid("level_period", "must be greater than zero"));
        }
        for (field, value) in [
            ("gun_cooldown", self.gun_cooldown),
            ("rapid_cooldown", self.rapid_cooldown),
            ("munition_lifetime", self.munition_lifetime),
            ("combo_window", self.combo_window),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(ConfigError::invalid(field, format!("{value} is not a valid duration")));
            }
        }
        Ok(())
    }

    /// Adversary spawn interval after `elapsed` seconds
    pub fn spawn_interval(&self, elapsed: f32) -> f32 {
        (self.spawn_interval_start - elapsed * self.spawn_interval_ramp)
            .max(self.spawn_interval_floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "lives": 5, "bomb_damage": 200 }"#).unwrap();
        assert_eq!(tuning.lives, 5);
        assert_eq!(tuning.bomb_damage, 200);
        assert_eq!(tuning.max_health, 100);
    }

    #[test]
    fn test_rejects_zero_lives() {
        let err = Tuning::from_json(r#"{ "lives": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "lives", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ lives: ").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_spawn_interval_ramp_and_floor() {
        let tuning = Tuning::default();
        assert!((tuning.spawn_interval(0.0) - 2.0).abs() < 1e-6);
        assert!((tuning.spawn_interval(50.0) - 1.0).abs() < 1e-6);
        assert!((tuning.spawn_interval(500.0) - 0.5).abs() < 1e-6);
    }
}
