//! Presentation preferences
//!
//! Kept apart from [`crate::Tuning`]: settings never change gameplay
//! outcomes, only how much cosmetic state the simulation keeps around.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Case-insensitive preset name, as typed on the command line
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live explosions
    pub fn max_effects(&self) -> usize {
        match self {
            QualityPreset::Low => 32,
            QualityPreset::Medium => 96,
            QualityPreset::High => 256,
        }
    }

    /// Backdrop star count
    pub fn star_count(&self) -> usize {
        match self {
            QualityPreset::Low => 50,
            QualityPreset::Medium => 150,
            QualityPreset::High => 300,
        }
    }

    /// Backdrop cloud count
    pub fn cloud_count(&self) -> usize {
        match self {
            QualityPreset::Low => 0,
            QualityPreset::Medium => 8,
            QualityPreset::High => 12,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Screen shake on explosions/impacts
    pub screen_shake: bool,
    /// Reduced motion (minimize shake)
    pub reduced_motion: bool,
    /// Fire the gun every frame while the pointer is held
    pub auto_fire: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            screen_shake: true,
            reduced_motion: false,
            auto_fire: true,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings = serde_json::from_str(json)?;
        log::info!("Loaded settings");
        Ok(settings)
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective explosion cap
    pub fn max_effects(&self) -> usize {
        self.quality.max_effects()
    }
}
