//! Configuration errors
//!
//! The simulation itself never fails; only loading tuning or settings can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Malformed JSON or wrong field types
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    /// A value that parsed but makes no sense for the game
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
