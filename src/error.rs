//! Error taxonomy
//!
//! Gameplay outcomes (misses, edge landings) are never errors. Only bad
//! configuration and broken internal contracts surface here.

use thiserror::Error;

/// Rejected session configuration. Validated eagerly on start/restart.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("place name list is empty")]
    EmptyPlaceNames,
    #[error("difficulty must be a positive integer")]
    ZeroDifficulty,
    #[error("geometry field `{field}` must be positive and finite, got {value}")]
    InvalidGeometry { field: &'static str, value: f32 },
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Programming-contract violation inside the simulation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("unknown fall variant `{0}`")]
    UnknownFallVariant(String),
    #[error("fall animation requested for a successful landing")]
    FallAfterSuccess,
}
