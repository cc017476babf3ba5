//! Error types for the simulation engine.
//!
//! Per-body physics operations fail fast when handed an id that is not in
//! the engine's collection; that is a programming-contract violation, not a
//! recoverable runtime condition.

use thiserror::Error;

/// Result type alias for simulation operations.
pub type SimResult<T> = Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    /// A per-body operation was invoked for a body absent from the engine.
    #[error("body {0} not found in simulation")]
    BodyNotFound(u64),

    /// Force→acceleration conversion divides by mass, so zero or negative
    /// mass is rejected at insertion.
    #[error("body {id} has non-positive mass {mass}")]
    NonPositiveMass { id: u64, mass: f64 },

    /// The body collection holds each identity at most once.
    #[error("body {0} already present in simulation")]
    DuplicateBody(u64),

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    TomlParse(#[from] toml::de::Error),
}
