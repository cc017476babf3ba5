// Centralized configuration: compile-time defaults for the engine plus the
// TOML-loaded initial setup (gravity_config.toml).

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::SimResult;
use crate::units;

// ====================
// Engine defaults
// ====================
/// Gravitational constant used when no override is configured.
pub const DEFAULT_G: f64 = units::GRAVITATIONAL_CONSTANT;
/// Upper bound on a single integration sub-step, in milliseconds. Elapsed
/// time beyond this is split into additional sub-steps.
pub const MAX_SUB_STEP_MS: f64 = 10.0;
/// Time-scale factor applied to elapsed wall-clock time.
pub const DEFAULT_SPEED: f64 = 1.0;
/// Per-body trail length; the oldest point is evicted past this.
pub const TRAIL_CAPACITY: usize = 255;

// ====================
// Driver loop
// ====================
/// Nominal tick interval of the driver loop, in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 10;
/// Frames between status lines on stdout.
pub const STATUS_REPORT_INTERVAL: usize = 500;

/// Default path of the initial-setup file.
pub const INIT_CONFIG_PATH: &str = "gravity_config.toml";

// ====================
// Initial setup (TOML)
// ====================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct InitConfig {
    pub simulation: Option<SimulationConfig>,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SimulationConfig {
    /// Optional gravitational constant override.
    pub g: Option<f64>,
    /// Optional max sub-step override, milliseconds.
    pub max_sub_step_ms: Option<f64>,
    /// Optional initial time-scale factor.
    pub speed: Option<f64>,
}

impl SimulationConfig {
    /// Resolved values, falling back to the global defaults when omitted.
    pub fn resolved(&self) -> (f64, f64, f64) {
        (
            self.g.unwrap_or(DEFAULT_G),
            self.max_sub_step_ms.unwrap_or(MAX_SUB_STEP_MS),
            self.speed.unwrap_or(DEFAULT_SPEED),
        )
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct BodyConfig {
    pub x: f64,
    pub y: f64,
    pub mass: f64,
    /// Constant drift velocity, x component.
    #[serde(default)]
    pub vx: f64,
    /// Constant drift velocity, y component.
    #[serde(default)]
    pub vy: f64,
}

impl InitConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: InitConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn load_default() -> SimResult<Self> {
        Self::load_from_file(INIT_CONFIG_PATH)
    }
}
