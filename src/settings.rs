//! Simulation tuning
//!
//! Every engineering constant the sweep and the frame loop use, loadable from
//! JSON so stuck configurations can be reproduced with different caps.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Why a tuning file could not be used
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Simulation tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Hard cap on sub-collisions resolved in one step
    pub max_sweep_iterations: u32,
    /// Fraction of the paddle's horizontal speed added to the ball on contact
    pub paddle_speed_transfer: f32,
    /// Separations below this snap to zero
    pub snap_epsilon: f32,

    // === Launch ===
    pub launch_speed: f32,
    pub launch_area_radius: f32,

    // === Paddle controller ===
    pub paddle_max_speed: f32,
    pub paddle_acceleration: f32,

    /// Ball is lost once its centre drops below this height
    pub ball_lost_depth: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_sweep_iterations: MAX_SWEEP_ITERATIONS,
            paddle_speed_transfer: PADDLE_SPEED_TRANSFER,
            snap_epsilon: SNAP_EPSILON,

            launch_speed: LAUNCH_SPEED,
            launch_area_radius: LAUNCH_AREA_RADIUS,

            paddle_max_speed: PADDLE_MAX_SPEED,
            paddle_acceleration: PADDLE_ACCELERATION,

            ball_lost_depth: BALL_LOST_DEPTH,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read tuning from `path`, falling back to defaults on any error
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let loaded = std::fs::read_to_string(path)
            .map_err(ConfigError::from)
            .and_then(|json| Self::from_json(&json));

        match loaded {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(err) => {
                log::warn!("Using default tuning ({}): {}", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_sweep_iterations == 0 {
            return Err(ConfigError::Invalid(
                "max_sweep_iterations must be at least 1".into(),
            ));
        }
        let values = [
            ("paddle_speed_transfer", self.paddle_speed_transfer),
            ("snap_epsilon", self.snap_epsilon),
            ("launch_speed", self.launch_speed),
            ("launch_area_radius", self.launch_area_radius),
            ("paddle_max_speed", self.paddle_max_speed),
            ("paddle_acceleration", self.paddle_acceleration),
            ("ball_lost_depth", self.ball_lost_depth),
        ];
        if let Some((name, _)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::Invalid(format!("{name} must be finite")));
        }
        if self.snap_epsilon < 0.0 {
            return Err(ConfigError::Invalid("snap_epsilon must not be negative".into()));
        }
        Ok(())
    }
}
