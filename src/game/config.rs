//! Simulation Configuration
//!
//! Every tuning constant the simulation needs, passed explicitly to the
//! stages that use it. Loadable from JSON; missing fields take defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::vec2::Vec2;
use crate::game::actor::WallMode;

/// How real frame time maps onto simulation steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeStepMode {
    /// Accumulate real time and run zero or more fixed steps per frame.
    #[default]
    FixedAccumulator,
    /// Exactly one step per frame regardless of real elapsed time.
    FrameLocked,
}

/// Tuning for the simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Physics quantum in seconds.
    pub quantum: f32,
    /// Frame-time handling.
    pub time_step: TimeStepMode,
    /// Upper bound on fixed steps run for a single frame.
    pub max_steps_per_frame: u32,
    /// Wall probe extension on the Right/Down sides.
    pub probe_margin: f32,
    /// Amount taken off the margin on the Left/Up sides.
    pub probe_trim: f32,
    /// Player movement speed (units/sec).
    pub player_speed: f32,
    /// Player bounding box.
    pub player_size: Vec2,
    /// Hostile chase speed (units/sec).
    pub hostile_speed: f32,
    /// Hostile bounding box.
    pub hostile_size: Vec2,
    /// Wall behaviour for hostiles whose spawn entry doesn't override it.
    pub hostile_wall_mode: WallMode,
    /// Invulnerability window after taking damage (seconds).
    pub invulnerability_duration: f32,
    /// Lives at the start of a game.
    pub max_lives: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            quantum: 1.0 / crate::TICK_RATE as f32,
            time_step: TimeStepMode::FixedAccumulator,
            max_steps_per_frame: 5,
            probe_margin: 10.0,
            probe_trim: 6.0,
            player_speed: 120.0,
            player_size: Vec2::new(20.0, 20.0),
            hostile_speed: 60.0,
            hostile_size: Vec2::new(20.0, 20.0),
            hostile_wall_mode: WallMode::Ghost,
            invulnerability_duration: 2.0,
            max_lives: crate::MAX_LIVES,
        }
    }
}

/// Invalid configuration values.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A value that must be strictly positive wasn't.
    #[error("{field} must be positive and finite, got {value}")]
    NotPositive {
        /// Offending field
        field: &'static str,
        /// Offending value
        value: f32,
    },

    /// A value that must be non-negative wasn't.
    #[error("{field} must be non-negative and finite, got {value}")]
    Negative {
        /// Offending field
        field: &'static str,
        /// Offending value
        value: f32,
    },

    /// Trim larger than the margin would shrink the probe.
    #[error("probe_trim ({trim}) exceeds probe_margin ({margin})")]
    TrimExceedsMargin {
        /// Configured trim
        trim: f32,
        /// Configured margin
        margin: f32,
    },

    /// One tick of movement would reach past the shortest wall probe.
    #[error("{field} moves {step} per tick, beyond the {reach} wall probe reach")]
    StepExceedsProbe {
        /// Offending speed field
        field: &'static str,
        /// Distance covered in one quantum
        step: f32,
        /// Shortest probe reach (Left/Up)
        reach: f32,
    },

    /// Zero lives or zero steps per frame.
    #[error("{0} must be at least 1")]
    Zero(&'static str),

    /// Config file could not be read.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for `SimConfig`.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SimConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check every tuning value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("quantum", self.quantum)?;
        positive("player_speed", self.player_speed)?;
        positive("player_size.x", self.player_size.x)?;
        positive("player_size.y", self.player_size.y)?;
        positive("hostile_size.x", self.hostile_size.x)?;
        positive("hostile_size.y", self.hostile_size.y)?;
        positive("invulnerability_duration", self.invulnerability_duration)?;
        non_negative("hostile_speed", self.hostile_speed)?;
        non_negative("probe_margin", self.probe_margin)?;
        non_negative("probe_trim", self.probe_trim)?;

        if self.probe_trim > self.probe_margin {
            return Err(ConfigError::TrimExceedsMargin {
                trim: self.probe_trim,
                margin: self.probe_margin,
            });
        }
        self.check_step("player_speed", self.player_speed)?;
        self.check_step("hostile_speed", self.hostile_speed)?;

        if self.max_lives == 0 {
            return Err(ConfigError::Zero("max_lives"));
        }
        if self.max_steps_per_frame == 0 {
            return Err(ConfigError::Zero("max_steps_per_frame"));
        }
        Ok(())
    }

    /// Shortest wall probe reach, on the Left/Up sides.
    #[inline]
    pub fn min_probe_reach(&self) -> f32 {
        self.probe_margin - self.probe_trim
    }

    /// Reject a speed whose per-tick step could carry an actor into a wall
    /// the probe has not yet seen.
    pub fn check_step(&self, field: &'static str, speed: f32) -> Result<(), ConfigError> {
        let step = speed * self.quantum;
        let reach = self.min_probe_reach();
        if step > reach {
            return Err(ConfigError::StepExceedsProbe { field, step, reach });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}
