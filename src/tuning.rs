//! Data-driven game balance
//!
//! Every number that shapes gameplay lives in [`Tuning`]. The defaults are the
//! reference 500x500 configuration; a JSON file can override any subset.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse tuning file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
    TuningError::Invalid {
        field,
        reason: reason.into(),
    }
}

/// Game balance and layout parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Layout ===
    pub screen_width: f32,
    pub screen_height: f32,
    pub border_height: f32,

    // === Player ===
    pub player_left: f32,
    pub player_top: f32,
    pub player_size: f32,
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Vertical velocity added per hop (negative is up)
    pub hop_impulse: f32,
    /// Most negative vertical velocity a hop may produce
    pub max_rise_speed: f32,

    // === Obstacles ===
    pub block_width: f32,
    pub block_height: f32,
    /// Starting scroll speed, must be negative (leftward)
    pub initial_obstacle_speed: f32,
    pub pair_spacing: f32,
    pub min_obstacle_height: f32,

    // === Gap generation ===
    pub gap_start_min: u32,
    pub gap_start_max: u32,
    pub gap_step: u32,
    pub gap_floor: u32,
    /// Gap top edge is drawn from `gap_offset_min..gap_offset_max`
    pub gap_offset_min: u32,
    pub gap_offset_max: u32,

    // === Difficulty ===
    pub speed_step: f32,
    /// Cap on scroll speed magnitude
    pub max_obstacle_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            border_height: BORDER_HEIGHT,

            player_left: PLAYER_LEFT,
            player_top: PLAYER_TOP,
            player_size: PLAYER_SIZE,
            gravity: GRAVITY,
            hop_impulse: HOP_IMPULSE,
            max_rise_speed: MAX_RISE_SPEED,

            block_width: BLOCK_WIDTH,
            block_height: BLOCK_HEIGHT,
            initial_obstacle_speed: INITIAL_OBSTACLE_SPEED,
            pair_spacing: PAIR_SPACING,
            min_obstacle_height: MIN_OBSTACLE_HEIGHT,

            gap_start_min: GAP_START_MIN,
            gap_start_max: GAP_START_MAX,
            gap_step: GAP_STEP,
            gap_floor: GAP_FLOOR,
            gap_offset_min: GAP_OFFSET_MIN,
            gap_offset_max: GAP_OFFSET_MAX,

            speed_step: SPEED_STEP,
            max_obstacle_speed: MAX_OBSTACLE_SPEED,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Vertical space between ceiling and ground
    pub fn playfield_height(&self) -> f32 {
        self.screen_height - 2.0 * self.border_height
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            return Err(invalid("screen_width", "screen dimensions must be positive"));
        }
        if self.border_height < 0.0 || self.playfield_height() <= 0.0 {
            return Err(invalid("border_height", "borders leave no playfield"));
        }
        if self.player_size <= 0.0 {
            return Err(invalid("player_size", "must be positive"));
        }
        if self.block_width <= 0.0 || self.block_height <= 0.0 {
            return Err(invalid("block_width", "block dimensions must be positive"));
        }
        if self.min_obstacle_height < 0.0 {
            return Err(invalid("min_obstacle_height", "must not be negative"));
        }
        if self.initial_obstacle_speed >= 0.0 {
            return Err(invalid(
                "initial_obstacle_speed",
                "obstacles must scroll left (negative speed)",
            ));
        }
        if self.max_obstacle_speed < -self.initial_obstacle_speed {
            return Err(invalid(
                "max_obstacle_speed",
                "cap is slower than the starting speed",
            ));
        }
        if self.speed_step < 0.0 {
            return Err(invalid("speed_step", "must not be negative"));
        }
        if self.gap_floor > self.gap_start_min {
            return Err(invalid("gap_floor", "floor is above the starting minimum"));
        }
        if self.gap_start_min > self.gap_start_max {
            return Err(invalid("gap_start_min", "minimum exceeds maximum"));
        }
        if self.gap_offset_min >= self.gap_offset_max {
            return Err(invalid("gap_offset_min", "gap offset range is empty"));
        }
        let needed = self.gap_start_max as f32 + 2.0 * self.min_obstacle_height;
        if needed > self.playfield_height() {
            return Err(invalid(
                "gap_start_max",
                format!(
                    "playfield of {} px cannot hold a {} px gap",
                    self.playfield_height(),
                    self.gap_start_max
                ),
            ));
        }
        Ok(())
    }
}
