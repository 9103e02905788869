//! Difficulty ramp
//!
//! Two knobs tighten as the score climbs: the gap bounds used when a pair is
//! recycled, and the shared obstacle scroll speed.

use serde::{Deserialize, Serialize};

use super::obstacle::ObstaclePair;
use crate::tuning::Tuning;

/// Session-wide difficulty, owned by the game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyState {
    /// Smallest gap the next recycle may draw (pixels)
    pub gap_min: u32,
    /// Largest gap the next recycle may draw (pixels)
    pub gap_max: u32,
    /// Scroll speed shared by every obstacle body (pixels/s, negative is left)
    pub obstacle_speed: f32,
}

impl DifficultyState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            gap_min: tuning.gap_start_min,
            gap_max: tuning.gap_start_max,
            obstacle_speed: tuning.initial_obstacle_speed,
        }
    }

    /// Narrow both gap bounds by `step`
    ///
    /// Once the minimum reaches `floor`, both bounds lock to `floor` and every
    /// later gap is exactly that size.
    pub fn shrink_gap(&mut self, step: u32, floor: u32) {
        self.gap_min = self.gap_min.saturating_sub(step);
        self.gap_max = self.gap_max.saturating_sub(step);
        if self.gap_min <= floor {
            self.gap_min = floor;
            self.gap_max = floor;
        }
    }

    /// Speed every obstacle up by one step, capped at `max_speed` magnitude
    ///
    /// Called once per point scored.
    pub fn on_score_increased(&mut self, pairs: &mut [ObstaclePair], tuning: &Tuning) {
        self.obstacle_speed =
            (self.obstacle_speed - tuning.speed_step).max(-tuning.max_obstacle_speed);
        for pair in pairs.iter_mut() {
            pair.set_speed(self.obstacle_speed);
        }
    }
}
