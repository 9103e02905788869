//! Obstacle pairs: a high and a low block framing a gap
//!
//! Both bodies of a pair are owned together so they always share one scroll
//! velocity and get repositioned together.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::difficulty::DifficultyState;
use crate::colors;
use crate::tuning::Tuning;

/// Two vertically opposed blocks scrolling left in lockstep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePair {
    /// Block hanging from the ceiling
    pub high: Body,
    /// Block standing on the ground
    pub low: Body,
}

impl ObstaclePair {
    /// Build a pair at `left` with the starting block height on both sides
    pub fn new(left: f32, speed: f32, tuning: &Tuning) -> Self {
        let high = Body::new(
            left,
            tuning.border_height,
            tuning.block_width,
            tuning.block_height,
            speed,
            colors::HIGH_BLOCK,
        );
        let low = Body::new(
            left,
            tuning.screen_height - tuning.border_height - tuning.block_height,
            tuning.block_width,
            tuning.block_height,
            speed,
            colors::LOW_BLOCK,
        );
        Self { high, low }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.high.left()
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.high.right()
    }

    /// Shared horizontal velocity
    #[inline]
    pub fn speed(&self) -> f32 {
        self.high.vel.x
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.high.vel.x = speed;
        self.low.vel.x = speed;
    }

    /// Top edge and height of the open space between the blocks
    pub fn gap(&self) -> (f32, f32) {
        let top = self.high.bottom();
        (top, self.low.top() - top)
    }

    pub fn tick(&mut self, dt: f32) {
        self.high.tick(dt);
        self.low.tick(dt);
    }

    pub fn bodies(&self) -> [&Body; 2] {
        [&self.high, &self.low]
    }

    /// Regenerate the pair once it has scrolled past the left edge
    ///
    /// Shrinks the shared gap bounds, draws a new gap size and position, and
    /// shifts both blocks one screen width to the right. Returns `true` when a
    /// recycle happened (the player scored).
    ///
    /// Obstacles are assumed to scroll left; a pair with non-negative speed
    /// never recycles.
    pub fn recycle_if_offscreen(
        &mut self,
        difficulty: &mut DifficultyState,
        rng: &mut Pcg32,
        tuning: &Tuning,
    ) -> bool {
        if self.speed() >= 0.0 || self.left() > 0.0 {
            return false;
        }

        difficulty.shrink_gap(tuning.gap_step, tuning.gap_floor);

        let gap_size = rng.random_range(difficulty.gap_min..=difficulty.gap_max);
        let gap_start = rng.random_range(tuning.gap_offset_min..tuning.gap_offset_max);

        let border = tuning.border_height;
        let playfield = tuning.playfield_height();
        let gap = gap_size as f32;

        // A low gap start with a wide gap would push the low block through the
        // floor. Slide the gap up instead so both blocks keep a minimum height.
        let max_high = playfield - gap - tuning.min_obstacle_height;
        let high_height = (gap_start as f32 - border)
            .min(max_high)
            .max(tuning.min_obstacle_height);
        let low_height = playfield - gap - high_height;

        self.high.pos.y = border;
        self.high.set_height(high_height);
        self.low.pos.y = border + high_height + gap;
        self.low.set_height(low_height);

        self.high.pos.x += tuning.screen_width;
        self.low.pos.x += tuning.screen_width;

        log::debug!(
            "Recycled pair: gap_size={} gap_start={} high={} low={}",
            gap_size,
            gap_start,
            high_height,
            low_height
        );

        true
    }
}
