//! Hop Square - a single-screen gate-hopping arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, obstacle recycling, difficulty, collisions)
//! - `renderer`: Canvas abstraction, software framebuffer and WebGPU pipeline
//! - `platform`: Input/pacing collaborators and the session loop
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use serde::{Deserialize, Serialize};

/// Game configuration constants (reference configuration)
pub mod consts {
    /// Frames per second the simulation is paced at
    pub const FPS: u32 = 30;
    /// Fixed simulation timestep. Never measured from the wall clock.
    pub const SIM_DT: f32 = 1.0 / FPS as f32;
    /// Maximum substeps per animation frame on the web (catch-up limit)
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Canvas dimensions
    pub const SCREEN_WIDTH: f32 = 500.0;
    pub const SCREEN_HEIGHT: f32 = 500.0;
    /// Height of the ceiling and ground strips
    pub const BORDER_HEIGHT: f32 = 50.0;

    /// Player defaults
    pub const PLAYER_LEFT: f32 = 100.0;
    pub const PLAYER_TOP: f32 = 250.0;
    pub const PLAYER_SIZE: f32 = 20.0;
    /// Downward acceleration on the player (pixels/s²)
    pub const GRAVITY: f32 = 9.8 * 35.0;
    /// Velocity change of one hop (negative is up)
    pub const HOP_IMPULSE: f32 = -250.0;
    /// Fastest upward speed a hop can reach
    pub const MAX_RISE_SPEED: f32 = -300.0;

    /// Obstacle defaults
    pub const BLOCK_WIDTH: f32 = 20.0;
    pub const BLOCK_HEIGHT: f32 = 100.0;
    pub const INITIAL_OBSTACLE_SPEED: f32 = -100.0;
    /// Horizontal distance between the two obstacle pairs at start
    pub const PAIR_SPACING: f32 = 250.0;
    /// Never let a regenerated obstacle body get thinner than this
    pub const MIN_OBSTACLE_HEIGHT: f32 = 5.0;

    /// Gap size bounds before the first recycle
    pub const GAP_START_MIN: u32 = 200;
    pub const GAP_START_MAX: u32 = 300;
    /// Gap bounds shrink by this much per recycle
    pub const GAP_STEP: u32 = 10;
    /// Gap bounds never shrink below this
    pub const GAP_FLOOR: u32 = 100;
    /// Range (half-open) the gap's top edge is drawn from
    pub const GAP_OFFSET_MIN: u32 = 60;
    pub const GAP_OFFSET_MAX: u32 = 375;

    /// Obstacles speed up by this much per point
    pub const SPEED_STEP: f32 = 5.0;
    /// Obstacles never scroll faster than this (magnitude)
    pub const MAX_OBSTACLE_SPEED: f32 = 200.0;
}

/// Opaque 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Color as normalized RGBA for the GPU (alpha is always 1)
    pub fn to_rgba_f32(self) -> [f32; 4] {
        [
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
            1.0,
        ]
    }
}

/// Colors for game elements
pub mod colors {
    use super::Rgb;

    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BACKGROUND: Rgb = Rgb(1, 1, 1);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);

    pub const BORDER: Rgb = RED;
    pub const LOW_BLOCK: Rgb = GREEN;
    pub const HIGH_BLOCK: Rgb = BLUE;
    pub const PLAYER: Rgb = WHITE;
}
