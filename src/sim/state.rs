//! Game state and core simulation types
//!
//! Everything the simulation touches lives in [`GameState`], so a session can
//! be snapshotted, reset, or replayed from its seed.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::difficulty::DifficultyState;
use super::obstacle::ObstaclePair;
use crate::colors;
use crate::tuning::{Tuning, TuningError};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player hit a border or obstacle
    Crashed,
    /// Player asked to stop
    Quit,
}

impl GamePhase {
    pub fn is_over(self) -> bool {
        self != GamePhase::Playing
    }
}

/// Something the player can crash into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hazard {
    Ceiling,
    Ground,
    /// High block of the pair at this index
    High(usize),
    /// Low block of the pair at this index
    Low(usize),
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A pair was recycled; `score` is the new total
    Scored { score: u32 },
    /// Obstacles sped up to `speed`
    SpeedUp { speed: f32 },
    Crashed { hazard: Hazard, score: u32 },
    Quit { score: u32 },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gap generator
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub ceiling: Body,
    pub ground: Body,
    /// Obstacle pairs in spawn order
    pub pairs: Vec<ObstaclePair>,
    pub player: Body,
    pub difficulty: DifficultyState,
    pub score: u32,
    /// Score at which obstacles were last sped up
    pub score_at_last_speedup: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
}

impl GameState {
    /// Create a new game with the reference tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create a new game with custom tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        let t = &tuning;

        let ceiling = Body::new(0.0, 0.0, t.screen_width, t.border_height, 0.0, colors::BORDER);
        let ground = Body::new(
            0.0,
            t.screen_height - t.border_height,
            t.screen_width,
            t.border_height,
            0.0,
            colors::BORDER,
        );

        let first_left = t.screen_width - t.block_width;
        let pairs = vec![
            ObstaclePair::new(first_left, t.initial_obstacle_speed, t),
            ObstaclePair::new(first_left + t.pair_spacing, t.initial_obstacle_speed, t),
        ];

        let mut player = Body::new(
            t.player_left,
            t.player_top,
            t.player_size,
            t.player_size,
            0.0,
            colors::PLAYER,
        );
        player.enable_gravity(t.gravity);

        let difficulty = DifficultyState::new(t);

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            ceiling,
            ground,
            pairs,
            player,
            difficulty,
            score: 0,
            score_at_last_speedup: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            tuning,
        }
    }

    /// Every body the player can crash into, tagged
    pub fn hazards(&self) -> impl Iterator<Item = (Hazard, &Body)> {
        let borders = [(Hazard::Ground, &self.ground), (Hazard::Ceiling, &self.ceiling)];
        let blocks = self.pairs.iter().enumerate().flat_map(|(i, pair)| {
            [(Hazard::Low(i), &pair.low), (Hazard::High(i), &pair.high)]
        });
        borders.into_iter().chain(blocks)
    }

    /// All bodies in draw order (player last, on top)
    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.hazards()
            .map(|(_, body)| body)
            .chain(std::iter::once(&self.player))
    }
}
