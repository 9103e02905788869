//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Bodies are reused, never recreated
//! - No rendering or platform dependencies beyond the `Canvas` seam

pub mod body;
pub mod collision;
pub mod difficulty;
pub mod obstacle;
pub mod state;
pub mod tick;

pub use body::Body;
pub use collision::{first_hit, intersects};
pub use difficulty::DifficultyState;
pub use obstacle::ObstaclePair;
pub use state::{GameEvent, GamePhase, GameState, Hazard};
pub use tick::{TickInput, autopilot_wants_hop, tick};
