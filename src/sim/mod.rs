//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Tick-count based, never wall-clock based
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod obstacle;
pub mod physics;
pub mod state;
pub mod tick;

pub use obstacle::{Obstacle, SHAPE_PRESETS};
pub use state::{Difficulty, GameEvent, GamePhase, GameState, Player, Viewport};
pub use tick::{TickInput, spawn_obstacle, tick};
