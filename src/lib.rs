//! Neon Runner - a neon cityscape endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, game state)
//! - `render`: Canvas 2D rendering collaborator (wasm only)
//! - `audio`: Procedural Web Audio sound cues (wasm only)
//! - `highscores`: Persisted best score
//! - `settings`: Player preferences

pub mod highscores;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod render;

pub use highscores::HighScore;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Gravity added to vertical velocity each tick (units/tick²)
    pub const GRAVITY: f32 = 0.9;
    /// Vertical impulse applied on jump (negative = up)
    pub const JUMP_IMPULSE: f32 = -20.0;
    /// Jump charges restored on landing (double jump)
    pub const MAX_JUMPS: u8 = 2;

    /// The runner's fixed horizontal position
    pub const PLAYER_X: f32 = 140.0;
    /// Distance from the bottom of the viewport to the running surface
    pub const GROUND_MARGIN: f32 = 120.0;

    /// Base scroll speed per difficulty
    pub const EASY_BASE_SPEED: f32 = 5.0;
    pub const HARD_BASE_SPEED: f32 = 7.0;
    /// Speed gained per score point
    pub const EASY_SPEED_SCALING: f32 = 0.15;
    pub const HARD_SPEED_SCALING: f32 = 0.25;

    /// Obstacle spawn cadence (wall clock, independent of frame rate)
    pub const SPAWN_INTERVAL_MS: i32 = 1400;
    /// Obstacles spawn this far past the right edge of the viewport
    pub const SPAWN_LEAD: f32 = 40.0;
    /// Obstacles sink this far below the ground line
    pub const OBSTACLE_SINK: f32 = 20.0;

    /// Collision margins around the player's point position
    pub const PLAYER_HALF_WIDTH: f32 = 10.0;
    pub const PLAYER_FOOT_MARGIN: f32 = 10.0;
    pub const PLAYER_HEAD_MARGIN: f32 = 40.0;
}
