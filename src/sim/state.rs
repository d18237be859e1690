//! Game state and core simulation types
//!
//! The session is an explicit object owned by the caller; nothing here is
//! process-global. One `GameState` is one play-through plus the menu around it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::obstacle::Obstacle;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Menu, awaiting a difficulty choice
    Start,
    /// Active run
    Playing,
    /// Frozen, only reachable from/to Playing
    Paused,
    /// Run ended, offers restart back to the menu
    GameOver,
}

/// Chosen difficulty for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Hard,
}

impl Difficulty {
    /// Scroll speed at score 0
    pub fn base_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => EASY_BASE_SPEED,
            Difficulty::Hard => HARD_BASE_SPEED,
        }
    }

    /// Speed gained per score point
    pub fn speed_scaling(&self) -> f32 {
        match self {
            Difficulty::Easy => EASY_SPEED_SCALING,
            Difficulty::Hard => HARD_SPEED_SCALING,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Hard => "hard",
        }
    }
}

/// Domain events emitted by the simulation, consumed fire-and-forget by the
/// audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A jump charge was spent
    Jumped,
    /// Airborne-to-grounded transition resolved this tick
    Landed,
    /// The runner hit an obstacle (terminal for the session)
    Hit,
}

/// Current drawing-surface dimensions, read fresh each tick so that resizes
/// take effect immediately
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Vertical coordinate of the running surface
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.height - GROUND_MARGIN
    }
}

/// The runner. Horizontal position is fixed; only vertical kinematics change.
#[derive(Debug, Clone, Copy)]
pub struct Player {
    pub pos: Vec2,
    /// Vertical velocity (positive = down)
    pub vy: f32,
    /// Remaining jump charges, always in 0..=2
    pub jumps: u8,
}

impl Player {
    /// A grounded runner with full jump charges
    pub fn new(ground_y: f32) -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, ground_y),
            vy: 0.0,
            jumps: MAX_JUMPS,
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    /// Unset until the first difficulty choice
    pub difficulty: Option<Difficulty>,
    /// Monotonic non-decreasing within a session, reset by `start_game`
    pub score: u32,
    /// Simulation tick counter
    pub ticks: u64,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    /// Seeded RNG for shape-preset selection
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh session object at the menu
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        Self {
            phase: GamePhase::Start,
            difficulty: None,
            score: 0,
            ticks: 0,
            player: Player::new(viewport.ground_y()),
            obstacles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Current scroll speed. A pure function of (difficulty, score),
    /// recomputed every tick; never cached across a difficulty change.
    pub fn speed(&self) -> f32 {
        let difficulty = self.difficulty.unwrap_or(Difficulty::Easy);
        difficulty.base_speed() + self.score as f32 * difficulty.speed_scaling()
    }

    /// Begin a run: reset score, obstacles and player wholesale
    pub fn start_game(&mut self, difficulty: Difficulty, viewport: Viewport) {
        self.difficulty = Some(difficulty);
        self.score = 0;
        self.obstacles.clear();
        self.player = Player::new(viewport.ground_y());
        self.phase = GamePhase::Playing;
        log::info!("Session started ({})", difficulty.as_str());
    }

    /// Return to the menu after a game over. Score is left intact so the
    /// caller can still persist it.
    pub fn end_session(&mut self) {
        self.phase = GamePhase::Start;
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
