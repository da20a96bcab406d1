//! Snake Rush - A grid snake arcade game with a chasing boss
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, power-ups, boss, challenges)
//! - `objective`: Challenge/trivia/commentary generator contract and fallbacks
//! - `session`: Orchestrator that feeds engine events to the generator
//! - `tuning`: Data-driven game balance

pub mod objective;
pub mod session;
pub mod sim;
pub mod tuning;

pub use session::Session;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Board dimensions (pixels)
    pub const BOARD_WIDTH: i32 = 800;
    pub const BOARD_HEIGHT: i32 = 600;
    /// Size of one grid cell (pixels)
    pub const CELL_SIZE: i32 = 20;

    /// Milliseconds per cell at the start of a run (smaller = faster)
    pub const INITIAL_GAME_SPEED_MS: u32 = 100;
    /// Fastest the food ramp or score re-derivation may go
    pub const MIN_GAME_SPEED_MS: u32 = 50;
    pub const SPEED_BOOST_SPEED_MS: u32 = 50;
    pub const SLOW_MOTION_SPEED_MS: u32 = 150;
    pub const SPEED_STEP_PER_FOOD_MS: u32 = 1;
    /// Score needed for each 1 ms of speed when re-deriving speed from score
    pub const SCORE_PER_SPEED_STEP: u64 = 100;

    /// Scoring
    pub const POINTS_PER_FOOD: u64 = 10;
    pub const POINTS_PER_POWER_UP: u64 = 50;
    pub const CHALLENGE_REWARD_POINTS: u64 = 500;

    /// Power-ups
    pub const POWER_UP_DURATION_MS: f64 = 10_000.0;
    pub const POWER_UP_DESPAWN_MS: f64 = 8_000.0;
    /// Chance per movement tick that an item appears (when none exists)
    pub const POWER_UP_SPAWN_CHANCE: f64 = 0.005;

    /// Boss mode
    pub const BOSS_SPAWN_SCORE_THRESHOLD: u64 = 500;
    pub const BOSS_MOVE_INTERVAL_MS: f64 = 150.0;
    pub const BOSS_INITIAL_LENGTH: usize = 3;
    /// Boss head spawns this many cells in from the right edge
    pub const BOSS_SPAWN_OFFSET_CELLS: i32 = 5;

    /// Close call detection
    pub const CLOSE_CALL_BUFFER: i32 = 20;
    pub const CLOSE_CALL_DEBOUNCE_MS: f64 = 2_000.0;

    /// Challenge timing
    pub const CHALLENGE_INITIAL_DELAY_MS: f64 = 2_000.0;
    pub const MIN_CHALLENGE_TIME_SECONDS: f64 = 10.0;
    pub const MAX_CHALLENGE_TIME_SECONDS: f64 = 30.0;

    /// Default RNG seed
    pub const DEFAULT_SEED: u64 = 0x5EED_2026;
}

/// Movement interval derived from score: faster as score grows, floored at `min_ms`
#[inline]
pub fn speed_for_score(score: u64, base_ms: u32, min_ms: u32, score_per_step: u64) -> u32 {
    let steps = score / score_per_step.max(1);
    let derived = (base_ms as u64).saturating_sub(steps);
    derived.max(min_ms as u64) as u32
}
