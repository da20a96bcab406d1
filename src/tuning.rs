//! Data-driven game balance
//!
//! Every number the simulation reads comes from here. Defaults mirror
//! [`crate::consts`]; a JSON document only needs the fields it overrides.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Grid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Board ===
    pub board_width: i32,
    pub board_height: i32,
    pub cell_size: i32,

    // === Speed (ms per cell) ===
    pub initial_speed_ms: u32,
    pub min_speed_ms: u32,
    pub speed_boost_ms: u32,
    pub slow_motion_ms: u32,
    pub speed_step_per_food_ms: u32,
    pub score_per_speed_step: u64,

    // === Scoring ===
    pub points_per_food: u64,
    pub points_per_power_up: u64,
    /// Reward applied when a generated challenge omits one
    pub challenge_reward_points: u64,

    // === Power-ups ===
    pub power_up_duration_ms: f64,
    pub power_up_despawn_ms: f64,
    pub power_up_spawn_chance: f64,

    // === Boss ===
    pub boss_score_threshold: u64,
    pub boss_move_interval_ms: f64,
    pub boss_length: usize,
    pub boss_spawn_offset_cells: i32,

    // === Close calls ===
    pub close_call_buffer: i32,
    pub close_call_debounce_ms: f64,

    // === Challenges ===
    pub challenge_initial_delay_ms: f64,
    pub min_challenge_seconds: f64,
    pub max_challenge_seconds: f64,

    /// Seed for food placement, power-up rolls and canned generator picks
    pub seed: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            cell_size: CELL_SIZE,

            initial_speed_ms: INITIAL_GAME_SPEED_MS,
            min_speed_ms: MIN_GAME_SPEED_MS,
            speed_boost_ms: SPEED_BOOST_SPEED_MS,
            slow_motion_ms: SLOW_MOTION_SPEED_MS,
            speed_step_per_food_ms: SPEED_STEP_PER_FOOD_MS,
            score_per_speed_step: SCORE_PER_SPEED_STEP,

            points_per_food: POINTS_PER_FOOD,
            points_per_power_up: POINTS_PER_POWER_UP,
            challenge_reward_points: CHALLENGE_REWARD_POINTS,

            power_up_duration_ms: POWER_UP_DURATION_MS,
            power_up_despawn_ms: POWER_UP_DESPAWN_MS,
            power_up_spawn_chance: POWER_UP_SPAWN_CHANCE,

            boss_score_threshold: BOSS_SPAWN_SCORE_THRESHOLD,
            boss_move_interval_ms: BOSS_MOVE_INTERVAL_MS,
            boss_length: BOSS_INITIAL_LENGTH,
            boss_spawn_offset_cells: BOSS_SPAWN_OFFSET_CELLS,

            close_call_buffer: CLOSE_CALL_BUFFER,
            close_call_debounce_ms: CLOSE_CALL_DEBOUNCE_MS,

            challenge_initial_delay_ms: CHALLENGE_INITIAL_DELAY_MS,
            min_challenge_seconds: MIN_CHALLENGE_TIME_SECONDS,
            max_challenge_seconds: MAX_CHALLENGE_TIME_SECONDS,

            seed: DEFAULT_SEED,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Self = serde_json::from_str(json)?;
        log::info!(
            "Loaded tuning: {}x{} board, {} px cells, seed {}",
            tuning.board_width,
            tuning.board_height,
            tuning.cell_size,
            tuning.seed
        );
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Board geometry described by this tuning
    pub fn grid(&self) -> Grid {
        Grid::new(self.board_width, self.board_height, self.cell_size)
    }

    /// Same tuning with a different seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Clamp a requested challenge length into the configured window
    pub fn clamp_challenge_seconds(&self, seconds: f64) -> f64 {
        if seconds.is_nan() {
            return self.min_challenge_seconds;
        }
        seconds.clamp(self.min_challenge_seconds, self.max_challenge_seconds)
    }
}
