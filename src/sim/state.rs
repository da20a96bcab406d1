//! Game state and core simulation types
//!
//! Everything the engine owns for one play session lives in [`GameState`].
//! The sub-behaviours (spawning, effects, boss, challenges, close calls) add
//! their own `impl GameState` blocks in sibling modules.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::boss::Boss;
use super::challenge::{Challenge, ChallengeOutcome, GoalType};
use super::close_call::CloseCallDetector;
use super::grid::{Cell, Direction, Grid};
use crate::tuning::Tuning;

/// Snake head spawns at this (col, row)
const START_CELL: (i32, i32) = (5, 5);

/// Undrained events kept before the oldest are dropped
pub const MAX_PENDING_EVENTS: usize = 256;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    /// Waiting for the first start
    Menu,
    /// Active gameplay
    Playing,
    /// Frozen; deadlines are shifted on resume
    Paused,
    /// Run ended
    GameOver,
}

/// What killed the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeathReason {
    Wall,
    /// Ran into its own body
    #[serde(rename = "SELF")]
    Body,
    Boss,
}

impl DeathReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeathReason::Wall => "wall",
            DeathReason::Body => "self",
            DeathReason::Boss => "boss",
        }
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PowerUpKind {
    SpeedBoost,
    SlowMotion,
    GhostMode,
    Magnet,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::SpeedBoost,
        PowerUpKind::SlowMotion,
        PowerUpKind::GhostMode,
        PowerUpKind::Magnet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::SpeedBoost => "SPEED_BOOST",
            PowerUpKind::SlowMotion => "SLOW_MOTION",
            PowerUpKind::GhostMode => "GHOST_MODE",
            PowerUpKind::Magnet => "MAGNET",
        }
    }

    /// Lenient parse of generator-supplied names ("SLOW_MOTION", "slow motion", ...)
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c.to_ascii_uppercase() })
            .collect();
        match normalized.as_str() {
            "SPEED_BOOST" | "SPEED" => Some(PowerUpKind::SpeedBoost),
            "SLOW_MOTION" | "SLOW" => Some(PowerUpKind::SlowMotion),
            "GHOST_MODE" | "GHOST" => Some(PowerUpKind::GhostMode),
            "MAGNET" => Some(PowerUpKind::Magnet),
            _ => None,
        }
    }

    /// Whether this effect pins the movement interval while active
    pub fn overrides_speed(&self) -> bool {
        matches!(self, PowerUpKind::SpeedBoost | PowerUpKind::SlowMotion)
    }
}

/// An uncollected power-up on the board
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerUpItem {
    pub position: Cell,
    pub kind: PowerUpKind,
    pub spawn_time: f64,
}

/// The effect currently applied to the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    pub expiry_time: f64,
}

/// Notifications for the outer orchestrator (commentary, trivia, effects)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    FoodEaten { at: Cell, score: u64 },
    FoodStolen { at: Cell },
    PowerUpSpawned { kind: PowerUpKind, at: Cell },
    PowerUpDespawned { kind: PowerUpKind },
    PowerUpCollected { kind: PowerUpKind },
    PowerUpActivated { kind: PowerUpKind },
    PowerUpExpired { kind: PowerUpKind },
    BossSpawned,
    BossDespawned,
    CloseCall { count: u32 },
    DeathSuppressed { reason: DeathReason },
    Died { reason: DeathReason, score: u64 },
    ChallengeIssued { id: u32, goal_type: GoalType },
    ChallengeProgress { id: u32, progress: u32, target: u32 },
    ChallengeResolved { id: u32, goal_type: GoalType, outcome: ChallengeOutcome },
}

/// Complete engine state for one play session object
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance constants
    pub tuning: Tuning,
    /// Board geometry
    pub grid: Grid,
    pub phase: GamePhase,
    /// Player segments, head first
    pub snake: VecDeque<Cell>,
    /// Direction used on the last movement tick
    pub direction: Direction,
    /// Buffered direction committed on the next movement tick
    pub next_direction: Direction,
    pub food: Cell,
    pub score: u64,
    /// Milliseconds per cell (smaller = faster)
    pub game_speed: u32,
    pub last_move_time: f64,
    pub power_up_item: Option<PowerUpItem>,
    pub active_power_up: Option<ActivePowerUp>,
    pub boss: Boss,
    pub challenge: Option<Challenge>,
    pub close_calls: CloseCallDetector,
    pub death_reason: Option<DeathReason>,
    /// When the current pause began
    pub paused_at: Option<f64>,
    pub(super) rng: Pcg32,
    events: VecDeque<GameEvent>,
    /// Next challenge ID
    next_id: u32,
}

impl GameState {
    /// Build an engine in the MENU phase
    pub fn new(tuning: Tuning) -> Self {
        let grid = tuning.grid();
        let mut state = Self {
            rng: Pcg32::seed_from_u64(tuning.seed),
            grid,
            phase: GamePhase::Menu,
            snake: VecDeque::from([start_cell(&grid)]),
            direction: Direction::Right,
            next_direction: Direction::Right,
            food: Cell::ZERO,
            score: 0,
            game_speed: tuning.initial_speed_ms,
            last_move_time: 0.0,
            power_up_item: None,
            active_power_up: None,
            boss: Boss::default(),
            challenge: None,
            close_calls: CloseCallDetector::default(),
            death_reason: None,
            paused_at: None,
            events: VecDeque::new(),
            next_id: 1,
            tuning,
        };
        state.food = state.spawn_food();
        state
    }

    /// Reset every per-session field and enter PLAYING
    pub fn start(&mut self, now: f64) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.snake.clear();
        self.snake.push_back(start_cell(&self.grid));
        self.direction = Direction::Right;
        self.next_direction = Direction::Right;
        self.game_speed = self.tuning.initial_speed_ms;
        self.last_move_time = now;
        self.power_up_item = None;
        self.active_power_up = None;
        self.boss.clear();
        self.challenge = None;
        self.close_calls = CloseCallDetector::default();
        self.death_reason = None;
        self.paused_at = None;
        self.events.clear();
        self.food = self.spawn_food();
        log::info!("Run started at {:.0} ms, food at {:?}", now, self.food);
    }

    /// Buffer a turn; an exact reversal of the current direction is ignored
    pub fn change_direction(&mut self, dir: Direction) {
        if dir.is_reverse_of(self.direction) {
            return;
        }
        self.next_direction = dir;
    }

    /// Advance the simulation to `now` (see [`super::tick::update`])
    pub fn update(&mut self, now: f64) {
        super::tick::update(self, now);
    }

    /// Single death entry point. Returns true if the player actually died.
    pub fn handle_death(&mut self, reason: DeathReason, now: f64) -> bool {
        if self.is_ghost() {
            log::debug!("Death by {} suppressed (ghost mode)", reason.as_str());
            self.push_event(GameEvent::DeathSuppressed { reason });
            return false;
        }

        self.phase = GamePhase::GameOver;
        self.death_reason = Some(reason);
        log::info!(
            "Game over: {} (score {}, length {})",
            reason.as_str(),
            self.score,
            self.snake.len()
        );
        self.push_event(GameEvent::Died {
            reason,
            score: self.score,
        });

        if self.challenge.is_some() {
            self.resolve_challenge(ChallengeOutcome::Failure, now);
        }
        true
    }

    /// PLAYING <-> PAUSED. Resuming shifts every wall-clock deadline by the
    /// paused duration so nothing expires while frozen.
    pub fn toggle_pause(&mut self, now: f64) {
        match self.phase {
            GamePhase::Playing => {
                self.phase = GamePhase::Paused;
                self.paused_at = Some(now);
                log::info!("Paused");
            }
            GamePhase::Paused => {
                let shift = self.paused_at.take().map_or(0.0, |t| (now - t).max(0.0));
                self.last_move_time += shift;
                self.boss.last_move_time += shift;
                if let Some(active) = self.active_power_up.as_mut() {
                    active.expiry_time += shift;
                }
                if let Some(item) = self.power_up_item.as_mut() {
                    item.spawn_time += shift;
                }
                if let Some(challenge) = self.challenge.as_mut() {
                    challenge.start_time += shift;
                }
                if let Some(last) = self.close_calls.last_reported.as_mut() {
                    *last += shift;
                }
                self.phase = GamePhase::Playing;
                log::info!("Resumed after {:.0} ms", shift);
            }
            _ => {}
        }
    }

    pub fn head(&self) -> Cell {
        self.snake.front().copied().unwrap_or(Cell::ZERO)
    }

    pub fn is_ghost(&self) -> bool {
        self.active_power_up_kind() == Some(PowerUpKind::GhostMode)
    }

    pub fn active_power_up_kind(&self) -> Option<PowerUpKind> {
        self.active_power_up.map(|a| a.kind)
    }

    pub fn boss_active(&self) -> bool {
        self.boss.active
    }

    pub fn close_call_count(&self) -> u32 {
        self.close_calls.count
    }

    /// Events recorded since the last drain, oldest first. Only the newest
    /// [`MAX_PENDING_EVENTS`] are kept, so callers should drain every frame.
    pub fn events(&self) -> &VecDeque<GameEvent> {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    pub(super) fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Allocate a new challenge ID
    pub(super) fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add points and feed score-driven challenge progress
    pub(super) fn award_points(&mut self, points: u64, now: f64) {
        self.score += points;
        self.record_points_for_challenge(points, now);
    }
}

fn start_cell(grid: &Grid) -> Cell {
    let col = START_CELL.0.min(grid.cols() - 1).max(0);
    let row = START_CELL.1.min(grid.rows() - 1).max(0);
    grid.cell_at(col, row)
}
