//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time is passed in explicitly (ms); no clocks are read
//! - Seeded RNG only
//! - No rendering, platform or network dependencies

pub mod autopilot;
pub mod boss;
pub mod challenge;
pub mod close_call;
pub mod effects;
pub mod grid;
pub mod spawn;
pub mod state;
pub mod tick;

pub use boss::Boss;
pub use challenge::{Challenge, ChallengeDraft, ChallengeOutcome, GoalType, Reward};
pub use close_call::CloseCallDetector;
pub use grid::{Cell, Direction, Grid, chebyshev, manhattan};
pub use spawn::{MAX_SPAWN_ATTEMPTS, find_free_cell};
pub use state::{
    ActivePowerUp, DeathReason, GameEvent, GamePhase, GameState, MAX_PENDING_EVENTS, PowerUpItem,
    PowerUpKind,
};
pub use tick::update;
