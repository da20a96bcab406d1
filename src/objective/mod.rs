//! Objective generator contract
//!
//! Challenges, trivia and commentary come from an external generator that may
//! be canned, network-backed, slow or broken. The engine never talks to it;
//! the session does, through [`FallbackGenerator`], which swallows every
//! [`GeneratorError`] and substitutes a canned answer.

pub mod fallback;
pub mod mock;

pub use fallback::FallbackGenerator;
pub use mock::MockGenerator;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::{ChallengeDraft, DeathReason, GameState, GoalType, PowerUpKind, Reward};
use crate::tuning::Tuning;

/// Why a generator call produced nothing usable
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("generator unavailable: {0}")]
    Unavailable(String),
    #[error("generator timed out after {0} ms")]
    Timeout(u64),
    #[error("malformed generator response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid challenge: {0}")]
    Invalid(String),
}

/// Visual theme; also the topic for trivia
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Neon,
    Jungle,
    Lava,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Neon => "neon",
            Theme::Jungle => "jungle",
            Theme::Lava => "lava",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Theme::Neon => Theme::Jungle,
            Theme::Jungle => Theme::Lava,
            Theme::Lava => Theme::Neon,
        }
    }
}

/// What the commentary is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommentaryTopic {
    CloseCall,
    Died(DeathReason),
    ChallengeWon,
    ChallengeLost,
}

impl CommentaryTopic {
    pub fn tag(&self) -> &'static str {
        match self {
            CommentaryTopic::CloseCall => "close_call",
            CommentaryTopic::Died(_) => "death",
            CommentaryTopic::ChallengeWon => "challenge_won",
            CommentaryTopic::ChallengeLost => "challenge_lost",
        }
    }
}

/// Game context sent along with a challenge request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeContext {
    pub score: u64,
    pub snake_length: usize,
    pub active_power_up: Option<PowerUpKind>,
    pub boss_active: bool,
    pub theme: Theme,
}

impl ChallengeContext {
    pub fn from_state(state: &GameState, theme: Theme) -> Self {
        Self {
            score: state.score,
            snake_length: state.snake.len(),
            active_power_up: state.active_power_up_kind(),
            boss_active: state.boss_active(),
            theme,
        }
    }
}

/// A source of challenges, trivia and commentary
pub trait ObjectiveGenerator {
    fn generate_challenge(
        &mut self,
        context: &ChallengeContext,
    ) -> Result<ChallengeDraft, GeneratorError>;

    fn generate_trivia(&mut self, theme: Theme) -> Result<String, GeneratorError>;

    fn generate_commentary(
        &mut self,
        topic: CommentaryTopic,
        score: u64,
    ) -> Result<String, GeneratorError>;
}

impl<G: ObjectiveGenerator + ?Sized> ObjectiveGenerator for Box<G> {
    fn generate_challenge(
        &mut self,
        context: &ChallengeContext,
    ) -> Result<ChallengeDraft, GeneratorError> {
        (**self).generate_challenge(context)
    }

    fn generate_trivia(&mut self, theme: Theme) -> Result<String, GeneratorError> {
        (**self).generate_trivia(theme)
    }

    fn generate_commentary(
        &mut self,
        topic: CommentaryTopic,
        score: u64,
    ) -> Result<String, GeneratorError> {
        (**self).generate_commentary(topic, score)
    }
}

/// Challenge as a network-backed generator sends it (camelCase JSON)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChallengeWire {
    title: String,
    #[serde(default)]
    description: String,
    goal_type: GoalType,
    target_value: i64,
    time_limit_seconds: f64,
    #[serde(default)]
    reward: Option<RewardWire>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RewardWire {
    #[serde(default)]
    points: Option<u64>,
    #[serde(default)]
    power_up: Option<String>,
}

/// Parse and validate a generator's challenge JSON.
///
/// Missing reward points default to the configured challenge reward, the
/// time limit is clamped to the configured window, unknown power-up names are
/// dropped.
pub fn parse_challenge(json: &str, tuning: &Tuning) -> Result<ChallengeDraft, GeneratorError> {
    let wire: ChallengeWire = serde_json::from_str(json)?;

    if wire.title.trim().is_empty() {
        return Err(GeneratorError::Invalid("empty title".to_string()));
    }
    let target_value = u32::try_from(wire.target_value)
        .ok()
        .filter(|t| *t > 0)
        .ok_or_else(|| GeneratorError::Invalid(format!("target value {}", wire.target_value)))?;

    let reward = wire.reward.unwrap_or_default();
    let power_up = reward.power_up.as_deref().and_then(|name| {
        let kind = PowerUpKind::parse(name);
        if kind.is_none() {
            log::warn!("Ignoring unknown reward power-up '{}'", name);
        }
        kind
    });

    Ok(ChallengeDraft {
        title: wire.title,
        description: wire.description,
        goal_type: wire.goal_type,
        target_value,
        time_limit_seconds: tuning.clamp_challenge_seconds(wire.time_limit_seconds),
        reward: Reward {
            points: reward.points.unwrap_or(tuning.challenge_reward_points),
            power_up,
        },
    })
}
