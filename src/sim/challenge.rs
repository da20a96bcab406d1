//! Challenge state machine
//!
//! One externally issued objective at a time. The engine owns its lifecycle:
//! NONE -> ACTIVE -> (success | failure) -> NONE. Nothing is kept after
//! resolution.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GamePhase, GameState, PowerUpKind};

/// Category of objective; decides how a challenge resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalType {
    Survive,
    EatTarget,
    AvoidZone,
    BossEscape,
    ScoreRush,
    SpecialMission,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChallengeOutcome {
    Success,
    Failure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub points: u64,
    pub power_up: Option<PowerUpKind>,
}

/// A challenge as delivered by the generator, before the engine owns it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeDraft {
    pub title: String,
    pub description: String,
    pub goal_type: GoalType,
    pub target_value: u32,
    pub time_limit_seconds: f64,
    pub reward: Reward,
}

/// An issued challenge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub goal_type: GoalType,
    pub target_value: u32,
    pub time_limit_seconds: f64,
    pub reward: Reward,
    pub active: bool,
    pub progress: u32,
    /// Issuance time (ms)
    pub start_time: f64,
}

impl Challenge {
    pub fn from_draft(id: u32, draft: ChallengeDraft, now: f64) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            goal_type: draft.goal_type,
            target_value: draft.target_value,
            time_limit_seconds: draft.time_limit_seconds,
            reward: draft.reward,
            active: true,
            progress: 0,
            start_time: now,
        }
    }

    pub fn elapsed_seconds(&self, now: f64) -> f64 {
        (now - self.start_time) / 1000.0
    }

    pub fn is_expired(&self, now: f64) -> bool {
        self.elapsed_seconds(now) >= self.time_limit_seconds
    }

    /// Surviving until the deadline is the win condition for SURVIVE only
    pub fn timeout_outcome(&self) -> ChallengeOutcome {
        match self.goal_type {
            GoalType::Survive => ChallengeOutcome::Success,
            _ => ChallengeOutcome::Failure,
        }
    }

    pub fn is_met(&self) -> bool {
        self.progress >= self.target_value
    }
}

impl GameState {
    /// Accept a generated challenge. Only one may be active, and only while
    /// PLAYING; returns the assigned ID.
    pub fn issue_challenge(&mut self, draft: ChallengeDraft, now: f64) -> Option<u32> {
        if self.phase != GamePhase::Playing {
            log::debug!("Challenge '{}' dropped: not playing", draft.title);
            return None;
        }
        if self.challenge.is_some() {
            log::debug!("Challenge '{}' dropped: one already active", draft.title);
            return None;
        }

        let id = self.next_entity_id();
        let challenge = Challenge::from_draft(id, draft, now);
        log::info!(
            "Challenge {} issued: '{}' ({:?}, target {}, {}s)",
            id,
            challenge.title,
            challenge.goal_type,
            challenge.target_value,
            challenge.time_limit_seconds
        );
        let goal_type = challenge.goal_type;
        self.challenge = Some(challenge);
        self.push_event(GameEvent::ChallengeIssued { id, goal_type });
        Some(id)
    }

    /// Resolve an expired challenge by its goal type's timeout rule
    pub(super) fn check_challenge_deadline(&mut self, now: f64) {
        let outcome = match &self.challenge {
            Some(c) if c.active && c.is_expired(now) => c.timeout_outcome(),
            _ => return,
        };
        self.resolve_challenge(outcome, now);
    }

    /// EAT_TARGET progress on every food pickup
    pub(super) fn record_food_for_challenge(&mut self, now: f64) {
        self.advance_challenge(GoalType::EatTarget, 1, now);
    }

    /// SCORE_RUSH progress counts points gained since issuance
    pub(super) fn record_points_for_challenge(&mut self, points: u64, now: f64) {
        let points = u32::try_from(points).unwrap_or(u32::MAX);
        self.advance_challenge(GoalType::ScoreRush, points, now);
    }

    fn advance_challenge(&mut self, goal_type: GoalType, amount: u32, now: f64) {
        let Some(challenge) = self.challenge.as_mut() else {
            return;
        };
        if !challenge.active || challenge.goal_type != goal_type || amount == 0 {
            return;
        }

        challenge.progress = challenge.progress.saturating_add(amount);
        let (id, progress, target, met) = (
            challenge.id,
            challenge.progress,
            challenge.target_value,
            challenge.is_met(),
        );
        self.push_event(GameEvent::ChallengeProgress {
            id,
            progress,
            target,
        });
        if met {
            self.resolve_challenge(ChallengeOutcome::Success, now);
        }
    }

    /// Finish the active challenge and clear it. Success pays the reward.
    pub fn resolve_challenge(&mut self, outcome: ChallengeOutcome, now: f64) {
        let Some(mut challenge) = self.challenge.take() else {
            return;
        };
        challenge.active = false;

        log::info!(
            "Challenge {} '{}' resolved: {:?} (progress {}/{})",
            challenge.id,
            challenge.title,
            outcome,
            challenge.progress,
            challenge.target_value
        );

        if outcome == ChallengeOutcome::Success {
            self.score += challenge.reward.points;
            if let Some(kind) = challenge.reward.power_up {
                self.activate_power_up(kind, now);
            }
        }

        self.push_event(GameEvent::ChallengeResolved {
            id: challenge.id,
            goal_type: challenge.goal_type,
            outcome,
        });
    }
}
