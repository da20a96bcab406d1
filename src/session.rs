//! Play session orchestrator
//!
//! Owns the engine and the objective generator. Each frame it drives the
//! engine, then turns engine events into generator calls: trivia when food is
//! eaten, commentary on close calls, deaths and resolved challenges. The
//! generator never sees the engine directly and its failures never reach it.

use std::collections::VecDeque;

use crate::objective::{
    ChallengeContext, CommentaryTopic, FallbackGenerator, ObjectiveGenerator, Theme,
};
use crate::sim::{ChallengeOutcome, Direction, GameEvent, GamePhase, GameState};
use crate::tuning::Tuning;

/// Trivia feed length; oldest facts drop off first
pub const MAX_FACTS: usize = 20;

pub struct Session<G: ObjectiveGenerator> {
    pub game: GameState,
    generator: FallbackGenerator<G>,
    pub theme: Theme,
    /// Trivia collected this run, oldest first
    pub facts: VecDeque<String>,
    /// Latest commentary line
    pub commentary: Option<String>,
    /// Best score since the session was created (not persisted)
    pub best_score: u64,
    /// When the scheduled challenge request fires (ms)
    pending_challenge_at: Option<f64>,
}

impl<G: ObjectiveGenerator> Session<G> {
    pub fn new(tuning: Tuning, generator: G) -> Self {
        let canned_seed = tuning.seed.wrapping_add(1);
        Self {
            game: GameState::new(tuning),
            generator: FallbackGenerator::new(generator, canned_seed),
            theme: Theme::default(),
            facts: VecDeque::new(),
            commentary: None,
            best_score: 0,
            pending_challenge_at: None,
        }
    }

    /// Start (or restart) a run and schedule its first challenge
    pub fn start(&mut self, now: f64) {
        self.game.start(now);
        self.facts.clear();
        self.commentary = None;
        self.pending_challenge_at = Some(now + self.game.tuning.challenge_initial_delay_ms);
    }

    pub fn change_direction(&mut self, dir: Direction) {
        self.game.change_direction(dir);
    }

    /// Pause or resume; a scheduled challenge request moves with the pause
    pub fn toggle_pause(&mut self, now: f64) {
        if self.game.phase == GamePhase::Paused {
            if let (Some(at), Some(paused_at)) =
                (self.pending_challenge_at.as_mut(), self.game.paused_at)
            {
                *at += (now - paused_at).max(0.0);
            }
        }
        self.game.toggle_pause(now);
    }

    pub fn cycle_theme(&mut self) -> Theme {
        self.theme = self.theme.next();
        log::info!("Theme: {}", self.theme.as_str());
        self.theme
    }

    pub fn failures(&self) -> u32 {
        self.generator.failures()
    }

    /// Ask the generator for a challenge and hand it to the engine.
    /// Returns the issued ID, or `None` when the engine is not accepting one.
    pub fn request_challenge(&mut self, now: f64) -> Option<u32> {
        if self.game.phase != GamePhase::Playing || self.game.challenge.is_some() {
            return None;
        }
        let context = ChallengeContext::from_state(&self.game, self.theme);
        let mut draft = self.generator.challenge(&context);
        draft.time_limit_seconds = self
            .game
            .tuning
            .clamp_challenge_seconds(draft.time_limit_seconds);
        self.game.issue_challenge(draft, now)
    }

    /// Drive one frame and react to what happened. Returns the frame's events.
    pub fn frame(&mut self, now: f64) -> Vec<GameEvent> {
        if self.game.phase == GamePhase::Playing
            && self.pending_challenge_at.is_some_and(|at| now >= at)
        {
            self.pending_challenge_at = None;
            self.request_challenge(now);
        }

        self.game.update(now);

        let events = self.game.drain_events();
        for event in &events {
            self.react(event);
        }
        self.best_score = self.best_score.max(self.game.score);
        events
    }

    fn react(&mut self, event: &GameEvent) {
        match event {
            GameEvent::FoodEaten { .. } => {
                let fact = self.generator.trivia(self.theme);
                if self.facts.len() >= MAX_FACTS {
                    self.facts.pop_front();
                }
                self.facts.push_back(fact);
            }
            GameEvent::CloseCall { .. } => {
                self.say(CommentaryTopic::CloseCall, self.game.score);
            }
            GameEvent::Died { reason, score } => {
                self.say(CommentaryTopic::Died(*reason), *score);
            }
            // A challenge failed by dying keeps the death line
            GameEvent::ChallengeResolved { outcome, .. }
                if self.game.phase != GamePhase::GameOver =>
            {
                let topic = match outcome {
                    ChallengeOutcome::Success => CommentaryTopic::ChallengeWon,
                    ChallengeOutcome::Failure => CommentaryTopic::ChallengeLost,
                };
                self.say(topic, self.game.score);
            }
            _ => {}
        }
    }

    fn say(&mut self, topic: CommentaryTopic, score: u64) {
        let line = self.generator.commentary(topic, score);
        log::debug!("Commentary ({}): {}", topic.tag(), line);
        self.commentary = Some(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::{GeneratorError, MockGenerator};
    use crate::sim::{ChallengeDraft, DeathReason};
    use glam::IVec2;

    /// Generator that is always down
    struct Offline;

    impl ObjectiveGenerator for Offline {
        fn generate_challenge(
            &mut self,
            _context: &ChallengeContext,
        ) -> Result<ChallengeDraft, GeneratorError> {
            Err(GeneratorError::Unavailable("offline".to_string()))
        }

        fn generate_trivia(&mut self, _theme: Theme) -> Result<String, GeneratorError> {
            Err(GeneratorError::Unavailable("offline".to_string()))
        }

        fn generate_commentary(
            &mut self,
            _topic: CommentaryTopic,
            _score: u64,
        ) -> Result<String, GeneratorError> {
            Err(GeneratorError::Timeout(3_000))
        }
    }

    fn quiet_tuning() -> Tuning {
        Tuning {
            power_up_spawn_chance: 0.0,
            ..Tuning::default()
        }
    }

    fn started<G: ObjectiveGenerator>(generator: G) -> Session<G> {
        let mut session = Session::new(quiet_tuning(), generator);
        session.start(0.0);
        session.game.food = IVec2::new(700, 500);
        session
    }

    fn issued(events: &[GameEvent]) -> bool {
        events
            .iter()
            .any(|e| matches!(e, GameEvent::ChallengeIssued { .. }))
    }

    #[test]
    fn test_first_challenge_after_initial_delay() {
        let mut session = started(MockGenerator::new(4));
        assert!(!issued(&session.frame(1_999.0)));
        assert!(session.game.challenge.is_none());
        assert!(issued(&session.frame(2_000.0)));
        assert!(session.game.challenge.is_some());
        // Scheduled request fires once
        assert!(!issued(&session.frame(2_100.0)));
    }

    #[test]
    fn test_pause_delays_scheduled_challenge() {
        let mut session = started(MockGenerator::new(4));
        session.toggle_pause(500.0);
        session.toggle_pause(1_500.0);
        assert!(!issued(&session.frame(2_500.0)));
        assert!(issued(&session.frame(3_000.0)));
    }

    #[test]
    fn test_request_challenge_rejected_while_active() {
        let mut session = started(MockGenerator::new(4));
        assert!(session.request_challenge(10.0).is_some());
        assert!(session.request_challenge(20.0).is_none());
    }

    #[test]
    fn test_food_eaten_adds_trivia() {
        let mut session = started(MockGenerator::new(5));
        session.theme = Theme::Lava;
        session.game.food = IVec2::new(120, 100);
        session.frame(100.0);
        assert_eq!(session.game.score, 10);
        assert_eq!(session.facts.len(), 1);
        assert_eq!(session.best_score, 10);
    }

    #[test]
    fn test_trivia_feed_is_capped() {
        let mut session = started(MockGenerator::new(5));
        for i in 0..(MAX_FACTS + 5) {
            session.facts.push_back(format!("fact {}", i));
            if session.facts.len() > MAX_FACTS {
                session.facts.pop_front();
            }
        }
        session.game.food = IVec2::new(120, 100);
        session.frame(100.0);
        assert_eq!(session.facts.len(), MAX_FACTS);
        assert_eq!(session.facts[0], "fact 6");
        assert_ne!(session.facts.back().map(String::as_str), Some("fact 24"));
    }

    #[test]
    fn test_death_produces_commentary() {
        let mut session = started(MockGenerator::new(6));
        session.game.snake[0] = IVec2::new(780, 100);
        session.frame(100.0);
        assert_eq!(session.game.phase, GamePhase::GameOver);
        assert_eq!(session.game.death_reason, Some(DeathReason::Wall));
        let line = session.commentary.clone().unwrap();
        assert!(line.contains("Final score: 0"));
    }

    #[test]
    fn test_failing_generator_never_stalls_the_game() {
        let mut session = started(Offline);
        session.game.food = IVec2::new(120, 100);
        session.frame(100.0);
        assert_eq!(session.facts.len(), 1);

        assert!(issued(&session.frame(2_000.0)));
        session.game.snake[0] = IVec2::new(780, 100);
        session.frame(2_100.0);
        assert_eq!(session.game.phase, GamePhase::GameOver);
        assert!(session.commentary.is_some());
        assert!(session.failures() >= 3);
    }

    #[test]
    fn test_restart_clears_feed_keeps_best() {
        let mut session = started(MockGenerator::new(7));
        session.game.food = IVec2::new(120, 100);
        session.frame(100.0);
        assert_eq!(session.best_score, 10);

        session.start(5_000.0);
        assert!(session.facts.is_empty());
        assert!(session.commentary.is_none());
        assert_eq!(session.game.score, 0);
        assert_eq!(session.best_score, 10);
    }

    #[test]
    fn test_cycle_theme() {
        let mut session = Session::new(quiet_tuning(), MockGenerator::default());
        assert_eq!(session.theme, Theme::Neon);
        assert_eq!(session.cycle_theme(), Theme::Jungle);
        assert_eq!(session.cycle_theme(), Theme::Lava);
        assert_eq!(session.cycle_theme(), Theme::Neon);
    }
}
