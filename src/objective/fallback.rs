//! Error-swallowing generator boundary
//!
//! Wraps any generator; a failed call is logged and answered from the canned
//! tables instead. Callers get plain values and never see an error.

use super::mock::MockGenerator;
use super::{ChallengeContext, CommentaryTopic, ObjectiveGenerator, Theme};
use crate::sim::ChallengeDraft;

pub struct FallbackGenerator<G> {
    inner: G,
    canned: MockGenerator,
    /// Calls answered from the canned tables because `inner` failed
    failures: u32,
}

impl<G: ObjectiveGenerator> FallbackGenerator<G> {
    pub fn new(inner: G, seed: u64) -> Self {
        Self {
            inner,
            canned: MockGenerator::new(seed),
            failures: 0,
        }
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn challenge(&mut self, context: &ChallengeContext) -> ChallengeDraft {
        match self.inner.generate_challenge(context) {
            Ok(draft) => draft,
            Err(e) => {
                log::warn!("Challenge generation failed ({}), using canned challenge", e);
                self.failures += 1;
                self.canned.canned_challenge()
            }
        }
    }

    pub fn trivia(&mut self, theme: Theme) -> String {
        match self.inner.generate_trivia(theme) {
            Ok(fact) => fact,
            Err(e) => {
                log::warn!("Trivia generation failed ({}), using canned fact", e);
                self.failures += 1;
                self.canned.canned_trivia(theme)
            }
        }
    }

    pub fn commentary(&mut self, topic: CommentaryTopic, score: u64) -> String {
        match self.inner.generate_commentary(topic, score) {
            Ok(line) => line,
            Err(e) => {
                log::warn!(
                    "Commentary generation for '{}' failed ({}), using canned line",
                    topic.tag(),
                    e
                );
                self.failures += 1;
                self.canned.canned_commentary(topic, score)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::GeneratorError;

    /// Fails every call
    struct Broken;

    impl ObjectiveGenerator for Broken {
        fn generate_challenge(
            &mut self,
            _context: &ChallengeContext,
        ) -> Result<ChallengeDraft, GeneratorError> {
            Err(GeneratorError::Unavailable("no api key".to_string()))
        }

        fn generate_trivia(&mut self, _theme: Theme) -> Result<String, GeneratorError> {
            Err(GeneratorError::Timeout(5_000))
        }

        fn generate_commentary(
            &mut self,
            _topic: CommentaryTopic,
            _score: u64,
        ) -> Result<String, GeneratorError> {
            let bad = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
            Err(GeneratorError::Malformed(bad))
        }
    }

    fn context() -> ChallengeContext {
        ChallengeContext {
            score: 50,
            snake_length: 3,
            active_power_up: None,
            boss_active: false,
            theme: Theme::Jungle,
        }
    }

    #[test]
    fn test_failures_fall_back_to_canned() {
        let mut generator = FallbackGenerator::new(Broken, 9);
        let draft = generator.challenge(&context());
        assert!(!draft.title.is_empty());
        assert!(!generator.trivia(Theme::Jungle).is_empty());
        assert!(!generator.commentary(CommentaryTopic::CloseCall, 10).is_empty());
        assert_eq!(generator.failures(), 3);
    }

    #[test]
    fn test_success_passes_through() {
        let mut generator = FallbackGenerator::new(MockGenerator::new(1), 2);
        let expected = MockGenerator::new(1).canned_trivia(Theme::Neon);
        assert_eq!(generator.trivia(Theme::Neon), expected);
        assert_eq!(generator.failures(), 0);
    }
}
