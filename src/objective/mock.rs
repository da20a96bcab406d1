//! Canned generator
//!
//! Deterministic (seeded) picks from fixed tables. Used on its own when no
//! real generator is configured, and as the fallback for a failing one.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{ChallengeContext, CommentaryTopic, GeneratorError, ObjectiveGenerator, Theme};
use crate::sim::{ChallengeDraft, DeathReason, GoalType, PowerUpKind, Reward};

struct Template {
    title: &'static str,
    description: &'static str,
    goal_type: GoalType,
    target_value: u32,
    time_limit_seconds: f64,
    points: u64,
    power_up: Option<PowerUpKind>,
}

static CHALLENGES: [Template; 4] = [
    Template {
        title: "Speed Freak",
        description: "The snake had too much espresso! Survive the caffeine rush for 15s!",
        goal_type: GoalType::Survive,
        target_value: 15,
        time_limit_seconds: 15.0,
        points: 500,
        power_up: Some(PowerUpKind::SlowMotion),
    },
    Template {
        title: "Snack Attack",
        description: "You're HANGRY! Devour 5 pellets before you faint from starvation (20s)!",
        goal_type: GoalType::EatTarget,
        target_value: 5,
        time_limit_seconds: 20.0,
        points: 300,
        power_up: None,
    },
    Template {
        title: "Claustrophobia",
        description: "The walls are looking at you funny... Don't touch them for 20s!",
        goal_type: GoalType::Survive,
        target_value: 20,
        time_limit_seconds: 20.0,
        points: 400,
        power_up: None,
    },
    Template {
        title: "Diet Starts Tomorrow",
        description: "Eat 3 pellets. No excuses! (15s)",
        goal_type: GoalType::EatTarget,
        target_value: 3,
        time_limit_seconds: 15.0,
        points: 250,
        power_up: None,
    },
];

static NEON_FACTS: [&str; 6] = [
    "Did you know? The first cyberpunk story was written in 1980 by Bruce Bethke.",
    "Neon lights were invented in 1910 by Georges Claude.",
    "The term 'Cyberspace' was coined by William Gibson in 'Neuromancer'.",
    "Blade Runner is set in 2019. We are already in the future!",
    "Synthwave music mimics 80s soundtracks but is a modern genre.",
    "Neon glows red-orange; every other 'neon' colour is a different gas or a coated tube.",
];

static JUNGLE_FACTS: [&str; 6] = [
    "The Amazon Rainforest produces 20% of the world's oxygen.",
    "Snakes can't blink! They have no eyelids.",
    "There are over 3,000 species of snakes in the world.",
    "Some snakes can fly (glide) up to 100 meters!",
    "The Titanoboa was a prehistoric snake 42 feet long.",
    "Jungle rot is real... but hopefully not in this game.",
];

static LAVA_FACTS: [&str; 6] = [
    "Lava can reach temperatures of 1,200°C (2,200°F).",
    "Obsidian is volcanic glass formed by rapidly cooling lava.",
    "There are over 1,500 active volcanoes on Earth.",
    "The floor is lava! (A classic childhood game).",
    "Volcanic ash is good for soil fertility.",
    "Magma is lava before it erupts.",
];

static CLOSE_CALL_LINES: [&str; 5] = [
    "Whoa, that was a little too close!",
    "Scales intact. Barely.",
    "The wall felt that breeze.",
    "Living on the edge, literally.",
    "Your ancestors are watching. Nervously.",
];

static DEATH_LINES: [&str; 7] = [
    "OUCH!",
    "OOF!",
    "RIP",
    "SNAKE? SNAKE?!",
    "WASTED",
    "BONK!",
    "MY BAD!",
];

static CHALLENGE_WON_LINES: [&str; 3] = ["CHALLENGE DONE!", "Nailed it!", "Too easy."];

static CHALLENGE_LOST_LINES: [&str; 3] = [
    "So close. Not really.",
    "Challenge failed. The snake remains humble.",
    "Next time, champ.",
];

/// Seeded canned generator; never fails
#[derive(Debug, Clone)]
pub struct MockGenerator {
    rng: Pcg32,
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new(crate::consts::DEFAULT_SEED)
    }
}

impl MockGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.rng.random_range(0..items.len())]
    }

    pub fn canned_challenge(&mut self) -> ChallengeDraft {
        let t = self.pick(&CHALLENGES);
        ChallengeDraft {
            title: t.title.to_string(),
            description: t.description.to_string(),
            goal_type: t.goal_type,
            target_value: t.target_value,
            time_limit_seconds: t.time_limit_seconds,
            reward: Reward {
                points: t.points,
                power_up: t.power_up,
            },
        }
    }

    pub fn canned_trivia(&mut self, theme: Theme) -> String {
        let facts: &[&str] = match theme {
            Theme::Neon => &NEON_FACTS,
            Theme::Jungle => &JUNGLE_FACTS,
            Theme::Lava => &LAVA_FACTS,
        };
        self.pick(facts).to_string()
    }

    pub fn canned_commentary(&mut self, topic: CommentaryTopic, score: u64) -> String {
        match topic {
            CommentaryTopic::CloseCall => {
                format!("{} ({} pts)", self.pick(&CLOSE_CALL_LINES), score)
            }
            CommentaryTopic::Died(reason) => {
                let line = self.pick(&DEATH_LINES);
                let cause = match reason {
                    DeathReason::Wall => "Did the wall jump out at you?",
                    DeathReason::Body => "You are, it turns out, not food.",
                    DeathReason::Boss => "The boss sends its regards.",
                };
                format!("{} {} Final score: {}", line, cause, score)
            }
            CommentaryTopic::ChallengeWon => self.pick(&CHALLENGE_WON_LINES).to_string(),
            CommentaryTopic::ChallengeLost => self.pick(&CHALLENGE_LOST_LINES).to_string(),
        }
    }
}

impl ObjectiveGenerator for MockGenerator {
    fn generate_challenge(
        &mut self,
        _context: &ChallengeContext,
    ) -> Result<ChallengeDraft, GeneratorError> {
        Ok(self.canned_challenge())
    }

    fn generate_trivia(&mut self, theme: Theme) -> Result<String, GeneratorError> {
        Ok(self.canned_trivia(theme))
    }

    fn generate_commentary(
        &mut self,
        topic: CommentaryTopic,
        score: u64,
    ) -> Result<String, GeneratorError> {
        Ok(self.canned_commentary(topic, score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> ChallengeContext {
        ChallengeContext {
            score: 100,
            snake_length: 4,
            active_power_up: None,
            boss_active: false,
            theme: Theme::Neon,
        }
    }

    #[test]
    fn test_mock_challenges_are_well_formed() {
        let mut generator = MockGenerator::new(1);
        for _ in 0..50 {
            let draft = generator.generate_challenge(&context()).unwrap();
            assert!(!draft.title.is_empty());
            assert!(!draft.description.is_empty());
            assert!(draft.target_value > 0);
            assert!((10.0..=30.0).contains(&draft.time_limit_seconds));
            assert!(draft.reward.points > 0);
        }
    }

    #[test]
    fn test_trivia_matches_theme() {
        let mut generator = MockGenerator::new(2);
        for _ in 0..20 {
            let fact = generator.generate_trivia(Theme::Lava).unwrap();
            assert!(LAVA_FACTS.contains(&fact.as_str()));
        }
    }

    #[test]
    fn test_commentary_is_non_empty() {
        let mut generator = MockGenerator::new(3);
        let line = generator
            .generate_commentary(CommentaryTopic::CloseCall, 150)
            .unwrap();
        assert!(line.ends_with("(150 pts)"));
        let line = generator
            .generate_commentary(CommentaryTopic::Died(DeathReason::Boss), 900)
            .unwrap();
        assert!(line.contains("boss"));
        assert!(line.ends_with("900"));
    }

    #[test]
    fn test_same_seed_same_picks() {
        let mut a = MockGenerator::new(77);
        let mut b = MockGenerator::new(77);
        for _ in 0..10 {
            assert_eq!(a.canned_challenge(), b.canned_challenge());
            assert_eq!(a.canned_trivia(Theme::Jungle), b.canned_trivia(Theme::Jungle));
        }
    }
}
