//! Snake Rush headless runner
//!
//! Plays one session on the autopilot against the canned generator, stepping
//! simulated time at 60 frames per second, and logs a summary at the end.
//!
//! Usage: `snake-rush [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
use snake_rush::{
    Session, Tuning,
    objective::MockGenerator,
    sim::{ChallengeOutcome, GameEvent, GamePhase, autopilot},
};

/// Simulated frame length (ms)
#[cfg(not(target_arch = "wasm32"))]
const FRAME_MS: f64 = 1000.0 / 60.0;
/// Stop after this much simulated time even if the snake is still alive
#[cfg(not(target_arch = "wasm32"))]
const TIME_CAP_MS: f64 = 5.0 * 60.0 * 1000.0;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Snake Rush (headless) starting...");

    let tuning = load_tuning(std::env::args().nth(1));
    let seed = tuning.seed;
    let mut session = Session::new(tuning, MockGenerator::new(seed));

    let mut now = 0.0;
    let mut frames: u64 = 0;
    let mut challenges_won = 0;
    let mut challenges_lost = 0;
    session.start(now);

    while session.game.phase == GamePhase::Playing && now < TIME_CAP_MS {
        now += FRAME_MS;
        frames += 1;
        session.change_direction(autopilot::steer(&session.game));

        for event in session.frame(now) {
            match event {
                GameEvent::ChallengeIssued { id, goal_type } => {
                    if let Some(c) = &session.game.challenge {
                        println!(
                            "[{:>7.0} ms] challenge {} ({:?}): {}",
                            now, id, goal_type, c.title
                        );
                    }
                }
                GameEvent::ChallengeResolved { outcome, .. } => match outcome {
                    ChallengeOutcome::Success => challenges_won += 1,
                    ChallengeOutcome::Failure => challenges_lost += 1,
                },
                GameEvent::BossSpawned => println!("[{:>7.0} ms] the boss appears", now),
                GameEvent::Died { reason, score } => {
                    println!("[{:>7.0} ms] died ({}) with {} points", now, reason.as_str(), score)
                }
                _ => {}
            }
        }
    }

    let game = &session.game;
    log::info!(
        "Run finished after {} frames ({:.1} s simulated)",
        frames,
        now / 1000.0
    );
    println!();
    println!("score:        {}", game.score);
    println!("best:         {}", session.best_score);
    println!("length:       {}", game.snake.len());
    println!("close calls:  {}", game.close_call_count());
    println!("challenges:   {} won, {} lost", challenges_won, challenges_lost);
    match game.death_reason {
        Some(reason) => println!("ended by:     {}", reason.as_str()),
        None => println!("ended by:     time cap"),
    }
    if let Some(line) = &session.commentary {
        println!("last word:    {}", line);
    }
    for fact in session.facts.iter().rev().take(3) {
        println!("trivia:       {}", fact);
    }
}

/// Tuning from a JSON file, or the defaults when none is given or it can't be used
#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: Option<String>) -> Tuning {
    let Some(path) = path else {
        return Tuning::default();
    };
    match std::fs::read_to_string(&path) {
        Ok(json) => Tuning::from_json(&json).unwrap_or_else(|e| {
            log::error!("Failed to parse tuning {}: {}", path, e);
            Tuning::default()
        }),
        Err(e) => {
            log::error!("Failed to read tuning {}: {}", path, e);
            Tuning::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The engine is driven by the embedding page on wasm
}
