//! Frame update
//!
//! Called once per animation frame with the current time. Time-based side
//! effects run on every call; the snake advances at most one cell per call,
//! and only once `game_speed` ms have passed since the last move.

use super::grid::{Cell, chebyshev};
use super::state::{DeathReason, GameEvent, GamePhase, GameState, PowerUpKind};

/// Advance the game state to `now` (ms)
///
/// Order: power-up expiry, item despawn, challenge deadline, then on a
/// movement tick: movement/collision, pickups, close call, boss.
pub fn update(state: &mut GameState, now: f64) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.expire_power_up(now);
    state.despawn_stale_power_up(now);
    state.check_challenge_deadline(now);

    if now - state.last_move_time < state.game_speed as f64 {
        return;
    }
    state.last_move_time = now;

    advance_snake(state, now);
    // A suppressed death leaves the player in place but the boss keeps going
    if state.phase != GamePhase::Playing {
        return;
    }

    state.update_boss(now);
}

/// One movement tick
fn advance_snake(state: &mut GameState, now: f64) {
    state.direction = state.next_direction;

    let head = state.head();
    let new_head = state.grid.step(head, state.direction);

    if !state.grid.contains(new_head) {
        state.handle_death(DeathReason::Wall, now);
        return;
    }
    if state.snake.contains(&new_head) {
        state.handle_death(DeathReason::Body, now);
        return;
    }

    state.snake.push_front(new_head);

    if eats_food(state, new_head) {
        let eaten = state.food;
        state.award_points(state.tuning.points_per_food, now);
        state.respawn_food();
        state.ramp_speed_after_food();
        state.push_event(GameEvent::FoodEaten {
            at: eaten,
            score: state.score,
        });
        state.record_food_for_challenge(now);
    } else {
        state.snake.pop_back();
    }

    if !state.collect_power_up_item(new_head, now) {
        state.maybe_spawn_power_up(now);
    }

    state.check_close_call(new_head, now);
}

/// Head on the food, or within one cell of it while MAGNET is active
fn eats_food(state: &GameState, head: Cell) -> bool {
    if head == state.food {
        return true;
    }
    state.active_power_up_kind() == Some(PowerUpKind::Magnet)
        && chebyshev(head, state.food) <= state.grid.cell_size
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::Direction;
    use crate::sim::state::PowerUpItem;
    use crate::tuning::Tuning;
    use glam::IVec2;
    use std::collections::VecDeque;

    fn quiet_tuning() -> Tuning {
        Tuning {
            power_up_spawn_chance: 0.0,
            ..Tuning::default()
        }
    }

    fn playing() -> GameState {
        let mut state = GameState::new(quiet_tuning());
        state.start(0.0);
        state.food = IVec2::new(700, 500);
        state
    }

    #[test]
    fn test_no_op_outside_playing() {
        let mut state = GameState::new(quiet_tuning());
        let before = state.snake.clone();
        state.update(10_000.0);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.snake, before);
    }

    #[test]
    fn test_moves_only_after_interval() {
        let mut state = playing();
        state.update(99.0);
        assert_eq!(state.head(), IVec2::new(100, 100));
        state.update(100.0);
        assert_eq!(state.head(), IVec2::new(120, 100));
        assert_eq!(state.last_move_time, 100.0);
    }

    #[test]
    fn test_missed_ticks_do_not_multi_step() {
        let mut state = playing();
        // Ten intervals elapsed, still one cell
        state.update(1_000.0);
        assert_eq!(state.head(), IVec2::new(120, 100));
    }

    #[test]
    fn test_buffered_direction_committed_on_tick() {
        let mut state = playing();
        state.change_direction(Direction::Down);
        assert_eq!(state.direction, Direction::Right);
        state.update(100.0);
        assert_eq!(state.direction, Direction::Down);
        assert_eq!(state.head(), IVec2::new(100, 120));
    }

    #[test]
    fn test_effective_direction_never_reverses() {
        let mut state = playing();
        state.change_direction(Direction::Up);
        state.update(100.0);
        assert_eq!(state.direction, Direction::Up);

        // Down reverses the committed direction
        state.change_direction(Direction::Down);
        assert_eq!(state.next_direction, Direction::Up);
        state.update(200.0);
        assert_eq!(state.head(), IVec2::new(100, 60));
    }

    #[test]
    fn test_length_constant_without_food() {
        let mut state = playing();
        state.snake = VecDeque::from([
            IVec2::new(100, 100),
            IVec2::new(80, 100),
            IVec2::new(60, 100),
        ]);
        let mut now = 0.0;
        for _ in 0..5 {
            now += 100.0;
            state.update(now);
            assert_eq!(state.snake.len(), 3);
        }
        assert_eq!(state.head(), IVec2::new(200, 100));
        assert_eq!(*state.snake.back().unwrap(), IVec2::new(160, 100));
    }

    #[test]
    fn test_eating_grows_scores_and_speeds_up() {
        let mut state = playing();
        state.food = IVec2::new(120, 100);
        state.update(100.0);
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.score, 10);
        assert_eq!(state.game_speed, 99);
        assert_ne!(state.food, IVec2::new(120, 100));
        assert!(!state.snake.contains(&state.food));
        assert!(state.events().contains(&GameEvent::FoodEaten {
            at: IVec2::new(120, 100),
            score: 10
        }));
    }

    #[test]
    fn test_wall_collision() {
        let mut state = playing();
        state.snake[0] = IVec2::new(780, 100);
        state.update(100.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.death_reason, Some(DeathReason::Wall));
        // The dead snake does not advance into the wall
        assert_eq!(state.head(), IVec2::new(780, 100));
    }

    #[test]
    fn test_bottom_wall_collision() {
        let mut state = playing();
        state.snake[0] = IVec2::new(100, 580);
        state.direction = Direction::Down;
        state.next_direction = Direction::Down;
        state.update(200.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.death_reason, Some(DeathReason::Wall));
    }

    #[test]
    fn test_self_collision() {
        let mut state = playing();
        // Head came up from below; turning right runs into the tail
        state.snake = VecDeque::from([
            IVec2::new(100, 100),
            IVec2::new(100, 120),
            IVec2::new(120, 120),
            IVec2::new(120, 100),
        ]);
        state.direction = Direction::Up;
        state.next_direction = Direction::Right;
        state.update(100.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.death_reason, Some(DeathReason::Body));
        assert_eq!(state.snake.len(), 4);
    }

    #[test]
    fn test_ghost_suppresses_self_collision() {
        let mut state = playing();
        state.activate_power_up(PowerUpKind::GhostMode, 0.0);
        state.snake = VecDeque::from([
            IVec2::new(120, 80),
            IVec2::new(120, 100),
            IVec2::new(140, 100),
        ]);
        state.direction = Direction::Left;
        state.next_direction = Direction::Down;
        state.update(100.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.death_reason, None);
    }

    #[test]
    fn test_power_up_pickup_on_move() {
        let mut state = playing();
        state.power_up_item = Some(PowerUpItem {
            position: IVec2::new(120, 100),
            kind: PowerUpKind::SpeedBoost,
            spawn_time: 0.0,
        });
        state.update(100.0);
        assert!(state.power_up_item.is_none());
        assert_eq!(state.active_power_up_kind(), Some(PowerUpKind::SpeedBoost));
        assert_eq!(state.game_speed, 50);
        assert_eq!(state.score, 50);
        // Length unchanged by power-ups
        assert_eq!(state.snake.len(), 1);
    }

    #[test]
    fn test_magnet_pulls_adjacent_food() {
        let mut state = playing();
        state.activate_power_up(PowerUpKind::Magnet, 0.0);
        // Diagonal to where the head will land
        state.food = IVec2::new(140, 120);
        state.update(100.0);
        assert_eq!(state.score, 10);
        assert_eq!(state.snake.len(), 2);
    }

    #[test]
    fn test_close_call_reported_on_move() {
        let mut state = playing();
        state.snake[0] = IVec2::new(760, 100);
        state.update(100.0);
        assert_eq!(state.head(), IVec2::new(780, 100));
        assert_eq!(state.close_call_count(), 1);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let tuning = Tuning {
            power_up_spawn_chance: 0.5,
            ..Tuning::default().with_seed(99_999)
        };
        let mut state1 = GameState::new(tuning.clone());
        let mut state2 = GameState::new(tuning);
        state1.start(0.0);
        state2.start(0.0);

        let turns = [Direction::Down, Direction::Right, Direction::Up, Direction::Right];
        let mut now = 0.0;
        for (i, turn) in turns.iter().cycle().take(40).enumerate() {
            if i % 3 == 0 {
                state1.change_direction(*turn);
                state2.change_direction(*turn);
            }
            now += 100.0;
            state1.update(now);
            state2.update(now);
        }

        assert_eq!(state1.snake, state2.snake);
        assert_eq!(state1.food, state2.food);
        assert_eq!(state1.power_up_item, state2.power_up_item);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.events(), state2.events());
    }
}
