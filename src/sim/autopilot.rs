//! Demo autopilot
//!
//! Greedy steering used by the headless runner: head for the food, never
//! reverse, stay off walls, the body and the boss. No lookahead beyond one
//! step, so it will eventually box itself in.

use super::grid::{Cell, Direction, manhattan};
use super::state::GameState;

/// Pick the next direction for the player snake
pub fn steer(state: &GameState) -> Direction {
    let head = state.head();

    Direction::ALL
        .into_iter()
        .filter(|dir| !dir.is_reverse_of(state.direction))
        .filter_map(|dir| {
            let next = state.grid.step(head, dir);
            if !is_open(state, next) {
                return None;
            }
            // Cells with no way onward rank last
            let exits = Direction::ALL
                .into_iter()
                .filter(|d| !d.is_reverse_of(dir))
                .filter(|d| is_open(state, state.grid.step(next, *d)))
                .count();
            let dead_end = exits == 0;
            Some((dir, (dead_end, manhattan(next, state.food))))
        })
        .min_by_key(|(_, rank)| *rank)
        .map(|(dir, _)| dir)
        .unwrap_or(state.direction)
}

/// On the board and clear of the boss and every body cell. The tail counts:
/// self collision is checked before it moves.
fn is_open(state: &GameState, cell: Cell) -> bool {
    state.grid.contains(cell) && !state.boss.occupies(cell) && !state.snake.contains(&cell)
}
