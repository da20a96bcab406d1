//! Boss snake
//!
//! Appears while the activation condition holds (score past the threshold,
//! or a BOSS_ESCAPE challenge is running). Moves on its own timer with a
//! greedy one-axis heuristic toward the food and steals it on arrival.
//! Any boss segment on the player's head kills the player.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::challenge::GoalType;
use super::grid::{Cell, Direction, Grid};
use super::state::{DeathReason, GameEvent, GameState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boss {
    pub active: bool,
    /// Head first; empty while inactive
    pub segments: VecDeque<Cell>,
    pub direction: Direction,
    pub last_move_time: f64,
}

impl Default for Boss {
    fn default() -> Self {
        Self {
            active: false,
            segments: VecDeque::new(),
            direction: Direction::Left,
            last_move_time: 0.0,
        }
    }
}

impl Boss {
    /// Spawn `length` cells long, `offset_cells` in from the right edge,
    /// vertically centred, facing left
    pub fn spawn(&mut self, grid: &Grid, length: usize, offset_cells: i32, now: f64) {
        let row = grid.rows() / 2;
        let head_col = (grid.cols() - offset_cells).max(0);
        self.segments = (0..length.max(1) as i32)
            .map(|i| grid.cell_at(head_col + i, row))
            .collect();
        self.direction = Direction::Left;
        self.last_move_time = now;
        self.active = true;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn head(&self) -> Option<Cell> {
        self.segments.front().copied()
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.segments.contains(&cell)
    }

    /// Close the horizontal gap first, then the vertical one
    pub fn greedy_direction(head: Cell, target: Cell) -> Option<Direction> {
        let delta = target - head;
        if delta.x != 0 {
            Some(if delta.x > 0 { Direction::Right } else { Direction::Left })
        } else if delta.y != 0 {
            Some(if delta.y > 0 { Direction::Down } else { Direction::Up })
        } else {
            None
        }
    }

    /// One step toward `target`; length is unchanged. Never leaves the board.
    pub fn step_toward(&mut self, grid: &Grid, target: Cell) {
        let Some(head) = self.head() else {
            return;
        };
        if let Some(dir) = Self::greedy_direction(head, target) {
            self.direction = dir;
        }
        let next = grid.step(head, self.direction);
        if !grid.contains(next) {
            return;
        }
        self.segments.push_front(next);
        self.segments.pop_back();
    }
}

/// Whether two cells are the same within less than one cell of slack
#[inline]
fn reaches(a: Cell, b: Cell, cell_size: i32) -> bool {
    let d = a - b;
    d.x.abs() < cell_size && d.y.abs() < cell_size
}

impl GameState {
    pub fn boss_condition_met(&self) -> bool {
        self.score > self.tuning.boss_score_threshold
            || self
                .challenge
                .as_ref()
                .is_some_and(|c| c.active && c.goal_type == GoalType::BossEscape)
    }

    /// Spawn/despawn, move on the boss timer, steal food, hit the player
    pub(super) fn update_boss(&mut self, now: f64) {
        let wanted = self.boss_condition_met();
        if wanted && !self.boss.active {
            self.boss.spawn(
                &self.grid,
                self.tuning.boss_length,
                self.tuning.boss_spawn_offset_cells,
                now,
            );
            log::info!("Boss spawned at {:?} (score {})", self.boss.head(), self.score);
            self.push_event(GameEvent::BossSpawned);
        } else if !wanted && self.boss.active {
            self.boss.clear();
            log::info!("Boss retreated");
            self.push_event(GameEvent::BossDespawned);
        }
        if !self.boss.active {
            return;
        }

        if now - self.boss.last_move_time >= self.tuning.boss_move_interval_ms {
            self.boss.last_move_time = now;
            self.boss.step_toward(&self.grid, self.food);

            if self
                .boss
                .head()
                .is_some_and(|h| reaches(h, self.food, self.grid.cell_size))
            {
                let stolen = self.food;
                self.respawn_food();
                log::debug!("Boss stole food at {:?}", stolen);
                self.push_event(GameEvent::FoodStolen { at: stolen });
            }
        }

        if self.boss.occupies(self.head()) {
            self.handle_death(DeathReason::Boss, now);
        }
    }
}
