//! Food and power-up placement
//!
//! Uniform rejection sampling over grid cells with a bounded retry budget.
//! When the budget runs out the origin cell is used instead of failing.

use rand::Rng;

use super::grid::{Cell, Grid};
use super::state::{GameEvent, GameState, PowerUpItem, PowerUpKind};

/// Placement attempts before falling back to the origin
pub const MAX_SPAWN_ATTEMPTS: u32 = 100;

/// Pick a random cell for which `occupied` is false
pub fn find_free_cell<R: Rng>(rng: &mut R, grid: &Grid, occupied: impl Fn(Cell) -> bool) -> Cell {
    let (cols, rows) = (grid.cols(), grid.rows());
    if cols <= 0 || rows <= 0 {
        return Cell::ZERO;
    }
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let cell = grid.cell_at(rng.random_range(0..cols), rng.random_range(0..rows));
        if !occupied(cell) {
            return cell;
        }
    }
    log::debug!("Spawn retries exhausted, falling back to origin");
    Cell::ZERO
}

impl GameState {
    /// A free cell for food: not on the player or the boss
    pub fn spawn_food(&mut self) -> Cell {
        let snake = &self.snake;
        let boss = &self.boss.segments;
        find_free_cell(&mut self.rng, &self.grid, |c| {
            snake.contains(&c) || boss.contains(&c)
        })
    }

    pub(super) fn respawn_food(&mut self) {
        self.food = self.spawn_food();
    }

    /// Roll for a new item; only when none is on the board
    pub(super) fn maybe_spawn_power_up(&mut self, now: f64) {
        if self.power_up_item.is_some() {
            return;
        }
        if self.rng.random::<f64>() >= self.tuning.power_up_spawn_chance {
            return;
        }

        let kind = PowerUpKind::ALL[self.rng.random_range(0..PowerUpKind::ALL.len())];
        let snake = &self.snake;
        let boss = &self.boss.segments;
        let food = self.food;
        let position = find_free_cell(&mut self.rng, &self.grid, |c| {
            c == food || snake.contains(&c) || boss.contains(&c)
        });

        log::debug!("Power-up {} spawned at {:?}", kind.as_str(), position);
        self.power_up_item = Some(PowerUpItem {
            position,
            kind,
            spawn_time: now,
        });
        self.push_event(GameEvent::PowerUpSpawned { kind, at: position });
    }

    /// Remove an item left uncollected for too long
    pub(super) fn despawn_stale_power_up(&mut self, now: f64) {
        let Some(item) = self.power_up_item else {
            return;
        };
        if now - item.spawn_time >= self.tuning.power_up_despawn_ms {
            log::debug!("Power-up {} despawned", item.kind.as_str());
            self.power_up_item = None;
            self.push_event(GameEvent::PowerUpDespawned { kind: item.kind });
        }
    }

    /// Pick up the item if the head is on it
    pub(super) fn collect_power_up_item(&mut self, head: Cell, now: f64) -> bool {
        let Some(item) = self.power_up_item else {
            return false;
        };
        if item.position != head {
            return false;
        }

        self.power_up_item = None;
        self.award_points(self.tuning.points_per_power_up, now);
        self.push_event(GameEvent::PowerUpCollected { kind: item.kind });
        self.activate_power_up(item.kind, now);
        true
    }
}
