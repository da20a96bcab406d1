//! Close-call telemetry
//!
//! Debounced near-miss detection. Feeds commentary only; never touches
//! collision or death.

use serde::{Deserialize, Serialize};

use super::grid::{Cell, manhattan};
use super::state::{GameEvent, GameState};

/// Head plus two neck segments are too close to ever count
const IGNORED_LEADING_SEGMENTS: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CloseCallDetector {
    /// Close calls reported this session
    pub count: u32,
    /// Time of the last reported close call
    pub last_reported: Option<f64>,
}

impl CloseCallDetector {
    /// Record a near miss unless one was reported within `debounce_ms`
    pub fn report(&mut self, now: f64, debounce_ms: f64) -> bool {
        if self.last_reported.is_some_and(|t| now - t < debounce_ms) {
            return false;
        }
        self.count += 1;
        self.last_reported = Some(now);
        true
    }
}

impl GameState {
    /// Whether `head` is a near miss: within the buffer of a wall, or of a
    /// body segment past the neck
    pub fn is_near_miss(&self, head: Cell) -> bool {
        let buffer = self.tuning.close_call_buffer;
        if self.grid.wall_gap(head) < buffer {
            return true;
        }
        self.snake
            .iter()
            .skip(IGNORED_LEADING_SEGMENTS)
            .any(|&segment| manhattan(head, segment) <= buffer)
    }

    /// Debounced near-miss check; true when a new close call is reported
    pub fn check_close_call(&mut self, head: Cell, now: f64) -> bool {
        if !self.is_near_miss(head) {
            return false;
        }
        if !self
            .close_calls
            .report(now, self.tuning.close_call_debounce_ms)
        {
            return false;
        }

        let count = self.close_calls.count;
        log::debug!("Close call #{} at {:?}", count, head);
        self.push_event(GameEvent::CloseCall { count });
        true
    }
}
