//! Power-up effect engine
//!
//! At most one timed effect is active. SPEED_BOOST and SLOW_MOTION pin the
//! movement interval while they last; when a speed effect ends, the interval
//! is re-derived from score instead of restored.

use super::state::{ActivePowerUp, GameEvent, GameState, PowerUpKind};
use crate::speed_for_score;

impl GameState {
    /// Apply `kind` for the configured duration, replacing any active effect
    pub fn activate_power_up(&mut self, kind: PowerUpKind, now: f64) {
        if let Some(previous) = self.active_power_up.take() {
            if previous.kind.overrides_speed() && !kind.overrides_speed() {
                self.rederive_speed();
            }
        }

        self.active_power_up = Some(ActivePowerUp {
            kind,
            expiry_time: now + self.tuning.power_up_duration_ms,
        });
        match kind {
            PowerUpKind::SpeedBoost => self.game_speed = self.tuning.speed_boost_ms,
            PowerUpKind::SlowMotion => self.game_speed = self.tuning.slow_motion_ms,
            PowerUpKind::GhostMode | PowerUpKind::Magnet => {}
        }

        log::debug!(
            "Power-up {} active until {:.0} ms",
            kind.as_str(),
            now + self.tuning.power_up_duration_ms
        );
        self.push_event(GameEvent::PowerUpActivated { kind });
    }

    /// Clear the active effect
    pub fn deactivate_power_up(&mut self) {
        let Some(active) = self.active_power_up.take() else {
            return;
        };
        if active.kind.overrides_speed() {
            self.rederive_speed();
        }
        log::debug!(
            "Power-up {} expired (speed {} ms)",
            active.kind.as_str(),
            self.game_speed
        );
        self.push_event(GameEvent::PowerUpExpired { kind: active.kind });
    }

    /// Deactivate once `now` is strictly past the expiry time
    pub(super) fn expire_power_up(&mut self, now: f64) {
        if self.active_power_up.is_some_and(|a| now > a.expiry_time) {
            self.deactivate_power_up();
        }
    }

    /// Movement interval as a function of the current score
    pub fn rederive_speed(&mut self) {
        self.game_speed = speed_for_score(
            self.score,
            self.tuning.initial_speed_ms,
            self.tuning.min_speed_ms,
            self.tuning.score_per_speed_step,
        );
    }

    /// Food ramp: one step faster per food unless a speed effect pins it
    pub(super) fn ramp_speed_after_food(&mut self) {
        if self.active_power_up.is_some_and(|a| a.kind.overrides_speed()) {
            return;
        }
        self.game_speed = self
            .game_speed
            .saturating_sub(self.tuning.speed_step_per_food_ms)
            .max(self.tuning.min_speed_ms);
    }
}
