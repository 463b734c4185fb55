use std::time::{Duration, Instant};

use crate::game::GameStatus;

/// Decides when the host loop should call `Engine::tick`.
///
/// Ticks are only issued while playing. The interval is re-read on every
/// poll, so a speed change applies to the very next tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickScheduler {
    last_tick: Option<Instant>,
}

impl TickScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when a tick is due at `now`.
    ///
    /// The first poll after entering [`GameStatus::Playing`] fires at once.
    pub fn poll(&mut self, now: Instant, status: GameStatus, speed_ms: u64) -> bool {
        if status != GameStatus::Playing {
            self.last_tick = None;
            return false;
        }

        let due = match self.last_tick {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= Duration::from_millis(speed_ms),
        };
        if due {
            self.last_tick = Some(now);
        }
        due
    }

    /// Time left until the next tick; zero when overdue, `None` while no
    /// tick has been issued since the game (re)entered play.
    #[must_use]
    pub fn time_until_next(&self, now: Instant, speed_ms: u64) -> Option<Duration> {
        let last = self.last_tick?;
        Some(Duration::from_millis(speed_ms).saturating_sub(now.saturating_duration_since(last)))
    }
}
