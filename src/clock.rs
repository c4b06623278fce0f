use std::time::{Duration, Instant};

use crate::config::{
    BASE_TICK_INTERVAL_MS, MIN_TICK_INTERVAL_MS, POINTS_PER_SPEED_STEP, SPEED_STEP_MS,
};

/// Poll-driven tick scheduler with a mutable interval.
///
/// Every operation takes the current instant from the caller instead of
/// reading wall time, so tests drive the clock with hand-picked instants.
/// Stopping disarms the deadline synchronously: once `stop` returns, no
/// further poll reports a due tick until the clock is started again.
#[derive(Debug, Clone)]
pub struct GameClock {
    interval: Duration,
    next_due: Option<Instant>,
    min_interval_seen: Duration,
}

impl GameClock {
    /// Creates a stopped clock at the base interval.
    #[must_use]
    pub fn new() -> Self {
        let interval = Duration::from_millis(BASE_TICK_INTERVAL_MS);
        Self {
            interval,
            next_due: None,
            min_interval_seen: interval,
        }
    }

    /// Returns the interval to base and clears the historical minimum.
    pub fn reset(&mut self) {
        let interval = Duration::from_millis(BASE_TICK_INTERVAL_MS);
        self.interval = interval;
        self.min_interval_seen = interval;
        self.next_due = None;
    }

    /// Arms the next deadline one full interval after `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    /// Disarms the deadline. Idempotent.
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// Returns true while a deadline is armed.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Reports whether a tick is due at `now`, re-arming one interval later.
    ///
    /// The next deadline is measured from `now`, not from the missed
    /// deadline: ticks lost to a stall or a pause are discarded, never
    /// replayed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    /// Changes the interval and reschedules any armed deadline from `now`.
    pub fn set_interval(&mut self, interval: Duration, now: Instant) {
        self.interval = interval;
        self.min_interval_seen = self.min_interval_seen.min(interval);
        if self.next_due.is_some() {
            self.next_due = Some(now + interval);
        }
    }

    /// Returns the current tick interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the lowest interval ever active since the last reset.
    #[must_use]
    pub fn min_interval_seen(&self) -> Duration {
        self.min_interval_seen
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns true when `score` lands on a speed-step boundary.
#[must_use]
pub fn is_speed_step(score: u32) -> bool {
    score > 0 && score % POINTS_PER_SPEED_STEP == 0
}

/// Returns the interval after one speed step, clamped to the floor.
#[must_use]
pub fn stepped_interval(current: Duration) -> Duration {
    let ms = current.as_millis() as u64;
    Duration::from_millis(ms.saturating_sub(SPEED_STEP_MS).max(MIN_TICK_INTERVAL_MS))
}

/// Human-friendly pace label derived from the tick interval.
#[must_use]
pub fn speed_label(interval: Duration) -> &'static str {
    let ms = interval.as_millis();
    if ms <= 80 {
        "Fast"
    } else if ms <= 110 {
        "Normal"
    } else {
        "Relaxed"
    }
}
