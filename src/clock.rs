//! Fixed-timestep frame clock

use std::time::{Duration, Instant};

/// Turns wall-clock time into a whole number of simulation ticks.
#[derive(Debug, Clone)]
pub struct FrameClock {
    step: Duration,
    max_catch_up: u32,
    last: Instant,
    accumulator: Duration,
}

impl FrameClock {
    pub fn new(ticks_per_second: u32, max_catch_up: u32, now: Instant) -> Self {
        Self {
            step: Duration::from_secs(1) / ticks_per_second.max(1),
            max_catch_up: max_catch_up.max(1),
            last: now,
            accumulator: Duration::ZERO,
        }
    }

    #[cfg(test)]
    fn step(&self) -> Duration {
        self.step
    }

    /// Number of ticks due at `now`. Backlog past `max_catch_up` is dropped.
    pub fn advance(&mut self, now: Instant) -> u32 {
        self.accumulator += now.saturating_duration_since(self.last);
        self.last = now;

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_catch_up {
            self.accumulator -= self.step;
            ticks += 1;
        }
        if ticks == self.max_catch_up && self.accumulator >= self.step {
            log::trace!("frame clock dropped {:?} of backlog", self.accumulator);
            self.accumulator = Duration::ZERO;
        }
        ticks
    }

    /// How long to sleep from `now` until the next tick is due.
    pub fn until_next(&self, now: Instant) -> Duration {
        let pending = self.accumulator + now.saturating_duration_since(self.last);
        self.step.saturating_sub(pending)
    }
}
