use std::time::{Duration, Instant};

/// Cadence of the countdown tick
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A repeating, fixed-cadence schedule.
///
/// Deadlines are anchored to the instant the schedule was created, so a late
/// poll never shifts later fires. Dropping the value cancels it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatingTick {
    period: Duration,
    next_due: Instant,
}

impl RepeatingTick {
    pub fn new(started_at: Instant, period: Duration) -> Self {
        Self {
            period,
            next_due: started_at + period,
        }
    }

    pub fn every_second(started_at: Instant) -> Self {
        Self::new(started_at, TICK_PERIOD)
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Returns true and moves to the following deadline if a fire is due at `now`.
    /// Call repeatedly to drain every fire that has come due.
    pub fn take_due(&mut self, now: Instant) -> bool {
        if now >= self.next_due {
            self.next_due += self.period;
            true
        } else {
            false
        }
    }
}
