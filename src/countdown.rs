use std::time::Instant;

use tracing::{debug, info};

use crate::input::parse_duration;
use crate::schedule::RepeatingTick;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Paused,
}

/// Renders seconds as `MM:SS`. Minutes keep growing past an hour.
pub fn format_time(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// State of a single countdown: what was configured, what is left and
/// whether the once-per-second tick is live.
#[derive(Debug, Default)]
pub struct Countdown {
    configured: Option<u64>,
    remaining: u64,
    run_state: RunState,
    interval: Option<RepeatingTick>,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn configured(&self) -> Option<u64> {
        self.configured
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_ticking(&self) -> bool {
        self.interval.is_some()
    }

    /// Running but nothing left to count. The tick has stopped itself and
    /// the state is left as is.
    pub fn is_expired(&self) -> bool {
        self.run_state == RunState::Running && self.remaining == 0
    }

    /// When the next tick fires, if one is scheduled
    pub fn next_due(&self) -> Option<Instant> {
        self.interval.as_ref().map(RepeatingTick::next_due)
    }

    pub fn display(&self) -> String {
        format_time(self.remaining)
    }

    pub fn primary_label(&self) -> &'static str {
        match self.run_state {
            RunState::Paused => "Resume",
            _ => "Start",
        }
    }

    /// Field edit. Leaves the remaining time alone.
    pub fn set_duration(&mut self, text: &str) {
        self.set_configured(parse_duration(text));
    }

    pub fn set_configured(&mut self, configured: Option<u64>) {
        debug!(?configured, "duration edited");
        self.configured = configured;
    }

    /// "Set": load the configured duration and stop whatever was running
    pub fn confirm(&mut self) {
        self.cancel_tick();
        self.remaining = match self.configured {
            Some(secs) if secs > 0 => secs,
            _ => 0,
        };
        self.run_state = RunState::Idle;
        info!(remaining = self.remaining, "duration set");
    }

    pub fn start(&mut self, now: Instant) {
        if self.remaining == 0 {
            debug!(state = %self.run_state, "start ignored, nothing to count");
            return;
        }
        if self.run_state == RunState::Running {
            return;
        }

        let resumed = self.run_state == RunState::Paused;
        self.cancel_tick();
        self.interval = Some(RepeatingTick::every_second(now));
        self.run_state = RunState::Running;
        info!(remaining = self.remaining, resumed, "countdown running");
    }

    pub fn pause(&mut self) {
        if self.run_state != RunState::Running {
            return;
        }
        self.cancel_tick();
        self.run_state = RunState::Paused;
        info!(remaining = self.remaining, "countdown paused");
    }

    pub fn reset(&mut self) {
        self.cancel_tick();
        self.run_state = RunState::Idle;
        self.remaining = self.configured.unwrap_or(0);
        info!(remaining = self.remaining, "countdown reset");
    }

    /// One elapsed second. Normally driven by [`Countdown::advance`].
    pub fn tick(&mut self) {
        if self.remaining <= 1 {
            self.remaining = 0;
            self.cancel_tick();
            info!("countdown finished");
        } else {
            self.remaining -= 1;
        }
    }

    /// Fires every tick that has come due by `now`. Returns how many fired.
    pub fn advance(&mut self, now: Instant) -> u32 {
        let mut fired = 0;
        while let Some(interval) = self.interval.as_mut() {
            if !interval.take_due(now) {
                break;
            }
            self.tick();
            fired += 1;
        }
        fired
    }

    /// Cancels any live tick before the countdown goes away
    pub fn teardown(&mut self) {
        if self.interval.is_some() {
            debug!("cancelling tick on teardown");
        }
        self.cancel_tick();
    }

    fn cancel_tick(&mut self) {
        self.interval = None;
    }
}
