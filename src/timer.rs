//! Cancelable timers driven by simulated time.
//!
//! Nothing here reads a clock. The runtime (or a test) feeds elapsed time in,
//! which keeps every transition deterministic.

use std::time::Duration;

const SECOND: Duration = Duration::from_secs(1);

/// Outcome of a countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStatus {
    Idle,
    Running(u32),
    /// Reached zero on this tick
    Expired,
}

/// One-second countdown, e.g. the 120 s drill timer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Countdown {
    remaining_secs: u32,
    running: bool,
    carry: Duration,
}

impl Countdown {
    pub fn start(&mut self, secs: u32) {
        self.remaining_secs = secs;
        self.running = secs > 0;
        self.carry = Duration::ZERO;
    }

    pub fn cancel(&mut self) {
        self.running = false;
        self.carry = Duration::ZERO;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Advance by exactly one second
    pub fn tick(&mut self) -> CountdownStatus {
        if !self.running {
            return CountdownStatus::Idle;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.running = false;
            self.carry = Duration::ZERO;
            CountdownStatus::Expired
        } else {
            CountdownStatus::Running(self.remaining_secs)
        }
    }

    /// Accumulate `elapsed` and return how many whole seconds are now due
    pub fn due_seconds(&mut self, elapsed: Duration) -> u32 {
        if !self.running {
            return 0;
        }
        self.carry += elapsed;
        let mut due = 0;
        while self.carry >= SECOND {
            self.carry -= SECOND;
            due += 1;
        }
        due
    }
}

/// One-shot delayed action, e.g. the auto-advance after a timed answer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deferred {
    remaining: Option<Duration>,
}

impl Deferred {
    pub fn schedule(&mut self, delay: Duration) {
        self.remaining = Some(delay);
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_pending(&self) -> bool {
        self.remaining.is_some()
    }

    /// Returns true exactly once, when the delay has fully elapsed
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        match self.remaining {
            Some(left) if elapsed >= left => {
                self.remaining = None;
                true
            }
            Some(left) => {
                self.remaining = Some(left - elapsed);
                false
            }
            None => false,
        }
    }
}
