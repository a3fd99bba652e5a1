//! Cooperative poll with backoff
//!
//! Advanced by the caller's frame time instead of blocking: each `poll`
//! call consumes `dt`, runs the check only when its interval is due, and
//! widens the interval after every miss.

use serde::{Deserialize, Serialize};

/// Settle polling parameters (milliseconds on the wire)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlePollConfig {
    pub initial_interval_ms: u64,
    pub max_interval_ms: u64,
    /// Interval multiplier after each negative check
    pub backoff: f32,
    /// Give up waiting after this long
    pub timeout_ms: u64,
}

impl Default for SettlePollConfig {
    fn default() -> Self {
        Self {
            initial_interval_ms: 50,
            max_interval_ms: 400,
            backoff: 1.5,
            timeout_ms: 15_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStatus {
    Pending,
    Ready,
    TimedOut,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettlePoll {
    config: SettlePollConfig,
    /// Seconds until the next check
    until_next: f32,
    /// Current interval in seconds
    interval: f32,
    elapsed: f32,
    checks: u32,
}

impl SettlePoll {
    pub fn new(config: SettlePollConfig) -> Self {
        let interval = config.initial_interval_ms as f32 / 1000.0;
        Self {
            config,
            until_next: interval,
            interval,
            elapsed: 0.0,
            checks: 0,
        }
    }

    /// Seconds spent waiting so far
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn checks(&self) -> u32 {
        self.checks
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Advance by `dt` seconds, running `check` if it is due
    pub fn poll(&mut self, dt: f32, check: impl FnOnce() -> bool) -> PollStatus {
        self.elapsed += dt.max(0.0);
        self.until_next -= dt.max(0.0);
        let timed_out = self.elapsed * 1000.0 >= self.config.timeout_ms as f32;

        if self.until_next > 0.0 && !timed_out {
            return PollStatus::Pending;
        }

        self.checks += 1;
        if check() {
            return PollStatus::Ready;
        }
        if timed_out {
            return PollStatus::TimedOut;
        }

        let max = self.config.max_interval_ms as f32 / 1000.0;
        self.interval = (self.interval * self.config.backoff.max(1.0)).min(max.max(self.interval));
        self.until_next = self.interval;
        PollStatus::Pending
    }
}
