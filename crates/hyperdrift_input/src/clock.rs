//! Monotonic time source
//!
//! Debounce timing goes through an injected clock rather than reading the
//! wall clock inline, so discrete stepping is deterministic under test.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// A monotonic clock abstraction
pub trait Clock {
    /// Time elapsed since some fixed origin
    fn now(&self) -> Duration;
}

/// Real clock backed by [`Instant`]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Manually advanced clock for deterministic tests and headless runs
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self { now: Cell::new(Duration::ZERO) }
    }

    /// Advance the clock by the given amount
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}
