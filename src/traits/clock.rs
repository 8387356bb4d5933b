//! Time source for deadline checks.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::warn;

use crate::domain::Timestamp;

/// Supplies the current time.
pub trait Clock {
    /// Current time.
    fn now(&self) -> Timestamp;
}

/// Wall clock, in whole seconds since the Unix epoch.
///
/// A system clock set before the epoch reads as the latest representable
/// time, so every deadline counts as expired until the clock is fixed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        since_epoch(SystemTime::now())
    }
}

fn since_epoch(at: SystemTime) -> Timestamp {
    match at.duration_since(UNIX_EPOCH) {
        Ok(elapsed) => Timestamp::new(elapsed.as_secs()),
        Err(err) => {
            warn!(behind = ?err.duration(), "system clock is before the Unix epoch");
            Timestamp::new(u64::MAX)
        }
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedClock(Timestamp);

impl FixedClock {
    /// Creates a clock stopped at `now`.
    #[must_use]
    pub const fn new(now: Timestamp) -> Self {
        Self(now)
    }

    /// Moves the clock forward.
    pub fn advance(&mut self, seconds: u64) {
        self.0 = self.0.plus(seconds);
    }

    /// Sets the clock.
    pub fn set(&mut self, now: Timestamp) {
        self.0 = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}
