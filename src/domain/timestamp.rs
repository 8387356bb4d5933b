//! Wall-clock seconds used for deadlines.

use core::fmt;

/// Seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Creates a timestamp.
    #[must_use]
    pub const fn new(seconds: u64) -> Self {
        Self(seconds)
    }

    /// Seconds since the epoch.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// `true` while `self` is strictly before `deadline`.
    ///
    /// A deadline equal to the current time has already expired.
    #[must_use]
    pub const fn is_before(&self, deadline: Timestamp) -> bool {
        self.0 < deadline.0
    }

    /// `self + seconds`, saturating at `u64::MAX`.
    #[must_use]
    pub const fn plus(&self, seconds: u64) -> Self {
        Self(self.0.saturating_add(seconds))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
