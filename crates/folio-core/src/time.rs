//! Time abstractions.
//!
//! Two notions of time live here. [`Clock`] supplies wall-clock timestamps
//! for journaled events. [`SessionTime`] is the monotonic offset from the
//! start of a presentation session; every timer and tween is keyed to it, so
//! tests can drive a whole session in virtual time.

use std::fmt;
use std::ops::{Add, Sub};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Abstraction over system time for deterministic event timestamps.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock that delegates to the system clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Monotonic offset from the session origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionTime(Duration);

impl SessionTime {
    /// The session origin.
    pub const ZERO: Self = Self(Duration::ZERO);

    /// Creates a session time from an offset.
    #[must_use]
    pub const fn new(offset: Duration) -> Self {
        Self(offset)
    }

    /// Creates a session time from whole milliseconds.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    /// Returns the offset from the session origin.
    #[must_use]
    pub const fn offset(self) -> Duration {
        self.0
    }

    /// Returns the time elapsed since `earlier`, or zero if `earlier` is in
    /// the future.
    #[must_use]
    pub fn saturating_since(self, earlier: Self) -> Duration {
        self.0.saturating_sub(earlier.0)
    }
}

impl Add<Duration> for SessionTime {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self {
        Self(self.0.saturating_add(rhs))
    }
}

impl Sub for SessionTime {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Duration {
        self.saturating_since(rhs)
    }
}

impl fmt::Display for SessionTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0.as_millis())
    }
}
