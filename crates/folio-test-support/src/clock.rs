//! Test clock: a deterministic `Clock` for event timestamps.

use chrono::{DateTime, Utc};
use folio_core::time::Clock;

/// A clock that always returns a fixed point in time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
