//! Folio: timer scheduling.
//!
//! Delayed cues grouped into batches that share one cancellation handle.
//! The scheduler is sans-IO: callers pass the current session time and pull
//! due cues one at a time.

pub mod scheduler;

pub use scheduler::{BatchHandle, Fired, TimerScheduler};
