//! One-shot eased interpolation of a scalar.

use std::time::Duration;

use folio_core::time::SessionTime;

use crate::easing::Easing;

/// Interpolates from `from` to `to` over `duration`, starting at `start`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    start: SessionTime,
    duration: Duration,
    easing: Easing,
}

impl Tween {
    /// Creates a tween.
    #[must_use]
    pub fn new(from: f64, to: f64, start: SessionTime, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            easing,
        }
    }

    /// Returns linear progress in `[0, 1]`. A zero-length tween is finished
    /// immediately.
    #[must_use]
    pub fn progress(&self, now: SessionTime) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_since(self.start);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Returns whether the tween has reached its target at `now`.
    #[must_use]
    pub fn is_finished(&self, now: SessionTime) -> bool {
        now.saturating_since(self.start) >= self.duration
    }

    /// Samples the value at `now`. Once finished, the target is returned
    /// exactly, without floating-point drift.
    #[must_use]
    pub fn sample(&self, now: SessionTime) -> f64 {
        if self.is_finished(now) {
            return self.to;
        }
        let eased = self.easing.apply(self.progress(now));
        self.from + (self.to - self.from) * eased
    }

    /// Returns the target value.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.to
    }
}
