//! Single-fire completion latch.

/// Reports completion at most once.
///
/// A latch starts armed. The first [`fire`](Self::fire) on an armed latch
/// returns `true`; every later call returns `false`. A disarmed latch never
/// fires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompletionLatch {
    /// Waiting for completion.
    #[default]
    Armed,
    /// Completion has been reported.
    Fired,
    /// Cancelled before completion.
    Disarmed,
}

impl CompletionLatch {
    /// Attempts to fire. Returns `true` only for the first call on an armed
    /// latch.
    pub fn fire(&mut self) -> bool {
        if *self == Self::Armed {
            *self = Self::Fired;
            true
        } else {
            false
        }
    }

    /// Suppresses any future completion. Has no effect once fired.
    pub fn disarm(&mut self) {
        if *self == Self::Armed {
            *self = Self::Disarmed;
        }
    }

    /// Returns whether completion has been reported.
    #[must_use]
    pub fn has_fired(self) -> bool {
        self == Self::Fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_exactly_once() {
        let mut latch = CompletionLatch::default();
        assert!(latch.fire());
        assert!(!latch.fire());
        assert!(latch.has_fired());
    }

    #[test]
    fn test_disarmed_latch_never_fires() {
        let mut latch = CompletionLatch::default();
        latch.disarm();
        assert!(!latch.fire());
        assert!(!latch.has_fired());
    }

    #[test]
    fn test_disarm_after_firing_keeps_fired_state() {
        let mut latch = CompletionLatch::default();
        latch.fire();
        latch.disarm();
        assert_eq!(latch, CompletionLatch::Fired);
    }
}
