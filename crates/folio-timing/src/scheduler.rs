//! Cancellable timer batches.
//!
//! Cues are stored as values rather than closures. The owner pulls them with
//! [`TimerScheduler::pop_due`] and dispatches them itself, which lets a cue
//! handler schedule new batches or cancel pending ones while the scheduler is
//! not borrowed.

use std::collections::BTreeMap;
use std::time::Duration;

use folio_core::time::SessionTime;
use tracing::trace;

/// Cancellation handle shared by every cue of one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BatchHandle(u64);

impl BatchHandle {
    /// Returns the raw batch number, for logging.
    #[must_use]
    pub fn id(self) -> u64 {
        self.0
    }
}

/// A cue handed out by [`TimerScheduler::pop_due`].
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<T> {
    /// The batch the cue was scheduled in.
    pub batch: BatchHandle,
    /// The session time the cue was due at.
    pub due: SessionTime,
    /// The cue payload.
    pub cue: T,
}

#[derive(Debug)]
struct Entry<T> {
    batch: BatchHandle,
    cue: T,
}

/// Schedules batches of delayed cues.
///
/// Guarantees:
/// - a cue is handed out at most once;
/// - cues are handed out in due order, ties in scheduling order;
/// - once [`cancel`](Self::cancel) returns, no remaining cue of that batch is
///   handed out.
#[derive(Debug)]
pub struct TimerScheduler<T> {
    /// Pending cues keyed by `(due, insertion sequence)`.
    queue: BTreeMap<(SessionTime, u64), Entry<T>>,
    next_seq: u64,
    next_batch: u64,
}

impl<T> Default for TimerScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerScheduler<T> {
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            queue: BTreeMap::new(),
            next_seq: 0,
            next_batch: 0,
        }
    }

    /// Schedules each `(delay, cue)` entry relative to `now` and returns one
    /// handle that cancels all of them together.
    pub fn schedule_batch<I>(&mut self, now: SessionTime, entries: I) -> BatchHandle
    where
        I: IntoIterator<Item = (Duration, T)>,
    {
        self.next_batch += 1;
        let batch = BatchHandle(self.next_batch);
        let mut count = 0_usize;
        for (delay, cue) in entries {
            self.next_seq += 1;
            self.queue
                .insert((now + delay, self.next_seq), Entry { batch, cue });
            count += 1;
        }
        trace!(batch = batch.0, count, %now, "scheduled timer batch");
        batch
    }

    /// Cancels every cue of `handle` that has not been handed out yet.
    /// Returns how many were removed; cancelling a spent batch is a no-op.
    pub fn cancel(&mut self, handle: BatchHandle) -> usize {
        let before = self.queue.len();
        self.queue.retain(|_, entry| entry.batch != handle);
        let removed = before - self.queue.len();
        trace!(batch = handle.0, removed, "cancelled timer batch");
        removed
    }

    /// Cancels every pending cue of every batch.
    pub fn cancel_all(&mut self) -> usize {
        let removed = self.queue.len();
        self.queue.clear();
        removed
    }

    /// Hands out the earliest cue due at or before `now`, if any.
    pub fn pop_due(&mut self, now: SessionTime) -> Option<Fired<T>> {
        let entry = self.queue.first_entry()?;
        if entry.key().0 > now {
            return None;
        }
        let ((due, _), Entry { batch, cue }) = entry.remove_entry();
        Some(Fired { batch, due, cue })
    }

    /// Returns the due time of the earliest pending cue.
    #[must_use]
    pub fn next_due(&self) -> Option<SessionTime> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    /// Returns whether any cue of `handle` is still pending.
    #[must_use]
    pub fn is_pending(&self, handle: BatchHandle) -> bool {
        self.queue.values().any(|entry| entry.batch == handle)
    }

    /// Returns the number of pending cues across all batches.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}
