//! Aggregate root abstraction.

use uuid::Uuid;

use crate::event::DomainEvent;

/// An in-memory aggregate that journals every applied state change.
///
/// Command methods record events; `apply` is the only place state changes.
/// The owner drains the journal after each input and hands the events to
/// collaborators.
pub trait AggregateRoot: Send + Sync {
    /// The event type this aggregate produces and consumes.
    type Event: DomainEvent;

    /// Returns the aggregate identifier.
    fn aggregate_id(&self) -> Uuid;

    /// Returns the number of events applied so far.
    fn version(&self) -> i64;

    /// Returns the sequence number the next recorded event receives.
    fn next_sequence_number(&self) -> i64 {
        self.version() + 1
    }

    /// Mutates state according to `event`. Never fails and never schedules
    /// side effects.
    fn apply(&mut self, event: &Self::Event);

    /// Returns events recorded since the last drain.
    fn uncommitted_events(&self) -> &[Self::Event];

    /// Drains the events recorded since the last drain.
    fn take_uncommitted_events(&mut self) -> Vec<Self::Event>;
}
