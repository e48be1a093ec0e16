//! Command abstractions.

use uuid::Uuid;

/// A user-issued command.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Stable identifier used in logs, e.g. `presentation.start`.
    const COMMAND_TYPE: &'static str;

    /// Correlation ID carried by every event the command causes.
    fn correlation_id(&self) -> Uuid;

    /// Returns [`Self::COMMAND_TYPE`].
    fn command_type(&self) -> &'static str {
        Self::COMMAND_TYPE
    }
}
