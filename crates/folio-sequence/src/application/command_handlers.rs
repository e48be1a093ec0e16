//! Command handlers for the presentation sequence.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: apply the command to the live controller, then
//! drain the resulting events into journal entries.

use chrono::{DateTime, Utc};
use folio_core::aggregate::AggregateRoot;
use folio_core::command::Command;
use folio_core::error::DomainError;
use folio_core::event::DomainEvent;
use folio_core::time::SessionTime;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::domain::aggregates::SequenceController;
use crate::domain::commands::{
    ClosePortfolio, OpenPortfolio, SelectSection, StartPresentation, UserCommand,
};
use crate::domain::events::PresentationEvent;

/// A journaled event in its serialized form.
#[derive(Debug, Clone, Serialize)]
pub struct JournalEntry {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// The session the event belongs to.
    pub aggregate_id: Uuid,
    /// Event type identifier.
    pub event_type: String,
    /// Serialized event payload.
    pub payload: serde_json::Value,
    /// Position in the session's event stream.
    pub sequence_number: i64,
    /// Correlation identifier.
    pub correlation_id: Uuid,
    /// Causation identifier.
    pub causation_id: Uuid,
    /// Session time at which the change took effect.
    pub session_time: SessionTime,
    /// Wall-clock time the event was recorded.
    pub occurred_at: DateTime<Utc>,
}

/// Result of a handled command.
#[derive(Debug)]
pub struct PresentationCommandResult {
    /// The session the command was applied to.
    pub session_id: Uuid,
    /// Whether the command changed anything.
    pub applied: bool,
    /// Events drained from the controller, including any timer-driven events
    /// recorded since the previous drain.
    pub journal: Vec<JournalEntry>,
}

fn to_journal_entry(event: &PresentationEvent) -> JournalEntry {
    let meta = event.metadata();
    JournalEntry {
        event_id: meta.event_id,
        aggregate_id: meta.aggregate_id,
        event_type: event.event_type().to_owned(),
        payload: event.to_payload(),
        sequence_number: meta.sequence_number,
        correlation_id: meta.correlation_id,
        causation_id: meta.causation_id,
        session_time: meta.session_time,
        occurred_at: meta.occurred_at,
    }
}

/// Drains the controller's uncommitted events into journal entries.
pub fn drain_journal(controller: &mut SequenceController) -> Vec<JournalEntry> {
    controller
        .take_uncommitted_events()
        .iter()
        .map(to_journal_entry)
        .collect()
}

fn finish(controller: &mut SequenceController, applied: bool) -> PresentationCommandResult {
    PresentationCommandResult {
        session_id: controller.id,
        applied,
        journal: drain_journal(controller),
    }
}

/// Handles the `StartPresentation` command: starts the intro and schedules
/// its cues.
pub fn handle_start_presentation(
    controller: &mut SequenceController,
    command: &StartPresentation,
    now: SessionTime,
) -> PresentationCommandResult {
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        "handling command"
    );
    let applied = controller.start(command.correlation_id, now);
    finish(controller, applied)
}

/// Handles the `OpenPortfolio` command.
pub fn handle_open_portfolio(
    controller: &mut SequenceController,
    command: &OpenPortfolio,
    now: SessionTime,
) -> PresentationCommandResult {
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        "handling command"
    );
    let applied = controller.open_overlay(command.correlation_id, now);
    finish(controller, applied)
}

/// Handles the `ClosePortfolio` command.
pub fn handle_close_portfolio(
    controller: &mut SequenceController,
    command: &ClosePortfolio,
    now: SessionTime,
) -> PresentationCommandResult {
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        "handling command"
    );
    let applied = controller.close_overlay(command.correlation_id, now);
    finish(controller, applied)
}

/// Handles the `SelectSection` command.
///
/// # Errors
///
/// Returns `DomainError::InvalidSection` if the command names no section.
pub fn handle_select_section(
    controller: &mut SequenceController,
    command: &SelectSection,
    now: SessionTime,
) -> Result<PresentationCommandResult, DomainError> {
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        section = %command.section,
        "handling command"
    );
    let before = controller.overlay().active_section;
    let selected = controller.select_section(&command.section, command.correlation_id, now)?;
    Ok(finish(controller, selected != before))
}

/// Dispatches any user command to its handler.
///
/// # Errors
///
/// Returns `DomainError::InvalidSection` if a section command names no
/// section.
pub fn handle_user_command(
    controller: &mut SequenceController,
    command: &UserCommand,
    now: SessionTime,
) -> Result<PresentationCommandResult, DomainError> {
    match command {
        UserCommand::Start(cmd) => Ok(handle_start_presentation(controller, cmd, now)),
        UserCommand::Open(cmd) => Ok(handle_open_portfolio(controller, cmd, now)),
        UserCommand::Close(cmd) => Ok(handle_close_portfolio(controller, cmd, now)),
        UserCommand::Select(cmd) => handle_select_section(controller, cmd, now),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{DateTime, TimeZone, Utc};
    use folio_core::error::DomainError;
    use folio_core::time::SessionTime;
    use uuid::Uuid;

    use crate::application::command_handlers::{
        drain_journal, handle_close_portfolio, handle_open_portfolio, handle_select_section,
        handle_start_presentation, handle_user_command,
    };
    use crate::domain::aggregates::SequenceController;
    use crate::domain::commands::{
        ClosePortfolio, OpenPortfolio, SelectSection, StartPresentation, UserCommand,
    };
    use crate::domain::config::PacingConfig;
    use folio_test_support::FixedClock;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
    }

    fn controller() -> SequenceController {
        SequenceController::new(
            Uuid::new_v4(),
            PacingConfig::default(),
            Arc::new(FixedClock(fixed_now())),
        )
        .unwrap()
    }

    fn portfolio_controller() -> SequenceController {
        let mut controller = controller();
        controller.start(Uuid::new_v4(), SessionTime::ZERO);
        controller.advance(SessionTime::from_millis(5700));
        controller.scene_mounted(SessionTime::from_millis(5700));
        controller.on_zoom_completed(SessionTime::from_millis(10_700));
        drain_journal(&mut controller);
        controller
    }

    #[test]
    fn test_handle_start_presentation_journals_sequence_started_event() {
        // Arrange
        let mut controller = controller();
        let correlation_id = Uuid::new_v4();
        let command = StartPresentation { correlation_id };

        // Act
        let result = handle_start_presentation(&mut controller, &command, SessionTime::ZERO);

        // Assert
        assert!(result.applied);
        assert_eq!(result.session_id, controller.id);
        assert_eq!(result.journal.len(), 1);

        let entry = &result.journal[0];
        assert_eq!(entry.event_type, "presentation.sequence_started");
        assert_eq!(entry.aggregate_id, controller.id);
        assert_eq!(entry.sequence_number, 1);
        assert_eq!(entry.correlation_id, correlation_id);
        assert_eq!(entry.causation_id, correlation_id);
        assert_eq!(entry.session_time, SessionTime::ZERO);
        assert_eq!(entry.occurred_at, fixed_now());
        assert_eq!(entry.payload["SequenceStarted"]["track"]["src"], "/music3.mp3");
    }

    #[test]
    fn test_handle_start_presentation_twice_is_not_applied() {
        // Arrange
        let mut controller = controller();
        let command = StartPresentation {
            correlation_id: Uuid::new_v4(),
        };
        handle_start_presentation(&mut controller, &command, SessionTime::ZERO);

        // Act
        let result = handle_start_presentation(&mut controller, &command, SessionTime::ZERO);

        // Assert
        assert!(!result.applied);
        assert!(result.journal.is_empty());
    }

    #[test]
    fn test_handle_close_then_open_portfolio() {
        // Arrange
        let mut controller = portfolio_controller();
        let close = ClosePortfolio {
            correlation_id: Uuid::new_v4(),
        };
        let open = OpenPortfolio {
            correlation_id: Uuid::new_v4(),
        };

        // Act
        let closed = handle_close_portfolio(&mut controller, &close, SessionTime::from_millis(11_000));
        let opened = handle_open_portfolio(&mut controller, &open, SessionTime::from_millis(12_000));

        // Assert
        assert!(closed.applied);
        assert_eq!(closed.journal[0].event_type, "presentation.overlay_closed");
        assert!(opened.applied);
        assert_eq!(opened.journal[0].event_type, "presentation.overlay_opened");
        assert_eq!(opened.journal[0].payload["OverlayOpened"]["trigger"], "user");
        assert_eq!(opened.journal[0].correlation_id, open.correlation_id);
    }

    #[test]
    fn test_handle_select_section_journals_previous_section() {
        // Arrange
        let mut controller = portfolio_controller();
        let command = SelectSection {
            correlation_id: Uuid::new_v4(),
            section: "Tech Stack".to_owned(),
        };

        // Act
        let result = handle_select_section(&mut controller, &command, SessionTime::from_millis(11_000));

        // Assert
        let result = result.unwrap();
        assert!(result.applied);
        let payload = &result.journal[0].payload["SectionSelected"];
        assert_eq!(payload["section"], "tech_stack");
        assert_eq!(payload["previous"], "about");
    }

    #[test]
    fn test_handle_select_section_returns_error_for_unknown_section() {
        // Arrange
        let mut controller = portfolio_controller();
        let command = SelectSection {
            correlation_id: Uuid::new_v4(),
            section: "Blog".to_owned(),
        };

        // Act
        let result = handle_select_section(&mut controller, &command, SessionTime::from_millis(11_000));

        // Assert
        assert!(result.is_err());
        match result.unwrap_err() {
            DomainError::InvalidSection(name) => assert_eq!(name, "Blog"),
            other => panic!("expected InvalidSection, got {other:?}"),
        }
    }

    #[test]
    fn test_handle_user_command_dispatches_open_before_intro_as_ignored() {
        // Arrange
        let mut controller = controller();
        handle_user_command(&mut controller, &UserCommand::start(), SessionTime::ZERO).unwrap();

        // Act
        let result =
            handle_user_command(&mut controller, &UserCommand::open(), SessionTime::from_millis(1000))
                .unwrap();

        // Assert
        assert!(!result.applied);
        assert!(!controller.overlay().open);
    }

    #[test]
    fn test_command_result_includes_timer_events_since_last_drain() {
        // Arrange
        let mut controller = controller();
        handle_user_command(&mut controller, &UserCommand::start(), SessionTime::ZERO).unwrap();
        controller.advance(SessionTime::from_millis(1100));

        // Act
        let result =
            handle_user_command(&mut controller, &UserCommand::close(), SessionTime::from_millis(1200))
                .unwrap();

        // Assert
        assert!(!result.applied);
        let types: Vec<&str> = result.journal.iter().map(|e| e.event_type.as_str()).collect();
        assert_eq!(
            types,
            vec!["presentation.intro_mounted", "presentation.intro_step_changed"]
        );
    }
}
