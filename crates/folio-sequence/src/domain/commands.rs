//! User commands for the presentation sequence.

use folio_core::command::Command;
use uuid::Uuid;

/// Command issued when the user presses "Enter" on the landing screen.
#[derive(Debug, Clone, PartialEq)]
pub struct StartPresentation {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for StartPresentation {
    const COMMAND_TYPE: &'static str = "presentation.start";

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command issued by the "Open Portfolio" button.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenPortfolio {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for OpenPortfolio {
    const COMMAND_TYPE: &'static str = "presentation.open_portfolio";

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command issued by the overlay's "Close" button.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosePortfolio {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for ClosePortfolio {
    const COMMAND_TYPE: &'static str = "presentation.close_portfolio";

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command issued by a section navigation button.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectSection {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Label, identifier, or slug of the requested section.
    pub section: String,
}

impl Command for SelectSection {
    const COMMAND_TYPE: &'static str = "presentation.select_section";

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Any user command, for drivers that receive actions over one channel.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// Enter from the landing screen.
    Start(StartPresentation),
    /// Open the overlay.
    Open(OpenPortfolio),
    /// Close the overlay.
    Close(ClosePortfolio),
    /// Switch section.
    Select(SelectSection),
}

impl UserCommand {
    /// Builds a start command with a fresh correlation ID.
    #[must_use]
    pub fn start() -> Self {
        Self::Start(StartPresentation {
            correlation_id: Uuid::new_v4(),
        })
    }

    /// Builds an open command with a fresh correlation ID.
    #[must_use]
    pub fn open() -> Self {
        Self::Open(OpenPortfolio {
            correlation_id: Uuid::new_v4(),
        })
    }

    /// Builds a close command with a fresh correlation ID.
    #[must_use]
    pub fn close() -> Self {
        Self::Close(ClosePortfolio {
            correlation_id: Uuid::new_v4(),
        })
    }

    /// Builds a section command with a fresh correlation ID.
    #[must_use]
    pub fn select(section: impl Into<String>) -> Self {
        Self::Select(SelectSection {
            correlation_id: Uuid::new_v4(),
            section: section.into(),
        })
    }
}
