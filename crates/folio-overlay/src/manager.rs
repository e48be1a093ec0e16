//! Overlay visibility and section state.

use folio_core::error::DomainError;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::section::SectionId;

/// Snapshot of the overlay for the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayState {
    /// Whether the overlay is shown.
    pub open: bool,
    /// The section whose content is displayed.
    pub active_section: SectionId,
}

/// Gates the portfolio overlay.
///
/// Every operation is synchronous and only touches [`OverlayState`].
/// `open` and `close` return whether they changed anything, so callers can
/// journal real changes and skip redundant ones.
#[derive(Debug, Default)]
pub struct OverlayVisibilityManager {
    state: OverlayState,
}

impl OverlayVisibilityManager {
    /// Creates a closed overlay showing the first section.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the overlay. Returns `false` if it was already open.
    pub fn open(&mut self) -> bool {
        if self.state.open {
            return false;
        }
        self.state.open = true;
        debug!(section = %self.state.active_section, "overlay opened");
        true
    }

    /// Hides the overlay. Returns `false` if it was already closed. The
    /// active section is kept for the next open.
    pub fn close(&mut self) -> bool {
        if !self.state.open {
            return false;
        }
        self.state.open = false;
        debug!("overlay closed");
        true
    }

    /// Makes the section named `id` active.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSection` if `id` names no section; the
    /// active section is left unchanged.
    pub fn select_section(&mut self, id: &str) -> Result<SectionId, DomainError> {
        let section: SectionId = id.parse()?;
        self.select(section);
        Ok(section)
    }

    /// Makes `section` active.
    pub fn select(&mut self, section: SectionId) {
        self.state.active_section = section;
    }

    /// Returns whether the overlay is shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.open
    }

    /// Returns the active section.
    #[must_use]
    pub fn current_section(&self) -> SectionId {
        self.state.active_section
    }

    /// Returns a copy of the overlay state.
    #[must_use]
    pub fn state(&self) -> OverlayState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_overlay_is_closed_on_first_section() {
        let overlay = OverlayVisibilityManager::new();
        assert!(!overlay.is_open());
        assert_eq!(overlay.current_section(), SectionId::About);
    }

    #[test]
    fn test_open_and_close_are_idempotent() {
        // Arrange
        let mut overlay = OverlayVisibilityManager::new();

        // Act / Assert
        assert!(overlay.open());
        assert!(!overlay.open());
        assert!(overlay.is_open());
        assert!(overlay.close());
        assert!(!overlay.close());
        assert!(!overlay.is_open());
    }

    #[test]
    fn test_select_section_by_label() {
        let mut overlay = OverlayVisibilityManager::new();

        let selected = overlay.select_section("Achievements").unwrap();

        assert_eq!(selected, SectionId::Achievements);
        assert_eq!(overlay.current_section(), SectionId::Achievements);
    }

    #[test]
    fn test_invalid_section_leaves_active_section_unchanged() {
        // Arrange
        let mut overlay = OverlayVisibilityManager::new();
        overlay.select(SectionId::Projects);

        // Act
        let result = overlay.select_section("Nonexistent");

        // Assert
        assert!(matches!(result, Err(DomainError::InvalidSection(_))));
        assert_eq!(overlay.current_section(), SectionId::Projects);
    }

    #[test]
    fn test_active_section_survives_close_and_reopen() {
        // Arrange
        let mut overlay = OverlayVisibilityManager::new();
        overlay.open();
        overlay.select(SectionId::Contact);

        // Act
        overlay.close();
        overlay.open();

        // Assert
        assert_eq!(overlay.current_section(), SectionId::Contact);
    }

    #[test]
    fn test_state_serializes_for_the_renderer() {
        let mut overlay = OverlayVisibilityManager::new();
        overlay.open();
        overlay.select(SectionId::TechStack);

        let json = serde_json::to_value(overlay.state()).unwrap();

        assert_eq!(json["open"], true);
        assert_eq!(json["active_section"], "tech_stack");
    }
}
