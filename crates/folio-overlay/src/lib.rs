//! Folio: portfolio overlay.
//!
//! Tracks whether the content overlay is shown and which section is active.
//! No timing lives here; the sequence controller decides when the overlay
//! first opens.

pub mod manager;
pub mod section;

pub use manager::{OverlayState, OverlayVisibilityManager};
pub use section::SectionId;
