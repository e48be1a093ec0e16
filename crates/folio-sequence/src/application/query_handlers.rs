//! Query handlers for the presentation sequence.
//!
//! Builds the read-only view a renderer needs to draw one frame.

use folio_animation::{INITIAL_CAMERA_Z, PANEL_START_OFFSET_Y};
use folio_core::time::SessionTime;
use folio_overlay::OverlayState;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::aggregates::SequenceController;
use crate::domain::phase::{Phase, ZoomState};

/// Read-only view of a presentation session.
#[derive(Debug, Clone, Serialize)]
pub struct PresentationView {
    /// The session identifier.
    pub session_id: Uuid,
    /// Latest session time observed.
    pub session_time: SessionTime,
    /// Current phase.
    pub phase: Phase,
    /// Intro caption ordinal: 0 (blank), 1, or 2.
    pub intro_step: u8,
    /// Caption text on screen, if any.
    pub caption: Option<&'static str>,
    /// Whether the intro overlay is mounted.
    pub intro_visible: bool,
    /// Whether the 3D scene is mounted.
    pub scene_visible: bool,
    /// Zoom progress.
    pub zoom: ZoomState,
    /// Overlay visibility and active section.
    pub overlay: OverlayState,
    /// Whether the "Open Portfolio" button is shown.
    pub open_button_visible: bool,
    /// Model rotation from the latest frame.
    pub rotation_y: f64,
    /// Camera depth from the latest frame.
    pub camera_z: f64,
    /// Panel offset from the latest frame.
    pub panel_offset_y: f64,
    /// Panel opacity from the latest frame.
    pub panel_opacity: f64,
    /// Whether the session has been torn down.
    pub torn_down: bool,
    /// Current version (event count).
    pub version: i64,
}

/// Builds the current view of `controller`. Before the first frame the
/// animated values report their resting state.
#[must_use]
pub fn get_presentation_view(controller: &SequenceController) -> PresentationView {
    let (rotation_y, camera_z, panel_offset_y, panel_opacity) = match controller.last_frame() {
        Some(frame) => (
            frame.rotation_y,
            frame.camera_z,
            frame.panel_offset_y,
            frame.panel_opacity,
        ),
        None => (0.0, INITIAL_CAMERA_Z, PANEL_START_OFFSET_Y, 0.0),
    };
    let step = controller.intro_step();

    PresentationView {
        session_id: controller.id,
        session_time: controller.now(),
        phase: controller.phase(),
        intro_step: step.ordinal(),
        caption: step.caption(),
        intro_visible: controller.intro_visible(),
        scene_visible: controller.scene_visible(),
        zoom: controller.zoom_state(),
        overlay: controller.overlay(),
        open_button_visible: controller.open_button_visible(),
        rotation_y,
        camera_z,
        panel_offset_y,
        panel_opacity,
        torn_down: controller.is_torn_down(),
        version: controller.version,
    }
}
