//! Domain events for the presentation sequence.

use folio_core::collaborators::{AssetRef, TrackRef};
use folio_core::event::{DomainEvent, EventMetadata};
use folio_overlay::SectionId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::phase::{IntroStep, Phase};

/// Emitted when the user enters from the landing screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceStarted {
    /// The session identifier.
    pub session_id: Uuid,
    /// Background track to start playing.
    pub track: TrackRef,
}

/// Emitted when the intro overlay mounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntroMounted {
    /// The session identifier.
    pub session_id: Uuid,
}

/// Emitted when an intro caption appears.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntroStepChanged {
    /// The session identifier.
    pub session_id: Uuid,
    /// The caption now on screen.
    pub step: IntroStep,
}

/// Emitted when the captions clear and the intro starts fading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntroFadeBegan {
    /// The session identifier.
    pub session_id: Uuid,
}

/// Emitted when the intro ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntroFinished {
    /// The session identifier.
    pub session_id: Uuid,
}

/// Emitted when the renderer should mount the 3D scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneRequested {
    /// The session identifier.
    pub session_id: Uuid,
    /// Scene asset to load.
    pub asset: AssetRef,
}

/// Emitted when the scene has mounted and the camera zoom begins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoomStarted {
    /// The session identifier.
    pub session_id: Uuid,
    /// Camera depth at the start of the zoom.
    pub from_z: f64,
    /// Camera depth the zoom settles on.
    pub to_z: f64,
    /// Zoom duration in milliseconds.
    pub duration_ms: u64,
}

/// Emitted once when the camera zoom completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoomCompleted {
    /// The session identifier.
    pub session_id: Uuid,
    /// Final camera depth.
    pub camera_z: f64,
}

/// What caused the overlay to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenTrigger {
    /// Opened automatically when the zoom completed.
    ZoomCompleted,
    /// Opened by the user.
    User,
}

/// Emitted when the portfolio overlay is shown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayOpened {
    /// The session identifier.
    pub session_id: Uuid,
    /// The section shown.
    pub section: SectionId,
    /// What opened the overlay.
    pub trigger: OpenTrigger,
}

/// Emitted when the portfolio overlay is hidden.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayClosed {
    /// The session identifier.
    pub session_id: Uuid,
}

/// Emitted when the active section changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionSelected {
    /// The session identifier.
    pub session_id: Uuid,
    /// The newly active section.
    pub section: SectionId,
    /// The section that was active before.
    pub previous: SectionId,
}

/// Emitted when the session is torn down.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTornDown {
    /// The session identifier.
    pub session_id: Uuid,
    /// The phase the session was in.
    pub phase: Phase,
    /// Number of pending timer cues that were cancelled.
    pub cancelled_cues: usize,
}

/// Event type identifier for [`SequenceStarted`].
pub const SEQUENCE_STARTED_EVENT_TYPE: &str = "presentation.sequence_started";

/// Event type identifier for [`IntroMounted`].
pub const INTRO_MOUNTED_EVENT_TYPE: &str = "presentation.intro_mounted";

/// Event type identifier for [`IntroStepChanged`].
pub const INTRO_STEP_CHANGED_EVENT_TYPE: &str = "presentation.intro_step_changed";

/// Event type identifier for [`IntroFadeBegan`].
pub const INTRO_FADE_BEGAN_EVENT_TYPE: &str = "presentation.intro_fade_began";

/// Event type identifier for [`IntroFinished`].
pub const INTRO_FINISHED_EVENT_TYPE: &str = "presentation.intro_finished";

/// Event type identifier for [`SceneRequested`].
pub const SCENE_REQUESTED_EVENT_TYPE: &str = "presentation.scene_requested";

/// Event type identifier for [`ZoomStarted`].
pub const ZOOM_STARTED_EVENT_TYPE: &str = "presentation.zoom_started";

/// Event type identifier for [`ZoomCompleted`].
pub const ZOOM_COMPLETED_EVENT_TYPE: &str = "presentation.zoom_completed";

/// Event type identifier for [`OverlayOpened`].
pub const OVERLAY_OPENED_EVENT_TYPE: &str = "presentation.overlay_opened";

/// Event type identifier for [`OverlayClosed`].
pub const OVERLAY_CLOSED_EVENT_TYPE: &str = "presentation.overlay_closed";

/// Event type identifier for [`SectionSelected`].
pub const SECTION_SELECTED_EVENT_TYPE: &str = "presentation.section_selected";

/// Event type identifier for [`SessionTornDown`].
pub const SESSION_TORN_DOWN_EVENT_TYPE: &str = "presentation.session_torn_down";

/// Event payload variants for the presentation sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PresentationEventKind {
    /// The user entered.
    SequenceStarted(SequenceStarted),
    /// The intro overlay mounted.
    IntroMounted(IntroMounted),
    /// An intro caption appeared.
    IntroStepChanged(IntroStepChanged),
    /// Captions cleared.
    IntroFadeBegan(IntroFadeBegan),
    /// The intro ended.
    IntroFinished(IntroFinished),
    /// The scene should mount.
    SceneRequested(SceneRequested),
    /// The camera zoom began.
    ZoomStarted(ZoomStarted),
    /// The camera zoom completed.
    ZoomCompleted(ZoomCompleted),
    /// The overlay opened.
    OverlayOpened(OverlayOpened),
    /// The overlay closed.
    OverlayClosed(OverlayClosed),
    /// The active section changed.
    SectionSelected(SectionSelected),
    /// The session was torn down.
    SessionTornDown(SessionTornDown),
}

impl PresentationEventKind {
    /// Returns the event type identifier for this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::SequenceStarted(_) => SEQUENCE_STARTED_EVENT_TYPE,
            Self::IntroMounted(_) => INTRO_MOUNTED_EVENT_TYPE,
            Self::IntroStepChanged(_) => INTRO_STEP_CHANGED_EVENT_TYPE,
            Self::IntroFadeBegan(_) => INTRO_FADE_BEGAN_EVENT_TYPE,
            Self::IntroFinished(_) => INTRO_FINISHED_EVENT_TYPE,
            Self::SceneRequested(_) => SCENE_REQUESTED_EVENT_TYPE,
            Self::ZoomStarted(_) => ZOOM_STARTED_EVENT_TYPE,
            Self::ZoomCompleted(_) => ZOOM_COMPLETED_EVENT_TYPE,
            Self::OverlayOpened(_) => OVERLAY_OPENED_EVENT_TYPE,
            Self::OverlayClosed(_) => OVERLAY_CLOSED_EVENT_TYPE,
            Self::SectionSelected(_) => SECTION_SELECTED_EVENT_TYPE,
            Self::SessionTornDown(_) => SESSION_TORN_DOWN_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the presentation sequence.
#[derive(Debug, Clone)]
pub struct PresentationEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: PresentationEventKind,
}

impl DomainEvent for PresentationEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind)
            .expect("PresentationEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
