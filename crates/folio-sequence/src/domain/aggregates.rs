//! Aggregate root for the presentation sequence.

use std::fmt;
use std::sync::Arc;

use folio_animation::{AnimationCoordinator, FrameSample};
use folio_core::aggregate::AggregateRoot;
use folio_core::error::DomainError;
use folio_core::event::EventMetadata;
use folio_core::time::{Clock, SessionTime};
use folio_overlay::{OverlayState, OverlayVisibilityManager, SectionId};
use folio_timing::{BatchHandle, TimerScheduler};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::config::{Cue, PacingConfig};
use super::events::{
    IntroFadeBegan, IntroFinished, IntroMounted, IntroStepChanged, OpenTrigger, OverlayClosed,
    OverlayOpened, PresentationEvent, PresentationEventKind, SceneRequested, SectionSelected,
    SequenceStarted, SessionTornDown, ZoomCompleted, ZoomStarted,
};
use super::phase::{IntroStep, Phase, ZoomState};

/// The aggregate root for one presentation session.
///
/// Created once per page load and owned by whoever drives it. All inputs
/// (user actions, timer expirations, animation frames, collaborator
/// signals) arrive as method calls carrying the current [`SessionTime`].
/// Each one is checked against the current phase; out-of-order inputs are
/// ignored and never fail.
pub struct SequenceController {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Current version (event count).
    pub(crate) version: i64,
    config: PacingConfig,
    clock: Arc<dyn Clock>,
    phase: Phase,
    intro_step: IntroStep,
    intro_visible: bool,
    scene_visible: bool,
    zoom: ZoomState,
    overlay: OverlayVisibilityManager,
    torn_down: bool,
    /// Correlation ID of the start command; timer- and animation-driven
    /// events carry it.
    session_correlation_id: Uuid,
    /// Latest session time observed; inputs never move it backwards.
    now: SessionTime,
    timers: TimerScheduler<Cue>,
    intro_batch: Option<BatchHandle>,
    scene_batch: Option<BatchHandle>,
    animation: AnimationCoordinator,
    last_frame: Option<FrameSample>,
    /// Events not yet drained by the driver.
    uncommitted_events: Vec<PresentationEvent>,
}

impl fmt::Debug for SequenceController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequenceController")
            .field("id", &self.id)
            .field("version", &self.version)
            .field("phase", &self.phase)
            .field("intro_step", &self.intro_step)
            .field("zoom", &self.zoom)
            .field("overlay", &self.overlay.state())
            .field("torn_down", &self.torn_down)
            .field("now", &self.now)
            .field("pending_cues", &self.timers.pending())
            .finish_non_exhaustive()
    }
}

impl SequenceController {
    /// Creates a session on the landing screen.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `config` fails validation.
    pub fn new(id: Uuid, config: PacingConfig, clock: Arc<dyn Clock>) -> Result<Self, DomainError> {
        config.validate()?;
        Ok(Self {
            id,
            version: 0,
            config,
            clock,
            phase: Phase::NotStarted,
            intro_step: IntroStep::Blank,
            intro_visible: false,
            scene_visible: false,
            zoom: ZoomState::default(),
            overlay: OverlayVisibilityManager::new(),
            torn_down: false,
            session_correlation_id: Uuid::nil(),
            now: SessionTime::ZERO,
            timers: TimerScheduler::new(),
            intro_batch: None,
            scene_batch: None,
            animation: AnimationCoordinator::new(),
            last_frame: None,
            uncommitted_events: Vec::new(),
        })
    }

    fn observe(&mut self, now: SessionTime) -> SessionTime {
        if now > self.now {
            self.now = now;
        }
        self.now
    }

    /// Stamps, applies, and journals an event.
    fn record(&mut self, correlation_id: Uuid, at: SessionTime, kind: PresentationEventKind) {
        let event = PresentationEvent {
            metadata: EventMetadata::stamp(
                kind.event_type(),
                self.id,
                self.next_sequence_number(),
                correlation_id,
                at,
                self.clock.as_ref(),
            ),
            kind,
        };
        let before = self.phase;
        self.apply(&event);
        if self.phase != before {
            info!(session_id = %self.id, from = %before, to = %self.phase, %at, "phase changed");
        }
        debug!(
            session_id = %self.id,
            event_type = event.kind.event_type(),
            sequence_number = event.metadata.sequence_number,
            "recorded presentation event"
        );
        self.uncommitted_events.push(event);
    }

    /// Starts the sequence from the landing screen, producing a
    /// `SequenceStarted` event and scheduling the intro cues. Returns `false`
    /// without effect unless the session is in `NotStarted`.
    pub fn start(&mut self, correlation_id: Uuid, now: SessionTime) -> bool {
        let now = self.observe(now);
        if self.torn_down || self.phase != Phase::NotStarted {
            debug!(session_id = %self.id, phase = %self.phase, "start ignored");
            return false;
        }

        self.record(
            correlation_id,
            now,
            PresentationEventKind::SequenceStarted(SequenceStarted {
                session_id: self.id,
                track: self.config.track.clone(),
            }),
        );
        let cues = self.config.intro_cues();
        self.intro_batch = Some(self.timers.schedule_batch(now, cues));
        true
    }

    /// Delivers every timer cue due at `now`, in due order, and returns how
    /// many were delivered. Cues scheduled while delivering are included if
    /// they are already due.
    pub fn advance(&mut self, now: SessionTime) -> usize {
        let now = self.observe(now);
        let mut delivered = 0;
        while !self.torn_down {
            let Some(fired) = self.timers.pop_due(now) else {
                break;
            };
            self.handle_cue(fired.cue, fired.due);
            delivered += 1;
        }
        delivered
    }

    fn handle_cue(&mut self, cue: Cue, at: SessionTime) {
        let correlation_id = self.session_correlation_id;
        let session_id = self.id;
        match cue {
            Cue::MountIntro if self.phase == Phase::IntroActive && !self.intro_visible => {
                self.record(
                    correlation_id,
                    at,
                    PresentationEventKind::IntroMounted(IntroMounted { session_id }),
                );
            }
            Cue::FirstCaption
                if self.phase == Phase::IntroActive && self.intro_step == IntroStep::Blank =>
            {
                self.record(
                    correlation_id,
                    at,
                    PresentationEventKind::IntroStepChanged(IntroStepChanged {
                        session_id,
                        step: IntroStep::First,
                    }),
                );
            }
            Cue::SecondCaption
                if self.phase == Phase::IntroActive && self.intro_step == IntroStep::First =>
            {
                self.record(
                    correlation_id,
                    at,
                    PresentationEventKind::IntroStepChanged(IntroStepChanged {
                        session_id,
                        step: IntroStep::Second,
                    }),
                );
            }
            Cue::BeginFade if self.phase == Phase::IntroActive => {
                self.record(
                    correlation_id,
                    at,
                    PresentationEventKind::IntroFadeBegan(IntroFadeBegan { session_id }),
                );
            }
            Cue::FinishIntro if self.phase == Phase::IntroFading => {
                self.record(
                    correlation_id,
                    at,
                    PresentationEventKind::IntroFinished(IntroFinished { session_id }),
                );
                self.intro_batch = None;
                let delay = self.config.scene_mount_delay();
                self.scene_batch = Some(self.timers.schedule_batch(at, [(delay, Cue::RequestScene)]));
            }
            Cue::RequestScene if self.phase == Phase::ModelVisible && !self.scene_visible => {
                self.scene_batch = None;
                self.record(
                    correlation_id,
                    at,
                    PresentationEventKind::SceneRequested(SceneRequested {
                        session_id,
                        asset: self.config.scene.clone(),
                    }),
                );
            }
            other => {
                warn!(session_id = %self.id, cue = ?other, phase = %self.phase, "dropping out-of-order timer cue");
            }
        }
    }

    /// Signals that the 3D scene has mounted. In `ModelVisible` this starts
    /// the rotation and the camera zoom, producing a `ZoomStarted` event.
    /// Returns `false` without effect in any other phase.
    pub fn scene_mounted(&mut self, now: SessionTime) -> bool {
        let now = self.observe(now);
        if self.torn_down {
            warn!(session_id = %self.id, "scene mounted after teardown; dropping");
            return false;
        }
        if self.phase != Phase::ModelVisible {
            if self.zoom.started {
                warn!(session_id = %self.id, phase = %self.phase, "dropping duplicate scene mount");
            } else {
                debug!(session_id = %self.id, phase = %self.phase, "scene mounted before the intro ended; ignoring");
            }
            return false;
        }

        if let Some(batch) = self.scene_batch.take() {
            self.timers.cancel(batch);
        }
        let from_z = self.animation.camera_z();
        self.animation
            .start_continuous_rotation(self.config.rotation_rate_per_tick);
        self.animation.start_zoom_tween(
            now,
            self.config.zoom_target_z,
            self.config.zoom_duration(),
            self.config.zoom_easing,
        );
        self.record(
            self.session_correlation_id,
            now,
            PresentationEventKind::ZoomStarted(ZoomStarted {
                session_id: self.id,
                from_z,
                to_z: self.config.zoom_target_z,
                duration_ms: self.config.zoom_duration_ms,
            }),
        );
        true
    }

    /// Signals that the camera zoom completed, producing a `ZoomCompleted`
    /// event and opening the overlay. A zoom still in flight is settled on
    /// its target first. Late (after teardown) or duplicate signals are
    /// dropped with a warning and return `false`.
    pub fn on_zoom_completed(&mut self, now: SessionTime) -> bool {
        let now = self.observe(now);
        if self.torn_down {
            warn!(session_id = %self.id, "zoom completion after teardown; dropping");
            return false;
        }
        if self.phase != Phase::CameraZooming || !self.zoom.started || self.zoom.completed {
            warn!(
                session_id = %self.id,
                phase = %self.phase,
                zoom = ?self.zoom,
                "dropping late or duplicate zoom completion"
            );
            return false;
        }

        self.animation.finish_zoom(now);
        let correlation_id = self.session_correlation_id;
        self.record(
            correlation_id,
            now,
            PresentationEventKind::ZoomCompleted(ZoomCompleted {
                session_id: self.id,
                camera_z: self.config.zoom_target_z,
            }),
        );
        self.show_overlay(correlation_id, now, OpenTrigger::ZoomCompleted);
        true
    }

    /// Advances timers to `now`, then renders one animation frame. A zoom
    /// completion reported by the frame is handled before returning.
    pub fn tick(&mut self, now: SessionTime) -> FrameSample {
        self.advance(now);
        let sample = self.animation.tick(self.now);
        if let Some(done) = sample.zoom_completed {
            self.on_zoom_completed(done.at);
        }
        self.last_frame = Some(sample);
        sample
    }

    fn show_overlay(&mut self, correlation_id: Uuid, now: SessionTime, trigger: OpenTrigger) -> bool {
        if self.overlay.is_open() {
            debug!(session_id = %self.id, ?trigger, "overlay already open");
            return false;
        }
        self.record(
            correlation_id,
            now,
            PresentationEventKind::OverlayOpened(OverlayOpened {
                session_id: self.id,
                section: self.overlay.current_section(),
                trigger,
            }),
        );
        self.animation.start_panel_reveal(
            now,
            self.config.panel_reveal_offset_y,
            self.config.panel_reveal_duration(),
            self.config.panel_reveal_easing,
        );
        true
    }

    /// Opens the overlay on user request, producing an `OverlayOpened`
    /// event. Only possible once the intro has ended; an in-flight zoom
    /// keeps running underneath. Returns `false` if nothing changed.
    pub fn open_overlay(&mut self, correlation_id: Uuid, now: SessionTime) -> bool {
        let now = self.observe(now);
        if self.torn_down || self.phase < Phase::ModelVisible {
            debug!(session_id = %self.id, phase = %self.phase, "open ignored");
            return false;
        }
        self.show_overlay(correlation_id, now, OpenTrigger::User)
    }

    /// Closes the overlay, producing an `OverlayClosed` event. Returns
    /// `false` if it was not open.
    pub fn close_overlay(&mut self, correlation_id: Uuid, now: SessionTime) -> bool {
        let now = self.observe(now);
        if self.torn_down || !self.overlay.is_open() {
            debug!(session_id = %self.id, "close ignored");
            return false;
        }
        self.record(
            correlation_id,
            now,
            PresentationEventKind::OverlayClosed(OverlayClosed {
                session_id: self.id,
            }),
        );
        true
    }

    /// Makes the section named `id` active, producing a `SectionSelected`
    /// event when it differs from the current one.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSection` if `id` names no section; the
    /// active section is left unchanged.
    pub fn select_section(
        &mut self,
        id: &str,
        correlation_id: Uuid,
        now: SessionTime,
    ) -> Result<SectionId, DomainError> {
        let now = self.observe(now);
        let session_id = self.id;
        if self.torn_down {
            debug!(%session_id, "section selection after teardown ignored");
            return id.parse();
        }

        let previous = self.overlay.current_section();
        let section = self.overlay.select_section(id).inspect_err(|err| {
            warn!(%session_id, %err, "rejecting section selection");
        })?;
        if section == previous {
            return Ok(section);
        }
        self.record(
            correlation_id,
            now,
            PresentationEventKind::SectionSelected(SectionSelected {
                session_id: self.id,
                section,
                previous,
            }),
        );
        Ok(section)
    }

    /// Tears the session down: cancels every pending timer cue, stops the
    /// rotation, and suppresses a pending zoom completion. Afterwards every
    /// input is ignored. Returns `false` if already torn down.
    pub fn teardown(&mut self, now: SessionTime) -> bool {
        let now = self.observe(now);
        if self.torn_down {
            return false;
        }
        let cancelled_cues = self.timers.cancel_all();
        self.intro_batch = None;
        self.scene_batch = None;
        self.animation.stop();
        self.record(
            self.session_correlation_id,
            now,
            PresentationEventKind::SessionTornDown(SessionTornDown {
                session_id: self.id,
                phase: self.phase,
                cancelled_cues,
            }),
        );
        info!(session_id = %self.id, cancelled_cues, "session torn down");
        true
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the intro caption on screen.
    #[must_use]
    pub fn intro_step(&self) -> IntroStep {
        self.intro_step
    }

    /// Returns the zoom progress flags.
    #[must_use]
    pub fn zoom_state(&self) -> ZoomState {
        self.zoom
    }

    /// Returns the overlay state.
    #[must_use]
    pub fn overlay(&self) -> OverlayState {
        self.overlay.state()
    }

    /// Returns whether the intro overlay is mounted.
    #[must_use]
    pub fn intro_visible(&self) -> bool {
        self.intro_visible
    }

    /// Returns whether the 3D scene should be mounted.
    #[must_use]
    pub fn scene_visible(&self) -> bool {
        self.scene_visible
    }

    /// Returns whether the persistent "Open Portfolio" button is shown: the
    /// intro has ended and the overlay is closed.
    #[must_use]
    pub fn open_button_visible(&self) -> bool {
        !self.torn_down && self.phase >= Phase::ModelVisible && !self.overlay.is_open()
    }

    /// Returns whether the session has been torn down.
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Returns whether any intro cue is still pending.
    #[must_use]
    pub fn intro_cues_pending(&self) -> bool {
        self.intro_batch
            .is_some_and(|batch| self.timers.is_pending(batch))
    }

    /// Returns the number of timer cues still pending.
    #[must_use]
    pub fn pending_cues(&self) -> usize {
        self.timers.pending()
    }

    /// Returns the session time of the next pending cue.
    #[must_use]
    pub fn next_cue_at(&self) -> Option<SessionTime> {
        self.timers.next_due()
    }

    /// Returns the most recent animation frame.
    #[must_use]
    pub fn last_frame(&self) -> Option<FrameSample> {
        self.last_frame
    }

    /// Returns the animation coordinator.
    #[must_use]
    pub fn animation(&self) -> &AnimationCoordinator {
        &self.animation
    }

    /// Returns the pacing configuration.
    #[must_use]
    pub fn config(&self) -> &PacingConfig {
        &self.config
    }

    /// Returns the latest session time observed.
    #[must_use]
    pub fn now(&self) -> SessionTime {
        self.now
    }
}

impl AggregateRoot for SequenceController {
    type Event = PresentationEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            PresentationEventKind::SequenceStarted(_) => {
                self.phase = Phase::IntroActive;
                self.session_correlation_id = event.metadata.correlation_id;
            }
            PresentationEventKind::IntroMounted(_) => {
                self.intro_visible = true;
            }
            PresentationEventKind::IntroStepChanged(payload) => {
                self.intro_step = payload.step;
            }
            PresentationEventKind::IntroFadeBegan(_) => {
                self.phase = Phase::IntroFading;
                self.intro_step = IntroStep::Blank;
            }
            PresentationEventKind::IntroFinished(_) => {
                self.phase = Phase::ModelVisible;
                self.intro_visible = false;
                self.intro_step = IntroStep::Blank;
            }
            PresentationEventKind::SceneRequested(_) => {
                self.scene_visible = true;
            }
            PresentationEventKind::ZoomStarted(_) => {
                self.phase = Phase::CameraZooming;
                self.scene_visible = true;
                self.zoom.started = true;
            }
            PresentationEventKind::ZoomCompleted(_) => {
                self.phase = Phase::PortfolioVisible;
                self.zoom.completed = true;
            }
            PresentationEventKind::OverlayOpened(payload) => {
                self.overlay.select(payload.section);
                self.overlay.open();
            }
            PresentationEventKind::OverlayClosed(_) => {
                self.overlay.close();
            }
            PresentationEventKind::SectionSelected(payload) => {
                self.overlay.select(payload.section);
            }
            PresentationEventKind::SessionTornDown(_) => {
                self.torn_down = true;
            }
        }
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn take_uncommitted_events(&mut self) -> Vec<Self::Event> {
        std::mem::take(&mut self.uncommitted_events)
    }
}
