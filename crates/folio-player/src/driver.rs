//! Real-time driver for one presentation session.
//!
//! The sequence controller never touches a clock. This loop measures session
//! time from a tokio `Instant`, feeds it frames and user commands, performs
//! the side effects its journal asks for (start the track, load the scene),
//! and reports collaborator results back to it.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use folio_core::collaborators::{AudioPlayer, SceneLoader};
use folio_core::error::DomainError;
use folio_core::time::SessionTime;
use folio_overlay::OverlayState;
use folio_sequence::application::command_handlers::{
    JournalEntry, drain_journal, handle_user_command,
};
use folio_sequence::application::query_handlers::{PresentationView, get_presentation_view};
use folio_sequence::domain::aggregates::SequenceController;
use folio_sequence::domain::commands::UserCommand;
use folio_sequence::domain::events::{SCENE_REQUESTED_EVENT_TYPE, SEQUENCE_STARTED_EVENT_TYPE};
use folio_sequence::domain::phase::Phase;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error, info, trace, warn};

/// Input delivered to the driver.
#[derive(Debug, PartialEq)]
pub enum PlayerInput {
    /// A user command for the sequence.
    Command(UserCommand),
    /// End the session.
    Quit,
}

/// Receives the session's journal and rendered views.
pub trait FrameSink {
    /// Called with every batch of newly journaled events.
    fn journal(&mut self, entries: &[JournalEntry]);

    /// Called after every frame and every handled command.
    fn present(&mut self, view: &PresentationView);
}

/// Logs the journal and visible state changes through `tracing`.
#[derive(Debug, Default)]
pub struct TracingSink {
    shown: Option<(Phase, u8, OverlayState, bool)>,
}

impl FrameSink for TracingSink {
    fn journal(&mut self, entries: &[JournalEntry]) {
        for entry in entries {
            info!(
                event_type = %entry.event_type,
                sequence_number = entry.sequence_number,
                session_time = %entry.session_time,
                payload = %entry.payload,
                "event journaled"
            );
        }
    }

    fn present(&mut self, view: &PresentationView) {
        let shown = (
            view.phase,
            view.intro_step,
            view.overlay,
            view.open_button_visible,
        );
        if self.shown != Some(shown) {
            self.shown = Some(shown);
            info!(
                phase = %view.phase,
                caption = view.caption.unwrap_or(""),
                overlay_open = view.overlay.open,
                section = %view.overlay.active_section,
                open_button_visible = view.open_button_visible,
                "presentation state"
            );
        }
        trace!(
            rotation_y = view.rotation_y,
            camera_z = view.camera_z,
            panel_opacity = view.panel_opacity,
            "frame"
        );
    }
}

/// Why the driver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The user quit.
    Quit,
    /// The shutdown future resolved.
    Shutdown,
}

/// Summary returned when the driver stops.
#[derive(Debug)]
pub struct DriverReport<S> {
    /// Why the driver stopped.
    pub exit: ExitReason,
    /// The final view, taken after teardown.
    pub view: PresentationView,
    /// Number of events journaled over the session.
    pub events_journaled: usize,
    /// Number of frames rendered.
    pub frames: u64,
    /// The sink, returned to the caller.
    pub sink: S,
}

/// Drives a [`SequenceController`] in real time.
pub struct PresentationDriver<S> {
    controller: SequenceController,
    audio: Arc<dyn AudioPlayer>,
    scene: Arc<dyn SceneLoader>,
    sink: S,
    frame_interval: Duration,
    events_journaled: usize,
}

impl<S: FrameSink> PresentationDriver<S> {
    /// Creates a driver for `controller`.
    pub fn new(
        controller: SequenceController,
        audio: Arc<dyn AudioPlayer>,
        scene: Arc<dyn SceneLoader>,
        sink: S,
        frame_interval: Duration,
    ) -> Self {
        Self {
            controller,
            audio,
            scene,
            sink,
            frame_interval,
            events_journaled: 0,
        }
    }

    /// Returns the controller being driven.
    #[must_use]
    pub fn controller(&self) -> &SequenceController {
        &self.controller
    }

    /// Runs frames and handles inputs until the user quits or `shutdown`
    /// resolves, then tears the session down. Closing the input channel does
    /// not end the session.
    pub async fn run<F>(mut self, mut inputs: mpsc::Receiver<PlayerInput>, shutdown: F) -> DriverReport<S>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let origin = Instant::now();
        let mut frames = time::interval(self.frame_interval);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let (scene_tx, mut scene_rx) = mpsc::channel::<Result<(), DomainError>>(1);
        let mut inputs_open = true;
        let mut frame_count: u64 = 0;

        info!(session_id = %self.controller.id, "presentation driver started");

        let exit = loop {
            tokio::select! {
                () = &mut shutdown => break ExitReason::Shutdown,
                input = inputs.recv(), if inputs_open => match input {
                    Some(PlayerInput::Command(command)) => {
                        let now = session_now(origin);
                        match handle_user_command(&mut self.controller, &command, now) {
                            Ok(result) => {
                                if !result.applied {
                                    debug!(?command, "command had no effect");
                                }
                                self.publish(result.journal, &scene_tx);
                            }
                            Err(err) => warn!(%err, "command rejected"),
                        }
                        self.present();
                    }
                    Some(PlayerInput::Quit) => break ExitReason::Quit,
                    None => {
                        debug!("input channel closed");
                        inputs_open = false;
                    }
                },
                Some(loaded) = scene_rx.recv() => {
                    let now = session_now(origin);
                    match loaded {
                        Ok(()) => {
                            self.controller.scene_mounted(now);
                        }
                        Err(err) => {
                            error!(%err, "scene failed to load; the overlay stays reachable through the open button");
                        }
                    }
                    let journal = drain_journal(&mut self.controller);
                    self.publish(journal, &scene_tx);
                }
                _ = frames.tick() => {
                    let now = session_now(origin);
                    self.controller.tick(now);
                    frame_count += 1;
                    let journal = drain_journal(&mut self.controller);
                    self.publish(journal, &scene_tx);
                    self.present();
                }
            }
        };

        self.controller.teardown(session_now(origin));
        let journal = drain_journal(&mut self.controller);
        self.publish(journal, &scene_tx);
        let view = get_presentation_view(&self.controller);
        info!(?exit, phase = %view.phase, frames = frame_count, "presentation driver stopped");

        DriverReport {
            exit,
            view,
            events_journaled: self.events_journaled,
            frames: frame_count,
            sink: self.sink,
        }
    }

    fn present(&mut self) {
        let view = get_presentation_view(&self.controller);
        self.sink.present(&view);
    }

    /// Performs the side effects the journal asks for, then hands it to the
    /// sink.
    fn publish(&mut self, journal: Vec<JournalEntry>, scene_tx: &mpsc::Sender<Result<(), DomainError>>) {
        if journal.is_empty() {
            return;
        }
        for entry in &journal {
            match entry.event_type.as_str() {
                SEQUENCE_STARTED_EVENT_TYPE => self.spawn_playback(),
                SCENE_REQUESTED_EVENT_TYPE => self.spawn_scene_load(scene_tx.clone()),
                _ => {}
            }
        }
        self.events_journaled += journal.len();
        self.sink.journal(&journal);
    }

    fn spawn_playback(&self) {
        let audio = Arc::clone(&self.audio);
        let track = self.controller.config().track.clone();
        tokio::spawn(async move {
            if let Err(err) = audio.play(&track).await {
                debug!(%err, track = %track.src, "background track unavailable; continuing without audio");
            }
        });
    }

    fn spawn_scene_load(&self, tx: mpsc::Sender<Result<(), DomainError>>) {
        let scene = Arc::clone(&self.scene);
        let asset = self.controller.config().scene.clone();
        tokio::spawn(async move {
            let result = scene.load(&asset).await;
            if tx.send(result).await.is_err() {
                debug!(asset = %asset.src, "scene loaded after the session ended");
            }
        });
    }
}

fn session_now(origin: Instant) -> SessionTime {
    SessionTime::new(origin.elapsed())
}
