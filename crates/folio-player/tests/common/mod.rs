//! Shared test helpers for driver integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use folio_core::collaborators::{AudioPlayer, SceneLoader};
use folio_core::time::Clock;
use folio_player::driver::{FrameSink, PlayerInput, PresentationDriver};
use folio_sequence::application::command_handlers::JournalEntry;
use folio_sequence::application::query_handlers::PresentationView;
use folio_sequence::domain::aggregates::SequenceController;
use folio_sequence::domain::commands::UserCommand;
use folio_sequence::domain::config::PacingConfig;
use folio_sequence::domain::phase::Phase;
use folio_test_support::FixedClock;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Frame interval used across all driver tests.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Fixed timestamp used across all driver tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// A sink that keeps every journal entry and the phases it was shown.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub entries: Vec<JournalEntry>,
    pub phases: Vec<Phase>,
    pub last_view: Option<PresentationView>,
}

impl RecordingSink {
    /// Returns the journaled event types in order.
    pub fn event_types(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.event_type.as_str()).collect()
    }

    /// Counts journal entries of `event_type`.
    pub fn count(&self, event_type: &str) -> usize {
        self.entries
            .iter()
            .filter(|e| e.event_type == event_type)
            .count()
    }
}

impl FrameSink for RecordingSink {
    fn journal(&mut self, entries: &[JournalEntry]) {
        self.entries.extend_from_slice(entries);
    }

    fn present(&mut self, view: &PresentationView) {
        if self.phases.last() != Some(&view.phase) {
            self.phases.push(view.phase);
        }
        self.last_view = Some(view.clone());
    }
}

/// Build a driver with default pacing and the given collaborators.
pub fn build_driver(
    audio: Arc<dyn AudioPlayer>,
    scene: Arc<dyn SceneLoader>,
) -> PresentationDriver<RecordingSink> {
    let controller =
        SequenceController::new(Uuid::new_v4(), PacingConfig::default(), fixed_clock()).unwrap();
    PresentationDriver::new(
        controller,
        audio,
        scene,
        RecordingSink::default(),
        FRAME_INTERVAL,
    )
}

/// Send `input` after `delay` of (paused) tokio time.
pub fn send_after(tx: &mpsc::Sender<PlayerInput>, delay: Duration, input: PlayerInput) {
    let tx = tx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        // The driver may already have stopped.
        let _ = tx.send(input).await;
    });
}

/// Open an input channel with a start command already queued.
pub async fn started_inputs() -> (mpsc::Sender<PlayerInput>, mpsc::Receiver<PlayerInput>) {
    let (tx, rx) = mpsc::channel(8);
    tx.send(PlayerInput::Command(UserCommand::start()))
        .await
        .unwrap();
    (tx, rx)
}
