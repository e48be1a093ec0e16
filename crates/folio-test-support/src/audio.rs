//! Audio doubles: `AudioPlayer` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use folio_core::collaborators::{AudioPlayer, TrackRef};
use folio_core::error::DomainError;

/// An audio player that records every track it is asked to play and always
/// succeeds.
#[derive(Debug, Default)]
pub struct RecordingAudioPlayer {
    played: Mutex<Vec<TrackRef>>,
}

impl RecordingAudioPlayer {
    /// Creates a player with an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every track played so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn played(&self) -> Vec<TrackRef> {
        self.played.lock().unwrap().clone()
    }
}

#[async_trait]
impl AudioPlayer for RecordingAudioPlayer {
    async fn play(&self, track: &TrackRef) -> Result<(), DomainError> {
        self.played.lock().unwrap().push(track.clone());
        Ok(())
    }
}

/// An audio player whose playback always fails, like a browser that blocks
/// autoplay.
#[derive(Debug)]
pub struct FailingAudioPlayer;

#[async_trait]
impl AudioPlayer for FailingAudioPlayer {
    async fn play(&self, _track: &TrackRef) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure(
            "playback blocked by autoplay policy".to_owned(),
        ))
    }
}
