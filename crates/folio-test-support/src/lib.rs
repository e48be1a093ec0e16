//! Shared test doubles and utilities for the Folio presentation choreographer.

mod audio;
mod clock;
mod scene;

pub use audio::{FailingAudioPlayer, RecordingAudioPlayer};
pub use clock::FixedClock;
pub use scene::{DelayedSceneLoader, FailingSceneLoader, RecordingSceneLoader};
