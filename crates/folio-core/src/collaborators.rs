//! External collaborator abstractions.
//!
//! The choreographer never plays audio or loads assets itself. It journals
//! events; a runtime driver reacts to them by calling these collaborators and
//! reports results back as signals.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Reference to an audio track plus how it should be played.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackRef {
    /// Source URI of the track.
    pub src: String,
    /// Whether playback loops.
    pub looping: bool,
    /// Playback volume in `[0.0, 1.0]`.
    pub volume: f32,
}

impl Default for TrackRef {
    fn default() -> Self {
        Self {
            src: "/music3.mp3".to_owned(),
            looping: true,
            volume: 0.3,
        }
    }
}

/// Reference to the 3D scene asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetRef {
    /// Source URI of the scene.
    pub src: String,
}

impl Default for AssetRef {
    fn default() -> Self {
        Self {
            src: "/scene.gltf".to_owned(),
        }
    }
}

/// Background audio playback. Fire-and-forget from the sequencer's view.
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    /// Starts playing `track`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if playback could not start.
    /// Callers treat this as non-fatal.
    async fn play(&self, track: &TrackRef) -> Result<(), DomainError>;
}

/// Loads and mounts the 3D scene.
#[async_trait]
pub trait SceneLoader: Send + Sync {
    /// Loads `asset` and resolves once the scene is mounted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the asset could not be loaded.
    async fn load(&self, asset: &AssetRef) -> Result<(), DomainError>;
}
