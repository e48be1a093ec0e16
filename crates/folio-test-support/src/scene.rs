//! Scene doubles: `SceneLoader` implementations for tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use folio_core::collaborators::{AssetRef, SceneLoader};
use folio_core::error::DomainError;

/// A scene loader that mounts instantly and records every asset requested.
#[derive(Debug, Default)]
pub struct RecordingSceneLoader {
    loaded: Mutex<Vec<AssetRef>>,
}

impl RecordingSceneLoader {
    /// Creates a loader with an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every asset requested so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn loaded(&self) -> Vec<AssetRef> {
        self.loaded.lock().unwrap().clone()
    }
}

#[async_trait]
impl SceneLoader for RecordingSceneLoader {
    async fn load(&self, asset: &AssetRef) -> Result<(), DomainError> {
        self.loaded.lock().unwrap().push(asset.clone());
        Ok(())
    }
}

/// A scene loader that takes `delay` (in tokio time) to mount. Pair it with
/// a paused runtime to simulate slow asset loads.
#[derive(Debug)]
pub struct DelayedSceneLoader {
    /// How long each load takes.
    pub delay: Duration,
}

#[async_trait]
impl SceneLoader for DelayedSceneLoader {
    async fn load(&self, _asset: &AssetRef) -> Result<(), DomainError> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

/// A scene loader that always fails.
#[derive(Debug)]
pub struct FailingSceneLoader;

#[async_trait]
impl SceneLoader for FailingSceneLoader {
    async fn load(&self, asset: &AssetRef) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure(format!(
            "failed to load scene asset {}",
            asset.src
        )))
    }
}
