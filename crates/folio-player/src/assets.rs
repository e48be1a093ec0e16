//! Filesystem-backed collaborators.
//!
//! A terminal has no audio device or WebGL canvas, so "playing" the track and
//! "mounting" the scene both mean resolving the asset under the asset root
//! and confirming it is readable.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use folio_core::collaborators::{AssetRef, AudioPlayer, SceneLoader, TrackRef};
use folio_core::error::DomainError;
use tracing::info;

/// Resolves a site-relative URI such as `/scene.gltf` under `root`.
#[must_use]
pub fn resolve(root: &Path, src: &str) -> PathBuf {
    root.join(src.trim_start_matches('/'))
}

async fn ensure_readable(path: &Path) -> Result<u64, DomainError> {
    let metadata = tokio::fs::metadata(path).await.map_err(|e| {
        DomainError::Infrastructure(format!("cannot read {}: {e}", path.display()))
    })?;
    if !metadata.is_file() {
        return Err(DomainError::Infrastructure(format!(
            "{} is not a file",
            path.display()
        )));
    }
    Ok(metadata.len())
}

/// Audio player that checks the track exists under the asset root.
#[derive(Debug, Clone)]
pub struct AssetAudioPlayer {
    root: PathBuf,
}

impl AssetAudioPlayer {
    /// Creates a player resolving tracks under `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl AudioPlayer for AssetAudioPlayer {
    async fn play(&self, track: &TrackRef) -> Result<(), DomainError> {
        let path = resolve(&self.root, &track.src);
        let bytes = ensure_readable(&path).await?;
        info!(
            track = %path.display(),
            bytes,
            looping = track.looping,
            volume = track.volume,
            "background track playing"
        );
        Ok(())
    }
}

/// Scene loader that checks the scene asset exists under the asset root.
#[derive(Debug, Clone)]
pub struct AssetSceneLoader {
    root: PathBuf,
}

impl AssetSceneLoader {
    /// Creates a loader resolving scenes under `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl SceneLoader for AssetSceneLoader {
    async fn load(&self, asset: &AssetRef) -> Result<(), DomainError> {
        let path = resolve(&self.root, &asset.src);
        let bytes = ensure_readable(&path).await?;
        info!(scene = %path.display(), bytes, "scene mounted");
        Ok(())
    }
}
