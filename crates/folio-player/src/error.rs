//! Folio player error types.

use folio_core::error::DomainError;
use thiserror::Error;

/// Startup and runtime errors for the player.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable or the pacing file is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The pacing file is not valid YAML for the pacing schema.
    #[error("pacing file error: {0}")]
    PacingFile(#[from] serde_yaml::Error),

    /// Terminal or filesystem I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The sequence rejected its configuration.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),
}
