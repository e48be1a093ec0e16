//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A section identifier outside the fixed section set was requested.
    #[error("invalid section: {0}")]
    InvalidSection(String),

    /// A validation error in domain logic or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// A collaborator (audio, asset loader) failed.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
