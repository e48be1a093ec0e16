//! Phase, intro caption, and zoom state types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The single authoritative stage of the presentation.
///
/// Variants are declared in sequence order; the derived ordering is used to
/// ask "has the sequence reached at least this phase".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Landing screen, waiting for the user to enter.
    #[default]
    NotStarted,
    /// Intro captions are playing.
    IntroActive,
    /// Captions cleared, intro still on screen.
    IntroFading,
    /// Intro gone, 3D scene about to mount.
    ModelVisible,
    /// Camera zooming toward the model.
    CameraZooming,
    /// Zoom finished; the portfolio overlay has been shown.
    PortfolioVisible,
}

impl Phase {
    /// Returns the phase name used in logs and events.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::IntroActive => "intro_active",
            Self::IntroFading => "intro_fading",
            Self::ModelVisible => "model_visible",
            Self::CameraZooming => "camera_zooming",
            Self::PortfolioVisible => "portfolio_visible",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which intro caption is on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntroStep {
    /// No caption.
    #[default]
    Blank,
    /// First caption.
    First,
    /// Second caption.
    Second,
}

impl IntroStep {
    /// Returns the ordinal `0`, `1`, or `2`.
    #[must_use]
    pub fn ordinal(self) -> u8 {
        match self {
            Self::Blank => 0,
            Self::First => 1,
            Self::Second => 2,
        }
    }

    /// Returns the caption text, if any.
    #[must_use]
    pub fn caption(self) -> Option<&'static str> {
        match self {
            Self::Blank => None,
            Self::First => Some("I Am Priyanshu Behere"),
            Self::Second => Some("Welcome To My World"),
        }
    }
}

/// Progress of the one-shot camera zoom.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoomState {
    /// Set once when the scene mounts.
    pub started: bool,
    /// Set once when the zoom tween completes; never before `started`.
    pub completed: bool,
}
