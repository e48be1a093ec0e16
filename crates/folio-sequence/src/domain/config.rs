//! Presentation pacing configuration.

use std::time::Duration;

use folio_animation::Easing;
use folio_core::collaborators::{AssetRef, TrackRef};
use folio_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Timer cue delivered to the sequence controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Cue {
    /// The intro overlay mounts (no caption yet).
    MountIntro,
    /// Show the first caption.
    FirstCaption,
    /// Show the second caption.
    SecondCaption,
    /// Clear captions and fade.
    BeginFade,
    /// End the intro.
    FinishIntro,
    /// Ask the renderer to mount the 3D scene.
    RequestScene,
}

/// Pacing and animation parameters for one session.
///
/// The four intro cue offsets (`caption_one_ms` through `finish_ms`) are
/// measured from the moment the intro mounts, which itself happens
/// `intro_mount_delay_ms` after the user enters. They must be strictly
/// increasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Delay between the user entering and the intro mounting.
    pub intro_mount_delay_ms: u64,
    /// First caption appears (T1).
    pub caption_one_ms: u64,
    /// Second caption appears (T2).
    pub caption_two_ms: u64,
    /// Captions cleared (T3).
    pub fade_ms: u64,
    /// Intro ends (T4).
    pub finish_ms: u64,
    /// Gap between the intro ending and the scene mount request.
    pub scene_mount_delay_ms: u64,
    /// Model rotation per rendered frame, in radians.
    pub rotation_rate_per_tick: f64,
    /// Camera depth the zoom settles on.
    pub zoom_target_z: f64,
    /// Zoom duration.
    pub zoom_duration_ms: u64,
    /// Zoom easing curve.
    pub zoom_easing: Easing,
    /// Vertical offset the overlay panel slides in from.
    pub panel_reveal_offset_y: f64,
    /// Panel reveal duration.
    pub panel_reveal_ms: u64,
    /// Panel reveal easing curve.
    pub panel_reveal_easing: Easing,
    /// Background track requested on start.
    pub track: TrackRef,
    /// Scene asset requested after the intro.
    pub scene: AssetRef,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            intro_mount_delay_ms: 300,
            caption_one_ms: 800,
            caption_two_ms: 2900,
            fade_ms: 4800,
            finish_ms: 5200,
            scene_mount_delay_ms: 200,
            rotation_rate_per_tick: -0.0025,
            zoom_target_z: 3.5,
            zoom_duration_ms: 5000,
            zoom_easing: Easing::Power2InOut,
            panel_reveal_offset_y: -18.0,
            panel_reveal_ms: 600,
            panel_reveal_easing: Easing::Power2Out,
            track: TrackRef::default(),
            scene: AssetRef::default(),
        }
    }
}

impl PacingConfig {
    /// Checks the cue ordering and the animation parameters.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the intro cue offsets are not
    /// strictly increasing, the intro plus the scene request delay does not
    /// fit in a `u64` of milliseconds, or an animation value is not finite.
    pub fn validate(&self) -> Result<(), DomainError> {
        let offsets = [
            ("caption_one_ms", self.caption_one_ms),
            ("caption_two_ms", self.caption_two_ms),
            ("fade_ms", self.fade_ms),
            ("finish_ms", self.finish_ms),
        ];
        for pair in offsets.windows(2) {
            let ((earlier_name, earlier), (later_name, later)) = (pair[0], pair[1]);
            if later <= earlier {
                return Err(DomainError::Validation(format!(
                    "{later_name} ({later}) must be greater than {earlier_name} ({earlier})"
                )));
            }
        }

        self.intro_mount_delay_ms
            .checked_add(self.finish_ms)
            .and_then(|end| end.checked_add(self.scene_mount_delay_ms))
            .ok_or_else(|| {
                DomainError::Validation(format!(
                    "intro_mount_delay_ms ({}) + finish_ms ({}) + scene_mount_delay_ms ({}) overflows",
                    self.intro_mount_delay_ms, self.finish_ms, self.scene_mount_delay_ms
                ))
            })?;

        let scalars = [
            ("rotation_rate_per_tick", self.rotation_rate_per_tick),
            ("zoom_target_z", self.zoom_target_z),
            ("panel_reveal_offset_y", self.panel_reveal_offset_y),
        ];
        if let Some((name, value)) = scalars.iter().find(|(_, value)| !value.is_finite()) {
            return Err(DomainError::Validation(format!(
                "{name} must be finite, got {value}"
            )));
        }

        if !(0.0..=1.0).contains(&self.track.volume) {
            return Err(DomainError::Validation(format!(
                "track volume must be within [0, 1], got {}",
                self.track.volume
            )));
        }
        Ok(())
    }

    /// Returns the intro batch as `(delay from start, cue)` entries.
    pub(crate) fn intro_cues(&self) -> [(Duration, Cue); 5] {
        let mount = Duration::from_millis(self.intro_mount_delay_ms);
        let after_mount = |ms: u64| mount.saturating_add(Duration::from_millis(ms));
        [
            (mount, Cue::MountIntro),
            (after_mount(self.caption_one_ms), Cue::FirstCaption),
            (after_mount(self.caption_two_ms), Cue::SecondCaption),
            (after_mount(self.fade_ms), Cue::BeginFade),
            (after_mount(self.finish_ms), Cue::FinishIntro),
        ]
    }

    /// Returns the delay between the intro ending and the scene request.
    #[must_use]
    pub fn scene_mount_delay(&self) -> Duration {
        Duration::from_millis(self.scene_mount_delay_ms)
    }

    /// Returns the zoom duration.
    #[must_use]
    pub fn zoom_duration(&self) -> Duration {
        Duration::from_millis(self.zoom_duration_ms)
    }

    /// Returns the panel reveal duration.
    #[must_use]
    pub fn panel_reveal_duration(&self) -> Duration {
        Duration::from_millis(self.panel_reveal_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(PacingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_intro_cues_are_offset_by_the_mount_delay() {
        let cues = PacingConfig::default().intro_cues();

        let delays: Vec<u128> = cues.iter().map(|(delay, _)| delay.as_millis()).collect();
        assert_eq!(delays, vec![300, 1100, 3200, 5100, 5500]);
        assert_eq!(cues[4].1, Cue::FinishIntro);
    }

    #[test]
    fn test_validate_rejects_out_of_order_cues() {
        // Arrange
        let config = PacingConfig {
            fade_ms: 2900,
            ..PacingConfig::default()
        };

        // Act
        let result = config.validate();

        // Assert
        match result {
            Err(DomainError::Validation(msg)) => assert!(msg.contains("fade_ms")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_non_finite_zoom_target() {
        let config = PacingConfig {
            zoom_target_z: f64::NAN,
            ..PacingConfig::default()
        };

        assert!(matches!(config.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_mount_delay_that_overflows_the_intro() {
        // Arrange
        let config = PacingConfig {
            intro_mount_delay_ms: u64::MAX,
            ..PacingConfig::default()
        };

        // Act
        let result = config.validate();

        // Assert
        match result {
            Err(DomainError::Validation(msg)) => assert!(msg.contains("intro_mount_delay_ms")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_scene_delay_that_overflows_the_intro() {
        let config = PacingConfig {
            scene_mount_delay_ms: u64::MAX - 100,
            ..PacingConfig::default()
        };

        assert!(matches!(config.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_track_volume_above_one() {
        let mut config = PacingConfig::default();
        config.track.volume = 1.5;

        match config.validate() {
            Err(DomainError::Validation(msg)) => assert!(msg.contains("volume")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_intro_cues_saturate_instead_of_wrapping() {
        // Arrange
        let config = PacingConfig {
            intro_mount_delay_ms: u64::MAX,
            ..PacingConfig::default()
        };

        // Act
        let cues = config.intro_cues();

        // Assert
        let delays: Vec<Duration> = cues.iter().map(|(delay, _)| *delay).collect();
        assert!(delays.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(delays[0], Duration::from_millis(u64::MAX));
    }

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        // Arrange
        let yaml = "caption_one_ms: 500\nzoom_easing: power2.out\ntrack:\n  src: /theme.ogg\n";

        // Act
        let config: PacingConfig = serde_yaml::from_str(yaml).unwrap();

        // Assert
        assert_eq!(config.caption_one_ms, 500);
        assert_eq!(config.caption_two_ms, 2900);
        assert_eq!(config.zoom_easing, Easing::Power2Out);
        assert_eq!(config.track.src, "/theme.ogg");
        assert!(config.track.looping);
        assert!(config.validate().is_ok());
    }
}
