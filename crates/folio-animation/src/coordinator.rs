//! Drives the per-frame animation state of a presentation session.

use std::time::Duration;

use folio_core::time::SessionTime;
use serde::Serialize;
use tracing::debug;

use crate::easing::Easing;
use crate::latch::CompletionLatch;
use crate::tween::Tween;

/// Camera depth the scene is first mounted at.
pub const INITIAL_CAMERA_Z: f64 = 12.0;

/// Vertical offset the overlay panel slides in from.
pub const PANEL_START_OFFSET_Y: f64 = -18.0;

/// Signal produced by the frame on which the zoom reached its target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoomCompleted {
    /// Session time of the completing frame.
    pub at: SessionTime,
    /// The camera depth the tween settled on.
    pub camera_z: f64,
}

/// Animated values after one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameSample {
    /// Frame counter since the coordinator was created.
    pub frame: u64,
    /// Model rotation about the vertical axis, in radians.
    pub rotation_y: f64,
    /// Camera depth.
    pub camera_z: f64,
    /// Overlay panel vertical offset.
    pub panel_offset_y: f64,
    /// Overlay panel opacity.
    pub panel_opacity: f64,
    /// Present only on the frame that completed the zoom.
    pub zoom_completed: Option<ZoomCompleted>,
}

#[derive(Debug)]
struct ZoomTween {
    tween: Tween,
    latch: CompletionLatch,
}

#[derive(Debug)]
struct PanelReveal {
    offset: Tween,
    opacity: Tween,
}

/// Owns the rotation loop, the camera zoom, and the panel reveal.
///
/// The zoom may be started once per coordinator; later requests are
/// rejected. [`stop`](Self::stop) halts the rotation and suppresses a
/// pending zoom completion.
#[derive(Debug)]
pub struct AnimationCoordinator {
    frame: u64,
    rotation_y: f64,
    rotation_rate: Option<f64>,
    camera_z: f64,
    zoom: Option<ZoomTween>,
    zoom_started: bool,
    panel_offset_y: f64,
    panel_opacity: f64,
    panel: Option<PanelReveal>,
}

impl Default for AnimationCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationCoordinator {
    /// Creates an idle coordinator with the camera at its initial depth.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frame: 0,
            rotation_y: 0.0,
            rotation_rate: None,
            camera_z: INITIAL_CAMERA_Z,
            zoom: None,
            zoom_started: false,
            panel_offset_y: PANEL_START_OFFSET_Y,
            panel_opacity: 0.0,
            panel: None,
        }
    }

    /// Starts (or restarts) the perpetual rotation, adding `rate_per_tick`
    /// radians every frame.
    pub fn start_continuous_rotation(&mut self, rate_per_tick: f64) {
        debug!(rate_per_tick, "starting continuous rotation");
        self.rotation_rate = Some(rate_per_tick);
    }

    /// Starts the one-shot camera zoom from the current depth to
    /// `final_value`. Returns `false` without effect if a zoom was already
    /// started.
    pub fn start_zoom_tween(
        &mut self,
        now: SessionTime,
        final_value: f64,
        duration: Duration,
        easing: Easing,
    ) -> bool {
        if self.zoom_started {
            debug!("zoom already started this session; ignoring");
            return false;
        }
        debug!(from = self.camera_z, to = final_value, ?duration, %easing, "starting zoom tween");
        self.zoom_started = true;
        self.zoom = Some(ZoomTween {
            tween: Tween::new(self.camera_z, final_value, now, duration, easing),
            latch: CompletionLatch::default(),
        });
        true
    }

    /// Restarts the overlay panel's entrance reveal: it slides from
    /// `offset_y` to rest while fading in.
    pub fn start_panel_reveal(
        &mut self,
        now: SessionTime,
        offset_y: f64,
        duration: Duration,
        easing: Easing,
    ) {
        self.panel_offset_y = offset_y;
        self.panel_opacity = 0.0;
        self.panel = Some(PanelReveal {
            offset: Tween::new(offset_y, 0.0, now, duration, easing),
            opacity: Tween::new(0.0, 1.0, now, duration, easing),
        });
    }

    /// Advances one frame at `now`.
    pub fn tick(&mut self, now: SessionTime) -> FrameSample {
        self.frame += 1;

        if let Some(rate) = self.rotation_rate {
            self.rotation_y += rate;
        }

        let mut zoom_completed = None;
        if let Some(zoom) = self.zoom.as_mut() {
            self.camera_z = zoom.tween.sample(now);
            if zoom.tween.is_finished(now) {
                if zoom.latch.fire() {
                    zoom_completed = Some(ZoomCompleted {
                        at: now,
                        camera_z: self.camera_z,
                    });
                }
                self.zoom = None;
            }
        }

        if let Some(panel) = self.panel.as_ref() {
            self.panel_offset_y = panel.offset.sample(now);
            self.panel_opacity = panel.opacity.sample(now);
            if panel.offset.is_finished(now) {
                self.panel = None;
            }
        }

        FrameSample {
            frame: self.frame,
            rotation_y: self.rotation_y,
            camera_z: self.camera_z,
            panel_offset_y: self.panel_offset_y,
            panel_opacity: self.panel_opacity,
            zoom_completed,
        }
    }

    /// Settles an in-flight zoom at `now`: the camera snaps to the target and
    /// the latch fires, so no later frame reports completion again. Returns
    /// the completion signal, or `None` if no zoom was in flight.
    pub fn finish_zoom(&mut self, now: SessionTime) -> Option<ZoomCompleted> {
        let mut zoom = self.zoom.take()?;
        self.camera_z = zoom.tween.target();
        if !zoom.latch.fire() {
            return None;
        }
        debug!(camera_z = self.camera_z, %now, "zoom settled ahead of its tween");
        Some(ZoomCompleted {
            at: now,
            camera_z: self.camera_z,
        })
    }

    /// Halts the rotation and every in-flight tween. A zoom that has not
    /// completed yet will never report completion.
    pub fn stop(&mut self) {
        if let Some(mut zoom) = self.zoom.take() {
            zoom.latch.disarm();
            debug!(camera_z = self.camera_z, "zoom interrupted before completion");
        }
        self.rotation_rate = None;
        self.panel = None;
    }

    /// Returns whether the rotation loop is running.
    #[must_use]
    pub fn is_rotating(&self) -> bool {
        self.rotation_rate.is_some()
    }

    /// Returns whether a zoom is in flight.
    #[must_use]
    pub fn zoom_in_flight(&self) -> bool {
        self.zoom.is_some()
    }

    /// Returns the current model rotation.
    #[must_use]
    pub fn rotation_y(&self) -> f64 {
        self.rotation_y
    }

    /// Returns the current camera depth.
    #[must_use]
    pub fn camera_z(&self) -> f64 {
        self.camera_z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZOOM: Duration = Duration::from_secs(5);

    fn run_frames(
        coordinator: &mut AnimationCoordinator,
        from_ms: u64,
        to_ms: u64,
        step_ms: u64,
    ) -> Vec<FrameSample> {
        (from_ms..=to_ms)
            .step_by(usize::try_from(step_ms).unwrap())
            .map(|ms| coordinator.tick(SessionTime::from_millis(ms)))
            .collect()
    }

    #[test]
    fn test_rotation_advances_by_rate_every_tick() {
        // Arrange
        let mut coordinator = AnimationCoordinator::new();
        coordinator.start_continuous_rotation(-0.0025);

        // Act
        let samples = run_frames(&mut coordinator, 0, 90, 10);

        // Assert
        assert_eq!(samples.len(), 10);
        assert!((coordinator.rotation_y() + 0.025).abs() < 1e-12);
    }

    #[test]
    fn test_rotation_never_completes_on_its_own() {
        let mut coordinator = AnimationCoordinator::new();
        coordinator.start_continuous_rotation(0.01);

        let samples = run_frames(&mut coordinator, 0, 60_000, 1000);

        assert!(coordinator.is_rotating());
        assert!(samples.iter().all(|s| s.zoom_completed.is_none()));
    }

    #[test]
    fn test_rotation_is_restartable_after_stop() {
        // Arrange
        let mut coordinator = AnimationCoordinator::new();
        coordinator.start_continuous_rotation(0.5);
        coordinator.tick(SessionTime::ZERO);
        coordinator.stop();
        coordinator.tick(SessionTime::from_millis(16));
        let frozen = coordinator.rotation_y();

        // Act
        coordinator.start_continuous_rotation(0.5);
        coordinator.tick(SessionTime::from_millis(32));

        // Assert
        assert!((frozen - 0.5).abs() < f64::EPSILON);
        assert!((coordinator.rotation_y() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_reports_completion_exactly_once_with_final_value() {
        // Arrange
        let mut coordinator = AnimationCoordinator::new();
        assert!(coordinator.start_zoom_tween(SessionTime::ZERO, 3.5, ZOOM, Easing::Power2InOut));

        // Act
        let samples = run_frames(&mut coordinator, 0, 8000, 16);

        // Assert
        let completions: Vec<_> = samples.iter().filter_map(|s| s.zoom_completed).collect();
        assert_eq!(completions.len(), 1);
        assert!((completions[0].camera_z - 3.5).abs() < f64::EPSILON);
        assert!(completions[0].at >= SessionTime::from_millis(5000));
        assert!(!coordinator.zoom_in_flight());
    }

    #[test]
    fn test_completion_frame_already_shows_final_value() {
        let mut coordinator = AnimationCoordinator::new();
        coordinator.start_zoom_tween(SessionTime::ZERO, 3.5, ZOOM, Easing::Power2InOut);

        let before = coordinator.tick(SessionTime::from_millis(4999));
        let last = coordinator.tick(SessionTime::from_millis(5000));

        assert!(before.zoom_completed.is_none());
        assert!(before.camera_z > 3.5);
        assert!((last.camera_z - 3.5).abs() < f64::EPSILON);
        assert!(last.zoom_completed.is_some());
    }

    #[test]
    fn test_second_zoom_request_is_rejected() {
        // Arrange
        let mut coordinator = AnimationCoordinator::new();
        coordinator.start_zoom_tween(SessionTime::ZERO, 3.5, ZOOM, Easing::Power2InOut);

        // Act
        let accepted = coordinator.start_zoom_tween(
            SessionTime::from_millis(100),
            1.0,
            Duration::from_millis(10),
            Easing::Linear,
        );
        let last = coordinator.tick(SessionTime::from_millis(5000));

        // Assert
        assert!(!accepted);
        assert!((last.camera_z - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stop_mid_zoom_suppresses_completion() {
        // Arrange
        let mut coordinator = AnimationCoordinator::new();
        coordinator.start_continuous_rotation(-0.0025);
        coordinator.start_zoom_tween(SessionTime::ZERO, 3.5, ZOOM, Easing::Power2InOut);
        coordinator.tick(SessionTime::from_millis(2500));

        // Act
        coordinator.stop();
        let samples = run_frames(&mut coordinator, 2516, 10_000, 16);

        // Assert
        assert!(samples.iter().all(|s| s.zoom_completed.is_none()));
        assert!(!coordinator.is_rotating());
        assert!(!coordinator.start_zoom_tween(
            SessionTime::from_millis(10_000),
            3.5,
            ZOOM,
            Easing::Power2InOut,
        ));
    }

    #[test]
    fn test_finish_zoom_snaps_camera_to_target_and_fires_once() {
        // Arrange
        let mut coordinator = AnimationCoordinator::new();
        coordinator.start_zoom_tween(SessionTime::ZERO, 3.5, ZOOM, Easing::Power2InOut);
        coordinator.tick(SessionTime::from_millis(16));

        // Act
        let settled = coordinator.finish_zoom(SessionTime::from_millis(20));
        let again = coordinator.finish_zoom(SessionTime::from_millis(30));
        let samples = run_frames(&mut coordinator, 32, 8000, 16);

        // Assert
        let settled = settled.unwrap();
        assert_eq!(settled.at, SessionTime::from_millis(20));
        assert!((settled.camera_z - 3.5).abs() < f64::EPSILON);
        assert!(again.is_none());
        assert!(!coordinator.zoom_in_flight());
        assert!((samples[0].camera_z - 3.5).abs() < f64::EPSILON);
        assert!(samples.iter().all(|s| s.zoom_completed.is_none()));
    }

    #[test]
    fn test_finish_zoom_after_stop_reports_nothing() {
        let mut coordinator = AnimationCoordinator::new();
        coordinator.start_zoom_tween(SessionTime::ZERO, 3.5, ZOOM, Easing::Power2InOut);
        coordinator.stop();

        assert!(coordinator.finish_zoom(SessionTime::from_millis(100)).is_none());
        assert!((coordinator.camera_z() - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_panel_reveal_settles_at_rest_and_restarts_on_demand() {
        // Arrange
        let mut coordinator = AnimationCoordinator::new();
        let reveal = Duration::from_millis(600);
        coordinator.start_panel_reveal(SessionTime::ZERO, -18.0, reveal, Easing::Power2Out);

        // Act
        let midway = coordinator.tick(SessionTime::from_millis(300));
        let settled = coordinator.tick(SessionTime::from_millis(600));
        coordinator.start_panel_reveal(
            SessionTime::from_millis(1000),
            -18.0,
            reveal,
            Easing::Power2Out,
        );
        let restarted = coordinator.tick(SessionTime::from_millis(1000));

        // Assert
        assert!(midway.panel_offset_y > -18.0 && midway.panel_offset_y < 0.0);
        assert!(midway.panel_opacity > 0.0 && midway.panel_opacity < 1.0);
        assert!(settled.panel_offset_y.abs() < f64::EPSILON);
        assert!((settled.panel_opacity - 1.0).abs() < f64::EPSILON);
        assert!((restarted.panel_offset_y + 18.0).abs() < f64::EPSILON);
        assert!(restarted.panel_opacity.abs() < f64::EPSILON);
    }
}
