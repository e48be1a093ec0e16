//! Folio: animation coordination.
//!
//! A continuous per-frame rotation, a one-shot eased camera zoom whose
//! completion is reported exactly once, and the overlay panel's entrance
//! reveal. Like the timer scheduler, everything is driven by explicit
//! session times so frames can be replayed in tests.

pub mod coordinator;
pub mod easing;
pub mod latch;
pub mod tween;

pub use coordinator::{
    AnimationCoordinator, FrameSample, INITIAL_CAMERA_Z, PANEL_START_OFFSET_Y, ZoomCompleted,
};
pub use easing::Easing;
pub use latch::CompletionLatch;
pub use tween::Tween;
