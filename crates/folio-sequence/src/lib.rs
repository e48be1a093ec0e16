//! Folio: staged presentation sequence.
//!
//! Owns the presentation phase machine: landing, scripted intro, model
//! reveal, camera zoom, and the portfolio overlay. Timer cues and animation
//! completions are validated against the current phase before they are
//! applied, and every applied change is journaled as a domain event.

pub mod application;
pub mod domain;
