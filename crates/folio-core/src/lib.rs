//! Folio Core: shared abstractions.
//!
//! This crate defines the fundamental traits and types that the timing,
//! animation, overlay, and sequencing crates depend on. It contains no
//! runtime or I/O code.

pub mod aggregate;
pub mod collaborators;
pub mod command;
pub mod error;
pub mod event;
pub mod time;
