//! Domain model for the presentation sequence.

pub mod aggregates;
pub mod commands;
pub mod config;
pub mod events;
pub mod phase;
