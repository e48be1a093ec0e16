//! Application layer: command dispatch and read-only views.

pub mod command_handlers;
pub mod query_handlers;
