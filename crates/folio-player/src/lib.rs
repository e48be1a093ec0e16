//! Folio player: runs a presentation session in the terminal.
//!
//! Wires the sequence controller to a tokio frame loop, filesystem-backed
//! collaborators, and line-oriented console input.

pub mod assets;
pub mod config;
pub mod console;
pub mod driver;
pub mod error;
