//! Crucible CLI library.
//!
//! Command handlers, terminal styling and output formatting for the
//! `crucible` binary.

pub mod commands;
pub mod output;
pub mod terminal;
