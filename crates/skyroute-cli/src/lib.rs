//! SkyRoute CLI library.
//!
//! Subcommand handlers and output formatting for the `skyroute-cli` binary.

pub mod commands;
pub mod output;
