//! Tooling
//!
//! Command-line front end. Loads configuration, reads METS files from disk and
//! renders the normalized result.

pub mod cli;

pub use cli::{CheckReport, Cli, CliContext, CommandOutput, Commands};
