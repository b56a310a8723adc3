//! Command-line interface support
//!
//! Argument types and handlers used by the `backup-seed-cli` binary.

pub mod commands;
pub mod error;

pub use error::CliError;
