//! CLI-specific error types

use crate::config::ConfigError;
use crate::migration::MigrationError;
use std::path::PathBuf;
use thiserror::Error;

/// CLI-specific error type
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to write file {0}: {1}")]
    FileWriteError(PathBuf, String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("{0}")]
    MigrationError(#[from] MigrationError),

    #[error("Failed to serialize report: {0}")]
    ReportError(String),
}
