//! Import functionality
//!
//! Reads JSON table backups (one file per table, top level an array of
//! objects) into [`BackupRecord`](crate::models::BackupRecord)s.

pub mod backup;

/// Error during import
///
/// All import errors are fatal for the run: a backup file that exists but
/// cannot be read or parsed aborts the migration.
#[derive(Debug, thiserror::Error, serde::Serialize, serde::Deserialize)]
pub enum ImportError {
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Unexpected backup shape: {0}")]
    UnexpectedShape(String),
    #[error("IO error: {0}")]
    IoError(String),
}

pub use backup::{BackupDataset, BackupLoader};
