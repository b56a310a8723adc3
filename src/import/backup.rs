//! JSON backup loader.

use super::ImportError;
use crate::models::{BackupRecord, TableSpec};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Contents of one table's backup file.
#[derive(Debug, Clone, PartialEq)]
pub enum BackupDataset {
    /// The file does not exist
    Missing { path: PathBuf },
    /// The file exists but holds no records
    Empty { path: PathBuf },
    /// Records in file order
    Records {
        path: PathBuf,
        records: Vec<BackupRecord>,
    },
}

impl BackupDataset {
    pub fn path(&self) -> &Path {
        match self {
            BackupDataset::Missing { path }
            | BackupDataset::Empty { path }
            | BackupDataset::Records { path, .. } => path,
        }
    }

    /// Number of records read (zero for missing or empty files).
    pub fn len(&self) -> usize {
        match self {
            BackupDataset::Records { records, .. } => records.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Loads `<table>.json` files from a backup directory.
#[derive(Debug, Clone)]
pub struct BackupLoader {
    backup_dir: PathBuf,
}

impl BackupLoader {
    pub fn new(backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            backup_dir: backup_dir.into(),
        }
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Path of a table's backup file.
    pub fn path_for(&self, table: &TableSpec) -> PathBuf {
        self.backup_dir.join(table.backup_file_name())
    }

    /// Load a table's backup.
    ///
    /// A missing file or an empty array is not an error; the caller emits a
    /// warning section and moves on. Unreadable or malformed files are fatal.
    pub fn load(&self, table: &TableSpec) -> Result<BackupDataset, ImportError> {
        let path = self.path_for(table);
        if !path.exists() {
            warn!(table = table.name, path = %path.display(), "backup file not found");
            return Ok(BackupDataset::Missing { path });
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| ImportError::IoError(format!("{}: {}", path.display(), e)))?;
        let records = Self::parse(&content, &path)?;

        if records.is_empty() {
            warn!(table = table.name, path = %path.display(), "backup file has no records");
            return Ok(BackupDataset::Empty { path });
        }

        info!(table = table.name, records = records.len(), "loaded backup");
        Ok(BackupDataset::Records { path, records })
    }

    /// Parse backup file content: a JSON array of objects.
    pub fn parse(content: &str, path: &Path) -> Result<Vec<BackupRecord>, ImportError> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| ImportError::ParseError(format!("{}: {}", path.display(), e)))?;

        let Value::Array(items) = value else {
            return Err(ImportError::UnexpectedShape(format!(
                "{}: top level must be an array of records",
                path.display()
            )));
        };

        items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                BackupRecord::try_from(item).map_err(|other| {
                    ImportError::UnexpectedShape(format!(
                        "{}: record {} is not an object (found {})",
                        path.display(),
                        i,
                        json_kind(&other)
                    ))
                })
            })
            .collect()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
