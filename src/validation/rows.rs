//! Row-level validation errors
//!
//! A row validation error rejects exactly one record. It never aborts the
//! table or the run; sibling records keep processing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reason a backup record was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum RowValidationError {
    /// A required column is missing, null or empty
    #[error("{table} row {row}: required column '{column}' is missing or empty")]
    MissingRequired {
        table: String,
        column: String,
        /// Zero-based index of the record in the backup file
        row: usize,
    },
}

impl RowValidationError {
    pub fn missing_required(table: impl Into<String>, column: impl Into<String>, row: usize) -> Self {
        RowValidationError::MissingRequired {
            table: table.into(),
            column: column.into(),
            row,
        }
    }

    /// Index of the rejected record.
    pub fn row(&self) -> usize {
        match self {
            RowValidationError::MissingRequired { row, .. } => *row,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_table_column_and_row() {
        let err = RowValidationError::missing_required("songs", "title", 3);
        assert_eq!(
            err.to_string(),
            "songs row 3: required column 'title' is missing or empty"
        );
        assert_eq!(err.row(), 3);
    }
}
