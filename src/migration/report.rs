//! Migration report
//!
//! A tabular summary of what happened to every table: records read, rows
//! emitted, rows dropped (with reasons) and values substituted. This is the
//! structure handed to downstream document generators and printed by the CLI.

use crate::convert::normalizer::NormalizedRow;
use crate::export::SectionKind;
use crate::validation::{DanglingReference, RowValidationError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Per-table outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableReport {
    pub table: String,
    pub source: PathBuf,
    pub outcome: SectionKind,
    pub records_read: usize,
    pub rows_emitted: usize,
    pub rows_dropped: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejections: Vec<RowValidationError>,
    /// Substitution count per column
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub substitutions: BTreeMap<String, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file: Option<PathBuf>,
}

impl TableReport {
    /// Report for a table whose backup was missing or empty.
    pub fn without_records(table: &str, source: PathBuf, outcome: SectionKind) -> Self {
        Self {
            table: table.to_string(),
            source,
            outcome,
            records_read: 0,
            rows_emitted: 0,
            rows_dropped: 0,
            rejections: Vec::new(),
            substitutions: BTreeMap::new(),
            output_file: None,
        }
    }

    /// Report for a table whose records were normalized.
    pub fn from_rows(
        table: &str,
        source: PathBuf,
        outcome: SectionKind,
        records_read: usize,
        rows: &[NormalizedRow],
        rejections: Vec<RowValidationError>,
    ) -> Self {
        let mut substitutions = BTreeMap::new();
        for s in rows.iter().flat_map(|r| &r.substitutions) {
            *substitutions.entry(s.column.clone()).or_insert(0) += 1;
        }
        Self {
            table: table.to_string(),
            source,
            outcome,
            records_read,
            rows_emitted: rows.len(),
            rows_dropped: rejections.len(),
            rejections,
            substitutions,
            output_file: None,
        }
    }

    pub fn substitution_count(&self) -> usize {
        self.substitutions.values().sum()
    }
}

/// Summary of a whole run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[must_use = "the migration report records dropped rows and should be surfaced"]
pub struct MigrationReport {
    pub generated_at: DateTime<Utc>,
    pub backup_dir: PathBuf,
    pub target_schema: String,
    pub tables: Vec<TableReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dangling_references: Vec<DanglingReference>,
}

impl MigrationReport {
    pub fn new(backup_dir: PathBuf, target_schema: impl Into<String>) -> Self {
        Self {
            generated_at: Utc::now(),
            backup_dir,
            target_schema: target_schema.into(),
            tables: Vec::new(),
            dangling_references: Vec::new(),
        }
    }

    pub fn table(&self, name: &str) -> Option<&TableReport> {
        self.tables.iter().find(|t| t.table == name)
    }

    pub fn total_emitted(&self) -> usize {
        self.tables.iter().map(|t| t.rows_emitted).sum()
    }

    pub fn total_dropped(&self) -> usize {
        self.tables.iter().map(|t| t.rows_dropped).sum()
    }

    /// Tables that produced no `INSERT` statement.
    pub fn skipped_tables(&self) -> Vec<&str> {
        self.tables
            .iter()
            .filter(|t| !t.outcome.has_statement())
            .map(|t| t.table.as_str())
            .collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::normalizer::{Substitution, SubstitutionKind};

    fn row_with(columns: &[&str]) -> NormalizedRow {
        NormalizedRow {
            source_index: 0,
            values: Vec::new(),
            substitutions: columns
                .iter()
                .map(|c| Substitution {
                    column: c.to_string(),
                    kind: SubstitutionKind::Defaulted,
                    original: None,
                    replacement: "x".to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn counts_substitutions_per_column() {
        let rows = vec![row_with(&["level", "key"]), row_with(&["level"])];
        let report = TableReport::from_rows(
            "songs",
            PathBuf::from("songs.json"),
            SectionKind::Inserted { rows: 2, skipped: 1 },
            3,
            &rows,
            vec![RowValidationError::missing_required("songs", "title", 1)],
        );
        assert_eq!(report.substitutions.get("level"), Some(&2));
        assert_eq!(report.substitution_count(), 3);
        assert_eq!(report.rows_emitted, 2);
        assert_eq!(report.rows_dropped, 1);
        assert_eq!(report.records_read, report.rows_emitted + report.rows_dropped);
    }

    #[test]
    fn totals_and_skipped_tables() {
        let mut report = MigrationReport::new(PathBuf::from("b"), "public");
        report.tables.push(TableReport::without_records(
            "lessons",
            PathBuf::from("b/lessons.json"),
            SectionKind::EmptyDataset,
        ));
        report.tables.push(TableReport::from_rows(
            "songs",
            PathBuf::from("b/songs.json"),
            SectionKind::Inserted { rows: 1, skipped: 0 },
            1,
            &[row_with(&[])],
            Vec::new(),
        ));
        assert_eq!(report.total_emitted(), 1);
        assert_eq!(report.total_dropped(), 0);
        assert_eq!(report.skipped_tables(), vec!["lessons"]);

        let json = report.to_json().unwrap();
        assert!(json.contains("\"kind\": \"empty_dataset\""));
        assert!(json.contains("\"kind\": \"inserted\""));
    }
}
