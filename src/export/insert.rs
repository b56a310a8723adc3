//! Multi-row `INSERT` statement builder.
//!
//! Column names are emitted unquoted. PostgreSQL folds unquoted identifiers
//! to lower case, which is what the canonical column names already are; a
//! target engine with different identifier folding is not supported.

use super::{ExportError, ExportResult};
use crate::convert::normalizer::NormalizedRow;
use crate::models::{SeedSchema, TableSpec};

/// Separator line used in generated section headers
pub const RULE_LINE: &str = "-- ============================================";

/// Builds one `INSERT ... VALUES` statement per table.
pub struct InsertStatementBuilder<'a> {
    schema: &'a SeedSchema,
}

impl<'a> InsertStatementBuilder<'a> {
    pub fn new(schema: &'a SeedSchema) -> Self {
        Self { schema }
    }

    /// Build the statement for a table's surviving rows.
    ///
    /// Rows are emitted in the given order; every row but the last ends with
    /// `,` and the last ends with `;`.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::ValidationError` for an empty row set (callers
    /// emit a warning comment instead) or for a row whose width does not match
    /// the table's column list.
    pub fn build(&self, table: &TableSpec, rows: &[NormalizedRow]) -> Result<ExportResult, ExportError> {
        if rows.is_empty() {
            return Err(ExportError::ValidationError(format!(
                "{}: no rows to insert",
                table.name
            )));
        }

        let width = table.columns.len();
        if let Some(bad) = rows.iter().find(|r| r.values.len() != width) {
            return Err(ExportError::ValidationError(format!(
                "{}: row {} has {} values, expected {}",
                table.name,
                bad.source_index,
                bad.values.len(),
                width
            )));
        }

        let mut lines = Vec::with_capacity(rows.len() + 5);
        lines.push(RULE_LINE.to_string());
        lines.push(format!("-- Inserting {} rows into {}", rows.len(), table.name));
        lines.push(RULE_LINE.to_string());
        lines.push(format!(
            "INSERT INTO {} ({})",
            self.schema.qualified(table.name),
            table.column_names().join(", ")
        ));
        lines.push("VALUES".to_string());

        let last = rows.len() - 1;
        for (i, row) in rows.iter().enumerate() {
            let terminator = if i == last { ';' } else { ',' };
            lines.push(format!("{}{}", row.to_tuple(), terminator));
        }

        Ok(ExportResult {
            content: lines.join("\n"),
            format: "sql".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(index: usize, values: &[&str]) -> NormalizedRow {
        NormalizedRow {
            source_index: index,
            values: values.iter().map(|v| v.to_string()).collect(),
            substitutions: Vec::new(),
        }
    }

    #[test]
    fn builds_multi_row_insert() {
        let schema = SeedSchema::standard();
        let lessons = schema.table("lessons").unwrap();
        let rows = vec![
            row(0, &["'s1'", "'t1'", "NULL", "'scheduled'", "NULL", "NULL"]),
            row(1, &["'s2'", "'t1'", "NULL", "'completed'", "NULL", "NULL"]),
        ];

        let result = InsertStatementBuilder::new(&schema).build(lessons, &rows).unwrap();
        assert_eq!(result.format, "sql");
        assert_eq!(
            result.content,
            "-- ============================================\n\
             -- Inserting 2 rows into lessons\n\
             -- ============================================\n\
             INSERT INTO public.lessons (student_id, teacher_id, date, status, created_at, updated_at)\n\
             VALUES\n\
             ('s1', 't1', NULL, 'scheduled', NULL, NULL),\n\
             ('s2', 't1', NULL, 'completed', NULL, NULL);"
        );
    }

    #[test]
    fn single_row_ends_with_semicolon() {
        let schema = SeedSchema::standard();
        let lessons = schema.table("lessons").unwrap();
        let rows = vec![row(4, &["NULL", "NULL", "NULL", "'scheduled'", "NULL", "NULL"])];
        let content = InsertStatementBuilder::new(&schema)
            .build(lessons, &rows)
            .unwrap()
            .content;
        assert!(content.ends_with("(NULL, NULL, NULL, 'scheduled', NULL, NULL);"));
        assert_eq!(content.matches("INSERT INTO").count(), 1);
    }

    #[test]
    fn empty_rows_are_rejected() {
        let schema = SeedSchema::standard();
        let songs = schema.table("songs").unwrap();
        assert!(InsertStatementBuilder::new(&schema).build(songs, &[]).is_err());
    }

    #[test]
    fn width_mismatch_is_rejected() {
        let schema = SeedSchema::standard();
        let lessons = schema.table("lessons").unwrap();
        let err = InsertStatementBuilder::new(&schema)
            .build(lessons, &[row(2, &["NULL"])])
            .unwrap_err();
        assert!(err.to_string().contains("row 2 has 1 values"));
    }

    #[test]
    fn uses_target_schema() {
        let schema = SeedSchema::standard().with_target_schema("staging");
        let lessons = schema.table("lessons").unwrap();
        let rows = vec![row(0, &["NULL", "NULL", "NULL", "'scheduled'", "NULL", "NULL"])];
        let content = InsertStatementBuilder::new(&schema)
            .build(lessons, &rows)
            .unwrap()
            .content;
        assert!(content.contains("INSERT INTO staging.lessons ("));
    }
}
