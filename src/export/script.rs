//! Seed script assembly
//!
//! A [`SeedScript`] holds one [`TableSection`] per processed table and renders
//! either the combined script (one transaction, constraint dropped once at the
//! top and re-added once at the bottom) or a self-contained script for a
//! single table.

use super::insert::RULE_LINE;
use crate::models::ConstraintToggle;
use serde::Serialize;
use std::path::Path;

/// Default title written in the combined script header
pub const DEFAULT_TITLE: &str = "Guitar CRM Database Seed Data";

/// What a table section contains.
///
/// Serialize-only: internally tagged enums cannot be read back when
/// `serde_json` keeps arbitrary-precision numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionKind {
    /// An `INSERT` statement was emitted
    Inserted { rows: usize, skipped: usize },
    /// The backup file does not exist
    MissingFile,
    /// The backup file holds no records
    EmptyDataset,
    /// Every record was rejected
    NoValidRows { skipped: usize },
}

impl SectionKind {
    pub fn has_statement(&self) -> bool {
        matches!(self, SectionKind::Inserted { .. })
    }
}

/// Rendered output for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSection {
    pub table: String,
    pub kind: SectionKind,
    pub body: String,
}

impl TableSection {
    /// Section around an emitted `INSERT` statement.
    pub fn inserted(table: &str, statement: String, rows: usize, skipped: usize) -> Self {
        let mut body = statement;
        body.push('\n');
        if skipped > 0 {
            body.push_str(&format!(
                "\n-- ⚠️  Skipped {} invalid rows in {}",
                skipped, table
            ));
        }
        body.push_str(&format!("\n-- ✅ {} import complete", table));
        Self {
            table: table.to_string(),
            kind: SectionKind::Inserted { rows, skipped },
            body,
        }
    }

    pub fn missing_file(table: &str, path: &Path) -> Self {
        Self {
            table: table.to_string(),
            kind: SectionKind::MissingFile,
            body: format!("-- ⚠️  File not found: {}", path.display()),
        }
    }

    pub fn empty_dataset(table: &str) -> Self {
        Self {
            table: table.to_string(),
            kind: SectionKind::EmptyDataset,
            body: format!("-- ⚠️  {}: No data to import", table),
        }
    }

    pub fn no_valid_rows(table: &str, skipped: usize) -> Self {
        Self {
            table: table.to_string(),
            kind: SectionKind::NoValidRows { skipped },
            body: format!(
                "-- ⚠️  {}: No valid rows to import ({} invalid rows skipped)",
                table, skipped
            ),
        }
    }
}

/// The assembled seed script.
#[derive(Debug, Clone)]
pub struct SeedScript {
    pub title: String,
    pub target_schema: String,
    pub constraint_toggle: ConstraintToggle,
    pub sections: Vec<TableSection>,
}

impl SeedScript {
    pub fn new(
        title: impl Into<String>,
        target_schema: impl Into<String>,
        constraint_toggle: ConstraintToggle,
    ) -> Self {
        Self {
            title: title.into(),
            target_schema: target_schema.into(),
            constraint_toggle,
            sections: Vec::new(),
        }
    }

    pub fn push(&mut self, section: TableSection) {
        self.sections.push(section);
    }

    pub fn section(&self, table: &str) -> Option<&TableSection> {
        self.sections.iter().find(|s| s.table == table)
    }

    fn drop_block(&self) -> String {
        format!(
            "-- Temporarily disable foreign key constraint on {}\n{}",
            self.constraint_toggle.table,
            self.constraint_toggle.drop_sql(&self.target_schema)
        )
    }

    fn add_block(&self) -> String {
        format!(
            "-- Re-add foreign key constraint on {}\n{}",
            self.constraint_toggle.table,
            self.constraint_toggle.add_sql(&self.target_schema)
        )
    }

    /// Render the combined script for all sections.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(RULE_LINE);
        out.push_str(&format!("\n-- {}\n", self.title));
        out.push_str("-- Generated from JSON backups\n");
        out.push_str("-- Run in Supabase Dashboard → SQL Editor\n");
        out.push_str(RULE_LINE);
        out.push_str("\n\n-- Start transaction\nBEGIN;\n\n");
        out.push_str(&self.drop_block());
        out.push_str("\n\n");
        for section in &self.sections {
            out.push_str(&section.body);
            out.push_str("\n\n");
        }
        out.push_str(&self.add_block());
        out.push_str("\n\n-- Commit transaction\nCOMMIT;\n\n");
        out.push_str("-- ✅ All data imported successfully!\n");
        out.push_str("-- Verify in Supabase Dashboard → Table Editor\n");
        out
    }

    /// Render a self-contained script for one section.
    ///
    /// Only the section of the toggled table repeats the constraint drop and re-add.
    pub fn render_table(&self, section: &TableSection) -> String {
        let toggled = section.table == self.constraint_toggle.table;
        let mut out = format!("-- Seed for table: {}\nBEGIN;\n\n", section.table);
        if toggled {
            out.push_str(&self.drop_block());
            out.push_str("\n\n");
        }
        out.push_str(&section.body);
        out.push('\n');
        if toggled {
            out.push('\n');
            out.push_str(&self.add_block());
            out.push('\n');
        }
        out.push_str("\nCOMMIT;\n");
        out
    }
}
