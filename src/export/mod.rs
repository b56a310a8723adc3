//! Export functionality
//!
//! Renders normalized rows as SQL:
//! - Literals for individual values
//! - Multi-row `INSERT` statements per table
//! - Combined and per-table seed scripts

pub mod insert;
pub mod literal;
pub mod script;

/// Result of an export operation.
///
/// Contains the exported content and format identifier.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[must_use = "export results contain the exported content and should be used"]
pub struct ExportResult {
    /// Exported content
    pub content: String,
    /// Format identifier
    pub format: String,
}

/// Error during export
#[derive(Debug, thiserror::Error, serde::Serialize, serde::Deserialize)]
pub enum ExportError {
    #[error("Validation error: {0}")]
    ValidationError(String),
}

// Re-export for convenience
pub use insert::InsertStatementBuilder;
pub use literal::{format_value, to_sql_literal};
pub use script::{SectionKind, SeedScript, TableSection};
