//! Backup Seed SDK - turn JSON table backups into SQL seed scripts
//!
//! Provides:
//! - Backup loading (one `<table>.json` array of objects per table)
//! - Declarative per-column normalization (renames, defaults, enum domains)
//! - SQL literal formatting and multi-row `INSERT` generation
//! - Combined and per-table transactional seed scripts
//! - A migration report of emitted, dropped and substituted values
//!
//! # Example
//!
//! ```rust,no_run
//! use backup_seed_sdk::{MigrationOptions, SeedMigrator, SeedSchema};
//!
//! let output = SeedMigrator::new(
//!     SeedSchema::standard(),
//!     MigrationOptions::new("supabase/backups/2025-10-26"),
//! )
//! .run()
//! .unwrap();
//! println!("{}", output.script.render());
//! ```

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod convert;
pub mod export;
pub mod import;
pub mod migration;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{ConfigError, SeedConfig};
pub use convert::{NormalizedRow, RowNormalizer, SchemaMapper};
pub use export::{ExportError, ExportResult, InsertStatementBuilder, SeedScript, TableSection};
pub use import::{BackupDataset, BackupLoader, ImportError};
pub use migration::{
    MigrationError, MigrationOptions, MigrationOutput, MigrationReport, SeedMigrator, TableReport,
};
pub use validation::{OrderValidationError, OrderValidator, RowValidationError};

// Re-export models
pub use models::{BackupRecord, BackupValue, ColumnRule, ColumnSpec, SeedSchema, TableSpec};
