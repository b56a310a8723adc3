//! Migration orchestration
//!
//! Drives every table of a [`SeedSchema`] through load, normalize and render,
//! strictly one table at a time and in the schema's fixed order. Produces the
//! combined [`SeedScript`], writes one self-contained script per table, and
//! returns a [`MigrationReport`].

pub mod report;

use crate::config::SeedConfig;
use crate::convert::normalizer::RowNormalizer;
use crate::export::script::DEFAULT_TITLE;
use crate::export::{ExportError, InsertStatementBuilder, SeedScript, TableSection};
use crate::import::{BackupDataset, BackupLoader, ImportError};
use crate::models::{SeedSchema, TableSpec};
use crate::validation::{OrderValidationError, OrderValidator, PROFILE_REFERENCES, ReferenceChecker};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub use report::{MigrationReport, TableReport};

/// Error type for migration runs. Every variant aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Backup directory not found: {0}")]
    BackupDirNotFound(PathBuf),

    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Invalid table order: {0}")]
    InvalidOrder(#[from] OrderValidationError),

    #[error("Failed to write {0}: {1}")]
    OutputWrite(PathBuf, String),
}

pub type MigrationResult<T> = Result<T, MigrationError>;

/// Where to read from and write to.
#[derive(Debug, Clone)]
pub struct MigrationOptions {
    pub backup_dir: PathBuf,
    /// Directory for `seed_<table>.sql` files; `None` disables them
    pub output_dir: Option<PathBuf>,
    pub title: String,
}

impl MigrationOptions {
    pub fn new(backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            backup_dir: backup_dir.into(),
            output_dir: None,
            title: DEFAULT_TITLE.to_string(),
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }
}

impl From<&SeedConfig> for MigrationOptions {
    fn from(config: &SeedConfig) -> Self {
        Self {
            backup_dir: config.paths.backup_dir.clone(),
            output_dir: config
                .output
                .write_table_files
                .then(|| config.paths.output_dir.clone()),
            title: config.output.title.clone(),
        }
    }
}

/// Result of a successful run.
#[derive(Debug)]
pub struct MigrationOutput {
    pub script: SeedScript,
    pub report: MigrationReport,
}

/// Orchestrates a backup-to-seed run.
#[derive(Debug, Clone)]
pub struct SeedMigrator {
    schema: SeedSchema,
    options: MigrationOptions,
}

impl SeedMigrator {
    pub fn new(schema: SeedSchema, options: MigrationOptions) -> Self {
        Self { schema, options }
    }

    /// Standard schema with the configured target schema and paths.
    pub fn from_config(config: &SeedConfig) -> Self {
        Self::new(
            SeedSchema::standard().with_target_schema(config.output.schema.clone()),
            MigrationOptions::from(config),
        )
    }

    pub fn schema(&self) -> &SeedSchema {
        &self.schema
    }

    pub fn options(&self) -> &MigrationOptions {
        &self.options
    }

    /// Run the migration.
    ///
    /// Missing or empty backup files become warning sections. A missing backup
    /// directory, a malformed backup file or a failed write aborts the run.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use backup_seed_sdk::migration::{MigrationOptions, SeedMigrator};
    /// use backup_seed_sdk::models::SeedSchema;
    ///
    /// let migrator = SeedMigrator::new(
    ///     SeedSchema::standard(),
    ///     MigrationOptions::new("backups/latest").with_output_dir("seed_sql"),
    /// );
    /// let output = migrator.run().unwrap();
    /// print!("{}", output.script.render());
    /// ```
    pub fn run(&self) -> MigrationResult<MigrationOutput> {
        let backup_dir = &self.options.backup_dir;
        if !backup_dir.is_dir() {
            return Err(MigrationError::BackupDirNotFound(backup_dir.clone()));
        }

        OrderValidator::new().validate(&self.schema)?;

        if let Some(dir) = &self.options.output_dir {
            std::fs::create_dir_all(dir)
                .map_err(|e| MigrationError::OutputWrite(dir.clone(), e.to_string()))?;
        }

        let loader = BackupLoader::new(backup_dir);
        let mut checker = ReferenceChecker::new(PROFILE_REFERENCES);
        let mut script = SeedScript::new(
            self.options.title.clone(),
            self.schema.target_schema.clone(),
            self.schema.constraint_toggle.clone(),
        );
        let mut report =
            MigrationReport::new(backup_dir.clone(), self.schema.target_schema.clone());

        for table in &self.schema.tables {
            let (section, mut table_report) =
                self.process_table(table, &loader, &mut checker, &mut report)?;

            if let Some(dir) = &self.options.output_dir {
                let path = dir.join(table.seed_file_name());
                write_file(&path, &script.render_table(&section))?;
                table_report.output_file = Some(path);
            }

            script.push(section);
            report.tables.push(table_report);
        }

        info!(
            emitted = report.total_emitted(),
            dropped = report.total_dropped(),
            skipped_tables = report.skipped_tables().len(),
            "migration complete"
        );

        Ok(MigrationOutput { script, report })
    }

    fn process_table(
        &self,
        table: &TableSpec,
        loader: &BackupLoader,
        checker: &mut ReferenceChecker,
        report: &mut MigrationReport,
    ) -> MigrationResult<(TableSection, TableReport)> {
        let (path, records) = match loader.load(table)? {
            BackupDataset::Missing { path } => {
                let section = TableSection::missing_file(table.name, &path);
                let table_report =
                    TableReport::without_records(table.name, path, section.kind.clone());
                return Ok((section, table_report));
            }
            BackupDataset::Empty { path } => {
                let section = TableSection::empty_dataset(table.name);
                let table_report =
                    TableReport::without_records(table.name, path, section.kind.clone());
                return Ok((section, table_report));
            }
            BackupDataset::Records { path, records } => (path, records),
        };

        let normalizer = RowNormalizer::new(table);
        let mut rows = Vec::with_capacity(records.len());
        let mut rejections = Vec::new();

        for (index, record) in records.iter().enumerate() {
            match normalizer.normalize(index, record) {
                Ok(row) => {
                    checker.register(table, record);
                    report
                        .dangling_references
                        .extend(checker.check(table, index, record));
                    rows.push(row);
                }
                Err(rejection) => {
                    warn!(table = table.name, row = index, "{}", rejection);
                    rejections.push(rejection);
                }
            }
        }

        let section = if rows.is_empty() {
            warn!(table = table.name, skipped = rejections.len(), "no valid rows");
            TableSection::no_valid_rows(table.name, rejections.len())
        } else {
            let statement = InsertStatementBuilder::new(&self.schema).build(table, &rows)?;
            TableSection::inserted(table.name, statement.content, rows.len(), rejections.len())
        };

        info!(
            table = table.name,
            read = records.len(),
            emitted = rows.len(),
            dropped = rejections.len(),
            "processed table"
        );

        let table_report = TableReport::from_rows(
            table.name,
            path,
            section.kind.clone(),
            records.len(),
            &rows,
            rejections,
        );
        Ok((section, table_report))
    }
}

fn write_file(path: &Path, content: &str) -> MigrationResult<()> {
    std::fs::write(path, content)
        .map_err(|e| MigrationError::OutputWrite(path.to_path_buf(), e.to_string()))
}
