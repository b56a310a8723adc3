//! Generate command implementation

use super::load_config;
use crate::cli::error::CliError;
use crate::config::SeedConfig;
use crate::migration::{MigrationOutput, SeedMigrator};
use std::path::PathBuf;

/// Arguments for the generate command
#[derive(Debug, Clone, Default)]
pub struct GenerateArgs {
    pub backup_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub schema: Option<String>,
    /// Skip the per-table `seed_<table>.sql` files
    pub no_files: bool,
    /// Write the JSON migration report here
    pub report: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

impl GenerateArgs {
    /// Effective configuration: file, then environment, then these flags.
    pub fn resolve_config(&self) -> Result<SeedConfig, CliError> {
        let mut config = load_config(self.config.as_deref())?;
        if let Some(dir) = &self.backup_dir {
            config.paths.backup_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.paths.output_dir = dir.clone();
        }
        if let Some(schema) = &self.schema {
            config.output.schema = schema.clone();
        }
        if self.no_files {
            config.output.write_table_files = false;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Run the migration and return the rendered combined script.
pub fn run_generate(args: &GenerateArgs) -> Result<(String, MigrationOutput), CliError> {
    let config = args.resolve_config()?;
    let output = SeedMigrator::from_config(&config).run()?;

    if let Some(path) = &args.report {
        let json = output
            .report
            .to_json()
            .map_err(|e| CliError::ReportError(e.to_string()))?;
        std::fs::write(path, json)
            .map_err(|e| CliError::FileWriteError(path.clone(), e.to_string()))?;
    }

    Ok((output.script.render(), output))
}

/// Handle the generate command
///
/// The combined script goes to stdout; the summary goes to stderr.
pub fn handle_generate(args: &GenerateArgs) -> Result<(), CliError> {
    let (script, output) = run_generate(args)?;
    print!("{}", script);

    let report = &output.report;
    eprintln!(
        "✅ Generated seed data: {} rows emitted, {} rows dropped",
        report.total_emitted(),
        report.total_dropped()
    );
    let written: Vec<_> = report
        .tables
        .iter()
        .filter_map(|t| t.output_file.as_ref())
        .collect();
    if let Some(dir) = written.first().and_then(|p| p.parent()) {
        eprintln!("✅ Wrote {} table scripts to {}", written.len(), dir.display());
    }
    for table in report.skipped_tables() {
        eprintln!("⚠️  {}: no INSERT generated", table);
    }
    if !report.dangling_references.is_empty() {
        eprintln!(
            "⚠️  {} references point at profiles missing from the backup",
            report.dangling_references.len()
        );
    }
    if let Some(path) = &args.report {
        eprintln!("✅ Report written to {}", path.display());
    }
    Ok(())
}
