//! Check command implementation

use super::load_config;
use crate::cli::error::CliError;
use crate::migration::{MigrationReport, SeedMigrator};
use std::path::PathBuf;

/// Arguments for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckArgs {
    pub backup_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// Run the pipeline without writing any files.
pub fn run_check(args: &CheckArgs) -> Result<MigrationReport, CliError> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(dir) = &args.backup_dir {
        config.paths.backup_dir = dir.clone();
    }
    config.output.write_table_files = false;

    let output = SeedMigrator::from_config(&config).run()?;
    Ok(output.report)
}

/// Handle the check command
pub fn handle_check(args: &CheckArgs) -> Result<(), CliError> {
    let report = run_check(args)?;
    let json = report
        .to_json()
        .map_err(|e| CliError::ReportError(e.to_string()))?;
    println!("{}", json);
    Ok(())
}
