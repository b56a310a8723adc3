//! CLI command implementations

#[cfg(feature = "cli")]
pub mod check;
#[cfg(feature = "cli")]
pub mod generate;

use crate::cli::error::CliError;
use crate::config::{SeedConfig, sample_config};
use std::path::Path;

/// Load configuration from an explicit file or the working directory.
pub(crate) fn load_config(config: Option<&Path>) -> Result<SeedConfig, CliError> {
    let config = match config {
        Some(path) => SeedConfig::load_file(path)?,
        None => SeedConfig::load(Path::new("."))?,
    };
    Ok(config)
}

/// Handle the sample-config command
pub fn handle_sample_config() -> Result<(), CliError> {
    print!("{}", sample_config());
    Ok(())
}
