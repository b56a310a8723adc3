//! Configuration file support
//!
//! Handles parsing of `.backup-seed.toml` configuration files and
//! environment variable overrides. Command-line flags are applied on top by
//! the CLI.

use crate::export::script::DEFAULT_TITLE;
use crate::models::table::DEFAULT_TARGET_SCHEMA;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration filename
pub const CONFIG_FILENAME: &str = ".backup-seed.toml";

/// Default directory holding `<table>.json` backups
pub const DEFAULT_BACKUP_DIR: &str = "supabase/backups/2025-10-26";

/// Default directory for per-table seed scripts
pub const DEFAULT_OUTPUT_DIR: &str = "supabase/seed_sql";

/// Environment variable for the backup directory
pub const ENV_BACKUP_DIR: &str = "BACKUP_SEED_BACKUP_DIR";

/// Environment variable for the output directory
pub const ENV_OUTPUT_DIR: &str = "BACKUP_SEED_OUTPUT_DIR";

/// Environment variable for the target schema
pub const ENV_SCHEMA: &str = "BACKUP_SEED_SCHEMA";

/// Error loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config {0}: {1}")]
    ReadError(PathBuf, String),

    #[error("Failed to parse config: {0}")]
    ParseError(String),

    #[error("Failed to serialize config: {0}")]
    SerializationError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Input/output locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsSection {
    #[serde(default = "default_backup_dir")]
    pub backup_dir: PathBuf,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_backup_dir() -> PathBuf {
    PathBuf::from(DEFAULT_BACKUP_DIR)
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            backup_dir: default_backup_dir(),
            output_dir: default_output_dir(),
        }
    }
}

/// Generated script options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    /// Schema qualifier for generated statements
    #[serde(default = "default_schema")]
    pub schema: String,

    /// Title in the combined script header
    #[serde(default = "default_title")]
    pub title: String,

    /// Write one `seed_<table>.sql` file per table
    #[serde(default = "default_true")]
    pub write_table_files: bool,
}

fn default_schema() -> String {
    DEFAULT_TARGET_SCHEMA.to_string()
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            schema: default_schema(),
            title: default_title(),
            write_table_files: true,
        }
    }
}

/// Main configuration structure
///
/// Represents the `.backup-seed.toml` configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SeedConfig {
    #[serde(default)]
    pub paths: PathsSection,

    #[serde(default)]
    pub output: OutputSection,
}

impl SeedConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a directory.
    ///
    /// Looks for `.backup-seed.toml` in the directory and falls back to
    /// defaults if not found. Environment overrides are applied either way.
    pub fn load(dir: &Path) -> ConfigResult<Self> {
        let config_path = dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::read(&config_path)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit file, which must exist.
    pub fn load_file(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let mut config = Self::read(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn read(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_path_buf(), e.to_string()))?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Convert configuration to TOML string
    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::SerializationError(e.to_string()))
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var(ENV_BACKUP_DIR) {
            self.paths.backup_dir = PathBuf::from(dir);
        }

        if let Ok(dir) = std::env::var(ENV_OUTPUT_DIR) {
            self.paths.output_dir = PathBuf::from(dir);
        }

        if let Ok(schema) = std::env::var(ENV_SCHEMA)
            && !schema.is_empty()
        {
            self.output.schema = schema;
        }
    }

    /// The schema qualifier is spliced into statements unquoted, so it must be
    /// a plain identifier.
    pub fn validate(&self) -> ConfigResult<()> {
        let schema = &self.output.schema;
        let valid = schema
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && schema.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(ConfigError::Invalid(format!(
                "schema must be a plain SQL identifier, got '{}'",
                schema
            )));
        }
        Ok(())
    }
}

/// Generate a sample configuration file content
pub fn sample_config() -> &'static str {
    r#"# Backup seed configuration

[paths]
# Directory containing <table>.json backups
backup_dir = "supabase/backups/2025-10-26"

# Directory for seed_<table>.sql files
output_dir = "supabase/seed_sql"

[output]
# Schema qualifier for INSERT and ALTER TABLE statements
schema = "public"

# Title written in the combined script header
title = "Guitar CRM Database Seed Data"

# Write one self-contained script per table
write_table_files = true
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = SeedConfig::new();
        assert_eq!(config.paths.backup_dir, PathBuf::from(DEFAULT_BACKUP_DIR));
        assert_eq!(config.paths.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(config.output.schema, "public");
        assert!(config.output.write_table_files);
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[paths]
backup_dir = "backups/latest"

[output]
write_table_files = false
"#;
        let config = SeedConfig::parse(toml).unwrap();
        assert_eq!(config.paths.backup_dir, PathBuf::from("backups/latest"));
        assert_eq!(config.paths.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert!(!config.output.write_table_files);
        assert_eq!(config.output.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            SeedConfig::parse("[paths\nbackup_dir = 1"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_rejects_unsafe_schema() {
        let mut config = SeedConfig::new();
        config.output.schema = "public; DROP TABLE songs".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.output.schema = "seed_2025".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILENAME),
            "[output]\nschema = \"staging\"\n",
        )
        .unwrap();
        let config = SeedConfig::load(dir.path()).unwrap();
        // BACKUP_SEED_SCHEMA is not set in the test environment
        if std::env::var(ENV_SCHEMA).is_err() {
            assert_eq!(config.output.schema, "staging");
        }
    }

    #[test]
    fn test_load_file_requires_existing_file() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            SeedConfig::load_file(&missing),
            Err(ConfigError::NotFound(_))
        ));
    }

    #[test]
    fn test_to_toml_round_trips() {
        let config = SeedConfig::new();
        let toml = config.to_toml().unwrap();
        let parsed = SeedConfig::parse(&toml).unwrap();
        assert_eq!(parsed.output.schema, config.output.schema);
        assert_eq!(parsed.paths.backup_dir, config.paths.backup_dir);
    }

    #[test]
    fn test_sample_config_is_valid() {
        let config = SeedConfig::parse(sample_config()).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.paths.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
    }
}
