//! CLI binary entry point for backup-seed-cli

#[cfg(feature = "cli")]
use backup_seed_sdk::cli::commands::check::{CheckArgs, handle_check};
#[cfg(feature = "cli")]
use backup_seed_sdk::cli::commands::generate::{GenerateArgs, handle_generate};
#[cfg(feature = "cli")]
use backup_seed_sdk::cli::commands::handle_sample_config;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use tracing::Level;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "backup-seed-cli")]
#[command(about = "Generate PostgreSQL seed scripts from JSON table backups")]
#[command(version)]
struct Cli {
    /// Log verbosity: debug, info, warn, error
    #[arg(long, global = true, default_value = "warn")]
    verbosity: String,

    /// Log format: text or json
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Generate the combined seed script and per-table scripts
    Generate {
        /// Directory containing <table>.json backups
        #[arg(short, long)]
        backup_dir: Option<PathBuf>,
        /// Directory for seed_<table>.sql files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        /// Target schema qualifier
        #[arg(short, long)]
        schema: Option<String>,
        /// Don't write per-table files
        #[arg(long)]
        no_files: bool,
        /// Write the JSON migration report to this path
        #[arg(long)]
        report: Option<PathBuf>,
        /// Configuration file (default: ./.backup-seed.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Run the pipeline without writing files and print the JSON report
    Check {
        /// Directory containing <table>.json backups
        #[arg(short, long)]
        backup_dir: Option<PathBuf>,
        /// Configuration file (default: ./.backup-seed.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print a sample configuration file
    SampleConfig,
}

/// Install the log subscriber. Logs go to stderr; stdout carries SQL.
#[cfg(feature = "cli")]
fn setup_logging(verbosity: &str, format: &str) {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();
    setup_logging(&cli.verbosity, &cli.log_format);

    let result = match cli.command {
        Commands::Generate {
            backup_dir,
            output_dir,
            schema,
            no_files,
            report,
            config,
        } => handle_generate(&GenerateArgs {
            backup_dir,
            output_dir,
            schema,
            no_files,
            report,
            config,
        }),
        Commands::Check { backup_dir, config } => handle_check(&CheckArgs { backup_dir, config }),
        Commands::SampleConfig => handle_sample_config(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature is not enabled. Build with --features cli");
    std::process::exit(1);
}
