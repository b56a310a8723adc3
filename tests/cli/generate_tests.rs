//! Generate command tests

#[cfg(feature = "cli")]
use backup_seed_sdk::cli::CliError;
#[cfg(feature = "cli")]
use backup_seed_sdk::cli::commands::generate::{GenerateArgs, run_generate};
#[cfg(feature = "cli")]
use backup_seed_sdk::migration::MigrationError;
#[cfg(feature = "cli")]
use tempfile::{TempDir, tempdir};

#[cfg(feature = "cli")]
fn backups_with_config() -> TempDir {
    let dir = tempdir().unwrap();
    std::fs::create_dir(dir.path().join("backups")).unwrap();
    std::fs::write(
        dir.path().join("backups/songs.json"),
        r#"[{"title": "Wonderwall", "author": "Oasis", "level": "easy", "key": "Z"}]"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join("seed.toml"),
        format!(
            "[paths]\nbackup_dir = {:?}\noutput_dir = {:?}\n",
            dir.path().join("backups"),
            dir.path().join("seed_sql")
        ),
    )
    .unwrap();
    dir
}

#[cfg(feature = "cli")]
#[test]
fn test_cli_generate_writes_files_and_report() {
    let dir = backups_with_config();
    let report_path = dir.path().join("report.json");
    let args = GenerateArgs {
        report: Some(report_path.clone()),
        config: Some(dir.path().join("seed.toml")),
        ..Default::default()
    };

    let (script, output) = run_generate(&args).unwrap();
    assert!(script.contains("INSERT INTO public.songs"));
    assert!(script.ends_with("-- Verify in Supabase Dashboard → Table Editor\n"));
    assert!(script.contains("-- ✅ All data imported successfully!\n"));
    assert_eq!(output.report.total_emitted(), 1);

    assert!(dir.path().join("seed_sql/seed_songs.sql").exists());
    assert!(dir.path().join("seed_sql/seed_profiles.sql").exists());

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(report["target_schema"], "public");
    let songs = report["tables"]
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["table"] == "songs")
        .unwrap();
    assert_eq!(songs["outcome"]["kind"], "inserted");
    assert_eq!(songs["substitutions"]["level"], 1);
}

#[cfg(feature = "cli")]
#[test]
fn test_cli_generate_no_files() {
    let dir = backups_with_config();
    let args = GenerateArgs {
        no_files: true,
        schema: Some("staging".to_string()),
        config: Some(dir.path().join("seed.toml")),
        ..Default::default()
    };

    let (script, _) = run_generate(&args).unwrap();
    assert!(script.contains("INSERT INTO staging.songs"));
    assert!(!dir.path().join("seed_sql").exists());
}

#[cfg(feature = "cli")]
#[test]
fn test_cli_generate_missing_backup_dir() {
    let dir = backups_with_config();
    let args = GenerateArgs {
        backup_dir: Some(dir.path().join("nope")),
        config: Some(dir.path().join("seed.toml")),
        ..Default::default()
    };

    let err = run_generate(&args).unwrap_err();
    assert!(matches!(
        err,
        CliError::MigrationError(MigrationError::BackupDirNotFound(_))
    ));
    assert!(err.to_string().starts_with("Backup directory not found"));
}

#[cfg(feature = "cli")]
#[test]
fn test_cli_generate_missing_config_file() {
    let dir = tempdir().unwrap();
    let args = GenerateArgs {
        config: Some(dir.path().join("absent.toml")),
        ..Default::default()
    };
    assert!(matches!(run_generate(&args), Err(CliError::ConfigError(_))));
}
