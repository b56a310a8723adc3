//! Check command tests

#[cfg(feature = "cli")]
use backup_seed_sdk::cli::commands::check::{CheckArgs, run_check};
#[cfg(feature = "cli")]
use tempfile::tempdir;

#[cfg(feature = "cli")]
#[test]
fn test_cli_check_writes_nothing() {
    let dir = tempdir().unwrap();
    let backups = dir.path().join("backups");
    std::fs::create_dir(&backups).unwrap();
    std::fs::write(
        backups.join("songs.json"),
        r#"[{"title": "Wonderwall"}, {"title": null}]"#,
    )
    .unwrap();
    let output_dir = dir.path().join("seed_sql");
    let config = dir.path().join("seed.toml");
    std::fs::write(
        &config,
        format!("[paths]\noutput_dir = {:?}\n", output_dir),
    )
    .unwrap();

    let report = run_check(&CheckArgs {
        backup_dir: Some(backups),
        config: Some(config),
    })
    .unwrap();

    let songs = report.table("songs").unwrap();
    assert_eq!(songs.records_read, 2);
    assert_eq!(songs.rows_emitted, 1);
    assert_eq!(songs.rows_dropped, 1);
    assert!(songs.output_file.is_none());
    assert!(!output_dir.exists());
}
