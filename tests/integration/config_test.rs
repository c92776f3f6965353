//! Integration tests for the config subcommands (CLI)

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Runner pinned to a config file path, so tests never touch ~/.config.
fn config_cmd(config_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("mdsweep").expect("binary exists");
    cmd.env("NO_COLOR", "1");
    cmd.env("MDSWEEP_CONFIG", config_path);
    cmd
}

#[test]
fn config_show_prints_defaults_as_toml() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");

    config_cmd(&config_path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[cleaner]"))
        .stdout(predicate::str::contains("exempt_headers"))
        .stdout(predicate::str::contains("[converter]"))
        .stdout(predicate::str::contains("timeout_secs = 120"));
}

#[test]
fn config_show_reflects_a_customized_config() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        "[cleaner]\nblocked_keywords = [\"vendor demo\"]\n",
    )
    .unwrap();

    config_cmd(&config_path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vendor demo"));
}

#[test]
fn config_init_creates_the_file_and_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");

    config_cmd(&config_path)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("backend = \"auto\""));

    config_cmd(&config_path)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn config_migrate_fills_missing_keys_with_yes() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        "# my settings\n[converter]\nbackend = \"pandoc\"\n",
    )
    .unwrap();

    config_cmd(&config_path)
        .args(["config", "migrate", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config updated successfully."));

    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[cleaner]"), "missing section was added");
    assert!(content.contains("timeout_secs"), "missing key was added");
    assert!(
        content.contains("backend = \"pandoc\""),
        "user value survives migration"
    );
    assert!(content.contains("# my settings"), "comments survive");
}

#[test]
fn config_migrate_without_yes_makes_no_changes_when_not_a_tty() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "[converter]\nbackend = \"pandoc\"\n").unwrap();
    let before = fs::read_to_string(&config_path).unwrap();

    config_cmd(&config_path)
        .args(["config", "migrate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Non-interactive mode"))
        .stdout(predicate::str::contains("No changes made."));

    assert_eq!(fs::read_to_string(&config_path).unwrap(), before);
}

#[test]
fn config_migrate_is_a_noop_on_an_up_to_date_config() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");

    config_cmd(&config_path)
        .args(["config", "init"])
        .assert()
        .success();

    config_cmd(&config_path)
        .args(["config", "migrate", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already up to date"));
}
