//! Shared helpers for integration tests

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

/// Path to the tests/fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Read a fixture file to a string
pub fn load_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
}

/// Copy a fixture into a fresh temp dir, returning the dir and file path
pub fn temp_fixture(name: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join(name);
    fs::write(&path, load_fixture(name)).expect("write temp fixture");
    (dir, path)
}

/// Base command for the mdsweep binary.
///
/// Points MDSWEEP_CONFIG at a path that never exists so the run always
/// sees default settings, whatever the host has in ~/.config.
pub fn mdsweep_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_mdsweep"));
    cmd.env("NO_COLOR", "1");
    cmd.env("MDSWEEP_CONFIG", "/nonexistent/mdsweep-test-config.toml");
    cmd
}

/// Run mdsweep with args and capture output
pub fn run_mdsweep(args: &[&str]) -> (String, String, i32) {
    let output = mdsweep_cmd()
        .args(args)
        .output()
        .expect("Failed to execute mdsweep");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}
