//! Integration tests for the convert command (CLI)

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::helpers::{load_fixture, mdsweep_cmd, run_mdsweep};

/// Lay out an input folder: two Markdown sources (one nested) and one
/// file the passthrough backend cannot handle.
fn seed_input_tree(root: &Path) {
    fs::write(
        root.join("weekly_report.md"),
        load_fixture("weekly_report.md"),
    )
    .unwrap();
    fs::create_dir_all(root.join("notes")).unwrap();
    fs::write(
        root.join("notes/plain_notes.md"),
        load_fixture("plain_notes.md"),
    )
    .unwrap();
    fs::write(root.join("scan.pdf"), b"%PDF-1.4 not really a pdf").unwrap();
}

// ============================================================================
// Help Output Tests
// ============================================================================

#[test]
fn convert_help_exits_0_and_shows_usage() {
    let (stdout, _stderr, exit_code) = run_mdsweep(&["convert", "--help"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("Convert a folder of documents"));
    assert!(stdout.contains("<INPUT_DIR>"));
    assert!(stdout.contains("<OUTPUT_DIR>"));
}

// ============================================================================
// Batch Conversion Tests
// ============================================================================

#[test]
fn converts_a_tree_with_the_passthrough_backend() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    seed_input_tree(input.path());

    let (stdout, stderr, exit_code) = run_mdsweep(&[
        "convert",
        input.path().to_str().unwrap(),
        output.path().to_str().unwrap(),
        "--backend",
        "passthrough",
    ]);

    assert_eq!(exit_code, 0, "convert failed, stderr: {}", stderr);
    assert!(
        stdout.contains("2 converted"),
        "summary line missing, got: {}",
        stdout
    );
    assert!(stdout.contains("1 skipped"));

    let cleaned = fs::read_to_string(output.path().join("weekly_report.md")).unwrap();
    assert!(cleaned.starts_with("**Summary:**"));
    assert!(cleaned.contains("**Open Issues:**"));
    assert!(!cleaned.contains("Kudos"));

    assert!(output.path().join("notes/plain_notes.md").exists());
    assert!(
        !output.path().join("scan.md").exists(),
        "skipped files should leave no output"
    );
}

#[test]
fn no_clean_writes_sources_verbatim() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(
        input.path().join("weekly_report.md"),
        load_fixture("weekly_report.md"),
    )
    .unwrap();

    let (_stdout, stderr, exit_code) = run_mdsweep(&[
        "convert",
        input.path().to_str().unwrap(),
        output.path().to_str().unwrap(),
        "--backend",
        "passthrough",
        "--no-clean",
    ]);

    assert_eq!(exit_code, 0, "convert failed, stderr: {}", stderr);
    assert_eq!(
        fs::read_to_string(output.path().join("weekly_report.md")).unwrap(),
        load_fixture("weekly_report.md")
    );
}

#[test]
fn parallel_jobs_convert_every_file() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    for name in ["a.md", "b.md", "c.md", "d.md"] {
        fs::write(input.path().join(name), "**Status:**\nFine.\n").unwrap();
    }

    let (stdout, stderr, exit_code) = run_mdsweep(&[
        "convert",
        input.path().to_str().unwrap(),
        output.path().to_str().unwrap(),
        "--backend",
        "passthrough",
        "--jobs",
        "4",
    ]);

    assert_eq!(exit_code, 0, "convert failed, stderr: {}", stderr);
    assert!(stdout.contains("4 converted"), "got: {}", stdout);
    for name in ["a.md", "b.md", "c.md", "d.md"] {
        assert!(output.path().join(name).exists());
    }
}

#[test]
fn empty_input_folder_prints_a_notice() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    let (stdout, _stderr, exit_code) = run_mdsweep(&[
        "convert",
        input.path().to_str().unwrap(),
        output.path().to_str().unwrap(),
        "--backend",
        "passthrough",
    ]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("No files found in the input folder."));
}

// ============================================================================
// Report Tests
// ============================================================================

#[test]
fn report_flag_writes_per_file_outcomes_as_json() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    seed_input_tree(input.path());
    let report_path = work.path().join("report.json");

    let (_stdout, stderr, exit_code) = run_mdsweep(&[
        "convert",
        input.path().to_str().unwrap(),
        output.path().to_str().unwrap(),
        "--backend",
        "passthrough",
        "--report",
        report_path.to_str().unwrap(),
    ]);

    assert_eq!(exit_code, 0, "convert failed, stderr: {}", stderr);
    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();

    assert_eq!(report["total"], 3);
    assert_eq!(report["converted"], 2);
    assert_eq!(report["skipped"], 1);

    let files = report["files"].as_array().unwrap();
    assert_eq!(files.len(), 3);

    let skipped = files.iter().find(|f| f["status"] == "skipped").unwrap();
    assert!(skipped["input"].as_str().unwrap().ends_with("scan.pdf"));
    assert!(skipped["reason"]
        .as_str()
        .unwrap()
        .contains("does not handle"));
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[test]
fn missing_input_folder_is_an_error() {
    let output = TempDir::new().unwrap();

    let (_stdout, stderr, exit_code) = run_mdsweep(&[
        "convert",
        "/definitely/not/a/real/folder",
        output.path().to_str().unwrap(),
    ]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("does not exist"));
}

#[test]
fn named_backend_missing_from_path_is_an_error() {
    // Only meaningful on hosts without docling installed.
    let docling_installed = std::process::Command::new("docling")
        .arg("--version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false);
    if docling_installed {
        return;
    }

    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    let (_stdout, stderr, exit_code) = run_mdsweep(&[
        "convert",
        input.path().to_str().unwrap(),
        output.path().to_str().unwrap(),
        "--backend",
        "docling",
    ]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("docling"));
    assert!(stderr.contains("not found"));
}

#[cfg(unix)]
#[test]
fn hanging_backend_times_out_and_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    // A stand-in docling: answers --version, hangs on real work.
    let bin = TempDir::new().unwrap();
    let tool = bin.path().join("docling");
    fs::write(
        &tool,
        "#!/bin/sh\nif [ \"$1\" = \"--version\" ]; then echo 0.0.0; exit 0; fi\n/bin/sleep 30\n",
    )
    .unwrap();
    fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();

    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    fs::write(input.path().join("scan.pdf"), b"%PDF-1.4").unwrap();
    let report_path = work.path().join("report.json");

    let out = mdsweep_cmd()
        .env("PATH", bin.path())
        .args([
            "convert",
            input.path().to_str().unwrap(),
            output.path().to_str().unwrap(),
            "--backend",
            "docling",
            "--timeout-secs",
            "1",
            "--report",
            report_path.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("1 skipped"), "got: {}", stdout);

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(report["skipped"], 1);
    assert!(report["files"][0]["reason"]
        .as_str()
        .unwrap()
        .contains("timed out after 1s"));
}
