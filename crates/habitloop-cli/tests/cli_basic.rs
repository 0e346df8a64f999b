//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against an isolated data
//! directory and verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(data_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new("cargo")
        .args(["run", "-p", "habitloop-cli", "--quiet", "--"])
        .args(args)
        .env("HABITLOOP_DATA_DIR", data_dir)
        .output()
        .expect("failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

#[test]
fn habit_add_and_list() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, stderr) =
        run_cli(dir.path(), &["habit", "add", "team", "run", "07:00"]);
    assert_eq!(code, 0, "habit add failed: {stderr}");
    assert!(stdout.contains("07:00"), "unexpected output: {stdout}");

    let (code, stdout, _) = run_cli(dir.path(), &["habit", "list", "team"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("run @ 07:00"), "unexpected output: {stdout}");
}

#[test]
fn habit_add_rejects_bad_time_with_usage() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["habit", "add", "team", "run", "25:00"]);
    assert_eq!(code, 0, "user error should not be a process failure");
    assert!(stdout.contains("Usage"), "unexpected output: {stdout}");
}

#[test]
fn done_is_idempotent_per_day() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["habit", "add", "team", "run", "07:00"]);

    let (code, stdout, _) = run_cli(dir.path(), &["done", "team", "run", "alice"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Well done"), "unexpected output: {stdout}");
    assert!(stdout.contains("streak: 1"), "unexpected output: {stdout}");

    let (code, stdout, _) = run_cli(dir.path(), &["done", "team", "run", "alice"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("already"), "unexpected output: {stdout}");
}

#[test]
fn streaks_and_summary_render() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["habit", "add", "team", "run", "07:00"]);
    run_cli(dir.path(), &["done", "team", "run", "alice"]);

    let (code, stdout, _) = run_cli(dir.path(), &["streaks", "team"]);
    assert_eq!(code, 0);
    assert!(
        stdout.contains("run / alice: 1 day(s)"),
        "unexpected output: {stdout}"
    );

    let (code, stdout, _) = run_cli(dir.path(), &["summary", "team", "--json"]);
    assert_eq!(code, 0);
    let counts: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(counts[0]["habit"], "run");
    assert_eq!(counts[0]["done_today"], 1);
}
