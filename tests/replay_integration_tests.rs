// Integration tests for the replay binary
//
// Tests the audit CLI behavior:
// - Exit status for clean logs, illegal moves and unparseable moves
// - Expected-move validation
// - Command-line argument errors

use std::path::PathBuf;
use std::process::{Command, Output};

/// Helper function to get the path to test fixtures
fn fixture_path(filename: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(filename)
        .to_string_lossy()
        .to_string()
}

/// Helper to run the replay binary from the project root so Snake.toml is found
fn run_replay(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_replay"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(args)
        .output()
        .expect("Failed to execute replay binary")
}

#[test]
fn test_replay_help() {
    let output = run_replay(&["--help"]);
    assert!(output.status.success(), "Help command should succeed");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("USAGE:"), "Help should print usage");
}

#[test]
fn test_replay_no_arguments_fails() {
    let output = run_replay(&[]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_replay_clean_log_exits_zero() {
    let output = run_replay(&[&fixture_path("safe_moves_basic.jsonl"), "--all"]);
    assert!(
        output.status.success(),
        "Clean log should pass: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("MOVE AUDIT REPORT"));
    assert!(stdout.contains("Illegal:        0"));
}

#[test]
fn test_replay_illegal_log_exits_one() {
    let output = run_replay(&[&fixture_path("illegal_moves.jsonl"), "--all"]);
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ILLEGAL MOVES"));
    assert!(stdout.contains("Illegal:        2"));
}

#[test]
fn test_replay_unparseable_move_exits_one() {
    let output = run_replay(&[&fixture_path("bad_move.jsonl"), "--all"]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("sideways"), "stderr was: {}", stderr);
}

#[test]
fn test_replay_specific_legal_turn_exits_zero() {
    let output = run_replay(&[&fixture_path("illegal_moves.jsonl"), "--turns", "1"]);
    assert!(output.status.success());
}

#[test]
fn test_replay_validate_success_and_failure() {
    let ok = run_replay(&[
        &fixture_path("safe_moves_basic.jsonl"),
        "--validate",
        "0:up,1:left|right",
    ]);
    assert!(ok.status.success());

    let failed = run_replay(&[
        &fixture_path("safe_moves_basic.jsonl"),
        "--validate",
        "2:up",
    ]);
    assert_eq!(failed.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&failed.stderr).contains("Validation failed"));
}

#[test]
fn test_replay_unknown_option_fails() {
    let output = run_replay(&[&fixture_path("safe_moves_basic.jsonl"), "--bogus"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown option '--bogus'"));
}

#[test]
fn test_replay_missing_mode_fails() {
    let output = run_replay(&[&fixture_path("safe_moves_basic.jsonl")]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_replay_missing_file_fails() {
    let output = run_replay(&[&fixture_path("does_not_exist.jsonl"), "--all"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error loading log file"));
}
