//! End-to-end tests for the `sessions` CLI commands
//!
//! Each invocation gets its own data directory via the environment
//! override, so tests never touch the user's application data and can
//! run in parallel.

use assert_cmd::Command;
use chatvault::config::DATA_DIR_ENV;
use predicates::prelude::*;
use tempfile::TempDir;

fn chatvault(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("chatvault").expect("binary exists");
    cmd.env(DATA_DIR_ENV, data_dir.path());
    cmd
}

/// Extract the session id from `sessions new` output.
fn created_id(output: &[u8]) -> String {
    let stdout = String::from_utf8_lossy(output);
    stdout
        .split_whitespace()
        .last()
        .expect("output ends with the session id")
        .to_string()
}

#[test]
fn test_list_shows_initial_session() {
    let tmp = TempDir::new().expect("tempdir");

    chatvault(&tmp)
        .args(["sessions", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stored Sessions:"))
        .stdout(predicate::str::contains("New Chat"));
}

#[test]
fn test_new_session_appears_in_list() {
    let tmp = TempDir::new().expect("tempdir");

    chatvault(&tmp)
        .args(["sessions", "new", "--title", "Weekend project"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created session"));

    chatvault(&tmp)
        .args(["sessions", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Weekend project"));
}

#[test]
fn test_append_and_show_transcript() {
    let tmp = TempDir::new().expect("tempdir");

    chatvault(&tmp)
        .args(["sessions", "append", "How do lifetimes work?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Appended user message"));

    chatvault(&tmp)
        .args(["sessions", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("user: How do lifetimes work?"));
}

#[test]
fn test_append_rejects_unknown_role() {
    let tmp = TempDir::new().expect("tempdir");

    chatvault(&tmp)
        .args(["sessions", "append", "hello", "--role", "moderator"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown role"));
}

#[test]
fn test_rename_changes_listed_title() {
    let tmp = TempDir::new().expect("tempdir");

    let output = chatvault(&tmp)
        .args(["sessions", "new"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let id = created_id(&output);

    chatvault(&tmp)
        .args(["sessions", "rename", &id, "Renamed session"])
        .assert()
        .success();

    chatvault(&tmp)
        .args(["sessions", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed session"));
}

#[test]
fn test_switch_to_unknown_session_reports_gracefully() {
    let tmp = TempDir::new().expect("tempdir");

    chatvault(&tmp)
        .args(["sessions", "switch", "session_missing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No session with id"));
}

#[test]
fn test_clear_requires_force() {
    let tmp = TempDir::new().expect("tempdir");

    chatvault(&tmp)
        .args(["sessions", "new", "--title", "Survivor"])
        .assert()
        .success();

    chatvault(&tmp)
        .args(["sessions", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));

    chatvault(&tmp)
        .args(["sessions", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Survivor"));

    chatvault(&tmp)
        .args(["sessions", "clear", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared all sessions."));

    chatvault(&tmp)
        .args(["sessions", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Survivor").not());
}

#[test]
fn test_delete_removes_session() {
    let tmp = TempDir::new().expect("tempdir");

    let output = chatvault(&tmp)
        .args(["sessions", "new", "--title", "Doomed"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let id = created_id(&output);

    chatvault(&tmp)
        .args(["sessions", "delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted session"));

    chatvault(&tmp)
        .args(["sessions", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Doomed").not());
}
