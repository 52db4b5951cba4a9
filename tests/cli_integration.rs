//! Integration tests for the `agn` CLI.
//!
//! Each test creates a temp directory with a task file, runs `agn` as a
//! subprocess with a pinned `--at` time, and verifies stdout.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Get the path to the built `agn` binary.
fn agn_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("agn");
    path
}

const AT: &str = "2026-03-10T12:00:00Z";

fn write_sample_file(dir: &Path) {
    fs::write(
        dir.join("agenda.json"),
        r#"{
  "tasks": [
    {
      "label": "School",
      "children": [
        {
          "label": "AP CSP",
          "children": [
            {"label": "Computering", "due_at": "2026-03-10T13:00:00Z"},
            {
              "label": "Computering alos",
              "due_at": "2026-03-10T11:00:00Z",
              "late_at": "2026-03-10T12:00:00Z"
            },
            {
              "label": "Computering alos2",
              "state": "done",
              "due_at": "2026-03-09T11:00:00Z"
            }
          ]
        }
      ]
    },
    {
      "label": "Home",
      "children": [
        {"label": "laundry", "state": "done", "done_at": "2026-03-10T10:00:00Z"}
      ]
    }
  ]
}"#,
    )
    .unwrap();
}

fn run_agn(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(agn_bin())
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run agn");
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

#[test]
fn test_list_outline() {
    let dir = tempfile::tempdir().unwrap();
    write_sample_file(dir.path());

    let (stdout, stderr, ok) = run_agn(dir.path(), &["list", "--at", AT]);
    assert!(ok, "stderr: {}", stderr);

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "[2] School");
    assert_eq!(lines[1], "  [2] AP CSP");
    assert_eq!(lines[2], "    [ ] Computering (due 2026-03-10 13:00)");
    assert_eq!(lines[3], "    [L] Computering alos (due 2026-03-10 11:00)");
    // Expired task is hidden by default
    assert!(!stdout.contains("Computering alos2"));
    assert!(stdout.contains("[*] Home"));
    assert!(stdout.contains("  [x] laundry"));
}

#[test]
fn test_list_all_includes_expired() {
    let dir = tempfile::tempdir().unwrap();
    write_sample_file(dir.path());

    let (stdout, _, ok) = run_agn(dir.path(), &["list", "--all", "--at", AT]);
    assert!(ok);
    assert!(stdout.contains("[.] Computering alos2"));
}

#[test]
fn test_flat_view() {
    let dir = tempfile::tempdir().unwrap();
    write_sample_file(dir.path());

    let (stdout, _, ok) = run_agn(dir.path(), &["flat", "--at", AT]);
    assert!(ok);

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "== Late ==");
    assert_eq!(lines[1], "  Computering alos  (School > AP CSP)");
    assert!(stdout.contains("== Complete =="));
    assert!(stdout.contains("  laundry  (Home)"));
    // No Due bucket header: the only due-dated open task isn't due yet
    assert!(!stdout.contains("== Due =="));
}

#[test]
fn test_flat_json() {
    let dir = tempfile::tempdir().unwrap();
    write_sample_file(dir.path());

    let (stdout, _, ok) = run_agn(dir.path(), &["flat", "--json", "--at", AT]);
    assert!(ok);

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["late"][0]["label"], "Computering alos");
    assert_eq!(parsed["late"][0]["breadcrumb"], "School > AP CSP");
    assert_eq!(parsed["due"].as_array().unwrap().len(), 0);
    assert_eq!(parsed["complete"][0]["label"], "laundry");
}

#[test]
fn test_list_json_rows() {
    let dir = tempfile::tempdir().unwrap();
    write_sample_file(dir.path());

    let (stdout, _, ok) = run_agn(dir.path(), &["list", "--json", "--at", AT]);
    assert!(ok);

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let rows = parsed.as_array().unwrap();
    assert_eq!(rows[0]["label"], "School");
    assert_eq!(rows[0]["status"], "late");
    assert_eq!(rows[0]["open_leaves"], 2);
    assert_eq!(rows[0]["depth"], 0);
}

#[test]
fn test_default_command_is_list() {
    let dir = tempfile::tempdir().unwrap();
    write_sample_file(dir.path());

    let (stdout, _, ok) = run_agn(dir.path(), &["--at", AT]);
    assert!(ok);
    assert!(stdout.starts_with("[2] School"));
}

#[test]
fn test_discovery_walks_up_from_subdir() {
    let dir = tempfile::tempdir().unwrap();
    write_sample_file(dir.path());
    let nested = dir.path().join("deep/nested");
    fs::create_dir_all(&nested).unwrap();

    let (stdout, _, ok) = run_agn(&nested, &["list", "--at", AT]);
    assert!(ok);
    assert!(stdout.contains("School"));
}

#[test]
fn test_explicit_file_flag() {
    let dir = tempfile::tempdir().unwrap();
    let other = dir.path().join("elsewhere.json");
    fs::write(&other, r#"{"tasks": [{"label": "lonely"}]}"#).unwrap();

    let (stdout, _, ok) = run_agn(dir.path(), &["list", "-f", "elsewhere.json", "--at", AT]);
    assert!(ok);
    assert_eq!(stdout.trim(), "[ ] lonely");
}

#[test]
fn test_init_creates_starter_file() {
    let dir = tempfile::tempdir().unwrap();

    let (stdout, _, ok) = run_agn(dir.path(), &["init"]);
    assert!(ok);
    assert!(stdout.contains("created agenda.json"));
    assert!(dir.path().join("agenda.json").exists());

    // A second init fails rather than clobbering
    let (_, stderr, ok) = run_agn(dir.path(), &["init"]);
    assert!(!ok);
    assert!(stderr.contains("already exists"));
}

#[test]
fn test_structural_error_rejected_at_load() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("agenda.json"),
        r#"{"tasks": [{"label": "bad", "due_at": "2026-03-10T12:00:00Z", "late_at": "2026-03-01T12:00:00Z"}]}"#,
    )
    .unwrap();

    let (_, stderr, ok) = run_agn(dir.path(), &["list", "--at", AT]);
    assert!(!ok);
    assert!(stderr.contains("late_at before due_at"));
}

#[test]
fn test_invalid_at_timestamp() {
    let dir = tempfile::tempdir().unwrap();
    write_sample_file(dir.path());

    let (_, stderr, ok) = run_agn(dir.path(), &["list", "--at", "yesterday"]);
    assert!(!ok);
    assert!(stderr.contains("invalid --at timestamp"));
}
