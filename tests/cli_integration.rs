//! CLI Integration Tests
//!
//! These tests verify that the CLI commands work correctly end-to-end.
//! They test the actual binary behavior, not just the library.
//!
//! Run with:
//! ```bash
//! cargo test --test cli_integration
//! ```

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

/// Run appfiles with `--root` and return (parsed stdout, success)
fn run_appfiles(args: &[&str], root: &Path) -> (serde_json::Value, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_appfiles"))
        .arg("--root")
        .arg(root)
        .args(args)
        .output()
        .expect("Failed to execute appfiles");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let value = serde_json::from_str(stdout.trim()).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({}): {}\nstderr: {}",
            e,
            stdout,
            String::from_utf8_lossy(&output.stderr)
        )
    });
    (value, output.status.success())
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

// ============================================================================
// Text Commands
// ============================================================================

#[test]
fn test_cli_write_then_read() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("notes/today.txt");

    let (json, success) = run_appfiles(&["write", path_arg(&file), "hello cli"], dir.path());
    assert!(success, "write should succeed: {}", json);
    assert_eq!(json["bytes"], 9);

    let (json, success) = run_appfiles(&["read", path_arg(&file)], dir.path());
    assert!(success);
    assert_eq!(json["found"], true);
    assert_eq!(json["content"], "hello cli");
}

#[test]
fn test_cli_read_missing_is_not_an_error() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("missing.txt");

    let (json, success) = run_appfiles(&["read", path_arg(&file)], dir.path());

    assert!(success);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["found"], false);
    assert!(json["content"].is_null());
}

// ============================================================================
// File and Tree Commands
// ============================================================================

#[test]
fn test_cli_copy_missing_source_fails() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("missing.txt");
    let destination = dir.path().join("copy.txt");

    let (json, success) = run_appfiles(
        &["copy", path_arg(&source), path_arg(&destination)],
        dir.path(),
    );

    assert!(!success);
    assert_eq!(json["status"], "error");
    assert!(!destination.exists());
}

#[test]
fn test_cli_copy_dir_and_digest() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("src");
    fs::create_dir_all(source.join("a/b")).unwrap();
    fs::write(source.join("a/b/c.txt"), "deep").unwrap();
    fs::write(source.join("top.txt"), "top").unwrap();
    let destination = dir.path().join("dst");

    let (json, success) = run_appfiles(
        &["copy-dir", path_arg(&source), path_arg(&destination)],
        dir.path(),
    );
    assert!(success, "copy-dir should succeed: {}", json);
    assert_eq!(json["files"], 2);
    assert_eq!(json["failures"].as_array().unwrap().len(), 0);

    let (src_digest, _) = run_appfiles(&["digest", path_arg(&source)], dir.path());
    let (dst_digest, _) = run_appfiles(&["digest", path_arg(&destination)], dir.path());
    assert_eq!(src_digest["digest"], dst_digest["digest"]);
}

#[test]
fn test_cli_clear() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("cache");
    fs::create_dir_all(target.join("nested")).unwrap();
    fs::write(target.join("nested/file.txt"), "x").unwrap();

    let (json, success) = run_appfiles(&["clear", path_arg(&target)], dir.path());

    assert!(success, "clear should succeed: {}", json);
    assert!(target.is_dir());
    assert_eq!(fs::read_dir(&target).unwrap().count(), 0);
}

#[test]
fn test_cli_clear_missing_dir_fails() {
    let dir = tempdir().unwrap();
    let (json, success) = run_appfiles(
        &["clear", path_arg(&dir.path().join("missing"))],
        dir.path(),
    );

    assert!(!success);
    assert_eq!(json["status"], "error");
}

// ============================================================================
// Config and Settings Commands
// ============================================================================

#[test]
fn test_cli_config_path() {
    let dir = tempdir().unwrap();
    let (json, success) = run_appfiles(&["config-path"], dir.path());

    assert!(success);
    assert_eq!(
        json["path"],
        format!("{}/config/settings.json", dir.path().display())
    );
}

#[test]
fn test_cli_settings_set_get_unset() {
    let dir = tempdir().unwrap();

    let (_, success) = run_appfiles(&["settings", "set", "volume", "70"], dir.path());
    assert!(success);
    let (_, success) = run_appfiles(&["settings", "set", "language", "english"], dir.path());
    assert!(success);

    let (json, _) = run_appfiles(&["settings", "get", "volume"], dir.path());
    assert_eq!(json["value"], 70);
    let (json, _) = run_appfiles(&["settings", "get", "language"], dir.path());
    assert_eq!(json["value"], "english");

    let (json, _) = run_appfiles(&["settings", "list"], dir.path());
    assert_eq!(json["settings"].as_object().unwrap().len(), 2);

    let (json, success) = run_appfiles(&["settings", "unset", "volume"], dir.path());
    assert!(success);
    assert_eq!(json["removed"], true);

    let (json, success) = run_appfiles(&["settings", "get", "volume"], dir.path());
    assert!(!success);
    assert_eq!(json["status"], "error");

    assert!(dir.path().join("config/settings.json").is_file());
}

// ============================================================================
// Asset Commands
// ============================================================================

#[test]
fn test_cli_asset() {
    let dir = tempdir().unwrap();
    let bundle = dir.path().join("bundle");
    fs::create_dir_all(bundle.join("data")).unwrap();
    fs::write(bundle.join("data/help.txt"), "Press F1").unwrap();

    let (json, success) = run_appfiles(
        &["asset", "--assets", path_arg(&bundle), "data/help.txt"],
        dir.path(),
    );
    assert!(success);
    assert_eq!(json["content"], "Press F1");

    let (json, success) = run_appfiles(
        &["asset", "--assets", path_arg(&bundle), "data/missing.txt"],
        dir.path(),
    );
    assert!(success);
    assert_eq!(json["found"], false);
}
