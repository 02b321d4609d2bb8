//! CLI smoke tests for shipkit.
//!
//! These tests verify that all CLI commands run without panicking and
//! return appropriate exit codes.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the shipkit binary.
fn shipkit_cmd() -> Command {
  Command::cargo_bin("shipkit").unwrap()
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
  shipkit_cmd()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_flag_works() {
  shipkit_cmd()
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains("shipkit"));
}

#[test]
fn subcommand_help_works() {
  for cmd in &["build", "clean", "transforms", "info"] {
    shipkit_cmd()
      .arg(cmd)
      .arg("--help")
      .assert()
      .success()
      .stdout(predicate::str::contains("Usage"));
  }
}

// =============================================================================
// transforms
// =============================================================================

#[test]
fn transforms_lists_builtins() {
  shipkit_cmd()
    .arg("transforms")
    .assert()
    .success()
    .stdout(predicate::str::contains("noop"))
    .stdout(predicate::str::contains("marker"));
}

// =============================================================================
// info
// =============================================================================

#[test]
fn info_shows_platform_and_targets() {
  shipkit_cmd()
    .arg("info")
    .assert()
    .success()
    .stdout(predicate::str::contains("platform"))
    .stdout(predicate::str::contains("linux, windows, darwin"));
}

// =============================================================================
// clean
// =============================================================================

#[test]
fn clean_resets_workspace() {
  let temp = TempDir::new().unwrap();
  let build_dir = temp.path().join("build");
  std::fs::create_dir_all(build_dir.join("app")).unwrap();
  std::fs::write(build_dir.join("stale.bin"), "leftover").unwrap();

  shipkit_cmd()
    .arg("clean")
    .arg("--build-dir")
    .arg(&build_dir)
    .assert()
    .success()
    .stdout(predicate::str::contains("Workspace reset"));

  assert!(!build_dir.join("stale.bin").exists());
  assert!(build_dir.join("app").exists());
}

#[test]
fn clean_on_missing_workspace_succeeds() {
  let temp = TempDir::new().unwrap();

  shipkit_cmd()
    .arg("clean")
    .arg("--build-dir")
    .arg(temp.path().join("never-built"))
    .assert()
    .success();
}

// =============================================================================
// Error Handling
// =============================================================================

#[test]
fn build_with_missing_source_fails() {
  let temp = TempDir::new().unwrap();

  shipkit_cmd()
    .arg("build")
    .arg(temp.path().join("nonexistent"))
    .assert()
    .failure()
    .stderr(predicate::str::contains("Source tree not found"));
}

#[test]
fn build_with_missing_manifest_fails() {
  let temp = TempDir::new().unwrap();
  let source = temp.path().join("source");
  std::fs::create_dir_all(&source).unwrap();

  shipkit_cmd()
    .arg("build")
    .arg(&source)
    .arg("--manifest")
    .arg(temp.path().join("nonexistent.json"))
    .arg("--build-dir")
    .arg(temp.path().join("build"))
    .assert()
    .failure()
    .stderr(predicate::str::contains("manifest not found"));
}

#[test]
fn build_with_unknown_os_fails() {
  let temp = TempDir::new().unwrap();
  let source = temp.path().join("source");
  std::fs::create_dir_all(&source).unwrap();

  shipkit_cmd()
    .arg("build")
    .arg(&source)
    .arg("--os")
    .arg("plan9")
    .assert()
    .failure()
    .stderr(predicate::str::contains("unknown target OS"));
}

#[test]
fn build_with_malformed_manifest_fails() {
  let temp = TempDir::new().unwrap();
  let source = temp.path().join("source");
  std::fs::create_dir_all(&source).unwrap();
  let manifest = temp.path().join("manifest.json");
  std::fs::write(&manifest, "not valid json {{{").unwrap();

  shipkit_cmd()
    .arg("build")
    .arg(&source)
    .arg("--manifest")
    .arg(&manifest)
    .arg("--build-dir")
    .arg(temp.path().join("build"))
    .assert()
    .failure()
    .stderr(predicate::str::contains("malformed manifest"));
}
