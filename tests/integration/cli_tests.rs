//! CLI integration tests
//!
//! These tests run the manifestquery binary against the fixture manifests.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::PathBuf;

/// Get the path to the test fixtures directory
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn notes_manifest() -> PathBuf {
    fixtures_path().join("project/app/src/main/AndroidManifest.xml")
}

fn manifestquery() -> Command {
    Command::cargo_bin("manifestquery").expect("Binary not built")
}

/// Run a query with JSON output and return the parsed `result` field
fn json_result(args: &[&str]) -> Value {
    let output = manifestquery()
        .args(args)
        .args(["--format", "json", "--quiet"])
        .output()
        .expect("Failed to execute command");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let value: Value = serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    value["result"].clone()
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_cli_help() {
    manifestquery()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("manifestquery"))
        .stdout(predicate::str::contains("launcher"))
        .stdout(predicate::str::contains("components"));
}

#[test]
fn test_cli_version() {
    manifestquery()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("manifestquery"));
}

#[test]
fn test_cli_requires_path() {
    manifestquery().assert().failure();
}

#[test]
fn test_cli_defaults_to_summary() {
    manifestquery()
        .arg(notes_manifest())
        .assert()
        .success()
        .stdout(predicate::str::contains("com.example.notes"))
        .stdout(predicate::str::contains("Launcher:"))
        .stdout(predicate::str::contains("com.example.notes.ui.NotesListActivity"))
        .stdout(predicate::str::contains("Permissions (4):"));

    let result = json_result(&[notes_manifest().to_str().unwrap()]);
    assert_eq!(result["summary"]["sdk_version"], 21);
}

#[test]
fn test_cli_quiet_hides_header() {
    manifestquery()
        .arg(notes_manifest())
        .arg("sdk")
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("Target SDK:"))
        .stdout(predicate::str::contains("21"))
        .stdout(predicate::str::contains("AndroidManifest.xml").not());
}

// ============================================================================
// Query Tests
// ============================================================================

#[test]
fn test_cli_launcher_terminal() {
    manifestquery()
        .arg(notes_manifest())
        .arg("launcher")
        .assert()
        .success()
        .stdout(predicate::str::contains("com.example.notes.ui.NotesListActivity"));
}

#[test]
fn test_cli_launcher_from_project_directory() {
    let project = fixtures_path().join("project");
    let result = json_result(&[project.to_str().unwrap(), "launcher"]);
    assert_eq!(result["launcher"], "com.example.notes.ui.NotesListActivity");
}

#[test]
fn test_cli_launcher_absent_is_null() {
    let fixture = fixtures_path().join("protected_app.xml");
    let result = json_result(&[fixture.to_str().unwrap(), "launcher"]);
    assert!(result["launcher"].is_null());
}

#[test]
fn test_cli_permissions() {
    let result = json_result(&[notes_manifest().to_str().unwrap(), "permissions"]);
    let permissions: Vec<&str> = result["permissions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(
        permissions,
        vec![
            "android.permission.INTERNET",
            "android.permission.CAMERA",
            "android.permission.INTERNET",
            "android.permission.RECEIVE_BOOT_COMPLETED",
        ]
    );
}

#[test]
fn test_cli_sdk() {
    let fixture = fixtures_path().join("protected_app.xml");
    assert_eq!(json_result(&[fixture.to_str().unwrap(), "sdk"])["sdk"], 21);

    let minimal = fixtures_path().join("minimal.xml");
    assert_eq!(json_result(&[minimal.to_str().unwrap(), "sdk"])["sdk"], 3);
}

#[test]
fn test_cli_components() {
    let result = json_result(&[
        notes_manifest().to_str().unwrap(),
        "components",
        "--kind",
        "provider",
    ]);
    let protection = &result["components"]["protection"];
    assert_eq!(result["components"]["tag"], "provider");
    assert_eq!(
        protection["protected"]["com.example.notes.data.NotesProvider"],
        "com.example.notes.permission.READ"
    );
    assert_eq!(protection["unprotected"].as_array().unwrap().len(), 0);
}

#[test]
fn test_cli_application() {
    let result = json_result(&[notes_manifest().to_str().unwrap(), "application"]);
    assert_eq!(result["application"], "com.example.notes.NotesApplication");
}

#[test]
fn test_cli_resolve() {
    let result = json_result(&[notes_manifest().to_str().unwrap(), "resolve", ".Main"]);
    assert_eq!(result["resolve"]["resolved"], "com.example.notes.Main");
}

#[test]
fn test_cli_summary() {
    let result = json_result(&[notes_manifest().to_str().unwrap(), "summary"]);
    let summary = &result["summary"];
    assert_eq!(summary["package"], "com.example.notes");
    assert_eq!(summary["sdk_version"], 21);
    assert_eq!(
        summary["components"]["service"]["unprotected"][0],
        "com.example.notes.sync.SyncService"
    );
    assert!(summary["components"]["activity-alias"].is_null());
}

#[test]
fn test_cli_summary_uses_config_components() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.yml");
    std::fs::write(&config, "components: [receiver]\n").unwrap();

    let result = json_result(&[
        notes_manifest().to_str().unwrap(),
        "summary",
        "--config",
        config.to_str().unwrap(),
    ]);
    let components = result["summary"]["components"].as_object().unwrap();
    assert_eq!(components.len(), 1);
    assert!(components.contains_key("receiver"));
}

// ============================================================================
// Save and error Tests
// ============================================================================

#[test]
fn test_cli_save() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("AndroidManifest.xml");

    manifestquery()
        .arg(notes_manifest())
        .arg("save")
        .arg(&dest)
        .assert()
        .success()
        .stdout(predicate::str::contains("saved to"));

    let original = std::fs::read_to_string(notes_manifest()).unwrap();
    let saved = std::fs::read_to_string(&dest).unwrap();
    assert_eq!(saved, original);
}

#[test]
fn test_cli_json_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("report.json");

    manifestquery()
        .arg(notes_manifest())
        .arg("sdk")
        .args(["--format", "json", "--output"])
        .arg(&out)
        .assert()
        .success();

    let value: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value["result"]["sdk"], 21);
    assert_eq!(value["package"], "com.example.notes");
}

#[test]
fn test_cli_missing_application_fails() {
    manifestquery()
        .arg(fixtures_path().join("missing_application.xml"))
        .arg("launcher")
        .assert()
        .failure()
        .stderr(predicate::str::contains("application"));
}

#[test]
fn test_cli_missing_path_fails() {
    manifestquery()
        .arg(fixtures_path().join("nope"))
        .arg("sdk")
        .assert()
        .failure();
}
