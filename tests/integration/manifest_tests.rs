//! Integration tests for manifest queries
//!
//! These tests run every query against the fixture manifests and check that
//! saving and re-loading a manifest keeps the answers unchanged.

use manifestquery::config::Config;
use manifestquery::discovery::FileFinder;
use manifestquery::manifest::{ComponentKind, ManifestError, ManifestIndex, MIN_SDK_VERSION};
use std::path::PathBuf;

/// Get the path to the test fixtures directory
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn notes_manifest() -> PathBuf {
    fixtures_path().join("project/app/src/main/AndroidManifest.xml")
}

fn load(path: PathBuf) -> ManifestIndex {
    ManifestIndex::from_path(&path).expect("Failed to load fixture")
}

// ============================================================================
// Basic queries
// ============================================================================

#[test]
fn test_package_and_application() {
    let index = load(notes_manifest());
    assert_eq!(index.package(), "com.example.notes");
    assert_eq!(
        index.application_class_name().as_deref(),
        Some("com.example.notes.NotesApplication")
    );
}

#[test]
fn test_launcher_activity() {
    let index = load(notes_manifest());
    assert_eq!(
        index.launcher().as_deref(),
        Some("com.example.notes.ui.NotesListActivity")
    );
}

#[test]
fn test_permissions_in_declaration_order() {
    let index = load(notes_manifest());
    assert_eq!(
        index.permissions(),
        vec![
            "android.permission.INTERNET",
            "android.permission.CAMERA",
            "android.permission.INTERNET",
            "android.permission.RECEIVE_BOOT_COMPLETED",
        ]
    );
}

#[test]
fn test_sdk_version() {
    assert_eq!(load(notes_manifest()).sdk_version(), 21);
    assert_eq!(load(fixtures_path().join("protected_app.xml")).sdk_version(), 21);
    assert_eq!(load(fixtures_path().join("minimal.xml")).sdk_version(), MIN_SDK_VERSION);
}

#[test]
fn test_resolve_against_package() {
    let index = load(notes_manifest());
    assert_eq!(index.resolve(".Main"), "com.example.notes.Main");
    assert_eq!(index.resolve("Login"), "com.example.notes.Login");
    assert_eq!(index.resolve("org.other.Main"), "org.other.Main");
}

// ============================================================================
// Component protection
// ============================================================================

#[test]
fn test_activities() {
    let index = load(notes_manifest());
    let activities = index.components(ComponentKind::Activity);

    assert_eq!(
        activities.permission_for("com.example.notes.EditorActivity"),
        Some("com.example.notes.permission.EDIT")
    );
    assert_eq!(
        activities.unprotected,
        vec![
            "com.example.notes.SplashActivity",
            "com.example.notes.ui.NotesListActivity",
        ]
    );
    // Disabled activity appears nowhere
    assert!(!activities.is_protected("com.example.notes.debug.DebugActivity"));
    assert!(!activities
        .unprotected
        .contains(&"com.example.notes.debug.DebugActivity".to_string()));
}

#[test]
fn test_services_receivers_providers() {
    let index = load(notes_manifest());

    let services = index.components(ComponentKind::Service);
    assert_eq!(services.unprotected, vec!["com.example.notes.sync.SyncService"]);
    assert!(services.protected.is_empty());

    let receivers = index.find_components("receiver");
    assert_eq!(
        receivers.permission_for("com.example.notes.BootReceiver"),
        Some("android.permission.RECEIVE_BOOT_COMPLETED")
    );

    let providers = index.components(ComponentKind::Provider);
    assert_eq!(
        providers.permission_for("com.example.notes.data.NotesProvider"),
        Some("com.example.notes.permission.READ")
    );
    assert_eq!(
        providers.permission_for("com.example.notes.data.ExportProvider"),
        Some("com.example.notes.permission.WRITE")
    );
    assert!(providers.unprotected.is_empty());
}

#[test]
fn test_application_permission_applies_by_default() {
    let index = load(fixtures_path().join("protected_app.xml"));

    let activities = index.components(ComponentKind::Activity);
    assert_eq!(activities.permission_for("com.example.secure.Home"), Some("com.example.secure.P0"));
    assert_eq!(activities.permission_for("com.example.secure.Gallery"), Some("com.example.secure.P0"));
    assert_eq!(activities.permission_for("com.example.secure.Viewer"), Some("com.example.secure.P1"));
    assert!(!activities.is_protected("com.example.secure.Hidden"));
    assert!(activities.unprotected.is_empty());

    let services = index.components(ComponentKind::Service);
    assert_eq!(services.permission_for("com.example.secure.Worker"), Some("com.example.secure.P0"));
}

#[test]
fn test_no_launcher_when_markers_split_across_activities() {
    let index = load(fixtures_path().join("protected_app.xml"));
    assert_eq!(index.launcher(), None);
}

#[test]
fn test_minimal_manifest_has_empty_results() {
    let index = load(fixtures_path().join("minimal.xml"));
    assert_eq!(index.launcher(), None);
    assert_eq!(index.application_class_name(), None);
    assert!(index.permissions().is_empty());
    for kind in ComponentKind::ALL {
        assert!(index.components(kind).is_empty(), "{} should be empty", kind);
    }
}

#[test]
fn test_queries_are_repeatable() {
    let index = load(notes_manifest());
    let first = index.summary(&["activity", "service", "receiver", "provider"]);
    let second = index.summary(&["activity", "service", "receiver", "provider"]);
    assert_eq!(first, second);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_missing_application_is_fatal() {
    let err = ManifestIndex::from_path(&fixtures_path().join("missing_application.xml")).unwrap_err();
    assert!(matches!(err, ManifestError::MissingApplication));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = ManifestIndex::from_path(&fixtures_path().join("does_not_exist.xml")).unwrap_err();
    assert!(matches!(err, ManifestError::Read { .. }));
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn test_save_round_trip_keeps_query_results() {
    let tags = ["activity", "activity-alias", "service", "receiver", "provider"];
    for fixture in [notes_manifest(), fixtures_path().join("protected_app.xml")] {
        let index = load(fixture.clone());
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("AndroidManifest.xml");

        let message = index.save(&dest).unwrap();
        assert!(message.contains(&dest.display().to_string()));

        let reloaded = load(dest);
        assert_eq!(reloaded.summary(&tags), index.summary(&tags), "{}", fixture.display());
    }
}

#[test]
fn test_save_overwrites_existing_file() {
    let index = load(fixtures_path().join("minimal.xml"));
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("out.xml");
    std::fs::write(&dest, "stale content that is much longer than the manifest itself ........").unwrap();

    index.save(&dest).unwrap();
    let written = std::fs::read_to_string(&dest).unwrap();
    assert!(!written.contains("stale"));
    assert_eq!(written, std::fs::read_to_string(fixtures_path().join("minimal.xml")).unwrap());
}

#[test]
fn test_save_keeps_byte_order_mark() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("bom.xml");
    let mut original = vec![0xef, 0xbb, 0xbf];
    original.extend(std::fs::read(notes_manifest()).unwrap());
    std::fs::write(&source, &original).unwrap();

    let index = load(source);
    assert_eq!(index.package(), "com.example.notes");

    let dest = dir.path().join("saved.xml");
    index.save(&dest).unwrap();
    assert_eq!(std::fs::read(&dest).unwrap(), original);
}

#[test]
fn test_save_to_missing_directory_fails() {
    let index = load(fixtures_path().join("minimal.xml"));
    let dir = tempfile::tempdir().unwrap();
    let err = index.save(&dir.path().join("missing/dir/out.xml")).unwrap_err();
    assert!(matches!(err, ManifestError::Write { .. }));
}

#[test]
fn test_edits_are_saved() {
    let mut index = load(fixtures_path().join("minimal.xml"));
    let app = index.document().query("/manifest/application")[0].id();
    index.document_mut().set_attribute(app, "permission", "org.sample.P");

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("edited.xml");
    index.save(&dest).unwrap();

    let reloaded = load(dest);
    let app = reloaded.document().query("/manifest/application")[0];
    assert_eq!(app.attribute("permission"), Some("org.sample.P"));
}

// ============================================================================
// Discovery
// ============================================================================

#[test]
fn test_locate_manifest_in_project() {
    let config = Config::default();
    let found = FileFinder::new(&config)
        .locate(&fixtures_path().join("project"))
        .unwrap();
    assert_eq!(found, notes_manifest());
}
