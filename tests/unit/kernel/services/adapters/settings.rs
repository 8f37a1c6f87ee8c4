use super::*;
use crate::kernel::services::ports::WidgetPlacement;
use tempfile::tempdir;

#[test]
fn ensure_creates_default_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    ensure_settings_file_at(&path).unwrap();

    let loaded = load_settings_from(&path).unwrap();
    assert_eq!(loaded.server.port, 8080);
    assert_eq!(loaded.move_modifier, "Super_L");
    assert!(loaded.widgets.is_empty());
}

#[test]
fn ensure_leaves_existing_file_alone() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{"default_theme":"org.cream.Dark"}"#).unwrap();

    ensure_settings_file_at(&path).unwrap();

    let loaded = load_settings_from(&path).unwrap();
    assert_eq!(loaded.default_theme.as_deref(), Some("org.cream.Dark"));
}

#[test]
fn saved_widgets_are_restored() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let mut settings = Settings::default();
    settings.widgets.push(WidgetPlacement {
        name: "Clock".to_string(),
        x: Some(12),
        y: Some(34),
        profile: Some("big".to_string()),
        theme: Some("org.cream.Dark".to_string()),
    });

    save_settings_to(&path, &settings).unwrap();

    let loaded = load_settings_from(&path).unwrap();
    assert_eq!(loaded.widgets, settings.widgets);
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn malformed_file_loads_as_none() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(load_settings_from(&path).is_none());
}

#[test]
fn malformed_file_is_rejected_and_kept() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = read_settings_from(&path).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);

    ensure_settings_file_at(&path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempdir().unwrap();
    let err = read_settings_from(&dir.path().join("absent.json")).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}
