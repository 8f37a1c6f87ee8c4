use super::*;
use crate::kernel::services::ports::ManifestEntry;
use crate::kernel::signal::signal_bus;
use tempfile::tempdir;

fn manifest(path: PathBuf) -> ManifestEntry {
    ManifestEntry {
        id: "clock".to_string(),
        name: "Clock".to_string(),
        path,
        categories: Vec::new(),
        icon: None,
    }
}

#[test]
fn surface_paths_follow_widget_dir() {
    let root = tempdir().unwrap();
    std::fs::create_dir_all(root.path().join("skins/default")).unwrap();
    std::fs::create_dir_all(root.path().join("skins/mini")).unwrap();

    let (bus, _rx) = signal_bus();
    let entry = manifest(root.path().to_path_buf());
    let id = InstanceId::new("clock.1");
    let mut factory = HeadlessWidgetFactory::default();

    let mut surface = factory
        .create(SurfaceRequest {
            manifest: &entry,
            instance_id: &id,
            profile: Some("mini"),
            emitter: bus.emitter(id.clone()),
        })
        .unwrap();

    assert_eq!(surface.data_path(), root.path().join("data"));
    assert_eq!(surface.skin_path(), root.path().join("skins/mini"));
    assert_eq!(surface.size(), Size::new(200, 200));
    surface.load().unwrap();
}

#[test]
fn unknown_profile_falls_back_to_default_skin() {
    let root = tempdir().unwrap();
    let (bus, _rx) = signal_bus();
    let entry = manifest(root.path().to_path_buf());
    let id = InstanceId::new("clock.1");

    let mut surface = HeadlessWidgetFactory::default()
        .create(SurfaceRequest {
            manifest: &entry,
            instance_id: &id,
            profile: Some("nope"),
            emitter: bus.emitter(id.clone()),
        })
        .unwrap();

    assert_eq!(surface.skin_path(), root.path().join("skins/default"));
    assert!(matches!(surface.load(), Err(SurfaceError::Load { .. })));
}

#[test]
fn missing_widget_dir_fails_create() {
    let root = tempdir().unwrap();
    let (bus, _rx) = signal_bus();
    let entry = manifest(root.path().join("gone"));
    let id = InstanceId::new("clock.1");

    let result = HeadlessWidgetFactory::default().create(SurfaceRequest {
        manifest: &entry,
        instance_id: &id,
        profile: None,
        emitter: bus.emitter(id.clone()),
    });

    assert!(result.is_err());
}

#[test]
fn host_tracks_window_state() {
    let mut host = HeadlessLayerHost::new(Size::new(800, 600));
    assert!(!host.is_visible());
    host.show();
    host.set_type_hint(WindowTypeHint::Dock);
    host.set_opacity(0.5);
    assert!(host.is_visible());
    assert_eq!(host.type_hint(), WindowTypeHint::Dock);
    assert_eq!(host.opacity(), 0.5);
    assert_eq!(host.screen_size(), Size::new(800, 600));
}
