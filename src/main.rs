use anyhow::Context;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use melange::core::Size;
use melange::kernel::services::adapters::{
    ensure_settings_file, get_app_data_root, read_settings_from, save_settings_to, ContentRoots,
    ContentRouter, ContentServer, HeadlessLayerHost, HeadlessWidgetFactory, JsonManifestSource,
};
use melange::kernel::services::ports::{THEME_KIND, WIDGET_KIND};
use melange::kernel::{AssetIndex, CompositingLayer, OverlayController, RegistryEvent, Shell};

mod logging;
mod signals;

use signals::ProcessSignal;

fn main() -> anyhow::Result<()> {
    let _logging = logging::init();

    let settings_path = ensure_settings_file().context("creating settings file")?;
    // A settings file we cannot parse is left untouched for the user to fix.
    let mut settings = read_settings_from(&settings_path)
        .with_context(|| format!("reading settings from {}", settings_path.display()))?;
    let data_root = get_app_data_root();

    let widget_dirs = dirs_or_default(&settings.widget_dirs, data_root.as_deref(), "widgets");
    let theme_dirs = dirs_or_default(&settings.theme_dirs, data_root.as_deref(), "themes");
    let common_dir = settings
        .common_dir
        .clone()
        .or_else(|| data_root.as_ref().map(|root| root.join("common")))
        .unwrap_or_else(|| PathBuf::from("common"));

    let assets = AssetIndex::new();
    let router = ContentRouter::new(ContentRoots::new(assets.clone(), common_dir))
        .context("building content routes")?;
    let server = ContentServer::new(settings.server.clone(), router)
        .spawn()
        .with_context(|| format!("binding content server on {}", settings.server.bind_addr()))?;

    let screen = Size::new(settings.screen.width, settings.screen.height);
    let layer = CompositingLayer::new(Box::new(HeadlessLayerHost::new(screen)));
    let mut shell = Shell::new(
        layer,
        assets,
        OverlayController::from_config(&settings.overlay),
        Box::new(HeadlessWidgetFactory::default()),
        Box::new(JsonManifestSource::scan(&widget_dirs, WIDGET_KIND)),
        Box::new(JsonManifestSource::scan(&theme_dirs, THEME_KIND)),
    )
    .with_move_modifier(settings.move_modifier.clone());

    if let Err(e) = shell.set_default_theme(settings.default_theme.as_deref()) {
        tracing::warn!(error = %e, "default theme not applied");
    }
    let restored = shell.restore(&settings.widgets);
    tracing::info!(
        restored,
        configured = settings.widgets.len(),
        move_modifier = shell.move_modifier(),
        "shell ready"
    );

    let (tx, rx) = mpsc::channel();
    let _signals = signals::install(tx).context("installing signal handlers")?;
    let tick = Duration::from_millis(settings.overlay.tick_interval_ms.max(1));

    'main: loop {
        while let Ok(signal) = rx.try_recv() {
            match signal {
                ProcessSignal::Hotkey(action) => {
                    if let Err(e) = shell.on_hotkey(action, Instant::now()) {
                        tracing::debug!(action = action.name(), error = %e, "hotkey ignored");
                    }
                }
                ProcessSignal::SigInt | ProcessSignal::SigTerm => {
                    tracing::info!(?signal, "termination requested");
                    break 'main;
                }
            }
        }
        for event in shell.tick(Instant::now()) {
            match event {
                RegistryEvent::Added(id) => tracing::info!(instance = %id, "widget added"),
                RegistryEvent::Removed(id) => tracing::info!(instance = %id, "widget removed"),
            }
        }
        std::thread::sleep(tick);
    }

    settings.widgets = shell.placements();
    if let Err(e) = save_settings_to(&settings_path, &settings) {
        tracing::error!(path = %settings_path.display(), error = %e, "saving settings failed");
    }
    shell.shutdown();
    server.shutdown();
    Ok(())
}

fn dirs_or_default(configured: &[PathBuf], data_root: Option<&Path>, name: &str) -> Vec<PathBuf> {
    if !configured.is_empty() {
        return configured.to_vec();
    }
    data_root.map(|root| vec![root.join(name)]).unwrap_or_default()
}
