//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod content;
pub mod headless;
pub mod manifest;
pub mod paths;
pub mod settings;

pub use content::{ContentError, ContentRoots, ContentRouter, ContentServer, ContentServerHandle};
pub use headless::{HeadlessLayerHost, HeadlessSurface, HeadlessWidgetFactory};
pub use manifest::JsonManifestSource;
pub use paths::{ensure_log_dir, get_app_data_root, get_cache_dir, get_log_dir};
pub use settings::{
    ensure_settings_file, get_settings_path, load_settings, load_settings_from,
    read_settings_from, save_settings_to,
};
