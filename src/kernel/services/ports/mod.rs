//! Service ports: traits + data contracts.

pub mod config;
pub mod hotkey;
pub mod layer_host;
pub mod manifest;
pub mod settings;
pub mod surface;

pub use config::{OverlayConfig, ScreenConfig, ServerConfig};
pub use hotkey::HotkeyAction;
pub use layer_host::{LayerHost, WindowTypeHint};
pub use manifest::{ManifestEntry, ManifestSource, Theme, THEME_KIND, WIDGET_KIND};
pub use settings::{Settings, WidgetPlacement, DEFAULT_MOVE_MODIFIER};
pub use surface::{CursorKind, SurfaceError, SurfaceRequest, WidgetFactory, WidgetSurface};
