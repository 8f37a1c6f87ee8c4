use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::config::{OverlayConfig, ScreenConfig, ServerConfig};

/// Key that arms widget dragging unless configured otherwise.
pub const DEFAULT_MOVE_MODIFIER: &str = "Super_L";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub overlay: OverlayConfig,
    #[serde(default)]
    pub screen: ScreenConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_theme: Option<String>,
    #[serde(default = "default_move_modifier")]
    pub move_modifier: String,
    #[serde(default)]
    pub widget_dirs: Vec<PathBuf>,
    #[serde(default)]
    pub theme_dirs: Vec<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_dir: Option<PathBuf>,
    /// Widgets restored at startup, written back on quit.
    #[serde(default)]
    pub widgets: Vec<WidgetPlacement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetPlacement {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    /// Theme id; absent means the widget follows the default theme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

fn default_move_modifier() -> String {
    DEFAULT_MOVE_MODIFIER.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            overlay: OverlayConfig::default(),
            screen: ScreenConfig::default(),
            default_theme: None,
            move_modifier: default_move_modifier(),
            widget_dirs: Vec::new(),
            theme_dirs: Vec::new(),
            common_dir: None,
            widgets: Vec::new(),
        }
    }
}
