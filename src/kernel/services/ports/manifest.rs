use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const WIDGET_KIND: &str = "org.cream.melange.Widget";
pub const THEME_KIND: &str = "org.cream.melange.Theme";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub id: String,
    pub name: String,
    /// Directory the manifest was found in.
    #[serde(skip)]
    pub path: PathBuf,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Externally supplied theme record; only `path` is read by the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub id: String,
    pub name: String,
    pub path: PathBuf,
}

impl From<&ManifestEntry> for Theme {
    fn from(entry: &ManifestEntry) -> Self {
        Self {
            id: entry.id.clone(),
            name: entry.name.clone(),
            path: entry.path.clone(),
        }
    }
}

pub trait ManifestSource {
    fn list(&self) -> Vec<ManifestEntry>;

    fn find_by_name(&self, name: &str) -> Option<ManifestEntry> {
        self.list().into_iter().find(|m| m.name == name)
    }

    fn find_by_id(&self, id: &str) -> Option<ManifestEntry> {
        self.list().into_iter().find(|m| m.id == id)
    }
}
