//! Id → path table shared with the content server.
//!
//! The GUI thread is the only writer. Readers take the lock for the lookup
//! alone and get owned paths back, so no lock is ever held across file I/O.

use rustc_hash::FxHashMap;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use super::widget::InstanceId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetAssets {
    pub data_path: PathBuf,
    pub skin_path: PathBuf,
    /// `None` means the widget follows the default theme.
    pub theme_path: Option<PathBuf>,
}

#[derive(Debug, Default)]
struct AssetTable {
    widgets: FxHashMap<InstanceId, WidgetAssets>,
    default_theme: Option<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct AssetIndex {
    inner: Arc<RwLock<AssetTable>>,
}

impl AssetIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, id: InstanceId, assets: WidgetAssets) {
        let mut table = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        table.widgets.insert(id, assets);
    }

    pub fn retract(&self, id: &str) -> bool {
        let mut table = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        table.widgets.remove(id).is_some()
    }

    pub fn lookup(&self, id: &str) -> Option<WidgetAssets> {
        let table = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        table.widgets.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        let table = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        table.widgets.contains_key(id)
    }

    pub fn len(&self) -> usize {
        let table = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        table.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn set_default_theme(&self, path: Option<PathBuf>) {
        let mut table = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        table.default_theme = path;
    }

    pub fn default_theme(&self) -> Option<PathBuf> {
        let table = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        table.default_theme.clone()
    }

    /// Theme directory for `instance`, falling back to the default theme
    /// when no instance is given or the widget has no theme of its own.
    /// An instance that is not registered resolves to nothing.
    pub fn theme_for(&self, instance: Option<&str>) -> Option<PathBuf> {
        let table = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        match instance {
            Some(id) => {
                let assets = table.widgets.get(id)?;
                assets
                    .theme_path
                    .clone()
                    .or_else(|| table.default_theme.clone())
            }
            None => table.default_theme.clone(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/assets.rs"]
mod tests;
