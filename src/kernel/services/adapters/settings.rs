use crate::kernel::services::ports::settings::Settings;
use std::path::{Path, PathBuf};

use super::paths::get_cache_dir;

const SETTINGS_DIR: &str = ".melange";
const SETTINGS_FILE: &str = "settings.json";
const SETTINGS_ENV: &str = "MELANGE_SETTINGS";

pub fn get_settings_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(SETTINGS_ENV) {
        return Some(PathBuf::from(path));
    }
    get_cache_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
}

pub fn ensure_settings_file() -> std::io::Result<PathBuf> {
    let path = get_settings_path().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine settings directory",
        )
    })?;
    ensure_settings_file_at(&path)?;
    Ok(path)
}

pub fn ensure_settings_file_at(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    if !path.exists() {
        save_settings_to(path, &Settings::default())?;
    }
    Ok(())
}

pub fn load_settings() -> Option<Settings> {
    load_settings_from(&get_settings_path()?)
}

/// Lenient read: a missing or malformed file is `None`.
pub fn load_settings_from(path: &Path) -> Option<Settings> {
    match read_settings_from(path) {
        Ok(settings) => Some(settings),
        Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
            tracing::warn!(path = %path.display(), error = %e, "settings file is malformed");
            None
        }
        Err(_) => None,
    }
}

/// Strict read: a file that does not parse is `InvalidData`, so callers can
/// refuse to start rather than later overwrite it with defaults.
pub fn read_settings_from(path: &Path) -> std::io::Result<Settings> {
    let data = std::fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

pub fn save_settings_to(path: &Path, settings: &Settings) -> std::io::Result<()> {
    let content = serde_json::to_string_pretty(settings)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    // Sibling temp file, renamed into place.
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, content)?;
    std::fs::rename(&tmp, path)
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/settings.rs"]
mod tests;
