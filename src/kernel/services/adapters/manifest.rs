//! Manifest discovery: every `<dir>/<entry>/manifest.json` whose `type`
//! matches is one widget (or theme).

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::kernel::services::ports::{ManifestEntry, ManifestSource};

const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(flatten)]
    entry: ManifestEntry,
}

#[derive(Debug, Clone)]
pub struct JsonManifestSource {
    dirs: Vec<PathBuf>,
    kind: &'static str,
    entries: Vec<ManifestEntry>,
}

impl JsonManifestSource {
    pub fn scan(dirs: &[PathBuf], kind: &'static str) -> Self {
        let mut source = Self {
            dirs: dirs.to_vec(),
            kind,
            entries: Vec::new(),
        };
        source.rescan();
        source
    }

    pub fn rescan(&mut self) {
        let mut entries = Vec::new();
        for dir in &self.dirs {
            scan_dir(dir, self.kind, &mut entries);
        }
        tracing::debug!(kind = self.kind, count = entries.len(), "manifests scanned");
        self.entries = entries;
    }
}

impl ManifestSource for JsonManifestSource {
    fn list(&self) -> Vec<ManifestEntry> {
        self.entries.clone()
    }
}

fn scan_dir(dir: &Path, kind: &str, out: &mut Vec<ManifestEntry>) {
    let read = match std::fs::read_dir(dir) {
        Ok(read) => read,
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "manifest dir not readable");
            return;
        }
    };

    let mut paths: Vec<PathBuf> = read
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    paths.sort();

    for path in paths {
        let manifest_path = path.join(MANIFEST_FILE);
        let Ok(data) = std::fs::read_to_string(&manifest_path) else {
            continue;
        };
        let raw: RawManifest = match serde_json::from_str(&data) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(path = %manifest_path.display(), error = %e, "bad manifest");
                continue;
            }
        };
        if raw.kind.as_deref().is_some_and(|k| k != kind) {
            continue;
        }
        // Later directories (user data) shadow earlier ones (bundled data).
        out.retain(|e| e.id != raw.entry.id);
        out.push(ManifestEntry { path, ..raw.entry });
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/manifest.rs"]
mod tests;
