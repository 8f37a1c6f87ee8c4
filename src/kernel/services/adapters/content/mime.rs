use std::path::Path;

const TYPES: &[(&str, &str)] = &[
    ("html", "text/html"),
    ("htm", "text/html"),
    ("css", "text/css"),
    ("js", "application/javascript"),
    ("json", "application/json"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("svg", "image/svg+xml"),
    ("ogg", "audio/ogg"),
    ("ttf", "font/ttf"),
];

/// Best-effort content type from the file extension.
pub fn guess(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?;
    TYPES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(ext))
        .map(|(_, mime)| *mime)
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/content/mime.rs"]
mod tests;
