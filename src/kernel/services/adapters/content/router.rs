use regex::Regex;
use rustc_hash::FxHashMap;
use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

use super::{ContentError, ContentRoots};
use crate::kernel::assets::{AssetIndex, WidgetAssets};

pub type Query = FxHashMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// `<widget data dir>/{file}`, needs `instance`.
    Data,
    /// `<widget skin dir>/{file}`, needs `instance`.
    Widget,
    /// `<common dir>/{file}`.
    Common,
    /// `<theme dir>/{file}`, by `instance` or the default theme.
    Theme,
}

const ROUTES: &[(&str, RouteKind)] = &[
    (r"^/data/(?P<file>.*)$", RouteKind::Data),
    (r"^/widget/(?P<file>.*)$", RouteKind::Widget),
    (r"^/common/(?P<file>.*)$", RouteKind::Common),
    (r"^/theme/(?P<file>.*)$", RouteKind::Theme),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub kind: RouteKind,
    /// Percent-decoded `file` capture.
    pub file: String,
}

#[derive(Debug)]
struct Route {
    pattern: Regex,
    kind: RouteKind,
}

/// Ordered route table; the first matching pattern wins.
#[derive(Debug)]
pub struct ContentRouter {
    routes: Vec<Route>,
    roots: ContentRoots,
}

impl ContentRouter {
    pub fn new(roots: ContentRoots) -> Result<Self, regex::Error> {
        let routes = ROUTES
            .iter()
            .map(|(pattern, kind)| {
                Ok(Route {
                    pattern: Regex::new(pattern)?,
                    kind: *kind,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { routes, roots })
    }

    pub fn roots(&self) -> &ContentRoots {
        &self.roots
    }

    pub fn dispatch(&self, path: &str) -> Option<RouteMatch> {
        self.routes.iter().find_map(|route| {
            let caps = route.pattern.captures(path)?;
            let file = caps.name("file").map_or("", |m| m.as_str());
            Some(RouteMatch {
                kind: route.kind,
                file: decode(file).into_owned(),
            })
        })
    }

    /// Maps a request target (`path[?query]`) to a file on disk. No I/O.
    pub fn resolve(&self, target: &str) -> Result<PathBuf, ContentError> {
        let (path, query) = split_target(target);
        let found = self
            .dispatch(path)
            .ok_or_else(|| ContentError::RouteNotFound(path.to_string()))?;
        let query = parse_query(query);
        self.resolve_match(&found, &query)
    }

    pub fn resolve_match(&self, found: &RouteMatch, query: &Query) -> Result<PathBuf, ContentError> {
        let file = relative_file(&found.file)?;
        // `instance=` with no value counts as absent.
        let instance = query
            .get("instance")
            .map(String::as_str)
            .filter(|id| !id.is_empty());
        let assets = &self.roots.assets;

        let base = match found.kind {
            RouteKind::Data => lookup(assets, instance)?.data_path,
            RouteKind::Widget => lookup(assets, instance)?.skin_path,
            RouteKind::Common => self.roots.common_dir.clone(),
            RouteKind::Theme => match instance {
                Some(id) if !assets.contains(id) => {
                    return Err(ContentError::UnknownInstance(Some(id.to_string())))
                }
                _ => assets
                    .theme_for(instance)
                    .ok_or_else(|| ContentError::AssetNotFound(file.to_path_buf()))?,
            },
        };
        Ok(base.join(file))
    }
}

fn lookup(assets: &AssetIndex, instance: Option<&str>) -> Result<WidgetAssets, ContentError> {
    instance
        .and_then(|id| assets.lookup(id))
        .ok_or_else(|| ContentError::UnknownInstance(instance.map(str::to_string)))
}

/// Rejects anything that could escape the route's base directory.
fn relative_file(file: &str) -> Result<&Path, ContentError> {
    let path = Path::new(file);
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(ContentError::Forbidden(file.to_string()));
    }
    Ok(path)
}

pub fn split_target(target: &str) -> (&str, &str) {
    match target.split_once('?') {
        Some((path, query)) => (path, query),
        None => (target, ""),
    }
}

/// `a=b&c=d` into a map. `+` is a space, values are percent-decoded and
/// the first occurrence of a key wins.
pub fn parse_query(query: &str) -> Query {
    let mut params = Query::default();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = decode(&key.replace('+', " ")).into_owned();
        let value = decode(&value.replace('+', " ")).into_owned();
        params.entry(key).or_insert(value);
    }
    params
}

fn decode(raw: &str) -> Cow<'_, str> {
    urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw))
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/content/router.rs"]
mod tests;
