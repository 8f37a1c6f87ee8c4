//! Local HTTP server answering asset requests issued by widget scripts.

pub mod mime;
pub mod router;
pub mod server;

use std::path::PathBuf;

use crate::kernel::assets::AssetIndex;

pub use router::{parse_query, ContentRouter, Query, RouteKind, RouteMatch};
pub use server::{ContentServer, ContentServerHandle};

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("no route for {0}")]
    RouteNotFound(String),
    #[error("unknown widget instance: {0:?}")]
    UnknownInstance(Option<String>),
    #[error("asset not found: {}", .0.display())]
    AssetNotFound(PathBuf),
    #[error("forbidden path: {0}")]
    Forbidden(String),
    #[error("handler fault: {0}")]
    HandlerFault(String),
}

impl ContentError {
    pub fn status(&self) -> u16 {
        match self {
            Self::RouteNotFound(_)
            | Self::UnknownInstance(_)
            | Self::AssetNotFound(_)
            | Self::Forbidden(_) => 404,
            Self::HandlerFault(_) => 500,
        }
    }
}

/// Where the routes resolve to.
#[derive(Debug, Clone)]
pub struct ContentRoots {
    pub assets: AssetIndex,
    pub common_dir: PathBuf,
}

impl ContentRoots {
    pub fn new(assets: AssetIndex, common_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets,
            common_dir: common_dir.into(),
        }
    }
}
