use std::path::PathBuf;

use crate::core::{Pos, Size};
use crate::kernel::signal::SignalEmitter;
use crate::kernel::widget::InstanceId;

use super::manifest::ManifestEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorKind {
    #[default]
    Default,
    Move,
}

#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("failed to load widget from {path}: {reason}")]
    Load { path: PathBuf, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Per-widget handle owned by the rendering engine.
pub trait WidgetSurface {
    fn position(&self) -> Pos;
    fn set_position(&mut self, pos: Pos);
    fn size(&self) -> Size;

    /// (Re)loads markup and scripts from disk.
    fn load(&mut self) -> Result<(), SurfaceError>;
    /// Tears the view down. The surface is not used afterwards.
    fn remove(&mut self);

    fn begin_move(&mut self);
    fn end_move(&mut self);
    fn set_cursor(&mut self, cursor: CursorKind);
    /// Synthetic mouse-leave for every element the script context still
    /// considers hovered.
    fn clear_hover(&mut self);

    fn data_path(&self) -> PathBuf;
    fn skin_path(&self) -> PathBuf;
}

/// What the factory needs to bring one widget instance up.
pub struct SurfaceRequest<'a> {
    pub manifest: &'a ManifestEntry,
    pub instance_id: &'a InstanceId,
    pub profile: Option<&'a str>,
    pub emitter: SignalEmitter,
}

pub trait WidgetFactory {
    fn create(&mut self, request: SurfaceRequest<'_>) -> Result<Box<dyn WidgetSurface>, SurfaceError>;
}
