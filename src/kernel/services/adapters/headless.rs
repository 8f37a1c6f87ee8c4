//! Headless toolkit/engine adapters. They keep the same bookkeeping a real
//! window would, and log what a toolkit would be asked to do.

use std::path::PathBuf;

use crate::core::{Pos, Size};
use crate::kernel::services::ports::{
    CursorKind, LayerHost, SurfaceError, SurfaceRequest, WidgetFactory, WidgetSurface,
    WindowTypeHint,
};
use crate::kernel::signal::SignalEmitter;
use crate::kernel::widget::InstanceId;

const DEFAULT_SKIN: &str = "skins/default";
const DATA_DIR: &str = "data";

#[derive(Debug)]
pub struct HeadlessLayerHost {
    screen: Size,
    visible: bool,
    hint: WindowTypeHint,
    opacity: f64,
}

impl HeadlessLayerHost {
    pub fn new(screen: Size) -> Self {
        Self {
            screen,
            visible: false,
            hint: WindowTypeHint::default(),
            opacity: 1.0,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn type_hint(&self) -> WindowTypeHint {
        self.hint
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }
}

impl LayerHost for HeadlessLayerHost {
    fn screen_size(&self) -> Size {
        self.screen
    }

    fn place(&mut self, child: &InstanceId, pos: Pos) {
        tracing::trace!(child = %child, x = pos.x, y = pos.y, "place");
    }

    fn move_child(&mut self, child: &InstanceId, pos: Pos) {
        tracing::trace!(child = %child, x = pos.x, y = pos.y, "move");
    }

    fn raise_child(&mut self, child: &InstanceId) {
        tracing::trace!(child = %child, "raise");
    }

    fn remove_child(&mut self, child: &InstanceId) {
        tracing::trace!(child = %child, "remove");
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
    }

    fn set_type_hint(&mut self, hint: WindowTypeHint) {
        tracing::debug!(?hint, "type hint");
        self.hint = hint;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn show(&mut self) {
        self.visible = true;
    }

    fn invalidate(&mut self, _alpha: f64) {}
}

/// Creates [`HeadlessSurface`]s of a fixed size.
#[derive(Debug, Clone)]
pub struct HeadlessWidgetFactory {
    size: Size,
}

impl HeadlessWidgetFactory {
    pub fn new(size: Size) -> Self {
        Self { size }
    }
}

impl Default for HeadlessWidgetFactory {
    fn default() -> Self {
        Self::new(Size::new(200, 200))
    }
}

impl WidgetFactory for HeadlessWidgetFactory {
    fn create(
        &mut self,
        request: SurfaceRequest<'_>,
    ) -> Result<Box<dyn WidgetSurface>, SurfaceError> {
        let root = request.manifest.path.clone();
        if !root.is_dir() {
            return Err(SurfaceError::Load {
                path: root,
                reason: "widget directory does not exist".to_string(),
            });
        }
        let skin = match request.profile {
            Some(profile) if root.join("skins").join(profile).is_dir() => {
                root.join("skins").join(profile)
            }
            _ => root.join(DEFAULT_SKIN),
        };
        Ok(Box::new(HeadlessSurface {
            root,
            skin,
            position: Pos::default(),
            size: self.size,
            cursor: CursorKind::Default,
            moving: false,
            loads: 0,
            emitter: request.emitter,
        }))
    }
}

pub struct HeadlessSurface {
    root: PathBuf,
    skin: PathBuf,
    position: Pos,
    size: Size,
    cursor: CursorKind,
    moving: bool,
    loads: usize,
    emitter: SignalEmitter,
}

impl HeadlessSurface {
    pub fn cursor(&self) -> CursorKind {
        self.cursor
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn load_count(&self) -> usize {
        self.loads
    }
}

impl WidgetSurface for HeadlessSurface {
    fn position(&self) -> Pos {
        self.position
    }

    fn set_position(&mut self, pos: Pos) {
        self.position = pos;
    }

    fn size(&self) -> Size {
        self.size
    }

    fn load(&mut self) -> Result<(), SurfaceError> {
        if !self.skin.is_dir() {
            return Err(SurfaceError::Load {
                path: self.skin.clone(),
                reason: "skin directory does not exist".to_string(),
            });
        }
        self.loads += 1;
        tracing::debug!(
            instance = %self.emitter.instance(),
            skin = %self.skin.display(),
            loads = self.loads,
            "surface loaded"
        );
        Ok(())
    }

    fn remove(&mut self) {
        tracing::debug!(instance = %self.emitter.instance(), "surface removed");
    }

    fn begin_move(&mut self) {
        self.moving = true;
    }

    fn end_move(&mut self) {
        self.moving = false;
    }

    fn set_cursor(&mut self, cursor: CursorKind) {
        self.cursor = cursor;
    }

    fn clear_hover(&mut self) {}

    fn data_path(&self) -> PathBuf {
        self.root.join(DATA_DIR)
    }

    fn skin_path(&self) -> PathBuf {
        self.skin.clone()
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/headless.rs"]
mod tests;
