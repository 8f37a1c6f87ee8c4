//! Recording doubles for the toolkit and rendering-engine ports.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use crate::core::{Pos, Size};

use super::services::ports::{
    CursorKind, LayerHost, SurfaceError, WidgetSurface, WindowTypeHint,
};
use super::widget::{InstanceId, Widget};

#[derive(Debug, Clone, PartialEq)]
pub enum HostOp {
    Place(InstanceId, Pos),
    Move(InstanceId, Pos),
    Raise(InstanceId),
    Remove(InstanceId),
    Opacity(f64),
    TypeHint(WindowTypeHint),
    Hide,
    Show,
    Invalidate(f64),
}

#[derive(Clone)]
pub struct RecordingHost {
    screen: Size,
    pub ops: Rc<RefCell<Vec<HostOp>>>,
}

impl RecordingHost {
    pub fn new(screen: Size) -> Self {
        Self {
            screen,
            ops: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn take_ops(&self) -> Vec<HostOp> {
        std::mem::take(&mut *self.ops.borrow_mut())
    }
}

impl LayerHost for RecordingHost {
    fn screen_size(&self) -> Size {
        self.screen
    }

    fn place(&mut self, child: &InstanceId, pos: Pos) {
        self.ops.borrow_mut().push(HostOp::Place(child.clone(), pos));
    }

    fn move_child(&mut self, child: &InstanceId, pos: Pos) {
        self.ops.borrow_mut().push(HostOp::Move(child.clone(), pos));
    }

    fn raise_child(&mut self, child: &InstanceId) {
        self.ops.borrow_mut().push(HostOp::Raise(child.clone()));
    }

    fn remove_child(&mut self, child: &InstanceId) {
        self.ops.borrow_mut().push(HostOp::Remove(child.clone()));
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.ops.borrow_mut().push(HostOp::Opacity(opacity));
    }

    fn set_type_hint(&mut self, hint: WindowTypeHint) {
        self.ops.borrow_mut().push(HostOp::TypeHint(hint));
    }

    fn hide(&mut self) {
        self.ops.borrow_mut().push(HostOp::Hide);
    }

    fn show(&mut self) {
        self.ops.borrow_mut().push(HostOp::Show);
    }

    fn invalidate(&mut self, alpha: f64) {
        self.ops.borrow_mut().push(HostOp::Invalidate(alpha));
    }
}

#[derive(Debug, Default)]
pub struct SurfaceLog {
    pub position: Pos,
    pub loads: usize,
    pub removed: bool,
    pub in_move: bool,
    pub cursor: CursorKind,
    pub hover_clears: usize,
    pub fail_next_load: bool,
}

pub struct RecordingSurface {
    size: Size,
    root: PathBuf,
    pub log: Rc<RefCell<SurfaceLog>>,
}

impl RecordingSurface {
    pub fn new(pos: Pos, size: Size, root: impl Into<PathBuf>) -> Self {
        let log = SurfaceLog {
            position: pos,
            ..SurfaceLog::default()
        };
        Self {
            size,
            root: root.into(),
            log: Rc::new(RefCell::new(log)),
        }
    }
}

impl WidgetSurface for RecordingSurface {
    fn position(&self) -> Pos {
        self.log.borrow().position
    }

    fn set_position(&mut self, pos: Pos) {
        self.log.borrow_mut().position = pos;
    }

    fn size(&self) -> Size {
        self.size
    }

    fn load(&mut self) -> Result<(), SurfaceError> {
        let mut log = self.log.borrow_mut();
        if std::mem::take(&mut log.fail_next_load) {
            return Err(SurfaceError::Load {
                path: self.root.clone(),
                reason: "scripted failure".to_string(),
            });
        }
        log.loads += 1;
        Ok(())
    }

    fn remove(&mut self) {
        self.log.borrow_mut().removed = true;
    }

    fn begin_move(&mut self) {
        self.log.borrow_mut().in_move = true;
    }

    fn end_move(&mut self) {
        self.log.borrow_mut().in_move = false;
    }

    fn set_cursor(&mut self, cursor: CursorKind) {
        self.log.borrow_mut().cursor = cursor;
    }

    fn clear_hover(&mut self) {
        self.log.borrow_mut().hover_clears += 1;
    }

    fn data_path(&self) -> PathBuf {
        self.root.join("data")
    }

    fn skin_path(&self) -> PathBuf {
        self.root.join("skin")
    }
}

/// Widget backed by a [`RecordingSurface`]; the log handle stays readable
/// after the widget moves into a registry.
pub fn recording_widget(
    id: &str,
    pos: Pos,
    size: Size,
    root: impl Into<PathBuf>,
) -> (Widget, Rc<RefCell<SurfaceLog>>) {
    let surface = RecordingSurface::new(pos, size, root);
    let log = Rc::clone(&surface.log);
    let widget = Widget::new(InstanceId::new(id), id, Box::new(surface));
    (widget, log)
}
