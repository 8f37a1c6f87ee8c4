//! The full-screen transparent surface hosting every widget view, and the
//! move-gesture state machine that decides who gets pointer input.

use crate::core::{LayerInput, MouseButton, Pos, Rect, Size};

use super::services::ports::{LayerHost, WindowTypeHint};
use super::widget::InstanceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Input goes straight to the widget under the pointer.
    #[default]
    Normal,
    /// Modifier held: widgets show the move cursor, nothing is dragged yet.
    MoveArmed,
    /// Modifier held and primary button down: pointer motion drags.
    Moving,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerEvent {
    BeginMove,
    EndMove,
    MoveDelta { target: InstanceId, dx: i32, dy: i32 },
    /// Pointer crossed the layer boundary; stale hover state must go.
    ClearHover,
    /// Normal-mode input the widget under the pointer handles itself.
    PassThrough(LayerInput),
    ContextMenu { pos: Pos },
}

#[derive(Debug, Clone, Default)]
pub struct LayerOutput {
    pub events: Vec<LayerEvent>,
    pub needs_redraw: bool,
}

impl LayerOutput {
    pub fn empty() -> Self {
        Self::default()
    }

    fn with(event: LayerEvent) -> Self {
        Self {
            events: vec![event],
            needs_redraw: false,
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    id: InstanceId,
    rect: Rect,
}

pub struct CompositingLayer {
    /// Paint order, front = last.
    entries: Vec<Entry>,
    mode: InputMode,
    grabbed: Option<InstanceId>,
    last_pointer: Option<Pos>,
    screen: Size,
    opacity: f64,
    alpha: f64,
    type_hint: WindowTypeHint,
    visible: bool,
    host: Box<dyn LayerHost>,
}

impl CompositingLayer {
    pub fn new(mut host: Box<dyn LayerHost>) -> Self {
        let screen = host.screen_size();
        host.set_type_hint(WindowTypeHint::Desktop);
        host.set_opacity(1.0);
        host.show();
        Self {
            entries: Vec::new(),
            mode: InputMode::Normal,
            grabbed: None,
            last_pointer: None,
            screen,
            opacity: 1.0,
            alpha: 0.0,
            type_hint: WindowTypeHint::Desktop,
            visible: true,
            host,
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn screen(&self) -> Size {
        self.screen
    }

    pub fn grabbed(&self) -> Option<&InstanceId> {
        self.grabbed.as_ref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    pub fn z_order(&self) -> impl Iterator<Item = &InstanceId> + '_ {
        self.entries.iter().map(|e| &e.id)
    }

    pub fn rect_of(&self, id: &str) -> Option<Rect> {
        self.index_of(id).map(|i| self.entries[i].rect)
    }

    /// Topmost widget under `pos`.
    pub fn hit_test(&self, pos: Pos) -> Option<&InstanceId> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.rect.contains(pos))
            .map(|e| &e.id)
    }

    pub fn add(&mut self, id: InstanceId, rect: Rect) {
        if let Some(i) = self.index_of(id.as_str()) {
            tracing::warn!(instance = %id, "layer add for hosted widget; replacing entry");
            self.entries.remove(i);
            self.host.remove_child(&id);
        }
        self.host.place(&id, rect.pos());
        self.entries.push(Entry { id, rect });
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let Some(i) = self.index_of(id) else {
            return false;
        };
        let entry = self.entries.remove(i);
        if self.grabbed.as_ref() == Some(&entry.id) {
            self.grabbed = None;
        }
        self.host.remove_child(&entry.id);
        true
    }

    pub fn raise(&mut self, id: &str) -> bool {
        let Some(i) = self.index_of(id) else {
            return false;
        };
        let entry = self.entries.remove(i);
        self.host.raise_child(&entry.id);
        self.entries.push(entry);
        true
    }

    /// Repaints the widget at `pos`; z-order is left alone.
    pub fn move_to(&mut self, id: &str, pos: Pos) -> bool {
        let Some(i) = self.index_of(id) else {
            return false;
        };
        let entry = &mut self.entries[i];
        entry.rect.x = pos.x;
        entry.rect.y = pos.y;
        self.host.move_child(&entry.id, pos);
        true
    }

    pub fn resize(&mut self, id: &str, size: Size) -> bool {
        let Some(i) = self.index_of(id) else {
            return false;
        };
        self.entries[i].rect.w = size.w;
        self.entries[i].rect.h = size.h;
        true
    }

    pub fn on_input(&mut self, input: &LayerInput) -> LayerOutput {
        match (*input, self.mode) {
            (LayerInput::PointerEnter | LayerInput::PointerLeave, _) => {
                LayerOutput::with(LayerEvent::ClearHover)
            }

            (LayerInput::ModifierDown, InputMode::Normal) => {
                self.mode = InputMode::MoveArmed;
                LayerOutput::with(LayerEvent::BeginMove)
            }
            // Auto-repeat.
            (LayerInput::ModifierDown, _) => LayerOutput::empty(),

            (LayerInput::ModifierUp, InputMode::MoveArmed | InputMode::Moving) => {
                self.mode = InputMode::Normal;
                self.grabbed = None;
                LayerOutput::with(LayerEvent::EndMove)
            }
            (LayerInput::ModifierUp, InputMode::Normal) => LayerOutput::empty(),

            (
                LayerInput::ButtonDown {
                    button: MouseButton::Primary,
                    pos,
                },
                InputMode::MoveArmed,
            ) => {
                self.mode = InputMode::Moving;
                self.grabbed = self.hit_test(pos).cloned();
                self.last_pointer = Some(pos);
                LayerOutput::empty()
            }
            (
                LayerInput::ButtonUp {
                    button: MouseButton::Primary,
                    pos,
                },
                InputMode::Moving,
            ) => {
                self.mode = InputMode::MoveArmed;
                self.grabbed = None;
                self.last_pointer = Some(pos);
                LayerOutput::empty()
            }

            (LayerInput::PointerMotion { pos }, InputMode::Moving) => {
                let last = self.last_pointer.replace(pos).unwrap_or(pos);
                let (dx, dy) = (pos.x - last.x, pos.y - last.y);
                match &self.grabbed {
                    Some(target) if dx != 0 || dy != 0 => LayerOutput {
                        events: vec![LayerEvent::MoveDelta {
                            target: target.clone(),
                            dx,
                            dy,
                        }],
                        needs_redraw: true,
                    },
                    _ => LayerOutput::empty(),
                }
            }
            (LayerInput::PointerMotion { pos }, InputMode::MoveArmed) => {
                self.last_pointer = Some(pos);
                LayerOutput::empty()
            }

            (
                LayerInput::ButtonUp {
                    button: MouseButton::Secondary,
                    pos,
                },
                InputMode::Normal,
            ) if self.hit_test(pos).is_none() => {
                LayerOutput::with(LayerEvent::ContextMenu { pos })
            }
            (other, InputMode::Normal) => LayerOutput::with(LayerEvent::PassThrough(other)),

            // Other buttons while armed or moving are swallowed.
            (_, InputMode::MoveArmed | InputMode::Moving) => LayerOutput::empty(),
        }
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity.clamp(0.0, 1.0);
        self.host.set_opacity(self.opacity);
    }

    /// Black background alpha painted behind the widgets.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    pub fn type_hint(&self) -> WindowTypeHint {
        self.type_hint
    }

    pub fn set_type_hint(&mut self, hint: WindowTypeHint) {
        self.type_hint = hint;
        self.host.set_type_hint(hint);
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.host.hide();
    }

    pub fn show(&mut self) {
        self.visible = true;
        self.host.show();
    }

    pub fn invalidate(&mut self) {
        self.host.invalidate(self.alpha);
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id.as_str() == id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/layer.rs"]
mod tests;
