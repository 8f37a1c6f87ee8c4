use super::geom::Pos;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Primary,
    Middle,
    Secondary,
}

impl MouseButton {
    /// Maps toolkit button numbers (1 = left, 2 = middle, 3 = right).
    pub fn from_number(n: u32) -> Option<Self> {
        match n {
            1 => Some(Self::Primary),
            2 => Some(Self::Middle),
            3 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// Raw input delivered to the compositing layer by the host toolkit.
///
/// Modifier events refer to the configured move modifier only; the host is
/// responsible for filtering out every other key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerInput {
    ModifierDown,
    ModifierUp,
    ButtonDown { button: MouseButton, pos: Pos },
    ButtonUp { button: MouseButton, pos: Pos },
    PointerMotion { pos: Pos },
    PointerEnter,
    PointerLeave,
}

impl LayerInput {
    pub fn is_modifier(&self) -> bool {
        matches!(self, LayerInput::ModifierDown | LayerInput::ModifierUp)
    }

    pub fn pos(&self) -> Option<Pos> {
        match self {
            LayerInput::ButtonDown { pos, .. }
            | LayerInput::ButtonUp { pos, .. }
            | LayerInput::PointerMotion { pos } => Some(*pos),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/event.rs"]
mod tests;
