#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HotkeyAction {
    ToggleOverlay,
}

impl HotkeyAction {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "toggle-overlay" | "toggle_overlay" => Some(Self::ToggleOverlay),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ToggleOverlay => "toggle-overlay",
        }
    }
}
