use crate::core::{Pos, Size};
use crate::kernel::widget::InstanceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowTypeHint {
    /// Sits below regular windows; widgets are interactive.
    #[default]
    Desktop,
    /// Sits above regular windows; used while the overlay is shown.
    Dock,
}

/// The toolkit window backing the compositing layer.
///
/// Implementations must be cheap: every call happens on the GUI thread,
/// several of them on each animation tick.
pub trait LayerHost {
    fn screen_size(&self) -> Size;

    fn place(&mut self, child: &InstanceId, pos: Pos);
    fn move_child(&mut self, child: &InstanceId, pos: Pos);
    fn raise_child(&mut self, child: &InstanceId);
    fn remove_child(&mut self, child: &InstanceId);

    fn set_opacity(&mut self, opacity: f64);
    fn set_type_hint(&mut self, hint: WindowTypeHint);
    fn hide(&mut self);
    fn show(&mut self);
    /// Requests a full-surface repaint; the background is painted black at
    /// `alpha`.
    fn invalidate(&mut self, alpha: f64);
}
