//! Headless shell core: layer, registry, overlay and the ports they drive.

pub mod assets;
pub mod error;
pub mod layer;
pub mod overlay;
pub mod registry;
pub mod services;
pub mod shell;
pub mod signal;
pub mod timeline;
pub mod widget;

#[cfg(test)]
pub(crate) mod testing;

pub use assets::{AssetIndex, WidgetAssets};
pub use error::{OverlayError, RegistryError, ShellError};
pub use layer::{CompositingLayer, InputMode, LayerEvent, LayerOutput};
pub use overlay::{OverlayController, OverlayState, OVERLAY_ALPHA};
pub use registry::{RegistryEvent, WidgetRegistry};
pub use shell::Shell;
pub use signal::{HandlerId, SignalEmitter, SignalKind, WidgetSignal};
pub use timeline::{Curve, Timeline};
pub use widget::{InstanceId, InstanceIdAllocator, Widget};
