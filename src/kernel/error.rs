use super::services::ports::SurfaceError;
use super::widget::InstanceId;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("widget instance already registered: {0}")]
    Duplicate(InstanceId),
    #[error("widget instance not registered: {0}")]
    Unknown(String),
    #[error("widget {id} failed to load: {source}")]
    Load {
        id: InstanceId,
        #[source]
        source: SurfaceError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OverlayError {
    #[error("overlay transition already in flight")]
    TransitionInFlight,
}

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("no widget named {0:?} is available")]
    UnknownWidget(String),
    #[error("no theme with id {0:?} is available")]
    UnknownTheme(String),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error(transparent)]
    Overlay(#[from] OverlayError),
}
