use compact_str::{format_compact, CompactString};
use std::borrow::Borrow;
use std::fmt;
use std::path::PathBuf;

use crate::core::{Pos, Size};
use crate::kernel::services::ports::{Theme, WidgetSurface};

use super::assets::WidgetAssets;

/// Key of one loaded widget for the whole process lifetime.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(CompactString);

impl InstanceId {
    pub fn new(id: impl Into<CompactString>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Borrow<str> for InstanceId {
    fn borrow(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Hands out `"<widget-id>.<n>"` ids from a counter that only grows, so an id
/// is never reused after its widget is gone. One allocator per process.
#[derive(Debug, Default)]
pub struct InstanceIdAllocator {
    next: u64,
}

impl InstanceIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self, widget_id: &str) -> InstanceId {
        self.next += 1;
        InstanceId(format_compact!("{}.{}", widget_id, self.next))
    }
}

pub struct Widget {
    instance_id: InstanceId,
    name: String,
    position: Pos,
    theme: Option<Theme>,
    profile: Option<String>,
    surface: Box<dyn WidgetSurface>,
}

impl Widget {
    pub fn new(instance_id: InstanceId, name: impl Into<String>, surface: Box<dyn WidgetSurface>) -> Self {
        let position = surface.position();
        Self {
            instance_id,
            name: name.into(),
            position,
            theme: None,
            profile: None,
            surface,
        }
    }

    pub fn with_theme(mut self, theme: Option<Theme>) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_profile(mut self, profile: Option<String>) -> Self {
        self.profile = profile;
        self
    }

    pub fn instance_id(&self) -> &InstanceId {
        &self.instance_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Pos {
        self.position
    }

    pub fn size(&self) -> Size {
        self.surface.size()
    }

    /// Skin variant the widget was loaded with.
    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    pub fn theme(&self) -> Option<&Theme> {
        self.theme.as_ref()
    }

    pub(crate) fn set_theme(&mut self, theme: Option<Theme>) {
        self.theme = theme;
    }

    pub(crate) fn set_position(&mut self, pos: Pos) {
        self.position = pos;
        self.surface.set_position(pos);
    }

    pub fn surface(&self) -> &dyn WidgetSurface {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> &mut dyn WidgetSurface {
        self.surface.as_mut()
    }

    pub fn data_path(&self) -> PathBuf {
        self.surface.data_path()
    }

    pub fn skin_path(&self) -> PathBuf {
        self.surface.skin_path()
    }

    /// Paths the content server resolves for this instance.
    pub fn assets(&self) -> WidgetAssets {
        WidgetAssets {
            data_path: self.data_path(),
            skin_path: self.skin_path(),
            theme_path: self.theme.as_ref().map(|t| t.path.clone()),
        }
    }
}

impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Widget")
            .field("instance_id", &self.instance_id)
            .field("name", &self.name)
            .field("position", &self.position)
            .field("theme", &self.theme)
            .finish_non_exhaustive()
    }
}
