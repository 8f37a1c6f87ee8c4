//! Thin orchestrator wiring manifests, the widget factory, hotkeys and the
//! overlay to the registry.

use std::time::Instant;

use crate::core::{LayerInput, Pos};

use super::assets::AssetIndex;
use super::error::ShellError;
use super::layer::{CompositingLayer, LayerOutput};
use super::overlay::{OverlayController, OverlayState};
use super::registry::{RegistryEvent, WidgetRegistry};
use super::services::ports::{
    HotkeyAction, ManifestEntry, ManifestSource, SurfaceRequest, Theme, WidgetFactory,
    WidgetPlacement, DEFAULT_MOVE_MODIFIER,
};
use super::widget::{InstanceId, InstanceIdAllocator, Widget};

pub type Result<T> = std::result::Result<T, ShellError>;

pub struct Shell {
    registry: WidgetRegistry,
    overlay: OverlayController,
    factory: Box<dyn WidgetFactory>,
    widgets: Box<dyn ManifestSource>,
    themes: Box<dyn ManifestSource>,
    ids: InstanceIdAllocator,
    default_theme: Option<Theme>,
    move_modifier: String,
}

impl Shell {
    pub fn new(
        layer: CompositingLayer,
        assets: AssetIndex,
        overlay: OverlayController,
        factory: Box<dyn WidgetFactory>,
        widgets: Box<dyn ManifestSource>,
        themes: Box<dyn ManifestSource>,
    ) -> Self {
        Self {
            registry: WidgetRegistry::new(layer, assets),
            overlay,
            factory,
            widgets,
            themes,
            ids: InstanceIdAllocator::new(),
            default_theme: None,
            move_modifier: DEFAULT_MOVE_MODIFIER.to_string(),
        }
    }

    pub fn with_move_modifier(mut self, key: impl Into<String>) -> Self {
        self.move_modifier = key.into();
        self
    }

    pub fn move_modifier(&self) -> &str {
        &self.move_modifier
    }

    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut WidgetRegistry {
        &mut self.registry
    }

    pub fn overlay(&self) -> &OverlayController {
        &self.overlay
    }

    pub fn default_theme(&self) -> Option<&Theme> {
        self.default_theme.as_ref()
    }

    pub fn available_widgets(&self) -> Vec<ManifestEntry> {
        let mut list = self.widgets.list();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        list
    }

    pub fn available_themes(&self) -> Vec<ManifestEntry> {
        self.themes.list()
    }

    /// Selects the theme served for `/theme/` requests without an instance
    /// and for widgets without a theme of their own. Loaded widgets are
    /// reloaded so they pick it up.
    pub fn set_default_theme(&mut self, theme_id: Option<&str>) -> Result<()> {
        let theme = self.resolve_theme(theme_id)?;
        self.registry
            .assets()
            .set_default_theme(theme.as_ref().map(|t| t.path.clone()));
        let changed = self.default_theme != theme;
        self.default_theme = theme;

        if changed {
            for err in self.registry.reload_all() {
                tracing::warn!(error = %err, "reload after theme change failed");
            }
        }
        Ok(())
    }

    /// Gives one widget its own theme, or hands it back to the default one
    /// with `None`.
    pub fn set_widget_theme(&mut self, id: &str, theme_id: Option<&str>) -> Result<()> {
        let theme = self.resolve_theme(theme_id)?;
        self.registry.set_widget_theme(id, theme)?;
        Ok(())
    }

    fn resolve_theme(&self, theme_id: Option<&str>) -> Result<Option<Theme>> {
        let Some(id) = theme_id else {
            return Ok(None);
        };
        self.themes
            .find_by_id(id)
            .map(|m| Some(Theme::from(&m)))
            .ok_or_else(|| ShellError::UnknownTheme(id.to_string()))
    }

    pub fn load_widget(
        &mut self,
        name: &str,
        pos: Option<Pos>,
        profile: Option<&str>,
    ) -> Result<InstanceId> {
        self.load_themed(name, pos, profile, None)
    }

    fn load_themed(
        &mut self,
        name: &str,
        pos: Option<Pos>,
        profile: Option<&str>,
        theme: Option<Theme>,
    ) -> Result<InstanceId> {
        tracing::debug!(name, "loading widget");
        let manifest = self
            .widgets
            .find_by_name(name)
            .ok_or_else(|| ShellError::UnknownWidget(name.to_string()))?;

        let instance_id = self.ids.allocate(&manifest.id);
        let emitter = self.registry.emitter(instance_id.clone());
        let mut surface = self.factory.create(SurfaceRequest {
            manifest: &manifest,
            instance_id: &instance_id,
            profile,
            emitter,
        })?;
        // A widget that cannot load never reaches the registry.
        surface.load()?;

        let widget = Widget::new(instance_id.clone(), manifest.name.clone(), surface)
            .with_profile(profile.map(str::to_string))
            .with_theme(theme);
        self.registry.add(widget, pos)?;
        Ok(instance_id)
    }

    /// Loads the persisted widget list; failures are logged and skipped.
    pub fn restore(&mut self, placements: &[WidgetPlacement]) -> usize {
        let mut loaded = 0;
        for placement in placements {
            let pos = match (placement.x, placement.y) {
                (Some(x), Some(y)) => Some(Pos::new(x, y)),
                _ => None,
            };
            let theme = match self.resolve_theme(placement.theme.as_deref()) {
                Ok(theme) => theme,
                Err(e) => {
                    tracing::warn!(name = %placement.name, error = %e, "saved theme dropped");
                    None
                }
            };
            let profile = placement.profile.as_deref();
            match self.load_themed(&placement.name, pos, profile, theme) {
                Ok(_) => loaded += 1,
                Err(e) => tracing::warn!(name = %placement.name, error = %e, "widget not restored"),
            }
        }
        loaded
    }

    pub fn placements(&self) -> Vec<WidgetPlacement> {
        self.registry.placements()
    }

    pub fn remove_widget(&mut self, id: &str) -> Result<()> {
        self.registry.remove_request(id)?;
        Ok(())
    }

    pub fn toggle_overlay(&mut self, now: Instant) -> Result<OverlayState> {
        let target = self.overlay.toggle(now, self.registry.layer_mut())?;
        Ok(target)
    }

    pub fn on_hotkey(&mut self, action: HotkeyAction, now: Instant) -> Result<()> {
        match action {
            HotkeyAction::ToggleOverlay => self.toggle_overlay(now).map(|_| ()),
        }
    }

    pub fn on_input(&mut self, input: &LayerInput) -> LayerOutput {
        self.registry.on_input(input)
    }

    /// Raw key from the host. Only the move modifier reaches the layer.
    pub fn on_key(&mut self, key: &str, pressed: bool) -> Option<LayerOutput> {
        if key != self.move_modifier {
            return None;
        }
        let input = if pressed {
            LayerInput::ModifierDown
        } else {
            LayerInput::ModifierUp
        };
        Some(self.registry.on_input(&input))
    }

    /// One turn of the GUI loop: widget signals first, then the animation.
    pub fn tick(&mut self, now: Instant) -> Vec<RegistryEvent> {
        self.registry.pump();
        self.overlay.tick(now, self.registry.layer_mut());
        self.registry.drain_events()
    }

    /// Tears every widget down, front-most last.
    pub fn shutdown(&mut self) {
        self.overlay.cancel(self.registry.layer_mut());
        let ids: Vec<InstanceId> = self.registry.layer().z_order().cloned().collect();
        for id in ids {
            if let Err(e) = self.registry.remove_request(id.as_str()) {
                tracing::warn!(instance = %id, error = %e, "shutdown removal failed");
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/shell.rs"]
mod tests;
