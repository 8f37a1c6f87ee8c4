use rustc_hash::FxHashMap;
use std::sync::mpsc::TryRecvError;

use crate::core::{clamp_to_screen, LayerInput, Pos, Rect};

use super::assets::AssetIndex;
use super::error::RegistryError;
use super::layer::{CompositingLayer, LayerEvent, LayerOutput};
use super::services::ports::{CursorKind, Theme, WidgetPlacement};
use super::signal::{
    signal_bus, HandlerId, SignalBus, SignalEmitter, SignalHub, SignalKind, SignalMessage,
    SignalReceiver, WidgetSignal,
};
use super::widget::{InstanceId, Widget};

pub type Result<T> = std::result::Result<T, RegistryError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    Added(InstanceId),
    Removed(InstanceId),
}

/// Owns every loaded widget, the layer hosting them, and the asset table the
/// content server reads. A widget is registered here exactly when the layer
/// hosts it.
pub struct WidgetRegistry {
    widgets: FxHashMap<InstanceId, Widget>,
    handlers: FxHashMap<InstanceId, Vec<HandlerId>>,
    hub: SignalHub,
    bus: SignalBus,
    signals: SignalReceiver,
    layer: CompositingLayer,
    assets: AssetIndex,
    events: Vec<RegistryEvent>,
}

impl WidgetRegistry {
    pub fn new(layer: CompositingLayer, assets: AssetIndex) -> Self {
        let (bus, signals) = signal_bus();
        Self {
            widgets: FxHashMap::default(),
            handlers: FxHashMap::default(),
            hub: SignalHub::new(),
            bus,
            signals,
            layer,
            assets,
            events: Vec::new(),
        }
    }

    /// Emitter a rendering surface uses to talk back to the registry.
    pub fn emitter(&self, id: InstanceId) -> SignalEmitter {
        self.bus.emitter(id)
    }

    pub fn assets(&self) -> &AssetIndex {
        &self.assets
    }

    pub fn layer(&self) -> &CompositingLayer {
        &self.layer
    }

    pub fn layer_mut(&mut self) -> &mut CompositingLayer {
        &mut self.layer
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.widgets.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Widget> {
        self.widgets.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Widget> {
        self.widgets.get_mut(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &InstanceId> + '_ {
        self.widgets.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&InstanceId, &Widget)> + '_ {
        self.widgets.iter()
    }

    pub fn handler_count(&self, id: &str) -> usize {
        self.handlers.get(id).map_or(0, Vec::len)
    }

    pub fn total_handler_count(&self) -> usize {
        self.hub.len()
    }

    pub fn drain_events(&mut self) -> Vec<RegistryEvent> {
        std::mem::take(&mut self.events)
    }

    /// Persistable snapshot, in paint order.
    pub fn placements(&self) -> Vec<WidgetPlacement> {
        self.layer
            .z_order()
            .filter_map(|id| self.widgets.get(id.as_str()))
            .map(|w| WidgetPlacement {
                name: w.name().to_string(),
                x: Some(w.position().x),
                y: Some(w.position().y),
                profile: w.profile().map(str::to_string),
                theme: w.theme().map(|t| t.id.clone()),
            })
            .collect()
    }

    pub fn add(&mut self, mut widget: Widget, pos: Option<Pos>) -> Result<()> {
        let id = widget.instance_id().clone();
        if self.widgets.contains_key(id.as_str()) {
            return Err(RegistryError::Duplicate(id));
        }

        let handlers = SignalKind::ALL
            .iter()
            .map(|&kind| self.hub.connect(id.clone(), kind))
            .collect();
        self.handlers.insert(id.clone(), handlers);

        let wanted = pos.unwrap_or_else(|| widget.position());
        let placed = clamp_to_screen(wanted, widget.size(), self.layer.screen());
        widget.set_position(placed);

        self.assets.publish(id.clone(), widget.assets());
        self.layer
            .add(id.clone(), Rect::from_parts(placed, widget.size()));
        self.widgets.insert(id.clone(), widget);

        tracing::info!(instance = %id, x = placed.x, y = placed.y, "widget added");
        self.events.push(RegistryEvent::Added(id));
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Result<Widget> {
        let Some(widget) = self.widgets.remove(id) else {
            return Err(RegistryError::Unknown(id.to_string()));
        };

        for handler in self.handlers.remove(id).unwrap_or_default() {
            self.hub.disconnect(handler);
        }
        self.assets.retract(id);
        self.layer.remove(id);

        let id = widget.instance_id().clone();
        tracing::info!(instance = %id, "widget removed");
        self.events.push(RegistryEvent::Removed(id));
        Ok(widget)
    }

    pub fn move_request(&mut self, id: &str, dx: i32, dy: i32) -> Result<Pos> {
        let screen = self.layer.screen();
        let widget = self
            .widgets
            .get_mut(id)
            .ok_or_else(|| RegistryError::Unknown(id.to_string()))?;

        let next = clamp_to_screen(widget.position().offset(dx, dy), widget.size(), screen);
        self.layer.move_to(id, next);
        widget.set_position(next);
        Ok(next)
    }

    pub fn raise_request(&mut self, id: &str) -> Result<()> {
        if !self.widgets.contains_key(id) {
            return Err(RegistryError::Unknown(id.to_string()));
        }
        self.layer.raise(id);
        Ok(())
    }

    pub fn end_move(&mut self, id: &str) -> Result<()> {
        if !self.widgets.contains_key(id) {
            return Err(RegistryError::Unknown(id.to_string()));
        }
        tracing::trace!(instance = id, "end move");
        Ok(())
    }

    /// Reloads the widget's surface in place. The registry entry and the
    /// asset table entry survive the reload; a surface that fails to load is
    /// torn down completely.
    pub fn reload_request(&mut self, id: &str) -> Result<()> {
        let Some(widget) = self.widgets.get_mut(id) else {
            return Err(RegistryError::Unknown(id.to_string()));
        };

        self.layer.remove(id);
        if let Err(source) = widget.surface_mut().load() {
            let instance = widget.instance_id().clone();
            tracing::error!(instance = %instance, error = %source, "widget reload failed");
            widget.surface_mut().remove();
            self.remove(id)?;
            return Err(RegistryError::Load {
                id: instance,
                source,
            });
        }

        let screen = self.layer.screen();
        let pos = clamp_to_screen(widget.position(), widget.size(), screen);
        widget.set_position(pos);
        let rect = Rect::from_parts(pos, widget.size());
        let instance = widget.instance_id().clone();
        self.assets.publish(instance.clone(), widget.assets());
        self.layer.add(instance.clone(), rect);
        tracing::debug!(instance = %instance, "widget reloaded");
        Ok(())
    }

    /// Switches the widget's own theme and reloads it so the page picks up
    /// the new `/theme/` directory. No-op when the theme is unchanged.
    pub fn set_widget_theme(&mut self, id: &str, theme: Option<Theme>) -> Result<()> {
        let Some(widget) = self.widgets.get_mut(id) else {
            return Err(RegistryError::Unknown(id.to_string()));
        };
        if widget.theme() == theme.as_ref() {
            return Ok(());
        }
        tracing::debug!(
            instance = id,
            theme = theme.as_ref().map(|t| t.id.as_str()),
            "widget theme changed"
        );
        widget.set_theme(theme);
        self.reload_request(id)
    }

    pub fn remove_request(&mut self, id: &str) -> Result<Widget> {
        let Some(widget) = self.widgets.get_mut(id) else {
            return Err(RegistryError::Unknown(id.to_string()));
        };
        widget.surface_mut().remove();
        self.remove(id)
    }

    pub fn reload_all(&mut self) -> Vec<RegistryError> {
        let ids: Vec<InstanceId> = self.layer.z_order().cloned().collect();
        ids.iter()
            .filter_map(|id| self.reload_request(id.as_str()).err())
            .collect()
    }

    /// Drains pending widget signals in emission order. Signals whose
    /// handler has been disconnected are dropped. Returns how many were
    /// dispatched.
    pub fn pump(&mut self) -> usize {
        let mut dispatched = 0;
        loop {
            let msg = match self.signals.try_recv() {
                Ok(msg) => msg,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            };
            if !self.hub.is_connected(msg.instance.as_str(), msg.signal.kind()) {
                tracing::trace!(instance = %msg.instance, signal = ?msg.signal, "signal dropped");
                continue;
            }
            dispatched += 1;
            if let Err(e) = self.dispatch(&msg) {
                tracing::warn!(instance = %msg.instance, signal = ?msg.signal, error = %e, "signal handler failed");
            }
        }
        dispatched
    }

    fn dispatch(&mut self, msg: &SignalMessage) -> Result<()> {
        let id = msg.instance.as_str();
        match msg.signal {
            WidgetSignal::RaiseRequest => self.raise_request(id),
            WidgetSignal::EndMove => self.end_move(id),
            WidgetSignal::MoveRequest { dx, dy } => self.move_request(id, dx, dy).map(|_| ()),
            WidgetSignal::RemoveRequest => self.remove_request(id).map(|_| ()),
            WidgetSignal::ReloadRequest => self.reload_request(id),
        }
    }

    /// Feeds raw input to the layer and applies what it decides. Events the
    /// orchestrator cares about (pass-through, context menu) are returned.
    pub fn on_input(&mut self, input: &LayerInput) -> LayerOutput {
        let out = self.layer.on_input(input);
        let mut rest = Vec::new();
        for event in out.events {
            match event {
                LayerEvent::BeginMove => self.each_surface(|w| {
                    w.surface_mut().begin_move();
                    w.surface_mut().set_cursor(CursorKind::Move);
                }),
                LayerEvent::EndMove => self.each_surface(|w| {
                    w.surface_mut().end_move();
                    w.surface_mut().set_cursor(CursorKind::Default);
                }),
                LayerEvent::ClearHover => self.each_surface(|w| w.surface_mut().clear_hover()),
                LayerEvent::MoveDelta { target, dx, dy } => {
                    if let Err(e) = self.move_request(target.as_str(), dx, dy) {
                        tracing::warn!(error = %e, "move delta for unknown widget");
                    }
                }
                other => rest.push(other),
            }
        }
        LayerOutput {
            events: rest,
            needs_redraw: out.needs_redraw,
        }
    }

    fn each_surface(&mut self, mut f: impl FnMut(&mut Widget)) {
        for widget in self.widgets.values_mut() {
            f(widget);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/registry.rs"]
mod tests;
