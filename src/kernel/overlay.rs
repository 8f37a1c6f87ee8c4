//! Desktop ⇄ overlay fade.
//!
//! Each direction runs two phases of `fade_duration / 2`. Going to the
//! overlay, the widgets fade out, the layer is re-hinted as a dock window,
//! then the dimmed backdrop fades in. Coming back mirrors that. The host
//! loop calls [`OverlayController::tick`] on its timer; nothing here sleeps.

use std::time::{Duration, Instant};

use super::error::OverlayError;
use super::layer::CompositingLayer;
use super::services::ports::{OverlayConfig, WindowTypeHint};
use super::timeline::{Curve, Timeline};

/// Backdrop alpha when the overlay is fully shown.
pub const OVERLAY_ALPHA: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayState {
    #[default]
    Desktop,
    Overlay,
}

impl OverlayState {
    fn opposite(self) -> Self {
        match self {
            OverlayState::Desktop => OverlayState::Overlay,
            OverlayState::Overlay => OverlayState::Desktop,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    FadeOutWidgets,
    FadeInOverlay,
    FadeOutOverlay,
    FadeInWidgets,
}

impl Phase {
    fn first(target: OverlayState) -> Self {
        match target {
            OverlayState::Overlay => Phase::FadeOutWidgets,
            OverlayState::Desktop => Phase::FadeOutOverlay,
        }
    }

    fn update(self, e: f64, layer: &mut CompositingLayer) {
        match self {
            Phase::FadeOutWidgets => layer.set_opacity(1.0 - e),
            Phase::FadeInOverlay => {
                layer.set_alpha(e * OVERLAY_ALPHA);
                layer.set_opacity(e);
                layer.invalidate();
            }
            Phase::FadeOutOverlay => {
                layer.set_alpha(OVERLAY_ALPHA * (1.0 - e));
                layer.set_opacity(1.0 - e);
                layer.invalidate();
            }
            Phase::FadeInWidgets => layer.set_opacity(e),
        }
    }

    /// Runs the phase's completion step and returns the phase that follows.
    fn complete(self, layer: &mut CompositingLayer) -> Option<Phase> {
        match self {
            Phase::FadeOutWidgets => {
                swap_hint(layer, WindowTypeHint::Dock);
                Some(Phase::FadeInOverlay)
            }
            Phase::FadeOutOverlay => {
                swap_hint(layer, WindowTypeHint::Desktop);
                Some(Phase::FadeInWidgets)
            }
            Phase::FadeInOverlay | Phase::FadeInWidgets => None,
        }
    }
}

fn swap_hint(layer: &mut CompositingLayer, hint: WindowTypeHint) {
    layer.hide();
    layer.set_type_hint(hint);
    layer.show();
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    target: OverlayState,
    phase: Phase,
    timeline: Timeline,
}

#[derive(Debug)]
pub struct OverlayController {
    state: OverlayState,
    transition: Option<Transition>,
    phase_duration: Duration,
    curve: Curve,
}

impl OverlayController {
    pub fn new(fade_duration: Duration) -> Self {
        Self {
            state: OverlayState::Desktop,
            transition: None,
            phase_duration: fade_duration / 2,
            curve: Curve::Sine,
        }
    }

    pub fn from_config(config: &OverlayConfig) -> Self {
        Self::new(Duration::from_millis(config.fade_duration_ms))
    }

    pub fn with_curve(mut self, curve: Curve) -> Self {
        self.curve = curve;
        self
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Where the running transition is headed, if any.
    pub fn target(&self) -> Option<OverlayState> {
        self.transition.map(|t| t.target)
    }

    /// Starts fading towards the other state. A second toggle while a fade
    /// runs is rejected; both would write the same opacity and alpha.
    pub fn toggle(
        &mut self,
        now: Instant,
        layer: &mut CompositingLayer,
    ) -> Result<OverlayState, OverlayError> {
        if self.transition.is_some() {
            return Err(OverlayError::TransitionInFlight);
        }
        let target = self.state.opposite();
        let phase = Phase::first(target);
        tracing::debug!(from = ?self.state, to = ?target, "overlay transition started");
        phase.update(0.0, layer);
        self.transition = Some(Transition {
            target,
            phase,
            timeline: self.timeline(now),
        });
        Ok(target)
    }

    /// Advances the running transition. Returns whether it is still running;
    /// a tick with nothing running does nothing.
    pub fn tick(&mut self, now: Instant, layer: &mut CompositingLayer) -> bool {
        let Some(mut tr) = self.transition else {
            return false;
        };

        while tr.timeline.is_finished(now) {
            tr.phase.update(1.0, layer);
            match tr.phase.complete(layer) {
                Some(next) => {
                    let phase_end = tr.timeline_end();
                    tr.phase = next;
                    tr.timeline = self.timeline(phase_end);
                }
                None => {
                    self.finish(tr.target);
                    return false;
                }
            }
        }

        tr.phase.update(tr.timeline.progress(now), layer);
        self.transition = Some(tr);
        true
    }

    /// Ends a running transition at its destination immediately.
    pub fn cancel(&mut self, layer: &mut CompositingLayer) -> bool {
        let Some(tr) = self.transition else {
            return false;
        };
        let mut phase = tr.phase;
        loop {
            phase.update(1.0, layer);
            match phase.complete(layer) {
                Some(next) => phase = next,
                None => break,
            }
        }
        self.finish(tr.target);
        true
    }

    fn finish(&mut self, target: OverlayState) {
        self.state = target;
        self.transition = None;
        tracing::debug!(state = ?target, "overlay transition finished");
    }

    fn timeline(&self, start: Instant) -> Timeline {
        Timeline::new(start, self.phase_duration, self.curve)
    }
}

impl Transition {
    fn timeline_end(&self) -> Instant {
        self.timeline.start() + self.timeline.duration()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/overlay.rs"]
mod tests;
