use std::f64::consts::PI;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Curve {
    Linear,
    /// `(1 - cos(πt)) / 2`: slow start, slow finish.
    #[default]
    Sine,
}

impl Curve {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Curve::Linear => t,
            Curve::Sine => (1.0 - (PI * t).cos()) / 2.0,
        }
    }
}

/// One interpolation run, advanced by whoever owns the clock.
#[derive(Debug, Clone, Copy)]
pub struct Timeline {
    start: Instant,
    duration: Duration,
    curve: Curve,
}

impl Timeline {
    pub fn new(start: Instant, duration: Duration, curve: Curve) -> Self {
        Self {
            start,
            duration,
            curve,
        }
    }

    pub fn start(&self) -> Instant {
        self.start
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Linear progress in `[0, 1]`.
    pub fn raw_progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Eased progress; exactly `1.0` once finished.
    pub fn progress(&self, now: Instant) -> f64 {
        if self.is_finished(now) {
            return 1.0;
        }
        self.curve.apply(self.raw_progress(now))
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/timeline.rs"]
mod tests;
