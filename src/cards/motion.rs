//! Cosmetic card motion: idle wobble and drag tilt.
//!
//! All state is per card and advances only when the card's `advance` is
//! called. There are no timers.

use serde::{Deserialize, Serialize};

use crate::core::MotionConfig;

/// Continuous idle wobble.
///
/// `x = cos(t + phase) * amplitude`, `y = sin(t + phase) * amplitude`, with
/// `t` advancing at `idle_speed` while running.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IdleMotion {
    phase: f32,
    elapsed: f32,
    running: bool,
}

impl IdleMotion {
    /// Start a wobble at the given phase offset (radians).
    #[must_use]
    pub fn new(phase: f32) -> Self {
        Self {
            phase,
            elapsed: 0.0,
            running: true,
        }
    }

    #[must_use]
    pub fn phase(&self) -> f32 {
        self.phase
    }

    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Suspend without losing progress.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Resume from where it stopped.
    pub fn resume(&mut self) {
        self.running = true;
    }

    /// Advance time if running.
    pub fn tick(&mut self, dt: f32, config: &MotionConfig) {
        if self.running {
            self.elapsed += dt * config.idle_speed;
        }
    }

    /// Current `(x, y)` wobble angles in degrees.
    #[must_use]
    pub fn angles(&self, config: &MotionConfig) -> (f32, f32) {
        if !config.idle_motion {
            return (0.0, 0.0);
        }
        let t = self.elapsed + self.phase;
        (t.cos() * config.idle_amplitude, t.sin() * config.idle_amplitude)
    }
}

/// Lean in degrees for a card lagging `dx` world units behind its target.
#[must_use]
pub fn drag_tilt(dx: f32, config: &MotionConfig) -> f32 {
    (dx * config.tilt_factor).clamp(-config.max_tilt, config.max_tilt)
}
