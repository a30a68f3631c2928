//! Deferred one-shot timer driven by the tick clock

use serde::{Deserialize, Serialize};

/// A one-shot deadline that fires on the first poll at or after it
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Deferred {
    fire_at: Option<f64>,
}

impl Deferred {
    /// Arm (or re-arm) to fire `delay_ms` after `now`
    pub fn schedule(&mut self, now: f64, delay_ms: f64) {
        self.fire_at = Some(now + delay_ms);
    }

    /// Disarm without firing
    pub fn cancel(&mut self) {
        self.fire_at = None;
    }

    pub fn is_pending(&self) -> bool {
        self.fire_at.is_some()
    }

    /// Returns true exactly once, on the first poll at or past the deadline
    pub fn poll(&mut self, now: f64) -> bool {
        match self.fire_at {
            Some(at) if now >= at => {
                self.fire_at = None;
                true
            }
            _ => false,
        }
    }
}
