//! Debounced collision warning
//!
//! Stays active for a fixed duration after the last signal. Signalling while
//! active only restarts the timer.

#[derive(Debug, Clone)]
pub struct WarningNotifier {
    duration: f32,
    remaining: f32,
}

impl WarningNotifier {
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            remaining: 0.0,
        }
    }

    /// Raise (or re-arm) the warning
    ///
    /// Returns true only when the warning was not already showing.
    pub fn signal(&mut self) -> bool {
        let was_active = self.is_active();
        self.remaining = self.duration;
        !was_active
    }

    /// Count down; returns true on the tick the warning expires
    pub fn update(&mut self, dt: f32) -> bool {
        if !self.is_active() {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            return true;
        }
        false
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn clear(&mut self) {
        self.remaining = 0.0;
    }
}
