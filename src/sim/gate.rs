//! Neck admission control
//!
//! A token-bucket-of-one policy gating the vessel's narrow passage: at
//! most one waiting particle is admitted per interval, in slot-scan order.
//! Slots are allocated at activation time and never reordered, so the scan
//! approximates spawn-order FIFO. Ungated particles still jostle and queue
//! above the midline; only the downward crossing is blocked.

use super::state::ParticleStore;

/// Discrete-time admission state: elapsed time accumulates across steps
/// and each full interval grants one crossing permit.
#[derive(Debug, Clone)]
pub struct AdmissionGate {
    interval: f32,
    accumulator: f32,
}

impl AdmissionGate {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            accumulator: 0.0,
        }
    }

    /// Advance the accumulator by `dt` and, if an interval has elapsed,
    /// grant `gate_ready` to the first waiting particle above the midline.
    ///
    /// Returns the released slot, if any. An empty reservoir simply means
    /// no release this interval. The accumulator keeps its remainder after
    /// subtracting the interval, so admission cadence never drifts.
    pub fn advance(&mut self, dt: f32, store: &mut ParticleStore, midline_y: f32) -> Option<usize> {
        self.accumulator += dt;
        if self.accumulator < self.interval {
            return None;
        }
        self.accumulator -= self.interval;

        let released = (0..store.capacity()).find(|&i| {
            store.active[i] && store.pos[i].y < midline_y && !store.gate_ready[i]
        });
        if let Some(slot) = released {
            store.gate_ready[slot] = true;
        }
        released
    }

    /// Hold every ungated particle above the midline: clamp its position
    /// so it cannot cross this step, zeroing vertical velocity while
    /// leaving horizontal motion (and so the queueing behavior) intact.
    ///
    /// Runs after integration and collision response, before the boundary
    /// constraint. An ungated particle is never below the midline, so any
    /// one found past the clamp line has just crossed this step.
    pub fn clamp_waiting(&self, store: &mut ParticleStore, midline_y: f32, radius: f32) {
        let hold_y = midline_y - radius;
        for i in 0..store.capacity() {
            if store.active[i] && !store.gate_ready[i] && store.pos[i].y > hold_y {
                store.pos[i].y = hold_y;
                store.vel[i].y = 0.0;
            }
        }
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    #[cfg(test)]
    pub(crate) fn accumulator(&self) -> f32 {
        self.accumulator
    }
}
