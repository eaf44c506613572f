//! One-shot auto-reset timer
//!
//! The timer counts simulation ticks and, when it expires, hands back the
//! shot generation it was scheduled for. The caller compares that against
//! the current generation; any shoot or reset in between bumps the
//! generation, so a stale expiry is dropped instead of resetting a live shot.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct PendingReset {
    generation: u64,
    remaining_ticks: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetTimer {
    pending: Option<PendingReset>,
}

impl ResetTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer. An earlier reset already pending for the same
    /// generation wins; one left over from an older generation is replaced.
    /// Returns whether the timer was (re)armed.
    pub fn schedule(&mut self, generation: u64, ticks: u32) -> bool {
        if self.is_pending_for(generation) {
            return false;
        }
        self.pending = Some(PendingReset {
            generation,
            remaining_ticks: ticks.max(1),
        });
        true
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_pending_for(&self, generation: u64) -> bool {
        self.pending.is_some_and(|p| p.generation == generation)
    }

    /// Ticks left before expiry
    pub fn remaining_ticks(&self) -> Option<u32> {
        self.pending.map(|p| p.remaining_ticks)
    }

    /// Count down one tick; yields the scheduled generation on expiry
    pub fn advance(&mut self) -> Option<u64> {
        let pending = self.pending.as_mut()?;
        pending.remaining_ticks = pending.remaining_ticks.saturating_sub(1);
        if pending.remaining_ticks == 0 {
            let generation = pending.generation;
            self.pending = None;
            Some(generation)
        } else {
            None
        }
    }
}
