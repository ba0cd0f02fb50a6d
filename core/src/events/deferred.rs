//! Deferred status transitions
//!
//! Grace periods ("show as active for a moment, then move on") are queued
//! here instead of on a timer primitive. Each entry captures the match
//! generation it was scheduled in; a reset bumps the generation, so entries
//! from an earlier match are discarded instead of touching fresh state.

use matchtimer_types::EventStatus;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct DeferredTransition {
    pub generation: u64,
    pub event_index: usize,
    /// Match time at which the transition applies
    pub due_at: f64,
    /// Status the event moves to
    pub to: EventStatus,
}

#[derive(Debug, Clone, Default)]
pub(super) struct DeferredQueue {
    generation: u64,
    pending: Vec<DeferredTransition>,
}

impl DeferredQueue {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a new match generation. Existing entries become stale.
    pub fn advance_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn schedule(&mut self, event_index: usize, due_at: f64, to: EventStatus) {
        self.pending.push(DeferredTransition {
            generation: self.generation,
            event_index,
            due_at,
            to,
        });
    }

    /// Remove and return entries of the current generation due at `elapsed`.
    /// Stale entries are dropped along the way.
    pub fn take_due(&mut self, elapsed: f64) -> Vec<DeferredTransition> {
        let generation = self.generation;
        let before = self.pending.len();
        self.pending.retain(|t| t.generation == generation);
        let stale = before - self.pending.len();
        if stale > 0 {
            tracing::debug!(stale, generation, "Dropped deferred transitions from a previous match");
        }

        let (due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|t| t.due_at <= elapsed);
        self.pending = waiting;
        due
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
