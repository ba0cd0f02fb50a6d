//! Per-event runtime state
//!
//! One `EventState` exists per catalog definition for the lifetime of a match.
//! The countdown is recomputed from elapsed time on every tick and never
//! accumulated, so pausing and seeking cannot make it drift.

use std::sync::Arc;

use matchtimer_types::EventStatus;

use crate::catalog::EventDefinition;

/// Runtime state of one tracked event
#[derive(Debug, Clone, PartialEq)]
pub struct EventState {
    pub(super) definition: Arc<EventDefinition>,

    pub(super) status: EventStatus,

    /// Seconds until the next status-relevant transition (always >= 0)
    pub(super) countdown: f64,

    /// Absolute match time of the next expected occurrence
    pub(super) next_spawn_time: f64,

    /// Times players have cleared this event (manual respawn only)
    pub(super) kill_count: u32,

    pub(super) sound_enabled: bool,

    // ─── One-shot latches (re-armed when a new cycle begins) ─────────────────
    pub(super) has_played_warning_30: bool,
    pub(super) has_played_warning_10: bool,
    pub(super) has_played_spawn: bool,
}

impl EventState {
    pub(super) fn new(definition: Arc<EventDefinition>, sound_enabled: bool) -> Self {
        let first_spawn = definition.first_spawn;
        Self {
            definition,
            status: EventStatus::Upcoming,
            countdown: first_spawn,
            next_spawn_time: first_spawn,
            kill_count: 0,
            sound_enabled,
            has_played_warning_30: false,
            has_played_warning_10: false,
            has_played_spawn: false,
        }
    }

    pub fn definition(&self) -> &EventDefinition {
        &self.definition
    }

    pub fn id(&self) -> &str {
        &self.definition.id
    }

    pub fn status(&self) -> EventStatus {
        self.status
    }

    pub fn countdown(&self) -> f64 {
        self.countdown
    }

    pub fn next_spawn_time(&self) -> f64 {
        self.next_spawn_time
    }

    pub fn kill_count(&self) -> u32 {
        self.kill_count
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn has_played_warning_30(&self) -> bool {
        self.has_played_warning_30
    }

    pub fn has_played_warning_10(&self) -> bool {
        self.has_played_warning_10
    }

    pub fn has_played_spawn(&self) -> bool {
        self.has_played_spawn
    }

    /// Clear all three latches for a new countdown cycle
    pub(super) fn rearm(&mut self) {
        self.has_played_warning_30 = false;
        self.has_played_warning_10 = false;
        self.has_played_spawn = false;
    }

    pub(super) fn set_countdown(&mut self, remaining: f64) {
        self.countdown = remaining.max(0.0);
    }
}
