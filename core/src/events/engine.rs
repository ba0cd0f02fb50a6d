//! Event engine
//!
//! Derives every event's status and countdown from elapsed match time alone,
//! plus player "cleared" commands for manual-respawn events. Side effects
//! (cues and log lines) are guarded by per-event latches so repeated ticks at
//! the same elapsed value never fire twice.

use std::sync::Arc;

use matchtimer_types::{Cue, EventPriority, EventStatus};

use crate::catalog::{EventCatalog, EventDefinition, EventKind};
use crate::log::EventLog;
use crate::preferences::SoundToggles;

use super::deferred::DeferredQueue;
use super::state::EventState;

/// Seconds a milestone or one-time spawn stays active before completing
pub const SINGLE_SPAWN_GRACE_SECS: f64 = 3.0;

/// Seconds a recurring spawn stays active before it starts respawning
pub const RECURRING_GRACE_SECS: f64 = 2.0;

/// Width of the "just spawned" window after each recurring boundary
pub const SPAWN_WINDOW_SECS: f64 = 0.5;

/// Owns one state per catalog definition and the match log
#[derive(Debug, Clone)]
pub struct EventEngine {
    definitions: Vec<Arc<EventDefinition>>,
    states: Vec<EventState>,
    log: EventLog,
    deferred: DeferredQueue,
}

impl EventEngine {
    /// Create an engine with freshly initialized states
    pub fn new(catalog: &EventCatalog, toggles: &SoundToggles) -> Self {
        let definitions = catalog
            .definitions()
            .iter()
            .cloned()
            .map(Arc::new)
            .collect();

        let mut engine = Self {
            definitions,
            states: Vec::new(),
            log: EventLog::new(),
            deferred: DeferredQueue::default(),
        };
        engine.initialize(toggles);
        engine
    }

    /// Rebuild every state from the catalog and clear the log.
    /// Called at each match (re)start; pending grace periods go stale.
    pub fn initialize(&mut self, toggles: &SoundToggles) {
        self.deferred.advance_generation();
        self.states = self
            .definitions
            .iter()
            .map(|def| EventState::new(Arc::clone(def), toggles.is_enabled(&def.id)))
            .collect();
        self.log.clear();

        tracing::debug!(
            events = self.states.len(),
            generation = self.deferred.generation(),
            "Event states initialized"
        );
    }

    // ─── Accessors ──────────────────────────────────────────────────────────

    /// States in catalog order
    pub fn events(&self) -> &[EventState] {
        &self.states
    }

    pub fn event(&self, id: &str) -> Option<&EventState> {
        self.states.iter().find(|s| s.id() == id)
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Match generation; bumps on every `initialize`
    pub fn generation(&self) -> u64 {
        self.deferred.generation()
    }

    /// Presentation order: active first, completed last, the rest by
    /// ascending countdown. Ties keep catalog order.
    pub fn sorted_events(&self) -> Vec<&EventState> {
        let mut sorted: Vec<&EventState> = self.states.iter().collect();
        sorted.sort_by(|a, b| {
            sort_rank(a.status)
                .cmp(&sort_rank(b.status))
                .then(a.countdown.total_cmp(&b.countdown))
        });
        sorted
    }

    // ─── Commands ───────────────────────────────────────────────────────────

    /// Recompute every event for a new elapsed value, appending cues to `cues`.
    pub fn recompute(&mut self, elapsed: f64, cues: &mut Vec<Cue>) {
        self.apply_due_transitions(elapsed);

        let Self {
            states,
            log,
            deferred,
            ..
        } = self;

        for (index, state) in states.iter_mut().enumerate() {
            let mut tick = Tick {
                index,
                elapsed,
                log: &mut *log,
                deferred: &mut *deferred,
                cues: &mut *cues,
            };

            let definition = Arc::clone(&state.definition);
            match &definition.kind {
                EventKind::Milestone => tick.single_spawn(state, Cue::MajorEvent, "reached!"),
                EventKind::OneTimeSpawn => tick.single_spawn(state, Cue::Spawn, "spawned!"),
                EventKind::AutoRecurring { interval } => tick.auto_recurring(state, *interval),
                EventKind::ManualRespawn { .. } => tick.manual_respawn(state),
            }
        }
    }

    /// Record that players cleared a manual-respawn event and start its
    /// respawn countdown. Returns the chosen respawn duration, or None when
    /// the id is unknown or the event is not manual-respawn.
    pub fn mark_cleared(&mut self, event_id: &str, elapsed: f64) -> Option<f64> {
        let state = self.states.iter_mut().find(|s| s.id() == event_id)?;
        let EventKind::ManualRespawn { schedule } = &state.definition.kind else {
            tracing::debug!(event_id, "Ignoring clear for non-respawning event");
            return None;
        };

        let kill_count = state.kill_count + 1;
        let duration = schedule.duration_for_kill(kill_count)?;

        state.kill_count = kill_count;
        state.status = EventStatus::Respawning;
        state.next_spawn_time = elapsed + duration;
        state.set_countdown(duration);
        state.rearm();

        let def = &state.definition;
        self.log.record(
            elapsed,
            format!("{} cleared/killed (#{})", def.name, kill_count),
            def.icon.as_str(),
        );
        tracing::debug!(event_id, kill_count, duration, elapsed, "Event cleared");

        Some(duration)
    }

    /// Flip one event's sound toggle. Returns the new value, None for an
    /// unknown id. Persisting is the caller's job.
    pub fn toggle_event_sound(&mut self, event_id: &str) -> Option<bool> {
        let state = self.states.iter_mut().find(|s| s.id() == event_id)?;
        state.sound_enabled = !state.sound_enabled;
        Some(state.sound_enabled)
    }

    fn apply_due_transitions(&mut self, elapsed: f64) {
        for transition in self.deferred.take_due(elapsed) {
            let Some(state) = self.states.get_mut(transition.event_index) else {
                continue;
            };
            // Something else already moved the event on
            if state.status != EventStatus::Active {
                continue;
            }
            tracing::debug!(
                event_id = state.id(),
                to = transition.to.label(),
                elapsed,
                "Grace period over"
            );
            state.status = transition.to;
        }
    }
}

fn sort_rank(status: EventStatus) -> u8 {
    match status {
        EventStatus::Active => 0,
        EventStatus::Completed => 2,
        _ => 1,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Per-Type Recomputation
// ═══════════════════════════════════════════════════════════════════════════

/// Borrowed outputs for recomputing one event
struct Tick<'a> {
    index: usize,
    elapsed: f64,
    log: &'a mut EventLog,
    deferred: &'a mut DeferredQueue,
    cues: &'a mut Vec<Cue>,
}

impl Tick<'_> {
    /// Milestones and one-time spawns: count down, fire once, complete
    fn single_spawn(&mut self, state: &mut EventState, cue: Cue, verb: &str) {
        if state.status == EventStatus::Completed {
            return;
        }

        let remaining = state.definition.first_spawn - self.elapsed;
        state.set_countdown(remaining);

        if remaining > 0.0 {
            state.status = EventStatus::Upcoming;
            self.warnings(state, remaining);
            return;
        }

        if !state.has_played_spawn {
            state.status = EventStatus::Active;
            state.has_played_spawn = true;
            self.announce(state, cue, verb);
            self.deferred.schedule(
                self.index,
                self.elapsed + SINGLE_SPAWN_GRACE_SECS,
                EventStatus::Completed,
            );
        } else if state.status != EventStatus::Active {
            // Already announced, then seeked back before its grace period ended
            state.status = EventStatus::Completed;
        }
    }

    /// Fixed-interval events that spawn on their own
    fn auto_recurring(&mut self, state: &mut EventState, interval: f64) {
        let first_spawn = state.definition.first_spawn;

        if self.elapsed < first_spawn {
            let remaining = first_spawn - self.elapsed;
            state.status = EventStatus::Upcoming;
            state.set_countdown(remaining);
            state.next_spawn_time = first_spawn;
            self.warnings(state, remaining);
            return;
        }

        let since_first = self.elapsed - first_spawn;
        let cycles_passed = (since_first / interval).floor();
        let next_occurrence = first_spawn + (cycles_passed + 1.0) * interval;
        let remaining = next_occurrence - self.elapsed;
        let since_last_spawn = since_first - cycles_passed * interval;

        if since_last_spawn < SPAWN_WINDOW_SECS {
            if !state.has_played_spawn {
                state.status = EventStatus::Active;
                state.has_played_spawn = true;
                let cue = if state.definition.priority.is_escalated() {
                    Cue::CriticalEvent
                } else {
                    Cue::MajorEvent
                };
                self.announce(state, cue, "spawned!");
                self.deferred.schedule(
                    self.index,
                    self.elapsed + RECURRING_GRACE_SECS,
                    EventStatus::Respawning,
                );
            }
        } else {
            state.status = EventStatus::Respawning;
            state.has_played_spawn = false;
        }

        state.set_countdown(remaining);
        state.next_spawn_time = next_occurrence;

        // New cycle: re-arm warnings for the next approach
        if remaining > 30.0 {
            state.has_played_warning_30 = false;
            state.has_played_warning_10 = false;
        }
        self.warnings(state, remaining);
    }

    /// Events that respawn only after players clear them
    fn manual_respawn(&mut self, state: &mut EventState) {
        let (target, verb) = match state.status {
            EventStatus::Upcoming => (state.definition.first_spawn, "spawned!"),
            EventStatus::Respawning => (state.next_spawn_time, "respawned!"),
            // Available waits for a clear; other statuses never occur here
            _ => return,
        };

        let remaining = target - self.elapsed;
        state.set_countdown(remaining);

        if remaining > 0.0 {
            self.warnings(state, remaining);
            return;
        }

        if !state.has_played_spawn {
            state.has_played_spawn = true;
            let cue = if state.definition.priority == EventPriority::Critical {
                Cue::CriticalEvent
            } else {
                Cue::MajorEvent
            };
            self.announce(state, cue, verb);
        }
        state.status = EventStatus::Available;
        state.countdown = 0.0;
    }

    /// Fire a spawn cue (if audible) and write the log line
    fn announce(&mut self, state: &EventState, cue: Cue, verb: &str) {
        let def = &state.definition;
        if state.sound_enabled {
            self.cues.push(cue);
        }
        self.log
            .record(self.elapsed, format!("{} {}", def.name, verb), def.icon.as_str());
        tracing::debug!(
            event_id = %def.id,
            status = state.status.label(),
            elapsed = self.elapsed,
            "{} {}",
            def.name,
            verb
        );
    }

    /// Edge-triggered 30s and 10s warnings
    fn warnings(&mut self, state: &mut EventState, remaining: f64) {
        if !state.sound_enabled {
            return;
        }
        if remaining <= 10.0 && remaining > 9.0 && !state.has_played_warning_10 {
            state.has_played_warning_10 = true;
            self.cues.push(Cue::Warning10);
        }
        if remaining <= 30.0 && remaining > 29.0 && !state.has_played_warning_30 {
            state.has_played_warning_30 = true;
            self.cues.push(Cue::Warning30);
        }
    }
}
