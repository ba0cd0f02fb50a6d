//! Match session
//!
//! One `MatchSession` per running match: it owns the clock, the event engine,
//! the cue gateway and the preference store, and is the only thing a host
//! needs to drive.

use std::time::Instant;

use matchtimer_types::Cue;

use crate::audio::{CuePlayer, SoundGateway};
use crate::catalog::EventCatalog;
use crate::clock::MatchClock;
use crate::events::{EventEngine, EventState};
use crate::log::EventLog;
use crate::preferences::{self, PreferenceStore, SoundToggles};
use crate::stage::{self, MapStage};

pub struct MatchSession {
    clock: MatchClock,
    engine: EventEngine,
    gateway: SoundGateway,
    store: Box<dyn PreferenceStore>,
    /// Scratch buffer reused between ticks
    cues: Vec<Cue>,
}

impl MatchSession {
    /// Build a session, restoring mute and per-event toggles from `store`
    pub fn new(
        catalog: &EventCatalog,
        store: Box<dyn PreferenceStore>,
        player: Box<dyn CuePlayer>,
    ) -> Self {
        let muted = preferences::load_muted(store.as_ref());
        let toggles = SoundToggles::load(store.as_ref());

        Self {
            clock: MatchClock::new(),
            engine: EventEngine::new(catalog, &toggles),
            gateway: SoundGateway::new(player, muted),
            store,
            cues: Vec::new(),
        }
    }

    // ─── Clock Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// Start a new match (fresh event states) or resume a paused one
    pub fn start_at(&mut self, now: Instant) {
        if self.clock.is_ticking() {
            return;
        }

        if !self.clock.is_running() {
            let toggles = SoundToggles::load(self.store.as_ref());
            self.engine.initialize(&toggles);
            tracing::info!(generation = self.engine.generation(), "Match started");
        } else {
            tracing::info!(elapsed = self.clock.elapsed(), "Match resumed");
        }

        self.clock.start_at(now);
        self.recompute();
    }

    pub fn pause(&mut self) {
        self.pause_at(Instant::now());
    }

    pub fn pause_at(&mut self, now: Instant) {
        if !self.clock.is_ticking() {
            return;
        }
        self.clock.pause_at(now);
        tracing::info!(elapsed = self.clock.elapsed(), "Match paused");
    }

    pub fn resume(&mut self) {
        self.resume_at(Instant::now());
    }

    pub fn resume_at(&mut self, now: Instant) {
        if !self.clock.is_paused() {
            return;
        }
        self.clock.resume_at(now);
        tracing::info!(elapsed = self.clock.elapsed(), "Match resumed");
    }

    /// Stop the clock and return every event to its initial state
    pub fn reset(&mut self) {
        self.clock.reset();
        let toggles = SoundToggles::load(self.store.as_ref());
        self.engine.initialize(&toggles);
        tracing::info!(generation = self.engine.generation(), "Match reset");
    }

    pub fn set_time(&mut self, seconds: f64) {
        self.set_time_at(seconds, Instant::now());
    }

    /// Seek the clock. While a match is running (paused or not) the events
    /// are recomputed for the new time right away.
    pub fn set_time_at(&mut self, seconds: f64, now: Instant) {
        self.clock.set_time_at(seconds, now);
        tracing::info!(elapsed = self.clock.elapsed(), "Match time set");
        if self.clock.is_running() {
            self.recompute();
        }
    }

    pub fn tick(&mut self) -> Option<f64> {
        self.tick_at(Instant::now())
    }

    /// Advance to `now` and recompute. Returns the new elapsed value, or
    /// None while idle or paused.
    pub fn tick_at(&mut self, now: Instant) -> Option<f64> {
        let elapsed = self.clock.tick_at(now)?;
        self.recompute();
        Some(elapsed)
    }

    // ─── Event Commands ─────────────────────────────────────────────────────

    /// Mark a manual-respawn event cleared at the current match time
    pub fn mark_cleared(&mut self, event_id: &str) -> Option<f64> {
        self.engine.mark_cleared(event_id, self.clock.elapsed())
    }

    /// Flip and persist one event's sound toggle. Returns the new value.
    pub fn toggle_event_sound(&mut self, event_id: &str) -> Option<bool> {
        let enabled = self.engine.toggle_event_sound(event_id)?;

        let mut toggles = SoundToggles::load(self.store.as_ref());
        toggles.set(event_id, enabled);
        if let Err(e) = toggles.save(self.store.as_mut()) {
            tracing::warn!(event_id, error = %e, "Failed to persist sound toggle");
        }
        Some(enabled)
    }

    /// Flip and persist the global mute. Returns the new value.
    pub fn toggle_mute(&mut self) -> bool {
        let muted = !self.gateway.is_muted();
        self.set_muted(muted);
        muted
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.gateway.set_muted(muted);
        if let Err(e) = preferences::save_muted(self.store.as_mut(), muted) {
            tracing::warn!(error = %e, "Failed to persist mute flag");
        }
    }

    // ─── Accessors ──────────────────────────────────────────────────────────

    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    /// Bumps every time a new match starts or the session is reset
    pub fn generation(&self) -> u64 {
        self.engine.generation()
    }

    pub fn is_muted(&self) -> bool {
        self.gateway.is_muted()
    }

    pub fn events(&self) -> &[EventState] {
        self.engine.events()
    }

    pub fn sorted_events(&self) -> Vec<&EventState> {
        self.engine.sorted_events()
    }

    pub fn event(&self, event_id: &str) -> Option<&EventState> {
        self.engine.event(event_id)
    }

    pub fn log(&self) -> &EventLog {
        self.engine.log()
    }

    pub fn current_stage(&self) -> &'static MapStage {
        stage::current_stage(self.clock.elapsed())
    }

    fn recompute(&mut self) {
        self.engine.recompute(self.clock.elapsed(), &mut self.cues);
        self.gateway.dispatch_all(self.cues.drain(..));
    }
}

impl std::fmt::Debug for MatchSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchSession")
            .field("clock", &self.clock)
            .field("engine", &self.engine)
            .field("gateway", &self.gateway)
            .finish_non_exhaustive()
    }
}
