//! Match clock
//!
//! Tracks elapsed seconds since match start. The host drives it by calling
//! [`MatchClock::tick`] at its redraw cadence; every call while running and
//! unpaused yields a fresh elapsed value for the event engine.
//!
//! Each operation has an `_at` variant taking an explicit `Instant` so replays
//! and tests can drive the clock without sleeping.

use std::time::Instant;

/// Elapsed-time clock with start/pause/resume/reset/seek.
#[derive(Debug, Clone, Default)]
pub struct MatchClock {
    /// Elapsed value frozen at the last pause (or seek)
    paused_elapsed: f64,

    /// When the current running stretch began. None while idle or paused.
    resumed_at: Option<Instant>,

    /// Last elapsed value reported
    elapsed: f64,

    is_running: bool,
    is_paused: bool,
}

impl MatchClock {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Accessors ──────────────────────────────────────────────────────────

    /// Last elapsed value in seconds
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    /// Running and not paused
    pub fn is_ticking(&self) -> bool {
        self.is_running && !self.is_paused
    }

    // ─── Controls ───────────────────────────────────────────────────────────

    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// Start a fresh match, or resume if paused. No-op while ticking.
    pub fn start_at(&mut self, now: Instant) {
        if self.is_ticking() {
            return;
        }

        if self.is_paused {
            self.resume_at(now);
            return;
        }

        self.elapsed = 0.0;
        self.paused_elapsed = 0.0;
        self.is_running = true;
        self.is_paused = false;
        self.resumed_at = Some(now);
    }

    pub fn pause(&mut self) {
        self.pause_at(Instant::now());
    }

    /// Freeze elapsed at its current value. No-op if idle or already paused.
    pub fn pause_at(&mut self, now: Instant) {
        if !self.is_ticking() {
            return;
        }
        self.elapsed = self.elapsed_at(now);
        self.paused_elapsed = self.elapsed;
        self.is_paused = true;
        self.resumed_at = None;
    }

    pub fn resume(&mut self) {
        self.resume_at(Instant::now());
    }

    /// Continue from a pause. No-op unless paused.
    pub fn resume_at(&mut self, now: Instant) {
        if !self.is_running || !self.is_paused {
            return;
        }
        self.is_paused = false;
        self.resumed_at = Some(now);
    }

    /// Stop and zero the clock
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn set_time(&mut self, seconds: f64) {
        self.set_time_at(seconds, Instant::now());
    }

    /// Overwrite elapsed directly, keeping running/paused state.
    /// Negative and non-finite values clamp to zero.
    pub fn set_time_at(&mut self, seconds: f64, now: Instant) {
        let clamped = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
        self.elapsed = clamped;
        self.paused_elapsed = clamped;
        if self.is_ticking() {
            self.resumed_at = Some(now);
        }
    }

    // ─── Ticking ────────────────────────────────────────────────────────────

    pub fn tick(&mut self) -> Option<f64> {
        self.tick_at(Instant::now())
    }

    /// Sample the clock. Returns the new elapsed value while ticking,
    /// None while idle or paused.
    pub fn tick_at(&mut self, now: Instant) -> Option<f64> {
        if !self.is_ticking() {
            return None;
        }
        // Never report a smaller value than the last tick (Instant skew guard)
        self.elapsed = self.elapsed_at(now).max(self.elapsed);
        Some(self.elapsed)
    }

    fn elapsed_at(&self, now: Instant) -> f64 {
        match self.resumed_at {
            Some(resumed_at) => {
                self.paused_elapsed + now.saturating_duration_since(resumed_at).as_secs_f64()
            }
            None => self.paused_elapsed,
        }
    }
}

/// Format a match time as `MM:SS`
pub fn format_elapsed(secs: f64) -> String {
    let total = if secs.is_finite() { secs.max(0.0).floor() as u64 } else { 0 };
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Parse `MM:SS`, `H:MM:SS` or plain seconds into a match time
pub fn parse_match_time(input: &str) -> Option<f64> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let mut total = 0.0;
    for part in input.split(':') {
        let value: f64 = part.trim().parse().ok()?;
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        total = total * 60.0 + value;
    }
    Some(total)
}
