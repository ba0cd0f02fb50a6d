//! Tests for MatchSession wiring: clock to engine, cues to gateway,
//! toggles and mute to the preference store.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use matchtimer_types::{Cue, EventPriority, EventStatus};

use crate::audio::{AudioError, CuePlayer};
use crate::catalog::{EventCatalog, EventDefinition, EventKind, RespawnSchedule};
use crate::preferences::{MUTED_KEY, MemoryStore, PreferenceStore, PreferencesError, SoundToggles};

use crate::session::MatchSession;

// ═══════════════════════════════════════════════════════════════════════════
// Test Helpers
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<Cue>>>);

impl Recorder {
    fn take(&self) -> Vec<Cue> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

impl CuePlayer for Recorder {
    fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
        self.0.lock().unwrap().push(cue);
        Ok(())
    }
}

/// Store handle the test keeps after the session takes ownership
#[derive(Clone, Default)]
struct SharedStore(Arc<Mutex<MemoryStore>>);

impl PreferenceStore for SharedStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.lock().unwrap().get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), PreferencesError> {
        self.0.lock().unwrap().set(key, value)
    }
}

fn catalog() -> EventCatalog {
    EventCatalog::new(vec![
        EventDefinition::new(
            "camps",
            "Camps",
            "*",
            "one-time",
            120.0,
            EventPriority::Low,
            EventKind::OneTimeSpawn,
        ),
        EventDefinition::new(
            "boss",
            "Boss",
            "*",
            "manual",
            600.0,
            EventPriority::Critical,
            EventKind::ManualRespawn {
                schedule: RespawnSchedule::Fixed(300.0),
            },
        ),
    ])
    .unwrap()
}

fn session_with(store: SharedStore) -> (MatchSession, Recorder) {
    let recorder = Recorder::default();
    let session = MatchSession::new(&catalog(), Box::new(store), Box::new(recorder.clone()));
    (session, recorder)
}

fn secs(s: f64) -> Duration {
    Duration::from_secs_f64(s)
}

fn status(session: &MatchSession, id: &str) -> EventStatus {
    session.event(id).unwrap().status()
}

// ═══════════════════════════════════════════════════════════════════════════
// Clock Wiring
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn ticks_drive_event_transitions() {
    let (mut session, recorder) = session_with(SharedStore::default());
    let t0 = Instant::now();

    assert_eq!(session.tick_at(t0), None, "idle session does not tick");

    session.start_at(t0);
    assert_eq!(session.tick_at(t0 + secs(119.0)), Some(119.0));
    assert_eq!(status(&session, "camps"), EventStatus::Upcoming);

    session.tick_at(t0 + secs(120.0));
    assert_eq!(status(&session, "camps"), EventStatus::Active);
    assert!(recorder.take().contains(&Cue::Spawn));
    assert_eq!(session.log().latest().unwrap().message, "Camps spawned!");

    session.tick_at(t0 + secs(123.0));
    assert_eq!(status(&session, "camps"), EventStatus::Completed);
}

#[test]
fn pause_freezes_elapsed() {
    let (mut session, _) = session_with(SharedStore::default());
    let t0 = Instant::now();

    session.start_at(t0);
    session.tick_at(t0 + secs(10.0));
    session.pause_at(t0 + secs(10.0));
    assert!(session.is_paused());
    assert_eq!(session.tick_at(t0 + secs(100.0)), None);
    assert_eq!(session.elapsed(), 10.0);

    session.resume_at(t0 + secs(100.0));
    assert_eq!(session.tick_at(t0 + secs(105.0)), Some(15.0));
}

#[test]
fn seek_while_paused_recomputes_immediately() {
    let (mut session, _) = session_with(SharedStore::default());
    let t0 = Instant::now();

    session.start_at(t0);
    session.pause_at(t0 + secs(1.0));
    session.set_time_at(600.0, t0 + secs(2.0));

    assert_eq!(status(&session, "boss"), EventStatus::Available);
    assert_eq!(session.current_stage().min_time, 600);
}

#[test]
fn seek_while_idle_does_not_recompute() {
    let (mut session, _) = session_with(SharedStore::default());
    session.set_time_at(600.0, Instant::now());

    assert_eq!(session.elapsed(), 600.0);
    assert_eq!(status(&session, "boss"), EventStatus::Upcoming);
    assert!(session.log().is_empty());
}

#[test]
fn reset_restores_initial_states() {
    let (mut session, _) = session_with(SharedStore::default());
    let t0 = Instant::now();

    session.start_at(t0);
    session.tick_at(t0 + secs(120.0));
    assert!(!session.log().is_empty());

    let generation = session.generation();
    session.reset();
    assert_ne!(session.generation(), generation);
    assert!(!session.is_running());
    assert_eq!(session.elapsed(), 0.0);
    assert!(session.log().is_empty());
    assert_eq!(status(&session, "camps"), EventStatus::Upcoming);

    // The old grace period must not complete the new match's event
    let t1 = t0 + secs(500.0);
    session.start_at(t1);
    session.tick_at(t1 + secs(2.0));
    assert_eq!(status(&session, "camps"), EventStatus::Upcoming);
}

#[test]
fn mark_cleared_uses_clock_time() {
    let (mut session, _) = session_with(SharedStore::default());
    let t0 = Instant::now();

    session.start_at(t0);
    session.tick_at(t0 + secs(650.0));
    assert_eq!(session.mark_cleared("boss"), Some(300.0));

    let boss = session.event("boss").unwrap();
    assert_eq!(boss.status(), EventStatus::Respawning);
    assert_eq!(boss.next_spawn_time(), 950.0);
    assert_eq!(session.log().latest().unwrap().message, "Boss cleared/killed (#1)");
}

// ═══════════════════════════════════════════════════════════════════════════
// Sound & Preferences
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn mute_silences_cues_but_not_the_log() {
    let (mut session, recorder) = session_with(SharedStore::default());
    let t0 = Instant::now();

    assert!(session.toggle_mute());
    session.start_at(t0);
    session.tick_at(t0 + secs(120.0));

    assert!(recorder.take().is_empty());
    assert_eq!(session.log().latest().unwrap().message, "Camps spawned!");
}

#[test]
fn mute_flag_persists_across_sessions() {
    let store = SharedStore::default();
    let (mut session, _) = session_with(store.clone());
    session.set_muted(true);
    assert_eq!(store.get(MUTED_KEY).as_deref(), Some("true"));

    let (restored, _) = session_with(store);
    assert!(restored.is_muted());
}

#[test]
fn event_sound_toggle_persists_and_silences_event() {
    let store = SharedStore::default();
    let (mut session, recorder) = session_with(store.clone());

    assert_eq!(session.toggle_event_sound("camps"), Some(false));
    assert_eq!(session.toggle_event_sound("missing"), None);
    assert!(!SoundToggles::load(&store).is_enabled("camps"));

    let (mut restored, _) = session_with(store);
    assert!(!restored.event("camps").unwrap().sound_enabled());

    let t0 = Instant::now();
    session.start_at(t0);
    session.tick_at(t0 + secs(120.0));
    assert!(!recorder.take().contains(&Cue::Spawn));

    restored.start_at(t0);
    assert!(!restored.event("camps").unwrap().sound_enabled(), "start keeps toggles");
}
