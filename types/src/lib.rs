//! Shared data types for the match timer
//!
//! This crate contains serializable types that are shared between the event
//! engine (matchtimer-core) and any presentation shell (matchtimer-cli).

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Event Classification
// ─────────────────────────────────────────────────────────────────────────────

/// How important an event is. Drives the escalated spawn cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl EventPriority {
    /// High and critical events use the escalated cue for recurring spawns
    pub fn is_escalated(&self) -> bool {
        matches!(self, EventPriority::High | EventPriority::Critical)
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventPriority::Low => "low",
            EventPriority::Medium => "medium",
            EventPriority::High => "high",
            EventPriority::Critical => "critical",
        }
    }
}

/// Lifecycle status of a tracked event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// Counting down to the first occurrence
    #[default]
    Upcoming,
    /// Just occurred (brief highlight before the next status)
    Active,
    /// Counting down to the next occurrence
    Respawning,
    /// Up on the map, waiting for a player to clear it
    Available,
    /// One-shot event that has happened; no further updates
    Completed,
}

impl EventStatus {
    pub fn label(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Active => "active",
            EventStatus::Respawning => "respawning",
            EventStatus::Available => "available",
            EventStatus::Completed => "completed",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Audio
// ─────────────────────────────────────────────────────────────────────────────

/// Named audio cue. Carries no payload beyond its identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    /// Regular spawn chime
    Spawn,
    /// Ten seconds until the next occurrence
    Warning10,
    /// Thirty seconds until the next occurrence
    Warning30,
    /// Milestones and medium-priority spawns
    MajorEvent,
    /// Bosses and high-priority recurring spawns
    CriticalEvent,
}

impl Cue {
    pub const ALL: [Cue; 5] = [
        Cue::Spawn,
        Cue::Warning10,
        Cue::Warning30,
        Cue::MajorEvent,
        Cue::CriticalEvent,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Cue::Spawn => "spawn",
            Cue::Warning10 => "warning-10",
            Cue::Warning30 => "warning-30",
            Cue::MajorEvent => "major-event",
            Cue::CriticalEvent => "critical-event",
        }
    }
}

/// Audio playback settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioSettings {
    /// Master enable for the audio backend
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Volume level (0-100)
    #[serde(default = "default_audio_volume")]
    pub volume: u8,
}

fn default_audio_volume() -> u8 {
    80
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 80,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Event Log
// ─────────────────────────────────────────────────────────────────────────────

/// A single line in the match event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Match time in seconds
    pub time: f64,
    pub message: String,
    pub icon: String,
}

impl LogEntry {
    pub fn new(time: f64, message: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            time,
            message: message.into(),
            icon: icon.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Application Config
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration.
///
/// Note: Persistence methods (load/save) are provided by matchtimer-core via the
/// `AppConfigExt` trait, as they require platform-specific dependencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// How often the tick driver samples the clock (per second)
    #[serde(default = "default_tick_hz")]
    pub tick_hz: u32,

    /// Custom event catalog (TOML). None = built-in catalog.
    #[serde(default)]
    pub catalog_path: Option<String>,

    /// Where mute state and per-event sound toggles are kept.
    /// None = `<config dir>/matchtimer/preferences.toml`
    #[serde(default)]
    pub preferences_path: Option<String>,

    #[serde(default)]
    pub audio: AudioSettings,
}

fn default_true() -> bool {
    true
}

fn default_tick_hz() -> u32 {
    20
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_hz: default_tick_hz(),
            catalog_path: None,
            preferences_path: None,
            audio: AudioSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.tick_hz, 20);
        assert!(config.audio.enabled);
    }

    #[test]
    fn partial_audio_section_fills_defaults() {
        let config: AppConfig = toml::from_str("tick_hz = 8\n[audio]\nvolume = 30\n").unwrap();
        assert_eq!(config.tick_hz, 8);
        assert_eq!(config.audio.volume, 30);
        assert!(config.audio.enabled);
    }

    #[test]
    fn priority_escalation() {
        assert!(!EventPriority::Low.is_escalated());
        assert!(!EventPriority::Medium.is_escalated());
        assert!(EventPriority::High.is_escalated());
        assert!(EventPriority::Critical.is_escalated());
    }

    #[test]
    fn priority_parses_snake_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            priority: EventPriority,
        }
        let w: Wrapper = toml::from_str("priority = \"critical\"").unwrap();
        assert_eq!(w.priority, EventPriority::Critical);
    }
}
