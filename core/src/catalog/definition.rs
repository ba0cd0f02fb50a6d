//! Event definition types
//!
//! Definitions are immutable templates describing when an event occurs.
//! They are either built in (see `builtin`) or loaded from a TOML file,
//! and are validated once when the catalog is constructed.

use serde::Deserialize;

use matchtimer_types::EventPriority;

use super::CatalogError;

/// Manual respawn cadence
#[derive(Debug, Clone, PartialEq)]
pub enum RespawnSchedule {
    /// Same duration after every clear
    Fixed(f64),

    /// Shrinking durations; the last entry repeats once the list runs out
    Decreasing(Vec<f64>),
}

impl RespawnSchedule {
    /// Respawn duration after the `kill_count`-th clear (1-based).
    /// Returns None for an empty schedule.
    pub fn duration_for_kill(&self, kill_count: u32) -> Option<f64> {
        match self {
            RespawnSchedule::Fixed(secs) => Some(*secs),
            RespawnSchedule::Decreasing(times) => {
                let last = times.len().checked_sub(1)?;
                let idx = (kill_count.saturating_sub(1) as usize).min(last);
                times.get(idx).copied()
            }
        }
    }

    fn validate(&self, id: &str) -> Result<(), CatalogError> {
        match self {
            RespawnSchedule::Fixed(secs) => check_positive(id, "respawn_time", *secs),
            RespawnSchedule::Decreasing(times) => {
                if times.is_empty() {
                    return Err(CatalogError::invalid(id, "respawn_times is empty"));
                }
                times
                    .iter()
                    .try_for_each(|secs| check_positive(id, "respawn_times", *secs))
            }
        }
    }
}

/// What kind of timing rule an event follows
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// Spawns at `first_spawn`, then every `interval` seconds on its own
    AutoRecurring { interval: f64 },

    /// Spawns once at `first_spawn`
    OneTimeSpawn,

    /// Map state change at `first_spawn` (statue upgrades etc.)
    Milestone,

    /// Spawns at `first_spawn`, then respawns only after players clear it
    ManualRespawn { schedule: RespawnSchedule },
}

impl EventKind {
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::AutoRecurring { .. } => "auto-recurring",
            EventKind::OneTimeSpawn => "one-time-spawn",
            EventKind::Milestone => "milestone",
            EventKind::ManualRespawn { .. } => "manual-respawn",
        }
    }
}

/// Definition of a tracked event
#[derive(Debug, Clone, PartialEq)]
pub struct EventDefinition {
    /// Unique identifier
    pub id: String,

    /// Display name shown in lists and log lines
    pub name: String,

    /// Short glyph shown next to the name
    pub icon: String,

    /// Optional image asset for richer shells
    pub icon_image: Option<String>,

    pub description: String,

    /// Seconds into the match of the first occurrence
    pub first_spawn: f64,

    pub priority: EventPriority,

    pub kind: EventKind,
}

impl EventDefinition {
    pub fn new(
        id: &str,
        name: &str,
        icon: &str,
        description: &str,
        first_spawn: f64,
        priority: EventPriority,
        kind: EventKind,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            icon_image: None,
            description: description.to_string(),
            first_spawn,
            priority,
            kind,
        }
    }

    pub fn is_manual_respawn(&self) -> bool {
        matches!(self.kind, EventKind::ManualRespawn { .. })
    }

    /// Reject definitions that would corrupt engine state
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.id.trim().is_empty() {
            return Err(CatalogError::invalid(&self.id, "id is empty"));
        }
        if !self.first_spawn.is_finite() || self.first_spawn < 0.0 {
            return Err(CatalogError::invalid(
                &self.id,
                format!("first_spawn must be >= 0 (got {})", self.first_spawn),
            ));
        }

        match &self.kind {
            EventKind::AutoRecurring { interval } => check_positive(&self.id, "interval", *interval),
            EventKind::ManualRespawn { schedule } => schedule.validate(&self.id),
            EventKind::OneTimeSpawn | EventKind::Milestone => Ok(()),
        }
    }
}

fn check_positive(id: &str, field: &str, value: f64) -> Result<(), CatalogError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CatalogError::invalid(
            id,
            format!("{field} must be > 0 (got {value})"),
        ))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TOML Representation
// ═══════════════════════════════════════════════════════════════════════════

/// Event type tag as written in catalog files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(super) enum RawEventType {
    #[serde(alias = "auto-recurring")]
    AutoRecurring,
    #[serde(alias = "one-time-spawn")]
    OneTimeSpawn,
    Milestone,
    #[serde(alias = "manual-respawn")]
    ManualRespawn,
}

/// Flat on-disk shape of a definition. Type-specific timing fields are
/// optional here and checked in `into_definition`.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct RawEventDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub icon_image: Option<String>,
    #[serde(default)]
    pub description: String,
    pub first_spawn: f64,
    #[serde(rename = "type")]
    pub event_type: RawEventType,
    #[serde(default)]
    pub priority: EventPriority,
    #[serde(default)]
    pub interval: Option<f64>,
    #[serde(default)]
    pub respawn_time: Option<f64>,
    #[serde(default)]
    pub respawn_times: Option<Vec<f64>>,
}

impl RawEventDefinition {
    pub(super) fn into_definition(self) -> Result<EventDefinition, CatalogError> {
        let kind = match self.event_type {
            RawEventType::AutoRecurring => {
                let interval = self
                    .interval
                    .ok_or_else(|| CatalogError::invalid(&self.id, "auto_recurring requires interval"))?;
                EventKind::AutoRecurring { interval }
            }
            RawEventType::OneTimeSpawn => EventKind::OneTimeSpawn,
            RawEventType::Milestone => EventKind::Milestone,
            RawEventType::ManualRespawn => {
                // A decreasing list wins over a fixed time when both are given
                let schedule = match (self.respawn_times, self.respawn_time) {
                    (Some(times), _) => RespawnSchedule::Decreasing(times),
                    (None, Some(secs)) => RespawnSchedule::Fixed(secs),
                    (None, None) => {
                        return Err(CatalogError::invalid(
                            &self.id,
                            "manual_respawn requires respawn_time or respawn_times",
                        ));
                    }
                };
                EventKind::ManualRespawn { schedule }
            }
        };

        let def = EventDefinition {
            id: self.id,
            name: self.name,
            icon: self.icon,
            icon_image: self.icon_image,
            description: self.description,
            first_spawn: self.first_spawn,
            priority: self.priority,
            kind,
        };
        def.validate()?;
        Ok(def)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decreasing_schedule_clamps_to_last_entry() {
        let schedule = RespawnSchedule::Decreasing(vec![420.0, 360.0, 300.0]);
        assert_eq!(schedule.duration_for_kill(1), Some(420.0));
        assert_eq!(schedule.duration_for_kill(2), Some(360.0));
        assert_eq!(schedule.duration_for_kill(3), Some(300.0));
        assert_eq!(schedule.duration_for_kill(4), Some(300.0));
        assert_eq!(schedule.duration_for_kill(40), Some(300.0));
    }

    #[test]
    fn fixed_schedule_ignores_kill_count() {
        let schedule = RespawnSchedule::Fixed(290.0);
        assert_eq!(schedule.duration_for_kill(1), Some(290.0));
        assert_eq!(schedule.duration_for_kill(9), Some(290.0));
    }

    #[test]
    fn empty_schedule_has_no_duration() {
        assert_eq!(RespawnSchedule::Decreasing(Vec::new()).duration_for_kill(1), None);
    }

    #[test]
    fn validate_rejects_bad_timing() {
        let bad_interval = EventDefinition::new(
            "urn",
            "Urn",
            "",
            "",
            600.0,
            EventPriority::High,
            EventKind::AutoRecurring { interval: 0.0 },
        );
        assert!(bad_interval.validate().is_err());

        let negative_spawn = EventDefinition::new(
            "camp",
            "Camp",
            "",
            "",
            -1.0,
            EventPriority::Low,
            EventKind::OneTimeSpawn,
        );
        assert!(negative_spawn.validate().is_err());

        let empty_list = EventDefinition::new(
            "boss",
            "Boss",
            "",
            "",
            600.0,
            EventPriority::Critical,
            EventKind::ManualRespawn {
                schedule: RespawnSchedule::Decreasing(Vec::new()),
            },
        );
        assert!(empty_list.validate().is_err());
    }

    #[test]
    fn raw_manual_respawn_without_schedule_is_rejected() {
        let raw: RawEventDefinition = toml::from_str(
            r#"
            id = "camp"
            name = "Camp"
            first_spawn = 360
            type = "manual_respawn"
            "#,
        )
        .unwrap();

        let err = raw.into_definition().unwrap_err();
        assert!(matches!(err, CatalogError::InvalidDefinition { .. }));
    }

    #[test]
    fn raw_accepts_kebab_case_type_and_integer_times() {
        let raw: RawEventDefinition = toml::from_str(
            r#"
            id = "boss"
            name = "Boss"
            first_spawn = 600
            type = "manual-respawn"
            priority = "critical"
            respawn_times = [420, 360, 300]
            "#,
        )
        .unwrap();

        let def = raw.into_definition().unwrap();
        assert_eq!(def.priority, EventPriority::Critical);
        assert_eq!(
            def.kind,
            EventKind::ManualRespawn {
                schedule: RespawnSchedule::Decreasing(vec![420.0, 360.0, 300.0])
            }
        );
    }
}
