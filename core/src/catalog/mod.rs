//! Event catalog
//!
//! This module provides:
//! - **Definitions**: Immutable templates describing each tracked event
//! - **Built-in catalog**: The stock Midtown events
//! - **Loader**: Custom catalogs read from TOML
//!
//! A catalog is validated once on construction; the engine relies on every
//! definition having usable timing data.

mod builtin;
mod definition;
mod error;

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

pub use definition::{EventDefinition, EventKind, RespawnSchedule};
pub use error::CatalogError;

use definition::RawEventDefinition;

/// Validated, immutable list of event definitions
#[derive(Debug, Clone)]
pub struct EventCatalog {
    definitions: Vec<EventDefinition>,
}

/// On-disk catalog file shape
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    events: Vec<RawEventDefinition>,
}

impl EventCatalog {
    /// Build a catalog, rejecting duplicate ids and bad timing data
    pub fn new(definitions: Vec<EventDefinition>) -> Result<Self, CatalogError> {
        if definitions.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for def in &definitions {
            def.validate()?;
            if !seen.insert(def.id.as_str()) {
                return Err(CatalogError::DuplicateId { id: def.id.clone() });
            }
        }

        Ok(Self { definitions })
    }

    /// The stock Midtown catalog
    pub fn builtin() -> Self {
        Self {
            definitions: builtin::definitions(),
        }
    }

    /// Load a catalog from a TOML file with an `[[events]]` array
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::from_toml_str(&content).map_err(|e| match e {
            ParseFailure::Toml(source) => CatalogError::ParseToml {
                path: path.to_path_buf(),
                source,
            },
            ParseFailure::Catalog(e) => e,
        })?;

        tracing::info!(
            path = %path.display(),
            events = catalog.len(),
            "Loaded event catalog"
        );
        Ok(catalog)
    }

    fn from_toml_str(content: &str) -> Result<Self, ParseFailure> {
        let file: CatalogFile = toml::from_str(content).map_err(ParseFailure::Toml)?;
        let definitions = file
            .events
            .into_iter()
            .map(RawEventDefinition::into_definition)
            .collect::<Result<Vec<_>, _>>()
            .map_err(ParseFailure::Catalog)?;
        Self::new(definitions).map_err(ParseFailure::Catalog)
    }

    pub fn definitions(&self) -> &[EventDefinition] {
        &self.definitions
    }

    pub fn get(&self, id: &str) -> Option<&EventDefinition> {
        self.definitions.iter().find(|d| d.id == id)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for EventCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[derive(Debug)]
enum ParseFailure {
    Toml(toml::de::Error),
    Catalog(CatalogError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use matchtimer_types::EventPriority;

    #[test]
    fn builtin_catalog_is_valid() {
        let builtin = EventCatalog::builtin();
        let rebuilt = EventCatalog::new(builtin.definitions().to_vec());
        assert!(rebuilt.is_ok());
        assert_eq!(builtin.len(), 10);
    }

    #[test]
    fn builtin_mid_boss_uses_decreasing_schedule() {
        let catalog = EventCatalog::builtin();
        let boss = catalog.get("mid-boss").unwrap();
        assert_eq!(boss.priority, EventPriority::Critical);
        assert_eq!(
            boss.kind,
            EventKind::ManualRespawn {
                schedule: RespawnSchedule::Decreasing(vec![420.0, 360.0, 300.0])
            }
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let def = EventDefinition::new(
            "camp",
            "Camp",
            "",
            "",
            120.0,
            EventPriority::Low,
            EventKind::OneTimeSpawn,
        );
        let err = EventCatalog::new(vec![def.clone(), def]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { id } if id == "camp"));
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(matches!(EventCatalog::new(Vec::new()), Err(CatalogError::Empty)));
    }

    #[test]
    fn parses_catalog_toml() {
        let catalog = EventCatalog::from_toml_str(
            r#"
            [[events]]
            id = "powerups"
            name = "Powerups"
            icon = "⚡"
            first_spawn = 300
            type = "auto_recurring"
            interval = 300
            priority = "high"

            [[events]]
            id = "statues"
            name = "Statues"
            first_spawn = 600
            type = "milestone"
            "#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        let powerups = catalog.get("powerups").unwrap();
        assert_eq!(powerups.kind, EventKind::AutoRecurring { interval: 300.0 });
        assert_eq!(catalog.get("statues").unwrap().priority, EventPriority::Medium);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = EventCatalog::load(Path::new("/nonexistent/matchtimer/catalog.toml")).unwrap_err();
        assert!(matches!(err, CatalogError::ReadFile { .. }));
    }

    #[test]
    fn load_reports_bad_toml_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(&path, "[[events]\nid = ").unwrap();

        let err = EventCatalog::load(&path).unwrap_err();
        assert!(matches!(err, CatalogError::ParseToml { path: p, .. } if p == path));
    }
}
