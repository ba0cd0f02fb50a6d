//! Persisted user preferences
//!
//! Preferences live in a string-keyed store so the host can back them with
//! whatever it has (a file, a browser-style key/value store, memory):
//! - `matchtimer-muted`: `"true"` / `"false"`
//! - `matchtimer-sound-toggles`: flat JSON object `{ "<event id>": bool }`
//!
//! Missing or corrupt values are treated as absent and fall back to the
//! defaults (not muted, every event audible).

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

pub const MUTED_KEY: &str = "matchtimer-muted";
pub const SOUND_TOGGLES_KEY: &str = "matchtimer-sound-toggles";

// ═══════════════════════════════════════════════════════════════════════════
// Store Trait
// ═══════════════════════════════════════════════════════════════════════════

/// String key/value storage for preferences
pub trait PreferenceStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), PreferencesError>;
}

/// In-memory store (tests, ephemeral sessions)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), PreferencesError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// TOML-file store. Every `set` writes the whole table back to disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Open a store, starting empty if the file does not exist yet
    pub fn open(path: &Path) -> Result<Self, PreferencesError> {
        let values = if path.exists() {
            let content = std::fs::read_to_string(path)
                .map_err(|e| PreferencesError::Io(path.to_path_buf(), e))?;
            toml::from_str(&content).map_err(|e| PreferencesError::Parse(path.to_path_buf(), e))?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            values,
        })
    }

    /// Open a store, discarding an unreadable file instead of failing
    pub fn open_or_empty(path: &Path) -> Self {
        Self::open(path).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring unreadable preferences file");
            Self {
                path: path.to_path_buf(),
                values: BTreeMap::new(),
            }
        })
    }

    fn save(&self) -> Result<(), PreferencesError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| PreferencesError::Io(self.path.clone(), e))?;
        }

        let content = toml::to_string_pretty(&self.values).map_err(PreferencesError::Serialize)?;
        std::fs::write(&self.path, content).map_err(|e| PreferencesError::Io(self.path.clone(), e))
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), PreferencesError> {
        self.values.insert(key.to_string(), value);
        self.save()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Typed Preferences
// ═══════════════════════════════════════════════════════════════════════════

/// Global mute flag. Anything other than `"true"` reads as unmuted.
pub fn load_muted(store: &dyn PreferenceStore) -> bool {
    store.get(MUTED_KEY).is_some_and(|v| v == "true")
}

pub fn save_muted(store: &mut dyn PreferenceStore, muted: bool) -> Result<(), PreferencesError> {
    store.set(MUTED_KEY, muted.to_string())
}

/// Per-event sound toggles. Events without an entry are audible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoundToggles {
    toggles: HashMap<String, bool>,
}

impl SoundToggles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(store: &dyn PreferenceStore) -> Self {
        let Some(raw) = store.get(SOUND_TOGGLES_KEY) else {
            return Self::new();
        };

        match serde_json::from_str::<HashMap<String, bool>>(&raw) {
            Ok(toggles) => Self { toggles },
            Err(e) => {
                tracing::warn!(error = %e, "Corrupt sound toggles, using defaults");
                Self::new()
            }
        }
    }

    pub fn save(&self, store: &mut dyn PreferenceStore) -> Result<(), PreferencesError> {
        let raw = serde_json::to_string(&self.toggles).map_err(PreferencesError::Json)?;
        store.set(SOUND_TOGGLES_KEY, raw)
    }

    pub fn is_enabled(&self, event_id: &str) -> bool {
        self.toggles.get(event_id).copied().unwrap_or(true)
    }

    pub fn set(&mut self, event_id: &str, enabled: bool) {
        self.toggles.insert(event_id.to_string(), enabled);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Error Types
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub enum PreferencesError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for PreferencesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(path, e) => write!(f, "IO error at {}: {}", path.display(), e),
            Self::Parse(path, e) => write!(f, "Parse error in {}: {}", path.display(), e),
            Self::Serialize(e) => write!(f, "Serialization error: {}", e),
            Self::Json(e) => write!(f, "Sound toggle encoding error: {}", e),
        }
    }
}

impl std::error::Error for PreferencesError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_store_is_empty() {
        let store = MemoryStore::new();
        assert!(!load_muted(&store));
        assert!(SoundToggles::load(&store).is_enabled("mid-boss"));
    }

    #[test]
    fn muted_round_trips_as_string() {
        let mut store = MemoryStore::new();
        save_muted(&mut store, true).unwrap();
        assert_eq!(store.get(MUTED_KEY).as_deref(), Some("true"));
        assert!(load_muted(&store));
    }

    #[test]
    fn garbage_mute_value_reads_unmuted() {
        let mut store = MemoryStore::new();
        store.set(MUTED_KEY, "yes please".to_string()).unwrap();
        assert!(!load_muted(&store));
    }

    #[test]
    fn toggles_are_stored_as_flat_json_object() {
        let mut store = MemoryStore::new();
        let mut toggles = SoundToggles::new();
        toggles.set("powerups", false);
        toggles.save(&mut store).unwrap();

        assert_eq!(store.get(SOUND_TOGGLES_KEY).as_deref(), Some(r#"{"powerups":false}"#));
        let loaded = SoundToggles::load(&store);
        assert!(!loaded.is_enabled("powerups"));
        assert!(loaded.is_enabled("soul-urn"));
    }

    #[test]
    fn corrupt_toggles_fall_back_to_defaults() {
        let mut store = MemoryStore::new();
        store.set(SOUND_TOGGLES_KEY, "{not json".to_string()).unwrap();
        assert_eq!(SoundToggles::load(&store), SoundToggles::new());
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.toml");

        let mut store = FileStore::open(&path).unwrap();
        save_muted(&mut store, true).unwrap();
        let mut toggles = SoundToggles::new();
        toggles.set("mid-boss", false);
        toggles.save(&mut store).unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert!(load_muted(&reopened));
        assert!(!SoundToggles::load(&reopened).is_enabled("mid-boss"));
    }

    #[test]
    fn unreadable_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();

        assert!(matches!(FileStore::open(&path), Err(PreferencesError::Parse(..))));
        let store = FileStore::open_or_empty(&path);
        assert!(!load_muted(&store));
    }
}
