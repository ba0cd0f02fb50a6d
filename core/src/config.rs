//! Application configuration
//!
//! Re-exports the shared config types and adds confy persistence plus
//! path resolution for the preference and catalog files.

use std::path::PathBuf;

use thiserror::Error;

pub use matchtimer_types::{AppConfig, AudioSettings};

const APP_NAME: &str = "matchtimer";
const CONFIG_NAME: &str = "config";

/// Bounds for the host redraw cadence
pub const MIN_TICK_HZ: u32 = 1;
pub const MAX_TICK_HZ: u32 = 120;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to store configuration")]
    Store(#[source] confy::ConfyError),

    #[error("failed to resolve configuration path")]
    Path(#[source] confy::ConfyError),
}

// ─────────────────────────────────────────────────────────────────────────────
// AppConfig Extensions
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for AppConfig persistence
pub trait AppConfigExt: Sized {
    /// Load from disk, falling back to defaults if missing or unreadable
    fn load() -> Self;
    fn save(&self) -> Result<(), ConfigError>;
    fn config_file() -> Result<PathBuf, ConfigError>;

    /// Ticks per second, clamped to a usable range
    fn tick_hz(&self) -> u32;
    fn preferences_file(&self) -> PathBuf;
    fn catalog_file(&self) -> Option<PathBuf>;
}

impl AppConfigExt for AppConfig {
    fn load() -> Self {
        confy::load(APP_NAME, CONFIG_NAME).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load config, using defaults");
            Self::default()
        })
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Store)
    }

    fn config_file() -> Result<PathBuf, ConfigError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME).map_err(ConfigError::Path)
    }

    fn tick_hz(&self) -> u32 {
        self.tick_hz.clamp(MIN_TICK_HZ, MAX_TICK_HZ)
    }

    fn preferences_file(&self) -> PathBuf {
        match &self.preferences_path {
            Some(path) => PathBuf::from(path),
            None => default_preferences_file(),
        }
    }

    fn catalog_file(&self) -> Option<PathBuf> {
        self.catalog_path.as_ref().map(PathBuf::from)
    }
}

/// `<config dir>/matchtimer/preferences.toml`, or the working directory
/// when the platform has no config dir
pub fn default_preferences_file() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(APP_NAME))
        .unwrap_or_default()
        .join("preferences.toml")
}
