pub mod audio;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod events;
pub mod log;
pub mod preferences;
pub mod session;
pub mod stage;

#[cfg(test)]
mod session_tests;

// Re-exports for convenience
pub use audio::{AudioError, CuePlayer, NullCuePlayer, SoundGateway, Tone, Waveform, tone_recipe};
pub use catalog::{CatalogError, EventCatalog, EventDefinition, EventKind, RespawnSchedule};
pub use clock::{MatchClock, format_elapsed, parse_match_time};
pub use config::{AppConfig, AppConfigExt, ConfigError};
pub use events::{EventEngine, EventState};
pub use log::{EventLog, MAX_LOG_ENTRIES};
pub use preferences::{FileStore, MemoryStore, PreferenceStore, PreferencesError, SoundToggles};
pub use session::MatchSession;
pub use stage::{MAP_STAGES, MapStage, current_stage};

pub use matchtimer_types::{Cue, EventPriority, EventStatus, LogEntry};
