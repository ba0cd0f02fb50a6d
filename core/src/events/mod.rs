//! Event engine
//!
//! This module provides:
//! - **State**: One mutable record per catalog definition
//! - **Engine**: Recomputes every state from elapsed match time
//! - **Deferred transitions**: Grace periods tagged with the match generation
//!
//! # Flow
//!
//! ```text
//!   MatchClock ──elapsed──▶ EventEngine::recompute ──cues──▶ SoundGateway
//!                                 │
//!   player "cleared" ─────────────┤
//!                                 └──lines──▶ EventLog
//! ```

mod deferred;
mod engine;
mod state;


pub use engine::{EventEngine, RECURRING_GRACE_SECS, SINGLE_SPAWN_GRACE_SECS, SPAWN_WINDOW_SECS};
pub use state::EventState;
