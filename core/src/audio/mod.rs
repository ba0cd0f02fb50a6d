//! Sound gateway
//!
//! The engine never talks to an audio backend directly. It hands cues to a
//! [`SoundGateway`], which applies the global mute flag and swallows any
//! playback failure so match logic is never affected by audio problems.

mod gateway;
mod tones;

pub use gateway::{AudioError, CuePlayer, NullCuePlayer, SoundGateway};
pub use tones::{Tone, Waveform, tone_recipe};
