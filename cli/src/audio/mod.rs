//! Cue playback for the terminal host
//!
//! The session hands cues to a [`ChannelCuePlayer`], which forwards them to
//! the [`AudioService`] task so the tick loop never blocks on audio.

mod service;

pub use service::{AudioService, CUE_QUEUE_CAPACITY, ChannelCuePlayer, cue_channel};
