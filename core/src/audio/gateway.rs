//! Cue playback boundary

use matchtimer_types::Cue;
use thiserror::Error;

/// Errors a cue player may report. The gateway logs and drops them.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio backend unavailable: {0}")]
    Unavailable(String),

    #[error("audio queue is full")]
    QueueFull,

    #[error("audio service has shut down")]
    ChannelClosed,
}

/// Something that can make a named cue audible
pub trait CuePlayer: Send {
    fn play(&mut self, cue: Cue) -> Result<(), AudioError>;
}

/// Player that discards every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCuePlayer;

impl CuePlayer for NullCuePlayer {
    fn play(&mut self, _cue: Cue) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Global mute plus a cue player
pub struct SoundGateway {
    player: Box<dyn CuePlayer>,
    muted: bool,
}

impl SoundGateway {
    pub fn new(player: Box<dyn CuePlayer>, muted: bool) -> Self {
        Self { player, muted }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Play a cue unless muted. Failures never reach the caller.
    pub fn dispatch(&mut self, cue: Cue) {
        if self.muted {
            return;
        }
        if let Err(e) = self.player.play(cue) {
            tracing::debug!(cue = cue.label(), error = %e, "Cue playback failed");
        }
    }

    pub fn dispatch_all(&mut self, cues: impl IntoIterator<Item = Cue>) {
        for cue in cues {
            self.dispatch(cue);
        }
    }
}

impl std::fmt::Debug for SoundGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundGateway")
            .field("muted", &self.muted)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct Recorder(Arc<Mutex<Vec<Cue>>>);

    impl CuePlayer for Recorder {
        fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
            self.0.lock().unwrap().push(cue);
            Ok(())
        }
    }

    struct Broken;

    impl CuePlayer for Broken {
        fn play(&mut self, _cue: Cue) -> Result<(), AudioError> {
            Err(AudioError::Unavailable("no device".to_string()))
        }
    }

    #[test]
    fn muted_gateway_drops_cues() {
        let played = Arc::new(Mutex::new(Vec::new()));
        let mut gateway = SoundGateway::new(Box::new(Recorder(Arc::clone(&played))), true);

        gateway.dispatch(Cue::Spawn);
        assert!(played.lock().unwrap().is_empty());

        gateway.set_muted(false);
        gateway.dispatch_all([Cue::Warning30, Cue::Warning10]);
        assert_eq!(*played.lock().unwrap(), vec![Cue::Warning30, Cue::Warning10]);
    }

    #[test]
    fn player_errors_are_swallowed() {
        let mut gateway = SoundGateway::new(Box::new(Broken), false);
        gateway.dispatch(Cue::CriticalEvent);
        assert!(!gateway.is_muted());
    }
}
