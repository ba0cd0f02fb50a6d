//! Tone recipes for each cue
//!
//! Every cue is one or two short oscillator tones. Each tone starts at its
//! `volume` and decays exponentially to near silence over its duration.

use std::time::Duration;

use matchtimer_types::Cue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Sawtooth,
}

/// A single synthesized tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration: Duration,
    pub waveform: Waveform,
    /// Peak gain (0.0 - 1.0)
    pub volume: f32,
    /// Offset from the start of the cue
    pub delay: Duration,
}

const fn tone(frequency_hz: f32, duration_ms: u64, waveform: Waveform, volume: f32, delay_ms: u64) -> Tone {
    Tone {
        frequency_hz,
        duration: Duration::from_millis(duration_ms),
        waveform,
        volume,
        delay: Duration::from_millis(delay_ms),
    }
}

const SPAWN: [Tone; 2] = [
    tone(600.0, 150, Waveform::Sine, 0.3, 0),
    tone(900.0, 150, Waveform::Sine, 0.3, 100),
];

const MAJOR_EVENT: [Tone; 2] = [
    tone(600.0, 200, Waveform::Sine, 0.35, 0),
    tone(900.0, 200, Waveform::Sine, 0.35, 150),
];

const CRITICAL_EVENT: [Tone; 2] = [
    tone(200.0, 400, Waveform::Sawtooth, 0.2, 0),
    tone(800.0, 250, Waveform::Sine, 0.35, 200),
];

const WARNING_10: [Tone; 1] = [tone(1000.0, 50, Waveform::Sine, 0.15, 0)];

const WARNING_30: [Tone; 1] = [tone(800.0, 30, Waveform::Sine, 0.1, 0)];

/// Tones making up a cue, in onset order
pub fn tone_recipe(cue: Cue) -> &'static [Tone] {
    match cue {
        Cue::Spawn => &SPAWN,
        Cue::MajorEvent => &MAJOR_EVENT,
        Cue::CriticalEvent => &CRITICAL_EVENT,
        Cue::Warning10 => &WARNING_10,
        Cue::Warning30 => &WARNING_30,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_cue_has_tones_in_onset_order() {
        for cue in Cue::ALL {
            let tones = tone_recipe(cue);
            assert!(!tones.is_empty());
            assert!(tones.windows(2).all(|w| w[0].delay <= w[1].delay));
            assert!(tones.iter().all(|t| t.volume > 0.0 && t.volume <= 1.0));
        }
    }

    #[test]
    fn critical_event_opens_with_sawtooth() {
        assert_eq!(tone_recipe(Cue::CriticalEvent)[0].waveform, Waveform::Sawtooth);
    }
}
