//! Audio playback service
//!
//! Runs in a background task, receiving cues via channel. With the `audio`
//! feature each cue's tone recipe is synthesized through rodio on a
//! short-lived thread; without it the terminal bell rings instead.

use std::sync::Arc;

use matchtimer_core::audio::{AudioError, CuePlayer};
use matchtimer_types::{AudioSettings, Cue};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::RwLock;

/// Cues waiting for playback before new ones are dropped
pub const CUE_QUEUE_CAPACITY: usize = 32;

/// Create the cue channel shared by the session and the service
pub fn cue_channel() -> (ChannelCuePlayer, mpsc::Receiver<Cue>) {
    let (tx, rx) = mpsc::channel(CUE_QUEUE_CAPACITY);
    (ChannelCuePlayer { tx }, rx)
}

/// Session-side half of the cue channel
#[derive(Debug, Clone)]
pub struct ChannelCuePlayer {
    tx: mpsc::Sender<Cue>,
}

impl CuePlayer for ChannelCuePlayer {
    fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
        self.tx.try_send(cue).map_err(|e| match e {
            TrySendError::Full(_) => AudioError::QueueFull,
            TrySendError::Closed(_) => AudioError::ChannelClosed,
        })
    }
}

/// Audio service that turns cues into sound
pub struct AudioService {
    cue_rx: mpsc::Receiver<Cue>,

    /// Shared audio settings (can be updated at runtime)
    settings: Arc<RwLock<AudioSettings>>,
}

impl AudioService {
    pub fn new(cue_rx: mpsc::Receiver<Cue>, settings: Arc<RwLock<AudioSettings>>) -> Self {
        Self { cue_rx, settings }
    }

    /// Run until every sender is dropped
    pub async fn run(mut self) {
        while let Some(cue) = self.cue_rx.recv().await {
            let (enabled, volume) = {
                let settings = self.settings.read().await;
                (settings.enabled, settings.volume)
            };

            if !enabled {
                continue;
            }

            tracing::debug!(cue = cue.label(), volume, "Playing cue");
            play_cue(cue, volume);
        }
        tracing::debug!("Audio service stopped");
    }
}

#[cfg(feature = "audio")]
fn play_cue(cue: Cue, volume: u8) {
    std::thread::spawn(move || {
        if let Err(e) = synth::play_blocking(cue, volume) {
            tracing::debug!(cue = cue.label(), error = %e, "Cue playback failed");
        }
    });
}

#[cfg(not(feature = "audio"))]
fn play_cue(_cue: Cue, volume: u8) {
    use std::io::Write;

    if volume == 0 {
        return;
    }
    let mut stdout = std::io::stdout();
    let _ = stdout.write_all(b"\x07");
    let _ = stdout.flush();
}

#[cfg(feature = "audio")]
mod synth {
    use std::time::Duration;

    use matchtimer_core::audio::{AudioError, Tone, Waveform, tone_recipe};
    use matchtimer_types::Cue;
    use rodio::{OutputStream, Sink, Source};

    const SAMPLE_RATE: u32 = 44_100;

    /// Absolute gain every tone decays to by its end
    const END_GAIN: f32 = 0.01;

    /// Mix the cue's tones and block until playback ends
    pub(super) fn play_blocking(cue: Cue, volume: u8) -> Result<(), AudioError> {
        let (_stream, handle) =
            OutputStream::try_default().map_err(|e| AudioError::Unavailable(e.to_string()))?;
        let sink = Sink::try_new(&handle).map_err(|e| AudioError::Unavailable(e.to_string()))?;
        sink.set_volume(f32::from(volume) / 100.0);

        let mut tones = tone_recipe(cue).iter();
        let Some(first) = tones.next() else {
            return Ok(());
        };

        let mut mixed: Box<dyn Source<Item = f32> + Send> = Box::new(Oscillator::new(*first));
        for tone in tones {
            mixed = Box::new(mixed.mix(Oscillator::new(*tone)));
        }

        sink.append(mixed);
        sink.sleep_until_end();
        Ok(())
    }

    /// One decaying tone, preceded by `delay` of silence
    pub(super) struct Oscillator {
        tone: Tone,
        sample: u64,
        delay_samples: u64,
        total_samples: u64,
    }

    impl Oscillator {
        pub(super) fn new(tone: Tone) -> Self {
            let delay_samples = samples_in(tone.delay);
            Self {
                tone,
                sample: 0,
                delay_samples,
                total_samples: delay_samples + samples_in(tone.duration),
            }
        }

        /// Exponential ramp from `volume` down to `END_GAIN`
        fn amplitude(&self, t: f32) -> f32 {
            let duration = self.tone.duration.as_secs_f32().max(f32::EPSILON);
            let peak = self.tone.volume.max(END_GAIN);
            peak * (END_GAIN / peak).powf(t / duration)
        }
    }

    impl Iterator for Oscillator {
        type Item = f32;

        fn next(&mut self) -> Option<f32> {
            if self.sample >= self.total_samples {
                return None;
            }
            let index = self.sample;
            self.sample += 1;

            if index < self.delay_samples {
                return Some(0.0);
            }

            let t = (index - self.delay_samples) as f32 / SAMPLE_RATE as f32;
            let phase = (t * self.tone.frequency_hz).fract();
            let wave = match self.tone.waveform {
                Waveform::Sine => (phase * std::f32::consts::TAU).sin(),
                Waveform::Sawtooth => 2.0 * phase - 1.0,
            };
            Some(wave * self.amplitude(t))
        }
    }

    impl Source for Oscillator {
        fn current_frame_len(&self) -> Option<usize> {
            None
        }

        fn channels(&self) -> u16 {
            1
        }

        fn sample_rate(&self) -> u32 {
            SAMPLE_RATE
        }

        fn total_duration(&self) -> Option<Duration> {
            Some(Duration::from_secs_f64(
                self.total_samples as f64 / f64::from(SAMPLE_RATE),
            ))
        }
    }

    fn samples_in(duration: Duration) -> u64 {
        (duration.as_secs_f64() * f64::from(SAMPLE_RATE)).round() as u64
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn oscillator_length_includes_delay() {
            let tone = tone_recipe(Cue::Spawn)[1];
            let samples = Oscillator::new(tone).count() as u64;
            assert_eq!(samples, samples_in(tone.delay) + samples_in(tone.duration));
        }

        #[test]
        fn tone_ramps_to_absolute_end_gain() {
            for cue in Cue::ALL {
                for tone in tone_recipe(cue) {
                    let osc = Oscillator::new(*tone);
                    let end = osc.amplitude(tone.duration.as_secs_f32());
                    assert!((end - END_GAIN).abs() < 1e-4, "{cue:?} ends at {end}");
                    assert!((osc.amplitude(0.0) - tone.volume).abs() < 1e-6);
                }
            }
        }

        #[test]
        fn oscillator_stays_within_tone_volume() {
            for cue in Cue::ALL {
                for tone in tone_recipe(cue) {
                    assert!(Oscillator::new(*tone).all(|s| s.abs() <= tone.volume + 1e-6));
                }
            }
        }
    }
}
