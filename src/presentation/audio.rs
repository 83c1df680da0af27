//! Birth tones.
//!
//! Each layer has a fixed pitch (220 Hz + 110 Hz per layer) shaped by a
//! short linear envelope: up to 0.1 over 10 ms, back to silence over
//! 100 ms. Tones are rendered to 16-bit mono PCM WAV so any backend that
//! can play a clip can play them. Playback is monophonic: a new tone
//! always cuts the previous one.

use std::f32::consts::TAU;

use thiserror::Error;

use crate::domain::Cell;

pub const SAMPLE_RATE: u32 = 44_100;
pub const BASE_FREQUENCY: f32 = 220.0;
pub const LAYER_FREQUENCY_STEP: f32 = 110.0;
pub const PEAK_GAIN: f32 = 0.1;
pub const ATTACK_SECONDS: f32 = 0.01;
pub const RELEASE_SECONDS: f32 = 0.1;

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("failed to load tone for layer {layer}: {reason}")]
    Load { layer: usize, reason: String },
    #[error("tone for layer {0} was never loaded")]
    MissingTone(usize),
}

/// Pitch and envelope of one tone
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToneSpec {
    pub frequency: f32,
    pub peak_gain: f32,
    pub attack: f32,
    pub release: f32,
}

impl ToneSpec {
    /// Tone for a birth on `layer`
    pub fn for_layer(layer: usize) -> Self {
        Self {
            frequency: BASE_FREQUENCY + LAYER_FREQUENCY_STEP * layer as f32,
            peak_gain: PEAK_GAIN,
            attack: ATTACK_SECONDS,
            release: RELEASE_SECONDS,
        }
    }

    pub fn duration(&self) -> f32 {
        self.attack + self.release
    }

    /// Linear attack then linear release, 0 outside the tone
    pub fn envelope(&self, t: f32) -> f32 {
        if t < 0.0 || t >= self.duration() {
            0.0
        } else if t < self.attack {
            self.peak_gain * t / self.attack
        } else {
            self.peak_gain * (1.0 - (t - self.attack) / self.release)
        }
    }
}

/// Render a tone to mono samples in [-1, 1]
pub fn synthesize(tone: &ToneSpec, sample_rate: u32) -> Vec<f32> {
    let sample_count = (tone.duration() * sample_rate as f32).round() as usize;
    let step = tone.frequency / sample_rate as f32;
    let mut phase = 0.0f32;

    (0..sample_count)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            let sample = (phase * TAU).sin() * tone.envelope(t);
            phase = (phase + step).fract();
            sample
        })
        .collect()
}

/// Encode mono samples as a 16-bit PCM WAV file in memory
pub fn encode_wav(samples: &[f32], sample_rate: u32) -> Vec<u8> {
    const CHANNELS: u16 = 1;
    const BITS_PER_SAMPLE: u16 = 16;
    let bytes_per_sample = u32::from(BITS_PER_SAMPLE / 8);
    let data_size = samples.len() as u32 * bytes_per_sample;
    let fmt_size = 16u32;
    let file_size = 4 + (8 + fmt_size) + (8 + data_size);

    let mut bytes = Vec::with_capacity(8 + file_size as usize);

    // RIFF header
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&file_size.to_le_bytes());
    bytes.extend_from_slice(b"WAVE");

    // fmt chunk, format 1 = integer PCM
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&fmt_size.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&CHANNELS.to_le_bytes());
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    let byte_rate = sample_rate * u32::from(CHANNELS) * bytes_per_sample;
    bytes.extend_from_slice(&byte_rate.to_le_bytes());
    let block_align = CHANNELS * BITS_PER_SAMPLE / 8;
    bytes.extend_from_slice(&block_align.to_le_bytes());
    bytes.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    // data chunk
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_size.to_le_bytes());
    for &sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * 32767.0) as i16;
        bytes.extend_from_slice(&value.to_le_bytes());
    }

    bytes
}

/// Something that can sound the tone of a layer.
/// Implementations hold at most one tone at a time.
pub trait ToneSink {
    /// Start the tone for `layer`, cutting whatever was playing
    fn play(&mut self, layer: usize);

    /// Silence the current tone
    fn stop(&mut self);

    /// Release backend resources; the sink stays silent afterwards
    fn close(&mut self) {
        self.stop();
    }
}

/// Sink used when no audio backend is available
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentSink;

impl ToneSink for SilentSink {
    fn play(&mut self, _layer: usize) {}

    fn stop(&mut self) {}
}

/// The single shared voice all birth tones go through
pub struct Voice {
    sink: Box<dyn ToneSink>,
    enabled: bool,
    last_layer: Option<usize>,
}

impl Voice {
    pub fn new(sink: Box<dyn ToneSink>, enabled: bool) -> Self {
        Self {
            sink,
            enabled,
            last_layer: None,
        }
    }

    pub fn silent() -> Self {
        Self::new(Box::new(SilentSink), false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabling also cuts the tone that is currently sounding
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled && !enabled {
            self.sink.stop();
        }
        self.enabled = enabled;
    }

    /// Layer of the most recent tone, if any
    pub fn last_layer(&self) -> Option<usize> {
        self.last_layer
    }

    /// Sound the births of one generation.
    ///
    /// All births share a single retuned voice, so only the last one in
    /// the batch is heard. Returns the layer that was played.
    pub fn on_births(&mut self, births: &[Cell]) -> Option<usize> {
        if !self.enabled {
            return None;
        }
        let layer = births.last()?.layer;
        self.sink.play(layer);
        self.last_layer = Some(layer);
        Some(layer)
    }

    pub fn stop(&mut self) {
        self.sink.stop();
    }

    /// Shut the backend down for good
    pub fn close(&mut self) {
        self.sink.close();
        self.enabled = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default, Clone)]
    struct Recording(Rc<RefCell<Vec<String>>>);

    impl ToneSink for Recording {
        fn play(&mut self, layer: usize) {
            self.0.borrow_mut().push(format!("play {layer}"));
        }

        fn stop(&mut self) {
            self.0.borrow_mut().push("stop".to_owned());
        }
    }

    #[test]
    fn test_frequency_per_layer() {
        assert_eq!(ToneSpec::for_layer(0).frequency, 220.0);
        assert_eq!(ToneSpec::for_layer(3).frequency, 550.0);
    }

    #[test]
    fn test_envelope_shape() {
        let tone = ToneSpec::for_layer(0);
        assert_eq!(tone.envelope(0.0), 0.0);
        assert!((tone.envelope(0.005) - 0.05).abs() < 1e-6);
        assert!((tone.envelope(0.01) - PEAK_GAIN).abs() < 1e-6);
        assert!((tone.envelope(0.06) - 0.05).abs() < 1e-6);
        assert_eq!(tone.envelope(0.12), 0.0);
        assert_eq!(tone.envelope(-1.0), 0.0);
    }

    #[test]
    fn test_synthesize_length_and_peak() {
        let tone = ToneSpec::for_layer(2);
        let samples = synthesize(&tone, SAMPLE_RATE);
        assert_eq!(samples.len(), (tone.duration() * SAMPLE_RATE as f32).round() as usize);
        let peak = samples.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(peak <= PEAK_GAIN + 1e-6);
        assert!(peak > PEAK_GAIN * 0.5);
    }

    #[test]
    fn test_wav_header() {
        let bytes = encode_wav(&[0.0, 1.0, -1.0], 8000);
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(bytes.len(), 44 + 6);
        assert_eq!(u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]) as usize, bytes.len() - 8);
        assert_eq!(i16::from_le_bytes([bytes[46], bytes[47]]), 32767);
    }

    #[test]
    fn test_voice_plays_only_last_birth() {
        let log = Recording::default();
        let mut voice = Voice::new(Box::new(log.clone()), true);

        let births = [Cell::new(0, 0, 1), Cell::new(1, 1, 4), Cell::new(2, 2, 2)];
        assert_eq!(voice.on_births(&births), Some(2));
        assert_eq!(voice.on_births(&[]), None);
        assert_eq!(*log.0.borrow(), vec!["play 2"]);
        assert_eq!(voice.last_layer(), Some(2));
    }

    #[test]
    fn test_disabled_voice_is_quiet() {
        let log = Recording::default();
        let mut voice = Voice::new(Box::new(log.clone()), true);
        voice.set_enabled(false);
        assert_eq!(voice.on_births(&[Cell::new(0, 0, 0)]), None);
        assert_eq!(*log.0.borrow(), vec!["stop"]);
    }

    #[test]
    fn test_close_silences_for_good() {
        let log = Recording::default();
        let mut voice = Voice::new(Box::new(log.clone()), true);
        voice.close();
        assert!(!voice.is_enabled());
        assert_eq!(voice.on_births(&[Cell::new(0, 0, 0)]), None);
    }
}
