//! macroquad-backed [`ToneSink`]: one pre-rendered clip per layer.

use macroquad::audio::{PlaySoundParams, Sound, load_sound_from_bytes, play_sound, stop_sound};
use tracing::{info, warn};

use super::audio::{AudioError, SAMPLE_RATE, ToneSink, ToneSpec, encode_wav, synthesize};

pub struct ToneBank {
    sounds: Vec<Sound>,
    playing: Option<usize>,
}

impl ToneBank {
    /// Render and upload a tone for each of `layers` layers
    pub async fn load(layers: usize) -> Result<Self, AudioError> {
        let mut sounds = Vec::with_capacity(layers);
        for layer in 0..layers {
            let samples = synthesize(&ToneSpec::for_layer(layer), SAMPLE_RATE);
            let wav = encode_wav(&samples, SAMPLE_RATE);
            let sound = load_sound_from_bytes(&wav)
                .await
                .map_err(|err| AudioError::Load {
                    layer,
                    reason: err.to_string(),
                })?;
            sounds.push(sound);
        }
        info!(layers, "tone bank loaded");

        Ok(Self {
            sounds,
            playing: None,
        })
    }
}

impl ToneSink for ToneBank {
    fn play(&mut self, layer: usize) {
        self.stop();
        match self.sounds.get(layer) {
            Some(sound) => {
                play_sound(
                    sound,
                    PlaySoundParams {
                        looped: false,
                        volume: 1.0,
                    },
                );
                self.playing = Some(layer);
            }
            None => warn!(error = %AudioError::MissingTone(layer), "birth tone skipped"),
        }
    }

    fn stop(&mut self) {
        if let Some(sound) = self.playing.take().and_then(|layer| self.sounds.get(layer)) {
            stop_sound(sound);
        }
    }

    fn close(&mut self) {
        self.stop();
        self.sounds.clear();
        info!("tone bank closed");
    }
}
