//! Kokoro speech backend.

use std::path::{Path, PathBuf};

use anyhow::Result;
use sherpa_rs::OnnxConfig;
use sherpa_rs::tts::{CommonTtsConfig, KokoroTts, KokoroTtsConfig};
use tracing::debug;

use super::{SpeechBackend, SpeechSession};
use crate::audio::wav;
use crate::config::{AppConfig, Provider, VoiceDescriptor};
use crate::error::NarrationError;

/// Words per minute Kokoro produces at speed 1.0.
const NORMAL_RATE_WPM: f32 = 200.0;

/// Kokoro output sample rate.
const KOKORO_SAMPLE_RATE: u32 = 24000;

/// Convert a words-per-minute rate into Kokoro's speed multiplier.
pub fn rate_to_speed(rate_wpm: u32) -> Result<f32> {
    if rate_wpm == 0 {
        return Err(NarrationError::InvalidRate(rate_wpm).into());
    }
    Ok(rate_wpm as f32 / NORMAL_RATE_WPM)
}

/// Opens Kokoro engines from the model files under the configured model directory.
#[derive(Debug, Clone)]
pub struct KokoroBackend {
    tts_dir: PathBuf,    // kokoro-multi-lang-v1_0 directory
    model: PathBuf,      // model.onnx
    voices: PathBuf,     // voices.bin
    tokens: PathBuf,     // tokens.txt
    data_dir: PathBuf,   // espeak-ng-data
    dict_dir: PathBuf,   // jieba dict
    provider: Provider,  // ONNX execution provider
    num_threads: usize,  // Inference threads
    debug: bool,         // sherpa-onnx debug output
}

impl KokoroBackend {
    /// Create a backend from the application configuration.
    ///
    /// No engine is loaded here; every [`SpeechBackend::open`] call loads a fresh one.
    ///
    /// # Arguments
    /// * `config` - Application configuration (model paths, provider, threads)
    ///
    /// # Returns
    /// A new `KokoroBackend` instance.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            tts_dir: config.tts_dir(),
            model: config.tts_model_path(),
            voices: config.tts_voices_path(),
            tokens: config.tts_tokens_path(),
            data_dir: config.tts_data_dir(),
            dict_dir: config.tts_dict_dir(),
            provider: config.effective_provider(),
            num_threads: config.tts_threads,
            debug: config.verbose,
        }
    }
}

impl SpeechBackend for KokoroBackend {
    type Session = KokoroSession;

    /// Load a Kokoro engine for `voice` at `rate_wpm`.
    ///
    /// # Errors
    /// Returns an error if `rate_wpm` is zero.
    fn open(&self, voice: &VoiceDescriptor, rate_wpm: u32) -> Result<KokoroSession> {
        let speed = rate_to_speed(rate_wpm)?;
        debug!("Opening Kokoro engine: voice {} (speaker ID {}), speed {:.3}", voice.name, voice.id, speed);

        let path = |p: &Path| p.to_string_lossy().to_string();
        let tts_config = KokoroTtsConfig {
            model: path(&self.model),
            voices: path(&self.voices),
            tokens: path(&self.tokens),
            data_dir: path(&self.data_dir),
            dict_dir: path(&self.dict_dir),
            lexicon: voice.lexicon(&self.tts_dir),
            lang: voice.espeak_language().to_string(),
            length_scale: 1.0 / speed, // length_scale is inverse of speed
            onnx_config: OnnxConfig {
                provider: self.provider.as_sherpa_provider().to_string(),
                num_threads: self.num_threads.try_into().unwrap_or(2),
                debug: self.debug,
            },
            common_config: CommonTtsConfig { max_num_sentences: 1, ..Default::default() }, // Kokoro only supports 1
        };

        Ok(KokoroSession { tts: KokoroTts::new(tts_config), speaker_id: voice.id, speed })
    }
}

/// A loaded Kokoro engine. The native engine is freed when this is dropped.
pub struct KokoroSession {
    tts: KokoroTts,
    speaker_id: i32,
    speed: f32,
}

impl SpeechSession for KokoroSession {
    fn save_to_file(&mut self, text: &str, path: &Path) -> Result<()> {
        if text.trim().is_empty() {
            return wav::write_wav(path, &[], KOKORO_SAMPLE_RATE);
        }

        let audio = self.tts.create(text, self.speaker_id, self.speed).map_err(|e| anyhow::anyhow!("TTS generation failed: {}", e))?;
        debug!("🎵 Generated speech ({} samples @ {} Hz)", audio.samples.len(), audio.sample_rate);

        wav::write_wav(path, &audio.samples, audio.sample_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_to_speed() {
        assert!((rate_to_speed(200).unwrap() - 1.0).abs() < f32::EPSILON);
        assert!((rate_to_speed(165).unwrap() - 0.825).abs() < 1e-6);
        assert!((rate_to_speed(190).unwrap() - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_zero_rate_rejected() {
        let err = rate_to_speed(0).unwrap_err();
        assert!(matches!(err.downcast_ref::<NarrationError>(), Some(NarrationError::InvalidRate(0))));
    }
}
