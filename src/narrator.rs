//! Batch narration: synthesize each line, transcode it, pace the batches.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::audio::Transcoder;
use crate::config::{VoiceCatalog, VoiceDescriptor};
use crate::error::NarrationError;
use crate::scripts::LineScript;
use crate::tts::{SpeechBackend, SpeechSession};

/// Outcome of narrating one script.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub files: Vec<PathBuf>, // Output files, in line order
    pub batches: usize,      // Batches processed
    pub cooldowns: usize,    // Cooldown pauses taken
}

/// Narrates line scripts into numbered compressed audio files.
pub struct BatchNarrator<C, B, T> {
    catalog: C,
    backend: B,
    transcoder: T,
    output_dir: PathBuf,
    extension: String,
    batch_size: usize,
    cooldown: Duration,
}

impl<C, B, T> BatchNarrator<C, B, T>
where
    C: VoiceCatalog,
    B: SpeechBackend,
    T: Transcoder,
{
    /// Create a narrator with batches of 5 and a one second cooldown.
    ///
    /// # Arguments
    /// * `catalog` - Voices that voice indices are resolved against
    /// * `backend` - Opens a speech engine for every line
    /// * `transcoder` - Converts each intermediate WAV into the output format
    /// * `output_dir` - Directory output files are written to
    /// * `extension` - Extension of output files, without the dot
    pub fn new(catalog: C, backend: B, transcoder: T, output_dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            catalog,
            backend,
            transcoder,
            output_dir: output_dir.into(),
            extension: extension.into(),
            batch_size: 5,
            cooldown: Duration::from_secs(1),
        }
    }

    /// Set the number of lines between cooldowns.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the pause taken after each batch.
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Narrate a built-in script with its own voice profile.
    pub fn narrate(&self, script: &LineScript) -> Result<BatchReport> {
        let profile = script.profile;
        self.generate_batch(script.lines, profile.voice_index, profile.rate_wpm, profile.prefix)
    }

    /// Narrate `lines` with the catalog voice at `voice_index`.
    ///
    /// Files are named `<prefix>_<NN>.<ext>` with a 1-based index running over
    /// the whole sequence. A cooldown follows every batch, the last one included.
    ///
    /// # Errors
    /// Fails on the first line that cannot be synthesized or transcoded;
    /// files already written stay on disk.
    pub fn generate_batch(&self, lines: &[&str], voice_index: usize, rate_wpm: u32, prefix: &str) -> Result<BatchReport> {
        anyhow::ensure!(self.batch_size > 0, "Batch size must be at least 1");
        if rate_wpm == 0 {
            return Err(NarrationError::InvalidRate(rate_wpm).into());
        }

        let voices = self.catalog.list();
        let voice = voices
            .get(voice_index)
            .ok_or(NarrationError::VoiceIndexOutOfRange { index: voice_index, available: voices.len() })?;
        info!("🎙️  Narrating '{}' ({} lines) with voice {} at {} wpm", prefix, lines.len(), voice.name, rate_wpm);

        fs::create_dir_all(&self.output_dir).with_context(|| format!("Failed to create output directory {}", self.output_dir.display()))?;

        let mut report = BatchReport::default();
        for (batch_no, batch) in lines.chunks(self.batch_size).enumerate() {
            for (offset, line) in batch.iter().enumerate() {
                let index = batch_no * self.batch_size + offset + 1;
                let dest = self.output_path(prefix, index);
                self.synthesize_and_transcode(line, voice, rate_wpm, &dest)?;
                info!("💾 {}", dest.display());
                report.files.push(dest);
            }

            report.batches += 1;
            info!("✅ Batch {} done.", batch_no + 1);

            std::thread::sleep(self.cooldown);
            report.cooldowns += 1;
        }

        Ok(report)
    }

    /// Render one line and convert it to `dest`.
    ///
    /// The intermediate WAV sits next to `dest` and is removed before returning,
    /// on failure as well as on success.
    ///
    /// # Arguments
    /// * `text` - Line to speak
    /// * `voice` - Resolved catalog voice
    /// * `rate_wpm` - Speech rate in words per minute
    /// * `dest` - Output file, overwritten if present
    ///
    /// # Errors
    /// Returns an error if the engine cannot be opened, rendering or
    /// transcoding fails, or the intermediate WAV cannot be removed.
    pub fn synthesize_and_transcode(&self, text: &str, voice: &VoiceDescriptor, rate_wpm: u32, dest: &Path) -> Result<()> {
        let wav_path = dest.with_extension("wav");
        debug!("Synthesizing \"{}\" -> {}", text, wav_path.display());

        let outcome = self.render(text, voice, rate_wpm, &wav_path).and_then(|()| self.transcoder.transcode(&wav_path, dest));

        if let Err(e) = fs::remove_file(&wav_path)
            && outcome.is_ok()
        {
            return Err(e).with_context(|| format!("Failed to remove {}", wav_path.display()));
        }

        outcome
    }

    /// The engine lives only for the duration of this call.
    fn render(&self, text: &str, voice: &VoiceDescriptor, rate_wpm: u32, wav_path: &Path) -> Result<()> {
        let mut session = self.backend.open(voice, rate_wpm)?;
        session.save_to_file(text, wav_path)
    }

    fn output_path(&self, prefix: &str, index: usize) -> PathBuf {
        self.output_dir.join(format!("{}_{:02}.{}", prefix, index, self.extension))
    }
}
