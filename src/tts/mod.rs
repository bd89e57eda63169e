//! Text-to-speech module using sherpa-rs.
//!
//! Speech engines are opened per line through [`SpeechBackend`] and released
//! when the returned session is dropped.

mod synthesizer;

use std::path::Path;

use anyhow::Result;

use crate::config::VoiceDescriptor;

pub use synthesizer::KokoroBackend;

/// An open, configured speech engine.
pub trait SpeechSession {
    /// Render `text` to a WAV file at `path`, blocking until done.
    fn save_to_file(&mut self, text: &str, path: &Path) -> Result<()>;
}

/// Factory for speech engine instances.
pub trait SpeechBackend {
    type Session: SpeechSession;

    /// Acquire an engine configured for `voice` speaking at `rate_wpm` words per minute.
    fn open(&self, voice: &VoiceDescriptor, rate_wpm: u32) -> Result<Self::Session>;
}
