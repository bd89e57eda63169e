//! Re-encoding of intermediate waveforms into compressed formats using ffmpeg.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::wav;
use crate::error::NarrationError;

/// Compressed container written for each narrated line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// Ogg Vorbis
    #[default]
    Ogg,
    /// Ogg Opus, tuned for speech
    Opus,
    /// MPEG layer 3
    Mp3,
    /// Lossless FLAC
    Flac,
}

impl AudioFormat {
    /// File extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Ogg => "ogg",
            AudioFormat::Opus => "opus",
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Flac => "flac",
        }
    }

    /// ffmpeg muxer and encoder arguments.
    fn ffmpeg_args(&self) -> &'static [&'static str] {
        match self {
            AudioFormat::Ogg => &["-f", "ogg", "-c:a", "libvorbis", "-q:a", "4"],
            AudioFormat::Opus => &["-f", "opus", "-c:a", "libopus", "-b:a", "24k"],
            AudioFormat::Mp3 => &["-f", "mp3", "-c:a", "libmp3lame", "-q:a", "2"],
            AudioFormat::Flac => &["-f", "flac", "-c:a", "flac"],
        }
    }
}

/// Converts an intermediate waveform into the final compressed file.
pub trait Transcoder {
    /// Re-encode `wav_path` into `dest`, overwriting `dest` if present.
    fn transcode(&self, wav_path: &Path, dest: &Path) -> Result<()>;
}

/// Transcoder backed by the ffmpeg executable.
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    program: String,
    format: AudioFormat,
}

impl FfmpegTranscoder {
    /// Create a transcoder.
    ///
    /// # Arguments
    /// * `program` - ffmpeg executable name or path
    /// * `format` - Output format written by [`Transcoder::transcode`]
    pub fn new(program: impl Into<String>, format: AudioFormat) -> Self {
        Self { program: program.into(), format }
    }
}

impl Transcoder for FfmpegTranscoder {
    /// Run ffmpeg on `wav_path`, writing `dest` in the configured format.
    ///
    /// # Errors
    /// Returns an error if `wav_path` is not a readable WAV file, if ffmpeg
    /// cannot be started, or if it exits with a failure status.
    fn transcode(&self, wav_path: &Path, dest: &Path) -> Result<()> {
        // Missing or malformed waveforms fail here rather than inside ffmpeg
        let info = wav::probe_wav(wav_path)?;
        debug!("Transcoding {} ({:.2}s @ {} Hz)", wav_path.display(), info.duration_secs(), info.sample_rate);

        let output = Command::new(&self.program)
            .args(["-hide_banner", "-loglevel", "error", "-y", "-i"])
            .arg(wav_path)
            .args(self.format.ffmpeg_args())
            .arg(dest)
            .output()
            .map_err(|source| NarrationError::TranscoderUnavailable { program: self.program.clone(), source })?;

        if !output.status.success() {
            return Err(NarrationError::Transcode {
                path: dest.to_path_buf(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Check that the ffmpeg executable can be started.
pub fn check_ffmpeg_availability(program: &str) -> Result<()> {
    Command::new(program)
        .arg("-version")
        .output()
        .map_err(|source| NarrationError::TranscoderUnavailable { program: program.to_string(), source })
        .with_context(|| format!("Checking transcoder '{}'", program))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extensions() {
        assert_eq!(AudioFormat::default().extension(), "ogg");
        assert_eq!(AudioFormat::Opus.extension(), "opus");
        assert_eq!(AudioFormat::Flac.extension(), "flac");
    }

    #[test]
    fn test_missing_program_reported_as_unavailable() {
        let err = check_ffmpeg_availability("definitely-not-ffmpeg-binary").unwrap_err();
        assert!(matches!(err.downcast_ref::<NarrationError>(), Some(NarrationError::TranscoderUnavailable { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_unavailable_keeps_io_cause() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let program = dir.path().join("ffmpeg");
        std::fs::write(&program, b"#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&program, std::fs::Permissions::from_mode(0o644)).unwrap();

        let err = check_ffmpeg_availability(program.to_str().unwrap()).unwrap_err();
        match err.downcast_ref::<NarrationError>() {
            Some(NarrationError::TranscoderUnavailable { source, .. }) => {
                assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_wav_rejected_before_ffmpeg() {
        let dir = tempfile::tempdir().unwrap();
        let wav_path = dir.path().join("broken.wav");
        std::fs::write(&wav_path, b"not a wave file").unwrap();

        let transcoder = FfmpegTranscoder::new("definitely-not-ffmpeg-binary", AudioFormat::Ogg);
        let err = transcoder.transcode(&wav_path, &dir.path().join("out.ogg")).unwrap_err();
        assert!(err.downcast_ref::<NarrationError>().is_none());
        assert!(!dir.path().join("out.ogg").exists());
    }

    #[test]
    fn test_ffmpeg_writes_ogg() {
        if check_ffmpeg_availability("ffmpeg").is_err() {
            println!("FFmpeg not available - skipping test");
            return;
        }

        let dir = tempfile::tempdir().unwrap();
        let wav_path = dir.path().join("tone.wav");
        let samples: Vec<f32> = (0..24000).map(|i| (i as f32 * 0.05).sin() * 0.3).collect();
        wav::write_wav(&wav_path, &samples, 24000).unwrap();

        let dest = dir.path().join("tone.ogg");
        let transcoder = FfmpegTranscoder::new("ffmpeg", AudioFormat::Ogg);
        if let Err(e) = transcoder.transcode(&wav_path, &dest) {
            // Some ffmpeg builds ship without libvorbis
            println!("FFmpeg could not encode Vorbis - skipping test: {e}");
            return;
        }

        let bytes = std::fs::read(&dest).unwrap();
        assert_eq!(&bytes[..4], b"OggS");

        // Second run overwrites rather than failing
        transcoder.transcode(&wav_path, &dest).unwrap();
        assert!(dest.exists());
    }
}
