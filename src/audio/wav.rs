//! Intermediate waveform files.

use std::path::Path;

use anyhow::{Context, Result};

/// Header information of a WAV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavInfo {
    pub sample_rate: u32,
    pub channels: u16,
    pub frames: u32, // Samples per channel
}

impl WavInfo {
    /// Duration in seconds.
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames as f32 / self.sample_rate as f32
    }
}

/// Write mono f32 samples as a 32-bit float WAV file, replacing any existing file.
///
/// # Arguments
/// * `path` - Destination file
/// * `samples` - Mono samples in `[-1.0, 1.0]`
/// * `sample_rate` - Sample rate of `samples` in Hz
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn write_wav(path: &Path, samples: &[f32], sample_rate: u32) -> Result<()> {
    let spec = hound::WavSpec { channels: 1, sample_rate, bits_per_sample: 32, sample_format: hound::SampleFormat::Float };

    let mut writer = hound::WavWriter::create(path, spec).with_context(|| format!("Failed to create WAV file {}", path.display()))?;
    for &sample in samples {
        writer.write_sample(sample).context("Failed to write WAV sample")?;
    }
    writer.finalize().context("Failed to finalize WAV")?;
    Ok(())
}

/// Read the header of a WAV file without decoding its samples.
///
/// # Arguments
/// * `path` - WAV file to inspect
///
/// # Returns
/// Sample rate, channel count and length of the file.
///
/// # Errors
/// Returns an error if the file is missing or not a valid WAV file.
pub fn probe_wav(path: &Path) -> Result<WavInfo> {
    let reader = hound::WavReader::open(path).with_context(|| format!("Failed to open WAV file {}", path.display()))?;
    let spec = reader.spec();
    Ok(WavInfo { sample_rate: spec.sample_rate, channels: spec.channels, frames: reader.duration() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_probe_float_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("line.wav");
        let samples: Vec<f32> = (0..2400).map(|i| (i as f32 / 2400.0) - 0.5).collect();

        write_wav(&path, &samples, 24000).unwrap();
        let info = probe_wav(&path).unwrap();

        assert_eq!(info, WavInfo { sample_rate: 24000, channels: 1, frames: 2400 });
        assert!((info.duration_secs() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_probe_counts_frames_not_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pcm.wav");
        let spec = hound::WavSpec { channels: 2, sample_rate: 16000, bits_per_sample: 16, sample_format: hound::SampleFormat::Int };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for s in [i16::MIN, 0, 16384, 0] {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();

        let info = probe_wav(&path).unwrap();
        assert_eq!(info.channels, 2);
        assert_eq!(info.frames, 2);
    }

    #[test]
    fn test_missing_or_junk_wav_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(probe_wav(&dir.path().join("absent.wav")).is_err());

        let junk = dir.path().join("junk.wav");
        std::fs::write(&junk, b"not a wave file").unwrap();
        assert!(probe_wav(&junk).is_err());
    }

    #[test]
    fn test_empty_wav_has_zero_duration() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.wav");
        write_wav(&path, &[], 24000).unwrap();
        assert_eq!(probe_wav(&path).unwrap().duration_secs(), 0.0);
    }
}
