//! Domain errors raised while narrating a script.

use std::path::PathBuf;

use thiserror::Error;

/// Failures the narrator can name. Everything else travels as `anyhow::Error`.
#[derive(Debug, Error)]
pub enum NarrationError {
    /// The requested voice index is not in the catalog.
    #[error("voice index {index} out of range ({available} voices available)")]
    VoiceIndexOutOfRange { index: usize, available: usize },

    /// Speech rate must be a positive number of words per minute.
    #[error("invalid speech rate: {0} wpm")]
    InvalidRate(u32),

    /// The transcoder exited with a failure status.
    #[error("transcoding {} failed: {stderr}", path.display())]
    Transcode { path: PathBuf, stderr: String },

    /// The transcoder executable could not be started.
    #[error("could not start transcoder '{program}'. Install ffmpeg or pass --ffmpeg <path>")]
    TranscoderUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The installed voices.bin does not hold the voices the catalog lists.
    #[error("{} is {actual} bytes, expected {expected} for {voices} voices", path.display())]
    VoiceFileMismatch { path: PathBuf, actual: u64, expected: u64, voices: usize },
}
