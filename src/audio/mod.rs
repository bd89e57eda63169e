//! Audio file handling: intermediate WAV I/O via hound and compressed
//! output via an external ffmpeg transcoder.

mod transcode;
pub mod wav;

pub use transcode::{AudioFormat, FfmpegTranscoder, Transcoder, check_ffmpeg_availability};
