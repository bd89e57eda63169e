//! Application configuration and CLI argument parsing.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::voices;
use crate::audio::AudioFormat;

/// Hardware acceleration provider for ONNX models.
/// Auto-detected based on platform if not specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// CPU inference (default fallback, always available)
    #[default]
    Cpu,
    /// NVIDIA CUDA acceleration (Linux only, requires CUDA toolkit)
    Cuda,
    /// Apple CoreML acceleration (macOS only, uses Neural Engine)
    #[value(name = "coreml")]
    CoreMl,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_sherpa_provider())
    }
}

impl Provider {
    /// Convert to sherpa-rs provider string.
    pub fn as_sherpa_provider(&self) -> &'static str {
        match self {
            Provider::Cpu => "cpu",
            Provider::Cuda => "cuda",
            Provider::CoreMl => "coreml",
        }
    }
}

/// Narrator configuration.
#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(name = "gibberish-narrator")]
#[command(author, version, about = "Narrate the built-in line scripts to compressed audio files", long_about = None)]
pub struct AppConfig {
    /// List all available TTS voices (with their catalog index) and exit
    #[arg(long)]
    pub list_voices: bool,

    /// Show detailed information about a specific voice and exit
    #[arg(long)]
    pub voice_info: Option<String>,

    /// Directory containing the Kokoro TTS model files
    #[arg(long, short = 'd', env = "MODEL_DIR", default_value_os_t = default_model_dir())]
    pub model_dir: PathBuf,

    /// Directory the narrated files are written to
    #[arg(long, short = 'o', default_value = "gibberish_ogg")]
    pub output_dir: PathBuf,

    /// Compressed output format
    #[arg(long, value_enum, default_value = "ogg")]
    pub format: AudioFormat,

    /// Number of lines synthesized between cooldown pauses
    #[arg(long, default_value = "5")]
    pub batch_size: usize,

    /// Pause after each batch, in milliseconds
    #[arg(long, default_value = "1000")]
    pub cooldown_ms: u64,

    /// ffmpeg executable used for transcoding
    #[arg(long, env = "FFMPEG", default_value = "ffmpeg")]
    pub ffmpeg: String,

    /// Hardware acceleration provider (auto-detected if not specified)
    #[arg(long, value_enum)]
    pub provider: Option<Provider>,

    /// TTS threads (0 = auto-detect based on CPU cores)
    #[arg(long, default_value = "0")]
    pub tts_threads: usize,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl AppConfig {
    /// Parse configuration from command line arguments.
    pub fn from_args() -> Self {
        let mut config = Self::parse();

        if config.list_voices {
            voices::print_voices();
            std::process::exit(0);
        }

        if let Some(ref voice_name) = config.voice_info {
            match voices::print_voice_info(voice_name) {
                Ok(_) => std::process::exit(0),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }

        config.normalize_thread_counts();
        config
    }

    /// Auto-detect the TTS thread count.
    ///
    /// With CUDA a single thread is used since the GPU handles parallelism;
    /// on CPU, cores/3 leaves headroom for ffmpeg running between lines.
    fn normalize_thread_counts(&mut self) {
        if self.tts_threads != 0 {
            return;
        }

        let cpu_cores = num_cpus::get();
        self.tts_threads = if self.effective_provider() == Provider::Cuda { 1 } else { (cpu_cores / 3).max(1) };

        if self.verbose {
            info!("CPU cores: {}, Provider: {}, TTS threads: {}", cpu_cores, self.effective_provider(), self.tts_threads);
        }
    }

    /// Get the effective TTS provider.
    pub fn effective_provider(&self) -> Provider {
        self.provider.unwrap_or_else(detect_provider)
    }

    /// Cooldown taken after each batch.
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    /// Directory holding the Kokoro multi-lang v1.0 model.
    pub fn tts_dir(&self) -> PathBuf {
        self.model_dir.join("tts").join("kokoro-multi-lang-v1_0")
    }

    /// Get the path to the Kokoro TTS model.
    pub fn tts_model_path(&self) -> PathBuf {
        self.tts_dir().join("model.onnx")
    }

    /// Get the path to the Kokoro TTS voices.bin file.
    pub fn tts_voices_path(&self) -> PathBuf {
        self.tts_dir().join("voices.bin")
    }

    /// Get the path to the TTS tokens file.
    pub fn tts_tokens_path(&self) -> PathBuf {
        self.tts_dir().join("tokens.txt")
    }

    /// Get the path to the TTS data directory.
    pub fn tts_data_dir(&self) -> PathBuf {
        self.tts_dir().join("espeak-ng-data")
    }

    /// Get the path to the TTS dict directory (for Chinese segmentation).
    pub fn tts_dict_dir(&self) -> PathBuf {
        self.tts_dir().join("dict")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.model_dir.exists() {
            anyhow::bail!("Model directory does not exist: {}", self.model_dir.display());
        }

        let required_files = [self.tts_model_path(), self.tts_voices_path(), self.tts_tokens_path(), self.tts_data_dir()];
        for path in &required_files {
            if !path.exists() {
                anyhow::bail!("Required model file not found: {}", path.display());
            }
        }
        voices::check_voices_file(&self.tts_voices_path())?;

        self.validate_batching()?;
        crate::audio::check_ffmpeg_availability(&self.ffmpeg)?;

        Ok(())
    }

    /// Validate the batching parameters alone (no filesystem access).
    fn validate_batching(&self) -> Result<()> {
        if self.batch_size == 0 {
            anyhow::bail!("Batch size must be at least 1");
        }
        Ok(())
    }

    /// Log the current configuration.
    pub fn log_config(&self) {
        info!("Configuration:");
        info!("  Model directory: {}", self.model_dir.display());
        info!("  Output directory: {}", self.output_dir.display());
        info!("  Output format: {}", self.format.extension());
        info!("  Batch size: {}", self.batch_size);
        info!("  Cooldown: {}ms", self.cooldown_ms);
        info!("  Transcoder: {}", self.ffmpeg);
        info!("  TTS provider: {}", self.effective_provider());
        info!("  TTS threads: {}", self.tts_threads);
    }
}

/// Get the default model directory (~/.voice-assistant/models).
fn default_model_dir() -> PathBuf {
    if let Some(home_dir) = dirs::home_dir() {
        home_dir.join(".voice-assistant").join("models")
    } else {
        PathBuf::from("models")
    }
}

/// Auto-detect the best hardware acceleration provider.
fn detect_provider() -> Provider {
    #[cfg(target_os = "macos")]
    {
        Provider::CoreMl
    }

    #[cfg(target_os = "linux")]
    {
        if has_nvidia_gpu() { Provider::Cuda } else { Provider::Cpu }
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux")))]
    {
        Provider::Cpu
    }
}

/// Check if an NVIDIA GPU is available (Linux only).
#[cfg(target_os = "linux")]
fn has_nvidia_gpu() -> bool {
    use std::path::Path;

    let nvidia_paths = [
        "/dev/nvidia0",
        "/dev/nvidiactl",
        "/dev/nvidia-uvm",
        // Jetson devices
        "/dev/nvhost-ctrl",
        "/dev/nvhost-ctrl-gpu",
        "/etc/nv_tegra_release",
    ];

    nvidia_paths.iter().any(|path| Path::new(path).exists())
}
