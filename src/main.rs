//! Gibberish Narrator - batch text-to-speech for the built-in line scripts.
//!
//! Each line is spoken by a local Kokoro model (via sherpa-rs) into a
//! temporary WAV file, which ffmpeg then re-encodes into the output format.

mod audio;
mod config;
mod error;
mod narrator;
mod scripts;
mod tts;

use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::LocalTime;

use audio::FfmpegTranscoder;
use config::{AppConfig, KokoroCatalog};
use narrator::BatchNarrator;
use tts::KokoroBackend;

fn main() -> Result<()> {
    let config = AppConfig::from_args();

    // Respect RUST_LOG env var, fallback to verbose flag, default to info
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| if config.verbose { EnvFilter::try_new("debug") } else { EnvFilter::try_new("info") })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(LocalTime::new(time::macros::format_description!("[hour]:[minute]:[second]")))
        .init();

    info!("🎤 Gibberish Narrator v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = config.validate() {
        error!("❌ Configuration error: {:#}", e);
        error!("Download the Kokoro multi-lang v1.0 model into --model-dir and make sure ffmpeg is installed.");
        std::process::exit(1);
    }
    config.log_config();

    let narrator = BatchNarrator::new(
        KokoroCatalog,
        KokoroBackend::new(&config),
        FfmpegTranscoder::new(config.ffmpeg.clone(), config.format),
        &config.output_dir,
        config.format.extension(),
    )
    .with_batch_size(config.batch_size)
    .with_cooldown(config.cooldown());

    let mut total = 0;
    for script in scripts::SCRIPTS {
        let report = narrator.narrate(script)?;
        info!("'{}': {} files in {} batches ({} cooldowns)", script.profile.prefix, report.files.len(), report.batches, report.cooldowns);
        total += report.files.len();
    }

    info!("✅ Done: {} files written to {}", total, config.output_dir.display());
    Ok(())
}
