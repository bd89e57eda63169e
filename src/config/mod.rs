//! Configuration module for the narrator.
//!
//! Provides CLI argument parsing and the voice catalog.

#[allow(clippy::module_inception)]
mod config;
mod voices;

pub use config::{AppConfig, Provider};
pub use voices::{KokoroCatalog, VoiceCatalog, VoiceDescriptor};
