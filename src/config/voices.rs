//! Voice catalog for Kokoro TTS.
//!
//! Voices are addressed by their position in the catalog, which follows the
//! engine's speaker id order. The table below mirrors Kokoro v1.0 (53 voices).

use std::path::Path;

use anyhow::Context;

use crate::error::NarrationError;

/// Static metadata for a Kokoro voice.
#[derive(Debug, Clone, Copy)]
pub struct Voice {
    pub speaker_id: i32,
    pub espeak_code: &'static str,
    pub language: &'static str,
}

/// A voice as handed to the synthesis backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceDescriptor {
    pub id: i32,
    pub name: String,
    pub language: String,
}

impl VoiceDescriptor {
    /// Lexicon files for this voice, comma separated as sherpa-onnx expects.
    /// Only English and Chinese voices ship lexicons; others return an empty string.
    pub fn lexicon(&self, tts_dir: &Path) -> String {
        let lexicon = |file: &str| tts_dir.join(file).to_string_lossy().to_string();
        match self.prefix() {
            "af" | "am" => lexicon("lexicon-us-en.txt"),
            "bf" | "bm" => lexicon("lexicon-gb-en.txt"),
            // Chinese with English fallback
            "zf" | "zm" => format!("{},{}", lexicon("lexicon-us-en.txt"), lexicon("lexicon-zh.txt")),
            "" => lexicon("lexicon-us-en.txt"),
            _ => String::new(),
        }
    }

    /// espeak-ng language for voices without a lexicon.
    /// Reference: <https://github.com/k2-fsa/sherpa-onnx/blob/master/sherpa-onnx/csrc/offline-tts-kokoro-model-config.cc>
    pub fn espeak_language(&self) -> &'static str {
        match self.prefix() {
            "ef" | "em" => "es",
            "ff" => "fr",
            "hf" | "hm" => "hi",
            "if" | "im" => "it",
            "jf" | "jm" => "ja",
            "pf" | "pm" => "pt-br",
            _ => "",
        }
    }

    fn prefix(&self) -> &str {
        self.name.get(..2).unwrap_or("")
    }
}

/// Source of the voices available on this host.
pub trait VoiceCatalog {
    /// All voices, in the order voice indices refer to.
    fn list(&self) -> Vec<VoiceDescriptor>;
}

/// The voices bundled with the Kokoro multi-lang model.
#[derive(Debug, Default, Clone, Copy)]
pub struct KokoroCatalog;

impl VoiceCatalog for KokoroCatalog {
    fn list(&self) -> Vec<VoiceDescriptor> {
        let mut voices: Vec<_> = VOICES.iter().collect();
        voices.sort_by_key(|(_, v)| v.speaker_id);
        voices
            .into_iter()
            .map(|(name, v)| VoiceDescriptor { id: v.speaker_id, name: name.to_string(), language: v.language.to_string() })
            .collect()
    }
}

/// All voices as a compile-time constant slice (sorted by name for binary search).
const VOICES: &[(&str, Voice)] = &[
    ("af_alloy", Voice { speaker_id: 0, espeak_code: "en-us", language: "American English" }),
    ("af_aoede", Voice { speaker_id: 1, espeak_code: "en-us", language: "American English" }),
    ("af_bella", Voice { speaker_id: 2, espeak_code: "en-us", language: "American English" }),
    ("af_heart", Voice { speaker_id: 3, espeak_code: "en-us", language: "American English" }),
    ("af_jessica", Voice { speaker_id: 4, espeak_code: "en-us", language: "American English" }),
    ("af_kore", Voice { speaker_id: 5, espeak_code: "en-us", language: "American English" }),
    ("af_nicole", Voice { speaker_id: 6, espeak_code: "en-us", language: "American English" }),
    ("af_nova", Voice { speaker_id: 7, espeak_code: "en-us", language: "American English" }),
    ("af_river", Voice { speaker_id: 8, espeak_code: "en-us", language: "American English" }),
    ("af_sarah", Voice { speaker_id: 9, espeak_code: "en-us", language: "American English" }),
    ("af_sky", Voice { speaker_id: 10, espeak_code: "en-us", language: "American English" }),
    ("am_adam", Voice { speaker_id: 11, espeak_code: "en-us", language: "American English" }),
    ("am_echo", Voice { speaker_id: 12, espeak_code: "en-us", language: "American English" }),
    ("am_eric", Voice { speaker_id: 13, espeak_code: "en-us", language: "American English" }),
    ("am_fenrir", Voice { speaker_id: 14, espeak_code: "en-us", language: "American English" }),
    ("am_liam", Voice { speaker_id: 15, espeak_code: "en-us", language: "American English" }),
    ("am_michael", Voice { speaker_id: 16, espeak_code: "en-us", language: "American English" }),
    ("am_onyx", Voice { speaker_id: 17, espeak_code: "en-us", language: "American English" }),
    ("am_puck", Voice { speaker_id: 18, espeak_code: "en-us", language: "American English" }),
    ("am_santa", Voice { speaker_id: 19, espeak_code: "en-us", language: "American English" }),
    ("bf_alice", Voice { speaker_id: 20, espeak_code: "en-gb", language: "British English" }),
    ("bf_emma", Voice { speaker_id: 21, espeak_code: "en-gb", language: "British English" }),
    ("bf_isabella", Voice { speaker_id: 22, espeak_code: "en-gb", language: "British English" }),
    ("bf_lily", Voice { speaker_id: 23, espeak_code: "en-gb", language: "British English" }),
    ("bm_daniel", Voice { speaker_id: 24, espeak_code: "en-gb", language: "British English" }),
    ("bm_fable", Voice { speaker_id: 25, espeak_code: "en-gb", language: "British English" }),
    ("bm_george", Voice { speaker_id: 26, espeak_code: "en-gb", language: "British English" }),
    ("bm_lewis", Voice { speaker_id: 27, espeak_code: "en-gb", language: "British English" }),
    ("ef_dora", Voice { speaker_id: 28, espeak_code: "es", language: "Spanish" }),
    ("em_alex", Voice { speaker_id: 29, espeak_code: "es", language: "Spanish" }),
    ("ff_siwis", Voice { speaker_id: 30, espeak_code: "fr-fr", language: "French" }),
    ("hf_alpha", Voice { speaker_id: 31, espeak_code: "hi", language: "Hindi" }),
    ("hf_beta", Voice { speaker_id: 32, espeak_code: "hi", language: "Hindi" }),
    ("hm_omega", Voice { speaker_id: 33, espeak_code: "hi", language: "Hindi" }),
    ("hm_psi", Voice { speaker_id: 34, espeak_code: "hi", language: "Hindi" }),
    ("if_sara", Voice { speaker_id: 35, espeak_code: "it", language: "Italian" }),
    ("im_nicola", Voice { speaker_id: 36, espeak_code: "it", language: "Italian" }),
    ("jf_alpha", Voice { speaker_id: 37, espeak_code: "ja", language: "Japanese" }),
    ("jf_gongitsune", Voice { speaker_id: 38, espeak_code: "ja", language: "Japanese" }),
    ("jf_nezumi", Voice { speaker_id: 39, espeak_code: "ja", language: "Japanese" }),
    ("jf_tebukuro", Voice { speaker_id: 40, espeak_code: "ja", language: "Japanese" }),
    ("jm_kumo", Voice { speaker_id: 41, espeak_code: "ja", language: "Japanese" }),
    ("pf_dora", Voice { speaker_id: 42, espeak_code: "pt-br", language: "Portuguese BR" }),
    ("pm_alex", Voice { speaker_id: 43, espeak_code: "pt-br", language: "Portuguese BR" }),
    ("pm_santa", Voice { speaker_id: 44, espeak_code: "pt-br", language: "Portuguese BR" }),
    ("zf_xiaobei", Voice { speaker_id: 45, espeak_code: "cmn", language: "Mandarin Chinese" }),
    ("zf_xiaoni", Voice { speaker_id: 46, espeak_code: "cmn", language: "Mandarin Chinese" }),
    ("zf_xiaoxiao", Voice { speaker_id: 47, espeak_code: "cmn", language: "Mandarin Chinese" }),
    ("zf_xiaoyi", Voice { speaker_id: 48, espeak_code: "cmn", language: "Mandarin Chinese" }),
    ("zm_yunjian", Voice { speaker_id: 49, espeak_code: "cmn", language: "Mandarin Chinese" }),
    ("zm_yunxi", Voice { speaker_id: 50, espeak_code: "cmn", language: "Mandarin Chinese" }),
    ("zm_yunxia", Voice { speaker_id: 51, espeak_code: "cmn", language: "Mandarin Chinese" }),
    ("zm_yunyang", Voice { speaker_id: 52, espeak_code: "cmn", language: "Mandarin Chinese" }),
];

/// Bytes per voice in voices.bin: a 510 x 256 f32 style matrix.
const STYLE_BYTES_PER_VOICE: u64 = 510 * 256 * 4;

/// Check that `voices_path` holds exactly the voices in the catalog table.
///
/// Voice indices map to speaker ids through the table, so a voices.bin from a
/// different Kokoro release would silently shift every voice.
///
/// # Errors
/// Returns an error if the file cannot be read or its size does not match.
pub fn check_voices_file(voices_path: &Path) -> anyhow::Result<()> {
    let actual = std::fs::metadata(voices_path).with_context(|| format!("Failed to read {}", voices_path.display()))?.len();
    let expected = VOICES.len() as u64 * STYLE_BYTES_PER_VOICE;
    if actual != expected {
        return Err(NarrationError::VoiceFileMismatch { path: voices_path.to_path_buf(), actual, expected, voices: VOICES.len() }.into());
    }
    Ok(())
}

/// Get voice metadata by name using binary search.
pub fn get_voice(name: &str) -> Option<&'static Voice> {
    VOICES.binary_search_by_key(&name, |(n, _)| n).ok().map(|idx| &VOICES[idx].1)
}

/// Print all available voices with the index used to select them.
pub fn print_voices() {
    println!("═══════════════════════════════════════════════════════════════════");
    println!("  Kokoro TTS v1.0 - {} Voices", VOICES.len());
    println!("═══════════════════════════════════════════════════════════════════");
    println!();
    println!("{:<6} {:<15} {:<4} LANGUAGE", "INDEX", "VOICE", "ID");
    println!("{}", "─".repeat(50));

    for (index, voice) in KokoroCatalog.list().iter().enumerate() {
        println!("{:<6} {:<15} {:<4} {}", index, voice.name, voice.id, voice.language);
    }

    println!();
    println!("The built-in scripts use index 0 (rob) and index 1 (jim).");
}

/// Print detailed information about a specific voice.
pub fn print_voice_info(name: &str) -> anyhow::Result<()> {
    let voice = get_voice(name).ok_or_else(|| anyhow::anyhow!("Voice '{}' not found. Run with --list-voices to see available voices", name))?;
    let index = KokoroCatalog.list().iter().position(|v| v.name == name).unwrap_or_default();

    println!();
    println!("Voice: {}", name);
    println!("{}", "─".repeat(40));
    println!("Catalog index: {}", index);
    println!("Speaker ID:    {}", voice.speaker_id);
    println!("Language:      {}", voice.language);
    println!("espeak code:   {}", voice.espeak_code);
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn descriptor(name: &str) -> VoiceDescriptor {
        VoiceDescriptor { id: 0, name: name.to_string(), language: String::new() }
    }

    #[test]
    fn test_catalog_ordered_by_speaker_id() {
        let voices = KokoroCatalog.list();
        assert_eq!(voices.len(), 53);
        assert!(voices.windows(2).all(|w| w[0].id < w[1].id));
        assert_eq!(voices[0].name, "af_alloy");
        assert_eq!(voices[1].name, "af_aoede");
    }

    #[test]
    fn test_table_sorted_for_binary_search() {
        assert!(VOICES.windows(2).all(|w| w[0].0 < w[1].0));
        assert_eq!(get_voice("bf_emma").map(|v| v.speaker_id), Some(21));
        assert!(get_voice("xx_nobody").is_none());
    }

    #[test]
    fn test_voices_file_size_checked() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("voices.bin");

        let file = std::fs::File::create(&path).unwrap();
        file.set_len(53 * STYLE_BYTES_PER_VOICE).unwrap();
        assert!(check_voices_file(&path).is_ok());

        // An older 11-voice release
        file.set_len(11 * STYLE_BYTES_PER_VOICE).unwrap();
        let err = check_voices_file(&path).unwrap_err();
        assert!(matches!(err.downcast_ref::<NarrationError>(), Some(NarrationError::VoiceFileMismatch { voices: 53, .. })));
    }

    #[test]
    fn test_lexicon_by_prefix() {
        let dir = PathBuf::from("/m");
        assert_eq!(descriptor("af_bella").lexicon(&dir), "/m/lexicon-us-en.txt");
        assert_eq!(descriptor("bm_lewis").lexicon(&dir), "/m/lexicon-gb-en.txt");
        assert_eq!(descriptor("zf_xiaoyi").lexicon(&dir), "/m/lexicon-us-en.txt,/m/lexicon-zh.txt");
        assert_eq!(descriptor("ef_dora").lexicon(&dir), "");
        assert_eq!(descriptor("ef_dora").espeak_language(), "es");
        assert_eq!(descriptor("af_bella").espeak_language(), "");
    }
}
