//! The built-in line scripts and the voice profiles they are read with.

/// How a script is voiced and how its files are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceProfile {
    pub voice_index: usize, // Position in the voice catalog
    pub rate_wpm: u32,      // Speech rate, words per minute
    pub prefix: &'static str,
}

/// A named, ordered list of lines. Line order decides output numbering.
#[derive(Debug, Clone, Copy)]
pub struct LineScript {
    pub lines: &'static [&'static str],
    pub profile: VoiceProfile,
}

pub const ROB_LINES: &[&str] = &[
    "Zambra doovan morka bleet",
    "Klimpa grovan zekul trest",
    "Murga blint tok zarden",
    "Flarn zibbo jonti presk",
    "Vrol snafta kelbrin dorp",
    "Nerbin zartook grelm",
    "Foopla trang dozern keek",
    "Yabba storn glooba fest",
    "Chorta bleeb monska rint",
    "Dazzle grunty pef wamb",
    "Veklor strump jarnel teep",
    "Brosh glemor vanta fip",
    "Cloofa stroon yarble fen",
    "Wooka flebb snint groon",
    "Plarn zogtroff merst glib",
    "Zindle moorvak petch drob",
    "Krinta zuvorn glash meem",
    "Narp kelvin treb sarnak",
    "Dibber swoont flern jask",
    "Joova meck troont blen",
];

pub const JIM_LINES: &[&str] = &[
    "Woofta dreem blarn skizz",
    "Jokka fleem twarn gooza",
    "Snorpit klarn zipdoo hest",
    "Wibber jolp trek gazz",
    "Fribbit gleep snoggle brank",
    "Yoopla wozzip tarm leeb",
    "Klikka drint zoomple vorb",
    "Bleemer flob gurntak jish",
    "Mezzar krang wibble froot",
    "Drabble kemp zontek whee",
    "Yarpin troose flonk rebb",
    "Skivver tharm jook narn",
    "Trizzle mootya plon draff",
    "Whizbit narm gleeby fesh",
    "Snarp clickle jarm hoog",
    "Gomper slint reevo twik",
    "Mizzle kooft rang dabber",
    "Sporkle veen zibber howt",
    "Troomber bazz knoop dern",
    "Kribble snab jooft wak",
];

/// Rob: first voice, slower.
pub const ROB: LineScript = LineScript { lines: ROB_LINES, profile: VoiceProfile { voice_index: 0, rate_wpm: 165, prefix: "rob" } };

/// Jim: second voice, brisker.
pub const JIM: LineScript = LineScript { lines: JIM_LINES, profile: VoiceProfile { voice_index: 1, rate_wpm: 190, prefix: "jim" } };

/// Scripts in the order they are narrated.
pub const SCRIPTS: &[LineScript] = &[ROB, JIM];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripts_have_twenty_lines() {
        assert_eq!(SCRIPTS.len(), 2);
        for script in SCRIPTS {
            assert_eq!(script.lines.len(), 20, "{}", script.profile.prefix);
            assert!(script.lines.iter().all(|l| !l.trim().is_empty()));
        }
    }

    #[test]
    fn test_prefixes_distinct() {
        assert_ne!(ROB.profile.prefix, JIM.profile.prefix);
        assert_ne!(ROB.profile.voice_index, JIM.profile.voice_index);
    }
}
