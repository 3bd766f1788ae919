//! # Enharmonic Spelling
//!
//! Resolves MIDI pitches to notated staff keys. One accidental system (sharps
//! or flats) is chosen for the whole track by majority vote over the notes'
//! pitch classes, so a piece never mixes C# and Db bar to bar.
//!
//! Guitar is a transposing instrument: sounding pitch is one octave below the
//! written pitch, so the staff key is computed from `pitch + 12`.
//!
//! ## Related Modules
//! - `render` - attaches spelled keys and accidentals to output notes

use crate::track::ParsedNote;

/// Track-wide accidental policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccidentalSystem {
    #[default]
    Sharps,
    Flats,
}

/// Twelve note names per octave, indexed by pitch class, for each system.
const NAMES_SHARP: [&str; 12] = [
    "c", "c#", "d", "d#", "e", "f", "f#", "g", "g#", "a", "a#", "b",
];
const NAMES_FLAT: [&str; 12] = [
    "c", "db", "d", "eb", "e", "f", "gb", "g", "ab", "a", "bb", "b",
];

/// A pitch spelled for the staff: a base key like `"c/4"` plus an optional
/// accidental modifier (`"#"` or `"b"`), kept separate because the rendering
/// collaborator attaches accidentals as modifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct SpelledPitch {
    pub key: String,
    pub accidental: Option<String>,
}

/// Pick the accidental system for a whole track.
///
/// Pitch classes 1 and 6 (C#/Db, F#/Gb) vote for sharps; 3, 8 and 10
/// (Eb, Ab, Bb) vote for flats. Ties favor sharps.
pub fn prefer_system(notes: &[ParsedNote]) -> AccidentalSystem {
    let mut sharp_score = 0usize;
    let mut flat_score = 0usize;
    for n in notes {
        match n.pitch % 12 {
            1 | 6 => sharp_score += 1,
            3 | 8 | 10 => flat_score += 1,
            _ => {}
        }
    }
    if sharp_score >= flat_score {
        AccidentalSystem::Sharps
    } else {
        AccidentalSystem::Flats
    }
}

/// Spell a MIDI pitch under the given system.
///
/// The written pitch is one octave above the sounding pitch (transposing
/// instrument convention), and octave numbering follows MIDI (`C4 = 60`).
///
/// # Example
/// ```
/// use tabgen::spelling::{spell_pitch, AccidentalSystem};
///
/// let spelled = spell_pitch(61, AccidentalSystem::Sharps);
/// assert_eq!(spelled.key, "c/5"); // written an octave above sounding C#4
/// assert_eq!(spelled.accidental.as_deref(), Some("#"));
/// ```
pub fn spell_pitch(pitch: u8, system: AccidentalSystem) -> SpelledPitch {
    let names = match system {
        AccidentalSystem::Sharps => &NAMES_SHARP,
        AccidentalSystem::Flats => &NAMES_FLAT,
    };

    let written = pitch as i32 + 12;
    let octave = written / 12 - 1;
    let full_name = names[(written % 12) as usize];

    let base = &full_name[..1];
    let accidental = if full_name.len() > 1 {
        Some(full_name[1..].to_string())
    } else {
        None
    };

    SpelledPitch {
        key: format!("{}/{}", base, octave),
        accidental,
    }
}
