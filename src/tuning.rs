//! # Guitar Tunings
//!
//! A [`Tuning`] is an ordered list of open-string MIDI pitches, index 0 being
//! the highest-pitched string (string 1 on a chart). Standard instruments have
//! exactly six strings; the fretboard search itself is generic over the string
//! count, so validation happens here at construction time, never inside the
//! pipeline.
//!
//! Four presets ship with the crate (`standard`, `drop-d`, `dadgad`, `open-g`).
//! Custom tunings can be supplied as a small YAML document:
//!
//! ```yaml
//! name: Open D
//! notes: [62, 57, 54, 50, 45, 38]
//! ```
//!
//! ## Related Modules
//! - `error` - construction failures surface as `TabError`
//! - `fretboard` - consumes the open-string pitches during state generation

use crate::error::TabError;
use serde::Deserialize;

/// Open strings on a standard instrument.
pub const STRING_COUNT: usize = 6;

/// Built-in presets: (id, display name, open-string pitches high-first).
const PRESETS: &[(&str, &str, [u8; STRING_COUNT])] = &[
    ("standard", "Standard E", [64, 59, 55, 50, 45, 40]), // E4 B3 G3 D3 A2 E2
    ("drop-d", "Drop D", [64, 59, 55, 50, 45, 38]),       // E4 B3 G3 D3 A2 D2
    ("dadgad", "DADGAD", [62, 57, 55, 50, 45, 38]),       // D4 A3 G3 D3 A2 D2
    ("open-g", "Open G", [62, 59, 55, 50, 47, 38]),       // D4 B3 G3 D3 G2 D2
];

/// Raw tuning definition for YAML deserialization
#[derive(Deserialize, Debug)]
struct RawTuning {
    name: String,
    notes: Vec<u8>,
}

/// A validated guitar tuning: open-string MIDI pitches, highest string first.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuning {
    name: String,
    open_pitches: Vec<u8>,
}

impl Tuning {
    /// Build a tuning from open-string pitches (highest string first).
    ///
    /// # Errors
    /// Returns [`TabError::InvalidTuning`] unless exactly [`STRING_COUNT`]
    /// pitches are given.
    ///
    /// # Example
    /// ```
    /// use tabgen::Tuning;
    ///
    /// let t = Tuning::new("Standard E", vec![64, 59, 55, 50, 45, 40])?;
    /// assert_eq!(t.open_pitches()[0], 64); // string 1 = E4
    /// # Ok::<(), tabgen::TabError>(())
    /// ```
    pub fn new(name: impl Into<String>, open_pitches: Vec<u8>) -> Result<Self, TabError> {
        if open_pitches.len() != STRING_COUNT {
            return Err(TabError::InvalidTuning {
                expected: STRING_COUNT,
                actual: open_pitches.len(),
            });
        }
        Ok(Self {
            name: name.into(),
            open_pitches,
        })
    }

    /// Look up a built-in preset by id (`"standard"`, `"drop-d"`, ...).
    ///
    /// # Errors
    /// Returns [`TabError::UnknownTuning`] for ids not in the preset table.
    pub fn from_preset(id: &str) -> Result<Self, TabError> {
        PRESETS
            .iter()
            .find(|(preset_id, _, _)| *preset_id == id)
            .map(|(_, name, pitches)| Self {
                name: (*name).to_string(),
                open_pitches: pitches.to_vec(),
            })
            .ok_or_else(|| TabError::UnknownTuning(id.to_string()))
    }

    /// Parse and validate a custom tuning from a YAML definition.
    ///
    /// # Errors
    /// Returns [`TabError::TuningFile`] if the YAML is malformed, or
    /// [`TabError::InvalidTuning`] if the note list has the wrong length.
    pub fn from_yaml(source: &str) -> Result<Self, TabError> {
        let raw: RawTuning =
            serde_yaml::from_str(source).map_err(|e| TabError::TuningFile(e.to_string()))?;
        Self::new(raw.name, raw.notes)
    }

    /// The standard E tuning. Infallible preset lookup for the common case.
    pub fn standard() -> Self {
        Self {
            name: PRESETS[0].1.to_string(),
            open_pitches: PRESETS[0].2.to_vec(),
        }
    }

    /// Ids of all built-in presets, in table order.
    pub fn preset_ids() -> impl Iterator<Item = &'static str> {
        PRESETS.iter().map(|(id, _, _)| *id)
    }

    /// Display name (e.g., "Standard E").
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Open-string MIDI pitches, highest string first.
    pub fn open_pitches(&self) -> &[u8] {
        &self.open_pitches
    }

    /// Number of strings.
    pub fn string_count(&self) -> usize {
        self.open_pitches.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_preset_pitches() {
        let t = Tuning::from_preset("standard").unwrap();
        assert_eq!(t.open_pitches(), &[64, 59, 55, 50, 45, 40]);
        assert_eq!(t.name(), "Standard E");
    }

    #[test]
    fn test_all_presets_resolve() {
        for id in Tuning::preset_ids() {
            assert!(Tuning::from_preset(id).is_ok(), "preset {} should resolve", id);
        }
    }

    #[test]
    fn test_unknown_preset_is_an_error() {
        let err = Tuning::from_preset("open-c").unwrap_err();
        assert!(matches!(err, TabError::UnknownTuning(_)));
    }

    #[test]
    fn test_wrong_string_count_is_rejected() {
        let err = Tuning::new("Tenor", vec![64, 59, 55, 50]).unwrap_err();
        assert!(matches!(
            err,
            TabError::InvalidTuning {
                expected: 6,
                actual: 4
            }
        ));
    }

    #[test]
    fn test_custom_tuning_from_yaml() {
        let source = "name: Open D\nnotes: [62, 57, 54, 50, 45, 38]\n";
        let t = Tuning::from_yaml(source).unwrap();
        assert_eq!(t.name(), "Open D");
        assert_eq!(t.open_pitches()[2], 54);
    }

    #[test]
    fn test_malformed_yaml_is_a_tuning_file_error() {
        let err = Tuning::from_yaml("name: [oops").unwrap_err();
        assert!(matches!(err, TabError::TuningFile(_)));
    }
}
