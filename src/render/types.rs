//! Output type definitions for the rendering and playback collaborators.
//!
//! Everything here serializes to camelCase JSON. The rendering collaborator
//! draws measures; the playback collaborator consumes the flattened,
//! time-sorted note list and correlates highlights across staves through
//! playback ids.

use crate::rhythm::DurationSymbol;
use crate::track::TimeSignature;
use serde::Serialize;

/// Identifies one musical onset instant across every representation of it:
/// a melody note, its bass counterpart, notation, and tab all share the id.
pub type PlaybackId = i32;

/// Rests are not highlightable and all share this sentinel id.
pub const REST_PLAYBACK_ID: PlaybackId = -1;

/// Which notation voice an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    Melody,
    Bass,
}

/// A (string, fret) position on the tab staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    #[serde(rename = "str")]
    pub string: u8,
    pub fret: u8,
}

/// One rendered event: a note, a chord, or a rest.
///
/// Parallel arrays (`keys`, `accidentals`, `positions`, `pitches`) describe
/// the chord members in pitch-ascending order; all are empty for rests except
/// `keys`, which holds the rest's placeholder staff position. `start_time` and
/// `duration_seconds` are real time for the playback scheduler; `duration` is
/// the notated symbol for the engraver.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderableNote {
    pub keys: Vec<String>,
    pub accidentals: Vec<Option<String>>,
    pub positions: Vec<Position>,
    pub pitches: Vec<u8>,
    pub duration: DurationSymbol,
    pub is_rest: bool,
    pub voice: Voice,
    pub start_time: f64,
    pub duration_seconds: f64,
    pub playback_id: PlaybackId,
}

/// One bar of the rendered score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderableMeasure {
    pub index: usize,
    #[serde(rename = "notesVoice1")]
    pub melody: Vec<RenderableNote>,
    #[serde(rename = "notesVoice2")]
    pub bass: Vec<RenderableNote>,
    /// Layout width hint for the renderer, in abstract units.
    pub width: u32,
}

/// The complete pipeline result for one track.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedTrack {
    pub measures: Vec<RenderableMeasure>,
    pub tuning: String,
    pub transposition: i8,
    pub time_signature: TimeSignature,
    pub bpm: f64,
}

/// Flatten measures into one list of all melody and bass events sorted by
/// start time, for the playback collaborator's amortized-O(1) cursor.
///
/// A pure function of the measures: playback must not re-derive sort
/// semantics anywhere else. The sort is stable, so events sharing an onset
/// keep measure order, melody before bass.
pub fn flatten_for_playback(measures: &[RenderableMeasure]) -> Vec<RenderableNote> {
    let mut notes: Vec<RenderableNote> = measures
        .iter()
        .flat_map(|m| m.melody.iter().chain(m.bass.iter()).cloned())
        .collect();
    notes.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
    notes
}
