//! # Input Track Model
//!
//! Types delivered by the external MIDI-decoding collaborator. The decoder owns
//! container parsing; by the time a [`MidiTrack`] reaches this crate its notes
//! are sorted by onset and zero-velocity note-offs are already filtered out.
//!
//! Notes are referenced everywhere else in the pipeline by their index into
//! `MidiTrack::notes` (a [`NoteId`]), assigned once at ingestion. No later stage
//! relies on object identity.
//!
//! ## Related Modules
//! - `cluster` - groups notes into onset slices by `NoteId`
//! - `render` - drives the pipeline over a `MidiTrack`

use serde::{Deserialize, Serialize};

/// Stable index of a note within its track, assigned at ingestion.
pub type NoteId = usize;

/// A single decoded note event.
///
/// Immutable once produced by the decoder. `onset` and `duration` are in
/// seconds of real time; `pitch` is a MIDI note number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParsedNote {
    pub pitch: u8,
    #[serde(rename = "onsetSeconds")]
    pub onset: f64,
    #[serde(rename = "durationSeconds")]
    pub duration: f64,
    pub velocity: f64,
}

/// Time signature (e.g., 4/4, 3/4, 6/8)
///
/// Crosses the collaborator boundary as a two-element `[numerator, denominator]`
/// array, matching the decoder's wire shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[u8; 2]", into = "[u8; 2]")]
pub struct TimeSignature {
    pub beats: u8,
    pub beat_type: u8,
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self {
            beats: 4,
            beat_type: 4,
        }
    }
}

impl From<[u8; 2]> for TimeSignature {
    fn from(pair: [u8; 2]) -> Self {
        Self {
            beats: pair[0],
            beat_type: pair[1],
        }
    }
}

impl From<TimeSignature> for [u8; 2] {
    fn from(ts: TimeSignature) -> [u8; 2] {
        [ts.beats, ts.beat_type]
    }
}

/// One decoded MIDI track, ready for rendering.
#[derive(Debug, Clone, Deserialize)]
pub struct MidiTrack {
    pub notes: Vec<ParsedNote>,
    pub bpm: f64,
    #[serde(rename = "timeSignature", default)]
    pub time_signature: TimeSignature,
}

impl MidiTrack {
    /// Seconds per quarter-note beat at this track's tempo.
    pub fn seconds_per_beat(&self) -> f64 {
        60.0 / self.bpm
    }

    /// Total track length: the latest note-off time, or 0 for an empty track.
    pub fn duration(&self) -> f64 {
        self.notes
            .iter()
            .map(|n| n.onset + n.duration)
            .fold(0.0, f64::max)
    }
}
