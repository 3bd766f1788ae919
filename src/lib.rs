//! # tabgen
//!
//! Converts a parsed stream of timed, pitched MIDI note events into measures
//! of playable guitar fingerings plus notation-ready durations, usable both
//! for score rendering and for timed playback.
//!
//! The pipeline is a single synchronous pass per track: onset clustering,
//! global fingering optimization over the whole slice sequence, enharmonic
//! spelling, melody/bass voice separation, rhythmic quantization, and measure
//! assembly. It is purely functional - identical input always yields
//! identical output - and it never fails on musical content, only on invalid
//! configuration (a bad tuning).
//!
//! MIDI container decoding, staff/tab drawing, and audio scheduling are owned
//! by external collaborators; this crate starts at decoded notes and ends at
//! [`ProcessedTrack`].
//!
//! ## Example
//! ```rust
//! use tabgen::{render_track_in, MidiTrack, ParsedNote, TimeSignature};
//!
//! let track = MidiTrack {
//!     notes: vec![ParsedNote { pitch: 64, onset: 0.0, duration: 0.5, velocity: 0.8 }],
//!     bpm: 120.0,
//!     time_signature: TimeSignature::default(),
//! };
//!
//! let processed = render_track_in(&track, "standard")?;
//! assert_eq!(processed.measures.len(), 1);
//! # Ok::<(), tabgen::TabError>(())
//! ```

pub mod cluster;
pub mod error;
pub mod fretboard;
pub mod render;
pub mod rhythm;
pub mod spelling;
pub mod track;
pub mod tuning;
pub mod voices;

pub use error::TabError;
pub use render::{
    flatten_for_playback, render_track, ProcessedTrack, RenderableMeasure, RenderableNote,
};
pub use rhythm::DurationSymbol;
pub use track::{MidiTrack, NoteId, ParsedNote, TimeSignature};
pub use tuning::Tuning;

/// Render a track using a named tuning preset.
///
/// Convenience wrapper over [`render_track`] for callers that work with
/// preset ids instead of constructed [`Tuning`] values.
///
/// # Errors
/// Returns [`TabError::UnknownTuning`] if the preset id is not built in.
pub fn render_track_in(track: &MidiTrack, preset: &str) -> Result<ProcessedTrack, TabError> {
    let tuning = Tuning::from_preset(preset)?;
    Ok(render_track(track, &tuning))
}
