//! # Render Module
//!
//! Assembles the final, collaborator-facing score: measures of melody and bass
//! events with fingerings, spelled pitches, quantized durations, and stable
//! playback ids.
//!
//! ## Purpose
//! This is the driver of the whole pipeline. Given a decoded [`MidiTrack`] and
//! a [`Tuning`](crate::Tuning) it:
//! 1. clusters notes into onset slices (35 ms window, whole track)
//! 2. solves fingerings globally over the slice sequence
//! 3. votes the track-wide accidental system
//! 4. buckets slices into fixed-length measures and, per measure and voice,
//!    interleaves quantized notes with gap-filling rests
//!
//! ## Sub-modules
//! - `types` - RenderableNote, RenderableMeasure, ProcessedTrack, Position
//! - `engine` - measure assembly and pipeline orchestration
//!
//! ## Entry Points
//! - [`render_track()`] - full pipeline for one track
//! - [`flatten_for_playback()`] - time-sorted note list for the playback cursor
//!
//! ## Example
//! ```rust
//! use tabgen::{render_track, MidiTrack, ParsedNote, TimeSignature, Tuning};
//!
//! let track = MidiTrack {
//!     notes: vec![ParsedNote { pitch: 64, onset: 0.0, duration: 0.5, velocity: 0.8 }],
//!     bpm: 120.0,
//!     time_signature: TimeSignature::default(),
//! };
//! let processed = render_track(&track, &Tuning::standard());
//! assert_eq!(processed.measures.len(), 1);
//! ```
//!
//! ## Related Modules
//! - `cluster`, `fretboard`, `spelling`, `voices`, `rhythm` - the stages driven here

mod engine;
mod types;


pub use engine::render_track;
pub use types::{
    flatten_for_playback, Position, ProcessedTrack, RenderableMeasure, RenderableNote, Voice,
    PlaybackId, REST_PLAYBACK_ID,
};
