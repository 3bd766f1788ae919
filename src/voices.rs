//! # Voice Separation
//!
//! Splits a note stream into two notation voices: melody (upper staff voice)
//! and bass. This is a fixed two-voice split for guitar charts, not a general
//! polyphonic voice allocator.
//!
//! Chords are regrouped here with the 20 ms [`CHORD_TOLERANCE_SECS`] window,
//! an independent pass from the 35 ms fingering-timeline clustering. Within a
//! chord the lowest note goes to bass and the rest to melody; an isolated note
//! is routed by pitch around [`BASS_SPLIT_PITCH`].

use crate::cluster::CHORD_TOLERANCE_SECS;
use crate::track::{NoteId, ParsedNote};

/// Pitches below E3 route to the bass voice when a note stands alone.
pub const BASS_SPLIT_PITCH: u8 = 52;

/// Split one simultaneous group into `(bass, melody)` by the two-voice rule.
///
/// The group is sorted ascending by pitch (ties keep id order). With more than
/// one note the lowest is bass and the rest melody; a single note goes to bass
/// only when below [`BASS_SPLIT_PITCH`].
pub fn split_chord(group: &[NoteId], notes: &[ParsedNote]) -> (Option<NoteId>, Vec<NoteId>) {
    let mut sorted: Vec<NoteId> = group.to_vec();
    sorted.sort_by_key(|&id| notes[id].pitch);

    match sorted.as_slice() {
        [] => (None, Vec::new()),
        [only] => {
            if notes[*only].pitch < BASS_SPLIT_PITCH {
                (Some(*only), Vec::new())
            } else {
                (None, vec![*only])
            }
        }
        [lowest, rest @ ..] => (Some(*lowest), rest.to_vec()),
    }
}

/// Separate a whole note stream into `(melody, bass)` id lists.
///
/// Notes are sorted chronologically, chained into chord groups wherever
/// consecutive onsets are within [`CHORD_TOLERANCE_SECS`] of the previous
/// note, and each group is split with [`split_chord`]. Both output lists keep
/// chronological order.
pub fn separate_voices(notes: &[ParsedNote]) -> (Vec<NoteId>, Vec<NoteId>) {
    let mut order: Vec<NoteId> = (0..notes.len()).collect();
    order.sort_by(|&a, &b| notes[a].onset.total_cmp(&notes[b].onset));

    let mut melody = Vec::new();
    let mut bass = Vec::new();
    let mut group: Vec<NoteId> = Vec::new();

    for id in order {
        let chains = group
            .last()
            .is_some_and(|&prev| (notes[id].onset - notes[prev].onset).abs() < CHORD_TOLERANCE_SECS);
        if group.is_empty() || chains {
            group.push(id);
        } else {
            let (b, m) = split_chord(&group, notes);
            bass.extend(b);
            melody.extend(m);
            group = vec![id];
        }
    }
    if !group.is_empty() {
        let (b, m) = split_chord(&group, notes);
        bass.extend(b);
        melody.extend(m);
    }

    (melody, bass)
}
