//! Measure assembly engine.
//!
//! Drives the pipeline stages in order and buckets the results into bars.
//! Fingering optimization runs once over the whole track before any measure
//! is assembled; measures are then pure views over the solved timeline.
//!
//! Timing notes:
//! - A slice lands in measure `floor((first_onset + 5 ms) / bar)`; the forward
//!   epsilon absorbs onsets that arrive a few milliseconds early from
//!   quantization jitter. Empirically tuned, not derived.
//! - Beat offsets within a bar are rounded to 0.01 beat before rests are
//!   filled. A voice's beat sum may drift from the bar length by up to that
//!   amount; the drift is accepted, not reconciled.

use super::types::{
    Position, ProcessedTrack, RenderableMeasure, RenderableNote, Voice, PlaybackId,
    REST_PLAYBACK_ID,
};
use crate::cluster::{cluster_onsets, SLICE_TOLERANCE_SECS};
use crate::fretboard::{solve_fingerings, CostWeights, Fingering};
use crate::rhythm::{fill_gap, DurationSymbol};
use crate::spelling::{prefer_system, spell_pitch};
use crate::track::MidiTrack;
use crate::tuning::Tuning;
use crate::voices::split_chord;
use std::collections::HashMap;

/// Forward epsilon for measure assignment (5 ms). Empirically tuned.
pub const MEASURE_EPSILON_SECS: f64 = 0.005;

/// Placeholder staff keys for rests in each voice.
const MELODY_REST_KEY: &str = "b/4";
const BASS_REST_KEY: &str = "d/4";

/// Layout width hint: `max(450, slices * 90 + 200)`.
const MIN_MEASURE_WIDTH: u32 = 450;
const SLICE_WIDTH: u32 = 90;
const MEASURE_PADDING: u32 = 200;

/// Allocates one id per distinct onset instant, rounded to the millisecond.
/// First-seen wins, so melody and bass entries born from the same slice share
/// an id and repeated queries are stable.
#[derive(Default)]
struct PlaybackIds {
    next: PlaybackId,
    by_onset: HashMap<i64, PlaybackId>,
}

impl PlaybackIds {
    fn id_for(&mut self, time: f64) -> PlaybackId {
        let key = (time * 1000.0).round() as i64;
        *self.by_onset.entry(key).or_insert_with(|| {
            let id = self.next;
            self.next += 1;
            id
        })
    }
}

/// Fill a voice with rests from `cursor` up to `target` (beats) and return
/// the advanced cursor. Pure in the cursor: callers thread it explicitly.
fn push_rests(
    events: &mut Vec<RenderableNote>,
    cursor: f64,
    target: f64,
    voice: Voice,
    measure_start: f64,
    sec_per_beat: f64,
) -> f64 {
    let (symbols, new_cursor) = fill_gap(cursor, target);
    let mut at = cursor;
    for symbol in symbols {
        let key = match voice {
            Voice::Melody => MELODY_REST_KEY,
            Voice::Bass => BASS_REST_KEY,
        };
        events.push(RenderableNote {
            keys: vec![key.to_string()],
            accidentals: Vec::new(),
            positions: Vec::new(),
            pitches: Vec::new(),
            duration: symbol,
            is_rest: true,
            voice,
            start_time: measure_start + at * sec_per_beat,
            duration_seconds: symbol.beats() * sec_per_beat,
            playback_id: REST_PLAYBACK_ID,
        });
        at += symbol.beats();
    }
    new_cursor
}

/// Run the full pipeline for one track.
///
/// Never fails: unplayable pitches surface as notes without positions, empty
/// tracks produce zero measures, and awkward rhythms degrade into rests.
pub fn render_track(track: &MidiTrack, tuning: &Tuning) -> ProcessedTrack {
    if track.notes.is_empty() {
        return ProcessedTrack {
            measures: Vec::new(),
            tuning: tuning.name().to_string(),
            transposition: 0,
            time_signature: track.time_signature,
            bpm: track.bpm,
        };
    }

    let sec_per_beat = track.seconds_per_beat();
    let beats_per_bar = track.time_signature.beats as f64;
    let bar_duration = beats_per_bar * sec_per_beat;

    // Phase 1: global slice analysis and fingering optimization
    let slices = cluster_onsets(&track.notes, SLICE_TOLERANCE_SECS);
    let slice_pitches: Vec<Vec<u8>> = slices
        .iter()
        .map(|slice| slice.iter().map(|&id| track.notes[id].pitch).collect())
        .collect();
    let solved = solve_fingerings(&slice_pitches, tuning, &CostWeights::default());

    // Map each note id to its chosen fingering (first pitch match in the
    // slice's set; a chord doubling a pitch shares one fingering).
    let mut note_fingerings: Vec<Option<Fingering>> = vec![None; track.notes.len()];
    for (slice, fingerings) in slices.iter().zip(&solved) {
        for &id in slice {
            note_fingerings[id] = fingerings
                .iter()
                .find(|f| f.pitch == track.notes[id].pitch)
                .copied();
        }
    }

    let system = prefer_system(&track.notes);

    // Phase 2: measure-by-measure assembly
    let total_measures = (track.duration() / bar_duration).ceil() as usize;
    let mut measure_slices: Vec<Vec<usize>> = vec![Vec::new(); total_measures];
    for (slice_idx, slice) in slices.iter().enumerate() {
        let first_onset = track.notes[slice[0]].onset;
        let raw = ((first_onset + MEASURE_EPSILON_SECS) / bar_duration).floor();
        let idx = raw.max(0.0) as usize;
        if idx < total_measures {
            measure_slices[idx].push(slice_idx);
        }
    }

    let mut ids = PlaybackIds::default();
    let mut measures = Vec::with_capacity(total_measures);

    for (measure_idx, slice_indices) in measure_slices.iter().enumerate() {
        let measure_start = measure_idx as f64 * bar_duration;
        let mut melody: Vec<RenderableNote> = Vec::new();
        let mut bass: Vec<RenderableNote> = Vec::new();
        let mut melody_cursor = 0.0;
        let mut bass_cursor = 0.0;

        for &slice_idx in slice_indices {
            let slice = &slices[slice_idx];
            let first_onset = track.notes[slice[0]].onset;
            let beat_offset =
                ((first_onset - measure_start) / sec_per_beat * 100.0).round() / 100.0;
            let playback_id = ids.id_for(first_onset);

            let (bass_note, melody_notes) = split_chord(slice, &track.notes);

            if let Some(id) = bass_note {
                bass_cursor = push_rests(
                    &mut bass,
                    bass_cursor,
                    beat_offset,
                    Voice::Bass,
                    measure_start,
                    sec_per_beat,
                );
                let note = &track.notes[id];
                let spelled = spell_pitch(note.pitch, system);
                let symbol = DurationSymbol::from_beats(note.duration / sec_per_beat);
                bass.push(RenderableNote {
                    keys: vec![spelled.key],
                    accidentals: vec![spelled.accidental],
                    positions: note_fingerings[id]
                        .map(|f| Position {
                            string: f.string,
                            fret: f.fret,
                        })
                        .into_iter()
                        .collect(),
                    pitches: vec![note.pitch],
                    duration: symbol,
                    is_rest: false,
                    voice: Voice::Bass,
                    start_time: first_onset,
                    duration_seconds: symbol.beats() * sec_per_beat,
                    playback_id,
                });
                bass_cursor += symbol.beats();
            }

            if !melody_notes.is_empty() {
                melody_cursor = push_rests(
                    &mut melody,
                    melody_cursor,
                    beat_offset,
                    Voice::Melody,
                    measure_start,
                    sec_per_beat,
                );
                let mut keys = Vec::with_capacity(melody_notes.len());
                let mut accidentals = Vec::with_capacity(melody_notes.len());
                let mut positions = Vec::new();
                let mut pitches = Vec::with_capacity(melody_notes.len());
                for &id in &melody_notes {
                    let note = &track.notes[id];
                    let spelled = spell_pitch(note.pitch, system);
                    keys.push(spelled.key);
                    accidentals.push(spelled.accidental);
                    if let Some(f) = note_fingerings[id] {
                        positions.push(Position {
                            string: f.string,
                            fret: f.fret,
                        });
                    }
                    pitches.push(note.pitch);
                }
                // Chords share one duration, taken from the first note
                let symbol =
                    DurationSymbol::from_beats(track.notes[melody_notes[0]].duration / sec_per_beat);
                melody.push(RenderableNote {
                    keys,
                    accidentals,
                    positions,
                    pitches,
                    duration: symbol,
                    is_rest: false,
                    voice: Voice::Melody,
                    start_time: first_onset,
                    duration_seconds: symbol.beats() * sec_per_beat,
                    playback_id,
                });
                melody_cursor += symbol.beats();
            }
        }

        // Trailing rests complete the bar for both voices
        push_rests(
            &mut melody,
            melody_cursor,
            beats_per_bar,
            Voice::Melody,
            measure_start,
            sec_per_beat,
        );
        push_rests(
            &mut bass,
            bass_cursor,
            beats_per_bar,
            Voice::Bass,
            measure_start,
            sec_per_beat,
        );

        let width =
            MIN_MEASURE_WIDTH.max(slice_indices.len() as u32 * SLICE_WIDTH + MEASURE_PADDING);
        measures.push(RenderableMeasure {
            index: measure_idx,
            melody,
            bass,
            width,
        });
    }

    ProcessedTrack {
        measures,
        tuning: tuning.name().to_string(),
        transposition: 0,
        time_signature: track.time_signature,
        bpm: track.bpm,
    }
}
