//! Integration tests for the tabgen pipeline
//!
//! Exercises the full path from decoded notes to rendered measures.

use tabgen::cluster::{cluster_onsets, SLICE_TOLERANCE_SECS};
use tabgen::{
    flatten_for_playback, render_track, render_track_in, DurationSymbol, MidiTrack, ParsedNote,
    TabError, TimeSignature, Tuning,
};

fn note(pitch: u8, onset: f64, duration: f64) -> ParsedNote {
    ParsedNote {
        pitch,
        onset,
        duration,
        velocity: 0.8,
    }
}

fn track(notes: Vec<ParsedNote>, bpm: f64, time_signature: [u8; 2]) -> MidiTrack {
    MidiTrack {
        notes,
        bpm,
        time_signature: time_signature.into(),
    }
}

/// A small two-bar phrase with chords, a bass line, and off-beat onsets.
fn sample_phrase() -> MidiTrack {
    track(
        vec![
            note(40, 0.0, 1.0),
            note(64, 0.0, 0.5),
            note(67, 0.01, 0.5),
            note(65, 0.5, 0.5),
            note(45, 1.0, 1.0),
            note(64, 1.5, 0.25),
            note(62, 2.0, 1.0),
            note(40, 2.0, 2.0),
            note(60, 3.0, 0.9),
        ],
        120.0,
        [4, 4],
    )
}

#[test]
fn test_slices_partition_every_note_exactly_once() {
    let phrase = sample_phrase();
    let slices = cluster_onsets(&phrase.notes, SLICE_TOLERANCE_SECS);
    let mut ids: Vec<usize> = slices.concat();
    ids.sort_unstable();
    let expected: Vec<usize> = (0..phrase.notes.len()).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_full_pipeline_is_deterministic() {
    let phrase = sample_phrase();
    let first = render_track_in(&phrase, "standard").unwrap();
    let second = render_track_in(&phrase, "standard").unwrap();
    assert_eq!(first, second);

    let flat_first = flatten_for_playback(&first.measures);
    let flat_second = flatten_for_playback(&second.measures);
    assert_eq!(flat_first, flat_second);
}

#[test]
fn test_every_measure_fills_its_bar() {
    let phrase = sample_phrase();
    let processed = render_track_in(&phrase, "standard").unwrap();
    assert_eq!(processed.measures.len(), 2);

    for measure in &processed.measures {
        for voice in [&measure.melody, &measure.bass] {
            let beats: f64 = voice.iter().map(|n| n.duration.beats()).sum();
            // One thirty-second of quantization overshoot is accepted drift
            assert!(
                (beats - 4.0).abs() <= 0.135,
                "measure {} voice sums to {} beats",
                measure.index,
                beats
            );
        }
    }
}

#[test]
fn test_fingerings_respect_fret_and_string_invariants() {
    let phrase = sample_phrase();
    let tuning = Tuning::standard();
    let processed = render_track(&phrase, &tuning);

    for measure in &processed.measures {
        for event in measure.melody.iter().chain(measure.bass.iter()) {
            let mut strings: Vec<u8> = event.positions.iter().map(|p| p.string).collect();
            strings.sort_unstable();
            strings.dedup();
            assert_eq!(strings.len(), event.positions.len(), "string collision");

            for pos in &event.positions {
                assert!(pos.fret <= 20);
                assert!((1..=6).contains(&pos.string));
            }
        }
    }
}

#[test]
fn test_single_quarter_note_track() {
    // 4/4 at 120 bpm, one quarter note at beat 0: melody is note + dotted-half
    // rest, bass is a whole rest.
    let t = track(vec![note(64, 0.0, 0.5)], 120.0, [4, 4]);
    let processed = render_track_in(&t, "standard").unwrap();

    assert_eq!(processed.measures.len(), 1);
    let measure = &processed.measures[0];
    let melody: Vec<(bool, DurationSymbol)> =
        measure.melody.iter().map(|n| (n.is_rest, n.duration)).collect();
    assert_eq!(
        melody,
        vec![
            (false, DurationSymbol::Quarter),
            (true, DurationSymbol::DottedHalf)
        ]
    );
    let bass: Vec<(bool, DurationSymbol)> =
        measure.bass.iter().map(|n| (n.is_rest, n.duration)).collect();
    assert_eq!(bass, vec![(true, DurationSymbol::Whole)]);
}

#[test]
fn test_three_four_track_gets_three_beat_bars() {
    let t = track(vec![note(64, 0.0, 0.5)], 120.0, [3, 4]);
    let processed = render_track_in(&t, "standard").unwrap();
    assert_eq!(processed.time_signature, TimeSignature { beats: 3, beat_type: 4 });

    let measure = &processed.measures[0];
    let beats: f64 = measure.melody.iter().map(|n| n.duration.beats()).sum();
    assert!((beats - 3.0).abs() <= 0.135);
}

#[test]
fn test_empty_track_is_not_an_error() {
    let t = track(vec![], 120.0, [4, 4]);
    let processed = render_track_in(&t, "standard").unwrap();
    assert!(processed.measures.is_empty());
    assert!(flatten_for_playback(&processed.measures).is_empty());
}

#[test]
fn test_unknown_preset_fails_before_the_pipeline_runs() {
    let t = track(vec![note(64, 0.0, 0.5)], 120.0, [4, 4]);
    let err = render_track_in(&t, "open-c").unwrap_err();
    assert!(matches!(err, TabError::UnknownTuning(_)));
}

#[test]
fn test_drop_d_reaches_low_d() {
    // D2 (38) is below standard tuning's range but open string 6 in drop-d.
    let t = track(vec![note(38, 0.0, 1.0)], 120.0, [4, 4]);

    let standard = render_track_in(&t, "standard").unwrap();
    let bass_note = &standard.measures[0].bass[0];
    assert!(bass_note.positions.is_empty(), "untabbable in standard");

    let drop_d = render_track_in(&t, "drop-d").unwrap();
    let bass_note = &drop_d.measures[0].bass[0];
    assert_eq!(bass_note.positions.len(), 1);
    assert_eq!(bass_note.positions[0].string, 6);
    assert_eq!(bass_note.positions[0].fret, 0);
    assert_eq!(drop_d.tuning, "Drop D");
}

#[test]
fn test_flattened_playback_stream_is_time_sorted_and_complete() {
    let phrase = sample_phrase();
    let processed = render_track_in(&phrase, "standard").unwrap();
    let flat = flatten_for_playback(&processed.measures);

    for pair in flat.windows(2) {
        assert!(pair[0].start_time <= pair[1].start_time);
    }
    let total: usize = processed
        .measures
        .iter()
        .map(|m| m.melody.len() + m.bass.len())
        .sum();
    assert_eq!(flat.len(), total);

    // Notes that sound together highlight together
    let chord_ids: Vec<i32> = flat
        .iter()
        .filter(|n| !n.is_rest && n.start_time == 0.0)
        .map(|n| n.playback_id)
        .collect();
    assert!(chord_ids.len() >= 2);
    assert!(chord_ids.windows(2).all(|p| p[0] == p[1]));
}

#[test]
fn test_flat_heavy_phrase_spells_with_flats() {
    // Eb, Ab, Bb melody: the track-wide vote lands on flats
    let t = track(
        vec![note(63, 0.0, 0.5), note(68, 0.5, 0.5), note(70, 1.0, 0.5)],
        120.0,
        [4, 4],
    );
    let processed = render_track_in(&t, "standard").unwrap();
    let accidentals: Vec<Option<String>> = processed.measures[0]
        .melody
        .iter()
        .filter(|n| !n.is_rest)
        .flat_map(|n| n.accidentals.clone())
        .collect();
    assert_eq!(accidentals.len(), 3);
    assert!(accidentals.iter().all(|a| a.as_deref() == Some("b")));
}

#[test]
fn test_custom_yaml_tuning_runs_through_the_pipeline() {
    let tuning = Tuning::from_yaml("name: Open D\nnotes: [62, 57, 54, 50, 45, 38]\n").unwrap();
    let t = track(vec![note(62, 0.0, 0.5)], 120.0, [4, 4]);
    let processed = render_track(&t, &tuning);
    assert_eq!(processed.tuning, "Open D");
    let melody_note = &processed.measures[0].melody[0];
    assert_eq!(melody_note.positions[0].string, 1);
    assert_eq!(melody_note.positions[0].fret, 0);
}
