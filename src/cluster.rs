//! # Onset Clustering
//!
//! Groups near-simultaneous notes into ordered slices for the fretboard
//! optimizer. A slice is everything the player strikes "at once": all notes
//! whose onsets fall within a small window of the first note of the cluster.
//!
//! The anchor is the first note of each cluster and is not re-centered as
//! members join, so boundaries are onset-order-dependent and asymmetric. That
//! is intentional: a run of notes each 30 ms apart still breaks into separate
//! slices once the window from the anchor is exceeded.
//!
//! Two tolerance windows exist for different jobs and must stay distinct:
//! [`SLICE_TOLERANCE_SECS`] for the global fingering timeline and
//! [`CHORD_TOLERANCE_SECS`] for melody/bass chord grouping (see `voices`).
//! Both are empirically tuned values, not derived constants.

use crate::track::{NoteId, ParsedNote};

/// Window for the global fingering/slice timeline (35 ms). Empirically tuned.
pub const SLICE_TOLERANCE_SECS: f64 = 0.035;

/// Window for voice-separation chord grouping (20 ms). Empirically tuned.
pub const CHORD_TOLERANCE_SECS: f64 = 0.02;

/// Partition notes into onset-ordered slices of note ids.
///
/// Notes are sorted by onset first (ties keep ingestion order), then grouped
/// while `|onset - cluster_anchor| < tolerance`, the anchor resetting to the
/// first note of each new cluster. Every input note lands in exactly one slice.
pub fn cluster_onsets(notes: &[ParsedNote], tolerance: f64) -> Vec<Vec<NoteId>> {
    let mut order: Vec<NoteId> = (0..notes.len()).collect();
    order.sort_by(|&a, &b| notes[a].onset.total_cmp(&notes[b].onset));

    let mut slices: Vec<Vec<NoteId>> = Vec::new();
    let mut current: Vec<NoteId> = Vec::new();
    let mut anchor = 0.0;

    for id in order {
        let onset = notes[id].onset;
        if current.is_empty() {
            anchor = onset;
            current.push(id);
        } else if (onset - anchor).abs() < tolerance {
            current.push(id);
        } else {
            slices.push(std::mem::take(&mut current));
            anchor = onset;
            current.push(id);
        }
    }
    if !current.is_empty() {
        slices.push(current);
    }
    slices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::ParsedNote;

    fn note(pitch: u8, onset: f64) -> ParsedNote {
        ParsedNote {
            pitch,
            onset,
            duration: 0.5,
            velocity: 0.8,
        }
    }

    #[test]
    fn test_simultaneous_notes_form_one_slice() {
        let notes = vec![note(60, 0.0), note(64, 0.01), note(67, 0.02)];
        let slices = cluster_onsets(&notes, SLICE_TOLERANCE_SECS);
        assert_eq!(slices, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_anchor_does_not_recenter() {
        // Each note is 30 ms after the previous. 0.03 is inside the anchor's
        // window but 0.06 is not, even though it is only 30 ms after 0.03.
        let notes = vec![note(60, 0.0), note(62, 0.03), note(64, 0.06)];
        let slices = cluster_onsets(&notes, SLICE_TOLERANCE_SECS);
        assert_eq!(slices, vec![vec![0, 1], vec![2]]);
    }

    #[test]
    fn test_slices_partition_the_input() {
        let notes = vec![
            note(60, 0.0),
            note(64, 0.01),
            note(55, 0.5),
            note(57, 1.0),
            note(59, 1.001),
        ];
        let slices = cluster_onsets(&notes, SLICE_TOLERANCE_SECS);
        let mut seen: Vec<NoteId> = slices.concat();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_unsorted_input_is_sorted_first() {
        let notes = vec![note(60, 1.0), note(64, 0.0)];
        let slices = cluster_onsets(&notes, SLICE_TOLERANCE_SECS);
        assert_eq!(slices, vec![vec![1], vec![0]]);
    }

    #[test]
    fn test_empty_input_yields_no_slices() {
        let slices = cluster_onsets(&[], SLICE_TOLERANCE_SECS);
        assert!(slices.is_empty());
    }
}
