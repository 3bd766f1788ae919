//! Fingering states and per-slice state-space generation.
//!
//! A [`State`] is one complete way to play a slice: a fingering per pitch with
//! no two on the same string, plus the derived metrics the cost model reads
//! (average fretted position, stretch, barre). Generation never fails: slices
//! with no comfortable shape degrade to an explicit fallback state, and
//! out-of-range pitches degrade to an empty-fingering marker state.

use crate::tuning::Tuning;

/// Highest usable fret.
pub const MAX_FRET: u8 = 20;

/// Widest fret span a state may have and still be admitted to the solver.
pub const MAX_STRETCH: u8 = 5;

/// Sentinel stretch for the degraded fallback state: "unplayable, accept
/// anyway" so downstream always has at least one option.
pub const FALLBACK_STRETCH: u8 = 10;

/// Cap on the live combination list during cartesian expansion. Keeps dense
/// chords from blowing up; the prefix kept is in stable generation order.
pub const MAX_COMBINATIONS: usize = 100;

/// Notes on one fret sharing it with this many others make a barre.
const BARRE_MIN_NOTES: usize = 3;

/// One (string, fret) assignment realizing a pitch.
///
/// Invariant: `pitch - tuning[string - 1] == fret` and `fret <= MAX_FRET`.
/// Strings are numbered from 1, highest-pitched first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingering {
    pub string: u8,
    pub fret: u8,
    pub pitch: u8,
}

/// A candidate simultaneous fingering assignment for one slice.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub fingerings: Vec<Fingering>,
    /// Mean of the fretted (non-open) frets; 0.0 if nothing is fretted.
    pub avg_fret: f64,
    /// Max minus min among fretted frets.
    pub max_stretch: u8,
    /// Three or more notes share a single fret.
    pub is_barre: bool,
}

impl State {
    /// Compute the derived metrics for a fingering set.
    pub fn from_fingerings(fingerings: Vec<Fingering>) -> Self {
        let fretted: Vec<u8> = fingerings
            .iter()
            .filter(|f| f.fret > 0)
            .map(|f| f.fret)
            .collect();

        let avg_fret = if fretted.is_empty() {
            0.0
        } else {
            fretted.iter().map(|&f| f as f64).sum::<f64>() / fretted.len() as f64
        };
        let max_stretch = match (fretted.iter().max(), fretted.iter().min()) {
            (Some(&max), Some(&min)) => max - min,
            _ => 0,
        };

        // Barre: enough fretted notes stacked on one fret
        let mut is_barre = false;
        for &fret in &fretted {
            if fretted.iter().filter(|&&f| f == fret).count() >= BARRE_MIN_NOTES {
                is_barre = true;
                break;
            }
        }

        Self {
            fingerings,
            avg_fret,
            max_stretch,
            is_barre,
        }
    }

    /// The explicit "unplayable slice" marker: no fingerings at all.
    pub fn empty() -> Self {
        Self {
            fingerings: Vec::new(),
            avg_fret: 0.0,
            max_stretch: 0,
            is_barre: false,
        }
    }

    /// Strings occupied by this state, regardless of fret.
    pub fn strings(&self) -> impl Iterator<Item = u8> + '_ {
        self.fingerings.iter().map(|f| f.string)
    }
}

/// Every string on which `pitch` is reachable within [`MAX_FRET`].
pub fn possible_fingerings(pitch: u8, tuning: &Tuning) -> Vec<Fingering> {
    tuning
        .open_pitches()
        .iter()
        .enumerate()
        .filter_map(|(idx, &open)| {
            if pitch >= open && pitch - open <= MAX_FRET {
                Some(Fingering {
                    string: idx as u8 + 1,
                    fret: pitch - open,
                    pitch,
                })
            } else {
                None
            }
        })
        .collect()
}

/// Generate the admissible states for one slice's pitch set.
///
/// Builds the cartesian product of per-pitch fingering options, rejecting any
/// partial assignment that reuses a string and truncating the live list to
/// [`MAX_COMBINATIONS`] after each pitch. Surviving combinations with a stretch
/// over [`MAX_STRETCH`] are discarded.
///
/// Degraded outputs keep the pipeline total:
/// - combinations exist but none are comfortable: one fallback state built
///   from the first raw combination, stretch forced to [`FALLBACK_STRETCH`]
/// - no combination at all (pitch off the fretboard): one [`State::empty`]
pub fn generate_states(pitches: &[u8], tuning: &Tuning) -> Vec<State> {
    if pitches.is_empty() {
        return vec![State::empty()];
    }

    let options: Vec<Vec<Fingering>> = pitches
        .iter()
        .map(|&p| possible_fingerings(p, tuning))
        .collect();

    let mut combinations: Vec<Vec<Fingering>> = vec![Vec::new()];
    for pitch_options in &options {
        let mut next = Vec::new();
        for combo in &combinations {
            for &opt in pitch_options {
                // Fail fast on string collisions while expanding
                if combo.iter().all(|c| c.string != opt.string) {
                    let mut extended = combo.clone();
                    extended.push(opt);
                    next.push(extended);
                }
            }
        }
        next.truncate(MAX_COMBINATIONS);
        combinations = next;
    }

    let states: Vec<State> = combinations
        .iter()
        .map(|combo| State::from_fingerings(combo.clone()))
        .filter(|state| state.max_stretch <= MAX_STRETCH)
        .collect();

    if !states.is_empty() {
        return states;
    }

    if let Some(first) = combinations.into_iter().next() {
        let mut fallback = State::from_fingerings(first);
        fallback.max_stretch = FALLBACK_STRETCH;
        return vec![fallback];
    }

    vec![State::empty()]
}
