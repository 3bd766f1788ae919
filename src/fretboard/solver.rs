//! Beam-pruned Viterbi search over the slice sequence.
//!
//! One layer of candidate [`State`]s per slice; edges carry the biomechanical
//! transition cost. The search runs once over the whole track, so a fingering
//! early in the piece can be chosen for where it leaves the hand three bars
//! later. Layers over [`BEAM_WIDTH`] states are pruned to the cheapest ones,
//! which bounds the work at `O(slices * BEAM_WIDTH^2)` and makes the result a
//! beam approximation rather than an exact optimum.

use super::state::{generate_states, Fingering, State};
use crate::tuning::Tuning;

/// States kept per layer after pruning. With [`super::MAX_COMBINATIONS`] this
/// is the only bound on worst-case work.
pub const BEAM_WIDTH: usize = 50;

/// Tunable constants of the cost model.
///
/// The baseline policy follows a negative-log "easiness" product: cost terms
/// are `|d|/b` for movement plus `ln(1 + x * w)` for height, stretch and
/// changed strings, normalized by the fretboard dimensions. All multiplicative
/// weights default to 1.0; they are knobs, not literals, so alternative
/// player profiles can reweigh them without touching the solver.
#[derive(Debug, Clone)]
pub struct CostWeights {
    /// Laplace `b` parameter for the movement term; smaller penalizes
    /// position shifts harder.
    pub movement_b: f64,
    pub height: f64,
    pub stretch: f64,
    pub changed_strings: f64,
    /// Flat additive penalty for barre shapes.
    pub barre_penalty: f64,
    /// Mild bias toward low positions in the first layer.
    pub open_position_bias: f64,
    /// Normalization spans: fret range, string count, reference stretch.
    pub fret_span: f64,
    pub string_span: f64,
    pub stretch_span: f64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            movement_b: 1.0,
            height: 1.0,
            stretch: 1.0,
            changed_strings: 1.0,
            barre_penalty: 0.5,
            open_position_bias: 0.1,
            fret_span: 20.0,
            string_span: 6.0,
            stretch_span: 5.0,
        }
    }
}

impl CostWeights {
    /// Cost of moving the hand from `prev` to `curr` (lower = easier).
    ///
    /// Five terms: normalized movement distance, fretboard height, finger
    /// stretch, count of newly-engaged strings, and the barre penalty.
    pub fn transition_cost(&self, prev: &State, curr: &State) -> f64 {
        let distance = (curr.avg_fret - prev.avg_fret).abs() / self.fret_span;
        let cost_distance = distance / self.movement_b;

        let height = curr.avg_fret / self.fret_span;
        let cost_height = (1.0 + height * self.height).ln();

        let stretch = curr.max_stretch as f64 / self.stretch_span;
        let cost_stretch = (1.0 + stretch * self.stretch).ln();

        let changed = changed_strings(prev, curr) as f64 / self.string_span;
        let cost_changed = (1.0 + changed * self.changed_strings).ln();

        let cost_barre = if curr.is_barre { self.barre_penalty } else { 0.0 };

        cost_distance + cost_height + cost_stretch + cost_changed + cost_barre
    }

    /// Cost of a first-layer state: a small pull toward open position.
    pub fn initial_cost(&self, state: &State) -> f64 {
        state.avg_fret * self.open_position_bias
    }
}

/// How many of the current state's strings were not already sounding in the
/// previous shape. Only fretted strings count as engaged in `prev`; open
/// strings cost nothing to leave.
pub fn changed_strings(prev: &State, curr: &State) -> usize {
    let reused = curr
        .strings()
        .filter(|&s| prev.fingerings.iter().any(|f| f.fret > 0 && f.string == s))
        .count();
    curr.fingerings.len() - reused
}

struct PathNode {
    state: State,
    min_cost: f64,
    prev: usize,
}

/// Choose one fingering set per slice, minimizing cumulative transition cost
/// over the whole track.
///
/// The returned vector is index-aligned with `slices`. A slice whose pitches
/// are unplayable on every string yields an empty fingering set rather than
/// an error; rendering surfaces it as a note without positions.
pub fn solve_fingerings(
    slices: &[Vec<u8>],
    tuning: &Tuning,
    weights: &CostWeights,
) -> Vec<Vec<Fingering>> {
    if slices.is_empty() {
        return Vec::new();
    }

    let mut layers: Vec<Vec<PathNode>> = Vec::with_capacity(slices.len());

    layers.push(
        generate_states(&slices[0], tuning)
            .into_iter()
            .map(|state| PathNode {
                min_cost: weights.initial_cost(&state),
                state,
                prev: 0,
            })
            .collect(),
    );

    for slice in &slices[1..] {
        let previous = layers.last().map(Vec::as_slice).unwrap_or(&[]);
        let mut layer: Vec<PathNode> = generate_states(slice, tuning)
            .into_iter()
            .map(|curr| {
                let mut best_cost = f64::INFINITY;
                let mut best_prev = 0;
                for (idx, prev) in previous.iter().enumerate() {
                    let cost = prev.min_cost + weights.transition_cost(&prev.state, &curr);
                    if cost < best_cost {
                        best_cost = cost;
                        best_prev = idx;
                    }
                }
                PathNode {
                    state: curr,
                    min_cost: best_cost,
                    prev: best_prev,
                }
            })
            .collect();

        if layer.len() > BEAM_WIDTH {
            // Stable sort: cost ties keep state-generation order, which keeps
            // the whole pipeline deterministic.
            layer.sort_by(|a, b| a.min_cost.total_cmp(&b.min_cost));
            layer.truncate(BEAM_WIDTH);
        }

        layers.push(layer);
    }

    // Backtrack from the cheapest final node
    let mut result: Vec<Vec<Fingering>> = Vec::with_capacity(slices.len());
    let last = layers
        .last()
        .map(Vec::as_slice)
        .unwrap_or(&[]);
    // First strict minimum, so cost ties resolve to generation order
    let mut best_cost = f64::INFINITY;
    let mut node_idx = 0;
    for (idx, node) in last.iter().enumerate() {
        if node.min_cost < best_cost {
            best_cost = node.min_cost;
            node_idx = idx;
        }
    }

    for layer in layers.iter().rev() {
        match layer.get(node_idx) {
            Some(node) => {
                result.push(node.state.fingerings.clone());
                node_idx = node.prev;
            }
            None => result.push(Vec::new()),
        }
    }
    result.reverse();

    // A layer should never be empty given generation's fallbacks, but pad
    // rather than fail if it ever is.
    while result.len() < slices.len() {
        result.push(Vec::new());
    }
    result
}
