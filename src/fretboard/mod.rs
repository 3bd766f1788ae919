//! # Fretboard Module
//!
//! Picks playable guitar fingerings for a whole track at once.
//!
//! ## Purpose
//! Every pitch on a guitar can be played in several places. This module
//! enumerates the valid (string, fret) assignments for each onset slice and
//! then runs a dynamic-programming search over the full slice sequence,
//! minimizing a biomechanical transition cost so the chosen fingerings flow as
//! one hand movement, not a series of locally-greedy jumps.
//!
//! ## Sub-modules
//! - `state` - Fingering and State types, per-slice state-space generation
//! - `solver` - layered shortest-path search and the cost model
//!
//! ## Key Types
//! - [`Fingering`] - one (string, fret) assignment realizing a pitch
//! - [`State`] - a string-collision-free fingering set for one slice
//! - [`CostWeights`] - tunable constants of the cost model
//!
//! ## Entry Point
//! [`solve_fingerings()`] - choose one fingering set per slice for a track
//!
//! ## Search Bounds
//! The search is a beam search, not exact Viterbi: each layer keeps at most
//! [`solver::BEAM_WIDTH`] states and state generation caps the raw combination
//! list at [`state::MAX_COMBINATIONS`]. Within those bounds the returned path
//! is cost-optimal; outside them it is a documented approximation. Worst-case
//! work is `O(slices * BEAM_WIDTH^2)`.
//!
//! ## Related Modules
//! - `cluster` - produces the onset slices this module consumes
//! - `render` - maps the chosen fingerings back onto notes by id

pub mod solver;
pub mod state;


pub use solver::{solve_fingerings, CostWeights, BEAM_WIDTH};
pub use state::{generate_states, Fingering, State, MAX_COMBINATIONS, MAX_FRET, MAX_STRETCH};
