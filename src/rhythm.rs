//! # Rhythmic Quantization
//!
//! Maps elapsed time onto notated duration symbols and back. The mapping is
//! lossy by design: [`DurationSymbol::from_beats`] buckets a continuous beat
//! value by fixed thresholds (first match wins, longest first), and
//! [`DurationSymbol::beats`] is the exact inverse table used when advancing a
//! voice's beat cursor.
//!
//! [`fill_gap`] closes the hole between a voice's cursor and a target beat
//! position with a run of rests, one quantized symbol at a time. It is a pure
//! function of `(cursor, target)` and returns the updated cursor alongside the
//! rest symbols, so callers never share mutable timeline state.
//!
//! ## Related Modules
//! - `render` - turns the returned symbols into rest events per voice

use serde::Serialize;

/// Residual gaps below this many beats count as already aligned (10 ms at
/// 150 bpm, but defined in beats). Empirically tuned.
pub const MIN_REST_GAP_BEATS: f64 = 0.01;

/// Notated duration symbols, serialized as the rendering collaborator's
/// duration codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DurationSymbol {
    #[serde(rename = "w")]
    Whole,
    #[serde(rename = "hd")]
    DottedHalf,
    #[serde(rename = "h")]
    Half,
    #[serde(rename = "qd")]
    DottedQuarter,
    #[serde(rename = "q")]
    Quarter,
    #[serde(rename = "8d")]
    DottedEighth,
    #[serde(rename = "8")]
    Eighth,
    #[serde(rename = "16")]
    Sixteenth,
    #[serde(rename = "32")]
    ThirtySecond,
}

impl DurationSymbol {
    /// Quantize a beat count to the best-fitting symbol.
    ///
    /// Thresholds are inclusive lower bounds checked longest-first, so 3.2
    /// beats becomes a dotted half and anything under 0.18 a thirty-second.
    pub fn from_beats(beats: f64) -> Self {
        if beats >= 3.5 {
            Self::Whole
        } else if beats >= 2.7 {
            Self::DottedHalf
        } else if beats >= 1.7 {
            Self::Half
        } else if beats >= 1.3 {
            Self::DottedQuarter
        } else if beats >= 0.8 {
            Self::Quarter
        } else if beats >= 0.6 {
            Self::DottedEighth
        } else if beats >= 0.35 {
            Self::Eighth
        } else if beats >= 0.18 {
            Self::Sixteenth
        } else {
            Self::ThirtySecond
        }
    }

    /// Exact notated length in beats.
    pub fn beats(self) -> f64 {
        match self {
            Self::Whole => 4.0,
            Self::DottedHalf => 3.0,
            Self::Half => 2.0,
            Self::DottedQuarter => 1.5,
            Self::Quarter => 1.0,
            Self::DottedEighth => 0.75,
            Self::Eighth => 0.5,
            Self::Sixteenth => 0.25,
            Self::ThirtySecond => 0.125,
        }
    }

    /// The rendering collaborator's duration code (matches the serde form).
    pub fn code(self) -> &'static str {
        match self {
            Self::Whole => "w",
            Self::DottedHalf => "hd",
            Self::Half => "h",
            Self::DottedQuarter => "qd",
            Self::Quarter => "q",
            Self::DottedEighth => "8d",
            Self::Eighth => "8",
            Self::Sixteenth => "16",
            Self::ThirtySecond => "32",
        }
    }
}

fn round_millibeats(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

/// Fill the gap between `cursor` and `target` (both in beats) with rests.
///
/// Returns the rest symbols appended in order and the new cursor position.
/// The gap is re-rounded to a millibeat every step and the loop stops once it
/// falls below [`MIN_REST_GAP_BEATS`]. A quantized rest can overshoot a small
/// residual gap (the shortest symbol is 0.125 beats), which is the accepted
/// source of bar-fill drift.
pub fn fill_gap(mut cursor: f64, target: f64) -> (Vec<DurationSymbol>, f64) {
    let mut rests = Vec::new();
    let mut gap = round_millibeats(target - cursor);

    while gap > MIN_REST_GAP_BEATS {
        let symbol = DurationSymbol::from_beats(gap);
        let beats = symbol.beats();
        if beats <= 0.0 {
            // Zero-progress guard; unreachable with the current table but the
            // loop must terminate even for degenerate symbol sets.
            break;
        }
        rests.push(symbol);
        cursor += beats;
        gap = round_millibeats(gap - beats);
    }

    (rests, cursor)
}
