//! # Error Types
//!
//! This module defines all error types for the tabgen pipeline.
//!
//! The rendering pipeline itself never fails: unplayable pitches, over-stretched
//! chords, and degenerate rhythms all degrade into explicit marker values (empty
//! fingering sets, the stretch-10 fallback state, rests). The only hard failures
//! are construction-time configuration errors, raised before any track is
//! processed.
//!
//! ## Error Types
//! - `InvalidTuning` - a tuning was built with the wrong number of strings
//! - `UnknownTuning` - a preset id that doesn't exist
//! - `TuningFile` - a custom tuning file failed to parse or validate
//!
//! ## Usage
//! ```rust
//! use tabgen::{Tuning, TabError};
//!
//! match Tuning::from_preset("standart") {
//!     Ok(_) => println!("Found it"),
//!     Err(TabError::UnknownTuning(id)) => eprintln!("No such tuning: {}", id),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabError {
    /// A tuning was constructed with the wrong number of open strings.
    ///
    /// # Example
    /// ```
    /// # use tabgen::TabError;
    /// let err = TabError::InvalidTuning { expected: 6, actual: 4 };
    /// assert_eq!(err.to_string(), "Invalid tuning: expected 6 open-string pitches, got 4");
    /// ```
    #[error("Invalid tuning: expected {expected} open-string pitches, got {actual}")]
    InvalidTuning { expected: usize, actual: usize },

    /// A tuning preset id that isn't in the preset table.
    ///
    /// # Example
    /// ```
    /// # use tabgen::TabError;
    /// let err = TabError::UnknownTuning("open-c".to_string());
    /// assert_eq!(err.to_string(), "Unknown tuning preset: open-c");
    /// ```
    #[error("Unknown tuning preset: {0}")]
    UnknownTuning(String),

    /// A user-supplied tuning definition (YAML) failed to parse or validate.
    ///
    /// # Example
    /// ```
    /// # use tabgen::TabError;
    /// let err = TabError::TuningFile("missing field `notes`".to_string());
    /// assert_eq!(err.to_string(), "Invalid tuning definition: missing field `notes`");
    /// ```
    #[error("Invalid tuning definition: {0}")]
    TuningFile(String),
}
