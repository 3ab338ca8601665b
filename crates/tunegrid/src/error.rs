//! Error types for pitch conversion and harmonic-series construction.

use thiserror::Error;

/// Errors produced by pitch conversion and harmonic-series construction.
///
/// Every error is reported at the point of detection; there is no retry or
/// default-value fallback. Each failed call is independently retriable by the
/// caller with corrected input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoteError {
    /// A MIDI or keyboard number below the bottom of the supported grid.
    #[error("{what} {value} is below the supported grid (minimum {min})")]
    OutOfRange {
        /// Which numbering scheme the value came from.
        what: &'static str,
        /// The rejected value.
        value: i64,
        /// The lowest supported value for that scheme.
        min: i64,
    },

    /// A note-name spelling that is not one of the recognized forms.
    #[error("unknown pitch class '{name}'")]
    UnknownPitchClass {
        /// The unrecognized spelling.
        name: String,
    },

    /// An argument that would make a harmonic series degenerate.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the argument.
        message: String,
    },

    /// A 1-indexed partial lookup outside the series.
    #[error("partial index {index} out of range (series has {count} partials)")]
    PartialOutOfRange {
        /// The requested 1-indexed partial number.
        index: usize,
        /// How many partials the series holds.
        count: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NoteError::OutOfRange {
            what: "midi note number",
            value: 4,
            min: 12,
        };
        assert_eq!(
            err.to_string(),
            "midi note number 4 is below the supported grid (minimum 12)"
        );

        let err = NoteError::UnknownPitchClass {
            name: "H".to_string(),
        };
        assert_eq!(err.to_string(), "unknown pitch class 'H'");

        let err = NoteError::PartialOutOfRange {
            index: 17,
            count: 16,
        };
        assert_eq!(
            err.to_string(),
            "partial index 17 out of range (series has 16 partials)"
        );
    }
}
