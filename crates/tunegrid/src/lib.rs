//! Musical pitch conversion and harmonic-series analysis on the 12-TET grid.
//!
//! This crate converts among the equivalent representations of a musical
//! pitch — MIDI note number, 1-indexed keyboard number, pitch class plus
//! octave, and equal-tempered frequency — and computes the harmonic
//! (overtone) series above a fundamental, classifying each partial against
//! the nearest equal-tempered pitch with a signed deviation in cents.
//!
//! The whole crate is a pure, stateless numeric model: every operation is a
//! deterministic function of its inputs, with no I/O and no shared mutable
//! state.
//!
//! # Example
//!
//! ```
//! use tunegrid::{HarmonicSeries, MicrotonalFlag, Note};
//!
//! let c4 = Note::from_pitch_class_and_octave("C", 4)?;
//! let series = HarmonicSeries::build(c4, 16, 1.0)?;
//!
//! // The 3rd partial of C4 sits 2 cents sharp of G5.
//! let third = series.partial(3)?;
//! assert_eq!(third.nearest_note, Note::from_pitch_class_and_octave("G", 5)?);
//! assert_eq!(third.cents_detuned, 2.0);
//!
//! // The 14th partial is far enough off the grid to be flagged.
//! let fourteenth = series.partial(14)?;
//! assert_eq!(fourteenth.microtonal_flag, MicrotonalFlag::Flat);
//! # Ok::<(), tunegrid::NoteError>(())
//! ```
//!
//! # Modules
//!
//! - [`pitch`]: pure conversions among the numbering schemes and frequency
//! - [`note`]: the immutable [`Note`] value type
//! - [`series`]: the [`HarmonicSeries`] builder and [`Partial`] classification
//! - [`error`]: the [`NoteError`] type shared by all fallible operations

pub mod error;
pub mod note;
pub mod pitch;
pub mod series;

// Re-export commonly used types at the crate root
pub use error::NoteError;
pub use note::Note;
pub use pitch::PitchClass;
pub use series::{HarmonicSeries, MicrotonalFlag, Partial};
