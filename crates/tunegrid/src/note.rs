//! The [`Note`] value type: one point on the equal-tempered pitch grid.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::NoteError;
use crate::pitch::{self, PitchClass};

/// An immutable pitch on the extended 12-TET grid.
///
/// A `Note` stores only its MIDI note number; the keyboard number, octave,
/// pitch class, and frequency are all derived from it on access, which makes
/// the mutual consistency of the representations structural. Two notes are
/// equal iff their MIDI numbers are equal.
///
/// The supported grid starts at C0 (MIDI 12) and extends upward without
/// bound, so nearest-note lookups for high partials stay representable even
/// above the 88-key piano span (21..=108). Constructors reject anything
/// below C0 with [`NoteError::OutOfRange`].
///
/// Serialized form is the bare MIDI number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub struct Note {
    midi: i32,
}

impl Note {
    /// Creates a note from a MIDI note number (21 = A0, 60 = C4, 108 = C8).
    pub fn from_midi(midi: i32) -> Result<Self, NoteError> {
        if midi < pitch::MIDI_MIN {
            return Err(NoteError::OutOfRange {
                what: "midi note number",
                value: i64::from(midi),
                min: i64::from(pitch::MIDI_MIN),
            });
        }
        Ok(Self { midi })
    }

    /// Creates a note from a keyboard number (1 = A0, 40 = C4, 88 = C8).
    pub fn from_keyboard_number(keyboard: i32) -> Result<Self, NoteError> {
        let min = pitch::midi_to_keyboard(pitch::MIDI_MIN);
        if keyboard < min {
            return Err(NoteError::OutOfRange {
                what: "keyboard number",
                value: i64::from(keyboard),
                min: i64::from(min),
            });
        }
        Ok(Self {
            midi: pitch::keyboard_to_midi(keyboard),
        })
    }

    /// Creates a note from a note-name spelling and an octave, e.g.
    /// `("C", 4)` for middle C or `("Bb", 3)`.
    ///
    /// Both enharmonic spellings of the black keys are accepted.
    pub fn from_pitch_class_and_octave(name: &str, octave: i32) -> Result<Self, NoteError> {
        let pitch_class = PitchClass::from_name(name)?;
        Self::from_midi(pitch::pitch_class_and_octave_to_midi(pitch_class, octave))
    }

    /// The MIDI note number.
    pub fn midi_note_number(&self) -> i32 {
        self.midi
    }

    /// The keyboard number (`midi - 20`).
    pub fn keyboard_number(&self) -> i32 {
        pitch::midi_to_keyboard(self.midi)
    }

    /// The octave, where C4 is in octave 4.
    pub fn octave(&self) -> i32 {
        pitch::midi_to_octave_and_offset(self.midi).0
    }

    /// Semitone offset from the octave's C, 0 through 11.
    pub fn pitch_class_offset(&self) -> i32 {
        pitch::midi_to_octave_and_offset(self.midi).1
    }

    /// The pitch class.
    pub fn pitch_class(&self) -> PitchClass {
        // rem_euclid keeps the offset in 0..12, so the index is in range.
        PitchClass::ALL[self.pitch_class_offset() as usize]
    }

    /// Equal-tempered frequency in Hz.
    pub fn frequency_hz(&self) -> f64 {
        pitch::equal_tempered_frequency(self.keyboard_number())
    }

    /// The note one semitone higher.
    pub fn one_semitone_up(&self) -> Result<Self, NoteError> {
        Self::from_midi(self.midi + 1)
    }

    /// The note one semitone lower.
    ///
    /// Fails with [`NoteError::OutOfRange`] at the bottom of the grid (C0).
    pub fn one_semitone_down(&self) -> Result<Self, NoteError> {
        Self::from_midi(self.midi - 1)
    }
}

impl fmt::Display for Note {
    /// Canonical spelling plus octave, e.g. `C4` or `C#/Db4`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch_class().name(), self.octave())
    }
}

impl From<Note> for i32 {
    fn from(note: Note) -> Self {
        note.midi
    }
}

impl TryFrom<i32> for Note {
    type Error = NoteError;

    fn try_from(midi: i32) -> Result<Self, Self::Error> {
        Self::from_midi(midi)
    }
}
