//! Pure conversions among pitch numbering schemes and 12-TET frequency.
//!
//! Three equivalent numbering schemes identify a pitch on the equal-tempered
//! grid:
//!
//! - **MIDI note number**: 21 (A0, lowest piano key) through 108 (C8)
//! - **Keyboard number**: 1-indexed piano key position, 1 through 88
//! - **Pitch class + octave**: e.g. ("C", 4) for middle C
//!
//! The conversion formulas are plain affine maps and remain valid outside the
//! 88-key piano span; the grid supported by [`crate::Note`] extends from C0
//! (MIDI 12) upward without an upper bound, so that harmonic-series lookups
//! above the keyboard stay representable.

use serde::{Deserialize, Serialize};

use crate::error::NoteError;

/// MIDI number of C0, the bottom of the supported grid.
pub const MIDI_MIN: i32 = 12;
/// MIDI number of the lowest piano key (A0).
pub const MIDI_PIANO_LOW: i32 = 21;
/// MIDI number of the highest piano key (C8).
pub const MIDI_PIANO_HIGH: i32 = 108;
/// Keyboard number of the A4 reference pitch.
pub const REFERENCE_KEYBOARD_NUMBER: i32 = 49;
/// Frequency of the A4 reference pitch in Hz.
pub const REFERENCE_FREQUENCY_HZ: f64 = 440.0;

/// One of the twelve pitch classes of the equal-tempered octave.
///
/// Enharmonic spellings (C# vs Db) map to the same pitch class. The canonical
/// output spelling for a black key is the dual form (e.g. `"C#/Db"`), with
/// [`PitchClass::short_name`] exposing only the sharp spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitchClass {
    /// C.
    C,
    /// C# / Db.
    CSharp,
    /// D.
    D,
    /// D# / Eb.
    DSharp,
    /// E.
    E,
    /// F.
    F,
    /// F# / Gb.
    FSharp,
    /// G.
    G,
    /// G# / Ab.
    GSharp,
    /// A.
    A,
    /// A# / Bb.
    ASharp,
    /// B.
    B,
}

impl PitchClass {
    /// All twelve pitch classes in offset order (C = 0 .. B = 11).
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    /// Parses a note-name spelling, accepting both enharmonic forms.
    ///
    /// Recognized spellings are the 7 naturals (`"C"`, `"D"`, ... `"B"`),
    /// the 5 sharps (`"C#"`, `"D#"`, `"F#"`, `"G#"`, `"A#"`), and the 5 flats
    /// (`"Db"`, `"Eb"`, `"Gb"`, `"Ab"`, `"Bb"`).
    pub fn from_name(name: &str) -> Result<Self, NoteError> {
        match name {
            "C" => Ok(PitchClass::C),
            "C#" | "Db" => Ok(PitchClass::CSharp),
            "D" => Ok(PitchClass::D),
            "D#" | "Eb" => Ok(PitchClass::DSharp),
            "E" => Ok(PitchClass::E),
            "F" => Ok(PitchClass::F),
            "F#" | "Gb" => Ok(PitchClass::FSharp),
            "G" => Ok(PitchClass::G),
            "G#" | "Ab" => Ok(PitchClass::GSharp),
            "A" => Ok(PitchClass::A),
            "A#" | "Bb" => Ok(PitchClass::ASharp),
            "B" => Ok(PitchClass::B),
            _ => Err(NoteError::UnknownPitchClass {
                name: name.to_string(),
            }),
        }
    }

    /// Looks up a pitch class by its semitone offset from C (0..=11).
    pub fn from_offset(offset: i32) -> Option<Self> {
        usize::try_from(offset)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// Semitone offset from C, 0 through 11.
    pub fn offset(self) -> i32 {
        self as i32
    }

    /// Canonical long-form spelling; black keys carry both enharmonic names.
    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::CSharp => "C#/Db",
            PitchClass::D => "D",
            PitchClass::DSharp => "D#/Eb",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::FSharp => "F#/Gb",
            PitchClass::G => "G",
            PitchClass::GSharp => "G#/Ab",
            PitchClass::A => "A",
            PitchClass::ASharp => "A#/Bb",
            PitchClass::B => "B",
        }
    }

    /// Short spelling; black keys use the sharp form only.
    pub fn short_name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::CSharp => "C#",
            PitchClass::D => "D",
            PitchClass::DSharp => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::FSharp => "F#",
            PitchClass::G => "G",
            PitchClass::GSharp => "G#",
            PitchClass::A => "A",
            PitchClass::ASharp => "A#",
            PitchClass::B => "B",
        }
    }
}

impl std::fmt::Display for PitchClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Converts a (pitch class, octave) pair to a MIDI note number.
///
/// C4 maps to 60, A4 to 69, C8 to 108.
pub fn pitch_class_and_octave_to_midi(pitch_class: PitchClass, octave: i32) -> i32 {
    octave * 12 + 12 + pitch_class.offset()
}

/// Converts a MIDI note number to a keyboard number (21 -> 1, 108 -> 88).
pub fn midi_to_keyboard(midi: i32) -> i32 {
    midi - 20
}

/// Converts a keyboard number to a MIDI note number (1 -> 21, 88 -> 108).
pub fn keyboard_to_midi(keyboard: i32) -> i32 {
    keyboard + 20
}

/// Splits a MIDI note number into (octave, semitone offset from C).
///
/// Uses floor division and Euclidean modulo, so the offset is always in
/// 0..=11 for any integer input.
pub fn midi_to_octave_and_offset(midi: i32) -> (i32, i32) {
    (midi.div_euclid(12) - 1, midi.rem_euclid(12))
}

/// Equal-tempered frequency in Hz for a keyboard number.
///
/// `440.0 * 2^((keyboard - 49) / 12)`, anchored at A4 = keyboard 49 = 440 Hz.
/// This is the single source of truth for frequency in the crate. The formula
/// is valid for any integer, including keyboard numbers outside 1..=88.
pub fn equal_tempered_frequency(keyboard: i32) -> f64 {
    REFERENCE_FREQUENCY_HZ
        * 2.0_f64.powf(f64::from(keyboard - REFERENCE_KEYBOARD_NUMBER) / 12.0)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() < tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_pitch_class_spellings() {
        assert_eq!(PitchClass::from_name("C").unwrap(), PitchClass::C);
        assert_eq!(PitchClass::from_name("C#").unwrap(), PitchClass::CSharp);
        assert_eq!(PitchClass::from_name("Db").unwrap(), PitchClass::CSharp);
        assert_eq!(PitchClass::from_name("D#").unwrap(), PitchClass::DSharp);
        assert_eq!(PitchClass::from_name("Eb").unwrap(), PitchClass::DSharp);
        assert_eq!(PitchClass::from_name("F#").unwrap(), PitchClass::FSharp);
        assert_eq!(PitchClass::from_name("Gb").unwrap(), PitchClass::FSharp);
        assert_eq!(PitchClass::from_name("G#").unwrap(), PitchClass::GSharp);
        assert_eq!(PitchClass::from_name("Ab").unwrap(), PitchClass::GSharp);
        assert_eq!(PitchClass::from_name("A#").unwrap(), PitchClass::ASharp);
        assert_eq!(PitchClass::from_name("Bb").unwrap(), PitchClass::ASharp);
        assert_eq!(PitchClass::from_name("B").unwrap(), PitchClass::B);
    }

    #[test]
    fn test_unknown_pitch_class() {
        for bad in ["H", "c", "C♯", "Cb", ""] {
            let err = PitchClass::from_name(bad).unwrap_err();
            assert_eq!(
                err,
                NoteError::UnknownPitchClass {
                    name: bad.to_string()
                }
            );
        }
    }

    #[test]
    fn test_offsets_round_trip() {
        for (i, pc) in PitchClass::ALL.iter().enumerate() {
            assert_eq!(pc.offset(), i as i32);
            assert_eq!(PitchClass::from_offset(i as i32), Some(*pc));
        }
        assert_eq!(PitchClass::from_offset(-1), None);
        assert_eq!(PitchClass::from_offset(12), None);
    }

    #[test]
    fn test_canonical_names() {
        assert_eq!(PitchClass::CSharp.name(), "C#/Db");
        assert_eq!(PitchClass::CSharp.short_name(), "C#");
        assert_eq!(PitchClass::ASharp.name(), "A#/Bb");
        assert_eq!(PitchClass::G.name(), "G");
        assert_eq!(PitchClass::G.short_name(), "G");
    }

    #[test]
    fn test_pitch_class_and_octave_to_midi() {
        assert_eq!(
            pitch_class_and_octave_to_midi(PitchClass::A, 4),
            69
        );
        assert_eq!(
            pitch_class_and_octave_to_midi(PitchClass::A, 0),
            21
        );
        assert_eq!(
            pitch_class_and_octave_to_midi(PitchClass::C, 8),
            108
        );
        assert_eq!(
            pitch_class_and_octave_to_midi(PitchClass::B, 5),
            83
        );
        assert_eq!(
            pitch_class_and_octave_to_midi(PitchClass::GSharp, 3),
            56
        );
        assert_eq!(
            pitch_class_and_octave_to_midi(PitchClass::FSharp, 5),
            78
        );
    }

    #[test]
    fn test_midi_keyboard_round_trip() {
        assert_eq!(midi_to_keyboard(21), 1);
        assert_eq!(midi_to_keyboard(108), 88);
        assert_eq!(keyboard_to_midi(1), 21);
        assert_eq!(keyboard_to_midi(88), 108);

        for midi in MIDI_PIANO_LOW..=MIDI_PIANO_HIGH {
            assert_eq!(keyboard_to_midi(midi_to_keyboard(midi)), midi);
        }
    }

    #[test]
    fn test_midi_to_octave_and_offset() {
        assert_eq!(midi_to_octave_and_offset(60), (4, 0));
        assert_eq!(midi_to_octave_and_offset(21), (0, 9));
        assert_eq!(midi_to_octave_and_offset(108), (8, 0));
        assert_eq!(midi_to_octave_and_offset(86), (6, 2));
        assert_eq!(midi_to_octave_and_offset(12), (0, 0));
        // Euclidean modulo keeps the offset non-negative below the grid too.
        assert_eq!(midi_to_octave_and_offset(-1), (-2, 11));
    }

    #[test]
    fn test_reference_pitch() {
        assert_close(equal_tempered_frequency(49), 440.0, 1e-9);
    }

    #[test]
    fn test_known_frequencies() {
        // Fixture values from the standard 12-TET table.
        assert_close(equal_tempered_frequency(40), 261.63, 0.1); // C4
        assert_close(equal_tempered_frequency(47), 392.00, 0.1); // G4
        assert_close(equal_tempered_frequency(18), 146.83, 0.1); // D3
        assert_close(equal_tempered_frequency(99), 7902.13, 0.1); // B8
        assert_close(equal_tempered_frequency(-8), 16.35, 0.1); // C0
    }

    #[test]
    fn test_octave_doubling_law() {
        for k in 1..=76 {
            let low = equal_tempered_frequency(k);
            let high = equal_tempered_frequency(k + 12);
            assert_close(high, 2.0 * low, 1e-6 * low);
        }
    }

    #[test]
    fn test_strictly_increasing() {
        let mut prev = equal_tempered_frequency(0);
        for k in 1..=100 {
            let next = equal_tempered_frequency(k);
            assert!(next > prev, "frequency must grow with keyboard number");
            prev = next;
        }
    }
}
