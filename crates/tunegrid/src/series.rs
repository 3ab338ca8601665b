//! Harmonic (overtone) series generation and nearest-pitch classification.
//!
//! Given a fundamental [`Note`], a partial count, and a stretch factor, the
//! series builder computes each partial's raw frequency, locates the nearest
//! pitch on the 12-TET grid by a log-domain search, and reports the signed
//! deviation in cents. A stretch factor above 1.0 spaces higher partials
//! progressively sharper than pure integer multiples, modeling the
//! inharmonicity of real strings.

use std::f64::consts::LN_2;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::NoteError;
use crate::note::Note;
use crate::pitch::{self, PitchClass};

/// Deviations beyond a quarter-semitone get flagged as microtonal.
const MICROTONAL_THRESHOLD_CENTS: f64 = 25.0;

/// Marks a partial that sits more than a quarter-semitone off the grid.
///
/// The threshold is independent of the ±50-cent nearest-pitch boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MicrotonalFlag {
    /// Within a quarter-semitone of the nearest grid pitch.
    None,
    /// More than 25 cents sharp of the nearest grid pitch.
    Sharp,
    /// More than 25 cents flat of the nearest grid pitch.
    Flat,
}

impl MicrotonalFlag {
    /// Marker used in partial descriptions: `+`, `-`, or empty.
    pub fn symbol(self) -> &'static str {
        match self {
            MicrotonalFlag::None => "",
            MicrotonalFlag::Sharp => "+",
            MicrotonalFlag::Flat => "-",
        }
    }
}

fn classify_deviation(cents: f64) -> MicrotonalFlag {
    if cents > MICROTONAL_THRESHOLD_CENTS {
        MicrotonalFlag::Sharp
    } else if cents < -MICROTONAL_THRESHOLD_CENTS {
        MicrotonalFlag::Flat
    } else {
        MicrotonalFlag::None
    }
}

/// One partial of a harmonic series.
///
/// Always produced by [`HarmonicSeries::build`], never constructed directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Partial {
    /// 1-indexed position in the series (1 = the fundamental).
    pub number: usize,
    /// Raw (un-quantized) frequency in Hz.
    pub frequency: f64,
    /// The closest pitch on the 12-TET grid.
    pub nearest_note: Note,
    /// Signed deviation from `nearest_note` in cents, in (-50, 50].
    pub cents_detuned: f64,
    /// Set when `cents_detuned` exceeds a quarter-semitone either way.
    pub microtonal_flag: MicrotonalFlag,
}

impl fmt::Display for Partial {
    /// E.g. `(3) 784.9 ~ G5 + 2`; the cents term is omitted at zero.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cents_detuned > 0.0 {
            write!(
                f,
                "({}) {:.1} ~ {} + {:.0}",
                self.number, self.frequency, self.nearest_note, self.cents_detuned
            )
        } else if self.cents_detuned < 0.0 {
            write!(
                f,
                "({}) {:.1} ~ {} - {:.0}",
                self.number,
                self.frequency,
                self.nearest_note,
                self.cents_detuned.abs()
            )
        } else {
            write!(
                f,
                "({}) {:.1} ~ {}",
                self.number, self.frequency, self.nearest_note
            )
        }
    }
}

/// The harmonic series above a fundamental, classified against the grid.
///
/// Built eagerly and completely at construction; read-only afterward.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HarmonicSeries {
    fundamental: Note,
    number_of_partials: usize,
    partial_stretch: f64,
    partials: Vec<Partial>,
}

impl HarmonicSeries {
    /// Builds the series for `number_of_partials` partials above
    /// `fundamental`, with partial `i` at frequency
    /// `f0 * ((i - 1) * stretch + 1)`.
    ///
    /// At `stretch = 1.0` this is the classic integer-multiple harmonic
    /// series. Fails with [`NoteError::InvalidArgument`] if the partial count
    /// is zero or the stretch factor gives any partial a non-positive or
    /// non-finite frequency, or drives a partial below the bottom of the
    /// pitch grid.
    pub fn build(
        fundamental: Note,
        number_of_partials: usize,
        partial_stretch: f64,
    ) -> Result<Self, NoteError> {
        if number_of_partials < 1 {
            return Err(NoteError::InvalidArgument {
                message: "number of partials must be at least 1".to_string(),
            });
        }
        // The multiplier is monotonic in the partial number, so checking the
        // endpoints covers every partial. A NaN stretch fails the finiteness
        // check here.
        let last_multiplier = (number_of_partials as f64 - 1.0) * partial_stretch + 1.0;
        if !last_multiplier.is_finite() || last_multiplier <= 0.0 {
            return Err(NoteError::InvalidArgument {
                message: format!(
                    "partial stretch {partial_stretch} gives partial {number_of_partials} \
                     a non-positive frequency multiplier"
                ),
            });
        }

        // A finite multiplier can still overflow the frequency itself.
        let f0 = fundamental.frequency_hz();
        if !(f0 * last_multiplier).is_finite() {
            return Err(NoteError::InvalidArgument {
                message: format!(
                    "partial stretch {partial_stretch} overflows the frequency of partial \
                     {number_of_partials}"
                ),
            });
        }

        let partials = (1..=number_of_partials)
            .map(|number| classify_partial(f0, number, partial_stretch))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            fundamental,
            number_of_partials,
            partial_stretch,
            partials,
        })
    }

    /// The fundamental note the series was built on.
    pub fn fundamental(&self) -> Note {
        self.fundamental
    }

    /// How many partials the series holds.
    pub fn number_of_partials(&self) -> usize {
        self.number_of_partials
    }

    /// The stretch factor the series was built with.
    pub fn partial_stretch(&self) -> f64 {
        self.partial_stretch
    }

    /// All partials, ordered by partial number ascending.
    pub fn partials(&self) -> &[Partial] {
        &self.partials
    }

    /// The partial with 1-indexed number `number` (1 = the fundamental).
    pub fn partial(&self, number: usize) -> Result<Partial, NoteError> {
        if number < 1 || number > self.partials.len() {
            return Err(NoteError::PartialOutOfRange {
                index: number,
                count: self.partials.len(),
            });
        }
        Ok(self.partials[number - 1])
    }
}

impl fmt::Display for HarmonicSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = self
            .partials
            .iter()
            .map(Partial::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{} {} => {}", self.fundamental, self.number_of_partials, body)
    }
}

/// Locates the nearest grid pitch for one partial and measures the deviation.
///
/// The search works in the log domain, anchored at C0: first the octave band
/// containing the raw frequency, then the semitone step within the octave,
/// truncated toward the pitch below. Truncation lands the tentative deviation
/// in [0, 100) cents; past the 50-cent midpoint the next pitch class up is the
/// closer one, so the choice is bumped and the deviation re-signed into
/// (-50, 50].
fn classify_partial(f0: f64, number: usize, stretch: f64) -> Result<Partial, NoteError> {
    let ln_semitone = LN_2 / 12.0;
    let c0_hz = pitch::equal_tempered_frequency(pitch::midi_to_keyboard(pitch::MIDI_MIN));

    let multiplier = (number as f64 - 1.0) * stretch + 1.0;
    let frequency = f0 * multiplier;

    // Octave band bounded below by its C.
    let mut octave = ((frequency / c0_hz).ln() / LN_2).floor() as i32;
    let octave_start_hz = c0_hz * 2.0_f64.powi(octave);

    // Semitone steps above the octave's C.
    let mut pitch_class = ((frequency / octave_start_hz).ln() / ln_semitone).floor() as i32;
    if pitch_class == 12 {
        // Floating-point edge case exactly at the octave boundary.
        pitch_class = 0;
        octave += 1;
    } else if pitch_class == -1 {
        // Same edge case from below, when the octave search lands one high.
        pitch_class = 11;
        octave -= 1;
    }

    let grid_hz = c0_hz * 2.0_f64.powi(octave) * 2.0_f64.powf(f64::from(pitch_class) / 12.0);
    let mut cents = (1200.0 * (frequency / grid_hz).log2()).round();

    if cents > 50.0 {
        pitch_class += 1;
        if pitch_class == 12 {
            pitch_class = 0;
            octave += 1;
        }
        cents -= 100.0;
    }

    let midi = pitch::pitch_class_and_octave_to_midi(PitchClass::ALL[pitch_class as usize], octave);
    let nearest_note = Note::from_midi(midi).map_err(|_| NoteError::InvalidArgument {
        message: format!("partial {number} at {frequency} Hz resolves below the pitch grid"),
    })?;

    Ok(Partial {
        number,
        frequency,
        nearest_note,
        cents_detuned: cents,
        microtonal_flag: classify_deviation(cents),
    })
}
