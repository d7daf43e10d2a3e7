//! Pitch classes and their display names.
//!
//! A [`PitchClass`] is a semitone offset from Sa in `0..12`. All arithmetic
//! wraps modulo 12, so a value can never leave that range once constructed.
//! Display helpers map a pitch class to a Western note name (anchored at the
//! active tonic) or to a sargam syllable (relative to Sa).

use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Western note names in chromatic order starting from C.
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Sargam syllables indexed by semitones above Sa.
///
/// Lower case marks a komal (flattened) note, `^` marks tivra Ma.
pub const SARGAM: [&str; 12] = [
    "Sa", "re", "Re", "ga", "Ga", "Ma", "Ma^", "Pa", "dha", "Dha", "ni", "Ni",
];

/// Reference pitch for frequency conversion (A4).
const A4_HZ: f64 = 440.0;

/// MIDI note number of A4.
const A4_MIDI: i32 = 69;

/// MIDI note number of middle C (C4).
const MIDDLE_C: i32 = 60;

/// A pitch class: semitones above Sa, always in `0..12`.
///
/// Serialized as a bare integer. Deserializing rejects anything outside
/// `0..12`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PitchClass(u8);

impl PitchClass {
    /// Sa, the tonic.
    pub const SA: Self = Self(0);
    /// Shuddha Ma.
    pub const MA: Self = Self(5);
    /// Tivra Ma.
    pub const TIVRA_MA: Self = Self(6);
    /// Pa, the fifth.
    pub const PA: Self = Self(7);

    /// Build a pitch class from any integer, reducing it modulo 12.
    ///
    /// `12` (the octave Sa that closes an aroha) becomes `0`, and negative
    /// values wrap upward.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value.rem_euclid(12) as u8)
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_sa(self) -> bool {
        self.0 == 0
    }

    /// Shift by a number of semitones, wrapping around the octave.
    #[must_use]
    pub const fn transpose(self, semitones: i32) -> Self {
        Self::new(self.0 as i32 + semitones)
    }

    /// Ascending distance in semitones from `self` up to `other`.
    #[must_use]
    pub const fn interval_to(self, other: Self) -> u8 {
        Self::new(other.0 as i32 - self.0 as i32).0
    }

    /// Iterate over all twelve pitch classes in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..12).map(Self)
    }
}

impl From<u8> for PitchClass {
    fn from(value: u8) -> Self {
        Self::new(i32::from(value))
    }
}

impl<'de> Deserialize<'de> for PitchClass {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        if value < 12 {
            Ok(Self(value))
        } else {
            Err(de::Error::invalid_value(
                Unexpected::Unsigned(u64::from(value)),
                &"a pitch class in 0..12",
            ))
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Western note name of `pc` when Sa sounds at `tonic`.
#[must_use]
pub fn note_name(pc: PitchClass, tonic: PitchClass) -> &'static str {
    NOTE_NAMES[usize::from(pc.transpose(i32::from(tonic.value())).value())]
}

/// Sargam syllable of `pc` expressed relative to `tonic`.
#[must_use]
pub fn sargam(pc: PitchClass, tonic: PitchClass) -> &'static str {
    SARGAM[usize::from(tonic.interval_to(pc))]
}

/// Parse a note name such as `C`, `F#`, `Bb` or `eb` into a pitch class.
pub fn parse_note_name(name: &str) -> Result<PitchClass> {
    let trimmed = name.trim();
    let mut chars = trimmed.chars();

    let base = match chars.next().map(|c| c.to_ascii_uppercase()) {
        Some('C') => 0,
        Some('D') => 2,
        Some('E') => 4,
        Some('F') => 5,
        Some('G') => 7,
        Some('A') => 9,
        Some('B') => 11,
        _ => {
            return Err(Error::InvalidData(format!(
                "invalid note name '{}'",
                trimmed
            )))
        }
    };

    let accidental = match chars.as_str() {
        "" => 0,
        "#" | "♯" => 1,
        "b" | "♭" => -1,
        _ => {
            return Err(Error::InvalidData(format!(
                "invalid note name '{}'",
                trimmed
            )))
        }
    };

    Ok(PitchClass::new(base + accidental))
}

/// Frequency in Hz of `pc` above C in the given octave (A4 = 440 Hz).
#[must_use]
pub fn frequency(pc: PitchClass, octave: i32) -> f64 {
    // C0 is MIDI note 12.
    let midi = octave * 12 + i32::from(pc.value()) + 12;
    A4_HZ * 2f64.powf(f64::from(midi - A4_MIDI) / 12.0)
}

/// MIDI note number of `pc` when Sa sounds at `tonic` in the given octave.
///
/// Octave 4 places Sa between middle C and the B above it. Returns `None`
/// when the result falls outside the MIDI range `0..=127`.
#[must_use]
pub fn midi_note(pc: PitchClass, tonic: PitchClass, octave: i32) -> Option<u8> {
    let note = MIDDLE_C + (octave - 4) * 12 + i32::from(tonic.value()) + i32::from(pc.value());
    u8::try_from(note).ok().filter(|n| *n <= 127)
}
