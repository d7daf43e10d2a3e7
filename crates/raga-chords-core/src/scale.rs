//! Scale resolution.
//!
//! A raga's usable pitch content is the union of its aroha and avaroha,
//! reduced modulo 12. Vakra ragas may use notes in one direction only, so
//! both sequences contribute. Repeats and the closing octave Sa collapse
//! away.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::pitch::PitchClass;

/// A set of pitch classes, stored as a 12-bit mask.
///
/// Iteration is always in ascending numeric order, which keeps chord
/// generation deterministic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<PitchClass>", into = "Vec<PitchClass>")]
pub struct Scale(u16);

impl Scale {
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Resolve the usable pitch classes of a raga from its note sequences.
    ///
    /// Values are reduced modulo 12, so an octave Sa written as `12` is the
    /// same note as `0`.
    #[must_use]
    pub fn resolve(aroha: &[u8], avaroha: &[u8]) -> Self {
        aroha
            .iter()
            .chain(avaroha)
            .map(|&pc| PitchClass::from(pc))
            .collect()
    }

    #[must_use]
    pub const fn with(self, pc: PitchClass) -> Self {
        Self(self.0 | (1 << pc.value()))
    }

    #[must_use]
    pub const fn contains(self, pc: PitchClass) -> bool {
        self.0 & (1 << pc.value()) != 0
    }

    /// True when every pitch class in `notes` belongs to the scale.
    pub fn contains_all<'a>(self, notes: impl IntoIterator<Item = &'a PitchClass>) -> bool {
        notes.into_iter().all(|&pc| self.contains(pc))
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Pitch classes in ascending order.
    pub fn iter(self) -> impl Iterator<Item = PitchClass> {
        PitchClass::all().filter(move |&pc| self.contains(pc))
    }

    /// Position of `pc` in the ascending scale, if present.
    #[must_use]
    pub fn position(self, pc: PitchClass) -> Option<usize> {
        self.iter().position(|p| p == pc)
    }
}

impl FromIterator<PitchClass> for Scale {
    fn from_iter<I: IntoIterator<Item = PitchClass>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

impl From<Vec<PitchClass>> for Scale {
    fn from(pcs: Vec<PitchClass>) -> Self {
        pcs.into_iter().collect()
    }
}

impl From<Scale> for Vec<PitchClass> {
    fn from(scale: Scale) -> Self {
        scale.iter().collect()
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = self.iter().map(|pc| pc.to_string()).collect();
        write!(f, "[{}]", values.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pcs(scale: Scale) -> Vec<u8> {
        scale.iter().map(PitchClass::value).collect()
    }

    #[test]
    fn test_resolve_major_scale() {
        let scale = Scale::resolve(&[0, 2, 4, 5, 7, 9, 11, 12], &[12, 11, 9, 7, 5, 4, 2, 0]);
        assert_eq!(pcs(scale), vec![0, 2, 4, 5, 7, 9, 11]);
        assert_eq!(scale.len(), 7);
    }

    #[test]
    fn test_resolve_unions_vakra_sequences() {
        // Khamaj: shuddha Ni ascending, komal Ni descending.
        let scale = Scale::resolve(&[0, 2, 4, 5, 7, 9, 11, 12], &[12, 10, 9, 7, 5, 4, 2, 0]);
        assert!(scale.contains(PitchClass::new(10)));
        assert!(scale.contains(PitchClass::new(11)));
        assert_eq!(scale.len(), 8);
    }

    #[test]
    fn test_resolve_deduplicates_repeats() {
        let scale = Scale::resolve(&[0, 2, 2, 4, 2, 0], &[]);
        assert_eq!(pcs(scale), vec![0, 2, 4]);
    }

    #[test]
    fn test_resolve_empty() {
        let scale = Scale::resolve(&[], &[]);
        assert!(scale.is_empty());
        assert_eq!(scale.iter().count(), 0);
    }

    #[test]
    fn test_contains_all() {
        let scale = Scale::resolve(&[0, 4, 7], &[]);
        assert!(scale.contains_all(&[PitchClass::SA, PitchClass::PA]));
        assert!(!scale.contains_all(&[PitchClass::SA, PitchClass::MA]));
    }

    #[test]
    fn test_position() {
        let scale = Scale::resolve(&[0, 2, 4, 7, 9], &[]);
        assert_eq!(scale.position(PitchClass::PA), Some(3));
        assert_eq!(scale.position(PitchClass::MA), None);
    }

    #[test]
    fn test_display() {
        let scale = Scale::resolve(&[7, 0, 4], &[]);
        assert_eq!(scale.to_string(), "[0, 4, 7]");
    }

    #[test]
    fn test_deserialize() {
        let scale: Scale = serde_json::from_str("[7, 0, 4]").unwrap();
        assert_eq!(pcs(scale), vec![0, 4, 7]);
        assert!(serde_json::from_str::<Scale>("[16]").is_err());
        assert!(serde_json::from_str::<Scale>("[0, 12]").is_err());
    }
}
