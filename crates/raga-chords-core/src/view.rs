//! Presentation helpers over generated chords.
//!
//! None of these change what the engine considers valid. They filter, reorder
//! or cap an already generated list for display.

use crate::chord::GeneratedChord;
use crate::error::Result;
use crate::pitch::PitchClass;
use crate::scale::Scale;
use crate::template::ChordTag;

/// Roman numerals for the first seven scale degrees.
const DEGREES: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];

/// Hide color and/or fusion chords.
#[must_use]
pub fn filter_chords(
    chords: &[GeneratedChord],
    show_color: bool,
    show_fusion: bool,
) -> Vec<GeneratedChord> {
    chords
        .iter()
        .filter(|c| show_color || !c.template.tags.contains(ChordTag::Color))
        .filter(|c| show_fusion || !c.template.tags.contains(ChordTag::Fusion))
        .cloned()
        .collect()
}

/// Chords carrying `tag`, in their current order.
#[must_use]
pub fn with_tag(chords: &[GeneratedChord], tag: ChordTag) -> Vec<GeneratedChord> {
    chords.iter().filter(|c| c.has_tag(tag)).cloned().collect()
}

/// Reorder chords chromatically by root, starting from Sa.
///
/// The sort is stable, so chords sharing a root keep their score order.
pub fn sort_by_root(chords: &mut [GeneratedChord]) {
    chords.sort_by_key(|c| c.root);
}

/// Chords that contain `pc`, in their current order.
pub fn containing(chords: &[GeneratedChord], pc: PitchClass) -> impl Iterator<Item = &GeneratedChord> {
    chords.iter().filter(move |c| c.contains(pc))
}

/// Cap the list at `max` chords. `None` keeps everything.
pub fn limit(chords: &mut Vec<GeneratedChord>, max: Option<usize>) {
    if let Some(max) = max {
        chords.truncate(max);
    }
}

/// Roman-numeral degree of `pc` within `scale`, or an empty string when the
/// note is not in the scale or lies beyond the seventh degree.
#[must_use]
pub fn scale_degree(pc: PitchClass, scale: Scale) -> &'static str {
    scale
        .position(pc)
        .and_then(|i| DEGREES.get(i).copied())
        .unwrap_or("")
}

/// Serialize chords as pretty-printed JSON.
pub fn to_json(chords: &[GeneratedChord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(chords)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::ChordRequest;
    use crate::raga::{Drone, Raga, Tradition};
    use crate::template::TemplateCatalog;

    fn bilawal_chords(fusion: bool) -> Vec<GeneratedChord> {
        let raga = Raga::new("bilawal", "Bilawal", Tradition::Hindustani)
            .with_aroha(&[0, 2, 4, 5, 7, 9, 11, 12])
            .with_avaroha(&[12, 11, 9, 7, 5, 4, 2, 0])
            .with_vadi(9, 2)
            .with_drone(Drone::SaPa);
        ChordRequest::new(&raga)
            .with_fusion_mode(fusion)
            .generate(&TemplateCatalog::standard())
    }

    #[test]
    fn test_filter_hides_color() {
        let chords = bilawal_chords(true);
        let filtered = filter_chords(&chords, false, true);
        assert!(!filtered.is_empty());
        assert!(filtered.iter().all(|c| !c.template.is_color()));
        // maj7 is tagged color as well as fusion.
        assert!(filtered.iter().all(|c| c.suffix() != "maj7"));
        assert!(filtered.iter().any(|c| c.suffix() == "7"));
    }

    #[test]
    fn test_filter_hides_fusion() {
        let chords = bilawal_chords(true);
        let filtered = filter_chords(&chords, true, false);
        assert!(filtered.iter().all(|c| !c.template.is_fusion()));
        assert!(filtered.iter().any(|c| c.suffix() == "sus2"));
    }

    #[test]
    fn test_filter_show_all_is_identity() {
        let chords = bilawal_chords(true);
        assert_eq!(filter_chords(&chords, true, true), chords);
    }

    #[test]
    fn test_with_tag() {
        let chords = bilawal_chords(true);

        let strong = with_tag(&chords, ChordTag::Strong);
        assert!(!strong.is_empty());
        assert!(strong.iter().all(|c| c.contains(PitchClass::SA)));
        assert!(strong.windows(2).all(|w| w[0].score >= w[1].score));

        let drone = with_tag(&chords, ChordTag::Drone);
        assert!(drone
            .iter()
            .all(|c| c.contains(PitchClass::SA) || c.contains(PitchClass::PA)));
        assert!(drone.len() < chords.len());

        let fusion = with_tag(&chords, ChordTag::Fusion);
        assert!(fusion.iter().all(|c| c.template.is_fusion()));
        assert!(with_tag(&bilawal_chords(false), ChordTag::Fusion).is_empty());
    }

    #[test]
    fn test_sort_by_root() {
        let mut chords = bilawal_chords(false);
        sort_by_root(&mut chords);
        assert!(chords.windows(2).all(|w| w[0].root <= w[1].root));
        assert_eq!(chords[0].root, PitchClass::SA);
    }

    #[test]
    fn test_containing() {
        let chords = bilawal_chords(false);
        let with_ni: Vec<_> = containing(&chords, PitchClass::new(11)).collect();
        assert!(!with_ni.is_empty());
        assert!(with_ni.iter().all(|c| c.contains(PitchClass::new(11))));
        assert_eq!(containing(&chords, PitchClass::new(1)).count(), 0);
    }

    #[test]
    fn test_limit() {
        let mut chords = bilawal_chords(false);
        let total = chords.len();
        limit(&mut chords, None);
        assert_eq!(chords.len(), total);
        limit(&mut chords, Some(18));
        assert_eq!(chords.len(), 18.min(total));
        limit(&mut chords, Some(0));
        assert!(chords.is_empty());
    }

    #[test]
    fn test_scale_degree() {
        let scale = Scale::resolve(&[0, 2, 4, 5, 7, 9, 11], &[]);
        assert_eq!(scale_degree(PitchClass::SA, scale), "I");
        assert_eq!(scale_degree(PitchClass::PA, scale), "V");
        assert_eq!(scale_degree(PitchClass::new(11), scale), "VII");
        assert_eq!(scale_degree(PitchClass::new(1), scale), "");

        let khamaj = Scale::resolve(&[0, 2, 4, 5, 7, 9, 10, 11], &[]);
        assert_eq!(scale_degree(PitchClass::new(11), khamaj), "");
    }

    #[test]
    fn test_to_json() {
        let chords: Vec<_> = bilawal_chords(false)
            .into_iter()
            .filter(|c| c.name == "C")
            .collect();
        let json = to_json(&chords).unwrap();
        assert!(json.contains("\"name\": \"C\""));
        assert!(json.contains("\"score\""));
    }
}
