//! Chord synthesis and ranking.
//!
//! For every root in a raga's scale and every template in the catalog, the
//! engine voices the template on that root and keeps it only when all of its
//! notes lie inside the scale. Accepted chords are scored against the raga's
//! vadi, samvadi and drone, tagged, and stably sorted by descending score, so
//! chords with equal scores stay in root-major, catalog-minor order.
//!
//! Generation is a pure function of a [`ChordRequest`]. Callers re-run it in
//! full whenever the raga, tonic or options change.

use serde::{Deserialize, Serialize};

use crate::pitch::{note_name, PitchClass};
use crate::raga::{Drone, Raga};
use crate::scale::Scale;
use crate::template::{ChordTag, ChordTemplate, TagSet, TemplateCatalog};

/// Score every chord starts from.
const BASE_SCORE: i32 = 1;
/// Bonus for containing Sa.
const SA_BONUS: i32 = 2;
/// Penalty for lacking Sa.
const NO_SA_PENALTY: i32 = -1;
/// Bonus for each of vadi and samvadi, and again for containing both.
const EMPHASIS_BONUS: i32 = 1;
/// Bonus for blending with the drone.
const DRONE_BONUS: i32 = 1;

/// An immutable snapshot of everything chord generation depends on.
#[derive(Debug, Clone, Copy)]
pub struct ChordRequest<'a> {
    /// The selected raga. `None` produces no chords.
    pub raga: Option<&'a Raga>,

    /// The pitch Sa sounds at. Affects names only.
    pub tonic: PitchClass,

    /// Include templates tagged [`ChordTag::Fusion`].
    pub fusion_mode: bool,

    /// Keep only chords containing Sa.
    pub must_include_sa: bool,
}

impl<'a> ChordRequest<'a> {
    #[must_use]
    pub fn new(raga: &'a Raga) -> Self {
        Self {
            raga: Some(raga),
            tonic: PitchClass::SA,
            fusion_mode: false,
            must_include_sa: false,
        }
    }

    /// A request with no raga selected.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            raga: None,
            tonic: PitchClass::SA,
            fusion_mode: false,
            must_include_sa: false,
        }
    }

    #[must_use]
    pub fn with_tonic(mut self, tonic: PitchClass) -> Self {
        self.tonic = tonic;
        self
    }

    #[must_use]
    pub fn with_fusion_mode(mut self, fusion_mode: bool) -> Self {
        self.fusion_mode = fusion_mode;
        self
    }

    #[must_use]
    pub fn with_must_include_sa(mut self, must_include_sa: bool) -> Self {
        self.must_include_sa = must_include_sa;
        self
    }

    /// Run the engine against `catalog`.
    #[must_use]
    pub fn generate(&self, catalog: &TemplateCatalog) -> Vec<GeneratedChord> {
        generate(self, catalog)
    }
}

/// A chord that fits wholly inside a raga.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedChord {
    /// Root, relative to Sa.
    pub root: PitchClass,

    /// The template this chord instantiates.
    pub template: ChordTemplate,

    /// Chord tones relative to Sa, in template order.
    pub notes: Vec<PitchClass>,

    /// Display name at the requested tonic, e.g. `Dm` or `Gsus4`.
    pub name: String,

    /// Priority; higher sorts first.
    pub score: i32,

    /// Template tags plus the derived `strong` and `drone` tags.
    pub tags: TagSet,
}

impl GeneratedChord {
    /// The template suffix (`m`, `sus2`, ...). Empty for a major triad.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.template.name
    }

    /// Re-derive the display name for a different tonic.
    #[must_use]
    pub fn display_name(&self, tonic: PitchClass) -> String {
        chord_name(self.root, &self.template, tonic)
    }

    #[must_use]
    pub fn contains(&self, pc: PitchClass) -> bool {
        self.notes.contains(&pc)
    }

    #[must_use]
    pub fn has_tag(&self, tag: ChordTag) -> bool {
        self.tags.contains(tag)
    }
}

/// Generate, score, tag and sort every chord the request's raga supports.
#[must_use]
pub fn generate(request: &ChordRequest<'_>, catalog: &TemplateCatalog) -> Vec<GeneratedChord> {
    let Some(raga) = request.raga else {
        return Vec::new();
    };

    let scale = raga.scale();
    log::debug!("Generating chords for {} over scale {}", raga.name, scale);

    let mut chords = Vec::new();

    for root in scale.iter() {
        for template in catalog {
            if template.is_fusion() && !request.fusion_mode {
                continue;
            }

            let notes = template.voice(root);

            if !scale.contains_all(&notes) {
                continue;
            }

            if request.must_include_sa && !notes.iter().any(|pc| pc.is_sa()) {
                continue;
            }

            let score = score_chord(&notes, raga);
            let tags = chord_tags(&notes, template.tags, raga);

            chords.push(GeneratedChord {
                root,
                template: template.clone(),
                name: chord_name(root, template, request.tonic),
                notes,
                score,
                tags,
            });
        }
    }

    // Stable: equal scores keep generation order.
    chords.sort_by(|a, b| b.score.cmp(&a.score));

    log::debug!("Generated {} chords for {}", chords.len(), raga.name);
    chords
}

/// Priority of a chord within `raga`.
///
/// Starts at 1; +2 with Sa or −1 without; +1 each for vadi and samvadi and
/// +1 more for both; +1 when the chord blends with the raga's drone.
#[must_use]
pub fn score_chord(notes: &[PitchClass], raga: &Raga) -> i32 {
    let tones: Scale = notes.iter().copied().collect();
    let mut score = BASE_SCORE;

    score += if tones.contains(PitchClass::SA) {
        SA_BONUS
    } else {
        NO_SA_PENALTY
    };

    let has_vadi = raga.vadi.is_some_and(|pc| tones.contains(pc));
    let has_samvadi = raga.samvadi.is_some_and(|pc| tones.contains(pc));

    if has_vadi {
        score += EMPHASIS_BONUS;
    }
    if has_samvadi {
        score += EMPHASIS_BONUS;
    }
    if has_vadi && has_samvadi {
        score += EMPHASIS_BONUS;
    }

    if is_drone_compatible(notes, raga.drone) {
        score += DRONE_BONUS;
    }

    score
}

/// Template tags plus `strong` (Sa with vadi or samvadi) and `drone`.
#[must_use]
pub fn chord_tags(notes: &[PitchClass], template_tags: TagSet, raga: &Raga) -> TagSet {
    let tones: Scale = notes.iter().copied().collect();
    let mut tags = template_tags;

    let emphasised = raga.vadi.is_some_and(|pc| tones.contains(pc))
        || raga.samvadi.is_some_and(|pc| tones.contains(pc));

    if tones.contains(PitchClass::SA) && emphasised {
        tags = tags.with(ChordTag::Strong);
    }

    if is_drone_compatible(notes, raga.drone) {
        tags = tags.with(ChordTag::Drone);
    }

    tags
}

/// Whether a chord blends with the given drone.
///
/// Sa-Pa accepts chords with Sa or Pa. Sa-Ma accepts Sa, shuddha Ma or tivra
/// Ma. Sa-only and silent drones never award compatibility.
#[must_use]
pub fn is_drone_compatible(notes: &[PitchClass], drone: Drone) -> bool {
    let accepted: &[PitchClass] = match drone {
        Drone::SaPa => &[PitchClass::SA, PitchClass::PA],
        Drone::SaMa => &[PitchClass::SA, PitchClass::MA, PitchClass::TIVRA_MA],
        Drone::Sa | Drone::None => &[],
    };
    notes.iter().any(|pc| accepted.contains(pc))
}

fn chord_name(root: PitchClass, template: &ChordTemplate, tonic: PitchClass) -> String {
    format!("{}{}", note_name(root, tonic), template.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raga::Tradition;

    fn pcs(values: &[u8]) -> Vec<PitchClass> {
        values.iter().map(|&v| PitchClass::from(v)).collect()
    }

    fn major_raga() -> Raga {
        Raga::new("bilawal", "Bilawal", Tradition::Hindustani)
            .with_aroha(&[0, 2, 4, 5, 7, 9, 11, 12])
            .with_avaroha(&[12, 11, 9, 7, 5, 4, 2, 0])
            .with_vadi(9, 2)
            .with_drone(Drone::SaPa)
    }

    fn find<'a>(chords: &'a [GeneratedChord], name: &str) -> Option<&'a GeneratedChord> {
        chords.iter().find(|c| c.name == name)
    }

    #[test]
    fn test_empty_request_yields_nothing() {
        let chords = ChordRequest::empty().generate(&TemplateCatalog::standard());
        assert!(chords.is_empty());
    }

    #[test]
    fn test_empty_catalog_yields_nothing() {
        let raga = major_raga();
        let catalog = TemplateCatalog::new(Vec::new()).unwrap();
        assert!(ChordRequest::new(&raga).generate(&catalog).is_empty());
    }

    #[test]
    fn test_major_scale_contains_c_and_dm() {
        let raga = major_raga();
        let chords = ChordRequest::new(&raga).generate(&TemplateCatalog::standard());

        let c = find(&chords, "C").unwrap();
        assert_eq!(c.notes, pcs(&[0, 4, 7]));
        assert_eq!(c.root, PitchClass::SA);

        let dm = find(&chords, "Dm").unwrap();
        assert_eq!(dm.notes, pcs(&[2, 5, 9]));
    }

    #[test]
    fn test_must_include_sa_drops_dm() {
        let raga = major_raga();
        let chords = ChordRequest::new(&raga)
            .with_must_include_sa(true)
            .generate(&TemplateCatalog::standard());
        assert!(find(&chords, "Dm").is_none());
        assert!(find(&chords, "C").is_some());
        assert!(chords.iter().all(|c| c.contains(PitchClass::SA)));
    }

    #[test]
    fn test_fusion_mode_controls_sevenths() {
        let raga = major_raga();
        let catalog = TemplateCatalog::standard();

        let plain = ChordRequest::new(&raga).generate(&catalog);
        assert!(plain.iter().all(|c| !c.template.is_fusion()));

        let fusion = ChordRequest::new(&raga)
            .with_fusion_mode(true)
            .generate(&catalog);
        let cmaj7 = find(&fusion, "Cmaj7").unwrap();
        assert_eq!(cmaj7.notes, pcs(&[0, 4, 7, 11]));
        assert!(cmaj7.has_tag(ChordTag::Fusion));
        assert!(cmaj7.has_tag(ChordTag::Color));
    }

    #[test]
    fn test_add9_wraps_into_scale() {
        let raga = major_raga();
        let chords = ChordRequest::new(&raga).generate(&TemplateCatalog::standard());
        let cadd9 = find(&chords, "Cadd9").unwrap();
        assert_eq!(cadd9.notes, pcs(&[0, 4, 7, 2]));
    }

    #[test]
    fn test_score_components() {
        let raga = major_raga();
        // C major: Sa (+2), no vadi/samvadi, drone (+1).
        assert_eq!(score_chord(&pcs(&[0, 4, 7]), &raga), 4);
        // D minor: no Sa (-1), Re and Dha (+3), no Sa/Pa.
        assert_eq!(score_chord(&pcs(&[2, 5, 9]), &raga), 3);
        // E minor: no Sa (-1), nothing else except Pa (+1).
        assert_eq!(score_chord(&pcs(&[4, 7, 11]), &raga), 1);
    }

    #[test]
    fn test_score_without_vadi_or_samvadi() {
        let raga = Raga::new("bare", "Bare", Tradition::Carnatic)
            .with_aroha(&[0, 4, 7])
            .with_drone(Drone::None);
        assert_eq!(score_chord(&pcs(&[0, 4, 7]), &raga), 3);
        assert_eq!(score_chord(&pcs(&[4, 7]), &raga), 0);
    }

    #[test]
    fn test_sa_ma_drone_accepts_tivra_ma() {
        assert!(is_drone_compatible(&pcs(&[2, 6, 9]), Drone::SaMa));
        assert!(is_drone_compatible(&pcs(&[2, 5, 9]), Drone::SaMa));
        assert!(!is_drone_compatible(&pcs(&[2, 7, 11]), Drone::SaMa));
        assert!(is_drone_compatible(&pcs(&[2, 7, 11]), Drone::SaPa));
        assert!(!is_drone_compatible(&pcs(&[0, 4, 7]), Drone::Sa));
        assert!(!is_drone_compatible(&pcs(&[0, 4, 7]), Drone::None));
    }

    #[test]
    fn test_tags_strong_and_drone() {
        let raga = major_raga();
        // F6 = F A C D: Sa with both emphasised notes.
        let tags = chord_tags(&pcs(&[5, 9, 0, 2]), TagSet::empty(), &raga);
        assert!(tags.contains(ChordTag::Strong));
        assert!(tags.contains(ChordTag::Drone));

        // D minor: emphasised notes but no Sa.
        let tags = chord_tags(&pcs(&[2, 5, 9]), TagSet::empty(), &raga);
        assert!(!tags.contains(ChordTag::Strong));
        assert!(!tags.contains(ChordTag::Drone));
    }

    #[test]
    fn test_sorted_by_score_descending() {
        let raga = major_raga();
        let chords = ChordRequest::new(&raga)
            .with_fusion_mode(true)
            .generate(&TemplateCatalog::standard());
        assert!(chords.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_ties_keep_generation_order() {
        let raga = Raga::new("flat", "Flat", Tradition::Carnatic)
            .with_aroha(&[0, 2, 4, 5, 7, 9, 11])
            .with_drone(Drone::None);
        let catalog = TemplateCatalog::new(vec![
            ChordTemplate::new("", &[0, 4, 7], &[]),
            ChordTemplate::new("m", &[0, 3, 7], &[]),
        ])
        .unwrap();
        let names: Vec<String> = ChordRequest::new(&raga)
            .generate(&catalog)
            .into_iter()
            .map(|c| c.name)
            .collect();
        // C and F and Am contain Sa (score 3); the rest score 0.
        assert_eq!(names, vec!["C", "F", "Am", "Dm", "Em", "G"]);
    }

    #[test]
    fn test_tonic_changes_names_only() {
        let raga = major_raga();
        let catalog = TemplateCatalog::standard();
        let in_c = ChordRequest::new(&raga).generate(&catalog);
        let in_d = ChordRequest::new(&raga)
            .with_tonic(PitchClass::new(2))
            .generate(&catalog);

        assert_eq!(in_c.len(), in_d.len());
        for (c, d) in in_c.iter().zip(&in_d) {
            assert_eq!(c.score, d.score);
            assert_eq!(c.tags, d.tags);
            assert_eq!(c.notes, d.notes);
            assert_eq!(c.display_name(PitchClass::new(2)), d.name);
        }
        assert!(find(&in_d, "D").is_some());
        assert!(find(&in_d, "Em").is_some());
    }
}
