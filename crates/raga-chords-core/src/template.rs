//! Chord templates and tags.
//!
//! A template is an abstract chord shape: a suffix label and a list of
//! semitone offsets from the chord root. Offsets may exceed an octave (14 for
//! an added ninth) and are reduced modulo 12 when voiced.
//!
//! The template catalog can be replaced by a TOML file of `[[template]]`
//! tables:
//!
//! ```toml
//! [[template]]
//! name = "sus2"
//! intervals = [0, 2, 7]
//! tags = ["color"]
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};
use crate::pitch::PitchClass;

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

/// Harmonic character of a chord.
///
/// `Color` and `Fusion` come from templates; `Strong` and `Drone` are derived
/// per raga when a chord is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChordTag {
    /// Suspended or added-tone chord.
    Color,
    /// Seventh chord, hidden unless fusion mode is on.
    Fusion,
    /// Contains Sa and the vadi or samvadi.
    Strong,
    /// Blends with the raga's drone.
    Drone,
}

impl ChordTag {
    pub const ALL: [Self; 4] = [Self::Color, Self::Fusion, Self::Strong, Self::Drone];

    const fn bit(self) -> u8 {
        match self {
            Self::Color => 1,
            Self::Fusion => 1 << 1,
            Self::Strong => 1 << 2,
            Self::Drone => 1 << 3,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Fusion => "fusion",
            Self::Strong => "strong",
            Self::Drone => "drone",
        }
    }
}

impl fmt::Display for ChordTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of [`ChordTag`]s stored as a bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<ChordTag>", into = "Vec<ChordTag>")]
pub struct TagSet(u8);

impl TagSet {
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn with(self, tag: ChordTag) -> Self {
        Self(self.0 | tag.bit())
    }

    #[must_use]
    pub const fn contains(self, tag: ChordTag) -> bool {
        self.0 & tag.bit() != 0
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Tags in declaration order.
    pub fn iter(self) -> impl Iterator<Item = ChordTag> {
        ChordTag::ALL.into_iter().filter(move |&t| self.contains(t))
    }
}

impl FromIterator<ChordTag> for TagSet {
    fn from_iter<I: IntoIterator<Item = ChordTag>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

impl From<Vec<ChordTag>> for TagSet {
    fn from(tags: Vec<ChordTag>) -> Self {
        tags.into_iter().collect()
    }
}

impl From<TagSet> for Vec<ChordTag> {
    fn from(tags: TagSet) -> Self {
        tags.iter().collect()
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(ChordTag::as_str).collect();
        write!(f, "{}", names.join(","))
    }
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// An abstract chord shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordTemplate {
    /// Suffix appended to the root name. Empty for a plain major triad.
    #[serde(default)]
    pub name: String,

    /// Semitone offsets from the root, in voicing order.
    pub intervals: Vec<u8>,

    #[serde(default)]
    pub tags: TagSet,
}

impl ChordTemplate {
    #[must_use]
    pub fn new(name: impl Into<String>, intervals: &[u8], tags: &[ChordTag]) -> Self {
        Self {
            name: name.into(),
            intervals: intervals.to_vec(),
            tags: tags.iter().copied().collect(),
        }
    }

    #[must_use]
    pub fn is_fusion(&self) -> bool {
        self.tags.contains(ChordTag::Fusion)
    }

    #[must_use]
    pub fn is_color(&self) -> bool {
        self.tags.contains(ChordTag::Color)
    }

    /// The template's notes built on `root`, each reduced modulo 12.
    #[must_use]
    pub fn voice(&self, root: PitchClass) -> Vec<PitchClass> {
        self.intervals
            .iter()
            .map(|&interval| root.transpose(i32::from(interval)))
            .collect()
    }
}

/// An ordered list of chord templates.
///
/// Catalog order is significant: it is the tie-break order of generated
/// chords with equal scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateCatalog {
    #[serde(rename = "template", default)]
    templates: Vec<ChordTemplate>,
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl TemplateCatalog {
    /// Build a catalog from templates, rejecting any without intervals.
    pub fn new(templates: Vec<ChordTemplate>) -> Result<Self> {
        let catalog = Self { templates };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The standard catalog: triads, power chords, sixths, suspended and
    /// added-ninth colors, and the seventh-chord fusion shapes.
    #[must_use]
    pub fn standard() -> Self {
        use ChordTag::{Color, Fusion};

        Self {
            templates: vec![
                ChordTemplate::new("", &[0, 4, 7], &[]),
                ChordTemplate::new("m", &[0, 3, 7], &[]),
                ChordTemplate::new("dim", &[0, 3, 6], &[]),
                ChordTemplate::new("sus2", &[0, 2, 7], &[Color]),
                ChordTemplate::new("sus4", &[0, 5, 7], &[Color]),
                ChordTemplate::new("add9", &[0, 4, 7, 14], &[Color]),
                ChordTemplate::new("m(add9)", &[0, 3, 7, 14], &[Color]),
                ChordTemplate::new("6", &[0, 4, 7, 9], &[]),
                ChordTemplate::new("m6", &[0, 3, 7, 9], &[]),
                ChordTemplate::new("5", &[0, 7], &[]),
                ChordTemplate::new("7", &[0, 4, 7, 10], &[Fusion]),
                ChordTemplate::new("m7", &[0, 3, 7, 10], &[Fusion]),
                ChordTemplate::new("maj7", &[0, 4, 7, 11], &[Fusion, Color]),
            ],
        }
    }

    /// Load a catalog from a TOML file of `[[template]]` tables.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(Error::Io)?;
        let catalog = Self::from_toml_str(&content).map_err(|e| {
            Error::InvalidData(format!(
                "failed to load chord templates from {}: {}",
                path.display(),
                e
            ))
        })?;
        log::info!(
            "Loaded {} chord templates from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let catalog: Self =
            toml::from_str(content).map_err(|e| Error::InvalidData(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<()> {
        if let Some(t) = self.templates.iter().find(|t| t.intervals.is_empty()) {
            return Err(Error::InvalidData(format!(
                "chord template '{}' has no intervals",
                t.name
            )));
        }
        Ok(())
    }

    /// Find a template by its suffix label.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ChordTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChordTemplate> {
        self.templates.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl<'a> IntoIterator for &'a TemplateCatalog {
    type Item = &'a ChordTemplate;
    type IntoIter = std::slice::Iter<'a, ChordTemplate>;

    fn into_iter(self) -> Self::IntoIter {
        self.templates.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_tag_set_basics() {
        let tags = TagSet::empty().with(ChordTag::Color).with(ChordTag::Drone);
        assert!(tags.contains(ChordTag::Color));
        assert!(tags.contains(ChordTag::Drone));
        assert!(!tags.contains(ChordTag::Fusion));
        assert_eq!(tags.iter().count(), 2);
        assert_eq!(tags.to_string(), "color,drone");
    }

    #[test]
    fn test_tag_set_union() {
        let a: TagSet = [ChordTag::Fusion].into_iter().collect();
        let b: TagSet = [ChordTag::Strong].into_iter().collect();
        let both = a.union(b);
        assert!(both.contains(ChordTag::Fusion));
        assert!(both.contains(ChordTag::Strong));
        assert!(TagSet::empty().is_empty());
    }

    #[test]
    fn test_tag_set_serializes_as_list() {
        let tags = TagSet::empty().with(ChordTag::Fusion).with(ChordTag::Color);
        let json = serde_json::to_string(&tags).unwrap();
        assert_eq!(json, r#"["color","fusion"]"#);
        let back: TagSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tags);
    }

    #[test]
    fn test_voice_reduces_compound_intervals() {
        let add9 = ChordTemplate::new("add9", &[0, 4, 7, 14], &[ChordTag::Color]);
        let notes: Vec<u8> = add9.voice(PitchClass::new(7)).iter().map(|p| p.value()).collect();
        assert_eq!(notes, vec![7, 11, 2, 9]);
    }

    #[test]
    fn test_standard_catalog() {
        let catalog = TemplateCatalog::standard();
        assert_eq!(catalog.len(), 13);
        assert_eq!(catalog.iter().next().unwrap().name, "");
        assert!(catalog.get("maj7").unwrap().is_fusion());
        assert!(catalog.get("maj7").unwrap().is_color());
        assert!(!catalog.get("m").unwrap().is_color());
        assert_eq!(catalog.iter().filter(|t| t.is_fusion()).count(), 3);
    }

    #[test]
    fn test_from_toml_str() {
        let catalog = TemplateCatalog::from_toml_str(
            r#"
            [[template]]
            name = ""
            intervals = [0, 4, 7]

            [[template]]
            name = "sus2"
            intervals = [0, 2, 7]
            tags = ["color"]
            "#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("sus2").unwrap().is_color());
        assert!(catalog.get("").unwrap().tags.is_empty());
    }

    #[test]
    fn test_rejects_template_without_intervals() {
        let result = TemplateCatalog::from_toml_str(
            r#"
            [[template]]
            name = "empty"
            intervals = []
            "#,
        );
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[[template]]\nname = \"5\"\nintervals = [0, 7]").unwrap();
        let catalog = TemplateCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let result = TemplateCatalog::load(Path::new("/nonexistent/templates.toml"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
