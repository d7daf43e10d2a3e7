use serde::{Deserialize, Serialize};
use std::fmt;

use crate::pitch::PitchClass;
use crate::scale::Scale;

/// The musical tradition a raga belongs to. Used for grouping only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tradition {
    Hindustani,
    Carnatic,
}

impl fmt::Display for Tradition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hindustani => write!(f, "Hindustani"),
            Self::Carnatic => write!(f, "Carnatic"),
        }
    }
}

/// The tanpura drone typically played under a raga.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Drone {
    #[default]
    #[serde(rename = "Sa-Pa")]
    SaPa,
    #[serde(rename = "Sa-Ma")]
    SaMa,
    #[serde(rename = "Sa")]
    Sa,
    #[serde(rename = "None")]
    None,
}

impl Drone {
    /// The pitch classes the drone sounds.
    #[must_use]
    pub fn pitch_classes(self) -> &'static [PitchClass] {
        match self {
            Self::SaPa => &[PitchClass::SA, PitchClass::PA],
            Self::SaMa => &[PitchClass::SA, PitchClass::MA],
            Self::Sa => &[PitchClass::SA],
            Self::None => &[],
        }
    }
}

impl fmt::Display for Drone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::SaPa => "Sa-Pa",
            Self::SaMa => "Sa-Ma",
            Self::Sa => "Sa",
            Self::None => "None",
        };
        write!(f, "{}", label)
    }
}

/// A raga: a named scale with ascending and descending forms.
///
/// Note sequences hold raw semitone values and may end on `12` (the upper
/// Sa). Use [`Raga::scale`] for the reduced pitch-class set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Raga {
    pub id: String,
    pub name: String,
    pub tradition: Tradition,

    /// Parent thaat or melakarta.
    #[serde(default)]
    pub parent: Option<String>,

    /// Ascending form (aroha).
    pub aroha: Vec<u8>,

    /// Descending form (avaroha).
    pub avaroha: Vec<u8>,

    /// Most emphasized note.
    #[serde(default)]
    pub vadi: Option<PitchClass>,

    /// Second most emphasized note.
    #[serde(default)]
    pub samvadi: Option<PitchClass>,

    #[serde(default)]
    pub drone: Drone,

    /// Free-form description.
    #[serde(default)]
    pub notes: String,

    /// Characteristic phrases. Not used by the chord engine.
    #[serde(default)]
    pub pakad: Vec<Vec<u8>>,
}

impl Raga {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, tradition: Tradition) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tradition,
            parent: None,
            aroha: Vec::new(),
            avaroha: Vec::new(),
            vadi: None,
            samvadi: None,
            drone: Drone::default(),
            notes: String::new(),
            pakad: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    #[must_use]
    pub fn with_aroha(mut self, aroha: &[u8]) -> Self {
        self.aroha = aroha.to_vec();
        self
    }

    #[must_use]
    pub fn with_avaroha(mut self, avaroha: &[u8]) -> Self {
        self.avaroha = avaroha.to_vec();
        self
    }

    #[must_use]
    pub fn with_vadi(mut self, vadi: u8, samvadi: u8) -> Self {
        self.vadi = Some(PitchClass::from(vadi));
        self.samvadi = Some(PitchClass::from(samvadi));
        self
    }

    #[must_use]
    pub fn with_drone(mut self, drone: Drone) -> Self {
        self.drone = drone;
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    #[must_use]
    pub fn with_pakad(mut self, phrase: &[u8]) -> Self {
        self.pakad.push(phrase.to_vec());
        self
    }

    /// The usable pitch classes: aroha ∪ avaroha, reduced modulo 12.
    #[must_use]
    pub fn scale(&self) -> Scale {
        Scale::resolve(&self.aroha, &self.avaroha)
    }

    /// True when the descending form uses notes the ascending form does not,
    /// or vice versa.
    #[must_use]
    pub fn is_asymmetric(&self) -> bool {
        Scale::resolve(&self.aroha, &[]) != Scale::resolve(&self.avaroha, &[])
    }
}

impl fmt::Display for Raga {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.tradition)
    }
}
