//! The raga library.
//!
//! A built-in set of Hindustani and Carnatic ragas ships with the crate. A
//! user library can replace it by loading a TOML file of `[[raga]]` tables:
//!
//! ```toml
//! [[raga]]
//! id = "bhupali"
//! name = "Bhupali"
//! tradition = "hindustani"
//! aroha = [0, 2, 4, 7, 9, 12]
//! avaroha = [12, 9, 7, 4, 2, 0]
//! vadi = 4
//! samvadi = 9
//! drone = "Sa-Pa"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::raga::{Drone, Raga, Tradition};

/// Highest value an aroha/avaroha entry may take (the upper Sa).
const MAX_SEQUENCE_VALUE: u8 = 12;

/// An ordered, read-only collection of ragas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RagaLibrary {
    #[serde(rename = "raga", default)]
    ragas: Vec<Raga>,
}

impl Default for RagaLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RagaLibrary {
    /// Build a library from ragas, validating their pitch data.
    pub fn new(ragas: Vec<Raga>) -> Result<Self> {
        let library = Self { ragas };
        library.validate()?;
        Ok(library)
    }

    /// Load a library from a TOML file of `[[raga]]` tables.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(Error::Io)?;
        let library = Self::from_toml_str(&content).map_err(|e| {
            Error::InvalidData(format!(
                "failed to load ragas from {}: {}",
                path.display(),
                e
            ))
        })?;
        log::info!("Loaded {} ragas from {}", library.len(), path.display());
        Ok(library)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let library: Self =
            toml::from_str(content).map_err(|e| Error::InvalidData(e.to_string()))?;
        library.validate()?;
        Ok(library)
    }

    fn validate(&self) -> Result<()> {
        for raga in &self.ragas {
            let out_of_range = raga
                .aroha
                .iter()
                .chain(&raga.avaroha)
                .find(|&&pc| pc > MAX_SEQUENCE_VALUE);
            if let Some(pc) = out_of_range {
                return Err(Error::InvalidData(format!(
                    "raga '{}' has note {} outside 0..=12",
                    raga.id, pc
                )));
            }
        }
        Ok(())
    }

    /// Find a raga by id (case-insensitive).
    pub fn get(&self, id: &str) -> Result<&Raga> {
        self.ragas
            .iter()
            .find(|r| r.id.eq_ignore_ascii_case(id))
            .ok_or_else(|| Error::NotFound {
                entity: "raga",
                id: id.to_string(),
            })
    }

    pub fn by_tradition(&self, tradition: Tradition) -> impl Iterator<Item = &Raga> {
        self.ragas.iter().filter(move |r| r.tradition == tradition)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Raga> {
        self.ragas.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ragas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ragas.is_empty()
    }

    /// The ragas bundled with the crate.
    #[must_use]
    pub fn builtin() -> Self {
        use Tradition::{Carnatic, Hindustani};

        let ragas = vec![
            // Carnatic melakartas
            Raga::new("shankarabharanam", "Shankarabharanam", Carnatic)
                .with_parent("Shankarabharanam (29)")
                .with_aroha(&[0, 2, 4, 5, 7, 9, 11, 12])
                .with_avaroha(&[12, 11, 9, 7, 5, 4, 2, 0])
                .with_vadi(9, 2)
                .with_notes("S R2 G3 M1 P D2 N3. Major scale.")
                .with_pakad(&[0, 2, 4, 5, 7, 9, 11, 9, 7, 5, 4, 2, 0]),
            Raga::new("kalyani", "Kalyani", Carnatic)
                .with_parent("Kalyani (65)")
                .with_aroha(&[0, 2, 4, 6, 7, 9, 11, 12])
                .with_avaroha(&[12, 11, 9, 7, 6, 4, 2, 0])
                .with_vadi(11, 4)
                .with_notes("S R2 G3 M2 P D2 N3. Lydian mode.")
                .with_pakad(&[0, 2, 4, 6, 7, 9, 11, 9, 7, 6, 4, 2, 0]),
            Raga::new("kamavardhini", "Kamavardhini", Carnatic)
                .with_parent("Kamavardhini (51)")
                .with_aroha(&[0, 1, 4, 6, 7, 8, 11, 12])
                .with_avaroha(&[12, 11, 8, 7, 6, 4, 1, 0])
                .with_vadi(6, 1)
                .with_notes("S R1 G3 M2 P D1 N3. Also known as Pantuvarali.")
                .with_pakad(&[0, 1, 4, 6, 7, 8, 11, 8, 7, 6, 4, 1, 0]),
            Raga::new("kharaharapriya", "Kharaharapriya", Carnatic)
                .with_parent("Kharaharapriya (22)")
                .with_aroha(&[0, 2, 3, 5, 7, 9, 10, 12])
                .with_avaroha(&[12, 10, 9, 7, 5, 3, 2, 0])
                .with_vadi(7, 2)
                .with_notes("S R2 G2 M1 P D2 N2. Dorian mode.")
                .with_pakad(&[0, 2, 3, 5, 7, 9, 10, 9, 7, 5, 3, 2, 0]),
            Raga::new("mayamalavagowla", "Mayamalavagowla", Carnatic)
                .with_parent("Mayamalavagowla (15)")
                .with_aroha(&[0, 1, 4, 5, 7, 8, 11, 12])
                .with_avaroha(&[12, 11, 8, 7, 5, 4, 1, 0])
                .with_vadi(8, 1)
                .with_notes("S R1 G3 M1 P D1 N3. Double harmonic scale.")
                .with_pakad(&[0, 1, 4, 5, 7, 8, 11, 8, 7, 5, 4, 1, 0]),
            // Carnatic janyas
            Raga::new("mohanam", "Mohanam", Carnatic)
                .with_parent("Harikambhoji (28)")
                .with_aroha(&[0, 2, 4, 7, 9, 12])
                .with_avaroha(&[12, 9, 7, 4, 2, 0])
                .with_vadi(4, 9)
                .with_notes("Same as Bhupali (pentatonic).")
                .with_pakad(&[0, 2, 4, 7, 9, 7, 4, 2, 0]),
            Raga::new("hindolam", "Hindolam", Carnatic)
                .with_parent("Natabhairavi (20)")
                .with_aroha(&[0, 3, 5, 8, 10, 12])
                .with_avaroha(&[12, 10, 8, 5, 3, 0])
                .with_vadi(3, 8)
                .with_drone(Drone::SaMa)
                .with_notes("Pentatonic: Sa ga Ma dha ni.")
                .with_pakad(&[0, 3, 5, 8, 10, 8, 5, 3, 0]),
            Raga::new("charukesi", "Charukesi", Carnatic)
                .with_parent("Charukesi (26)")
                .with_aroha(&[0, 2, 4, 5, 7, 8, 11, 12])
                .with_avaroha(&[12, 11, 8, 7, 5, 4, 2, 0])
                .with_vadi(4, 11)
                .with_notes("Like western melodic minor b6.")
                .with_pakad(&[0, 2, 4, 5, 7, 8, 11, 8, 7, 5, 4, 2, 0]),
            // Hindustani thaats
            Raga::new("bilawal", "Bilawal", Hindustani)
                .with_parent("Bilawal")
                .with_aroha(&[0, 2, 4, 5, 7, 9, 11, 12])
                .with_avaroha(&[12, 11, 9, 7, 5, 4, 2, 0])
                .with_vadi(9, 2)
                .with_notes("All shuddha notes (S R G m P D N). Like C major scale.")
                .with_pakad(&[0, 2, 4, 5, 7, 9, 11, 9, 7, 5, 4, 2, 0]),
            Raga::new("kalyan", "Kalyan", Hindustani)
                .with_parent("Kalyan")
                .with_aroha(&[0, 2, 4, 6, 7, 9, 11, 12])
                .with_avaroha(&[12, 11, 9, 7, 6, 4, 2, 0])
                .with_vadi(11, 4)
                .with_notes("Tivra Ma (S R G M^ P D N). Evening raga. Like Lydian mode.")
                .with_pakad(&[0, 2, 4, 6, 7, 9, 11, 9, 7, 6, 4, 2, 0]),
            Raga::new("kafi", "Kafi", Hindustani)
                .with_parent("Kafi")
                .with_aroha(&[0, 2, 3, 5, 7, 9, 10, 12])
                .with_avaroha(&[12, 10, 9, 7, 5, 3, 2, 0])
                .with_vadi(7, 2)
                .with_notes("Komal Ga & Ni (S R g m P D n). Like Dorian mode.")
                .with_pakad(&[0, 2, 3, 5, 7, 9, 10, 9, 7, 5, 3, 2, 0]),
            Raga::new("bhairav", "Bhairav", Hindustani)
                .with_parent("Bhairav")
                .with_aroha(&[0, 1, 4, 5, 7, 8, 11, 12])
                .with_avaroha(&[12, 11, 8, 7, 5, 4, 1, 0])
                .with_vadi(8, 1)
                .with_notes("Komal Re & Dha (S r G m P d N). Morning raga.")
                .with_pakad(&[0, 1, 4, 5, 7, 8, 11, 8, 7, 5, 4, 1, 0]),
            // Hindustani janyas
            Raga::new("yaman", "Yaman", Hindustani)
                .with_parent("Kalyan")
                .with_aroha(&[0, 2, 4, 6, 7, 9, 11, 12])
                .with_avaroha(&[12, 11, 9, 7, 6, 4, 2, 0])
                .with_vadi(11, 4)
                .with_notes("All shuddha notes except tivra Ma (Ma^). Evening raga.")
                .with_pakad(&[0, 2, 4, 6, 7, 6, 4, 2, 0]),
            Raga::new("bhupali", "Bhupali", Hindustani)
                .with_parent("Kalyan")
                .with_aroha(&[0, 2, 4, 7, 9, 12])
                .with_avaroha(&[12, 9, 7, 4, 2, 0])
                .with_vadi(4, 9)
                .with_notes("Pentatonic: no Ma or Ni.")
                .with_pakad(&[0, 2, 4, 7, 9, 7, 4, 2, 0]),
            Raga::new("bageshree", "Bageshree", Hindustani)
                .with_parent("Kafi")
                .with_aroha(&[0, 2, 3, 5, 7, 9, 10, 12])
                .with_avaroha(&[12, 10, 9, 7, 5, 3, 2, 0])
                .with_vadi(7, 2)
                .with_drone(Drone::SaMa)
                .with_notes("Komal Ga & Ni; late night mood.")
                .with_pakad(&[0, 2, 3, 5, 7, 5, 3, 2, 0]),
            Raga::new("khamaj", "Khamaj", Hindustani)
                .with_parent("Khamaj")
                .with_aroha(&[0, 2, 4, 5, 7, 9, 11, 12])
                .with_avaroha(&[12, 10, 9, 7, 5, 4, 2, 0])
                .with_vadi(4, 0)
                .with_notes("Komal Ni in descent.")
                .with_pakad(&[0, 2, 4, 5, 7, 9, 11, 10, 9, 7, 5, 4, 2, 0]),
            Raga::new("todi", "Todi", Hindustani)
                .with_parent("Todi")
                .with_aroha(&[0, 1, 3, 6, 7, 8, 11, 12])
                .with_avaroha(&[12, 11, 8, 7, 6, 3, 1, 0])
                .with_vadi(6, 1)
                .with_drone(Drone::SaMa)
                .with_notes("Komal Re, Ga, Dha; tivra Ma.")
                .with_pakad(&[0, 1, 3, 6, 7, 6, 3, 1, 0]),
            Raga::new("durga", "Durga", Hindustani)
                .with_parent("Bilawal")
                .with_aroha(&[0, 2, 5, 7, 9, 12])
                .with_avaroha(&[12, 9, 7, 5, 2, 0])
                .with_vadi(2, 7)
                .with_notes("Pentatonic: no Ga, Ni.")
                .with_pakad(&[0, 2, 5, 7, 9, 7, 5, 2, 0]),
        ];

        Self { ragas }
    }
}

impl<'a> IntoIterator for &'a RagaLibrary {
    type Item = &'a Raga;
    type IntoIter = std::slice::Iter<'a, Raga>;

    fn into_iter(self) -> Self::IntoIter {
        self.ragas.iter()
    }
}
