use anyhow::{Context, Result};
use raga_chords_core::midi::write_chord_midi;
use raga_chords_core::pitch::PitchClass;
use raga_chords_core::{ChordRequest, GeneratedChord, RagaLibrary, TemplateCatalog};
use std::path::Path;

/// Which chord to export, and under what options.
#[derive(Debug, Clone, Copy)]
pub struct ExportRequest<'a> {
    pub raga: &'a str,
    pub chord: &'a str,
    pub tonic: PitchClass,
    pub fusion_mode: bool,
}

/// Write one of a raga's chords to a MIDI file.
///
/// The chord is looked up by display name among the chords `chords` would
/// list for the same raga, tonic and fusion setting.
pub fn export_midi(
    library: &RagaLibrary,
    catalog: &TemplateCatalog,
    request: &ExportRequest<'_>,
    output: &Path,
) -> Result<()> {
    let raga = library.get(request.raga)?;
    let chords = ChordRequest::new(raga)
        .with_tonic(request.tonic)
        .with_fusion_mode(request.fusion_mode)
        .generate(catalog);

    let Some(chord) = find_chord(&chords, request.chord) else {
        let hint = if request.fusion_mode { "" } else { " (try --fusion)" };
        anyhow::bail!(
            "No chord named '{}' fits {} at this tonic{}",
            request.chord,
            raga.name,
            hint
        );
    };

    write_chord_midi(chord, request.tonic, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    log::info!("Exported {} from {} to {}", chord.name, raga.id, output.display());
    println!("✓ Wrote {} to {}", chord.name, output.display());
    Ok(())
}

fn find_chord<'a>(chords: &'a [GeneratedChord], name: &str) -> Option<&'a GeneratedChord> {
    chords
        .iter()
        .find(|c| c.name == name)
        .or_else(|| chords.iter().find(|c| c.name.eq_ignore_ascii_case(name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request<'a>(raga: &'a str, chord: &'a str, fusion_mode: bool) -> ExportRequest<'a> {
        ExportRequest {
            raga,
            chord,
            tonic: PitchClass::SA,
            fusion_mode,
        }
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dm.mid");

        export_midi(
            &RagaLibrary::builtin(),
            &TemplateCatalog::standard(),
            &request("bilawal", "Dm", false),
            &path,
        )
        .unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], b"MThd");
    }

    #[test]
    fn test_export_unknown_chord() {
        let dir = tempfile::tempdir().unwrap();
        let result = export_midi(
            &RagaLibrary::builtin(),
            &TemplateCatalog::standard(),
            &request("bilawal", "C#m", true),
            &dir.path().join("x.mid"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_export_seventh_needs_fusion() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("g7.mid");
        let library = RagaLibrary::builtin();
        let catalog = TemplateCatalog::standard();

        assert!(export_midi(&library, &catalog, &request("bilawal", "G7", false), &path).is_err());
        assert!(export_midi(&library, &catalog, &request("bilawal", "G7", true), &path).is_ok());
    }

    #[test]
    fn test_find_chord_prefers_exact_case() {
        let library = RagaLibrary::builtin();
        let chords = ChordRequest::new(library.get("bilawal").unwrap())
            .generate(&TemplateCatalog::standard());
        assert_eq!(find_chord(&chords, "Dm").unwrap().name, "Dm");
        assert_eq!(find_chord(&chords, "gsus4").unwrap().name, "Gsus4");
    }
}
