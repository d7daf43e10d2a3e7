use anyhow::{Context, Result};
use raga_chords_core::pitch::{self, note_name, sargam, PitchClass};
use raga_chords_core::{RagaLibrary, TemplateCatalog};
use std::path::Path;

use crate::config::Config;

pub mod chords;
pub mod config;
pub mod midi;
pub mod ragas;
pub mod show;

pub use chords::run_chords;
pub use midi::export_midi;
pub use ragas::list_ragas;
pub use show::show_raga;

/// Load the raga library from `path`, or the built-in one.
pub fn load_library(path: Option<&Path>) -> Result<RagaLibrary> {
    match path {
        Some(path) => RagaLibrary::load(path)
            .with_context(|| format!("Failed to load raga library {}", path.display())),
        None => Ok(RagaLibrary::builtin()),
    }
}

/// Load the chord template catalog from `path`, or the standard one.
pub fn load_templates(path: Option<&Path>) -> Result<TemplateCatalog> {
    match path {
        Some(path) => TemplateCatalog::load(path)
            .with_context(|| format!("Failed to load chord templates {}", path.display())),
        None => Ok(TemplateCatalog::standard()),
    }
}

/// The tonic from the CLI flag if given, else from config.
pub fn resolve_tonic(arg: Option<&str>, config: &Config) -> Result<PitchClass> {
    let name = arg.unwrap_or(&config.tonic);
    pitch::parse_note_name(name).with_context(|| format!("Invalid tonic '{}'", name))
}

/// An on/off flag pair over a configured default. Clap keeps only the last
/// of the pair, so at most one of `on` and `off` is set.
pub fn resolve_switch(on: bool, off: bool, configured: bool) -> bool {
    if on {
        true
    } else if off {
        false
    } else {
        configured
    }
}

/// Western note names of `notes` with Sa at `tonic`, space separated.
pub fn format_notes(notes: &[PitchClass], tonic: PitchClass) -> String {
    notes
        .iter()
        .map(|&pc| note_name(pc, tonic))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Sargam syllables of `notes` (relative to Sa), space separated.
pub fn format_sargam(notes: &[PitchClass]) -> String {
    notes
        .iter()
        .map(|&pc| sargam(pc, PitchClass::SA))
        .collect::<Vec<_>>()
        .join(" ")
}
