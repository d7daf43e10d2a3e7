use anyhow::Result;
use raga_chords_core::pitch::PitchClass;
use raga_chords_core::{
    view, ChordRequest, ChordTag, GeneratedChord, RagaLibrary, TemplateCatalog,
};

use super::{format_notes, format_sargam, resolve_switch, resolve_tonic};
use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Tag a listing can be narrowed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TagArg {
    Strong,
    Drone,
    Color,
    Fusion,
}

impl From<TagArg> for ChordTag {
    fn from(arg: TagArg) -> Self {
        match arg {
            TagArg::Strong => Self::Strong,
            TagArg::Drone => Self::Drone,
            TagArg::Color => Self::Color,
            TagArg::Fusion => Self::Fusion,
        }
    }
}

#[derive(Debug, clap::Args)]
pub struct ChordsArgs {
    /// Raga id (e.g. yaman, kalyani)
    pub raga: String,

    /// Note Sa sounds at (default from config)
    #[arg(long)]
    pub tonic: Option<String>,

    /// Include seventh chords
    #[arg(long, overrides_with = "no_fusion")]
    pub fusion: bool,

    /// Leave out seventh chords even if the config enables them
    #[arg(long, overrides_with = "fusion")]
    pub no_fusion: bool,

    /// Only list chords that contain Sa
    #[arg(long, overrides_with = "no_must_include_sa")]
    pub must_include_sa: bool,

    /// List chords without Sa even if the config excludes them
    #[arg(long, overrides_with = "must_include_sa")]
    pub no_must_include_sa: bool,

    /// Hide color chords (sus, add9, maj7)
    #[arg(long)]
    pub no_color: bool,

    /// Only list chords carrying this tag
    #[arg(long, value_enum)]
    pub tag: Option<TagArg>,

    /// Show at most this many chords
    #[arg(long)]
    pub limit: Option<usize>,

    /// Order by root instead of score
    #[arg(long)]
    pub by_root: bool,

    /// Only list chords containing this note (semitones above Sa, 0-11)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..12))]
    pub note: Option<u8>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl ChordsArgs {
    /// Fusion mode from the flags, falling back to config.
    pub fn fusion_mode(&self, config: &Config) -> bool {
        resolve_switch(self.fusion, self.no_fusion, config.fusion_mode)
    }

    /// Sa filter from the flags, falling back to config.
    pub fn must_include_sa(&self, config: &Config) -> bool {
        resolve_switch(
            self.must_include_sa,
            self.no_must_include_sa,
            config.must_include_sa,
        )
    }
}

/// Generate chords for a raga and print them.
pub fn run_chords(
    args: &ChordsArgs,
    config: &Config,
    library: &RagaLibrary,
    catalog: &TemplateCatalog,
) -> Result<()> {
    let raga = library.get(&args.raga)?;
    let tonic = resolve_tonic(args.tonic.as_deref(), config)?;

    let request = ChordRequest::new(raga)
        .with_tonic(tonic)
        .with_fusion_mode(args.fusion_mode(config))
        .with_must_include_sa(args.must_include_sa(config));

    let chords = select(&request.generate(catalog), args, config);

    match args.format {
        OutputFormat::Json => println!("{}", view::to_json(&chords)?),
        OutputFormat::Table => print_table(&raga.name, tonic, &chords),
    }

    Ok(())
}

/// Apply the display options to a generated list.
fn select(chords: &[GeneratedChord], args: &ChordsArgs, config: &Config) -> Vec<GeneratedChord> {
    let mut chords = view::filter_chords(chords, !args.no_color, true);

    if let Some(tag) = args.tag {
        chords = view::with_tag(&chords, tag.into());
    }

    if let Some(note) = args.note {
        chords = view::containing(&chords, PitchClass::from(note))
            .cloned()
            .collect();
    }

    if args.by_root {
        view::sort_by_root(&mut chords);
    }

    view::limit(&mut chords, args.limit.or(config.max_results));
    chords
}

fn print_table(raga: &str, tonic: PitchClass, chords: &[GeneratedChord]) {
    let sa = format_notes(&[PitchClass::SA], tonic);
    println!("\n{} with Sa = {} ({} chords)\n", raga, sa, chords.len());

    if chords.is_empty() {
        println!("  No chords fit this raga with the current options.\n");
        return;
    }

    println!(
        "  {:<8} {:<14} {:<18} {:>5}  Tags",
        "Chord", "Notes", "Sargam", "Score"
    );
    for chord in chords {
        let tags: Vec<&str> = chord.tags.iter().map(|t| t.as_str()).collect();
        println!(
            "  {:<8} {:<14} {:<18} {:>5}  {}",
            chord.name,
            format_notes(&chord.notes, tonic),
            format_sargam(&chord.notes),
            chord.score,
            tags.join(", ")
        );
    }
    println!();
}
