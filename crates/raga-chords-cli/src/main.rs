use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod commands;
mod config;

use commands::ragas::TraditionArg;

#[derive(Debug, Parser)]
#[command(name = "raga-chords", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML raga library to use instead of the built-in one
    #[arg(long, global = true)]
    ragas: Option<PathBuf>,

    /// TOML chord template catalog to use instead of the standard one
    #[arg(long, global = true)]
    templates: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// List the ragas in the library
    Ragas {
        /// Only list ragas of this tradition
        #[arg(long, value_enum)]
        tradition: Option<TraditionArg>,
    },
    /// Show a raga's notes, vadi/samvadi, drone and pakad
    Show {
        /// Raga id (e.g. yaman, kalyani)
        raga: String,

        /// Note Sa sounds at (default from config)
        #[arg(long)]
        tonic: Option<String>,
    },
    /// Generate the chords a raga supports
    ///
    /// Every chord template in the catalog is built on every note of the
    /// raga. A chord is kept only when all of its notes belong to the raga
    /// (aroha and avaroha together). Kept chords are scored:
    ///
    /// - +2 if the chord contains Sa, otherwise -1
    /// - +1 for the vadi, +1 for the samvadi, +1 more for both
    /// - +1 if the chord blends with the raga's drone
    ///
    /// and listed from highest to lowest score. Seventh chords appear only
    /// with --fusion.
    Chords(commands::chords::ChordsArgs),
    /// Export one chord as a MIDI file
    Midi {
        /// Raga id
        raga: String,

        /// Chord name as listed by `chords` (e.g. Dm, Gsus4)
        chord: String,

        /// Note Sa sounds at (default from config)
        #[arg(long)]
        tonic: Option<String>,

        /// Allow seventh chords
        #[arg(long, overrides_with = "no_fusion")]
        fusion: bool,

        /// Disallow seventh chords even if the config enables them
        #[arg(long, overrides_with = "fusion")]
        no_fusion: bool,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print one config value, or the whole config file
    Get {
        /// Config key
        key: Option<String>,
    },
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::Config::load()?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    let ragas_path = cli.ragas.or_else(|| config.ragas_path.clone());
    let templates_path = cli.templates.or_else(|| config.templates_path.clone());

    match cli.command {
        Commands::Ragas { tradition } => {
            let library = commands::load_library(ragas_path.as_deref())?;
            commands::list_ragas(&library, tradition)?;
        }
        Commands::Show { raga, tonic } => {
            let library = commands::load_library(ragas_path.as_deref())?;
            let tonic = commands::resolve_tonic(tonic.as_deref(), &config)?;
            commands::show_raga(&library, &raga, tonic)?;
        }
        Commands::Chords(args) => {
            let library = commands::load_library(ragas_path.as_deref())?;
            let catalog = commands::load_templates(templates_path.as_deref())?;
            commands::run_chords(&args, &config, &library, &catalog)?;
        }
        Commands::Midi {
            raga,
            chord,
            tonic,
            fusion,
            no_fusion,
            output,
        } => {
            let library = commands::load_library(ragas_path.as_deref())?;
            let catalog = commands::load_templates(templates_path.as_deref())?;
            let tonic = commands::resolve_tonic(tonic.as_deref(), &config)?;
            let request = commands::midi::ExportRequest {
                raga: &raga,
                chord: &chord,
                tonic,
                fusion_mode: commands::resolve_switch(fusion, no_fusion, config.fusion_mode),
            };
            commands::export_midi(&library, &catalog, &request, &output)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show_config(&config)?,
            ConfigAction::Get { key } => commands::config::get_config(&config, key)?,
            ConfigAction::Path => commands::config::show_path()?,
            ConfigAction::Example => commands::config::show_example()?,
            ConfigAction::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}
