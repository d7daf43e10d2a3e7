use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for raga-chords.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (RAGA_* prefix)
/// 3. Config file (~/.config/raga-chords/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// The note Sa sounds at.
    ///
    /// Can be set via:
    /// - CLI: --tonic D
    /// - ENV: RAGA_TONIC
    /// - Config: tonic = "D"
    #[serde(default = "default_tonic")]
    pub tonic: String,

    /// Include seventh chords.
    #[serde(default)]
    pub fusion_mode: bool,

    /// Only keep chords that contain Sa.
    #[serde(default)]
    pub must_include_sa: bool,

    /// Cap on the number of chords printed. Unlimited when unset.
    #[serde(default)]
    pub max_results: Option<usize>,

    /// TOML raga library replacing the built-in one.
    #[serde(default)]
    pub ragas_path: Option<PathBuf>,

    /// TOML chord template catalog replacing the standard one.
    #[serde(default)]
    pub templates_path: Option<PathBuf>,

    /// Default log filter; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tonic: default_tonic(),
            fusion_mode: false,
            must_include_sa: false,
            max_results: None,
            ragas_path: None,
            templates_path: None,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/raga-chords/config.toml
    /// Reads environment variables with RAGA_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("raga");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;

        Ok(config)
    }
}

fn default_tonic() -> String {
    String::from("C")
}

fn default_log_level() -> String {
    String::from("warn")
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/raga-chords/config.toml
/// - macOS: ~/Library/Application Support/raga-chords/config.toml
/// - Windows: %APPDATA%\raga-chords\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("raga-chords")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Raga Chords Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (RAGA_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# The note Sa sounds at (C, C#, Db, D, ...)
#
# Can also be set via:
# - CLI: raga-chords chords yaman --tonic D
# - Environment: RAGA_TONIC=D
tonic = "C"

# Include seventh chords (7, m7, maj7)
fusion_mode = false

# Only list chords that contain Sa
must_include_sa = false

# Cap on the number of chords listed (unset = no cap)
#max_results = 18

# Replace the built-in raga library with your own
#ragas_path = "/path/to/ragas.toml"

# Replace the standard chord templates with your own
#templates_path = "/path/to/templates.toml"

# Default log filter (error, warn, info, debug, trace); RUST_LOG overrides
log_level = "warn"
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}
