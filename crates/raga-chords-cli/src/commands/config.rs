use anyhow::{Context, Result};

use crate::config::{self, Config};

const VALID_KEYS: &str =
    "tonic, fusion_mode, must_include_sa, max_results, ragas_path, templates_path, log_level";

/// Show the current effective configuration.
pub fn show_config(config: &Config) -> Result<()> {
    println!("Current Configuration");
    println!("=====================\n");

    let path = config::config_file_path();
    println!("Config file: {}", path.display());
    println!(
        "File exists: {}\n",
        if path.exists() { "yes" } else { "no (using defaults)" }
    );

    println!("Settings:");
    for key in VALID_KEYS.split(", ") {
        if let Some(value) = value_of(config, key) {
            println!("  {}: {}", key, value);
        }
    }

    println!("\nPriority: CLI args > ENV vars (RAGA_*) > Config file > Defaults");

    Ok(())
}

/// Get a specific config value, or print the whole config file.
pub fn get_config(config: &Config, key: Option<String>) -> Result<()> {
    if let Some(key) = key {
        match value_of(config, &key) {
            Some(value) => println!("{}", value),
            None => anyhow::bail!("Unknown config key: {}\n\nValid keys: {}", key, VALID_KEYS),
        }
    } else {
        let config_path = config::config_file_path();

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).context("Failed to read config file")?;
            print!("{}", contents);
        } else {
            println!("Config file does not exist: {}", config_path.display());
            println!("\nRun 'raga-chords config init' to create it.");
        }
    }

    Ok(())
}

/// Show the config file path.
pub fn show_path() -> Result<()> {
    println!("{}", config::config_file_path().display());
    Ok(())
}

/// Show example configuration.
pub fn show_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure raga-chords.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}

fn value_of(config: &Config, key: &str) -> Option<String> {
    let not_set = || String::from("<not set>");
    let value = match key {
        "tonic" => config.tonic.clone(),
        "fusion_mode" => config.fusion_mode.to_string(),
        "must_include_sa" => config.must_include_sa.to_string(),
        "max_results" => config
            .max_results
            .map_or_else(not_set, |n| n.to_string()),
        "ragas_path" => config
            .ragas_path
            .as_ref()
            .map_or_else(not_set, |p| p.display().to_string()),
        "templates_path" => config
            .templates_path
            .as_ref()
            .map_or_else(not_set, |p| p.display().to_string()),
        "log_level" => config.log_level.clone(),
        _ => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_of_known_keys() {
        let config = Config::default();
        assert_eq!(value_of(&config, "tonic").as_deref(), Some("C"));
        assert_eq!(value_of(&config, "fusion_mode").as_deref(), Some("false"));
        assert_eq!(value_of(&config, "max_results").as_deref(), Some("<not set>"));
        assert_eq!(value_of(&config, "log_level").as_deref(), Some("warn"));
    }

    #[test]
    fn test_every_listed_key_resolves() {
        let config = Config::default();
        for key in VALID_KEYS.split(", ") {
            assert!(value_of(&config, key).is_some(), "{}", key);
        }
    }

    #[test]
    fn test_unknown_key() {
        assert!(value_of(&Config::default(), "database_path").is_none());
        assert!(get_config(&Config::default(), Some("bogus".to_string())).is_err());
    }
}
