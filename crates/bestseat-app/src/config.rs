use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use bestseat_config::Config;

const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Load `config.json` (or an explicit path) and overlay the environment.
///
/// A missing default file is not an error; a missing explicit file is.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let (path, explicit) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };

    let mut config = if path.exists() {
        tracing::info!("Loading config from {}", path.display());
        read_config_file(&path)?
    } else if explicit {
        anyhow::bail!("Config file {} not found", path.display());
    } else {
        tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
        Config::default()
    };

    config.apply_env();
    Ok(config)
}

fn read_config_file(path: &Path) -> anyhow::Result<Config> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).with_context(|| format!("Invalid config in {}", path.display()))
}
