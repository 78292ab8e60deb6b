//! Engine configuration loaded from `quest_engine.toml`.
//!
//! Every field is optional; a missing or broken file falls back to defaults
//! so a misconfigured install still starts.

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::data_paths::{asset_path, asset_root};

/// Default config file name, looked up inside the asset root.
pub const CONFIG_FILE: &str = "quest_engine.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory containing the `quests/` folder.
    pub asset_root: PathBuf,
    /// Quests parsed into the cache at startup.
    pub preload: Vec<String>,
    /// Treat validation findings as failures in `quest check`.
    pub strict: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            asset_root: asset_root(),
            preload: Vec::new(),
            strict: false,
        }
    }
}

/// Location of the config file when none is given on the command line.
pub fn default_config_path() -> PathBuf {
    asset_path(CONFIG_FILE)
}

/// Load engine configuration, falling back to defaults on any error.
///
/// # Logging
/// - `info!` on successful load
/// - `warn!` if the file cannot be read or parsed
pub fn load_config(toml_path: &Path) -> EngineConfig {
    match try_load_config(toml_path) {
        Ok(config) => {
            info!(
                "engine config loaded from '{}' (asset root '{}')",
                toml_path.display(),
                config.asset_root.display()
            );
            config
        },
        Err(e) => {
            warn!(
                "Could not load engine config from '{}': {e:#}. Using defaults.",
                toml_path.display()
            );
            EngineConfig::default()
        },
    }
}

/// Read and parse a config file.
///
/// A relative `asset_root` is resolved against the directory of the file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn try_load_config(toml_path: &Path) -> Result<EngineConfig> {
    let text =
        fs::read_to_string(toml_path).with_context(|| format!("reading engine config from '{}'", toml_path.display()))?;
    let mut config: EngineConfig =
        toml::from_str(&text).with_context(|| format!("parsing engine config from '{}'", toml_path.display()))?;

    if config.asset_root.is_relative()
        && let Some(dir) = toml_path.parent()
    {
        config.asset_root = dir.join(&config.asset_root);
    }
    Ok(config)
}
