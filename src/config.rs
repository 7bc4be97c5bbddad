// src/config.rs

//! Configuration for the CrateLight session.
//!
//! A small set of serde-derived structs, deserializable from a JSON file
//! so an installation can keep its wall geometry and export directory
//! out of the command history. Every field has a default, so an absent
//! or partial file is fine.

use std::path::{Path, PathBuf};

use anyhow::Context;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::layout::Layout;

/// Environment variable naming the config file to load.
pub const CONFIG_ENV_VAR: &str = "CRATELIGHT_CONFIG";

/// Root configuration, grouped into sections.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Where exported `.crate` artifacts land.
    pub output: OutputConfig,
    /// Values pre-seeded into the wall-creation form.
    pub defaults: FormDefaults,
}

/// Export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for `.crate` files.
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            // The original tool wrote into its working directory.
            directory: PathBuf::from("."),
        }
    }
}

/// Initial wall-creation form values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormDefaults {
    pub wall_width: usize,
    pub wall_height: usize,
    pub crate_width: usize,
    pub crate_height: usize,
    pub layout: Layout,
}

impl Default for FormDefaults {
    fn default() -> Self {
        FormDefaults {
            wall_width: 4,
            wall_height: 3,
            crate_width: 10,
            crate_height: 5,
            layout: Layout::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the path in [`CONFIG_ENV_VAR`], if set.
    ///
    /// No variable means defaults; a variable pointing at a missing or
    /// unreadable file is an error surfaced at startup rather than a
    /// silent fallback.
    pub fn load_from_env() -> anyhow::Result<Config> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)),
            None => {
                debug!("{} not set, using default configuration", CONFIG_ENV_VAR);
                Ok(Config::default())
            }
        }
    }

    /// Loads and parses a JSON config file.
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        info!("loaded configuration from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert_eq!(config.output.directory, PathBuf::from("."));
        assert_eq!(config.defaults.layout, Layout::default());
        assert!(config.defaults.wall_width > 0);
        assert!(config.defaults.crate_height > 0);
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let json = r#"{ "defaults": { "wall_width": 8, "layout": "Layout5" } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.defaults.wall_width, 8);
        assert_eq!(config.defaults.layout, Layout::ColsRightStartBottom);
        // Untouched sections and fields keep their defaults.
        assert_eq!(config.defaults.wall_height, FormDefaults::default().wall_height);
        assert_eq!(config.output.directory, PathBuf::from("."));
    }

    #[test]
    fn loading_a_missing_file_is_an_error() {
        let err = Config::load(Path::new("/nonexistent/cratelight.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
