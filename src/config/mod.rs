//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Archive build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Directory of tournament subfolders holding raw match JSON
    #[serde(default = "default_input_root")]
    pub input_root: PathBuf,

    /// Directory receiving the generated `matches/` and `main/` trees
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,

    /// Hero dictionary JSON file
    #[serde(default = "default_hero_table_path")]
    pub hero_table_path: PathBuf,

    /// Base path prefixed to hero icon files inside rendered pages
    #[serde(default = "default_image_base_path")]
    pub image_base_path: String,
}

fn default_input_root() -> PathBuf {
    PathBuf::from("./opendotaraw")
}

fn default_output_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_hero_table_path() -> PathBuf {
    PathBuf::from("./dictionaries/data/heroes.json")
}

fn default_image_base_path() -> String {
    "../../../dictionaries/image".to_string()
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            input_root: default_input_root(),
            output_root: default_output_root(),
            hero_table_path: default_hero_table_path(),
            image_base_path: default_image_base_path(),
        }
    }
}

impl ArchiveConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: ArchiveConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_root.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "input_root must not be empty".to_string(),
            ));
        }

        if self.output_root.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "output_root must not be empty".to_string(),
            ));
        }

        if self.hero_table_path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "hero_table_path must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
