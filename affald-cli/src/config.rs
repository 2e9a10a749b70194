use std::fs;
use std::io::Error as IoError;
use std::path::{Path, PathBuf};

use affald_core::{PickupSensor, SensorRegistry};
use serde::Deserialize;
use thiserror::Error;
use toml::de::Error as TomlError;

pub(crate) const DEFAULT_CONFIG_PATH: &str = "config/affald.toml";
pub(crate) const DEFAULT_LOG_LEVEL: &str = "info";
pub(crate) const DEFAULT_ASSET_DIR: &str = "icons";

#[derive(Debug, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) logging: LoggingSection,
    #[serde(default)]
    pub(crate) assets: AssetsSection,
    #[serde(default, rename = "sensor")]
    pub(crate) sensors: Vec<PickupSensor>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoggingSection {
    pub(crate) level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_owned(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssetsSection {
    /// Directory holding `<identifier>.jpg` icons.
    pub(crate) directory: PathBuf,
}

impl Default for AssetsSection {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_ASSET_DIR),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigFileError {
    #[error("failed to read config: {0}")]
    Read(#[from] IoError),
    #[error("failed to parse config: {0}")]
    Parse(#[from] TomlError),
}

pub(crate) fn load_from_path(path: impl AsRef<Path>) -> Result<Config, ConfigFileError> {
    let contents = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    Ok(config)
}

impl Config {
    /// Move the configured sensors into a registry.
    pub(crate) fn into_registry(self) -> (SensorRegistry, PathBuf) {
        (SensorRegistry::new(self.sensors), self.assets.directory)
    }
}
