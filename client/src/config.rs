use history::{DisplayConfig, DisplayZone, HistoryError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Invalid(#[from] HistoryError),
}

/// Settings read from the client's TOML config file
///
/// ```toml
/// [display]
/// zone = "utc"
/// timestamp_format = "%Y-%m-%d at %H:%M:%S %Z"
/// history_separator = "\n"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub display: DisplayConfig,
}

impl ClientConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = toml::from_str(source)?;
        config.display.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    pub fn with_utc(mut self, utc: bool) -> Self {
        if utc {
            self.display.zone = DisplayZone::Utc;
        }
        self
    }
}
