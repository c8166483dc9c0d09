use crate::error::{HistoryError, HistoryResult};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d at %H:%M:%S %Z";
pub const DEFAULT_HISTORY_SEPARATOR: &str = "\n";

/// Time zone commit timestamps are rendered in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayZone {
    #[default]
    Local,
    Utc,
}

/// Controls how commits and histories are rendered as text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub zone: DisplayZone,
    pub timestamp_format: String,
    pub history_separator: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            zone: DisplayZone::Local,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            history_separator: DEFAULT_HISTORY_SEPARATOR.to_string(),
        }
    }
}

impl DisplayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zone(mut self, zone: DisplayZone) -> Self {
        self.zone = zone;
        self
    }

    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    pub fn with_history_separator(mut self, separator: impl Into<String>) -> Self {
        self.history_separator = separator.into();
        self
    }

    pub fn validate(&self) -> HistoryResult<()> {
        if self.timestamp_format.is_empty() {
            return Err(HistoryError::InvalidConfig {
                message: "Timestamp format cannot be empty".to_string(),
            });
        }

        if StrftimeItems::new(&self.timestamp_format).any(|item| matches!(item, Item::Error)) {
            return Err(HistoryError::InvalidConfig {
                message: format!("Invalid timestamp format: {}", self.timestamp_format),
            });
        }

        if self.history_separator.is_empty() {
            return Err(HistoryError::InvalidConfig {
                message: "History separator cannot be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Render `timestamp` in the configured zone and format.
    ///
    /// Only call on a validated config: chrono panics while formatting an
    /// invalid format string.
    pub fn format_timestamp(&self, timestamp: DateTime<Utc>) -> String {
        match self.zone {
            DisplayZone::Local => match local_time_zone() {
                Some(zone) => timestamp
                    .with_timezone(&zone)
                    .format(&self.timestamp_format)
                    .to_string(),
                // No zone name available, `%Z` falls back to the offset.
                None => timestamp
                    .with_timezone(&Local)
                    .format(&self.timestamp_format)
                    .to_string(),
            },
            DisplayZone::Utc => timestamp.format(&self.timestamp_format).to_string(),
        }
    }
}

/// The machine's IANA time zone: `TZ` when it names one, otherwise the
/// system setting. `None` when neither resolves to a known zone.
pub fn local_time_zone() -> Option<Tz> {
    if let Ok(name) = std::env::var("TZ") {
        if let Ok(zone) = name.trim_start_matches(':').parse::<Tz>() {
            return Some(zone);
        }
    }

    iana_time_zone::get_timezone().ok()?.parse().ok()
}
