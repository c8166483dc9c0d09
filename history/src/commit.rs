use crate::config::DisplayConfig;
use crate::ids::{CommitId, IdGenerator};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single commit: an id, a message and the moment it was made.
///
/// Commits are immutable once created. The link to the previous commit is
/// owned by the chain holding the commit, not by the commit itself, so the
/// same `Commit` value can be copied into another chain without sharing links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Unique identifier handed out by an [`IdGenerator`]
    pub id: CommitId,

    /// Message describing the change, stored verbatim
    pub message: String,

    /// Creation time, millisecond resolution
    pub timestamp: DateTime<Utc>,
}

impl Commit {
    /// Create a commit with the next id from `ids`, stamped with the current time
    pub fn new(message: impl Into<String>, ids: &dyn IdGenerator) -> Self {
        Self {
            id: ids.next_id(),
            message: message.into(),
            timestamp: Utc::now().trunc_subsecs(3),
        }
    }

    /// Rebuild a commit from known parts, e.g. when restoring a copy
    pub fn from_parts(id: CommitId, message: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            message: message.into(),
            timestamp: timestamp.trunc_subsecs(3),
        }
    }

    /// Creation time in milliseconds since the Unix epoch
    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }

    /// Render as `"<id> at <timestamp>: <message>"` using `config`
    pub fn display_with(&self, config: &DisplayConfig) -> String {
        format!(
            "{} at {}: {}",
            self.id,
            config.format_timestamp(self.timestamp),
            self.message
        )
    }
}

impl fmt::Display for Commit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_with(&DisplayConfig::default()))
    }
}
