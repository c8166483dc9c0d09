//! Named single-branch repository
//!
//! A [`Repository`] owns one backward chain of commits. New commits become
//! the head; [`Repository::drop_commit`] splices any commit out of the chain;
//! [`Repository::synchronize`] moves another repository's whole history onto
//! the end of this one.

use crate::chain::{Chain, Iter};
use crate::commit::Commit;
use crate::config::DisplayConfig;
use crate::error::{HistoryError, HistoryResult};
use crate::ids::{global_ids, CommitId, IdGenerator};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

pub struct Repository {
    name: String,
    chain: Chain,
    ids: Arc<dyn IdGenerator>,
    config: DisplayConfig,
}

impl Repository {
    /// Create an empty repository drawing ids from the process-wide generator
    pub fn new(name: impl Into<String>) -> HistoryResult<Self> {
        Self::with_generator(name, Arc::new(global_ids()))
    }

    /// Create an empty repository drawing ids from `ids`
    pub fn with_generator(
        name: impl Into<String>,
        ids: Arc<dyn IdGenerator>,
    ) -> HistoryResult<Self> {
        Self::with_config(name, ids, DisplayConfig::default())
    }

    /// Create an empty repository with explicit id source and display settings
    pub fn with_config(
        name: impl Into<String>,
        ids: Arc<dyn IdGenerator>,
        config: DisplayConfig,
    ) -> HistoryResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(HistoryError::InvalidName);
        }
        config.validate()?;

        Ok(Self {
            name,
            chain: Chain::new(),
            ids,
            config,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Id of the most recent commit, `None` when there are no commits
    pub fn head_id(&self) -> Option<&CommitId> {
        self.chain.head().map(|commit| &commit.id)
    }

    pub fn head(&self) -> Option<&Commit> {
        self.chain.head()
    }

    /// Id of the oldest commit
    pub fn tail_id(&self) -> Option<&CommitId> {
        self.chain.tail().map(|commit| &commit.id)
    }

    /// Number of commits reachable from head
    pub fn size(&self) -> usize {
        self.chain.iter().count()
    }

    /// Commits from most recent to oldest
    pub fn iter(&self) -> Iter<'_> {
        self.chain.iter()
    }

    pub fn contains(&self, target_id: &str) -> bool {
        self.get(target_id).is_some()
    }

    /// First commit with `target_id` found walking from head
    pub fn get(&self, target_id: &str) -> Option<&Commit> {
        self.chain.iter().find(|commit| commit.id == target_id)
    }

    /// The `n` most recent commits, newest first, one per line.
    ///
    /// Returns fewer entries when the chain is shorter and an empty string for
    /// an empty repository. `n` must be at least 1.
    pub fn history(&self, n: usize) -> HistoryResult<String> {
        if n == 0 {
            return Err(HistoryError::InvalidHistoryLength { n });
        }

        Ok(self
            .chain
            .iter()
            .take(n)
            .map(|commit| commit.display_with(&self.config))
            .collect::<Vec<_>>()
            .join(self.config.history_separator.as_str()))
    }

    /// Record a new commit on top of the current head and return its id
    pub fn commit(&mut self, message: impl Into<String>) -> CommitId {
        let commit = Commit::new(message, self.ids.as_ref());
        let id = commit.id.clone();
        self.chain.push(commit);

        debug!(repository = %self.name, commit = %id, "Created commit");
        id
    }

    /// Remove the commit with `target_id` from the chain.
    ///
    /// Returns `false` when the repository is empty or has no such commit.
    pub fn drop_commit(&mut self, target_id: &str) -> bool {
        match self.chain.remove(target_id) {
            Some(removed) => {
                debug!(
                    repository = %self.name,
                    commit = %removed.id,
                    remaining = self.size(),
                    "Dropped commit"
                );
                true
            }
            None => false,
        }
    }

    /// Append a copy of `other`'s history after this repository's oldest
    /// commit, then empty `other`.
    ///
    /// Copies keep their ids, messages and timestamps but share nothing with
    /// the originals. Does nothing when `other` has no commits.
    pub fn synchronize(&mut self, other: &mut Repository) {
        if other.is_empty() {
            return;
        }

        let copied = self.chain.append_copy_of(&other.chain);
        other.chain.clear();

        debug!(
            repository = %self.name,
            source = %other.name,
            copied,
            "Synchronized history"
        );
    }

    /// Serializable view of the whole chain, newest first
    pub fn snapshot(&self) -> RepositorySnapshot {
        let commits: Vec<CommitEntry> = self.chain.iter().map(CommitEntry::from).collect();
        RepositorySnapshot {
            name: self.name.clone(),
            size: commits.len(),
            head: self.head_id().cloned(),
            commits,
        }
    }

    pub fn to_json(&self) -> HistoryResult<String> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.chain.head() {
            None => write!(f, "{} - No commits", self.name),
            Some(head) => write!(
                f,
                "{} - Current head: {}",
                self.name,
                head.display_with(&self.config)
            ),
        }
    }
}

impl fmt::Debug for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("name", &self.name)
            .field("head", &self.head_id())
            .field("size", &self.size())
            .finish()
    }
}

impl<'a> IntoIterator for &'a Repository {
    type Item = &'a Commit;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Point-in-time view of a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySnapshot {
    pub name: String,
    pub size: usize,
    pub head: Option<CommitId>,
    pub commits: Vec<CommitEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitEntry {
    pub id: CommitId,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&Commit> for CommitEntry {
    fn from(commit: &Commit) -> Self {
        Self {
            id: commit.id.clone(),
            message: commit.message.clone(),
            timestamp: commit.timestamp,
        }
    }
}
