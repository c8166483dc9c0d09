//! Commit identifiers and the generators that hand them out
//!
//! Every commit receives its id from an [`IdGenerator`] at creation time.
//! [`SequentialIds`] is the default: a shared atomic counter producing
//! `"0"`, `"1"`, `"2"`, ... in creation order. Clones of a `SequentialIds`
//! share one counter, so several repositories can draw from the same sequence.
//!
//! [`Repository::new`](crate::Repository::new) uses the process-wide
//! generator returned by [`global_ids`]. Tests and sessions that need isolation
//! construct their own generator instead of calling [`reset_ids`].

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, OnceLock};
use uuid::Uuid;

/// Identifier of a single commit
///
/// Ids compare by numeric value when both are counter values, so `"9"`
/// sorts before `"10"`. Other ids compare as text, after all numeric ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitId(String);

impl CommitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for CommitId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0.parse::<u64>(), other.0.parse::<u64>()) {
            (Ok(a), Ok(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Ok(_), Err(_)) => Ordering::Less,
            (Err(_), Ok(_)) => Ordering::Greater,
            (Err(_), Err(_)) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for CommitId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CommitId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<CommitId> for String {
    fn from(id: CommitId) -> Self {
        id.0
    }
}

impl PartialEq<str> for CommitId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CommitId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Source of fresh commit ids
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> CommitId;
}

/// Monotonically increasing counter, shared between clones
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    next: Arc<AtomicU64>,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the counter to 0.
    ///
    /// Ids handed out before the reset will be handed out again, so only call
    /// this when no live commit relies on uniqueness across the reset.
    pub fn reset(&self) {
        self.next.store(0, AtomicOrdering::SeqCst);
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> CommitId {
        let value = self.next.fetch_add(1, AtomicOrdering::SeqCst);
        CommitId(value.to_string())
    }
}

/// Random v4 UUIDs; unique without a shared counter, but not ordered
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl UuidIds {
    pub fn new() -> Self {
        Self
    }
}

impl IdGenerator for UuidIds {
    fn next_id(&self) -> CommitId {
        CommitId(Uuid::new_v4().to_string())
    }
}

static GLOBAL_IDS: OnceLock<SequentialIds> = OnceLock::new();

/// The process-wide generator used by `Repository::new`
pub fn global_ids() -> SequentialIds {
    GLOBAL_IDS.get_or_init(SequentialIds::new).clone()
}

/// Reset the process-wide generator to 0. Test facility.
pub fn reset_ids() {
    global_ids().reset();
}
