mod chain;
pub mod commit;
pub mod config;
pub mod error;
pub mod ids;
pub mod repository;

pub use chain::Iter;
pub use commit::Commit;
pub use config::{DisplayConfig, DisplayZone};
pub use error::{HistoryError, HistoryResult};
pub use ids::{global_ids, reset_ids, CommitId, IdGenerator, SequentialIds, UuidIds};
pub use repository::{CommitEntry, Repository, RepositorySnapshot};

pub mod prelude {
    pub use crate::commit::*;
    pub use crate::config::*;
    pub use crate::error::*;
    pub use crate::ids::*;
    pub use crate::repository::*;
}
