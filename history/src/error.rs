use thiserror::Error;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Repository name cannot be empty")]
    InvalidName,

    #[error("History length must be a positive integer, got {n}")]
    InvalidHistoryLength { n: usize },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type HistoryResult<T> = Result<T, HistoryError>;
