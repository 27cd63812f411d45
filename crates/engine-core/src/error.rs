use connectors::error::DbError;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that end a batch scan. None of them are retried.
#[derive(Debug, Error)]
pub enum PluckError {
    /// Rejected before any query was issued.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Column resolution or query execution failed.
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// The consumer returned an error; iteration stopped at that row.
    #[error("Consumer failed: {0}")]
    Consumer(#[source] BoxError),
}

impl PluckError {
    pub fn invalid(message: impl Into<String>) -> Self {
        PluckError::InvalidArgument(message.into())
    }
}
