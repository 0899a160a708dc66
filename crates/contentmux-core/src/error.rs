//! Core errors

use thiserror::Error;

/// Usage accounting errors
#[derive(Error, Debug)]
pub enum CoreError {
    /// User not found
    #[error("user not found")]
    UserNotFound,

    /// Content job not found
    #[error("content job not found")]
    JobNotFound,

    /// Job already reached a final status
    #[error("content job is already {0}")]
    JobFinished(String),

    /// Storage returned a count the gate cannot interpret
    #[error("invalid usage count from storage: {0}")]
    InvalidUsageCount(i64),

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] contentmux_db::DbError),
}

impl CoreError {
    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound | Self::JobNotFound | Self::Database(contentmux_db::DbError::NotFound)
        )
    }
}
