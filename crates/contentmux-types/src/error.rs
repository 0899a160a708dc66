//! Common error types

use thiserror::Error;

/// Errors parsing stored ContentMux values
#[derive(Error, Debug)]
pub enum ContentMuxError {
    /// Invalid content kind
    #[error("invalid content kind: {0}")]
    InvalidContentKind(String),

    /// Invalid job status
    #[error("invalid job status: {0}")]
    InvalidJobStatus(String),
}
