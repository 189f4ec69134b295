//! Library error types.

use thiserror::Error;

/// Errors that can occur while loading a [`GridStyle`](crate::GridStyle).
#[derive(Debug, Error)]
pub enum StyleError {
    /// The style file could not be read.
    #[error("failed to read style file: {0}")]
    Io(#[from] std::io::Error),

    /// The style document was not valid JSON.
    #[error("failed to parse style document: {0}")]
    Parse(#[from] serde_json::Error),
}
