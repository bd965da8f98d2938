//! File discovery error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilesError {
    /// The caller passed unusable roots or suffixes; nothing was walked.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
