//! Error types for depstrap-core

use thiserror::Error;

/// Errors that can occur in core operations
///
/// Dependency provisioning never surfaces these: acquisition and build
/// failures are contained at their component and reported as outcomes.
/// Only the linear toolchain download path propagates errors.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Download of '{url}' failed with status {status}")]
    DownloadFailed {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Digest mismatch: expected {expected}, got {actual}")]
    DigestMismatch { expected: String, actual: String },
}
