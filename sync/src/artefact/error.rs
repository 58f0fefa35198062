//! Error types for artefact values and checksum computation.
//!
//! Each variant provides a descriptive message identifying the invalid input
//! and the constraint that was violated.

use thiserror::Error;

/// Errors arising from invalid artefact-related values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArtefactError {
    /// A SHA-256 digest is not a valid 64-character lowercase hex string.
    #[error("invalid SHA-256 digest: {reason}")]
    InvalidSha256Digest {
        /// Description of the validation failure.
        reason: String,
    },

    /// A release repository identifier is not of the form `owner/repo`.
    #[error("invalid repository \"{value}\": {reason}")]
    InvalidRepository {
        /// The rejected identifier.
        value: String,
        /// Description of the validation failure.
        reason: String,
    },
}

/// Errors arising while hashing a file on disk.
#[derive(Debug, Error)]
pub enum ChecksumError {
    /// The file could not be opened or read.
    #[error("failed to read {path} for hashing: {source}")]
    Io {
        /// The file being hashed.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using [`ArtefactError`].
pub type Result<T> = std::result::Result<T, ArtefactError>;
