//! Error types for the signer library sync tool.
//!
//! Only run-level failures live here. Per-target problems (a missing asset,
//! a digest mismatch, a failed download) are values in
//! [`TargetOutcome`](crate::sync::TargetOutcome) and are folded into a
//! single exit status once every target has been attempted.

use crate::artefact::error::ArtefactError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that terminate a sync or check run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The latest release could not be fetched or has no version tag.
    #[error("failed to fetch latest release of {repo}: {reason}")]
    MetadataFetch {
        /// The `owner/repo` that was queried.
        repo: String,
        /// Description of the failure.
        reason: String,
    },

    /// One or more downloaded assets did not match their published digest.
    #[error("{count} target(s) failed checksum verification")]
    ChecksumMismatch {
        /// Number of mismatched targets.
        count: usize,
    },

    /// One or more local files no longer match the README checksums.
    #[error("{count} local file(s) do not match the recorded checksums")]
    LocalChecksumMismatch {
        /// Number of mismatched files.
        count: usize,
    },

    /// A configuration value was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ArtefactError),

    /// The scratch directory for downloads could not be created.
    #[error("failed to create temporary directory")]
    TempDir {
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The interrupt cleanup handler could not be registered.
    #[error("failed to install interrupt handler: {0}")]
    InterruptHandler(#[from] ctrlc::Error),

    /// A file could not be read.
    #[error("failed to read {path}")]
    ReadFailed {
        /// The file that could not be read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A file could not be written.
    #[error("failed to write {path}")]
    WriteFailed {
        /// The file that could not be written.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using [`SyncError`].
pub type Result<T> = std::result::Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_fetch_names_repository() {
        let err = SyncError::MetadataFetch {
            repo: "elliottech/lighter-go".to_owned(),
            reason: "release metadata has no tag_name".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("elliottech/lighter-go"));
        assert!(msg.contains("tag_name"));
    }

    #[test]
    fn checksum_mismatch_reports_count() {
        let err = SyncError::ChecksumMismatch { count: 2 };
        assert_eq!(err.to_string(), "2 target(s) failed checksum verification");
    }

    #[test]
    fn write_failed_preserves_source() {
        let err = SyncError::WriteFailed {
            path: Utf8PathBuf::from("libs/README.md"),
            source: std::io::Error::other("disk full"),
        };
        assert!(err.to_string().contains("libs/README.md"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
