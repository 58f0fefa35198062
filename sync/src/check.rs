//! Offline verification of installed files against the README.
//!
//! Reads the checksum block of an existing README and re-hashes each
//! target's local file. No network access is needed, so this is the
//! command to run in CI after checking out a tree with committed
//! libraries.

use camino::Utf8Path;
use std::io::Write;

use crate::artefact::checksum::compute_sha256;
use crate::artefact::error::ChecksumError;
use crate::artefact::sha256_digest::Sha256Digest;
use crate::artefact::target::{TARGETS, TargetSpec};
use crate::error::{Result, SyncError};
use crate::output::Progress;
use crate::readme::{ChecksumEntry, parse_checksums, parse_version};

/// State of one local file relative to the README.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// The file hash equals the recorded checksum.
    Match,
    /// The file hash differs from the recorded checksum.
    Mismatch {
        /// Checksum recorded in the README.
        recorded: Sha256Digest,
        /// Hash of the file on disk.
        actual: Sha256Digest,
    },
    /// The file exists but the README has no checksum for it.
    NotRecorded,
    /// The file does not exist.
    Missing,
}

/// A target paired with its check result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCheck {
    /// The target that was checked.
    pub target: TargetSpec,
    /// What was found.
    pub status: FileStatus,
}

/// Result of checking every target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    version: Option<String>,
    files: Vec<FileCheck>,
}

impl CheckReport {
    /// Version recorded in the README, if present.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Per-target results in table order.
    #[must_use]
    pub fn files(&self) -> &[FileCheck] {
        &self.files
    }

    fn count(&self, predicate: impl Fn(&FileStatus) -> bool) -> usize {
        self.files.iter().filter(|file| predicate(&file.status)).count()
    }

    /// Number of files that no longer match the README.
    #[must_use]
    pub fn mismatch_count(&self) -> usize {
        self.count(|status| matches!(status, FileStatus::Mismatch { .. }))
    }

    /// Whether every recorded checksum matched. Missing and unrecorded
    /// files are warnings only.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.mismatch_count() == 0
    }

    /// Convert a failed check into [`SyncError::LocalChecksumMismatch`].
    ///
    /// # Errors
    ///
    /// Returns an error when any file mismatched its recorded checksum.
    pub fn into_result(self) -> Result<Self> {
        match self.mismatch_count() {
            0 => Ok(self),
            count => Err(SyncError::LocalChecksumMismatch { count }),
        }
    }
}

/// Check each target under `root` against `recorded`.
///
/// # Errors
///
/// Returns [`SyncError::ReadFailed`] if an existing file cannot be hashed.
pub fn check_files(
    root: &Utf8Path,
    targets: &[TargetSpec],
    recorded: &[ChecksumEntry],
) -> Result<Vec<FileCheck>> {
    targets
        .iter()
        .map(|spec| {
            let relative = spec.relative_path();
            let local_path = root.join(&relative);
            let expected = recorded
                .iter()
                .find(|entry| entry.relative_path == relative)
                .map(|entry| &entry.hash);
            let status = file_status(&local_path, expected)?;
            Ok(FileCheck {
                target: *spec,
                status,
            })
        })
        .collect()
}

fn file_status(local_path: &Utf8Path, expected: Option<&Sha256Digest>) -> Result<FileStatus> {
    if !local_path.is_file() {
        return Ok(FileStatus::Missing);
    }
    let Some(recorded) = expected else {
        return Ok(FileStatus::NotRecorded);
    };
    let actual = compute_sha256(local_path.as_std_path()).map_err(|e| match e {
        ChecksumError::Io { source, .. } => SyncError::ReadFailed {
            path: local_path.to_owned(),
            source,
        },
    })?;
    log::trace!("{local_path}: recorded {recorded}, actual {actual}");
    if &actual == recorded {
        Ok(FileStatus::Match)
    } else {
        Ok(FileStatus::Mismatch {
            recorded: recorded.clone(),
            actual,
        })
    }
}

/// Verify installed files against the README at `readme_path`.
///
/// # Errors
///
/// Returns [`SyncError::ReadFailed`] if the README or a local file cannot
/// be read. Mismatches are reported in the returned [`CheckReport`].
pub fn run_check(
    root: &Utf8Path,
    readme_path: &Utf8Path,
    quiet: bool,
    stderr: &mut dyn Write,
) -> Result<CheckReport> {
    let readme = std::fs::read_to_string(readme_path).map_err(|source| SyncError::ReadFailed {
        path: readme_path.to_owned(),
        source,
    })?;
    let recorded = parse_checksums(&readme);
    let version = parse_version(&readme).map(str::to_owned);

    let mut progress = Progress::new(stderr, quiet);
    match &version {
        Some(tag) => progress.info(format_args!("Checking {readme_path} (version {tag})...")),
        None => progress.warn(format_args!("{readme_path} records no version")),
    }

    let files = check_files(root, &TARGETS, &recorded)?;
    for file in &files {
        let relative = file.target.relative_path();
        match &file.status {
            FileStatus::Match => progress.ok(&relative),
            FileStatus::Mismatch {
                recorded: expected,
                actual,
            } => progress.error(format_args!("{relative}: expected {expected}, got {actual}")),
            FileStatus::NotRecorded => {
                progress.warn(format_args!("{relative} has no recorded checksum"));
            }
            FileStatus::Missing => progress.warn(format_args!("missing local file {relative}")),
        }
    }

    let report = CheckReport { version, files };
    progress.blank();
    progress.info(format_args!(
        "{} of {} files match the recorded checksums",
        report.count(|status| *status == FileStatus::Match),
        report.files.len()
    ));
    Ok(report)
}
