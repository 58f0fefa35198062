//! Release sync orchestrator.
//!
//! Fetches the latest release, then walks the fixed target table one entry
//! at a time: look up the asset, download it into the run's scratch
//! directory, compare its SHA-256 with the digest GitHub publishes, copy it
//! into `libs/<platform>/<arch>/`, and re-hash the installed file. Each
//! target yields a [`TargetOutcome`]; nothing short of a metadata failure
//! stops the loop. The collected outcomes drive the README checksums and,
//! through [`SyncReport::is_success`], the exit status.

use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;
use std::io::Write;
use std::path::Path;

use crate::artefact::checksum::compute_sha256;
use crate::artefact::error::ChecksumError;
use crate::artefact::sha256_digest::Sha256Digest;
use crate::artefact::target::{TARGETS, TargetSpec};
use crate::error::{Result, SyncError};
use crate::output::Progress;
use crate::presence::{PresenceReport, check_local_files};
use crate::readme::{ChecksumEntry, render_readme, write_readme};
use crate::release::download::{DownloadError, ReleaseSource};
use crate::release::metadata::{AssetDescriptor, ReleaseMetadata, parse_release};
use crate::release::repository::RepoSlug;

/// Configuration for a sync run.
#[derive(Debug)]
pub struct SyncConfig<'a> {
    /// Repository whose latest release is synced.
    pub repo: &'a RepoSlug,
    /// Project root containing the `libs/` directory.
    pub root: &'a Utf8Path,
    /// Where the regenerated README is written.
    pub readme_path: &'a Utf8Path,
    /// When true, suppress progress output.
    pub quiet: bool,
}

/// How an installed file's contents were checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// The download matched the digest published with the asset.
    Verified,
    /// No digest was published; the hash is informational only.
    Unverified,
}

/// A target that was installed locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncResult {
    /// Absolute path of the installed file.
    pub local_path: Utf8PathBuf,
    /// SHA-256 of the bytes at `local_path`, computed after the copy.
    pub computed_hash: Sha256Digest,
    /// Whether the download was checked against a published digest.
    pub verification: Verification,
}

/// The result of processing one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetOutcome {
    /// The file was downloaded, checked where possible, and installed.
    Synced(SyncResult),
    /// The release has no asset with the expected name.
    NotFound {
        /// The asset name that was looked up.
        asset: String,
    },
    /// The download did not match the published digest; nothing was copied.
    ChecksumMismatch {
        /// Hex digest published with the asset.
        expected: String,
        /// Hex digest of the downloaded bytes.
        actual: Sha256Digest,
    },
    /// The download or local copy failed.
    DownloadFailed {
        /// Description of the failure.
        reason: String,
    },
}

impl TargetOutcome {
    /// The hash to publish in the README, if the target was installed.
    #[must_use]
    pub const fn published_hash(&self) -> Option<&Sha256Digest> {
        match self {
            Self::Synced(result) => Some(&result.computed_hash),
            Self::NotFound { .. } | Self::ChecksumMismatch { .. } | Self::DownloadFailed { .. } => {
                None
            }
        }
    }

    /// Whether this outcome fails the run.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::ChecksumMismatch { .. })
    }
}

/// A target paired with its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetReport {
    /// The target that was processed.
    pub target: TargetSpec,
    /// What happened to it.
    pub outcome: TargetOutcome,
}

/// Everything a sync run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    version: String,
    targets: Vec<TargetReport>,
    presence: PresenceReport,
    readme_path: Utf8PathBuf,
}

impl SyncReport {
    /// The synced release tag.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Per-target outcomes in target-table order.
    #[must_use]
    pub fn targets(&self) -> &[TargetReport] {
        &self.targets
    }

    /// The post-sync presence check.
    #[must_use]
    pub const fn presence(&self) -> &PresenceReport {
        &self.presence
    }

    /// Where the README was written.
    #[must_use]
    pub fn readme_path(&self) -> &Utf8Path {
        &self.readme_path
    }

    /// README checksum lines for every installed target, in table order.
    #[must_use]
    pub fn checksum_entries(&self) -> Vec<ChecksumEntry> {
        self.targets
            .iter()
            .filter_map(|report| {
                report
                    .outcome
                    .published_hash()
                    .map(|hash| ChecksumEntry {
                        hash: hash.clone(),
                        relative_path: report.target.relative_path(),
                    })
            })
            .collect()
    }

    /// Number of targets whose download did not match its digest.
    #[must_use]
    pub fn mismatch_count(&self) -> usize {
        self.targets
            .iter()
            .filter(|report| report.outcome.is_failure())
            .count()
    }

    /// Whether the run succeeded. Missing assets, failed downloads, and
    /// missing local files are warnings only.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.mismatch_count() == 0
    }

    /// Convert a failed run into [`SyncError::ChecksumMismatch`].
    ///
    /// # Errors
    ///
    /// Returns an error when any target failed checksum verification.
    pub fn into_result(self) -> Result<Self> {
        match self.mismatch_count() {
            0 => Ok(self),
            count => Err(SyncError::ChecksumMismatch { count }),
        }
    }

    /// Counts of each outcome kind.
    #[must_use]
    pub fn summary(&self) -> SyncSummary {
        let mut summary = SyncSummary {
            total: self.targets.len(),
            missing_local: self.presence.missing().len(),
            ..SyncSummary::default()
        };
        for report in &self.targets {
            match &report.outcome {
                TargetOutcome::Synced(result) => match result.verification {
                    Verification::Verified => summary.verified += 1,
                    Verification::Unverified => summary.unverified += 1,
                },
                TargetOutcome::NotFound { .. } => summary.not_found += 1,
                TargetOutcome::ChecksumMismatch { .. } => summary.mismatched += 1,
                TargetOutcome::DownloadFailed { .. } => summary.failed += 1,
            }
        }
        summary
    }
}

/// Outcome counts for the final summary line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    /// Targets attempted.
    pub total: usize,
    /// Installed and matched a published digest.
    pub verified: usize,
    /// Installed without a published digest.
    pub unverified: usize,
    /// Asset absent from the release.
    pub not_found: usize,
    /// Download did not match its digest.
    pub mismatched: usize,
    /// Download or copy failed.
    pub failed: usize,
    /// Expected local files absent after the run.
    pub missing_local: usize,
}

impl SyncSummary {
    /// Targets installed, verified or not.
    #[must_use]
    pub const fn synced(&self) -> usize {
        self.verified + self.unverified
    }
}

impl fmt::Display for SyncSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Synced {}/{} targets ({} verified, {} unverified); {} not found, {} mismatched, {} failed; {} local file(s) missing",
            self.synced(),
            self.total,
            self.verified,
            self.unverified,
            self.not_found,
            self.mismatched,
            self.failed,
            self.missing_local,
        )
    }
}

/// Per-target failures that are reported as [`TargetOutcome::DownloadFailed`].
#[derive(Debug, thiserror::Error)]
enum TransferError {
    #[error("download failed: {0}")]
    Download(#[from] DownloadError),

    #[error("checksum computation failed: {0}")]
    Checksum(#[from] ChecksumError),

    #[error("failed to install {path}: {source}")]
    Install {
        path: Utf8PathBuf,
        source: std::io::Error,
    },
}

/// Fetch and parse the latest release of `repo`.
///
/// # Errors
///
/// Returns [`SyncError::MetadataFetch`] if the request fails, the body is
/// not valid release JSON, or the release has no tag.
pub fn fetch_release(source: &dyn ReleaseSource, repo: &RepoSlug) -> Result<ReleaseMetadata> {
    let metadata_error = |reason: String| SyncError::MetadataFetch {
        repo: repo.to_string(),
        reason,
    };
    let body = source
        .fetch_latest_release(repo)
        .map_err(|e| metadata_error(e.to_string()))?;
    parse_release(&body).map_err(|e| metadata_error(e.to_string()))
}

/// Sync a single target from `release` into `root`.
///
/// The download lands in `work_dir` first and is only copied to its final
/// location once it has matched the published digest (or no digest exists).
#[must_use]
pub fn sync_target(
    spec: &TargetSpec,
    release: &ReleaseMetadata,
    source: &dyn ReleaseSource,
    work_dir: &Path,
    root: &Utf8Path,
) -> TargetOutcome {
    let Some(asset) = release.find_asset(spec.asset_name) else {
        return TargetOutcome::NotFound {
            asset: spec.asset_name.to_owned(),
        };
    };
    match transfer(spec, asset, source, work_dir, root) {
        Ok(outcome) => outcome,
        Err(e) => TargetOutcome::DownloadFailed {
            reason: e.to_string(),
        },
    }
}

fn transfer(
    spec: &TargetSpec,
    asset: &AssetDescriptor,
    source: &dyn ReleaseSource,
    work_dir: &Path,
    root: &Utf8Path,
) -> std::result::Result<TargetOutcome, TransferError> {
    let download_path = work_dir.join(spec.asset_name);
    source.download_asset(&asset.download_url, &download_path)?;
    let downloaded = compute_sha256(&download_path)?;

    let verification = match asset.digest.as_deref() {
        Some(api_digest) if downloaded.matches_api_digest(api_digest) => Verification::Verified,
        Some(api_digest) => {
            return Ok(TargetOutcome::ChecksumMismatch {
                expected: Sha256Digest::expected_hex(api_digest).to_owned(),
                actual: downloaded,
            });
        }
        None => Verification::Unverified,
    };

    let local_dir = root.join(spec.local_dir());
    let local_path = local_dir.join(spec.local_filename);
    install(&download_path, &local_dir, &local_path)?;
    let computed_hash = compute_sha256(local_path.as_std_path())?;
    log::debug!("installed {local_path} ({computed_hash})");

    Ok(TargetOutcome::Synced(SyncResult {
        local_path,
        computed_hash,
        verification,
    }))
}

/// Copy `from` over `to`, creating `dir` first.
fn install(
    from: &Path,
    dir: &Utf8Path,
    to: &Utf8Path,
) -> std::result::Result<(), TransferError> {
    let install_error = |source| TransferError::Install {
        path: to.to_owned(),
        source,
    };
    std::fs::create_dir_all(dir).map_err(install_error)?;
    std::fs::copy(from, to).map_err(install_error)?;
    Ok(())
}

/// Sync every target in order, reporting progress as each completes.
#[must_use]
pub fn sync_targets(
    targets: &[TargetSpec],
    release: &ReleaseMetadata,
    source: &dyn ReleaseSource,
    work_dir: &Path,
    root: &Utf8Path,
    progress: &mut Progress<'_>,
) -> Vec<TargetReport> {
    targets
        .iter()
        .map(|spec| {
            progress.info(format_args!("Syncing {spec} ({})...", spec.asset_name));
            let outcome = sync_target(spec, release, source, work_dir, root);
            report_outcome(spec, &outcome, progress);
            TargetReport {
                target: *spec,
                outcome,
            }
        })
        .collect()
}

fn report_outcome(spec: &TargetSpec, outcome: &TargetOutcome, progress: &mut Progress<'_>) {
    match outcome {
        TargetOutcome::Synced(result) => match result.verification {
            Verification::Verified => progress.ok(format_args!(
                "{} verified ({})",
                spec.relative_path(),
                result.computed_hash
            )),
            Verification::Unverified => progress.info(format_args!(
                "  note: no digest published for {}; sha256 {}",
                spec.asset_name, result.computed_hash
            )),
        },
        TargetOutcome::NotFound { asset } => {
            progress.warn(format_args!("asset {asset} not found in release; skipping"));
        }
        TargetOutcome::ChecksumMismatch { expected, actual } => progress.error(format_args!(
            "checksum mismatch for {}: expected {expected}, got {actual}",
            spec.asset_name
        )),
        TargetOutcome::DownloadFailed { reason } => {
            progress.warn(format_args!("{}: {reason}", spec.asset_name));
        }
    }
}

/// Run a full sync: fetch, download and verify, check presence, and
/// regenerate the README.
///
/// `work_dir` is the run's scratch directory; the caller owns its
/// lifetime so that it is removed on every exit path.
///
/// # Errors
///
/// Returns [`SyncError::MetadataFetch`] before any download if the release
/// cannot be read, or [`SyncError::WriteFailed`] if the README cannot be
/// written. Per-target problems are reported in the returned
/// [`SyncReport`].
pub fn run_sync(
    config: &SyncConfig<'_>,
    source: &dyn ReleaseSource,
    work_dir: &Path,
    stderr: &mut dyn Write,
) -> Result<SyncReport> {
    let mut progress = Progress::new(stderr, config.quiet);

    progress.info(format_args!("Fetching latest release of {}...", config.repo));
    let release = fetch_release(source, config.repo)?;
    progress.info(format_args!("Latest version: {}", release.tag_name()));
    progress.blank();

    let targets = sync_targets(
        &TARGETS,
        &release,
        source,
        work_dir,
        config.root,
        &mut progress,
    );

    progress.blank();
    progress.info("Checking local files...");
    let presence = check_local_files(config.root, &TARGETS);
    for missing in presence.missing() {
        progress.warn(format_args!("missing local file {missing}"));
    }
    if presence.is_complete() {
        progress.ok(format_args!("all {} local files present", presence.checked()));
    }

    let report = SyncReport {
        version: release.tag_name().to_owned(),
        targets,
        presence,
        readme_path: config.readme_path.to_owned(),
    };
    let readme = render_readme(report.version(), config.repo, &report.checksum_entries());
    write_readme(report.readme_path(), &readme)?;
    progress.info(format_args!("Updated {}", report.readme_path()));

    progress.blank();
    progress.info(report.summary());
    Ok(report)
}

/// What a sync would do for one target, without downloading anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedTarget {
    /// The target.
    pub target: TargetSpec,
    /// The matching asset, if the release has one.
    pub asset: Option<AssetDescriptor>,
}

impl fmt::Display for PlannedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match &self.asset {
            None => "asset not found",
            Some(asset) if asset.digest.is_some() => "download and verify",
            Some(_) => "download (no digest published)",
        };
        write!(
            f,
            "{} <- {}: {status}",
            self.target.relative_path(),
            self.target.asset_name
        )
    }
}

/// Match each target against the release assets.
#[must_use]
pub fn plan_targets(targets: &[TargetSpec], release: &ReleaseMetadata) -> Vec<PlannedTarget> {
    targets
        .iter()
        .map(|spec| PlannedTarget {
            target: *spec,
            asset: release.find_asset(spec.asset_name).cloned(),
        })
        .collect()
}

/// Fetch the release and print the sync plan without writing anything.
///
/// The plan lines are printed even in quiet mode; only the header is
/// suppressed.
///
/// # Errors
///
/// Returns [`SyncError::MetadataFetch`] if the release cannot be read.
pub fn run_dry(
    config: &SyncConfig<'_>,
    source: &dyn ReleaseSource,
    stderr: &mut dyn Write,
) -> Result<Vec<PlannedTarget>> {
    let release = fetch_release(source, config.repo)?;
    let plan = plan_targets(&TARGETS, &release);

    let mut progress = Progress::new(stderr, config.quiet);
    progress.info("Dry run - no files will be modified");
    progress.blank();
    progress.info(format_args!("Repository: {}", config.repo));
    progress.info(format_args!("Latest version: {}", release.tag_name()));
    progress.info(format_args!("Project root: {}", config.root));
    progress.info(format_args!("README: {}", config.readme_path));
    progress.blank();
    for planned in &plan {
        progress.always(format_args!("  {planned}"));
    }
    Ok(plan)
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
