//! Post-sync check that every expected local file exists.
//!
//! The check is advisory: it catches partial runs, earlier failures, and
//! manual deletions, but never changes the exit status on its own.

use crate::artefact::target::TargetSpec;
use camino::Utf8Path;

/// Result of checking the expected local paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresenceReport {
    checked: usize,
    missing: Vec<String>,
}

impl PresenceReport {
    /// Number of paths checked.
    #[must_use]
    pub const fn checked(&self) -> usize {
        self.checked
    }

    /// Relative paths that do not exist, in target order.
    #[must_use]
    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    /// Number of paths that exist.
    #[must_use]
    pub fn present(&self) -> usize {
        self.checked.saturating_sub(self.missing.len())
    }

    /// Whether every expected file exists.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Check that each target's local file exists under `root`.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use lighter_signer_sync::artefact::target::TARGETS;
/// use lighter_signer_sync::presence::check_local_files;
///
/// let report = check_local_files(Utf8Path::new("/nonexistent"), &TARGETS);
/// assert_eq!(report.missing().len(), 8);
/// ```
#[must_use]
pub fn check_local_files(root: &Utf8Path, targets: &[TargetSpec]) -> PresenceReport {
    let missing: Vec<String> = targets
        .iter()
        .map(TargetSpec::relative_path)
        .filter(|relative| !root.join(relative).is_file())
        .collect();
    log::debug!(
        "presence check under {root}: {} of {} missing",
        missing.len(),
        targets.len()
    );
    PresenceReport {
        checked: targets.len(),
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artefact::target::TARGETS;
    use camino::Utf8PathBuf;

    fn temp_root() -> (tempfile::TempDir, Utf8PathBuf) {
        let temp = tempfile::tempdir().expect("temp dir");
        let path = Utf8PathBuf::try_from(temp.path().to_path_buf()).expect("UTF-8 path");
        (temp, path)
    }

    #[test]
    fn empty_root_reports_every_target_missing() {
        let (_temp, root) = temp_root();
        let report = check_local_files(&root, &TARGETS);
        assert_eq!(report.checked(), 8);
        assert_eq!(report.present(), 0);
        assert_eq!(
            report.missing().first().map(String::as_str),
            Some("libs/linux/amd64/liblighter-signer.so")
        );
    }

    #[test]
    fn populated_root_is_complete() {
        let (_temp, root) = temp_root();
        for spec in &TARGETS {
            let path = root.join(spec.relative_path());
            std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
            std::fs::write(&path, b"payload").expect("write");
        }
        let report = check_local_files(&root, &TARGETS);
        assert!(report.is_complete());
        assert_eq!(report.present(), 8);
    }

    #[test]
    fn directory_in_place_of_file_counts_as_missing() {
        let (_temp, root) = temp_root();
        let spec = TARGETS[1];
        std::fs::create_dir_all(root.join(spec.relative_path())).expect("mkdir");
        let report = check_local_files(&root, &[spec]);
        assert_eq!(report.missing(), [spec.relative_path()]);
    }
}
