//! Interrupt handling for the download scratch directory.
//!
//! A sync downloads into one temporary directory. Normal exits and error
//! paths remove it when the owning [`tempfile::TempDir`] drops, but a
//! Ctrl-C terminates the process without running destructors, so a
//! handler removes the directory explicitly before exiting.

use crate::output::write_stderr_line;
use std::path::{Path, PathBuf};

/// Exit status used when the run is interrupted (128 + SIGINT).
pub const EXIT_CODE_INTERRUPTED: u8 = 130;

/// Register a Ctrl-C handler that removes `work_dir` and exits with
/// [`EXIT_CODE_INTERRUPTED`].
///
/// # Errors
///
/// Returns an error if a handler is already registered or the platform
/// signal hook cannot be installed.
pub fn install_cleanup_handler(work_dir: PathBuf) -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        remove_scratch_dir(&work_dir);
        write_stderr_line(&mut std::io::stderr(), "interrupted; temporary files removed");
        std::process::exit(i32::from(EXIT_CODE_INTERRUPTED));
    })
}

/// Remove `path` and everything below it. A directory that is already
/// gone is not an error.
pub fn remove_scratch_dir(path: &Path) {
    match std::fs::remove_dir_all(path) {
        Ok(()) => log::debug!("removed scratch directory {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => log::debug!("failed to remove {}: {e}", path.display()),
    }
}
