//! lighter-signer library sync.
//!
//! This crate keeps a project's copy of the prebuilt `lighter-signer` shared
//! libraries and C headers in step with the latest GitHub release. It is used
//! by the `lighter-signer-sync` CLI binary and can be consumed
//! programmatically for testing or custom workflows.
//!
//! # Modules
//!
//! - [`artefact`] - Target table, SHA-256 digests, and file hashing
//! - [`check`] - Offline verification against recorded checksums
//! - [`cli`] - Command-line argument definitions
//! - [`error`] - Run-level error types
//! - [`interrupt`] - Scratch directory cleanup on Ctrl-C
//! - [`output`] - Progress reporting to stderr
//! - [`presence`] - Post-sync local file presence check
//! - [`readme`] - README rendering and checksum parsing
//! - [`release`] - Release metadata and HTTP retrieval
//! - [`sync`] - Per-target sync orchestration

pub mod artefact;
pub mod check;
pub mod cli;
pub mod error;
pub mod interrupt;
pub mod output;
pub mod presence;
pub mod readme;
pub mod release;
pub mod sync;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
