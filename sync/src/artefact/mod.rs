//! Artefact value types: the target table, SHA-256 digests, and hashing.
//!
//! # Sub-modules
//!
//! - [`checksum`] - SHA-256 computation over files and byte slices.
//! - [`error`] - Semantic error types for validation failures.
//! - [`sha256_digest`] - SHA-256 digest newtype (`Sha256Digest`).
//! - [`target`] - The fixed table of synced files (`TargetSpec`).

pub mod checksum;
pub mod error;
pub mod sha256_digest;
pub mod target;
