//! Remote release source: repository identity, metadata, and downloads.
//!
//! # Sub-modules
//!
//! - [`download`] - `ReleaseSource` trait and its `ureq` implementation.
//! - [`metadata`] - Release metadata model and JSON parsing.
//! - [`repository`] - `owner/repo` identifier newtype (`RepoSlug`).

pub mod download;
pub mod metadata;
pub mod repository;
