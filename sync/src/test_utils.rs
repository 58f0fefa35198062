//! Shared test utilities for the sync crate.
//!
//! Provides an in-memory [`ReleaseSource`] and helpers for building
//! GitHub-shaped release JSON with matching asset payloads.

use crate::artefact::checksum::sha256_bytes;
use crate::artefact::target::TARGETS;
use crate::release::download::{DownloadError, ReleaseSource};
use crate::release::repository::{DEFAULT_REPOSITORY, RepoSlug};
use camino::Utf8PathBuf;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::Path;
use tempfile::TempDir;

/// Release tag used by fixtures unless a test needs another.
pub const FIXTURE_TAG: &str = "v1.0.3";

/// Deterministic payload for an asset, distinct per name.
#[must_use]
pub fn payload_for(asset_name: &str) -> Vec<u8> {
    format!("{asset_name} payload\n").into_bytes()
}

/// Lowercase hex SHA-256 of `bytes`.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    sha256_bytes(bytes).into_inner()
}

/// The digest string GitHub would publish for `bytes`.
#[must_use]
pub fn api_digest(bytes: &[u8]) -> String {
    format!("sha256:{}", sha256_hex(bytes))
}

/// Download URL for an asset of the default repository.
#[must_use]
pub fn asset_url(tag: &str, asset_name: &str) -> String {
    format!("https://github.com/{DEFAULT_REPOSITORY}/releases/download/{tag}/{asset_name}")
}

/// An asset served by [`StubReleaseSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureAsset {
    /// Asset filename.
    pub name: String,
    /// Bytes returned when the asset is downloaded.
    pub payload: Vec<u8>,
    /// Digest reported in the release metadata.
    pub digest: Option<String>,
}

impl FixtureAsset {
    /// An asset whose published digest matches its payload.
    #[must_use]
    pub fn verified(name: &str) -> Self {
        let payload = payload_for(name);
        Self {
            name: name.to_owned(),
            digest: Some(api_digest(&payload)),
            payload,
        }
    }

    /// An asset with no published digest.
    #[must_use]
    pub fn undigested(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            payload: payload_for(name),
            digest: None,
        }
    }

    /// An asset advertising an arbitrary digest string.
    #[must_use]
    pub fn with_digest(name: &str, digest: &str) -> Self {
        Self {
            name: name.to_owned(),
            payload: payload_for(name),
            digest: Some(digest.to_owned()),
        }
    }
}

/// One verified asset for every entry in the target table.
#[must_use]
pub fn complete_release() -> Vec<FixtureAsset> {
    TARGETS
        .iter()
        .map(|spec| FixtureAsset::verified(spec.asset_name))
        .collect()
}

/// Render release metadata JSON in the shape of the GitHub API.
#[must_use]
pub fn release_json(tag: &str, assets: &[FixtureAsset]) -> String {
    let asset_values: Vec<serde_json::Value> = assets
        .iter()
        .map(|asset| {
            serde_json::json!({
                "name": asset.name,
                "browser_download_url": asset_url(tag, &asset.name),
                "digest": asset.digest,
                "size": asset.payload.len(),
            })
        })
        .collect();
    serde_json::json!({
        "tag_name": tag,
        "name": tag,
        "draft": false,
        "assets": asset_values,
    })
    .to_string()
}

/// Create a temporary directory and return it with its UTF-8 path.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or its path is not
/// valid UTF-8.
pub fn utf8_temp_dir() -> std::io::Result<(TempDir, Utf8PathBuf)> {
    let dir = tempfile::tempdir()?;
    let path = Utf8PathBuf::try_from(dir.path().to_path_buf())
        .map_err(camino::FromPathBufError::into_io_error)?;
    Ok((dir, path))
}

/// An in-memory release source.
///
/// Serves a fixed metadata body and a URL-to-payload map, and records
/// every download request so tests can assert on ordering.
#[derive(Debug)]
pub struct StubReleaseSource {
    metadata: Result<String, String>,
    payloads: HashMap<String, Vec<u8>>,
    downloads: RefCell<Vec<String>>,
    metadata_calls: Cell<usize>,
}

impl StubReleaseSource {
    /// Serve `assets` as release `tag`.
    #[must_use]
    pub fn new(tag: &str, assets: &[FixtureAsset]) -> Self {
        let payloads = assets
            .iter()
            .map(|asset| (asset_url(tag, &asset.name), asset.payload.clone()))
            .collect();
        Self {
            metadata: Ok(release_json(tag, assets)),
            payloads,
            downloads: RefCell::new(Vec::new()),
            metadata_calls: Cell::new(0),
        }
    }

    /// Serve a raw metadata body with no downloadable assets.
    #[must_use]
    pub fn from_metadata(body: &str) -> Self {
        Self {
            metadata: Ok(body.to_owned()),
            payloads: HashMap::new(),
            downloads: RefCell::new(Vec::new()),
            metadata_calls: Cell::new(0),
        }
    }

    /// Fail every metadata request with `reason`.
    #[must_use]
    pub fn failing(reason: &str) -> Self {
        Self {
            metadata: Err(reason.to_owned()),
            payloads: HashMap::new(),
            downloads: RefCell::new(Vec::new()),
            metadata_calls: Cell::new(0),
        }
    }

    /// Drop the payload at `url` so downloading it returns 404.
    #[must_use]
    pub fn without_payload(mut self, url: &str) -> Self {
        self.payloads.remove(url);
        self
    }

    /// URLs requested so far, in order.
    #[must_use]
    pub fn downloads(&self) -> Vec<String> {
        self.downloads.borrow().clone()
    }

    /// Number of metadata requests served.
    #[must_use]
    pub fn metadata_calls(&self) -> usize {
        self.metadata_calls.get()
    }
}

impl ReleaseSource for StubReleaseSource {
    fn fetch_latest_release(&self, repo: &RepoSlug) -> Result<String, DownloadError> {
        self.metadata_calls.set(self.metadata_calls.get().saturating_add(1));
        self.metadata
            .clone()
            .map_err(|reason| DownloadError::HttpError {
                url: format!("{}/latest", repo.releases_url()),
                reason,
            })
    }

    fn download_asset(&self, url: &str, dest: &Path) -> Result<(), DownloadError> {
        self.downloads.borrow_mut().push(url.to_owned());
        let payload = self.payloads.get(url).ok_or_else(|| DownloadError::NotFound {
            url: url.to_owned(),
        })?;
        std::fs::write(dest, payload)?;
        Ok(())
    }
}
