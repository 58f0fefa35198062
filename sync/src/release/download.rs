//! Release metadata and asset retrieval over HTTP.
//!
//! Provides a trait-based abstraction for reading the latest release of a
//! repository and downloading its assets, enabling dependency injection for
//! testing.

use super::repository::RepoSlug;
use std::path::Path;
use std::time::Duration;

/// Default GitHub REST API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Media type requested from the GitHub REST API.
const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// API version pinned in requests so the response shape stays stable.
const GITHUB_API_VERSION: &str = "2022-11-28";

/// User agent sent with every request; GitHub rejects anonymous agents.
const USER_AGENT: &str = concat!("lighter-signer-sync/", env!("CARGO_PKG_VERSION"));

/// Trait for reading releases and downloading their assets.
///
/// Abstractions allow tests to mock HTTP behaviour without network access.
#[cfg_attr(test, mockall::automock)]
pub trait ReleaseSource {
    /// Fetch the raw JSON body describing the latest release of `repo`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server answers with an
    /// error status.
    fn fetch_latest_release(&self, repo: &RepoSlug) -> Result<String, DownloadError>;

    /// Download the asset at `url` into `dest`.
    ///
    /// # Errors
    ///
    /// Returns an error if the download or file write fails.
    fn download_asset(&self, url: &str, dest: &Path) -> Result<(), DownloadError>;
}

/// Errors arising from release download operations.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// HTTP request failed.
    #[error("request failed for {url}: {reason}")]
    HttpError {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The requested resource was not found (HTTP 404).
    #[error("not found: {url}")]
    NotFound {
        /// The URL that returned 404.
        url: String,
    },

    /// I/O error writing the downloaded file.
    #[error("I/O error writing download: {0}")]
    Io(#[from] std::io::Error),
}

/// Connection settings for [`HttpReleaseSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// REST API base URL without a trailing slash.
    pub api_base: String,
    /// Optional bearer token for API requests.
    pub token: Option<String>,
    /// Optional global per-request timeout.
    pub timeout: Option<Duration>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            token: None,
            timeout: None,
        }
    }
}

/// HTTP-based release source using `ureq`.
pub struct HttpReleaseSource {
    agent: ureq::Agent,
    api_base: String,
    token: Option<String>,
}

impl HttpReleaseSource {
    /// Build a source from connection settings.
    #[must_use]
    pub fn new(config: &HttpConfig) -> Self {
        let agent_config = ureq::Agent::config_builder()
            .timeout_global(config.timeout)
            .build();
        Self {
            agent: ureq::Agent::new_with_config(agent_config),
            api_base: config.api_base.trim_end_matches('/').to_owned(),
            token: config.token.clone(),
        }
    }

    /// Construct the "latest release" endpoint URL for `repo`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lighter_signer_sync::release::download::{HttpConfig, HttpReleaseSource};
    /// use lighter_signer_sync::release::repository::RepoSlug;
    ///
    /// let source = HttpReleaseSource::new(&HttpConfig::default());
    /// let url = source.latest_release_url(&RepoSlug::default());
    /// assert_eq!(
    ///     url,
    ///     "https://api.github.com/repos/elliottech/lighter-go/releases/latest"
    /// );
    /// ```
    #[must_use]
    pub fn latest_release_url(&self, repo: &RepoSlug) -> String {
        format!(
            "{}/repos/{}/{}/releases/latest",
            self.api_base,
            repo.owner(),
            repo.name()
        )
    }
}

impl ReleaseSource for HttpReleaseSource {
    fn fetch_latest_release(&self, repo: &RepoSlug) -> Result<String, DownloadError> {
        let url = self.latest_release_url(repo);
        log::debug!("fetching release metadata from {url}");
        let mut request = self
            .agent
            .get(&url)
            .header("Accept", GITHUB_ACCEPT)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .header("User-Agent", USER_AGENT);
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        let response = request.call().map_err(|e| map_ureq_error(&url, &e))?;
        response
            .into_body()
            .read_to_string()
            .map_err(|e| DownloadError::HttpError {
                url: url.clone(),
                reason: e.to_string(),
            })
    }

    fn download_asset(&self, url: &str, dest: &Path) -> Result<(), DownloadError> {
        log::debug!("downloading {url} to {}", dest.display());
        let response = self
            .agent
            .get(url)
            .header("User-Agent", USER_AGENT)
            .call()
            .map_err(|e| map_ureq_error(url, &e))?;
        let mut file = std::fs::File::create(dest)?;
        std::io::copy(&mut response.into_body().as_reader(), &mut file)?;
        Ok(())
    }
}

/// Map a ureq error to a [`DownloadError`].
fn map_ureq_error(url: &str, err: &ureq::Error) -> DownloadError {
    match err {
        ureq::Error::StatusCode(404) => DownloadError::NotFound {
            url: url.to_owned(),
        },
        other => DownloadError::HttpError {
            url: url.to_owned(),
            reason: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::default_base(DEFAULT_API_BASE)]
    #[case::trailing_slash("https://api.github.com/")]
    fn latest_release_url_is_normalised(#[case] api_base: &str) {
        let source = HttpReleaseSource::new(&HttpConfig {
            api_base: api_base.to_owned(),
            ..HttpConfig::default()
        });
        let repo: RepoSlug = "owner/project".parse().expect("valid slug");
        assert_eq!(
            source.latest_release_url(&repo),
            "https://api.github.com/repos/owner/project/releases/latest"
        );
    }

    #[test]
    fn map_ureq_error_maps_404_to_not_found() {
        let err = ureq::Error::StatusCode(404);
        let mapped = map_ureq_error("https://example.test/release", &err);
        assert!(matches!(mapped, DownloadError::NotFound { .. }));
    }

    #[test]
    fn map_ureq_error_maps_other_status_to_http_error() {
        let err = ureq::Error::StatusCode(403);
        let mapped = map_ureq_error("https://example.test/release", &err);
        match mapped {
            DownloadError::HttpError { url, reason } => {
                assert_eq!(url, "https://example.test/release");
                assert!(reason.contains("403"), "reason: {reason}");
            }
            other => panic!("expected HttpError, got {other:?}"),
        }
    }

    #[test]
    fn user_agent_names_the_tool() {
        assert!(USER_AGENT.starts_with("lighter-signer-sync/"));
    }
}
