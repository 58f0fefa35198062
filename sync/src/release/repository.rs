//! GitHub `owner/repo` identifier newtype.

use crate::artefact::error::{ArtefactError, Result};
use std::fmt;
use std::str::FromStr;

/// The repository publishing the prebuilt signer libraries.
pub const DEFAULT_REPOSITORY: &str = "elliottech/lighter-go";

/// A validated `owner/repo` identifier.
///
/// # Examples
///
/// ```
/// use lighter_signer_sync::release::repository::RepoSlug;
///
/// let repo: RepoSlug = "elliottech/lighter-go".parse().expect("valid slug");
/// assert_eq!(repo.owner(), "elliottech");
/// assert_eq!(repo.name(), "lighter-go");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSlug {
    owner: String,
    name: String,
}

impl RepoSlug {
    /// Return the repository owner.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Return the repository name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Public releases page for this repository.
    #[must_use]
    pub fn releases_url(&self) -> String {
        format!("https://github.com/{self}/releases")
    }

    /// Download URL template for assets of the given release tag.
    ///
    /// The asset filename is left as a `<asset>` placeholder.
    #[must_use]
    pub fn download_url_template(&self, tag: &str) -> String {
        format!("https://github.com/{self}/releases/download/{tag}/<asset>")
    }
}

impl Default for RepoSlug {
    fn default() -> Self {
        Self {
            owner: "elliottech".to_owned(),
            name: "lighter-go".to_owned(),
        }
    }
}

impl FromStr for RepoSlug {
    type Err = ArtefactError;

    fn from_str(value: &str) -> Result<Self> {
        let invalid = |reason: &str| ArtefactError::InvalidRepository {
            value: value.to_owned(),
            reason: reason.to_owned(),
        };
        let (owner, name) = value
            .split_once('/')
            .ok_or_else(|| invalid("expected OWNER/REPO"))?;
        for segment in [owner, name] {
            if segment.is_empty() {
                return Err(invalid("owner and repository must be non-empty"));
            }
            if !segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            {
                return Err(invalid(
                    "only ASCII letters, digits, '-', '_', and '.' are allowed",
                ));
            }
        }
        Ok(Self {
            owner: owner.to_owned(),
            name: name.to_owned(),
        })
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
