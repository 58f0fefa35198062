//! Release metadata returned by the GitHub "latest release" endpoint.
//!
//! Only the fields the sync pipeline consumes are modelled; everything
//! else in the API response is ignored during deserialization.

use serde::Deserialize;

/// Errors arising from release metadata parsing.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// The body is not valid JSON or has the wrong shape.
    #[error("release metadata parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The response carries no usable version tag.
    #[error("release metadata has no tag_name")]
    MissingTag,
}

/// A single file attached to a release.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetDescriptor {
    /// Asset filename as uploaded.
    pub name: String,
    /// Direct download URL.
    #[serde(rename = "browser_download_url")]
    pub download_url: String,
    /// Content digest reported by the API, e.g. `sha256:<hex>`.
    #[serde(default)]
    pub digest: Option<String>,
}

/// The subset of a GitHub release consumed by the sync pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseMetadata {
    tag_name: String,
    assets: Vec<AssetDescriptor>,
}

#[derive(Deserialize)]
struct RawRelease {
    #[serde(default)]
    tag_name: Option<String>,
    #[serde(default)]
    assets: Vec<AssetDescriptor>,
}

impl ReleaseMetadata {
    /// Build metadata from already-validated parts.
    #[must_use]
    pub const fn new(tag_name: String, assets: Vec<AssetDescriptor>) -> Self {
        Self { tag_name, assets }
    }

    /// Return the release tag, e.g. `v1.0.3`.
    #[must_use]
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// Return the release assets in API order.
    #[must_use]
    pub fn assets(&self) -> &[AssetDescriptor] {
        &self.assets
    }

    /// Find an asset by exact name.
    #[must_use]
    pub fn find_asset(&self, name: &str) -> Option<&AssetDescriptor> {
        self.assets.iter().find(|asset| asset.name == name)
    }
}

/// Parse a "latest release" JSON body into [`ReleaseMetadata`].
///
/// # Errors
///
/// Returns [`MetadataError::Json`] for malformed JSON and
/// [`MetadataError::MissingTag`] when `tag_name` is absent, null, or empty.
///
/// # Examples
///
/// ```
/// use lighter_signer_sync::release::metadata::parse_release;
///
/// let json = r#"{"tag_name":"v1.0.3","assets":[]}"#;
/// let release = parse_release(json).expect("valid release");
/// assert_eq!(release.tag_name(), "v1.0.3");
/// ```
pub fn parse_release(json: &str) -> Result<ReleaseMetadata, MetadataError> {
    let raw: RawRelease = serde_json::from_str(json)?;
    let tag_name = raw
        .tag_name
        .filter(|tag| !tag.trim().is_empty())
        .ok_or(MetadataError::MissingTag)?;
    Ok(ReleaseMetadata::new(tag_name, raw.assets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const RELEASE_JSON: &str = r#"{
        "tag_name": "v1.0.3",
        "name": "v1.0.3",
        "assets": [
            {
                "name": "lighter-signer-linux-amd64.so",
                "browser_download_url": "https://example.test/linux.so",
                "digest": "sha256:aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
                "size": 123
            },
            {
                "name": "lighter-signer-linux-amd64.h",
                "browser_download_url": "https://example.test/linux.h",
                "digest": null
            },
            {
                "name": "notes.txt",
                "browser_download_url": "https://example.test/notes.txt"
            }
        ]
    }"#;

    #[test]
    fn parses_tag_and_assets_in_order() {
        let release = parse_release(RELEASE_JSON).expect("valid");
        assert_eq!(release.tag_name(), "v1.0.3");
        let names: Vec<_> = release.assets().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "lighter-signer-linux-amd64.so",
                "lighter-signer-linux-amd64.h",
                "notes.txt"
            ]
        );
    }

    #[test]
    fn digest_is_optional() {
        let release = parse_release(RELEASE_JSON).expect("valid");
        let header = release
            .find_asset("lighter-signer-linux-amd64.h")
            .expect("header asset");
        assert!(header.digest.is_none());
        let notes = release.find_asset("notes.txt").expect("notes asset");
        assert!(notes.digest.is_none());
        let lib = release
            .find_asset("lighter-signer-linux-amd64.so")
            .expect("library asset");
        assert!(lib.digest.as_deref().is_some_and(|d| d.starts_with("sha256:")));
    }

    #[test]
    fn find_asset_requires_exact_name() {
        let release = parse_release(RELEASE_JSON).expect("valid");
        assert!(release.find_asset("lighter-signer-linux-amd64").is_none());
        assert!(release.find_asset("LIGHTER-SIGNER-LINUX-AMD64.SO").is_none());
    }

    #[rstest]
    #[case::missing(r#"{"assets":[]}"#)]
    #[case::null(r#"{"tag_name":null,"assets":[]}"#)]
    #[case::empty(r#"{"tag_name":"","assets":[]}"#)]
    #[case::rate_limited(r#"{"message":"API rate limit exceeded"}"#)]
    fn missing_tag_is_rejected(#[case] json: &str) {
        let err = parse_release(json).expect_err("should fail");
        assert!(matches!(err, MetadataError::MissingTag));
    }

    #[test]
    fn rejects_invalid_json_syntax() {
        let err = parse_release("{not json").expect_err("should fail");
        assert!(matches!(err, MetadataError::Json(_)));
    }

    #[test]
    fn missing_assets_defaults_to_empty() {
        let release = parse_release(r#"{"tag_name":"v2.0.0"}"#).expect("valid");
        assert!(release.assets().is_empty());
    }
}
