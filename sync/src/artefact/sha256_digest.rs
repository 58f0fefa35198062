//! SHA-256 digest newtype for artefact verification.
//!
//! Validates that the value is a 64-character lowercase hexadecimal string
//! representing a 256-bit hash digest. GitHub reports asset digests with an
//! algorithm prefix (`sha256:<hex>`); [`Sha256Digest::expected_hex`] strips it.

use super::error::{ArtefactError, Result};
use std::fmt;

/// Expected length of a hex-encoded SHA-256 digest.
const DIGEST_HEX_LEN: usize = 64;

/// Algorithm prefix used by the GitHub API for asset digests.
pub const SHA256_PREFIX: &str = "sha256:";

/// A validated hex-encoded SHA-256 digest string.
///
/// # Examples
///
/// ```
/// use lighter_signer_sync::artefact::sha256_digest::Sha256Digest;
///
/// let hex = "a".repeat(64);
/// let digest: Sha256Digest = hex.as_str().try_into().unwrap();
/// assert_eq!(digest.as_str().len(), 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sha256Digest(String);

impl Sha256Digest {
    /// Return the digest as a hex string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Wrap hex produced by a local SHA-256 hasher without re-validating it.
    pub(crate) const fn from_trusted_hex(hex: String) -> Self {
        Self(hex)
    }

    /// Return the hex portion of an API digest string.
    ///
    /// The `sha256:` prefix is stripped when present; any other value is
    /// returned unchanged so that a later comparison reports it as a
    /// mismatch rather than silently ignoring it.
    ///
    /// # Examples
    ///
    /// ```
    /// use lighter_signer_sync::artefact::sha256_digest::Sha256Digest;
    ///
    /// assert_eq!(Sha256Digest::expected_hex("sha256:abc"), "abc");
    /// assert_eq!(Sha256Digest::expected_hex("md5:abc"), "md5:abc");
    /// ```
    #[must_use]
    pub fn expected_hex(api_digest: &str) -> &str {
        api_digest.strip_prefix(SHA256_PREFIX).unwrap_or(api_digest)
    }

    /// Compare against the hex portion of an API digest, case-sensitively.
    #[must_use]
    pub fn matches_api_digest(&self, api_digest: &str) -> bool {
        self.0 == Self::expected_hex(api_digest)
    }
}

impl TryFrom<&str> for Sha256Digest {
    type Error = ArtefactError;

    fn try_from(value: &str) -> Result<Self> {
        validate_sha256(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for Sha256Digest {
    type Error = ArtefactError;

    fn try_from(value: String) -> Result<Self> {
        validate_sha256(&value)?;
        Ok(Self(value))
    }
}

impl AsRef<str> for Sha256Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate that `value` is a well-formed hex-encoded SHA-256 digest.
fn validate_sha256(value: &str) -> Result<()> {
    if value.len() != DIGEST_HEX_LEN {
        return Err(ArtefactError::InvalidSha256Digest {
            reason: format!(
                "expected {DIGEST_HEX_LEN} hex characters, got {}",
                value.len()
            ),
        });
    }
    if let Some(bad) = value.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ArtefactError::InvalidSha256Digest {
            reason: format!("non-hex character '{bad}'"),
        });
    }
    if value.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(ArtefactError::InvalidSha256Digest {
            reason: "digest must be lowercase".to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn valid_digest() -> String {
        "a".repeat(64)
    }

    #[test]
    fn accepts_valid_sixty_four_char_hex() {
        let digest = Sha256Digest::try_from(valid_digest().as_str());
        assert!(digest.is_ok());
    }

    #[rstest]
    #[case::too_short("abcdef".to_owned())]
    #[case::too_long("a".repeat(65))]
    #[case::non_hex(format!("{}g", "a".repeat(63)))]
    #[case::uppercase("A".repeat(64))]
    fn rejects_malformed_digests(#[case] value: String) {
        let result = Sha256Digest::try_from(value);
        assert!(matches!(
            result,
            Err(ArtefactError::InvalidSha256Digest { .. })
        ));
    }

    #[test]
    fn display_shows_full_digest() {
        let hex = valid_digest();
        let digest = Sha256Digest::try_from(hex.as_str()).expect("known good");
        assert_eq!(format!("{digest}"), hex);
    }

    #[rstest]
    #[case::prefixed(format!("sha256:{}", "a".repeat(64)), true)]
    #[case::bare("a".repeat(64), true)]
    #[case::uppercase_api_value(format!("sha256:{}", "A".repeat(64)), false)]
    #[case::different_hash(format!("sha256:{}", "b".repeat(64)), false)]
    #[case::other_algorithm(format!("sha512:{}", "a".repeat(64)), false)]
    fn matches_api_digest_compares_hex_portion(#[case] api: String, #[case] expected: bool) {
        let digest = Sha256Digest::try_from(valid_digest()).expect("known good");
        assert_eq!(digest.matches_api_digest(&api), expected);
    }
}
