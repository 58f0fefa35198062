//! SHA-256 computation over files on disk.

use super::error::ChecksumError;
use super::sha256_digest::Sha256Digest;
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::Path;

/// Compute the SHA-256 digest of a file.
///
/// Reads the file at `path` in chunks and returns the lowercase hex
/// digest as a validated [`Sha256Digest`].
///
/// # Errors
///
/// Returns [`ChecksumError::Io`] if the file cannot be read.
pub fn compute_sha256(path: &Path) -> Result<Sha256Digest, ChecksumError> {
    let io_error = |source| ChecksumError::Io {
        path: path.display().to_string(),
        source,
    };
    let mut file = fs::File::open(path).map_err(io_error)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher).map_err(io_error)?;
    Ok(digest_from_hasher(hasher))
}

/// Compute the SHA-256 digest of an in-memory byte slice.
#[must_use]
pub fn sha256_bytes(bytes: &[u8]) -> Sha256Digest {
    digest_from_hasher(Sha256::new_with_prefix(bytes))
}

fn digest_from_hasher(hasher: Sha256) -> Sha256Digest {
    // sha2 output formatted with `{:x}` is always 64 lowercase hex chars.
    Sha256Digest::from_trusted_hex(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // echo -n "hello" | sha256sum
    const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

    #[test]
    fn computes_known_digest_for_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("hello.txt");
        std::fs::write(&path, b"hello").expect("write file");

        let digest = compute_sha256(&path).expect("hash file");
        assert_eq!(digest.as_str(), HELLO_SHA256);
    }

    #[test]
    fn file_and_byte_digests_agree() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("payload.bin");
        let payload = vec![7u8; 20_000];
        std::fs::write(&path, &payload).expect("write file");

        let from_file = compute_sha256(&path).expect("hash file");
        assert_eq!(from_file, sha256_bytes(&payload));
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent.so");

        let err = compute_sha256(&path).expect_err("missing file should fail");
        assert!(err.to_string().contains("absent.so"));
    }
}
