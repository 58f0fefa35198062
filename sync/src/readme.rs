//! README generation and parsing for the synced library directory.
//!
//! The README is rebuilt from scratch on every sync. Its checksum block
//! lists `<sha256>  <relative-path>` lines in target-table order, in the
//! same format `sha256sum` emits, so `sha256sum -c` can verify it too.
//! The rendered text depends only on its inputs; there are no timestamps,
//! so re-running against an unchanged release reproduces it byte for byte.

use crate::artefact::sha256_digest::Sha256Digest;
use crate::error::{Result, SyncError};
use crate::release::repository::RepoSlug;
use camino::{Utf8Path, Utf8PathBuf};

/// Default README location relative to the project root.
pub const README_RELATIVE_PATH: &str = "libs/README.md";

/// Heading that introduces the checksum block.
const CHECKSUM_HEADING: &str = "## Checksums (SHA256)";

/// Prefix of the version line.
const VERSION_PREFIX: &str = "Latest version: **";

/// Static description of the directory layout.
const LAYOUT: &str = "\
libs/
├── linux/
│   ├── amd64/
│   │   ├── liblighter-signer.so
│   │   └── liblighter-signer.h
│   └── arm64/
│       ├── liblighter-signer.so
│       └── liblighter-signer.h
├── darwin/
│   └── arm64/
│       ├── liblighter-signer.dylib
│       └── liblighter-signer.h
└── windows/
    └── amd64/
        ├── liblighter-signer.dll
        └── liblighter-signer.h
";

/// One line of the checksum block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumEntry {
    /// Hex SHA-256 of the file.
    pub hash: Sha256Digest,
    /// Path relative to the project root.
    pub relative_path: String,
}

/// Render the README for `version` of `repo` with the given checksums.
///
/// Entries are written in the order supplied; callers pass them in
/// target-table order.
///
/// # Examples
///
/// ```
/// use lighter_signer_sync::readme::render_readme;
/// use lighter_signer_sync::release::repository::RepoSlug;
///
/// let text = render_readme("v1.0.3", &RepoSlug::default(), &[]);
/// assert!(text.contains("Latest version: **v1.0.3**"));
/// ```
#[must_use]
pub fn render_readme(version: &str, repo: &RepoSlug, checksums: &[ChecksumEntry]) -> String {
    let mut lines = vec![
        "# lighter-signer libraries".to_owned(),
        String::new(),
        "Prebuilt `lighter-signer` shared libraries and C headers for each supported".to_owned(),
        format!(
            "platform, synced from the [{repo}]({}) GitHub releases.",
            repo.releases_url()
        ),
        String::new(),
        format!("{VERSION_PREFIX}{version}**"),
        String::new(),
        format!("Source: `{}`", repo.download_url_template(version)),
        String::new(),
        "## Layout".to_owned(),
        String::new(),
        "```text".to_owned(),
    ];
    lines.extend(LAYOUT.lines().map(str::to_owned));
    lines.extend([
        "```".to_owned(),
        String::new(),
        CHECKSUM_HEADING.to_owned(),
        String::new(),
        "```text".to_owned(),
    ]);
    lines.extend(
        checksums
            .iter()
            .map(|entry| format!("{}  {}", entry.hash, entry.relative_path)),
    );
    lines.extend([
        "```".to_owned(),
        String::new(),
        "## Updating".to_owned(),
        String::new(),
        "Run `lighter-signer-sync` from the project root to download the latest".to_owned(),
        "release, verify every asset against the digest published by GitHub, and".to_owned(),
        "regenerate this file. Run `lighter-signer-sync check` to re-hash the files".to_owned(),
        "on disk against the checksums above.".to_owned(),
    ]);
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// README location for a project rooted at `root`.
#[must_use]
pub fn default_readme_path(root: &Utf8Path) -> Utf8PathBuf {
    root.join(README_RELATIVE_PATH)
}

/// Write the rendered README to `path`, creating parent directories.
///
/// # Errors
///
/// Returns [`SyncError::WriteFailed`] if the directory or file cannot be
/// written.
pub fn write_readme(path: &Utf8Path, contents: &str) -> Result<()> {
    let write_failed = |source| SyncError::WriteFailed {
        path: path.to_owned(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_failed)?;
    }
    std::fs::write(path, contents).map_err(write_failed)
}

/// Extract the version recorded in a README, if any.
#[must_use]
pub fn parse_version(readme: &str) -> Option<&str> {
    readme
        .lines()
        .find_map(|line| line.strip_prefix(VERSION_PREFIX))
        .and_then(|rest| rest.strip_suffix("**"))
}

/// Parse the checksum block of a README produced by [`render_readme`].
///
/// Lines that do not hold a valid digest followed by two spaces and a
/// path are skipped.
#[must_use]
pub fn parse_checksums(readme: &str) -> Vec<ChecksumEntry> {
    let block = readme
        .lines()
        .skip_while(|line| line.trim() != CHECKSUM_HEADING)
        .skip(1)
        .skip_while(|line| !line.starts_with("```"))
        .skip(1);
    block
        .take_while(|line| !line.starts_with("```"))
        .filter_map(|line| {
            let entry = parse_checksum_line(line);
            if entry.is_none() {
                log::debug!("skipping unrecognised checksum line: {line:?}");
            }
            entry
        })
        .collect()
}

fn parse_checksum_line(line: &str) -> Option<ChecksumEntry> {
    let (hex, path) = line.split_once("  ")?;
    let hash = Sha256Digest::try_from(hex).ok()?;
    let relative_path = path.trim();
    if relative_path.is_empty() {
        return None;
    }
    Some(ChecksumEntry {
        hash,
        relative_path: relative_path.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(fill: char, path: &str) -> ChecksumEntry {
        ChecksumEntry {
            hash: Sha256Digest::try_from(fill.to_string().repeat(64)).expect("valid digest"),
            relative_path: path.to_owned(),
        }
    }

    #[test]
    fn renders_version_source_and_layout() {
        let text = render_readme("v1.0.3", &RepoSlug::default(), &[]);
        assert!(text.contains("Latest version: **v1.0.3**\n"));
        assert!(text.contains(
            "`https://github.com/elliottech/lighter-go/releases/download/v1.0.3/<asset>`"
        ));
        assert!(text.contains("│   │   ├── liblighter-signer.so"));
        assert!(text.contains(CHECKSUM_HEADING));
    }

    #[test]
    fn checksum_lines_follow_given_order() {
        let entries = [
            entry('a', "libs/linux/amd64/liblighter-signer.so"),
            entry('b', "libs/linux/amd64/liblighter-signer.h"),
        ];
        let text = render_readme("v1.0.3", &RepoSlug::default(), &entries);
        let expected = format!(
            "```text\n{}  libs/linux/amd64/liblighter-signer.so\n{}  libs/linux/amd64/liblighter-signer.h\n```",
            "a".repeat(64),
            "b".repeat(64)
        );
        assert!(text.contains(&expected), "README:\n{text}");
    }

    #[test]
    fn rendering_is_deterministic() {
        let entries = [entry('c', "libs/darwin/arm64/liblighter-signer.dylib")];
        let first = render_readme("v2.0.0", &RepoSlug::default(), &entries);
        let second = render_readme("v2.0.0", &RepoSlug::default(), &entries);
        assert_eq!(first, second);
    }

    #[test]
    fn parse_recovers_rendered_entries_and_version() {
        let entries = vec![
            entry('a', "libs/linux/amd64/liblighter-signer.so"),
            entry('d', "libs/windows/amd64/liblighter-signer.h"),
        ];
        let text = render_readme("v1.0.3", &RepoSlug::default(), &entries);
        assert_eq!(parse_checksums(&text), entries);
        assert_eq!(parse_version(&text), Some("v1.0.3"));
    }

    #[test]
    fn parse_ignores_layout_block_and_malformed_lines() {
        let text = format!(
            "```text\nlibs/\n```\n\n{CHECKSUM_HEADING}\n\n```text\nnot-a-hash  libs/x.h\n{}  libs/linux/arm64/liblighter-signer.h\n{}\n```\n",
            "e".repeat(64),
            "f".repeat(64)
        );
        let parsed = parse_checksums(&text);
        assert_eq!(parsed, vec![entry('e', "libs/linux/arm64/liblighter-signer.h")]);
    }

    #[test]
    fn parse_without_checksum_section_is_empty() {
        assert!(parse_checksums("# nothing here\n").is_empty());
        assert_eq!(parse_version("# nothing here\n"), None);
    }

    #[test]
    fn write_readme_creates_parent_directories() {
        let temp = tempfile::tempdir().expect("temp dir");
        let root = camino::Utf8PathBuf::try_from(temp.path().to_path_buf()).expect("UTF-8");
        let path = root.join(README_RELATIVE_PATH);
        write_readme(&path, "contents").expect("write README");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "contents");
    }
}
