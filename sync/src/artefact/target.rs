//! The fixed set of release assets this tool keeps in sync.
//!
//! Exactly four platform/architecture pairs are recognised, each with a
//! shared library and a C header. The remote asset name and the local
//! filename are listed literally in [`TARGETS`] rather than derived, so
//! a rename on either side is a one-line table change.

use camino::Utf8PathBuf;
use std::fmt;

/// Directory (relative to the project root) that holds the synced files.
pub const LIBS_DIR: &str = "libs";

/// Operating system family of a prebuilt artefact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// GNU/Linux.
    Linux,
    /// macOS.
    Darwin,
    /// Windows.
    Windows,
}

impl Platform {
    /// Return the directory name used for this platform.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Darwin => "darwin",
            Self::Windows => "windows",
        }
    }

    /// Return the shared library extension (without the dot).
    ///
    /// # Examples
    ///
    /// ```
    /// use lighter_signer_sync::artefact::target::Platform;
    ///
    /// assert_eq!(Platform::Darwin.library_extension(), "dylib");
    /// ```
    #[must_use]
    pub const fn library_extension(self) -> &'static str {
        match self {
            Self::Linux => "so",
            Self::Darwin => "dylib",
            Self::Windows => "dll",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CPU architecture of a prebuilt artefact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    /// x86-64.
    Amd64,
    /// 64-bit ARM.
    Arm64,
}

impl Arch {
    /// Return the directory name used for this architecture.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Amd64 => "amd64",
            Self::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which of the two files for a platform/architecture pair a target is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// The shared library binary.
    Library,
    /// The C header describing the library's exports.
    Header,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Library => f.write_str("library"),
            Self::Header => f.write_str("header"),
        }
    }
}

/// One file this tool is responsible for syncing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetSpec {
    /// Operating system family.
    pub platform: Platform,
    /// CPU architecture.
    pub arch: Arch,
    /// Library or header.
    pub kind: FileKind,
    /// Exact name of the release asset.
    pub asset_name: &'static str,
    /// Filename written inside the platform/architecture directory.
    pub local_filename: &'static str,
}

impl TargetSpec {
    /// Directory relative to the project root, e.g. `libs/linux/amd64`.
    #[must_use]
    pub fn local_dir(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(LIBS_DIR)
            .join(self.platform.as_str())
            .join(self.arch.as_str())
    }

    /// File path relative to the project root.
    ///
    /// Always uses `/` separators so the value is stable across hosts when
    /// written to the README.
    ///
    /// # Examples
    ///
    /// ```
    /// use lighter_signer_sync::artefact::target::TARGETS;
    ///
    /// assert_eq!(
    ///     TARGETS[0].relative_path(),
    ///     "libs/linux/amd64/liblighter-signer.so"
    /// );
    /// ```
    #[must_use]
    pub fn relative_path(&self) -> String {
        format!(
            "{LIBS_DIR}/{}/{}/{}",
            self.platform, self.arch, self.local_filename
        )
    }
}

impl fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} {}", self.platform, self.arch, self.kind)
    }
}

const fn target(
    platform: Platform,
    arch: Arch,
    kind: FileKind,
    asset_name: &'static str,
    local_filename: &'static str,
) -> TargetSpec {
    TargetSpec {
        platform,
        arch,
        kind,
        asset_name,
        local_filename,
    }
}

/// Every synced file, in README checksum order.
pub const TARGETS: [TargetSpec; 8] = [
    target(
        Platform::Linux,
        Arch::Amd64,
        FileKind::Library,
        "lighter-signer-linux-amd64.so",
        "liblighter-signer.so",
    ),
    target(
        Platform::Linux,
        Arch::Amd64,
        FileKind::Header,
        "lighter-signer-linux-amd64.h",
        "liblighter-signer.h",
    ),
    target(
        Platform::Linux,
        Arch::Arm64,
        FileKind::Library,
        "lighter-signer-linux-arm64.so",
        "liblighter-signer.so",
    ),
    target(
        Platform::Linux,
        Arch::Arm64,
        FileKind::Header,
        "lighter-signer-linux-arm64.h",
        "liblighter-signer.h",
    ),
    target(
        Platform::Darwin,
        Arch::Arm64,
        FileKind::Library,
        "lighter-signer-darwin-arm64.dylib",
        "liblighter-signer.dylib",
    ),
    target(
        Platform::Darwin,
        Arch::Arm64,
        FileKind::Header,
        "lighter-signer-darwin-arm64.h",
        "liblighter-signer.h",
    ),
    target(
        Platform::Windows,
        Arch::Amd64,
        FileKind::Library,
        "lighter-signer-windows-amd64.dll",
        "liblighter-signer.dll",
    ),
    target(
        Platform::Windows,
        Arch::Amd64,
        FileKind::Header,
        "lighter-signer-windows-amd64.h",
        "liblighter-signer.h",
    ),
];
