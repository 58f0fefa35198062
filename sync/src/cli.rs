//! CLI argument definitions for the signer library sync tool.
//!
//! This module defines the command-line interface using clap. It is separated
//! from the main entrypoint to keep the binary small and focused on
//! orchestration.

use crate::readme::default_readme_path;
use crate::release::download::{DEFAULT_API_BASE, HttpConfig};
use crate::release::repository::{DEFAULT_REPOSITORY, RepoSlug};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use std::time::Duration;

/// Sync prebuilt lighter-signer libraries from GitHub releases.
#[derive(Parser, Debug)]
#[command(name = "lighter-signer-sync")]
#[command(version, about)]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = concat!(
    "Sync prebuilt lighter-signer libraries from GitHub releases.\n\n",
    "Downloads the shared library and C header for each supported platform from ",
    "the latest release, verifies each file against the SHA-256 digest GitHub ",
    "publishes, installs it under libs/<platform>/<arch>/, and regenerates ",
    "libs/README.md with the synced version and checksums.\n\n",
    "A checksum mismatch fails the run. Missing assets and failed downloads are ",
    "reported as warnings.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Sync the latest release into the current project:\n",
    "    $ lighter-signer-sync\n\n",
    "  Preview which assets would be downloaded:\n",
    "    $ lighter-signer-sync --dry-run\n\n",
    "  Sync from a fork into another checkout:\n",
    "    $ lighter-signer-sync --repo me/lighter-go --root ../sdk\n\n",
    "  Verify committed libraries without network access:\n",
    "    $ lighter-signer-sync check",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Sync arguments (used when no subcommand is given; rejected alongside
    /// one).
    #[command(flatten)]
    pub sync: SyncArgs,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Download, verify, and install the latest release (default).
    Sync(SyncArgs),

    /// Re-hash installed files against the README checksums.
    Check(CheckArgs),
}

/// Arguments for the sync command.
#[derive(Parser, Debug, Clone)]
pub struct SyncArgs {
    /// GitHub repository to sync from, as `owner/repo`.
    #[arg(long, value_name = "OWNER/REPO", default_value = DEFAULT_REPOSITORY)]
    pub repo: RepoSlug,

    /// Project root containing the `libs/` directory.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: Utf8PathBuf,

    /// README to regenerate [default: <root>/libs/README.md].
    #[arg(long, value_name = "FILE")]
    pub readme: Option<Utf8PathBuf>,

    /// GitHub token for authenticated API requests.
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub REST API base URL.
    #[arg(long, value_name = "URL", default_value = DEFAULT_API_BASE)]
    pub api_url: String,

    /// Per-request timeout in seconds [default: none].
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Show what would be synced and exit without downloading.
    #[arg(long)]
    pub dry_run: bool,

    /// Suppress progress output (warnings and errors still shown).
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the check command.
#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    /// Project root containing the `libs/` directory.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: Utf8PathBuf,

    /// README holding the recorded checksums [default: <root>/libs/README.md].
    #[arg(long, value_name = "FILE")]
    pub readme: Option<Utf8PathBuf>,

    /// Suppress progress output (warnings and errors still shown).
    #[arg(short, long)]
    pub quiet: bool,
}

impl SyncArgs {
    /// The README path, defaulting to `<root>/libs/README.md`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lighter_signer_sync::cli::SyncArgs;
    ///
    /// let args = SyncArgs::default();
    /// assert_eq!(args.readme_path(), "./libs/README.md");
    /// ```
    #[must_use]
    pub fn readme_path(&self) -> Utf8PathBuf {
        self.readme
            .clone()
            .unwrap_or_else(|| default_readme_path(&self.root))
    }

    /// HTTP settings derived from `--api-url`, `--token`, and `--timeout`.
    #[must_use]
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            api_base: self.api_url.clone(),
            token: self.token.clone().filter(|token| !token.is_empty()),
            timeout: self.timeout.map(Duration::from_secs),
        }
    }
}

impl CheckArgs {
    /// The README path, defaulting to `<root>/libs/README.md`.
    #[must_use]
    pub fn readme_path(&self) -> Utf8PathBuf {
        self.readme
            .clone()
            .unwrap_or_else(|| default_readme_path(&self.root))
    }
}

impl Default for SyncArgs {
    /// Creates a `SyncArgs` instance matching the command-line defaults,
    /// without reading `GITHUB_TOKEN`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lighter_signer_sync::cli::SyncArgs;
    ///
    /// let args = SyncArgs::default();
    /// assert_eq!(args.repo.to_string(), "elliottech/lighter-go");
    /// assert!(!args.dry_run);
    /// ```
    fn default() -> Self {
        Self {
            repo: RepoSlug::default(),
            root: Utf8PathBuf::from("."),
            readme: None,
            token: None,
            api_url: DEFAULT_API_BASE.to_owned(),
            timeout: None,
            dry_run: false,
            quiet: false,
        }
    }
}

impl Default for CheckArgs {
    fn default() -> Self {
        Self {
            root: Utf8PathBuf::from("."),
            readme: None,
            quiet: false,
        }
    }
}

impl Cli {
    /// Returns the effective sync arguments.
    ///
    /// If a `Sync` subcommand was provided, returns those arguments.
    /// Otherwise returns the flattened top-level arguments.
    #[must_use]
    pub fn sync_args(&self) -> &SyncArgs {
        match &self.command {
            Some(Command::Sync(args)) => args,
            Some(Command::Check(_)) | None => &self.sync,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
