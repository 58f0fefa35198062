//! lighter-signer-sync CLI entrypoint.
//!
//! Syncs prebuilt lighter-signer libraries from the latest GitHub release
//! into `libs/`, or verifies previously synced files with `check`.

use clap::Parser;
use lighter_signer_sync::check::run_check;
use lighter_signer_sync::cli::{CheckArgs, Cli, Command, SyncArgs};
use lighter_signer_sync::error::{Result, SyncError};
use lighter_signer_sync::interrupt::install_cleanup_handler;
use lighter_signer_sync::output::write_stderr_line;
use lighter_signer_sync::release::download::{HttpReleaseSource, ReleaseSource};
use lighter_signer_sync::sync::{SyncConfig, run_dry, run_sync};
use std::io::Write;
use std::path::Path;

fn main() {
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<()> {
    match &cli.command {
        Some(Command::Check(args)) => run_check_command(args, stderr),
        Some(Command::Sync(_)) | None => run_sync_command(cli.sync_args(), stderr),
    }
}

/// Runs a sync against GitHub, owning the scratch directory for the run.
fn run_sync_command(args: &SyncArgs, stderr: &mut dyn Write) -> Result<()> {
    let source = HttpReleaseSource::new(&args.http_config());

    if args.dry_run {
        return sync_with_source(args, &source, None, stderr);
    }

    let work_dir = tempfile::Builder::new()
        .prefix("lighter-signer-sync-")
        .tempdir()
        .map_err(|source| SyncError::TempDir { source })?;
    install_cleanup_handler(work_dir.path().to_path_buf())?;

    sync_with_source(args, &source, Some(work_dir.path()), stderr)
}

/// Runs a sync, or a dry run when `work_dir` is `None`.
fn sync_with_source(
    args: &SyncArgs,
    source: &dyn ReleaseSource,
    work_dir: Option<&Path>,
    stderr: &mut dyn Write,
) -> Result<()> {
    let readme_path = args.readme_path();
    let config = SyncConfig {
        repo: &args.repo,
        root: &args.root,
        readme_path: &readme_path,
        quiet: args.quiet,
    };

    match work_dir {
        None => run_dry(&config, source, stderr).map(drop),
        Some(dir) => run_sync(&config, source, dir, stderr)?.into_result().map(drop),
    }
}

fn run_check_command(args: &CheckArgs, stderr: &mut dyn Write) -> Result<()> {
    let readme_path = args.readme_path();
    run_check(&args.root, &readme_path, args.quiet, stderr)?
        .into_result()
        .map(drop)
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, format_args!("error: {err}"));
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8Path;
    use lighter_signer_sync::test_utils::{
        FIXTURE_TAG, FixtureAsset, StubReleaseSource, complete_release, utf8_temp_dir,
    };

    fn args_for(root: &Utf8Path) -> SyncArgs {
        SyncArgs {
            root: root.to_owned(),
            quiet: true,
            ..SyncArgs::default()
        }
    }

    #[test]
    fn exit_code_for_run_result_returns_zero_on_success() {
        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Ok(()), &mut stderr);
        assert_eq!(exit_code, 0);
        assert!(stderr.is_empty());
    }

    #[test]
    fn exit_code_for_run_result_prints_error_and_returns_one() {
        let err = SyncError::MetadataFetch {
            repo: "elliottech/lighter-go".to_owned(),
            reason: "request failed".to_owned(),
        };

        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Err(err), &mut stderr);
        assert_eq!(exit_code, 1);

        let stderr_text = String::from_utf8(stderr).expect("stderr was not UTF-8");
        assert!(stderr_text.contains("error: failed to fetch latest release"));
    }

    #[test]
    fn sync_with_source_succeeds_for_complete_release() {
        let (_temp, root) = utf8_temp_dir().expect("temp root");
        let work = tempfile::tempdir().expect("work dir");
        let source = StubReleaseSource::new(FIXTURE_TAG, &complete_release());

        let mut stderr = Vec::new();
        let result = sync_with_source(&args_for(&root), &source, Some(work.path()), &mut stderr);

        assert!(result.is_ok(), "result: {result:?}");
        assert!(root.join("libs/README.md").is_file());
    }

    #[test]
    fn sync_with_source_fails_on_checksum_mismatch() {
        let (_temp, root) = utf8_temp_dir().expect("temp root");
        let work = tempfile::tempdir().expect("work dir");
        let mut assets = complete_release();
        if let Some(first) = assets.first_mut() {
            *first = FixtureAsset::with_digest(&first.name.clone(), "sha256:deadbeef");
        }
        let source = StubReleaseSource::new(FIXTURE_TAG, &assets);

        let mut stderr = Vec::new();
        let result = sync_with_source(&args_for(&root), &source, Some(work.path()), &mut stderr);

        assert!(matches!(result, Err(SyncError::ChecksumMismatch { count: 1 })));
        assert_eq!(exit_code_for_run_result(result, &mut stderr), 1);
    }

    #[test]
    fn dry_run_writes_nothing() {
        let (_temp, root) = utf8_temp_dir().expect("temp root");
        let source = StubReleaseSource::new(FIXTURE_TAG, &complete_release());

        let mut stderr = Vec::new();
        let result = sync_with_source(&args_for(&root), &source, None, &mut stderr);

        assert!(result.is_ok(), "result: {result:?}");
        assert!(!root.join("libs").exists());
        assert!(source.downloads().is_empty());
    }

    #[test]
    fn check_command_reports_missing_readme() {
        let (_temp, root) = utf8_temp_dir().expect("temp root");
        let args = CheckArgs {
            root,
            ..CheckArgs::default()
        };

        let mut stderr = Vec::new();
        let result = run_check_command(&args, &mut stderr);
        assert!(matches!(result, Err(SyncError::ReadFailed { .. })));
    }

    #[test]
    fn check_command_passes_after_sync() {
        let (_temp, root) = utf8_temp_dir().expect("temp root");
        let work = tempfile::tempdir().expect("work dir");
        let source = StubReleaseSource::new(FIXTURE_TAG, &complete_release());
        let mut stderr = Vec::new();
        sync_with_source(&args_for(&root), &source, Some(work.path()), &mut stderr)
            .expect("sync succeeds");

        let args = CheckArgs {
            root,
            quiet: true,
            ..CheckArgs::default()
        };
        assert!(run_check_command(&args, &mut stderr).is_ok());
    }
}
