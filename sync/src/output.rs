//! Progress output for the sync CLI.
//!
//! All user-facing text goes to an injected writer (stderr in production,
//! a `Vec<u8>` in tests). Informational lines respect `--quiet`; warnings
//! and failures are always written.

use std::fmt::Display;
use std::io::Write;

/// Write a single line to `stderr`, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}

/// Line-oriented progress reporter.
pub struct Progress<'a> {
    stderr: &'a mut dyn Write,
    quiet: bool,
}

impl<'a> Progress<'a> {
    /// Create a reporter writing to `stderr`.
    #[must_use]
    pub const fn new(stderr: &'a mut dyn Write, quiet: bool) -> Self {
        Self { stderr, quiet }
    }

    /// Report a step; suppressed in quiet mode.
    pub fn info(&mut self, message: impl Display) {
        if !self.quiet {
            write_stderr_line(self.stderr, message);
        }
    }

    /// Report a successful step; suppressed in quiet mode.
    pub fn ok(&mut self, message: impl Display) {
        if !self.quiet {
            write_stderr_line(self.stderr, format_args!("  ok: {message}"));
        }
    }

    /// Write a result line; printed even in quiet mode.
    pub fn always(&mut self, message: impl Display) {
        write_stderr_line(self.stderr, message);
    }

    /// Report an advisory problem.
    pub fn warn(&mut self, message: impl Display) {
        write_stderr_line(self.stderr, format_args!("warning: {message}"));
    }

    /// Report a failure that will affect the exit status.
    pub fn error(&mut self, message: impl Display) {
        write_stderr_line(self.stderr, format_args!("error: {message}"));
    }

    /// Write an empty separator line; suppressed in quiet mode.
    pub fn blank(&mut self) {
        self.info("");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn render(quiet: bool, emit: impl FnOnce(&mut Progress<'_>)) -> String {
        let mut buffer = Vec::new();
        {
            let mut progress = Progress::new(&mut buffer, quiet);
            emit(&mut progress);
        }
        String::from_utf8(buffer).expect("UTF-8 output")
    }

    #[rstest]
    #[case::verbose(false, "step\n  ok: done\n")]
    #[case::quiet(true, "")]
    fn info_and_ok_respect_quiet(#[case] quiet: bool, #[case] expected: &str) {
        let text = render(quiet, |p| {
            p.info("step");
            p.ok("done");
        });
        assert_eq!(text, expected);
    }

    #[test]
    fn warnings_and_errors_ignore_quiet() {
        let text = render(true, |p| {
            p.warn("asset missing");
            p.error("digest mismatch");
        });
        assert_eq!(text, "warning: asset missing\nerror: digest mismatch\n");
    }

    #[test]
    fn always_ignores_quiet() {
        let text = render(true, |p| {
            p.info("header");
            p.always("plan line");
        });
        assert_eq!(text, "plan line\n");
    }
}
