//! Banner, completion line, pause prompt and exit status.

use std::io::{BufRead, Write};

use casekit::Suite;
use eyre::{Context, Result};

/// Writes the line announcing a suite run.
///
/// # Errors
///
/// Returns an error when the writer fails.
pub fn write_banner(writer: &mut dyn Write, suite: &Suite) -> Result<()> {
    writeln!(
        writer,
        "Running test suite {} with {} tests...",
        suite.name(),
        suite.registry().len()
    )
    .wrap_err_with(|| format!("failed to announce suite {}", suite.name()))
}

/// Writes the line reporting how many cases failed.
///
/// # Errors
///
/// Returns an error when the writer fails.
pub fn write_completion(writer: &mut dyn Write, suite: &Suite, failures: i64) -> Result<()> {
    writeln!(
        writer,
        "Test suite {} completed with {failures} failed test(s).",
        suite.name()
    )
    .wrap_err_with(|| format!("failed to report result of suite {}", suite.name()))
}

/// Prompts for return and waits until a line (or end of input) is read.
///
/// # Errors
///
/// Returns an error when writing the prompt or reading the input fails.
pub fn pause(writer: &mut dyn Write, reader: &mut dyn BufRead) -> Result<()> {
    write!(writer, "Press return to continue...").wrap_err("failed to write pause prompt")?;
    writer.flush().wrap_err("failed to flush pause prompt")?;
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .wrap_err("failed to wait for return")?;
    Ok(())
}

/// Maps a failure count onto a process exit status.
///
/// A clean run exits with `0`; any other count, including a negative setup
/// code, is clamped into `1..=255`.
#[must_use]
pub fn exit_status(failures: i64) -> u8 {
    if failures == 0 {
        return 0;
    }
    u8::try_from(failures.clamp(1, i64::from(u8::MAX))).unwrap_or(u8::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use casekit::Registry;
    use rstest::rstest;

    fn captured(write: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buffer = Vec::new();
        assert!(write(&mut buffer).is_ok());
        String::from_utf8(buffer).unwrap_or_default()
    }

    #[test]
    fn banner_and_completion_name_the_suite() {
        let suite = Suite::new("empty", Registry::default());
        assert_eq!(
            captured(|out| write_banner(out, &suite)),
            "Running test suite empty with 0 tests...\n"
        );
        assert_eq!(
            captured(|out| write_completion(out, &suite, 3)),
            "Test suite empty completed with 3 failed test(s).\n"
        );
    }

    #[test]
    fn pause_waits_for_one_line() {
        let mut input: &[u8] = b"\nleftover\n";
        let output = captured(|out| pause(out, &mut input));
        assert_eq!(output, "Press return to continue...");
        assert_eq!(input, b"leftover\n");
    }

    #[test]
    fn pause_accepts_end_of_input() {
        let mut input: &[u8] = b"";
        assert!(pause(&mut Vec::new(), &mut input).is_ok());
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(42, 42)]
    #[case(255, 255)]
    #[case(256, 255)]
    #[case(i64::MAX, 255)]
    #[case(-1, 1)]
    #[case(i64::MIN, 1)]
    fn exit_status_is_clamped(#[case] failures: i64, #[case] expected: u8) {
        assert_eq!(exit_status(failures), expected);
    }
}
