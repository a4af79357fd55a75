//! Leveled, indentation-aware diagnostic output.
//!
//! A [`Logger`] writes one line per message, prefixed by one tab per level of
//! nesting. Nesting is changed only through [`IndentGuard`], which restores
//! the previous depth when dropped, so every scope leaves the depth exactly as
//! it found it.
//!
//! The logger is an explicit value threaded through the runner and into every
//! case. Two runs that need to proceed side by side each own a logger and
//! cannot disturb each other's depth.

use std::fmt;
use std::io::{self, Write};
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use crate::error::ConfigError;

/// Verbosity threshold for diagnostic output.
///
/// Levels are ordered by verbosity; a logger configured at one level emits
/// messages of that level and every lower one. `None` emits nothing.
///
/// # Examples
///
/// ```
/// use casekit::LogLevel;
///
/// assert!(LogLevel::Trace > LogLevel::Info);
/// assert_eq!(LogLevel::from_code(3), Some(LogLevel::Debug));
/// assert_eq!("error".parse::<LogLevel>().ok(), Some(LogLevel::Error));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// No output at all.
    None = 0,
    /// Case failures and unrecognized statuses.
    Error = 1,
    /// One line per executed case.
    #[default]
    Info = 2,
    /// Suite-level progress.
    Debug = 3,
    /// Lifecycle phases and individual assertions.
    Trace = 4,
}

impl LogLevel {
    /// Every level, least verbose first.
    pub const ALL: [Self; 5] = [Self::None, Self::Error, Self::Info, Self::Debug, Self::Trace];

    /// Returns the numeric code of the level.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Maps a numeric code back to a level.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::None),
            1 => Some(Self::Error),
            2 => Some(Self::Info),
            3 => Some(Self::Debug),
            4 => Some(Self::Trace),
            _ => None,
        }
    }

    /// Returns the lowercase name of the level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Error => "error",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<i32>() {
            return Self::from_code(code).ok_or_else(|| ConfigError::UnknownLogLevel(s.to_string()));
        }
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ConfigError::UnknownLogLevel(s.to_string()))
    }
}

enum Sink {
    Stdout,
    Memory(Vec<u8>),
    Writer(Box<dyn Write>),
}

impl Sink {
    fn write_line(&mut self, depth: usize, args: fmt::Arguments<'_>) -> io::Result<()> {
        match self {
            Self::Stdout => write_indented(&mut io::stdout().lock(), depth, args),
            Self::Memory(buffer) => write_indented(buffer, depth, args),
            Self::Writer(writer) => write_indented(writer.as_mut(), depth, args),
        }
    }
}

fn write_indented<W: Write + ?Sized>(
    out: &mut W,
    depth: usize,
    args: fmt::Arguments<'_>,
) -> io::Result<()> {
    for _ in 0..depth {
        out.write_all(b"\t")?;
    }
    out.write_fmt(args)?;
    out.write_all(b"\n")
}

/// Leveled sink with a nesting depth.
///
/// # Examples
///
/// ```
/// use casekit::{LogLevel, Logger};
///
/// let mut logger = Logger::capture(LogLevel::Info);
/// logger.info(format_args!("outer"));
/// {
///     let mut nested = logger.indent();
///     nested.info(format_args!("inner"));
///     nested.debug(format_args!("hidden"));
/// }
/// assert_eq!(logger.depth(), 0);
/// assert_eq!(logger.captured().as_deref(), Some("outer\n\tinner\n"));
/// ```
pub struct Logger {
    level: LogLevel,
    depth: usize,
    sink: Sink,
    write_failed: bool,
}

impl Logger {
    /// Creates a logger writing to standard output.
    #[must_use]
    pub fn stdout(level: LogLevel) -> Self {
        Self::with_sink(level, Sink::Stdout)
    }

    /// Creates a logger that buffers its output in memory.
    ///
    /// Use [`Logger::captured`] to read the buffered text.
    #[must_use]
    pub fn capture(level: LogLevel) -> Self {
        Self::with_sink(level, Sink::Memory(Vec::new()))
    }

    /// Creates a logger writing to an arbitrary writer.
    #[must_use]
    pub fn to_writer(level: LogLevel, writer: impl Write + 'static) -> Self {
        Self::with_sink(level, Sink::Writer(Box::new(writer)))
    }

    fn with_sink(level: LogLevel, sink: Sink) -> Self {
        Self {
            level,
            depth: 0,
            sink,
            write_failed: false,
        }
    }

    /// Returns the verbosity threshold.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Returns the current nesting depth.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Returns `true` when messages at `level` would be written.
    #[must_use]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level != LogLevel::None && self.level >= level
    }

    /// Writes one line at `level`, indented to the current depth.
    ///
    /// Sink failures never interrupt a run. The first one is reported through
    /// the `log` facade and later ones are dropped silently.
    pub fn log(&mut self, level: LogLevel, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        if let Err(error) = self.sink.write_line(self.depth, args) {
            if !self.write_failed {
                log::warn!("diagnostic output could not be written: {error}");
            }
            self.write_failed = true;
        }
    }

    /// Writes a line at [`LogLevel::Error`].
    pub fn error(&mut self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Error, args);
    }

    /// Writes a line at [`LogLevel::Info`].
    pub fn info(&mut self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Info, args);
    }

    /// Writes a line at [`LogLevel::Debug`].
    pub fn debug(&mut self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Debug, args);
    }

    /// Writes a line at [`LogLevel::Trace`].
    pub fn trace(&mut self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Trace, args);
    }

    /// Enters one level of nesting until the returned guard is dropped.
    #[must_use = "the indentation is undone as soon as the guard is dropped"]
    pub fn indent(&mut self) -> IndentGuard<'_> {
        self.depth += 1;
        IndentGuard { logger: self }
    }

    /// Returns the text written so far by a [`Logger::capture`] logger.
    #[must_use]
    pub fn captured(&self) -> Option<String> {
        match &self.sink {
            Sink::Memory(buffer) => Some(String::from_utf8_lossy(buffer).into_owned()),
            Sink::Stdout | Sink::Writer(_) => None,
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sink = match self.sink {
            Sink::Stdout => "stdout",
            Sink::Memory(_) => "memory",
            Sink::Writer(_) => "writer",
        };
        f.debug_struct("Logger")
            .field("level", &self.level)
            .field("depth", &self.depth)
            .field("sink", &sink)
            .finish_non_exhaustive()
    }
}

/// RAII guard holding one level of nesting on a [`Logger`].
///
/// The guard dereferences to the logger, so nested output is written through
/// it and further guards can be stacked on top.
#[derive(Debug)]
pub struct IndentGuard<'a> {
    logger: &'a mut Logger,
}

impl Deref for IndentGuard<'_> {
    type Target = Logger;

    fn deref(&self) -> &Self::Target {
        self.logger
    }
}

impl DerefMut for IndentGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.logger
    }
}

impl Drop for IndentGuard<'_> {
    fn drop(&mut self) {
        debug_assert!(self.logger.depth > 0, "indentation depth underflow");
        self.logger.depth = self.logger.depth.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::none(LogLevel::None, "")]
    #[case::error(LogLevel::Error, "e\n")]
    #[case::info(LogLevel::Info, "e\ni\n")]
    #[case::debug(LogLevel::Debug, "e\ni\nd\n")]
    #[case::trace(LogLevel::Trace, "e\ni\nd\nt\n")]
    fn threshold_includes_all_lower_levels(#[case] level: LogLevel, #[case] expected: &str) {
        let mut logger = Logger::capture(level);
        logger.error(format_args!("e"));
        logger.info(format_args!("i"));
        logger.debug(format_args!("d"));
        logger.trace(format_args!("t"));
        assert_eq!(logger.captured().as_deref(), Some(expected));
    }

    #[test]
    fn none_level_messages_are_never_written() {
        let mut logger = Logger::capture(LogLevel::Trace);
        logger.log(LogLevel::None, format_args!("silent"));
        assert_eq!(logger.captured().as_deref(), Some(""));
    }

    #[test]
    fn nested_guards_restore_depth() {
        let mut logger = Logger::capture(LogLevel::Info);
        {
            let mut first = logger.indent();
            assert_eq!(first.depth(), 1);
            {
                let mut second = first.indent();
                second.info(format_args!("two"));
                assert_eq!(second.depth(), 2);
            }
            first.info(format_args!("one"));
        }
        logger.info(format_args!("zero"));
        assert_eq!(logger.depth(), 0);
        assert_eq!(logger.captured().as_deref(), Some("\t\ttwo\n\tone\nzero\n"));
    }

    #[rstest]
    #[case("none", LogLevel::None)]
    #[case("ERROR", LogLevel::Error)]
    #[case(" Info ", LogLevel::Info)]
    #[case("3", LogLevel::Debug)]
    #[case("trace", LogLevel::Trace)]
    fn parses_names_and_codes(#[case] input: &str, #[case] expected: LogLevel) {
        assert_eq!(input.parse::<LogLevel>().ok(), Some(expected));
    }

    #[rstest]
    #[case("loud")]
    #[case("5")]
    #[case("-1")]
    fn rejects_unknown_levels(#[case] input: &str) {
        assert_eq!(
            input.parse::<LogLevel>(),
            Err(ConfigError::UnknownLogLevel(input.to_string()))
        );
    }

    #[test]
    fn codes_round_trip_through_from_code() {
        for level in LogLevel::ALL {
            assert_eq!(LogLevel::from_code(level.code()), Some(level));
        }
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn sink_failures_do_not_interrupt_logging() {
        let mut logger = Logger::to_writer(LogLevel::Trace, FailingWriter);
        logger.error(format_args!("first"));
        {
            let mut nested = logger.indent();
            nested.trace(format_args!("second"));
        }
        assert_eq!(logger.depth(), 0);
        assert!(logger.captured().is_none());
    }
}
