//! The result protocol between a case and the runner.
//!
//! A case reports a [`StatusCode`] and, when it did not pass, usually a
//! [`Message`]. The message is moved into the runner together with the status
//! and released by the runner once it has been logged.

use std::fmt::{self, Write as _};

/// Text substituted when a failing case produced no message.
pub const NO_ERROR_SPECIFIED: &str = "no error specified";

const INITIAL_MESSAGE_CAPACITY: usize = 64;

/// Failure message owned by whoever currently holds it.
///
/// Messages are moved, never shared: the case builds one, hands it to the
/// runner inside a [`CaseResult`], and the runner drops it after logging.
///
/// # Examples
///
/// ```
/// use casekit::Message;
///
/// let message = Message::try_format(format_args!("{} is not {}", "left", "right"));
/// assert_eq!(message.as_ref().map(Message::as_str), Some("left is not right"));
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct Message(String);

impl Message {
    /// Wraps existing text as a message.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Formats a message into a freshly allocated buffer.
    ///
    /// Returns `None` when the buffer cannot be allocated. Callers treat a
    /// missing message like any other absent message.
    #[must_use]
    pub fn try_format(args: fmt::Arguments<'_>) -> Option<Self> {
        let mut buffer = FallibleBuffer(String::new());
        buffer.0.try_reserve(INITIAL_MESSAGE_CAPACITY).ok()?;
        buffer.write_fmt(args).ok()?;
        Some(Self(buffer.0))
    }

    /// Returns the message text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the message, returning its buffer.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns the message text, or [`NO_ERROR_SPECIFIED`] when there is none.
#[must_use]
pub fn describe(message: Option<&Message>) -> &str {
    message.map_or(NO_ERROR_SPECIFIED, Message::as_str)
}

/// Formatting target that reports allocation failure instead of aborting.
struct FallibleBuffer(String);

impl fmt::Write for FallibleBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.try_reserve(s.len()).map_err(|_| fmt::Error)?;
        self.0.push_str(s);
        Ok(())
    }
}

/// Outcome of one case execution.
///
/// Raw codes follow the classic convention `0 = pass, 1 = fail, 2 = abort`.
/// Any other code is kept as [`StatusCode::Unrecognized`]: it counts as a
/// failure but does not halt the suite.
///
/// # Examples
///
/// ```
/// use casekit::StatusCode;
///
/// assert_eq!(StatusCode::from(2), StatusCode::Abort);
/// assert_eq!(StatusCode::from(9), StatusCode::Unrecognized(9));
/// assert_eq!(StatusCode::Unrecognized(9).code(), 9);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// The case passed.
    Pass,
    /// The case failed; the run continues.
    Fail,
    /// The case failed and no further cases should run.
    Abort,
    /// A code outside the known set.
    Unrecognized(i32),
}

impl StatusCode {
    /// Returns the raw code of the status.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Pass => 0,
            Self::Fail => 1,
            Self::Abort => 2,
            Self::Unrecognized(code) => code,
        }
    }

    /// Returns `true` for [`StatusCode::Pass`].
    #[must_use]
    pub const fn is_pass(self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Returns `true` for [`StatusCode::Abort`].
    #[must_use]
    pub const fn is_abort(self) -> bool {
        matches!(self, Self::Abort)
    }
}

impl From<i32> for StatusCode {
    fn from(code: i32) -> Self {
        match code {
            0 => Self::Pass,
            1 => Self::Fail,
            2 => Self::Abort,
            other => Self::Unrecognized(other),
        }
    }
}

impl From<StatusCode> for i32 {
    fn from(status: StatusCode) -> Self {
        status.code()
    }
}

/// Status and optional message returned by a case function.
#[derive(Debug, PartialEq, Eq)]
pub struct CaseResult {
    status: StatusCode,
    message: Option<Message>,
}

impl CaseResult {
    /// Builds a result from its parts.
    #[must_use]
    pub const fn new(status: StatusCode, message: Option<Message>) -> Self {
        Self { status, message }
    }

    /// A passing result without a message.
    #[must_use]
    pub const fn pass() -> Self {
        Self::new(StatusCode::Pass, None)
    }

    /// A failing result.
    #[must_use]
    pub const fn fail(message: Option<Message>) -> Self {
        Self::new(StatusCode::Fail, message)
    }

    /// An aborting result.
    #[must_use]
    pub const fn abort(message: Option<Message>) -> Self {
        Self::new(StatusCode::Abort, message)
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Borrows the message, if any.
    #[must_use]
    pub const fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    /// Splits the result, handing ownership of the message to the caller.
    #[must_use]
    pub fn into_parts(self) -> (StatusCode, Option<Message>) {
        (self.status, self.message)
    }
}
