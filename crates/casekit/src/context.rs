//! Per-case execution context and assertion helpers.
//!
//! Every phase of a case receives a [`CaseContext`]. Assertions on the
//! context return a [`Step`]; propagating the error with `?` leaves the phase
//! immediately, and the lifecycle driver then runs the teardown phase.

use std::fmt;

use crate::logger::{LogLevel, Logger};
use crate::status::{CaseResult, Message, describe};

/// Early exit from a case phase.
#[derive(Debug, PartialEq, Eq)]
pub enum Interrupt {
    /// Leave the phase without changing the passing status.
    Pass,
    /// Fail the case and continue with the next one.
    Fail(Option<Message>),
    /// Fail the case and stop the whole suite after its teardown.
    Abort(Option<Message>),
}

impl Interrupt {
    /// Converts the interrupt into the result it stands for.
    #[must_use]
    pub fn into_result(self) -> CaseResult {
        match self {
            Self::Pass => CaseResult::pass(),
            Self::Fail(message) => CaseResult::fail(message),
            Self::Abort(message) => CaseResult::abort(message),
        }
    }
}

/// Result of one case phase: `Ok` when the phase ran to its end.
pub type Step = Result<(), Interrupt>;

/// Converts the outcome of a phase into a case result.
#[must_use]
pub fn settle(step: Step) -> CaseResult {
    step.map_or_else(Interrupt::into_result, |()| CaseResult::pass())
}

/// Handle given to a running case.
///
/// It carries the logger (and with it the active log level) for the duration
/// of one case invocation.
///
/// # Examples
///
/// ```
/// use casekit::{CaseContext, Interrupt, LogLevel, Logger};
///
/// let mut logger = Logger::capture(LogLevel::Trace);
/// let mut ctx = CaseContext::new(&mut logger);
/// assert!(ctx.ensure(1 + 1 == 2, format_args!("arithmetic")).is_ok());
/// let failed = ctx.ensure(false, format_args!("expected {}", 3));
/// assert!(matches!(failed, Err(Interrupt::Fail(Some(_)))));
/// ```
#[derive(Debug)]
pub struct CaseContext<'a> {
    logger: &'a mut Logger,
}

impl<'a> CaseContext<'a> {
    /// Wraps a logger for one case invocation.
    #[must_use]
    pub fn new(logger: &'a mut Logger) -> Self {
        Self { logger }
    }

    /// Returns the active log level.
    #[must_use]
    pub fn level(&self) -> LogLevel {
        self.logger.level()
    }

    /// Gives access to the logger for custom diagnostics.
    pub fn log(&mut self) -> &mut Logger {
        self.logger
    }

    /// Runs `phase` one indentation level deeper.
    pub fn nested<T>(&mut self, phase: impl FnOnce(&mut CaseContext<'_>) -> T) -> T {
        let mut guard = self.logger.indent();
        let mut inner = CaseContext::new(&mut guard);
        phase(&mut inner)
    }

    /// Fails the phase with a formatted message when `condition` is false.
    ///
    /// # Errors
    ///
    /// Returns [`Interrupt::Fail`] when the condition does not hold.
    pub fn ensure(&mut self, condition: bool, args: fmt::Arguments<'_>) -> Step {
        if condition {
            return Ok(());
        }
        Err(self.fail(args))
    }

    /// Builds a failing interrupt, logging its message at trace level.
    #[must_use]
    pub fn fail(&mut self, args: fmt::Arguments<'_>) -> Interrupt {
        Interrupt::Fail(self.record(args))
    }

    /// Builds an aborting interrupt, logging its message at trace level.
    #[must_use]
    pub fn abort(&mut self, args: fmt::Arguments<'_>) -> Interrupt {
        Interrupt::Abort(self.record(args))
    }

    /// Builds an interrupt that ends the phase and keeps the case passing.
    #[must_use]
    pub const fn pass(&self) -> Interrupt {
        Interrupt::Pass
    }

    fn record(&mut self, args: fmt::Arguments<'_>) -> Option<Message> {
        let message = Message::try_format(args);
        self.logger
            .trace(format_args!("{}", describe(message.as_ref())));
        message
    }
}
