//! Assertion macros for case phases.
//!
//! Each macro evaluates to `()` on success and returns early from the
//! enclosing phase with an [`Interrupt`](crate::Interrupt) otherwise, so they
//! may only be used inside closures returning [`Step`](crate::Step).

/// Fail the phase when `condition` is false.
///
/// The message names the failing expression.
///
/// # Examples
/// ```
/// use casekit::{CaseContext, Interrupt, LogLevel, Logger, Message, Step, check};
///
/// fn body(ctx: &mut CaseContext<'_>) -> Step {
///     check!(ctx, 2 > 3);
///     Ok(())
/// }
///
/// let mut logger = Logger::capture(LogLevel::None);
/// assert_eq!(
///     body(&mut CaseContext::new(&mut logger)),
///     Err(Interrupt::Fail(Some(Message::new("Assertion 2 > 3 failed")))),
/// );
/// ```
#[macro_export]
macro_rules! check {
    ($ctx:expr, $condition:expr $(,)?) => {
        $ctx.ensure(
            $condition,
            ::core::format_args!("Assertion {} failed", ::core::stringify!($condition)),
        )?
    };
}

/// Fail the phase with a formatted message when `condition` is false.
///
/// # Examples
/// ```
/// use casekit::{CaseContext, LogLevel, Logger, Step, check_that};
///
/// fn body(ctx: &mut CaseContext<'_>) -> Step {
///     let total = 4;
///     check_that!(ctx, total == 4, "expected 4, got {}", total);
///     Ok(())
/// }
///
/// let mut logger = Logger::capture(LogLevel::None);
/// assert!(body(&mut CaseContext::new(&mut logger)).is_ok());
/// ```
#[macro_export]
macro_rules! check_that {
    ($ctx:expr, $condition:expr, $($arg:tt)+) => {
        $ctx.ensure($condition, ::core::format_args!($($arg)+))?
    };
}

/// Fail the phase when two strings differ.
///
/// Both operands may be anything implementing `AsRef<str>`.
#[macro_export]
macro_rules! check_str_eq {
    ($ctx:expr, $left:expr, $right:expr $(,)?) => {
        match (&$left, &$right) {
            (left, right) => {
                let left: &str = ::core::convert::AsRef::<str>::as_ref(left);
                let right: &str = ::core::convert::AsRef::<str>::as_ref(right);
                $ctx.ensure(left == right, ::core::format_args!("{} is not {}", left, right))?
            }
        }
    };
}

/// Fail the phase unconditionally with a formatted message.
#[macro_export]
macro_rules! fail_case {
    ($ctx:expr, $($arg:tt)+) => {
        return ::core::result::Result::Err($ctx.fail(::core::format_args!($($arg)+)))
    };
}

/// Abort the phase, and with it the suite, with a formatted message.
///
/// The teardown of the current case still runs before the suite stops.
#[macro_export]
macro_rules! abort_case {
    ($ctx:expr, $($arg:tt)+) => {
        return ::core::result::Result::Err($ctx.abort(::core::format_args!($($arg)+)))
    };
}

/// Leave the phase early without changing the passing status.
#[macro_export]
macro_rules! pass_case {
    ($ctx:expr $(,)?) => {
        return ::core::result::Result::Err($ctx.pass())
    };
}
