//! Suites: a named registry plus the hooks run once around it.

use std::fmt;

use crate::registry::Registry;

/// Setup code that skips the whole suite.
pub const SKIP_SUITE: i32 = -1;

/// Hooks invoked once before and once after the iteration loop.
///
/// Both hooks default to no-ops, so a suite without setup or teardown can use
/// [`NoHooks`].
pub trait SuiteHooks {
    /// Prepares the suite.
    ///
    /// Returns `0` to run the cases, [`SKIP_SUITE`] to skip the suite as a
    /// success, or any other value to fail it; that value is reported verbatim
    /// as the failure count.
    fn setup(&mut self) -> i32 {
        0
    }

    /// Releases whatever [`SuiteHooks::setup`] acquired.
    ///
    /// Only called when setup returned `0`, and then exactly once, even when a
    /// case aborted the run.
    fn teardown(&mut self) {}
}

/// Hooks that do nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHooks;

impl SuiteHooks for NoHooks {}

/// Hooks backed by two closures.
///
/// # Examples
///
/// ```
/// use casekit::{FnHooks, SKIP_SUITE, SuiteHooks};
///
/// let mut hooks = FnHooks::new(|| SKIP_SUITE, || {});
/// assert_eq!(hooks.setup(), -1);
/// ```
pub struct FnHooks<S, T> {
    setup: S,
    teardown: T,
}

impl<S, T> FnHooks<S, T>
where
    S: FnMut() -> i32,
    T: FnMut(),
{
    /// Wraps a setup and a teardown closure.
    #[must_use]
    pub const fn new(setup: S, teardown: T) -> Self {
        Self { setup, teardown }
    }
}

impl<S, T> SuiteHooks for FnHooks<S, T>
where
    S: FnMut() -> i32,
    T: FnMut(),
{
    fn setup(&mut self) -> i32 {
        (self.setup)()
    }

    fn teardown(&mut self) {
        (self.teardown)();
    }
}

/// Classification of a setup return code.
///
/// The three outcomes are kept apart: `-1` is a skip, not a failure count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetupOutcome {
    /// Setup returned `0`; the cases run.
    Proceed,
    /// Setup returned [`SKIP_SUITE`]; the suite counts as clean.
    Skip,
    /// Setup returned this code; it becomes the failure count.
    Fatal(i32),
}

impl From<i32> for SetupOutcome {
    fn from(code: i32) -> Self {
        match code {
            0 => Self::Proceed,
            SKIP_SUITE => Self::Skip,
            other => Self::Fatal(other),
        }
    }
}

/// Position of a suite run in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SuiteState {
    /// Not started.
    #[default]
    Idle,
    /// Setup hook running.
    Setup,
    /// Setup asked to skip; terminal.
    Skipped,
    /// Setup failed; terminal.
    Failed,
    /// Setup succeeded.
    Ready,
    /// Iterations in progress.
    Running,
    /// Teardown hook ran.
    Torndown,
    /// Run complete; terminal.
    Done,
}

impl SuiteState {
    /// Returns `true` for states a run ends in.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Skipped | Self::Failed | Self::Done)
    }
}

/// A named registry together with its hooks.
pub struct Suite {
    name: String,
    registry: Registry,
    hooks: Box<dyn SuiteHooks>,
}

impl Suite {
    /// Creates a suite without hooks.
    #[must_use]
    pub fn new(name: impl Into<String>, registry: Registry) -> Self {
        Self {
            name: name.into(),
            registry,
            hooks: Box::new(NoHooks),
        }
    }

    /// Replaces the suite hooks.
    #[must_use]
    pub fn with_hooks(mut self, hooks: impl SuiteHooks + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    /// Returns the suite name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the registry.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    pub(crate) fn parts_mut(&mut self) -> (&str, &Registry, &mut dyn SuiteHooks) {
        (&self.name, &self.registry, self.hooks.as_mut())
    }
}

impl fmt::Debug for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Suite")
            .field("name", &self.name)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
