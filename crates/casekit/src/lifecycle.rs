//! Per-case lifecycle: setup, body and a teardown that always runs.
//!
//! A [`Case`] is assembled from up to three phase closures sharing one value
//! of per-run locals. The lifecycle driver runs them as
//! `Start -> Setup -> Body -> Teardown -> End`:
//!
//! - a failed setup skips the body, still runs the teardown, and returns the
//!   setup status;
//! - the body may leave early through any [`Interrupt`]; the teardown runs on
//!   every such path because the driver, not the body, sequences the phases;
//! - the teardown never replaces a failing status, but an interrupt raised in
//!   the teardown of an otherwise passing case becomes the case status.

use crate::context::{CaseContext, Interrupt, Step, settle};
use crate::registry::CaseDescriptor;
use crate::status::CaseResult;

type Phase<L> = Box<dyn Fn(&mut CaseContext<'_>, &mut L) -> Step>;

/// Builder for a case with locals of type `L`.
///
/// # Examples
///
/// ```
/// use casekit::{Case, CaseContext, LogLevel, Logger, StatusCode, check};
///
/// let descriptor = Case::with_locals("vec", "pushes grow the vector", Vec::<u8>::new)
///     .body(|ctx, items| {
///         items.push(1);
///         check!(ctx, items.len() == 1);
///         Ok(())
///     })
///     .teardown(|_, items| {
///         items.clear();
///         Ok(())
///     })
///     .into_descriptor();
///
/// let mut logger = Logger::capture(LogLevel::None);
/// let result = descriptor.invoke(&mut CaseContext::new(&mut logger));
/// assert_eq!(result.status(), StatusCode::Pass);
/// ```
pub struct Case<L> {
    name: String,
    description: String,
    locals: Box<dyn Fn() -> L>,
    setup: Phase<L>,
    body: Phase<L>,
    teardown: Phase<L>,
}

impl Case<()> {
    /// Starts a case without locals.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_locals(name, description, || ())
    }
}

impl<L: 'static> Case<L> {
    /// Starts a case whose phases share a fresh `L` built for every run.
    #[must_use]
    pub fn with_locals(
        name: impl Into<String>,
        description: impl Into<String>,
        locals: impl Fn() -> L + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            locals: Box::new(locals),
            setup: Box::new(|_, _| Ok(())),
            body: Box::new(|_, _| Ok(())),
            teardown: Box::new(|_, _| Ok(())),
        }
    }

    /// Sets the setup phase.
    #[must_use]
    pub fn setup(mut self, phase: impl Fn(&mut CaseContext<'_>, &mut L) -> Step + 'static) -> Self {
        self.setup = Box::new(phase);
        self
    }

    /// Sets the body phase.
    #[must_use]
    pub fn body(mut self, phase: impl Fn(&mut CaseContext<'_>, &mut L) -> Step + 'static) -> Self {
        self.body = Box::new(phase);
        self
    }

    /// Sets the teardown phase.
    #[must_use]
    pub fn teardown(
        mut self,
        phase: impl Fn(&mut CaseContext<'_>, &mut L) -> Step + 'static,
    ) -> Self {
        self.teardown = Box::new(phase);
        self
    }

    /// Turns the case into a registry entry.
    #[must_use]
    pub fn into_descriptor(self) -> CaseDescriptor {
        let Self {
            name,
            description,
            locals,
            setup,
            body,
            teardown,
        } = self;
        let lifecycle = Lifecycle {
            locals,
            setup,
            body,
            teardown,
        };
        CaseDescriptor::new(name, description, move |ctx| lifecycle.run(ctx))
    }
}

struct Lifecycle<L> {
    locals: Box<dyn Fn() -> L>,
    setup: Phase<L>,
    body: Phase<L>,
    teardown: Phase<L>,
}

impl<L> Lifecycle<L> {
    fn run(&self, ctx: &mut CaseContext<'_>) -> CaseResult {
        let mut locals = (self.locals)();

        ctx.log().trace(format_args!("Running setup"));
        let setup = run_phase(ctx, &self.setup, &mut locals, "Setup completed");
        if !setup.status().is_pass() {
            ctx.log()
                .trace(format_args!("Setup failed - running teardown"));
            let teardown = ctx.nested(|inner| (self.teardown)(inner, &mut locals));
            ctx.log()
                .trace(format_args!("Setup failed - teardown completed"));
            return merge_teardown(setup, teardown);
        }

        ctx.log().trace(format_args!("Running test"));
        let outcome = run_phase(ctx, &self.body, &mut locals, "Test completed");

        ctx.log().trace(format_args!("Running teardown"));
        let teardown = ctx.nested(|inner| (self.teardown)(inner, &mut locals));
        ctx.log().trace(format_args!("Teardown completed"));
        merge_teardown(outcome, teardown)
    }
}

fn run_phase<L>(
    ctx: &mut CaseContext<'_>,
    phase: &Phase<L>,
    locals: &mut L,
    completed: &str,
) -> CaseResult {
    let step = ctx.nested(|inner| phase(inner, locals));
    if step.is_ok() {
        ctx.log().trace(format_args!("{completed}"));
    }
    settle(step)
}

fn merge_teardown(primary: CaseResult, teardown: Step) -> CaseResult {
    match teardown {
        Ok(()) | Err(Interrupt::Pass) => primary,
        Err(interrupt) if primary.status().is_pass() => interrupt.into_result(),
        // The teardown message was already traced when the interrupt was built.
        Err(_) => primary,
    }
}
