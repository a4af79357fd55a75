//! Suite runner: setup, randomized iterations, failure accounting, teardown.
//!
//! The failure count starts pessimistically at `iterations × cases` and is
//! decremented once for every executed pass. Slots that never run, because a
//! case aborted the suite, therefore stay counted as failures.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::RunConfig;
use crate::context::CaseContext;
use crate::logger::Logger;
use crate::registry::{CaseDescriptor, Registry};
use crate::shuffle::{identity, transposition_shuffle};
use crate::status::{Message, StatusCode, describe};
use crate::suite::{SetupOutcome, Suite, SuiteState};

/// Summary of one suite run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    failures: i64,
    state: SuiteState,
    iterations_run: usize,
    cases_run: usize,
    orders: Vec<Vec<usize>>,
}

impl RunReport {
    const fn new() -> Self {
        Self {
            failures: 0,
            state: SuiteState::Idle,
            iterations_run: 0,
            cases_run: 0,
            orders: Vec::new(),
        }
    }

    fn advance(&mut self, suite: &str, next: SuiteState) {
        log::trace!("suite {suite}: {:?} -> {next:?}", self.state);
        self.state = next;
    }

    fn finish(mut self, failures: i64) -> Self {
        self.failures = failures;
        self
    }

    /// Returns the failure count: `0` for a clean or skipped run, the setup
    /// code for a suite whose setup failed.
    #[must_use]
    pub const fn failures(&self) -> i64 {
        self.failures
    }

    /// Returns the state the run ended in.
    #[must_use]
    pub const fn state(&self) -> SuiteState {
        self.state
    }

    /// Returns how many iterations were started.
    #[must_use]
    pub const fn iterations_run(&self) -> usize {
        self.iterations_run
    }

    /// Returns how many case invocations happened in total.
    #[must_use]
    pub const fn cases_run(&self) -> usize {
        self.cases_run
    }

    /// Returns the case order at the start of every started iteration.
    ///
    /// Empty unless the run was configured with
    /// [`RunConfig::with_recorded_orders`].
    #[must_use]
    pub fn orders(&self) -> &[Vec<usize>] {
        &self.orders
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} failure(s) after {} case run(s) in {} iteration(s)",
            self.failures, self.cases_run, self.iterations_run
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Halt,
}

#[derive(Debug)]
struct Tally {
    failures: i64,
    cases_run: usize,
}

impl Tally {
    fn pessimistic(iterations: usize, cases: usize) -> Self {
        let scheduled = iterations.saturating_mul(cases);
        Self {
            failures: i64::try_from(scheduled).unwrap_or(i64::MAX),
            cases_run: 0,
        }
    }
}

/// Drives a [`Suite`] according to a [`RunConfig`].
///
/// # Examples
///
/// ```
/// use casekit::{Case, LogLevel, Logger, RegistryBuilder, RunConfig, Runner, Suite, check};
///
/// let registry = RegistryBuilder::new()
///     .case(Case::new("sum", "adds").body(|ctx, ()| {
///         check!(ctx, 2 + 2 == 4);
///         Ok(())
///     }))
///     .build();
/// let mut suite = Suite::new("arithmetic", registry);
/// let mut logger = Logger::capture(LogLevel::Info);
///
/// let report = Runner::new(RunConfig::default().with_seed(1)).run(&mut suite, &mut logger);
/// assert_eq!(report.failures(), 0);
/// assert_eq!(logger.captured().as_deref(), Some("\tsum - adds\n"));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Runner {
    config: RunConfig,
}

impl Runner {
    /// Creates a runner.
    #[must_use]
    pub const fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration in use.
    #[must_use]
    pub const fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Runs the suite with the random source selected by the configuration.
    pub fn run(&self, suite: &mut Suite, logger: &mut Logger) -> RunReport {
        match self.config.seed {
            Some(seed) => {
                log::debug!("randomizing case order with seed {seed}");
                self.run_with_rng(suite, logger, &mut StdRng::seed_from_u64(seed))
            }
            None => self.run_with_rng(suite, logger, &mut rand::thread_rng()),
        }
    }

    /// Runs the suite drawing order randomization from `rng`.
    pub fn run_with_rng<R: Rng + ?Sized>(
        &self,
        suite: &mut Suite,
        logger: &mut Logger,
        rng: &mut R,
    ) -> RunReport {
        let (name, registry, hooks) = suite.parts_mut();
        let count = registry.len();
        let mut report = RunReport::new();
        logger.debug(format_args!("Running test suite {name} with {count} tests"));

        report.advance(name, SuiteState::Setup);
        match SetupOutcome::from(hooks.setup()) {
            SetupOutcome::Skip => {
                logger.debug(format_args!("Test suite {name} will be skipped"));
                report.advance(name, SuiteState::Skipped);
                return report.finish(0);
            }
            SetupOutcome::Fatal(code) => {
                logger.debug(format_args!("Test suite {name} failed to setup: {code}"));
                report.advance(name, SuiteState::Failed);
                return report.finish(i64::from(code));
            }
            SetupOutcome::Proceed => report.advance(name, SuiteState::Ready),
        }

        report.advance(name, SuiteState::Running);
        let tally = self.iterate(registry, logger, rng, &mut report);
        hooks.teardown();
        report.advance(name, SuiteState::Torndown);
        report.advance(name, SuiteState::Done);
        report.finish(tally.failures)
    }

    fn iterate<R: Rng + ?Sized>(
        &self,
        registry: &Registry,
        logger: &mut Logger,
        rng: &mut R,
        report: &mut RunReport,
    ) -> Tally {
        let iterations = self.config.iterations.get();
        let mut tally = Tally::pessimistic(iterations, registry.len());
        let mut order = identity(registry.len());

        let mut scope = logger.indent();
        for _ in 0..iterations {
            if self.config.record_orders {
                report.orders.push(order.clone());
            }
            report.iterations_run += 1;
            let flow = run_iteration(registry, &order, &mut scope, &mut tally);
            transposition_shuffle(&mut order, rng);
            if flow == Flow::Halt {
                break;
            }
        }
        report.cases_run = tally.cases_run;
        tally
    }
}

fn run_iteration(
    registry: &Registry,
    order: &[usize],
    logger: &mut Logger,
    tally: &mut Tally,
) -> Flow {
    for &index in order {
        let Some(case) = registry.get(index) else {
            continue;
        };
        logger.info(format_args!("{} - {}", case.name(), case.description()));

        let result = {
            let mut nested = logger.indent();
            let mut ctx = CaseContext::new(&mut nested);
            case.invoke(&mut ctx)
        };
        tally.cases_run += 1;

        let (status, message) = result.into_parts();
        dispatch(logger, index, case, status, message.as_ref(), tally);
        drop(message);

        if status.is_abort() {
            logger.debug(format_args!("Test suite aborted"));
            return Flow::Halt;
        }
    }
    Flow::Continue
}

fn dispatch(
    logger: &mut Logger,
    index: usize,
    case: &CaseDescriptor,
    status: StatusCode,
    message: Option<&Message>,
    tally: &mut Tally,
) {
    let name = case.name();
    match status {
        StatusCode::Pass => {
            logger.trace(format_args!("{name}: Test passed"));
            tally.failures -= 1;
        }
        StatusCode::Fail | StatusCode::Abort => {
            logger.error(format_args!(
                "{index}: {name}: Test failed: {}",
                describe(message)
            ));
        }
        StatusCode::Unrecognized(code) => {
            logger.error(format_args!(
                "{name}: Unknown error code: {code} ({})",
                describe(message)
            ));
        }
    }
}
