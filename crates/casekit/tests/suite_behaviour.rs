//! Behavioural tests for suite setup, iteration, abort and teardown semantics.

use std::cell::{Cell, RefCell};
use std::num::NonZeroUsize;
use std::rc::Rc;

use casekit::{
    Case, CaseDescriptor, CaseResult, FnHooks, LogLevel, Logger, Message, Registry,
    RegistryBuilder, RunConfig, Runner, StatusCode, Suite, SuiteState, check_that,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rstest::{fixture, rstest};

/// Counts hook and case invocations shared with the closures under test.
#[derive(Clone, Default)]
struct Counters {
    setups: Rc<Cell<u32>>,
    teardowns: Rc<Cell<u32>>,
    invocations: Rc<Cell<u32>>,
}

impl Counters {
    fn hooks(&self, setup_code: i32) -> FnHooks<impl FnMut() -> i32 + use<>, impl FnMut() + use<>> {
        let setups = Rc::clone(&self.setups);
        let teardowns = Rc::clone(&self.teardowns);
        FnHooks::new(
            move || {
                setups.set(setups.get() + 1);
                setup_code
            },
            move || teardowns.set(teardowns.get() + 1),
        )
    }

    fn case(&self, name: &str, status: StatusCode) -> CaseDescriptor {
        let invocations = Rc::clone(&self.invocations);
        CaseDescriptor::new(name, "fixed status", move |_| {
            invocations.set(invocations.get() + 1);
            CaseResult::new(status, None)
        })
    }

    fn registry(&self, statuses: &[StatusCode]) -> Registry {
        statuses
            .iter()
            .enumerate()
            .map(|(index, status)| self.case(&format!("case-{index}"), *status))
            .collect()
    }
}

#[fixture]
fn counters() -> Counters {
    Counters::default()
}

fn iterations(count: usize) -> NonZeroUsize {
    NonZeroUsize::new(count).unwrap_or(NonZeroUsize::MIN)
}

fn runner(count: usize, seed: u64) -> Runner {
    Runner::new(
        RunConfig::default()
            .with_iterations(iterations(count))
            .with_seed(seed),
    )
}

#[rstest]
#[case(0, 1)]
#[case(1, 1)]
#[case(5, 3)]
#[case(8, 10)]
fn all_passing_cases_yield_zero_failures(
    counters: Counters,
    #[case] cases: usize,
    #[case] passes: usize,
) {
    let registry = counters.registry(&vec![StatusCode::Pass; cases]);
    let mut suite = Suite::new("green", registry).with_hooks(counters.hooks(0));
    let mut logger = Logger::capture(LogLevel::Trace);

    let report = runner(passes, 11).run(&mut suite, &mut logger);

    assert_eq!(report.failures(), 0);
    assert_eq!(report.cases_run(), cases * passes);
    assert_eq!(report.iterations_run(), passes);
    assert_eq!(report.state(), SuiteState::Done);
    assert_eq!(counters.teardowns.get(), 1);
}

#[rstest]
fn skipped_setup_runs_nothing(counters: Counters) {
    let registry = counters.registry(&[StatusCode::Fail, StatusCode::Abort, StatusCode::Pass]);
    let mut suite = Suite::new("skipped", registry).with_hooks(counters.hooks(-1));
    let mut logger = Logger::capture(LogLevel::Debug);

    let report = runner(4, 0).run(&mut suite, &mut logger);

    assert_eq!(report.failures(), 0);
    assert_eq!(report.state(), SuiteState::Skipped);
    assert_eq!(counters.setups.get(), 1);
    assert_eq!(counters.invocations.get(), 0);
    assert_eq!(counters.teardowns.get(), 0);
    assert_eq!(
        logger.captured().as_deref(),
        Some("Running test suite skipped with 3 tests\nTest suite skipped will be skipped\n")
    );
}

#[rstest]
#[case(7)]
#[case(-2)]
#[case(1)]
fn fatal_setup_code_is_returned_verbatim(counters: Counters, #[case] code: i32) {
    let registry = counters.registry(&[StatusCode::Pass, StatusCode::Pass]);
    let mut suite = Suite::new("broken", registry).with_hooks(counters.hooks(code));
    let mut logger = Logger::capture(LogLevel::Debug);

    let report = runner(2, 0).run(&mut suite, &mut logger);

    assert_eq!(report.failures(), i64::from(code));
    assert_eq!(report.state(), SuiteState::Failed);
    assert_eq!(counters.invocations.get(), 0);
    assert_eq!(counters.teardowns.get(), 0);
    let output = logger.captured().unwrap_or_default();
    assert!(output.ends_with(&format!("Test suite broken failed to setup: {code}\n")));
}

#[rstest]
fn abort_keeps_every_unexecuted_slot_failed(counters: Counters) {
    let registry = counters.registry(&[StatusCode::Abort, StatusCode::Pass]);
    let mut suite = Suite::new("abort", registry).with_hooks(counters.hooks(0));
    let mut logger = Logger::capture(LogLevel::Debug);

    // The identity order guarantees the aborting case runs first.
    let report = runner(2, 5).run(&mut suite, &mut logger);

    assert_eq!(report.failures(), 4);
    assert_eq!(report.cases_run(), 1);
    assert_eq!(report.iterations_run(), 1);
    assert_eq!(counters.invocations.get(), 1);
    assert_eq!(counters.teardowns.get(), 1);
    let output = logger.captured().unwrap_or_default();
    assert!(output.contains("\tTest suite aborted\n"));
}

#[rstest]
fn abort_mid_iteration_counts_earlier_passes(counters: Counters) {
    let registry = counters.registry(&[StatusCode::Pass, StatusCode::Abort, StatusCode::Pass]);
    let mut suite = Suite::new("late-abort", registry).with_hooks(counters.hooks(0));
    let mut logger = Logger::capture(LogLevel::None);

    let report = runner(3, 5).run(&mut suite, &mut logger);

    // 9 reserved slots, one pass executed before the abort.
    assert_eq!(report.failures(), 8);
    assert_eq!(report.cases_run(), 2);
    assert_eq!(counters.teardowns.get(), 1);
}

#[rstest]
fn failures_and_unknown_codes_do_not_halt(counters: Counters) {
    let registry = counters.registry(&[
        StatusCode::Fail,
        StatusCode::Unrecognized(40),
        StatusCode::Pass,
    ]);
    let mut suite = Suite::new("mixed", registry).with_hooks(counters.hooks(0));
    let mut logger = Logger::capture(LogLevel::None);

    let report = runner(3, 21).run(&mut suite, &mut logger);

    assert_eq!(report.failures(), 6);
    assert_eq!(report.cases_run(), 9);
    assert_eq!(counters.invocations.get(), 9);
}

fn mixed_lifecycle_cases() -> Vec<CaseDescriptor> {
    vec![
        Case::new("green", "passes")
            .body(|ctx, ()| {
                check_that!(ctx, true, "never shown");
                Ok(())
            })
            .into_descriptor(),
        Case::new("red", "fails in body")
            .body(|ctx, ()| {
                check_that!(ctx, 1 > 2, "{} is not greater than {}", 1, 2);
                Ok(())
            })
            .into_descriptor(),
        Case::new("leaky", "fails in teardown")
            .teardown(|ctx, ()| Err(ctx.fail(format_args!("handle still open"))))
            .into_descriptor(),
        Case::new("early", "leaves setup early")
            .setup(|ctx, ()| Err(ctx.pass()))
            .into_descriptor(),
    ]
}

fn mixed_lifecycle_registry() -> Registry {
    mixed_lifecycle_cases().into_iter().collect()
}

#[rstest]
#[case::passes_only(false)]
#[case::with_abort(true)]
fn indentation_is_balanced_after_a_run(#[case] with_abort: bool) {
    let mut builder = mixed_lifecycle_cases()
        .into_iter()
        .fold(RegistryBuilder::new(), RegistryBuilder::register);
    if with_abort {
        builder = builder.register(CaseDescriptor::new("stop", "aborts", |ctx| {
            ctx.log().trace(format_args!("aborting"));
            CaseResult::abort(Some(Message::new("stop requested")))
        }));
    }
    let mut suite = Suite::new("balanced", builder.build());
    let mut logger = Logger::capture(LogLevel::Trace);

    let _ = runner(3, 8).run(&mut suite, &mut logger);
    assert_eq!(logger.depth(), 0);

    {
        let mut outer = logger.indent();
        let _ = runner(2, 9).run(&mut suite, &mut outer);
        assert_eq!(outer.depth(), 1);
    }
    assert_eq!(logger.depth(), 0);
}

#[test]
fn lifecycle_outcomes_are_counted() {
    let mut suite = Suite::new("lifecycle", mixed_lifecycle_registry());
    let mut logger = Logger::capture(LogLevel::Error);

    let report = runner(1, 0).run(&mut suite, &mut logger);

    // "red" and "leaky" fail; "green" and "early" pass.
    assert_eq!(report.failures(), 2);
    assert_eq!(
        logger.captured().as_deref(),
        Some(concat!(
            "\t1: red: Test failed: 1 is not greater than 2\n",
            "\t2: leaky: Test failed: handle still open\n",
        ))
    );
}

#[test]
fn injected_random_source_reproduces_orders() {
    let order_trail = Rc::new(RefCell::new(Vec::new()));
    let build = |trail: &Rc<RefCell<Vec<usize>>>| -> Suite {
        let registry: Registry = (0..6)
            .map(|index| {
                let trail = Rc::clone(trail);
                CaseDescriptor::new(format!("case-{index}"), "records itself", move |_| {
                    trail.borrow_mut().push(index);
                    CaseResult::pass()
                })
            })
            .collect();
        Suite::new("orders", registry)
    };
    let config = RunConfig::default()
        .with_iterations(iterations(5))
        .with_recorded_orders();

    let mut first_suite = build(&order_trail);
    let mut logger = Logger::capture(LogLevel::None);
    let first = Runner::new(config).run_with_rng(
        &mut first_suite,
        &mut logger,
        &mut StdRng::seed_from_u64(2024),
    );
    let first_trail = order_trail.replace(Vec::new());

    let mut second_suite = build(&order_trail);
    let second = Runner::new(config).run_with_rng(
        &mut second_suite,
        &mut logger,
        &mut StdRng::seed_from_u64(2024),
    );
    let second_trail = order_trail.replace(Vec::new());

    assert_eq!(first.orders(), second.orders());
    assert_eq!(first.orders().len(), 5);
    assert_eq!(first.orders().first(), Some(&(0..6).collect::<Vec<_>>()));
    assert_eq!(first_trail, second_trail);
    assert_eq!(first_trail, first.orders().concat());
    for order in first.orders() {
        let mut sorted = order.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..6).collect::<Vec<_>>());
    }
}

#[test]
fn empty_registry_still_runs_hooks() {
    let counters = Counters::default();
    let mut suite = Suite::new("empty", Registry::default()).with_hooks(counters.hooks(0));
    let mut logger = Logger::capture(LogLevel::Trace);

    let report = runner(3, 1).run(&mut suite, &mut logger);

    assert_eq!(report.failures(), 0);
    assert_eq!(report.iterations_run(), 3);
    assert_eq!(counters.setups.get(), 1);
    assert_eq!(counters.teardowns.get(), 1);
}
