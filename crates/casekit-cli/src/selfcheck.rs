//! Built-in suite exercising the harness against itself.
//!
//! Each case drives a small inner case or suite through a capture logger and
//! checks what the harness reported. A clean run therefore shows that the
//! lifecycle, assertion, accounting and logging paths behave as documented.

use std::cell::Cell;
use std::num::NonZeroUsize;
use std::rc::Rc;

use casekit::{
    Case, CaseContext, CaseDescriptor, CaseResult, FnHooks, LogLevel, Logger, Message, Registry,
    RegistryBuilder, RunConfig, Runner, StatusCode, Step, Suite, check, check_str_eq, check_that,
};

/// Name of the built-in suite.
pub const SUITE_NAME: &str = "casekit-selfcheck";

/// Builds the self-check suite.
#[must_use]
pub fn suite() -> Suite {
    let registry = RegistryBuilder::new()
        .case(Case::new("indent", "nested log lines are indented").body(indent_body))
        .case(Case::new("assertion", "failed checks name the expression").body(assertion_body))
        .case(
            Case::with_locals("teardown", "teardown runs after a failing body", Counter::default)
                .body(teardown_body)
                .teardown(|ctx, counter| {
                    let runs = counter.get();
                    check_that!(ctx, runs == 1, "inner teardown ran {} times", runs);
                    Ok(())
                }),
        )
        .case(Case::new("strings", "string comparison reports both sides").body(strings_body))
        .case(
            Case::new("accounting", "aborts keep unexecuted slots failed").body(accounting_body),
        )
        .case(Case::new("order", "seeded runs repeat their order").body(order_body))
        .build();
    Suite::new(SUITE_NAME, registry).with_hooks(FnHooks::new(
        || {
            tracing::debug!(suite = SUITE_NAME, "self-check setup");
            0
        },
        || tracing::debug!(suite = SUITE_NAME, "self-check teardown"),
    ))
}

type Counter = Rc<Cell<u32>>;

fn invoke(descriptor: &CaseDescriptor) -> CaseResult {
    let mut logger = Logger::capture(LogLevel::None);
    descriptor.invoke(&mut CaseContext::new(&mut logger))
}

fn indent_body(ctx: &mut CaseContext<'_>, (): &mut ()) -> Step {
    let mut logger = Logger::capture(LogLevel::Info);
    logger.info(format_args!("outer"));
    logger.indent().info(format_args!("inner"));
    check_str_eq!(
        ctx,
        logger.captured().unwrap_or_default(),
        "outer\n\tinner\n"
    );
    check!(ctx, logger.depth() == 0);
    Ok(())
}

fn assertion_body(ctx: &mut CaseContext<'_>, (): &mut ()) -> Step {
    let inner = Case::new("inner", "fails").body(|inner, ()| {
        check!(inner, 1 + 1 == 3);
        Ok(())
    });
    let result = invoke(&inner.into_descriptor());
    check!(ctx, result.status() == StatusCode::Fail);
    check_str_eq!(
        ctx,
        result.message().map_or("", Message::as_str),
        "Assertion 1 + 1 == 3 failed"
    );
    Ok(())
}

fn teardown_body(ctx: &mut CaseContext<'_>, counter: &mut Counter) -> Step {
    let seen = Rc::clone(counter);
    let inner = Case::new("inner", "fails before teardown")
        .body(|inner, ()| Err(inner.fail(format_args!("deliberate"))))
        .teardown(move |_, ()| {
            seen.set(seen.get() + 1);
            Ok(())
        });
    let result = invoke(&inner.into_descriptor());
    check!(ctx, result.status() == StatusCode::Fail);
    Ok(())
}

fn strings_body(ctx: &mut CaseContext<'_>, (): &mut ()) -> Step {
    let inner = Case::new("inner", "compares").body(|inner, ()| {
        check_str_eq!(inner, "left".to_string(), "right");
        Ok(())
    });
    let result = invoke(&inner.into_descriptor());
    check_str_eq!(
        ctx,
        result.message().map_or("", Message::as_str),
        "left is not right"
    );
    Ok(())
}

fn accounting_body(ctx: &mut CaseContext<'_>, (): &mut ()) -> Step {
    let registry: Registry = [StatusCode::Abort, StatusCode::Pass]
        .into_iter()
        .map(|status| {
            CaseDescriptor::new("fixed", "fixed status", move |_| CaseResult::new(status, None))
        })
        .collect();
    let mut inner = Suite::new("inner", registry);
    let config = RunConfig::default()
        .with_iterations(NonZeroUsize::new(2).unwrap_or(NonZeroUsize::MIN))
        .with_seed(0);

    let report = Runner::new(config).run(&mut inner, &mut Logger::capture(LogLevel::None));

    let failures = report.failures();
    check_that!(ctx, failures == 4, "expected 4 failures, got {}", failures);
    check!(ctx, report.cases_run() == 1);
    Ok(())
}

fn order_body(ctx: &mut CaseContext<'_>, (): &mut ()) -> Step {
    let config = RunConfig::default()
        .with_iterations(NonZeroUsize::new(4).unwrap_or(NonZeroUsize::MIN))
        .with_seed(1)
        .with_recorded_orders();
    let orders = |runner: Runner| {
        let registry: Registry = (0..5)
            .map(|index| {
                CaseDescriptor::new(format!("case-{index}"), "passes", |_| CaseResult::pass())
            })
            .collect();
        let mut inner = Suite::new("inner", registry);
        runner
            .run(&mut inner, &mut Logger::capture(LogLevel::None))
            .orders()
            .to_vec()
    };

    let first = orders(Runner::new(config));
    let second = orders(Runner::new(config));
    check_that!(ctx, first == second, "orders differ: {:?} vs {:?}", first, second);
    check!(ctx, first.len() == 4);
    Ok(())
}
