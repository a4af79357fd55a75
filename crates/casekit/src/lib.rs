//! In-process test-case harness.
//!
//! `casekit` runs a registry of named cases over one or more iterations,
//! shuffling their order between iterations, and reports a failure count.
//! Each case runs through a setup, body and teardown lifecycle; the teardown
//! runs on every path out of the body. Diagnostic output is leveled and
//! indented by nesting depth.
//!
//! # Examples
//!
//! ```
//! use casekit::{Case, FnHooks, LogLevel, Logger, RegistryBuilder, RunConfig, Runner, Suite};
//! use casekit::{check, check_str_eq};
//!
//! let registry = RegistryBuilder::new()
//!     .case(Case::new("upper", "uppercases ASCII").body(|ctx, ()| {
//!         check_str_eq!(ctx, "abc".to_uppercase(), "ABC");
//!         Ok(())
//!     }))
//!     .case(Case::new("len", "counts bytes").body(|ctx, ()| {
//!         check!(ctx, "abc".len() == 3);
//!         Ok(())
//!     }))
//!     .build();
//! let mut suite = Suite::new("strings", registry).with_hooks(FnHooks::new(|| 0, || {}));
//!
//! let mut logger = Logger::capture(LogLevel::Error);
//! let report = Runner::new(RunConfig::default().with_seed(3)).run(&mut suite, &mut logger);
//! assert_eq!(report.failures(), 0);
//! ```

pub mod config;
mod context;
pub mod error;
mod lifecycle;
mod logger;
mod macros;
mod registry;
mod runner;
pub mod shuffle;
mod status;
mod suite;

pub use config::RunConfig;
pub use context::{CaseContext, Interrupt, Step, settle};
pub use error::{ConfigError, RegistryError};
pub use lifecycle::Case;
pub use logger::{IndentGuard, LogLevel, Logger};
pub use registry::{CaseDescriptor, CaseFn, Registry, RegistryBuilder};
pub use runner::{RunReport, Runner};
pub use status::{CaseResult, Message, NO_ERROR_SPECIFIED, StatusCode, describe};
pub use suite::{FnHooks, NoHooks, SKIP_SUITE, SetupOutcome, Suite, SuiteHooks, SuiteState};

/// Runs `suite` to completion and returns its failure count.
///
/// Output goes to standard output at `log_level`. Iterations and seed come
/// from the `CASEKIT_*` environment variables; invalid values fall back to
/// the defaults with a warning through the `log` facade.
///
/// The result is `0` for a clean or skipped suite, the setup code for a
/// suite whose setup failed, and otherwise the number of failed or
/// unexecuted case slots.
pub fn run_suite(suite: &mut Suite, log_level: LogLevel) -> i64 {
    let config = RunConfig::from_env()
        .unwrap_or_else(|error| {
            log::warn!("ignoring invalid casekit environment: {error}");
            RunConfig::default()
        })
        .with_log_level(log_level);
    let mut logger = Logger::stdout(config.log_level);
    Runner::new(config).run(suite, &mut logger).failures()
}
