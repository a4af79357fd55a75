//! Command line wrapper for the `casekit` harness.
//!
//! The `casekit` binary runs the built-in self-check suite, prints a short
//! banner and summary around the harness output, and maps the failure count
//! onto the process exit status.
//!
//! # Configuration
//!
//! Settings come from the `CASEKIT_*` environment variables understood by
//! [`casekit::RunConfig::from_env`], overridden by command line flags:
//!
//! - `--log-level`: `none`, `error`, `info`, `debug`, `trace` or `0`-`4`
//! - `--iterations`: number of randomized passes
//! - `--seed`: seed for a reproducible case order
//! - `--pause`: wait for return before exiting

pub mod config;
pub mod error;
pub mod logging;
pub mod selfcheck;
pub mod summary;
