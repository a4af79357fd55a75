//! Command line arguments and their merge with the environment.
//!
//! Flags take precedence over the `CASEKIT_*` environment variables, which
//! take precedence over the built-in defaults.

use std::num::NonZeroUsize;

use casekit::{LogLevel, RunConfig};
use clap::Parser;

use crate::error::CliError;

/// Runs the casekit self-check suite and reports its failure count.
#[derive(Parser, Debug, Default)]
#[command(name = "casekit", version, about)]
pub struct Args {
    /// Log level (none, error, info, debug, trace or 0-4).
    #[arg(long)]
    pub log_level: Option<LogLevel>,

    /// Number of randomized passes over the suite.
    #[arg(long)]
    pub iterations: Option<NonZeroUsize>,

    /// Seed for a reproducible case order.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Wait for return before exiting.
    #[arg(long)]
    pub pause: bool,
}

/// Builds the run configuration from the process environment and `args`.
///
/// # Errors
///
/// Returns [`CliError::Config`] when an environment variable is invalid.
pub fn build_config(args: &Args) -> Result<RunConfig, CliError> {
    let config = RunConfig::from_env()?;
    Ok(apply_args(config, args))
}

/// Builds the run configuration from an arbitrary variable lookup and `args`.
///
/// # Errors
///
/// Returns [`CliError::Config`] when a looked-up variable is invalid.
pub fn build_config_with(
    args: &Args,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<RunConfig, CliError> {
    let config = RunConfig::from_lookup(lookup)?;
    Ok(apply_args(config, args))
}

fn apply_args(config: RunConfig, args: &Args) -> RunConfig {
    config.apply_overrides(args.iterations, args.seed, args.log_level)
}
