//! Run configuration.
//!
//! Defaults: one iteration, an unseeded random source and
//! [`LogLevel::Info`]. Every setting may be overridden through environment
//! variables prefixed with `CASEKIT_`:
//!
//! - `CASEKIT_ITERATIONS`: number of randomized passes (positive integer)
//! - `CASEKIT_SEED`: seed for a reproducible order (unsigned 64-bit integer)
//! - `CASEKIT_LOG_LEVEL`: `none`, `error`, `info`, `debug`, `trace` or `0`-`4`

use std::env;
use std::num::NonZeroUsize;

use crate::error::ConfigError;
use crate::logger::LogLevel;

/// Environment variable holding the iteration count.
pub const ITERATIONS_VAR: &str = "CASEKIT_ITERATIONS";
/// Environment variable holding the random seed.
pub const SEED_VAR: &str = "CASEKIT_SEED";
/// Environment variable holding the log level.
pub const LOG_LEVEL_VAR: &str = "CASEKIT_LOG_LEVEL";

/// Settings for one suite run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunConfig {
    /// Number of randomized passes over the registry.
    pub iterations: NonZeroUsize,
    /// Seed for the order randomization; `None` draws from the thread RNG.
    pub seed: Option<u64>,
    /// Verbosity of the diagnostic output.
    pub log_level: LogLevel,
    /// Keep the case order of every iteration in the run report.
    ///
    /// Off by default; the report otherwise holds no per-iteration data.
    pub record_orders: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            iterations: NonZeroUsize::MIN,
            seed: None,
            log_level: LogLevel::default(),
            record_orders: false,
        }
    }
}

impl RunConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let iterations = lookup(ITERATIONS_VAR)
            .map(|value| parse_iterations(&value))
            .transpose()?
            .unwrap_or(defaults.iterations);
        let seed = lookup(SEED_VAR)
            .map(|value| parse_seed(&value))
            .transpose()?;
        let log_level = lookup(LOG_LEVEL_VAR)
            .map(|value| value.parse::<LogLevel>())
            .transpose()?
            .unwrap_or(defaults.log_level);
        Ok(Self {
            iterations,
            seed,
            log_level,
            ..defaults
        })
    }

    /// Applies optional overrides on top of this configuration.
    ///
    /// Intended for command line values that take precedence over the
    /// environment.
    #[must_use]
    pub fn apply_overrides(
        mut self,
        iterations: Option<NonZeroUsize>,
        seed: Option<u64>,
        log_level: Option<LogLevel>,
    ) -> Self {
        if let Some(count) = iterations {
            self.iterations = count;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        if let Some(level) = log_level {
            self.log_level = level;
        }
        self
    }

    /// Sets the iteration count.
    #[must_use]
    pub const fn with_iterations(mut self, iterations: NonZeroUsize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the log level.
    #[must_use]
    pub const fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }

    /// Records the case order of every started iteration in the report.
    #[must_use]
    pub const fn with_recorded_orders(mut self) -> Self {
        self.record_orders = true;
        self
    }
}

/// Parses a positive iteration count.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidIterations`] for zero or non-numeric input.
pub fn parse_iterations(value: &str) -> Result<NonZeroUsize, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidIterations(value.to_string()))
}

/// Parses a 64-bit seed.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidSeed`] for non-numeric input.
pub fn parse_seed(value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidSeed(value.to_string()))
}
