//! Error types for the fallible parts of the harness API.
//!
//! Case and suite outcomes are not errors: they travel through
//! [`StatusCode`](crate::StatusCode), [`SetupOutcome`](crate::SetupOutcome)
//! and the failure count. The types here cover configuration and registry
//! construction only.

use thiserror::Error;

/// Errors raised while reading run configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The log level is neither a known name nor a code in `0..=4`.
    #[error("unknown log level '{0}', expected one of: none, error, info, debug, trace")]
    UnknownLogLevel(String),

    /// The iteration count is not a positive integer.
    #[error("invalid iteration count '{0}', expected a positive integer")]
    InvalidIterations(String),

    /// The seed is not an unsigned 64-bit integer.
    #[error("invalid seed '{0}', expected an unsigned 64-bit integer")]
    InvalidSeed(String),
}

/// Errors raised while freezing a registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two cases were registered under the same name.
    #[error("duplicate case '{name}' registered at positions {first} and {second}")]
    DuplicateCase {
        /// The shared case name.
        name: String,
        /// Position of the first registration.
        first: usize,
        /// Position of the conflicting registration.
        second: usize,
    },
}
