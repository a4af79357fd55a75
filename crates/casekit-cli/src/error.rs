//! Error types for the command line wrapper.

use casekit::ConfigError;
use thiserror::Error;

/// Errors raised while preparing a run.
#[derive(Debug, Error)]
pub enum CliError {
    /// An environment variable held an invalid value.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_is_prefixed() {
        let error = CliError::from(ConfigError::InvalidSeed("x".to_string()));
        assert!(error.to_string().starts_with("invalid configuration: "));
        assert!(error.to_string().contains("'x'"));
    }
}
