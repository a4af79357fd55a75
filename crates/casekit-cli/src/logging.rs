//! Structured logging for the wrapper binary.
//!
//! Events go to stderr so they never interleave with the harness output on
//! stdout. Records emitted through the `log` facade by the harness library
//! are forwarded into the same subscriber.

use casekit::{LogLevel, RunConfig};
use tracing_subscriber::EnvFilter;

/// Maps a harness log level onto a tracing filter directive.
#[must_use]
pub const fn filter_directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::None => "off",
        LogLevel::Error => "error",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}

fn filter_from_config(config: &RunConfig) -> EnvFilter {
    EnvFilter::new(filter_directive(config.log_level))
}

/// Initialise the logging subsystem based on configuration.
///
/// If a global subscriber is already set, the error is ignored and the first
/// subscriber stays in place.
pub fn init_logging(config: &RunConfig) {
    let filter = filter_from_config(config);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}
