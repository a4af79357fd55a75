//! Runs the casekit self-check suite.
//!
//! The harness output goes to stdout at the configured log level; the
//! wrapper's own diagnostics go to stderr through `tracing`. The exit status
//! is `0` for a clean run, the clamped failure count otherwise, and `2` when
//! the configuration is invalid.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use eyre::{Context, Result};
use tracing::info;

use casekit::{Logger, RunConfig, Runner};
use casekit_cli::config::{Args, build_config};
use casekit_cli::logging::init_logging;
use casekit_cli::selfcheck;
use casekit_cli::summary::{exit_status, pause, write_banner, write_completion};

const CONFIG_ERROR_STATUS: u8 = 2;

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&RunConfig::default());
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::from(CONFIG_ERROR_STATUS);
        }
    };
    init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        iterations = config.iterations.get(),
        seed = ?config.seed,
        "starting casekit"
    );

    match run(config, args.pause) {
        Ok(failures) => ExitCode::from(exit_status(failures)),
        Err(e) => {
            tracing::error!(error = %e, "casekit exited with error");
            ExitCode::FAILURE
        }
    }
}

/// Runs the self-check suite and returns its failure count.
fn run(config: RunConfig, wait: bool) -> Result<i64> {
    let mut suite = selfcheck::suite();

    write_banner(&mut io::stdout().lock(), &suite)?;
    let mut logger = Logger::stdout(config.log_level);
    let report = Runner::new(config).run(&mut suite, &mut logger);
    info!(suite = suite.name(), state = ?report.state(), "{report}");

    let mut stdout = io::stdout().lock();
    write_completion(&mut stdout, &suite, report.failures())?;
    stdout.flush().wrap_err("failed to flush stdout")?;

    if wait {
        pause(&mut stdout, &mut io::stdin().lock())?;
    }
    Ok(report.failures())
}
