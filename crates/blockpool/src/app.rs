//! Application entry point and dispatch.

use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::warn;

use blockpool_cli::output::{write_json_file, Judged};
use blockpool_cli::{CLIReportPresenter, ProgressObserver};
use blockpool_core::constants::exit_codes;
use blockpool_core::Pool;
use blockpool_harness::{
    inspect, smoke, stress, CancellationToken, HarnessError, LoggingObserver, StressObserver,
};

use crate::config::{AppConfig, Command, InspectArgs, StressArgs};

/// How a completed command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Command succeeded; runs passed their verdict.
    Passed,
    /// A run finished with a failing verdict.
    Failed,
    /// A run was interrupted.
    Cancelled,
}

impl Outcome {
    /// Process exit code.
    #[must_use]
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Passed => exit_codes::SUCCESS,
            Self::Failed => exit_codes::ERROR_VERDICT,
            Self::Cancelled => exit_codes::ERROR_CANCELED,
        }
    }

    fn from_verdict(passed: bool) -> Self {
        if passed {
            Self::Passed
        } else {
            Self::Failed
        }
    }
}

/// Run the application.
pub fn run(config: &AppConfig) -> Result<Outcome> {
    match &config.command {
        Command::Completion { shell } => {
            let mut cmd = <AppConfig as clap::CommandFactory>::command();
            blockpool_cli::completion::generate_completion(&mut cmd, *shell, &mut io::stdout());
            Ok(Outcome::Passed)
        }
        Command::Smoke => run_smoke(config),
        Command::Stress(args) => run_stress(config, args),
        Command::Inspect(args) => run_inspect(config, args),
    }
}

/// Presenter for the output flags.
#[must_use]
pub fn presenter(config: &AppConfig) -> CLIReportPresenter {
    CLIReportPresenter::new(config.json, config.quiet, config.verbose > 0)
}

fn save_report<T: Serialize>(config: &AppConfig, report: &T) -> Result<()> {
    if let Some(path) = &config.output {
        write_json_file(path, report)
            .with_context(|| format!("cannot write report to {}", path.display()))?;
    }
    Ok(())
}

fn run_smoke(config: &AppConfig) -> Result<Outcome> {
    let report = smoke::run(config.pool_config())?;
    let mut out = io::stdout().lock();
    presenter(config).present_smoke(&mut out, &report)?;
    out.flush()?;
    let verdict = report.verdict();
    let passed = verdict.passed;
    save_report(config, &Judged::new(&report, verdict))?;
    Ok(Outcome::from_verdict(passed))
}

fn run_stress(config: &AppConfig, args: &StressArgs) -> Result<Outcome> {
    let stress_config = args.stress_config();
    stress_config.validate()?;
    let pool = Pool::with_config(config.pool_config()).map_err(HarnessError::from)?;

    let cancel = CancellationToken::new();
    ctrlc_handler(cancel.clone());

    let rounds = (stress_config.threads as u64).saturating_mul(stress_config.rounds as u64);
    let progress = if config.quiet || config.json {
        ProgressObserver::hidden(rounds)
    } else {
        ProgressObserver::new(rounds)
    };
    // Log lines and a live bar fight over the terminal.
    let observer: &dyn StressObserver = if config.verbose > 0 {
        &LoggingObserver
    } else {
        &progress
    };

    let report = stress::run(&pool, &stress_config, &cancel, observer);
    progress.finish();
    let report = report?;

    let mut out = io::stdout().lock();
    presenter(config).present_stress(&mut out, &report)?;
    out.flush()?;
    let verdict = report.verdict();
    let passed = verdict.passed;
    save_report(config, &Judged::new(&report, verdict))?;

    if report.cancelled {
        return Ok(Outcome::Cancelled);
    }
    Ok(Outcome::from_verdict(passed))
}

fn run_inspect(config: &AppConfig, args: &InspectArgs) -> Result<Outcome> {
    let inspection = inspect::run(config.pool_config(), args.allocate, args.release)?;
    let mut out = io::stdout().lock();
    presenter(config).present_inspection(&mut out, &inspection)?;
    out.flush()?;
    // A snapshot has no verdict; the file matches `--json` on stdout.
    save_report(config, &inspection)?;
    Ok(Outcome::Passed)
}

fn ctrlc_handler(cancel: CancellationToken) {
    if let Err(err) = ctrlc::set_handler(move || {
        cancel.cancel();
    }) {
        warn!(error = %err, "cannot install Ctrl+C handler; run is not interruptible");
    }
}
