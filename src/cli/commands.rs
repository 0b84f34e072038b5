//! CLI command handlers.
//!
//! Handlers write to any `io::Write` so tests can capture the output.

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use serde::Serialize;
use validator::Validate;

use super::output::{write_outcome, write_verification};
use super::{Args, Command};
use crate::config::{ReportConfig, ScenarioConfig};
use crate::demos::{CltParams, DemoOutcome, PoissonParams};
use crate::engine::rng::DemoRng;
use crate::error::DemoResult;
use crate::report;

/// Main CLI entry point.
///
/// Dispatches to the command handler and maps the result to an exit code.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match execute(&args, &mut out) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Execute the parsed command, writing its output to `out`.
///
/// Returns `Ok(false)` when the command ran but its check failed.
///
/// # Errors
///
/// Returns an error for invalid parameters, unreadable scenarios or I/O
/// failures on `out`.
pub fn execute(args: &Args, out: &mut dyn Write) -> DemoResult<bool> {
    match &args.command {
        Command::Run { scenario } => {
            let scenario = load_scenario(scenario, args)?;
            run_scenario(&scenario, args.json, out)?;
            Ok(true)
        }
        Command::Verify { scenario, runs } => {
            let scenario = load_scenario(scenario, args)?;
            let summary = verify_scenario(&scenario, *runs)?;
            write_verification(out, &summary, args.json)?;
            Ok(summary.identical)
        }
        Command::Clt { .. } | Command::Poisson { .. } => {
            let scenario = scenario_from_args(args)?;
            run_scenario(&scenario, args.json, out)?;
            Ok(true)
        }
    }
}

/// Build a scenario from the `clt`/`poisson` sub-commands.
///
/// # Errors
///
/// Returns an invalid-parameter error for out-of-range values.
pub fn scenario_from_args(args: &Args) -> DemoResult<ScenarioConfig> {
    let mut builder = ScenarioConfig::builder().report(apply_report_overrides(
        ReportConfig::default(),
        args,
    ));
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    builder = match args.command {
        Command::Clt {
            revenue,
            sample_size,
            num_samples,
        } => builder.clt(CltParams::new(revenue, sample_size, num_samples)),
        Command::Poisson {
            rate,
            periods,
            time_unit,
        } => builder.poisson(PoissonParams::new(rate, periods, time_unit)),
        Command::Run { .. } | Command::Verify { .. } => builder,
    };
    builder.build()
}

/// Load a scenario file and apply command-line overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or an override is invalid.
pub fn load_scenario(path: &Path, args: &Args) -> DemoResult<ScenarioConfig> {
    let mut scenario = ScenarioConfig::load(path)?;
    if args.seed.is_some() {
        scenario.seed = args.seed;
    }
    scenario.report = apply_report_overrides(scenario.report, args);
    scenario.report.validate()?;
    Ok(scenario)
}

fn apply_report_overrides(mut report: ReportConfig, args: &Args) -> ReportConfig {
    if let Some(bins) = args.bins {
        report.bins = bins;
    }
    if let Some(width) = args.width {
        report.width = width;
    }
    if args.include_raw {
        report.include_raw = true;
    }
    report
}

/// Simulate once and write the report.
///
/// # Errors
///
/// Returns an error if the simulation, rendering or write fails.
pub fn run_scenario(
    scenario: &ScenarioConfig,
    json: bool,
    out: &mut dyn Write,
) -> DemoResult<DemoOutcome> {
    let mut rng = DemoRng::from_optional_seed(scenario.seed);
    let outcome = scenario.demo.simulate(&mut rng)?;
    write_outcome(out, &outcome, &scenario.report, json)?;
    Ok(outcome)
}

/// Result of re-running one seeded scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifySummary {
    /// Scenario name.
    pub name: String,
    /// Seed every run used.
    pub seed: u64,
    /// Number of runs performed.
    pub runs: usize,
    /// Whether every run matched the first.
    pub identical: bool,
    /// Indices of runs that differed from run 0.
    pub mismatched_runs: Vec<usize>,
}

/// Run a seeded scenario `runs` times and compare the full JSON output.
///
/// # Errors
///
/// Returns [`crate::DemoError::Config`] when the scenario has no seed or
/// `runs < 2`, and propagates simulation errors.
pub fn verify_scenario(scenario: &ScenarioConfig, runs: usize) -> DemoResult<VerifySummary> {
    let seed = scenario.require_seed()?;
    if runs < 2 {
        return Err(crate::DemoError::config(format!(
            "verification needs at least 2 runs, got {runs}"
        )));
    }

    let full = ReportConfig {
        include_raw: true,
        ..scenario.report
    };

    let mut reference: Option<String> = None;
    let mut mismatched_runs = Vec::new();
    for run in 0..runs {
        let mut rng = DemoRng::new(seed);
        let outcome = scenario.demo.simulate(&mut rng)?;
        let fingerprint = report::to_json(&outcome, &full)?;
        match &reference {
            None => reference = Some(fingerprint),
            Some(expected) if *expected != fingerprint => mismatched_runs.push(run),
            Some(_) => {}
        }
        tracing::debug!(run, "verification run complete");
    }

    Ok(VerifySummary {
        name: scenario.name.clone(),
        seed,
        runs,
        identical: mismatched_runs.is_empty(),
        mismatched_runs,
    })
}
