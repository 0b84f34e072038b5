//! CLI output formatting.

use std::io::Write;

use super::commands::VerifySummary;
use crate::config::ReportConfig;
use crate::demos::DemoOutcome;
use crate::error::DemoResult;
use crate::report;

/// Write one outcome as text or JSON.
///
/// # Errors
///
/// Returns an error if rendering or writing fails.
pub fn write_outcome(
    out: &mut dyn Write,
    outcome: &DemoOutcome,
    config: &ReportConfig,
    json: bool,
) -> DemoResult<()> {
    if json {
        writeln!(out, "{}", report::to_json(outcome, config)?)?;
    } else {
        write!(out, "{}", report::render(outcome, config)?)?;
        if let Some(seed) = outcome.seed() {
            writeln!(out, "\nRe-run with --seed {seed} to reproduce these results.")?;
        }
    }
    Ok(())
}

/// Write a reproducibility summary.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_verification(
    out: &mut dyn Write,
    summary: &VerifySummary,
    json: bool,
) -> DemoResult<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(summary)?)?;
        return Ok(());
    }

    let (sym, status) = if summary.identical {
        ("✓", "PASSED")
    } else {
        ("✗", "FAILED")
    };

    writeln!(out, "Reproducibility Check")?;
    if !summary.name.is_empty() {
        writeln!(out, "  Scenario:  {}", summary.name)?;
    }
    writeln!(out, "  Seed:      {}", summary.seed)?;
    writeln!(out, "  Runs:      {}", summary.runs)?;
    writeln!(out, "  Identical: {}", summary.identical)?;
    if !summary.mismatched_runs.is_empty() {
        let runs: Vec<String> = summary
            .mismatched_runs
            .iter()
            .map(ToString::to_string)
            .collect();
        writeln!(out, "  Differing runs: {}", runs.join(", "))?;
    }
    writeln!(out, "\n{sym} Result: {status}")?;
    Ok(())
}
