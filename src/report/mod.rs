//! Presentation of demo outcomes.
//!
//! Every report puts the observed view next to the theoretical one:
//! - CLT: skewed daily draws beside the bell-shaped N-day averages, plus an
//!   expected-vs-observed moment table
//! - Poisson: counts per period, then the PMF and empirical frequency for
//!   each `k` side by side
//!
//! Text output targets a terminal; [`to_json`] serves scripts.

pub mod histogram;

pub use histogram::{Bin, Histogram};

use std::fmt::Write as _;

use serde::Serialize;

use crate::aggregate::PoissonSummary;
use crate::config::ReportConfig;
use crate::demos::{CltOutcome, DemoOutcome, MomentComparison, PoissonOutcome};
use crate::error::DemoResult;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";
const BAR: char = '█';

/// Render either outcome as text.
///
/// # Errors
///
/// Returns an error if a histogram cannot be built.
pub fn render(outcome: &DemoOutcome, config: &ReportConfig) -> DemoResult<String> {
    match outcome {
        DemoOutcome::Clt(o) => render_clt(o, config),
        DemoOutcome::Poisson(o) => Ok(render_poisson(o, config)),
    }
}

/// Render a CLT outcome: two histograms and the moment table.
///
/// # Errors
///
/// Returns an error if a histogram cannot be built.
pub fn render_clt(outcome: &CltOutcome, config: &ReportConfig) -> DemoResult<String> {
    let p = &outcome.params;
    let n = p.sample_size;
    let mut out = String::new();

    header(&mut out, "Ad Revenue Simulation & The Central Limit Theorem");
    let _ = writeln!(out, "Seed:                  {}", seed_label(outcome.seed));
    let _ = writeln!(out, "Average daily revenue: ${:.2}", p.average_daily_revenue);
    let _ = writeln!(out, "Days in each sample:   {n}");
    let _ = writeln!(out, "Samples simulated:     {}", p.num_samples);
    out.push('\n');

    if !outcome.raw.is_empty() {
        let raw = Histogram::from_values(&outcome.raw, config.bins)?;
        section(&mut out, "Distribution of Daily Revenue (original, skewed)");
        histogram_chart(&mut out, &raw, config.width, "Daily Revenue ($)");
        out.push_str(
            "Not a bell curve: heavily right-skewed, with a long tail of rare high-earning days.\n\n",
        );
    }

    let means = Histogram::from_values(&outcome.sample_means, config.bins)?;
    section(&mut out, &format!("Averages of {n}-Day Samples"));
    histogram_chart(
        &mut out,
        &means,
        config.width,
        &format!("Average Revenue over {n} days ($)"),
    );
    let _ = writeln!(
        out,
        "A bell curve centred on the true average of ${:.2}.\n",
        p.average_daily_revenue
    );

    section(&mut out, "Expected vs Observed");
    let averages_label = format!("{n}-day average");
    moment_table(
        &mut out,
        &[
            ("Daily revenue", &outcome.stats.daily),
            (averages_label.as_str(), &outcome.stats.averages),
        ],
    );

    out.push('\n');
    section(&mut out, "Interpretation");
    let _ = writeln!(
        out,
        "Individual days are volatile, but {n}-day averages are stable: their spread\n\
         shrinks as 1/√N ({:.2} → {:.2}) and their shape is close to normal, so\n\
         forecasts and confidence intervals can rely on normal-theory bounds.\n\
         Raising the days per sample narrows the bell curve further.",
        outcome.stats.daily.expected_std_dev, outcome.stats.averages.expected_std_dev,
    );

    Ok(out)
}

/// Render a Poisson outcome: counts per period and the PMF comparison.
#[must_use]
pub fn render_poisson(outcome: &PoissonOutcome, config: &ReportConfig) -> String {
    let p = &outcome.params;
    let unit = p.time_unit;
    let s = &outcome.summary;
    let mut out = String::new();

    header(&mut out, "Ad Clicks & The Poisson Distribution");
    let _ = writeln!(out, "Seed:             {}", seed_label(outcome.seed));
    let _ = writeln!(out, "Clicks per {unit:<5} λ = {:.2}", p.lambda_rate);
    let _ = writeln!(out, "Periods:          {}", p.num_periods);
    out.push('\n');

    let counts = Histogram::from_frequency_table(&s.table);
    section(&mut out, &format!("Clicks per {unit} (observed)"));
    count_chart(&mut out, &counts, config.width, &format!("Clicks per {unit}"));
    out.push('\n');

    section(&mut out, "Theoretical PMF vs Observed Frequency");
    pmf_comparison(&mut out, s, config.width);
    out.push('\n');

    section(&mut out, "Expected vs Observed");
    let _ = writeln!(out, "  {:<10} {:>12} {:>12}", "", "expected", "observed");
    let _ = writeln!(
        out,
        "  {:<10} {:>12.4} {:>12.4}",
        "mean",
        outcome.expected(),
        s.mean
    );
    let _ = writeln!(
        out,
        "  {:<10} {:>12.4} {:>12.4}",
        "variance",
        outcome.expected(),
        s.variance
    );
    let _ = writeln!(
        out,
        "\n  Largest |PMF − frequency| gap: {:.4}",
        s.max_abs_deviation()
    );

    out
}

fn seed_label(seed: Option<u64>) -> String {
    seed.map_or_else(|| "n/a (shared source)".to_string(), |s| s.to_string())
}

fn header(out: &mut String, title: &str) {
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{RULE}\n");
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "─".repeat(title.chars().count()));
}

fn bar(count: usize, max: usize, width: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let len = (count * width + max / 2) / max;
    BAR.to_string().repeat(len)
}

fn histogram_chart(out: &mut String, hist: &Histogram, width: usize, x_label: &str) {
    let max = hist.max_count();
    let _ = writeln!(out, "  {x_label:>23} │ Frequency");
    for b in &hist.bins {
        let _ = writeln!(
            out,
            "  {:>10.2} – {:<10.2} │{} {}",
            b.lower,
            b.upper,
            bar(b.count, max, width),
            b.count
        );
    }
}

fn count_chart(out: &mut String, hist: &Histogram, width: usize, x_label: &str) {
    let max = hist.max_count();
    let _ = writeln!(out, "  {x_label:>16} │ Periods");
    for b in &hist.bins {
        let _ = writeln!(
            out,
            "  {:>16} │{} {}",
            b.lower as u64,
            bar(b.count, max, width),
            b.count
        );
    }
}

fn pmf_comparison(out: &mut String, s: &PoissonSummary, width: usize) {
    let half = (width / 2).max(1);
    let peak = s
        .table
        .iter()
        .map(|r| r.pmf.max(r.empirical))
        .fold(0.0, f64::max);
    let scale = |v: f64| -> String {
        if peak <= 0.0 {
            return String::new();
        }
        let len = (v / peak * half as f64).round() as usize;
        BAR.to_string().repeat(len)
    };

    let _ = writeln!(
        out,
        "  {:>4} │ {:>8} {:<w$} │ {:>8}",
        "k",
        "PMF",
        "",
        "observed",
        w = half
    );
    for row in &s.table {
        let _ = writeln!(
            out,
            "  {:>4} │ {:>8.4} {:<w$} │ {:>8.4} {}",
            row.k,
            row.pmf,
            scale(row.pmf),
            row.empirical,
            scale(row.empirical),
            w = half
        );
    }
    let _ = writeln!(
        out,
        "  {:>4} │ {:>8.4} {:<w$} │ {:>8.4}",
        "Σ",
        s.pmf_mass(),
        "",
        s.empirical_mass(),
        w = half
    );
}

fn moment_table(out: &mut String, rows: &[(&str, &MomentComparison)]) {
    let _ = writeln!(
        out,
        "  {:<16} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "", "mean", "(exp)", "std dev", "(exp)", "skew", "(exp)"
    );
    for (label, m) in rows {
        let _ = writeln!(
            out,
            "  {:<16} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.3} {:>10.3}",
            label,
            m.observed_mean,
            m.expected_mean,
            m.observed_std_dev,
            m.expected_std_dev,
            m.observed_skewness,
            m.expected_skewness
        );
    }
}

/// Named histogram inside a JSON export.
#[derive(Debug, Clone, Serialize)]
pub struct NamedHistogram {
    /// Chart title.
    pub name: String,
    /// Binned data.
    pub histogram: Histogram,
}

/// JSON document for one run.
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    /// Crate version that produced the report.
    pub version: &'static str,
    /// The outcome itself.
    pub outcome: DemoOutcome,
    /// Histograms matching the text charts.
    pub histograms: Vec<NamedHistogram>,
}

/// Build the JSON document for `outcome`.
///
/// Raw draws are kept only when `config.include_raw` is set.
///
/// # Errors
///
/// Returns an error if a histogram cannot be built.
pub fn json_report(outcome: &DemoOutcome, config: &ReportConfig) -> DemoResult<JsonReport> {
    let histograms = match outcome {
        DemoOutcome::Clt(o) => {
            let mut h = Vec::with_capacity(2);
            if !o.raw.is_empty() {
                h.push(NamedHistogram {
                    name: "daily_revenue".to_string(),
                    histogram: Histogram::from_values(&o.raw, config.bins)?,
                });
            }
            h.push(NamedHistogram {
                name: "sample_means".to_string(),
                histogram: Histogram::from_values(&o.sample_means, config.bins)?,
            });
            h
        }
        DemoOutcome::Poisson(o) => vec![NamedHistogram {
            name: "counts_per_period".to_string(),
            histogram: Histogram::from_frequency_table(&o.summary.table),
        }],
    };

    let outcome = if config.include_raw {
        outcome.clone()
    } else {
        outcome.clone().without_raw()
    };

    Ok(JsonReport {
        version: env!("CARGO_PKG_VERSION"),
        outcome,
        histograms,
    })
}

/// Serialize `outcome` as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if a histogram cannot be built or serialization fails.
pub fn to_json(outcome: &DemoOutcome, config: &ReportConfig) -> DemoResult<String> {
    let report = json_report(outcome, config)?;
    Ok(serde_json::to_string_pretty(&report)?)
}
