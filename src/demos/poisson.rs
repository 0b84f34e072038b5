//! Poisson demo: ad clicks counted per time period.
//!
//! # Governing Equations
//!
//! ```text
//! Clicks per period:  K ~ Poisson(λ)
//! PMF:                P(K = k) = e^{-λ} λ^k / k!
//! Moments:            E[K] = Var[K] = λ
//! ```
//!
//! The time unit only labels the output; it never changes the rate.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{ensure_finite, Simulation};
use crate::aggregate::{summarize_counts, PoissonSummary};
use crate::engine::rng::DemoRng;
use crate::error::DemoResult;
use crate::sampler::{sample_poisson, SampleDistribution};

/// Period length the rate refers to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// One hour.
    Hour,
    /// One day.
    #[default]
    Day,
    /// One week.
    Week,
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Hour => "Hour",
            Self::Day => "Day",
            Self::Week => "Week",
        };
        f.pad(label)
    }
}

/// Parameters for one Poisson run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct PoissonParams {
    /// Average clicks per period.
    #[validate(range(min = 0.1, max = 50.0))]
    #[serde(default = "default_rate")]
    pub lambda_rate: f64,

    /// Number of periods simulated.
    #[validate(range(min = 100, max = 5000))]
    #[serde(default = "default_num_periods")]
    pub num_periods: usize,

    /// Display label for one period.
    #[serde(default)]
    pub time_unit: TimeUnit,
}

fn default_rate() -> f64 {
    5.0
}

fn default_num_periods() -> usize {
    1000
}

impl Default for PoissonParams {
    fn default() -> Self {
        Self {
            lambda_rate: default_rate(),
            num_periods: default_num_periods(),
            time_unit: TimeUnit::default(),
        }
    }
}

impl PoissonParams {
    /// Create parameters without validating them; see [`Simulation::check`].
    #[must_use]
    pub const fn new(lambda_rate: f64, num_periods: usize, time_unit: TimeUnit) -> Self {
        Self {
            lambda_rate,
            num_periods,
            time_unit,
        }
    }

    /// Distribution the counts are drawn from.
    #[must_use]
    pub const fn distribution(&self) -> SampleDistribution {
        SampleDistribution::Poisson {
            rate: self.lambda_rate,
        }
    }
}

/// Everything one Poisson run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoissonOutcome {
    /// Parameters the run used.
    pub params: PoissonParams,
    /// Seed that replays this run, `None` when the source was already advanced.
    pub seed: Option<u64>,
    /// Clicks per period, `num_periods` long.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub raw: Vec<u64>,
    /// Moments and the PMF-vs-frequency table.
    pub summary: PoissonSummary,
}

impl PoissonOutcome {
    /// Drop the raw draws, keeping only what the summary needs.
    #[must_use]
    pub fn without_raw(mut self) -> Self {
        self.raw = Vec::new();
        self
    }

    /// Expected mean and variance, both `λ`.
    #[must_use]
    pub const fn expected(&self) -> f64 {
        self.params.lambda_rate
    }
}

impl Simulation for PoissonParams {
    type Outcome = PoissonOutcome;

    fn name(&self) -> &'static str {
        "Poisson Distribution"
    }

    fn check(&self) -> DemoResult<()> {
        ensure_finite("lambda_rate", self.lambda_rate)?;
        self.validate()?;
        Ok(())
    }

    fn simulate(&self, rng: &mut DemoRng) -> DemoResult<PoissonOutcome> {
        self.check()?;
        let seed = rng.replay_seed();

        tracing::info!(
            rate = self.lambda_rate,
            periods = self.num_periods,
            unit = %self.time_unit,
            seed = ?seed,
            "running Poisson simulation"
        );

        let raw = sample_poisson(rng, self.lambda_rate, self.num_periods)?;
        let summary = summarize_counts(&raw, self.lambda_rate)?;

        Ok(PoissonOutcome {
            params: *self,
            seed,
            raw,
            summary,
        })
    }
}
