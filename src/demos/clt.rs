//! Central Limit Theorem demo: ad revenue averaged over N-day samples.
//!
//! # Governing Equations
//!
//! ```text
//! Daily revenue:   X ~ Exp(β),  E[X] = β,  SD[X] = β,  skew[X] = 2
//! N-day average:   X̄_N → N(β, β²/N)
//! Spread:          SD[X̄_N] = β / √N
//! Skewness:        skew[X̄_N] = 2 / √N
//! ```
//!
//! Daily revenue is right-skewed: most days are ordinary, a few go viral.
//! Averaging `sample_size` days at a time and repeating `num_samples` times
//! yields a bell curve centred on the configured mean.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{ensure_finite, MomentComparison, Simulation};
use crate::aggregate::block_means;
use crate::engine::rng::DemoRng;
use crate::error::{DemoError, DemoResult};
use crate::sampler::{sample_exponential, SampleDistribution};
use crate::stats;

/// Parameters for one CLT run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CltParams {
    /// Mean daily revenue in dollars (exponential scale).
    #[validate(range(min = 10.0, max = 1000.0))]
    #[serde(default = "default_revenue")]
    pub average_daily_revenue: f64,

    /// Days averaged per sample.
    #[validate(range(min = 1, max = 100))]
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,

    /// Number of sample averages to compute.
    #[validate(range(min = 100, max = 10_000))]
    #[serde(default = "default_num_samples")]
    pub num_samples: usize,
}

fn default_revenue() -> f64 {
    150.0
}

fn default_sample_size() -> usize {
    30
}

fn default_num_samples() -> usize {
    2000
}

impl Default for CltParams {
    fn default() -> Self {
        Self {
            average_daily_revenue: default_revenue(),
            sample_size: default_sample_size(),
            num_samples: default_num_samples(),
        }
    }
}

impl CltParams {
    /// Create parameters without validating them; see [`Simulation::check`].
    #[must_use]
    pub const fn new(average_daily_revenue: f64, sample_size: usize, num_samples: usize) -> Self {
        Self {
            average_daily_revenue,
            sample_size,
            num_samples,
        }
    }

    /// Total number of daily draws one run needs.
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::InvalidParameter`] if the product overflows.
    pub fn total_days(&self) -> DemoResult<usize> {
        self.num_samples
            .checked_mul(self.sample_size)
            .ok_or_else(|| {
                DemoError::invalid_parameter(
                    "num_samples",
                    self.num_samples,
                    format!("times sample_size {} overflows", self.sample_size),
                )
            })
    }

    /// Distribution the daily revenue is drawn from.
    #[must_use]
    pub const fn distribution(&self) -> SampleDistribution {
        SampleDistribution::Exponential {
            scale: self.average_daily_revenue,
        }
    }
}

/// Expected vs observed moments for both views of one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CltStats {
    /// Daily revenue draws.
    pub daily: MomentComparison,
    /// N-day sample averages.
    pub averages: MomentComparison,
}

/// Everything one CLT run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CltOutcome {
    /// Parameters the run used.
    pub params: CltParams,
    /// Seed that replays this run, `None` when the source was already advanced.
    pub seed: Option<u64>,
    /// Daily revenue draws, `num_samples × sample_size` long.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub raw: Vec<f64>,
    /// Mean of each `sample_size` block, `num_samples` long.
    pub sample_means: Vec<f64>,
    /// Moment comparison.
    pub stats: CltStats,
}

impl CltOutcome {
    /// Drop the raw draws, keeping only what the summary needs.
    #[must_use]
    pub fn without_raw(mut self) -> Self {
        self.raw = Vec::new();
        self
    }
}

impl Simulation for CltParams {
    type Outcome = CltOutcome;

    fn name(&self) -> &'static str {
        "Central Limit Theorem"
    }

    fn check(&self) -> DemoResult<()> {
        ensure_finite("average_daily_revenue", self.average_daily_revenue)?;
        self.validate()?;
        Ok(())
    }

    fn simulate(&self, rng: &mut DemoRng) -> DemoResult<CltOutcome> {
        self.check()?;
        let total = self.total_days()?;
        let seed = rng.replay_seed();

        tracing::info!(
            revenue = self.average_daily_revenue,
            sample_size = self.sample_size,
            num_samples = self.num_samples,
            seed = ?seed,
            "running CLT simulation"
        );

        let raw = sample_exponential(rng, self.average_daily_revenue, total)?;
        let sample_means = block_means(&raw, self.num_samples, self.sample_size)?;

        let dist = self.distribution();
        let root_n = (self.sample_size as f64).sqrt();
        let daily = MomentComparison::observe(
            &raw,
            dist.mean(),
            dist.variance().sqrt(),
            dist.skewness(),
        )?;
        let averages = MomentComparison::observe(
            &sample_means,
            dist.mean(),
            dist.variance().sqrt() / root_n,
            dist.skewness() / root_n,
        )?;

        tracing::debug!(
            observed_mean = averages.observed_mean,
            observed_sd = averages.observed_std_dev,
            expected_sd = averages.expected_std_dev,
            "CLT aggregation complete"
        );

        Ok(CltOutcome {
            params: *self,
            seed,
            raw,
            sample_means,
            stats: CltStats { daily, averages },
        })
    }
}

/// Standard deviation of the block means for one set of raw draws.
///
/// # Errors
///
/// Propagates [`block_means`] errors.
pub fn std_dev_of_means(raw: &[f64], num_samples: usize, sample_size: usize) -> DemoResult<f64> {
    let means = block_means(raw, num_samples, sample_size)?;
    stats::population_std_dev(&means).ok_or_else(|| DemoError::empty("sample means"))
}
