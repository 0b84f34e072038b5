//! The two statistics demos.
//!
//! Each demo is a validated parameter struct implementing [`Simulation`]:
//!
//! 1. **Check** - reject out-of-range parameters before drawing anything
//! 2. **Sample** - draw i.i.d. values from the injected [`DemoRng`]
//! 3. **Aggregate** - reduce the draws to what the report shows
//!
//! # Demos
//!
//! 1. [`clt`] - exponential daily revenue averaged over N-day samples
//! 2. [`poisson`] - event counts per period against the Poisson PMF

pub mod clt;
pub mod poisson;

pub use clt::{CltOutcome, CltParams, CltStats};
pub use poisson::{PoissonOutcome, PoissonParams, TimeUnit};

use serde::{Deserialize, Serialize};

use crate::engine::rng::DemoRng;
use crate::error::{DemoError, DemoResult};
use crate::stats;

/// Common interface for all demos.
///
/// `simulate` is free of any presentation concern: the same outcome feeds
/// the text report, the JSON export and the tests.
pub trait Simulation {
    /// Data one run produces.
    type Outcome: Serialize;

    /// Demo name for display.
    fn name(&self) -> &'static str;

    /// Validate parameters without consuming randomness.
    ///
    /// # Errors
    ///
    /// Returns an invalid-parameter error for any out-of-range field.
    fn check(&self) -> DemoResult<()>;

    /// Run one simulation pass.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid or aggregation fails.
    fn simulate(&self, rng: &mut DemoRng) -> DemoResult<Self::Outcome>;
}

/// Parameters for either demo, tagged by `kind` in scenario files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DemoParams {
    /// Central Limit Theorem demo.
    Clt(CltParams),
    /// Poisson distribution demo.
    Poisson(PoissonParams),
}

impl Default for DemoParams {
    fn default() -> Self {
        Self::Clt(CltParams::default())
    }
}

impl DemoParams {
    /// Demo name for display.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Clt(p) => p.name(),
            Self::Poisson(p) => p.name(),
        }
    }

    /// Validate the wrapped parameters.
    ///
    /// # Errors
    ///
    /// Returns an invalid-parameter error for any out-of-range field.
    pub fn check(&self) -> DemoResult<()> {
        match self {
            Self::Clt(p) => p.check(),
            Self::Poisson(p) => p.check(),
        }
    }

    /// Run the wrapped demo.
    ///
    /// # Errors
    ///
    /// Propagates the demo's own errors.
    pub fn simulate(&self, rng: &mut DemoRng) -> DemoResult<DemoOutcome> {
        match self {
            Self::Clt(p) => p.simulate(rng).map(DemoOutcome::Clt),
            Self::Poisson(p) => p.simulate(rng).map(DemoOutcome::Poisson),
        }
    }
}

/// Outcome of either demo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DemoOutcome {
    /// Central Limit Theorem outcome.
    Clt(CltOutcome),
    /// Poisson distribution outcome.
    Poisson(PoissonOutcome),
}

impl DemoOutcome {
    /// Seed that replays the run, if it started on a fresh source.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        match self {
            Self::Clt(o) => o.seed,
            Self::Poisson(o) => o.seed,
        }
    }

    /// Drop raw draws before export.
    #[must_use]
    pub fn without_raw(self) -> Self {
        match self {
            Self::Clt(o) => Self::Clt(o.without_raw()),
            Self::Poisson(o) => Self::Poisson(o.without_raw()),
        }
    }
}

/// Expected vs observed first three moments of one sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentComparison {
    /// Theoretical mean.
    pub expected_mean: f64,
    /// Observed mean.
    pub observed_mean: f64,
    /// Theoretical standard deviation.
    pub expected_std_dev: f64,
    /// Observed population standard deviation.
    pub observed_std_dev: f64,
    /// Theoretical skewness.
    pub expected_skewness: f64,
    /// Observed population skewness.
    pub observed_skewness: f64,
}

impl MomentComparison {
    /// Measure `data` against the given theoretical moments.
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::EmptySample`] if `data` is empty or non-finite.
    pub fn observe(
        data: &[f64],
        expected_mean: f64,
        expected_std_dev: f64,
        expected_skewness: f64,
    ) -> DemoResult<Self> {
        let missing = || DemoError::empty("moment comparison");
        Ok(Self {
            expected_mean,
            observed_mean: stats::mean(data).ok_or_else(missing)?,
            expected_std_dev,
            observed_std_dev: stats::population_std_dev(data).ok_or_else(missing)?,
            expected_skewness,
            observed_skewness: stats::skewness(data).ok_or_else(missing)?,
        })
    }

    /// Relative error of the observed mean.
    #[must_use]
    pub fn mean_relative_error(&self) -> f64 {
        relative_error(self.observed_mean, self.expected_mean)
    }

    /// Relative error of the observed standard deviation.
    #[must_use]
    pub fn std_dev_relative_error(&self) -> f64 {
        relative_error(self.observed_std_dev, self.expected_std_dev)
    }
}

fn relative_error(observed: f64, expected: f64) -> f64 {
    if expected.abs() < f64::EPSILON {
        observed.abs()
    } else {
        (observed - expected).abs() / expected.abs()
    }
}

/// Reject NaN and infinities, which range validation lets through.
pub(crate) fn ensure_finite(name: &str, value: f64) -> DemoResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DemoError::invalid_parameter(name, value, "must be finite"))
    }
}
