//! I.i.d. draws from the demo distributions.
//!
//! Both demos consume entropy only through the [`DemoRng`] handle passed in,
//! so a seeded handle makes every draw reproducible.

use rand::Rng;
use rand_distr::{Exp, Poisson};
use serde::{Deserialize, Serialize};

use crate::engine::rng::DemoRng;
use crate::error::{DemoError, DemoResult};

/// Distribution tag with its single parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "lowercase")]
pub enum SampleDistribution {
    /// Exponential with the given scale (population mean).
    Exponential {
        /// Scale `β`; mean `β`, variance `β²`.
        scale: f64,
    },
    /// Poisson with the given rate.
    Poisson {
        /// Rate `λ`; mean and variance `λ`.
        rate: f64,
    },
}

impl SampleDistribution {
    /// Population mean.
    #[must_use]
    pub fn mean(&self) -> f64 {
        match *self {
            Self::Exponential { scale } => scale,
            Self::Poisson { rate } => rate,
        }
    }

    /// Population variance.
    #[must_use]
    pub fn variance(&self) -> f64 {
        match *self {
            Self::Exponential { scale } => scale * scale,
            Self::Poisson { rate } => rate,
        }
    }

    /// Population skewness.
    #[must_use]
    pub fn skewness(&self) -> f64 {
        match *self {
            Self::Exponential { .. } => 2.0,
            Self::Poisson { rate } => 1.0 / rate.sqrt(),
        }
    }

    /// Draw `n` values from this distribution.
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::InvalidParameter`] for a non-positive parameter
    /// or `n == 0`.
    pub fn draw(&self, rng: &mut DemoRng, n: usize) -> DemoResult<Draws> {
        match *self {
            Self::Exponential { scale } => sample_exponential(rng, scale, n).map(Draws::Real),
            Self::Poisson { rate } => sample_poisson(rng, rate, n).map(Draws::Counts),
        }
    }
}

/// Output of [`SampleDistribution::draw`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Draws {
    /// Real-valued draws.
    Real(Vec<f64>),
    /// Integer count draws.
    Counts(Vec<u64>),
}

impl Draws {
    /// Number of draws.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Real(v) => v.len(),
            Self::Counts(v) => v.len(),
        }
    }

    /// Whether no draws are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn check_positive(name: &str, value: f64) -> DemoResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DemoError::invalid_parameter(
            name,
            value,
            "must be a finite positive number",
        ))
    }
}

fn check_count(n: usize) -> DemoResult<()> {
    if n == 0 {
        return Err(DemoError::invalid_parameter("n", n, "must be at least 1"));
    }
    Ok(())
}

/// Draw `n` exponential values with mean `scale`.
///
/// # Errors
///
/// Returns [`DemoError::InvalidParameter`] when `scale` is not a finite
/// positive number or `n == 0`.
pub fn sample_exponential(rng: &mut DemoRng, scale: f64, n: usize) -> DemoResult<Vec<f64>> {
    check_positive("scale", scale)?;
    check_count(n)?;
    let dist = Exp::new(1.0 / scale)
        .map_err(|e| DemoError::invalid_parameter("scale", scale, e.to_string()))?;
    Ok(rng.sample_iter(dist).take(n).collect())
}

/// Draw `n` Poisson counts with rate `rate`.
///
/// # Errors
///
/// Returns [`DemoError::InvalidParameter`] when `rate` is not a finite
/// positive number or `n == 0`.
pub fn sample_poisson(rng: &mut DemoRng, rate: f64, n: usize) -> DemoResult<Vec<u64>> {
    check_positive("rate", rate)?;
    check_count(n)?;
    let dist = Poisson::new(rate)
        .map_err(|e| DemoError::invalid_parameter("rate", rate, e.to_string()))?;
    // rand_distr yields whole-valued f64 draws
    Ok(rng
        .sample_iter(dist)
        .take(n)
        .map(|k: f64| k as u64)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats;

    #[test]
    fn test_exponential_length_and_sign() {
        let mut rng = DemoRng::new(42);
        let v = sample_exponential(&mut rng, 150.0, 5000).unwrap();
        assert_eq!(v.len(), 5000);
        assert!(v.iter().all(|&x| x >= 0.0 && x.is_finite()));
    }

    #[test]
    fn test_exponential_moments() {
        let mut rng = DemoRng::new(42);
        let v = sample_exponential(&mut rng, 150.0, 50_000).unwrap();
        let m = stats::mean(&v).unwrap();
        let var = stats::population_variance(&v).unwrap();
        assert!((m - 150.0).abs() / 150.0 < 0.03, "mean {m}");
        assert!((var - 22_500.0).abs() / 22_500.0 < 0.08, "variance {var}");
    }

    #[test]
    fn test_exponential_rejects_bad_scale() {
        let mut rng = DemoRng::new(1);
        for scale in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = sample_exponential(&mut rng, scale, 10).unwrap_err();
            assert!(err.is_invalid_parameter(), "scale {scale} accepted");
        }
    }

    #[test]
    fn test_rejects_zero_count() {
        let mut rng = DemoRng::new(1);
        assert!(sample_exponential(&mut rng, 1.0, 0)
            .unwrap_err()
            .is_invalid_parameter());
        assert!(sample_poisson(&mut rng, 1.0, 0)
            .unwrap_err()
            .is_invalid_parameter());
    }

    #[test]
    fn test_poisson_length_and_moments() {
        let mut rng = DemoRng::new(7);
        let v = sample_poisson(&mut rng, 5.0, 20_000).unwrap();
        assert_eq!(v.len(), 20_000);
        let as_f64: Vec<f64> = v.iter().map(|&k| k as f64).collect();
        let m = stats::mean(&as_f64).unwrap();
        let var = stats::population_variance(&as_f64).unwrap();
        assert!((m - 5.0).abs() < 0.1, "mean {m}");
        assert!((var - 5.0).abs() < 0.3, "variance {var}");
    }

    #[test]
    fn test_poisson_small_rate_mostly_zero() {
        let mut rng = DemoRng::new(3);
        let v = sample_poisson(&mut rng, 0.1, 1000).unwrap();
        let zeros = v.iter().filter(|&&k| k == 0).count();
        // P(0) = e^{-0.1} ≈ 0.905
        assert!(zeros > 850, "only {zeros} zeros");
    }

    #[test]
    fn test_poisson_rejects_bad_rate() {
        let mut rng = DemoRng::new(1);
        for rate in [0.0, -1.0, f64::NAN] {
            assert!(sample_poisson(&mut rng, rate, 10)
                .unwrap_err()
                .is_invalid_parameter());
        }
    }

    #[test]
    fn test_distribution_moments() {
        let exp = SampleDistribution::Exponential { scale: 150.0 };
        assert_eq!(exp.mean(), 150.0);
        assert_eq!(exp.variance(), 22_500.0);
        assert_eq!(exp.skewness(), 2.0);

        let poi = SampleDistribution::Poisson { rate: 4.0 };
        assert_eq!(poi.mean(), 4.0);
        assert_eq!(poi.variance(), 4.0);
        assert!((poi.skewness() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_draw_dispatch() {
        let mut rng = DemoRng::new(9);
        let real = SampleDistribution::Exponential { scale: 2.0 }
            .draw(&mut rng, 12)
            .unwrap();
        assert!(matches!(real, Draws::Real(ref v) if v.len() == 12));

        let counts = SampleDistribution::Poisson { rate: 2.0 }
            .draw(&mut rng, 8)
            .unwrap();
        assert!(matches!(counts, Draws::Counts(_)));
        assert_eq!(counts.len(), 8);
        assert!(!counts.is_empty());
    }

    #[test]
    fn test_same_seed_same_draws() {
        let a = sample_exponential(&mut DemoRng::new(42), 10.0, 100).unwrap();
        let b = sample_exponential(&mut DemoRng::new(42), 10.0, 100).unwrap();
        assert_eq!(a, b);
    }
}
