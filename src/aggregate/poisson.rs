//! Empirical summary of Poisson count draws.
//!
//! # Governing Equations
//!
//! ```text
//! PMF:        P(K = k) = e^{-λ} λ^k / k!
//! Recurrence: P(0) = e^{-λ},  P(k) = P(k-1) · λ / k
//! Moments:    E[K] = Var[K] = λ
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{DemoError, DemoResult};

/// One row of the frequency table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyRow {
    /// Count value.
    pub k: u64,
    /// Number of periods that observed exactly `k` events.
    pub observed: u64,
    /// Theoretical probability mass at `k`.
    pub pmf: f64,
    /// Relative frequency `observed / n`.
    pub empirical: f64,
}

/// Empirical moments plus the PMF comparison table over `0..=max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoissonSummary {
    /// Rate the draws were generated with.
    pub rate: f64,
    /// Number of periods summarized.
    pub n: usize,
    /// Arithmetic mean of the counts.
    pub mean: f64,
    /// Population variance of the counts (divide by `n`).
    pub variance: f64,
    /// Largest observed count.
    pub max: u64,
    /// One row per `k` in `0..=max`.
    pub table: Vec<FrequencyRow>,
}

impl PoissonSummary {
    /// Sum of the theoretical PMF over the table's range.
    #[must_use]
    pub fn pmf_mass(&self) -> f64 {
        self.table.iter().map(|r| r.pmf).sum()
    }

    /// Sum of the empirical frequencies.
    #[must_use]
    pub fn empirical_mass(&self) -> f64 {
        self.table.iter().map(|r| r.empirical).sum()
    }

    /// Largest absolute gap between PMF and empirical frequency.
    #[must_use]
    pub fn max_abs_deviation(&self) -> f64 {
        self.table
            .iter()
            .map(|r| (r.pmf - r.empirical).abs())
            .fold(0.0, f64::max)
    }
}

/// Largest count a table for `rate` may cover: fifty standard deviations
/// above the mean, plus 1000.
#[must_use]
pub fn max_table_count(rate: f64) -> u64 {
    (rate + 50.0 * rate.sqrt()).ceil() as u64 + 1000
}

/// Validate `rate` and `max_k`, returning the table length `max_k + 1`.
fn table_len(rate: f64, max_k: u64) -> DemoResult<usize> {
    if !(rate.is_finite() && rate > 0.0) {
        return Err(DemoError::invalid_parameter(
            "rate",
            rate,
            "must be a finite positive number",
        ));
    }
    let cap = max_table_count(rate);
    if max_k > cap {
        return Err(DemoError::invalid_parameter(
            "count",
            max_k,
            format!("exceeds the largest plausible count {cap} for rate {rate}"),
        ));
    }
    usize::try_from(max_k)
        .ok()
        .and_then(|k| k.checked_add(1))
        .ok_or_else(|| DemoError::invalid_parameter("count", max_k, "table length overflows"))
}

/// Poisson probability mass for every `k` in `0..=max_k`.
///
/// # Errors
///
/// Returns [`DemoError::InvalidParameter`] when `rate` is not a finite
/// positive number or `max_k` exceeds [`max_table_count`].
pub fn pmf_table(rate: f64, max_k: u64) -> DemoResult<Vec<f64>> {
    let len = table_len(rate, max_k)?;
    let mut out = Vec::with_capacity(len);
    let mut p = (-rate).exp();
    out.push(p);
    for k in 1..=max_k {
        p *= rate / k as f64;
        out.push(p);
    }
    Ok(out)
}

/// Summarize raw Poisson counts against the rate they were drawn with.
///
/// # Errors
///
/// - [`DemoError::EmptySample`] if `raw` is empty.
/// - [`DemoError::InvalidParameter`] if `rate` is not a finite positive number
///   or a count exceeds [`max_table_count`].
pub fn summarize_counts(raw: &[u64], rate: f64) -> DemoResult<PoissonSummary> {
    let Some(&max) = raw.iter().max() else {
        return Err(DemoError::empty("Poisson summary"));
    };
    let pmf = pmf_table(rate, max)?;

    let n = raw.len();
    let nf = n as f64;

    let mut counts = vec![0u64; pmf.len()];
    for &k in raw {
        counts[k as usize] += 1;
    }

    let mean = raw.iter().map(|&k| k as f64).sum::<f64>() / nf;
    let variance = raw
        .iter()
        .map(|&k| (k as f64 - mean).powi(2))
        .sum::<f64>()
        / nf;

    let table = counts
        .iter()
        .zip(pmf)
        .enumerate()
        .map(|(k, (&observed, pmf))| FrequencyRow {
            k: k as u64,
            observed,
            pmf,
            empirical: observed as f64 / nf,
        })
        .collect();

    tracing::debug!(n, max, mean, variance, "summarized Poisson counts");

    Ok(PoissonSummary {
        rate,
        n,
        mean,
        variance,
        max,
        table,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pmf_known_values() {
        let pmf = pmf_table(2.0, 3).unwrap();
        let e = (-2.0f64).exp();
        assert!((pmf[0] - e).abs() < 1e-15);
        assert!((pmf[1] - 2.0 * e).abs() < 1e-15);
        assert!((pmf[2] - 2.0 * e).abs() < 1e-15);
        assert!((pmf[3] - 4.0 / 3.0 * e).abs() < 1e-15);
    }

    #[test]
    fn test_pmf_large_k_no_overflow() {
        // 200! overflows f64; the recurrence never forms it
        let pmf = pmf_table(50.0, 200).unwrap();
        assert!(pmf.iter().all(|p| p.is_finite() && *p >= 0.0));
        let mass: f64 = pmf.iter().sum();
        assert!((mass - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pmf_rejects_bad_rate() {
        assert!(pmf_table(0.0, 3).unwrap_err().is_invalid_parameter());
        assert!(pmf_table(f64::NAN, 3).unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn test_pmf_rejects_oversized_table() {
        assert!(pmf_table(5.0, u64::MAX).unwrap_err().is_invalid_parameter());
        let cap = max_table_count(5.0);
        assert!(pmf_table(5.0, cap + 1).is_err());
        assert_eq!(pmf_table(5.0, cap).unwrap().len() as u64, cap + 1);
    }

    #[test]
    fn test_rejects_implausible_counts() {
        let err = summarize_counts(&[u64::MAX], 5.0).unwrap_err();
        assert!(err.is_invalid_parameter());
        assert!(err.to_string().contains("largest plausible count"));

        let over = max_table_count(50.0) + 1;
        assert!(summarize_counts(&[3, over], 50.0)
            .unwrap_err()
            .is_invalid_parameter());
    }

    #[test]
    fn test_cap_covers_every_simulated_rate() {
        // 100 standard deviations above the mean at the top of the rate range
        assert!(max_table_count(50.0) > 50 + 100 * 8);
        assert!(max_table_count(0.1) >= 1000);
    }

    #[test]
    fn test_summary_small_example() {
        let raw = [0, 1, 1, 3];
        let s = summarize_counts(&raw, 1.0).unwrap();
        assert_eq!(s.n, 4);
        assert_eq!(s.max, 3);
        assert!((s.mean - 1.25).abs() < 1e-12);
        // deviations: -1.25, -0.25, -0.25, 1.75 -> squares sum 4.75
        assert!((s.variance - 4.75 / 4.0).abs() < 1e-12);

        assert_eq!(s.table.len(), 4);
        let observed: Vec<u64> = s.table.iter().map(|r| r.observed).collect();
        assert_eq!(observed, vec![1, 2, 0, 1]);
        assert!((s.table[1].empirical - 0.5).abs() < 1e-12);
        assert_eq!(s.table[2].empirical, 0.0);
    }

    #[test]
    fn test_table_covers_zero_to_max() {
        let raw = [4, 4, 4];
        let s = summarize_counts(&raw, 4.0).unwrap();
        let ks: Vec<u64> = s.table.iter().map(|r| r.k).collect();
        assert_eq!(ks, vec![0, 1, 2, 3, 4]);
        assert_eq!(s.variance, 0.0);
    }

    #[test]
    fn test_all_zero_counts() {
        let s = summarize_counts(&[0, 0, 0], 0.5).unwrap();
        assert_eq!(s.max, 0);
        assert_eq!(s.table.len(), 1);
        assert_eq!(s.table[0].empirical, 1.0);
    }

    #[test]
    fn test_masses() {
        let raw = [0, 2, 5, 5, 1, 3, 2, 2];
        let s = summarize_counts(&raw, 2.5).unwrap();
        assert!((s.empirical_mass() - 1.0).abs() < 1e-12);
        let pmf_mass = s.pmf_mass();
        assert!(pmf_mass > 0.0 && pmf_mass <= 1.0);
        assert!(s.max_abs_deviation() >= 0.0);
    }

    #[test]
    fn test_rejects_empty() {
        let err = summarize_counts(&[], 5.0).unwrap_err();
        assert!(matches!(err, DemoError::EmptySample(_)));
    }

    #[test]
    fn test_rejects_bad_rate() {
        assert!(summarize_counts(&[1, 2], -1.0)
            .unwrap_err()
            .is_invalid_parameter());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_frequency_invariants(
            raw in prop::collection::vec(0u64..40, 1..300),
            rate in 0.1f64..50.0,
        ) {
            let s = summarize_counts(&raw, rate).unwrap();
            prop_assert_eq!(s.table.len() as u64, s.max + 1);
            prop_assert!((s.empirical_mass() - 1.0).abs() < 1e-9);
            prop_assert!(s.pmf_mass() <= 1.0 + 1e-12);
            prop_assert!(s.table.iter().all(|r| r.pmf >= 0.0 && r.empirical >= 0.0));
            let total: u64 = s.table.iter().map(|r| r.observed).sum();
            prop_assert_eq!(total as usize, raw.len());
        }
    }
}
