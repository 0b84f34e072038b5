//! Equal-width histogram binning.

use serde::{Deserialize, Serialize};

use crate::aggregate::FrequencyRow;
use crate::error::{DemoError, DemoResult};
use crate::stats;

/// One half-open bin `[lower, upper)`; the last bin also holds `upper`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    /// Inclusive lower edge.
    pub lower: f64,
    /// Upper edge.
    pub upper: f64,
    /// Values that fell in this bin.
    pub count: usize,
}

/// Binned view of one sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Bins in ascending order.
    pub bins: Vec<Bin>,
    /// Number of values binned.
    pub total: usize,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width bins spanning the observed range.
    ///
    /// A constant sequence yields one zero-width bin holding every value.
    ///
    /// # Errors
    ///
    /// - [`DemoError::InvalidParameter`] if `bins == 0` or a value is non-finite.
    /// - [`DemoError::EmptySample`] if `values` is empty.
    pub fn from_values(values: &[f64], bins: usize) -> DemoResult<Self> {
        if bins == 0 {
            return Err(DemoError::invalid_parameter("bins", bins, "must be at least 1"));
        }
        if values.is_empty() {
            return Err(DemoError::empty("histogram"));
        }
        let (Some(lo), Some(hi)) = (stats::min(values), stats::max(values)) else {
            return Err(DemoError::invalid_parameter(
                "values",
                "non-finite",
                "histograms need finite values",
            ));
        };

        if hi <= lo {
            return Ok(Self {
                bins: vec![Bin {
                    lower: lo,
                    upper: hi,
                    count: values.len(),
                }],
                total: values.len(),
            });
        }

        let width = (hi - lo) / bins as f64;
        let mut out: Vec<Bin> = (0..bins)
            .map(|i| Bin {
                lower: lo + width * i as f64,
                upper: if i + 1 == bins {
                    hi
                } else {
                    lo + width * (i + 1) as f64
                },
                count: 0,
            })
            .collect();

        for &x in values {
            let idx = (((x - lo) / width) as usize).min(bins - 1);
            out[idx].count += 1;
        }

        Ok(Self {
            bins: out,
            total: values.len(),
        })
    }

    /// One unit-wide bin per count value, taken from a frequency table.
    #[must_use]
    pub fn from_frequency_table(table: &[FrequencyRow]) -> Self {
        let bins: Vec<Bin> = table
            .iter()
            .map(|row| Bin {
                lower: row.k as f64,
                upper: row.k as f64 + 1.0,
                count: row.observed as usize,
            })
            .collect();
        let total = bins.iter().map(|b| b.count).sum();
        Self { bins, total }
    }

    /// Largest bin count.
    #[must_use]
    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }

    /// Bin holding the most values (first on ties).
    #[must_use]
    pub fn mode_bin(&self) -> Option<&Bin> {
        let max = self.max_count();
        self.bins.iter().find(|b| b.count == max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_sum_to_total() {
        let values: Vec<f64> = (0..1000).map(|i| f64::from(i).sqrt()).collect();
        let h = Histogram::from_values(&values, 30).unwrap();
        assert_eq!(h.bins.len(), 30);
        assert_eq!(h.total, 1000);
        assert_eq!(h.bins.iter().map(|b| b.count).sum::<usize>(), 1000);
    }

    #[test]
    fn test_max_value_lands_in_last_bin() {
        let h = Histogram::from_values(&[0.0, 1.0, 2.0, 3.0, 4.0], 4).unwrap();
        assert_eq!(h.bins[3].count, 2);
        assert_eq!(h.bins[3].upper, 4.0);
        assert_eq!(h.bins[0].lower, 0.0);
    }

    #[test]
    fn test_edges_are_contiguous() {
        let h = Histogram::from_values(&[1.0, 5.0, 9.0, 13.0], 3).unwrap();
        for pair in h.bins.windows(2) {
            assert!((pair[0].upper - pair[1].lower).abs() < 1e-12);
        }
    }

    #[test]
    fn test_constant_values_single_bin() {
        let h = Histogram::from_values(&[7.0; 12], 10).unwrap();
        assert_eq!(h.bins.len(), 1);
        assert_eq!(h.bins[0].count, 12);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(Histogram::from_values(&[1.0], 0)
            .unwrap_err()
            .is_invalid_parameter());
        assert!(matches!(
            Histogram::from_values(&[], 5),
            Err(DemoError::EmptySample(_))
        ));
        assert!(Histogram::from_values(&[1.0, f64::NAN], 5)
            .unwrap_err()
            .is_invalid_parameter());
    }

    #[test]
    fn test_from_frequency_table() {
        let table = [
            FrequencyRow {
                k: 0,
                observed: 3,
                pmf: 0.3,
                empirical: 0.3,
            },
            FrequencyRow {
                k: 1,
                observed: 7,
                pmf: 0.4,
                empirical: 0.7,
            },
        ];
        let h = Histogram::from_frequency_table(&table);
        assert_eq!(h.total, 10);
        assert_eq!(h.max_count(), 7);
        assert_eq!(h.mode_bin().map(|b| b.lower), Some(1.0));
    }

    #[test]
    fn test_mode_bin_empty() {
        let h = Histogram::from_frequency_table(&[]);
        assert!(h.mode_bin().is_none());
        assert_eq!(h.max_count(), 0);
    }
}
