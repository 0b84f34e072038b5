//! Block-mean reduction for the Central Limit Theorem demo.
//!
//! ```text
//! raw:   [x0 .. x(s-1)] [xs .. x(2s-1)] ... [x((m-1)s) .. x(ms-1)]
//! means:      X̄0             X̄1       ...          X̄(m-1)
//! ```
//!
//! As `s` grows the means approach `N(μ, σ²/s)` whatever the shape of the
//! raw distribution.

use crate::error::{DemoError, DemoResult};
use crate::stats;

/// Mean of each consecutive block of `sample_size` raw values.
///
/// Block `i` covers indices `[i·sample_size, (i+1)·sample_size)`.
///
/// # Errors
///
/// - [`DemoError::InvalidParameter`] if either size is zero.
/// - [`DemoError::ShapeMismatch`] if `raw.len() != num_samples × sample_size`.
/// - [`DemoError::InvalidParameter`] if a block contains a non-finite value.
pub fn block_means(raw: &[f64], num_samples: usize, sample_size: usize) -> DemoResult<Vec<f64>> {
    if num_samples == 0 {
        return Err(DemoError::invalid_parameter(
            "num_samples",
            num_samples,
            "must be at least 1",
        ));
    }
    if sample_size == 0 {
        return Err(DemoError::invalid_parameter(
            "sample_size",
            sample_size,
            "must be at least 1",
        ));
    }

    let shape_ok = num_samples
        .checked_mul(sample_size)
        .is_some_and(|total| total == raw.len());
    if !shape_ok {
        return Err(DemoError::ShapeMismatch {
            len: raw.len(),
            num_samples,
            sample_size,
        });
    }

    raw.chunks_exact(sample_size)
        .enumerate()
        .map(|(i, block)| {
            stats::mean(block).ok_or_else(|| {
                DemoError::invalid_parameter(
                    "raw",
                    format!("block {i}"),
                    "contains a non-finite value",
                )
            })
        })
        .collect()
}
