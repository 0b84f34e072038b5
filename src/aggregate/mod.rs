//! Reductions from raw draws to the quantities each demo displays.
//!
//! - [`clt`] - block means over consecutive, non-overlapping windows
//! - [`poisson`] - empirical moments and a PMF-vs-frequency table

pub mod clt;
pub mod poisson;

pub use clt::block_means;
pub use poisson::{summarize_counts, FrequencyRow, PoissonSummary};
