//! # statdemo
//!
//! Two seeded statistics demonstrations:
//! - **Central Limit Theorem**: skewed exponential daily revenue averaged over
//!   N-day samples forms a bell curve with spread `β/√N`
//! - **Poisson distribution**: clicks per period compared against the PMF
//!
//! Every run is a pure function of its parameters and an explicitly passed
//! random source, so a fixed seed reproduces it exactly.
//!
//! ## Example
//!
//! ```rust
//! use statdemo::prelude::*;
//!
//! let mut rng = DemoRng::new(42);
//! let outcome = CltParams::new(150.0, 30, 2000).simulate(&mut rng).unwrap();
//! assert_eq!(outcome.raw.len(), 60_000);
//! assert_eq!(outcome.sample_means.len(), 2000);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,  // Plain arithmetic reads closer to the formulas
    clippy::imprecise_flops,
    clippy::too_many_lines,
    clippy::missing_const_for_fn,
)]

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod demos;
pub mod engine;
pub mod error;
pub mod report;
pub mod sampler;
pub mod stats;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::aggregate::{block_means, summarize_counts, PoissonSummary};
    pub use crate::config::{ReportConfig, ScenarioConfig, ScenarioConfigBuilder};
    pub use crate::demos::{
        CltOutcome, CltParams, DemoOutcome, DemoParams, PoissonOutcome, PoissonParams,
        Simulation, TimeUnit,
    };
    pub use crate::engine::rng::DemoRng;
    pub use crate::error::{DemoError, DemoResult};
    pub use crate::sampler::{sample_exponential, sample_poisson, SampleDistribution};
}

/// Re-export for public API
pub use error::{DemoError, DemoResult};
