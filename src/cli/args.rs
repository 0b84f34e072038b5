//! CLI argument parsing.
//!
//! Arguments are plain data so tests can build them with
//! `Args::try_parse_from` instead of touching the process environment.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::demos::TimeUnit;

/// `--version` text, including the git revision captured by `build.rs`.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("STATDEMO_GIT_HASH"),
    ")"
);

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "statdemo")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "Central Limit Theorem and Poisson distribution demos")]
pub struct Args {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Fixed random seed (default: drawn from entropy and printed)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Histogram bin count
    #[arg(long, global = true)]
    pub bins: Option<usize>,

    /// Width of the longest bar in columns
    #[arg(long, global = true)]
    pub width: Option<usize>,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Keep raw draws in JSON output
    #[arg(long, global = true, requires = "json")]
    pub include_raw: bool,

    /// Verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Average exponential daily revenue over N-day samples
    Clt {
        /// Average daily revenue in dollars (10-1000)
        #[arg(long, default_value_t = 150.0)]
        revenue: f64,

        /// Days in each sample (1-100)
        #[arg(long, default_value_t = 30)]
        sample_size: usize,

        /// Number of samples to simulate (100-10000)
        #[arg(long, default_value_t = 2000)]
        num_samples: usize,
    },

    /// Count Poisson clicks per period and compare with the PMF
    Poisson {
        /// Average clicks per period (0.1-50)
        #[arg(long, default_value_t = 5.0)]
        rate: f64,

        /// Number of periods to simulate (100-5000)
        #[arg(long, default_value_t = 1000)]
        periods: usize,

        /// Label for one period
        #[arg(long, value_enum, default_value_t = TimeUnit::Day)]
        time_unit: TimeUnit,
    },

    /// Run a scenario file
    Run {
        /// Path to the scenario YAML file
        scenario: PathBuf,
    },

    /// Re-run a seeded scenario and check every run is identical
    Verify {
        /// Path to the scenario YAML file
        scenario: PathBuf,

        /// Number of runs to compare
        #[arg(long, default_value_t = 3)]
        runs: usize,
    },
}
