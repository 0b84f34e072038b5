//! CLI module for statdemo.
//!
//! All CLI logic lives here rather than in `main.rs` so it can be tested.
//! The entry point `run_cli` is called from `main.rs` with parsed arguments.

mod args;
mod commands;
mod output;

pub use args::{Args, Command, LONG_VERSION};
pub use commands::{
    execute, load_scenario, run_cli, run_scenario, scenario_from_args, verify_scenario,
    VerifySummary,
};
pub use output::{write_outcome, write_verification};
