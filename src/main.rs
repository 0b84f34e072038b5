//! statdemo CLI - Central Limit Theorem and Poisson distribution demos.

use clap::Parser;
use statdemo::cli::{run_cli, Args};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: failed to install logger: {e}");
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(args.verbose);
    run_cli(args)
}
