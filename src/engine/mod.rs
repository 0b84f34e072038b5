//! Simulation engine plumbing.
//!
//! Holds the injectable random source every demo run draws from.

pub mod rng;

pub use rng::DemoRng;
