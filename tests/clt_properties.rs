//! Central Limit Theorem behaviour of the block-mean demo.

use statdemo::demos::clt::std_dev_of_means;
use statdemo::prelude::*;
use statdemo::stats;

const SCALE: f64 = 150.0;
const NUM_SAMPLES: usize = 2000;

/// Mean over `trials` seeds of the block-mean standard deviation.
fn averaged_spread(sample_size: usize, trials: u64) -> f64 {
    let total: f64 = (0..trials)
        .map(|seed| {
            let mut rng = DemoRng::new(1000 + seed);
            let raw = sample_exponential(&mut rng, SCALE, NUM_SAMPLES * sample_size).unwrap();
            std_dev_of_means(&raw, NUM_SAMPLES, sample_size).unwrap()
        })
        .sum();
    total / trials as f64
}

#[test]
fn dashboard_defaults_scenario() {
    let mut rng = DemoRng::new(42);
    let outcome = CltParams::new(150.0, 30, 2000).simulate(&mut rng).unwrap();

    assert_eq!(outcome.raw.len(), 60_000);
    assert_eq!(outcome.sample_means.len(), 2000);
    assert!(outcome.raw.iter().all(|&x| x >= 0.0));

    let overall = stats::mean(&outcome.sample_means).unwrap();
    assert!((overall - 150.0).abs() < 3.0, "overall mean {overall}");
}

#[test]
fn aggregation_preserves_overall_mean() {
    let mut rng = DemoRng::new(5);
    let outcome = CltParams::new(400.0, 17, 900).simulate(&mut rng).unwrap();
    let raw_mean = stats::mean(&outcome.raw).unwrap();
    let means_mean = stats::mean(&outcome.sample_means).unwrap();
    assert!((raw_mean - means_mean).abs() < 1e-9 * raw_mean);
}

#[test]
fn spread_shrinks_as_inverse_root_n() {
    let mut previous = f64::INFINITY;
    for sample_size in [1, 5, 30, 100] {
        let observed = averaged_spread(sample_size, 4);
        let expected = SCALE / (sample_size as f64).sqrt();
        let rel = (observed - expected).abs() / expected;
        assert!(
            rel < 0.12,
            "N={sample_size}: spread {observed:.3} vs expected {expected:.3}"
        );
        assert!(observed < previous, "spread did not shrink at N={sample_size}");
        previous = observed;
    }
}

#[test]
fn averages_lose_the_skew() {
    let mut rng = DemoRng::new(99);
    let skewed = CltParams::new(150.0, 1, 5000).simulate(&mut rng).unwrap();
    let averaged = CltParams::new(150.0, 100, 5000).simulate(&mut rng).unwrap();

    assert!(skewed.stats.averages.observed_skewness > 1.4);
    assert!(averaged.stats.averages.observed_skewness.abs() < 0.4);
}

#[test]
fn block_means_rejects_mismatched_raw() {
    let mut rng = DemoRng::new(1);
    let raw = sample_exponential(&mut rng, SCALE, 59_999).unwrap();
    let err = block_means(&raw, 2000, 30).unwrap_err();
    assert!(matches!(err, DemoError::ShapeMismatch { len: 59_999, .. }));
}

#[test]
fn reported_expectations_follow_parameters() {
    let mut rng = DemoRng::new(3);
    let outcome = CltParams::new(250.0, 25, 400).simulate(&mut rng).unwrap();
    let daily = outcome.stats.daily;
    let averages = outcome.stats.averages;

    assert_eq!(daily.expected_mean, 250.0);
    assert_eq!(daily.expected_std_dev, 250.0);
    assert_eq!(daily.expected_skewness, 2.0);
    assert_eq!(averages.expected_mean, 250.0);
    assert!((averages.expected_std_dev - 50.0).abs() < 1e-12);
    assert!((averages.expected_skewness - 0.4).abs() < 1e-12);
    assert!(averages.mean_relative_error() < 0.05);
}
