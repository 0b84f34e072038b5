//! Descriptive statistics for simulated sample sets.
//!
//! - **Mean**: Kahan compensated summation, so the mean of 60 000 revenue
//!   draws does not drift with accumulation order.
//! - **Variance**: Welford's online algorithm, population form (divide by `n`).
//! - **Skewness**: population moment coefficient `g1 = m3 / m2^{3/2}`.
//!
//! Every function returns `None` for empty input or any non-finite value.

/// Kahan compensated sum.
fn kahan_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut compensation = 0.0;
    for &x in data {
        let y = x - compensation;
        let t = sum + y;
        compensation = (t - sum) - y;
        sum = t;
    }
    sum
}

fn all_finite(data: &[f64]) -> bool {
    data.iter().all(|x| x.is_finite())
}

/// Arithmetic mean.
///
/// # Examples
/// ```
/// use statdemo::stats::mean;
/// assert!((mean(&[1.0, 2.0, 3.0, 4.0]).unwrap() - 2.5).abs() < 1e-15);
/// assert!(mean(&[]).is_none());
/// ```
#[must_use]
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() || !all_finite(data) {
        return None;
    }
    Some(kahan_sum(data) / data.len() as f64)
}

/// Running mean and sum of squared deviations (Welford 1962).
#[derive(Debug, Clone, Copy, Default)]
pub struct WelfordAccumulator {
    count: u64,
    mean: f64,
    m2: f64,
}

impl WelfordAccumulator {
    /// Empty accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
        }
    }

    /// Fold one observation in.
    pub fn update(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
    }

    /// Number of observations seen.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Running mean, `None` before the first observation.
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    /// Population variance, `None` before the first observation.
    #[must_use]
    pub fn population_variance(&self) -> Option<f64> {
        (self.count > 0).then(|| self.m2 / self.count as f64)
    }
}

/// Population variance (denominator `n`).
///
/// # Examples
/// ```
/// use statdemo::stats::population_variance;
/// let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((population_variance(&v).unwrap() - 4.0).abs() < 1e-10);
/// ```
#[must_use]
pub fn population_variance(data: &[f64]) -> Option<f64> {
    if data.is_empty() || !all_finite(data) {
        return None;
    }
    let mut acc = WelfordAccumulator::new();
    for &x in data {
        acc.update(x);
    }
    acc.population_variance()
}

/// Population standard deviation.
#[must_use]
pub fn population_std_dev(data: &[f64]) -> Option<f64> {
    population_variance(data).map(f64::sqrt)
}

/// Population skewness `g1`.
///
/// Returns `Some(0.0)` for a constant sequence, where the third moment and
/// the spread both vanish.
#[must_use]
pub fn skewness(data: &[f64]) -> Option<f64> {
    let mu = mean(data)?;
    let n = data.len() as f64;
    let m2 = data.iter().map(|x| (x - mu).powi(2)).sum::<f64>() / n;
    // Spread below one ulp of the mean is rounding noise, not dispersion
    let noise = f64::EPSILON * mu.abs().max(f64::MIN_POSITIVE);
    if m2 <= noise * noise {
        return Some(0.0);
    }
    let m3 = data.iter().map(|x| (x - mu).powi(3)).sum::<f64>() / n;
    Some(m3 / m2.powf(1.5))
}

/// Minimum value.
#[must_use]
pub fn min(data: &[f64]) -> Option<f64> {
    if data.is_empty() || !all_finite(data) {
        return None;
    }
    Some(data.iter().copied().fold(f64::INFINITY, f64::min))
}

/// Maximum value.
#[must_use]
pub fn max(data: &[f64]) -> Option<f64> {
    if data.is_empty() || !all_finite(data) {
        return None;
    }
    Some(data.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}
