//! Descriptive statistics over repeated runs.

use serde::{Deserialize, Serialize};
use u_numflow::special::t_distribution_quantile;
use u_numflow::stats;

/// Summary of a sample of values, typically the terminal costs of many runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of values.
    pub count: usize,
    /// Sample mean.
    pub mean: f64,
    /// Sample variance with Bessel's correction; zero for a single value.
    pub variance: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// Lower bound of the 95% confidence interval of the mean.
    pub ci_low: f64,
    /// Upper bound of the 95% confidence interval of the mean.
    pub ci_high: f64,
}

impl Summary {
    /// Sample standard deviation.
    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }

    /// Half-width of the 95% confidence interval.
    pub fn ci_half_width(&self) -> f64 {
        (self.ci_high - self.ci_low) / 2.0
    }
}

/// Summarizes `values`, or returns `None` if it is empty or holds a
/// non-finite value.
///
/// The confidence interval is `mean ± t(0.975, n - 1) * s / sqrt(n)` with the
/// exact Student's t quantile; it collapses to the mean for a single value.
///
/// # Examples
///
/// ```
/// use tsp_anneal::harness::summarize;
///
/// let s = summarize(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
/// assert_eq!(s.mean, 5.0);
/// assert!((s.variance - 32.0 / 7.0).abs() < 1e-12);
/// assert!(s.ci_low < 5.0 && s.ci_high > 5.0);
/// ```
pub fn summarize(values: &[f64]) -> Option<Summary> {
    let n = values.len();
    let mean = stats::mean(values)?;
    let min = stats::min(values)?;
    let max = stats::max(values)?;

    let (variance, half_width) = if n < 2 {
        (0.0, 0.0)
    } else {
        let variance = stats::variance(values)?;
        let t = t_distribution_quantile(0.975, (n - 1) as f64);
        (variance, t * (variance / n as f64).sqrt())
    };

    Some(Summary {
        count: n,
        mean,
        variance,
        min,
        max,
        ci_low: mean - half_width,
        ci_high: mean + half_width,
    })
}

/// Element-wise mean of several series (e.g. per-step acceptance rates of
/// many runs). Ragged series are averaged over the runs that reach each index.
pub fn mean_series(series: &[Vec<f64>]) -> Vec<f64> {
    let longest = series.iter().map(Vec::len).max().unwrap_or(0);
    (0..longest)
        .map(|i| {
            let (sum, count) = series
                .iter()
                .filter_map(|s| s.get(i))
                .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
            sum / count as f64
        })
        .collect()
}

/// Distance of each trace entry from a reference cost (e.g. a known optimum).
pub fn gap_to_reference(trace: &[f64], reference: f64) -> Vec<f64> {
    trace.iter().map(|c| c - reference).collect()
}
