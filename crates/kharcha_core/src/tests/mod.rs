//! Integration tests for the kharcha simulation engine
//!
//! Tests are organized by topic:
//! - `transport` - analytical commute-cost moments
//! - `variable` - correlated variable-expense sampling
//! - `periodic` - periodic aggregation and stochastic overlays
//! - `engine` - orchestrator contract and reproducibility
//! - `validation` - configuration rejection cases

mod periodic;

use crate::config::Config;

/// A valid configuration with a modest trial count. March keeps the
/// seasonality multipliers neutral unless a test opts into the festival
/// months.
pub(crate) fn test_config(trials: usize) -> Config {
    let mut config = Config::default();
    config.simulation.mc_trials = trials;
    config.simulation.month = Some(3);
    config
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

pub(crate) fn sample_variance(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}

pub(crate) fn sample_covariance(a: &[f64], b: &[f64]) -> f64 {
    let (ma, mb) = (mean(a), mean(b));
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - ma) * (y - mb))
        .sum::<f64>()
        / (a.len() - 1) as f64
}
