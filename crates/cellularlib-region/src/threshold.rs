//! Automatic threshold selection from cluster-count curves
//!
//! For images with values in `[0, 1]`, the number of clusters as a function
//! of threshold has a characteristic hump. These estimators pick a threshold
//! from that curve, computed by [`count_by_threshold`] over
//! [`default_thresholds`].

use crate::error::{RegionError, RegionResult};
use crate::ncluster::{CountOptions, count_by_threshold};
use cellularlib_core::{Grid, IntensityOrder};

/// Number of thresholds in [`default_thresholds`]
pub const DEFAULT_THRESHOLD_COUNT: usize = 255;

/// Minimum cluster size counted by the estimators
pub const ESTIMATOR_SIZE_THRESHOLD: usize = 5;

/// Bin centres `(0.5 + k) / 256` for `k` in `0..255`, ascending
pub fn default_thresholds() -> Vec<f64> {
    (0..DEFAULT_THRESHOLD_COUNT)
        .map(|k| (0.5 + k as f64) / 256.0)
        .collect()
}

/// Cluster counts of size `>= size_threshold` at every default threshold
///
/// Returns `(thresholds, counts)`.
pub fn count_curve(grid: &Grid, size_threshold: usize) -> RegionResult<(Vec<f64>, Vec<usize>)> {
    let order = IntensityOrder::from_grid(grid);
    let thresholds = default_thresholds();
    let options = CountOptions::new().with_size_threshold(size_threshold);
    let counts = count_by_threshold(grid, &order, &thresholds, &options)?;
    Ok((thresholds, counts))
}

/// Median of the thresholds whose cluster count exceeds a quarter of the
/// maximum count
///
/// # Errors
///
/// Returns `RegionError::NoClusterFound` if no threshold has a cluster.
pub fn median_quarter_maximum(grid: &Grid) -> RegionResult<f64> {
    let (thresholds, counts) = count_curve(grid, ESTIMATOR_SIZE_THRESHOLD)?;

    let max = counts.iter().copied().max().unwrap_or(0);
    let quarter = 0.25 * max as f64;
    let selected: Vec<f64> = thresholds
        .iter()
        .zip(&counts)
        .filter(|&(_, &c)| c as f64 > quarter)
        .map(|(&t, _)| t)
        .collect();

    let t = median(&selected).ok_or(RegionError::NoClusterFound)?;
    log::debug!(
        "median_quarter_maximum: max count {} over {} thresholds -> {}",
        max,
        selected.len(),
        t
    );
    Ok(t)
}

/// Iterated two-class mean of the count-weighted thresholds
///
/// Starts from the weighted mean of all thresholds, then repeatedly splits
/// them at the current estimate and moves to the midpoint of the two class
/// means. `iterations` counts the initial mean, so 1 returns it unchanged.
/// A class with no weight keeps the current estimate as its mean.
///
/// # Errors
///
/// Returns `RegionError::NoClusterFound` if no threshold has a cluster.
pub fn mean2(grid: &Grid, iterations: usize) -> RegionResult<f64> {
    let (thresholds, counts) = count_curve(grid, ESTIMATOR_SIZE_THRESHOLD)?;
    let weights: Vec<f64> = counts.iter().map(|&c| c as f64).collect();

    let mut m = weighted_mean(&thresholds, &weights, |_| true).ok_or(RegionError::NoClusterFound)?;

    for _ in 1..iterations {
        let m1 = weighted_mean(&thresholds, &weights, |t| t < m).unwrap_or(m);
        let m2 = weighted_mean(&thresholds, &weights, |t| t >= m).unwrap_or(m);
        m = 0.5 * (m1 + m2);
        log::trace!("mean2: {} {} -> {}", m1, m2, m);
    }

    log::debug!("mean2: {} iterations -> {}", iterations, m);
    Ok(m)
}

fn weighted_mean(values: &[f64], weights: &[f64], select: impl Fn(f64) -> bool) -> Option<f64> {
    let (sum, total) = values
        .iter()
        .zip(weights)
        .filter(|&(&v, _)| select(v))
        .fold((0.0, 0.0), |(s, w), (&v, &wt)| (s + v * wt, w + wt));
    (total > 0.0).then(|| sum / total)
}

fn median(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    match n {
        0 => None,
        _ if n % 2 == 1 => Some(sorted[n / 2]),
        _ => Some(0.5 * (sorted[n / 2 - 1] + sorted[n / 2])),
    }
}
