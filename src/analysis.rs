use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::portfolio::run_loss_calculations;
use crate::region::RegionProfile;

/// Descriptive statistics over a table of annual losses.
///
/// `p99_6` is the 1-in-250-year loss.
#[derive(Debug, Clone, Serialize)]
pub struct LossSummary {
    pub n: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub p50: f64,
    pub p90: f64,
    pub p99: f64,
    pub p99_6: f64,
    pub max: f64,
}

impl LossSummary {
    /// Returns `None` for an empty table.
    pub fn from_annual_losses(losses: &[f64]) -> Option<Self> {
        if losses.is_empty() {
            return None;
        }
        let mut values = losses.to_vec();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let n = values.len();

        let (mean, std_dev) = mean_std(&values);
        Some(LossSummary {
            n,
            mean,
            std_dev,
            min: values[0],
            p50: interp(&values, 0.50),
            p90: interp(&values, 0.90),
            p99: interp(&values, 0.99),
            p99_6: interp(&values, 0.996),
            max: values[n - 1],
        })
    }
}

/// Linear interpolation between order statistics of sorted `values`.
fn interp(values: &[f64], p: f64) -> f64 {
    let n = values.len();
    let h = p * (n - 1) as f64;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = h - lo as f64;
    values[lo] * (1.0 - frac) + values[hi] * frac
}

/// Mean and sample (n − 1) standard deviation; std-dev is 0 for a single value.
fn mean_std(values: &[f64]) -> (f64, f64) {
    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = if n > 1 {
        values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
    } else {
        0.0
    };
    (mean, variance.sqrt())
}

/// Estimate spread and run time at one sample count.
#[derive(Debug, Clone, Serialize)]
pub struct ConvergencePoint {
    pub samples: u64,
    pub repeats: usize,
    pub mean_estimate: f64,
    pub std_estimate: f64,
    pub mean_secs: f64,
    pub std_secs: f64,
}

/// Run the portfolio estimator `repeats` times at each sample count.
///
/// Repeat `r` is seeded with `seed + r`, so every sample count sees the same
/// set of seeds and the only thing varying between points is `n`.
pub fn convergence_study(
    regions: &[RegionProfile],
    sample_counts: &[u64],
    repeats: usize,
    seed: u64,
) -> Result<Vec<ConvergencePoint>> {
    let mut points = Vec::with_capacity(sample_counts.len());
    for &samples in sample_counts {
        let mut estimates = Vec::with_capacity(repeats);
        let mut secs = Vec::with_capacity(repeats);
        for r in 0..repeats {
            let mut rng = ChaCha20Rng::seed_from_u64(seed.wrapping_add(r as u64));
            let start = Instant::now();
            estimates.push(run_loss_calculations(regions, samples, &mut rng)?);
            secs.push(start.elapsed().as_secs_f64());
        }
        if repeats == 0 {
            continue;
        }

        let (mean_estimate, std_estimate) = mean_std(&estimates);
        let (mean_secs, std_secs) = mean_std(&secs);
        info!(samples, mean_estimate, std_estimate, mean_secs, "convergence point");
        points.push(ConvergencePoint { samples, repeats, mean_estimate, std_estimate, mean_secs, std_secs });
    }
    Ok(points)
}
