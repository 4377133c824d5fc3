use rand::Rng;
use rand_distr::{Distribution, LogNormal, Poisson};

use crate::error::{ModelError, Result, require_samples};
use crate::region::RegionProfile;

/// Frequency/severity pair for one region.
///
/// `frequency` is `None` when λ = 0: Poisson(0) is rejected by `rand_distr`,
/// and a region with no landfalls never draws a severity.
struct RegionModel {
    frequency: Option<Poisson<f64>>,
    severity: LogNormal<f64>,
}

impl RegionModel {
    fn new(region: &RegionProfile) -> Result<Self> {
        region.validate()?;
        let frequency = if region.landfall_rate > 0.0 {
            Some(
                Poisson::new(region.landfall_rate)
                    .map_err(|e| ModelError::Distribution(format!("Poisson({}): {e}", region.landfall_rate)))?,
            )
        } else {
            None
        };
        let severity = LogNormal::new(region.loss_mean, region.loss_stddev).map_err(|e| {
            ModelError::Distribution(format!(
                "LogNormal({}, {}): {e}",
                region.loss_mean, region.loss_stddev
            ))
        })?;
        Ok(RegionModel { frequency, severity })
    }

    fn event_count(&self, rng: &mut impl Rng) -> u64 {
        match &self.frequency {
            Some(poisson) => poisson.sample(rng) as u64,
            None => 0,
        }
    }

    fn total_severity(&self, events: u64, rng: &mut impl Rng) -> f64 {
        (0..events).map(|_| self.severity.sample(rng)).sum()
    }
}

fn finite(total: f64) -> Result<f64> {
    if total.is_finite() { Ok(total) } else { Err(ModelError::NonFiniteLoss) }
}

/// Total simulated loss for `region` over `n` years.
///
/// Draws `n` Poisson(λ) annual counts, pools them into `K` events and sums
/// `K` LogNormal(μ, σ) severities. Which year an event fell in is discarded,
/// so the result is only meaningful divided by `n`; use
/// [`simulate_annual_losses`] when the per-year distribution matters.
///
/// Returns exactly `0.0` when no events are drawn.
pub fn estimate_region_loss(region: &RegionProfile, n: u64, rng: &mut impl Rng) -> Result<f64> {
    require_samples(n)?;
    let model = RegionModel::new(region)?;
    if model.frequency.is_none() {
        return Ok(0.0);
    }

    let events: u64 = (0..n).map(|_| model.event_count(rng)).sum();
    finite(model.total_severity(events, rng))
}

/// Total loss in each of `n` simulated years for `region`.
///
/// Each year draws its own count and then that many severities, so the
/// returned table has length `n` and supports percentile analysis.
pub fn simulate_annual_losses(region: &RegionProfile, n: u64, rng: &mut impl Rng) -> Result<Vec<f64>> {
    require_samples(n)?;
    let model = RegionModel::new(region)?;
    if model.frequency.is_none() {
        return Ok(vec![0.0; n as usize]);
    }

    (0..n)
        .map(|_| {
            let events = model.event_count(rng);
            finite(model.total_severity(events, rng))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    use super::*;

    fn rng() -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(42)
    }

    #[test]
    fn unit_region_is_non_negative_and_reproducible() {
        let region = RegionProfile::new(1.0, 1.0, 1.0);
        let a = estimate_region_loss(&region, 100, &mut rng()).unwrap();
        let b = estimate_region_loss(&region, 100, &mut rng()).unwrap();
        assert!(a >= 0.0);
        assert_eq!(a, b, "same seed must reproduce the exact value");
    }

    #[test]
    fn zero_rate_collapses_to_zero() {
        // Severity params are irrelevant when no events occur.
        let region = RegionProfile::new(0.0, 50.0, 10.0);
        let mut rng = rng();
        for n in [1, 100, 10_000] {
            assert_eq!(estimate_region_loss(&region, n, &mut rng).unwrap(), 0.0);
        }
    }

    #[test]
    fn zero_samples_rejected() {
        let region = RegionProfile::new(1.0, 1.0, 1.0);
        let err = estimate_region_loss(&region, 0, &mut rng()).unwrap_err();
        assert!(matches!(err, ModelError::InvalidSampleCount(0)));
    }

    #[test]
    fn invalid_region_rejected_before_sampling() {
        let mut rng = rng();
        let before = rng.clone();
        let err = estimate_region_loss(&RegionProfile::new(-1.0, 1.0, 1.0), 10, &mut rng).unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(rng, before, "no draws on rejected input");
    }

    /// With σ = 0 every event loses exactly e^μ, so the total is K·e^μ.
    #[test]
    fn zero_sigma_is_deterministic_per_event() {
        let region = RegionProfile::new(3.0, 0.0, 0.0);
        let total = estimate_region_loss(&region, 1_000, &mut rng()).unwrap();
        let events = total.round();
        assert!((total - events).abs() < 1e-6, "total {total} should be an integer count of 1.0 losses");
        let mean = total / 1_000.0;
        assert!((2.7..=3.3).contains(&mean), "mean annual count {mean:.3} outside [2.7, 3.3]");
    }

    /// λ=2, μ=0, σ=0.5 → E[annual] = 2·exp(0.125) ≈ 2.266. 20k years within ±5 %.
    #[test]
    fn mean_annual_loss_in_expected_range() {
        let region = RegionProfile::new(2.0, 0.0, 0.5);
        let n = 20_000;
        let mean = estimate_region_loss(&region, n, &mut rng()).unwrap() / n as f64;
        let expected = region.expected_annual_loss();
        assert!(
            (mean - expected).abs() <= expected * 0.05,
            "mean {mean:.4} not within 5 % of {expected:.4}"
        );
    }

    #[test]
    fn overflow_reported() {
        let region = RegionProfile::new(5.0, 709.0, 1.0);
        let err = estimate_region_loss(&region, 100, &mut rng()).unwrap_err();
        assert!(matches!(err, ModelError::NonFiniteLoss));
    }

    #[test]
    fn annual_table_has_one_entry_per_year() {
        let region = RegionProfile::new(1.5, 1.0, 1.0);
        let table = simulate_annual_losses(&region, 500, &mut rng()).unwrap();
        assert_eq!(table.len(), 500);
        assert!(table.iter().all(|&x| x >= 0.0));
        // λ=1.5 → P(no event) ≈ 0.22; some quiet years must appear.
        assert!(table.iter().any(|&x| x == 0.0));
    }

    #[test]
    fn annual_table_zero_rate() {
        let table = simulate_annual_losses(&RegionProfile::new(0.0, 1.0, 1.0), 10, &mut rng()).unwrap();
        assert_eq!(table, vec![0.0; 10]);
    }

    #[test]
    fn annual_table_mean_matches_pooled_estimate() {
        let region = RegionProfile::new(1.0, 1.0, 1.0);
        let n = 20_000u64;
        let table = simulate_annual_losses(&region, n, &mut ChaCha20Rng::seed_from_u64(1)).unwrap();
        let per_year = table.iter().sum::<f64>() / n as f64;
        let pooled = estimate_region_loss(&region, n, &mut ChaCha20Rng::seed_from_u64(2)).unwrap() / n as f64;
        let expected = region.expected_annual_loss();
        for m in [per_year, pooled] {
            assert!((m - expected).abs() <= expected * 0.08, "{m:.3} vs {expected:.3}");
        }
    }
}
