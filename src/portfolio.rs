use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use tracing::debug;

use crate::error::{ModelError, Result, require_samples};
use crate::estimator::{estimate_region_loss, simulate_annual_losses};
use crate::region::RegionProfile;

/// Mean annual loss across `regions` over `n` simulated years.
///
/// Each region is estimated independently and the totals are summed, then
/// divided by `n`. An empty portfolio yields `0.0`. All regions are
/// validated before the first draw.
pub fn run_loss_calculations(regions: &[RegionProfile], n: u64, rng: &mut impl Rng) -> Result<f64> {
    require_samples(n)?;
    for region in regions {
        region.validate()?;
    }

    let mut total_losses = 0.0;
    for (i, region) in regions.iter().enumerate() {
        total_losses += estimate_region_loss(region, n, rng)?;
        debug!(region = i + 1, of = regions.len(), "completed region");
    }
    if !total_losses.is_finite() {
        return Err(ModelError::NonFiniteLoss);
    }

    Ok(total_losses / n as f64)
}

/// RNG for region `index`: the run seed with a per-region ChaCha stream, so
/// draws do not depend on which thread evaluates which region.
pub fn region_rng(seed: u64, index: usize) -> ChaCha20Rng {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    rng.set_stream(index as u64);
    rng
}

/// Parallel variant of [`run_loss_calculations`] using rayon.
///
/// Region `i` draws from [`region_rng`]`(seed, i)`. Totals are reduced in
/// input order, so the result is identical across runs and thread counts.
pub fn run_loss_calculations_parallel(regions: &[RegionProfile], n: u64, seed: u64) -> Result<f64> {
    require_samples(n)?;
    for region in regions {
        region.validate()?;
    }

    let totals: Vec<f64> = regions
        .par_iter()
        .enumerate()
        .map(|(i, region)| -> Result<f64> {
            let total = estimate_region_loss(region, n, &mut region_rng(seed, i))?;
            debug!(region = i + 1, of = regions.len(), "completed region");
            Ok(total)
        })
        .collect::<Result<_>>()?;

    let total_losses: f64 = totals.iter().sum();
    if !total_losses.is_finite() {
        return Err(ModelError::NonFiniteLoss);
    }
    Ok(total_losses / n as f64)
}

/// Portfolio loss in each of `n` simulated years.
///
/// Year `i` of the result is the sum of year `i` across every region.
/// An empty portfolio yields `n` zero years.
pub fn simulate_portfolio_annual_losses(
    regions: &[RegionProfile],
    n: u64,
    rng: &mut impl Rng,
) -> Result<Vec<f64>> {
    require_samples(n)?;
    for region in regions {
        region.validate()?;
    }

    let mut years = vec![0.0; n as usize];
    for (i, region) in regions.iter().enumerate() {
        let table = simulate_annual_losses(region, n, rng)?;
        for (year, loss) in years.iter_mut().zip(table) {
            *year += loss;
        }
        debug!(region = i + 1, of = regions.len(), "completed region");
    }
    if years.iter().any(|y| !y.is_finite()) {
        return Err(ModelError::NonFiniteLoss);
    }
    Ok(years)
}
