use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Hurricane risk parameters for one region.
///
/// Losses are LogNormal with ln-space params `loss_mean` (μ) and
/// `loss_stddev` (σ); the per-event expected loss is exp(μ + σ²/2).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionProfile {
    /// Poisson λ: expected landfalls per year.
    pub landfall_rate: f64,
    pub loss_mean: f64,
    pub loss_stddev: f64,
}

impl RegionProfile {
    /// Stores the parameters as given. See [`RegionProfile::validate`].
    pub fn new(landfall_rate: f64, loss_mean: f64, loss_stddev: f64) -> Self {
        RegionProfile { landfall_rate, loss_mean, loss_stddev }
    }

    pub fn try_new(landfall_rate: f64, loss_mean: f64, loss_stddev: f64) -> Result<Self> {
        let profile = Self::new(landfall_rate, loss_mean, loss_stddev);
        profile.validate()?;
        Ok(profile)
    }

    /// Reject negative rates, negative stddevs and non-finite fields.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("landfall_rate", self.landfall_rate),
            ("loss_mean", self.loss_mean),
            ("loss_stddev", self.loss_stddev),
        ] {
            if !value.is_finite() {
                return Err(ModelError::NonFiniteParameter { field, value });
            }
        }
        if self.landfall_rate < 0.0 {
            return Err(ModelError::NegativeLandfallRate(self.landfall_rate));
        }
        if self.loss_stddev < 0.0 {
            return Err(ModelError::NegativeLossStddev(self.loss_stddev));
        }
        Ok(())
    }

    /// Analytic mean annual loss: λ · exp(μ + σ²/2).
    pub fn expected_annual_loss(&self) -> f64 {
        self.landfall_rate * (self.loss_mean + self.loss_stddev * self.loss_stddev / 2.0).exp()
    }
}
