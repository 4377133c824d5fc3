use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, sample_count};
use crate::region::RegionProfile;

/// A named region in a model configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionConfig {
    pub name: String,
    pub landfall_rate: f64,
    pub loss_mean: f64,
    pub loss_stddev: f64,
}

impl RegionConfig {
    pub fn profile(&self) -> RegionProfile {
        RegionProfile::new(self.landfall_rate, self.loss_mean, self.loss_stddev)
    }
}

fn default_samples() -> i64 {
    1000
}

/// Full model input: portfolio, sample count and optional seed.
///
/// `samples` is signed so that a negative count in a file is reported as an
/// invalid sample count rather than a parse error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_samples")]
    pub samples: i64,
    pub regions: Vec<RegionConfig>,
}

impl ModelConfig {
    /// Florida and the Gulf states with identical parameters
    /// (λ = 3, μ = 5, σ = 1), 1000 years, seed 42.
    pub fn canonical() -> Self {
        ModelConfig {
            seed: Some(42),
            samples: default_samples(),
            regions: vec![
                RegionConfig { name: "Florida".to_string(), landfall_rate: 3.0, loss_mean: 5.0, loss_stddev: 1.0 },
                RegionConfig { name: "Gulf states".to_string(), landfall_rate: 3.0, loss_mean: 5.0, loss_stddev: 1.0 },
            ],
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Validate every region and the sample count; returns the unsigned count.
    pub fn validate(&self) -> Result<u64> {
        for region in &self.regions {
            region.profile().validate()?;
        }
        sample_count(self.samples)
    }

    pub fn profiles(&self) -> Vec<RegionProfile> {
        self.regions.iter().map(RegionConfig::profile).collect()
    }
}
