//! `gethurricaneloss` — average annual hurricane loss in $Billions for a
//! simple Florida / Gulf states hurricane model.
//!
//! ```bash
//! gethurricaneloss -n 10000 3 5 1 3 5 1
//! gethurricaneloss --config portfolio.json --summary
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{error, info};

use hurriloss::analysis::LossSummary;
use hurriloss::config::{ModelConfig, RegionConfig};
use hurriloss::error::ModelError;
use hurriloss::{run_loss_calculations, run_loss_calculations_parallel, simulate_portfolio_annual_losses, telemetry};

/// Calculates the average annual hurricane loss in $Billions for a simple
/// hurricane model.
#[derive(Parser)]
#[command(name = "gethurricaneloss", version, about, allow_negative_numbers = true)]
struct Cli {
    /// The annual rate of landfalling hurricanes in Florida.
    #[arg(required_unless_present = "config")]
    florida_landfall_rate: Option<f64>,

    /// LogNormal mean (ln-space) of the economic loss of a Florida landfall.
    #[arg(required_unless_present = "config")]
    florida_mean: Option<f64>,

    /// LogNormal standard deviation (ln-space) for Florida.
    #[arg(required_unless_present = "config")]
    florida_stddev: Option<f64>,

    /// The annual rate of landfalling hurricanes in the Gulf states.
    #[arg(required_unless_present = "config")]
    gulf_landfall_rate: Option<f64>,

    /// LogNormal mean (ln-space) of the economic loss of a Gulf states landfall.
    #[arg(required_unless_present = "config")]
    gulf_mean: Option<f64>,

    /// LogNormal standard deviation (ln-space) for the Gulf states.
    #[arg(required_unless_present = "config")]
    gulf_stddev: Option<f64>,

    /// Number of samples (simulation years) to run.
    #[arg(short = 'n', long = "num-monte-carlo-samples")]
    samples: Option<i64>,

    /// Seed for a reproducible run. Defaults to OS entropy.
    #[arg(long)]
    seed: Option<u64>,

    /// Evaluate regions in parallel, one ChaCha stream per region.
    #[arg(long)]
    parallel: bool,

    /// Print per-year loss statistics as JSON instead of the mean.
    #[arg(long, conflicts_with = "parallel")]
    summary: bool,

    /// Read regions, samples and seed from a JSON file.
    #[arg(long, conflicts_with_all = [
        "florida_landfall_rate", "florida_mean", "florida_stddev",
        "gulf_landfall_rate", "gulf_mean", "gulf_stddev",
    ])]
    config: Option<PathBuf>,

    /// Log progress to stderr.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn model_config(&self) -> Result<ModelConfig, ModelError> {
        let mut config = match &self.config {
            Some(path) => ModelConfig::from_json_file(path)?,
            None => {
                let region = |name: &str, rate: Option<f64>, mean: Option<f64>, stddev: Option<f64>| RegionConfig {
                    name: name.to_string(),
                    landfall_rate: rate.unwrap_or_default(),
                    loss_mean: mean.unwrap_or_default(),
                    loss_stddev: stddev.unwrap_or_default(),
                };
                ModelConfig {
                    seed: None,
                    samples: 1000,
                    regions: vec![
                        region("Florida", self.florida_landfall_rate, self.florida_mean, self.florida_stddev),
                        region("Gulf states", self.gulf_landfall_rate, self.gulf_mean, self.gulf_stddev),
                    ],
                }
            }
        };
        if let Some(n) = self.samples {
            config.samples = n;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

fn run(cli: &Cli) -> Result<String, ModelError> {
    let config = cli.model_config()?;
    let n = config.validate()?;
    let regions = config.profiles();
    let seed = config.seed.unwrap_or_else(rand::random);
    info!(regions = regions.len(), samples = n, seed, "running loss model");

    if cli.summary {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let years = simulate_portfolio_annual_losses(&regions, n, &mut rng)?;
        let summary = LossSummary::from_annual_losses(&years).ok_or(ModelError::InvalidSampleCount(0))?;
        return Ok(serde_json::to_string(&summary)?);
    }

    let mean = if cli.parallel {
        run_loss_calculations_parallel(&regions, n, seed)?
    } else {
        run_loss_calculations(&regions, n, &mut ChaCha20Rng::seed_from_u64(seed))?
    };
    Ok(mean.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init("gethurricaneloss", cli.verbose);

    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "loss model failed");
            Err(e.into())
        }
    }
}
