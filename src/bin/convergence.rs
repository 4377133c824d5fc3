//! Spread and run time of the portfolio estimate versus sample count.
//!
//! Writes one JSON object per sample count to stdout (NDJSON) and a table to
//! stderr. Usage: `convergence [--config PATH] [--repeats R] [--max-exponent E]`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use hurriloss::analysis::convergence_study;
use hurriloss::config::ModelConfig;
use hurriloss::telemetry;

#[derive(Parser)]
#[command(name = "convergence", about = "Time the loss model at 10, 100, ... samples")]
struct Args {
    /// Model configuration; defaults to the canonical Florida / Gulf pair.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Runs per sample count.
    #[arg(long, default_value_t = 10)]
    repeats: usize,

    /// Largest sample count is 10^E.
    #[arg(long, default_value_t = 4)]
    max_exponent: u32,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    telemetry::init("convergence", args.verbose);

    let config = match &args.config {
        Some(path) => ModelConfig::from_json_file(path).with_context(|| format!("reading {}", path.display()))?,
        None => ModelConfig::canonical(),
    };
    config.validate()?;

    let sample_counts: Vec<u64> = (1..=args.max_exponent).map(|e| 10u64.pow(e)).collect();
    let points = convergence_study(&config.profiles(), &sample_counts, args.repeats, config.seed.unwrap_or(42))?;

    for point in &points {
        println!("{}", serde_json::to_string(point)?);
    }

    let analytic: f64 = config.profiles().iter().map(|r| r.expected_annual_loss()).sum();
    eprintln!(
        "convergence: {} regions, {} repeats, analytic mean {analytic:.4}",
        config.regions.len(),
        args.repeats
    );
    for p in &points {
        eprintln!(
            "  n={:<8}  mean={:>12.4}  std={:>10.4}  secs={:.6} ± {:.6}",
            p.samples, p.mean_estimate, p.std_estimate, p.mean_secs, p.std_secs
        );
    }
    Ok(())
}
