//! Monte Carlo estimate of mean annual hurricane loss across a portfolio of
//! regions. Landfall counts are Poisson, per-event losses LogNormal.

pub mod analysis;
pub mod config;
pub mod error;
pub mod estimator;
pub mod portfolio;
pub mod region;
pub mod telemetry;

pub use error::{ModelError, Result};
pub use estimator::{estimate_region_loss, simulate_annual_losses};
pub use portfolio::{run_loss_calculations, run_loss_calculations_parallel, simulate_portfolio_annual_losses};
pub use region::RegionProfile;
