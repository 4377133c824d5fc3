use thiserror::Error;

/// Errors raised while validating inputs or running the loss model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("landfall rate must be >= 0, got {0}")]
    NegativeLandfallRate(f64),

    #[error("loss standard deviation must be >= 0, got {0}")]
    NegativeLossStddev(f64),

    #[error("{field} must be finite, got {value}")]
    NonFiniteParameter { field: &'static str, value: f64 },

    #[error("number of samples must be > 0, got {0}")]
    InvalidSampleCount(i64),

    /// The sampling library refused the distribution parameters.
    #[error("invalid distribution parameters: {0}")]
    Distribution(String),

    #[error("aggregate loss overflowed")]
    NonFiniteLoss,

    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ModelError {
    /// True for the caller-input error kinds (bad parameters or sample count).
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            ModelError::NegativeLandfallRate(_)
                | ModelError::NegativeLossStddev(_)
                | ModelError::NonFiniteParameter { .. }
                | ModelError::InvalidSampleCount(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;

/// Convert a caller-supplied sample count into the unsigned count the
/// estimator takes. Zero and negative counts are rejected.
pub fn sample_count(n: i64) -> Result<u64> {
    if n <= 0 {
        return Err(ModelError::InvalidSampleCount(n));
    }
    Ok(n as u64)
}

/// Estimator-side guard against a zero sample count.
pub(crate) fn require_samples(n: u64) -> Result<()> {
    if n == 0 {
        return Err(ModelError::InvalidSampleCount(0));
    }
    Ok(())
}
