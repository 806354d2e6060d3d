use crate::data::Dataset;

use log::debug;
use rand::Rng;
use rand_distr::{Distribution, Normal};

pub const DEFAULT_SAMPLES: usize = 1500;
pub const DEFAULT_NOISE_MEAN: f64 = 1.0;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GenerateError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    pub n_samples: usize,
    /// Mean of the multiplicative noise term.
    pub noise_mean: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self { n_samples: DEFAULT_SAMPLES, noise_mean: DEFAULT_NOISE_MEAN }
    }
}

impl GeneratorConfig {
    pub fn with_samples(n_samples: usize) -> Self {
        Self { n_samples, ..Self::default() }
    }
}

/// Builds `x = 0..n` and `y = x * (1 + noise)` with
/// `noise ~ Normal(noise_mean, std / 10)`.
pub fn generate<R: Rng + ?Sized>(
    std: f64,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Dataset, GenerateError> {
    if !std.is_finite() || std < 0.0 {
        return Err(GenerateError::InvalidParameter(format!(
            "std must be a non-negative number, got {std}"
        )));
    }
    if config.n_samples == 0 {
        return Err(GenerateError::InvalidParameter(
            "sample count must be greater than zero".to_owned(),
        ));
    }
    if !config.noise_mean.is_finite() {
        return Err(GenerateError::InvalidParameter(format!(
            "noise mean must be finite, got {}",
            config.noise_mean
        )));
    }

    let normal = Normal::new(config.noise_mean, std / 10.0)
        .map_err(|e| GenerateError::InvalidParameter(e.to_string()))?;

    let x: Vec<f64> = (0..config.n_samples).map(|i| i as f64).collect();
    let y: Vec<f64> = x.iter().map(|&xi| xi * (1.0 + normal.sample(rng))).collect();

    debug!("generated {} samples with std {}", x.len(), std);

    Ok(Dataset { x, y })
}
