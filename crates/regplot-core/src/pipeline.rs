use crate::chart::{build_chart, ChartArtifact, ChartConfig, ChartError, ChartInput};
use crate::chart::{StyleError, StyleOverlay};
use crate::data::{generate, Dataset, GenerateError, GeneratorConfig};
use crate::fit::{fit, FitError, FitResult};

use log::debug;
use rand::Rng;

use std::path::PathBuf;

pub const DEFAULT_STD: f64 = 10.0;
pub const DEFAULT_STYLE_PATH: &str = "assets/fig_layout.json";

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error("fit failed: {0}")]
    Fit(#[from] FitError),
    #[error(transparent)]
    Style(#[from] StyleError),
    #[error(transparent)]
    Chart(#[from] ChartError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub generator: GeneratorConfig,
    pub chart: ChartConfig,
    pub style_path: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            chart: ChartConfig::default(),
            style_path: PathBuf::from(DEFAULT_STYLE_PATH),
        }
    }
}

/// Every intermediate value of one run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub dataset: Dataset,
    pub fit: FitResult,
    pub chart: ChartArtifact,
}

/// generate -> fit -> load style -> build chart. Any failure aborts the run,
/// a chart is never built without its style.
pub fn run_pipeline<R: Rng + ?Sized>(
    std: f64,
    config: &PipelineConfig,
    rng: &mut R,
) -> Result<PipelineOutput, PipelineError> {
    let dataset = generate(std, &config.generator, rng)?;
    let fit = fit(&dataset)?;

    debug!("loading style from {}", config.style_path.display());
    let style = StyleOverlay::load(&config.style_path)?;

    // the series label describes the noise the samples were drawn with
    let chart_config = ChartConfig { noise_mean: config.generator.noise_mean, ..config.chart };
    let input = ChartInput {
        x: dataset.x(),
        y: dataset.y(),
        predictions: &fit.predictions,
        r_squared: fit.r_squared,
        std,
    };
    let chart = build_chart(&input, &chart_config, &style)?;

    Ok(PipelineOutput { dataset, fit, chart })
}

pub fn plot_regression_with_rng<R: Rng + ?Sized>(
    std: f64,
    config: &PipelineConfig,
    rng: &mut R,
) -> Result<ChartArtifact, PipelineError> {
    Ok(run_pipeline(std, config, rng)?.chart)
}

/// Same as [`plot_regression_with_rng`] drawing from the thread local generator.
pub fn plot_regression(std: f64, config: &PipelineConfig) -> Result<ChartArtifact, PipelineError> {
    plot_regression_with_rng(std, config, &mut rand::rng())
}
