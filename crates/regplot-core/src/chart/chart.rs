use crate::chart::layout::Layout;
use crate::chart::series::Series;
use crate::chart::style::{StyleError, StyleOverlay};
use crate::data::DEFAULT_NOISE_MEAN;

use log::debug;
use serde::Serialize;

pub const DEFAULT_HEIGHT: u32 = 700;
pub const FIT_SERIES_NAME: &str = "linear regression";

#[derive(thiserror::Error, Debug)]
pub enum ChartError {
    #[error("series lengths differ: x {x}, y {y}, predictions {predictions}")]
    LengthMismatch { x: usize, y: usize, predictions: usize },
    #[error(transparent)]
    Style(#[from] StyleError),
}

/// Everything the chart shows about one fit.
#[derive(Debug, Clone, Copy)]
pub struct ChartInput<'a> {
    pub x: &'a [f64],
    pub y: &'a [f64],
    pub predictions: &'a [f64],
    pub r_squared: f64,
    pub std: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartConfig {
    pub height: u32,
    /// Only used to describe the sample series.
    pub noise_mean: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self { height: DEFAULT_HEIGHT, noise_mean: DEFAULT_NOISE_MEAN }
    }
}

/// Plotly style figure: the traces plus their layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartArtifact {
    pub data: Vec<Series>,
    pub layout: Layout,
}

impl ChartArtifact {
    pub fn series(&self) -> &[Series] {
        &self.data
    }
    pub fn title(&self) -> &str {
        &self.layout.title.text
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn chart_title(r_squared: f64) -> String {
    format!("Regression fit example with R squared: {:.3}", r_squared)
}

pub fn samples_label(noise_mean: f64, std: f64) -> String {
    format!("x * (1 + rand_norm(mean={noise_mean}, std={std}/10))")
}

pub fn build_chart(
    input: &ChartInput,
    config: &ChartConfig,
    style: &StyleOverlay,
) -> Result<ChartArtifact, ChartError> {
    let (nx, ny, np) = (input.x.len(), input.y.len(), input.predictions.len());
    if nx != ny || nx != np {
        return Err(ChartError::LengthMismatch { x: nx, y: ny, predictions: np });
    }

    let layout = Layout::new(chart_title(input.r_squared), config.height).merged(style)?;

    let data = vec![
        Series::markers(samples_label(config.noise_mean, input.std), input.x, input.y),
        Series::lines(FIT_SERIES_NAME, input.x, input.predictions),
    ];

    debug!("built chart '{}' with {} points", layout.title.text, nx);

    Ok(ChartArtifact { data, layout })
}
