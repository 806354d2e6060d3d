pub mod chart;
pub mod cmd;
pub mod data;
pub mod fit;
pub mod pipeline;
pub mod stats;

pub use chart::{build_chart, ChartArtifact, ChartConfig, ChartInput, StyleOverlay};
pub use data::{generate, Dataset, GeneratorConfig};
pub use fit::{fit, FitResult};
pub use pipeline::{
    plot_regression, plot_regression_with_rng, run_pipeline, PipelineConfig, PipelineError,
    PipelineOutput,
};
