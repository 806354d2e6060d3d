pub mod dataset;
pub mod generator;

pub use dataset::Dataset;
pub use generator::{generate, GenerateError, GeneratorConfig, DEFAULT_NOISE_MEAN, DEFAULT_SAMPLES};
