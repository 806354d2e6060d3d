pub mod chart;
pub mod format;
pub mod layout;
pub mod render;
pub mod series;
pub mod style;

pub use chart::{build_chart, ChartArtifact, ChartConfig, ChartError, ChartInput, DEFAULT_HEIGHT};
pub use format::OutputFormat;
pub use layout::{Axis, Font, Layout, Margin, Title};
pub use render::RenderError;
pub use series::{Series, SeriesKind, SeriesMode};
pub use style::{StyleError, StyleOverlay};
