use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Scatter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesMode {
    Markers,
    Lines,
}

impl std::fmt::Display for SeriesMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesMode::Markers => write!(f, "markers"),
            SeriesMode::Lines => write!(f, "lines"),
        }
    }
}

/// One trace of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    #[serde(rename = "type")]
    pub kind: SeriesKind,
    pub mode: SeriesMode,
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Series {
    pub fn markers(name: impl Into<String>, x: &[f64], y: &[f64]) -> Self {
        Self::new(SeriesMode::Markers, name, x, y)
    }
    pub fn lines(name: impl Into<String>, x: &[f64], y: &[f64]) -> Self {
        Self::new(SeriesMode::Lines, name, x, y)
    }

    fn new(mode: SeriesMode, name: impl Into<String>, x: &[f64], y: &[f64]) -> Self {
        Self { kind: SeriesKind::Scatter, mode, name: name.into(), x: x.to_vec(), y: y.to_vec() }
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}
