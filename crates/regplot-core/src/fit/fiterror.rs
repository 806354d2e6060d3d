use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FitError {
    LengthMismatch { len_x: usize, len_y: usize },
    InsufficientData { len: usize, needed: usize },
    DegenerateFit, // no variance in x
    StatError(&'static str),
}

impl fmt::Display for FitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitError::LengthMismatch { len_x, len_y } => {
                write!(f, "x and y have different lengths: {len_x} vs {len_y}")
            },
            FitError::InsufficientData { len, needed } => {
                write!(f, "not enough points: got {len}, need at least {needed}")
            },
            FitError::DegenerateFit => {
                write!(f, "degenerate fit: no variance in x")
            },
            FitError::StatError(msg) => write!(f, "statistical error: {msg}"),
        }
    }
}

impl std::error::Error for FitError {}
